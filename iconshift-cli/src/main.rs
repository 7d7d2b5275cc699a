use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use iconshift_core::{to_display, Category, CategoryConfig, CategoryTable, Result, PAGE_SIZE};

#[derive(Debug, Parser)]
#[command(name = "iconshift", version, about = "Inspect garage icon remapping tables")]
struct Args {
    /// Category table JSON. Defaults to the user table in the config
    /// directory, then the built-in table.
    #[arg(long, global = true)]
    table: Option<PathBuf>,

    #[arg(long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Icon shown at each slot position
    Display {
        category: Category,
        #[arg(required = true)]
        positions: Vec<u32>,
    },
    /// Slot position that shows each icon
    Position {
        category: Category,
        #[arg(required = true)]
        icons: Vec<u32>,
    },
    /// Page and slot each icon ends up on
    Locate {
        category: Category,
        #[arg(required = true)]
        icons: Vec<u32>,
    },
    /// List one garage page (0-based)
    Page { category: Category, page: u32 },
    /// Print the active table as JSON
    Table,
    /// Validate a table file
    Check { path: PathBuf },
}

fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn user_table_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir().or_else(dirs::data_dir)?;
    base.push("IconShift");
    base.push("table.json");
    Some(base)
}

fn resolve_table(explicit: Option<&Path>) -> Result<CategoryTable> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "loading table");
        return CategoryTable::load(path);
    }
    if let Some(path) = user_table_path().filter(|p| p.exists()) {
        debug!(path = %path.display(), "loading user table");
        return CategoryTable::load(&path);
    }
    Ok(CategoryTable::builtin())
}

fn managed_config(table: &CategoryTable, category: Category) -> Option<&CategoryConfig> {
    let config = table.get(category);
    if config.is_none() {
        info!(%category, "category not in table, values pass through");
    }
    config
}

fn print_page(config: Option<&CategoryConfig>, category: Category, page: u32) {
    let first = page.saturating_mul(PAGE_SIZE) + 1;
    let slots = config.map_or(PAGE_SIZE, |c| c.slots_on_page(page));
    if slots == 0 {
        println!("{category}: page {page} is past the vanilla icons");
        return;
    }
    println!("{category} page {page} ({slots} slots)");
    for i in 0..slots {
        let position = first + i;
        let (icon, banned) = match config {
            Some(c) => {
                let icon = to_display(c, position);
                (icon, c.is_banned(icon))
            }
            None => (position, false),
        };
        let marker = if banned { "  banned" } else { "" };
        println!("  slot {i:>2}  position {position:>4}  icon {icon:>4}{marker}");
    }
}

fn check(path: &Path) -> Result<()> {
    let table = CategoryTable::load(path)?;
    for (category, config) in table.iter() {
        println!(
            "{category}: {} icons, {} banned, {} pages",
            config.max_position,
            config.banned.len(),
            config.page_count()
        );
    }
    println!("{} is valid", path.display());
    Ok(())
}

fn execute(args: Args) -> Result<()> {
    let table = || resolve_table(args.table.as_deref());

    match args.command {
        Command::Display {
            category,
            positions,
        } => {
            let table = table()?;
            for position in positions {
                let icon = table.to_display(category, position);
                println!("{category} position {position} -> icon {icon}");
            }
        }
        Command::Position { category, icons } => {
            let table = table()?;
            for icon in icons {
                let position = table.to_position(category, icon);
                println!("{category} icon {icon} -> position {position}");
            }
        }
        Command::Locate { category, icons } => {
            let table = table()?;
            managed_config(&table, category);
            for icon in icons {
                let addr = table.locate(category, icon);
                println!(
                    "{category} icon {icon} -> page {} slot {}",
                    addr.page, addr.slot
                );
            }
        }
        Command::Page { category, page } => {
            let table = table()?;
            print_page(managed_config(&table, category), category, page);
        }
        Command::Table => {
            println!("{}", table()?.to_json_pretty()?);
        }
        Command::Check { path } => check(&path)?,
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.debug);

    if let Err(err) = execute(args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
