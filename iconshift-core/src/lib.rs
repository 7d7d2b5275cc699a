//! Garage icon remapping for running a newer client with an older icon set.
//!
//! Icons introduced by a later update stay at their engine positions but are
//! pushed behind every other icon in the garage, so the pages show an
//! unbroken sequence. [`remap`] converts between slot positions and the
//! icons they display, and [`page`] applies that to a live garage page.

use thiserror::Error;

pub mod category;
pub mod config;
pub mod gate;
pub mod page;
pub mod remap;

pub use category::{Category, IconType};
pub use config::{CategoryConfig, CategoryTable, ConfigError, PAGE_SIZE};
pub use gate::{GateGuard, IconBuilder, RemapGate};
pub use page::{
    page_request, CursorLocator, CursorNode, CursorPlacement, GarageLayer, IconHost,
    PageReconciler, PageReport, PageSummary, Point, ReconcilerSettings, SlotWidget,
};
pub use remap::{locate, to_display, to_position, SlotAddress};

#[derive(Debug, Error)]
pub enum IconShiftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("unknown icon category '{0}'")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, IconShiftError>;
