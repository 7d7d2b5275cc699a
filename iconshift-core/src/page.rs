//! Garage page setup: picks the page, retags the slot buttons with the icon
//! they actually show, applies locks and moves the selection cursor.

use serde::{Deserialize, Serialize};
use std::ops::Add;
use tracing::{debug, trace, warn};

use crate::category::IconType;
use crate::config::{CategoryTable, PAGE_SIZE};
use crate::gate::{IconBuilder, RemapGate};
use crate::remap::{to_display, to_position, SlotAddress};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// One selectable icon button on a garage page.
pub trait SlotWidget {
    /// Id the garage equips when the button is pressed.
    fn set_tag(&mut self, tag: u32);
    /// Position relative to the slot menu.
    fn position(&self) -> Point;
    fn change_to_locked_state(&mut self, scale: f32);
}

/// The selection cursor drawn over the equipped icon.
pub trait CursorNode {
    fn set_position(&mut self, position: Point);
    fn set_visible(&mut self, visible: bool);
}

/// Player state owned by the game.
pub trait IconHost {
    fn active_icon(&self, icon_type: IconType) -> u32;
    fn is_icon_unlocked(&self, display_id: u32, icon_type: IconType) -> bool;
}

/// The garage screen the reconciler works on.
pub trait GarageLayer {
    type Slot: SlotWidget;
    type Cursor: CursorNode;

    /// The game's own page setup. `None` asks for the page holding the
    /// equipped icon. Item icons must be built through `icons`.
    fn setup_page(&mut self, page: Option<u32>, icon_type: IconType, icons: IconBuilder<'_>);

    /// Origin of the slot menu in the cursor's parent space.
    fn menu_origin(&self) -> Point;

    /// Slot buttons of the current page, in order.
    fn slots_mut(&mut self) -> &mut [Self::Slot];

    fn cursor_by_id(&mut self, id: &str) -> Option<&mut Self::Cursor>;

    fn cursor_by_index(&mut self, index: usize) -> Option<&mut Self::Cursor>;
}

/// How to find the cursor node on the garage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorLocator {
    Id(String),
    /// Direct child index of the layer. Only useful before node ids have been
    /// assigned, which happens on the first garage visit.
    ChildIndex(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcilerSettings {
    /// Tried in order; the first hit is used.
    pub cursor_locators: Vec<CursorLocator>,
}

impl Default for ReconcilerSettings {
    fn default() -> Self {
        Self {
            cursor_locators: vec![
                CursorLocator::Id("cursor-1".to_string()),
                CursorLocator::ChildIndex(11),
            ],
        }
    }
}

/// Converts the game's page argument, where `-1` means "wherever the
/// equipped icon is".
pub fn page_request(raw: i32) -> Option<u32> {
    u32::try_from(raw).ok()
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CursorPlacement {
    Shown(Point),
    Hidden,
    /// No cursor node could be found.
    Missing,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PageSummary {
    pub page: u32,
    pub slots: usize,
    pub locked: usize,
    pub cursor: CursorPlacement,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PageReport {
    /// The tab is not remapped; the game's setup ran untouched.
    Bypassed,
    Reconciled(PageSummary),
}

pub struct PageReconciler<'a> {
    table: &'a CategoryTable,
    gate: &'a RemapGate,
    settings: ReconcilerSettings,
}

impl<'a> PageReconciler<'a> {
    pub fn new(table: &'a CategoryTable, gate: &'a RemapGate) -> Self {
        Self::with_settings(table, gate, ReconcilerSettings::default())
    }

    pub fn with_settings(
        table: &'a CategoryTable,
        gate: &'a RemapGate,
        settings: ReconcilerSettings,
    ) -> Self {
        Self {
            table,
            gate,
            settings,
        }
    }

    pub fn icons(&self) -> IconBuilder<'a> {
        IconBuilder::new(self.table, self.gate)
    }

    /// Entry point for the game's "set up garage page" call.
    pub fn setup_page<L, H>(
        &self,
        layer: &mut L,
        host: &H,
        page: Option<u32>,
        icon_type: IconType,
    ) -> PageReport
    where
        L: GarageLayer,
        H: IconHost + ?Sized,
    {
        let icons = self.icons();
        let Some((category, config)) = icon_type
            .category()
            .and_then(|c| self.table.get(c).map(|cfg| (c, cfg)))
        else {
            layer.setup_page(page, icon_type, icons);
            return PageReport::Bypassed;
        };

        let remap = self.gate.engage();

        let active = host.active_icon(icon_type);
        let page = page.unwrap_or_else(|| SlotAddress::of_position(to_position(config, active)).page);

        layer.setup_page(Some(page), icon_type, icons);

        let origin = layer.menu_origin();
        let first = page.saturating_mul(PAGE_SIZE).saturating_add(1);
        let mut slots = 0;
        let mut locked = 0;
        let mut cursor_at = None;

        for (i, slot) in layer
            .slots_mut()
            .iter_mut()
            .take(PAGE_SIZE as usize)
            .enumerate()
        {
            let position = first.saturating_add(i as u32);
            let display_id = to_display(config, position);
            let is_locked = !host.is_icon_unlocked(display_id, icon_type);

            slot.set_tag(display_id);

            if display_id == active {
                cursor_at = Some(origin + slot.position());
            }

            if is_locked {
                let _literal = self.gate.suspend();
                icons.change_to_locked_state(slot, config.lock_scale);
                locked += 1;
            }

            trace!(%category, position, display_id, is_locked, "slot");
            slots += 1;
        }

        let cursor = self.place_cursor(layer, cursor_at);
        drop(remap);

        debug!(%category, page, slots, locked, ?cursor, "garage page reconciled");

        PageReport::Reconciled(PageSummary {
            page,
            slots,
            locked,
            cursor,
        })
    }

    fn place_cursor<L: GarageLayer>(&self, layer: &mut L, target: Option<Point>) -> CursorPlacement {
        for locator in &self.settings.cursor_locators {
            let found = match locator {
                CursorLocator::Id(id) => layer.cursor_by_id(id),
                CursorLocator::ChildIndex(index) => layer.cursor_by_index(*index),
            };
            if let Some(cursor) = found {
                return match target {
                    Some(position) => {
                        cursor.set_position(position);
                        cursor.set_visible(true);
                        CursorPlacement::Shown(position)
                    }
                    // The game may think the equipped icon is on this page
                    // when the remapped layout puts it elsewhere.
                    None => {
                        cursor.set_visible(false);
                        CursorPlacement::Hidden
                    }
                };
            }
        }
        warn!("no cursor node found on the garage layer");
        CursorPlacement::Missing
    }
}
