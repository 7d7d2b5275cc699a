use std::cell::Cell;

use crate::category::IconType;
use crate::config::CategoryTable;
use crate::page::SlotWidget;

/// Decides whether icon construction goes through the remapper.
///
/// Only changed through guards, which put the previous state back when they
/// drop, so an early return or unwind cannot leave the gate engaged.
#[derive(Debug, Default)]
pub struct RemapGate {
    engaged: Cell<bool>,
}

impl RemapGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged.get()
    }

    /// Remap icons until the guard drops.
    pub fn engage(&self) -> GateGuard<'_> {
        self.set_scoped(true)
    }

    /// Build icons literally until the guard drops.
    pub fn suspend(&self) -> GateGuard<'_> {
        self.set_scoped(false)
    }

    fn set_scoped(&self, engaged: bool) -> GateGuard<'_> {
        let prior = self.engaged.replace(engaged);
        GateGuard { gate: self, prior }
    }
}

#[must_use = "the gate reverts as soon as the guard is dropped"]
pub struct GateGuard<'a> {
    gate: &'a RemapGate,
    prior: bool,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.engaged.set(self.prior);
    }
}

/// Icon construction hooks handed to the garage while it builds a page.
#[derive(Clone, Copy)]
pub struct IconBuilder<'a> {
    table: &'a CategoryTable,
    gate: &'a RemapGate,
}

impl<'a> IconBuilder<'a> {
    pub fn new(table: &'a CategoryTable, gate: &'a RemapGate) -> Self {
        Self { table, gate }
    }

    pub fn is_remapping(&self) -> bool {
        self.gate.is_engaged()
    }

    /// Icon id an item icon created for `position` should draw.
    pub fn item_for(&self, icon_type: IconType, position: u32) -> u32 {
        match icon_type.category() {
            Some(category) if self.gate.is_engaged() => self.table.to_display(category, position),
            _ => position,
        }
    }

    /// Applies the locked look unless the gate is engaged. Locks computed
    /// while a page is being built refer to positions, not the icons that end
    /// up shown, so the page reconciler applies them afterwards.
    pub fn change_to_locked_state<S: SlotWidget + ?Sized>(&self, slot: &mut S, scale: f32) -> bool {
        if self.gate.is_engaged() {
            return false;
        }
        slot.change_to_locked_state(scale);
        true
    }
}
