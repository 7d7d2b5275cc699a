//! Conversion between garage slot positions and the icon ids shown in them.
//!
//! Positions `1..=display_count` show every non-banned icon in ascending
//! order. The banned icons follow in the slots up to `max_position`, and
//! anything past `max_position` (custom icons) is shown as-is.

use crate::config::{CategoryConfig, CategoryTable, PAGE_SIZE};
use crate::category::Category;

/// Icon id displayed at `position`.
pub fn to_display(config: &CategoryConfig, position: u32) -> u32 {
    let shown = config.display_count();
    if position <= shown {
        let mut id = position;
        for &banned in &config.banned {
            if banned <= id {
                id += 1;
            } else {
                break;
            }
        }
        id
    } else if position <= config.max_position {
        let idx = (position - shown - 1) as usize;
        config.banned.get(idx).copied().unwrap_or(position)
    } else {
        position
    }
}

/// Position that displays `display_id`. Inverse of [`to_display`].
pub fn to_position(config: &CategoryConfig, display_id: u32) -> u32 {
    if display_id > config.max_position {
        return display_id;
    }
    if let Some(rank) = config.banned_rank(display_id) {
        return config.display_count() + rank as u32;
    }
    let before = config
        .banned
        .iter()
        .take_while(|&&banned| banned < display_id)
        .count() as u32;
    display_id - before
}

/// Where a display id sits in the paged garage.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SlotAddress {
    /// 0-based page.
    pub page: u32,
    /// 0-based slot within the page.
    pub slot: u32,
}

impl SlotAddress {
    pub fn of_position(position: u32) -> Self {
        let zero_based = position.saturating_sub(1);
        Self {
            page: zero_based / PAGE_SIZE,
            slot: zero_based % PAGE_SIZE,
        }
    }
}

pub fn locate(config: &CategoryConfig, display_id: u32) -> SlotAddress {
    SlotAddress::of_position(to_position(config, display_id))
}

impl CategoryTable {
    /// [`to_display`] for `category`; families not in the table pass through.
    pub fn to_display(&self, category: Category, position: u32) -> u32 {
        match self.get(category) {
            Some(config) => to_display(config, position),
            None => position,
        }
    }

    /// [`to_position`] for `category`; families not in the table pass through.
    pub fn to_position(&self, category: Category, display_id: u32) -> u32 {
        match self.get(category) {
            Some(config) => to_position(config, display_id),
            None => display_id,
        }
    }

    pub fn locate(&self, category: Category, display_id: u32) -> SlotAddress {
        SlotAddress::of_position(self.to_position(category, display_id))
    }
}
