use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::category::Category;
use crate::Result;

/// Number of slots on one garage page.
pub const PAGE_SIZE: u32 = 36;

/// Scale the garage draws unlocked icons at. Lock scales are expressed
/// relative to it.
const BASE_ICON_SCALE: f32 = 0.8;

// Icons added by the 2.21 update, per family. They keep their engine
// positions but are moved behind every other icon in the garage.
const CUBE_BANNED: &[u32] = &[
    156, 157, 169, 170, 174, 182, 183, 184, 187, 193, 194, 195, 197, 198, 201,
    208, 209, 210, 211, 214, 215, 216, 219, 220, 223, 224, 231, 234, 241, 243,
    248, 251, 252, 254, 257, 258, 260, 262, 266, 277, 279, 283, 286, 288, 292,
    297, 304, 305, 306, 307, 309, 310, 311, 320, 321, 324, 327, 332, 337, 339,
    343, 346, 347, 351, 354, 357, 362, 363, 364, 369, 370, 372, 375, 378, 379,
    381, 387, 390, 399, 400, 401, 409, 411, 412, 413, 416, 417, 422, 423, 424,
    427, 430, 433, 434, 435, 439, 440, 442, 444, 445, 447, 448, 449, 451, 452,
    454, 455, 458, 460, 462, 468, 469, 470, 472, 473, 475, 477, 479, 481, 484,
];

const SHIP_BANNED: &[u32] = &[
    54, 56, 57, 61, 67, 68, 74, 76, 84, 86, 92, 93, 95, 100, 101, 102, 104,
    106, 107, 109, 113, 115, 117, 118, 119, 120, 121, 124, 128, 133, 139, 145,
    146, 147, 149, 151, 152, 153, 154, 155, 157, 158, 159, 165, 167,
];

const BALL_BANNED: &[u32] = &[
    47, 48, 50, 51, 59, 63, 73, 74, 86, 90, 91, 95, 97, 99, 100, 108, 114,
];

const BIRD_BANNED: &[u32] = &[
    41, 43, 44, 46, 48, 49, 50, 51, 54, 55, 57, 59, 60, 62, 63, 64, 65, 66,
    68, 69, 70, 71, 72, 76, 82, 88, 89, 90, 92, 96, 98, 101, 105, 109, 110,
    111, 112, 113, 114, 115, 116, 120, 122, 124, 125, 128, 129, 130, 131, 133,
    134, 138, 139, 145, 147,
];

const DART_BANNED: &[u32] = &[39, 40, 44, 48, 55, 61, 67, 69, 70, 83, 86, 88, 92, 95];

const ROBOT_BANNED: &[u32] = &[37];

const SPIDER_BANNED: &[u32] = &[27, 30, 31, 33, 37, 40, 68];

const SWING_BANNED: &[u32] = &[5, 17, 24, 33];

/// (family, banned icons, vanilla icon count, locked sprite aspect)
const BUILTIN: [(Category, &[u32], u32, f32); 8] = [
    (Category::Cube, CUBE_BANNED, 484, 1.000),
    (Category::Ship, SHIP_BANNED, 169, 1.333),
    (Category::Ball, BALL_BANNED, 118, 1.067),
    (Category::Bird, BIRD_BANNED, 149, 1.176),
    (Category::Dart, DART_BANNED, 96, 1.000),
    (Category::Robot, ROBOT_BANNED, 68, 1.231),
    (Category::Spider, SPIDER_BANNED, 69, 1.231),
    (Category::Swing, SWING_BANNED, 43, 1.143),
];

/// Problems found in an externally supplied category table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{category}: max_position must be at least 1")]
    ZeroMaxPosition { category: Category },

    #[error("{category}: banned list must be strictly ascending ({prev} is followed by {next})")]
    BannedNotAscending {
        category: Category,
        prev: u32,
        next: u32,
    },

    #[error("{category}: banned position {value} is outside 1..={max}")]
    BannedOutOfRange {
        category: Category,
        value: u32,
        max: u32,
    },

    #[error("{category}: lock_scale {scale} must be a positive number")]
    BadLockScale { category: Category, scale: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub banned: Vec<u32>,
    pub max_position: u32,
    pub lock_scale: f32,
}

impl CategoryConfig {
    /// Number of slots left once banned positions are taken out of the
    /// main sequence.
    pub fn display_count(&self) -> u32 {
        self.max_position.saturating_sub(self.banned.len() as u32)
    }

    pub fn is_banned(&self, id: u32) -> bool {
        self.banned.binary_search(&id).is_ok()
    }

    /// 1-based rank of `id` within the banned list.
    pub fn banned_rank(&self, id: u32) -> Option<usize> {
        self.banned.binary_search(&id).ok().map(|idx| idx + 1)
    }

    pub fn page_count(&self) -> u32 {
        self.max_position.div_ceil(PAGE_SIZE)
    }

    /// Slots shown on `page` (0-based) within the vanilla range.
    pub fn slots_on_page(&self, page: u32) -> u32 {
        let first = page.saturating_mul(PAGE_SIZE);
        if first >= self.max_position {
            return 0;
        }
        (self.max_position - first).min(PAGE_SIZE)
    }

    fn validate(&self, category: Category) -> std::result::Result<(), ConfigError> {
        if self.max_position == 0 {
            return Err(ConfigError::ZeroMaxPosition { category });
        }
        if !self.lock_scale.is_finite() || self.lock_scale <= 0.0 {
            return Err(ConfigError::BadLockScale {
                category,
                scale: self.lock_scale,
            });
        }
        for pair in self.banned.windows(2) {
            if pair[0] >= pair[1] {
                return Err(ConfigError::BannedNotAscending {
                    category,
                    prev: pair[0],
                    next: pair[1],
                });
            }
        }
        if let Some(&value) = self
            .banned
            .iter()
            .find(|&&v| v == 0 || v > self.max_position)
        {
            return Err(ConfigError::BannedOutOfRange {
                category,
                value,
                max: self.max_position,
            });
        }
        Ok(())
    }
}

/// Immutable per-family configuration. Families missing from the table are
/// left alone by the remapper and the page reconciler.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTable {
    categories: BTreeMap<Category, CategoryConfig>,
}

impl CategoryTable {
    /// The compiled-in table for running a 2.21 client as a 2.2 garage.
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|&(category, banned, max_position, aspect)| {
                (
                    category,
                    CategoryConfig {
                        banned: banned.to_vec(),
                        max_position,
                        lock_scale: aspect / BASE_ICON_SCALE,
                    },
                )
            })
            .collect();
        Self { categories }
    }

    pub fn from_configs(
        configs: impl IntoIterator<Item = (Category, CategoryConfig)>,
    ) -> Result<Self> {
        let table = Self {
            categories: configs.into_iter().collect(),
        };
        table.validate()?;
        Ok(table)
    }

    pub fn from_json(src: &str) -> Result<Self> {
        let table: CategoryTable = serde_json::from_str(src)?;
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn get(&self, category: Category) -> Option<&CategoryConfig> {
        self.categories.get(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryConfig)> {
        self.categories.iter().map(|(&c, cfg)| (c, cfg))
    }

    fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (category, config) in self.iter() {
            config.validate(category)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IconShiftError;

    #[test]
    fn builtin_tables_are_well_formed() {
        let table = CategoryTable::builtin();
        table.validate().unwrap();
        assert_eq!(table.iter().count(), 8);

        let cube = table.get(Category::Cube).unwrap();
        assert_eq!(cube.max_position, 484);
        assert_eq!(cube.banned.len(), 120);
        assert_eq!(cube.display_count(), 364);

        let robot = table.get(Category::Robot).unwrap();
        assert_eq!(robot.display_count(), 67);
        assert!((robot.lock_scale - 1.231 / 0.8).abs() < 1e-6);
    }

    #[test]
    fn pages_split_at_thirty_six() {
        let swing = CategoryTable::builtin().get(Category::Swing).cloned().unwrap();
        assert_eq!(swing.page_count(), 2);
        assert_eq!(swing.slots_on_page(0), 36);
        assert_eq!(swing.slots_on_page(1), 7);
        assert_eq!(swing.slots_on_page(2), 0);

        let even = CategoryConfig {
            banned: vec![],
            max_position: 72,
            lock_scale: 1.0,
        };
        assert_eq!(even.page_count(), 2);
        assert_eq!(even.slots_on_page(1), 36);
    }

    #[test]
    fn banned_rank_is_one_based() {
        let cfg = CategoryConfig {
            banned: vec![2, 5],
            max_position: 6,
            lock_scale: 1.0,
        };
        assert_eq!(cfg.banned_rank(2), Some(1));
        assert_eq!(cfg.banned_rank(5), Some(2));
        assert_eq!(cfg.banned_rank(3), None);
    }

    #[test]
    fn loads_custom_json_table() {
        let src = r#"{
            "robot": { "banned": [3, 9], "max_position": 12, "lock_scale": 1.5 }
        }"#;
        let table = CategoryTable::from_json(src).unwrap();
        assert!(table.get(Category::Cube).is_none());
        assert_eq!(table.get(Category::Robot).unwrap().display_count(), 10);

        let again = CategoryTable::from_json(&table.to_json_pretty().unwrap()).unwrap();
        assert_eq!(again, table);
    }

    #[test]
    fn rejects_unsorted_banned_list() {
        let src = r#"{ "ship": { "banned": [5, 2], "max_position": 6, "lock_scale": 1.0 } }"#;
        match CategoryTable::from_json(src) {
            Err(IconShiftError::Config(ConfigError::BannedNotAscending { prev, next, .. })) => {
                assert_eq!((prev, next), (5, 2));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_duplicates_range_and_scale() {
        let dup = r#"{ "ball": { "banned": [4, 4], "max_position": 6, "lock_scale": 1.0 } }"#;
        assert!(matches!(
            CategoryTable::from_json(dup),
            Err(IconShiftError::Config(ConfigError::BannedNotAscending { .. }))
        ));

        let range = r#"{ "ball": { "banned": [7], "max_position": 6, "lock_scale": 1.0 } }"#;
        assert!(matches!(
            CategoryTable::from_json(range),
            Err(IconShiftError::Config(ConfigError::BannedOutOfRange { value: 7, .. }))
        ));

        let scale = r#"{ "ball": { "banned": [], "max_position": 6, "lock_scale": 0.0 } }"#;
        assert!(matches!(
            CategoryTable::from_json(scale),
            Err(IconShiftError::Config(ConfigError::BadLockScale { .. }))
        ));
    }

    #[test]
    fn rejects_unknown_category_keys() {
        let src = r#"{ "jetpack": { "banned": [], "max_position": 6, "lock_scale": 1.0 } }"#;
        assert!(matches!(
            CategoryTable::from_json(src),
            Err(IconShiftError::Json(_))
        ));
    }
}
