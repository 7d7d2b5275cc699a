use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::IconShiftError;

/// Unlock family an icon belongs to. Only these families are remapped.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cube,
    Ship,
    Ball,
    Bird,
    Dart,
    Robot,
    Spider,
    Swing,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Cube,
        Category::Ship,
        Category::Ball,
        Category::Bird,
        Category::Dart,
        Category::Robot,
        Category::Spider,
        Category::Swing,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Cube => "cube",
            Category::Ship => "ship",
            Category::Ball => "ball",
            Category::Bird => "bird",
            Category::Dart => "dart",
            Category::Robot => "robot",
            Category::Spider => "spider",
            Category::Swing => "swing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = IconShiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n = s.trim().to_ascii_lowercase();
        // The garage calls the bird tab "ufo" and the dart tab "wave".
        match n.as_str() {
            "ufo" => return Ok(Category::Bird),
            "wave" => return Ok(Category::Dart),
            _ => {}
        }
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name() == n)
            .ok_or_else(|| IconShiftError::UnknownCategory(s.to_string()))
    }
}

/// Garage tab the host asks to set up. Tabs without a [`Category`] are
/// never remapped.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IconType {
    Cube,
    Ship,
    Ball,
    Ufo,
    Wave,
    Robot,
    Spider,
    Swing,
    DeathEffect,
    Special,
    ShipFire,
    Jetpack,
}

impl IconType {
    pub fn category(self) -> Option<Category> {
        match self {
            IconType::Cube => Some(Category::Cube),
            IconType::Ship => Some(Category::Ship),
            IconType::Ball => Some(Category::Ball),
            IconType::Ufo => Some(Category::Bird),
            IconType::Wave => Some(Category::Dart),
            IconType::Robot => Some(Category::Robot),
            IconType::Spider => Some(Category::Spider),
            IconType::Swing => Some(Category::Swing),
            IconType::DeathEffect
            | IconType::Special
            | IconType::ShipFire
            | IconType::Jetpack => None,
        }
    }
}

impl From<Category> for IconType {
    fn from(category: Category) -> Self {
        match category {
            Category::Cube => IconType::Cube,
            Category::Ship => IconType::Ship,
            Category::Ball => IconType::Ball,
            Category::Bird => IconType::Ufo,
            Category::Dart => IconType::Wave,
            Category::Robot => IconType::Robot,
            Category::Spider => IconType::Spider,
            Category::Swing => IconType::Swing,
        }
    }
}
