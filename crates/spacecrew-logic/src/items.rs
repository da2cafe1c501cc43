//! Consumable items a crew member can use: food and medical supplies.
//!
//! Items are plain value objects. Each instance carries an [`ItemId`]
//! assigned by whoever owns the inventory; the crew logs use it to tell
//! "the same item applied again" apart from "another item with equal stats".

use serde::{Deserialize, Serialize};

/// Identity of one item instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub u32);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something to eat. Raises the eater's hunger level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub id: ItemId,
    pub name: String,
    /// Outpost price, unused by the crew rules.
    pub price: u32,
    /// Hunger points restored when eaten.
    pub hunger_level: i32,
}

impl Food {
    pub fn new(id: ItemId, name: impl Into<String>, price: u32, hunger_level: i32) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            hunger_level,
        }
    }

    pub fn hunger_level(&self) -> i32 {
        self.hunger_level
    }
}

/// A medical supply. Restores health and may cure the space plague.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalSupply {
    pub id: ItemId,
    pub name: String,
    /// Outpost price, unused by the crew rules.
    pub price: u32,
    /// Health points restored when applied.
    pub health: i32,
    pub plague_cure: bool,
}

impl MedicalSupply {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        price: u32,
        health: i32,
        plague_cure: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            health,
            plague_cure,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_space_plague_cure(&self) -> bool {
        self.plague_cure
    }
}
