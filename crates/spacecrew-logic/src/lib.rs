//! Pure crew rules for SpaceCrew.
//!
//! This crate holds the per-turn life-simulation state of a crew member and
//! the rules that mutate it. It has no game loop, UI or save format:
//! callers create crew members at setup and issue commands to them each
//! turn.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Default gauge, action, sleep and plague numbers |
//! | [`crew`] | The `CrewMember` state machine |
//! | [`items`] | Food and medical supply value objects |
//! | [`roles`] | Role registry, role profiles and JSON role tables |
//! | [`rules`] | Tunable rules and the strict/legacy clamping policy |
//!
//! ```
//! use spacecrew_logic::crew::CrewMember;
//! use spacecrew_logic::items::{Food, ItemId};
//! use spacecrew_logic::roles::Role;
//!
//! let mut scout = CrewMember::from_role("Vasquez", Role::Scout);
//! scout.decrement_hunger_level(40);
//! scout.apply_food(&Food::new(ItemId(1), "Ration pack", 20, 25));
//! assert_eq!(scout.hunger_level(), 85);
//! scout.remove_action();
//! assert!(scout.has_actions_left());
//! ```

pub mod constants;
pub mod crew;
pub mod items;
pub mod roles;
pub mod rules;
