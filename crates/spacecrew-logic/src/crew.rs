//! Crew member state machine.
//!
//! A [`CrewMember`] owns its vitals (health, hunger, tiredness), its status
//! flags (sick, dead), its daily action budget and the logs of every food
//! and medical supply it has used. All mutation happens through `&mut self`
//! commands issued by the turn loop, one at a time.
//!
//! How far values are kept in range depends on [`CrewRules::clamping`]:
//! under [`Clamping::Strict`] (the default) every mutator keeps hunger and
//! tiredness in `[0, gauge_max]` and health in `[0, maximum_health]`; under
//! [`Clamping::Legacy`] only the paths the old game clamped are clamped.
//!
//! Death is terminal under both. A dead member never regains actions, and
//! sleep, food, medical supplies and sickness changes are ignored for it.
//!
//! [`Clamping::Strict`]: crate::rules::Clamping::Strict
//! [`Clamping::Legacy`]: crate::rules::Clamping::Legacy

use serde::{Deserialize, Serialize};

use crate::constants::{describe, gauges};
use crate::items::{Food, MedicalSupply};
use crate::roles::{self, Role, RoleProfile};
use crate::rules::{validate_rules, CrewRules, RulesError};

/// One crew member.
///
/// `CrewMember::default()` is an empty placeholder with zero health and no
/// actions; build real members with [`CrewMember::new`] or
/// [`CrewMember::from_role`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    name: String,
    #[serde(rename = "type")]
    role_type: String,
    description: String,
    specialty: String,
    maximum_health: i32,
    current_health: i32,
    hunger_level: i32,
    tiredness: i32,
    is_sick: bool,
    is_dead: bool,
    actions: u8,
    /// Daily attrition, applied by the turn loop.
    decrement: i32,
    shield_increment: i32,
    applied_foods: Vec<Food>,
    applied_medical_supplies: Vec<MedicalSupply>,
    rules: CrewRules,
}

impl CrewMember {
    /// Fully healed, fed and rested member with a full day of actions.
    pub fn new(
        name: impl Into<String>,
        role_type: impl Into<String>,
        description: impl Into<String>,
        max_health: i32,
        specialty: impl Into<String>,
        decrement: i32,
        shield_increment: i32,
    ) -> Self {
        let rules = CrewRules::default();
        Self {
            name: name.into(),
            role_type: role_type.into(),
            description: description.into(),
            specialty: specialty.into(),
            maximum_health: max_health,
            current_health: max_health,
            hunger_level: rules.gauge_max,
            tiredness: rules.gauge_max,
            is_sick: false,
            is_dead: false,
            actions: rules.max_actions,
            decrement,
            shield_increment,
            applied_foods: Vec::new(),
            applied_medical_supplies: Vec::new(),
            rules,
        }
    }

    /// Build a member from a configured role profile.
    pub fn from_profile(name: impl Into<String>, profile: &RoleProfile) -> Self {
        Self::new(
            name,
            profile.label.clone(),
            profile.description.clone(),
            profile.max_health,
            profile.specialty.clone(),
            profile.decrement,
            profile.shield_increment,
        )
    }

    /// Build a member from the built-in registry stats for `role`.
    pub fn from_role(name: impl Into<String>, role: Role) -> Self {
        let d = role.defaults();
        Self::new(
            name,
            d.label,
            d.description,
            d.max_health,
            d.specialty,
            d.decrement,
            d.shield_increment,
        )
    }

    /// Replace the rules. Meant for setup: gauges and actions are refilled
    /// to the new rules' full values. Rules that fail [`validate_rules`]
    /// are refused and every problem is returned.
    pub fn with_rules(mut self, rules: CrewRules) -> Result<Self, Vec<RulesError>> {
        let errors = validate_rules(&rules);
        if !errors.is_empty() {
            log::warn!("refusing invalid rules for {}: {:?}", self.name, errors);
            return Err(errors);
        }
        self.rules = rules;
        self.hunger_level = rules.gauge_max;
        self.tiredness = rules.gauge_max;
        self.actions = if self.is_dead { 0 } else { rules.max_actions };
        Ok(self)
    }

    // ── Roles ────────────────────────────────────────────────────────

    /// Every role-type label, in registry order.
    pub fn get_all_types(&self) -> Vec<&'static str> {
        roles::list_all_role_types()
    }

    // ── Sleep ────────────────────────────────────────────────────────

    /// Whether tiredness is low enough to sleep.
    pub fn can_sleep(&self) -> bool {
        let max = self.rules.gauge_max;
        if self.rules.exhausted_can_sleep {
            self.tiredness < max
        } else {
            self.tiredness > gauges::MIN && self.tiredness < max
        }
    }

    /// Rest: above the jump threshold tiredness goes straight to full,
    /// otherwise it gains a flat amount. No-op when already rested.
    pub fn sleep(&mut self) {
        if self.ignored_when_dead("sleep") {
            return;
        }
        let max = self.rules.gauge_max;
        if self.tiredness >= max {
            return;
        }
        let before = self.tiredness;
        self.tiredness = if self.tiredness > self.rules.sleep_jump_threshold {
            max
        } else {
            let rested = self.tiredness.saturating_add(self.rules.sleep_gain);
            self.clamp_logged("tiredness", rested, i32::MIN, max)
        };
        log::debug!("{} slept: tiredness {} -> {}", self.name, before, self.tiredness);
    }

    // ── Consumables ──────────────────────────────────────────────────

    /// Eat: raise hunger level, capped at the gauge ceiling, and log the food once.
    pub fn apply_food(&mut self, food: &Food) {
        if self.ignored_when_dead("apply_food") {
            return;
        }
        let raised = self.hunger_level.saturating_add(food.hunger_level());
        self.hunger_level = self.clamp_logged(
            "hunger",
            raised,
            self.strict_floor(gauges::MIN),
            self.rules.gauge_max,
        );

        if !self.applied_foods.iter().any(|f| f.id == food.id) {
            self.applied_foods.push(food.clone());
        }
        log::debug!(
            "{} ate {} {}: hunger now {}",
            self.name,
            food.name,
            food.id,
            self.hunger_level
        );
    }

    /// Heal up to maximum health, cure the plague if the supply does, and
    /// log the supply once.
    pub fn apply_medical_supply(&mut self, supply: &MedicalSupply) {
        if self.ignored_when_dead("apply_medical_supply") {
            return;
        }
        let raised = self.current_health.saturating_add(supply.health());
        self.current_health =
            self.clamp_logged("health", raised, self.strict_floor(0), self.maximum_health);

        if supply.is_space_plague_cure() {
            self.cure();
        }

        if !self
            .applied_medical_supplies
            .iter()
            .any(|s| s.id == supply.id)
        {
            self.applied_medical_supplies.push(supply.clone());
        }
        log::debug!(
            "{} used {} {}: health now {}/{}",
            self.name,
            supply.name,
            supply.id,
            self.current_health,
            self.maximum_health
        );
    }

    // ── Sickness & death ─────────────────────────────────────────────

    /// Infect with the space plague.
    pub fn make_sick(&mut self) {
        if self.ignored_when_dead("make_sick") {
            return;
        }
        if !self.is_sick {
            log::info!("{} caught the space plague", self.name);
        }
        self.is_sick = true;
    }

    /// Clear the space plague. No-op when not sick.
    pub fn cure(&mut self) {
        if self.ignored_when_dead("cure") {
            return;
        }
        if self.is_sick {
            log::info!("{} was cured of the space plague", self.name);
        }
        self.is_sick = false;
    }

    /// Irreversible.
    pub fn kill(&mut self) {
        if !self.is_dead {
            log::info!("{} has died", self.name);
        }
        self.is_dead = true;
        self.actions = 0;
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    pub fn is_sick(&self) -> bool {
        self.is_sick
    }

    fn ignored_when_dead(&self, command: &str) -> bool {
        if self.is_dead {
            log::warn!("ignoring {} for dead crew member {}", command, self.name);
        }
        self.is_dead
    }

    // ── Action economy ───────────────────────────────────────────────

    /// Spend one action point. Never goes below zero.
    pub fn remove_action(&mut self) {
        if self.has_actions_left() {
            self.actions -= 1;
        } else {
            self.actions = 0;
        }
    }

    /// Whether any action points remain today.
    pub fn has_actions_left(&self) -> bool {
        (1..=self.rules.max_actions).contains(&self.actions)
    }

    /// Refill the daily budget. The dead stay at zero.
    pub fn reset_actions(&mut self) {
        if self.ignored_when_dead("reset_actions") {
            self.actions = 0;
            return;
        }
        self.actions = self.rules.max_actions;
    }

    // ── Gauge primitives ─────────────────────────────────────────────

    /// Lower tiredness by `amount`.
    pub fn decrement_tiredness(&mut self, amount: i32) {
        self.tiredness = self.gauge_if_strict("tiredness", self.tiredness.saturating_sub(amount));
    }

    /// Raise tiredness by `amount`.
    pub fn increment_tiredness(&mut self, amount: i32) {
        self.tiredness = self.gauge_if_strict("tiredness", self.tiredness.saturating_add(amount));
    }

    /// Overwrite tiredness.
    pub fn set_tiredness(&mut self, tiredness: i32) {
        self.tiredness = self.gauge_if_strict("tiredness", tiredness);
    }

    /// Lower hunger level by `amount`.
    pub fn decrement_hunger_level(&mut self, amount: i32) {
        self.hunger_level =
            self.gauge_if_strict("hunger", self.hunger_level.saturating_sub(amount));
    }

    /// Overwrite hunger level.
    pub fn set_hunger_level(&mut self, level: i32) {
        self.hunger_level = self.gauge_if_strict("hunger", level);
    }

    /// Lose health, never below zero.
    pub fn decrement_current_health(&mut self, amount: i32) {
        let lowered = self.current_health.saturating_sub(amount);
        let ceiling = if self.rules.is_strict() {
            self.maximum_health
        } else {
            i32::MAX
        };
        self.current_health = self.clamp_logged("health", lowered, 0, ceiling);
    }

    /// One space-plague tick. Returns `true` when health has run out; the
    /// caller decides whether to [`kill`](Self::kill).
    pub fn decrement_current_health_for_space_plague(&mut self) -> bool {
        let lowered = self
            .current_health
            .saturating_sub(self.rules.plague_damage);
        self.current_health = self.clamp_logged("health", lowered, self.strict_floor(0), i32::MAX);
        let fatal = self.current_health <= 0;
        if fatal {
            log::info!("{} succumbed to the space plague", self.name);
        } else {
            log::debug!(
                "{} lost {} health to the space plague ({} left)",
                self.name,
                self.rules.plague_damage,
                self.current_health
            );
        }
        fatal
    }

    /// Overwrite current health.
    pub fn set_current_health(&mut self, health: i32) {
        self.current_health = if self.rules.is_strict() {
            self.clamp_logged("health", health, 0, self.maximum_health)
        } else {
            health
        };
    }

    fn gauge_if_strict(&self, gauge: &str, value: i32) -> i32 {
        if self.rules.is_strict() {
            self.clamp_logged(gauge, value, gauges::MIN, self.rules.gauge_max)
        } else {
            value
        }
    }

    /// `floor` under strict rules, unbounded under legacy ones.
    fn strict_floor(&self, floor: i32) -> i32 {
        if self.rules.is_strict() {
            floor
        } else {
            i32::MIN
        }
    }

    fn clamp_logged(&self, gauge: &str, value: i32, floor: i32, ceiling: i32) -> i32 {
        let clamped = value.min(ceiling).max(floor);
        if clamped != value {
            log::debug!("{}: {} {} clamped to {}", self.name, gauge, value, clamped);
        }
        clamped
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role_type(&self) -> &str {
        &self.role_type
    }

    /// The built-in role matching this member's type label, if any.
    pub fn role(&self) -> Option<Role> {
        self.role_type.parse().ok()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn specialty(&self) -> &str {
        &self.specialty
    }

    pub fn max_health(&self) -> i32 {
        self.maximum_health
    }

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn hunger_level(&self) -> i32 {
        self.hunger_level
    }

    pub fn tiredness(&self) -> i32 {
        self.tiredness
    }

    pub fn actions(&self) -> u8 {
        self.actions
    }

    pub fn decrement(&self) -> i32 {
        self.decrement
    }

    pub fn shield_increment(&self) -> i32 {
        self.shield_increment
    }

    pub fn applied_foods(&self) -> &[Food] {
        &self.applied_foods
    }

    pub fn applied_medical_supplies(&self) -> &[MedicalSupply] {
        &self.applied_medical_supplies
    }

    pub fn rules(&self) -> &CrewRules {
        &self.rules
    }

    /// Multi-line status summary for the crew screen.
    pub fn describe(&self) -> String {
        let sick = if self.is_sick {
            describe::YES
        } else {
            describe::NO
        };
        format!(
            "{}\nType: {}\nCurrent Health: {}\nMax Health: {}\nHunger Level: {}\nTiredness: {}\nSick: {}\n",
            self.name,
            self.role_type,
            self.current_health,
            self.maximum_health,
            self.hunger_level,
            self.tiredness,
            sick
        )
    }
}

impl std::fmt::Display for CrewMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::ItemId;

    fn member() -> CrewMember {
        CrewMember::new("Ripley", "Soldier", "Veteran", 100, "Tough", 10, 10)
    }

    fn legacy_member() -> CrewMember {
        member().with_rules(CrewRules::legacy()).unwrap()
    }

    #[test]
    fn test_new_member_defaults() {
        let m = member();
        assert_eq!(m.name(), "Ripley");
        assert_eq!(m.role_type(), "Soldier");
        assert_eq!(m.description(), "Veteran");
        assert_eq!(m.specialty(), "Tough");
        assert_eq!(m.current_health(), 100);
        assert_eq!(m.max_health(), 100);
        assert_eq!(m.hunger_level(), 100);
        assert_eq!(m.tiredness(), 100);
        assert_eq!(m.actions(), 2);
        assert_eq!(m.decrement(), 10);
        assert_eq!(m.shield_increment(), 10);
        assert!(!m.is_sick());
        assert!(m.is_alive());
        assert!(m.applied_foods().is_empty());
        assert!(m.applied_medical_supplies().is_empty());
    }

    #[test]
    fn test_placeholder_is_unusable() {
        let m = CrewMember::default();
        assert_eq!(m.max_health(), 0);
        assert_eq!(m.actions(), 0);
        assert!(!m.has_actions_left());
        assert!(m.name().is_empty());
    }

    #[test]
    fn test_from_role_uses_registry() {
        let m = CrewMember::from_role("Hicks", Role::Soldier);
        assert_eq!(m.role_type(), "Soldier");
        assert_eq!(m.max_health(), 150);
        assert_eq!(m.current_health(), 150);
        assert_eq!(m.role(), Some(Role::Soldier));
        assert_eq!(m.get_all_types().len(), 6);
    }

    #[test]
    fn test_sleep_flat_gain() {
        let mut m = member();
        m.set_tiredness(30);
        m.sleep();
        assert_eq!(m.tiredness(), 80);
    }

    #[test]
    fn test_sleep_jump_to_full() {
        let mut m = member();
        m.set_tiredness(70);
        m.sleep();
        assert_eq!(m.tiredness(), 100);
    }

    #[test]
    fn test_sleep_at_threshold_is_flat() {
        let mut m = member();
        m.set_tiredness(50);
        m.sleep();
        assert_eq!(m.tiredness(), 100);
        m.set_tiredness(0);
        m.sleep();
        assert_eq!(m.tiredness(), 50);
    }

    #[test]
    fn test_sleep_when_rested_is_noop() {
        let mut m = member();
        assert!(!m.can_sleep());
        m.sleep();
        assert_eq!(m.tiredness(), 100);
    }

    #[test]
    fn test_exhausted_can_sleep_by_default() {
        let mut m = member();
        m.set_tiredness(0);
        assert!(m.can_sleep());
    }

    #[test]
    fn test_legacy_exhausted_cannot_sleep() {
        let mut m = legacy_member();
        m.set_tiredness(0);
        assert!(!m.can_sleep());
        m.set_tiredness(1);
        assert!(m.can_sleep());
        m.set_tiredness(99);
        assert!(m.can_sleep());
    }

    #[test]
    fn test_food_clamps_and_logs_once() {
        let mut m = member();
        m.decrement_hunger_level(50);
        let food = Food::new(ItemId(1), "Stew", 15, 30);
        m.apply_food(&food);
        assert_eq!(m.hunger_level(), 80);
        m.apply_food(&food);
        assert_eq!(m.hunger_level(), 100);
        assert_eq!(m.applied_foods().len(), 1);
    }

    #[test]
    fn test_distinct_foods_both_logged() {
        let mut m = member();
        m.apply_food(&Food::new(ItemId(1), "Apple", 5, 10));
        m.apply_food(&Food::new(ItemId(2), "Apple", 5, 10));
        let ids: Vec<_> = m.applied_foods().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![ItemId(1), ItemId(2)]);
    }

    #[test]
    fn test_medical_supply_clamps_and_cures() {
        let mut m = member();
        m.make_sick();
        m.decrement_current_health(40);
        let cure = MedicalSupply::new(ItemId(7), "Antidote", 50, 25, true);
        m.apply_medical_supply(&cure);
        assert_eq!(m.current_health(), 85);
        assert!(!m.is_sick());
        m.apply_medical_supply(&cure);
        assert_eq!(m.current_health(), 100);
        assert_eq!(m.applied_medical_supplies().len(), 1);
    }

    #[test]
    fn test_plain_supply_does_not_cure() {
        let mut m = member();
        m.make_sick();
        m.apply_medical_supply(&MedicalSupply::new(ItemId(3), "Bandage", 10, 10, false));
        assert!(m.is_sick());
    }

    #[test]
    fn test_cure_healthy_is_noop() {
        let mut m = member();
        m.cure();
        assert!(!m.is_sick());
    }

    #[test]
    fn test_kill_is_terminal() {
        let mut m = member();
        m.kill();
        assert!(!m.is_alive());
        assert!(m.is_dead());
        assert_eq!(m.actions(), 0);
        m.reset_actions();
        assert_eq!(m.actions(), 0);
        m.remove_action();
        assert_eq!(m.actions(), 0);
        assert!(!m.is_alive());
    }

    #[test]
    fn test_remove_action_floors_at_zero() {
        let mut m = member();
        m.remove_action();
        assert_eq!(m.actions(), 1);
        assert!(m.has_actions_left());
        m.remove_action();
        assert_eq!(m.actions(), 0);
        assert!(!m.has_actions_left());
        m.remove_action();
        assert_eq!(m.actions(), 0);
        m.reset_actions();
        assert_eq!(m.actions(), 2);
    }

    #[test]
    fn test_plague_ten_ticks_to_zero() {
        let mut m = member();
        for tick in 1..=9 {
            assert!(!m.decrement_current_health_for_space_plague(), "tick {tick}");
        }
        assert!(m.decrement_current_health_for_space_plague());
        assert_eq!(m.current_health(), 0);
        // the tick only reports; killing is the caller's call
        assert!(m.is_alive());
    }

    #[test]
    fn test_plague_overshoot_strict_vs_legacy() {
        let mut strict = member();
        strict.set_current_health(5);
        assert!(strict.decrement_current_health_for_space_plague());
        assert_eq!(strict.current_health(), 0);

        let mut legacy = legacy_member();
        legacy.set_current_health(5);
        assert!(legacy.decrement_current_health_for_space_plague());
        assert_eq!(legacy.current_health(), -5);
    }

    #[test]
    fn test_decrement_health_floor() {
        let mut m = member();
        m.decrement_current_health(250);
        assert_eq!(m.current_health(), 0);
        let mut l = legacy_member();
        l.decrement_current_health(250);
        assert_eq!(l.current_health(), 0);
    }

    #[test]
    fn test_strict_gauges_stay_in_range() {
        let mut m = member();
        m.decrement_tiredness(150);
        assert_eq!(m.tiredness(), 0);
        m.increment_tiredness(500);
        assert_eq!(m.tiredness(), 100);
        m.decrement_hunger_level(130);
        assert_eq!(m.hunger_level(), 0);
        m.set_hunger_level(120);
        assert_eq!(m.hunger_level(), 100);
        m.set_current_health(-3);
        assert_eq!(m.current_health(), 0);
        m.set_current_health(400);
        assert_eq!(m.current_health(), 100);
    }

    #[test]
    fn test_legacy_gauges_unclamped() {
        let mut m = legacy_member();
        m.decrement_tiredness(150);
        assert_eq!(m.tiredness(), -50);
        m.set_tiredness(130);
        assert_eq!(m.tiredness(), 130);
        m.decrement_hunger_level(130);
        assert_eq!(m.hunger_level(), -30);
        m.set_current_health(400);
        assert_eq!(m.current_health(), 400);
    }

    #[test]
    fn test_describe_reports_tiredness() {
        let mut m = member();
        m.decrement_hunger_level(20);
        m.decrement_tiredness(35);
        m.make_sick();
        let text = m.describe();
        assert_eq!(
            text,
            "Ripley\nType: Soldier\nCurrent Health: 100\nMax Health: 100\nHunger Level: 80\nTiredness: 65\nSick: yes\n"
        );
        assert_eq!(m.to_string(), text);
    }

    #[test]
    fn test_with_rules_refills() {
        let rules = CrewRules {
            gauge_max: 80,
            max_actions: 1,
            sleep_jump_threshold: 40,
            ..CrewRules::default()
        };
        let mut m = member().with_rules(rules).unwrap();
        assert_eq!(m.tiredness(), 80);
        assert_eq!(m.hunger_level(), 80);
        assert_eq!(m.actions(), 1);
        m.remove_action();
        m.reset_actions();
        assert_eq!(m.actions(), 1);
    }

    #[test]
    fn test_with_rules_rejects_oversized_rules() {
        let rules = CrewRules {
            gauge_max: 400,
            max_actions: 5,
            sleep_jump_threshold: 350,
            ..CrewRules::default()
        };
        let errors = member().with_rules(rules).unwrap_err();
        assert!(errors.contains(&RulesError::GaugeMaxTooHigh(400)));
        assert!(errors.contains(&RulesError::TooManyActions(5)));
    }

    #[test]
    fn test_with_rules_rejects_invalid_rules() {
        let rules = CrewRules {
            max_actions: 0,
            plague_damage: 0,
            ..CrewRules::default()
        };
        let errors = member().with_rules(rules).unwrap_err();
        assert_eq!(
            errors,
            vec![RulesError::NoActions, RulesError::NonPositivePlagueDamage(0)]
        );
    }

    #[test]
    fn test_dead_member_ignores_commands() {
        let mut m = member();
        m.decrement_hunger_level(50);
        m.set_tiredness(30);
        m.kill();

        m.make_sick();
        m.apply_medical_supply(&MedicalSupply::new(ItemId(1), "Medkit", 30, 20, false));
        m.apply_food(&Food::new(ItemId(2), "Stew", 15, 30));
        m.sleep();
        m.reset_actions();

        assert!(!m.is_sick());
        assert!(m.applied_medical_supplies().is_empty());
        assert!(m.applied_foods().is_empty());
        assert_eq!(m.hunger_level(), 50);
        assert_eq!(m.tiredness(), 30);
        assert_eq!(m.actions(), 0);
        assert!(!m.is_alive());
    }

    #[test]
    fn test_sick_then_dead_stays_sick() {
        let mut m = member();
        m.make_sick();
        m.kill();
        m.apply_medical_supply(&MedicalSupply::new(ItemId(4), "Antidote", 50, 25, true));
        m.cure();
        assert!(m.is_sick());
    }

    #[test]
    fn test_serializes_type_field() {
        let json = serde_json::to_value(member()).unwrap();
        assert_eq!(json["type"], "Soldier");
        assert_eq!(json["actions"], 2);
    }
}
