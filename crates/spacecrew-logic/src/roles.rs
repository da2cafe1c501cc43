//! Crew roles: the six variants a crew slot can be filled with.
//!
//! Roles differ only in data: maximum health, specialty text, daily
//! decrement and shield bonus. The built-in registry is a static table in
//! registry order (Barter, Mechanic, Nerd, Scout, Soldier, Medic). A game
//! can override the numbers by loading a [`RoleTable`] from JSON.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Crew role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Barter,
    Mechanic,
    Nerd,
    Scout,
    Soldier,
    Medic,
}

/// Built-in stats for one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleDefaults {
    pub role: Role,
    pub label: &'static str,
    pub description: &'static str,
    pub max_health: i32,
    pub specialty: &'static str,
    /// Daily attrition applied by the turn loop.
    pub decrement: i32,
    /// Bonus this role contributes to ship shields.
    pub shield_increment: i32,
}

/// The fixed role registry, in registry order.
pub static ROLE_REGISTRY: [RoleDefaults; 6] = [
    RoleDefaults {
        role: Role::Barter,
        label: "Barter",
        description: "A smooth talker who knows every outpost trader by name.",
        max_health: 100,
        specialty: "Gets better prices when trading at outposts",
        decrement: 10,
        shield_increment: 10,
    },
    RoleDefaults {
        role: Role::Mechanic,
        label: "Mechanic",
        description: "Keeps the ship flying with spare parts and stubbornness.",
        max_health: 100,
        specialty: "Repairs the ship's shields more effectively",
        decrement: 10,
        shield_increment: 30,
    },
    RoleDefaults {
        role: Role::Nerd,
        label: "Nerd",
        description: "Reads star charts for fun. Not built for hard labour.",
        max_health: 80,
        specialty: "Finds ship parts more often when searching planets",
        decrement: 15,
        shield_increment: 15,
    },
    RoleDefaults {
        role: Role::Scout,
        label: "Scout",
        description: "First out of the airlock on every new planet.",
        max_health: 110,
        specialty: "Finds items more often when searching planets",
        decrement: 10,
        shield_increment: 10,
    },
    RoleDefaults {
        role: Role::Soldier,
        label: "Soldier",
        description: "Trained for hostile worlds and long shifts.",
        max_health: 150,
        specialty: "Withstands more damage than other crew",
        decrement: 5,
        shield_increment: 10,
    },
    RoleDefaults {
        role: Role::Medic,
        label: "Medic",
        description: "Patches up the crew and keeps the plague at bay.",
        max_health: 100,
        specialty: "Makes medical supplies more effective",
        decrement: 10,
        shield_increment: 10,
    },
];

impl Role {
    /// All roles in registry order.
    pub fn all() -> &'static [Role] {
        &[
            Role::Barter,
            Role::Mechanic,
            Role::Nerd,
            Role::Scout,
            Role::Soldier,
            Role::Medic,
        ]
    }

    pub fn defaults(self) -> &'static RoleDefaults {
        let index = match self {
            Role::Barter => 0,
            Role::Mechanic => 1,
            Role::Nerd => 2,
            Role::Scout => 3,
            Role::Soldier => 4,
            Role::Medic => 5,
        };
        &ROLE_REGISTRY[index]
    }

    pub fn label(self) -> &'static str {
        self.defaults().label
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Unknown role label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleParseError(pub String);

impl std::fmt::Display for RoleParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown crew role: {:?}", self.0)
    }
}

impl std::error::Error for RoleParseError {}

impl FromStr for Role {
    type Err = RoleParseError;

    /// Case-insensitive match against the registry labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ROLE_REGISTRY
            .iter()
            .find(|d| d.label.eq_ignore_ascii_case(wanted))
            .map(|d| d.role)
            .ok_or_else(|| RoleParseError(s.to_string()))
    }
}

/// Every role-type label, in registry order.
pub fn list_all_role_types() -> Vec<&'static str> {
    ROLE_REGISTRY.iter().map(|d| d.label).collect()
}

/// Configurable stats for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub role: Role,
    /// Must name `role` (any ASCII case), so a member built from this
    /// profile parses back to the same role.
    pub label: String,
    pub description: String,
    pub max_health: i32,
    pub specialty: String,
    pub decrement: i32,
    pub shield_increment: i32,
}

impl From<&RoleDefaults> for RoleProfile {
    fn from(d: &RoleDefaults) -> Self {
        Self {
            role: d.role,
            label: d.label.to_string(),
            description: d.description.to_string(),
            max_health: d.max_health,
            specialty: d.specialty.to_string(),
            decrement: d.decrement,
            shield_increment: d.shield_increment,
        }
    }
}

/// A full set of role profiles, one per role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleTable {
    profiles: Vec<RoleProfile>,
}

impl Default for RoleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RoleTable {
    /// The built-in registry as an owned table.
    pub fn builtin() -> Self {
        Self {
            profiles: ROLE_REGISTRY.iter().map(RoleProfile::from).collect(),
        }
    }

    /// Parse a role table from a JSON array and validate it.
    pub fn from_json(json: &str) -> Result<Self, RoleTableError> {
        let table: RoleTable = serde_json::from_str(json)?;
        let problems = validate_role_table(&table);
        if problems.is_empty() {
            log::debug!("loaded role table with {} roles", table.profiles.len());
            Ok(table)
        } else {
            Err(RoleTableError::Invalid(problems))
        }
    }

    pub fn get(&self, role: Role) -> Option<&RoleProfile> {
        self.profiles.iter().find(|p| p.role == role)
    }

    pub fn profiles(&self) -> &[RoleProfile] {
        &self.profiles
    }

    /// Labels in table order.
    pub fn labels(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.label.as_str()).collect()
    }
}

/// Role table validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleTableProblem {
    MissingRole(Role),
    DuplicateRole(Role),
    NonPositiveMaxHealth { role: Role, max_health: i32 },
    EmptyLabel(Role),
    /// Label names a different role, or none at all.
    LabelMismatch { role: Role, label: String },
}

impl std::fmt::Display for RoleTableProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleTableProblem::MissingRole(r) => write!(f, "role {} is missing", r),
            RoleTableProblem::DuplicateRole(r) => write!(f, "role {} appears more than once", r),
            RoleTableProblem::NonPositiveMaxHealth { role, max_health } => write!(
                f,
                "role {} has non-positive max health {}",
                role, max_health
            ),
            RoleTableProblem::EmptyLabel(r) => write!(f, "role {} has an empty label", r),
            RoleTableProblem::LabelMismatch { role, label } => {
                write!(f, "role {} is labelled {:?}", role, label)
            }
        }
    }
}

/// Validate a role table, returning all problems found.
pub fn validate_role_table(table: &RoleTable) -> Vec<RoleTableProblem> {
    let mut problems = Vec::new();

    for &role in Role::all() {
        match table.profiles.iter().filter(|p| p.role == role).count() {
            0 => problems.push(RoleTableProblem::MissingRole(role)),
            1 => {}
            _ => problems.push(RoleTableProblem::DuplicateRole(role)),
        }
    }

    for p in &table.profiles {
        if p.max_health <= 0 {
            problems.push(RoleTableProblem::NonPositiveMaxHealth {
                role: p.role,
                max_health: p.max_health,
            });
        }
        if p.label.trim().is_empty() {
            problems.push(RoleTableProblem::EmptyLabel(p.role));
        } else if !p.label.eq_ignore_ascii_case(p.role.label()) {
            problems.push(RoleTableProblem::LabelMismatch {
                role: p.role,
                label: p.label.clone(),
            });
        }
    }

    problems
}

/// Errors that can occur loading a role table.
#[derive(Debug)]
pub enum RoleTableError {
    Json(serde_json::Error),
    Invalid(Vec<RoleTableProblem>),
}

impl From<serde_json::Error> for RoleTableError {
    fn from(e: serde_json::Error) -> Self {
        RoleTableError::Json(e)
    }
}

impl std::fmt::Display for RoleTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoleTableError::Json(e) => write!(f, "role table parse error: {}", e),
            RoleTableError::Invalid(problems) => {
                let list: Vec<String> = problems.iter().map(|p| p.to_string()).collect();
                write!(f, "invalid role table: {}", list.join("; "))
            }
        }
    }
}

impl std::error::Error for RoleTableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoleTableError::Json(e) => Some(e),
            RoleTableError::Invalid(_) => None,
        }
    }
}
