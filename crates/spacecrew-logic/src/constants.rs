//! Game constants: gauge limits, action budget, sleep and plague numbers.
//!
//! These are the defaults behind [`crate::rules::CrewRules`]. Code that
//! needs a tunable value should read it from the rules, not from here.

pub mod gauges {
    /// Ceiling for hunger level and tiredness. A new crew member starts here.
    pub const MAX: i32 = 100;
    pub const MIN: i32 = 0;
}

pub mod actions {
    /// Action points granted at the start of every day.
    pub const PER_DAY: u8 = 2;
}

pub mod sleep {
    /// Tiredness strictly above this jumps straight to a full gauge.
    pub const JUMP_THRESHOLD: i32 = 50;
    /// Flat tiredness gained when at or below the threshold.
    pub const GAIN: i32 = 50;
}

pub mod plague {
    /// Health lost per space-plague tick.
    pub const DAMAGE: i32 = 10;
}

pub mod describe {
    pub const YES: &str = "yes";
    pub const NO: &str = "no";
}
