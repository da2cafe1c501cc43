//! SpaceCrew Headless Simulation Harness
//!
//! Validates the crew rules end to end without a game loop or UI.
//! Runs entirely in-process.
//!
//! Usage:
//!   cargo run -p spacecrew-simtest
//!   cargo run -p spacecrew-simtest -- --verbose
//!   cargo run -p spacecrew-simtest -- --roles roles.json --seed 7

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use spacecrew_logic::crew::CrewMember;
use spacecrew_logic::items::{Food, ItemId, MedicalSupply};
use spacecrew_logic::roles::{list_all_role_types, validate_role_table, Role, RoleTable};
use spacecrew_logic::rules::{validate_rules, CrewRules};

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

struct Options {
    verbose: bool,
    roles_path: Option<String>,
    seed: u64,
    sweep_runs: u32,
}

fn parse_options() -> Options {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let value_after = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .cloned()
    };
    Options {
        verbose: args.iter().any(|a| a == "--verbose"),
        roles_path: value_after("--roles"),
        seed: value_after("--seed")
            .and_then(|s| s.parse().ok())
            .unwrap_or(42),
        sweep_runs: value_after("--runs")
            .and_then(|s| s.parse().ok())
            .unwrap_or(200),
    }
}

fn main() {
    let opts = parse_options();

    let level = if opts.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    println!("=== SpaceCrew Simulation Harness ===\n");

    let table = match load_role_table(opts.roles_path.as_deref()) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    let mut results = Vec::new();

    // 1. Configuration
    results.extend(validate_configuration(&table));

    // 2. Action economy
    results.extend(validate_action_economy());

    // 3. Sleep
    results.extend(validate_sleep());

    // 4. Food & medical supplies
    results.extend(validate_consumables());

    // 5. Space plague & death
    results.extend(validate_plague());

    // 6. Seeded random command sweep
    results.extend(validate_random_sweep(&table, opts.seed, opts.sweep_runs));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || opts.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    if opts.verbose {
        match serde_json::to_string_pretty(&results) {
            Ok(json) => println!("\n{}", json),
            Err(e) => tracing::warn!("could not serialize results: {}", e),
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_role_table(path: Option<&str>) -> Result<RoleTable, String> {
    let Some(path) = path else {
        return Ok(RoleTable::builtin());
    };
    let json = std::fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path, e))?;
    let table = RoleTable::from_json(&json).map_err(|e| format!("{}: {}", path, e))?;
    tracing::info!("loaded role table from {}", path);
    Ok(table)
}

fn fresh(role: Role) -> CrewMember {
    CrewMember::from_role(format!("{} test", role), role)
}

/// Switch a member to the legacy rules, or report why they were refused.
fn under_legacy(member: CrewMember, check: &str) -> Result<CrewMember, TestResult> {
    member.with_rules(CrewRules::legacy()).map_err(|errors| TestResult {
        name: check.into(),
        passed: false,
        detail: format!("legacy rules refused: {:?}", errors),
    })
}

// ── 1. Configuration ────────────────────────────────────────────────────

fn validate_configuration(table: &RoleTable) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    let rule_errors = validate_rules(&CrewRules::default());
    let legacy_errors = validate_rules(&CrewRules::legacy());
    results.push(TestResult {
        name: "rules_valid".into(),
        passed: rule_errors.is_empty() && legacy_errors.is_empty(),
        detail: format!(
            "default errors={} legacy errors={}",
            rule_errors.len(),
            legacy_errors.len()
        ),
    });

    let oversized = CrewRules {
        gauge_max: 400,
        max_actions: 5,
        sleep_jump_threshold: 350,
        ..CrewRules::default()
    };
    let refused = fresh(Role::Soldier).with_rules(oversized);
    results.push(TestResult {
        name: "oversized_rules_refused".into(),
        passed: refused.is_err(),
        detail: match &refused {
            Ok(m) => format!("accepted with {} actions", m.actions()),
            Err(errors) => format!("{} errors", errors.len()),
        },
    });

    let problems = validate_role_table(table);
    results.push(TestResult {
        name: "role_table_valid".into(),
        passed: problems.is_empty(),
        detail: if problems.is_empty() {
            format!("{} roles", table.profiles().len())
        } else {
            problems
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join("; ")
        },
    });

    let labels = list_all_role_types();
    results.push(TestResult {
        name: "role_registry_order".into(),
        passed: labels == ["Barter", "Mechanic", "Nerd", "Scout", "Soldier", "Medic"],
        detail: labels.join(", "),
    });

    let full_health = table.profiles().iter().all(|p| {
        let m = CrewMember::from_profile("Tester", p);
        m.current_health() == p.max_health && m.actions() == 2 && m.tiredness() == 100
    });
    results.push(TestResult {
        name: "profiles_build_fresh_members".into(),
        passed: full_health,
        detail: "every profile builds a full-health, fully rested member".into(),
    });

    results
}

// ── 2. Action Economy ───────────────────────────────────────────────────

fn validate_action_economy() -> Vec<TestResult> {
    println!("--- Action Economy ---");
    let mut results = Vec::new();

    let mut m = fresh(Role::Scout);
    m.remove_action();
    m.remove_action();
    let after_two = m.actions();
    m.remove_action();
    let after_three = m.actions();
    results.push(TestResult {
        name: "actions_floor_at_zero".into(),
        passed: after_two == 0 && after_three == 0 && !m.has_actions_left(),
        detail: format!("after 2 removals={} after 3={}", after_two, after_three),
    });

    m.reset_actions();
    results.push(TestResult {
        name: "actions_reset_to_two".into(),
        passed: m.actions() == 2,
        detail: format!("actions after reset={}", m.actions()),
    });

    m.kill();
    m.reset_actions();
    results.push(TestResult {
        name: "dead_stay_idle".into(),
        passed: !m.is_alive() && m.actions() == 0,
        detail: format!("alive={} actions={}", m.is_alive(), m.actions()),
    });

    results
}

// ── 3. Sleep ────────────────────────────────────────────────────────────

fn validate_sleep() -> Vec<TestResult> {
    println!("--- Sleep ---");
    let mut results = Vec::new();

    for (start, expected) in [(30, 80), (70, 100), (50, 100), (0, 50), (100, 100)] {
        let mut m = fresh(Role::Mechanic);
        m.set_tiredness(start);
        m.sleep();
        results.push(TestResult {
            name: format!("sleep_from_{}", start),
            passed: m.tiredness() == expected,
            detail: format!("{} -> {} (expected {})", start, m.tiredness(), expected),
        });
    }

    let mut strict = fresh(Role::Nerd);
    strict.set_tiredness(0);
    let mut legacy = match under_legacy(fresh(Role::Nerd), "exhausted_sleep_policy") {
        Ok(m) => m,
        Err(failed) => {
            results.push(failed);
            return results;
        }
    };
    legacy.set_tiredness(0);
    results.push(TestResult {
        name: "exhausted_sleep_policy".into(),
        passed: strict.can_sleep() && !legacy.can_sleep(),
        detail: format!(
            "strict can_sleep={} legacy can_sleep={}",
            strict.can_sleep(),
            legacy.can_sleep()
        ),
    });

    results
}

// ── 4. Consumables ──────────────────────────────────────────────────────

fn validate_consumables() -> Vec<TestResult> {
    println!("--- Food & Medical Supplies ---");
    let mut results = Vec::new();

    let mut m = fresh(Role::Barter);
    m.decrement_hunger_level(60);
    let stew = Food::new(ItemId(1), "Stew", 15, 25);
    m.apply_food(&stew);
    m.apply_food(&stew);
    results.push(TestResult {
        name: "food_stacks_logs_once".into(),
        passed: m.hunger_level() == 90 && m.applied_foods().len() == 1,
        detail: format!(
            "hunger={} log entries={}",
            m.hunger_level(),
            m.applied_foods().len()
        ),
    });

    m.apply_food(&Food::new(ItemId(2), "Feast", 60, 200));
    results.push(TestResult {
        name: "food_caps_at_hundred".into(),
        passed: m.hunger_level() == 100,
        detail: format!("hunger={}", m.hunger_level()),
    });

    let mut patient = fresh(Role::Medic);
    patient.make_sick();
    patient.decrement_current_health(70);
    let antidote = MedicalSupply::new(ItemId(3), "Antidote", 80, 500, true);
    patient.apply_medical_supply(&antidote);
    results.push(TestResult {
        name: "supply_caps_and_cures".into(),
        passed: patient.current_health() == patient.max_health() && !patient.is_sick(),
        detail: format!(
            "health={}/{} sick={}",
            patient.current_health(),
            patient.max_health(),
            patient.is_sick()
        ),
    });

    results
}

// ── 5. Space Plague ─────────────────────────────────────────────────────

fn validate_plague() -> Vec<TestResult> {
    println!("--- Space Plague & Death ---");
    let mut results = Vec::new();

    let mut m = CrewMember::new("Tester", "Scout", "", 100, "", 10, 10);
    let ticks: Vec<bool> = (0..10)
        .map(|_| m.decrement_current_health_for_space_plague())
        .collect();
    let only_last = ticks[..9].iter().all(|t| !t) && ticks[9];
    results.push(TestResult {
        name: "plague_ten_ticks".into(),
        passed: only_last && m.current_health() == 0 && m.is_alive(),
        detail: format!("ticks={:?} health={}", ticks, m.current_health()),
    });

    let member = CrewMember::new("Tester", "Scout", "", 15, "", 10, 10);
    let mut legacy = match under_legacy(member, "plague_legacy_overshoot") {
        Ok(m) => m,
        Err(failed) => {
            results.push(failed);
            return results;
        }
    };
    legacy.decrement_current_health_for_space_plague();
    let fatal = legacy.decrement_current_health_for_space_plague();
    results.push(TestResult {
        name: "plague_legacy_overshoot".into(),
        passed: fatal && legacy.current_health() == -5,
        detail: format!("legacy health={}", legacy.current_health()),
    });

    results
}

// ── 6. Random Sweep ─────────────────────────────────────────────────────

fn validate_random_sweep(table: &RoleTable, seed: u64, runs: u32) -> Vec<TestResult> {
    println!("--- Random Command Sweep (seed {}) ---", seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut violations = Vec::new();
    let mut deaths = 0u32;

    for run in 0..runs {
        let profile = &table.profiles()[rng.gen_range(0..table.profiles().len())];
        let mut m = CrewMember::from_profile(format!("sweep-{}", run), profile);
        let mut was_dead = false;

        for step in 0..50 {
            random_command(&mut m, &mut rng);
            if let Some(v) = check_invariants(&m, was_dead) {
                violations.push(format!("run {} step {}: {}", run, step, v));
                break;
            }
            was_dead = !m.is_alive();
        }
        if !m.is_alive() {
            deaths += 1;
        }
    }

    tracing::debug!("sweep finished: {} runs, {} deaths", runs, deaths);

    vec![TestResult {
        name: "sweep_invariants".into(),
        passed: violations.is_empty(),
        detail: if violations.is_empty() {
            format!("{} runs, {} deaths, no violations", runs, deaths)
        } else {
            violations.join("; ")
        },
    }]
}

fn random_command(m: &mut CrewMember, rng: &mut StdRng) {
    let id = ItemId(rng.gen_range(0..6));
    match rng.gen_range(0..12) {
        0 => m.sleep(),
        1 => m.apply_food(&Food::new(id, "Food", 10, rng.gen_range(0..60))),
        2 => m.apply_medical_supply(&MedicalSupply::new(
            id,
            "Supply",
            20,
            rng.gen_range(0..60),
            rng.gen_bool(0.3),
        )),
        3 => m.make_sick(),
        4 => {
            if m.decrement_current_health_for_space_plague() {
                m.kill();
            }
        }
        5 => m.decrement_current_health(rng.gen_range(0..40)),
        6 => m.decrement_tiredness(rng.gen_range(0..80)),
        7 => m.increment_tiredness(rng.gen_range(0..80)),
        8 => m.decrement_hunger_level(rng.gen_range(0..80)),
        9 => m.remove_action(),
        10 => m.reset_actions(),
        _ => {
            if rng.gen_bool(0.05) {
                m.kill();
            }
        }
    }
}

fn check_invariants(m: &CrewMember, was_dead: bool) -> Option<String> {
    if !(0..=m.max_health()).contains(&m.current_health()) {
        return Some(format!("health {} outside 0..={}", m.current_health(), m.max_health()));
    }
    if !(0..=100).contains(&m.hunger_level()) {
        return Some(format!("hunger {} outside 0..=100", m.hunger_level()));
    }
    if !(0..=100).contains(&m.tiredness()) {
        return Some(format!("tiredness {} outside 0..=100", m.tiredness()));
    }
    if m.actions() > 2 {
        return Some(format!("actions {} above 2", m.actions()));
    }
    if was_dead && m.is_alive() {
        return Some("dead member came back".into());
    }
    if !m.is_alive() && m.actions() != 0 {
        return Some(format!("dead member has {} actions", m.actions()));
    }
    None
}
