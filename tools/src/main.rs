//! adherence-runner: headless monthly adherence report.
//!
//! Usage:
//!   adherence-runner --db planning.db --region FR --date 2024-05-01
//!   adherence-runner --demo --date 2024-05-01 --json

use adherence_core::{
    config::EngineConfig,
    engine::{AdherenceEngine, MonthReport},
    roster::AgentStatus,
    source::DailyShareRow,
    store::PlanningStore,
};
use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let demo = args.iter().any(|a| a == "--demo");
    let json = args.iter().any(|a| a == "--json");
    // Demo data is always seeded into a fresh in-memory database.
    let db = if demo { ":memory:" } else { string_arg(&args, "--db").unwrap_or(":memory:") };
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let date = match string_arg(&args, "--date") {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("--date must be YYYY-MM-DD, got '{raw}'"))?,
        None => Local::now().date_naive(),
    };

    let config = if demo {
        EngineConfig::default_test()
    } else {
        EngineConfig::load(data_dir)?
    };
    let region = string_arg(&args, "--region")
        .map(str::to_string)
        .unwrap_or_else(|| config.default_region.clone());

    if !json {
        println!("Staffing adherence — adherence-runner");
        println!("  region:    {region}");
        println!("  month:     {}", date.format("%Y-%m"));
        println!("  db:        {}", if demo { "(demo, in memory)" } else { db });
        println!();
    }

    let store = PlanningStore::open(db)?;
    store.migrate()?;
    if demo {
        seed_demo(&store, &region, date)?;
    }

    let engine = AdherenceEngine::new(&store, &config);
    let report = engine
        .compute_month(&region, date)
        .with_context(|| format!("adherence run failed for {region} {}", date.format("%Y-%m")))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &MonthReport) {
    println!("  net capacity: {:.0} min/agent/day", report.net_capacity_minutes);
    println!();
    println!("  date        demand(min)  avail  req  adherence");
    for day in &report.daily_results {
        let flag = if day.is_warning() { "  !" } else { "" };
        println!(
            "  {}  {:>11.1}  {:>5}  {:>3}  {:>8}%{flag}",
            day.date_iso,
            day.demand_minutes,
            day.available_count,
            day.required_count,
            day.adherence_percent
        );
    }

    println!();
    println!("=== MONTH SUMMARY ===");
    println!("  agents:            {}", report.roster.len());
    println!("  average adherence: {}%", report.average_adherence());
    let warnings = report.warning_days();
    if warnings.is_empty() {
        println!("  understaffed days: none");
    } else {
        let days: Vec<String> = warnings.iter().map(|d| d.day_of_month.to_string()).collect();
        println!("  understaffed days: {} ({})", warnings.len(), days.join(", "));
    }
}

/// A small but complete region so the runner can be tried without a database.
fn seed_demo(store: &PlanningStore, region: &str, around: NaiveDate) -> Result<()> {
    store.insert_regulation_rule(region, "Max Hours per Day", 8.0, true)?;
    store.insert_regulation_rule(region, "Lunch Duration (minutes)", 60.0, true)?;
    store.insert_regulation_rule(region, "Breaks per Day (count)", 2.0, true)?;
    store.insert_regulation_rule(region, "Break Duration (minutes)", 15.0, true)?;

    store.upsert_forecast_total(region, 1_200_000.0)?;
    // Weekdays carry the load; weekends are light and chat-free.
    let weekday_split = [22.0, 20.0, 19.0, 18.0, 16.0, 3.0, 2.0];
    for (idx, percent) in weekday_split.iter().enumerate() {
        let weekend = idx >= 5;
        store.upsert_daily_share(
            region,
            idx as u32 + 1,
            &DailyShareRow {
                percent: *percent,
                mail:    Some(if weekend { 70.0 } else { 35.0 }),
                call:    Some(if weekend { 30.0 } else { 40.0 }),
                chat:    Some(if weekend { 0.0 } else { 10.0 }),
                ..Default::default()
            },
        )?;
    }

    store.insert_task(region, "Mail", 4.0, true)?;
    store.insert_task(region, "Call", 6.5, true)?;
    store.insert_task(region, "Chat", 5.0, true)?;
    store.insert_task(region, "Clienteling", 12.0, true)?;
    store.insert_task(region, "Back Office", 8.0, true)?;

    let agents = [
        ("a-01", "Camille Laurent", AgentStatus::Present),
        ("a-02", "Hugo Bernard", AgentStatus::Present),
        ("a-03", "Léa Martin", AgentStatus::Present),
        ("a-04", "Louis Petit", AgentStatus::Present),
        ("a-05", "Chloé Durand", AgentStatus::Present),
        ("a-06", "Nathan Moreau", AgentStatus::Sick),
        ("a-07", "Inès Fontaine", AgentStatus::Present),
        ("a-08", "Jules Girard", AgentStatus::Pto),
    ];
    for (id, name, status) in agents {
        store.insert_agent(id, name, region, status)?;
    }

    let leave_start = around - Duration::days(3);
    store.insert_leave_range("a-02", leave_start, around + Duration::days(4), false, false)?;
    store.insert_leave_range("a-05", around, around, true, false)?;
    log::debug!("seeded demo region {region} with {} agents", agents.len());
    Ok(())
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
