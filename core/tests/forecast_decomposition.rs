//! Forecast decomposition against a real store: fallbacks, ISO week
//! selection, and task matching.

use adherence_core::{
    forecast::{
        demand_for_date, CategoryMix, ForecastPlan, TaskCategory, DAILY_FALLBACK_PERCENT,
        MONTHLY_FALLBACK_PERCENT, WEEKLY_FALLBACK_PERCENT,
    },
    source::DailyShareRow,
    store::PlanningStore,
};
use chrono::NaiveDate;

const REGION: &str = "FR";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store_with_total(total: f64) -> PlanningStore {
    let store = PlanningStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store.upsert_forecast_total(REGION, total).unwrap();
    store
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn missing_shares_fall_back_to_uniform_splits() {
    let store = store_with_total(120_000.0);

    let day = demand_for_date(&store, REGION, date(2024, 5, 15), CategoryMix::default()).unwrap();
    let expected = 120_000.0
        * (MONTHLY_FALLBACK_PERCENT / 100.0)
        * (WEEKLY_FALLBACK_PERCENT / 100.0)
        * (DAILY_FALLBACK_PERCENT / 100.0);
    assert_close(day.day_volume, expected);
    assert_eq!(day.iso_weekday, 3);
    assert_eq!(day.iso_week, 20);
    // No tasks at all: volume exists, minutes do not.
    assert_eq!(day.demand_minutes, 0.0);
}

#[test]
fn missing_daily_row_uses_default_category_mix() {
    let store = store_with_total(120_000.0);
    store.upsert_monthly_share(REGION, 5, 10.0).unwrap();
    store.upsert_weekly_share(REGION, 20, 25.0).unwrap();
    for name in ["Mail", "Call", "Chat", "Clienteling", "Fraud", "BackOffice"] {
        store.insert_task(REGION, name, 1.0, true).unwrap();
    }

    let day = demand_for_date(&store, REGION, date(2024, 5, 15), CategoryMix::default()).unwrap();
    let day_volume = 120_000.0 * 0.10 * 0.25 * (DAILY_FALLBACK_PERCENT / 100.0);
    assert_close(day.day_volume, day_volume);

    let volume_of = |cat: TaskCategory| {
        day.categories.iter().find(|c| c.category == cat).unwrap().volume
    };
    assert_close(volume_of(TaskCategory::Mail), day_volume * 0.38);
    assert_close(volume_of(TaskCategory::Call), day_volume * 0.36);
    assert_close(volume_of(TaskCategory::Clienteling), day_volume * 0.03);
    assert_close(volume_of(TaskCategory::BackOffice), day_volume * 0.26);
    assert_eq!(volume_of(TaskCategory::Chat), 0.0);
    assert_eq!(volume_of(TaskCategory::Fraud), 0.0);
    assert_close(day.demand_minutes, day_volume * 1.03);
}

#[test]
fn partial_daily_row_keeps_defaults_for_absent_columns() {
    let store = store_with_total(70_000.0);
    store
        .upsert_daily_share(
            REGION,
            1,
            &DailyShareRow {
                percent: 50.0,
                call:    Some(100.0),
                ..Default::default()
            },
        )
        .unwrap();
    store.insert_task(REGION, "Call", 2.0, true).unwrap();
    store.insert_task(REGION, "Back Office", 10.0, true).unwrap();

    // 2024-05-13 is a Monday.
    let day = demand_for_date(&store, REGION, date(2024, 5, 13), CategoryMix::default()).unwrap();
    let day_volume = 70_000.0
        * (MONTHLY_FALLBACK_PERCENT / 100.0)
        * (WEEKLY_FALLBACK_PERCENT / 100.0)
        * 0.5;
    assert_close(day.day_volume, day_volume);
    assert_close(day.demand_minutes, day_volume * 1.0 * 2.0 + day_volume * 0.26 * 10.0);
}

#[test]
fn late_december_uses_week_one_share() {
    let store = store_with_total(52_000.0);
    store.upsert_monthly_share(REGION, 12, 100.0).unwrap();
    store.upsert_weekly_share(REGION, 1, 100.0).unwrap();
    store.upsert_weekly_share(REGION, 52, 50.0).unwrap();

    // Monday 2024-12-30 sits in ISO week 1 of 2025.
    let plan = ForecastPlan::load(&store, REGION, 2024, 12, CategoryMix::default()).unwrap();
    let dec30 = plan.decompose(30).unwrap();
    assert_eq!(dec30.iso_week, 1);
    assert_close(dec30.day_volume, 52_000.0 * 1.0 * 1.0 * (DAILY_FALLBACK_PERCENT / 100.0));

    let dec23 = plan.decompose(23).unwrap();
    assert_eq!(dec23.iso_week, 52);
    assert_close(dec23.day_volume, 52_000.0 * 1.0 * 0.5 * (DAILY_FALLBACK_PERCENT / 100.0));
}

#[test]
fn early_january_uses_previous_years_week() {
    let store = store_with_total(10_000.0);
    store.upsert_weekly_share(REGION, 52, 40.0).unwrap();

    // Sunday 2023-01-01 is in ISO week 52 of 2022.
    let day = demand_for_date(&store, REGION, date(2023, 1, 1), CategoryMix::default()).unwrap();
    assert_eq!(day.iso_week, 52);
    assert_eq!(day.iso_weekday, 7);
    assert_close(
        day.day_volume,
        10_000.0 * (MONTHLY_FALLBACK_PERCENT / 100.0) * 0.4 * (DAILY_FALLBACK_PERCENT / 100.0),
    );
}

#[test]
fn unmatched_and_disabled_tasks_add_nothing() {
    let store = store_with_total(120_000.0);
    store.insert_task(REGION, "Social Media", 30.0, true).unwrap();
    store.insert_task(REGION, "Mail", 30.0, false).unwrap();
    store.insert_task(REGION, "Call", 2.0, true).unwrap();

    let plan = ForecastPlan::load(&store, REGION, 2024, 5, CategoryMix::default()).unwrap();
    assert_eq!(plan.handle_time(TaskCategory::Mail), None);
    assert_eq!(plan.handle_time(TaskCategory::Call), Some(2.0));

    let day = plan.decompose(15).unwrap();
    assert_close(day.demand_minutes, day.day_volume * 0.36 * 2.0);
}

#[test]
fn first_enabled_task_wins_for_a_category() {
    let store = store_with_total(1_000.0);
    store.insert_task(REGION, "Call", 4.0, true).unwrap();
    store.insert_task(REGION, "call", 9.0, true).unwrap();

    let plan = ForecastPlan::load(&store, REGION, 2024, 5, CategoryMix::default()).unwrap();
    assert_eq!(plan.handle_time(TaskCategory::Call), Some(4.0));
}

#[test]
fn configured_category_defaults_replace_built_ins() {
    let store = store_with_total(1_000.0);
    store.insert_task(REGION, "Fraud", 1.0, true).unwrap();
    let fraud_only = CategoryMix {
        mail:        0.0,
        call:        0.0,
        chat:        0.0,
        clienteling: 0.0,
        fraud:       100.0,
        back_office: 0.0,
    };

    let day = demand_for_date(&store, REGION, date(2024, 5, 15), fraud_only).unwrap();
    assert_close(day.demand_minutes, day.day_volume);
}

#[test]
fn out_of_range_day_is_rejected() {
    let store = store_with_total(1_000.0);
    let plan = ForecastPlan::load(&store, REGION, 2023, 2, CategoryMix::default()).unwrap();
    assert!(plan.decompose(28).is_ok());
    assert!(plan.decompose(29).is_err());
    assert!(plan.decompose(0).is_err());
}
