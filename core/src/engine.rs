//! The monthly orchestrator.
//!
//! EXECUTION ORDER (one run = one region × one month):
//!   1. Regulation rules  → net capacity minutes       (read once)
//!   2. Roster + leave    → joined roster             (read once)
//!   3. Forecast rows     → month-wide forecast plan  (read once)
//!   4. For day 1..=days_in_month, sequentially:
//!        decompose demand → count available → reconcile
//!
//! RULES:
//!   - Every run re-reads its inputs; nothing is cached between runs.
//!   - Any read failure aborts the run. No partial month is returned.
//!   - Results are never written back to the store.

use crate::{
    config::EngineConfig,
    error::{EngineError, EngineResult},
    forecast::ForecastPlan,
    iso_week::days_in_month,
    reconcile::reconcile,
    regulation::resolve_rule_set,
    roster::{Roster, RosterRow},
    source::PlanningSource,
    types::{Headcount, Minutes, RegionCode},
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyResult {
    pub date_iso:          String,
    pub day_of_month:      u32,
    pub available_count:   Headcount,
    pub required_count:    Headcount,
    pub adherence_percent: u8,
    pub demand_minutes:    Minutes,
}

impl DailyResult {
    /// Understaffed: more heads needed than are available.
    pub fn is_warning(&self) -> bool {
        self.required_count > self.available_count
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthReport {
    pub region:               RegionCode,
    pub year:                 i32,
    pub month:                u32,
    pub net_capacity_minutes: Minutes,
    pub daily_results:        Vec<DailyResult>,
    pub roster:               Vec<RosterRow>,
}

impl MonthReport {
    pub fn warning_days(&self) -> Vec<&DailyResult> {
        self.daily_results.iter().filter(|d| d.is_warning()).collect()
    }

    /// Mean daily adherence, rounded and clamped to [0, 100].
    /// An empty report reads as fully staffed.
    pub fn average_adherence(&self) -> u8 {
        if self.daily_results.is_empty() {
            return 100;
        }
        let sum: f64 = self
            .daily_results
            .iter()
            .map(|d| f64::from(d.adherence_percent))
            .sum();
        let mean = sum / self.daily_results.len() as f64;
        mean.round().clamp(0.0, 100.0) as u8
    }
}

pub struct AdherenceEngine<'a, S: PlanningSource + ?Sized> {
    source: &'a S,
    config: &'a EngineConfig,
}

impl<'a, S: PlanningSource + ?Sized> AdherenceEngine<'a, S> {
    pub fn new(source: &'a S, config: &'a EngineConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    /// Compute the month containing `any_date` for the configured default region.
    pub fn compute_default_month(&self, any_date: NaiveDate) -> EngineResult<MonthReport> {
        self.compute_month(&self.config.default_region, any_date)
    }

    /// Compute every day of the month containing `any_date` for `region`.
    /// Only the year and month of `any_date` are used.
    pub fn compute_month(&self, region: &str, any_date: NaiveDate) -> EngineResult<MonthReport> {
        let (year, month) = (any_date.year(), any_date.month());
        let days = days_in_month(year, month)
            .ok_or(EngineError::InvalidDate { year, month, day: 1 })?;

        let rules = resolve_rule_set(self.source, region, self.config.regulation_defaults)?;
        let net_capacity_minutes = rules.net_capacity_minutes();
        let roster = Roster::load(self.source, region)?;
        let plan = ForecastPlan::load(
            self.source,
            region,
            year,
            month,
            self.config.category_defaults,
        )?;

        let mut daily_results = Vec::with_capacity(days as usize);
        let mut dates = Vec::with_capacity(days as usize);
        for day in 1..=days {
            let demand = plan.decompose(day)?;
            let available = roster.available_count(demand.date);
            let outcome = reconcile(demand.demand_minutes, net_capacity_minutes, available);

            log::debug!(
                "region={region} {} demand={:.1}min available={available} required={} adherence={}%",
                demand.date,
                demand.demand_minutes,
                outcome.required_count,
                outcome.adherence_percent
            );

            daily_results.push(DailyResult {
                date_iso:          demand.date.format("%Y-%m-%d").to_string(),
                day_of_month:      day,
                available_count:   available,
                required_count:    outcome.required_count,
                adherence_percent: outcome.adherence_percent,
                demand_minutes:    demand.demand_minutes,
            });
            dates.push(demand.date);
        }

        let report = MonthReport {
            region: region.to_string(),
            year,
            month,
            net_capacity_minutes,
            daily_results,
            roster: roster.grid(&dates),
        };

        log::info!(
            "region={region} {year}-{month:02}: capacity={net_capacity_minutes:.0}min agents={} average={}% warnings={}",
            roster.len(),
            report.average_adherence(),
            report.warning_days().len()
        );

        Ok(report)
    }
}
