//! Read-only query contracts the engine consumes.
//!
//! RULE: the engine never talks to storage directly. Everything it reads
//! goes through these traits, which `PlanningStore` implements over SQLite.
//! All methods are pure reads; a run treats their answers as a snapshot.

use crate::{
    error::EngineResult,
    forecast::TaskCategory,
    roster::{AgentRecord, LeaveRange},
    types::Minutes,
};

/// One enabled regulation row, still keyed by its stored label.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleRow {
    pub key:   String,
    pub value: f64,
}

/// Weekday share row. `percent` is the weekday's share of the week;
/// the category columns split that day's volume and may each be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyShareRow {
    pub percent:     f64,
    pub mail:        Option<f64>,
    pub call:        Option<f64>,
    pub chat:        Option<f64>,
    pub clienteling: Option<f64>,
    pub fraud:       Option<f64>,
    pub back_office: Option<f64>,
}

impl DailyShareRow {
    pub fn category_percent(&self, category: TaskCategory) -> Option<f64> {
        match category {
            TaskCategory::Mail        => self.mail,
            TaskCategory::Call        => self.call,
            TaskCategory::Chat        => self.chat,
            TaskCategory::Clienteling => self.clienteling,
            TaskCategory::Fraud       => self.fraud,
            TaskCategory::BackOffice  => self.back_office,
        }
    }
}

/// An enabled task as stored: free-text name plus average handle time.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub name:        String,
    pub aht_minutes: Minutes,
}

pub trait RuleSource {
    /// Enabled regulation rows for `region`, in storage order.
    fn enabled_rules(&self, region: &str) -> EngineResult<Vec<RuleRow>>;
}

pub trait ForecastSource {
    /// Annual contact volume. `None` when the region has no total row.
    fn total_volume(&self, region: &str) -> EngineResult<Option<f64>>;

    /// Month's share of the year, in percent. `month` is 1..=12.
    fn monthly_share(&self, region: &str, month: u32) -> EngineResult<Option<f64>>;

    /// ISO week share, in percent. `week` is 1..=53.
    fn weekly_share(&self, region: &str, week: u32) -> EngineResult<Option<f64>>;

    /// ISO weekday's share of the week, in percent. `weekday` is 1 (Monday)..=7.
    fn daily_share(&self, region: &str, weekday: u32) -> EngineResult<Option<DailyShareRow>>;

    fn enabled_tasks(&self, region: &str) -> EngineResult<Vec<TaskRow>>;
}

pub trait RosterSource {
    fn agents(&self, region: &str) -> EngineResult<Vec<AgentRecord>>;

    /// Every leave range on file, across all regions.
    fn leave_ranges(&self) -> EngineResult<Vec<LeaveRange>>;
}

/// Everything a month computation reads.
pub trait PlanningSource: RuleSource + ForecastSource + RosterSource {}

impl<T: RuleSource + ForecastSource + RosterSource + ?Sized> PlanningSource for T {}
