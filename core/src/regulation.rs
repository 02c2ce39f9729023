//! Regulation resolver — a region's labor rules reduced to one number:
//! net productive minutes per agent per day.

use crate::{
    error::EngineResult,
    source::{RuleRow, RuleSource},
    types::Minutes,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The rule kinds the engine understands. Any other key is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    MaxHoursPerDay,
    LunchMinutes,
    BreaksPerDay,
    BreakMinutes,
}

impl RuleKind {
    pub const ALL: [RuleKind; 4] = [
        RuleKind::MaxHoursPerDay,
        RuleKind::LunchMinutes,
        RuleKind::BreaksPerDay,
        RuleKind::BreakMinutes,
    ];

    /// The label rule rows are stored under.
    pub fn label(self) -> &'static str {
        match self {
            RuleKind::MaxHoursPerDay => "Max Hours per Day",
            RuleKind::LunchMinutes   => "Lunch Duration (minutes)",
            RuleKind::BreaksPerDay   => "Breaks per Day (count)",
            RuleKind::BreakMinutes   => "Break Duration (minutes)",
        }
    }
}

impl FromStr for RuleKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        RuleKind::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(key))
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegulationRuleSet {
    pub max_hours_per_day: f64,
    pub lunch_minutes:     u32,
    pub breaks_per_day:    u32,
    pub break_minutes:     u32,
}

impl Default for RegulationRuleSet {
    fn default() -> Self {
        Self {
            max_hours_per_day: 8.0,
            lunch_minutes:     60,
            breaks_per_day:    2,
            break_minutes:     15,
        }
    }
}

impl RegulationRuleSet {
    /// Overlay enabled rule rows on `defaults`.
    /// Rows are applied in order, so a repeated key keeps its last value.
    pub fn from_rules(rows: &[RuleRow], defaults: RegulationRuleSet) -> Self {
        let mut set = defaults;
        for row in rows {
            let Ok(kind) = row.key.parse::<RuleKind>() else {
                log::debug!("ignoring unrecognised regulation key '{}'", row.key);
                continue;
            };
            let value = row.value.max(0.0);
            match kind {
                RuleKind::MaxHoursPerDay => set.max_hours_per_day = value,
                RuleKind::LunchMinutes   => set.lunch_minutes = whole(value),
                RuleKind::BreaksPerDay   => set.breaks_per_day = whole(value),
                RuleKind::BreakMinutes   => set.break_minutes = whole(value),
            }
        }
        set
    }

    /// Scheduled minutes minus lunch and breaks, never below zero.
    pub fn net_capacity_minutes(&self) -> Minutes {
        let scheduled = self.max_hours_per_day * 60.0;
        let allowances = f64::from(self.lunch_minutes)
            + f64::from(self.breaks_per_day) * f64::from(self.break_minutes);
        (scheduled - allowances).max(0.0)
    }
}

fn whole(value: f64) -> u32 {
    value.round().min(f64::from(u32::MAX)) as u32
}

/// Fetch the region's enabled rules and derive its net capacity.
pub fn resolve_rule_set<S: RuleSource + ?Sized>(
    source:   &S,
    region:   &str,
    defaults: RegulationRuleSet,
) -> EngineResult<RegulationRuleSet> {
    let rows = source.enabled_rules(region)?;
    let set = RegulationRuleSet::from_rules(&rows, defaults);
    log::debug!(
        "region={region} rules: hours={} lunch={} breaks={}x{} net={:.1}min",
        set.max_hours_per_day,
        set.lunch_minutes,
        set.breaks_per_day,
        set.break_minutes,
        set.net_capacity_minutes()
    );
    Ok(set)
}
