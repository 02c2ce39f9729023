//! Roster availability resolver.
//!
//! An agent counts as available on a date iff their status is Present and
//! no leave range covers that date. Ranges are inclusive and compared by
//! calendar date only. Half-day flags travel with the data but any
//! overlapping range removes the whole day.

use crate::{
    error::{EngineError, EngineResult},
    source::RosterSource,
    types::{AgentId, Headcount, RegionCode},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentStatus {
    Present,
    Unavailable,
    #[serde(rename = "PTO")]
    Pto,
    Sick,
}

impl AgentStatus {
    pub fn label(self) -> &'static str {
        match self {
            AgentStatus::Present     => "Present",
            AgentStatus::Unavailable => "Unavailable",
            AgentStatus::Pto         => "PTO",
            AgentStatus::Sick        => "Sick",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgentStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Present"     => Ok(AgentStatus::Present),
            "Unavailable" => Ok(AgentStatus::Unavailable),
            "PTO"         => Ok(AgentStatus::Pto),
            "Sick"        => Ok(AgentStatus::Sick),
            other => Err(EngineError::InvalidRecord {
                entity: "agent",
                detail: format!("unknown status '{other}'"),
            }),
        }
    }
}

/// An agent as the roster store returns it, before leave is joined in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    pub agent_id:  AgentId,
    pub full_name: String,
    pub region:    RegionCode,
    pub status:    AgentStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRange {
    pub agent_id:       AgentId,
    pub start_date:     NaiveDate,
    pub end_date:       NaiveDate,
    pub half_day_start: bool,
    pub half_day_end:   bool,
}

impl LeaveRange {
    /// Inclusive on both ends. A range ending before it starts covers nothing.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub agent_id:     AgentId,
    pub full_name:    String,
    pub region:       RegionCode,
    pub status:       AgentStatus,
    pub leave_ranges: Vec<LeaveRange>,
}

impl Agent {
    pub fn is_on_leave(&self, date: NaiveDate) -> bool {
        self.leave_ranges.iter().any(|r| r.covers(date))
    }

    /// The "off" flag used to shade the roster grid. Exactly the negation
    /// of availability.
    pub fn is_off(&self, date: NaiveDate) -> bool {
        self.status != AgentStatus::Present || self.is_on_leave(date)
    }

    pub fn is_available(&self, date: NaiveDate) -> bool {
        !self.is_off(date)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub agents: Vec<Agent>,
}

impl Roster {
    /// Attach each leave range to its agent. Ranges for agents not in
    /// `records` are dropped; each agent's ranges keep their input order.
    pub fn assemble(records: Vec<AgentRecord>, ranges: Vec<LeaveRange>) -> Self {
        let mut by_agent: HashMap<AgentId, Vec<LeaveRange>> = HashMap::new();
        for range in ranges {
            by_agent.entry(range.agent_id.clone()).or_default().push(range);
        }
        let agents = records
            .into_iter()
            .map(|r| Agent {
                leave_ranges: by_agent.remove(&r.agent_id).unwrap_or_default(),
                agent_id:     r.agent_id,
                full_name:    r.full_name,
                region:       r.region,
                status:       r.status,
            })
            .collect();
        Self { agents }
    }

    /// Read the region's agents and all leave ranges, and join them.
    pub fn load<S: RosterSource + ?Sized>(source: &S, region: &str) -> EngineResult<Self> {
        let records = source.agents(region)?;
        let ranges = source.leave_ranges()?;
        let roster = Self::assemble(records, ranges);
        log::debug!("region={region} roster: {} agents", roster.agents.len());
        Ok(roster)
    }

    pub fn available_count(&self, date: NaiveDate) -> Headcount {
        let count = self.agents.iter().filter(|a| a.is_available(date)).count();
        Headcount::try_from(count).unwrap_or(Headcount::MAX)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Per-agent "off" flags for each of `dates`, in roster order.
    pub fn grid(&self, dates: &[NaiveDate]) -> Vec<RosterRow> {
        self.agents
            .iter()
            .map(|agent| RosterRow {
                agent_id:  agent.agent_id.clone(),
                full_name: agent.full_name.clone(),
                status:    agent.status,
                off:       dates.iter().map(|d| agent.is_off(*d)).collect(),
            })
            .collect()
    }
}

/// One line of the roster grid: `off[i]` belongs to day `i + 1` of the month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRow {
    pub agent_id:  AgentId,
    pub full_name: String,
    pub status:    AgentStatus,
    pub off:       Vec<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, status: AgentStatus) -> AgentRecord {
        AgentRecord {
            agent_id:  id.into(),
            full_name: format!("Agent {id}"),
            region:    "FR".into(),
            status,
        }
    }

    fn leave(id: &str, start: NaiveDate, end: NaiveDate) -> LeaveRange {
        LeaveRange {
            agent_id:       id.into(),
            start_date:     start,
            end_date:       end,
            half_day_start: false,
            half_day_end:   false,
        }
    }

    #[test]
    fn leave_range_is_inclusive() {
        let roster = Roster::assemble(
            vec![record("a1", AgentStatus::Present)],
            vec![leave("a1", date(2024, 5, 10), date(2024, 5, 12))],
        );
        assert_eq!(roster.available_count(date(2024, 5, 9)), 1);
        assert_eq!(roster.available_count(date(2024, 5, 10)), 0);
        assert_eq!(roster.available_count(date(2024, 5, 11)), 0);
        assert_eq!(roster.available_count(date(2024, 5, 12)), 0);
        assert_eq!(roster.available_count(date(2024, 5, 13)), 1);
    }

    #[test]
    fn only_present_agents_count() {
        let roster = Roster::assemble(
            vec![
                record("a1", AgentStatus::Present),
                record("a2", AgentStatus::Sick),
                record("a3", AgentStatus::Pto),
                record("a4", AgentStatus::Unavailable),
            ],
            vec![],
        );
        assert_eq!(roster.available_count(date(2024, 5, 1)), 1);
    }

    #[test]
    fn half_day_ranges_still_remove_the_whole_day() {
        let mut range = leave("a1", date(2024, 5, 10), date(2024, 5, 10));
        range.half_day_start = true;
        let roster = Roster::assemble(vec![record("a1", AgentStatus::Present)], vec![range]);
        assert_eq!(roster.available_count(date(2024, 5, 10)), 0);
    }

    #[test]
    fn inverted_range_covers_nothing() {
        let roster = Roster::assemble(
            vec![record("a1", AgentStatus::Present)],
            vec![leave("a1", date(2024, 5, 12), date(2024, 5, 10))],
        );
        assert_eq!(roster.available_count(date(2024, 5, 11)), 1);
    }

    #[test]
    fn ranges_for_unknown_agents_are_dropped() {
        let roster = Roster::assemble(
            vec![record("a1", AgentStatus::Present)],
            vec![leave("zz", date(2024, 5, 1), date(2024, 5, 31))],
        );
        assert!(roster.agents[0].leave_ranges.is_empty());
        assert_eq!(roster.available_count(date(2024, 5, 15)), 1);
    }

    #[test]
    fn grid_flags_match_availability() {
        let roster = Roster::assemble(
            vec![record("a1", AgentStatus::Present), record("a2", AgentStatus::Sick)],
            vec![leave("a1", date(2024, 5, 2), date(2024, 5, 2))],
        );
        let dates = [date(2024, 5, 1), date(2024, 5, 2), date(2024, 5, 3)];
        let grid = roster.grid(&dates);
        assert_eq!(grid[0].off, vec![false, true, false]);
        assert_eq!(grid[1].off, vec![true, true, true]);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("On Holiday".parse::<AgentStatus>().is_err());
        assert_eq!("PTO".parse::<AgentStatus>().unwrap(), AgentStatus::Pto);
    }
}
