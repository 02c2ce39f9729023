//! Store methods for agents and their leave.

use crate::{
    error::EngineResult,
    roster::{AgentRecord, AgentStatus, LeaveRange},
    source::RosterSource,
};
use chrono::NaiveDate;
use rusqlite::params;

use super::PlanningStore;

impl PlanningStore {
    pub fn insert_agent(
        &self,
        agent_id:  &str,
        full_name: &str,
        region:    &str,
        status:    AgentStatus,
    ) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO agent (agent_id, full_name, region, status) VALUES (?1, ?2, ?3, ?4)",
            params![agent_id, full_name, region, status.label()],
        )?;
        Ok(())
    }

    /// Overwrite an agent's status with a raw label. The engine rejects
    /// labels it does not know when the roster is next read.
    pub fn set_agent_status_label(&self, agent_id: &str, status: &str) -> EngineResult<()> {
        self.conn.execute(
            "UPDATE agent SET status = ?1 WHERE agent_id = ?2",
            params![status, agent_id],
        )?;
        Ok(())
    }

    pub fn insert_leave_range(
        &self,
        agent_id:       &str,
        start_date:     NaiveDate,
        end_date:       NaiveDate,
        half_day_start: bool,
        half_day_end:   bool,
    ) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO leave_range (agent_id, start_date, end_date, half_day_start, half_day_end)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![agent_id, start_date, end_date, half_day_start, half_day_end],
        )?;
        Ok(())
    }
}

impl RosterSource for PlanningStore {
    fn agents(&self, region: &str) -> EngineResult<Vec<AgentRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT agent_id, full_name, region, status FROM agent
             WHERE region = ?1
             ORDER BY full_name ASC, agent_id ASC",
        )?;
        let rows = stmt
            .query_map(params![region], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(agent_id, full_name, region, status)| -> EngineResult<AgentRecord> {
                Ok(AgentRecord {
                    status: status.parse::<AgentStatus>()?,
                    agent_id,
                    full_name,
                    region,
                })
            })
            .collect()
    }

    fn leave_ranges(&self) -> EngineResult<Vec<LeaveRange>> {
        let mut stmt = self.conn.prepare(
            "SELECT agent_id, start_date, end_date, half_day_start, half_day_end
             FROM leave_range
             ORDER BY agent_id ASC, start_date ASC, id ASC",
        )?;
        let ranges = stmt
            .query_map([], |row| {
                Ok(LeaveRange {
                    agent_id:       row.get(0)?,
                    start_date:     row.get(1)?,
                    end_date:       row.get(2)?,
                    half_day_start: row.get(3)?,
                    half_day_end:   row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ranges)
    }
}
