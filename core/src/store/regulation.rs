//! Store methods for regional labor regulations.

use crate::{
    error::EngineResult,
    source::{RuleRow, RuleSource},
};
use rusqlite::params;

use super::PlanningStore;

impl PlanningStore {
    pub fn insert_regulation_rule(
        &self,
        region:  &str,
        key:     &str,
        value:   f64,
        enabled: bool,
    ) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO regulation_rule (region, rule_key, value, enabled)
             VALUES (?1, ?2, ?3, ?4)",
            params![region, key, value, enabled],
        )?;
        Ok(())
    }
}

impl RuleSource for PlanningStore {
    fn enabled_rules(&self, region: &str) -> EngineResult<Vec<RuleRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT rule_key, value FROM regulation_rule
             WHERE region = ?1 AND enabled = 1
             ORDER BY id ASC",
        )?;
        let rows = stmt
            .query_map(params![region], |row| {
                Ok(RuleRow {
                    key:   row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
