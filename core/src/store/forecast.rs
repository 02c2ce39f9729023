//! Store methods for forecast volumes, shares and tasks.

use crate::{
    error::EngineResult,
    source::{DailyShareRow, ForecastSource, TaskRow},
    types::Minutes,
};
use rusqlite::{params, OptionalExtension};

use super::PlanningStore;

impl PlanningStore {
    /// Set the annual volume for a region, replacing any previous total.
    pub fn upsert_forecast_total(&self, region: &str, total_volume: f64) -> EngineResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO forecast_total (region, total_volume) VALUES (?1, ?2)",
            params![region, total_volume],
        )?;
        Ok(())
    }

    pub fn upsert_monthly_share(&self, region: &str, month: u32, percent: f64) -> EngineResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO forecast_monthly_share (region, month, percent)
             VALUES (?1, ?2, ?3)",
            params![region, month, percent],
        )?;
        Ok(())
    }

    pub fn upsert_weekly_share(&self, region: &str, week: u32, percent: f64) -> EngineResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO forecast_weekly_share (region, week, percent)
             VALUES (?1, ?2, ?3)",
            params![region, week, percent],
        )?;
        Ok(())
    }

    pub fn upsert_daily_share(
        &self,
        region:  &str,
        weekday: u32,
        share:   &DailyShareRow,
    ) -> EngineResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO forecast_daily_share (
                region, weekday, percent, mail_percent, call_percent, chat_percent,
                clienteling_percent, fraud_percent, back_office_percent
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                region,
                weekday,
                share.percent,
                share.mail,
                share.call,
                share.chat,
                share.clienteling,
                share.fraud,
                share.back_office,
            ],
        )?;
        Ok(())
    }

    pub fn insert_task(
        &self,
        region:      &str,
        name:        &str,
        aht_minutes: Minutes,
        enabled:     bool,
    ) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO task (region, name, aht_minutes, enabled) VALUES (?1, ?2, ?3, ?4)",
            params![region, name, aht_minutes, enabled],
        )?;
        Ok(())
    }
}

impl ForecastSource for PlanningStore {
    fn total_volume(&self, region: &str) -> EngineResult<Option<f64>> {
        let total = self
            .conn
            .query_row(
                "SELECT total_volume FROM forecast_total WHERE region = ?1",
                params![region],
                |row| row.get(0),
            )
            .optional()?;
        Ok(total)
    }

    fn monthly_share(&self, region: &str, month: u32) -> EngineResult<Option<f64>> {
        let percent = self
            .conn
            .query_row(
                "SELECT percent FROM forecast_monthly_share WHERE region = ?1 AND month = ?2",
                params![region, month],
                |row| row.get(0),
            )
            .optional()?;
        Ok(percent)
    }

    fn weekly_share(&self, region: &str, week: u32) -> EngineResult<Option<f64>> {
        let percent = self
            .conn
            .query_row(
                "SELECT percent FROM forecast_weekly_share WHERE region = ?1 AND week = ?2",
                params![region, week],
                |row| row.get(0),
            )
            .optional()?;
        Ok(percent)
    }

    fn daily_share(&self, region: &str, weekday: u32) -> EngineResult<Option<DailyShareRow>> {
        let share = self
            .conn
            .query_row(
                "SELECT percent, mail_percent, call_percent, chat_percent,
                        clienteling_percent, fraud_percent, back_office_percent
                 FROM forecast_daily_share
                 WHERE region = ?1 AND weekday = ?2",
                params![region, weekday],
                |row| {
                    Ok(DailyShareRow {
                        percent:     row.get(0)?,
                        mail:        row.get(1)?,
                        call:        row.get(2)?,
                        chat:        row.get(3)?,
                        clienteling: row.get(4)?,
                        fraud:       row.get(5)?,
                        back_office: row.get(6)?,
                    })
                },
            )
            .optional()?;
        Ok(share)
    }

    fn enabled_tasks(&self, region: &str) -> EngineResult<Vec<TaskRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, aht_minutes FROM task
             WHERE region = ?1 AND enabled = 1
             ORDER BY id ASC",
        )?;
        let tasks = stmt
            .query_map(params![region], |row| {
                Ok(TaskRow {
                    name:        row.get(0)?,
                    aht_minutes: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }
}
