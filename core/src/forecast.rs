//! Forecast decomposer.
//!
//! Resolves an annual contact volume down to one day:
//!
//!   day_volume = total × month% × week% × weekday%
//!
//! then splits the day across task categories and prices each category in
//! minutes with its average handle time. Missing share rows fall back to a
//! uniform split; a missing annual total is fatal.

use crate::{
    error::{EngineError, EngineResult},
    iso_week::{days_in_month, iso_week_number, iso_weekday},
    source::{DailyShareRow, ForecastSource},
    types::Minutes,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

pub const MONTHLY_FALLBACK_PERCENT: f64 = 100.0 / 12.0;
pub const WEEKLY_FALLBACK_PERCENT: f64 = 100.0 / 52.0;
pub const DAILY_FALLBACK_PERCENT: f64 = 100.0 / 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TaskCategory {
    Mail,
    Call,
    Chat,
    Clienteling,
    Fraud,
    BackOffice,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 6] = [
        TaskCategory::Mail,
        TaskCategory::Call,
        TaskCategory::Chat,
        TaskCategory::Clienteling,
        TaskCategory::Fraud,
        TaskCategory::BackOffice,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskCategory::Mail        => "Mail",
            TaskCategory::Call        => "Call",
            TaskCategory::Chat        => "Chat",
            TaskCategory::Clienteling => "Clienteling",
            TaskCategory::Fraud       => "Fraud",
            TaskCategory::BackOffice  => "BackOffice",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskCategory {
    type Err = ();

    /// Case, spaces and underscores are not significant: "Back Office",
    /// "back_office" and "BackOffice" all name the same category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect();
        TaskCategory::ALL
            .into_iter()
            .find(|cat| cat.label().eq_ignore_ascii_case(&folded))
            .ok_or(())
    }
}

/// Percent split of one day's volume across categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryMix {
    pub mail:        f64,
    pub call:        f64,
    pub chat:        f64,
    pub clienteling: f64,
    pub fraud:       f64,
    pub back_office: f64,
}

impl Default for CategoryMix {
    fn default() -> Self {
        Self {
            mail:        38.0,
            call:        36.0,
            chat:        0.0,
            clienteling: 3.0,
            fraud:       0.0,
            back_office: 26.0,
        }
    }
}

impl CategoryMix {
    pub fn percent(&self, category: TaskCategory) -> f64 {
        match category {
            TaskCategory::Mail        => self.mail,
            TaskCategory::Call        => self.call,
            TaskCategory::Chat        => self.chat,
            TaskCategory::Clienteling => self.clienteling,
            TaskCategory::Fraud       => self.fraud,
            TaskCategory::BackOffice  => self.back_office,
        }
    }

    /// Each category present on the row overrides its default independently.
    pub fn resolve(row: Option<&DailyShareRow>, defaults: CategoryMix) -> Self {
        let Some(row) = row else { return defaults };
        let pick = |cat: TaskCategory| row.category_percent(cat).unwrap_or(defaults.percent(cat));
        Self {
            mail:        pick(TaskCategory::Mail),
            call:        pick(TaskCategory::Call),
            chat:        pick(TaskCategory::Chat),
            clienteling: pick(TaskCategory::Clienteling),
            fraud:       pick(TaskCategory::Fraud),
            back_office: pick(TaskCategory::BackOffice),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct WeekdayPlan {
    percent: f64,
    mix:     CategoryMix,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDemand {
    pub category: TaskCategory,
    pub volume:   f64,
    pub minutes:  Minutes,
}

/// One day's decomposed demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDemand {
    pub date:           NaiveDate,
    pub iso_weekday:    u32,
    pub iso_week:       u32,
    pub day_volume:     f64,
    pub categories:     Vec<CategoryDemand>,
    pub demand_minutes: Minutes,
}

/// Every forecast input a month needs, read once.
#[derive(Debug, Clone)]
pub struct ForecastPlan {
    year:            i32,
    month:           u32,
    total_volume:    f64,
    monthly_percent: f64,
    weekly_percent:  HashMap<u32, f64>,
    weekdays:        HashMap<u32, WeekdayPlan>,
    aht:             HashMap<TaskCategory, Minutes>,
    mix_defaults:    CategoryMix,
}

impl ForecastPlan {
    /// Read the month's forecast rows for `region`.
    /// Fails only if the store fails or the region has no annual total.
    pub fn load<S: ForecastSource + ?Sized>(
        source:            &S,
        region:            &str,
        year:              i32,
        month:             u32,
        category_defaults: CategoryMix,
    ) -> EngineResult<Self> {
        let days = days_in_month(year, month)
            .ok_or(EngineError::InvalidDate { year, month, day: 1 })?;

        let total_volume = source
            .total_volume(region)?
            .ok_or_else(|| EngineError::MissingForecastTotal { region: region.to_string() })?;

        let monthly_percent = source
            .monthly_share(region, month)?
            .unwrap_or(MONTHLY_FALLBACK_PERCENT);

        let weeks: BTreeSet<u32> = (1..=days)
            .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
            .map(iso_week_number)
            .collect();
        let mut weekly_percent = HashMap::with_capacity(weeks.len());
        for week in weeks {
            let percent = source
                .weekly_share(region, week)?
                .unwrap_or(WEEKLY_FALLBACK_PERCENT);
            weekly_percent.insert(week, percent);
        }

        let mut weekdays = HashMap::with_capacity(7);
        for weekday in 1..=7u32 {
            let row = source.daily_share(region, weekday)?;
            let plan = WeekdayPlan {
                percent: row.as_ref().map_or(DAILY_FALLBACK_PERCENT, |r| r.percent),
                mix:     CategoryMix::resolve(row.as_ref(), category_defaults),
            };
            weekdays.insert(weekday, plan);
        }

        let mut aht = HashMap::new();
        for task in source.enabled_tasks(region)? {
            let Ok(category) = task.name.parse::<TaskCategory>() else {
                log::warn!("region={region} task '{}' matches no category; ignored", task.name);
                continue;
            };
            if aht.contains_key(&category) {
                log::warn!("region={region} duplicate enabled task for {category}; keeping the first");
                continue;
            }
            aht.insert(category, task.aht_minutes);
        }

        Ok(Self {
            year,
            month,
            total_volume,
            monthly_percent,
            weekly_percent,
            weekdays,
            aht,
            mix_defaults: category_defaults,
        })
    }

    pub fn total_volume(&self) -> f64 {
        self.total_volume
    }

    /// Average handle time of the enabled task backing `category`, if any.
    pub fn handle_time(&self, category: TaskCategory) -> Option<Minutes> {
        self.aht.get(&category).copied()
    }

    /// Decompose day `day` (1-based) of the planned month.
    pub fn decompose(&self, day: u32) -> EngineResult<DayDemand> {
        let date = NaiveDate::from_ymd_opt(self.year, self.month, day).ok_or(
            EngineError::InvalidDate { year: self.year, month: self.month, day },
        )?;
        let iso_weekday = iso_weekday(date);
        let iso_week = iso_week_number(date);

        let weekly = self
            .weekly_percent
            .get(&iso_week)
            .copied()
            .unwrap_or(WEEKLY_FALLBACK_PERCENT);
        let weekday = self.weekdays.get(&iso_weekday).copied().unwrap_or(WeekdayPlan {
            percent: DAILY_FALLBACK_PERCENT,
            mix:     self.mix_defaults,
        });

        let day_volume = self.total_volume
            * fraction(self.monthly_percent)
            * fraction(weekly)
            * fraction(weekday.percent);

        let categories: Vec<CategoryDemand> = TaskCategory::ALL
            .into_iter()
            .map(|category| {
                let volume = day_volume * fraction(weekday.mix.percent(category));
                // No enabled task for the category: it costs nothing.
                let minutes = self.handle_time(category).map_or(0.0, |aht| volume * aht);
                CategoryDemand { category, volume, minutes }
            })
            .collect();
        let demand_minutes: Minutes = categories.iter().map(|c| c.minutes).sum();

        Ok(DayDemand {
            date,
            iso_weekday,
            iso_week,
            day_volume,
            categories,
            demand_minutes,
        })
    }
}

/// Demand minutes for a single date, reading only what that date needs.
pub fn demand_for_date<S: ForecastSource + ?Sized>(
    source:            &S,
    region:            &str,
    date:              NaiveDate,
    category_defaults: CategoryMix,
) -> EngineResult<DayDemand> {
    let plan = ForecastPlan::load(source, region, date.year(), date.month(), category_defaults)?;
    plan.decompose(date.day())
}

fn fraction(percent: f64) -> f64 {
    percent / 100.0
}
