//! Budget domain models and the reporting period type.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// A calendar month used for budgeting and reporting, e.g. "2024-03".
///
/// Periods are always valid once constructed: the year is within
/// 1000..=9999 and the month within 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub const MIN_YEAR: i32 = 1000;
    pub const MAX_YEAR: i32 = 9999;

    /// Builds a period, rejecting out-of-range years and months.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return Err(Error::Validation(ValidationError::InvalidPeriod(format!(
                "{:04}-{:02}",
                year, month
            ))));
        }
        Ok(Period { year, month })
    }

    /// The period containing the given date.
    pub fn containing(date: NaiveDate) -> Self {
        Period {
            year: date.year().clamp(Self::MIN_YEAR, Self::MAX_YEAR),
            month: date.month(),
        }
    }

    /// The period `months` calendar months before this one, saturating at
    /// the minimum representable period.
    pub fn months_back(self, months: u32) -> Self {
        let floor = Self::MIN_YEAR * 12;
        let total = (self.year * 12 + self.month as i32 - 1)
            .saturating_sub(months as i32)
            .max(floor);
        Period {
            year: total.div_euclid(12),
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The half-open date range covered by this period: the first day of
    /// the month (inclusive) up to the first day of the next month
    /// (exclusive).
    pub fn date_range(&self) -> (NaiveDate, NaiveDate) {
        let start = first_of_month(self.year, self.month);
        let end = if self.month == 12 {
            first_of_month(self.year + 1, 1)
        } else {
            first_of_month(self.year, self.month + 1)
        };
        (start, end)
    }
}

// (year, month, 1) is representable for every constructed Period.
fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = Error;

    /// Parses the canonical "YYYY-MM" form. Anything else, including
    /// unpadded months, is rejected.
    fn from_str(s: &str) -> Result<Self> {
        let (year_part, month_part) = s.split_once('-').ok_or_else(|| invalid_period(s))?;
        if year_part.len() != 4 || month_part.len() != 2 {
            return Err(invalid_period(s));
        }
        let year: i32 = year_part.parse().map_err(|_| invalid_period(s))?;
        let month: u32 = month_part.parse().map_err(|_| invalid_period(s))?;
        Period::new(year, month).map_err(|_| invalid_period(s))
    }
}

fn invalid_period(s: &str) -> Error {
    Error::Validation(ValidationError::InvalidPeriod(s.to_string()))
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Domain model for the planned amount of one category in one period.
///
/// At most one budget row exists per (category, period) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub category_id: String,
    pub period: Period,
    pub planned: Decimal,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBudget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub category_id: String,
    pub period: Period,
    pub planned: Decimal,
    pub notes: Option<String>,
}

impl NewBudget {
    /// Validates the new budget data.
    pub fn validate(&self) -> Result<()> {
        if self.category_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "categoryId".to_string(),
            )));
        }
        validate_planned(self.planned)?;
        Ok(())
    }
}

/// Input model for updating an existing budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetUpdate {
    pub id: Option<String>,
    pub category_id: String,
    pub period: Period,
    pub planned: Decimal,
    pub notes: Option<String>,
}

impl BudgetUpdate {
    /// Validates the budget update data.
    pub fn validate(&self) -> Result<()> {
        if self.id.is_none() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Budget ID is required for updates".to_string(),
            )));
        }
        if self.category_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "categoryId".to_string(),
            )));
        }
        validate_planned(self.planned)?;
        Ok(())
    }
}

/// One aggregated row of the budget summary report.
///
/// `variance` is always `actual - planned`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub category_id: String,
    /// Category display name.
    pub category: String,
    pub period: Period,
    pub planned: Decimal,
    pub actual: Decimal,
    pub variance: Decimal,
}

fn validate_planned(planned: Decimal) -> Result<()> {
    if planned <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Planned amount must be positive".to_string(),
        )));
    }
    Ok(())
}
