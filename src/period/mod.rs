//! # Period Module
//!
//! Periods are processed sheets, optionally scoped under the week number of the
//! workbook they come from. Each period owns one [`StatsSnapshot`]; trends are
//! computed by walking periods in chronological order.
pub mod registry;

pub use registry::Selection;
pub use registry::WorkbookEntry;
pub use registry::WorkbookRegistry;

use crate::analysis::stats::StatsSnapshot;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::Display;
use std::sync::LazyLock;
use thiserror::Error;

/// Order value of periods whose name carries no day or week number.
pub const UNPARSED_PERIOD_ORDER: u32 = 9999;

static PERIOD_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:day|week|wk)\s*[-_ ]?\s*(\d+)").expect("Hardcode regex pattern")
});
static NUMERIC_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*$").expect("Hardcode regex pattern"));
static WEEK_FILE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)week[-_ ]?(\d+)").expect("Hardcode regex pattern"));

/// Errors related to period and workbook bookkeeping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PeriodError {
    /// No week number in the file name and none supplied by the user
    #[error("Cannot determine week number for '{file_name}'")]
    UnresolvedWeekNumber { file_name: String },
}

/// Identifies a period: a sheet name, optionally under a workbook week.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    /// Week number of the owning workbook in multi-file mode
    pub week: Option<u32>,
    /// Sheet name
    pub sheet: String,
}

impl PeriodKey {
    /// Key of a sheet in single-workbook mode.
    pub fn sheet(sheet: &str) -> Self {
        Self {
            week: None,
            sheet: sheet.to_owned(),
        }
    }

    /// Key of a sheet inside the workbook for `week`.
    pub fn in_week(week: u32, sheet: &str) -> Self {
        Self {
            week: Some(week),
            sheet: sheet.to_owned(),
        }
    }

    /// Chronological position of the sheet within its workbook.
    pub fn order(&self) -> u32 {
        period_order(&self.sheet)
    }

    /// Compares two keys chronologically: week first, then the sheet's day or
    /// week number. Keys without a number compare equal to each other.
    pub fn chronological_cmp(&self, other: &Self) -> Ordering {
        (self.week, self.order()).cmp(&(other.week, other.order()))
    }
}

impl Display for PeriodKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.week {
            Some(week) => write!(f, "Week {} / {}", week, self.sheet),
            None => write!(f, "{}", self.sheet),
        }
    }
}

/// Parses the day or week number out of a period name such as "Day 3",
/// "Week_12" or "4". Names without one get [`UNPARSED_PERIOD_ORDER`].
pub fn period_order(name: &str) -> u32 {
    PERIOD_TOKEN
        .captures(name)
        .or_else(|| NUMERIC_NAME.captures(name))
        .and_then(|captures| captures.get(1))
        .and_then(|matcher| matcher.as_str().parse::<u32>().ok())
        .unwrap_or(UNPARSED_PERIOD_ORDER)
}

/// Extracts the week number from an uploaded file name like "survey_week-07.xlsx".
pub fn week_number_from_file_name(file_name: &str) -> Option<u32> {
    WEEK_FILE_NAME
        .captures(file_name)
        .and_then(|captures| captures.get(1))
        .and_then(|matcher| matcher.as_str().parse::<u32>().ok())
}

/// Resolves a workbook's week number from its file name, falling back to a
/// number supplied by the user.
pub fn resolve_week_number(file_name: &str, fallback: Option<u32>) -> Result<u32, PeriodError> {
    week_number_from_file_name(file_name)
        .or(fallback)
        .ok_or_else(|| PeriodError::UnresolvedWeekNumber {
            file_name: file_name.to_owned(),
        })
}

/// Read access to a set of periods, used by trend lookups.
pub trait Periods {
    /// All known period keys in chronological order.
    fn chronological(&self) -> Vec<&PeriodKey>;

    /// Snapshot of one period.
    fn snapshot(&self, key: &PeriodKey) -> Option<&StatsSnapshot>;
}

/// Snapshots of the periods of one workbook, in registration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodStore {
    /// Week number of the owning workbook, if any
    week: Option<u32>,
    periods: Vec<(PeriodKey, StatsSnapshot)>,
}

impl PeriodStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose periods are scoped under `week`.
    pub fn for_week(week: u32) -> Self {
        Self {
            week: Some(week),
            periods: Vec::new(),
        }
    }

    pub fn week(&self) -> Option<u32> {
        self.week
    }

    /// Key this store uses for `sheet`.
    pub fn key(&self, sheet: &str) -> PeriodKey {
        PeriodKey {
            week: self.week,
            sheet: sheet.to_owned(),
        }
    }

    /// Registers the snapshot of a sheet, replacing any earlier one as a whole.
    pub fn register(&mut self, sheet: &str, snapshot: StatsSnapshot) -> PeriodKey {
        let key = self.key(sheet);
        match self.periods.iter().position(|(it, _)| *it == key) {
            Some(position) => {
                log::info!("period '{}' reprocessed, snapshot replaced", key);
                self.periods[position].1 = snapshot;
            }
            None => {
                log::info!("period '{}' registered with {} statistics", key, snapshot.len());
                self.periods.push((key.clone(), snapshot));
            }
        }
        key
    }

    pub fn get(&self, sheet: &str) -> Option<&StatsSnapshot> {
        self.snapshot(&self.key(sheet))
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &PeriodKey> {
        self.periods.iter().map(|(key, _)| key)
    }
}

impl Periods for PeriodStore {
    fn chronological(&self) -> Vec<&PeriodKey> {
        let mut keys: Vec<&PeriodKey> = self.keys().collect();
        keys.sort_by(|a, b| a.chronological_cmp(b));
        keys
    }

    fn snapshot(&self, key: &PeriodKey) -> Option<&StatsSnapshot> {
        self.periods
            .iter()
            .find(|(it, _)| it == key)
            .map(|(_, snapshot)| snapshot)
    }
}
