use chrono::NaiveDate;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;

/// A single decoded cell value as handed over by the spreadsheet reader.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    /// Missing cell, or a blank normalized by the reader
    #[default]
    Empty,
    /// Text values
    String(String),
    /// Numeric values
    Number(f64),
    /// Date/time values already decoded by the reader
    Date(NaiveDateTime),
}

/// Shared empty value returned for cells past the end of a short row.
pub(crate) static EMPTY: CellValue = CellValue::Empty;

impl CellValue {
    /// Returns true for `Empty` and for the empty string.
    /// Whitespace-only strings are values, not blanks.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(value) => value.is_empty(),
            _ => false,
        }
    }

    /// Returns the text when this is a string cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Converts the cell to a finite number.
    /// Strings are trimmed first; blank strings and dates do not count as numbers.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) if value.is_finite() => Some(*value),
            CellValue::String(value) => {
                let value = value.trim();
                if value.is_empty() {
                    None
                } else {
                    value.parse::<f64>().ok().filter(|number| number.is_finite())
                }
            }
            _ => None,
        }
    }

    /// Returns the trimmed display text of the cell.
    pub fn to_trimmed(&self) -> String {
        self.to_string().trim().to_owned()
    }

    /// Checks whether the trimmed text equals `word`, ignoring ASCII case.
    pub fn matches_word(&self, word: &str) -> bool {
        match self {
            CellValue::String(value) => value.trim().eq_ignore_ascii_case(word),
            _ => false,
        }
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::String(value) => write!(f, "{}", value),
            CellValue::Number(value) => write!(f, "{}", value),
            CellValue::Date(value) => write!(f, "{}", value.format("%-m/%-d/%Y")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::Date(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(value: NaiveDate) -> Self {
        CellValue::Date(value.and_time(chrono::NaiveTime::MIN))
    }
}
