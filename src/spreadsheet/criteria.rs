use crate::error::SurveySheetError;
use glob::Pattern;
use serde::Deserialize;
use serde::Serialize;

/// Criteria for selecting which sheets of a workbook are processed.
#[derive(Clone, Debug, Default)]
pub struct Criteria {
    /// Sheet name patterns for filtering which sheets to process.
    pub sheet_name_patterns: Option<Vec<Pattern>>,

    /// Maximum number of sheets to process.
    pub sheet_limit: Option<usize>,
}

impl Criteria {
    /// Builds criteria from glob pattern strings such as `"Week *"`.
    pub fn with_patterns(patterns: &[&str]) -> Result<Self, SurveySheetError> {
        let patterns = patterns
            .iter()
            .map(|pattern| Pattern::new(pattern))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Criteria {
            sheet_name_patterns: Some(patterns),
            sheet_limit: None,
        })
    }

    /// Checks if a sheet name matches the criteria patterns.
    /// Returns true if no patterns are specified or if name matches any pattern.
    pub fn accept(&self, sheet_name: &str) -> bool {
        if let Some(patterns) = &self.sheet_name_patterns {
            for pattern in patterns {
                if pattern.matches(sheet_name) {
                    return true;
                }
            }
            false
        } else {
            true
        }
    }

    /// Applies the pattern filter and the sheet limit, preserving workbook order.
    pub fn select<'a>(&self, sheet_names: &'a [String]) -> Vec<&'a str> {
        sheet_names
            .iter()
            .map(String::as_str)
            .filter(|name| self.accept(name))
            .take(self.sheet_limit.unwrap_or(usize::MAX))
            .collect()
    }
}

/// Tunable cut-offs used by classification, statistics, comments and trends.
///
/// `Default` reproduces the dashboard's built-in constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Share of values that must look like yes/no or 1-5 ratings (exclusive)
    pub shape_ratio: f64,
    /// Ratings at or below this value get a badge on their comments
    pub badge_rating: f64,
    /// Ratings at or below this value get the `low` badge instead of `mid`
    pub badge_rating_low: f64,
    /// Minimum absolute rating delta reported as a trend
    pub trend_rating_noise: f64,
    /// Minimum absolute percentage delta reported as a trend
    pub trend_percentage_noise: f64,
    /// Rating means below this value are flagged
    pub rating_good: f64,
    /// Rating means below this value are `danger`, otherwise `warning`
    pub rating_warning: f64,
    /// Yes percentages below this value are flagged
    pub percentage_good: f64,
    /// Yes percentages below this value are `danger`, otherwise `warning`
    pub percentage_warning: f64,
    /// Headers longer than this are truncated in table labels
    pub label_width: usize,
    /// Number of characters kept when a table label is truncated
    pub label_truncate: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            shape_ratio: 0.6,
            badge_rating: 3.0,
            badge_rating_low: 2.0,
            trend_rating_noise: 0.05,
            trend_percentage_noise: 1.0,
            rating_good: 4.0,
            rating_warning: 3.5,
            percentage_good: 80.0,
            percentage_warning: 60.0,
            label_width: 25,
            label_truncate: 22,
        }
    }
}
