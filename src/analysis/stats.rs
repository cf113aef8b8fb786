//! Per-column summaries and the per-period statistics snapshot.
use crate::database::column::Column;
use crate::database::column::ColumnType;
use crate::spreadsheet::criteria::Thresholds;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Kind of statistic a question column produces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticKind {
    Rating,
    YesNo,
}

/// Summary statistic of one question, as stored in a snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Statistic {
    /// Arithmetic mean of the valid 1-5 ratings
    Rating { mean: f64 },
    /// Share of "yes" among yes/no answers, 0-100
    YesNo { yes_percentage: f64 },
}

impl Statistic {
    pub fn kind(&self) -> StatisticKind {
        match self {
            Statistic::Rating { .. } => StatisticKind::Rating,
            Statistic::YesNo { .. } => StatisticKind::YesNo,
        }
    }

    /// The mean for ratings, the percentage for yes/no.
    pub fn value(&self) -> f64 {
        match self {
            Statistic::Rating { mean } => *mean,
            Statistic::YesNo { yes_percentage } => *yes_percentage,
        }
    }
}

/// Traffic-light status of a summary value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Warning,
    Danger,
}

impl Status {
    pub fn for_rating(mean: f64, thresholds: &Thresholds) -> Self {
        if mean >= thresholds.rating_good {
            Status::Good
        } else if mean >= thresholds.rating_warning {
            Status::Warning
        } else {
            Status::Danger
        }
    }

    pub fn for_percentage(percentage: f64, thresholds: &Thresholds) -> Self {
        if percentage >= thresholds.percentage_good {
            Status::Good
        } else if percentage >= thresholds.percentage_warning {
            Status::Warning
        } else {
            Status::Danger
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Good => "good",
            Status::Warning => "warning",
            Status::Danger => "danger",
        }
    }
}

/// Rating column summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Mean of the valid ratings
    pub mean: f64,
    /// Respondents per whole rating, index 0 holds the 1s
    pub distribution: [usize; 5],
    /// Number of valid ratings
    pub count: usize,
}

/// Yes/No column summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YesNoSummary {
    pub yes: usize,
    pub no: usize,
}

impl YesNoSummary {
    pub fn total(&self) -> usize {
        self.yes + self.no
    }

    pub fn yes_percentage(&self) -> f64 {
        self.yes as f64 / self.total() as f64 * 100.0
    }
}

/// Summary of a single question column, keyed by column index by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColumnSummary {
    Rating(RatingSummary),
    YesNo(YesNoSummary),
}

impl ColumnSummary {
    pub fn statistic(&self) -> Statistic {
        match self {
            ColumnSummary::Rating(summary) => Statistic::Rating { mean: summary.mean },
            ColumnSummary::YesNo(summary) => Statistic::YesNo {
                yes_percentage: summary.yes_percentage(),
            },
        }
    }

    pub fn status(&self, thresholds: &Thresholds) -> Status {
        match self.statistic() {
            Statistic::Rating { mean } => Status::for_rating(mean, thresholds),
            Statistic::YesNo { yes_percentage } => Status::for_percentage(yes_percentage, thresholds),
        }
    }

    /// Flagged summaries need attention: mean below the good rating or
    /// yes share below the good percentage.
    pub fn is_flagged(&self, thresholds: &Thresholds) -> bool {
        match self.statistic() {
            Statistic::Rating { mean } => mean < thresholds.rating_good,
            Statistic::YesNo { yes_percentage } => yes_percentage < thresholds.percentage_good,
        }
    }
}

/// Summarizes a rating or yes/no column.
///
/// Returns `None` for other column types and for columns without a single
/// valid rating or yes/no answer.
pub fn summarize_column(column: &Column) -> Option<ColumnSummary> {
    match column.kind {
        ColumnType::Rating => {
            let mut distribution = [0usize; 5];
            let mut total = 0.0;
            let mut count = 0;
            for rating in column.ratings() {
                if rating.fract() == 0.0 {
                    distribution[rating as usize - 1] += 1;
                }
                total += rating;
                count += 1;
            }
            (count > 0).then(|| {
                ColumnSummary::Rating(RatingSummary {
                    mean: total / count as f64,
                    distribution,
                    count,
                })
            })
        }
        ColumnType::YesNo => {
            let (yes, no) = column
                .answers()
                .fold((0, 0), |(yes, no), answer| if answer { (yes + 1, no) } else { (yes, no + 1) });
            (yes + no > 0).then_some(ColumnSummary::YesNo(YesNoSummary { yes, no }))
        }
        _ => None,
    }
}

/// Statistics of one period keyed by cleaned question header.
///
/// Built once per processed sheet and replaced as a whole when the sheet is
/// processed again.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    stats: BTreeMap<String, Statistic>,
    /// Headers shared by more than one question; the later column won
    collisions: Vec<String>,
}

impl StatsSnapshot {
    /// Computes the snapshot of a period from its classified columns.
    ///
    /// Questions without valid values are omitted. When two questions clean to
    /// the same header the later one is kept and the header is reported in
    /// [`StatsSnapshot::collisions`].
    pub fn compute(columns: &[Column]) -> Self {
        let mut snapshot = StatsSnapshot::default();
        for column in columns {
            let Some(summary) = summarize_column(column) else {
                continue;
            };
            if snapshot.stats.insert(column.header.to_owned(), summary.statistic()).is_some() {
                log::warn!(
                    "duplicate question header '{}' at column {}, earlier statistic replaced",
                    column.header,
                    column.index
                );
                if !snapshot.collisions.contains(&column.header) {
                    snapshot.collisions.push(column.header.to_owned());
                }
            }
        }
        snapshot
    }

    pub fn get(&self, header: &str) -> Option<&Statistic> {
        self.stats.get(header)
    }

    /// Returns the statistic for `header` only if it has the requested kind.
    pub fn get_kind(&self, header: &str, kind: StatisticKind) -> Option<&Statistic> {
        self.get(header).filter(|statistic| statistic.kind() == kind)
    }

    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Statistic)> {
        self.stats.iter()
    }
}
