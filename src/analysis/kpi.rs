use crate::analysis::stats::summarize_column;
use crate::analysis::stats::ColumnSummary;
use crate::database::column::Column;
use crate::database::column::ColumnType;
use crate::spreadsheet::criteria::Thresholds;
use serde::Deserialize;
use serde::Serialize;

/// Headline figures of one period.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Kpis {
    /// Mean over every valid rating of every rating column
    pub overall_average: Option<f64>,
    /// Share of "yes" over every yes/no answer of every yes/no column
    pub yes_percentage: Option<f64>,
    /// Number of flagged question columns
    pub attention_areas: usize,
    /// Highest rating column mean
    pub best_score: Option<f64>,
    /// Lowest rating column mean
    pub lowest_score: Option<f64>,
}

impl Kpis {
    pub fn compute(columns: &[Column], thresholds: &Thresholds) -> Self {
        let summaries: Vec<ColumnSummary> = columns.iter().filter_map(summarize_column).collect();

        let (rating_total, rating_count) = columns
            .iter()
            .filter(|column| column.kind == ColumnType::Rating)
            .flat_map(|column| column.ratings())
            .fold((0.0, 0usize), |(total, count), rating| (total + rating, count + 1));
        let (yes, answers) = summaries
            .iter()
            .filter_map(|summary| match summary {
                ColumnSummary::YesNo(counts) => Some((counts.yes, counts.total())),
                _ => None,
            })
            .fold((0, 0), |(yes, total), (column_yes, column_total)| (yes + column_yes, total + column_total));
        let means: Vec<f64> = summaries
            .iter()
            .filter_map(|summary| match summary {
                ColumnSummary::Rating(rating) => Some(rating.mean),
                _ => None,
            })
            .collect();

        Kpis {
            overall_average: (rating_count > 0).then(|| rating_total / rating_count as f64),
            yes_percentage: (answers > 0).then(|| yes as f64 / answers as f64 * 100.0),
            attention_areas: summaries.iter().filter(|summary| summary.is_flagged(thresholds)).count(),
            best_score: means.iter().copied().reduce(f64::max),
            lowest_score: means.iter().copied().reduce(f64::min),
        }
    }

    /// True when no question column needs attention.
    pub fn all_clear(&self) -> bool {
        self.attention_areas == 0
    }
}
