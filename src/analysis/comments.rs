use crate::database::column::Column;
use crate::database::column::ColumnType;
use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::criteria::Thresholds;
use crate::spreadsheet::sheet::cell;
use crate::spreadsheet::sheet::Row;
use serde::Deserialize;
use serde::Serialize;

/// Name shown when the sheet has no employee name column.
pub const UNKNOWN_RESPONDENT: &str = "Unknown";

/// Visual class of a badge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeClass {
    /// Rating at or below the low cut-off
    Low,
    /// Rating above the low cut-off but still badged
    Mid,
    /// "No" answer
    No,
}

/// Flag marking a comment that comes from a low rating or a "No" answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// "2/5" or "No"
    pub text: String,
    pub class: BadgeClass,
}

/// A respondent's reason and action text for one question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub respondent_name: String,
    pub reason: String,
    pub action: String,
    pub badge: Option<Badge>,
}

/// Collects the comments of a question column.
///
/// One comment per data row whose linked reason or action cell has text, in
/// row order. `name_index` is the column index of the employee name column.
pub fn collect_comments(
    column: &Column,
    rows: &[Row],
    name_index: Option<usize>,
    thresholds: &Thresholds,
) -> Vec<Comment> {
    rows.iter()
        .filter_map(|row| {
            let reason = linked_text(row, column.reason_index);
            let action = linked_text(row, column.action_index);
            if reason.is_empty() && action.is_empty() {
                return None;
            }
            let respondent_name = match name_index {
                Some(index) => cell(row, index).to_trimmed(),
                None => UNKNOWN_RESPONDENT.to_owned(),
            };
            Some(Comment {
                respondent_name,
                reason,
                action,
                badge: badge(column.kind, row, column.index, thresholds),
            })
        })
        .collect()
}

fn linked_text(row: &[CellValue], index: Option<usize>) -> String {
    index.map(|index| cell(row, index).to_trimmed()).unwrap_or_default()
}

fn badge(kind: ColumnType, row: &[CellValue], index: usize, thresholds: &Thresholds) -> Option<Badge> {
    let value = cell(row, index);
    match kind {
        ColumnType::Rating => {
            let rating = value.to_number().filter(|rating| *rating <= thresholds.badge_rating)?;
            Some(Badge {
                text: format!("{}/5", rating),
                class: if rating <= thresholds.badge_rating_low {
                    BadgeClass::Low
                } else {
                    BadgeClass::Mid
                },
            })
        }
        ColumnType::YesNo if value.to_trimmed().eq_ignore_ascii_case("no") => Some(Badge {
            text: "No".to_owned(),
            class: BadgeClass::No,
        }),
        _ => None,
    }
}
