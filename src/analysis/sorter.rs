use crate::database::column::Column;
use crate::database::column::ColumnType;
use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::sheet::cell;
use crate::spreadsheet::sheet::Row;
use serde::Deserialize;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Sort selection of the response table.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    /// Column index of the sorted column, `None` for sheet order
    pub column: Option<usize>,
    pub direction: SortDirection,
}

impl SortState {
    /// Selecting the sorted column again flips the direction; selecting
    /// another column sorts it ascending.
    pub fn toggle(&mut self, column: usize) {
        if self.column == Some(column) {
            self.direction = self.direction.reversed();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }
}

/// Sort key of a cell under the column's type.
enum SortKey {
    Number(f64),
    Text(String),
}

fn sort_key(kind: ColumnType, value: &CellValue) -> SortKey {
    match kind {
        ColumnType::Rating => SortKey::Number(value.to_number().unwrap_or(0.0)),
        _ => SortKey::Text(value.to_trimmed().to_lowercase()),
    }
}

fn compare_keys(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
        (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
    }
}

/// Returns a copy of `rows` ordered by `column`.
///
/// Ratings compare numerically with missing or non-numeric cells as 0; other
/// types compare their trimmed display text case-insensitively. Rows with
/// equal keys keep their relative order in both directions.
pub fn sort_rows(rows: &[Row], column: &Column, direction: SortDirection) -> Vec<Row> {
    let mut keyed: Vec<(SortKey, &Row)> = rows
        .iter()
        .map(|row| (sort_key(column.kind, cell(row, column.index)), row))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        let ordering = compare_keys(a, b);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    keyed.into_iter().map(|(_, row)| row.clone()).collect()
}
