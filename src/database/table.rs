use crate::analysis::comments::collect_comments;
use crate::analysis::comments::Comment;
use crate::analysis::kpi::Kpis;
use crate::analysis::sorter::sort_rows;
use crate::analysis::sorter::SortState;
use crate::analysis::stats::summarize_column;
use crate::analysis::stats::ColumnSummary;
use crate::analysis::stats::StatsSnapshot;
use crate::database::classifier::classify_columns;
use crate::database::column::Column;
use crate::database::column::ColumnType;
use crate::spreadsheet::criteria::Thresholds;
use crate::spreadsheet::sheet::cell;
use crate::spreadsheet::sheet::Row;
use crate::spreadsheet::sheet::Sheet;

/// A fully processed survey sheet.
///
/// Built in one step from a normalized [`Sheet`]: its columns and snapshot
/// always describe the same rows.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    /// Sheet name
    pub name: String,
    /// Classified columns in header order
    pub columns: Vec<Column>,
    /// Data rows in sheet order
    pub rows: Vec<Row>,
    /// Statistics keyed by cleaned header
    pub snapshot: StatsSnapshot,
}

impl Table {
    pub fn new(sheet: Sheet, thresholds: &Thresholds) -> Self {
        let columns = classify_columns(&sheet.header, &sheet.rows, thresholds);
        let snapshot = StatsSnapshot::compute(&columns);
        Table {
            name: sheet.name,
            columns,
            rows: sheet.rows,
            snapshot,
        }
    }

    /// Number of responses.
    pub fn respondents(&self) -> usize {
        self.rows.len()
    }

    /// Columns of the given type in header order.
    pub fn columns_of(&self, kind: ColumnType) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(move |column| column.kind == kind)
    }

    /// Column index of the first employee name column.
    pub fn name_index(&self) -> Option<usize> {
        self.columns_of(ColumnType::Name).next().map(|column| column.index)
    }

    /// Finds a column by its position in the header row.
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.iter().find(|column| column.index == index)
    }

    /// Summaries of the question columns, paired with their column.
    pub fn summaries(&self) -> Vec<(&Column, ColumnSummary)> {
        self.columns
            .iter()
            .filter_map(|column| summarize_column(column).map(|summary| (column, summary)))
            .collect()
    }

    /// Comments attached to a question column.
    pub fn comments(&self, column: &Column, thresholds: &Thresholds) -> Vec<Comment> {
        collect_comments(column, &self.rows, self.name_index(), thresholds)
    }

    pub fn kpis(&self, thresholds: &Thresholds) -> Kpis {
        Kpis::compute(&self.columns, thresholds)
    }

    /// Columns shown in the response table.
    pub fn presentable_columns(&self) -> Vec<&Column> {
        self.columns.iter().filter(|column| column.kind.is_presentable()).collect()
    }

    /// Rows ordered by the sort state; sheet order when nothing is sorted or
    /// the sorted column is not presentable.
    pub fn sorted_rows(&self, state: &SortState) -> Vec<Row> {
        match state
            .column
            .and_then(|index| self.column(index))
            .filter(|column| column.kind.is_presentable())
        {
            Some(column) => sort_rows(&self.rows, column, state.direction),
            None => self.rows.clone(),
        }
    }

    /// Rows whose presentable cells contain `query`, ignoring case.
    pub fn filter_rows<'a>(&self, rows: &'a [Row], query: &str) -> Vec<&'a Row> {
        let query = query.to_lowercase();
        let columns = self.presentable_columns();
        rows.iter()
            .filter(|row| {
                columns
                    .iter()
                    .any(|column| cell(row, column.index).to_string().to_lowercase().contains(&query))
            })
            .collect()
    }
}

/// Table header label of a column.
pub fn display_label(column: &Column, thresholds: &Thresholds) -> String {
    match column.kind {
        ColumnType::Name => "Employee".to_owned(),
        ColumnType::Client => "Client".to_owned(),
        ColumnType::Coach => "Job Coach".to_owned(),
        _ if column.header.chars().count() > thresholds.label_width => {
            let truncated: String = column.header.chars().take(thresholds.label_truncate).collect();
            format!("{}…", truncated)
        }
        _ => column.header.to_owned(),
    }
}
