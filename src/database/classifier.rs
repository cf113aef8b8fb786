//! Column classification for survey sheets.
//!
//! Headers are scanned left to right once. Annotation headers ("If the answer
//! ...", "Actions taken ...") are not columns of their own; they are linked to
//! the closest question column on their left. Every other header with at least
//! one value becomes a [`Column`] whose type comes from [`TYPE_RULES`].
use crate::database::column::rating_value;
use crate::database::column::yes_no_value;
use crate::database::column::Column;
use crate::database::column::ColumnType;
use crate::spreadsheet::cell::CellValue;
use crate::spreadsheet::criteria::Thresholds;
use crate::spreadsheet::sheet::cell;
use crate::spreadsheet::sheet::Row;
use regex::Regex;
use std::sync::LazyLock;

static REASON_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^If the answer").expect("Hardcode regex pattern"));
static ACTION_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Actions taken").expect("Hardcode regex pattern"));
static SHARE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Share this").expect("Hardcode regex pattern"));

static DATE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)start\s*day|date\s*of\s*form").expect("Hardcode regex pattern"));
static NAME_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)name.*employee|employee.*name").expect("Hardcode regex pattern"));
static CLIENT_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)name.*client|client.*name").expect("Hardcode regex pattern"));
static COACH_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)job\s*coach").expect("Hardcode regex pattern"));
static RATING_HINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)1\s*-\s*very\s*poor|how does.*rate|evaluation|impression|1\s*-.*5\s*-")
        .expect("Hardcode regex pattern")
});

static LEGEND_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\s*\n?\s*1\s*-\s*very\s*poor.*$").expect("Hardcode regex pattern"));
static DUPLICATE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\d+$").expect("Hardcode regex pattern"));

/// One entry of the classification table.
pub struct TypeRule {
    /// Type assigned when the rule matches
    pub kind: ColumnType,
    /// Predicate over the trimmed header and the column's non-empty values
    pub matches: fn(&str, &[CellValue], &Thresholds) -> bool,
}

/// Classification policy, evaluated in order; the first match wins.
///
/// Header metadata comes before value shape, and yes/no before rating.
pub const TYPE_RULES: &[TypeRule] = &[
    TypeRule { kind: ColumnType::Date, matches: is_date_header },
    TypeRule { kind: ColumnType::Name, matches: is_name_header },
    TypeRule { kind: ColumnType::Client, matches: is_client_header },
    TypeRule { kind: ColumnType::Coach, matches: is_coach_header },
    TypeRule { kind: ColumnType::YesNo, matches: is_mostly_yes_no },
    TypeRule { kind: ColumnType::Rating, matches: is_mostly_ratings },
    TypeRule { kind: ColumnType::Rating, matches: is_rating_hint },
];

fn is_date_header(header: &str, _: &[CellValue], _: &Thresholds) -> bool {
    DATE_HEADER.is_match(header)
}

fn is_name_header(header: &str, _: &[CellValue], _: &Thresholds) -> bool {
    NAME_HEADER.is_match(header)
}

fn is_client_header(header: &str, _: &[CellValue], _: &Thresholds) -> bool {
    CLIENT_HEADER.is_match(header)
}

fn is_coach_header(header: &str, _: &[CellValue], _: &Thresholds) -> bool {
    COACH_HEADER.is_match(header)
}

fn is_mostly_yes_no(_: &str, values: &[CellValue], thresholds: &Thresholds) -> bool {
    let count = values.iter().filter_map(yes_no_value).count();
    count as f64 > values.len() as f64 * thresholds.shape_ratio
}

fn is_mostly_ratings(_: &str, values: &[CellValue], thresholds: &Thresholds) -> bool {
    let count = values.iter().filter_map(rating_value).count();
    count as f64 > values.len() as f64 * thresholds.shape_ratio
}

fn is_rating_hint(header: &str, _: &[CellValue], _: &Thresholds) -> bool {
    RATING_HINT.is_match(header)
}

/// Detects the semantic type of a column from its header and values.
pub fn detect_type(header: &str, values: &[CellValue], thresholds: &Thresholds) -> ColumnType {
    TYPE_RULES
        .iter()
        .find(|rule| (rule.matches)(header, values, thresholds))
        .map(|rule| rule.kind)
        .unwrap_or(ColumnType::Text)
}

/// Strips the scale legend and the ".N" duplicate suffix from a header.
///
/// Repeats until nothing changes, so the result is stable under reapplication.
pub fn clean_header(header: &str) -> String {
    let mut current = header.trim().to_owned();
    loop {
        let stripped = LEGEND_SUFFIX.replace(&current, "");
        let stripped = DUPLICATE_SUFFIX.replace(&stripped, "");
        let stripped = stripped.trim();
        if stripped == current {
            return current;
        }
        current = stripped.to_owned();
    }
}

/// Role of a header cell during the scan.
#[derive(Copy, Clone, Debug, PartialEq)]
enum HeaderRole {
    Reason,
    Action,
    Noise,
    Question,
}

fn header_role(header: &str) -> HeaderRole {
    if REASON_HEADER.is_match(header) {
        HeaderRole::Reason
    } else if ACTION_HEADER.is_match(header) {
        HeaderRole::Action
    } else if SHARE_HEADER.is_match(header) {
        HeaderRole::Noise
    } else {
        HeaderRole::Question
    }
}

/// Annotation columns collected for one classified column.
#[derive(Copy, Clone, Debug, Default)]
struct Annotations {
    reason: Option<usize>,
    action: Option<usize>,
}

/// State of the left-to-right header scan.
#[derive(Default)]
struct ColumnScan {
    /// Classified columns without their links yet
    drafts: Vec<(usize, String, ColumnType, Vec<CellValue>)>,
    /// Links, one slot per draft
    annotations: Vec<Annotations>,
    /// Slot of the last rating/yes-no draft
    last_question: Option<usize>,
}

impl ColumnScan {
    fn step(&mut self, index: usize, header: &str, rows: &[Row], thresholds: &Thresholds) {
        match header_role(header) {
            HeaderRole::Reason => self.annotate(index, header, |links| &mut links.reason),
            HeaderRole::Action => self.annotate(index, header, |links| &mut links.action),
            HeaderRole::Noise => log::debug!("column {} '{}' ignored", index, header),
            HeaderRole::Question => {
                let values: Vec<CellValue> = rows
                    .iter()
                    .map(|row| cell(row, index))
                    .filter(|value| !value.is_empty())
                    .cloned()
                    .collect();
                if values.is_empty() {
                    log::debug!("column {} '{}' has no values", index, header);
                    return;
                }
                let kind = detect_type(header, &values, thresholds);
                self.drafts.push((index, clean_header(header), kind, values));
                self.annotations.push(Annotations::default());
                if kind.is_question() {
                    self.last_question = Some(self.drafts.len() - 1);
                }
            }
        }
    }

    /// Links an annotation column to the last question column.
    /// A later annotation of the same kind replaces an earlier one.
    fn annotate<F>(&mut self, index: usize, header: &str, slot: F)
    where
        F: FnOnce(&mut Annotations) -> &mut Option<usize>,
    {
        let Some(question) = self.last_question else {
            log::debug!("column {} '{}' precedes any question, dropped", index, header);
            return;
        };
        if let Some(previous) = slot(&mut self.annotations[question]).replace(index) {
            log::debug!("column {} '{}' replaces annotation column {}", index, header, previous);
        }
    }

    fn finish(self) -> Vec<Column> {
        self.drafts
            .into_iter()
            .zip(self.annotations)
            .map(|((index, header, kind, values), links)| Column {
                index,
                header,
                kind,
                values,
                reason_index: links.reason,
                action_index: links.action,
            })
            .collect()
    }
}

/// Classifies the columns of a sheet from its header row and data rows.
///
/// Non-string or blank headers, "Share this" headers, annotation headers and
/// columns without any value are not emitted.
pub fn classify_columns(header: &[CellValue], rows: &[Row], thresholds: &Thresholds) -> Vec<Column> {
    let mut scan = ColumnScan::default();
    for (index, value) in header.iter().enumerate() {
        let Some(text) = value.as_str().map(str::trim).filter(|text| !text.is_empty()) else {
            continue;
        };
        scan.step(index, text, rows, thresholds);
    }
    scan.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn text(value: &str) -> CellValue {
        CellValue::from(value)
    }

    fn number(value: f64) -> CellValue {
        CellValue::from(value)
    }

    fn detect(header: &str, values: Vec<CellValue>) -> ColumnType {
        detect_type(header, &values, &Thresholds::default())
    }

    #[test]
    fn detect_metadata_headers() {
        assert_eq!(detect("Start Day", vec![number(3.0)]), ColumnType::Date);
        assert_eq!(detect("Date of form", vec![text("x")]), ColumnType::Date);
        assert_eq!(detect("Name of the employee", vec![text("Alice")]), ColumnType::Name);
        assert_eq!(detect("Employee Name", vec![text("Alice")]), ColumnType::Name);
        assert_eq!(detect("Client name", vec![text("Acme")]), ColumnType::Client);
        assert_eq!(detect("Job Coach", vec![text("Yes")]), ColumnType::Coach);
    }

    #[test]
    fn detect_value_shapes() {
        assert_eq!(detect("Clear tasks?", vec![text("Yes"), text("no"), text("YES")]), ColumnType::YesNo);
        assert_eq!(detect("Overall", vec![number(4.0), text("5"), number(2.0)]), ColumnType::Rating);
        assert_eq!(detect("Remarks", vec![text("fine"), text("ok")]), ColumnType::Text);
    }

    #[test]
    fn detect_ratio_is_exclusive() {
        // 3 of 5 is exactly 60%, not above it
        let values = vec![number(1.0), number(2.0), number(3.0), text("a"), text("b")];
        assert_eq!(detect("Remarks", values), ColumnType::Text);
        let values = vec![text("yes"), text("no"), text("yes"), text("a"), text("b")];
        assert_eq!(detect("Remarks", values), ColumnType::Text);
    }

    #[test]
    fn detect_yes_no_before_rating() {
        let values = vec![text("yes"), text("no"), text("yes"), text("no"), number(3.0)];
        assert_eq!(detect("How does the coach rate?", values), ColumnType::YesNo);
    }

    #[test]
    fn detect_rating_hints() {
        assert_eq!(detect("Overall impression", vec![text("good")]), ColumnType::Rating);
        assert_eq!(detect("Self evaluation", vec![text("good")]), ColumnType::Rating);
        assert_eq!(detect("How does the team rate the onboarding?", vec![text("ok")]), ColumnType::Rating);
        assert_eq!(detect("Score (1 - bad, 5 - great)", vec![text("ok")]), ColumnType::Rating);
    }

    #[test]
    fn clean_header_strips_legend() {
        assert_eq!(clean_header("Onboarding clarity\n1 - Very Poor, 5 - Excellent"), "Onboarding clarity");
        assert_eq!(clean_header("Onboarding clarity 1-very poor ... 5-excellent"), "Onboarding clarity");
        assert_eq!(clean_header("  Support  "), "Support");
    }

    #[test]
    fn clean_header_strips_duplicate_suffix() {
        assert_eq!(clean_header("Support.1"), "Support");
        assert_eq!(clean_header("Support.1.2"), "Support");
        assert_eq!(clean_header("Support .3 "), "Support");
        assert_eq!(clean_header("Version 2.0 rollout"), "Version 2.0 rollout");
    }

    proptest! {
        #[test]
        fn prop_clean_header_idempotent(header in "[ a-zA-Z0-9.\\n-]{0,40}") {
            let once = clean_header(&header);
            prop_assert_eq!(clean_header(&once), once);
        }

        #[test]
        fn prop_clean_header_idempotent_with_legend(prefix in "[a-zA-Z .0-9]{0,20}", suffix in "[a-z .0-9]{0,10}") {
            let header = format!("{}\n1 - very poor{}", prefix, suffix);
            let once = clean_header(&header);
            prop_assert_eq!(clean_header(&once), once);
        }
    }

    #[test]
    fn classify_links_annotations() {
        let header = vec![
            text("Employee Name"),
            text("How does the coach rate?"),
            text("If the answer is No, explain"),
            text("Actions taken"),
        ];
        let rows = vec![
            vec![text("Alice"), number(2.0), text("slow onboarding"), text("extra training")],
            vec![text("Bob"), number(5.0), text(""), text("")],
        ];
        let columns = classify_columns(&header, &rows, &Thresholds::default());

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].kind, ColumnType::Name);
        assert_eq!(columns[0].reason_index, None);
        assert_eq!(columns[1].kind, ColumnType::Rating);
        assert_eq!(columns[1].header, "How does the coach rate?");
        assert_eq!(columns[1].reason_index, Some(2));
        assert_eq!(columns[1].action_index, Some(3));
        assert_eq!(columns[1].values, vec![number(2.0), number(5.0)]);
    }

    #[test]
    fn classify_links_across_text_columns() {
        let header = vec![text("Clear tasks?"), text("Remarks"), text("If the answer is no, why?")];
        let rows = vec![vec![text("Yes"), text("all good"), text("")], vec![text("No"), text("meh"), text("unclear")]];
        let columns = classify_columns(&header, &rows, &Thresholds::default());

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].kind, ColumnType::YesNo);
        assert_eq!(columns[0].reason_index, Some(2));
        assert_eq!(columns[1].kind, ColumnType::Text);
        assert_eq!(columns[1].reason_index, None);
    }

    #[test]
    fn classify_keeps_last_annotation() {
        let header = vec![
            text("Overall"),
            text("If the answer is 1-2, why?"),
            text("If the answer is 3, why?"),
            text("Actions taken"),
        ];
        let rows = vec![vec![number(3.0), text(""), text("meh"), text("none")]];
        let columns = classify_columns(&header, &rows, &Thresholds::default());

        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].reason_index, Some(2));
        assert_eq!(columns[0].action_index, Some(3));
    }

    #[test]
    fn classify_drops_leading_annotation() {
        let header = vec![text("Actions taken"), text("Employee Name"), text("Overall")];
        let rows = vec![vec![text("called"), text("Alice"), number(4.0)]];
        let columns = classify_columns(&header, &rows, &Thresholds::default());

        assert_eq!(columns.len(), 2);
        assert!(columns.iter().all(|column| column.action_index.is_none()));
    }

    #[test]
    fn classify_skips_noise_and_empty_columns() {
        let header = vec![
            text("Employee Name"),
            text("Share this with your manager"),
            text("Unused"),
            number(7.0),
            text("   "),
            CellValue::Empty,
            text("Overall"),
        ];
        let rows = vec![vec![
            text("Alice"),
            text("Yes"),
            text(""),
            text("x"),
            text("y"),
            text("z"),
            number(4.0),
        ]];
        let columns = classify_columns(&header, &rows, &Thresholds::default());

        let indexes: Vec<usize> = columns.iter().map(|column| column.index).collect();
        assert_eq!(indexes, vec![0, 6]);
    }

    #[test]
    fn classify_short_rows() {
        let header = vec![text("Employee Name"), text("Overall")];
        let rows = vec![vec![text("Alice")], vec![text("Bob"), number(3.0)]];
        let columns = classify_columns(&header, &rows, &Thresholds::default());

        assert_eq!(columns[1].values, vec![number(3.0)]);
    }
}
