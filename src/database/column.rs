use crate::spreadsheet::cell::CellValue;
use serde::Deserialize;
use serde::Serialize;

/// Lowest valid rating value.
pub const RATING_MIN: f64 = 1.0;
/// Highest valid rating value.
pub const RATING_MAX: f64 = 5.0;

/// Semantic role of a survey column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Start day or date the form was filled in
    Date,
    /// Employee name
    Name,
    /// Client name
    Client,
    /// Job coach name
    Coach,
    /// Numeric answer on a 1-5 scale
    Rating,
    /// Yes/No answer
    YesNo,
    /// Anything else
    Text,
}

/// A classified column of a survey sheet.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Position in the header row
    pub index: usize,
    /// Cleaned header text
    pub header: String,
    /// Semantic type, fixed at classification
    #[serde(rename = "type")]
    pub kind: ColumnType,
    /// Non-empty values of this column in row order
    pub values: Vec<CellValue>,
    /// Column index of the linked "If the answer..." column
    pub reason_index: Option<usize>,
    /// Column index of the linked "Actions taken..." column
    pub action_index: Option<usize>,
}

impl ColumnType {
    /// Returns true for question columns that carry statistics and annotations.
    #[inline]
    pub fn is_question(&self) -> bool {
        matches!(self, ColumnType::Rating | ColumnType::YesNo)
    }

    /// Returns true for the column types shown in the response table.
    #[inline]
    pub fn is_presentable(&self) -> bool {
        matches!(
            self,
            ColumnType::Name | ColumnType::Client | ColumnType::Coach | ColumnType::Rating | ColumnType::YesNo
        )
    }
}

/// Returns the value as a rating when it is a number within the 1-5 scale.
pub fn rating_value(value: &CellValue) -> Option<f64> {
    value
        .to_number()
        .filter(|number| (RATING_MIN..=RATING_MAX).contains(number))
}

/// Returns `Some(true)` for "yes", `Some(false)` for "no", `None` otherwise.
pub fn yes_no_value(value: &CellValue) -> Option<bool> {
    if value.matches_word("yes") {
        Some(true)
    } else if value.matches_word("no") {
        Some(false)
    } else {
        None
    }
}

impl Column {
    /// Valid ratings of this column in row order.
    pub fn ratings(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().filter_map(rating_value)
    }

    /// Yes/No answers of this column in row order.
    pub fn answers(&self) -> impl Iterator<Item = bool> + '_ {
        self.values.iter().filter_map(yes_no_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_and_presentable_types() {
        assert!(ColumnType::Rating.is_question());
        assert!(ColumnType::YesNo.is_question());
        assert!(!ColumnType::Name.is_question());
        assert!(ColumnType::Coach.is_presentable());
        assert!(!ColumnType::Date.is_presentable());
        assert!(!ColumnType::Text.is_presentable());
    }

    #[test]
    fn rating_bounds() {
        assert_eq!(rating_value(&CellValue::from(1.0)), Some(1.0));
        assert_eq!(rating_value(&CellValue::from("5")), Some(5.0));
        assert_eq!(rating_value(&CellValue::from(0.0)), None);
        assert_eq!(rating_value(&CellValue::from(6.0)), None);
        assert_eq!(rating_value(&CellValue::from("n/a")), None);
    }

    #[test]
    fn yes_no_answers() {
        assert_eq!(yes_no_value(&CellValue::from("Yes")), Some(true));
        assert_eq!(yes_no_value(&CellValue::from(" no ")), Some(false));
        assert_eq!(yes_no_value(&CellValue::from("maybe")), None);
    }

    #[test]
    fn serialize_type_name() {
        let column = Column {
            index: 3,
            header: "Clear instructions".to_owned(),
            kind: ColumnType::YesNo,
            values: vec![CellValue::from("Yes")],
            reason_index: Some(4),
            action_index: None,
        };
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(json["type"], "yesno");
        assert_eq!(json["reason_index"], 4);
        assert!(json["action_index"].is_null());
    }
}
