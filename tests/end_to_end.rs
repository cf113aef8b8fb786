use pretty_assertions::assert_eq;
use survey_sheet::analysis::BadgeClass;
use survey_sheet::analysis::ColumnSummary;
use survey_sheet::analysis::Direction;
use survey_sheet::analysis::Statistic;
use survey_sheet::analysis::StatisticKind;
use survey_sheet::database::ColumnType;
use survey_sheet::extension::question_trends;
use survey_sheet::period::Selection;
use survey_sheet::spreadsheet::CellValue;
use survey_sheet::*;

fn text(value: &str) -> CellValue {
    CellValue::from(value)
}

fn rating_sheet(header: &str, ratings: &[f64]) -> RawSheet {
    let mut rows = vec![vec![text("Employee Name"), text(header)]];
    for (index, rating) in ratings.iter().enumerate() {
        rows.push(vec![text(&format!("Person {}", index)), CellValue::from(*rating)]);
    }
    RawSheet::new(rows)
}

#[test]
fn coach_rating_with_comments() {
    let raw = RawSheet::new(vec![
        vec![
            text("Employee Name"),
            text("How does the coach rate?"),
            text("If the answer is No, explain"),
            text("Actions taken"),
        ],
        vec![CellValue::Empty, text("1 - very poor … 5 - excellent")],
        vec![text("Alice"), CellValue::from(2.0), text("slow onboarding"), text("extra training")],
        vec![text("Bob"), CellValue::from(5.0), text(""), text("")],
    ]);
    let thresholds = Thresholds::default();
    let table = analyze_sheet("Day 1", &raw, &thresholds).unwrap();

    assert_eq!(table.respondents(), 2);
    let ratings: Vec<_> = table.columns_of(ColumnType::Rating).collect();
    assert_eq!(ratings.len(), 1);
    let rating = ratings[0];
    assert_eq!(rating.header, "How does the coach rate?");
    assert_eq!(rating.reason_index, Some(2));
    assert_eq!(rating.action_index, Some(3));

    let summaries = table.summaries();
    match &summaries[0].1 {
        ColumnSummary::Rating(summary) => {
            assert_eq!(summary.mean, 3.5);
            assert_eq!(summary.distribution, [0, 1, 0, 0, 1]);
        }
        other => panic!("unexpected summary {:?}", other),
    }
    assert_eq!(
        table.snapshot.get("How does the coach rate?"),
        Some(&Statistic::Rating { mean: 3.5 })
    );

    let comments = table.comments(rating, &thresholds);
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].respondent_name, "Alice");
    let badge = comments[0].badge.as_ref().unwrap();
    assert_eq!(badge.text, "2/5");
    assert_eq!(badge.class, BadgeClass::Low);
}

#[test]
fn week_over_week_trend() {
    let thresholds = Thresholds::default();
    let workbook = Workbook::new("survey.xlsx")
        .with_sheet("Week 2", rating_sheet("Onboarding clarity", &[4.0, 4.0]))
        .with_sheet("Week 1", rating_sheet("Onboarding clarity", &[3.0, 2.0, 4.0]));
    let mut periods = PeriodStore::new();
    let analysis = analyze_workbook(&workbook, &mut periods, &Criteria::default(), &thresholds);
    assert!(analysis.failures.is_empty());

    let current = PeriodKey::sheet("Week 2");
    let trend = find_trend(&periods, "Onboarding clarity", &current, StatisticKind::Rating, &thresholds).unwrap();
    assert_eq!(trend.previous_period.to_string(), "Week 1");
    assert_eq!(trend.diff, "+1.0");
    assert_eq!(trend.direction, Direction::Up);

    let first = PeriodKey::sheet("Week 1");
    assert!(find_trend(&periods, "Onboarding clarity", &first, StatisticKind::Rating, &thresholds).is_none());
}

#[test]
fn trends_across_workbooks() {
    let thresholds = Thresholds::default();
    let parameters = AnalyzeSheetsParameters::default();
    let mut registry = WorkbookRegistry::new();
    let mut selection = Selection::default();

    let week_2 = Workbook::new("week_2.xlsx").with_sheet("Day 1", rating_sheet("Support", &[3.0, 3.0]));
    let week_1 = Workbook::new("Week 1.xlsx").with_sheet("Day 1", rating_sheet("Support", &[4.0, 5.0]));
    let analysis = analyze_sheets(&mut registry, &week_2, &parameters).unwrap();
    analyze_sheets(&mut registry, &week_1, &parameters).unwrap();
    assert_eq!(registry.weeks(), vec![1, 2]);

    selection.select_week(&registry, 2);
    selection.sheet = Some("Day 1".to_owned());
    let current = selection.current().unwrap();
    assert_eq!(current, PeriodKey::in_week(2, "Day 1"));

    let table = &analysis.sheet("Day 1").unwrap().table;
    let trends = question_trends(table, &registry, &current, &thresholds);
    assert_eq!(trends.len(), 1);
    let (index, trend) = &trends[0];
    assert_eq!(*index, 1);
    assert_eq!(trend.previous_period.to_string(), "Week 1 / Day 1");
    assert_eq!(trend.diff, "-1.5");
    assert_eq!(trend.direction, Direction::Down);

    // removing a week drops its periods from trend lookups
    registry.remove(1);
    assert!(question_trends(table, &registry, &current, &thresholds).is_empty());

    registry.remove(2);
    selection.retain(&registry);
    assert_eq!(selection, Selection::default());
}
