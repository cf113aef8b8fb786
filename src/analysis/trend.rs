use crate::analysis::stats::Statistic;
use crate::analysis::stats::StatisticKind;
use crate::period::PeriodKey;
use crate::period::Periods;
use crate::spreadsheet::criteria::Thresholds;
use serde::Deserialize;
use serde::Serialize;

/// Direction of a change between two periods.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Flat,
}

/// Change of one question's statistic relative to the closest earlier period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    /// Period the current value is compared with
    pub previous_period: PeriodKey,
    /// Signed delta, "+0.5" for ratings or "-3%" for yes percentages
    pub diff: String,
    /// Raw delta, current minus previous
    pub delta: f64,
    pub direction: Direction,
}

/// Finds the trend of a question for the `current` period.
///
/// Walks the periods backwards from `current` in chronological order and
/// compares with the first earlier period that has a statistic of the same
/// kind for `header`. Returns `None` when `current` is unknown, first in
/// order, has no such statistic itself, or no earlier period has one.
pub fn find_trend<P>(
    periods: &P,
    header: &str,
    current: &PeriodKey,
    kind: StatisticKind,
    thresholds: &Thresholds,
) -> Option<Trend>
where
    P: Periods + ?Sized,
{
    let current_value = periods.snapshot(current)?.get_kind(header, kind)?;
    let order = periods.chronological();
    let position = order.iter().position(|key| *key == current)?;
    order[..position]
        .iter()
        .rev()
        .find_map(|key| {
            periods
                .snapshot(key)
                .and_then(|snapshot| snapshot.get_kind(header, kind))
                .map(|previous| (*key, previous))
        })
        .map(|(key, previous)| compare(key, previous, current_value, thresholds))
}

fn compare(previous_period: &PeriodKey, previous: &Statistic, current: &Statistic, thresholds: &Thresholds) -> Trend {
    let delta = current.value() - previous.value();
    let (diff, noise) = match current {
        Statistic::Rating { .. } => (format!("{:+.1}", delta), thresholds.trend_rating_noise),
        Statistic::YesNo { .. } => (format!("{:+.0}%", delta), thresholds.trend_percentage_noise),
    };
    let direction = if delta > noise {
        Direction::Up
    } else if delta < -noise {
        Direction::Down
    } else {
        Direction::Flat
    };
    Trend {
        previous_period: previous_period.clone(),
        diff,
        delta,
        direction,
    }
}
