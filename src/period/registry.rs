use crate::analysis::stats::StatsSnapshot;
use crate::period::PeriodKey;
use crate::period::PeriodStore;
use crate::period::Periods;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// A loaded workbook in multi-file mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkbookEntry {
    /// Week number parsed from the file name or supplied by the user
    pub week_number: u32,
    /// Source file name
    pub file_name: String,
    /// Sheet names in workbook order
    pub sheet_names: Vec<String>,
    /// Snapshots of the sheets that were processed successfully
    pub periods: PeriodStore,
}

impl WorkbookEntry {
    pub fn new(week_number: u32, file_name: &str, sheet_names: Vec<String>) -> Self {
        Self {
            week_number,
            file_name: file_name.to_owned(),
            sheet_names,
            periods: PeriodStore::for_week(week_number),
        }
    }
}

/// Loaded workbooks keyed by week number.
///
/// Mutated only by [`WorkbookRegistry::register`] and
/// [`WorkbookRegistry::remove`]; a workbook's periods live and die with it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkbookRegistry {
    entries: BTreeMap<u32, WorkbookEntry>,
}

impl WorkbookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a workbook, replacing any workbook registered for the same week.
    /// Returns the replaced entry.
    pub fn register(&mut self, entry: WorkbookEntry) -> Option<WorkbookEntry> {
        let week = entry.week_number;
        let replaced = self.entries.insert(week, entry);
        match &replaced {
            Some(previous) => log::info!("week {} replaced, '{}' unregistered", week, previous.file_name),
            None => log::info!("week {} registered", week),
        }
        replaced
    }

    /// Removes the workbook of `week` together with all of its periods.
    pub fn remove(&mut self, week: u32) -> Option<WorkbookEntry> {
        let removed = self.entries.remove(&week);
        if let Some(entry) = &removed {
            log::info!("week {} removed with {} periods", week, entry.periods.len());
        }
        removed
    }

    pub fn get(&self, week: u32) -> Option<&WorkbookEntry> {
        self.entries.get(&week)
    }

    pub fn get_mut(&mut self, week: u32) -> Option<&mut WorkbookEntry> {
        self.entries.get_mut(&week)
    }

    /// Week numbers in ascending order.
    pub fn weeks(&self) -> Vec<u32> {
        self.entries.keys().copied().collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = &WorkbookEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Periods for WorkbookRegistry {
    /// Periods of all workbooks, ordered by week and then within each week.
    fn chronological(&self) -> Vec<&PeriodKey> {
        self.entries
            .values()
            .flat_map(|entry| entry.periods.chronological())
            .collect()
    }

    fn snapshot(&self, key: &PeriodKey) -> Option<&StatsSnapshot> {
        self.entries
            .get(&key.week?)
            .and_then(|entry| entry.periods.snapshot(key))
    }
}

/// Which workbook and sheet the host is currently displaying.
///
/// The library never reads this implicitly; callers turn it into a
/// [`PeriodKey`] and pass that explicitly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub week: Option<u32>,
    pub sheet: Option<String>,
}

impl Selection {
    /// The period key of the current selection, if a sheet is selected.
    pub fn current(&self) -> Option<PeriodKey> {
        self.sheet.as_ref().map(|sheet| PeriodKey {
            week: self.week,
            sheet: sheet.to_owned(),
        })
    }

    /// Selects a week, clearing the sheet if it does not exist there.
    pub fn select_week(&mut self, registry: &WorkbookRegistry, week: u32) {
        self.week = Some(week);
        let known = registry
            .get(week)
            .zip(self.sheet.as_ref())
            .map(|(entry, sheet)| entry.sheet_names.contains(sheet))
            .unwrap_or(false);
        if !known {
            self.sheet = None;
        }
    }

    /// Falls back to the latest remaining week when the selected one is gone.
    pub fn retain(&mut self, registry: &WorkbookRegistry) {
        if let Some(week) = self.week {
            if registry.get(week).is_none() {
                self.sheet = None;
                self.week = registry.weeks().last().copied();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(week: u32, file_name: &str, sheets: &[&str]) -> WorkbookEntry {
        let mut entry = WorkbookEntry::new(week, file_name, sheets.iter().map(|it| it.to_string()).collect());
        for sheet in sheets {
            entry.periods.register(sheet, StatsSnapshot::default());
        }
        entry
    }

    #[test]
    fn registry_orders_weeks_then_sheets() {
        let mut registry = WorkbookRegistry::new();
        registry.register(entry(2, "week2.xlsx", &["Day 2", "Day 1"]));
        registry.register(entry(1, "week1.xlsx", &["Summary", "Day 1"]));

        let order: Vec<String> = registry.chronological().iter().map(|key| key.to_string()).collect();
        assert_eq!(
            order,
            vec!["Week 1 / Day 1", "Week 1 / Summary", "Week 2 / Day 1", "Week 2 / Day 2"]
        );
        assert_eq!(registry.weeks(), vec![1, 2]);
    }

    #[test]
    fn registry_replace_and_remove() {
        let mut registry = WorkbookRegistry::new();
        assert!(registry.register(entry(1, "a.xlsx", &["Day 1"])).is_none());
        let replaced = registry.register(entry(1, "b.xlsx", &["Day 1", "Day 2"])).unwrap();
        assert_eq!(replaced.file_name, "a.xlsx");
        assert_eq!(registry.len(), 1);

        assert!(registry.snapshot(&PeriodKey::in_week(1, "Day 2")).is_some());
        assert!(registry.snapshot(&PeriodKey::sheet("Day 2")).is_none());

        let removed = registry.remove(1).unwrap();
        assert_eq!(removed.periods.len(), 2);
        assert!(registry.is_empty());
        assert!(registry.chronological().is_empty());
        assert!(registry.remove(1).is_none());
    }

    #[test]
    fn selection_follows_registry() {
        let mut registry = WorkbookRegistry::new();
        registry.register(entry(1, "week1.xlsx", &["Day 1"]));
        registry.register(entry(3, "week3.xlsx", &["Day 1", "Day 2"]));

        let mut selection = Selection::default();
        assert_eq!(selection.current(), None);

        selection.select_week(&registry, 3);
        selection.sheet = Some("Day 2".to_owned());
        assert_eq!(selection.current(), Some(PeriodKey::in_week(3, "Day 2")));

        selection.select_week(&registry, 1);
        assert_eq!(selection.sheet, None);

        registry.remove(1);
        selection.retain(&registry);
        assert_eq!(selection.week, Some(3));
    }
}
