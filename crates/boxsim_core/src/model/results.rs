use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Netto balances per simulated year across all sampled windows.
///
/// `balances_for_year(y)[i]` is the outcome of window `i` after `y` years, so
/// samples at the same position are comparable across systems.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    years: BTreeMap<usize, Vec<f64>>,
}

impl SimulationResult {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one window's year-by-year netto balances (year 1 first).
    pub fn push_trajectory(&mut self, trajectory: &[f64]) {
        for (i, balance) in trajectory.iter().enumerate() {
            self.years.entry(i + 1).or_default().push(*balance);
        }
    }

    #[must_use]
    pub fn balances_for_year(&self, year: usize) -> Option<&[f64]> {
        self.years.get(&year).map(Vec::as_slice)
    }

    /// Simulated years in ascending order
    pub fn years(&self) -> impl Iterator<Item = usize> + '_ {
        self.years.keys().copied()
    }

    #[must_use]
    pub fn max_year(&self) -> Option<usize> {
        self.years.keys().next_back().copied()
    }

    /// Number of windows that reached year 1
    #[must_use]
    pub fn num_samples(&self) -> usize {
        self.years.get(&1).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Results for several labelled systems, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSet {
    entries: Vec<(String, SimulationResult)>,
}

impl ComparisonSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the result stored under `label`
    pub fn insert(&mut self, label: impl Into<String>, result: SimulationResult) {
        let label = label.into();
        match self.entries.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = result,
            None => self.entries.push((label, result)),
        }
    }

    #[must_use]
    pub fn get(&self, label: &str) -> Option<&SimulationResult> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, r)| r)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SimulationResult)> {
        self.entries.iter().map(|(l, r)| (l.as_str(), r))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_trajectory_keys_by_year() {
        let mut result = SimulationResult::new();
        result.push_trajectory(&[1.0, 2.0, 3.0]);
        result.push_trajectory(&[10.0, 20.0, 30.0]);

        assert_eq!(result.balances_for_year(1), Some(&[1.0, 10.0][..]));
        assert_eq!(result.balances_for_year(3), Some(&[3.0, 30.0][..]));
        assert_eq!(result.balances_for_year(4), None);
        assert_eq!(result.years().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(result.max_year(), Some(3));
        assert_eq!(result.num_samples(), 2);
    }

    #[test]
    fn test_comparison_set_keeps_insertion_order() {
        let mut set = ComparisonSet::new();
        set.insert("Market", SimulationResult::new());
        set.insert("Box 3 2026", SimulationResult::new());
        set.insert("Market", SimulationResult::new());

        assert_eq!(set.labels().collect::<Vec<_>>(), vec!["Market", "Box 3 2026"]);
        assert_eq!(set.len(), 2);
        assert!(set.get("Box 2").is_none());
    }
}
