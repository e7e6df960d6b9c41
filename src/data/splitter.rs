// ============================================================
// Layer 4 - Stratified Train/Validation/Test Splitter
// ============================================================
// Splits each class independently, then merges the matching
// partitions back together:
//
//   dataset ──► partition by label (legitimate, phishing)
//                  │
//                  ▼
//   split_class    shuffle(seed) → shuffle(seed+1) → shuffle(seed+2)
//                  cut at floor(n*train) and floor(n*(train+val))
//                  │
//                  ▼
//   merge_splits   concat classes in label order → shuffle(seed)
//
// Every shuffle uses a fresh StdRng seeded for that pass, so
// a seed fully determines split membership and order.
// Each class keeps its own proportions, and since every row
// lands in exactly one slice the splits are disjoint.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::sample::Label;
use crate::domain::split::{SplitKind, SplitRatios};
use crate::domain::traits::Labelled;

/// Number of successive reorderings applied to each class
pub const CLASS_SHUFFLE_PASSES: u64 = 3;

/// Fisher-Yates shuffle with a fresh generator seeded by `seed`.
pub fn shuffle_seeded<T>(rows: &mut [T], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    rows.shuffle(&mut rng);
}

/// Split one class-homogeneous collection into (train, validation, test).
///
/// Sizes are `floor(n*train)`, `floor(n*(train+val)) - floor(n*train)`
/// and the remainder, so they always sum to `n`.
pub fn split_class<T>(mut rows: Vec<T>, ratios: &SplitRatios, seed: u64) -> (Vec<T>, Vec<T>, Vec<T>) {
    for pass in 0..CLASS_SHUFFLE_PASSES {
        shuffle_seeded(&mut rows, seed.wrapping_add(pass));
    }

    let (train_end, val_end) = ratios.cut_points(rows.len());

    // split_off leaves [0..at) in place and returns [at..)
    let test = rows.split_off(val_end);
    let val  = rows.split_off(train_end);

    (rows, val, test)
}

/// Concatenate same-kind partitions from every class, then shuffle
/// the result so labels are interleaved rather than grouped.
pub fn merge_splits<T>(parts: Vec<Vec<T>>, seed: u64) -> Vec<T> {
    let mut merged: Vec<T> = parts.into_iter().flatten().collect();
    shuffle_seeded(&mut merged, seed);
    merged
}

/// Group rows by label, keeping the original order within each class.
/// Classes come out in label order (legitimate before phishing).
pub fn partition_by_label<T: Labelled>(rows: Vec<T>) -> BTreeMap<Label, Vec<T>> {
    let mut groups: BTreeMap<Label, Vec<T>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.label()).or_default().push(row);
    }
    groups
}

/// Sizes of one class's three partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSplitSizes {
    pub label:      Label,
    pub total:      usize,
    pub train:      usize,
    pub validation: usize,
    pub test:       usize,
}

impl ClassSplitSizes {
    pub fn size(&self, kind: SplitKind) -> usize {
        match kind {
            SplitKind::Train      => self.train,
            SplitKind::Validation => self.validation,
            SplitKind::Test       => self.test,
        }
    }
}

/// Result of a stratified split: merged partitions plus the
/// per-class sizes they were built from.
#[derive(Debug, Clone)]
pub struct StratifiedSplit<T> {
    pub train:      Vec<T>,
    pub validation: Vec<T>,
    pub test:       Vec<T>,
    pub per_class:  Vec<ClassSplitSizes>,
}

impl<T> StratifiedSplit<T> {
    pub fn get(&self, kind: SplitKind) -> &[T] {
        match kind {
            SplitKind::Train      => &self.train,
            SplitKind::Validation => &self.validation,
            SplitKind::Test       => &self.test,
        }
    }

    pub fn total_len(&self) -> usize {
        self.train.len() + self.validation.len() + self.test.len()
    }
}

/// Split every class with `seed`, then merge each partition with `seed`.
pub fn stratified_split<T: Labelled>(rows: Vec<T>, ratios: &SplitRatios, seed: u64) -> StratifiedSplit<T> {
    let groups = partition_by_label(rows);

    let mut train_parts = Vec::with_capacity(groups.len());
    let mut val_parts   = Vec::with_capacity(groups.len());
    let mut test_parts  = Vec::with_capacity(groups.len());
    let mut per_class   = Vec::with_capacity(groups.len());

    for (label, class_rows) in groups {
        let total              = class_rows.len();
        let (train, val, test) = split_class(class_rows, ratios, seed);

        tracing::debug!(
            "Class {}: {} rows → {} train, {} validation, {} test",
            label,
            total,
            train.len(),
            val.len(),
            test.len(),
        );

        per_class.push(ClassSplitSizes {
            label,
            total,
            train:      train.len(),
            validation: val.len(),
            test:       test.len(),
        });
        train_parts.push(train);
        val_parts.push(val);
        test_parts.push(test);
    }

    StratifiedSplit {
        train:      merge_splits(train_parts, seed),
        validation: merge_splits(val_parts, seed),
        test:       merge_splits(test_parts, seed),
        per_class,
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::Sample;
    use std::collections::HashSet;

    fn balanced(n_per_class: usize) -> Vec<Sample> {
        (0..2 * n_per_class)
            .map(|i| {
                let label = if i < n_per_class { Label::Legitimate } else { Label::Phishing };
                Sample::new(i, i as f64, 0.0, label)
            })
            .collect()
    }

    #[test]
    fn test_class_split_sizes_sum_to_n() {
        let ratios = SplitRatios::default();
        for n in [0usize, 1, 2, 3, 7, 10, 99, 101, 5000] {
            let items: Vec<usize> = (0..n).collect();
            let (train, val, test) = split_class(items, &ratios, 42);
            assert_eq!(train.len() + val.len() + test.len(), n, "n = {n}");
        }
    }

    #[test]
    fn test_class_split_default_sizes() {
        let items: Vec<usize> = (0..5000).collect();
        let (train, val, test) = split_class(items, &SplitRatios::default(), 42);
        assert_eq!(train.len(), 3000);
        assert_eq!(val.len(),   1000);
        assert_eq!(test.len(),  1000);
    }

    #[test]
    fn test_class_split_uneven_truncates() {
        let items: Vec<usize> = (0..7).collect();
        let (train, val, test) = split_class(items, &SplitRatios::default(), 42);
        assert_eq!((train.len(), val.len(), test.len()), (4, 1, 2));
    }

    #[test]
    fn test_class_split_is_disjoint_and_complete() {
        let items: Vec<usize> = (0..257).collect();
        let (train, val, test) = split_class(items, &SplitRatios::default(), 3);

        let mut seen = HashSet::new();
        for x in train.iter().chain(&val).chain(&test) {
            assert!(seen.insert(*x), "duplicate item {x}");
        }
        assert_eq!(seen.len(), 257);
    }

    #[test]
    fn test_class_split_scrambles_order() {
        let items: Vec<usize> = (0..100).collect();
        let (train, _, _) = split_class(items, &SplitRatios::default(), 42);
        assert_ne!(train, (0..60).collect::<Vec<_>>());
    }

    #[test]
    fn test_three_passes_use_consecutive_seeds() {
        let items: Vec<usize> = (0..50).collect();

        let mut expected = items.clone();
        shuffle_seeded(&mut expected, 10);
        shuffle_seeded(&mut expected, 11);
        shuffle_seeded(&mut expected, 12);

        let ratios = SplitRatios::new(1.0, 0.0).unwrap();
        let (train, val, test) = split_class(items, &ratios, 10);
        assert_eq!(train, expected);
        assert!(val.is_empty());
        assert!(test.is_empty());
    }

    #[test]
    fn test_merge_keeps_every_row() {
        let merged = merge_splits(vec![vec![1, 2, 3], vec![10, 20]], 42);
        let mut sorted = merged.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 10, 20]);
    }

    #[test]
    fn test_merge_interleaves_labels() {
        let rows = balanced(500);
        let split = stratified_split(rows, &SplitRatios::default(), 42);
        // First half of the merged train split should not be a single class block
        let head: HashSet<Label> = split.train[..300].iter().map(|s| s.label).collect();
        assert_eq!(head.len(), 2);
    }

    #[test]
    fn test_partition_by_label_preserves_order() {
        let rows = vec![
            Sample::new(0, 0.0, 0.0, Label::Phishing),
            Sample::new(1, 0.0, 0.0, Label::Legitimate),
            Sample::new(2, 0.0, 0.0, Label::Phishing),
        ];
        let groups = partition_by_label(rows);
        let labels: Vec<Label> = groups.keys().copied().collect();
        assert_eq!(labels, vec![Label::Legitimate, Label::Phishing]);
        let phish_ids: Vec<usize> = groups[&Label::Phishing].iter().map(|s| s.id).collect();
        assert_eq!(phish_ids, vec![0, 2]);
    }

    #[test]
    fn test_stratified_default_sizes() {
        let split = stratified_split(balanced(5000), &SplitRatios::default(), 42);
        assert_eq!(split.train.len(),      6000);
        assert_eq!(split.validation.len(), 2000);
        assert_eq!(split.test.len(),       2000);
        assert_eq!(split.total_len(),      10_000);
    }

    #[test]
    fn test_stratified_each_split_is_balanced() {
        let split = stratified_split(balanced(5000), &SplitRatios::default(), 42);
        for kind in SplitKind::ALL {
            let rows  = split.get(kind);
            let phish = rows.iter().filter(|s| s.label == Label::Phishing).count();
            assert_eq!(phish * 2, rows.len(), "{kind} is not 50:50");
        }
    }

    #[test]
    fn test_stratified_per_class_sizes() {
        let split = stratified_split(balanced(5000), &SplitRatios::default(), 42);
        assert_eq!(split.per_class.len(), 2);
        for sizes in &split.per_class {
            assert_eq!(sizes.total, 5000);
            assert_eq!(sizes.size(SplitKind::Train), 3000);
            assert_eq!(sizes.size(SplitKind::Validation), 1000);
            assert_eq!(sizes.size(SplitKind::Test), 1000);
        }
    }

    #[test]
    fn test_stratified_is_deterministic() {
        let a = stratified_split(balanced(1000), &SplitRatios::default(), 42);
        let b = stratified_split(balanced(1000), &SplitRatios::default(), 42);
        for kind in SplitKind::ALL {
            let ids_a: Vec<usize> = a.get(kind).iter().map(|s| s.id).collect();
            let ids_b: Vec<usize> = b.get(kind).iter().map(|s| s.id).collect();
            assert_eq!(ids_a, ids_b);
        }
    }

    #[test]
    fn test_stratified_seed_changes_membership() {
        let a = stratified_split(balanced(1000), &SplitRatios::default(), 1);
        let b = stratified_split(balanced(1000), &SplitRatios::default(), 2);
        let ids_a: HashSet<usize> = a.train.iter().map(|s| s.id).collect();
        let ids_b: HashSet<usize> = b.train.iter().map(|s| s.id).collect();
        assert_ne!(ids_a, ids_b);
    }

    #[test]
    fn test_stratified_single_class_input() {
        let rows: Vec<Sample> = (0..10).map(|i| Sample::new(i, 0.0, 0.0, Label::Phishing)).collect();
        let split = stratified_split(rows, &SplitRatios::default(), 42);
        assert_eq!(split.per_class.len(), 1);
        assert_eq!(split.total_len(), 10);
    }
}
