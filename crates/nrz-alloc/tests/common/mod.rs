#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use nrz_core::{AssignmentRecord, SubjectRecord};

/// Rat cohort with alternating sex, weights 240..258 and three per cage.
pub fn sample_subjects(n: usize) -> Vec<SubjectRecord> {
    (1..=n)
        .map(|i| {
            SubjectRecord::new(format!("RAT_{i:03}"))
                .with_sex(if i % 2 == 1 { "M" } else { "F" })
                .with_weight(240.0 + (i % 7) as f64 * 3.0)
                .with_cage(format!("C{}", (i - 1) / 3 + 1))
                .with_age(10.0 + (i % 4) as f64)
        })
        .collect()
}

/// Subjects with nothing but an identifier.
pub fn bare_subjects(n: usize) -> Vec<SubjectRecord> {
    (1..=n).map(|i| SubjectRecord::new(format!("S{i:02}"))).collect()
}

pub fn group_sizes(assignments: &[AssignmentRecord], groups: &[String]) -> Vec<usize> {
    groups
        .iter()
        .map(|group| assignments.iter().filter(|row| &row.group == group).count())
        .collect()
}

pub fn spread(sizes: &[usize]) -> usize {
    sizes.iter().max().unwrap() - sizes.iter().min().unwrap()
}

pub fn assert_bijection(subjects: &[SubjectRecord], assignments: &[AssignmentRecord]) {
    assert_eq!(subjects.len(), assignments.len());
    let input: BTreeSet<&str> = subjects.iter().map(|s| s.id.as_str()).collect();
    let output: BTreeSet<&str> = assignments.iter().map(|a| a.subject_id.as_str()).collect();
    assert_eq!(output.len(), assignments.len(), "duplicate subject in output");
    assert_eq!(input, output);
}

pub fn cage_counts(
    subjects: &[SubjectRecord],
    assignments: &[AssignmentRecord],
) -> BTreeMap<(String, String), usize> {
    let cages: BTreeMap<&str, &str> = subjects
        .iter()
        .map(|s| (s.id.as_str(), s.cage_label()))
        .collect();
    let mut counts = BTreeMap::new();
    for row in assignments {
        let cage = cages[row.subject_id.as_str()].to_string();
        *counts.entry((row.group.clone(), cage)).or_insert(0) += 1;
    }
    counts
}
