//! Aggregation of raw matches into per-category summaries.

use crate::core::types::{StructureCategory, StructureMatch, StructureSummary};
use std::collections::{BTreeMap, BTreeSet};

/// Groups matches by category. Lines are deduplicated and ascending;
/// occurrences count every match. Summaries are ordered by occurrences
/// (descending), then first line, then category.
pub fn summarize(matches: &[StructureMatch]) -> Vec<StructureSummary> {
    let mut grouped: BTreeMap<StructureCategory, (usize, BTreeSet<usize>)> = BTreeMap::new();
    for found in matches {
        let entry = grouped.entry(found.category).or_default();
        entry.0 += 1;
        entry.1.insert(found.line);
    }

    let mut summaries: Vec<StructureSummary> = grouped
        .into_iter()
        .map(|(name, (occurrences, lines))| StructureSummary {
            name,
            occurrences,
            lines: lines.into_iter().collect(),
        })
        .collect();
    summaries.sort_by(|a, b| {
        b.occurrences
            .cmp(&a.occurrences)
            .then_with(|| a.lines.first().cmp(&b.lines.first()))
            .then_with(|| a.name.cmp(&b.name))
    });
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(category: StructureCategory, line: usize) -> StructureMatch {
        StructureMatch { category, line }
    }

    #[test]
    fn test_same_line_counts_twice_but_lists_once() {
        let matches = vec![
            at(StructureCategory::Array, 7),
            at(StructureCategory::Array, 7),
            at(StructureCategory::Array, 3),
        ];
        let summaries = summarize(&matches);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].occurrences, 3);
        assert_eq!(summaries[0].lines, vec![3, 7]);
    }

    #[test]
    fn test_ordering() {
        let matches = vec![
            at(StructureCategory::Variable, 2),
            at(StructureCategory::Stack, 5),
            at(StructureCategory::Variable, 3),
            at(StructureCategory::Queue, 1),
        ];
        let names: Vec<StructureCategory> = summarize(&matches).into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                StructureCategory::Variable,
                StructureCategory::Queue,
                StructureCategory::Stack
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert!(summarize(&[]).is_empty());
    }
}
