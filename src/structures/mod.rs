//! Data-structure detection.
//!
//! A single left-to-right pass tries the profile's rule table at each code
//! token. The first rule that matches claims its token window and scanning
//! resumes after it, so one construct is never charged to two categories.
//! Variable bindings are collected separately and always reported.

pub mod bindings;
pub mod rules;
pub mod summary;

pub use summary::summarize;

use crate::core::syntax::Syntax;
use crate::core::types::{StructureMatch, StructureSummary};

/// Every structure match in source order, variables last.
pub fn detect(syntax: &Syntax<'_>) -> Vec<StructureMatch> {
    let _span = tracing::debug_span!("detect_structures", language = syntax.profile.name).entered();
    let rules = syntax.profile.structure_rules;
    let mut matches = Vec::new();
    let mut cursor = 0;

    while cursor < syntax.len() {
        let claimed = rules
            .iter()
            .find_map(|rule| rule.apply(syntax, cursor).map(|end| (rule.category, end)));
        match claimed {
            Some((category, end)) => {
                matches.push(StructureMatch {
                    category,
                    line: syntax.code[cursor].line,
                });
                cursor = end.max(cursor + 1);
            }
            None => cursor += 1,
        }
    }

    let pattern_matches = matches.len();
    matches.extend(bindings::variable_matches(syntax));
    log::debug!(
        "Detected {} structure matches and {} variable bindings",
        pattern_matches,
        matches.len() - pattern_matches
    );
    matches
}

/// [`detect`] followed by [`summarize`].
pub fn detect_structures(syntax: &Syntax<'_>) -> Vec<StructureSummary> {
    summarize(&detect(syntax))
}
