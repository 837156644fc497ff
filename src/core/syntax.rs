//! Token view shared by the detector, estimator, scorer and suggestion stage.

use super::lines::LineIndex;
use super::outline::Outline;
use super::types::Token;
use crate::languages::LanguageProfile;

/// Tokens a generic argument list may span before the `<` is treated as a
/// comparison.
const MAX_GENERIC_SPAN: usize = 48;

/// Code tokens (comments removed) with bracket pairing and the block outline.
///
/// All indices handed out by this type and by [`Outline`] refer to
/// positions in [`Syntax::code`].
#[derive(Debug)]
pub struct Syntax<'a> {
    pub profile: &'a LanguageProfile,
    /// Full token stream including comments
    pub tokens: &'a [Token],
    pub code: Vec<&'a Token>,
    pub lines: &'a LineIndex,
    pub outline: Outline,
    pairs: Vec<Option<usize>>,
}

impl<'a> Syntax<'a> {
    pub fn new(tokens: &'a [Token], lines: &'a LineIndex, profile: &'a LanguageProfile) -> Self {
        let code: Vec<&Token> = tokens.iter().filter(|t| !t.is_comment()).collect();
        let pairs = pair_brackets(&code);
        let outline = Outline::build(&code, &pairs, lines, profile);
        Self {
            profile,
            tokens,
            code,
            lines,
            outline,
            pairs,
        }
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a Token> {
        self.code.get(index).copied()
    }

    /// Whether the token at `index` exists and has structural text `text`.
    pub fn is_at(&self, index: usize, text: &str) -> bool {
        self.get(index).is_some_and(|t| t.is(text))
    }

    /// Token before `index`, if any.
    pub fn prev(&self, index: usize) -> Option<&'a Token> {
        index.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Partner of the bracket at `index` (`(` `[` `{` and their closers).
    pub fn partner(&self, index: usize) -> Option<usize> {
        self.pairs.get(index).copied().flatten()
    }

    /// Closing index of the group opened at `index`. Handles generic
    /// argument lists opened by `<`, where `>>` closes two levels.
    pub fn closing(&self, index: usize) -> Option<usize> {
        let token = self.get(index)?;
        if token.is("<") {
            return self.closing_angle(index);
        }
        if token.is_any(&["(", "[", "{"]) {
            return self.partner(index);
        }
        None
    }

    fn closing_angle(&self, index: usize) -> Option<usize> {
        let mut depth: i32 = 1;
        let end = (index + MAX_GENERIC_SPAN).min(self.len());
        for k in index + 1..end {
            let token = self.code[k];
            match token.text.as_str() {
                _ if !token.is(&token.text) => {}
                "<" => depth += 1,
                ">" => depth -= 1,
                ">>" => depth -= 2,
                ">>>" => depth -= 3,
                ";" | "{" | "}" | "&&" | "||" | "=" => return None,
                _ => {}
            }
            if depth <= 0 {
                return Some(k);
            }
        }
        None
    }

    /// Whether `needle` appears as a structural token in `range`.
    pub fn contains_text(&self, range: std::ops::Range<usize>, needle: &str) -> bool {
        self.slice(range).iter().any(|t| t.is(needle))
    }

    pub fn slice(&self, range: std::ops::Range<usize>) -> &[&'a Token] {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        &self.code[start..end]
    }

    /// True when the token at `index` is the first code token on its line.
    pub fn starts_line(&self, index: usize) -> bool {
        match (self.prev(index), self.get(index)) {
            (Some(prev), Some(token)) => prev.end_line() < token.line,
            (None, Some(_)) => true,
            _ => false,
        }
    }
}

/// Pairs `(` `[` `{` with their closers. A closer with no opener of its kind
/// on the stack is left unpaired; openers skipped over by a mismatched
/// closer stay unpaired too.
fn pair_brackets(code: &[&Token]) -> Vec<Option<usize>> {
    let mut pairs = vec![None; code.len()];
    let mut stack: Vec<(usize, &str)> = Vec::new();

    for (index, token) in code.iter().enumerate() {
        let closer_for = match token.text.as_str() {
            "(" | "[" | "{" if token.is(&token.text) => {
                stack.push((index, token.text.as_str()));
                continue;
            }
            ")" => "(",
            "]" => "[",
            "}" => "{",
            _ => continue,
        };
        if !token.is(&token.text) {
            continue;
        }
        if let Some(depth) = stack.iter().rposition(|(_, open)| *open == closer_for) {
            let (open_index, _) = stack[depth];
            stack.truncate(depth);
            pairs[open_index] = Some(index);
            pairs[index] = Some(open_index);
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::ProfileRegistry;
    use crate::tokenizer::tokenize;

    fn with_syntax(source: &str, language: &str, check: impl FnOnce(&Syntax<'_>)) {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get(language).unwrap();
        let stream = tokenize(source, profile);
        let lines = LineIndex::new(source);
        let syntax = Syntax::new(&stream.tokens, &lines, profile);
        check(&syntax);
    }

    #[test]
    fn test_bracket_pairs() {
        with_syntax("f(a[1], {b: 2})", "javascript", |syntax| {
            assert_eq!(syntax.partner(1), Some(12));
            assert_eq!(syntax.partner(12), Some(1));
            assert_eq!(syntax.partner(3), Some(5));
            assert_eq!(syntax.partner(7), Some(11));
        });
    }

    #[test]
    fn test_comments_are_excluded_from_code() {
        with_syntax("x = 1 # note\ny = 2", "python", |syntax| {
            assert_eq!(syntax.len(), 6);
            assert_eq!(syntax.tokens.len(), 7);
            assert!(syntax.starts_line(3));
            assert!(!syntax.starts_line(4));
        });
    }

    #[test]
    fn test_nested_generic_closing() {
        with_syntax("vector<vector<int>> grid;", "cpp", |syntax| {
            assert_eq!(syntax.closing(1), Some(5));
            assert_eq!(syntax.closing(3), Some(5));
        });
    }

    #[test]
    fn test_comparison_is_not_a_generic() {
        with_syntax("if (a < b && c > d) {}", "java", |syntax| {
            assert_eq!(syntax.closing(3), None);
        });
    }

    #[test]
    fn test_unbalanced_closer_is_ignored() {
        with_syntax("a ) ( b", "javascript", |syntax| {
            assert_eq!(syntax.partner(1), None);
            assert_eq!(syntax.partner(2), None);
        });
    }
}
