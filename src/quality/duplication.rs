//! Repeated token sequences, fingerprinted with xxh64 over fixed windows.

use crate::core::types::{Token, TokenKind};
use std::collections::HashMap;
use xxhash_rust::xxh64::Xxh64;

/// Stand-in hashed for every literal so `x + 1` and `x + 2` collide.
const LITERAL_PLACEHOLDER: &[u8] = b"\0lit";
const SEPARATOR: &[u8] = &[0x1f];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Duplication {
    /// Code tokens covered by a window seen earlier
    pub duplicated_tokens: usize,
    pub total_tokens: usize,
    /// Line of the first repeated window
    pub first_line: Option<usize>,
}

impl Duplication {
    pub fn fraction(&self) -> f64 {
        if self.total_tokens == 0 {
            return 0.0;
        }
        self.duplicated_tokens as f64 / self.total_tokens as f64
    }
}

/// Marks tokens covered by a window whose fingerprint already occurred at
/// a non-overlapping earlier position.
pub fn detect_duplication(code: &[&Token], window: usize) -> Duplication {
    let total_tokens = code.len();
    if window == 0 || total_tokens < window * 2 {
        return Duplication {
            duplicated_tokens: 0,
            total_tokens,
            first_line: None,
        };
    }

    let mut first_seen: HashMap<u64, usize> = HashMap::new();
    let mut duplicated = vec![false; total_tokens];
    let mut first_line = None;

    for (start, tokens) in code.windows(window).enumerate() {
        let hash = fingerprint(tokens);
        match first_seen.get(&hash) {
            Some(&first) if start >= first + window => {
                duplicated[start..start + window].fill(true);
                first_line.get_or_insert(tokens[0].line);
            }
            Some(_) => {}
            None => {
                first_seen.insert(hash, start);
            }
        }
    }

    Duplication {
        duplicated_tokens: duplicated.iter().filter(|d| **d).count(),
        total_tokens,
        first_line,
    }
}

fn fingerprint(tokens: &[&Token]) -> u64 {
    let mut hasher = Xxh64::new(0);
    for token in tokens {
        match token.kind {
            TokenKind::Literal => hasher.update(LITERAL_PLACEHOLDER),
            _ => hasher.update(token.text.as_bytes()),
        }
        hasher.update(SEPARATOR);
    }
    hasher.digest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::ProfileRegistry;
    use crate::tokenizer::tokenize;

    fn code_tokens(source: &str) -> Vec<Token> {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get("javascript").unwrap();
        tokenize(source, profile)
            .tokens
            .into_iter()
            .filter(|t| !t.is_comment())
            .collect()
    }

    #[test]
    fn test_repeated_block_detected() {
        let tokens = code_tokens(
            "total = total + values[i] * 2;\ntotal = total + values[i] * 3;\n",
        );
        let refs: Vec<&Token> = tokens.iter().collect();
        let found = detect_duplication(&refs, 10);
        assert_eq!(found.total_tokens, 22);
        assert_eq!(found.duplicated_tokens, 11);
        assert_eq!(found.first_line, Some(2));
    }

    #[test]
    fn test_distinct_code_is_clean() {
        let tokens = code_tokens("let a = 1;\nlet b = a + 2;\nconsole.log(a, b);\n");
        let refs: Vec<&Token> = tokens.iter().collect();
        let found = detect_duplication(&refs, 4);
        assert_eq!(found.duplicated_tokens, 0);
        assert_eq!(found.fraction(), 0.0);
    }

    #[test]
    fn test_short_input_skipped() {
        let tokens = code_tokens("x = 1;");
        let refs: Vec<&Token> = tokens.iter().collect();
        assert_eq!(detect_duplication(&refs, 12).first_line, None);
    }
}
