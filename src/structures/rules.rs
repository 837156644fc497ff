//! Declarative token patterns used by the structure detector and the space
//! estimator. Tables of these live in each language profile.

use crate::core::naming::name_words;
use crate::core::syntax::Syntax;
use crate::core::types::{StructureCategory, TokenKind};
use crate::languages::DeclarationStyle;
use std::ops::RangeInclusive;

/// Tokens scanned backwards from a field name looking for its type.
const FIELD_TYPE_LOOKBACK: usize = 6;

/// Words in a dynamic-language class name that make a self-linking field
/// meaningful (`this.next` inside `class Node`).
const NODE_CLASS_WORDS: &[&str] = &["node", "tree", "list", "graph", "vertex", "trie"];

/// One element of a token pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Exact structural text
    Text(&'static str),
    OneOf(&'static [&'static str]),
    Ident,
    /// Identifier or primitive type keyword
    TypeName,
    /// Identifier containing one of these words (or their plural)
    NameWord(&'static [&'static str]),
    /// Balanced group opened by `(`, `[`, `{` or `<`
    Group(&'static str),
    /// Balanced group whose tokens include the given text
    GroupContaining(&'static str, &'static str),
}

/// Extra condition checked after the steps matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// The class introduced by the match declares a field with one of these
    /// names whose type is the class itself.
    LinkedFields(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureRule {
    pub category: StructureCategory,
    pub steps: &'static [Step],
    pub guard: Option<Guard>,
}

impl StructureRule {
    pub const fn new(category: StructureCategory, steps: &'static [Step]) -> Self {
        Self {
            category,
            steps,
            guard: None,
        }
    }

    pub const fn guarded(category: StructureCategory, steps: &'static [Step], guard: Guard) -> Self {
        Self {
            category,
            steps,
            guard: Some(guard),
        }
    }

    /// End of the matched window (exclusive) when the rule applies at `start`.
    pub fn apply(&self, syntax: &Syntax<'_>, start: usize) -> Option<usize> {
        let found = match_steps(syntax, self.steps, start)?;
        match self.guard {
            Some(Guard::LinkedFields(fields)) if !has_linked_field(syntax, start, fields) => None,
            _ => Some(found.end),
        }
    }
}

/// When an allocation depends on the input size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sizing {
    /// Always proportional to the input (copies, comprehensions)
    Always,
    /// Only when the last group mentions an identifier (`new Array(n)`)
    IdentInGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationRule {
    pub steps: &'static [Step],
    pub sizing: Sizing,
    /// Dimensions allocated by the shape itself (`new int[n][m]` is 2)
    pub dimensions: u8,
}

impl AllocationRule {
    pub const fn new(steps: &'static [Step], sizing: Sizing) -> Self {
        Self {
            steps,
            sizing,
            dimensions: 1,
        }
    }

    pub const fn grid(steps: &'static [Step], sizing: Sizing) -> Self {
        Self {
            steps,
            sizing,
            dimensions: 2,
        }
    }

    /// Group of a size-dependent allocation starting at `start`; `None` when
    /// the rule does not match or the allocation is fixed-size.
    pub fn sized_at(&self, syntax: &Syntax<'_>, start: usize) -> Option<PatternMatch> {
        let found = match_steps(syntax, self.steps, start)?;
        let sized = match self.sizing {
            Sizing::Always => true,
            Sizing::IdentInGroup => found.last_group.clone().is_some_and(|group| {
                syntax
                    .slice(*group.start() + 1..*group.end())
                    .iter()
                    .any(|t| t.kind == TokenKind::Identifier)
            }),
        };
        sized.then_some(found)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Exclusive end of the window
    pub end: usize,
    /// Opener and closer of the last group step
    pub last_group: Option<RangeInclusive<usize>>,
}

pub fn match_steps(syntax: &Syntax<'_>, steps: &[Step], start: usize) -> Option<PatternMatch> {
    let mut cursor = start;
    let mut last_group = None;

    for step in steps {
        let token = syntax.get(cursor)?;
        match *step {
            Step::Text(text) => {
                if !token.is(text) {
                    return None;
                }
                cursor += 1;
            }
            Step::OneOf(texts) => {
                if !token.is_any(texts) {
                    return None;
                }
                cursor += 1;
            }
            Step::Ident => {
                if !token.is_ident() {
                    return None;
                }
                cursor += 1;
            }
            Step::TypeName => {
                let keyword_type =
                    token.kind == TokenKind::Keyword && syntax.profile.is_type_keyword(&token.text);
                if !token.is_ident() && !keyword_type {
                    return None;
                }
                cursor += 1;
            }
            Step::NameWord(words) => {
                if !token.is_ident() || !has_name_word(&token.text, words) {
                    return None;
                }
                cursor += 1;
            }
            Step::Group(open) | Step::GroupContaining(open, _) => {
                if !token.is(open) {
                    return None;
                }
                let close = syntax.closing(cursor)?;
                if let Step::GroupContaining(_, needle) = *step {
                    if !syntax.contains_text(cursor + 1..close, needle) {
                        return None;
                    }
                }
                last_group = Some(cursor..=close);
                cursor = close + 1;
            }
        }
    }

    Some(PatternMatch {
        end: cursor,
        last_group,
    })
}

fn has_name_word(name: &str, words: &[&str]) -> bool {
    name_words(name).iter().any(|word| {
        words
            .iter()
            .any(|w| word == w || word.strip_suffix('s') == Some(*w))
    })
}

/// Self-referential field check for the class introduced at `class_index`.
fn has_linked_field(syntax: &Syntax<'_>, class_index: usize, fields: &[&str]) -> bool {
    let Some(class) = syntax.outline.class_starting_at(class_index) else {
        return false;
    };
    let Some(class_name) = class.name.as_deref() else {
        return false;
    };
    let self_names = syntax.profile.vocabulary.self_names;

    match syntax.profile.declaration_style {
        DeclarationStyle::Typed => class.body.clone().any(|k| {
            syntax.get(k).is_some_and(|t| t.is_ident() && fields.contains(&t.text.as_str()))
                && typed_by(syntax, k, class_name)
        }),
        DeclarationStyle::Keyword | DeclarationStyle::Assignment => {
            let node_like = name_words(class_name)
                .iter()
                .any(|w| NODE_CLASS_WORDS.contains(&w.as_str()));
            node_like
                && class.body.clone().any(|k| {
                    syntax.get(k).is_some_and(|t| fields.contains(&t.text.as_str()))
                        && k >= 2
                        && syntax.is_at(k - 1, ".")
                        && syntax.get(k - 2).is_some_and(|t| t.is_any(self_names))
                })
        }
    }
}

/// Whether the declaration ending at `field` mentions `type_name` within
/// the same statement (`Node* next`, `List<Node> children`).
fn typed_by(syntax: &Syntax<'_>, field: usize, type_name: &str) -> bool {
    (1..=FIELD_TYPE_LOOKBACK)
        .map_while(|back| field.checked_sub(back).and_then(|k| syntax.get(k)))
        .take_while(|t| !t.is_any(&[";", "{", "}", "(", ")", "="]))
        .any(|t| t.is_ident() && t.text == type_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lines::LineIndex;
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
    fn test_text_and_group_steps() {
        with_syntax("const a = new Array(n);", "javascript", |syntax| {
            let steps = &[Step::Text("new"), Step::Text("Array"), Step::Group("(")];
            let found = match_steps(syntax, steps, 3).unwrap();
            assert_eq!(found.end, 8);
            assert_eq!(found.last_group, Some(5..=7));
            assert!(match_steps(syntax, steps, 2).is_none());
        });
    }

    #[test]
    fn test_group_containing() {
        with_syntax("x = [v for v in values]", "python", |syntax| {
            let steps = &[Step::GroupContaining("[", "for")];
            assert!(match_steps(syntax, steps, 2).is_some());
            let steps = &[Step::GroupContaining("[", "while")];
            assert!(match_steps(syntax, steps, 2).is_none());
        });
    }

    #[test]
    fn test_name_word_matches_plural_and_camel_case() {
        assert!(has_name_word("adjList", &["adj"]));
        assert!(has_name_word("stacks", &["stack"]));
        assert!(has_name_word("visit_queue", &["queue"]));
        assert!(!has_name_word("adjust", &["adj"]));
    }

    #[test]
    fn test_sizing_requires_identifier() {
        let rule = AllocationRule::new(
            &[Step::Text("new"), Step::Text("Array"), Step::Group("(")],
            Sizing::IdentInGroup,
        );
        with_syntax("new Array(n); new Array(10);", "javascript", |syntax| {
            assert!(rule.sized_at(syntax, 0).is_some());
            assert!(rule.sized_at(syntax, 6).is_none());
        });
    }

    #[test]
    fn test_linked_field_guard_typed() {
        let source = "class Node { int val; Node next; }";
        with_syntax(source, "java", |syntax| {
            assert!(has_linked_field(syntax, 0, &["next"]));
            assert!(!has_linked_field(syntax, 0, &["left"]));
        });
    }

    #[test]
    fn test_linked_field_guard_dynamic() {
        let source = "class Node:\n    def __init__(self, v):\n        self.next = None\n";
        with_syntax(source, "python", |syntax| {
            assert!(has_linked_field(syntax, 0, &["next"]));
        });
        let source = "class Config:\n    def __init__(self):\n        self.next = None\n";
        with_syntax(source, "python", |syntax| {
            assert!(!has_linked_field(syntax, 0, &["next"]));
        });
    }
}
