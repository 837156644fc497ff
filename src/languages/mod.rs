//! Language profiles: lexical rules, vocabulary and pattern tables for each
//! supported language.
//!
//! Profiles are immutable once built. The builtin set lives in a process-wide
//! [`ProfileRegistry`]; callers that need extra languages build their own
//! registry and hand it to [`crate::Analyzer::with_registry`].

pub mod cpp;
pub mod java;
pub mod javascript;
pub mod python;

use crate::structures::rules::{AllocationRule, StructureRule};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// How blocks are delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    /// `{ ... }` blocks, `for (...)` headers
    Braces,
    /// `:` plus indentation
    Indentation,
}

/// How new variables are introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationStyle {
    /// `let x`, `const x`, `var x`
    Keyword,
    /// First assignment binds (`x = 1`)
    Assignment,
    /// `Type name`
    Typed,
}

/// String prefix handling beyond plain quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringPrefixes {
    None,
    /// `r"..."`, `b'...'`, `f"..."` and combinations
    Python,
    /// `R"delim(...)delim"`, `u8"..."`, `L'x'`
    Cpp,
}

/// Lexical rules consumed by the tokenizer.
#[derive(Debug, Clone)]
pub struct LexicalRules {
    pub keywords: HashSet<&'static str>,
    /// Words lexed as literals (`true`, `None`, `nullptr`)
    pub literal_words: HashSet<&'static str>,
    pub line_comments: &'static [&'static str],
    pub block_comment: Option<(&'static str, &'static str)>,
    /// Quotes that end at the first unescaped newline
    pub quotes: &'static [char],
    /// Quotes that may span lines (JS template literals)
    pub multiline_quotes: &'static [char],
    /// `"""` / `'''` blocks
    pub triple_quotes: bool,
    /// Triple-quoted strings opening a line are documentation comments
    pub docstrings: bool,
    pub prefixes: StringPrefixes,
    /// `/re/flags` literals where an operand is expected
    pub regex_literals: bool,
    /// Extra identifier characters (`$`)
    pub identifier_chars: &'static [char],
    /// Multi-character operators, longest first
    pub operators: Vec<&'static str>,
    /// `1'000'000`
    pub digit_separator: Option<char>,
}

/// Words and call names the later stages look for.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub loop_keywords: &'static [&'static str],
    pub function_keywords: &'static [&'static str],
    pub class_keywords: &'static [&'static str],
    pub conditional_keywords: &'static [&'static str],
    pub exit_keywords: &'static [&'static str],
    /// Tokens introducing a lambda body (`=>`, `->`)
    pub arrow_tokens: &'static [&'static str],
    pub binding_keywords: &'static [&'static str],
    /// Primitive type keywords that start a typed declaration
    pub type_keywords: &'static [&'static str],
    pub self_names: &'static [&'static str],
    pub sort_calls: &'static [&'static str],
    /// Calls that scan their receiver or argument end to end
    pub linear_calls: &'static [&'static str],
    /// Calls that add an element to a collection
    pub growth_calls: &'static [&'static str],
    /// Members that read a collection's size or emptiness
    pub size_accessors: &'static [&'static str],
    pub null_words: &'static [&'static str],
    /// Integer arithmetic can overflow (`(lo + hi) / 2`)
    pub fixed_width_integers: bool,
}

/// Immutable description of one supported language.
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    /// Canonical lowercase tag (`javascript`)
    pub name: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
    pub extensions: &'static [&'static str],
    pub block_style: BlockStyle,
    pub declaration_style: DeclarationStyle,
    pub lexical: LexicalRules,
    pub vocabulary: Vocabulary,
    /// Ordered structure rules; first match wins for a token window
    pub structure_rules: &'static [StructureRule],
    /// Size-dependent allocation shapes
    pub allocation_rules: &'static [AllocationRule],
}

impl LanguageProfile {
    pub fn is_keyword(&self, word: &str) -> bool {
        self.lexical.keywords.contains(word)
    }

    pub fn is_type_keyword(&self, word: &str) -> bool {
        self.vocabulary.type_keywords.contains(&word)
    }

    pub fn is_loop_keyword(&self, word: &str) -> bool {
        self.vocabulary.loop_keywords.contains(&word)
    }
}

/// Fields that make a self-typed class a tree node.
pub(crate) const TREE_FIELDS: &[&str] = &["left", "right", "children", "parent"];
pub(crate) const LIST_FIELDS: &[&str] = &["next", "prev", "previous"];
pub(crate) const GRAPH_FIELDS: &[&str] = &["neighbors", "neighbours", "adjacent", "adj", "edges"];

// Role words in variable names (`adjList`, `max_heap`, `memo`)
pub(crate) const STACK_WORDS: &[&str] = &["stack", "stk"];
pub(crate) const QUEUE_WORDS: &[&str] = &["queue", "deque", "heap", "pq", "frontier"];
pub(crate) const GRAPH_WORDS: &[&str] = &["graph", "adj", "adjacency", "neighbors", "edges"];
pub(crate) const HASH_WORDS: &[&str] = &[
    "map", "dict", "hash", "table", "memo", "cache", "seen", "lookup", "set", "freq", "counter",
];

/// Sorts operators longest first so the lexer can take the first prefix hit.
pub(crate) fn operator_table(operators: &[&'static str]) -> Vec<&'static str> {
    let mut table = operators.to_vec();
    table.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    table.dedup();
    table
}

pub(crate) fn word_set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

/// Lookup table from language tags, aliases and file extensions to profiles.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: Vec<Arc<LanguageProfile>>,
    by_tag: HashMap<String, usize>,
    by_extension: HashMap<String, usize>,
}

static BUILTIN: Lazy<Arc<ProfileRegistry>> = Lazy::new(|| Arc::new(ProfileRegistry::builtin()));

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// JavaScript, Python, C++ and Java.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(javascript::profile());
        registry.register(python::profile());
        registry.register(cpp::profile());
        registry.register(java::profile());
        registry
    }

    /// Shared instance of [`ProfileRegistry::builtin`], built on first use.
    pub fn shared() -> Arc<ProfileRegistry> {
        Arc::clone(&BUILTIN)
    }

    /// Adds a profile. A later profile claiming an existing tag, alias or
    /// extension replaces the earlier mapping.
    pub fn register(&mut self, profile: LanguageProfile) {
        let index = self.profiles.len();
        for tag in std::iter::once(&profile.name).chain(profile.aliases.iter()) {
            self.by_tag.insert(tag.to_ascii_lowercase(), index);
        }
        for extension in profile.extensions {
            self.by_extension
                .insert(extension.trim_start_matches('.').to_ascii_lowercase(), index);
        }
        log::debug!("Registered language profile '{}'", profile.name);
        self.profiles.push(Arc::new(profile));
    }

    /// Case-insensitive lookup by tag or alias.
    pub fn get(&self, tag: &str) -> Option<&Arc<LanguageProfile>> {
        let key = tag.trim().to_ascii_lowercase();
        self.by_tag.get(&key).map(|&index| &self.profiles[index])
    }

    pub fn for_extension(&self, extension: &str) -> Option<&Arc<LanguageProfile>> {
        let key = extension.trim_start_matches('.').to_ascii_lowercase();
        self.by_extension.get(&key).map(|&index| &self.profiles[index])
    }

    pub fn for_path(&self, path: &std::path::Path) -> Option<&Arc<LanguageProfile>> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.for_extension(ext))
    }

    /// Profiles in registration order (replaced tags still list the old profile).
    pub fn profiles(&self) -> impl Iterator<Item = &Arc<LanguageProfile>> {
        self.profiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_builtin_tags_and_aliases() {
        let registry = ProfileRegistry::builtin();
        assert_eq!(registry.get("javascript").unwrap().name, "javascript");
        assert_eq!(registry.get("JS").unwrap().name, "javascript");
        assert_eq!(registry.get("py").unwrap().name, "python");
        assert_eq!(registry.get("c++").unwrap().name, "cpp");
        assert_eq!(registry.get(" Java ").unwrap().name, "java");
        assert!(registry.get("cobol").is_none());
        assert!(registry.get("").is_none());
    }

    #[test]
    fn test_extension_lookup() {
        let registry = ProfileRegistry::builtin();
        assert_eq!(registry.for_path(Path::new("a/b.py")).unwrap().name, "python");
        assert_eq!(registry.for_path(Path::new("main.CPP")).unwrap().name, "cpp");
        assert_eq!(registry.for_extension(".jsx").unwrap().name, "javascript");
        assert!(registry.for_path(Path::new("README")).is_none());
    }

    #[test]
    fn test_register_custom_profile_replaces_alias() {
        let mut registry = ProfileRegistry::builtin();
        let mut custom = javascript::profile();
        custom.name = "typescript";
        custom.display_name = "TypeScript";
        custom.aliases = &["ts"];
        custom.extensions = &["ts"];
        registry.register(custom);
        assert_eq!(registry.get("ts").unwrap().display_name, "TypeScript");
        assert_eq!(registry.get("javascript").unwrap().display_name, "JavaScript");
        assert_eq!(registry.profiles().count(), 5);
    }

    #[test]
    fn test_operator_table_longest_first() {
        let table = operator_table(&["=", "===", "==", "=>"]);
        assert_eq!(table, vec!["===", "==", "=>", "="]);
    }
}
