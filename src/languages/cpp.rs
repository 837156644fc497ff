use super::{
    operator_table, word_set, BlockStyle, DeclarationStyle, LanguageProfile, LexicalRules,
    StringPrefixes, Vocabulary, GRAPH_FIELDS, GRAPH_WORDS, HASH_WORDS, LIST_FIELDS, QUEUE_WORDS,
    STACK_WORDS, TREE_FIELDS,
};
use crate::core::types::StructureCategory as C;
use crate::structures::rules::{AllocationRule, Guard, Sizing, Step::*, StructureRule};

const KEYWORDS: &[&str] = &[
    "alignas", "auto", "bool", "break", "case", "catch", "char", "class", "const", "constexpr",
    "continue", "default", "delete", "do", "double", "else", "enum", "explicit", "extern",
    "float", "for", "friend", "goto", "if", "inline", "int", "long", "mutable", "namespace",
    "new", "noexcept", "operator", "private", "protected", "public", "register", "return",
    "short", "signed", "sizeof", "static", "struct", "switch", "template", "this", "throw", "try",
    "typedef", "typename", "union", "unsigned", "using", "virtual", "void", "volatile", "while",
];

const TYPE_KEYWORDS: &[&str] = &[
    "auto", "bool", "char", "double", "float", "int", "long", "short", "signed", "unsigned",
    "void",
];

const OPERATORS: &[&str] = &[
    "<=>", "<<=", ">>=", "->*", "...", "::", "->", "++", "--", "<<", ">>", "<=", ">=", "==",
    "!=", "&&", "||", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", ".*",
];

const CLASS_KEYWORDS: &[&str] = &["class", "struct"];

static STRUCTURE_RULES: &[StructureRule] = &[
    StructureRule::guarded(C::Tree, &[OneOf(CLASS_KEYWORDS), Ident], Guard::LinkedFields(TREE_FIELDS)),
    StructureRule::guarded(C::List, &[OneOf(CLASS_KEYWORDS), Ident], Guard::LinkedFields(LIST_FIELDS)),
    StructureRule::guarded(
        C::Graph,
        &[OneOf(CLASS_KEYWORDS), Ident],
        Guard::LinkedFields(GRAPH_FIELDS),
    ),
    StructureRule::new(C::List, &[OneOf(&["ListNode", "list", "forward_list"])]),
    StructureRule::new(C::Tree, &[OneOf(&["TreeNode", "Trie", "TrieNode"])]),
    StructureRule::new(C::Stack, &[Text("stack"), Group("<")]),
    StructureRule::new(C::Queue, &[OneOf(&["queue", "deque", "priority_queue"]), Group("<")]),
    StructureRule::new(
        C::HashTable,
        &[
            OneOf(&["unordered_map", "unordered_set", "map", "set", "multimap", "multiset"]),
            Group("<"),
        ],
    ),
    StructureRule::new(C::Array, &[OneOf(&["vector", "array"]), Group("<")]),
    StructureRule::new(C::Stack, &[NameWord(STACK_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::Queue, &[NameWord(QUEUE_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::Graph, &[NameWord(GRAPH_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::HashTable, &[NameWord(HASH_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::Array, &[Text("new"), TypeName, Group("[")]),
    StructureRule::new(C::Array, &[TypeName, Ident, Group("[")]),
    StructureRule::new(C::Array, &[Ident, Group("[")]),
];

static ALLOCATION_RULES: &[AllocationRule] = &[
    AllocationRule::new(&[Text("vector"), Group("<"), Ident, Group("(")], Sizing::IdentInGroup),
    AllocationRule::new(&[Text("vector"), Group("<"), Group("(")], Sizing::IdentInGroup),
    AllocationRule::new(&[Text("new"), TypeName, Group("[")], Sizing::IdentInGroup),
    AllocationRule::new(
        &[OneOf(&["unordered_set", "set", "deque"]), Group("<"), Ident, Group("(")],
        Sizing::IdentInGroup,
    ),
    AllocationRule::new(&[Text("string"), Ident, Group("(")], Sizing::IdentInGroup),
];

pub fn profile() -> LanguageProfile {
    LanguageProfile {
        name: "cpp",
        display_name: "C++",
        aliases: &["c++", "cxx", "cc"],
        extensions: &["cpp", "cc", "cxx", "hpp", "hh", "hxx", "h"],
        block_style: BlockStyle::Braces,
        declaration_style: DeclarationStyle::Typed,
        lexical: LexicalRules {
            keywords: word_set(KEYWORDS),
            literal_words: word_set(&["true", "false", "nullptr", "NULL"]),
            line_comments: &["//"],
            block_comment: Some(("/*", "*/")),
            quotes: &['"', '\''],
            multiline_quotes: &[],
            triple_quotes: false,
            docstrings: false,
            prefixes: StringPrefixes::Cpp,
            regex_literals: false,
            identifier_chars: &[],
            operators: operator_table(OPERATORS),
            digit_separator: Some('\''),
        },
        vocabulary: Vocabulary {
            loop_keywords: &["for", "while", "do"],
            function_keywords: &[],
            class_keywords: CLASS_KEYWORDS,
            conditional_keywords: &["if", "switch", "case"],
            exit_keywords: &["return", "throw", "break"],
            arrow_tokens: &[],
            binding_keywords: &[],
            type_keywords: TYPE_KEYWORDS,
            self_names: &["this"],
            sort_calls: &["sort", "stable_sort"],
            linear_calls: &[
                "find", "find_if", "count", "count_if", "reverse", "accumulate", "fill", "copy",
                "min_element", "max_element", "erase", "remove", "unique", "all_of", "any_of",
            ],
            growth_calls: &["push_back", "emplace_back", "push", "emplace", "insert", "push_front"],
            size_accessors: &["size", "empty", "length"],
            null_words: &["nullptr", "NULL"],
            fixed_width_integers: true,
        },
        structure_rules: STRUCTURE_RULES,
        allocation_rules: ALLOCATION_RULES,
    }
}
