use super::{
    operator_table, word_set, BlockStyle, DeclarationStyle, LanguageProfile, LexicalRules,
    StringPrefixes, Vocabulary, GRAPH_FIELDS, GRAPH_WORDS, HASH_WORDS, LIST_FIELDS, QUEUE_WORDS,
    STACK_WORDS, TREE_FIELDS,
};
use crate::core::types::StructureCategory as C;
use crate::structures::rules::{AllocationRule, Guard, Sizing, Step::*, StructureRule};

const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally",
    "float", "for", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "var", "void", "volatile", "while", "yield",
];

const TYPE_KEYWORDS: &[&str] = &[
    "boolean", "byte", "char", "double", "float", "int", "long", "short", "void", "var",
];

const OPERATORS: &[&str] = &[
    ">>>=", "<<=", ">>=", ">>>", "...", "->", "::", "++", "--", "&&", "||", "==", "!=", "<=",
    ">=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>",
];

static STRUCTURE_RULES: &[StructureRule] = &[
    StructureRule::guarded(C::Tree, &[Text("class"), Ident], Guard::LinkedFields(TREE_FIELDS)),
    StructureRule::guarded(C::List, &[Text("class"), Ident], Guard::LinkedFields(LIST_FIELDS)),
    StructureRule::guarded(C::Graph, &[Text("class"), Ident], Guard::LinkedFields(GRAPH_FIELDS)),
    StructureRule::new(C::List, &[OneOf(&["ListNode", "LinkedList"])]),
    StructureRule::new(C::Tree, &[OneOf(&["TreeNode", "TreeMap", "TreeSet", "Trie", "TrieNode"])]),
    StructureRule::new(C::Stack, &[Text("Stack")]),
    StructureRule::new(C::Queue, &[OneOf(&["Queue", "Deque", "ArrayDeque", "PriorityQueue"])]),
    StructureRule::new(
        C::HashTable,
        &[OneOf(&["HashMap", "HashSet", "LinkedHashMap", "LinkedHashSet", "Hashtable", "Map", "Set"])],
    ),
    StructureRule::new(C::Array, &[OneOf(&["ArrayList", "List", "Arrays", "Vector"])]),
    StructureRule::new(C::Stack, &[NameWord(STACK_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::Queue, &[NameWord(QUEUE_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::Graph, &[NameWord(GRAPH_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::HashTable, &[NameWord(HASH_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::Array, &[Text("new"), TypeName, Group("[")]),
    StructureRule::new(C::Array, &[TypeName, Group("[")]),
];

static ALLOCATION_RULES: &[AllocationRule] = &[
    AllocationRule::grid(&[Text("new"), TypeName, Group("["), Group("[")], Sizing::IdentInGroup),
    AllocationRule::new(&[Text("new"), TypeName, Group("[")], Sizing::IdentInGroup),
    AllocationRule::new(&[Text("new"), Ident, Group("<"), Group("(")], Sizing::IdentInGroup),
    AllocationRule::new(
        &[Text("Arrays"), Text("."), OneOf(&["copyOf", "copyOfRange"]), Group("(")],
        Sizing::Always,
    ),
    AllocationRule::new(&[Text("."), OneOf(&["clone", "toArray"]), Group("(")], Sizing::Always),
];

pub fn profile() -> LanguageProfile {
    LanguageProfile {
        name: "java",
        display_name: "Java",
        aliases: &[],
        extensions: &["java"],
        block_style: BlockStyle::Braces,
        declaration_style: DeclarationStyle::Typed,
        lexical: LexicalRules {
            keywords: word_set(KEYWORDS),
            literal_words: word_set(&["true", "false", "null"]),
            line_comments: &["//"],
            block_comment: Some(("/*", "*/")),
            quotes: &['"', '\''],
            multiline_quotes: &[],
            triple_quotes: true,
            docstrings: false,
            prefixes: StringPrefixes::None,
            regex_literals: false,
            identifier_chars: &['$'],
            operators: operator_table(OPERATORS),
            digit_separator: None,
        },
        vocabulary: Vocabulary {
            loop_keywords: &["for", "while", "do"],
            function_keywords: &[],
            class_keywords: &["class", "interface", "enum"],
            conditional_keywords: &["if", "switch", "case"],
            exit_keywords: &["return", "throw", "break"],
            arrow_tokens: &["->"],
            binding_keywords: &[],
            type_keywords: TYPE_KEYWORDS,
            self_names: &["this"],
            sort_calls: &["sort", "sorted"],
            linear_calls: &[
                "indexOf", "lastIndexOf", "fill", "copyOf", "copyOfRange", "reverse", "toArray",
                "stream", "forEach", "removeIf", "frequency",
            ],
            growth_calls: &["add", "put", "push", "offer", "addLast", "addFirst", "append"],
            size_accessors: &["length", "size", "isEmpty"],
            null_words: &["null"],
            fixed_width_integers: true,
        },
        structure_rules: STRUCTURE_RULES,
        allocation_rules: ALLOCATION_RULES,
    }
}
