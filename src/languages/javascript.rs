use super::{
    operator_table, word_set, BlockStyle, DeclarationStyle, LanguageProfile, LexicalRules,
    StringPrefixes, Vocabulary, GRAPH_FIELDS, GRAPH_WORDS, HASH_WORDS, LIST_FIELDS, QUEUE_WORDS,
    STACK_WORDS, TREE_FIELDS,
};
use crate::core::types::StructureCategory as C;
use crate::structures::rules::{AllocationRule, Guard, Sizing, Step::*, StructureRule};

const KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "finally", "for", "function", "if",
    "import", "in", "instanceof", "let", "new", "of", "return", "static", "super", "switch",
    "this", "throw", "try", "typeof", "var", "void", "while", "with", "yield",
];

const OPERATORS: &[&str] = &[
    ">>>=", "===", "!==", "**=", "...", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "**", "<<", ">>",
];

static STRUCTURE_RULES: &[StructureRule] = &[
    StructureRule::guarded(C::Tree, &[Text("class"), Ident], Guard::LinkedFields(TREE_FIELDS)),
    StructureRule::guarded(C::List, &[Text("class"), Ident], Guard::LinkedFields(LIST_FIELDS)),
    StructureRule::guarded(C::Graph, &[Text("class"), Ident], Guard::LinkedFields(GRAPH_FIELDS)),
    StructureRule::new(C::List, &[OneOf(&["ListNode", "LinkedList", "DoublyLinkedList"])]),
    StructureRule::new(C::Tree, &[OneOf(&["TreeNode", "BinaryTree", "BST", "Trie", "TrieNode"])]),
    StructureRule::new(
        C::Queue,
        &[Text("new"), OneOf(&["Queue", "Deque", "PriorityQueue", "MinHeap", "MaxHeap"])],
    ),
    StructureRule::new(C::Stack, &[Text("new"), Text("Stack")]),
    StructureRule::new(C::Graph, &[Text("new"), Text("Graph")]),
    StructureRule::new(C::HashTable, &[Text("new"), OneOf(&["Map", "Set", "WeakMap", "WeakSet"])]),
    StructureRule::new(C::Array, &[Text("new"), Text("Array")]),
    StructureRule::new(C::Stack, &[NameWord(STACK_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::Queue, &[NameWord(QUEUE_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::Queue, &[Text("."), Text("shift"), Group("(")]),
    StructureRule::new(C::Graph, &[NameWord(GRAPH_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::HashTable, &[NameWord(HASH_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::HashTable, &[Text("="), Text("{"), Text("}")]),
    StructureRule::new(C::Array, &[Text("Array"), Text("."), OneOf(&["from", "of", "isArray"])]),
    StructureRule::new(C::Array, &[OneOf(&["=", "(", ",", "return", ":"]), Group("[")]),
    StructureRule::new(C::Array, &[Ident, Group("[")]),
];

static ALLOCATION_RULES: &[AllocationRule] = &[
    AllocationRule::new(&[Text("new"), Text("Array"), Group("(")], Sizing::IdentInGroup),
    AllocationRule::new(&[Text("Array"), Group("(")], Sizing::IdentInGroup),
    AllocationRule::new(&[Text("Array"), Text("."), Text("from"), Group("(")], Sizing::IdentInGroup),
    AllocationRule::new(&[Text("new"), OneOf(&["Set", "Map"]), Group("(")], Sizing::IdentInGroup),
    AllocationRule::new(
        &[
            Text("."),
            OneOf(&["slice", "map", "filter", "concat", "flat", "flatMap", "split"]),
            Group("("),
        ],
        Sizing::Always,
    ),
    AllocationRule::new(&[Text("["), Text("...")], Sizing::Always),
];

pub fn profile() -> LanguageProfile {
    LanguageProfile {
        name: "javascript",
        display_name: "JavaScript",
        aliases: &["js", "node", "ecmascript"],
        extensions: &["js", "jsx", "mjs", "cjs"],
        block_style: BlockStyle::Braces,
        declaration_style: DeclarationStyle::Keyword,
        lexical: LexicalRules {
            keywords: word_set(KEYWORDS),
            literal_words: word_set(&["true", "false", "null", "undefined", "NaN", "Infinity"]),
            line_comments: &["//"],
            block_comment: Some(("/*", "*/")),
            quotes: &['"', '\''],
            multiline_quotes: &['`'],
            triple_quotes: false,
            docstrings: false,
            prefixes: StringPrefixes::None,
            regex_literals: true,
            identifier_chars: &['$'],
            operators: operator_table(OPERATORS),
            digit_separator: None,
        },
        vocabulary: Vocabulary {
            loop_keywords: &["for", "while", "do"],
            function_keywords: &["function"],
            class_keywords: &["class"],
            conditional_keywords: &["if", "switch", "case"],
            exit_keywords: &["return", "throw", "break"],
            arrow_tokens: &["=>"],
            binding_keywords: &["let", "const", "var"],
            type_keywords: &[],
            self_names: &["this"],
            sort_calls: &["sort", "toSorted"],
            linear_calls: &[
                "indexOf", "lastIndexOf", "includes", "find", "findIndex", "findLast", "filter",
                "map", "reduce", "reduceRight", "forEach", "some", "every", "slice", "splice",
                "concat", "join", "reverse", "fill", "flat", "flatMap", "from", "shift", "unshift",
            ],
            growth_calls: &["push", "unshift", "set", "add"],
            size_accessors: &["length", "size"],
            null_words: &["null", "undefined"],
            fixed_width_integers: false,
        },
        structure_rules: STRUCTURE_RULES,
        allocation_rules: ALLOCATION_RULES,
    }
}
