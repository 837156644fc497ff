use super::{
    operator_table, word_set, BlockStyle, DeclarationStyle, LanguageProfile, LexicalRules,
    StringPrefixes, Vocabulary, GRAPH_FIELDS, GRAPH_WORDS, HASH_WORDS, LIST_FIELDS, QUEUE_WORDS,
    STACK_WORDS, TREE_FIELDS,
};
use crate::core::types::StructureCategory as C;
use crate::structures::rules::{AllocationRule, Guard, Sizing, Step::*, StructureRule};

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

const OPERATORS: &[&str] = &[
    "**=", "//=", ">>=", "<<=", "...", "->", ":=", "**", "//", "==", "!=", "<=", ">=", "<<", ">>",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "@=",
];

/// Literal openers: assignment, call argument, return value, dict value.
const VALUE_POSITION: &[&str] = &["=", "(", ",", "return", ":", "in"];

static STRUCTURE_RULES: &[StructureRule] = &[
    StructureRule::guarded(C::Tree, &[Text("class"), Ident], Guard::LinkedFields(TREE_FIELDS)),
    StructureRule::guarded(C::List, &[Text("class"), Ident], Guard::LinkedFields(LIST_FIELDS)),
    StructureRule::guarded(C::Graph, &[Text("class"), Ident], Guard::LinkedFields(GRAPH_FIELDS)),
    StructureRule::new(C::List, &[OneOf(&["ListNode", "LinkedList"])]),
    StructureRule::new(C::Tree, &[OneOf(&["TreeNode", "BinaryTree", "Trie", "TrieNode"])]),
    StructureRule::new(C::Queue, &[Text("deque"), Group("(")]),
    StructureRule::new(
        C::Queue,
        &[OneOf(&["heapq", "heappush", "heappop", "heapify", "PriorityQueue", "Queue"])],
    ),
    StructureRule::new(
        C::HashTable,
        &[OneOf(&["dict", "set", "defaultdict", "Counter", "OrderedDict"]), Group("(")],
    ),
    StructureRule::new(C::HashTable, &[OneOf(VALUE_POSITION), Group("{")]),
    StructureRule::new(C::Stack, &[NameWord(STACK_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::Queue, &[NameWord(QUEUE_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::Queue, &[Text("."), Text("popleft"), Group("(")]),
    StructureRule::new(C::Graph, &[NameWord(GRAPH_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::HashTable, &[NameWord(HASH_WORDS), OneOf(&[".", "["])]),
    StructureRule::new(C::Array, &[OneOf(&["list", "array"]), Group("(")]),
    StructureRule::new(C::Array, &[OneOf(VALUE_POSITION), Group("[")]),
    StructureRule::new(C::Array, &[Ident, Group("[")]),
];

static ALLOCATION_RULES: &[AllocationRule] = &[
    AllocationRule::new(&[GroupContaining("[", "for")], Sizing::Always),
    AllocationRule::new(&[GroupContaining("{", "for")], Sizing::Always),
    AllocationRule::new(&[Group("["), Text("*"), Ident], Sizing::Always),
    AllocationRule::new(
        &[OneOf(&["list", "dict", "set", "sorted", "deque"]), Group("(")],
        Sizing::IdentInGroup,
    ),
    AllocationRule::new(&[Text("."), Text("copy"), Group("(")], Sizing::Always),
    AllocationRule::new(&[Ident, GroupContaining("[", ":")], Sizing::Always),
];

pub fn profile() -> LanguageProfile {
    LanguageProfile {
        name: "python",
        display_name: "Python",
        aliases: &["py", "python3"],
        extensions: &["py", "pyw"],
        block_style: BlockStyle::Indentation,
        declaration_style: DeclarationStyle::Assignment,
        lexical: LexicalRules {
            keywords: word_set(KEYWORDS),
            literal_words: word_set(&["True", "False", "None"]),
            line_comments: &["#"],
            block_comment: None,
            quotes: &['"', '\''],
            multiline_quotes: &[],
            triple_quotes: true,
            docstrings: true,
            prefixes: StringPrefixes::Python,
            regex_literals: false,
            identifier_chars: &[],
            operators: operator_table(OPERATORS),
            digit_separator: None,
        },
        vocabulary: Vocabulary {
            loop_keywords: &["for", "while"],
            function_keywords: &["def"],
            class_keywords: &["class"],
            conditional_keywords: &["if", "elif"],
            exit_keywords: &["return", "raise", "break"],
            arrow_tokens: &[],
            binding_keywords: &[],
            type_keywords: &[],
            self_names: &["self", "cls"],
            sort_calls: &["sort", "sorted"],
            linear_calls: &[
                "index", "count", "remove", "insert", "sum", "min", "max", "any", "all", "join",
                "reversed", "copy", "reverse",
            ],
            growth_calls: &[
                "append", "extend", "add", "insert", "appendleft", "setdefault", "update",
                "heappush",
            ],
            size_accessors: &["len"],
            null_words: &["None"],
            fixed_width_integers: false,
        },
        structure_rules: STRUCTURE_RULES,
        allocation_rules: ALLOCATION_RULES,
    }
}
