//! Function, loop and class blocks recovered from the code token stream.
//!
//! Brace languages delimit bodies with `{}` or a single statement; Python
//! bodies are the lines indented deeper than the header line. Comprehension
//! `for` clauses become loops whose body is the enclosing bracket group.

use super::lines::LineIndex;
use super::types::{Token, TokenKind};
use crate::languages::{BlockStyle, LanguageProfile};
use std::ops::Range;

/// Qualifier tokens allowed between a parameter list and a function body.
const MAX_QUALIFIER_TOKENS: usize = 16;
const MAX_CLASS_HEADER_TOKENS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Function,
    Loop,
    Class,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub name: Option<String>,
    /// Introducing token (keyword, function name or arrow)
    pub start: usize,
    /// Loop condition or parameter list
    pub header: Range<usize>,
    pub body: Range<usize>,
    /// Last token of the block (closing brace when braced)
    pub last: usize,
    pub line: usize,
    pub end_line: usize,
    /// Innermost block whose body contains `start`
    pub parent: Option<usize>,
    pub comprehension: bool,
}

impl Block {
    fn new(kind: BlockKind, start: usize, header: Range<usize>, body: Range<usize>) -> Self {
        let last = body.end.max(header.end).max(start + 1) - 1;
        Self {
            kind,
            name: None,
            start,
            header,
            body,
            last,
            line: 0,
            end_line: 0,
            parent: None,
            comprehension: false,
        }
    }

    fn named(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    fn ending_at(mut self, last: usize) -> Self {
        self.last = last;
        self
    }

    /// Header and body together.
    pub fn span(&self) -> Range<usize> {
        self.header.start.min(self.body.start)..self.header.end.max(self.body.end)
    }

    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.line) + 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    /// Ordered by `start`
    pub blocks: Vec<Block>,
    /// Deepest block nesting (brace depth or indentation level)
    pub max_nesting: usize,
}

impl Outline {
    pub fn build(
        code: &[&Token],
        pairs: &[Option<usize>],
        lines: &LineIndex,
        profile: &LanguageProfile,
    ) -> Self {
        let scanner = Scanner {
            code,
            pairs,
            lines,
            profile,
            depth: bracket_depths(code, pairs),
        };
        let (mut blocks, max_nesting) = match profile.block_style {
            BlockStyle::Braces => (scanner.brace_blocks(), brace_nesting(code)),
            BlockStyle::Indentation => (scanner.indented_blocks(), scanner.indent_nesting()),
        };

        blocks.sort_by_key(|b| b.start);
        for block in &mut blocks {
            block.line = code.get(block.start).map_or(0, |t| t.line);
            block.end_line = code
                .get(block.last.min(code.len().saturating_sub(1)))
                .map_or(block.line, |t| t.end_line())
                .max(block.line);
        }
        for index in 0..blocks.len() {
            let start = blocks[index].start;
            blocks[index].parent = (0..index).rev().find(|&p| blocks[p].body.contains(&start));
        }

        Self {
            blocks,
            max_nesting,
        }
    }

    pub fn functions(&self) -> impl DoubleEndedIterator<Item = (usize, &Block)> + '_ {
        self.of_kind(BlockKind::Function)
    }

    pub fn loops(&self) -> impl DoubleEndedIterator<Item = (usize, &Block)> + '_ {
        self.of_kind(BlockKind::Loop)
    }

    pub fn classes(&self) -> impl DoubleEndedIterator<Item = (usize, &Block)> + '_ {
        self.of_kind(BlockKind::Class)
    }

    fn of_kind(&self, kind: BlockKind) -> impl DoubleEndedIterator<Item = (usize, &Block)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter(move |(_, block)| block.kind == kind)
    }

    pub fn class_starting_at(&self, start: usize) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|b| b.kind == BlockKind::Class && b.start == start)
    }

    /// Ancestors of `index`, innermost first.
    pub fn ancestors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(self.blocks.get(index).and_then(|b| b.parent), move |&p| {
            self.blocks[p].parent
        })
    }

    /// Innermost function whose body contains token `position`.
    pub fn enclosing_function(&self, position: usize) -> Option<usize> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.kind == BlockKind::Function && b.body.contains(&position))
            .max_by_key(|(_, b)| b.body.start)
            .map(|(index, _)| index)
    }

    /// Loops enclosing token `position`, innermost first.
    pub fn enclosing_loops(&self, position: usize) -> Vec<usize> {
        let mut loops: Vec<usize> = self
            .loops()
            .filter(|(_, b)| b.body.contains(&position) || b.header.contains(&position))
            .map(|(index, _)| index)
            .collect();
        loops.sort_by_key(|&index| std::cmp::Reverse(self.blocks[index].start));
        loops
    }
}

struct Scanner<'s, 'a> {
    code: &'s [&'a Token],
    pairs: &'s [Option<usize>],
    lines: &'s LineIndex,
    profile: &'s LanguageProfile,
    /// Bracket depth before each token
    depth: Vec<usize>,
}

impl Scanner<'_, '_> {
    fn is(&self, index: usize, text: &str) -> bool {
        self.code.get(index).is_some_and(|t| t.is(text))
    }

    fn ident_at(&self, index: usize) -> Option<String> {
        self.code
            .get(index)
            .filter(|t| t.is_ident())
            .map(|t| t.text.clone())
    }

    fn pair(&self, index: usize) -> Option<usize> {
        self.pairs.get(index).copied().flatten()
    }

    fn brace_blocks(&self) -> Vec<Block> {
        let vocabulary = &self.profile.vocabulary;
        let mut blocks = Vec::new();
        // Constructor initializer lists look like calls followed by a body
        let mut header_end = 0;

        for (i, token) in self.code.iter().enumerate() {
            let word = token.text.as_str();
            let block = if token.kind == TokenKind::Keyword {
                if vocabulary.loop_keywords.contains(&word) {
                    self.brace_loop(i)
                } else if vocabulary.class_keywords.contains(&word) {
                    self.brace_class(i)
                } else if vocabulary.function_keywords.contains(&word) {
                    self.anonymous_function(i)
                } else {
                    None
                }
            } else if token.is_any(vocabulary.arrow_tokens) {
                self.arrow_function(i)
            } else if token.is_ident() && i >= header_end {
                let function = self.named_function(i);
                if let Some(f) = &function {
                    header_end = f.body.start;
                }
                function
            } else {
                None
            };
            blocks.extend(block);
        }
        blocks
    }

    fn brace_loop(&self, i: usize) -> Option<Block> {
        if self.code[i].is("do") {
            let (body, end) = self.block_or_statement(i + 1);
            let mut header = end + 1..end + 1;
            let mut last = end;
            if self.is(end + 1, "while") && self.is(end + 2, "(") {
                if let Some(close) = self.pair(end + 2) {
                    header = end + 3..close;
                    last = close;
                }
            }
            return Some(Block::new(BlockKind::Loop, i, header, body).ending_at(last));
        }

        let mut open = i + 1;
        if self.is(open, "await") {
            open += 1;
        }
        if !self.is(open, "(") {
            return None;
        }
        let close = self.pair(open)?;
        // `do { } while (...);` tail
        if self.code[i].is("while") && self.is(close + 1, ";") && self.preceded_by_do_body(i) {
            return None;
        }
        let (body, last) = self.block_or_statement(close + 1);
        Some(Block::new(BlockKind::Loop, i, open + 1..close, body).ending_at(last))
    }

    fn preceded_by_do_body(&self, while_index: usize) -> bool {
        let Some(prev) = while_index.checked_sub(1) else {
            return false;
        };
        if self.is(prev, "}") {
            if let Some(open) = self.pair(prev) {
                return open > 0 && self.is(open - 1, "do");
            }
        }
        self.is(prev, ";")
            && self.code[..prev]
                .iter()
                .rposition(|t| t.is_any(&[";", "{", "}"]))
                .map_or(self.is(0, "do"), |k| k + 1 < prev && self.is(k + 1, "do"))
    }

    fn brace_class(&self, i: usize) -> Option<Block> {
        let name = self.ident_at(i + 1)?;
        let limit = (i + MAX_CLASS_HEADER_TOKENS).min(self.code.len());
        let open = (i + 2..limit)
            .take_while(|&k| !self.is(k, ";"))
            .find(|&k| self.is(k, "{"))?;
        let close = self.pair(open)?;
        Some(
            Block::new(BlockKind::Class, i, i + 2..open, open + 1..close)
                .named(Some(name))
                .ending_at(close),
        )
    }

    /// `function (a, b) { ... }` assigned to a name or passed inline.
    fn anonymous_function(&self, i: usize) -> Option<Block> {
        let mut open = i + 1;
        if self.is(open, "*") {
            open += 1;
        }
        if !self.is(open, "(") {
            return None;
        }
        let close = self.pair(open)?;
        if !self.is(close + 1, "{") {
            return None;
        }
        let body_close = self.pair(close + 1)?;
        Some(
            Block::new(BlockKind::Function, i, open + 1..close, close + 2..body_close)
                .named(self.assigned_name(i))
                .ending_at(body_close),
        )
    }

    /// `name = <expr>` or `name: <expr>` ending just before `index`.
    fn assigned_name(&self, index: usize) -> Option<String> {
        let mut k = index.checked_sub(1)?;
        if self.is(k, "async") {
            k = k.checked_sub(1)?;
        }
        if self.code[k].is_any(&["=", ":"]) {
            return self.ident_at(k.checked_sub(1)?);
        }
        None
    }

    fn arrow_function(&self, i: usize) -> Option<Block> {
        let prev = i.checked_sub(1)?;
        let (header, params_start) = if self.is(prev, ")") {
            let open = self.pair(prev)?;
            (open + 1..prev, open)
        } else if self.code[prev].is_ident() {
            (prev..i, prev)
        } else {
            return None;
        };

        let (body, last) = if self.is(i + 1, "{") {
            let close = self.pair(i + 1)?;
            (i + 2..close, close)
        } else {
            let end = self.expression_end(i + 1);
            (i + 1..end, end.saturating_sub(1).max(i))
        };
        Some(
            Block::new(BlockKind::Function, i, header, body)
                .named(self.assigned_name(params_start))
                .ending_at(last),
        )
    }

    /// `name(params) qualifiers { body }`
    fn named_function(&self, i: usize) -> Option<Block> {
        if !self.is(i + 1, "(") {
            return None;
        }
        if i > 0
            && self.code[i - 1].is_any(&[
                ".", "->", "?.", "new", "=", "(", "return", "await", "typeof", "throw", "yield",
            ])
        {
            return None;
        }
        let close = self.pair(i + 1)?;
        let mut q = close + 1;
        let limit = (close + 1 + MAX_QUALIFIER_TOKENS).min(self.code.len());
        while q < limit {
            let token = self.code[q];
            if token.is("{") {
                let body_close = self.pair(q)?;
                return Some(
                    Block::new(BlockKind::Function, i, i + 2..close, q + 1..body_close)
                        .named(Some(self.code[i].text.clone()))
                        .ending_at(body_close),
                );
            }
            if token.is("(") {
                q = self.pair(q)? + 1;
                continue;
            }
            let qualifier = matches!(
                token.kind,
                TokenKind::Identifier | TokenKind::Keyword
            ) && !token.is_any(self.profile.vocabulary.loop_keywords)
                || token.is_any(&[",", "::", "&", "&&", "*", "->", "<", ">", ":", "."]);
            if !qualifier || token.is_any(&["return", "new", "else"]) {
                return None;
            }
            q += 1;
        }
        None
    }

    /// Body of a loop: a `{}` block or one statement.
    /// Returns the body range and the index of its last token.
    fn block_or_statement(&self, start: usize) -> (Range<usize>, usize) {
        let n = self.code.len();
        if start >= n {
            return (n..n, n.saturating_sub(1));
        }
        if self.is(start, "{") {
            let close = self.pair(start).unwrap_or(n);
            return (start + 1..close, close.min(n - 1));
        }

        let mut depth = 0usize;
        for k in start..n {
            let token = self.code[k];
            if token.is_any(&["(", "[", "{"]) {
                depth += 1;
            } else if token.is_any(&[")", "]", "}"]) {
                if depth == 0 {
                    return (start..k, k.saturating_sub(1).max(start));
                }
                depth -= 1;
                let continues = self
                    .code
                    .get(k + 1)
                    .is_some_and(|next| next.is_any(&["else", "catch", "finally"]));
                if token.is("}") && depth == 0 && !continues {
                    return (start..k + 1, k);
                }
            } else if token.is(";") && depth == 0 {
                return (start..k + 1, k);
            }
        }
        (start..n, n - 1)
    }

    /// End (exclusive) of an expression-bodied lambda.
    fn expression_end(&self, start: usize) -> usize {
        let mut depth = 0usize;
        for k in start..self.code.len() {
            let token = self.code[k];
            if token.is_any(&["(", "[", "{"]) {
                depth += 1;
            } else if token.is_any(&[")", "]", "}"]) {
                if depth == 0 {
                    return k;
                }
                depth -= 1;
            } else if depth == 0 && token.is_any(&[";", ","]) {
                return k;
            }
        }
        self.code.len()
    }

    fn indented_blocks(&self) -> Vec<Block> {
        let mut blocks = Vec::new();
        for (i, token) in self.code.iter().enumerate() {
            if token.is_keyword("for") && self.depth[i] > 0 {
                blocks.extend(self.comprehension(i));
                continue;
            }
            let block = match token.text.as_str() {
                "for" | "while" if token.kind == TokenKind::Keyword => self
                    .header_colon(i + 1)
                    .map(|colon| {
                        Block::new(BlockKind::Loop, i, i + 1..colon, self.indented_body(i, colon))
                    }),
                "def" if token.kind == TokenKind::Keyword => self.python_def(i),
                "class" if token.kind == TokenKind::Keyword => {
                    let name = self.ident_at(i + 1);
                    self.header_colon(i + 1).map(|colon| {
                        Block::new(BlockKind::Class, i, i + 2..colon, self.indented_body(i, colon))
                            .named(name)
                    })
                }
                _ => None,
            };
            blocks.extend(block);
        }
        blocks
    }

    fn python_def(&self, i: usize) -> Option<Block> {
        let name = self.ident_at(i + 1)?;
        if !self.is(i + 2, "(") {
            return None;
        }
        let close = self.pair(i + 2)?;
        let colon = self.header_colon(close + 1)?;
        let body = self.indented_body(i, colon);
        Some(Block::new(BlockKind::Function, i, i + 3..close, body).named(Some(name)))
    }

    /// First `:` at the statement's bracket depth.
    fn header_colon(&self, from: usize) -> Option<usize> {
        let base = self.depth.get(from.saturating_sub(1)).copied().unwrap_or(0);
        (from..self.code.len())
            .find(|&k| self.depth[k] == base && self.code[k].is(":"))
    }

    fn indented_body(&self, header: usize, colon: usize) -> Range<usize> {
        let n = self.code.len();
        let start = colon + 1;
        let Some(first) = self.code.get(start) else {
            return n..n;
        };
        let colon_line = self.code[colon].end_line();
        if first.line == colon_line {
            let end = (start..n)
                .find(|&k| self.code[k].line > colon_line && self.depth[k] == 0)
                .unwrap_or(n);
            return start..end;
        }

        let base_indent = self.lines.indent(self.code[header].line);
        let end = (start..n)
            .find(|&k| {
                self.depth[k] == 0
                    && is_line_start(self.code, k)
                    && self.lines.indent(self.code[k].line) <= base_indent
            })
            .unwrap_or(n);
        start..end
    }

    /// `[x for x in xs if x]`: a loop over the enclosing bracket group.
    fn comprehension(&self, i: usize) -> Option<Block> {
        let open = (0..i)
            .rev()
            .find(|&k| self.code[k].is_any(&["(", "[", "{"]) && self.pair(k).is_some_and(|c| c > i))?;
        let close = self.pair(open)?;
        let header_end = (i + 1..close)
            .find(|&k| self.depth[k] == self.depth[i] && self.code[k].is_any(&["for", "if"]))
            .unwrap_or(close);
        let mut block =
            Block::new(BlockKind::Loop, i, i + 1..header_end, open + 1..close).ending_at(close);
        block.comprehension = true;
        Some(block)
    }

    fn indent_nesting(&self) -> usize {
        let mut stack: Vec<usize> = Vec::new();
        let mut deepest = 0;
        for k in 0..self.code.len() {
            if self.depth[k] != 0 || !is_line_start(self.code, k) {
                continue;
            }
            let indent = self.lines.indent(self.code[k].line);
            while stack.last().is_some_and(|&top| top >= indent) {
                stack.pop();
            }
            stack.push(indent);
            deepest = deepest.max(stack.len() - 1);
        }
        deepest
    }
}

fn is_line_start(code: &[&Token], index: usize) -> bool {
    index == 0 || code[index - 1].end_line() < code[index].line
}

fn bracket_depths(code: &[&Token], pairs: &[Option<usize>]) -> Vec<usize> {
    let mut depths = Vec::with_capacity(code.len());
    let mut depth = 0usize;
    for (index, token) in code.iter().enumerate() {
        let paired = pairs.get(index).copied().flatten().is_some();
        if paired && token.is_any(&[")", "]", "}"]) {
            depth = depth.saturating_sub(1);
        }
        depths.push(depth);
        if paired && token.is_any(&["(", "[", "{"]) {
            depth += 1;
        }
    }
    depths
}

fn brace_nesting(code: &[&Token]) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    for token in code {
        if token.is("{") {
            depth += 1;
            deepest = deepest.max(depth);
        } else if token.is("}") {
            depth = depth.saturating_sub(1);
        }
    }
    deepest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::syntax::Syntax;
    use crate::languages::ProfileRegistry;
    use crate::tokenizer::tokenize;
    use indoc::indoc;

    fn outline_of(source: &str, language: &str) -> (Outline, Vec<String>) {
        let registry = ProfileRegistry::builtin();
        let profile = registry.get(language).unwrap();
        let stream = tokenize(source, profile);
        let lines = LineIndex::new(source);
        let syntax = Syntax::new(&stream.tokens, &lines, profile);
        let texts = syntax.code.iter().map(|t| t.text.clone()).collect();
        (syntax.outline.clone(), texts)
    }

    fn names(outline: &Outline, kind: BlockKind) -> Vec<Option<String>> {
        outline
            .blocks
            .iter()
            .filter(|b| b.kind == kind)
            .map(|b| b.name.clone())
            .collect()
    }

    #[test]
    fn test_javascript_function_and_loop() {
        let source = indoc! {"
            function binarySearch(arr, target) {
              let left = 0;
              while (left <= target) {
                left++;
              }
              return -1;
            }
        "};
        let (outline, texts) = outline_of(source, "javascript");
        assert_eq!(names(&outline, BlockKind::Function), vec![Some("binarySearch".to_string())]);
        let (loop_index, loop_block) = outline.loops().next().unwrap();
        assert_eq!(texts[loop_block.header.clone()].join(" "), "left <= target");
        assert_eq!(loop_block.line, 3);
        assert_eq!(loop_block.end_line, 5);
        assert_eq!(loop_block.parent, Some(0));
        assert_eq!(outline.ancestors(loop_index).collect::<Vec<_>>(), vec![0]);
        assert_eq!(outline.max_nesting, 2);
    }

    #[test]
    fn test_arrow_functions_take_assigned_name() {
        let source = "const square = (x) => x * x;\nconst inc = async n => { return n + 1; };";
        let (outline, _) = outline_of(source, "javascript");
        assert_eq!(
            names(&outline, BlockKind::Function),
            vec![Some("square".to_string()), Some("inc".to_string())]
        );
    }

    #[test]
    fn test_calls_are_not_functions() {
        let source = "foo(a, b);\nobj.run(x) ;\nsetTimeout(function () { tick(); }, 10);";
        let (outline, _) = outline_of(source, "javascript");
        assert_eq!(names(&outline, BlockKind::Function), vec![None]);
    }

    #[test]
    fn test_statement_bodied_loops() {
        let source = "for (int i = 0; i < n; i++)\n  for (int j = 0; j < n; j++)\n    total += i * j;\nreturn total;";
        let (outline, texts) = outline_of(source, "java");
        let loops: Vec<&Block> = outline.loops().map(|(_, b)| b).collect();
        assert_eq!(loops.len(), 2);
        assert_eq!(loops[1].parent, Some(0));
        assert_eq!(texts[loops[0].body.clone()].last().map(String::as_str), Some(";"));
        assert!(!texts[loops[0].body.clone()].contains(&"return".to_string()));
    }

    #[test]
    fn test_do_while_is_one_loop() {
        let source = "do { i++; } while (i < n);";
        let (outline, texts) = outline_of(source, "cpp");
        let loops: Vec<&Block> = outline.loops().map(|(_, b)| b).collect();
        assert_eq!(loops.len(), 1);
        assert_eq!(texts[loops[0].header.clone()].join(" "), "i < n");
    }

    #[test]
    fn test_cpp_class_with_constructor() {
        let source = indoc! {"
            struct Node {
                int val;
                Node* next;
                Node(int v) : val(v), next(nullptr) {}
            };
        "};
        let (outline, _) = outline_of(source, "cpp");
        assert_eq!(names(&outline, BlockKind::Class), vec![Some("Node".to_string())]);
        let (_, ctor) = outline.functions().next().unwrap();
        assert_eq!(ctor.name.as_deref(), Some("Node"));
        assert_eq!(ctor.parent, Some(0));
    }

    #[test]
    fn test_python_indented_blocks() {
        let source = indoc! {"
            def total(rows):
                result = 0
                for row in rows:
                    for value in row:
                        result += value
                return result

            print(total([[1]]))
        "};
        let (outline, texts) = outline_of(source, "python");
        let (_, function) = outline.functions().next().unwrap();
        assert_eq!(function.name.as_deref(), Some("total"));
        assert_eq!(function.end_line, 6);
        let loops: Vec<&Block> = outline.loops().map(|(_, b)| b).collect();
        assert_eq!(loops.len(), 2);
        assert_eq!(texts[loops[0].header.clone()].join(" "), "row in rows");
        assert_eq!(loops[1].parent, Some(1));
        assert_eq!(outline.max_nesting, 3);
    }

    #[test]
    fn test_python_comprehension_loop() {
        let (outline, texts) = outline_of("squares = [x * x for x in values if x]", "python");
        let (_, block) = outline.loops().next().unwrap();
        assert!(block.comprehension);
        assert_eq!(texts[block.header.clone()].join(" "), "x in values");
        assert_eq!(texts[block.body.clone()].first().map(String::as_str), Some("x"));
    }

    #[test]
    fn test_single_line_python_body() {
        let (outline, _) = outline_of("while x: x -= 1\ny = 2", "python");
        let (_, block) = outline.loops().next().unwrap();
        assert_eq!(block.end_line, 1);
    }
}
