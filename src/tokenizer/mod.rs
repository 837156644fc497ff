//! Language-aware lexer.
//!
//! Tokenization never fails. Unterminated strings and block comments are
//! recorded on the returned [`TokenStream`] and lexing resumes after the
//! damaged region, so the later stages still see every intact token.

use crate::core::errors::{AnalysisError, MalformedInput, MalformedKind};
use crate::core::types::{Token, TokenKind};
use crate::languages::{LanguageProfile, LexicalRules, StringPrefixes};

const PUNCTUATION: &[char] = &['(', ')', '{', '}', '[', ']', ',', ';', '.', ':'];
/// Longest C++ raw string delimiter
const MAX_RAW_DELIMITER: usize = 16;

/// Keywords after which a `/` starts a regular expression literal.
const REGEX_PRECEDING_KEYWORDS: &[&str] = &[
    "return", "typeof", "case", "do", "else", "in", "of", "new", "delete", "void", "throw",
    "yield", "await", "instanceof",
];

/// Tokens in source order plus any recoverable damage found on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    pub tokens: Vec<Token>,
    pub malformed: Vec<MalformedInput>,
}

impl TokenStream {
    pub fn is_partial(&self) -> bool {
        !self.malformed.is_empty()
    }

    /// Strict view: the tokens, or the first malformed region as an error.
    pub fn into_result(self) -> Result<Vec<Token>, AnalysisError> {
        match self.malformed.first() {
            Some(malformed) => Err(AnalysisError::MalformedInput(*malformed)),
            None => Ok(self.tokens),
        }
    }
}

/// Splits `source` into tokens using the lexical rules of `profile`.
pub fn tokenize(source: &str, profile: &LanguageProfile) -> TokenStream {
    let mut lexer = Lexer::new(source, &profile.lexical);
    lexer.run();
    log::debug!(
        "Tokenized {} chars of {} into {} tokens ({} malformed regions)",
        source.len(),
        profile.name,
        lexer.tokens.len(),
        lexer.malformed.len()
    );
    TokenStream {
        tokens: lexer.tokens,
        malformed: lexer.malformed,
    }
}

struct Lexer<'r> {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    rules: &'r LexicalRules,
    tokens: Vec<Token>,
    malformed: Vec<MalformedInput>,
}

impl<'r> Lexer<'r> {
    fn new(source: &str, rules: &'r LexicalRules) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            rules,
            tokens: Vec::new(),
            malformed: Vec::new(),
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn starts_with(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(i, c)| self.peek(i) == Some(c))
    }

    fn text_from(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    fn push(&mut self, kind: TokenKind, start: usize, line: usize) {
        let text = self.text_from(start);
        self.tokens.push(Token::new(kind, text, line));
    }

    fn record(&mut self, kind: MalformedKind, line: usize) {
        self.malformed.push(MalformedInput { kind, line });
    }

    fn run(&mut self) {
        while let Some(c) = self.peek(0) {
            if c == '\n' {
                self.line += 1;
                self.pos += 1;
            } else if c.is_whitespace() {
                self.pos += 1;
            } else if c == '\\' && self.peek(1) == Some('\n') {
                self.pos += 2;
                self.line += 1;
            } else if self.rules.line_comments.iter().any(|m| self.starts_with(m)) {
                self.line_comment();
            } else if let Some((open, close)) = self
                .rules
                .block_comment
                .filter(|(open, _)| self.starts_with(open))
            {
                self.block_comment(open, close);
            } else if let Some((prefix_len, raw)) = self.string_prefix() {
                self.string(prefix_len, raw);
            } else if self.is_quote(c) {
                self.string(0, false);
            } else if c.is_ascii_digit()
                || (c == '.' && self.peek(1).is_some_and(|n| n.is_ascii_digit()))
            {
                self.number();
            } else if self.is_ident_start(c) {
                self.identifier();
            } else if c == '/' && self.rules.regex_literals && self.operand_expected() {
                if !self.regex() {
                    self.operator();
                }
            } else {
                self.operator();
            }
        }
    }

    fn is_quote(&self, c: char) -> bool {
        self.rules.quotes.contains(&c) || self.rules.multiline_quotes.contains(&c)
    }

    fn is_ident_start(&self, c: char) -> bool {
        c.is_alphabetic() || c == '_' || self.rules.identifier_chars.contains(&c)
    }

    fn is_ident_char(&self, c: char) -> bool {
        c.is_alphanumeric() || c == '_' || self.rules.identifier_chars.contains(&c)
    }

    fn line_comment(&mut self) {
        let start = self.pos;
        while self.peek(0).is_some_and(|c| c != '\n') {
            self.pos += 1;
        }
        self.push(TokenKind::Comment, start, self.line);
    }

    fn block_comment(&mut self, open: &str, close: &str) {
        let (start, line) = (self.pos, self.line);
        self.pos += open.chars().count();
        loop {
            match self.peek(0) {
                None => {
                    self.record(MalformedKind::UnterminatedComment, line);
                    break;
                }
                Some(_) if self.starts_with(close) => {
                    self.pos += close.chars().count();
                    break;
                }
                Some('\n') => {
                    self.line += 1;
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }
        self.push(TokenKind::Comment, start, line);
    }

    /// Length of a string prefix at the cursor and whether it makes the
    /// literal raw (`R"x(...)x"`).
    fn string_prefix(&self) -> Option<(usize, bool)> {
        let is_quote_at = |offset: usize| self.peek(offset).is_some_and(|c| self.is_quote(c));
        match self.rules.prefixes {
            StringPrefixes::None => None,
            StringPrefixes::Python => {
                let letters = |offset: usize| {
                    self.peek(offset)
                        .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'r' | 'b' | 'u' | 'f'))
                };
                if !letters(0) {
                    return None;
                }
                if is_quote_at(1) {
                    return Some((1, false));
                }
                let pair: String = [self.peek(0), self.peek(1)]
                    .iter()
                    .flatten()
                    .map(|c| c.to_ascii_lowercase())
                    .collect();
                let valid = matches!(pair.as_str(), "rb" | "br" | "fr" | "rf");
                (valid && is_quote_at(2)).then_some((2, false))
            }
            StringPrefixes::Cpp => {
                let encoding = ["u8", "u", "U", "L"]
                    .iter()
                    .find(|p| self.starts_with(p))
                    .map_or(0, |p| p.len());
                let raw = self.peek(encoding) == Some('R');
                let len = encoding + usize::from(raw);
                let quote = self.peek(len);
                let valid = len > 0 && (quote == Some('"') || (!raw && quote == Some('\'')));
                valid.then_some((len, raw))
            }
        }
    }

    fn string(&mut self, prefix_len: usize, raw: bool) {
        let (start, line) = (self.pos, self.line);
        self.pos += prefix_len;
        if raw && self.raw_string(start, line) {
            return;
        }

        let Some(quote) = self.peek(0) else {
            return;
        };
        let triple = self.rules.triple_quotes
            && self.peek(1) == Some(quote)
            && self.peek(2) == Some(quote);
        let multiline = triple || self.rules.multiline_quotes.contains(&quote);
        self.pos += if triple { 3 } else { 1 };

        loop {
            match self.peek(0) {
                None => {
                    self.record(MalformedKind::UnterminatedString, line);
                    break;
                }
                Some('\\') => {
                    if self.peek(1) == Some('\n') {
                        self.line += 1;
                    }
                    self.pos = (self.pos + 2).min(self.chars.len());
                }
                Some('\n') if !multiline => {
                    self.record(MalformedKind::UnterminatedString, line);
                    break;
                }
                Some('\n') => {
                    self.line += 1;
                    self.pos += 1;
                }
                Some(c) if c == quote => {
                    if !triple {
                        self.pos += 1;
                        break;
                    }
                    if self.peek(1) == Some(quote) && self.peek(2) == Some(quote) {
                        self.pos += 3;
                        break;
                    }
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }

        let docstring = triple && self.rules.docstrings && self.opens_line(line);
        let kind = if docstring {
            TokenKind::Comment
        } else {
            TokenKind::Literal
        };
        self.push(kind, start, line);
    }

    /// `R"delim( ... )delim"`. Returns false when no delimiter opener was
    /// found, leaving the cursor on the quote.
    fn raw_string(&mut self, start: usize, line: usize) -> bool {
        let quote_pos = self.pos;
        let delimiter: String = self.chars[quote_pos + 1..]
            .iter()
            .take(MAX_RAW_DELIMITER + 1)
            .take_while(|&&c| c != '(' && c != '"' && !c.is_whitespace())
            .collect();
        let open = quote_pos + 1 + delimiter.chars().count();
        if self.chars.get(open) != Some(&'(') {
            return false;
        }

        let terminator = format!("){}\"", delimiter);
        self.pos = open + 1;
        loop {
            match self.peek(0) {
                None => {
                    self.record(MalformedKind::UnterminatedString, line);
                    break;
                }
                Some(_) if self.starts_with(&terminator) => {
                    self.pos += terminator.chars().count();
                    break;
                }
                Some('\n') => {
                    self.line += 1;
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }
        self.push(TokenKind::Literal, start, line);
        true
    }

    /// No earlier token ends on `line`.
    fn opens_line(&self, line: usize) -> bool {
        self.tokens.last().is_none_or(|t| t.end_line() < line)
    }

    fn number(&mut self) {
        let (start, line) = (self.pos, self.line);
        let radix_prefix = self.peek(0) == Some('0')
            && self
                .peek(1)
                .is_some_and(|c| matches!(c, 'x' | 'X' | 'b' | 'B' | 'o' | 'O'));
        if radix_prefix {
            self.pos += 2;
        } else if self.peek(0) == Some('.') {
            self.pos += 1;
        }
        while let Some(c) = self.peek(0) {
            let next_is_alnum = self.peek(1).is_some_and(|n| n.is_ascii_alphanumeric());
            let next_is_digit = self.peek(1).is_some_and(|n| n.is_ascii_digit());
            let prev = self.pos.checked_sub(1).and_then(|p| self.chars.get(p).copied());
            let exponent_sign = !radix_prefix
                && matches!(c, '+' | '-')
                && matches!(prev, Some('e' | 'E'))
                && next_is_digit;
            let accept = c.is_ascii_alphanumeric()
                || c == '_'
                || (c == '.'
                    && (next_is_digit || !next_is_alnum)
                    && !self.text_from(start).contains('.')
                    && self.peek(1) != Some('.'))
                || (Some(c) == self.rules.digit_separator && next_is_alnum)
                || exponent_sign;
            if !accept {
                break;
            }
            self.pos += 1;
        }
        self.push(TokenKind::Literal, start, line);
    }

    fn identifier(&mut self) {
        let start = self.pos;
        while self.peek(0).is_some_and(|c| self.is_ident_char(c)) {
            self.pos += 1;
        }
        let text = self.text_from(start);
        let kind = if self.rules.literal_words.contains(text.as_str()) {
            TokenKind::Literal
        } else if self.rules.keywords.contains(text.as_str()) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.tokens.push(Token::new(kind, text, self.line));
    }

    fn operand_expected(&self) -> bool {
        let Some(prev) = self.tokens.iter().rev().find(|t| !t.is_comment()) else {
            return true;
        };
        match prev.kind {
            TokenKind::Operator => !matches!(prev.text.as_str(), "++" | "--"),
            TokenKind::Punctuation => !matches!(prev.text.as_str(), ")" | "]" | "}"),
            TokenKind::Keyword => REGEX_PRECEDING_KEYWORDS.contains(&prev.text.as_str()),
            _ => false,
        }
    }

    /// `/pattern/flags`. Returns false (cursor unchanged) when the line ends
    /// before the closing slash.
    fn regex(&mut self) -> bool {
        let (start, line) = (self.pos, self.line);
        let mut cursor = self.pos + 1;
        let mut in_class = false;
        loop {
            match self.chars.get(cursor) {
                None | Some('\n') => return false,
                Some('\\') => cursor += 2,
                Some('[') => {
                    in_class = true;
                    cursor += 1;
                }
                Some(']') => {
                    in_class = false;
                    cursor += 1;
                }
                Some('/') if !in_class => {
                    cursor += 1;
                    break;
                }
                Some(_) => cursor += 1,
            }
        }
        while self.chars.get(cursor).is_some_and(|c| c.is_ascii_alphabetic()) {
            cursor += 1;
        }
        self.pos = cursor;
        self.push(TokenKind::Literal, start, line);
        true
    }

    fn operator(&mut self) {
        let (start, line) = (self.pos, self.line);
        let matched = self.rules.operators.iter().find(|op| self.starts_with(op)).copied();
        if let Some(op) = matched {
            self.pos += op.chars().count();
            self.push(TokenKind::Operator, start, line);
            return;
        }
        let c = self.chars[self.pos];
        self.pos += 1;
        let kind = if PUNCTUATION.contains(&c) {
            TokenKind::Punctuation
        } else {
            TokenKind::Operator
        };
        self.push(kind, start, line);
    }
}
