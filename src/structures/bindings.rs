//! Variable bindings, recognised per declaration style.

use crate::core::syntax::Syntax;
use crate::core::types::{StructureCategory, StructureMatch, TokenKind};
use crate::core::BlockKind;
use crate::languages::DeclarationStyle;
use std::collections::{BTreeSet, HashSet};

/// Tokens that may follow a declared name in a typed declaration.
const TYPED_NAME_FOLLOWERS: &[&str] = &["=", ";", ",", ")", ":", "[", "{"];

/// Indices of identifier tokens that introduce a variable.
pub fn binding_sites(syntax: &Syntax<'_>) -> BTreeSet<usize> {
    let mut sites = BTreeSet::new();
    parameter_sites(syntax, &mut sites);
    match syntax.profile.declaration_style {
        DeclarationStyle::Keyword => keyword_sites(syntax, &mut sites),
        DeclarationStyle::Assignment => assignment_sites(syntax, &mut sites),
        DeclarationStyle::Typed => typed_sites(syntax, &mut sites),
    }
    sites
}

pub fn variable_matches(syntax: &Syntax<'_>) -> Vec<StructureMatch> {
    binding_sites(syntax)
        .into_iter()
        .filter_map(|index| syntax.get(index))
        .map(|token| StructureMatch {
            category: StructureCategory::Variable,
            line: token.line,
        })
        .collect()
}

/// Function parameters. Typed parameters (`int k)`) are found by the
/// typed declaration scan instead.
fn parameter_sites(syntax: &Syntax<'_>, sites: &mut BTreeSet<usize>) {
    let style = syntax.profile.declaration_style;
    if style == DeclarationStyle::Typed {
        return;
    }
    let self_names = syntax.profile.vocabulary.self_names;
    for (_, function) in syntax.outline.functions() {
        let mut groups: Vec<&str> = Vec::new();
        for k in function.header.clone() {
            let Some(token) = syntax.get(k) else { continue };
            if token.is_any(&["(", "[", "{"]) {
                groups.push(token.text.as_str());
                continue;
            }
            if token.is_any(&[")", "]", "}"]) {
                groups.pop();
                continue;
            }
            if !token.is_ident() || token.is_any(self_names) {
                continue;
            }
            let opens_param = k == function.header.start
                || syntax
                    .prev(k)
                    .is_some_and(|p| p.is_any(&[",", "...", "*", "**", "(", "[", "{", ":"]));
            let bound = match style {
                // `def f(n: int, xs: List[int])`
                DeclarationStyle::Assignment => {
                    groups.is_empty() && !syntax.prev(k).is_some_and(|p| p.is(":"))
                }
                // Destructuring patterns only; `{ key: name }` binds `name`
                _ => groups.iter().all(|g| *g != "(") && !syntax.is_at(k + 1, ":"),
            };
            if opens_param && bound {
                sites.insert(k);
            }
        }
    }
}

fn keyword_sites(syntax: &Syntax<'_>, sites: &mut BTreeSet<usize>) {
    let binding_keywords = syntax.profile.vocabulary.binding_keywords;
    for i in 0..syntax.len() {
        let token = syntax.code[i];
        if token.kind != TokenKind::Keyword || !token.is_any(binding_keywords) {
            continue;
        }
        let mut j = i + 1;
        loop {
            match syntax.get(j) {
                Some(t) if t.is_ident() => {
                    sites.insert(j);
                    j += 1;
                }
                Some(t) if t.is_any(&["[", "{"]) => {
                    let Some(close) = syntax.partner(j) else { break };
                    destructured_names(syntax, j + 1, close, sites);
                    j = close + 1;
                }
                _ => break,
            }
            match next_declarator(syntax, j) {
                Some(next) => j = next,
                None => break,
            }
        }
    }
}

/// `{a, b: c, ...rest}` / `[x, , y]`: names bound by a destructuring pattern.
fn destructured_names(syntax: &Syntax<'_>, start: usize, end: usize, sites: &mut BTreeSet<usize>) {
    for k in start..end {
        let Some(token) = syntax.get(k) else { continue };
        let bound = token.is_ident()
            && syntax
                .prev(k)
                .is_some_and(|p| p.is_any(&["{", "[", ",", ":", "..."]))
            && !syntax.is_at(k + 1, ":");
        if bound {
            sites.insert(k);
        }
    }
}

/// Skips an initializer; returns the index after a top-level `,` when
/// another declarator follows.
fn next_declarator(syntax: &Syntax<'_>, from: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut k = from;
    while let Some(token) = syntax.get(k) {
        if token.is_any(&["(", "[", "{"]) {
            depth += 1;
        } else if token.is_any(&[")", "]", "}"]) {
            if depth == 0 {
                return None;
            }
            depth -= 1;
        } else if depth == 0 {
            if token.is(",") {
                return Some(k + 1);
            }
            if token.is(";") || (k > from && syntax.starts_line(k) && ends_statement(syntax, k)) {
                return None;
            }
        }
        k += 1;
    }
    None
}

/// The line break before `k` terminates the statement (no trailing operator).
fn ends_statement(syntax: &Syntax<'_>, k: usize) -> bool {
    syntax
        .prev(k)
        .is_none_or(|p| !matches!(p.kind, TokenKind::Operator) && !p.is(","))
}

fn assignment_sites(syntax: &Syntax<'_>, sites: &mut BTreeSet<usize>) {
    let mut seen: HashSet<(Option<usize>, String)> = HashSet::new();
    let mut candidates = BTreeSet::new();

    for k in 0..syntax.len() {
        // Keyword arguments on continuation lines follow `(` or `,`
        let continuation = syntax
            .prev(k)
            .is_some_and(|p| p.is_any(&["(", "[", "{", ","]));
        if syntax.starts_line(k) && !continuation {
            assignment_targets(syntax, k, &mut candidates);
        }
        let token = syntax.code[k];
        if token.is_keyword("as") && syntax.get(k + 1).is_some_and(|t| t.is_ident()) {
            candidates.insert(k + 1);
        }
        if token.is_ident() && syntax.is_at(k + 1, ":=") {
            candidates.insert(k);
        }
    }
    for (_, block) in syntax.outline.loops() {
        if !syntax.get(block.start).is_some_and(|t| t.is_keyword("for")) {
            continue;
        }
        for k in block.header.clone() {
            match syntax.get(k) {
                Some(t) if t.is_keyword("in") => break,
                Some(t) if t.is_ident() => {
                    candidates.insert(k);
                }
                _ => {}
            }
        }
    }

    // Parameters already bind in their function's scope
    for &k in sites.iter() {
        if let Some(token) = syntax.get(k) {
            seen.insert((scope_of(syntax, k), token.text.clone()));
        }
    }
    for k in candidates {
        let Some(token) = syntax.get(k) else { continue };
        if seen.insert((scope_of(syntax, k), token.text.clone())) {
            sites.insert(k);
        }
    }
}

/// `a, b = ...` and `x: int = ...` at the start of a logical line.
fn assignment_targets(syntax: &Syntax<'_>, start: usize, candidates: &mut BTreeSet<usize>) {
    let mut names = Vec::new();
    let mut k = start;
    loop {
        match syntax.get(k) {
            Some(t) if t.is_ident() => names.push(k),
            _ => return,
        }
        match syntax.get(k + 1) {
            Some(t) if t.is(",") => k += 2,
            Some(t) if t.is("=") => break,
            Some(t) if t.is(":") && names.len() == 1 => {
                let annotated = (k + 2..syntax.len())
                    .take_while(|&j| !syntax.starts_line(j) || j == k + 2)
                    .any(|j| syntax.is_at(j, "="));
                if annotated {
                    break;
                }
                return;
            }
            _ => return,
        }
    }
    candidates.extend(names);
}

fn scope_of(syntax: &Syntax<'_>, position: usize) -> Option<usize> {
    let function = syntax.outline.enclosing_function(position);
    // Parameters sit in the header, outside the body
    function.or_else(|| {
        syntax
            .outline
            .functions()
            .find(|(_, f)| f.header.contains(&position))
            .map(|(index, _)| index)
    })
}

fn typed_sites(syntax: &Syntax<'_>, sites: &mut BTreeSet<usize>) {
    for k in 1..syntax.len() {
        if sites.contains(&k) || !is_typed_name(syntax, k) {
            continue;
        }
        sites.insert(k);
        let mut j = k + 1;
        while let Some(next) = next_declarator(syntax, j) {
            let follows = syntax
                .get(next + 1)
                .is_some_and(|t| t.is_any(TYPED_NAME_FOLLOWERS));
            match syntax.get(next) {
                Some(t) if t.is_ident() && follows && !in_parameter_list(syntax, next) => {
                    sites.insert(next);
                    j = next + 1;
                }
                _ => break,
            }
        }
    }
}

fn in_parameter_list(syntax: &Syntax<'_>, k: usize) -> bool {
    syntax
        .outline
        .blocks
        .iter()
        .any(|b| b.kind == BlockKind::Function && b.header.contains(&k))
}

/// `T name` followed by `= ; , ) : [ {`.
fn is_typed_name(syntax: &Syntax<'_>, k: usize) -> bool {
    let Some(name) = syntax.get(k) else {
        return false;
    };
    let follows = syntax
        .get(k + 1)
        .is_some_and(|t| t.is_any(TYPED_NAME_FOLLOWERS));
    if !name.is_ident() || !follows {
        return false;
    }
    let Some(prev) = syntax.prev(k) else {
        return false;
    };
    let profile = syntax.profile;
    if prev.kind == TokenKind::Keyword {
        return profile.is_type_keyword(&prev.text);
    }
    if prev.is_ident() {
        return true;
    }
    if prev.is_any(&[">", ">>"]) {
        return closes_generic(syntax, k - 1);
    }
    if prev.is_any(&["*", "&", "&&"]) {
        return k >= 2 && is_pointee_type(syntax, k - 2);
    }
    if prev.is("]") {
        return k >= 2 && syntax.is_at(k - 2, "[");
    }
    false
}

fn is_pointee_type(syntax: &Syntax<'_>, k: usize) -> bool {
    let Some(token) = syntax.get(k) else {
        return false;
    };
    if token.kind == TokenKind::Keyword {
        return syntax.profile.is_type_keyword(&token.text);
    }
    if token.is_any(&[">", ">>"]) {
        return closes_generic(syntax, k);
    }
    token.is_ident()
        && (token.text.starts_with(|c: char| c.is_uppercase())
            || syntax.prev(k).is_some_and(|p| p.is_any(&["::", "const"])))
}

/// Whether the `>` at `close` ends `Ident<...>`.
fn closes_generic(syntax: &Syntax<'_>, close: usize) -> bool {
    let mut depth = 0i32;
    let mut k = close;
    loop {
        let Some(token) = syntax.get(k) else {
            return false;
        };
        match token.text.as_str() {
            ">" => depth += 1,
            ">>" => depth += 2,
            "<" => depth -= 1,
            ";" | "{" | "}" | "&&" | "||" | "=" | "(" | ")" => return false,
            _ => {}
        }
        if depth <= 0 {
            return k > 0 && syntax.get(k - 1).is_some_and(|t| t.is_ident());
        }
        if k == 0 {
            return false;
        }
        k -= 1;
    }
}
