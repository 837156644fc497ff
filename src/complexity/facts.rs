//! Control-flow facts extracted once from the syntax view.
//!
//! Loops are classified by how their control variables move, recursive
//! functions by how their self-calls shrink the input. The rule tables in
//! the parent module read only these facts.

use crate::core::naming::name_words;
use crate::core::outline::{Block, BlockKind};
use crate::core::syntax::Syntax;
use crate::core::types::{ComplexityClass, StructureCategory, StructureSummary, Token, TokenKind};
use crate::languages::{GRAPH_FIELDS, GRAPH_WORDS, LIST_FIELDS, QUEUE_WORDS, STACK_WORDS, TREE_FIELDS};
use std::collections::HashSet;

/// Compound assignments that scale a variable geometrically.
const SCALING_UPDATES: &[&str] = &["*=", "/=", "//=", ">>=", ">>>=", "<<="];
/// Binary operators that divide when followed by a numeric literal.
const HALVING_OPERATORS: &[&str] = &["/", "//", ">>", ">>>"];
const MEMO_WORDS: &[&str] = &["memo", "cache", "memoization", "cached"];
const MEMO_DECORATORS: &[&str] = &["lru_cache", "cache"];
/// Tokens searched before a `def` for a memoising decorator.
const DECORATOR_LOOKBACK: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    /// Bounded by a literal, independent of input size
    Constant,
    /// Control variable scaled or bisected each iteration
    Halving,
    Linear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopFact {
    /// Index into the outline's blocks
    pub block: usize,
    pub kind: LoopKind,
    pub control: Option<String>,
    /// Size-dependent loops nested at this point, this one included
    pub depth: usize,
    /// Nearest enclosing linear loop
    pub within_linear: Option<usize>,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionKind {
    /// One self-call on half the range per activation
    Halving,
    /// Several halved self-calls plus linear work per level
    DivideAndConquer,
    /// Several self-calls over linked structure fields
    Traversal,
    /// Several self-calls, or a self-call inside a loop
    Branching,
    Linear,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecursionFact {
    pub block: usize,
    pub name: String,
    pub kind: RecursionKind,
    pub calls: usize,
    pub in_loop: bool,
    pub memoized: bool,
    /// A path without a self-call exits the function
    pub has_base_case: bool,
    pub line: usize,
}

impl RecursionFact {
    /// Depth of the call stack this recursion builds.
    pub fn depth_class(&self) -> ComplexityClass {
        match self.kind {
            RecursionKind::Halving | RecursionKind::DivideAndConquer => {
                ComplexityClass::Logarithmic
            }
            _ => ComplexityClass::Linear,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub position: usize,
    pub line: usize,
    pub class: ComplexityClass,
}

/// Everything the time and space rules consult.
#[derive(Debug, Clone, Default)]
pub struct ControlFlow {
    pub loops: Vec<LoopFact>,
    pub recursion: Vec<RecursionFact>,
    /// Positions of sort calls
    pub sorts: Vec<usize>,
    /// Positions of linear library calls
    pub scans: Vec<usize>,
    pub allocations: Vec<Allocation>,
    /// Collection growth inside a linear loop or a recursive function
    pub growth: Vec<usize>,
    /// Linear or sort call inside the body of a linear loop
    pub scan_in_loop: Option<usize>,
    /// Halving loop, or call to a halving function, inside a linear loop
    pub halving_in_linear: bool,
    /// Worklist loop (queue or stack driven) iterating adjacency lists
    pub worklist_traversal: bool,
    /// Deepest nesting of size-dependent loops
    pub max_depth: usize,
}

impl ControlFlow {
    pub fn extract(syntax: &Syntax<'_>, structures: &[StructureSummary]) -> Self {
        let mut flow = Self {
            loops: classify_loops(syntax),
            sorts: call_sites(syntax, syntax.profile.vocabulary.sort_calls, true),
            scans: call_sites(syntax, syntax.profile.vocabulary.linear_calls, false),
            allocations: allocations(syntax),
            ..Self::default()
        };
        flow.max_depth = flow.loops.iter().map(|l| l.depth).max().unwrap_or(0);

        let linked = structures.iter().any(|s| {
            matches!(
                s.name,
                StructureCategory::Tree | StructureCategory::Graph | StructureCategory::List
            )
        });
        let linear_helpers = flow.functions_with_linear_work(syntax);
        flow.recursion = syntax
            .outline
            .functions()
            .filter_map(|(index, block)| {
                recursion_fact(syntax, &flow, index, block, linked, &linear_helpers)
            })
            .collect();

        flow.growth = growth_sites(syntax, &flow);
        flow.scan_in_loop = flow
            .scans
            .iter()
            .chain(&flow.sorts)
            .copied()
            .filter(|&p| flow.linear_loop_around(syntax, p).is_some())
            .min();
        flow.halving_in_linear = flow.halving_inside_linear(syntax);
        flow.worklist_traversal = flow.has_worklist_traversal(syntax);

        log::debug!(
            "Control flow: {} loops (max depth {}), {} recursive functions, {} scans, {} sorts",
            flow.loops.len(),
            flow.max_depth,
            flow.recursion.len(),
            flow.scans.len(),
            flow.sorts.len()
        );
        flow
    }

    pub fn linear_loops(&self) -> impl Iterator<Item = &LoopFact> {
        self.loops.iter().filter(|l| l.kind == LoopKind::Linear)
    }

    pub fn halving_loops(&self) -> impl Iterator<Item = &LoopFact> {
        self.loops.iter().filter(|l| l.kind == LoopKind::Halving)
    }

    pub fn recursion_of(&self, kind: RecursionKind) -> Option<&RecursionFact> {
        self.recursion.iter().find(|r| r.kind == kind)
    }

    /// Any work proportional to the input outside halving patterns.
    pub fn has_linear_work(&self) -> bool {
        self.linear_loops().next().is_some()
            || !self.scans.is_empty()
            || !self.sorts.is_empty()
            || !self.allocations.is_empty()
            || self.recursion.iter().any(|r| r.kind != RecursionKind::Halving)
    }

    /// Largest auxiliary allocation class, if any.
    pub fn auxiliary_class(&self) -> Option<ComplexityClass> {
        let allocated = self.allocations.iter().map(|a| a.class).max();
        let grown = (!self.growth.is_empty()).then_some(ComplexityClass::Linear);
        allocated.max(grown)
    }

    /// Deepest recursion by call-stack class.
    pub fn deepest_recursion(&self) -> Option<&RecursionFact> {
        self.recursion
            .iter()
            .rev()
            .max_by_key(|r| r.depth_class())
    }

    /// Innermost linear loop whose body contains `position`.
    fn linear_loop_around(&self, syntax: &Syntax<'_>, position: usize) -> Option<usize> {
        syntax
            .outline
            .enclosing_loops(position)
            .into_iter()
            .filter(|&b| syntax.outline.blocks[b].body.contains(&position))
            .find(|&b| self.kind_of(b) == Some(LoopKind::Linear))
    }

    fn kind_of(&self, block: usize) -> Option<LoopKind> {
        self.loops.iter().find(|l| l.block == block).map(|l| l.kind)
    }

    /// Names of functions that do linear work in their own body.
    fn functions_with_linear_work(&self, syntax: &Syntax<'_>) -> HashSet<String> {
        syntax
            .outline
            .functions()
            .filter(|(_, block)| self.linear_work_in(syntax, block, &HashSet::new()))
            .filter_map(|(_, block)| block.name.clone())
            .collect()
    }

    fn linear_work_in(&self, syntax: &Syntax<'_>, function: &Block, helpers: &HashSet<String>) -> bool {
        let body = &function.body;
        self.linear_loops()
            .any(|l| body.contains(&syntax.outline.blocks[l.block].start))
            || self.scans.iter().chain(&self.sorts).any(|p| body.contains(p))
            || self.allocations.iter().any(|a| body.contains(&a.position))
            || body.clone().any(|k| {
                syntax.get(k).is_some_and(|t| t.is_ident() && helpers.contains(&t.text))
                    && syntax.is_at(k + 1, "(")
                    && function.name.as_deref() != syntax.get(k).map(|t| t.text.as_str())
            })
    }

    fn halving_inside_linear(&self, syntax: &Syntax<'_>) -> bool {
        if self.halving_loops().any(|l| l.within_linear.is_some()) {
            return true;
        }
        let halving_functions: HashSet<&str> = syntax
            .outline
            .functions()
            .filter(|(index, block)| {
                self.halving_loops()
                    .any(|l| block.body.contains(&syntax.outline.blocks[l.block].start))
                    || self
                        .recursion
                        .iter()
                        .any(|r| r.block == *index && r.kind == RecursionKind::Halving)
            })
            .filter_map(|(_, block)| block.name.as_deref())
            .collect();
        (0..syntax.len()).any(|k| {
            syntax
                .get(k)
                .is_some_and(|t| t.is_ident() && halving_functions.contains(t.text.as_str()))
                && syntax.is_at(k + 1, "(")
                && self.linear_loop_around(syntax, k).is_some()
        })
    }

    fn has_worklist_traversal(&self, syntax: &Syntax<'_>) -> bool {
        self.linear_loops().any(|inner| {
            let Some(outer) = inner.within_linear else {
                return false;
            };
            let blocks = &syntax.outline.blocks;
            header_mentions(syntax, &blocks[outer], &[QUEUE_WORDS, STACK_WORDS])
                && (header_mentions(syntax, &blocks[inner.block], &[GRAPH_WORDS])
                    || header_has_field(syntax, &blocks[inner.block]))
        })
    }
}

fn classify_loops(syntax: &Syntax<'_>) -> Vec<LoopFact> {
    let blocks = &syntax.outline.blocks;
    let mut facts: Vec<LoopFact> = Vec::new();

    for (index, block) in syntax.outline.loops() {
        let control = control_variable(syntax, block);
        let kind = loop_kind(syntax, block, control.as_deref());

        // Enclosing loops inside the same function, innermost first
        let enclosing: Vec<&LoopFact> = syntax
            .outline
            .ancestors(index)
            .take_while(|&a| blocks[a].kind != BlockKind::Function)
            .filter_map(|a| facts.iter().find(|f| f.block == a))
            .collect();
        let within_linear = enclosing
            .iter()
            .find(|f| f.kind == LoopKind::Linear)
            .map(|f| f.block);
        let outer_depth = enclosing.first().map_or(0, |f| f.depth);
        let shares_control = control.is_some()
            && enclosing
                .iter()
                .any(|f| f.kind == LoopKind::Linear && f.control == control);
        let depth = match kind {
            LoopKind::Linear if !shares_control => outer_depth + 1,
            _ => outer_depth,
        };

        facts.push(LoopFact {
            block: index,
            kind,
            control,
            depth,
            within_linear,
            line: block.line,
        });
    }
    facts
}

/// The variable a loop advances: the initialised name of a counting loop,
/// the element of a for-each loop, or the first name of a condition.
fn control_variable(syntax: &Syntax<'_>, block: &Block) -> Option<String> {
    let header = syntax.slice(block.header.clone());

    let found = if let Some(init_end) = header.iter().position(|t| t.is(";")) {
        header[..init_end]
            .iter()
            .position(|t| t.is("="))
            .and_then(|eq| header[..eq].iter().rev().find(|t| t.is_ident()))
            .or_else(|| header.iter().find(|t| t.is_ident()))
    } else {
        let is_while = syntax.get(block.start).is_some_and(|t| t.is("while"));
        match header.iter().position(|t| t.is_any(&[":", "of", "in"])) {
            Some(split) if !is_while => header[..split].iter().rev().find(|t| t.is_ident()),
            _ => header.iter().find(|t| t.is_ident()),
        }
    };
    found.map(|t| t.text.clone())
}

fn loop_kind(syntax: &Syntax<'_>, block: &Block, control: Option<&str>) -> LoopKind {
    let header = syntax.slice(block.header.clone());
    let header_names: HashSet<&str> = header
        .iter()
        .filter(|t| t.is_ident())
        .map(|t| t.text.as_str())
        .collect();

    if halves_control(syntax, block, &header_names, control) {
        return LoopKind::Halving;
    }
    if counts_between_literals(header, control) {
        LoopKind::Constant
    } else {
        LoopKind::Linear
    }
}

/// `for (int i = 0; i < 100; i++)` or `for i in range(2, 10)`: the control
/// variable starts from a literal in the header and stops at a literal.
/// A `while` over a bare name never qualifies.
fn counts_between_literals(header: &[&Token], control: Option<&str>) -> bool {
    let Some(control) = control else {
        return false;
    };
    let is_bound =
        |t: &&Token| t.is_number() && !matches!(t.text.as_str(), "0" | "1" | "0.0" | "1.0");
    let is_literal = |tokens: &[&Token]| {
        !tokens.is_empty() && tokens.iter().all(|t| t.is_number() || t.is_any(&["-", "+"]))
    };

    if let Some(init_end) = header.iter().position(|t| t.is(";")) {
        let init = &header[..init_end];
        let starts_at_literal = init
            .iter()
            .position(|t| t.is("="))
            .is_some_and(|eq| is_literal(&init[eq + 1..]));
        let rest = &header[init_end + 1..];
        let condition = &rest[..rest.iter().position(|t| t.is(";")).unwrap_or(rest.len())];
        return starts_at_literal
            && condition.iter().any(is_bound)
            && condition
                .iter()
                .filter(|t| t.is_ident())
                .all(|t| t.text == control);
    }

    match header.iter().position(|t| t.is("range")) {
        Some(at) => {
            let arguments = &header[at + 1..];
            arguments.iter().any(is_bound) && !arguments.iter().any(|t| t.is_ident())
        }
        None => false,
    }
}

/// `i *= 2`, `n //= 10`, `i = i / 2`, or a header name reassigned from a
/// bisected midpoint (`left = mid + 1`).
fn halves_control(
    syntax: &Syntax<'_>,
    block: &Block,
    header_names: &HashSet<&str>,
    control: Option<&str>,
) -> bool {
    let span = block.span();
    let midpoints = midpoint_names(syntax, span.clone());
    let tracked = |text: &str| header_names.contains(text) || control == Some(text);

    span.clone().any(|k| {
        let Some(token) = syntax.get(k) else {
            return false;
        };
        if !token.is_ident() || !tracked(token.text.as_str()) {
            return false;
        }
        if syntax.get(k + 1).is_some_and(|t| t.is_any(SCALING_UPDATES)) {
            return true;
        }
        if !syntax.is_at(k + 1, "=") {
            return false;
        }
        let rhs = k + 2..statement_end(syntax, k + 2);
        let self_scaled = syntax.contains_text(rhs.clone(), &token.text)
            && (halving_expression(syntax, rhs.clone()) || scaling_expression(syntax, rhs.clone()));
        self_scaled
            || syntax
                .slice(rhs)
                .iter()
                .any(|t| t.is_ident() && midpoints.contains(&t.text))
    })
}

/// Names assigned from a halving expression in `range` (`mid = (lo + hi) / 2`).
pub(crate) fn midpoint_names(syntax: &Syntax<'_>, range: std::ops::Range<usize>) -> HashSet<String> {
    range
        .filter(|&k| {
            syntax.get(k).is_some_and(|t| t.is_ident())
                && syntax.is_at(k + 1, "=")
                && halving_expression(syntax, k + 2..statement_end(syntax, k + 2))
        })
        .filter_map(|k| syntax.get(k).map(|t| t.text.clone()))
        .collect()
}

fn halving_expression(syntax: &Syntax<'_>, range: std::ops::Range<usize>) -> bool {
    range.clone().any(|k| {
        syntax.get(k).is_some_and(|t| t.is_any(HALVING_OPERATORS))
            && syntax.get(k + 1).is_some_and(|t| t.is_number())
            && k + 1 < range.end
    })
}

fn scaling_expression(syntax: &Syntax<'_>, range: std::ops::Range<usize>) -> bool {
    range.clone().any(|k| {
        syntax.is_at(k, "*")
            && syntax
                .get(k + 1)
                .is_some_and(|t| t.is_number() && !matches!(t.text.as_str(), "0" | "1"))
            && k + 1 < range.end
    })
}

/// Exclusive end of the expression statement starting at `start`.
pub(crate) fn statement_end(syntax: &Syntax<'_>, start: usize) -> usize {
    let mut depth = 0usize;
    for k in start..syntax.len() {
        let token = syntax.code[k];
        if k > start && depth == 0 && syntax.starts_line(k) {
            let continued = syntax
                .prev(k)
                .is_some_and(|p| p.kind == TokenKind::Operator);
            if !continued {
                return k;
            }
        }
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
    syntax.len()
}

/// Calls to any of `names`. Method calls always count; bare calls count
/// when `bare` is set or when they take a single argument (`sum(values)`).
fn call_sites(syntax: &Syntax<'_>, names: &[&str], bare: bool) -> Vec<usize> {
    let defined: HashSet<&str> = syntax
        .outline
        .functions()
        .filter_map(|(_, b)| b.name.as_deref())
        .collect();
    let starts: HashSet<usize> = syntax.outline.functions().map(|(_, b)| b.start).collect();

    (0..syntax.len())
        .filter(|&k| {
            let Some(token) = syntax.get(k) else {
                return false;
            };
            if !token.is_ident() || !names.contains(&token.text.as_str()) || !syntax.is_at(k + 1, "(") {
                return false;
            }
            if starts.contains(&k) {
                return false;
            }
            let method = syntax.prev(k).is_some_and(|p| p.is_any(&[".", "::", "?."]));
            if method {
                return true;
            }
            if defined.contains(token.text.as_str()) {
                return false;
            }
            bare || single_argument(syntax, k + 1)
        })
        .collect()
}

fn single_argument(syntax: &Syntax<'_>, open: usize) -> bool {
    let Some(close) = syntax.partner(open) else {
        return false;
    };
    if close == open + 1 {
        return false;
    }
    let mut depth = 0usize;
    for token in syntax.slice(open + 1..close) {
        if token.is_any(&["(", "[", "{"]) {
            depth += 1;
        } else if token.is_any(&[")", "]", "}"]) {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && token.is(",") {
            return false;
        }
    }
    true
}

fn allocations(syntax: &Syntax<'_>) -> Vec<Allocation> {
    let rules = syntax.profile.allocation_rules;
    let sized = |k: usize| rules.iter().find_map(|rule| rule.sized_at(syntax, k).map(|m| (rule, m)));

    let mut found = Vec::new();
    let mut covered_until = 0;
    for k in 0..syntax.len() {
        if k < covered_until {
            continue;
        }
        let Some((rule, matched)) = sized(k) else {
            continue;
        };
        let nested = matched.last_group.as_ref().is_some_and(|group| {
            (*group.start() + 1..*group.end()).any(|inner| sized(inner).is_some())
        });
        let class = if rule.dimensions >= 2 || nested {
            ComplexityClass::Quadratic
        } else {
            ComplexityClass::Linear
        };
        found.push(Allocation {
            position: k,
            line: syntax.code[k].line,
            class,
        });
        covered_until = matched.end;
    }
    found
}

fn recursion_fact(
    syntax: &Syntax<'_>,
    flow: &ControlFlow,
    index: usize,
    block: &Block,
    linked: bool,
    linear_helpers: &HashSet<String>,
) -> Option<RecursionFact> {
    let name = block.name.clone()?;
    let self_names = syntax.profile.vocabulary.self_names;
    let calls: Vec<usize> = block
        .body
        .clone()
        .filter(|&k| {
            syntax.get(k).is_some_and(|t| t.is_ident() && t.text == name)
                && syntax.is_at(k + 1, "(")
                && match syntax.prev(k) {
                    Some(p) if p.is_any(&[".", "?.", "->"]) => k >= 2
                        && syntax.get(k - 2).is_some_and(|t| t.is_any(self_names)),
                    Some(p) => !p.is_any(&["def", "function", "new"]),
                    None => true,
                }
        })
        .collect();
    if calls.is_empty() {
        return None;
    }

    let midpoints = midpoint_names(syntax, block.body.clone());
    let halved = |call: usize| {
        let Some(close) = syntax.partner(call + 1) else {
            return false;
        };
        let args = call + 2..close;
        halving_expression(syntax, args.clone())
            || syntax
                .slice(args)
                .iter()
                .any(|t| t.is_ident() && midpoints.contains(&t.text))
    };
    let structural = |call: usize| {
        let Some(close) = syntax.partner(call + 1) else {
            return false;
        };
        (call + 2..close).any(|k| {
            syntax.is_at(k, ".")
                && syntax.get(k + 1).is_some_and(|t| {
                    TREE_FIELDS
                        .iter()
                        .chain(LIST_FIELDS)
                        .chain(GRAPH_FIELDS)
                        .any(|f| t.text == *f)
                })
        })
    };
    let in_loop = calls.iter().any(|&call| {
        syntax.outline.enclosing_loops(call).into_iter().any(|l| {
            let loop_block = &syntax.outline.blocks[l];
            loop_block.start > block.start && loop_block.body.contains(&call)
        })
    });
    // `return f(...)` statements are exclusive branches
    let concurrent = calls
        .iter()
        .filter(|&&call| !returned_alone(syntax, call))
        .count();
    let multi = concurrent >= 2;
    let memoized = is_memoized(syntax, block);
    let all_halved = calls.iter().all(|&c| halved(c));
    let linear_work = flow.linear_work_in(syntax, block, linear_helpers);

    let kind = if memoized {
        RecursionKind::Linear
    } else if all_halved && !in_loop {
        match (multi, linear_work) {
            (true, true) => RecursionKind::DivideAndConquer,
            (false, false) => RecursionKind::Halving,
            _ => RecursionKind::Linear,
        }
    } else if multi || in_loop {
        if linked || calls.iter().any(|&c| structural(c)) {
            RecursionKind::Traversal
        } else if multi && !in_loop && linear_work {
            RecursionKind::DivideAndConquer
        } else {
            RecursionKind::Branching
        }
    } else {
        RecursionKind::Linear
    };

    Some(RecursionFact {
        block: index,
        name,
        kind,
        calls: calls.len(),
        in_loop,
        memoized,
        has_base_case: has_base_case(syntax, block, &calls),
        line: block.line,
    })
}

fn returned_alone(syntax: &Syntax<'_>, call: usize) -> bool {
    if !syntax.prev(call).is_some_and(|p| p.is("return")) {
        return false;
    }
    let Some(close) = syntax.partner(call + 1) else {
        return false;
    };
    let after = close + 1;
    after >= syntax.len() || syntax.is_at(after, ";") || syntax.is_at(after, "}") || syntax.starts_line(after)
}

fn is_memoized(syntax: &Syntax<'_>, block: &Block) -> bool {
    let decorated = (block.start.saturating_sub(DECORATOR_LOOKBACK)..block.start).any(|k| {
        syntax
            .get(k)
            .is_some_and(|t| t.is_ident() && MEMO_DECORATORS.contains(&t.text.as_str()))
    });
    decorated
        || block.span().any(|k| {
            syntax.get(k).is_some_and(|t| {
                t.is_ident() && name_words(&t.text).iter().any(|w| MEMO_WORDS.contains(&w.as_str()))
            })
        })
}

/// An exit statement that appears before the first self-call, or a
/// conditional whose branch does not recurse.
fn has_base_case(syntax: &Syntax<'_>, block: &Block, calls: &[usize]) -> bool {
    let first_call = calls.first().copied().unwrap_or(block.body.end);
    let vocabulary = &syntax.profile.vocabulary;
    let exits_early = (block.body.start..first_call).any(|k| {
        syntax
            .get(k)
            .is_some_and(|t| t.kind == TokenKind::Keyword && t.is_any(vocabulary.exit_keywords))
            && statement_closes_between(syntax, k, first_call)
    });
    let guarded = block.body.clone().any(|k| {
        syntax.get(k).is_some_and(|t| {
            t.kind == TokenKind::Keyword && t.is_any(vocabulary.conditional_keywords)
        })
    }) || syntax.contains_text(block.body.clone(), "?");
    exits_early || guarded
}

/// `return f(n - 1)` exits through the call itself, not before it.
fn statement_closes_between(syntax: &Syntax<'_>, from: usize, to: usize) -> bool {
    let next_line = match (syntax.get(from), syntax.get(to)) {
        (Some(a), Some(b)) => a.line < b.line,
        _ => true,
    };
    next_line || (from + 1..to).any(|k| syntax.is_at(k, ";") || syntax.is_at(k, "}"))
}

fn growth_sites(syntax: &Syntax<'_>, flow: &ControlFlow) -> Vec<usize> {
    let growth_calls = syntax.profile.vocabulary.growth_calls;
    let recursive: Vec<&Block> = flow
        .recursion
        .iter()
        .map(|r| &syntax.outline.blocks[r.block])
        .collect();
    (0..syntax.len())
        .filter(|&k| {
            syntax
                .get(k)
                .is_some_and(|t| t.is_ident() && growth_calls.contains(&t.text.as_str()))
                && syntax.is_at(k + 1, "(")
                && (flow.linear_loop_around(syntax, k).is_some()
                    || recursive.iter().any(|b| b.body.contains(&k)))
        })
        .collect()
}

fn header_mentions(syntax: &Syntax<'_>, block: &Block, word_sets: &[&[&str]]) -> bool {
    syntax.slice(block.header.clone()).iter().any(|t| {
        t.is_ident()
            && name_words(&t.text).iter().any(|w| {
                word_sets.iter().any(|set| {
                    set.iter()
                        .any(|s| w == s || w.strip_suffix('s') == Some(*s))
                })
            })
    })
}

fn header_has_field(syntax: &Syntax<'_>, block: &Block) -> bool {
    let header = block.header.clone();
    header.clone().any(|k| {
        syntax.is_at(k, ".")
            && syntax.get(k + 1).is_some_and(|t| {
                TREE_FIELDS.iter().chain(GRAPH_FIELDS).any(|f| t.text == *f)
            })
    })
}
