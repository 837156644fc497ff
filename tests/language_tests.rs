mod common;

use algoscope::{ComplexityClass, Severity, StructureCategory};
use common::{analyze_ok, FIB_PY, RECURSIVE_SEARCH_CPP, TREE_NODE_JAVA};
use indoc::indoc;

#[test]
fn test_python_fibonacci_is_exponential() {
    let result = analyze_ok(FIB_PY, "python");
    assert_eq!(result.complexity.time_class, ComplexityClass::Exponential);
    assert_eq!(result.complexity.space_class, ComplexityClass::Linear);
    assert!(result.code_quality.metrics.efficiency < 50);

    let memoize = result
        .suggestions
        .iter()
        .find(|s| s.message.starts_with("Memoize `fib`"))
        .unwrap();
    assert_eq!(memoize.severity, Severity::Warning);
}

#[test]
fn test_cpp_recursive_search_space_bounded_by_time() {
    let result = analyze_ok(RECURSIVE_SEARCH_CPP, "c++");
    assert_eq!(result.complexity.time_class, ComplexityClass::Logarithmic);
    assert_eq!(result.complexity.space_class, ComplexityClass::Logarithmic);
    assert!(result.complexity.space_class <= result.complexity.time_class);
}

#[test]
fn test_java_tree_node_detected() {
    let result = analyze_ok(TREE_NODE_JAVA, "java");
    let tree = result.structure(StructureCategory::Tree).unwrap();
    assert_eq!(tree.lines, vec![1, 3, 4]);
    assert_eq!(result.complexity.time_class, ComplexityClass::Constant);
}

#[test]
fn test_javascript_sort_then_scan_is_linearithmic() {
    let source = indoc! {"
        function uniqueSorted(values) {
          values.sort((a, b) => a - b);
          const out = [];
          for (const v of values) {
            if (out[out.length - 1] !== v) out.push(v);
          }
          return out;
        }
    "};
    let result = analyze_ok(source, "js");
    assert_eq!(result.complexity.time_class, ComplexityClass::Linearithmic);
    assert_eq!(result.complexity.space_class, ComplexityClass::Linear);
}

#[test]
fn test_python_breadth_first_search_structures() {
    let source = indoc! {"
        from collections import deque
        def bfs(graph, start):
            seen = set()
            queue = deque([start])
            while queue:
                node = queue.popleft()
                for nxt in graph[node]:
                    if nxt not in seen:
                        seen.add(nxt)
                        queue.append(nxt)
    "};
    let result = analyze_ok(source, "python");
    assert!(result.structure(StructureCategory::Queue).is_some());
    assert!(result.structure(StructureCategory::HashTable).is_some());
    assert!(result.structure(StructureCategory::Graph).is_some());
}

#[test]
fn test_code_inside_literals_is_ignored() {
    let source = "const doc = \"for (let i = 0; i < n; i++) { for (;;) {} }\";\n";
    let result = analyze_ok(source, "javascript");
    assert_eq!(result.complexity.time_class, ComplexityClass::Constant);
    assert_eq!(result.complexity.loop_depth, 0);
}

#[test]
fn test_prose_degrades_gracefully() {
    let result = analyze_ok("this is just a sentence about sorting things", "python");
    assert_eq!(result.complexity.time_class, ComplexityClass::Constant);
    assert!(result
        .data_structures
        .iter()
        .all(|s| s.name == StructureCategory::Variable));
}
