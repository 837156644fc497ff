//! Benchmarks for the analysis pipeline.
//!
//! - Single-snippet latency per language
//! - Scaling with input length
//! - Sequential versus parallel batches, with and without the result cache

use algoscope::{analyze, AnalysisCache, Analyzer};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rayon::prelude::*;
use std::hint::black_box;

const BINARY_SEARCH_JS: &str = r#"
function binarySearch(arr, target) {
  let left = 0;
  let right = arr.length - 1;
  while (left <= right) {
    const mid = Math.floor((left + right) / 2);
    if (arr[mid] === target) return mid;
    if (arr[mid] < target) left = mid + 1;
    else right = mid - 1;
  }
  return -1;
}
"#;

const BFS_PY: &str = r#"
from collections import deque

def bfs(graph, start):
    # visit every reachable node once
    seen = {start}
    queue = deque([start])
    while queue:
        node = queue.popleft()
        for nxt in graph[node]:
            if nxt not in seen:
                seen.add(nxt)
                queue.append(nxt)
    return seen
"#;

const MERGE_SORT_CPP: &str = r#"
void mergeSort(vector<int>& a, int lo, int hi) {
    if (hi - lo < 2) return;
    int mid = lo + (hi - lo) / 2;
    mergeSort(a, lo, mid);
    mergeSort(a, mid, hi);
    vector<int> merged;
    int i = lo, j = mid;
    while (i < mid && j < hi) merged.push_back(a[i] <= a[j] ? a[i++] : a[j++]);
    while (i < mid) merged.push_back(a[i++]);
    while (j < hi) merged.push_back(a[j++]);
    copy(merged.begin(), merged.end(), a.begin() + lo);
}
"#;

/// `count` generated functions, each with a nested loop.
fn generated_javascript(count: usize) -> String {
    (0..count)
        .map(|i| {
            format!(
                "function pairs{i}(items) {{\n  let total = 0;\n  for (let a = 0; a < items.length; a++) {{\n    for (let b = a + 1; b < items.length; b++) {{\n      total += items[a] * items[b];\n    }}\n  }}\n  return total;\n}}\n"
            )
        })
        .collect()
}

fn bench_languages(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_snippet");
    for (language, source) in [
        ("javascript", BINARY_SEARCH_JS),
        ("python", BFS_PY),
        ("cpp", MERGE_SORT_CPP),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(language), source, |b, source| {
            b.iter(|| analyze(black_box(source), black_box(language)))
        });
    }
    group.finish();
}

fn bench_input_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_length");
    for functions in [1, 10, 100] {
        let source = generated_javascript(functions);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(functions), &source, |b, source| {
            b.iter(|| analyze(black_box(source), "javascript"))
        });
    }
    group.finish();
}

fn bench_batches(c: &mut Criterion) {
    let analyzer = Analyzer::new();
    let inputs: Vec<String> = (0..64).map(|i| generated_javascript(1 + i % 8)).collect();
    let mut group = c.benchmark_group("analyze_batch");

    group.bench_function("sequential", |b| {
        b.iter(|| {
            inputs
                .iter()
                .map(|source| analyzer.analyze(source, "javascript"))
                .collect::<Vec<_>>()
        })
    });

    group.bench_function("parallel", |b| {
        b.iter(|| {
            inputs
                .par_iter()
                .map(|source| analyzer.analyze(source, "javascript"))
                .collect::<Vec<_>>()
        })
    });

    group.bench_function("parallel_cached", |b| {
        let cache = AnalysisCache::new();
        b.iter(|| {
            inputs
                .par_iter()
                .map(|source| cache.get_or_analyze(&analyzer, source, "javascript"))
                .collect::<Vec<_>>()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_languages, bench_input_length, bench_batches);
criterion_main!(benches);
