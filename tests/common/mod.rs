// Shared fixtures for algoscope integration tests
#![allow(dead_code)]

use algoscope::{analyze, AnalysisResult};

pub const BINARY_SEARCH_JS: &str = "\
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
const numbers = [1, 3, 5, 7, 9, 11, 13, 15];
";

pub const PAIR_SUM_JS: &str = "\
function hasPairWithSum(arr, target) {
  for (let i = 0; i < arr.length; i++) {
    for (let j = i + 1; j < arr.length; j++) {
      if (arr[i] + arr[j] === target) return true;
    }
  }
  return false;
}
";

pub const FIB_PY: &str = "\
def fib(n):
    if n < 2:
        return n
    return fib(n - 1) + fib(n - 2)
";

pub const RECURSIVE_SEARCH_CPP: &str = "\
int search(const vector<int>& a, int lo, int hi, int x) {
    if (lo > hi) return -1;
    int mid = lo + (hi - lo) / 2;
    if (a[mid] == x) return mid;
    if (a[mid] < x) return search(a, mid + 1, hi, x);
    return search(a, lo, mid - 1, x);
}
";

pub const TREE_NODE_JAVA: &str = "\
class TreeNode {
    int val;
    TreeNode left;
    TreeNode right;
}
";

pub fn analyze_ok(source: &str, language: &str) -> AnalysisResult {
    analyze(source, language).unwrap_or_else(|e| panic!("analysis of {language} failed: {e}"))
}
