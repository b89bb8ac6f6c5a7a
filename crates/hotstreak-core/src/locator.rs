// Divide-and-conquer maximum contiguous subsequence sum.
//
// Each half is solved recursively and combined with the best window that
// crosses the midpoint. Two boundary conventions are supported:
//
// - `Legacy`: the boundaries are the last ones written by any merge scan,
//   in execution order. A merge scan writes the left boundary whenever its
//   running sum from the midpoint strictly beats the best so far, and the
//   right boundary symmetrically, whether or not the crossing window wins
//   that merge. The boundaries are threaded through the recursion as state,
//   so the outermost merge usually decides them. When the best window lies
//   wholly inside one half, they can disagree with the reported sum.
// - `Exact`: the boundaries of the window whose sum is reported.

use serde::{Deserialize, Serialize};

/// How the locator reports the boundaries of the best window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    #[default]
    Legacy,
    Exact,
}

/// Best window found by the locator. Indices are zero-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Located {
    pub best_sum: f64,
    pub left_index: usize,
    pub right_index: usize,
}

/// Find the maximum contiguous sum of `values` and its boundaries.
///
/// The sum is never negative: a window of only non-positive values counts as
/// zero. Returns `None` for an empty slice.
pub fn locate(values: &[f64], mode: BoundaryMode) -> Option<Located> {
    if values.is_empty() {
        return None;
    }
    let high = values.len() - 1;
    let located = match mode {
        BoundaryMode::Legacy => {
            let (best_sum, marks) = legacy(values, 0, high, Marks::default());
            Located {
                best_sum,
                left_index: marks.left,
                right_index: marks.right,
            }
        }
        BoundaryMode::Exact => match exact(values, 0, high) {
            Some(window) => Located {
                best_sum: window.sum,
                left_index: window.left,
                right_index: window.right,
            },
            None => Located {
                best_sum: 0.0,
                left_index: 0,
                right_index: 0,
            },
        },
    };
    Some(located)
}

// ---------------------------------------------------------------------------
// Shared crossing scans
// ---------------------------------------------------------------------------

/// Best running sum scanning outward from the midpoint, with the index at
/// which it was last strictly improved.
struct Run {
    sum: f64,
    at: Option<usize>,
}

fn best_run(values: &[f64], indices: impl Iterator<Item = usize>) -> Run {
    let mut run = Run { sum: 0.0, at: None };
    let mut running = 0.0;
    for i in indices {
        running += values[i];
        if running > run.sum {
            run.sum = running;
            run.at = Some(i);
        }
    }
    run
}

// ---------------------------------------------------------------------------
// Legacy boundaries
// ---------------------------------------------------------------------------

/// Boundary state carried from one merge to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Marks {
    left: usize,
    right: usize,
}

fn legacy(values: &[f64], low: usize, high: usize, marks: Marks) -> (f64, Marks) {
    if low == high {
        return (values[low].max(0.0), marks);
    }
    let mid = (low + high) / 2;

    let (best_left, marks) = legacy(values, low, mid, marks);
    let (best_right, mut marks) = legacy(values, mid + 1, high, marks);

    let left_run = best_run(values, (low..=mid).rev());
    let right_run = best_run(values, mid + 1..=high);
    if let Some(i) = left_run.at {
        marks.left = i;
    }
    if let Some(i) = right_run.at {
        marks.right = i;
    }

    let crossing = left_run.sum + right_run.sum;
    (best_left.max(best_right).max(crossing), marks)
}

// ---------------------------------------------------------------------------
// Exact boundaries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Window {
    sum: f64,
    left: usize,
    right: usize,
}

fn sum_of(window: Option<Window>) -> f64 {
    window.map_or(0.0, |w| w.sum)
}

/// Best positive-sum window in `[low, high]`, or `None` if every value is
/// non-positive. Ties prefer the left half, then the right half, then the
/// crossing window.
fn exact(values: &[f64], low: usize, high: usize) -> Option<Window> {
    if low == high {
        return (values[low] > 0.0).then_some(Window {
            sum: values[low],
            left: low,
            right: low,
        });
    }
    let mid = (low + high) / 2;

    let left = exact(values, low, mid);
    let right = exact(values, mid + 1, high);

    let left_run = best_run(values, (low..=mid).rev());
    let right_run = best_run(values, mid + 1..=high);
    let crossing = match (left_run.at, right_run.at) {
        (None, None) => None,
        (l, r) => Some(Window {
            sum: left_run.sum + right_run.sum,
            left: l.unwrap_or(mid + 1),
            right: r.unwrap_or(mid),
        }),
    };

    let mut best = left;
    if sum_of(right) > sum_of(best) {
        best = right;
    }
    if sum_of(crossing) > sum_of(best) {
        best = crossing;
    }
    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
