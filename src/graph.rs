//! Project dependency-graph analysis: adjacency matrix, transitive
//! visibility via Floyd–Warshall, first-order density, change cost, and
//! core size (spec.md §4.7).

use serde::{Deserialize, Serialize};

use crate::module_report::ModuleReport;
use crate::resolver;

/// A `n x n` 0/1 matrix stored as a flat row-major buffer (spec.md §9:
/// prefer index arithmetic over nested `Vec<Vec<_>>` allocations).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matrix {
    pub n: usize,
    pub cells: Vec<u8>,
}

impl Matrix {
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            cells: vec![0; n * n],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.n + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.cells[row * self.n + col] = value;
    }
}

/// Distances above this are treated as unreachable. Kept well below
/// `u32::MAX` so two sentinel distances can be added during relaxation
/// without overflowing.
const UNREACHABLE: u32 = u32::MAX / 2;

/// Builds the adjacency matrix for `reports`, already sorted by path: cell
/// `(x, y)` is `1` iff some dependency recorded by `reports[x]` resolves to
/// `reports[y]`'s path (spec.md §4.7 step 1).
pub fn build_adjacency(reports: &[ModuleReport]) -> Matrix {
    let n = reports.len();
    let mut matrix = Matrix::zeros(n);
    for x in 0..n {
        for y in 0..n {
            if x == y {
                continue;
            }
            let from = &reports[x].path;
            let to = &reports[y].path;
            let resolved = reports[x]
                .dependencies
                .iter()
                .any(|dep| resolver::resolves(dep, from, to));
            if resolved {
                matrix.set(x, y, 1);
            }
        }
    }
    matrix
}

/// `(count of 1 cells / n^2) * 100`. `0.0` for an empty project.
pub fn first_order_density(adjacency: &Matrix) -> f64 {
    if adjacency.n == 0 {
        return 0.0;
    }
    let ones = adjacency.cells.iter().filter(|&&c| c == 1).count();
    (ones as f64 / (adjacency.n * adjacency.n) as f64) * 100.0
}

/// Runs Floyd–Warshall over `adjacency` to find all-pairs reachability,
/// then derives the visibility matrix (cell `(i, j)` is `1` iff `j` is
/// transitively reachable from `i`, `i != j`) and the change cost
/// (`(reachable incl. diagonal / n^2) * 100`), per spec.md §4.7 step 2.
pub fn visibility(adjacency: &Matrix) -> (Matrix, f64) {
    let n = adjacency.n;
    let mut dist = vec![UNREACHABLE; n * n];
    for i in 0..n {
        dist[i * n + i] = 1;
    }
    for i in 0..n {
        for j in 0..n {
            if adjacency.get(i, j) == 1 {
                dist[i * n + j] = 1;
            }
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let via = dist[i * n + k] + dist[k * n + j];
                if via < dist[i * n + j] {
                    dist[i * n + j] = via;
                }
            }
        }
    }

    let mut visibility = Matrix::zeros(n);
    let mut reachable_cells = 0usize;
    for i in 0..n {
        for j in 0..n {
            if dist[i * n + j] < UNREACHABLE {
                reachable_cells += 1;
                if i != j {
                    visibility.set(i, j, 1);
                }
            }
        }
    }
    let change_cost = if n == 0 {
        0.0
    } else {
        (reachable_cells as f64 / (n * n) as f64) * 100.0
    };
    (visibility, change_cost)
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).expect("fan counts are never NaN"));
    let len = values.len();
    if len == 0 {
        return 0.0;
    }
    if len % 2 == 1 {
        values[len / 2]
    } else {
        (values[len / 2 - 1] + values[len / 2]) / 2.0
    }
}

/// The percentage of modules whose fan-in and fan-out both meet or exceed
/// the project's median fan-in/fan-out, using the visibility matrix
/// (spec.md §4.7 step 3). `0.0` whenever `first_order_density` is `0.0`,
/// matching spec.md's "an empty graph has no core" rule.
pub fn core_size(visibility: &Matrix, first_order_density: f64) -> f64 {
    let n = visibility.n;
    if n == 0 || first_order_density == 0.0 {
        return 0.0;
    }

    let fan_in: Vec<f64> = (0..n)
        .map(|row| (0..n).map(|col| f64::from(visibility.get(row, col))).sum())
        .collect();
    let fan_out: Vec<f64> = (0..n)
        .map(|col| (0..n).map(|row| f64::from(visibility.get(row, col))).sum())
        .collect();

    let median_in = median(&mut fan_in.clone());
    let median_out = median(&mut fan_out.clone());

    let core = (0..n)
        .filter(|&i| fan_in[i] >= median_in && fan_out[i] >= median_out)
        .count();
    (core as f64 / n as f64) * 100.0
}
