use crate::TrackerError;
use fixedbitset::FixedBitSet;
use ndarray::*;
use pathfinding::{kuhn_munkres::kuhn_munkres_min, matrix::Matrix};
use std::{fmt, str::FromStr};

/// Costs are multiplied by this constant to convert from f64 to i64 which satisfies the solver requirements (f64 does not implement `std::cmp::Ord`).
const COST_SCALE: f64 = 1_000.0;

/// Scaled costs are capped so that summing a full assignment cannot overflow i64.
const MAX_SCALED_COST: f64 = 1.0e15;

/// The result of assigning rows (tracks) to columns (detections) of a cost matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    /// Matched `(row, col)` pairs in the order they were committed.
    pub matches: Vec<(usize, usize)>,
    /// Rows without a column, ascending.
    pub unmatched_rows: Vec<usize>,
    /// Columns without a row, ascending.
    pub unmatched_cols: Vec<usize>,
}

impl Assignment {
    fn from_consumed(
        matches: Vec<(usize, usize)>,
        used_rows: &FixedBitSet,
        used_cols: &FixedBitSet,
    ) -> Assignment {
        Assignment {
            matches,
            unmatched_rows: unset(used_rows),
            unmatched_cols: unset(used_cols),
        }
    }
}

/// Returns the indices not present in `set`, ascending.
fn unset(set: &FixedBitSet) -> Vec<usize> {
    (0..set.len()).filter(|idx| !set.contains(*idx)).collect()
}

/// Strategy used to associate existing tracks with new detections.
///
/// * `Greedy` commits tracks in order of their nearest candidate. This is the default and the behaviour tracking results are compared against.
/// * `Optimal` solves the minimum total distance assignment (Kuhn-Munkres).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Matching {
    #[default]
    Greedy,
    Optimal,
}

impl Matching {
    /// Assign rows to columns of `cost_matrix` with this strategy.
    pub fn assign(&self, cost_matrix: &Array2<f64>) -> Assignment {
        match self {
            Matching::Greedy => greedy_matching(cost_matrix),
            Matching::Optimal => min_cost_matching(cost_matrix),
        }
    }
}

impl FromStr for Matching {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(Matching::Greedy),
            "optimal" | "hungarian" => Ok(Matching::Optimal),
            _ => Err(TrackerError::UnknownMatching(s.to_string())),
        }
    }
}

impl fmt::Display for Matching {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matching::Greedy => write!(f, "greedy"),
            Matching::Optimal => write!(f, "optimal"),
        }
    }
}

/// Returns the index of the first minimum value in `values` or `None` if empty.
fn first_argmin(values: ArrayView1<f64>) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (idx, &value)| match best {
            Some((_, best_value)) if value.total_cmp(&best_value).is_ge() => best,
            _ => Some((idx, value)),
        })
        .map(|(idx, _)| idx)
}

/// Greedy nearest neighbour assignment.
///
/// Rows are visited in ascending order of their smallest distance. Each row claims its nearest column unless that column has already been claimed by
/// an earlier row, in which case the row stays unmatched even if another column is free. This is not a globally optimal assignment.
///
/// Ties are resolved deterministically: a row's nearest column is the first column holding the minimum, and rows with equal minima are visited in
/// ascending row order (stable sort).
///
/// # Parameters
///
/// * `cost_matrix`: An NxM matrix where element (i, j) is the distance between the i-th track and the j-th detection.
pub fn greedy_matching(cost_matrix: &Array2<f64>) -> Assignment {
    let (nrows, ncols) = cost_matrix.dim();
    let mut used_rows = FixedBitSet::with_capacity(nrows);
    let mut used_cols = FixedBitSet::with_capacity(ncols);

    if nrows == 0 || ncols == 0 {
        return Assignment::from_consumed(vec![], &used_rows, &used_cols);
    }

    // (row, nearest col, distance)
    let mut candidates = cost_matrix
        .outer_iter()
        .enumerate()
        .filter_map(|(row, distances)| {
            first_argmin(distances).map(|col| (row, col, distances[col]))
        })
        .collect::<Vec<_>>();
    candidates.sort_by(|a, b| a.2.total_cmp(&b.2));

    let mut matches = Vec::with_capacity(nrows.min(ncols));
    candidates.into_iter().for_each(|(row, col, _)| {
        if used_rows.contains(row) || used_cols.contains(col) {
            return;
        }
        used_rows.insert(row);
        used_cols.insert(col);
        matches.push((row, col));
    });

    Assignment::from_consumed(matches, &used_rows, &used_cols)
}

/// Solve the linear assignment problem minimising the total distance.
///
/// Every row is matched when there are no more rows than columns, otherwise every column is matched.
///
/// # Parameters
///
/// * `cost_matrix`: An NxM matrix where element (i, j) is the distance between the i-th track and the j-th detection.
pub fn min_cost_matching(cost_matrix: &Array2<f64>) -> Assignment {
    let (nrows, ncols) = cost_matrix.dim();
    let mut used_rows = FixedBitSet::with_capacity(nrows);
    let mut used_cols = FixedBitSet::with_capacity(ncols);

    if nrows == 0 || ncols == 0 {
        return Assignment::from_consumed(vec![], &used_rows, &used_cols);
    }

    // the solver requires rows <= columns
    let (cost_matrix, transposed) = if nrows > ncols {
        (cost_matrix.t(), true)
    } else {
        (cost_matrix.view(), false)
    };

    let mut weights = Matrix::new(cost_matrix.nrows(), cost_matrix.ncols(), 0i64);
    cost_matrix.indexed_iter().for_each(|((row, col), &cost)| {
        weights[(row, col)] = (cost * COST_SCALE).min(MAX_SCALED_COST) as i64;
    });

    // `kuhn_munkres_min` returns just the col_ind array leaving row_ind (which is just a row index) to be derived manually
    let (_, col_indices) = kuhn_munkres_min(&weights);

    let mut matches = col_indices
        .into_iter()
        .enumerate()
        .map(|(row, col)| if transposed { (col, row) } else { (row, col) })
        .collect::<Vec<_>>();
    matches.sort_unstable();
    matches.iter().for_each(|&(row, col)| {
        used_rows.insert(row);
        used_cols.insert(col);
    });

    Assignment::from_consumed(matches, &used_rows, &used_cols)
}
