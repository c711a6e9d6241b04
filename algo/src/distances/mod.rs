/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Distance labelings.
//!
//! A distance labeling assigns to each node of a graph its distance from a
//! source, that is, the minimum number of arcs on a directed path from the
//! source to the node, or [`UNVISITED`] if no such path exists.
//!
//! The functions in this module are shortcuts for the visits in
//! [`breadth_first`](crate::visits::breadth_first); [`reached`] and
//! [`eccentricity`] summarize a labeling.

mod labeling;
pub use labeling::*;

use crate::visits::{
    BfsError,
    breadth_first::{ParLevel, Seq},
};
use dsi_progress_logger::ProgressLog;
use hopgraph::traits::RandomAccessGraph;

/// The label of nodes that are not reachable from the source.
pub const UNVISITED: i32 = -1;

/// Returns the distances from `source` using a [sequential visit](Seq).
pub fn seq_distances<G: RandomAccessGraph>(
    graph: G,
    source: usize,
    pl: &mut impl ProgressLog,
) -> Result<Vec<i32>, BfsError> {
    Seq::new(graph).distances(source, pl)
}

/// Returns the distances from `source` using a [level-synchronous parallel
/// visit](ParLevel) with `num_threads` threads.
///
/// The thread pool is built and dropped at each call: use [`ParLevel`]
/// directly to compute distances from multiple sources.
pub fn par_distances<G: RandomAccessGraph + Sync>(
    graph: G,
    source: usize,
    num_threads: usize,
    pl: &mut impl ProgressLog,
) -> Result<Vec<i32>, BfsError> {
    ParLevel::with_num_threads(graph, num_threads)?.distances(source, pl)
}

/// Returns the number of nodes reached by a visit, that is, the number of
/// labels different from [`UNVISITED`].
pub fn reached(dist: &[i32]) -> usize {
    dist.iter().filter(|&&d| d != UNVISITED).count()
}

/// Returns the eccentricity of the source of a visit, that is, the maximum
/// distance of a reachable node, or [`None`] if no node was reached.
pub fn eccentricity(dist: &[i32]) -> Option<usize> {
    dist.iter()
        .copied()
        .filter(|&d| d != UNVISITED)
        .max()
        .map(|d| d as usize)
}
