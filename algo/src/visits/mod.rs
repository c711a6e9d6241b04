/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Visits on graphs.
//!
//! Visits accept a callback function receiving [breadth-first
//! events](breadth_first::Event) and return the distances computed during the
//! visit. [Sequential visits](breadth_first::Seq) are executed in a single
//! thread, whereas [parallel visits](breadth_first::ParLevel) use a fixed pool
//! of threads. The signature of callbacks reflects this difference ([`FnMut`]
//! for the sequential case vs. [`Fn`] + [`Sync`] for the parallel case).
//!
//! Visits either complete, returning a full distance labeling, or fail with a
//! [`BfsError`] without returning any partial result.

pub mod breadth_first;

use hopgraph::traits::OutOfRange;
use thiserror::Error;

/// Errors raised by visits.
#[derive(Error, Debug)]
pub enum BfsError {
    /// The source, or a successor returned by the graph, is not a node of the
    /// graph.
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
    /// A parallel visit was configured with no threads.
    #[error("Invalid number of threads: {num_threads} (it must be at least 1)")]
    InvalidConfiguration { num_threads: usize },
    /// The graph is too large for distances to be represented by an `i32`.
    #[error("The graph has {num_nodes} nodes, but at most {max} are supported", max = i32::MAX)]
    TooManyNodes { num_nodes: usize },
    /// The thread pool of a parallel visit could not be built.
    #[error("Cannot build the thread pool of the visit")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Checks that all distances in a graph with `num_nodes` nodes, including the
/// distance one past the largest possible one, fit an `i32`.
pub(crate) fn check_num_nodes(num_nodes: usize) -> Result<(), BfsError> {
    if num_nodes > i32::MAX as usize {
        Err(BfsError::TooManyNodes { num_nodes })
    } else {
        Ok(())
    }
}
