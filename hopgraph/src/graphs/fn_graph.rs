/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::{OutOfRange, RandomAccessGraph};

/// A graph whose successor lists are computed by a function.
///
/// The function is called every time the successors of a node are requested,
/// so it must be deterministic; if it is [`Sync`], the graph can be visited in
/// parallel. A node for which the function has no adjacency data should simply
/// yield an empty iterator.
///
/// The function is never called with a node outside of `[0..num_nodes)`;
/// the successors it returns, however, are not checked, and visits will fail
/// with [`OutOfRange`] if they meet an invalid one.
///
/// # Examples
///
/// ```
/// use hopgraph::prelude::*;
///
/// // A directed ring
/// let g = FnGraph::new(5, |x: usize| [(x + 1) % 5]);
/// assert_eq!(g.successors(4).unwrap().into_iter().collect::<Vec<_>>(), vec![0]);
/// assert!(g.successors(5).is_err());
/// ```
#[derive(Clone, Copy)]
pub struct FnGraph<F> {
    num_nodes: usize,
    succ: F,
}

impl<F> core::fmt::Debug for FnGraph<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnGraph")
            .field("num_nodes", &self.num_nodes)
            .finish_non_exhaustive()
    }
}

impl<I: IntoIterator<Item = usize>, F: Fn(usize) -> I> FnGraph<F> {
    /// Creates a graph with `num_nodes` nodes whose successors are given
    /// by `succ`.
    pub fn new(num_nodes: usize, succ: F) -> Self {
        Self { num_nodes, succ }
    }
}

impl<I: IntoIterator<Item = usize>, F: Fn(usize) -> I> RandomAccessGraph for FnGraph<F> {
    type Successors<'succ>
        = I
    where
        Self: 'succ;

    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline(always)]
    fn num_arcs_hint(&self) -> Option<u64> {
        None
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> Result<Self::Successors<'_>, OutOfRange> {
        Ok((self.succ)(OutOfRange::check(node, self.num_nodes)?))
    }
}
