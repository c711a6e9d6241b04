/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::{OutOfRange, RandomAccessGraph};
use std::iter::Copied;
use std::slice::Iter;

/// A [`RandomAccessGraph`] implementation based on a vector of vectors.
///
/// Successors are kept in insertion order; self-loops and duplicate arcs are
/// kept as well. Every constructor checks that arcs connect existing nodes, so
/// a [`VecGraph`] never contains a successor outside of `[0..num_nodes)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VecGraph {
    /// The number of arcs in the graph.
    num_arcs: u64,
    /// For each node, its list of successors.
    succ: Vec<Vec<usize>>,
}

impl VecGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new graph with `n` isolated nodes.
    pub fn empty(n: usize) -> Self {
        Self {
            num_arcs: 0,
            succ: Vec::from_iter((0..n).map(|_| Vec::new())),
        }
    }

    /// Adds an isolated node to the graph and returns true if it is a new node.
    ///
    /// All nodes up to `node` are created, too.
    pub fn add_node(&mut self, node: usize) -> bool {
        let len = self.succ.len();
        self.succ.extend((len..=node).map(|_| Vec::new()));
        len <= node
    }

    /// Appends `v` to the successors of `u`.
    ///
    /// Returns an error if one of the given nodes is greater than or equal to
    /// the number of nodes in the graph.
    pub fn add_arc(&mut self, u: usize, v: usize) -> Result<(), OutOfRange> {
        let num_nodes = self.succ.len();
        OutOfRange::check(v, num_nodes)?;
        self.succ[OutOfRange::check(u, num_nodes)?].push(v);
        self.num_arcs += 1;
        Ok(())
    }

    /// Creates a graph with `num_nodes` nodes from a list of arcs.
    ///
    /// Nodes that never appear as sources have an empty successor list.
    pub fn from_arcs(
        num_nodes: usize,
        arcs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, OutOfRange> {
        let mut g = Self::empty(num_nodes);
        for (u, v) in arcs {
            g.add_arc(u, v)?;
        }
        Ok(g)
    }

    /// Creates a graph from its adjacency lists; the number of nodes is the
    /// number of lists.
    pub fn from_adjacency(succ: Vec<Vec<usize>>) -> Result<Self, OutOfRange> {
        let num_nodes = succ.len();
        let mut num_arcs = 0;
        for list in &succ {
            for &v in list {
                OutOfRange::check(v, num_nodes)?;
            }
            num_arcs += list.len() as u64;
        }
        Ok(Self { num_arcs, succ })
    }

    /// Creates a graph from adjacency lists that are known to be valid.
    pub(crate) fn from_adjacency_unchecked(succ: Vec<Vec<usize>>) -> Self {
        debug_assert!(succ.iter().flatten().all(|&v| v < succ.len()));
        let num_arcs = succ.iter().map(|list| list.len() as u64).sum();
        Self { num_arcs, succ }
    }

    /// Returns the adjacency lists of the graph.
    pub fn into_adjacency(self) -> Vec<Vec<usize>> {
        self.succ
    }
}

impl RandomAccessGraph for VecGraph {
    type Successors<'succ>
        = Copied<Iter<'succ, usize>>
    where
        Self: 'succ;

    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.succ.len()
    }

    #[inline(always)]
    fn num_arcs_hint(&self) -> Option<u64> {
        Some(self.num_arcs)
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> Result<Self::Successors<'_>, OutOfRange> {
        match self.succ.get(node) {
            Some(list) => Ok(list.iter().copied()),
            None => Err(OutOfRange {
                node,
                num_nodes: self.succ.len(),
            }),
        }
    }

    #[inline(always)]
    fn outdegree(&self, node: usize) -> Result<usize, OutOfRange> {
        self.successors(node).map(|s| s.len())
    }
}
