/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

/*!

Basic trait to access graphs in random-access fashion.

A [random-access graph](RandomAccessGraph) is a dense sequence of adjacency
lists: nodes are the integers in `[0..num_nodes)`, and for each node the graph
returns the ordered sequence of its successors. Self-loops and duplicate arcs
are allowed.

Graphs are immutable: all methods take `&self` and have no side effects, so a
graph that is [`Sync`] can be queried concurrently by any number of threads.

*/

use impl_tools::autoimpl;
use std::rc::Rc;
use thiserror::Error;

/// A node index outside of `[0..num_nodes)` was used.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Node {node} does not exist (the graph has {num_nodes} nodes)")]
pub struct OutOfRange {
    /// The offending node index.
    pub node: usize,
    /// The number of nodes of the graph.
    pub num_nodes: usize,
}

impl OutOfRange {
    /// Returns `Ok(node)` if `node` is smaller than `num_nodes`, and an
    /// [`OutOfRange`] error otherwise.
    #[inline(always)]
    pub fn check(node: usize, num_nodes: usize) -> Result<usize, Self> {
        if node < num_nodes {
            Ok(node)
        } else {
            Err(Self { node, num_nodes })
        }
    }
}

/// A graph providing random access to successor lists.
///
/// Implementations must guarantee that every successor returned by
/// [`successors`](RandomAccessGraph::successors) lies in `[0..num_nodes)`, or
/// be prepared for visits to fail with [`OutOfRange`] when they meet a
/// malformed successor.
#[autoimpl(for<S: trait + ?Sized> &S, &mut S, Rc<S>)]
pub trait RandomAccessGraph {
    /// The type of the iterator over the successors of a node
    /// returned by [`successors`](RandomAccessGraph::successors).
    type Successors<'succ>: IntoIterator<Item = usize>
    where
        Self: 'succ;

    /// Returns the number of nodes in the graph.
    fn num_nodes(&self) -> usize;

    /// Returns the number of arcs in the graph, if known.
    ///
    /// Graphs defined by a function, such as
    /// [`FnGraph`](crate::graphs::fn_graph::FnGraph), do not know the number
    /// of their arcs.
    fn num_arcs_hint(&self) -> Option<u64>;

    /// Returns the successors of a node, or an [`OutOfRange`] error if
    /// `node` is not smaller than [`num_nodes`](RandomAccessGraph::num_nodes).
    fn successors(&self, node: usize) -> Result<Self::Successors<'_>, OutOfRange>;

    /// Returns the number of successors of a node.
    ///
    /// The default implementation enumerates the successors.
    fn outdegree(&self, node: usize) -> Result<usize, OutOfRange> {
        Ok(self.successors(node)?.into_iter().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check() {
        assert_eq!(OutOfRange::check(0, 1), Ok(0));
        assert_eq!(
            OutOfRange::check(3, 3),
            Err(OutOfRange {
                node: 3,
                num_nodes: 3
            })
        );
        assert_eq!(
            OutOfRange { node: 5, num_nodes: 2 }.to_string(),
            "Node 5 does not exist (the graph has 2 nodes)"
        );
    }
}
