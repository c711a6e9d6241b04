/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Breadth-first visits from a single source.
//!
//! Implementations accept a callback function with argument [`Event`] and
//! return the [distance labeling](crate::distances) of the graph: a vector
//! containing, for each node, its distance from the source, or
//! [`UNVISITED`](crate::distances::UNVISITED) if the node is not reachable.
//!
//! The [sequential visit](Seq) is the reference implementation; the
//! [level-synchronous parallel visit](ParLevel) returns exactly the same
//! labeling for every graph, source and number of threads.

mod seq;
pub use seq::*;

mod par_level;
pub use par_level::*;

/// Types of callback events generated during breadth-first visits.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Event {
    /// This event should be used to set up state at the start of the visit.
    ///
    /// Note that this event will not happen if the visit fails before
    /// starting, for example because the source is not a node of the graph.
    Init {},
    /// The node has been labeled with its distance: this happens exactly once
    /// for each reachable node, including the source at distance zero.
    ///
    /// In parallel visits, the event is generated by the thread that claimed
    /// the node.
    Unknown {
        /// The current node.
        node: usize,
        /// The distance of the current node from the source.
        distance: usize,
    },
    /// The node has been encountered before: we are traversing a back arc, a
    /// forward arc, a cross arc, a self-loop, or a duplicate arc.
    ///
    /// Note however that in parallel contexts it might happen that callback
    /// with event [`Unknown`](`Event::Unknown`) has not been called yet by the
    /// thread who claimed the node.
    Known {
        /// The current node.
        node: usize,
    },
    /// The nodes at a new distance are about to be expanded.
    ///
    /// When this event is emitted all nodes at the given distance have been
    /// labeled, and no node at a larger distance has.
    FrontierSize {
        /// The number of nodes at that distance.
        nodes: usize,
        /// The distance of the nodes.
        distance: usize,
    },
    /// The visit has been completed.
    Done {},
}
