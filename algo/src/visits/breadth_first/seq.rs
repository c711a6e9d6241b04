/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::distances::UNVISITED;
use crate::visits::{BfsError, breadth_first::Event, check_num_nodes};
use dsi_progress_logger::ProgressLog;
use hopgraph::traits::{OutOfRange, RandomAccessGraph};
use std::collections::VecDeque;

/// A sequential breadth-first visit.
///
/// This is the classical textbook algorithm: the distance of the source is set
/// to zero and the source is enqueued; then, nodes are dequeued in FIFO order,
/// and each successor that has not been labeled yet receives the distance of
/// its predecessor plus one and is enqueued. Since nodes are dequeued in
/// nondecreasing order of distance, each reachable node is labeled exactly
/// once, with its distance from the source.
///
/// The visit can be reused: the queue is kept between visits to avoid
/// reallocations.
///
/// # Examples
///
/// Let's compute the distances from 0:
///
/// ```
/// use dsi_progress_logger::no_logging;
/// use hopgraph::prelude::*;
/// use hopgraph_algo::prelude::*;
///
/// let graph = VecGraph::from_arcs(5, [(0, 1), (1, 2), (2, 0), (1, 3)])?;
/// let mut visit = Seq::new(&graph);
/// assert_eq!(visit.distances(0, no_logging![])?, [0, 1, 2, 2, -1]);
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// Here instead we count the nodes at each distance using the
/// [`FrontierSize`](Event::FrontierSize) event:
///
/// ```
/// use hopgraph::prelude::*;
/// use hopgraph_algo::prelude::*;
///
/// let graph = star(4);
/// let mut visit = Seq::new(&graph);
/// let mut sizes = vec![];
/// visit.visit(0, |event| {
///     if let Event::FrontierSize { nodes, .. } = event {
///         sizes.push(nodes);
///     }
/// })?;
/// assert_eq!(sizes, [1, 4]);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct Seq<G: RandomAccessGraph> {
    graph: G,
    /// The visit queue; the distance of each node in the queue is stored in
    /// the labeling, so there is no need for level separators.
    queue: VecDeque<usize>,
}

impl<G: RandomAccessGraph> Seq<G> {
    /// Creates a new sequential visit.
    ///
    /// # Arguments
    /// * `graph`: the graph to visit.
    pub fn new(graph: G) -> Self {
        Self {
            graph,
            queue: VecDeque::new(),
        }
    }

    /// Visits the graph from `source`, invoking `callback` on each
    /// [event](Event), and returns the distances from `source`.
    pub fn visit<C: FnMut(Event)>(
        &mut self,
        source: usize,
        mut callback: C,
    ) -> Result<Vec<i32>, BfsError> {
        let num_nodes = self.graph.num_nodes();
        check_num_nodes(num_nodes)?;
        OutOfRange::check(source, num_nodes)?;

        self.queue.clear();
        let mut dist = vec![UNVISITED; num_nodes];

        callback(Event::Init {});
        dist[source] = 0;
        callback(Event::Unknown {
            node: source,
            distance: 0,
        });
        self.queue.push_back(source);

        let mut level = UNVISITED;
        while let Some(&node) = self.queue.front() {
            let node_dist = dist[node];
            if node_dist != level {
                // The first node at a new distance: the queue contains
                // exactly the nodes at that distance
                level = node_dist;
                callback(Event::FrontierSize {
                    nodes: self.queue.len(),
                    distance: level as usize,
                });
            }
            self.queue.pop_front();

            let succ_dist = node_dist + 1;
            for succ in self.graph.successors(node)? {
                match dist.get_mut(succ) {
                    Some(slot) if *slot == UNVISITED => {
                        *slot = succ_dist;
                        callback(Event::Unknown {
                            node: succ,
                            distance: succ_dist as usize,
                        });
                        self.queue.push_back(succ);
                    }
                    Some(_) => callback(Event::Known { node: succ }),
                    None => {
                        return Err(OutOfRange {
                            node: succ,
                            num_nodes,
                        }
                        .into());
                    }
                }
            }
        }

        callback(Event::Done {});
        Ok(dist)
    }

    /// Returns the distances from `source`.
    ///
    /// The progress logger is updated once per distance with the number of
    /// nodes at that distance.
    pub fn distances(
        &mut self,
        source: usize,
        pl: &mut impl ProgressLog,
    ) -> Result<Vec<i32>, BfsError> {
        pl.item_name("node");
        pl.expected_updates(Some(self.graph.num_nodes()));
        pl.start("Computing distances with a sequential visit...");
        let dist = self.visit(source, |event| {
            if let Event::FrontierSize { nodes, .. } = event {
                pl.update_with_count(nodes);
            }
        })?;
        pl.done();
        Ok(dist)
    }
}
