/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::distances::DistanceLabeling;
use crate::visits::{BfsError, breadth_first::Event, check_num_nodes};
use dsi_progress_logger::ProgressLog;
use hopgraph::traits::{OutOfRange, RandomAccessGraph};
use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};
use std::num::NonZeroUsize;

/// Level-synchronous parallel breadth-first visits.
///
/// The visit proceeds by levels: the current frontier, that is, the set of
/// nodes at distance _d_, is split into as many contiguous chunks of
/// approximately equal size as there are threads, and each thread scans the
/// successors of the nodes in its chunk. The distances are stored in a
/// [`DistanceLabeling`], and a thread claims an unlabeled successor by
/// atomically replacing [`UNVISITED`](crate::distances::UNVISITED) with _d_ +
/// 1: the thread winning the claim appends the node to a private buffer. When
/// all threads have completed their chunk, the buffers are concatenated to
/// form the next frontier. The visit ends when a level claims no node.
///
/// Since no thread starts working on level _d_ + 1 before all threads have
/// completed level _d_, all nodes claimed at level _d_ are at distance _d_ +
/// 1, and since claims are atomic, each node is labeled exactly once. Thus,
/// the visit returns exactly the same distances as a [sequential
/// visit](crate::visits::breadth_first::Seq).
///
/// The visit owns a [Rayon](rayon) thread pool with the given number of
/// threads, which is reused by all levels and all visits.
///
/// # Examples
///
/// Let's compute the distances from 0 and check that each node is claimed
/// once:
///
/// ```
/// use hopgraph::prelude::*;
/// use hopgraph_algo::prelude::*;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let graph = VecGraph::from_arcs(5, [(0, 1), (1, 2), (2, 0), (1, 3), (0, 1)])?;
/// let visit = ParLevel::with_num_threads(&graph, 2)?;
/// let claims = AtomicUsize::new(0);
/// let dist = visit.par_visit(0, |event| {
///     if let Event::Unknown { .. } = event {
///         claims.fetch_add(1, Ordering::Relaxed);
///     }
/// })?;
/// assert_eq!(dist, [0, 1, 2, 2, -1]);
/// assert_eq!(claims.load(Ordering::Relaxed), 4);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct ParLevel<G: RandomAccessGraph> {
    graph: G,
    num_threads: usize,
    thread_pool: ThreadPool,
}

impl<G: RandomAccessGraph> ParLevel<G> {
    /// Creates a level-synchronous parallel breadth-first visit using as many
    /// threads as the available parallelism.
    ///
    /// # Arguments
    /// * `graph`: the graph to visit.
    pub fn new(graph: G) -> Result<Self, BfsError> {
        let num_threads = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self::with_num_threads(graph, num_threads)
    }

    /// Creates a level-synchronous parallel breadth-first visit.
    ///
    /// # Arguments
    /// * `graph`: the graph to visit.
    /// * `num_threads`: the number of threads; it must be at least one.
    pub fn with_num_threads(graph: G, num_threads: usize) -> Result<Self, BfsError> {
        if num_threads == 0 {
            return Err(BfsError::InvalidConfiguration { num_threads });
        }
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("bfs-worker-{}", i))
            .build()?;
        Ok(Self {
            graph,
            num_threads,
            thread_pool,
        })
    }

    /// Returns the number of threads of the visit.
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }
}

impl<G: RandomAccessGraph + Sync> ParLevel<G> {
    /// Visits the graph from `source`, invoking `callback` on each
    /// [event](Event), and returns the distances from `source`.
    ///
    /// [`Init`](Event::Init), [`FrontierSize`](Event::FrontierSize) and
    /// [`Done`](Event::Done) events are generated by the calling thread;
    /// [`Unknown`](Event::Unknown) and [`Known`](Event::Known) events are
    /// generated by the threads of the pool.
    pub fn par_visit<C: Fn(Event) + Sync>(
        &self,
        source: usize,
        callback: C,
    ) -> Result<Vec<i32>, BfsError> {
        self.run(source, &callback, |nodes, distance| {
            callback(Event::FrontierSize { nodes, distance })
        })
    }

    /// Returns the distances from `source`.
    ///
    /// The progress logger is updated by the calling thread once per distance
    /// with the number of nodes at that distance.
    pub fn distances(
        &self,
        source: usize,
        pl: &mut impl ProgressLog,
    ) -> Result<Vec<i32>, BfsError> {
        pl.item_name("node");
        pl.expected_updates(Some(self.graph.num_nodes()));
        pl.start(format!(
            "Computing distances with a parallel visit using {} threads...",
            self.num_threads
        ));
        let dist = self.run(source, &|_| {}, |nodes, _| pl.update_with_count(nodes))?;
        pl.done();
        Ok(dist)
    }

    /// The visit loop; `on_level` is called by the calling thread with the
    /// size and the distance of each frontier before expanding it.
    fn run<C: Fn(Event) + Sync>(
        &self,
        source: usize,
        callback: &C,
        mut on_level: impl FnMut(usize, usize),
    ) -> Result<Vec<i32>, BfsError> {
        let num_nodes = self.graph.num_nodes();
        check_num_nodes(num_nodes)?;
        OutOfRange::check(source, num_nodes)?;

        let labeling = DistanceLabeling::new(num_nodes);
        callback(Event::Init {});
        labeling.claim(source, 0)?;
        callback(Event::Unknown {
            node: source,
            distance: 0,
        });

        let mut frontier = vec![source];
        let mut distance = 0;

        while !frontier.is_empty() {
            on_level(frontier.len(), distance);
            let succ_distance = distance + 1;
            // check_num_nodes() guarantees that this conversion is lossless
            let succ_dist = succ_distance as i32;
            let chunk_size = frontier.len().div_ceil(self.num_threads);

            // The collection of the chunks is a full join: when install()
            // returns, every claim of this level is visible to the next one
            let next_chunks = self.thread_pool.install(|| {
                frontier
                    .par_chunks(chunk_size)
                    .map(|chunk| -> Result<Vec<usize>, BfsError> {
                        let mut next = Vec::new();
                        for &node in chunk {
                            for succ in self.graph.successors(node)? {
                                if labeling.claim(succ, succ_dist)? {
                                    callback(Event::Unknown {
                                        node: succ,
                                        distance: succ_distance,
                                    });
                                    next.push(succ);
                                } else {
                                    callback(Event::Known { node: succ });
                                }
                            }
                        }
                        Ok(next)
                    })
                    .collect::<Result<Vec<_>, _>>()
            })?;

            frontier = next_chunks.concat();
            distance = succ_distance;
        }

        callback(Event::Done {});
        Ok(labeling.into_vec())
    }
}
