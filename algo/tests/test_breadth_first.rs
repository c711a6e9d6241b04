/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dsi_progress_logger::{no_logging, progress_logger};
use hopgraph::prelude::*;
use hopgraph_algo::prelude::*;
use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Textbook distances, computed level by level without any queue.
fn correct_distances<G: RandomAccessGraph>(graph: &G, source: usize) -> Result<Vec<i32>> {
    let mut dist = vec![-1; graph.num_nodes()];
    let mut current_frontier = vec![source];
    let mut distance = 0;
    dist[source] = 0;

    while !current_frontier.is_empty() {
        distance += 1;
        let mut next_frontier = Vec::new();
        for node in current_frontier {
            for succ in graph.successors(node)? {
                if dist[succ] == -1 {
                    dist[succ] = distance;
                    next_frontier.push(succ);
                }
            }
        }
        current_frontier = next_frontier;
    }

    Ok(dist)
}

fn seq<G: RandomAccessGraph + Sync>(graph: &G, source: usize) -> Result<Vec<i32>, BfsError> {
    Seq::new(graph).distances(source, no_logging![])
}

fn par_1<G: RandomAccessGraph + Sync>(graph: &G, source: usize) -> Result<Vec<i32>, BfsError> {
    ParLevel::with_num_threads(graph, 1)?.distances(source, no_logging![])
}

fn par_2<G: RandomAccessGraph + Sync>(graph: &G, source: usize) -> Result<Vec<i32>, BfsError> {
    ParLevel::with_num_threads(graph, 2)?.distances(source, no_logging![])
}

fn par_4<G: RandomAccessGraph + Sync>(graph: &G, source: usize) -> Result<Vec<i32>, BfsError> {
    ParLevel::with_num_threads(graph, 4)?.distances(source, no_logging![])
}

fn par_many<G: RandomAccessGraph + Sync>(graph: &G, source: usize) -> Result<Vec<i32>, BfsError> {
    ParLevel::with_num_threads(graph, graph.num_nodes() + 1)?.distances(source, no_logging![])
}

macro_rules! test_bfs_distances {
    ($distances:path, $name:ident) => {
        mod $name {
            use super::*;

            #[test]
            fn test_single_node() -> Result<()> {
                let graph = VecGraph::empty(1);
                assert_eq!($distances(&graph, 0)?, [0]);
                Ok(())
            }

            #[test]
            fn test_path() -> Result<()> {
                let graph = VecGraph::from_arcs(3, [(0, 1), (1, 2)])?;
                assert_eq!($distances(&graph, 0)?, [0, 1, 2]);
                assert_eq!($distances(&graph, 2)?, [-1, -1, 0]);
                Ok(())
            }

            #[test]
            fn test_two_cycle() -> Result<()> {
                let graph = VecGraph::from_arcs(2, [(0, 1), (1, 0)])?;
                assert_eq!($distances(&graph, 0)?, [0, 1]);
                assert_eq!($distances(&graph, 1)?, [1, 0]);
                Ok(())
            }

            #[test]
            fn test_star() -> Result<()> {
                let graph = star(100);
                let mut expected = vec![1; 101];
                expected[0] = 0;
                assert_eq!($distances(&graph, 0)?, expected);
                let dist = $distances(&graph, 17)?;
                assert_eq!(reached(&dist), 1);
                assert_eq!(dist[17], 0);
                Ok(())
            }

            #[test]
            fn test_cycle() -> Result<()> {
                let graph = cycle(11);
                assert_eq!(
                    $distances(&graph, 0)?,
                    [0, 1, 2, 3, 4, 5, 5, 4, 3, 2, 1]
                );
                Ok(())
            }

            #[test]
            fn test_lattice() -> Result<()> {
                let lattice = Lattice3d::new(7);
                let graph = lattice.to_csr();
                let dist = $distances(&graph, 0)?;
                for (node, &d) in dist.iter().enumerate() {
                    let (x, y, z) = lattice.coords(node);
                    assert_eq!(d as usize, x + y + z);
                }
                assert_eq!($distances(&lattice, 0)?, dist);
                assert_eq!(eccentricity(&dist), Some(18));
                Ok(())
            }

            #[test]
            fn test_lattice_inner_source() -> Result<()> {
                let lattice = Lattice3d::new(5);
                let dist = $distances(&lattice, lattice.index(1, 2, 3))?;
                for (node, &d) in dist.iter().enumerate() {
                    let (x, y, z) = lattice.coords(node);
                    assert_eq!(d as usize, x.abs_diff(1) + y.abs_diff(2) + z.abs_diff(3));
                }
                Ok(())
            }

            #[test]
            fn test_disconnected() -> Result<()> {
                // Two rings: 0..4 and 4..7
                let graph = VecGraph::from_arcs(
                    7,
                    [(0, 1), (1, 2), (2, 3), (3, 0), (4, 5), (5, 6), (6, 4)],
                )?;
                assert_eq!($distances(&graph, 1)?, [3, 0, 1, 2, -1, -1, -1]);
                assert_eq!($distances(&graph, 6)?, [-1, -1, -1, -1, 1, 2, 0]);
                Ok(())
            }

            #[test]
            fn test_self_loops_and_duplicates() -> Result<()> {
                let graph = VecGraph::from_arcs(
                    4,
                    [(0, 0), (0, 1), (0, 1), (1, 1), (1, 0), (1, 2), (1, 2), (2, 2)],
                )?;
                assert_eq!($distances(&graph, 0)?, [0, 1, 2, -1]);
                Ok(())
            }

            #[test]
            fn test_fn_graph() -> Result<()> {
                // A binary tree whose leaves point back to the root
                let graph = FnGraph::new(15, |x: usize| {
                    if x < 7 { vec![2 * x + 1, 2 * x + 2] } else { vec![0] }
                });
                let dist = $distances(&graph, 0)?;
                assert_eq!(dist, correct_distances(&graph, 0)?);
                assert_eq!(eccentricity(&dist), Some(3));
                assert_eq!($distances(&graph, 9)?[0], 1);
                Ok(())
            }

            #[test]
            fn test_random() -> Result<()> {
                for seed in 0..5 {
                    let graph = ErdosRenyi::new(60, 0.03, seed).build();
                    for source in [0, 17, 59] {
                        assert_eq!(
                            $distances(&graph, source)?,
                            correct_distances(&graph, source)?
                        );
                    }
                }
                Ok(())
            }

            #[test]
            fn test_source_out_of_range() {
                let graph = path(3);
                assert!(matches!(
                    $distances(&graph, 3),
                    Err(BfsError::OutOfRange(OutOfRange {
                        node: 3,
                        num_nodes: 3
                    }))
                ));
                assert!(matches!(
                    $distances(&VecGraph::empty(0), 0),
                    Err(BfsError::OutOfRange(_))
                ));
            }

            #[test]
            fn test_malformed_successor() -> Result<()> {
                let graph = FnGraph::new(3, |x: usize| match x {
                    0 => vec![1],
                    1 => vec![7],
                    _ => vec![],
                });
                assert!(matches!(
                    $distances(&graph, 0),
                    Err(BfsError::OutOfRange(OutOfRange {
                        node: 7,
                        num_nodes: 3
                    }))
                ));
                // The malformed list is never scanned
                assert_eq!($distances(&graph, 2)?, [-1, -1, 0]);
                Ok(())
            }
        }
    };
}

test_bfs_distances!(seq, seq);
test_bfs_distances!(par_1, par_1);
test_bfs_distances!(par_2, par_2);
test_bfs_distances!(par_4, par_4);
test_bfs_distances!(par_many, par_many);

#[test]
fn test_equivalence() -> Result<()> {
    for (n, p) in [(1, 0.0), (10, 0.2), (50, 0.05), (200, 0.01), (300, 0.004)] {
        let graph = ErdosRenyi::new(n, p, n as u64).build();
        let mut oracle = Seq::new(&graph);
        let engines = [1, 2, 4, n + 1]
            .into_iter()
            .map(|num_threads| ParLevel::with_num_threads(&graph, num_threads))
            .collect::<Result<Vec<_>, _>>()?;
        for source in 0..n {
            let expected = oracle.distances(source, no_logging![])?;
            for engine in &engines {
                assert_eq!(
                    engine.distances(source, no_logging![])?,
                    expected,
                    "n = {}, source = {}, threads = {}",
                    n,
                    source,
                    engine.num_threads()
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_single_assignment() -> Result<()> {
    let lattice = Lattice3d::new(12);
    let graph = lattice.to_csr();
    let visit = ParLevel::with_num_threads(&graph, 8)?;
    let claims: Vec<AtomicUsize> = (0..graph.num_nodes())
        .map(|_| AtomicUsize::new(0))
        .collect();
    let known = AtomicUsize::new(0);

    let dist = visit.par_visit(0, |event| match event {
        Event::Unknown { node, .. } => {
            claims[node].fetch_add(1, Ordering::Relaxed);
        }
        Event::Known { .. } => {
            known.fetch_add(1, Ordering::Relaxed);
        }
        _ => {}
    })?;

    for (node, count) in claims.iter().enumerate() {
        assert_eq!(count.load(Ordering::Relaxed), 1, "node {}", node);
    }
    assert_eq!(reached(&dist), graph.num_nodes());
    // Every arc is scanned once; all scans but the winning ones fail
    assert_eq!(
        known.load(Ordering::Relaxed) + graph.num_nodes() - 1,
        graph.num_arcs_hint().unwrap_or(0) as usize
    );
    Ok(())
}

#[test]
fn test_unreached_not_claimed() -> Result<()> {
    let graph = ErdosRenyi::new(100, 0.008, 3).build();
    let visit = ParLevel::with_num_threads(&graph, 3)?;
    let claims: Vec<AtomicUsize> = (0..graph.num_nodes())
        .map(|_| AtomicUsize::new(0))
        .collect();
    let dist = visit.par_visit(0, |event| {
        if let Event::Unknown { node, .. } = event {
            claims[node].fetch_add(1, Ordering::Relaxed);
        }
    })?;
    for (node, &d) in dist.iter().enumerate() {
        let expected = if d == UNVISITED { 0 } else { 1 };
        assert_eq!(claims[node].load(Ordering::Relaxed), expected);
    }
    Ok(())
}

#[test]
fn test_frontier_sizes() -> Result<()> {
    let graph = ErdosRenyi::new(500, 0.005, 0).build();

    let mut seq_sizes = BTreeMap::new();
    let mut seq_unknown = BTreeMap::new();
    Seq::new(&graph).visit(0, |event| match event {
        Event::FrontierSize { nodes, distance } => {
            assert!(seq_sizes.insert(distance, nodes).is_none());
        }
        Event::Unknown { distance, .. } => {
            *seq_unknown.entry(distance).or_insert(0) += 1;
        }
        _ => {}
    })?;
    assert_eq!(seq_sizes, seq_unknown);

    let par_sizes = Mutex::new(BTreeMap::new());
    let par_unknown = Mutex::new(BTreeMap::new());
    ParLevel::with_num_threads(&graph, 4)?.par_visit(0, |event| match event {
        Event::FrontierSize { nodes, distance } => {
            assert!(par_sizes.lock().unwrap().insert(distance, nodes).is_none());
        }
        Event::Unknown { distance, .. } => {
            *par_unknown.lock().unwrap().entry(distance).or_insert(0) += 1;
        }
        _ => {}
    })?;
    let par_sizes = par_sizes.into_inner().unwrap();
    assert_eq!(par_sizes, par_unknown.into_inner().unwrap());
    assert_eq!(par_sizes, seq_sizes);
    Ok(())
}

#[test]
fn test_init_and_done() -> Result<()> {
    let graph = cycle(20);
    let events = Mutex::new(Vec::new());
    ParLevel::with_num_threads(&graph, 2)?.par_visit(5, |event| {
        events.lock().unwrap().push(event);
    })?;
    let events = events.into_inner().unwrap();
    assert_eq!(events.first(), Some(&Event::Init {}));
    assert_eq!(events.last(), Some(&Event::Done {}));
    assert_eq!(
        events.iter().filter(|e| matches!(e, Event::Init {})).count(),
        1
    );

    let mut events = Vec::new();
    Seq::new(&graph).visit(5, |event| events.push(event))?;
    assert_eq!(events.first(), Some(&Event::Init {}));
    assert_eq!(
        events.get(1),
        Some(&Event::Unknown {
            node: 5,
            distance: 0
        })
    );
    assert_eq!(events.last(), Some(&Event::Done {}));
    Ok(())
}

#[test]
fn test_no_events_on_error() -> Result<()> {
    let graph = path(4);
    let count = AtomicUsize::new(0);
    let visit = ParLevel::with_num_threads(&graph, 2)?;
    assert!(
        visit
            .par_visit(4, |_| {
                count.fetch_add(1, Ordering::Relaxed);
            })
            .is_err()
    );
    assert_eq!(count.load(Ordering::Relaxed), 0);
    Ok(())
}

#[test]
fn test_determinism() -> Result<()> {
    let graph = ErdosRenyi::new(400, 0.01, 42).build();
    let visit = ParLevel::with_num_threads(&graph, 4)?;
    let first = visit.distances(7, no_logging![])?;
    for _ in 0..20 {
        assert_eq!(visit.distances(7, no_logging![])?, first);
    }
    Ok(())
}

#[test]
fn test_invalid_configuration() {
    let graph = path(3);
    assert!(matches!(
        ParLevel::with_num_threads(&graph, 0),
        Err(BfsError::InvalidConfiguration { num_threads: 0 })
    ));
}

#[test]
fn test_default_num_threads() -> Result<()> {
    let graph = star(3);
    let visit = ParLevel::new(&graph)?;
    assert!(visit.num_threads() >= 1);
    assert_eq!(visit.distances(0, no_logging![])?, [0, 1, 1, 1]);
    Ok(())
}

#[test]
fn test_progress_logging() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let graph = Lattice3d::new(10);
    let mut pl = progress_logger![display_memory = true];
    let seq = Seq::new(&graph).distances(0, &mut pl)?;
    let par = ParLevel::with_num_threads(&graph, 4)?.distances(0, &mut pl)?;
    assert_eq!(seq, par);
    Ok(())
}

#[cfg_attr(feature = "slow_tests", test)]
#[cfg_attr(not(feature = "slow_tests"), allow(dead_code))]
fn test_large_lattice() -> Result<()> {
    let lattice = Lattice3d::new(150);
    let graph = lattice.to_csr();
    let visit = ParLevel::new(&graph)?;
    let dist = visit.distances(0, no_logging![])?;
    for (node, &d) in dist.iter().enumerate() {
        let (x, y, z) = lattice.coords(node);
        assert_eq!(d as usize, x + y + z);
    }
    assert_eq!(dist, Seq::new(&graph).distances(0, no_logging![])?);
    Ok(())
}
