/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::UNVISITED;
use hopgraph::traits::OutOfRange;
use std::sync::atomic::{AtomicI32, Ordering};

/// A concurrent distance labeling.
///
/// All labels are initially [`UNVISITED`]. A label can be set only once, by
/// [claiming](DistanceLabeling::claim) the node: among concurrent claims on
/// the same node, exactly one succeeds.
///
/// All operations use [relaxed](Ordering::Relaxed) ordering: claims are
/// atomic, but the visibility of labels across threads relies on external
/// synchronization, such as the completion of a parallel iterator.
#[derive(Debug)]
pub struct DistanceLabeling {
    dist: Box<[AtomicI32]>,
}

impl DistanceLabeling {
    /// Creates a labeling of `num_nodes` nodes, all [`UNVISITED`].
    pub fn new(num_nodes: usize) -> Self {
        Self {
            dist: (0..num_nodes).map(|_| AtomicI32::new(UNVISITED)).collect(),
        }
    }

    /// Returns the number of nodes, visited or not.
    pub fn len(&self) -> usize {
        self.dist.len()
    }

    /// Returns true if the labeling has no nodes.
    pub fn is_empty(&self) -> bool {
        self.dist.is_empty()
    }

    /// Tries to label `node` with `distance`.
    ///
    /// Returns true if the node was [`UNVISITED`] and it is now labeled
    /// with `distance`, false if it was already labeled.
    pub fn claim(&self, node: usize, distance: i32) -> Result<bool, OutOfRange> {
        debug_assert_ne!(distance, UNVISITED);
        Ok(self
            .slot(node)?
            .compare_exchange(UNVISITED, distance, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok())
    }

    /// Returns the label of `node`.
    pub fn get(&self, node: usize) -> Result<i32, OutOfRange> {
        Ok(self.slot(node)?.load(Ordering::Relaxed))
    }

    /// Consumes the labeling, returning the labels.
    pub fn into_vec(self) -> Vec<i32> {
        self.dist
            .into_vec()
            .into_iter()
            .map(AtomicI32::into_inner)
            .collect()
    }

    fn slot(&self, node: usize) -> Result<&AtomicI32, OutOfRange> {
        self.dist.get(node).ok_or(OutOfRange {
            node,
            num_nodes: self.dist.len(),
        })
    }
}
