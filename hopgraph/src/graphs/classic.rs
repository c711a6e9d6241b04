/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Small deterministic graphs whose breadth-first distances are known in
//! closed form.

use crate::graphs::vec_graph::VecGraph;

/// Returns a directed star with center 0 and `leaves` leaves `1..=leaves`.
///
/// Only the center has successors.
pub fn star(leaves: usize) -> VecGraph {
    let mut succ = vec![Vec::new(); leaves + 1];
    succ[0] = (1..=leaves).collect();
    VecGraph::from_adjacency_unchecked(succ)
}

/// Returns the directed path 0 → 1 → ⋯ → `n` - 1.
pub fn path(n: usize) -> VecGraph {
    VecGraph::from_adjacency_unchecked(
        (0..n)
            .map(|x| if x + 1 < n { vec![x + 1] } else { vec![] })
            .collect(),
    )
}

/// Returns the bidirectional ring on `n` nodes, in which node `x` has
/// successors `x - 1` and `x + 1` modulo `n`, in this order.
///
/// For `n` < 3 the ring contains duplicate arcs or self-loops.
pub fn cycle(n: usize) -> VecGraph {
    VecGraph::from_adjacency_unchecked(
        (0..n)
            .map(|x| vec![(x + n - 1) % n, (x + 1) % n])
            .collect(),
    )
}
