/*
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::vec_graph::VecGraph;
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Provides an implementation of Erdös-Rényi random directed graphs.
///
/// The Erdös-Rényi random graph model is a simple model for generating random
/// graphs. It is parameterized by the number of nodes `n` and the probability
/// `p` of an arc between any two nodes. In this implementation, loops are never
/// included.
///
/// Generation takes time quadratic in `n`, so the graph is materialized once
/// into a [`VecGraph`] by [`build`](ErdosRenyi::build). The same seed always
/// yields the same graph.
#[derive(Debug, Clone)]
pub struct ErdosRenyi {
    n: usize,
    p: f64,
    seed: u64,
}

impl ErdosRenyi {
    /// Creates a new Erdös-Rényi random graph, given the number of
    /// nodes, the probability of an arc between any two nodes, and a
    /// seed for the [pseudorandom number generator](SmallRng).
    ///
    /// # Panics
    ///
    /// If `p` is not in [0..1].
    pub fn new(n: usize, p: f64, seed: u64) -> Self {
        assert!((0.0..=1.0).contains(&p), "p must be in [0..1]");
        Self { n, p, seed }
    }

    /// Generates the graph.
    pub fn build(&self) -> VecGraph {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        VecGraph::from_adjacency_unchecked(
            (0..self.n)
                .map(|x| {
                    (0..self.n)
                        .filter(|&y| y != x && rng.random_bool(self.p))
                        .collect()
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::RandomAccessGraph;

    #[test]
    fn test_er() {
        let g = ErdosRenyi::new(50, 0.1, 0).build();
        assert_eq!(g.num_nodes(), 50);
        assert_eq!(g, ErdosRenyi::new(50, 0.1, 0).build());
        for (x, succ) in g.into_adjacency().into_iter().enumerate() {
            assert!(!succ.contains(&x));
            assert!(succ.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_extremes() {
        assert_eq!(ErdosRenyi::new(10, 0.0, 1).build().num_arcs_hint(), Some(0));
        assert_eq!(ErdosRenyi::new(10, 1.0, 1).build().num_arcs_hint(), Some(90));
    }
}
