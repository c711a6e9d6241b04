/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::csr_graph::CsrGraph;
use crate::traits::{OutOfRange, RandomAccessGraph};
use rayon::prelude::*;

/// A three-dimensional lattice with six-directional adjacency and no
/// wraparound.
///
/// The lattice has `side`³ nodes; node `(x, y, z)` has index `x · side² + y ·
/// side + z`. Successors are returned in the order `+x`, `-x`, `+y`, `-y`,
/// `+z`, `-z`, skipping directions that fall off the lattice.
///
/// The lattice computes successors on the fly, so it can be visited directly;
/// [`to_csr`](Lattice3d::to_csr) materializes it, which is usually faster for
/// repeated visits.
///
/// The breadth-first distance of `(x, y, z)` from the corner `(0, 0, 0)` is
/// `x + y + z`.
///
/// # Examples
///
/// ```
/// use hopgraph::prelude::*;
///
/// let lattice = Lattice3d::new(3);
/// assert_eq!(lattice.num_nodes(), 27);
/// assert_eq!(lattice.index(1, 2, 0), 15);
/// assert_eq!(lattice.coords(15), (1, 2, 0));
/// assert_eq!(lattice.outdegree(lattice.index(1, 1, 1)).unwrap(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lattice3d {
    side: usize,
    num_nodes: usize,
}

impl Lattice3d {
    /// Creates a lattice of given side.
    ///
    /// # Panics
    ///
    /// If `side`³ does not fit a `usize`.
    pub fn new(side: usize) -> Self {
        let num_nodes = side
            .checked_pow(3)
            .unwrap_or_else(|| panic!("A lattice of side {} has too many nodes", side));
        Self { side, num_nodes }
    }

    /// Returns the side of the lattice.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Returns the index of the node with given coordinates.
    #[inline(always)]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.side && y < self.side && z < self.side);
        (x * self.side + y) * self.side + z
    }

    /// Returns the coordinates of the node with given index.
    #[inline(always)]
    pub fn coords(&self, node: usize) -> (usize, usize, usize) {
        let z = node % self.side;
        let rest = node / self.side;
        (rest / self.side, rest % self.side, z)
    }

    /// Returns the number of successors of a valid node.
    fn degree(&self, node: usize) -> usize {
        let last = self.side - 1;
        let (x, y, z) = self.coords(node);
        [x, y, z]
            .into_iter()
            .map(|c| (c > 0) as usize + (c < last) as usize)
            .sum()
    }

    /// Materializes the lattice as a [`CsrGraph`], building the successor
    /// lists in parallel on the current Rayon thread pool.
    pub fn to_csr(&self) -> CsrGraph {
        log::debug!(
            "Building a {0}×{0}×{0} lattice ({1} nodes)",
            self.side,
            self.num_nodes
        );
        let mut dcf: Vec<usize> = Vec::with_capacity(self.num_nodes + 1);
        dcf.push(0);
        dcf.par_extend((0..self.num_nodes).into_par_iter().map(|x| self.degree(x)));
        for x in 0..self.num_nodes {
            dcf[x + 1] += dcf[x];
        }
        let successors: Vec<usize> = (0..self.num_nodes)
            .into_par_iter()
            .flat_map_iter(|x| self.neighbors(x))
            .collect();
        debug_assert_eq!(dcf.last(), Some(&successors.len()));
        CsrGraph::from_parts_unchecked(dcf.into(), successors.into())
    }

    /// Returns the successors of a valid node.
    fn neighbors(&self, node: usize) -> LatticeSuccessors {
        let (x, y, z) = self.coords(node);
        let last = self.side - 1;
        let side2 = self.side * self.side;
        [
            (x < last).then(|| node + side2),
            (x > 0).then(|| node - side2),
            (y < last).then(|| node + self.side),
            (y > 0).then(|| node - self.side),
            (z < last).then(|| node + 1),
            (z > 0).then(|| node - 1),
        ]
        .into_iter()
        .flatten()
    }
}

/// The iterator on the successors of a [`Lattice3d`] node.
pub type LatticeSuccessors = core::iter::Flatten<core::array::IntoIter<Option<usize>, 6>>;

impl RandomAccessGraph for Lattice3d {
    type Successors<'succ>
        = LatticeSuccessors
    where
        Self: 'succ;

    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    fn num_arcs_hint(&self) -> Option<u64> {
        // Each of the three axes contributes side² lines of side - 1
        // undirected edges, each yielding two arcs
        let side = self.side as u64;
        Some(6 * side * side * side.saturating_sub(1))
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> Result<Self::Successors<'_>, OutOfRange> {
        Ok(self.neighbors(OutOfRange::check(node, self.num_nodes)?))
    }

    #[inline(always)]
    fn outdegree(&self, node: usize) -> Result<usize, OutOfRange> {
        Ok(self.degree(OutOfRange::check(node, self.num_nodes)?))
    }
}
