/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::traits::{OutOfRange, RandomAccessGraph};
use std::iter::Copied;
use std::slice::Iter;
use thiserror::Error;

/// Errors returned when building a [`CsrGraph`] from its parts.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsrError {
    /// The degree-cumulative function does not start at zero, is not
    /// monotone, or does not end at the number of successors.
    #[error(
        "Invalid degree-cumulative function of {dcf_len} elements for {num_successors} successors"
    )]
    InvalidDcf {
        dcf_len: usize,
        num_successors: usize,
    },
    /// A successor is not a node of the graph.
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
}

/// A compressed sparse-row graph.
///
/// The graph stores the degree-cumulative function (DCF) and the successors
/// packed in a single slice: the successors of node `x` are
/// `successors[dcf[x]..dcf[x + 1]]`. The DCF has thus `num_nodes + 1`
/// elements, the first of which is zero.
///
/// Successor lists keep the order in which they were provided, and may contain
/// duplicates and self-loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    dcf: Box<[usize]>,
    successors: Box<[usize]>,
}

impl core::default::Default for CsrGraph {
    fn default() -> Self {
        Self {
            dcf: vec![0].into(),
            successors: vec![].into(),
        }
    }
}

impl CsrGraph {
    /// Creates an empty CSR graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new CSR graph from the given degree-cumulative function and
    /// successors, checking that the DCF is monotone, starts at zero, ends at
    /// the number of successors, and that all successors are valid nodes.
    pub fn from_parts(dcf: Box<[usize]>, successors: Box<[usize]>) -> Result<Self, CsrError> {
        let num_nodes = dcf.len().saturating_sub(1);
        let consistent = dcf.first() == Some(&0)
            && dcf.last() == Some(&successors.len())
            && dcf.windows(2).all(|w| w[0] <= w[1]);
        if !consistent {
            return Err(CsrError::InvalidDcf {
                dcf_len: dcf.len(),
                num_successors: successors.len(),
            });
        }
        for &succ in successors.iter() {
            OutOfRange::check(succ, num_nodes)?;
        }
        Ok(Self { dcf, successors })
    }

    /// Creates a CSR graph from parts that are consistent by construction.
    pub(crate) fn from_parts_unchecked(dcf: Box<[usize]>, successors: Box<[usize]>) -> Self {
        debug_assert_eq!(dcf.last(), Some(&successors.len()));
        Self { dcf, successors }
    }

    /// Creates a CSR graph with `num_nodes` nodes from a list of arcs.
    ///
    /// Arcs are grouped by source using a counting pass, so the relative
    /// order of the successors of each node is the order of the list.
    pub fn from_arcs(num_nodes: usize, arcs: &[(usize, usize)]) -> Result<Self, OutOfRange> {
        let mut dcf = vec![0; num_nodes + 1];
        for &(u, v) in arcs {
            OutOfRange::check(v, num_nodes)?;
            dcf[OutOfRange::check(u, num_nodes)? + 1] += 1;
        }
        // Prefix sums
        for x in 0..num_nodes {
            dcf[x + 1] += dcf[x];
        }
        let mut pos = dcf[..num_nodes].to_vec();
        let mut successors = vec![0; arcs.len()];
        for &(u, v) in arcs {
            successors[pos[u]] = v;
            pos[u] += 1;
        }
        Ok(Self {
            dcf: dcf.into(),
            successors: successors.into(),
        })
    }

    /// Copies a [`RandomAccessGraph`] into a CSR graph.
    pub fn from_graph<G: RandomAccessGraph>(graph: &G) -> Result<Self, OutOfRange> {
        let num_nodes = graph.num_nodes();
        let mut dcf = Vec::with_capacity(num_nodes + 1);
        dcf.push(0);
        let mut successors =
            Vec::with_capacity(graph.num_arcs_hint().unwrap_or(0).try_into().unwrap_or(0));
        for node in 0..num_nodes {
            for succ in graph.successors(node)? {
                successors.push(OutOfRange::check(succ, num_nodes)?);
            }
            dcf.push(successors.len());
        }
        Ok(Self {
            dcf: dcf.into(),
            successors: successors.into(),
        })
    }

    /// Returns the degree-cumulative function.
    pub fn dcf(&self) -> &[usize] {
        &self.dcf
    }

    /// Returns the packed successors.
    pub fn packed_successors(&self) -> &[usize] {
        &self.successors
    }

    /// Consumes the graph, returning the degree-cumulative function and the
    /// packed successors.
    pub fn into_inner(self) -> (Box<[usize]>, Box<[usize]>) {
        (self.dcf, self.successors)
    }
}

impl RandomAccessGraph for CsrGraph {
    type Successors<'succ>
        = Copied<Iter<'succ, usize>>
    where
        Self: 'succ;

    #[inline(always)]
    fn num_nodes(&self) -> usize {
        self.dcf.len() - 1
    }

    #[inline(always)]
    fn num_arcs_hint(&self) -> Option<u64> {
        Some(self.successors.len() as u64)
    }

    #[inline(always)]
    fn successors(&self, node: usize) -> Result<Self::Successors<'_>, OutOfRange> {
        let node = OutOfRange::check(node, self.num_nodes())?;
        Ok(self.successors[self.dcf[node]..self.dcf[node + 1]]
            .iter()
            .copied())
    }

    #[inline(always)]
    fn outdegree(&self, node: usize) -> Result<usize, OutOfRange> {
        let node = OutOfRange::check(node, self.num_nodes())?;
        Ok(self.dcf[node + 1] - self.dcf[node])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::vec_graph::VecGraph;

    #[test]
    fn test_from_arcs() -> Result<(), OutOfRange> {
        let arcs = [(2, 0), (0, 1), (2, 2), (0, 3), (2, 0)];
        let g = CsrGraph::from_arcs(4, &arcs)?;
        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.num_arcs_hint(), Some(5));
        assert_eq!(g.dcf(), &[0, 2, 2, 5, 5]);
        assert_eq!(g.successors(0)?.collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(g.successors(2)?.collect::<Vec<_>>(), vec![0, 2, 0]);
        assert_eq!(g.outdegree(1)?, 0);
        assert!(g.successors(4).is_err());
        Ok(())
    }

    #[test]
    fn test_from_graph() -> Result<(), OutOfRange> {
        let v = VecGraph::from_arcs(3, [(0, 1), (1, 2), (2, 0), (1, 0)])?;
        let c = CsrGraph::from_graph(&v)?;
        for node in 0..3 {
            assert_eq!(
                c.successors(node)?.collect::<Vec<_>>(),
                v.successors(node)?.collect::<Vec<_>>()
            );
        }
        Ok(())
    }

    #[test]
    fn test_from_parts() {
        assert!(CsrGraph::from_parts(vec![0, 1, 2].into(), vec![1, 0].into()).is_ok());
        assert_eq!(
            CsrGraph::from_parts(vec![0, 2, 1].into(), vec![1, 0].into()),
            Err(CsrError::InvalidDcf {
                dcf_len: 3,
                num_successors: 2
            })
        );
        assert_eq!(
            CsrGraph::from_parts(vec![1, 2].into(), vec![0].into()),
            Err(CsrError::InvalidDcf {
                dcf_len: 2,
                num_successors: 1
            })
        );
        assert_eq!(
            CsrGraph::from_parts(vec![].into(), vec![].into()),
            Err(CsrError::InvalidDcf {
                dcf_len: 0,
                num_successors: 0
            })
        );
        assert_eq!(
            CsrGraph::from_parts(vec![0, 1, 2].into(), vec![1, 2].into()),
            Err(CsrError::OutOfRange(OutOfRange {
                node: 2,
                num_nodes: 2
            }))
        );
        assert_eq!(CsrGraph::new().num_nodes(), 0);
    }
}
