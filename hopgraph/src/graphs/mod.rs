/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Implementations of graphs.

pub mod classic;
pub mod csr_graph;
pub mod fn_graph;
pub mod lattice;
pub mod random;
pub mod vec_graph;

pub mod prelude {
    pub use super::classic::{cycle, path, star};
    pub use super::csr_graph::{CsrError, CsrGraph};
    pub use super::fn_graph::FnGraph;
    pub use super::lattice::Lattice3d;
    pub use super::random::ErdosRenyi;
    pub use super::vec_graph::VecGraph;
}
