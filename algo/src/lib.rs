/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]

pub mod distances;
pub mod visits;

pub mod prelude {
    pub use crate::distances::*;
    pub use crate::visits::BfsError;
    pub use crate::visits::breadth_first::*;
}
