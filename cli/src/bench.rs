/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Sebastiano Vigna
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::{GlobalArgs, GraphArgs, NumThreadsArg, pretty_print_elapsed};
use anyhow::{Result, ensure};
use clap::Parser;
use dsi_progress_logger::no_logging;
use hopgraph::prelude::*;
use hopgraph_algo::prelude::*;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "bench", about = "Benchmarks the sequential and the parallel breadth-first visits.", long_about = None)]
pub struct CliArgs {
    #[clap(flatten)]
    pub graph: GraphArgs,

    #[arg(short, long, default_value_t = 0)]
    /// The source of the visits.
    pub source: usize,

    /// Number of repeats of each visit.
    #[arg(short = 'R', long, default_value_t = 5)]
    pub repeats: usize,

    #[arg(long)]
    /// Check that the two visits return the same distances (and, on
    /// lattices, that distances are Manhattan distances).
    pub check: bool,

    #[clap(flatten)]
    pub num_threads: NumThreadsArg,
}

/// Timings of a benchmark.
#[derive(Debug, Clone)]
pub struct Timings {
    /// The duration of each sequential run.
    pub seq: Vec<Duration>,
    /// The duration of each parallel run.
    pub par: Vec<Duration>,
}

impl Timings {
    /// Returns the average duration of the sequential runs.
    pub fn avg_seq(&self) -> Duration {
        avg(&self.seq)
    }

    /// Returns the average duration of the parallel runs.
    pub fn avg_par(&self) -> Duration {
        avg(&self.par)
    }

    /// Returns the ratio between the average sequential and parallel times.
    pub fn speedup(&self) -> f64 {
        self.avg_seq().as_secs_f64() / self.avg_par().as_secs_f64()
    }
}

fn avg(runs: &[Duration]) -> Duration {
    if runs.is_empty() {
        Duration::ZERO
    } else {
        runs.iter().sum::<Duration>() / runs.len() as u32
    }
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let timings = bench(&global_args, &args)?;

    log::info!(
        "Sequential visit: average {}",
        pretty_print_elapsed(timings.avg_seq().as_secs_f64())
    );
    log::info!(
        "Parallel visit ({} threads): average {}",
        args.num_threads.num_threads,
        pretty_print_elapsed(timings.avg_par().as_secs_f64())
    );
    log::info!("Speedup is {:.2}x", timings.speedup());
    Ok(())
}

/// Runs the benchmark, logging each run.
pub fn bench(global_args: &GlobalArgs, args: &CliArgs) -> Result<Timings> {
    ensure!(args.repeats > 0, "The number of repeats must be positive");
    ensure!(
        args.repeats <= u32::MAX as usize,
        "Too many repeats: {}",
        args.repeats
    );
    let input = args.graph.load(global_args)?;
    let graph = &input.graph;

    let mut seq_visit = Seq::new(graph);
    let mut seq_dist = Vec::new();
    let mut seq = Vec::with_capacity(args.repeats);
    log::info!("Sequential visit");
    for run in 0..args.repeats {
        let start = Instant::now();
        seq_dist = seq_visit.distances(args.source, no_logging![])?;
        let elapsed = start.elapsed();
        log::info!("Run {}: {}", run + 1, pretty_print_elapsed(elapsed.as_secs_f64()));
        seq.push(elapsed);
    }

    // The pool is built once, outside of the timed runs
    let par_visit = ParLevel::with_num_threads(graph, args.num_threads.num_threads)?;
    let mut par_dist = Vec::new();
    let mut par = Vec::with_capacity(args.repeats);
    log::info!("Parallel visit");
    for run in 0..args.repeats {
        let start = Instant::now();
        par_dist = par_visit.distances(args.source, no_logging![])?;
        let elapsed = start.elapsed();
        log::info!("Run {}: {}", run + 1, pretty_print_elapsed(elapsed.as_secs_f64()));
        par.push(elapsed);
    }

    if args.check {
        check(&input, args.source, &seq_dist, &par_dist)?;
        log::info!("Check passed");
    }

    Ok(Timings { seq, par })
}

fn check(input: &crate::InputGraph, source: usize, seq: &[i32], par: &[i32]) -> Result<()> {
    if let Some((node, (s, p))) = seq
        .iter()
        .zip(par)
        .enumerate()
        .find(|(_, (s, p))| s != p)
    {
        anyhow::bail!(
            "Node {}: the sequential visit returned distance {}, but the parallel visit returned {}",
            node,
            s,
            p
        );
    }
    ensure!(
        seq.len() == par.len(),
        "The visits returned labelings of different lengths"
    );
    if let Some(lattice) = &input.lattice {
        // On a lattice, distances are Manhattan distances
        let (x0, y0, z0) = lattice.coords(source);
        for (node, &d) in par.iter().enumerate() {
            let (x, y, z) = lattice.coords(node);
            ensure!(
                d >= 0 && d as usize == x.abs_diff(x0) + y.abs_diff(y0) + z.abs_diff(z0),
                "Node ({}, {}, {}) has distance {} from ({}, {}, {})",
                x,
                y,
                z,
                d,
                x0,
                y0,
                z0
            );
        }
    }
    log::info!(
        "Reached {} nodes out of {}, eccentricity {:?}",
        reached(par),
        input.graph.num_nodes(),
        eccentricity(par)
    );
    Ok(())
}
