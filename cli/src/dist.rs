/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::{DistVectorFormat, GlobalArgs, GraphArgs, NumThreadsArg};
use anyhow::Result;
use clap::Parser;
use dsi_progress_logger::prelude::*;
use hopgraph_algo::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dist", about = "Computes the distances from a node using a breadth-first visit (distances are printed on stdout, -1 for unreachable nodes).", long_about = None)]
pub struct CliArgs {
    #[clap(flatten)]
    pub graph: GraphArgs,

    #[arg(short, long, default_value_t = 0)]
    /// The source of the visit.
    pub source: usize,

    #[arg(long)]
    /// Use the sequential visit instead of the parallel one.
    pub seq: bool,

    #[arg(short, long)]
    /// Store the distances at this path instead of printing them on stdout.
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = DistVectorFormat::Ascii)]
    /// The format of the distances.
    pub fmt: DistVectorFormat,

    #[clap(flatten)]
    pub num_threads: NumThreadsArg,
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let dist = distances(&global_args, &args)?;

    log::info!(
        "Reached {} nodes out of {}",
        reached(&dist),
        dist.len()
    );
    match eccentricity(&dist) {
        Some(ecc) => log::info!("Eccentricity of node {}: {}", args.source, ecc),
        None => log::info!("No node reached"),
    }

    match &args.output {
        Some(path) => args.fmt.store(path, &dist)?,
        None => args
            .fmt
            .write(std::io::BufWriter::new(std::io::stdout().lock()), &dist)?,
    }
    Ok(())
}

/// Loads the graph and visits it as prescribed by the arguments.
pub fn distances(global_args: &GlobalArgs, args: &CliArgs) -> Result<Vec<i32>> {
    let input = args.graph.load(global_args)?;

    let mut pl = ProgressLogger::default();
    pl.display_memory(true);
    global_args.configure(&mut pl);

    Ok(if args.seq {
        Seq::new(&input.graph).distances(args.source, &mut pl)?
    } else {
        log::info!("Using {} threads", args.num_threads.num_threads);
        ParLevel::with_num_threads(&input.graph, args.num_threads.num_threads)?
            .distances(args.source, &mut pl)?
    })
}
