/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Graph input for the command-line tools.

use crate::GlobalArgs;
use anyhow::{Context, Result, ensure};
use clap::Args;
use dsi_progress_logger::prelude::*;
use hopgraph::prelude::*;
use std::io::BufRead;
use std::path::PathBuf;

#[derive(Args, Debug)]
/// Shared CLI arguments for reading files containing arcs.
pub struct ArcsArgs {
    #[arg(long, default_value_t = '#')]
    /// Ignore lines that start with this symbol.
    pub line_comment_symbol: char,

    #[arg(long, default_value_t = 0)]
    /// How many lines to skip, ignoring comment lines.
    pub lines_to_skip: usize,

    #[arg(long, default_value_t = '\t')]
    /// The column separator.
    pub separator: char,

    #[arg(long, default_value_t = 0)]
    /// The index of the column containing the source node of an arc.
    pub source_column: usize,

    #[arg(long, default_value_t = 1)]
    /// The index of the column containing the target node of an arc.
    pub target_column: usize,

    #[arg(long)]
    /// The number of nodes in the graph; if specified, it will be used instead
    /// of the number inferred from the arcs. This is useful to add isolated
    /// nodes at the end of the graph.
    pub num_nodes: Option<usize>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
/// Where the graph comes from.
pub struct GraphSource {
    #[arg(long)]
    /// Generate a three-dimensional lattice with the given side, with
    /// six-directional adjacency and no wraparound.
    pub lattice: Option<usize>,

    #[arg(long)]
    /// Read a list of arcs, one per line, with numerical node identifiers
    /// starting from zero; use "-" for standard input.
    pub arcs: Option<PathBuf>,
}

#[derive(Args, Debug)]
/// Shared CLI arguments for commands reading a graph.
pub struct GraphArgs {
    #[clap(flatten)]
    pub source: GraphSource,

    #[clap(flatten)]
    pub arcs_args: ArcsArgs,
}

/// A graph ready to be visited.
#[derive(Debug)]
pub struct InputGraph {
    /// The graph in compressed sparse-row form.
    pub graph: CsrGraph,
    /// The lattice the graph was generated from, if any.
    pub lattice: Option<Lattice3d>,
}

impl GraphArgs {
    /// Builds or reads the graph.
    pub fn load(&self, global_args: &GlobalArgs) -> Result<InputGraph> {
        match (&self.source.lattice, &self.source.arcs) {
            (Some(side), _) => {
                ensure!(*side > 0, "The side of the lattice must be positive");
                ensure!(
                    side.checked_pow(3)
                        .is_some_and(|num_nodes| num_nodes <= i32::MAX as usize),
                    "A lattice of side {} has too many nodes (at most {} are supported)",
                    side,
                    i32::MAX
                );
                let lattice = Lattice3d::new(*side);
                log::info!(
                    "Building a lattice of side {} ({} nodes)...",
                    side,
                    lattice.num_nodes()
                );
                let graph = lattice.to_csr();
                Ok(InputGraph {
                    graph,
                    lattice: Some(lattice),
                })
            }
            (None, Some(path)) if path.as_os_str() == "-" => {
                log::info!("Reading arcs from stdin...");
                let graph = read_arcs(std::io::stdin().lock(), &self.arcs_args, global_args)?;
                Ok(InputGraph {
                    graph,
                    lattice: None,
                })
            }
            (None, Some(path)) => {
                log::info!("Reading arcs from {}...", path.display());
                let file = std::fs::File::open(path)
                    .with_context(|| format!("Could not open {}", path.display()))?;
                let graph = read_arcs(std::io::BufReader::new(file), &self.arcs_args, global_args)?;
                Ok(InputGraph {
                    graph,
                    lattice: None,
                })
            }
            (None, None) => anyhow::bail!("You must specify either --lattice or --arcs"),
        }
    }
}

/// Reads a list of arcs and returns the corresponding graph.
///
/// Lines with too few columns are skipped with a warning; identifiers that
/// are not nonnegative integers are errors.
pub fn read_arcs(
    reader: impl BufRead,
    arcs_args: &ArcsArgs,
    global_args: &GlobalArgs,
) -> Result<CsrGraph> {
    let mut pl = ProgressLogger::default();
    pl.display_memory(true).item_name("arc");
    global_args.configure(&mut pl);
    pl.start("Reading arcs...");

    let biggest_idx = arcs_args.source_column.max(arcs_args.target_column);
    let mut arcs = Vec::new();
    let mut num_nodes = 0;
    let mut skipped = 0;

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Could not read line {}", line_num))?;
        if line.trim().is_empty() || line.trim().starts_with(arcs_args.line_comment_symbol) {
            continue;
        }
        if skipped < arcs_args.lines_to_skip {
            skipped += 1;
            continue;
        }

        let vals = line.split(arcs_args.separator).collect::<Vec<_>>();
        if vals.get(biggest_idx).is_none() {
            log::warn!(
                "Line {}: {:?} does not have enough columns: got {} columns but expected at least {} columns separated by {:?} (you can change the separator using the --separator option)",
                line_num,
                line,
                vals.len(),
                biggest_idx + 1,
                arcs_args.separator,
            );
            continue;
        }

        let parse = |column: usize, what: &str| -> Result<usize> {
            let val = vals[column].trim();
            val.parse::<usize>().with_context(|| {
                format!(
                    "Error parsing as integer {} column value {:?} at line {}",
                    what, val, line_num
                )
            })
        };
        let src = parse(arcs_args.source_column, "source")?;
        let dst = parse(arcs_args.target_column, "target")?;

        let max_node = src.max(dst);
        num_nodes = num_nodes.max(max_node.checked_add(1).with_context(|| {
            format!("Node identifier {} at line {} is too large", max_node, line_num)
        })?);
        arcs.push((src, dst));
        pl.light_update();
    }
    pl.done();

    if let Some(user_num_nodes) = arcs_args.num_nodes {
        ensure!(
            user_num_nodes >= num_nodes,
            "The number of nodes specified by --num-nodes={} is smaller than the number of nodes found in the arcs: {}",
            user_num_nodes,
            num_nodes
        );
        num_nodes = user_num_nodes;
    }

    log::info!("Arcs read: {} Nodes: {}", arcs.len(), num_nodes);
    if arcs.is_empty() {
        log::warn!(
            "No arcs read! Check that the --separator={:?} value is correct and that the --source-column={:?} and --target-column={:?} values are correct.",
            arcs_args.separator,
            arcs_args.source_column,
            arcs_args.target_column
        );
    }

    Ok(CsrGraph::from_arcs(num_nodes, &arcs)?)
}
