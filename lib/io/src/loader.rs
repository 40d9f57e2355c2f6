use anyhow::{bail, Context, Result};
use cascata_core::{Graph, NodeId};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Load a retweet graph from an edge-list text file.
///
/// One directed edge per line, `from to`, whitespace-separated integer ids;
/// `to` is the user who retweeted content originating at `from`. Blank lines
/// and lines starting with `#` are skipped. Both endpoints are added as
/// vertices before the edge, so the same id may appear on any number of
/// lines and a repeated pair raises the edge weight.
pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<Graph> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("failed to open edge list {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut graph = Graph::new();
    let mut edges = 0u64;
    for (index, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("failed to read {}", path.display()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (from, to) = parse_edge(trimmed)
            .with_context(|| format!("{}:{}", path.display(), index + 1))?;
        graph.add_vertex(from);
        graph.add_vertex(to);
        graph.add_edge(from, to)?;
        edges += 1;
    }

    info!(
        "loaded {} with {} nodes and {} retweets",
        path.display(),
        graph.num_nodes(),
        edges
    );
    Ok(graph)
}

fn parse_edge(line: &str) -> Result<(NodeId, NodeId)> {
    let mut parts = line.split_whitespace();
    let from = parts
        .next()
        .context("missing origin id")?
        .parse::<NodeId>()
        .context("origin id is not an integer")?;
    let to = parts
        .next()
        .context("missing retweeter id")?
        .parse::<NodeId>()
        .context("retweeter id is not an integer")?;
    if parts.next().is_some() {
        bail!("expected exactly two ids per line");
    }
    Ok((from, to))
}
