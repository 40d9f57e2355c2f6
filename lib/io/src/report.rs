use anyhow::{Context, Result};
use cascata_core::{CascadeEntry, Graph, InfluencerGraph, NodeId};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Write the influencer-extraction report: one summary line for the source
/// network, then one line per influencer subgraph. With `with_paths`, the
/// shortest retweet chain from every reachable node back to its influencer
/// is appended per subgraph.
pub fn write_influencer_report(
    path: &Path,
    network: &Graph,
    subgraphs: &[InfluencerGraph],
    with_paths: bool,
) -> Result<()> {
    let mut out = create_report_file(path)?;
    writeln!(out, "{network}")?;
    writeln!(out)?;
    for subgraph in subgraphs {
        writeln!(out, "{subgraph}")?;
    }
    if with_paths {
        for subgraph in subgraphs {
            writeln!(out)?;
            write_paths(&mut out, subgraph)?;
        }
    }
    out.flush()?;
    info!("wrote influencer report to {}", path.display());
    Ok(())
}

fn write_paths(out: &mut impl Write, subgraph: &InfluencerGraph) -> Result<()> {
    let mut members: Vec<NodeId> = subgraph.graph().node_ids().collect();
    members.sort_unstable();
    for member in members {
        if let Some(path) = subgraph.shortest_path(member) {
            writeln!(
                out,
                "path from {} to influencer {}: {}",
                member,
                subgraph.influencer(),
                join_ids(&path),
            )?;
        }
    }
    Ok(())
}

/// Write one cascade run as CSV: first the per-generation cumulative active
/// counts, then the ids newly activated in each generation (sorted, space
/// separated within the cell).
pub fn write_cascade_report(path: &Path, entries: &[CascadeEntry]) -> Result<()> {
    let mut out = create_report_file(path)?;
    writeln!(out, "generation,number_active")?;
    for (generation, entry) in entries.iter().enumerate() {
        writeln!(out, "{},{}", generation, entry.total_active)?;
    }
    writeln!(out, "generation,newly_active")?;
    for (generation, entry) in entries.iter().enumerate() {
        let mut ids: Vec<NodeId> = entry.newly_active.iter().copied().collect();
        ids.sort_unstable();
        writeln!(out, "{},{}", generation, join_ids(&ids))?;
    }
    out.flush()?;
    info!("wrote cascade results to {}", path.display());
    Ok(())
}

/// File name for one cascade run, derived from its seed set and the input
/// file stem, e.g. `cascade_from_12_34_higgs.csv`.
#[must_use]
pub fn cascade_file_name(seeds: &[NodeId], input_stem: &str) -> String {
    let seed_part = seeds
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join("_");
    format!("cascade_from_{seed_part}_{input_stem}.csv")
}

fn create_report_file(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    fn chain_graph() -> Graph {
        let mut graph = Graph::new();
        for id in 1..=3 {
            graph.add_vertex(id);
        }
        graph.add_edge(1, 2).unwrap();
        graph.add_edge(1, 2).unwrap();
        graph.add_edge(2, 3).unwrap();
        graph
    }

    #[test]
    fn influencer_report_lists_network_and_subgraphs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("influencers.txt");
        let graph = chain_graph();
        let subgraphs = graph.influencer_graphs(1).unwrap();

        write_influencer_report(&path, &graph, &subgraphs, true).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();

        assert!(contents.starts_with("graph with 3 nodes\n"));
        assert!(contents.contains("influencer 1"));
        assert!(contents.contains("path from 3 to influencer 1: 3 2 1"));
    }

    #[test]
    fn cascade_report_has_counts_then_member_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cascade.csv");
        let entries = vec![
            CascadeEntry {
                total_active: 1,
                newly_active: AHashSet::from_iter([1]),
            },
            CascadeEntry {
                total_active: 3,
                newly_active: AHashSet::from_iter([2, 3]),
            },
        ];

        write_cascade_report(&path, &entries).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();

        let expected = "generation,number_active\n\
                        0,1\n\
                        1,3\n\
                        generation,newly_active\n\
                        0,1\n\
                        1,2 3\n";
        assert_eq!(contents, expected);
    }

    #[test]
    fn report_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/output/cascade.csv");
        write_cascade_report(&path, &[]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn cascade_file_names_carry_seeds_and_stem() {
        assert_eq!(cascade_file_name(&[7], "higgs"), "cascade_from_7_higgs.csv");
        assert_eq!(
            cascade_file_name(&[1, 2], "higgs"),
            "cascade_from_1_2_higgs.csv"
        );
    }
}
