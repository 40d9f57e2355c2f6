use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cascata_core::{CascadeModel, CascadeParams, Graph, InfluencerGraph, NodeId};
use cascata_io::{cascade_file_name, load_graph, write_cascade_report, write_influencer_report};

/// Influencer extraction and cascade simulation over retweet graphs
#[derive(Parser, Debug)]
#[command(name = "cascata")]
#[command(about = "Find influencers in a retweet network and simulate behavior cascades", long_about = None)]
struct Args {
    /// Edge-list file: one `from to` retweet per line
    input: PathBuf,

    /// Directory for report files
    #[arg(short, long, default_value = "./output")]
    output_dir: PathBuf,

    /// How many influencers to extract
    #[arg(short = 'k', long, default_value_t = 3)]
    influencers: usize,

    /// Maximum cascade generations per run
    #[arg(short, long, default_value_t = 10)]
    generations: u32,

    /// Reward for keeping the current behavior
    #[arg(long, default_value_t = 1)]
    reward_inertia: u32,

    /// Reward for adopting the new behavior
    #[arg(long, default_value_t = 1)]
    reward_change: u32,

    /// Seed cascades per influencer or all influencers at once
    #[arg(long, value_enum, default_value_t = Seeding::One)]
    seeding: Seeding,

    /// Include shortest paths back to each influencer in the report
    #[arg(long)]
    paths: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Seeding {
    /// One cascade run per influencer
    One,
    /// A single run with every influencer active from the start
    All,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting cascata v{}", env!("CARGO_PKG_VERSION"));
    info!("Edge list: {:?}", args.input);
    info!("Output directory: {:?}", args.output_dir);

    let input_stem = args
        .input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "network".to_string());

    let loaded = load_graph(&args.input)?;
    let graph = loaded.deep_copy();

    let subgraphs = graph.influencer_graphs(args.influencers)?;
    let influencer_ids: Vec<NodeId> = subgraphs.iter().map(InfluencerGraph::influencer).collect();
    info!("Top {} influencers: {:?}", args.influencers, influencer_ids);

    let report_path = args
        .output_dir
        .join(format!("influencers_from_{input_stem}.txt"));
    write_influencer_report(&report_path, &graph, &subgraphs, args.paths)?;

    run_cascades(&graph, &influencer_ids, &args, &input_stem)?;

    info!("Done");
    Ok(())
}

fn run_cascades(
    graph: &Graph,
    influencer_ids: &[NodeId],
    args: &Args,
    input_stem: &str,
) -> anyhow::Result<()> {
    let model = CascadeModel::new(graph);
    let params = CascadeParams {
        max_generations: args.generations,
        reward_for_inertia: args.reward_inertia,
        reward_for_change: args.reward_change,
    };

    match args.seeding {
        Seeding::One => {
            for &seed in influencer_ids {
                let entries = model.simulate(seed, &params)?;
                info!(
                    "Cascade from {} reached {} nodes in {} generations",
                    seed,
                    entries.last().map_or(0, |e| e.total_active),
                    entries.len().saturating_sub(1),
                );
                let path = args
                    .output_dir
                    .join(cascade_file_name(&[seed], input_stem));
                write_cascade_report(&path, &entries)?;
            }
        }
        Seeding::All => {
            let entries = model.simulate_many(influencer_ids, &params)?;
            info!(
                "Cascade from {:?} reached {} nodes in {} generations",
                influencer_ids,
                entries.last().map_or(0, |e| e.total_active),
                entries.len().saturating_sub(1),
            );
            let path = args
                .output_dir
                .join(cascade_file_name(influencer_ids, input_stem));
            write_cascade_report(&path, &entries)?;
        }
    }
    Ok(())
}
