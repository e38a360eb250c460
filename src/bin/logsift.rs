use clap::Parser;
use logsift::config::MinerConfig;
use logsift::miner::Miner;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

#[derive(Parser, Debug)]
#[command(name = "logsift", version, about = "Online log template mining")]
struct Cli {
    /// Input files (`-` for stdin). May be repeated; defaults to stdin.
    #[arg(required = false)]
    input: Vec<String>,

    /// Prefix tree depth (minimum 3)
    #[arg(long = "depth", default_value_t = 4)] depth: usize,
    /// Similarity threshold for joining an existing cluster
    #[arg(long = "sim-threshold", default_value_t = 0.4)] sim_threshold: f64,
    /// Per-node cap on tree children
    #[arg(long = "max-children", default_value_t = 100)] max_children: usize,
    /// Max clusters kept (LRU eviction; 0 = unbounded)
    #[arg(long = "max-clusters", default_value_t = 0)] max_clusters: usize,
    /// Extra delimiter substring replaced by a space before tokenization. May be repeated.
    #[arg(long = "delimiter")] delimiters: Vec<String>,
    /// Wildcard marker used in templates
    #[arg(long = "param-string", default_value = "<*>")] param_string: String,

    /// Output format: text | json
    #[arg(long = "format", default_value = "text")] format: String,
    /// Sort clusters by: id | size (size is descending)
    #[arg(long = "sort", default_value = "id")] sort_by: String,
    /// Print only the first N clusters after sorting
    #[arg(long = "top")] top: Option<usize>,
    /// Classify one extra line against the trained model without updating it
    #[arg(long = "probe")] probe: Option<String>,
}

#[derive(Serialize)]
struct ClusterOut {
    id: u64,
    size: u64,
    template: String,
}

fn train_from(paths: &[String], miner: &mut Miner) -> io::Result<usize> {
    let mut trained = 0usize;
    for p in paths {
        if p == "-" {
            let stdin = io::stdin();
            let reader = stdin.lock();
            for line in reader.lines() {
                miner.train(&line?);
                trained += 1;
            }
        } else {
            let f = File::open(p)?;
            let reader = BufReader::new(f);
            for line in reader.lines() {
                miner.train(&line?);
                trained += 1;
            }
        }
    }
    Ok(trained)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = MinerConfig {
        depth: cli.depth,
        sim_threshold: cli.sim_threshold,
        max_children: cli.max_children,
        max_clusters: cli.max_clusters,
        extra_delimiters: cli.delimiters.clone(),
        param_string: cli.param_string.clone(),
    };
    let mut miner = Miner::new(config)?;

    let inputs = if cli.input.is_empty() { vec!["-".to_string()] } else { cli.input.clone() };
    train_from(&inputs, &mut miner)?;

    let mut clusters = miner.clusters();
    if cli.sort_by == "size" {
        clusters.sort_by(|a, b| b.size().cmp(&a.size()).then(a.id().cmp(&b.id())));
    }
    if let Some(top) = cli.top {
        clusters.truncate(top);
    }

    if cli.format == "json" {
        let out: Vec<ClusterOut> = clusters
            .iter()
            .map(|c| ClusterOut { id: c.id(), size: c.size(), template: c.template() })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for cluster in &clusters {
            println!("{cluster}");
        }
    }

    if let Some(probe) = cli.probe.as_deref() {
        match miner.match_line(probe) {
            Some(cluster) => println!("matched: {cluster}"),
            None => println!("no match"),
        }
    }

    Ok(())
}
