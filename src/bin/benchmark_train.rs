use std::fs;
use std::time::Instant;

use logsift::config::MinerConfig;
use logsift::miner::Miner;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <log_file>", args[0]);
        std::process::exit(1);
    }

    let content = fs::read_to_string(&args[1])?;
    let lines: Vec<&str> = content.lines().collect();

    println!("Benchmarking training performance on {} lines...", lines.len());

    // Warmup on a throwaway miner
    let mut warmup = Miner::new(MinerConfig::default())?;
    for line in lines.iter().take(100) {
        warmup.train(line);
    }

    // Benchmark
    let mut miner = Miner::new(MinerConfig::default())?;
    let start = Instant::now();
    for line in &lines {
        miner.train(line);
    }
    let duration = start.elapsed();

    let lines_per_sec = lines.len() as f64 / duration.as_secs_f64();
    println!("Results:");
    println!("  Total time: {:.3}s", duration.as_secs_f64());
    println!("  Lines per second: {:.0}", lines_per_sec);
    println!("  Clusters discovered: {}", miner.clusters().len());

    Ok(())
}
