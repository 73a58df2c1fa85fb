//! EmbedKV Bench Binary
//!
//! Write-throughput driver: puts N keys (optionally shuffled), flushes the
//! remainder, and reports throughput and latency.
//!
//! The tensor modes (`--tensor-dryrun`, `--tensor-train`, `--tensor-ingest`)
//! exercise the tensor layer instead and skip the benchmark.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use embedkv::observer::TracingObserver;
use embedkv::tensor::{Tensor, TensorStore, DEFAULT_PREVIEW_LIMIT};
use embedkv::{Config, Engine};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing_subscriber::{fmt, EnvFilter};

/// EmbedKV write benchmark
#[derive(Parser, Debug)]
#[command(name = "embedkv-bench")]
#[command(about = "Measure put throughput of the EmbedKV engine")]
#[command(version)]
struct Args {
    /// Number of put operations
    #[arg(short = 'n', long, default_value = "50000")]
    ops: usize,

    /// Value size in bytes
    #[arg(short = 'v', long, default_value = "32")]
    value_size: usize,

    /// Insert keys in ascending order instead of shuffled
    #[arg(long)]
    sequential: bool,

    /// MemTable capacity (entries) before a flush
    #[arg(short, long, default_value = "10000")]
    memtable_max: usize,

    /// Seed for the key shuffle
    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Report engine events through tracing (see RUST_LOG)
    #[arg(long)]
    trace_events: bool,

    /// Save two sample tensors, flush, and print what reads back
    #[arg(long, visible_alias = "run-dryrun")]
    tensor_dryrun: bool,

    /// Run a tiny gradient-descent loop, saving weights every epoch
    #[arg(long)]
    tensor_train: bool,

    /// Ingest a tensor from a two-line text file (header + values)
    #[arg(long, value_name = "FILE")]
    tensor_ingest: Option<PathBuf>,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let result = if args.tensor_dryrun || args.tensor_train || args.tensor_ingest.is_some() {
        run_tensor_modes(&args)
    } else {
        print_header(&args);
        run(&args)
    };

    if let Err(e) = result {
        tracing::error!("Benchmark failed: {}", e);
        std::process::exit(1);
    }
}

fn print_header(args: &Args) {
    println!("EmbedKV Benchmark v{}", embedkv::VERSION);
    println!("Operations: {}", args.ops);
    println!("Value size: {} bytes", args.value_size);
    println!("Shuffle keys: {}", if args.sequential { "no" } else { "yes" });
    println!("Memtable max: {}", args.memtable_max);
    println!();
}

fn run(args: &Args) -> embedkv::Result<()> {
    let config = Config::builder()
        .memtable_max_entries(args.memtable_max)
        .build();
    let mut engine = if args.trace_events {
        Engine::with_observer(config, TracingObserver)?
    } else {
        Engine::new(config)?
    };

    let keys = benchmark_keys(args.ops, args.sequential, args.seed);
    let value = "x".repeat(args.value_size.max(1));

    let start = Instant::now();
    for key in &keys {
        engine.put(key, &value)?;
    }
    engine.flush();
    let elapsed = start.elapsed();

    let secs = elapsed.as_secs_f64();
    let ops = args.ops.max(1) as f64;
    let stats = engine.stats();

    println!("Results:");
    println!("  SSTables: {}", stats.sstable_count);
    println!("  Remaining in memory: {}", stats.memtable_entries);
    println!("  Time: {:.3} seconds", secs);
    println!("  Throughput: {:.3} Mops/s", ops / secs / 1_000_000.0);
    println!("  Latency: {:.3} ns/op", secs * 1e9 / ops);

    Ok(())
}

/// Keys `1..=ops`, zero-padded so lexical order matches numeric order,
/// shuffled deterministically per seed unless `sequential`
fn benchmark_keys(ops: usize, sequential: bool, seed: u64) -> Vec<String> {
    let mut keys: Vec<String> = (1..=ops).map(|i| format!("{:012}", i)).collect();
    if !sequential {
        let mut rng = StdRng::seed_from_u64(seed);
        keys.shuffle(&mut rng);
    }
    keys
}

// =============================================================================
// Tensor Modes
// =============================================================================

fn run_tensor_modes(args: &Args) -> embedkv::Result<()> {
    if args.tensor_dryrun {
        println!("Tensor dry run");
        let mut store = TensorStore::new()?;
        for tensor in store.dry_run_scenario()? {
            print_tensor(&tensor);
        }
    }

    if args.tensor_train {
        println!("Tensor training run");
        let mut store = TensorStore::new()?;
        for (epoch, tensor) in store.training_scenario(3)?.iter().enumerate() {
            println!("  epoch {}: {}", epoch, tensor.summary(DEFAULT_PREVIEW_LIMIT));
        }
        println!("Weights flushed to {} SSTable(s).", store.engine().sstable_count());
    }

    if let Some(path) = &args.tensor_ingest {
        ingest(path)?;
    }

    Ok(())
}

fn ingest(path: &Path) -> embedkv::Result<()> {
    let text = fs::read_to_string(path)?;
    let tensor = Tensor::parse_text(&text)?;

    let mut store = TensorStore::new()?;
    store.save(tensor.key, &tensor.info, &tensor.values)?;
    store.flush();

    println!(
        "Ingested tensor key {}: {}",
        tensor.key,
        tensor.summary(DEFAULT_PREVIEW_LIMIT)
    );
    Ok(())
}

fn print_tensor(tensor: &Tensor) {
    println!("  key {}: {}", tensor.key, tensor.summary(DEFAULT_PREVIEW_LIMIT));
}
