//! Recency Replay - drives an LRU cache from a command trace

mod command;
mod handler;
mod replay;

use anyhow::Result;
use clap::Parser;
use recency::LruCache;
use std::io;
use std::path::PathBuf;
use tracing::info;

use crate::handler::CommandHandler;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of items)
    #[arg(short, long, default_value_t = 1024)]
    capacity: usize,

    /// Trace file to replay (defaults to stdin)
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Print cache statistics as JSON when done
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting Recency Replay v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);
    match &args.trace {
        Some(path) => info!("Trace: {}", path.display()),
        None => info!("Trace: stdin"),
    }

    let cache = LruCache::new(args.capacity)?;
    let mut handler = CommandHandler::new(cache);

    let input = replay::open_input(args.trace.as_deref())?;
    let stdout = io::stdout();
    let executed = replay::run(input, stdout.lock(), &mut handler)?;

    let stats = handler.stats();
    info!(
        "Replayed {} commands ({} hits, {} misses, {} evictions)",
        executed,
        stats.hits(),
        stats.misses(),
        stats.evictions()
    );

    if args.stats {
        println!("{}", serde_json::to_string_pretty(stats)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["recency-replay"]).unwrap();
        assert_eq!(args.capacity, 1024);
        assert!(args.trace.is_none());
        assert!(!args.stats);
    }

    #[test]
    fn test_args_flags() {
        let args =
            Args::try_parse_from(["recency-replay", "-c", "2", "-t", "ops.trace", "--stats"])
                .unwrap();
        assert_eq!(args.capacity, 2);
        assert_eq!(args.trace, Some(PathBuf::from("ops.trace")));
        assert!(args.stats);
    }
}
