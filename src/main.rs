//! Xboard engine binary.
//!
//! stdout carries only protocol traffic; logs go to stderr, filtered by
//! `RUST_LOG` (default `warn`, `--debug` raises it to `debug`).

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ivory_chess::search::search_engine::{SearchConfig, SearchEngine, DEFAULT_SEARCH_DEPTH};
use ivory_chess::search::threading::{ThreadingConfig, WorkerPool};
use ivory_chess::tables::opening_book::OpeningBook;
use ivory_chess::xboard::xboard_top::{run_stdio_loop, XboardState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Polyglot opening book; a missing file means no book
    #[arg(long, default_value = "book.bin")]
    book: PathBuf,

    /// Search depth in plies
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u8,

    /// Root search worker threads (0 = one per hardware thread)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Seed for tie-breaking between equal moves
    #[arg(long)]
    seed: Option<u64>,

    /// Draw the board with chess glyphs in `show`
    #[arg(long)]
    unicode: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();

    let book = OpeningBook::load_or_empty(&cli.book);
    let book = (!book.is_empty()).then(|| Arc::new(book));

    let pool = WorkerPool::new(ThreadingConfig::with_threads(cli.threads));
    info!(
        "starting {} {}: depth {}, {} search threads, book {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        cli.depth,
        pool.threads(),
        if book.is_some() { "loaded" } else { "absent" }
    );

    let engine = SearchEngine::new(SearchConfig { depth: cli.depth }, book, pool);
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    run_stdio_loop(XboardState::new(engine, rng, cli.unicode))
}
