use std::path::PathBuf;

use anyhow::{anyhow, ensure, Context, Result};
use clap::{Parser, Subcommand};
use wordsearch::{
    codec, logging, normalize_word, Config, FileKeyValue, Puzzle, PuzzleStore, Selection,
};

/// Create, share, and check word-search puzzles.
#[derive(Parser)]
#[command(name = "wordsearch", version)]
struct Opts {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Origin used when building share links
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Directory holding saved puzzles
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Log placement details
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate and save a new puzzle
    New {
        #[arg(long)]
        title: String,
        /// A word to hide; repeat for each word
        #[arg(long = "word", required = true)]
        words: Vec<String>,
        /// Shown when every word is found
        #[arg(long)]
        message: Option<String>,
    },
    /// List saved puzzles
    List,
    /// Print a saved or shared puzzle
    Show { id_or_token: String },
    /// Print the share link of a saved puzzle
    Share { id: String },
    /// Replace a saved puzzle with a freshly generated grid
    Regenerate { id: String },
    /// Delete a saved puzzle
    Delete { id: String },
    /// Save a puzzle received through a share link
    Adopt { token: String },
    /// Check whether a selection hits a hidden word
    Check {
        id_or_token: String,
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
    },
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    logging::init_logger(opts.debug);

    let mut config = match &opts.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(origin) = opts.origin {
        config.origin = origin;
    }
    if let Some(store) = opts.store {
        config.store_dir = store;
    }

    let mut store = PuzzleStore::new(FileKeyValue::new(&config.store_dir));

    match opts.command {
        Command::New {
            title,
            words,
            message,
        } => {
            ensure!(!title.trim().is_empty(), "a puzzle needs a title");
            ensure!(
                words.iter().any(|word| normalize_word(word).is_some()),
                "a puzzle needs at least one word"
            );
            let puzzle = wordsearch::generate(&title, &words, message.as_deref());
            store.put(&puzzle).context("failed to save puzzle")?;
            print_puzzle(&puzzle);
            println!();
            println!("id:    {}", puzzle.id());
            println!("share: {}", codec::share_url(&config.origin, &puzzle));
        }
        Command::List => {
            let puzzles = store.get_all().context("failed to read saved puzzles")?;
            let mut puzzles: Vec<_> = puzzles.into_values().collect();
            puzzles.sort_by_key(|puzzle| std::cmp::Reverse(puzzle.created_at()));
            for puzzle in puzzles {
                println!(
                    "{}\t{}\t{} words",
                    puzzle.id(),
                    puzzle.title(),
                    puzzle.words().len()
                );
            }
        }
        Command::Show { id_or_token } => {
            let puzzle = resolve(&store, &id_or_token)?;
            print_puzzle(&puzzle);
        }
        Command::Share { id } => {
            let puzzle = saved(&store, &id)?;
            println!("{}", codec::share_url(&config.origin, &puzzle));
        }
        Command::Regenerate { id } => {
            let old = saved(&store, &id)?;
            let puzzle = old.regenerate();
            store.put(&puzzle).context("failed to save puzzle")?;
            store.delete(&id).context("failed to remove old puzzle")?;
            print_puzzle(&puzzle);
            println!();
            println!("id:    {}", puzzle.id());
        }
        Command::Delete { id } => {
            ensure!(
                store.delete(&id).context("failed to delete puzzle")?,
                "no saved puzzle with id {id}"
            );
        }
        Command::Adopt { token } => {
            let puzzle = codec::decode(&token)
                .ok_or_else(|| anyhow!("not a valid share link"))?
                .adopt();
            store.put(&puzzle).context("failed to save puzzle")?;
            println!("{}", puzzle.id());
        }
        Command::Check {
            id_or_token,
            start_row,
            start_col,
            end_row,
            end_col,
        } => {
            let puzzle = resolve(&store, &id_or_token)?;
            let selection = Selection::new(start_row, start_col, end_row, end_col);
            match puzzle.check_match(selection) {
                Some(word) => println!("found {word}"),
                None => println!("no word there"),
            }
        }
    }

    Ok(())
}

fn resolve(store: &PuzzleStore<FileKeyValue>, id_or_token: &str) -> Result<Puzzle> {
    store
        .resolve(id_or_token)
        .ok_or_else(|| anyhow!("puzzle not found"))
}

fn saved(store: &PuzzleStore<FileKeyValue>, id: &str) -> Result<Puzzle> {
    store
        .get(id)
        .context("failed to read saved puzzles")?
        .ok_or_else(|| anyhow!("no saved puzzle with id {id}"))
}

fn print_puzzle(puzzle: &Puzzle) {
    println!("{}", puzzle.title());
    println!();
    println!("{}", puzzle.grid());
    println!();
    let placed = puzzle.placed_words();
    for word in puzzle.words() {
        if placed.contains(word.as_str()) {
            println!("  {word}");
        } else {
            println!("  {word} (not placed)");
        }
    }
    if let Some(message) = puzzle.success_message() {
        println!();
        println!("{message}");
    }
}
