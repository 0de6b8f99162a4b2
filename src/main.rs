//! Builds an index from the keys in a file, prints its height and size, then
//! answers lookups read from stdin until end of input.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use avl_index::{driver, AvlTree, Config, DuplicatePolicy};

#[derive(Parser, Debug)]
#[command(name = "avl-index")]
#[command(about = "Load whitespace-separated keys into an AVL tree and query them from stdin")]
struct Args {
    /// Trace every insert and dump the tree after it
    #[arg(long, default_value_t = false)]
    show_steps: bool,

    /// Build a plain binary search tree (no rebalancing)
    #[arg(long, default_value_t = false)]
    no_balance: bool,

    /// Ignore keys that are already present instead of storing them again
    #[arg(long, default_value_t = false)]
    reject_duplicates: bool,

    /// Input file of whitespace-separated keys
    file: PathBuf,
}

impl Args {
    fn config(&self) -> Config {
        let duplicates = if self.reject_duplicates {
            DuplicatePolicy::Reject
        } else {
            DuplicatePolicy::Multiset
        };
        Config::default()
            .show_steps(self.show_steps)
            .balancing(!self.no_balance)
            .duplicates(duplicates)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let path = args.file.display();

    let file = match File::open(&args.file) {
        Ok(f) => f,
        Err(_) => {
            eprintln!("Cannot open file! [{path}]");
            return ExitCode::from(200);
        }
    };

    let mut tree = AvlTree::with_config(args.config());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = driver::load(&mut tree, BufReader::new(file), &mut out) {
        eprintln!("Failed to load [{path}]: {e}");
        return ExitCode::from(100);
    }

    let result = driver::report(&tree, &mut out)
        .and_then(|()| driver::query_loop(&tree, io::stdin().lock(), &mut out));
    if let Err(e) = result {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
