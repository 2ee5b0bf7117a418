use std::fmt::Display;
use std::fs::File;
use std::hash::Hash;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use clap::Parser;
use memmap2::Mmap;
use tracing::info;
use tracing_subscriber::EnvFilter;

use spacesaving::stream::{CharStream, WordStream};
use spacesaving::{ingest, Element, StreamSummary, TokenSource};

/// Find the most frequent tokens of a stream with bounded memory.
///
/// The two numbers may be given in either order: the larger one limits how
/// many tokens are read, the smaller one is the number of tokens monitored.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Stream length limit or summary capacity
    first: usize,

    /// Stream length limit or summary capacity
    second: usize,

    /// Count alphanumeric characters instead of words
    #[arg(long)]
    chars: bool,

    /// Read tokens from this file instead of standard input
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Only print tokens whose rank is guaranteed
    #[arg(long)]
    guaranteed: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let length = args.first.max(args.second);
    let capacity = args.first.min(args.second);

    if capacity == 0 {
        eprintln!("Invalid value for stream length and capacity: both must be positive");
        std::process::exit(1);
    }

    let result = match &args.input {
        Some(path) => read_file(&args, path, length, capacity),
        None => run(&args, io::stdin().lock(), length, capacity),
    };

    if let Err(e) = result {
        eprintln!("Failed to read tokens: {}", e);
        std::process::exit(1);
    }
}

fn read_file(args: &Args, path: &Path, length: usize, capacity: usize) -> io::Result<()> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return run(args, io::empty(), length, capacity);
    }
    // SAFETY: the mapping is read-only and dropped before returning; the file
    // must not be truncated by another process while it is being read.
    let mmap = unsafe { Mmap::map(&file)? };
    run(args, &mmap[..], length, capacity)
}

fn run<R: BufRead>(args: &Args, reader: R, length: usize, capacity: usize) -> io::Result<()> {
    if args.chars {
        summarize::<char, _>(CharStream::new(reader), length, capacity, args.guaranteed)
    } else {
        summarize::<String, _>(WordStream::new(reader), length, capacity, args.guaranteed)
    }
}

fn summarize<T, S>(mut source: S, length: usize, capacity: usize, guaranteed: bool) -> io::Result<()>
where
    T: Hash + Eq + Clone + Display,
    S: TokenSource<T>,
{
    info!(length, capacity, "reading tokens");

    let mut summary = StreamSummary::new(capacity)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let consumed = ingest(&mut source, &mut summary, length)?;

    info!(consumed, monitored = summary.len(), "finished reading tokens");

    let rows = if guaranteed {
        summary.most_frequents()
    } else {
        summary.sorted_frequencies()
    };
    print_rows(&rows);
    Ok(())
}

fn print_rows<T: Display>(rows: &[Element<'_, T>]) {
    let items: Vec<String> = rows.iter().map(|element| element.item.to_string()).collect();
    let item_width = items.iter().map(|item| item.chars().count()).max().unwrap_or(0);
    let count_width = rows.iter().map(|e| e.count.to_string().len()).max().unwrap_or(0);
    let error_width = rows.iter().map(|e| e.error.to_string().len()).max().unwrap_or(0);

    for (item, element) in items.iter().zip(rows) {
        println!(
            "element: {:<item_width$} count: {:>count_width$} error: {:>error_width$}",
            item, element.count, element.error
        );
    }
}
