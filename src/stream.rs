//! Token sources feeding a [`StreamSummary`].

use std::borrow::Borrow;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::io::{self, BufRead};
use ahash::RandomState;
use tracing::debug;

use crate::space_saving::StreamSummary;

/// A pull-based source of tokens.
pub trait TokenSource<T> {
    /// Returns the next token, or `None` once the stream has ended.
    fn next_token(&mut self) -> io::Result<Option<T>>;
}

impl<T, S: TokenSource<T> + ?Sized> TokenSource<T> for &mut S {
    fn next_token(&mut self) -> io::Result<Option<T>> {
        (**self).next_token()
    }
}

/// Whitespace separated, lowercased words read line by line.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than failing the stream.
pub struct WordStream<R> {
    reader: R,
    line: Vec<u8>,
    pending: VecDeque<String>,
}

impl<R: BufRead> WordStream<R> {
    pub fn new(reader: R) -> Self {
        WordStream {
            reader,
            line: Vec::new(),
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> TokenSource<String> for WordStream<R> {
    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(word) = self.pending.pop_front() {
                return Ok(Some(word));
            }
            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&self.line);
            self.pending
                .extend(line.split_whitespace().map(str::to_lowercase));
        }
    }
}

/// Alphanumeric characters, everything else is skipped.
///
/// Invalid UTF-8 decodes to U+FFFD, which is skipped too.
pub struct CharStream<R> {
    reader: R,
    line: Vec<u8>,
    pending: VecDeque<char>,
}

impl<R: BufRead> CharStream<R> {
    pub fn new(reader: R) -> Self {
        CharStream {
            reader,
            line: Vec::new(),
            pending: VecDeque::new(),
        }
    }
}

impl<R: BufRead> TokenSource<char> for CharStream<R> {
    fn next_token(&mut self) -> io::Result<Option<char>> {
        loop {
            if let Some(c) = self.pending.pop_front() {
                return Ok(Some(c));
            }
            self.line.clear();
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
            let line = String::from_utf8_lossy(&self.line);
            self.pending
                .extend(line.chars().filter(|c| c.is_alphanumeric()));
        }
    }
}

/// Wraps a source and counts exactly, without bound, every token it yields.
///
/// Meant for checking a summary against the true frequencies of a stream.
pub struct Tally<S, T> {
    source: S,
    counts: HashMap<T, u64, RandomState>,
    total: u64,
}

impl<S, T> Tally<S, T>
where
    S: TokenSource<T>,
    T: Hash + Eq + Clone,
{
    pub fn new(source: S) -> Self {
        Tally {
            source,
            counts: HashMap::default(),
            total: 0,
        }
    }

    /// Number of tokens yielded so far.
    pub fn len(&self) -> u64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Exact count of `token`, zero if it was never seen.
    pub fn count<Q>(&self, token: &Q) -> u64
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.get(token).copied().unwrap_or(0)
    }

    pub fn frequencies(&self) -> &HashMap<T, u64, RandomState> {
        &self.counts
    }

    /// Exact counts of the tokens accepted by `predicate`, in no particular order.
    pub fn frequencies_where<F>(&self, predicate: F) -> Vec<(&T, u64)>
    where
        F: Fn(&T) -> bool,
    {
        self.counts
            .iter()
            .filter(|(token, _)| predicate(token))
            .map(|(token, &count)| (token, count))
            .collect()
    }

    /// Exact counts by count descending.
    pub fn sorted_frequencies(&self) -> Vec<(&T, u64)> {
        let mut counts: Vec<_> = self.counts.iter().map(|(token, &count)| (token, count)).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

impl<S, T> TokenSource<T> for Tally<S, T>
where
    S: TokenSource<T>,
    T: Hash + Eq + Clone,
{
    fn next_token(&mut self) -> io::Result<Option<T>> {
        let token = self.source.next_token()?;
        if let Some(token) = &token {
            *self.counts.entry(token.clone()).or_insert(0) += 1;
            self.total += 1;
        }
        Ok(token)
    }
}

/// Feeds up to `limit` tokens from `source` into `summary`.
///
/// Stops early at the end of the stream and never pulls more than `limit`
/// tokens. Returns the number of tokens added.
pub fn ingest<S, T>(source: &mut S, summary: &mut StreamSummary<T>, limit: usize) -> io::Result<usize>
where
    S: TokenSource<T> + ?Sized,
    T: Hash + Eq + Clone,
{
    let mut consumed = 0;
    while consumed < limit {
        match source.next_token()? {
            Some(token) => {
                summary.add(token);
                consumed += 1;
            }
            None => break,
        }
    }
    debug!(consumed, limit, "ingested tokens");
    Ok(consumed)
}
