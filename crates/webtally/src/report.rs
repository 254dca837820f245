//! Ranking and rendering of tally snapshots.

use std::io::{self, Write};
use std::str::FromStr;

use crate::tally::TallyEntry;

/// How many ranked entries to report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultLimit {
    /// The `N` highest counts.
    Top(usize),
    /// Every entry (the CLI's `all` sentinel).
    All,
}

impl ResultLimit {
    /// Limit applied when the CLI argument is omitted.
    pub const DEFAULT: Self = Self::Top(20);
}

/// A result-count argument that is neither `all` nor a positive integer.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("invalid result count {input:?}")]
#[diagnostic(
    code(webtally::report::result_limit),
    help("pass a positive integer, or `all` for every word")
)]
pub struct ParseLimitError {
    input: String,
}

impl FromStr for ResultLimit {
    type Err = ParseLimitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(Self::All);
        }
        match s.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Self::Top(n)),
            _ => Err(ParseLimitError {
                input: s.to_owned(),
            }),
        }
    }
}

/// Sort a snapshot by count descending and truncate to `limit`.
///
/// Ties break by word ascending, so a given snapshot always ranks the same
/// way regardless of map iteration order.
#[must_use]
pub fn rank(mut entries: Vec<TallyEntry>, limit: ResultLimit) -> Vec<TallyEntry> {
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    if let ResultLimit::Top(n) = limit {
        entries.truncate(n);
    }
    entries
}

// ─── Text mode ────────────────────────────────────────────────────────────────

/// Write the human-readable report: a header line, then `  <word>: <count>`
/// per entry in ranked order.
pub fn write_report(
    out: &mut dyn Write,
    ranked: &[TallyEntry],
    limit: ResultLimit,
) -> io::Result<()> {
    match limit {
        ResultLimit::Top(n) => writeln!(out, "Top {n} Results:")?,
        ResultLimit::All => writeln!(out, "Results:")?,
    }
    for entry in ranked {
        writeln!(out, "  {}: {}", entry.word, entry.count)?;
    }
    Ok(())
}

// ─── JSON mode ────────────────────────────────────────────────────────────────

/// Write the report as one JSON object: the fetched URL plus the ranked
/// `(word, count)` list.
pub fn write_json(out: &mut dyn Write, url: &str, ranked: &[TallyEntry]) -> io::Result<()> {
    let doc = serde_json::json!({
        "url": url,
        "words": ranked,
    });
    serde_json::to_writer_pretty(&mut *out, &doc).map_err(io::Error::other)?;
    writeln!(out)
}
