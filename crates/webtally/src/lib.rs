//! webtally — fetch a web page and report its most frequent words.
//!
//! The core is [`tally::WordTally`], a concurrent word→count ledger. The
//! other modules are its collaborators: [`fetch`] retrieves the document,
//! [`tokenize`] cuts lines into word tokens, and [`report`] ranks and
//! renders the result.

pub mod fetch;
pub mod report;
pub mod tally;
pub mod tokenize;

use fetch::{FetchError, FetchSettings};
use tally::WordTally;

/// Fetch `url` and tally every word token in its body.
///
/// Lines are tokenized and counted as they stream in; on any failure the
/// partially built tally is discarded along with the error, so no partial
/// result escapes.
pub async fn count_words(url: &str, settings: &FetchSettings) -> Result<WordTally, FetchError> {
    let tally = WordTally::new();
    fetch::fetch_lines(url, settings, |line| {
        for word in tokenize::words(line) {
            tally.add(&word);
        }
    })
    .await?;
    Ok(tally)
}
