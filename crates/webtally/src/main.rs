//! webtally — fetch a web page and report its most frequent words.

use std::time::Duration;

use clap::Parser;

use webtally::count_words;
use webtally::fetch::FetchSettings;
use webtally::report::{self, ResultLimit};

// ─── CLI ──────────────────────────────────────────────────────────────────────

/// Document fetched when no URL is given.
const DEFAULT_URL: &str = "https://www.cnn.com";

#[derive(Debug, Parser)]
#[command(
    name = "webtally",
    about = "Fetch a web page and report its most frequent words",
    version
)]
struct Cli {
    /// Document to fetch (HTTP or HTTPS).
    #[arg(value_name = "URL", default_value = DEFAULT_URL)]
    url: String,

    /// How many words to report: a positive integer, or `all`.
    #[arg(value_name = "RESULTS")]
    results: Option<String>,

    /// Request deadline in seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Output JSON instead of the text report.
    #[arg(long)]
    json: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    // Parsed by hand rather than through clap so a bad value exits 1 like
    // every other failure.
    let limit = match cli.results.as_deref() {
        None => ResultLimit::DEFAULT,
        Some(raw) => match raw.parse::<ResultLimit>() {
            Ok(limit) => limit,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        },
    };

    let mut settings = FetchSettings::default();
    if let Some(secs) = cli.timeout {
        settings.request_timeout = Duration::from_secs(secs);
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    let tally = match rt.block_on(count_words(&cli.url, &settings)) {
        Ok(tally) => tally,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    };

    // Banner only once the fetch has succeeded: a failed run must leave
    // stdout empty. Suppressed in JSON mode to keep stdout parseable.
    if !cli.json {
        println!("Counting words from {}...", cli.url);
    }

    let ranked = report::rank(tally.snapshot(), limit);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let written = if cli.json {
        report::write_json(&mut out, &cli.url, &ranked)
    } else {
        report::write_report(&mut out, &ranked, limit)
    };
    if let Err(e) = written {
        eprintln!("error writing output: {e}");
        std::process::exit(1);
    }
}
