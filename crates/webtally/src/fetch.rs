//! HTTP retrieval: request settings, the fetch error taxonomy, and a
//! streaming line reader over the response body.

use std::time::Duration;

use futures::StreamExt;

/// Knobs for the HTTP request.
#[derive(Clone, Debug)]
pub struct FetchSettings {
    /// TCP connect deadline.
    pub connect_timeout: Duration,
    /// Whole-request deadline (connect, headers, and body).
    pub request_timeout: Duration,
    /// `User-Agent` header sent with the request.
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: "Mozilla/5.0".to_owned(),
        }
    }
}

/// Error type for document retrieval failures. All variants are fatal;
/// nothing is retried.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum FetchError {
    /// The target URL failed to parse.
    #[error("invalid URL {url:?}: {message}")]
    #[diagnostic(code(webtally::fetch::invalid_url))]
    InvalidUrl {
        /// The URL as given on the command line.
        url: String,
        /// Parser detail.
        message: String,
    },

    /// Connect or read deadline exceeded.
    #[error("request timed out: {0}")]
    #[diagnostic(
        code(webtally::fetch::timeout),
        help("raise the deadline with --timeout")
    )]
    Timeout(String),

    /// DNS / connection / transport failure.
    #[error("network error: {0}")]
    #[diagnostic(code(webtally::fetch::network))]
    Network(String),

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    #[diagnostic(
        code(webtally::fetch::http_status),
        help("the document was not retrieved; nothing was counted")
    )]
    HttpStatus {
        /// Status code of the response.
        status: u16,
        /// Final URL the status came from (after redirects).
        url: String,
    },

    /// The body stream failed partway through.
    #[error("error reading response body: {0}")]
    #[diagnostic(code(webtally::fetch::body))]
    Body(String),
}

fn map_transport_error(err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(err.to_string())
    } else {
        FetchError::Network(err.to_string())
    }
}

fn map_body_error(err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(err.to_string())
    } else {
        FetchError::Body(err.to_string())
    }
}

/// GET `url` and feed each line of the response body to `on_line`.
///
/// The body is consumed as a byte stream and split on `\n`; each complete
/// line is decoded lossily as UTF-8 with its terminator stripped. A final
/// unterminated line is flushed at end of stream.
pub async fn fetch_lines<F>(
    url: &str,
    settings: &FetchSettings,
    mut on_line: F,
) -> Result<(), FetchError>
where
    F: FnMut(&str),
{
    let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_owned(),
        message: e.to_string(),
    })?;

    let client = reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .user_agent(settings.user_agent.clone())
        .build()
        .map_err(|e| FetchError::Network(e.to_string()))?;

    let response = client
        .get(parsed)
        .send()
        .await
        .map_err(|e| map_transport_error(&e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        });
    }

    let mut pending: Vec<u8> = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| map_body_error(&e))?;
        pending.extend_from_slice(&chunk);
        while let Some(pos) = pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = pending.drain(..=pos).collect();
            on_line(&decode_line(&line));
        }
    }
    if !pending.is_empty() {
        on_line(&decode_line(&pending));
    }

    Ok(())
}

/// Lossy UTF-8 decode of one raw line, minus its `\n` / `\r\n` terminator.
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
