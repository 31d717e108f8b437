use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckerError {
    #[error(
        "File '{}' does not exist. Please create the file in the same folder as the proxy checker.",
        .0.display()
    )]
    MissingOutputFile(PathBuf),

    #[error("Error fetching proxies from {url}: {source}")]
    SourceRequest {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error fetching proxies from {url}: HTTP status {status}")]
    SourceStatus { url: String, status: StatusCode },

    #[error("Error writing valid proxies to file: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
