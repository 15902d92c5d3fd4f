use std::io;
use std::path::PathBuf;

/// Failures of the fetch, read and write steps of a sync.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(
        "a GitHub username is required\n\n\
         usage: {bin} --username <NAME>\n\
         example: {bin} --username octocat",
        bin = env!("CARGO_PKG_NAME")
    )]
    MissingUsername,

    #[error("'{0}' is not a valid GitHub username")]
    InvalidUsername(String),

    #[error("could not determine the home directory of the current user")]
    HomeDir,

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("GitHub API returned {status} for {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode keys returned by {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read key file: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write key file: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    /// Process exit status for this error. Usage errors share clap's code.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingUsername | Self::InvalidUsername(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
