use std::fs;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::error::DataSourceError;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SalesSource {
    File(PathBuf),
    Stdin,
    Url(String),
}

impl SalesSource {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed == "-" {
            return Self::Stdin;
        }
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Self::Url(trimmed.to_string());
        }
        Self::File(PathBuf::from(trimmed))
    }

    /// Identifier used for cache keys and error reporting.
    pub fn id(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "stdin".to_string(),
            Self::Url(url) => url.clone(),
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Stdin => "stdin",
            Self::Url(_) => "url",
        }
    }
}

pub(crate) fn read_source(
    source: &SalesSource,
    stdin_override: Option<String>,
) -> Result<String, DataSourceError> {
    debug!(source = %source.id(), kind = source.kind(), "reading sales source");
    let body = match source {
        SalesSource::File(path) => {
            let bytes = fs::read(path).map_err(|error| DataSourceError::Unreachable {
                source_id: source.id(),
                detail: error.to_string(),
            })?;
            decode_utf8(source, bytes)?
        }
        SalesSource::Stdin => match stdin_override {
            Some(value) => value,
            None => decode_utf8(source, read_stdin()?)?,
        },
        SalesSource::Url(url) => decode_utf8(source, fetch_url(url)?)?,
    };

    if body.trim().is_empty() {
        return Err(DataSourceError::Empty {
            source_id: source.id(),
        });
    }

    Ok(body)
}

fn decode_utf8(source: &SalesSource, bytes: Vec<u8>) -> Result<String, DataSourceError> {
    String::from_utf8(bytes).map_err(|error| DataSourceError::Malformed {
        source_id: source.id(),
        detail: format!("content is not UTF-8 text ({error})"),
    })
}

fn read_stdin() -> Result<Vec<u8>, DataSourceError> {
    if std::io::stdin().is_terminal() {
        return Err(DataSourceError::Unreachable {
            source_id: "stdin".to_string(),
            detail: "source `-` means stdin input, but nothing was piped".to_string(),
        });
    }

    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .map_err(|error| DataSourceError::Unreachable {
            source_id: "stdin".to_string(),
            detail: error.to_string(),
        })?;
    Ok(buffer)
}

fn fetch_url(url: &str) -> Result<Vec<u8>, DataSourceError> {
    let unreachable = |detail: String| DataSourceError::Unreachable {
        source_id: url.to_string(),
        detail,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|error| unreachable(error.to_string()))?;
    let response = client
        .get(url)
        .send()
        .map_err(|error| unreachable(error.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(unreachable(format!("server answered with status {status}")));
    }

    response
        .bytes()
        .map(|body| body.to_vec())
        .map_err(|error| unreachable(error.to_string()))
}
