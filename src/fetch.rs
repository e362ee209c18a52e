//! Byte fetching for playlist documents and audio sources.
//!
//! A location is either an `http(s)://` URL, a `file://` URL or a plain
//! filesystem path.

use std::path::{Path, PathBuf};

use thiserror::Error;

const USER_AGENT: &str = concat!("musik/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read \"{}\"", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request to \"{url}\" failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("\"{url}\" answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location<'a> {
    Http(&'a str),
    File(&'a Path),
}

impl<'a> Location<'a> {
    pub fn parse(location: &'a str) -> Self {
        let lower = location.get(..8).unwrap_or(location).to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Location::Http(location)
        } else if let Some(path) = location.strip_prefix("file://") {
            Location::File(Path::new(path))
        } else {
            Location::File(Path::new(location))
        }
    }
}

/// Read the whole resource at `location` into memory.
pub fn fetch_bytes(location: &str) -> Result<Vec<u8>, FetchError> {
    match Location::parse(location) {
        Location::File(path) => std::fs::read(path).map_err(|source| FetchError::Io {
            path: path.to_path_buf(),
            source,
        }),
        Location::Http(url) => fetch_http(url),
    }
}

fn fetch_http(url: &str) -> Result<Vec<u8>, FetchError> {
    let http_err = |source| FetchError::Http {
        url: url.to_string(),
        source,
    };

    tracing::debug!(url, "fetching over http");
    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(http_err)?;

    let response = client.get(url).send().map_err(http_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let bytes = response.bytes().map_err(http_err)?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_parse_recognises_schemes() {
        assert_eq!(
            Location::parse("https://example.com/a.json"),
            Location::Http("https://example.com/a.json")
        );
        assert_eq!(
            Location::parse("HTTP://example.com/a.json"),
            Location::Http("HTTP://example.com/a.json")
        );
        assert_eq!(
            Location::parse("file:///tmp/a.json"),
            Location::File(Path::new("/tmp/a.json"))
        );
        assert_eq!(
            Location::parse("music/a.json"),
            Location::File(Path::new("music/a.json"))
        );
    }

    #[test]
    fn fetch_bytes_reads_local_files_and_file_urls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, b"hello").unwrap();

        assert_eq!(fetch_bytes(path.to_str().unwrap()).unwrap(), b"hello");
        let url = format!("file://{}", path.display());
        assert_eq!(fetch_bytes(&url).unwrap(), b"hello");
    }

    #[test]
    fn fetch_bytes_reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = fetch_bytes(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, FetchError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
