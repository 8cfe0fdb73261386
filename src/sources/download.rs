//! Artifact acquisition.
//!
//! Registry URLs are either remote (`http://`, `https://`) or local
//! (`file://` URLs and plain paths). Remote archives are streamed to disk
//! with the blocking `reqwest` client; local ones are copied.
//!
//! Fetching is a single attempt with no retries.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

use crate::util::config::NetConfig;
use crate::util::Shell;

/// Errors from artifact acquisition.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("unsupported URL scheme `{scheme}` in {url}")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where an artifact comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactLocation {
    /// An `http` or `https` URL
    Remote(Url),
    /// A file on the local machine
    Local(PathBuf),
}

impl ArtifactLocation {
    /// Interpret a registry URL.
    ///
    /// Strings that do not parse as absolute URLs, and single-letter schemes
    /// (Windows drive letters), are treated as local paths.
    pub fn parse(location: &str) -> Result<Self, DownloadError> {
        let url = match Url::parse(location) {
            Ok(url) if url.scheme().len() > 1 => url,
            _ => return Ok(ArtifactLocation::Local(PathBuf::from(location))),
        };

        match url.scheme() {
            "http" | "https" => Ok(ArtifactLocation::Remote(url)),
            "file" => url
                .to_file_path()
                .map(ArtifactLocation::Local)
                .map_err(|_| DownloadError::UnsupportedScheme {
                    url: location.to_string(),
                    scheme: "file".to_string(),
                }),
            scheme => Err(DownloadError::UnsupportedScheme {
                url: location.to_string(),
                scheme: scheme.to_string(),
            }),
        }
    }
}

/// Transport that places an artifact at a local path.
pub trait Fetcher {
    /// Fetch `location` into `dest`, returning the number of bytes written.
    fn fetch(&self, location: &str, dest: &Path, shell: &Shell) -> Result<u64, DownloadError>;
}

/// The default transport: blocking HTTP plus local file copies.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher from network settings.
    pub fn new(net: &NetConfig) -> Result<Self, DownloadError> {
        let user_agent = net
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("modulo/{}", env!("CARGO_PKG_VERSION")));

        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .timeout(net.timeout())
            .build()
            .map_err(DownloadError::Client)?;

        Ok(HttpFetcher { client })
    }

    fn fetch_remote(&self, url: &Url, dest: &Path, shell: &Shell) -> Result<u64, DownloadError> {
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| DownloadError::Request {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let total = response.content_length().unwrap_or(0);
        let label = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| url.to_string());
        let progress = shell.bytes_progress(label, total);

        let write_err = |source: io::Error| DownloadError::Write {
            path: dest.to_path_buf(),
            source,
        };
        let mut file = File::create(dest).map_err(write_err)?;
        let mut buffer = [0u8; 64 * 1024];
        let mut written = 0u64;

        loop {
            let n = response
                .read(&mut buffer)
                .map_err(|source| DownloadError::Read {
                    path: PathBuf::from(url.as_str()),
                    source,
                })?;
            if n == 0 {
                break;
            }
            file.write_all(&buffer[..n]).map_err(write_err)?;
            progress.inc(n as u64);
            written += n as u64;
        }

        file.flush().map_err(write_err)?;
        progress.finish();
        Ok(written)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, location: &str, dest: &Path, shell: &Shell) -> Result<u64, DownloadError> {
        match ArtifactLocation::parse(location)? {
            ArtifactLocation::Remote(url) => {
                tracing::debug!("downloading {} to {}", url, dest.display());
                self.fetch_remote(&url, dest, shell)
            }
            ArtifactLocation::Local(path) => {
                tracing::debug!("copying {} to {}", path.display(), dest.display());
                if !path.is_file() {
                    return Err(DownloadError::Read {
                        path,
                        source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
                    });
                }
                std::fs::copy(&path, dest).map_err(|source| DownloadError::Write {
                    path: dest.to_path_buf(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_locations() {
        assert!(matches!(
            ArtifactLocation::parse("https://example.com/zlib.zip").unwrap(),
            ArtifactLocation::Remote(_)
        ));
        assert_eq!(
            ArtifactLocation::parse("archives/zlib.zip").unwrap(),
            ArtifactLocation::Local(PathBuf::from("archives/zlib.zip"))
        );
        assert_eq!(
            ArtifactLocation::parse(r"C:\archives\zlib.zip").unwrap(),
            ArtifactLocation::Local(PathBuf::from(r"C:\archives\zlib.zip"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_file_url() {
        assert_eq!(
            ArtifactLocation::parse("file:///tmp/zlib.zip").unwrap(),
            ArtifactLocation::Local(PathBuf::from("/tmp/zlib.zip"))
        );
    }

    #[test]
    fn test_parse_unsupported_scheme() {
        let err = ArtifactLocation::parse("ftp://example.com/zlib.zip").unwrap_err();
        assert!(matches!(err, DownloadError::UnsupportedScheme { scheme, .. } if scheme == "ftp"));
    }

    #[test]
    fn test_fetch_local_copy() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src.zip");
        let dest = tmp.path().join("zlib.zip");
        std::fs::write(&src, vec![7u8; 300]).unwrap();

        let fetcher = HttpFetcher::new(&NetConfig::default()).unwrap();
        let written = fetcher
            .fetch(src.to_str().unwrap(), &dest, &Shell::default())
            .unwrap();

        assert_eq!(written, 300);
        assert_eq!(std::fs::read(&dest).unwrap().len(), 300);
    }

    #[test]
    fn test_fetch_missing_local_file() {
        let tmp = TempDir::new().unwrap();
        let fetcher = HttpFetcher::new(&NetConfig::default()).unwrap();
        let err = fetcher
            .fetch(
                tmp.path().join("absent.zip").to_str().unwrap(),
                &tmp.path().join("out.zip"),
                &Shell::default(),
            )
            .unwrap_err();

        assert!(matches!(err, DownloadError::Read { .. }));
        assert!(!tmp.path().join("out.zip").exists());
    }
}
