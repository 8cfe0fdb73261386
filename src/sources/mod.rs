//! Package sources.
//!
//! Sources are responsible for getting a package archive onto disk and
//! unpacking it.

pub mod archive;
pub mod download;

pub use archive::{extract, ArchiveFormat, ExtractError};
pub use download::{ArtifactLocation, DownloadError, Fetcher, HttpFetcher};
