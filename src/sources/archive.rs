//! Archive formats and extraction.
//!
//! Zip is the registry's native format; gzip-compressed and plain tarballs
//! are accepted as well. Both extractors refuse entries that would escape
//! the destination directory.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;
use zip::ZipArchive;

/// Errors from archive extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to open archive {}", path.display())]
    Open {
        path: std::path::PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid zip archive")]
    Zip(#[from] zip::result::ZipError),

    #[error("invalid tar archive")]
    Tar(#[source] io::Error),
}

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    TarGz,
    Tar,
}

impl ArchiveFormat {
    /// Infer the format from a URL or path. Anything unrecognized is zip.
    pub fn from_location(location: &str) -> Self {
        let lower = location
            .split(['?', '#'])
            .next()
            .unwrap_or(location)
            .to_lowercase();

        if lower.ends_with(".tar.gz") || lower.ends_with(".tgz") {
            ArchiveFormat::TarGz
        } else if lower.ends_with(".tar") {
            ArchiveFormat::Tar
        } else {
            ArchiveFormat::Zip
        }
    }

    /// File extension used for the downloaded artifact, without a dot.
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::Tar => "tar",
        }
    }

    /// Artifact file name for a package: `<package>.<ext>`.
    pub fn artifact_name(&self, package: &str) -> String {
        format!("{}.{}", package, self.extension())
    }
}

/// Extract `archive` into `dest`, creating `dest` if needed.
pub fn extract(archive: &Path, format: ArchiveFormat, dest: &Path) -> Result<(), ExtractError> {
    let file = File::open(archive).map_err(|source| ExtractError::Open {
        path: archive.to_path_buf(),
        source,
    })?;
    std::fs::create_dir_all(dest).map_err(|source| ExtractError::Open {
        path: dest.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        "extracting {} ({:?}) into {}",
        archive.display(),
        format,
        dest.display()
    );

    match format {
        ArchiveFormat::Zip => {
            let mut zip = ZipArchive::new(BufReader::new(file))?;
            zip.extract(dest)?;
        }
        ArchiveFormat::TarGz => {
            let mut tar = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
            tar.unpack(dest).map_err(ExtractError::Tar)?;
        }
        ArchiveFormat::Tar => {
            let mut tar = tar::Archive::new(BufReader::new(file));
            tar.unpack(dest).map_err(ExtractError::Tar)?;
        }
    }

    Ok(())
}
