//! Implementation of `modulo install`.
//!
//! Installing a package runs these steps in order, stopping at the first
//! failure:
//!
//! 1. resolve the name in the registry
//! 2. fetch the archive to `~/.modulo/downloads/<name>.<ext>`
//! 3. reject archives below the minimum size (and verify `sha256` if given)
//! 4. extract into `~/.modulo/packages/<name>`, replacing what was there
//! 5. scan the extracted tree for `bin` directories
//! 6. copy every shared binary from them into `~/.modulo/bin`
//!
//! Nothing is rolled back on failure. Running the install again overwrites
//! the previous attempt.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::layout;
use crate::core::registry::{self, RegistryError};
use crate::sources::{extract, ArchiveFormat, DownloadError, ExtractError, Fetcher};
use crate::util::config::ConfigError;
use crate::util::fs;
use crate::util::hash::sha256_file;
use crate::util::{GlobalContext, Shell, Status};

/// Errors from the install pipeline.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("package `{name}` could not be resolved")]
    PackageNotFound {
        name: String,
        #[source]
        source: RegistryError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to download `{name}`")]
    DownloadFailed {
        name: String,
        #[source]
        source: DownloadError,
    },

    #[error(
        "downloaded archive for `{name}` is {size} bytes (minimum {minimum}); it is probably not a valid archive"
    )]
    InvalidArtifact { name: String, size: u64, minimum: u64 },

    #[error("checksum mismatch for `{name}`: expected {expected}, got {actual}")]
    ChecksumMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("failed to extract `{name}`")]
    ExtractionFailed {
        name: String,
        #[source]
        source: ExtractError,
    },

    #[error("failed to stage shared binaries for `{name}`:{}", format_failures(.failures))]
    StagingFailed {
        name: String,
        failures: Vec<StagingFailure>,
    },

    #[error("failed to prepare install directories")]
    Storage(#[source] anyhow::Error),
}

/// A shared binary (or binary directory) that could not be staged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for StagingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

fn format_failures(failures: &[StagingFailure]) -> String {
    failures.iter().map(|f| format!("\n  {}", f)).collect()
}

/// Per-file outcome of staging.
#[derive(Debug, Clone, Default)]
pub struct StagingReport {
    /// Destination paths of copied binaries
    pub staged: Vec<PathBuf>,
    /// Copies that failed
    pub failures: Vec<StagingFailure>,
}

impl StagingReport {
    /// True when every copy succeeded.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of a successful install.
#[derive(Debug, Clone)]
pub struct InstallResult {
    /// Package name
    pub name: String,
    /// Registry URL the archive came from
    pub url: String,
    /// Downloaded archive
    pub artifact: PathBuf,
    /// Extraction root under the packages directory
    pub dest: PathBuf,
    /// Shared binaries copied into the global bin directory
    pub staged: Vec<PathBuf>,
}

/// Install a package from the registry.
pub fn install(
    ctx: &GlobalContext,
    name: &str,
    fetcher: &dyn Fetcher,
    shell: &Shell,
) -> Result<InstallResult, InstallError> {
    let entry = registry::resolve(&ctx.registry_path(), name).map_err(|source| {
        InstallError::PackageNotFound {
            name: name.to_string(),
            source,
        }
    })?;
    let url = entry.url().to_string();
    let install_cfg = &ctx.config().install;

    // Fetch
    let format = ArchiveFormat::from_location(&url);
    let downloads = ctx.downloads_dir()?;
    fs::ensure_dir(&downloads).map_err(InstallError::Storage)?;
    let artifact = downloads.join(format.artifact_name(name));

    shell.status(Status::Fetching, format!("{} ({})", name, url));
    let written = fetcher
        .fetch(&url, &artifact, shell)
        .map_err(|source| InstallError::DownloadFailed {
            name: name.to_string(),
            source,
        })?;
    tracing::info!("fetched {} bytes for `{}`", written, name);

    // Integrity
    let size = fs::file_size(&artifact).map_err(InstallError::Storage)?;
    if size < install_cfg.min_artifact_size {
        return Err(InstallError::InvalidArtifact {
            name: name.to_string(),
            size,
            minimum: install_cfg.min_artifact_size,
        });
    }

    let digest = sha256_file(&artifact).map_err(InstallError::Storage)?;
    tracing::debug!("sha256({}) = {}", artifact.display(), digest);
    if let Some(expected) = entry.sha256() {
        if !expected.eq_ignore_ascii_case(&digest) {
            return Err(InstallError::ChecksumMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                actual: digest,
            });
        }
    }

    // Extract
    let dest = ctx.package_dir(name)?;
    shell.status(Status::Extracting, dest.display());
    fs::remove_dir_all_if_exists(&dest).map_err(InstallError::Storage)?;
    extract(&artifact, format, &dest).map_err(|source| InstallError::ExtractionFailed {
        name: name.to_string(),
        source,
    })?;

    // Stage
    let roles = layout::scan(&dest);
    let bin_dir = ctx.bin_dir()?;
    fs::ensure_dir(&bin_dir).map_err(InstallError::Storage)?;
    let report = stage_binaries(&roles.bin, &bin_dir, &install_cfg.shared_lib_extension);

    for path in &report.staged {
        tracing::debug!("staged {}", path.display());
    }
    if !report.staged.is_empty() {
        shell.status(
            Status::Staged,
            format!("{} shared binaries into {}", report.staged.len(), bin_dir.display()),
        );
    }

    if !report.is_success() {
        return Err(InstallError::StagingFailed {
            name: name.to_string(),
            failures: report.failures,
        });
    }

    Ok(InstallResult {
        name: name.to_string(),
        url,
        artifact,
        dest,
        staged: report.staged,
    })
}

/// Copy every `*.<ext>` file from each of `bin_dirs` into `target`.
///
/// Existing files with the same name are overwritten. Every copy is
/// attempted; failures are collected rather than stopping the loop.
pub fn stage_binaries(bin_dirs: &[PathBuf], target: &Path, ext: &str) -> StagingReport {
    let mut report = StagingReport::default();

    for dir in bin_dirs {
        let files = match fs::files_with_extension(dir, ext) {
            Ok(files) => files,
            Err(e) => {
                report.failures.push(StagingFailure {
                    path: dir.clone(),
                    reason: format!("{:#}", e),
                });
                continue;
            }
        };

        for file in files {
            let Some(file_name) = file.file_name() else {
                continue;
            };
            let dest = target.join(file_name);

            match std::fs::copy(&file, &dest) {
                Ok(_) => report.staged.push(dest),
                Err(e) => report.failures.push(StagingFailure {
                    path: file,
                    reason: e.to_string(),
                }),
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::HttpFetcher;
    use crate::test_support::{PackageArchive, TestEnv};
    use crate::util::config::NetConfig;
    use crate::util::shell::{ColorChoice, Verbosity};
    use std::env::consts::DLL_EXTENSION;

    fn quiet() -> Shell {
        Shell::new(Verbosity::Quiet, ColorChoice::Never)
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&NetConfig::default()).unwrap()
    }

    fn dll(name: &str) -> String {
        format!("{}.{}", name, DLL_EXTENSION)
    }

    fn glfw_archive() -> PackageArchive {
        PackageArchive::new()
            .file("glfw-3.4/include/GLFW/glfw3.h", "void glfwInit(void);\n")
            .file("glfw-3.4/lib/glfw3.lib", vec![1u8; 64])
            .file(&format!("glfw-3.4/bin/{}", dll("glfw3")), vec![2u8; 64])
            .file("glfw-3.4/bin/README.txt", "not a binary")
    }

    #[test]
    fn test_install_unknown_package_writes_nothing() {
        let mut env = TestEnv::new();
        env.register("zlib", serde_json::json!("https://example.com/zlib.zip"));

        let err = install(&env.ctx, "nope", &fetcher(), &quiet()).unwrap_err();

        assert!(matches!(
            err,
            InstallError::PackageNotFound {
                source: RegistryError::NotFound { .. },
                ..
            }
        ));
        assert!(!env.home().exists());
    }

    #[test]
    fn test_install_without_registry() {
        let env = TestEnv::new();
        let err = install(&env.ctx, "zlib", &fetcher(), &quiet()).unwrap_err();
        assert!(matches!(
            err,
            InstallError::PackageNotFound {
                source: RegistryError::Unavailable { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_install_extracts_and_stages() {
        let mut env = TestEnv::new();
        env.publish("glfw", &glfw_archive());

        let result = install(&env.ctx, "glfw", &fetcher(), &quiet()).unwrap();

        let dest = env.home().join("packages/glfw");
        assert_eq!(result.dest, dest);
        assert_eq!(result.artifact, env.home().join("downloads/glfw.zip"));
        assert!(dest.join("glfw-3.4/include/GLFW/glfw3.h").is_file());

        let staged = env.home().join("bin").join(dll("glfw3"));
        assert_eq!(result.staged, vec![staged.clone()]);
        assert_eq!(std::fs::read(&staged).unwrap(), vec![2u8; 64]);
        assert!(!env.home().join("bin/README.txt").exists());
    }

    #[test]
    fn test_install_rejects_tiny_artifact() {
        let mut env = TestEnv::new();
        let tiny = env.archives_dir().join("tiny.zip");
        std::fs::write(&tiny, b"<html>404</html>").unwrap();
        env.register("tiny", serde_json::json!(tiny.display().to_string()));

        let err = install(&env.ctx, "tiny", &fetcher(), &quiet()).unwrap_err();

        assert!(matches!(
            err,
            InstallError::InvalidArtifact { size: 16, minimum: 100, .. }
        ));
        assert!(!env.home().join("packages").exists());
    }

    #[test]
    fn test_install_download_failure() {
        let mut env = TestEnv::new();
        let missing = env.archives_dir().join("missing.zip");
        env.register("missing", serde_json::json!(missing.display().to_string()));

        let err = install(&env.ctx, "missing", &fetcher(), &quiet()).unwrap_err();
        assert!(matches!(err, InstallError::DownloadFailed { .. }));
    }

    #[test]
    fn test_install_corrupt_archive_fails_extraction() {
        let mut env = TestEnv::new();
        let garbage = env.archives_dir().join("garbage.zip");
        std::fs::write(&garbage, vec![0x42u8; 4096]).unwrap();
        env.register("garbage", serde_json::json!(garbage.display().to_string()));

        let err = install(&env.ctx, "garbage", &fetcher(), &quiet()).unwrap_err();
        assert!(matches!(err, InstallError::ExtractionFailed { .. }));
    }

    #[test]
    fn test_install_checksum() {
        let mut env = TestEnv::new();
        let path = env.publish("glfw", &glfw_archive());
        let digest = sha256_file(&path).unwrap();

        env.register(
            "glfw",
            serde_json::json!({ "url": path.display().to_string(), "sha256": "00ff" }),
        );
        let err = install(&env.ctx, "glfw", &fetcher(), &quiet()).unwrap_err();
        assert!(matches!(err, InstallError::ChecksumMismatch { .. }));
        assert!(!env.home().join("packages/glfw").exists());

        env.register(
            "glfw",
            serde_json::json!({ "url": path.display().to_string(), "sha256": digest.to_uppercase() }),
        );
        install(&env.ctx, "glfw", &fetcher(), &quiet()).unwrap();
    }

    #[test]
    fn test_reinstall_replaces_stale_files() {
        let mut env = TestEnv::new();
        env.publish("glfw", &glfw_archive());
        install(&env.ctx, "glfw", &fetcher(), &quiet()).unwrap();

        let stale = env.home().join("packages/glfw/stale.h");
        std::fs::write(&stale, "old").unwrap();

        install(&env.ctx, "glfw", &fetcher(), &quiet()).unwrap();
        assert!(!stale.exists());
        assert!(env
            .home()
            .join("packages/glfw/glfw-3.4/include/GLFW/glfw3.h")
            .is_file());
    }

    #[test]
    fn test_staging_last_writer_wins() {
        let mut env = TestEnv::new();
        let shared = dll("shared");
        env.publish(
            "first",
            &PackageArchive::new()
                .file(&format!("bin/{}", shared), vec![1u8; 200])
                .file("include/first.h", "x"),
        );
        env.publish(
            "second",
            &PackageArchive::new()
                .file(&format!("bin/{}", shared), vec![2u8; 200])
                .file("include/second.h", "y"),
        );

        install(&env.ctx, "first", &fetcher(), &quiet()).unwrap();
        install(&env.ctx, "second", &fetcher(), &quiet()).unwrap();

        let staged = std::fs::read(env.home().join("bin").join(&shared)).unwrap();
        assert_eq!(staged, vec![2u8; 200]);
    }

    #[test]
    fn test_stage_binaries_reports_failures() {
        let tmp = tempfile::TempDir::new().unwrap();
        let bin = tmp.path().join("pkg/bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join("a.dll"), "a").unwrap();
        std::fs::write(bin.join("b.dll"), "b").unwrap();

        let missing_dir = tmp.path().join("other/bin");
        let target = tmp.path().join("not-created");

        let report = stage_binaries(&[bin.clone(), missing_dir.clone()], &target, "dll");

        assert!(!report.is_success());
        assert!(report.staged.is_empty());
        let failed: Vec<_> = report.failures.iter().map(|f| f.path.clone()).collect();
        assert_eq!(failed, vec![bin.join("a.dll"), bin.join("b.dll"), missing_dir]);
    }

    #[test]
    fn test_staging_failure_message_lists_files() {
        let err = InstallError::StagingFailed {
            name: "glfw".to_string(),
            failures: vec![StagingFailure {
                path: PathBuf::from("/p/bin/glfw3.dll"),
                reason: "permission denied".to_string(),
            }],
        };
        assert_eq!(
            err.to_string(),
            "failed to stage shared binaries for `glfw`:\n  /p/bin/glfw3.dll: permission denied"
        );
    }
}
