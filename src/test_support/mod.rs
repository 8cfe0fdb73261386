//! Test fixtures for Modulo unit tests.
//!
//! Builds package archives, registries and installed layouts inside a
//! temporary directory so the install and compile pipelines can run without
//! the network or the real home directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use modulo::test_support::{PackageArchive, TestEnv};
//!
//! let env = TestEnv::new();
//! let archive = PackageArchive::new()
//!     .file("zlib/include/zlib.h", "int deflate(void);")
//!     .dir("zlib/lib");
//! env.publish("zlib", &archive);
//! ```

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

use crate::util::GlobalContext;

/// Contents of a package archive.
#[derive(Debug, Clone, Default)]
pub struct PackageArchive {
    /// Entry path → file contents (`None` for a directory)
    entries: Vec<(String, Option<Vec<u8>>)>,
}

impl PackageArchive {
    /// Create an empty archive description.
    pub fn new() -> Self {
        PackageArchive::default()
    }

    /// Add a directory entry.
    pub fn dir(mut self, path: &str) -> Self {
        self.entries.push((format!("{}/", path.trim_end_matches('/')), None));
        self
    }

    /// Add a file entry.
    pub fn file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.entries.push((path.to_string(), Some(contents.into())));
        self
    }

    /// Write the archive as a zip file.
    pub fn write_zip(&self, path: &Path) {
        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        let options = SimpleFileOptions::default();

        for (name, contents) in &self.entries {
            match contents {
                None => zip.add_directory(name.as_str(), options).unwrap(),
                Some(data) => {
                    zip.start_file(name.as_str(), options).unwrap();
                    zip.write_all(data).unwrap();
                }
            }
        }

        zip.finish().unwrap();
    }
}

/// A throwaway project directory, base directory and registry.
pub struct TestEnv {
    tmp: TempDir,
    registry: BTreeMap<String, serde_json::Value>,
    pub ctx: GlobalContext,
}

impl TestEnv {
    /// Create an environment with an empty project and no registry file.
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let project = tmp.path().join("project");
        fs::create_dir_all(&project).unwrap();
        fs::create_dir_all(tmp.path().join("archives")).unwrap();

        let ctx = GlobalContext::with_home(project, tmp.path().join("home"))
            .with_registry_path(tmp.path().join("registry.json"));

        TestEnv {
            tmp,
            registry: BTreeMap::new(),
            ctx,
        }
    }

    /// Project directory (working directory of the context).
    pub fn project_dir(&self) -> &Path {
        self.ctx.cwd()
    }

    /// Base directory (`~/.modulo` stand-in). Not created up front.
    pub fn home(&self) -> PathBuf {
        self.tmp.path().join("home")
    }

    /// Directory holding archives that registry entries point at.
    pub fn archives_dir(&self) -> PathBuf {
        self.tmp.path().join("archives")
    }

    /// Add or replace a registry entry and rewrite `registry.json`.
    pub fn register(&mut self, name: &str, entry: serde_json::Value) {
        self.registry.insert(name.to_string(), entry);
        let json = serde_json::to_string_pretty(&self.registry).unwrap();
        fs::write(self.ctx.registry_path(), json).unwrap();
    }

    /// Write `archive` as `<name>.zip` and register it under `name`.
    pub fn publish(&mut self, name: &str, archive: &PackageArchive) -> PathBuf {
        let path = self.archives_dir().join(format!("{}.zip", name));
        archive.write_zip(&path);
        self.register(name, serde_json::Value::String(path.display().to_string()));
        path
    }

    /// Create an installed layout directly, bypassing the installer.
    pub fn install_layout(&self, package: &str, dirs: &[&str]) -> PathBuf {
        let root = self.home().join("packages").join(package);
        fs::create_dir_all(&root).unwrap();
        for dir in dirs {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        root
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
