//! Installed package layouts and role directory discovery.
//!
//! Nothing records what an archive contained. Instead, directories are
//! classified by name when needed: a directory called exactly `include`
//! holds headers, `lib` holds static/import libraries and `bin` holds
//! shared binaries. Matching is exact and case-sensitive, so `Include` and
//! `libs` are ignored.
//!
//! Classification ([`DirRole::classify`], [`RoleDirs::from_paths`]) is kept
//! separate from traversal ([`scan`]).

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Conventional purpose of a directory inside a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirRole {
    /// Header search directory
    Include,
    /// Static or import library directory
    Lib,
    /// Shared binary directory
    Bin,
}

impl DirRole {
    /// Every role, in flag order.
    pub const ALL: [DirRole; 3] = [DirRole::Include, DirRole::Lib, DirRole::Bin];

    /// The exact directory name that marks this role.
    pub fn dir_name(&self) -> &'static str {
        match self {
            DirRole::Include => "include",
            DirRole::Lib => "lib",
            DirRole::Bin => "bin",
        }
    }

    /// Classify a directory by its final path component.
    pub fn classify(name: &OsStr) -> Option<DirRole> {
        DirRole::ALL
            .into_iter()
            .find(|role| name == OsStr::new(role.dir_name()))
    }
}

/// Directories found in one layout, grouped by role.
///
/// Each list keeps traversal order, which is not stable across platforms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDirs {
    pub include: Vec<PathBuf>,
    pub lib: Vec<PathBuf>,
    pub bin: Vec<PathBuf>,
}

impl RoleDirs {
    /// Classify a list of directory paths. Paths without a role are dropped.
    pub fn from_paths<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut dirs = RoleDirs::default();
        for path in paths {
            let role = path.file_name().and_then(DirRole::classify);
            if let Some(role) = role {
                dirs.push(role, path);
            }
        }
        dirs
    }

    /// Record a directory under a role.
    pub fn push(&mut self, role: DirRole, path: PathBuf) {
        match role {
            DirRole::Include => self.include.push(path),
            DirRole::Lib => self.lib.push(path),
            DirRole::Bin => self.bin.push(path),
        }
    }

    /// Directories recorded for a role.
    pub fn get(&self, role: DirRole) -> &[PathBuf] {
        match role {
            DirRole::Include => &self.include,
            DirRole::Lib => &self.lib,
            DirRole::Bin => &self.bin,
        }
    }

    /// True when no role directory was found.
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.lib.is_empty() && self.bin.is_empty()
    }
}

/// Recursively scan `root` and classify every subdirectory by name.
///
/// A missing root yields empty lists. Entries that cannot be read are
/// skipped with a warning. Symlinks are not followed.
pub fn scan(root: &Path) -> RoleDirs {
    let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());

    if !root.is_dir() {
        tracing::debug!("layout root {} does not exist", root.display());
        return RoleDirs::default();
    }

    let dirs = WalkDir::new(&root)
        .min_depth(1)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .map(walkdir::DirEntry::into_path);

    let found = RoleDirs::from_paths(dirs);
    tracing::debug!(
        "scanned {}: {} include, {} lib, {} bin",
        root.display(),
        found.include.len(),
        found.lib.len(),
        found.bin.len()
    );
    found
}
