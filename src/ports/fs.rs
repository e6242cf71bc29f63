use eyre::{Result, eyre};
use glob::{MatchOptions, Pattern};
use log::debug;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// A single directory entry, named relative to the lister's base directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: String,
    pub is_dir: bool,
}

/// Split a partial token into the directory part (with trailing slash) and the basename
pub fn split_partial(partial: &str) -> (&str, &str) {
    match partial.rfind('/') {
        Some(idx) => (&partial[..=idx], &partial[idx + 1..]),
        None => ("", partial),
    }
}

/// Filesystem abstraction for dependency injection
///
/// Implementors only enumerate a directory. The listers built on top never
/// prefix-filter: that happens once, in the resolver.
pub trait FileSystem: Send + Sync {
    /// Immediate children of `dir` (empty string for the base directory, otherwise
    /// a path ending in `/`). Returned paths keep the `dir` prefix.
    fn entries(&self, dir: &str, include_hidden: bool) -> Result<Vec<Entry>>;

    /// Files and directories in the directory `partial` points into.
    /// A bare `~` is not expanded; `~/` is, for listers that know a home directory.
    fn list_files(&self, partial: &str) -> Vec<String> {
        let (dir, base) = split_partial(partial);
        let mut names: Vec<String> = swallow(dir, self.entries(dir, base.starts_with('.')))
            .into_iter()
            .map(|e| e.path)
            .collect();
        names.sort();
        names
    }

    /// Directories in the directory `partial` points into. With `follow`, a single
    /// directory matching `partial` also contributes its own subdirectories.
    fn list_dirs(&self, partial: &str, follow: bool) -> Vec<String> {
        let (dir, base) = split_partial(partial);
        let mut names: Vec<String> = swallow(dir, self.entries(dir, base.starts_with('.')))
            .into_iter()
            .filter(|e| e.is_dir)
            .map(|e| e.path)
            .collect();
        names.sort();

        if follow {
            let matching: Vec<&String> = names.iter().filter(|n| n.starts_with(partial)).collect();
            let single = match matching.as_slice() {
                [only] => Some(format!("{only}/")),
                _ => None,
            };
            if let Some(inner) = single {
                let mut subdirs: Vec<String> = swallow(&inner, self.entries(&inner, false))
                    .into_iter()
                    .filter(|e| e.is_dir)
                    .map(|e| e.path)
                    .collect();
                subdirs.sort();
                names.extend(subdirs);
            }
        }

        names
    }
}

fn swallow(dir: &str, result: Result<Vec<Entry>>) -> Vec<Entry> {
    result.unwrap_or_else(|e| {
        debug!("listing '{dir}' failed: {e}");
        Vec::new()
    })
}

/// Real filesystem implementation, enumerating with glob patterns
///
/// Relative partial tokens are listed against `root`. A token starting with
/// `~/` is listed against the home directory and keeps its `~/` prefix.
#[derive(Debug, Clone)]
pub struct RealFs {
    root: PathBuf,
    home: Option<PathBuf>,
}

impl RealFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            home: dirs::home_dir(),
        }
    }

    /// Lister rooted at the process working directory
    pub fn current_dir() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Directory that `~/` expands to
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    fn resolve_dir(&self, dir: &str) -> Result<PathBuf> {
        match dir.strip_prefix("~/") {
            Some(rest) => {
                let home = self.home.as_ref().ok_or_else(|| eyre!("no home directory"))?;
                Ok(home.join(rest))
            }
            None => Ok(self.root.join(dir)),
        }
    }
}

impl FileSystem for RealFs {
    fn entries(&self, dir: &str, include_hidden: bool) -> Result<Vec<Entry>> {
        let target = self.resolve_dir(dir)?;
        // read the directory up front so permission errors surface instead of
        // glob silently yielding nothing
        std::fs::read_dir(&target)?;

        let lossy = target.to_string_lossy();
        let pattern = format!("{}/*", Pattern::escape(lossy.trim_end_matches('/')));
        let options = MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: !include_hidden,
        };

        let mut entries = Vec::new();
        for path in glob::glob_with(&pattern, options)?.flatten() {
            let Some(name) = path.file_name() else { continue };
            entries.push(Entry {
                path: format!("{dir}{}", name.to_string_lossy()),
                is_dir: path.is_dir(),
            });
        }
        Ok(entries)
    }
}

/// In-memory filesystem for testing
#[derive(Debug, Clone, Default)]
pub struct MemFs {
    files: Arc<RwLock<HashSet<PathBuf>>>,
    dirs: Arc<RwLock<HashSet<PathBuf>>>,
    denied: Arc<RwLock<HashSet<PathBuf>>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file for testing
    pub fn add_file(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.files.write().unwrap().insert(path.clone());

        // Add parent directories
        if let Some(parent) = path.parent()
            && parent != Path::new("")
        {
            self.add_dir(parent);
        }
    }

    /// Add a directory for testing
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        self.dirs.write().unwrap().insert(path.clone());

        // Add parent directories recursively
        if let Some(parent) = path.parent()
            && parent != Path::new("")
        {
            self.add_dir(parent);
        }
    }

    /// Make listing `path` fail, as an unreadable directory would
    pub fn deny(&self, path: impl AsRef<Path>) {
        self.denied.write().unwrap().insert(path.as_ref().to_path_buf());
    }
}

impl FileSystem for MemFs {
    fn entries(&self, dir: &str, include_hidden: bool) -> Result<Vec<Entry>> {
        let parent = PathBuf::from(dir.trim_end_matches('/'));
        if self.denied.read().unwrap().contains(&parent) {
            return Err(eyre!("Permission denied: {}", parent.display()));
        }
        if parent != Path::new("") && !self.dirs.read().unwrap().contains(&parent) {
            return Err(eyre!("Path not found: {}", parent.display()));
        }

        let files = self.files.read().unwrap();
        let dirs = self.dirs.read().unwrap();
        let children = files
            .iter()
            .map(|p| (p, false))
            .chain(dirs.iter().map(|p| (p, true)))
            .filter(|(p, _)| p.parent() == Some(parent.as_path()));

        let mut entries = Vec::new();
        for (path, is_dir) in children {
            let Some(name) = path.file_name() else { continue };
            let name = name.to_string_lossy();
            if name.starts_with('.') && !include_hidden {
                continue;
            }
            entries.push(Entry {
                path: format!("{dir}{name}"),
                is_dir,
            });
        }
        Ok(entries)
    }
}
