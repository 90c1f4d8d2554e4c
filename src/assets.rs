// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Existence checks for files referenced by the site document.
//!
//! The assembler never touches the filesystem itself. It asks an
//! [`AssetResolver`], which lets tests and embedders substitute their own
//! notion of which files exist.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Answers whether a referenced asset exists.
pub trait AssetResolver
{
    /// Returns `true` when `path` names an existing file.
    fn file_exists(&self, path: &Path,) -> bool;
}

impl<F,> AssetResolver for F
where
    F: Fn(&Path,) -> bool,
{
    fn file_exists(&self, path: &Path,) -> bool
    {
        self(path,)
    }
}

/// Resolver backed by the local filesystem.
///
/// Relative paths are joined onto `root`, normally the directory holding the
/// site document. Absolute paths are checked as-is.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use sitenav::{AssetResolver, FsAssetResolver};
///
/// let resolver = FsAssetResolver::new("docs",);
/// assert!(resolver.file_exists(Path::new("./src/styles/custom.css",)));
/// ```
#[derive(Debug, Clone,)]
pub struct FsAssetResolver
{
    root: PathBuf,
}

impl FsAssetResolver
{
    /// Creates a resolver rooted at the given directory.
    pub fn new(root: impl Into<PathBuf,>,) -> Self
    {
        Self {
            root: root.into(),
        }
    }

    /// Directory relative paths are resolved against.
    pub fn root(&self,) -> &Path
    {
        &self.root
    }

    /// Absolute or root-relative location of `path`.
    pub fn resolve(&self, path: &Path,) -> PathBuf
    {
        if path.is_absolute() { path.to_path_buf() } else { self.root.join(path,) }
    }
}

impl AssetResolver for FsAssetResolver
{
    fn file_exists(&self, path: &Path,) -> bool
    {
        let resolved = self.resolve(path,);
        let exists = resolved.is_file();
        debug!("asset {} exists: {exists}", resolved.display());
        exists
    }
}
