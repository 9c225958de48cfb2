//! Best-effort creation of directories and output files.
//!
//! Both operations try the direct creation first. Only when that fails are
//! the missing ancestors created, walking the path from its root down to the
//! immediate parent, after which the original creation is retried once.

use std::fs::DirBuilder;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use log::debug;
use log::warn;

use crate::ExtractionError;
use crate::Result;

/// Creates a directory, creating missing ancestors with `parent_mode`.
///
/// A trailing separator on `path` is ignored. An already existing directory
/// counts as success.
///
/// # Errors
///
/// Returns [`ExtractionError::DirectoryCreate`] if the directory still cannot
/// be created after its ancestors were created. Callers treat this as
/// non-fatal.
pub fn create_directory(path: &Path, mode: u32, parent_mode: u32) -> Result<()> {
    let path = normalize(path);

    match make_dir(&path, mode) {
        Ok(()) => return Ok(()),
        Err(e) if is_existing_dir(&path, &e) => return Ok(()),
        Err(e) => debug!("mkdir {} failed ({e}), creating ancestors", path.display()),
    }

    if let Some(parent) = non_empty_parent(&path) {
        create_ancestors(parent, parent_mode);
    }

    match make_dir(&path, mode) {
        Ok(()) => Ok(()),
        Err(e) if is_existing_dir(&path, &e) => Ok(()),
        Err(source) => Err(ExtractionError::DirectoryCreate { path, source }),
    }
}

/// Opens `path` for truncating write, creating its parent on failure.
///
/// # Errors
///
/// Returns [`ExtractionError::FileCreate`] if the file cannot be opened even
/// after its parent directory was created. Callers treat this as non-fatal
/// and still drain the entry's payload.
pub fn create_file(path: &Path, mode: u32, parent_mode: u32) -> Result<File> {
    match open_truncate(path, mode) {
        Ok(file) => return Ok(file),
        Err(e) => debug!("open {} failed ({e}), creating parent", path.display()),
    }

    if let Some(parent) = non_empty_parent(path)
        && let Err(e) = create_directory(parent, parent_mode, parent_mode)
    {
        warn!("{e}");
    }

    open_truncate(path, mode).map_err(|source| ExtractionError::FileCreate {
        path: path.to_path_buf(),
        source,
    })
}

/// Rebuilds the path from its components, dropping trailing separators.
fn normalize(path: &Path) -> PathBuf {
    path.components().collect()
}

fn non_empty_parent(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

/// Creates every missing directory in `dir`, shallowest first.
fn create_ancestors(dir: &Path, mode: u32) {
    let mut prefix = PathBuf::new();

    for component in dir.components() {
        prefix.push(component);

        if !matches!(component, Component::Normal(_)) || prefix.is_dir() {
            continue;
        }

        if let Err(e) = make_dir(&prefix, mode)
            && !is_existing_dir(&prefix, &e)
        {
            // Everything below this point fails the same way; the caller's
            // retry reports it.
            debug!("mkdir {} failed: {e}", prefix.display());
            return;
        }
    }
}

fn is_existing_dir(path: &Path, err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::AlreadyExists && path.is_dir()
}

#[cfg(unix)]
fn make_dir(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    DirBuilder::new().mode(mode).create(path)
}

#[cfg(not(unix))]
fn make_dir(path: &Path, _mode: u32) -> io::Result<()> {
    DirBuilder::new().create(path)
}

#[cfg(unix)]
fn open_truncate(path: &Path, mode: u32) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(mode)
        .open(path)
}

#[cfg(not(unix))]
fn open_truncate(path: &Path, _mode: u32) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
