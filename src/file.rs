//! Discovery and reading of the `.env` file.
//!
//! Each [`SearchPath`] variant resolves to one or more concrete directories:
//!
//! - `Platform`, `Home`, `Cwd`, `Path`: resolve to a single directory.
//! - `Ancestors(boundary)`: expands inline into multiple directories by walking
//!   from the current working directory up toward the filesystem root. Directories
//!   are emitted **shallowest first** so that deeper (closer to CWD) directories
//!   have higher priority, matching the list convention of "last = highest priority."
//!
//! The expanded list is searched from the **highest-priority end**; the first
//! directory containing the file supplies the source. Missing files are skipped
//! silently and a source that is never found is simply empty. Only real I/O
//! errors (permissions, invalid UTF-8) are propagated.

use std::path::{Path, PathBuf};

use crate::error::EnvfigError;
use crate::types::{Boundary, SearchPath};

/// Resolve a single-directory [`SearchPath`] to a concrete path.
///
/// `app_name` is used by `SearchPath::Platform` to construct the platform-specific
/// config directory (e.g. `~/.config/{app_name}/` on Linux).
///
/// Returns `None` if the path cannot be resolved (no home directory, no app name
/// for `Platform`) or for `Ancestors`, which expands to many directories.
pub fn resolve_search_path(sp: &SearchPath, app_name: Option<&str>) -> Option<PathBuf> {
    match sp {
        SearchPath::Platform => {
            let proj = directories::ProjectDirs::from("", "", app_name?)?;
            Some(proj.config_dir().to_path_buf())
        }
        SearchPath::Home(subdir) => {
            let user = directories::UserDirs::new()?;
            Some(user.home_dir().join(subdir))
        }
        SearchPath::Cwd => std::env::current_dir().ok(),
        SearchPath::Path(p) => Some(p.clone()),
        SearchPath::Ancestors(_) => None,
    }
}

/// Walk from `start` toward the filesystem root, shallowest directory first.
///
/// The [`Boundary`] controls where the walk ends:
/// - [`Root`](Boundary::Root): continues to the filesystem root.
/// - [`Marker(name)`](Boundary::Marker): stops (inclusive) at the first directory
///   containing a file or subdirectory named `name`. Falls back to root if the
///   marker is never found.
pub fn expand_ancestors_from(start: PathBuf, boundary: &Boundary) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let mut current = start.as_path();

    loop {
        dirs.push(current.to_path_buf());

        if let Boundary::Marker(name) = boundary
            && current.join(name).exists()
        {
            break;
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    dirs.reverse();
    dirs
}

/// Expand all search paths into a flat list of concrete directories (priority-ascending).
///
/// `ancestors_start` overrides the working directory as the start of `Ancestors`
/// walks; tests use it to stay inside a temp directory.
pub fn expand_search_paths(
    search_paths: &[SearchPath],
    app_name: Option<&str>,
    ancestors_start: Option<&Path>,
) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    for sp in search_paths {
        match sp {
            SearchPath::Ancestors(boundary) => {
                let start = match ancestors_start {
                    Some(start) => start.to_path_buf(),
                    None => match std::env::current_dir() {
                        Ok(cwd) => cwd,
                        Err(_) => continue,
                    },
                };
                dirs.extend(expand_ancestors_from(start, boundary));
            }
            other => {
                if let Some(dir) = resolve_search_path(other, app_name) {
                    dirs.push(dir);
                }
            }
        }
    }
    dirs
}

/// Read a file, treating "not found" as an absent source.
pub fn read_optional(path: &Path) -> Result<Option<String>, EnvfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(EnvfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Find and read the highest-priority `{dir}/{file_name}` among `dirs`.
pub fn find_env_file(
    dirs: &[PathBuf],
    file_name: &str,
) -> Result<Option<(PathBuf, String)>, EnvfigError> {
    for dir in dirs.iter().rev() {
        let file_path = dir.join(file_name);
        if let Some(content) = read_optional(&file_path)? {
            tracing::debug!(path = %file_path.display(), "found env file");
            return Ok(Some((file_path, content)));
        }
        tracing::trace!(path = %file_path.display(), "no env file");
    }
    Ok(None)
}
