//! File enumeration and write helpers.
//!
//! Everything here is synchronous; tasks call it from blocking threads.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pagesmith_config::{FileGroup, MATCH_OPTIONS};

use crate::error::{IoResultExt, Result, TaskError};

/// Regular files matched by `group`, sorted. A missing `cwd` yields nothing.
pub fn enumerate(group: &FileGroup) -> Result<Vec<PathBuf>> {
    if !group.cwd.is_dir() {
        return Ok(Vec::new());
    }
    group.compiled_pattern()?;

    let entries = glob::glob_with(&group.absolute_pattern(), MATCH_OPTIONS).map_err(|e| {
        pagesmith_config::ConfigError::InvalidPattern {
            pattern: group.pattern.clone(),
            message: e.to_string(),
        }
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| TaskError::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).at(path)
}

pub fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).at(path)
}

/// Write `contents`, creating parent directories as needed.
pub fn write(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).at(parent)?;
    }
    fs::write(path, contents).at(path)
}

/// Remove a directory tree. Returns whether anything was removed.
pub async fn remove_dir_if_exists(path: &Path) -> Result<bool> {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(TaskError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// URL path of `file` below `root`, with a leading slash.
pub fn url_path(root: &Path, file: &Path) -> String {
    let relative = file.strip_prefix(root).unwrap_or(file);
    let joined = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    format!("/{joined}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_enumerate_matches_pattern_only() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write(&src.join("assets/styles/main.scss"), "a{}").unwrap();
        write(&src.join("assets/styles/print.scss"), "a{}").unwrap();
        write(&src.join("assets/styles/nested/deep.scss"), "a{}").unwrap();
        write(&src.join("assets/styles/notes.txt"), "").unwrap();

        let group = FileGroup::new("assets/styles/*.scss", &src, temp.path().join("temp"));
        let files = enumerate(&group).unwrap();

        assert_eq!(
            files,
            vec![
                src.join("assets/styles/main.scss"),
                src.join("assets/styles/print.scss"),
            ]
        );
    }

    #[test]
    fn test_enumerate_recursive_pattern_skips_directories() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        write(&src.join("assets/images/logo.png"), [0u8]).unwrap();
        write(&src.join("assets/images/icons/menu.svg"), "<svg/>").unwrap();

        let group = FileGroup::new("assets/images/**", &src, temp.path().join("dist"));
        let files = enumerate(&group).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.is_file()));
    }

    #[test]
    fn test_enumerate_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        let group = FileGroup::new("*.html", temp.path().join("nope"), temp.path());
        assert!(enumerate(&group).unwrap().is_empty());
    }

    #[test]
    fn test_enumerate_invalid_pattern() {
        let temp = TempDir::new().unwrap();
        let group = FileGroup::new("[", temp.path(), temp.path());
        assert!(matches!(enumerate(&group), Err(TaskError::Config(_))));
    }

    #[tokio::test]
    async fn test_remove_dir_if_exists() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dist");
        write(&dir.join("index.html"), "x").unwrap();

        assert!(remove_dir_if_exists(&dir).await.unwrap());
        assert!(!dir.exists());
        assert!(!remove_dir_if_exists(&dir).await.unwrap());
    }

    #[test]
    fn test_url_path() {
        assert_eq!(
            url_path(Path::new("/p/temp"), Path::new("/p/temp/assets/styles/main.css")),
            "/assets/styles/main.css"
        );
    }
}
