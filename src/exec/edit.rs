// src/exec/edit.rs

//! In-place edits of local files.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::errors::Result;

/// Append `lines` to the file at `path`, one per line.
///
/// A missing final newline is added first so the existing last line is not
/// joined with the first new one. The file must already exist.
pub fn append_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut contents = fs::read_to_string(path)
        .with_context(|| format!("reading {:?}", path))?;

    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    for line in lines {
        contents.push_str(line);
        contents.push('\n');
    }

    fs::write(path, contents).with_context(|| format!("writing {:?}", path))?;
    Ok(())
}

/// Create the file at `path` with `contents` unless it already exists.
///
/// Returns whether the file was written.
pub fn seed_if_missing(path: &Path, contents: &str) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    debug!(path = ?path, "seeding missing file");
    fs::write(path, contents).with_context(|| format!("writing {:?}", path))?;
    Ok(true)
}

/// Replace every occurrence of `token` in the file at `path` with `value`.
///
/// A file without the token is left unchanged; a missing file is an error.
pub fn replace_token(path: &Path, token: &str, value: &str) -> Result<()> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading {:?}", path))?;

    if !contents.contains(token) {
        return Ok(());
    }

    fs::write(path, contents.replace(token, value))
        .with_context(|| format!("writing {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn append_adds_missing_newline_first() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f");
        fs::write(&path, "a\nb").unwrap();

        append_lines(&path, &lines(&["c"])).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\nc\n");
    }

    #[test]
    fn append_to_missing_file_fails() {
        let dir = tempdir().unwrap();
        let err = append_lines(&dir.path().join("nope"), &lines(&["c"])).unwrap_err();
        assert!(format!("{err:#}").contains("nope"));
    }

    #[test]
    fn replace_all_occurrences() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Fabfile.toml");
        fs::write(&path, "a = \"<% x %>\"\nb = \"<% x %>/static\"\n").unwrap();

        replace_token(&path, "<% x %>", "blog").unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "a = \"blog\"\nb = \"blog/static\"\n"
        );
    }

    #[test]
    fn replace_without_token_leaves_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Fabfile.toml");
        fs::write(&path, "name = \"blog\"\n").unwrap();

        replace_token(&path, "<% x %>", "other").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "name = \"blog\"\n");
    }

    #[test]
    fn seed_only_writes_missing_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Fabfile.toml");

        assert!(seed_if_missing(&path, "first\n").unwrap());
        assert!(!seed_if_missing(&path, "second\n").unwrap());

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\n");
    }
}
