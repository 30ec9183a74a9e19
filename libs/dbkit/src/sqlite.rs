//! SQLite DSN helpers.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::{DbError, Result};

pub(crate) const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// `sqlite::memory:`, `sqlite://:memory:` and `?mode=memory` DSNs.
pub fn is_memory_dsn(dsn: &str) -> bool {
    let lower = dsn.to_ascii_lowercase();
    lower.contains(":memory:") || lower.contains("mode=memory")
}

/// Path part of a file DSN, without the query string.
fn file_path_from_dsn(dsn: &str) -> Option<PathBuf> {
    if is_memory_dsn(dsn) {
        return None;
    }
    let tail = dsn
        .strip_prefix("sqlite://")
        .or_else(|| dsn.strip_prefix("sqlite:"))?;
    let path = tail.split_once('?').map_or(tail, |(p, _)| p);
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Create the parent directory of a file-backed DSN.
pub(crate) fn prepare_sqlite_path(dsn: &str) -> io::Result<()> {
    if let Some(parent) = file_path_from_dsn(dsn).as_deref().and_then(Path::parent) {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Rewrite a relative sqlite DSN into an absolute one anchored at `base_dir`.
///
/// In-memory DSNs are normalized to `sqlite::memory:`; backslashes become
/// forward slashes; the query string is preserved.
pub fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path) -> Result<String> {
    if is_memory_dsn(dsn) {
        return Ok("sqlite::memory:".to_string());
    }
    let tail = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| DbError::InvalidDsn(format!("expected sqlite:// prefix in '{dsn}'")))?;

    let (path_str, query) = match tail.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (tail, None),
    };
    if path_str.is_empty() {
        return Err(DbError::InvalidDsn("empty SQLite path".to_string()));
    }

    let mut p = PathBuf::from(path_str);
    if p.is_relative() {
        p = base_dir.join(p);
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn memory_dsns() {
        assert!(is_memory_dsn("sqlite::memory:"));
        assert!(is_memory_dsn("sqlite://:memory:"));
        assert!(is_memory_dsn("sqlite://file.db?mode=memory"));
        assert!(!is_memory_dsn("sqlite://data/app.db"));
    }

    #[test]
    fn file_path_strips_query() {
        assert_eq!(
            file_path_from_dsn("sqlite://data/app.db?cache=shared"),
            Some(PathBuf::from("data/app.db"))
        );
        assert_eq!(file_path_from_dsn("sqlite::memory:"), None);
    }

    #[test]
    fn prepare_creates_parent_dir() {
        let tmp = tempdir().unwrap();
        let db = tmp.path().join("a/b/app.db");
        let dsn = format!("sqlite://{}", db.to_string_lossy().replace('\\', "/"));

        prepare_sqlite_path(&dsn).unwrap();
        assert!(db.parent().unwrap().is_dir());
    }

    #[test]
    fn absolutize_anchors_relative_paths() {
        let base = Path::new("/srv/staffdir");
        let out = absolutize_sqlite_dsn("sqlite://database/app.db?mode=rwc", base).unwrap();
        assert_eq!(out, "sqlite:///srv/staffdir/database/app.db?mode=rwc");

        let mem = absolutize_sqlite_dsn("sqlite://:memory:", base).unwrap();
        assert_eq!(mem, "sqlite::memory:");
    }

    #[test]
    fn absolutize_rejects_bad_input() {
        let base = Path::new("/srv");
        assert!(absolutize_sqlite_dsn("postgres://h/db", base).is_err());
        assert!(absolutize_sqlite_dsn("sqlite://", base).is_err());
    }
}
