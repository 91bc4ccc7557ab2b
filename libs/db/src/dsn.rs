//! Connection-string helpers.
//!
//! Deployment platforms hand out DSNs written for other drivers
//! (`postgresql+psycopg://...`, `sqlite+pysqlite://...`). Everything here
//! rewrites them into the form sqlx understands without touching the
//! credentials, host, path or query parts.

use std::path::{Path, PathBuf};

use crate::{DbError, Result};

/// Rewrite a driver-qualified or legacy scheme prefix into the scheme sqlx expects.
///
/// - `postgresql://`, `postgresql+<driver>://`, `postgres+<driver>://` → `postgres://`
/// - `sqlite+<driver>://` → `sqlite://`
///
/// Anything else is returned trimmed but otherwise unchanged.
pub fn normalize_scheme(dsn: &str) -> String {
    let s = dsn.trim();
    let Some((scheme, rest)) = s.split_once("://") else {
        return s.to_string();
    };

    let lower = scheme.to_ascii_lowercase();
    let base = lower.split('+').next().unwrap_or(&lower);
    match base {
        "postgres" | "postgresql" => format!("postgres://{rest}"),
        "sqlite" | "sqlite3" => format!("sqlite://{rest}"),
        _ => s.to_string(),
    }
}

/// Check if the DSN represents an in-memory SQLite database.
pub fn is_memory_dsn(dsn: &str) -> bool {
    let lower = dsn.to_ascii_lowercase();
    if lower.starts_with("sqlite::memory:") || lower.starts_with("sqlite://:memory:") {
        return true;
    }

    if let Ok(url) = url::Url::parse(dsn) {
        return url
            .query_pairs()
            .any(|(k, v)| k.eq_ignore_ascii_case("mode") && v.eq_ignore_ascii_case("memory"));
    }

    false
}

/// Expand a configured sqlite URL into an absolute-path DSN using a base directory.
///
/// Configured URLs follow the `sqlite:///<path>` convention of the deployment
/// platforms: the slash after the empty host only separates, so
/// `sqlite:///clientes.db` is relative and `sqlite:////var/db/clientes.db`
/// is absolute. `sqlite://clientes.db` is relative as well.
///
/// - Keeps in-memory DSNs as `sqlite::memory:`.
/// - Normalizes backslashes into forward slashes.
/// - Creates the parent directory when `create_dirs` is set.
///
/// The result is in sqlx form (`sqlite:///abs/path`), ready for
/// [`crate::DbHandle::connect`]; don't feed it back into this function.
pub fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if is_memory_dsn(dsn) {
        return Ok(if dsn.eq_ignore_ascii_case("sqlite://:memory:") {
            "sqlite::memory:".to_string()
        } else {
            dsn.to_string()
        });
    }

    let db_path = match dsn.strip_prefix("sqlite://") {
        Some(rest) => rest.strip_prefix('/').unwrap_or(rest),
        None => dsn
            .strip_prefix("sqlite:")
            .ok_or_else(|| DbError::InvalidDsn(format!("expected a sqlite DSN, got '{dsn}'")))?,
    };

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(DbError::InvalidDsn("empty SQLite path".to_string()));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if create_dirs {
        if let Some(dir) = p.parent() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Mask the password part of a DSN so it can be logged.
pub fn redact_credentials_in_dsn(dsn: &str) -> String {
    if !dsn.contains('@') {
        return dsn.to_string();
    }
    match url::Url::parse(dsn) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_normalize_driver_qualified_postgres() {
        assert_eq!(
            normalize_scheme("postgresql+psycopg://u:p@db:5432/app"),
            "postgres://u:p@db:5432/app"
        );
        assert_eq!(
            normalize_scheme("postgres+asyncpg://u@db/app?sslmode=require"),
            "postgres://u@db/app?sslmode=require"
        );
        assert_eq!(
            normalize_scheme("postgresql://u:p@db/app"),
            "postgres://u:p@db/app"
        );
        assert_eq!(
            normalize_scheme("postgres://u:p@db/app"),
            "postgres://u:p@db/app"
        );
    }

    #[test]
    fn test_normalize_sqlite_and_unknown() {
        assert_eq!(
            normalize_scheme("sqlite+pysqlite://data/clientes.db"),
            "sqlite://data/clientes.db"
        );
        assert_eq!(normalize_scheme("  sqlite::memory:\n"), "sqlite::memory:");
        assert_eq!(normalize_scheme("SQLITE://x.db"), "sqlite://x.db");
        assert_eq!(normalize_scheme("mysql://u@h/db"), "mysql://u@h/db");
    }

    #[test]
    fn test_is_memory_dsn() {
        assert!(is_memory_dsn("sqlite::memory:"));
        assert!(is_memory_dsn("sqlite://:memory:"));
        assert!(is_memory_dsn("sqlite:file:memdb?mode=memory&cache=shared"));
        assert!(!is_memory_dsn("sqlite://clientes.db"));
    }

    #[test]
    fn test_absolutize_relative_path() {
        let tmp = tempdir().unwrap();
        let out = absolutize_sqlite_dsn("sqlite://data/clientes.db?mode=rwc", tmp.path(), true)
            .unwrap();
        let expected_dir = tmp.path().join("data");
        assert!(expected_dir.exists(), "parent dir must be created");
        assert!(out.starts_with("sqlite://"));
        assert!(out.ends_with("data/clientes.db?mode=rwc"));
        assert!(out.contains(&tmp.path().to_string_lossy().replace('\\', "/")));
    }

    #[test]
    fn test_absolutize_three_slashes_is_relative() {
        let tmp = tempdir().unwrap();
        let base = tmp.path().to_string_lossy().replace('\\', "/");

        let out = absolutize_sqlite_dsn("sqlite:///clientes.db", tmp.path(), false).unwrap();
        assert_eq!(out, format!("sqlite://{base}/clientes.db"));

        let out = absolutize_sqlite_dsn(
            &normalize_scheme("sqlite+pysqlite:///data/clientes.db"),
            tmp.path(),
            true,
        )
        .unwrap();
        assert_eq!(out, format!("sqlite://{base}/data/clientes.db"));
        assert!(tmp.path().join("data").is_dir());

        assert!(absolutize_sqlite_dsn("sqlite:///", tmp.path(), false).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_absolutize_keeps_absolute_and_memory() {
        let tmp = tempdir().unwrap();
        let abs = tmp.path().join("abs.db").to_string_lossy().to_string();
        assert_eq!(
            absolutize_sqlite_dsn(&format!("sqlite:///{abs}"), Path::new("/elsewhere"), false)
                .unwrap(),
            format!("sqlite://{abs}")
        );
        assert_eq!(
            absolutize_sqlite_dsn("sqlite://:memory:", tmp.path(), false).unwrap(),
            "sqlite::memory:"
        );
    }

    #[test]
    fn test_absolutize_rejects_empty_and_foreign() {
        let tmp = tempdir().unwrap();
        assert!(absolutize_sqlite_dsn("sqlite://", tmp.path(), false).is_err());
        assert!(absolutize_sqlite_dsn("postgres://h/db", tmp.path(), false).is_err());
    }

    #[test]
    fn test_redact_credentials() {
        assert_eq!(
            redact_credentials_in_dsn("postgres://user:secret@db:5432/app"),
            "postgres://user:***@db:5432/app"
        );
        assert_eq!(
            redact_credentials_in_dsn("sqlite://clientes.db"),
            "sqlite://clientes.db"
        );
    }
}
