//! Read-only access to a browser's SQLite cookie store.
//!
//! Browsers keep the database locked while running, so the file (and
//! its write-ahead log, if any) is copied to a temporary directory and
//! queried there.

use std::fs;
use std::path::Path;

use rusqlite::{Connection, Row, params};

/// Host patterns matching `domain`, `.domain` and any subdomain.
pub(super) fn host_params(domain: &str) -> [String; 3] {
    [
        domain.to_string(),
        format!(".{domain}"),
        format!("%.{domain}"),
    ]
}

/// Copies `db` aside and runs `sql` with the three host parameters,
/// mapping each row through `map`.
pub(super) fn query_copy<T>(
    db: &Path,
    sql: &str,
    domain: &str,
    map: impl FnMut(&Row<'_>) -> rusqlite::Result<T>,
) -> Result<Vec<T>, String> {
    let dir = tempfile::tempdir().map_err(|e| format!("cannot create temp dir: {e}"))?;
    let copy = dir.path().join("cookies.sqlite");
    fs::copy(db, &copy).map_err(|e| format!("cannot copy {}: {e}", db.display()))?;
    for suffix in ["-wal", "-shm"] {
        let sidecar = db.with_file_name(format!(
            "{}{suffix}",
            db.file_name().and_then(|n| n.to_str()).unwrap_or_default()
        ));
        if sidecar.exists() {
            let _ = fs::copy(&sidecar, dir.path().join(format!("cookies.sqlite{suffix}")));
        }
    }

    let conn = Connection::open(&copy).map_err(|e| format!("cannot open cookie store: {e}"))?;
    let [exact, dotted, sub] = host_params(domain);
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| format!("unexpected cookie store schema: {e}"))?;
    let rows = stmt
        .query_map(params![exact, dotted, sub], map)
        .map_err(|e| format!("cannot query cookie store: {e}"))?;
    rows.collect::<rusqlite::Result<Vec<T>>>()
        .map_err(|e| format!("cannot read cookie row: {e}"))
}
