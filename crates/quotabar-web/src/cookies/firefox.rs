use std::fs;
use std::path::{Path, PathBuf};

use super::{CookieSource, Cookies, sqlite};

const QUERY: &str = "SELECT name, value FROM moz_cookies \
                     WHERE host = ?1 OR host = ?2 OR host LIKE ?3";

/// Firefox profiles under one root. The profile whose cookie store was
/// written most recently is used.
#[derive(Debug, Clone)]
pub struct FirefoxSource {
    root: Option<PathBuf>,
}

impl FirefoxSource {
    /// `~/.mozilla/firefox`
    pub fn default_root() -> Self {
        Self {
            root: dirs::home_dir().map(|h| h.join(".mozilla").join("firefox")),
        }
    }

    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

impl CookieSource for FirefoxSource {
    fn load(&self, domain: &str) -> Result<Cookies, String> {
        let root = self
            .root
            .as_ref()
            .ok_or("could not determine home directory")?;
        let db = newest_store(root)?;
        let rows = sqlite::query_copy(&db, QUERY, domain, |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        Ok(rows.into_iter().collect())
    }
}

fn newest_store(root: &Path) -> Result<PathBuf, String> {
    let entries =
        fs::read_dir(root).map_err(|e| format!("cannot read {}: {e}", root.display()))?;

    entries
        .filter_map(Result::ok)
        .map(|entry| entry.path().join("cookies.sqlite"))
        .filter_map(|db| {
            let modified = fs::metadata(&db).and_then(|m| m.modified()).ok()?;
            Some((modified, db))
        })
        .max_by_key(|(modified, _)| *modified)
        .map(|(_, db)| db)
        .ok_or_else(|| format!("no profile with cookies.sqlite under {}", root.display()))
}
