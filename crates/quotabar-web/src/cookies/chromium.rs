//! Chrome, Chromium, Brave and Edge profiles.

use std::path::PathBuf;

use super::crypto::{self, DecryptError};
use super::{CookieSource, Cookies, sqlite};

const QUERY: &str = "SELECT host_key, name, value, encrypted_value FROM cookies \
                     WHERE host_key = ?1 OR host_key = ?2 OR host_key LIKE ?3";

/// Cookie databases relative to the browser's config directory, newest
/// layout first.
const DB_CANDIDATES: [&str; 2] = ["Default/Network/Cookies", "Default/Cookies"];

/// A Chromium-family cookie store.
///
/// Plaintext values are used as-is and `v10` values are decrypted.
/// Keyring-encrypted (`v11`) values are skipped; a store holding only
/// those is an error.
#[derive(Debug, Clone)]
pub struct ChromiumSource {
    root: Option<PathBuf>,
}

impl ChromiumSource {
    /// A browser whose data lives in `~/.config/<dir>`.
    pub fn in_config_dir(dir: &str) -> Self {
        Self {
            root: dirs::config_dir().map(|c| c.join(dir)),
        }
    }

    /// A browser whose data lives in `root`.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

impl CookieSource for ChromiumSource {
    fn load(&self, domain: &str) -> Result<Cookies, String> {
        let root = self
            .root
            .as_ref()
            .ok_or("could not determine config directory")?;
        let db = DB_CANDIDATES
            .iter()
            .map(|rel| root.join(rel))
            .find(|p| p.is_file())
            .ok_or_else(|| format!("no cookie database under {}", root.display()))?;

        let rows = sqlite::query_copy(&db, QUERY, domain, |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                row.get::<_, Option<Vec<u8>>>(3)?.unwrap_or_default(),
            ))
        })?;

        let mut cookies = Cookies::new();
        let mut keyring = 0;
        let mut malformed = 0;
        for (host, name, value, encrypted) in rows {
            if !value.is_empty() {
                cookies.insert(name, value);
                continue;
            }
            if encrypted.is_empty() {
                continue;
            }
            match crypto::decrypt(&host, &encrypted) {
                Ok(plain) => {
                    cookies.insert(name, plain);
                }
                Err(DecryptError::Keyring) => keyring += 1,
                Err(DecryptError::Malformed) => malformed += 1,
            }
        }

        if cookies.is_empty() && keyring > 0 {
            return Err(format!(
                "{keyring} cookie(s) are encrypted with the system keyring (v11) and cannot be read; try --browser firefox"
            ));
        }
        if cookies.is_empty() && malformed > 0 {
            return Err(format!("{malformed} cookie(s) could not be decrypted"));
        }
        Ok(cookies)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use rusqlite::{Connection, params};

    use super::*;

    fn write_store(root: &Path, rows: &[(&str, &str, &str, Vec<u8>)]) {
        let dir = root.join("Default/Network");
        std::fs::create_dir_all(&dir).unwrap();
        let conn = Connection::open(dir.join("Cookies")).unwrap();
        conn.execute_batch(
            "CREATE TABLE cookies (host_key TEXT, name TEXT, value TEXT, encrypted_value BLOB);",
        )
        .unwrap();
        for (host, name, value, encrypted) in rows {
            conn.execute(
                "INSERT INTO cookies VALUES (?1, ?2, ?3, ?4)",
                params![host, name, value, encrypted],
            )
            .unwrap();
        }
    }

    #[test]
    fn reads_plaintext_cookies_for_domain_and_subdomains() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        write_store(
            dir.path(),
            &[
                (".claude.ai", "sessionKey", "sk-1", Vec::new()),
                ("claude.ai", "lastActiveOrg", "org-9", Vec::new()),
                ("api.claude.ai", "cf", "x", Vec::new()),
                ("notclaude.ai", "other", "nope", Vec::new()),
            ],
        );

        // Act
        let cookies = ChromiumSource::at(dir.path()).load("claude.ai").unwrap();

        // Assert
        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies["lastActiveOrg"], "org-9");
        assert!(!cookies.contains_key("other"));
    }

    #[test]
    fn v10_encrypted_rows_are_decrypted() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        write_store(
            dir.path(),
            &[
                (
                    ".chatgpt.com",
                    "__Secure-next-auth.session-token",
                    "",
                    crypto::encrypt_v10(None, "eyJhbGciOi"),
                ),
                (
                    "chatgpt.com",
                    "oai-did",
                    "",
                    crypto::encrypt_v10(Some("chatgpt.com"), "device-7"),
                ),
            ],
        );

        // Act
        let cookies = ChromiumSource::at(dir.path()).load("chatgpt.com").unwrap();

        // Assert
        assert_eq!(cookies["__Secure-next-auth.session-token"], "eyJhbGciOi");
        assert_eq!(cookies["oai-did"], "device-7");
    }

    #[test]
    fn keyring_only_store_is_an_error() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let mut blob = crypto::encrypt_v10(None, "secret");
        blob[..3].copy_from_slice(b"v11");
        write_store(
            dir.path(),
            &[(".chatgpt.com", "__Secure-next-auth.session-token", "", blob)],
        );

        // Act
        let err = ChromiumSource::at(dir.path()).load("chatgpt.com").unwrap_err();

        // Assert
        assert!(err.contains("keyring (v11)"), "{err}");
    }

    #[test]
    fn keyring_rows_are_skipped_when_others_decrypt() {
        let dir = tempfile::tempdir().unwrap();
        let mut locked = crypto::encrypt_v10(None, "secret");
        locked[..3].copy_from_slice(b"v11");
        write_store(
            dir.path(),
            &[
                (".claude.ai", "sessionKey", "", locked),
                (".claude.ai", "lastActiveOrg", "", crypto::encrypt_v10(None, "org-1")),
            ],
        );

        let cookies = ChromiumSource::at(dir.path()).load("claude.ai").unwrap();

        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies["lastActiveOrg"], "org-1");
    }

    #[test]
    fn missing_profile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = ChromiumSource::at(dir.path()).load("claude.ai").unwrap_err();

        assert!(err.starts_with("no cookie database"), "{err}");
    }

    #[test]
    fn store_without_matching_host_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_store(dir.path(), &[("example.com", "a", "b", Vec::new())]);

        let cookies = ChromiumSource::at(dir.path()).load("claude.ai").unwrap();

        assert!(cookies.is_empty());
    }
}
