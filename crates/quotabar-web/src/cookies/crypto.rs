//! Decryption of Chromium `encrypted_value` blobs on Linux.
//!
//! `v10` values use AES-128-CBC with a key derived from the fixed
//! password `peanuts`. `v11` values use a key held in the desktop keyring,
//! which is not read.

use aes::Aes128;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};
use sha1::Sha1;
use sha2::{Digest, Sha256};

type Aes128CbcDec = cbc::Decryptor<Aes128>;

const PASSWORD: &[u8] = b"peanuts";
const SALT: &[u8] = b"saltysalt";
const ITERATIONS: u32 = 1;
const IV: [u8; 16] = [b' '; 16];
const PREFIX_LEN: usize = 3;

/// Why a blob could not be turned into a cookie value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecryptError {
    /// `v11` and later need the keyring.
    Keyring,
    /// Unknown prefix, bad padding or non-UTF-8 plaintext.
    Malformed,
}

pub(super) fn v10_key() -> [u8; 16] {
    let mut key = [0u8; 16];
    pbkdf2::pbkdf2_hmac::<Sha1>(PASSWORD, SALT, ITERATIONS, &mut key);
    key
}

/// Decrypts one blob read from the row whose `host_key` is `host`.
///
/// Newer stores prepend `SHA-256(host_key)` to the plaintext; it is
/// stripped when present.
pub fn decrypt(host: &str, blob: &[u8]) -> Result<String, DecryptError> {
    if blob.len() < PREFIX_LEN {
        return Err(DecryptError::Malformed);
    }
    let (version, data) = blob.split_at(PREFIX_LEN);
    match version {
        b"v10" => {}
        b"v11" => return Err(DecryptError::Keyring),
        _ => return Err(DecryptError::Malformed),
    }

    let plain = Aes128CbcDec::new(&v10_key().into(), &IV.into())
        .decrypt_padded_vec_mut::<Pkcs7>(data)
        .map_err(|_| DecryptError::Malformed)?;

    let digest = Sha256::digest(host.as_bytes());
    let value = plain.strip_prefix(digest.as_slice()).unwrap_or(&plain);
    String::from_utf8(value.to_vec()).map_err(|_| DecryptError::Malformed)
}

#[cfg(test)]
pub(super) fn encrypt_v10(host: Option<&str>, value: &str) -> Vec<u8> {
    use cbc::cipher::BlockEncryptMut;

    let mut plain = Vec::new();
    if let Some(host) = host {
        plain.extend_from_slice(&Sha256::digest(host.as_bytes()));
    }
    plain.extend_from_slice(value.as_bytes());
    let cipher = cbc::Encryptor::<Aes128>::new(&v10_key().into(), &IV.into())
        .encrypt_padded_vec_mut::<Pkcs7>(&plain);

    let mut blob = b"v10".to_vec();
    blob.extend_from_slice(&cipher);
    blob
}
