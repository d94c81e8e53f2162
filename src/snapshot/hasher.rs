//! Content digests for regular files

use crate::error::SnapshotError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use std::str::FromStr;

/// Length of a hex-encoded 256-bit digest
pub const DIGEST_HEX_LEN: usize = 64;

/// Hash function used for file content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl DigestAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Blake3 => "blake3",
        }
    }

    /// Hash an in-memory buffer and return the lowercase hex digest
    pub fn digest_bytes(&self, content: &[u8]) -> String {
        match self {
            DigestAlgorithm::Sha256 => hex::encode(Sha256::digest(content)),
            DigestAlgorithm::Blake3 => blake3::hash(content).to_hex().to_string(),
        }
    }

    /// Stream a reader through a fresh hasher
    pub fn digest_reader<R: Read>(&self, reader: &mut R) -> io::Result<String> {
        match self {
            DigestAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                io::copy(reader, &mut hasher)?;
                Ok(hex::encode(hasher.finalize()))
            }
            DigestAlgorithm::Blake3 => {
                let mut hasher = blake3::Hasher::new();
                io::copy(reader, &mut hasher)?;
                hasher.flush()?;
                Ok(hasher.finalize().to_hex().to_string())
            }
        }
    }

    /// Hash the full content of the file at `path`
    ///
    /// The file handle is dropped on every exit path, including read errors.
    pub fn digest_file(&self, path: &Path) -> Result<String, SnapshotError> {
        let mut file = File::open(path).map_err(|source| SnapshotError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.digest_reader(&mut file)
            .map_err(|source| SnapshotError::Read {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            "blake3" => Ok(DigestAlgorithm::Blake3),
            other => Err(format!(
                "Unknown digest algorithm: {} (must be 'sha256' or 'blake3')",
                other
            )),
        }
    }
}

/// Check that a string looks like a digest this crate produced
pub fn is_valid_digest(digest: &str) -> bool {
    digest.len() == DIGEST_HEX_LEN
        && digest
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
