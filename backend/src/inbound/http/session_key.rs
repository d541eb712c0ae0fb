//! Session cookie key loading.
//!
//! Flash messages live in a private cookie, so the key decides whether a
//! restarted server can still read cookies it issued earlier.

use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use tracing::warn;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;

/// Build mode for session key validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds fall back to an ephemeral key.
    Debug,
    /// Release builds require a readable key unless explicitly allowed.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while loading the session key.
#[derive(thiserror::Error, Debug)]
pub enum SessionKeyError {
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        /// Key file location.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The session key file is too short to derive a key from.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        /// Key file location.
        path: PathBuf,
        /// Bytes read.
        length: usize,
        /// Bytes required.
        min_len: usize,
    },
}

/// Derive the session key from `path`, or the default secrets path when
/// `None`.
///
/// An unreadable file yields a random key in debug builds or when
/// `allow_ephemeral` is set; cookies then stop decrypting after a restart.
///
/// # Errors
/// [`SessionKeyError::KeyTooShort`] for short key files and
/// [`SessionKeyError::KeyRead`] when no fallback is permitted.
pub fn load_session_key(
    path: Option<&Path>,
    allow_ephemeral: bool,
    mode: BuildMode,
) -> Result<Key, SessionKeyError> {
    let path = path.map_or_else(|| PathBuf::from(SESSION_KEY_DEFAULT_PATH), Path::to_path_buf);

    match std::fs::read(&path) {
        Ok(bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                return Err(SessionKeyError::KeyTooShort {
                    path,
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            Ok(Key::derive_from(&bytes))
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(SessionKeyError::KeyRead {
                    path,
                    source: error,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn temp() -> TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    #[rstest]
    fn key_file_derives_a_stable_key(temp: TempDir) {
        let path = temp.path().join("session_key");
        std::fs::write(&path, vec![b'k'; SESSION_KEY_MIN_LEN]).expect("write key");

        let first = load_session_key(Some(&path), false, BuildMode::Release).expect("key");
        let second = load_session_key(Some(&path), false, BuildMode::Release).expect("key");

        assert_eq!(first.master(), second.master());
    }

    #[rstest]
    fn short_key_files_are_rejected(temp: TempDir) {
        let path = temp.path().join("session_key");
        std::fs::write(&path, b"short").expect("write key");

        let result = load_session_key(Some(&path), true, BuildMode::Debug);

        assert!(matches!(
            result,
            Err(SessionKeyError::KeyTooShort { length: 5, .. })
        ));
    }

    #[rstest]
    #[case(BuildMode::Debug, false, true)]
    #[case(BuildMode::Release, true, true)]
    #[case(BuildMode::Release, false, false)]
    fn missing_key_file_falls_back_when_permitted(
        temp: TempDir,
        #[case] mode: BuildMode,
        #[case] allow_ephemeral: bool,
        #[case] succeeds: bool,
    ) {
        let path = temp.path().join("absent");

        let result = load_session_key(Some(&path), allow_ephemeral, mode);

        assert_eq!(result.is_ok(), succeeds);
        if !succeeds {
            assert!(matches!(result, Err(SessionKeyError::KeyRead { .. })));
        }
    }
}
