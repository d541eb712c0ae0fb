//! Server configuration loaded via OrthoConfig.
//!
//! Values come from `CONTACTS_*` environment variables, an optional
//! configuration file and command-line flags, in increasing precedence.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::{DEFAULT_DATA_DIR, DEFAULT_DATA_FILE};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

/// Configuration values for the contact book server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONTACTS")]
pub struct ContactBookSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Directory holding the contact store file.
    pub data_dir: Option<PathBuf>,
    /// Store file name inside `data_dir`.
    pub data_file: Option<String>,
    /// File whose bytes derive the session cookie key.
    pub session_key_file: Option<PathBuf>,
    /// Fall back to a random session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = false)]
    pub cookie_secure: bool,
}

impl ContactBookSettings {
    /// Return the configured host, falling back to all interfaces.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Return the configured port, falling back to 3000.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Socket address built from [`Self::host`] and [`Self::port`].
    ///
    /// # Errors
    /// Returns an error when the host is not an IP address.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        let ip = self.host().parse()?;
        Ok(SocketAddr::new(ip, self.port()))
    }

    /// Return the configured data directory, falling back to `data`.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DATA_DIR))
    }

    /// Return the configured store file name, falling back to `contacts.json`.
    #[must_use]
    pub fn data_file(&self) -> &str {
        self.data_file.as_deref().unwrap_or(DEFAULT_DATA_FILE)
    }
}
