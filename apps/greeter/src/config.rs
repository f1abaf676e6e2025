//! Environment-driven server settings, loaded once at startup.

use std::env;
use std::path::PathBuf;

use core_config::{env_or_default, ConfigError, FromEnv};

/// Default directory holding `tls.crt`, `tls.key` and `ca.crt`.
pub const DEFAULT_CERT_DIR: &str = "/etc/tls";

/// Port the server listens on. Fixed, not configurable.
pub const GRPC_PORT: u16 = 9091;

/// Settings derived from the environment; immutable after load.
#[derive(Clone, Debug)]
pub struct ServerSettings {
    /// Whether to terminate mutual TLS. Plaintext otherwise.
    pub tls_enabled: bool,
    /// Directory containing the PEM certificate material.
    pub cert_dir: PathBuf,
}

impl FromEnv for ServerSettings {
    /// Reads:
    /// - `SERVER_TLS_ENABLED`: mTLS is enabled only for the exact value
    ///   `"true"`; absence or anything else leaves TLS off.
    /// - `TLS_CERT_PATH`: certificate directory; unset or empty falls back
    ///   to `/etc/tls`.
    fn from_env() -> Result<Self, ConfigError> {
        let tls_enabled = env::var("SERVER_TLS_ENABLED")
            .map(|v| v == "true")
            .unwrap_or(false);

        let cert_dir = env_or_default("TLS_CERT_PATH", DEFAULT_CERT_DIR);
        let cert_dir = if cert_dir.is_empty() {
            DEFAULT_CERT_DIR.to_string()
        } else {
            cert_dir
        };

        Ok(Self {
            tls_enabled,
            cert_dir: PathBuf::from(cert_dir),
        })
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            tls_enabled: false,
            cert_dir: PathBuf::from(DEFAULT_CERT_DIR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_to_plaintext() {
        temp_env::with_vars(
            [
                ("SERVER_TLS_ENABLED", None::<&str>),
                ("TLS_CERT_PATH", None::<&str>),
            ],
            || {
                let settings = ServerSettings::from_env().unwrap();
                assert!(!settings.tls_enabled);
                assert_eq!(settings.cert_dir, PathBuf::from("/etc/tls"));
            },
        );
    }

    #[test]
    fn tls_enabled_only_for_exact_true() {
        for value in ["TRUE", "True", "1", "yes", "false", ""] {
            temp_env::with_var("SERVER_TLS_ENABLED", Some(value), || {
                let settings = ServerSettings::from_env().unwrap();
                assert!(!settings.tls_enabled, "value {:?} must not enable TLS", value);
            });
        }

        temp_env::with_var("SERVER_TLS_ENABLED", Some("true"), || {
            let settings = ServerSettings::from_env().unwrap();
            assert!(settings.tls_enabled);
        });
    }

    #[test]
    fn cert_path_override() {
        temp_env::with_var("TLS_CERT_PATH", Some("/var/run/certs"), || {
            let settings = ServerSettings::from_env().unwrap();
            assert_eq!(settings.cert_dir, PathBuf::from("/var/run/certs"));
        });
    }

    #[test]
    fn empty_cert_path_falls_back_to_default() {
        temp_env::with_var("TLS_CERT_PATH", Some(""), || {
            let settings = ServerSettings::from_env().unwrap();
            assert_eq!(settings.cert_dir, PathBuf::from("/etc/tls"));
        });
    }

    #[test]
    fn default_matches_env_defaults() {
        let settings = ServerSettings::default();
        assert!(!settings.tls_enabled);
        assert_eq!(settings.cert_dir, PathBuf::from(DEFAULT_CERT_DIR));
    }
}
