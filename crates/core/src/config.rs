//! Configuration loading and validation
//!
//! All settings come from environment variables (a `.env` file may be
//! loaded by the binary before this runs). The five Azure values are
//! required and validated together, so a single error reports every
//! missing variable; no store call is attempted until validation passes.

use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Default root directory for reports and downloads
pub const DEFAULT_OUTPUT_DIR: &str = "container_contents";

/// Immutable configuration for one mirroring run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Azure AD tenant id
    pub tenant_id: String,

    /// Service-principal client id
    pub client_id: String,

    /// Service-principal client secret
    pub client_secret: String,

    /// Storage account name
    pub account_name: String,

    /// Blob container name
    pub container_name: String,

    /// Local root for reports and downloaded trees
    pub output_dir: PathBuf,
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup
    ///
    /// An unset variable and an empty one are both treated as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut missing = Vec::new();
        let mut require = |name: &'static str| -> String {
            match lookup(name) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let tenant_id = require("AZURE_TENANT_ID");
        let client_id = require("AZURE_CLIENT_ID");
        let client_secret = require("AZURE_CLIENT_SECRET");
        let account_name = require("AZURE_STORAGE_ACCOUNT_NAME");
        let container_name = require("AZURE_STORAGE_CONTAINER_NAME");

        if !missing.is_empty() {
            return Err(Error::Config(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let output_dir = lookup("BLOBMIRROR_OUTPUT_DIR")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        Ok(Self {
            tenant_id,
            client_id,
            client_secret,
            account_name,
            container_name,
            output_dir,
        })
    }
}
