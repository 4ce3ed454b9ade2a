//! Configuration loading.

use gantry_core::GatewayConfig;
use std::path::Path;
use std::{env, fs};

/// Load the gateway configuration.
///
/// An explicitly given path must exist; otherwise `gantry.toml` in the
/// working directory is used when present, and built-in defaults when not.
/// `GANTRY_AUTH_SECRET` overrides the configured token secret.
pub fn load(path: Option<&Path>) -> anyhow::Result<GatewayConfig> {
    let mut config = match path {
        Some(p) => parse(p)?,
        None => {
            let default = Path::new("gantry.toml");
            if default.exists() {
                parse(default)?
            } else {
                GatewayConfig::default()
            }
        }
    };

    if let Ok(secret) = env::var("GANTRY_AUTH_SECRET") {
        if !secret.is_empty() {
            config.auth.secret = secret;
        }
    }

    Ok(config)
}

fn parse(path: &Path) -> anyhow::Result<GatewayConfig> {
    let raw = fs::read_to_string(path)?;
    let config = toml::from_str(&raw)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_path_is_parsed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nbind = \"127.0.0.1:9999\"\n[auth]\nsecret = \"s3cret\""
        )
        .unwrap();

        let config = load(Some(file.path())).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:9999");
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        assert!(load(Some(Path::new("/nonexistent/gantry.toml"))).is_err());
    }
}
