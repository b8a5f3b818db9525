//! XML configuration support.
//! Parses a small `<config>` file:
//! <config>
//!   <log_level>info</log_level>
//!   <log_file>/path/to/atomic_fs.log</log_file>
//!   <dir_mode>0755</dir_mode>
//!   <durability>full</durability>
//!   <preserve_times>false</preserve_times>
//! </config>
//!
//! Notes:
//! - Unknown elements and invalid values are hard errors, to surface misconfigurations early.
//! - A missing file at the default location simply means defaults.

use anyhow::{anyhow, bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::{default_config_path, CONFIG_ENV};
use super::types::{parse_mode, Config, LogLevel};
use crate::fs_ops::Durability;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    dir_mode: Option<String>,
    durability: Option<String>,
    preserve_times: Option<String>,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Map XmlConfig -> Config, starting from defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    cfg.log_file = non_empty(parsed.log_file.as_deref()).map(PathBuf::from);
    if let Some(s) = non_empty(parsed.dir_mode.as_deref()) {
        cfg.dir_mode = parse_mode(s).ok_or_else(|| anyhow!("invalid dir_mode: '{s}'"))?;
    }
    if let Some(s) = non_empty(parsed.durability.as_deref()) {
        cfg.durability = s.parse::<Durability>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = non_empty(parsed.preserve_times.as_deref()) {
        cfg.preserve_times =
            parse_bool(s).ok_or_else(|| anyhow!("invalid preserve_times: '{s}'"))?;
    }
    Ok(cfg)
}

/// Parse config XML text.
pub fn parse_config_xml(contents: &str) -> Result<Config> {
    let parsed: XmlConfig = from_xml_str(contents).context("parse config xml")?;
    xml_to_config(parsed)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    parse_config_xml(&contents).with_context(|| format!("config file '{}'", path.display()))
}

/// Load the effective config and report which file (if any) it came from.
///
/// - `$ATOMIC_FS_CONFIG` set: that file must exist and parse.
/// - Otherwise the default location is used when present; absent means defaults.
pub fn load_config() -> Result<(Config, Option<PathBuf>)> {
    let explicit = env::var_os(CONFIG_ENV).is_some_and(|p| !p.is_empty());
    let Some(path) = default_config_path() else {
        debug!("no config directory available; using defaults");
        return Ok((Config::default(), None));
    };

    if !path.exists() {
        if explicit {
            bail!("{CONFIG_ENV} points to a missing file: {}", path.display());
        }
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok((Config::default(), None));
    }

    let cfg = load_config_from_xml_path(&path)?;
    debug!(path = %path.display(), "loaded config");
    Ok((cfg, Some(path)))
}
