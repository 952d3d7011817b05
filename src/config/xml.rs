//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Writes a commented template on request (`fsx --init-config`).
//!
//! Notes:
//! - Unknown XML fields are rejected so typos surface instead of being ignored.
//! - Empty elements mean "use the default".

use anyhow::{Context, Result, anyhow, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel, parse_octal_mode};
use crate::directory::{DirectoryNode, SizeMode};
use crate::platform;

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    log_level: Option<String>,
    log_file: Option<String>,
    json_logs: Option<String>,
    dir_mode: Option<String>,
    size_mode: Option<String>,
    overwrite: Option<String>,
}

/// Trimmed, non-empty text of an optional element.
fn text(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_bool(field: &str, s: &str) -> Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => bail!("invalid boolean for <{field}>: '{s}'"),
    }
}

// Map XmlConfig -> Config on top of the defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(s) = text(&parsed.log_level) {
        cfg.log_level = s.parse::<LogLevel>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = text(&parsed.log_file) {
        cfg.log_file = Some(PathBuf::from(s));
    }
    if let Some(s) = text(&parsed.json_logs) {
        cfg.json_logs = parse_bool("json_logs", s)?;
    }
    if let Some(s) = text(&parsed.dir_mode) {
        cfg.dir_mode = parse_octal_mode(s).map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = text(&parsed.size_mode) {
        cfg.size_mode = s.parse::<SizeMode>().map_err(|e| anyhow!(e))?;
    }
    if let Some(s) = text(&parsed.overwrite) {
        cfg.overwrite = parse_bool("overwrite", s)?;
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in config xml '{}'", path.display()))
}

/// Load the effective config.
///
/// An explicit path (from `--config`) must exist. Otherwise the default path
/// (`$FSX_CONFIG` or the per-user location) is used when present, and built-in
/// defaults when not. Returns the file actually read, if any.
pub fn load_config(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    if let Some(p) = explicit {
        let cfg = load_config_from_xml_path(p)?;
        return Ok((cfg, Some(p.to_path_buf())));
    }
    match default_config_path() {
        Some(p) if p.is_file() => {
            let cfg = load_config_from_xml_path(&p)?;
            Ok((cfg, Some(p)))
        }
        Some(p) => {
            debug!(path = %p.display(), "no config file; using defaults");
            Ok((Config::default(), None))
        }
        None => Ok((Config::default(), None)),
    }
}

const TEMPLATE: &str = r#"<!--
  fsx configuration (XML)

    log_level   -> quiet | normal | info | debug
    log_file    -> path to a log file (optional; stderr logging always stays on)
    json_logs   -> true/false, structured JSON log lines
    dir_mode    -> octal mode for directories created by `fsx mkdir`
    size_mode   -> entries (count directory entries too) | files (file bytes only)
    overwrite   -> true/false, whether cp/mv replace existing destination files

  CLI flags override these values.
-->
<config>
  <log_level>normal</log_level>
  <log_file></log_file>
  <json_logs>false</json_logs>
  <dir_mode>755</dir_mode>
  <size_mode>entries</size_mode>
  <overwrite>true</overwrite>
</config>
"#;

/// Write the commented template to `path` (dir 0700, file 0600). Fails if the file exists.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    let parent = crate::path::dir_name(&crate::path::resolve(path));
    DirectoryNode::with_create(&parent, 0o700)?;

    let mut file = platform::create_private_new(path)
        .with_context(|| format!("create config file '{}'", path.display()))?;
    file.write_all(TEMPLATE.as_bytes())
        .with_context(|| format!("write config file '{}'", path.display()))?;

    info!("Created template config at {}", path.display());
    Ok(())
}
