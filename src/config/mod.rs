use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::LocationFilter;

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub ui: UiConfig,
    pub data: DataConfig,
    pub session: SessionConfig,
    pub report: ReportConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UiConfig {
    pub color: bool,
    pub max_table_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataConfig {
    /// Directory holding the persisted state slots.
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionConfig {
    pub default_location: LocationFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportConfig {
    pub include_metadata: bool,
}

impl EffectiveConfig {
    fn defaults(home_dir: &Path) -> Self {
        Self {
            ui: UiConfig {
                color: true,
                max_table_rows: 20,
            },
            data: DataConfig {
                dir: home_dir.join(".config/racap/state"),
            },
            session: SessionConfig {
                default_location: LocationFilter::All,
                default_user: None,
            },
            report: ReportConfig {
                include_metadata: true,
            },
            config_path: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    ui: Option<RawUiConfig>,
    data: Option<RawDataConfig>,
    session: Option<RawSessionConfig>,
    report: Option<RawReportConfig>,
}

#[derive(Debug, Deserialize)]
struct RawUiConfig {
    color: Option<bool>,
    max_table_rows: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawDataConfig {
    dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawSessionConfig {
    default_location: Option<String>,
    default_user: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawReportConfig {
    include_metadata: Option<bool>,
}

pub fn default_config_path(home_dir: &Path) -> PathBuf {
    home_dir.join(".config/racap/config.toml")
}

pub fn load(config_path: Option<&Path>, home_dir: &Path) -> Result<EffectiveConfig> {
    let mut cfg = EffectiveConfig::defaults(home_dir);

    let path = config_path
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| default_config_path(home_dir));

    if path.exists() {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let raw: RawConfig = toml::from_str(&s).context("failed to parse config file (TOML)")?;
        apply_raw_config(&mut cfg, raw)?;
        cfg.config_path = Some(path.display().to_string());
    }

    apply_env_overrides(&mut cfg)?;

    Ok(cfg)
}

fn apply_raw_config(cfg: &mut EffectiveConfig, raw: RawConfig) -> Result<()> {
    if let Some(ui) = raw.ui {
        if let Some(color) = ui.color {
            cfg.ui.color = color;
        }
        if let Some(max_table_rows) = ui.max_table_rows {
            cfg.ui.max_table_rows = max_table_rows;
        }
    }

    if let Some(data) = raw.data {
        if let Some(dir) = data.dir {
            cfg.data.dir = dir;
        }
    }

    if let Some(session) = raw.session {
        if let Some(default_location) = session.default_location {
            cfg.session.default_location = default_location
                .parse::<LocationFilter>()
                .map_err(anyhow::Error::msg)
                .context("session.default_location")?;
        }
        if let Some(default_user) = session.default_user {
            cfg.session.default_user = Some(default_user);
        }
    }

    if let Some(report) = raw.report {
        if let Some(include_metadata) = report.include_metadata {
            cfg.report.include_metadata = include_metadata;
        }
    }

    Ok(())
}

fn apply_env_overrides(cfg: &mut EffectiveConfig) -> Result<()> {
    if let Ok(v) = std::env::var("RACAP_UI_COLOR") {
        cfg.ui.color = parse_bool(&v).with_context(|| "RACAP_UI_COLOR")?;
    }
    if let Ok(v) = std::env::var("RACAP_UI_MAX_TABLE_ROWS") {
        cfg.ui.max_table_rows = v
            .trim()
            .parse::<usize>()
            .with_context(|| "RACAP_UI_MAX_TABLE_ROWS")?;
    }
    if let Ok(v) = std::env::var("RACAP_DATA_DIR") {
        let v = v.trim();
        if !v.is_empty() {
            cfg.data.dir = PathBuf::from(v);
        }
    }
    if let Ok(v) = std::env::var("RACAP_DEFAULT_LOCATION") {
        cfg.session.default_location = v
            .parse::<LocationFilter>()
            .map_err(anyhow::Error::msg)
            .with_context(|| "RACAP_DEFAULT_LOCATION")?;
    }
    if let Ok(v) = std::env::var("RACAP_SESSION_USER") {
        let v = v.trim();
        if !v.is_empty() {
            cfg.session.default_user = Some(v.to_string());
        }
    }
    if let Ok(v) = std::env::var("RACAP_REPORT_INCLUDE_METADATA") {
        cfg.report.include_metadata =
            parse_bool(&v).with_context(|| "RACAP_REPORT_INCLUDE_METADATA")?;
    }

    Ok(())
}

fn parse_bool(s: &str) -> Result<bool> {
    let s = s.trim().to_ascii_lowercase();
    match s.as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow::anyhow!(
            "invalid boolean: {s} (expected true|false|1|0|yes|no|on|off)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Location;

    #[test]
    fn defaults_without_config_file() {
        let home = Path::new("/nonexistent-home");
        let cfg = EffectiveConfig::defaults(home);
        assert!(cfg.ui.color);
        assert_eq!(cfg.ui.max_table_rows, 20);
        assert_eq!(cfg.data.dir, home.join(".config/racap/state"));
        assert_eq!(cfg.session.default_location, LocationFilter::All);
        assert!(cfg.report.include_metadata);
    }

    #[test]
    fn toml_values_override_defaults() {
        let mut cfg = EffectiveConfig::defaults(Path::new("/home/x"));
        let raw: RawConfig = toml::from_str(
            r#"
            [ui]
            color = false
            max_table_rows = 50

            [data]
            dir = "/var/lib/racap"

            [session]
            default_location = "MUM"
            default_user = "Priya Sharma"

            [report]
            include_metadata = false
            "#,
        )
        .expect("parse");
        apply_raw_config(&mut cfg, raw).expect("apply");

        assert!(!cfg.ui.color);
        assert_eq!(cfg.ui.max_table_rows, 50);
        assert_eq!(cfg.data.dir, PathBuf::from("/var/lib/racap"));
        assert_eq!(
            cfg.session.default_location,
            LocationFilter::Only(Location::Mum)
        );
        assert_eq!(cfg.session.default_user.as_deref(), Some("Priya Sharma"));
        assert!(!cfg.report.include_metadata);
    }

    #[test]
    fn bad_location_in_toml_is_an_error() {
        let mut cfg = EffectiveConfig::defaults(Path::new("/home/x"));
        let raw: RawConfig = toml::from_str("[session]\ndefault_location = \"XYZ\"\n")
            .expect("parse");
        assert!(apply_raw_config(&mut cfg, raw).is_err());
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert!(parse_bool("Yes").expect("yes"));
        assert!(!parse_bool(" off ").expect("off"));
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn default_config_path_is_under_home() {
        assert_eq!(
            default_config_path(Path::new("/home/x")),
            PathBuf::from("/home/x/.config/racap/config.toml")
        );
    }
}
