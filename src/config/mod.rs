use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    currency::{LocaleConfig, MoneyFormat},
    errors::LedgerError,
};

const TMP_SUFFIX: &str = "tmp";
const MAX_SUFFIX_LEN: usize = 8;
pub const MAX_CHART_WIDTH: usize = 120;

/// Settings keys accepted by [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "currency_suffix",
    "decimal_separator",
    "grouping_separator",
    "chart_enabled",
    "chart_width",
];

/// Presentation settings of the host shell. Never affects stored data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_suffix: String,
    pub locale: LocaleConfig,
    pub chart_enabled: bool,
    pub chart_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_suffix: "TND".into(),
            locale: LocaleConfig::default(),
            chart_enabled: true,
            chart_width: 40,
        }
    }
}

impl Config {
    pub fn money_format(&self) -> MoneyFormat {
        MoneyFormat::new(self.locale.clone(), self.currency_suffix.clone())
    }

    /// Updates one setting from its textual form, rejecting invalid values
    /// without touching the current state.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        match key {
            "currency_suffix" => {
                let suffix = value.trim();
                if suffix.chars().count() > MAX_SUFFIX_LEN {
                    return Err(LedgerError::Config(format!(
                        "currency suffix must be at most {} characters",
                        MAX_SUFFIX_LEN
                    )));
                }
                self.currency_suffix = suffix.to_string();
            }
            "decimal_separator" => {
                let sep = parse_separator(value)?;
                if sep == self.locale.grouping_separator {
                    return Err(LedgerError::Config(
                        "decimal separator must differ from the grouping separator".into(),
                    ));
                }
                self.locale.decimal_separator = sep;
            }
            "grouping_separator" => {
                let sep = parse_separator(value)?;
                if sep == self.locale.decimal_separator {
                    return Err(LedgerError::Config(
                        "grouping separator must differ from the decimal separator".into(),
                    ));
                }
                self.locale.grouping_separator = sep;
            }
            "chart_enabled" => {
                self.chart_enabled = parse_flag(value)?;
            }
            "chart_width" => {
                let width: usize = value.trim().parse().map_err(|_| {
                    LedgerError::Config(format!("chart width `{}` is not a number", value))
                })?;
                if width > MAX_CHART_WIDTH {
                    return Err(LedgerError::Config(format!(
                        "chart width must be at most {}",
                        MAX_CHART_WIDTH
                    )));
                }
                self.chart_width = width;
            }
            other => {
                return Err(LedgerError::Config(format!(
                    "unknown setting `{}` (expected one of: {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// `(key, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency_suffix", self.currency_suffix.clone()),
            (
                "decimal_separator",
                format!("{:?}", self.locale.decimal_separator),
            ),
            (
                "grouping_separator",
                format!("{:?}", self.locale.grouping_separator),
            ),
            ("chart_enabled", self.chart_enabled.to_string()),
            ("chart_width", self.chart_width.to_string()),
        ]
    }
}

fn parse_separator(value: &str) -> Result<char, LedgerError> {
    let value = if value == "space" { " " } else { value };
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if !ch.is_ascii_digit() && ch != '-' => Ok(ch),
        _ => Err(LedgerError::Config(format!(
            "separator `{}` must be a single non-digit character",
            value
        ))),
    }
}

fn parse_flag(value: &str) -> Result<bool, LedgerError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        other => Err(LedgerError::Config(format!(
            "`{}` is not a boolean (use on/off)",
            other
        ))),
    }
}

/// Loads and saves [`Config`] as a pretty JSON file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Result<Config, LedgerError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), LedgerError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
