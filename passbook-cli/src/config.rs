use anyhow::{Context, Result};
use passbook_finance::RuleTable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{default_config_path, ensure_passbook_home};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bank code used when `--bank` is not given. Unset means sniff the header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_bank: Option<String>,
    pub format: OutputFormat,
    pub log_level: String,
    /// Upper bound on a single statement parse
    pub parse_timeout_secs: u64,
    /// Extra category labels, matched as keywords after the built-in rules
    pub custom_categories: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_bank: None,
            format: OutputFormat::Table,
            log_level: "warn".to_string(),
            parse_timeout_secs: 30,
            custom_categories: Vec::new(),
        }
    }
}

impl Config {
    pub fn rules(&self) -> RuleTable {
        RuleTable::builtin().with_custom_categories(&self.custom_categories)
    }
}

pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => default_config_path(),
    }
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let p = config_path(explicit)?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(explicit: Option<&Path>) -> Result<()> {
    let p = match explicit {
        Some(p) => p.to_path_buf(),
        None => ensure_passbook_home()?.join("config.toml"),
    };
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
