//! Configuration file handling.
//!
//! The configuration file is stored at `$FIN_HOME/config.json` and contains
//! the Google Sheet URL. The `.secrets` subdirectory holds the Google access
//! token; how that token is obtained is outside this program.

use crate::{utils, Result};
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const APP_NAME: &str = "fin-sync";
const CONFIG_VERSION: u8 = 1;
const SECRETS: &str = ".secrets";
const TOKEN_JSON: &str = "token.json";
const CONFIG_JSON: &str = "config.json";
const RULES_JSON: &str = "rules.json";

/// The `Config` object represents the configuration of the app. You
/// instantiate it by providing the path to `$FIN_HOME` and from there it
/// loads `$FIN_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    secrets: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    spreadsheet_id: String,
}

impl Config {
    /// Creates the data directory and an initial `config.json` from
    /// `sheet_url`.
    pub async fn create(dir: impl Into<PathBuf>, sheet_url: &str) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the fin home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let secrets = root.join(SECRETS);
        utils::make_dir(&secrets).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            sheet_url: sheet_url.to_string(),
            token_path: None,
        };
        config_file.save(&config_path).await?;

        let spreadsheet_id = extract_spreadsheet_id(sheet_url)?;
        Ok(Self {
            root,
            secrets,
            config_path,
            config_file,
            spreadsheet_id,
        })
    }

    /// Validates that `fin_home` and its config file exist, then loads them.
    pub async fn load(fin_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = fin_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("Fin home is missing, run 'fin init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            return Err(anyhow!("The config file is missing '{}'", config_path.display()).into());
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let spreadsheet_id = extract_spreadsheet_id(&config_file.sheet_url)?;

        Ok(Self {
            secrets: root.join(SECRETS),
            config_path,
            config_file,
            spreadsheet_id,
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Path of the Google access token file. Configurable, defaulting to
    /// `.secrets/token.json` in the data directory.
    pub fn token_path(&self) -> PathBuf {
        self.config_file
            .token_path
            .clone()
            .unwrap_or_else(|| self.secrets.join(TOKEN_JSON))
    }

    /// Path of the optional category-rules override file.
    pub fn rules_path(&self) -> PathBuf {
        self.root.join(RULES_JSON)
    }

    /// Reads the Google access token from the token file.
    pub async fn access_token(&self) -> Result<String> {
        let path = self.token_path();
        let token: Token = utils::deserialize(&path)
            .await
            .with_context(|| format!("No usable access token at {}", path.display()))?;
        if token.access_token.is_empty() {
            return Err(
                anyhow!("The token file {} has an empty access_token", path.display()).into(),
            );
        }
        Ok(token.access_token)
    }
}

/// The serialized form of `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    app_name: String,
    config_version: u8,
    sheet_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token_path: Option<PathBuf>,
}

impl ConfigFile {
    async fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, json).await
    }

    async fn load(path: &Path) -> Result<Self> {
        utils::deserialize(path).await
    }
}

#[derive(Debug, Deserialize)]
struct Token {
    access_token: String,
}

/// Extracts the spreadsheet ID from a Google Sheets URL that looks like
/// `https://docs.google.com/spreadsheets/d/<ID>/edit`.
fn extract_spreadsheet_id(sheet_url: &str) -> Result<String> {
    let url = Url::parse(sheet_url).with_context(|| format!("Invalid sheet URL '{sheet_url}'"))?;
    let mut segments = url
        .path_segments()
        .with_context(|| format!("Sheet URL '{sheet_url}' has no path"))?;
    while let Some(segment) = segments.next() {
        if segment == "d" {
            match segments.next() {
                Some(id) if !id.is_empty() => return Ok(id.to_string()),
                _ => break,
            }
        }
    }
    Err(anyhow!("Could not find a spreadsheet ID in '{sheet_url}'").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SHEET_URL: &str =
        "https://docs.google.com/spreadsheets/d/1a7Km9FxQwRbPt82JvN4LzYpH5OcGnWsT6iDuE3VhMjX/edit";

    #[test]
    fn test_extract_spreadsheet_id() {
        assert_eq!(
            extract_spreadsheet_id(SHEET_URL).unwrap(),
            "1a7Km9FxQwRbPt82JvN4LzYpH5OcGnWsT6iDuE3VhMjX"
        );
    }

    #[test]
    fn test_extract_spreadsheet_id_no_edit_suffix() {
        assert_eq!(
            extract_spreadsheet_id("https://docs.google.com/spreadsheets/d/abc123").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn test_extract_spreadsheet_id_rejects_bad_urls() {
        assert!(extract_spreadsheet_id("not a url").is_err());
        assert!(extract_spreadsheet_id("https://docs.google.com/spreadsheets/").is_err());
    }

    #[tokio::test]
    async fn test_create_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let home = temp_dir.path().join("fin");

        let created = Config::create(&home, SHEET_URL).await.unwrap();
        assert!(created.config_path().is_file());

        let loaded = Config::load(&home).await.unwrap();
        assert_eq!(loaded.spreadsheet_id(), created.spreadsheet_id());
        assert_eq!(
            loaded.token_path(),
            loaded.root().join(".secrets/token.json")
        );
    }

    #[tokio::test]
    async fn test_load_missing_home_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(Config::load(temp_dir.path().join("nope")).await.is_err());
    }

    #[tokio::test]
    async fn test_access_token_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::create(temp_dir.path().join("fin"), SHEET_URL)
            .await
            .unwrap();
        assert!(config.access_token().await.is_err());
    }
}
