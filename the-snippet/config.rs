use std::{
  fs,
  io::Error as IOError,
};

use serde::Deserialize;
use the_codec::LangTag;
use the_core::uri::{
  PageUri,
  UrlConversionError,
};
use the_snippet_loader::merge_toml_values;
use thiserror::Error;
use toml::{
  Value,
  de::Error as TomlError,
};

/// Page links point at when neither the config nor `--base` names one.
pub const DEFAULT_BASE_URL: &str = "https://snippet.local/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
  pub base_url:     PageUri,
  pub default_lang: Option<LangTag>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ConfigRaw {
  base_url:     Option<String>,
  default_lang: Option<LangTag>,
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
  #[error("bad config: {0}")]
  BadConfig(#[from] TomlError),
  #[error("bad base-url in config: {0}")]
  BadBaseUrl(#[from] UrlConversionError),
  #[error(transparent)]
  Error(#[from] IOError),
}

impl Config {
  /// The config used when no config file exists.
  pub fn builtin() -> Result<Config, ConfigLoadError> {
    ConfigRaw::default().try_into()
  }

  /// Builds the config from the global and workspace documents, workspace
  /// values winning. A missing document is skipped; a malformed one is an
  /// error.
  pub fn load(
    global: Result<String, ConfigLoadError>,
    local: Result<String, ConfigLoadError>,
  ) -> Result<Config, ConfigLoadError> {
    let global_config: Result<Value, ConfigLoadError> =
      global.and_then(|file| toml::from_str(&file).map_err(ConfigLoadError::BadConfig));
    let local_config: Result<Value, ConfigLoadError> =
      local.and_then(|file| toml::from_str(&file).map_err(ConfigLoadError::BadConfig));

    let merged = match (global_config, local_config) {
      (Ok(global), Ok(local)) => merge_toml_values(global, local, 3),
      (_, Err(ConfigLoadError::BadConfig(err))) | (Err(ConfigLoadError::BadConfig(err)), _) => {
        return Err(ConfigLoadError::BadConfig(err));
      },
      (Ok(config), Err(_)) | (Err(_), Ok(config)) => config,
      (Err(err), Err(_)) => return Err(err),
    };

    let raw: ConfigRaw = merged.try_into()?;
    raw.try_into()
  }

  /// Loads `config_file()` and the workspace `.the-snippet/config.toml`.
  pub fn load_user() -> Result<Config, ConfigLoadError> {
    let global_config =
      fs::read_to_string(the_snippet_loader::config_file()).map_err(ConfigLoadError::Error);
    let local_config = fs::read_to_string(the_snippet_loader::workspace_config_file())
      .map_err(ConfigLoadError::Error);
    Self::load(global_config, local_config)
  }
}

impl TryFrom<ConfigRaw> for Config {
  type Error = ConfigLoadError;

  fn try_from(raw: ConfigRaw) -> Result<Self, Self::Error> {
    let base_url = match raw.base_url {
      Some(url) => PageUri::parse(&url)?,
      None => PageUri::parse(DEFAULT_BASE_URL)?,
    };
    Ok(Self {
      base_url,
      default_lang: raw.default_lang,
    })
  }
}
