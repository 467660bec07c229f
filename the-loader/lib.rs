//! Where the-snippet keeps its files on disk.

use std::{
  path::{
    Path,
    PathBuf,
  },
  sync::OnceLock,
};

use etcetera::base_strategy::{
  BaseStrategy,
  choose_base_strategy,
};

const APP_DIR: &str = "the-snippet";

/// Directory marking a workspace and holding its local config.
pub const WORKSPACE_DIR: &str = ".the-snippet";

static CONFIG_FILE: OnceLock<PathBuf> = OnceLock::new();

static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();

pub fn initialize_config_file(specified_file: Option<PathBuf>) {
  let config_file = specified_file.unwrap_or_else(default_config_file);
  ensure_parent_dir(&config_file);
  CONFIG_FILE.set(config_file).ok();
}

pub fn initialize_log_file(specified_file: Option<PathBuf>) {
  let log_file = specified_file.unwrap_or_else(default_log_file);
  ensure_parent_dir(&log_file);
  LOG_FILE.set(log_file).ok();
}

/// Expands a leading `~` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let Ok(rest) = path.strip_prefix("~") else {
    return path.to_owned();
  };
  match etcetera::home_dir() {
    Ok(home) => home.join(rest),
    Err(_) => path.to_owned(),
  }
}

fn env_dir(var: &str) -> Option<PathBuf> {
  std::env::var(var)
    .ok()
    .map(|dir| expand_tilde(Path::new(&dir)))
}

fn fallback_dir(err: impl std::fmt::Display) -> PathBuf {
  log::warn!("no home directory ({err}), falling back to the working directory");
  PathBuf::from(WORKSPACE_DIR)
}

pub fn config_dir() -> PathBuf {
  if let Some(dir) = env_dir("THE_SNIPPET_CONFIG_DIR") {
    return dir;
  }
  match choose_base_strategy() {
    Ok(strategy) => strategy.config_dir().join(APP_DIR),
    Err(err) => fallback_dir(err),
  }
}

pub fn cache_dir() -> PathBuf {
  if let Some(dir) = env_dir("THE_SNIPPET_CACHE_DIR") {
    return dir;
  }
  match choose_base_strategy() {
    Ok(strategy) => strategy.cache_dir().join(APP_DIR),
    Err(err) => fallback_dir(err),
  }
}

pub fn config_file() -> PathBuf {
  CONFIG_FILE
    .get_or_init(|| {
      let path = default_config_file();
      ensure_parent_dir(&path);
      path
    })
    .clone()
}

pub fn log_file() -> PathBuf {
  LOG_FILE
    .get_or_init(|| {
      let path = default_log_file();
      ensure_parent_dir(&path);
      path
    })
    .clone()
}

pub fn workspace_config_file() -> PathBuf {
  find_workspace().0.join(WORKSPACE_DIR).join("config.toml")
}

pub fn default_log_file() -> PathBuf {
  cache_dir().join("the-snippet.log")
}

/// Merge two TOML documents, merging values from `right` onto `left`
///
/// `merge_depth` sets the nesting depth up to which tables are merged instead
/// of overridden. Arrays are never merged; the right array replaces the left.
///
/// `merge_toml_values(global, workspace, 3)` combines, for example:
///
/// global:
/// ```toml
/// base-url = "https://snippet.example/"
/// default-lang = "rust"
/// ```
/// workspace:
/// ```toml
/// default-lang = "python"
/// ```
///
/// into:
/// ```toml
/// base-url = "https://snippet.example/"
/// default-lang = "python"
/// ```
pub fn merge_toml_values(left: toml::Value, right: toml::Value, merge_depth: usize) -> toml::Value {
  use toml::Value;

  match (left, right) {
    (Value::Table(mut left_map), Value::Table(right_map)) if merge_depth > 0 => {
      for (rname, rvalue) in right_map {
        let merged = match left_map.remove(&rname) {
          Some(lvalue) => merge_toml_values(lvalue, rvalue, merge_depth - 1),
          None => rvalue,
        };
        left_map.insert(rname, merged);
      }
      Value::Table(left_map)
    },
    // Everything else takes the right value
    (_, value) => value,
  }
}

/// Finds the current workspace folder.
///
/// Searches upward from the working directory and returns the first
/// directory containing `.git`, `.svn`, `.jj` or `.the-snippet`. If no
/// workspace was found returns (CWD, true), otherwise (workspace, false).
pub fn find_workspace() -> (PathBuf, bool) {
  match std::env::current_dir() {
    Ok(current_dir) => find_workspace_in(current_dir),
    Err(_) => (PathBuf::new(), true),
  }
}

pub fn find_workspace_in(dir: impl AsRef<Path>) -> (PathBuf, bool) {
  let dir = dir.as_ref();
  for ancestor in dir.ancestors() {
    if [".git", ".svn", ".jj", WORKSPACE_DIR]
      .iter()
      .any(|marker| ancestor.join(marker).exists())
    {
      return (ancestor.to_owned(), false);
    }
  }

  (dir.to_owned(), true)
}

fn default_config_file() -> PathBuf {
  config_dir().join("config.toml")
}

fn ensure_parent_dir(path: &Path) {
  if let Some(parent) = path.parent()
    && !parent.exists()
  {
    std::fs::create_dir_all(parent).ok();
  }
}
