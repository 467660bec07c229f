//! The work behind each subcommand.
//!
//! Everything writes to the given streams so it can run against buffers in
//! tests; only [`read_snippet`] touches stdin.

use std::{
  fs,
  io::{
    self,
    Read,
    Write,
  },
  path::Path,
};

use anyhow::{
  Context,
  Result,
};
use the_codec::LangTag;
use the_core::{
  line_ending::{
    LineEnding,
    auto_detect_line_ending,
  },
  uri::PageUri,
};
use the_lib::{
  Location,
  MemoryLocation,
  UrlBinder,
  UrlStatus,
};

use crate::{
  cli::{
    Command,
    SnippetInput,
  },
  config::Config,
};

pub const EXIT_OK: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// A snippet with its language and target page resolved against the config.
#[derive(Debug, Clone)]
pub struct Snippet {
  pub code: String,
  pub lang: Option<LangTag>,
  pub base: PageUri,
  /// Line ending of the input as read, before normalization to LF.
  pub line_ending: Option<LineEnding>,
}

impl Snippet {
  pub fn resolve(code: String, input: &SnippetInput, config: &Config) -> Self {
    let line_ending = auto_detect_line_ending(&code);
    if let Some(ending) = line_ending {
      log::debug!("snippet uses {} line endings", ending.name());
    }
    Self {
      code,
      line_ending,
      lang: input.lang.clone().or_else(|| config.default_lang.clone()),
      base: input.base.clone().unwrap_or_else(|| config.base_url.clone()),
    }
  }

  fn binder(&self) -> UrlBinder<MemoryLocation> {
    UrlBinder::new(MemoryLocation::new(self.base.clone()))
  }
}

pub fn run(
  command: &Command,
  config: &Config,
  out: &mut dyn Write,
  err: &mut dyn Write,
) -> Result<i32> {
  match command {
    Command::Encode { input, token_only } => {
      let code = read_snippet(input.file.as_deref())?;
      encode(&Snippet::resolve(code, input, config), *token_only, out, err)
    },
    Command::Decode { link, json } => decode(link, *json, out, err),
    Command::Check { input, json } => {
      let code = read_snippet(input.file.as_deref())?;
      check(&Snippet::resolve(code, input, config), *json, out, err)
    },
    Command::Health => health(config, out),
  }
}

/// Reads the snippet from `file`, or from stdin when there is none.
pub fn read_snippet(file: Option<&Path>) -> Result<String> {
  match file {
    Some(path) => {
      fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    },
    None => {
      let mut code = String::new();
      io::stdin()
        .read_to_string(&mut code)
        .context("failed to read snippet from stdin")?;
      Ok(code)
    },
  }
}

fn report(status: &UrlStatus, err: &mut dyn Write) -> io::Result<()> {
  match status.message() {
    Some(message) => {
      writeln!(
        err,
        "{}: {} ({} characters)",
        message.level, message.text, status.length
      )
    },
    None => Ok(()),
  }
}

pub fn encode(
  snippet: &Snippet,
  token_only: bool,
  out: &mut dyn Write,
  err: &mut dyn Write,
) -> Result<i32> {
  let mut binder = snippet.binder();
  let status = binder.write(&snippet.code, snippet.lang.as_ref())?;
  report(&status, err)?;
  if status.is_error {
    return Ok(EXIT_FAILURE);
  }

  let location = binder.location();
  if token_only {
    writeln!(out, "{}", location.fragment().unwrap_or_default())?;
  } else {
    writeln!(out, "{}", location.current())?;
  }
  Ok(EXIT_OK)
}

/// Accepts a full link or a bare token, with or without its `#`.
pub fn decode(link: &str, json: bool, out: &mut dyn Write, err: &mut dyn Write) -> Result<i32> {
  let payload = match PageUri::parse(link) {
    Ok(page) => UrlBinder::new(MemoryLocation::new(page)).read(),
    Err(_) => the_codec::decode(link.strip_prefix('#').unwrap_or(link)),
  };
  let Some(payload) = payload else {
    log::warn!("input of {} characters is not a snippet link", link.len());
    writeln!(err, "error: not a snippet link")?;
    return Ok(EXIT_FAILURE);
  };

  if json {
    writeln!(out, "{}", serde_json::to_string(&payload)?)?;
  } else {
    if let Some(lang) = &payload.lang {
      log::info!("decoded {lang} snippet");
    }
    writeln!(out, "{}", payload.code)?;
  }
  Ok(EXIT_OK)
}

pub fn check(snippet: &Snippet, json: bool, out: &mut dyn Write, err: &mut dyn Write) -> Result<i32> {
  let (_token, status) = snippet
    .binder()
    .link(&snippet.code, snippet.lang.as_ref())?;

  if json {
    writeln!(out, "{}", serde_json::to_string(&status)?)?;
  } else {
    let state = if status.is_error {
      "error"
    } else if status.is_warning {
      "warning"
    } else {
      "ok"
    };
    writeln!(out, "length: {}", status.length)?;
    writeln!(out, "status: {state}")?;
    let ending = snippet.line_ending.map_or("none", |ending| ending.name());
    writeln!(out, "line endings: {ending}")?;
  }
  report(&status, err)?;

  Ok(if status.is_error {
    EXIT_FAILURE
  } else {
    EXIT_OK
  })
}

pub fn health(config: &Config, out: &mut dyn Write) -> Result<i32> {
  let files = [
    ("Config file", the_snippet_loader::config_file()),
    ("Workspace config", the_snippet_loader::workspace_config_file()),
  ];
  for (label, path) in files {
    if path.exists() {
      writeln!(out, "{label}: {}", path.display())?;
    } else {
      writeln!(out, "{label}: default")?;
    }
  }
  writeln!(out, "Log file: {}", the_snippet_loader::log_file().display())?;
  writeln!(out, "Base URL: {}", config.base_url)?;
  match &config.default_lang {
    Some(lang) => writeln!(out, "Default language: {lang}")?,
    None => writeln!(out, "Default language: none")?,
  }
  Ok(EXIT_OK)
}
