use std::path::PathBuf;

use anyhow::Result;
use clap::{
  ArgAction,
  Parser,
  Subcommand,
};
use the_codec::LangTag;
use the_core::uri::PageUri;

#[derive(Clone, Debug)]
pub struct CliOptions {
  pub verbosity:   u8,
  pub log_file:    Option<PathBuf>,
  pub config_file: Option<PathBuf>,
  pub command:     Command,
}

/// Where the snippet text comes from. `None` reads stdin.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnippetInput {
  pub file: Option<PathBuf>,
  pub lang: Option<LangTag>,
  pub base: Option<PageUri>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
  Encode { input: SnippetInput, token_only: bool },
  Decode { link: String, json: bool },
  Check { input: SnippetInput, json: bool },
  Health,
}

impl CliOptions {
  pub fn parse() -> Result<Self> {
    let raw = RawCli::parse();
    raw.try_into()
  }
}

#[derive(Parser, Debug)]
#[command(name = "the-snippet", about, version, long_about = None)]
struct RawCli {
  /// Increase logging verbosity (repeat for more detail)
  #[arg(short = 'v', action = ArgAction::Count, global = true)]
  verbosity: u8,

  /// Save logs to a specific file
  #[arg(long = "log", value_name = "FILE", global = true)]
  log_file: Option<PathBuf>,

  /// Load configuration from a specific file
  #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
  config_file: Option<PathBuf>,

  #[command(subcommand)]
  command: RawCommand,
}

#[derive(clap::Args, Debug)]
struct RawInput {
  /// Snippet file to read; `-` or nothing reads stdin
  #[arg(value_name = "FILE")]
  file: Option<PathBuf>,

  /// Language tag stored with the snippet
  #[arg(short = 'l', long = "lang", value_name = "LANG")]
  lang: Option<LangTag>,

  /// Page the link points at
  #[arg(long = "base", value_name = "URL")]
  base: Option<PageUri>,
}

#[derive(Subcommand, Debug)]
enum RawCommand {
  /// Encode a snippet into a shareable link
  Encode {
    #[command(flatten)]
    input: RawInput,

    /// Print only the fragment token
    #[arg(long = "token")]
    token_only: bool,
  },
  /// Print the snippet stored in a link or token
  Decode {
    #[arg(value_name = "URL|TOKEN")]
    link: String,

    /// Print the payload as JSON
    #[arg(long = "json")]
    json: bool,
  },
  /// Report the length status of a snippet's link without printing it
  Check {
    #[command(flatten)]
    input: RawInput,

    /// Print the status as JSON
    #[arg(long = "json")]
    json: bool,
  },
  /// Show config and log file locations
  Health,
}

impl From<RawInput> for SnippetInput {
  fn from(raw: RawInput) -> Self {
    Self {
      file: raw.file.filter(|path| path.as_os_str() != "-"),
      lang: raw.lang,
      base: raw.base,
    }
  }
}

impl TryFrom<RawCli> for CliOptions {
  type Error = anyhow::Error;

  fn try_from(raw: RawCli) -> Result<Self> {
    let command = match raw.command {
      RawCommand::Encode { input, token_only } => {
        Command::Encode {
          input: input.into(),
          token_only,
        }
      },
      RawCommand::Decode { link, json } => {
        let link = link.trim();
        if link.is_empty() {
          anyhow::bail!("nothing to decode");
        }
        Command::Decode {
          link: link.to_string(),
          json,
        }
      },
      RawCommand::Check { input, json } => {
        Command::Check {
          input: input.into(),
          json,
        }
      },
      RawCommand::Health => Command::Health,
    };

    Ok(Self {
      verbosity: raw.verbosity,
      log_file: raw.log_file,
      config_file: raw.config_file,
      command,
    })
  }
}
