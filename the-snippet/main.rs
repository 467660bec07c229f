use std::io;

use anyhow::{
  Context,
  Result,
};
use log::LevelFilter;

mod cli;
mod commands;
mod config;

use crate::{
  cli::CliOptions,
  config::{
    Config,
    ConfigLoadError,
  },
};

fn main() -> Result<()> {
  let exit_code = main_impl()?;
  std::process::exit(exit_code);
}

fn main_impl() -> Result<i32> {
  let args = CliOptions::parse()?;

  the_snippet_loader::initialize_config_file(args.config_file.clone());
  the_snippet_loader::initialize_log_file(args.log_file.clone());
  setup_logging(args.verbosity).context("failed to initialize logging")?;

  let config = load_config()?;
  log::debug!("running {:?} against {}", args.command, config.base_url);

  let stdout = io::stdout();
  let stderr = io::stderr();
  commands::run(&args.command, &config, &mut stdout.lock(), &mut stderr.lock())
}

fn load_config() -> Result<Config> {
  match Config::load_user() {
    Ok(config) => Ok(config),
    Err(ConfigLoadError::Error(err)) => {
      if err.kind() != io::ErrorKind::NotFound {
        log::warn!("could not read config, using defaults: {err}");
      }
      Ok(Config::builtin()?)
    },
    Err(err) => Err(err).context("failed to load config"),
  }
}

fn setup_logging(verbosity: u8) -> Result<()> {
  let level = match verbosity {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };

  fern::Dispatch::new()
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    })
    .level(level)
    .chain(fern::log_file(the_snippet_loader::log_file())?)
    .apply()?;

  Ok(())
}
