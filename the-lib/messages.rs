use std::fmt;

use serde::{
  Deserialize,
  Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageLevel {
  Info,
  Warning,
  Error,
}

impl fmt::Display for MessageLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      Self::Info => "info",
      Self::Warning => "warning",
      Self::Error => "error",
    };
    f.write_str(label)
  }
}

/// A user-facing notice the host shows next to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Message {
  pub level: MessageLevel,
  pub text:  &'static str,
}

impl Message {
  pub const fn warning(text: &'static str) -> Self {
    Self {
      level: MessageLevel::Warning,
      text,
    }
  }

  pub const fn error(text: &'static str) -> Self {
    Self {
      level: MessageLevel::Error,
      text,
    }
  }
}
