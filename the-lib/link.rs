//! Length policy for shared links.
//!
//! Browsers, chat clients and link shorteners start truncating or rejecting
//! long URLs well before any hard limit, so links are classified up front.

use serde::{
  Deserialize,
  Serialize,
};

use crate::messages::Message;

/// Links longer than this may not survive every client.
pub const WARN_LENGTH: usize = 2000;

/// Links longer than this are not written to the address bar.
pub const MAX_LENGTH: usize = 8000;

pub const WARN_MESSAGE: Message =
  Message::warning("This link is long and may not work in every app.");

pub const ERROR_MESSAGE: Message =
  Message::error("This snippet is too large to share as a link. The link was not updated.");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlStatus {
  pub length:     usize,
  pub is_warning: bool,
  pub is_error:   bool,
}

impl UrlStatus {
  pub const fn classify(length: usize) -> Self {
    Self {
      length,
      is_warning: length > WARN_LENGTH && length <= MAX_LENGTH,
      is_error: length > MAX_LENGTH,
    }
  }

  /// Classifies `base + '#' + token`, measured in bytes like
  /// [`the_core::uri::PageUri::link_len`]. Serialized URLs and tokens are
  /// ASCII, so bytes and characters agree.
  pub fn for_link(base: &str, token: &str) -> Self {
    Self::classify(base.len() + 1 + token.len())
  }

  pub const fn is_ok(&self) -> bool {
    !self.is_warning && !self.is_error
  }

  pub const fn message(&self) -> Option<Message> {
    if self.is_error {
      Some(ERROR_MESSAGE)
    } else if self.is_warning {
      Some(WARN_MESSAGE)
    } else {
      None
    }
  }
}
