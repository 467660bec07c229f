use the_codec::{
  Codec,
  CodecError,
  LangTag,
  SnippetPayload,
  Token,
};
use thiserror::Error;

use crate::{
  link::UrlStatus,
  location::{
    Location,
    LocationError,
  },
};

#[derive(Debug, Error)]
pub enum BinderError {
  #[error(transparent)]
  Codec(#[from] CodecError),
  #[error(transparent)]
  Location(#[from] LocationError),
}

pub type Result<T> = std::result::Result<T, BinderError>;

/// Keeps the page fragment in step with the snippet being edited.
#[derive(Debug)]
pub struct UrlBinder<L> {
  location: L,
  codec:    Codec,
}

impl<L: Location> UrlBinder<L> {
  pub fn new(location: L) -> Self {
    Self::with_codec(location, Codec::new())
  }

  pub fn with_codec(location: L, codec: Codec) -> Self {
    Self { location, codec }
  }

  pub fn location(&self) -> &L {
    &self.location
  }

  pub fn location_mut(&mut self) -> &mut L {
    &mut self.location
  }

  pub fn into_location(self) -> L {
    self.location
  }

  /// Encodes the snippet and the status its link would have, without
  /// touching the location.
  pub fn link(&self, code: &str, lang: Option<&LangTag>) -> Result<(Token, UrlStatus)> {
    let token = self.codec.encode(code, lang)?;
    let status = UrlStatus::for_link(&self.location.base(), token.as_str());
    Ok((token, status))
  }

  /// Encodes the snippet and replaces the fragment with it.
  ///
  /// A link past the error threshold is not written; the fragment keeps its
  /// previous value and the returned status carries `is_error`.
  pub fn write(&mut self, code: &str, lang: Option<&LangTag>) -> Result<UrlStatus> {
    let (token, status) = self.link(code, lang)?;
    if status.is_error {
      tracing::warn!(
        length = status.length,
        location = %self.location.name(),
        "link too long, keeping previous fragment"
      );
      return Ok(status);
    }
    if status.is_warning {
      tracing::info!(length = status.length, "link is past the warning length");
    }

    self.location.replace_fragment(token.as_str())?;
    Ok(status)
  }

  /// Decodes the snippet currently in the fragment, if any.
  pub fn read(&self) -> Option<SnippetPayload> {
    let fragment = self.location.fragment()?;
    let fragment: &str = &fragment;
    let token = fragment.strip_prefix('#').unwrap_or(fragment);
    self.codec.decode(token)
  }
}
