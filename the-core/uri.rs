use std::fmt;

use thiserror::Error;
use url::{
  Position,
  Url,
};

/// The page a snippet link points at.
///
/// Only the origin and path take part in a shared link; the query is kept
/// for display but the fragment is where the snippet lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageUri(Url);

impl PageUri {
  pub fn parse(input: &str) -> Result<Self, UrlConversionError> {
    let url = Url::parse(input).map_err(|source| {
      UrlConversionError::Parse {
        input: input.to_string(),
        source,
      }
    })?;
    Self::try_from(url)
  }

  /// Origin and path, without query or fragment.
  pub fn base(&self) -> &str {
    &self.0[..Position::AfterPath]
  }

  /// The fragment without its leading `#`.
  pub fn fragment(&self) -> Option<&str> {
    self.0.fragment()
  }

  pub fn set_fragment(&mut self, fragment: Option<&str>) {
    self.0.set_fragment(fragment);
  }

  pub fn with_fragment(&self, fragment: Option<&str>) -> Self {
    let mut uri = self.clone();
    uri.set_fragment(fragment);
    uri
  }

  /// Length of `base + '#' + fragment`, the figure link limits apply to.
  pub fn link_len(&self, fragment: &str) -> usize {
    self.base().len() + 1 + fragment.len()
  }

  /// `base + '#' + fragment` as a string.
  pub fn link(&self, fragment: &str) -> String {
    let mut link = String::with_capacity(self.link_len(fragment));
    link.push_str(self.base());
    link.push('#');
    link.push_str(fragment);
    link
  }

  pub fn as_url(&self) -> &Url {
    &self.0
  }

  pub fn as_str(&self) -> &str {
    self.0.as_str()
  }
}

impl fmt::Display for PageUri {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.0.as_str())
  }
}

impl std::str::FromStr for PageUri {
  type Err = UrlConversionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse(s)
  }
}

#[derive(Debug, Error)]
pub enum UrlConversionError {
  #[error("invalid URL '{input}': {source}")]
  Parse {
    input:  String,
    #[source]
    source: url::ParseError,
  },

  #[error("unsupported scheme '{scheme}' in URL {url}")]
  UnsupportedScheme { scheme: String, url: Url },

  #[error("URL {0} cannot carry a path")]
  CannotBeABase(Url),
}

fn convert_url_to_page(url: Url) -> Result<PageUri, UrlConversionError> {
  if !matches!(url.scheme(), "http" | "https" | "file") {
    return Err(UrlConversionError::UnsupportedScheme {
      scheme: url.scheme().to_string(),
      url,
    });
  }
  if url.cannot_be_a_base() {
    return Err(UrlConversionError::CannotBeABase(url));
  }
  Ok(PageUri(url))
}

impl TryFrom<Url> for PageUri {
  type Error = UrlConversionError;

  fn try_from(url: Url) -> Result<Self, Self::Error> {
    convert_url_to_page(url)
  }
}

impl TryFrom<&Url> for PageUri {
  type Error = UrlConversionError;

  fn try_from(url: &Url) -> Result<Self, Self::Error> {
    convert_url_to_page(url.clone())
  }
}
