use std::{
  fmt,
  str::FromStr,
};

use base64::{
  Engine,
  engine::general_purpose::URL_SAFE_NO_PAD,
};

use crate::error::{
  CodecError,
  Result,
};

/// URL-fragment-safe text produced by [`crate::encode`].
///
/// The alphabet is `A-Z a-z 0-9 - _` without padding, so a token never needs
/// percent-encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
  pub fn from_bytes(bytes: &[u8]) -> Self {
    Self(URL_SAFE_NO_PAD.encode(bytes))
  }

  pub fn to_bytes(&self) -> Result<Vec<u8>> {
    decode_bytes(&self.0)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

pub(crate) fn decode_bytes(token: &str) -> Result<Vec<u8>> {
  if token.is_empty() {
    return Err(CodecError::Empty);
  }
  Ok(URL_SAFE_NO_PAD.decode(token)?)
}

impl FromStr for Token {
  type Err = CodecError;

  /// Accepts text that decodes as base64url.
  fn from_str(s: &str) -> Result<Self> {
    decode_bytes(s)?;
    Ok(Self(s.to_string()))
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for Token {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl From<Token> for String {
  fn from(token: Token) -> Self {
    token.0
  }
}
