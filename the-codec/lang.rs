//! Language tags and the `lang|` prefix carried in front of the code.

use std::{
  fmt,
  str::FromStr,
};

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

/// Separates the language tag from the code in the decoded text.
pub const SEPARATOR: char = '|';

/// Longest accepted tag, in characters.
pub const MAX_LANG_LEN: usize = 19;

/// A language identifier such as `rust` or `objective-c`.
///
/// Matches `^[A-Za-z][A-Za-z0-9-]{0,18}$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LangTag(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LangTagError {
  #[error("language tag is empty")]
  Empty,
  #[error("language tag is {len} characters long, the limit is {MAX_LANG_LEN}")]
  TooLong { len: usize },
  #[error("language tag must start with an ASCII letter, found {0:?}")]
  InvalidStart(char),
  #[error("language tag may only contain ASCII letters, digits and '-', found {0:?}")]
  InvalidChar(char),
}

impl LangTag {
  pub fn new(tag: impl Into<String>) -> Result<Self, LangTagError> {
    let tag = tag.into();
    validate(&tag)?;
    Ok(Self(tag))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_string(self) -> String {
    self.0
  }
}

fn validate(tag: &str) -> Result<(), LangTagError> {
  let mut chars = tag.chars();
  match chars.next() {
    None => return Err(LangTagError::Empty),
    Some(first) if !first.is_ascii_alphabetic() => {
      return Err(LangTagError::InvalidStart(first));
    },
    Some(_) => {},
  }

  if let Some(bad) = chars.find(|&c| !(c.is_ascii_alphanumeric() || c == '-')) {
    return Err(LangTagError::InvalidChar(bad));
  }

  // Everything left is ASCII, so bytes and characters agree.
  if tag.len() > MAX_LANG_LEN {
    return Err(LangTagError::TooLong { len: tag.len() });
  }
  Ok(())
}

impl FromStr for LangTag {
  type Err = LangTagError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::new(s)
  }
}

impl TryFrom<String> for LangTag {
  type Error = LangTagError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::new(value)
  }
}

impl From<LangTag> for String {
  fn from(tag: LangTag) -> Self {
    tag.0
  }
}

impl AsRef<str> for LangTag {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for LangTag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Splits a leading `lang|` off `text`.
///
/// A separator at index 0 is the escape written for untagged code that would
/// otherwise look tagged; it is dropped and no language is returned. Any
/// other text before the first separator that is not a valid tag means the
/// whole text is code.
pub fn split_prefix(text: &str) -> (Option<LangTag>, &str) {
  match text.find(SEPARATOR) {
    Some(0) => (None, &text[SEPARATOR.len_utf8()..]),
    Some(idx) if idx <= MAX_LANG_LEN => {
      match LangTag::new(&text[..idx]) {
        Ok(tag) => (Some(tag), &text[idx + SEPARATOR.len_utf8()..]),
        Err(_) => (None, text),
      }
    },
    _ => (None, text),
  }
}

/// Builds the text [`split_prefix`] turns back into `(lang, code)`.
pub fn attach_prefix(code: &str, lang: Option<&LangTag>) -> String {
  match lang {
    Some(lang) => {
      let mut text = String::with_capacity(lang.0.len() + 1 + code.len());
      text.push_str(&lang.0);
      text.push(SEPARATOR);
      text.push_str(code);
      text
    },
    None if reads_as_prefixed(code) => {
      let mut text = String::with_capacity(1 + code.len());
      text.push(SEPARATOR);
      text.push_str(code);
      text
    },
    None => code.to_string(),
  }
}

fn reads_as_prefixed(code: &str) -> bool {
  let (lang, rest) = split_prefix(code);
  lang.is_some() || rest.len() != code.len()
}
