//! Reversible transform between a code snippet and a URL fragment token.
//!
//! Encoding runs normalize → `lang|` prefix → dictionary substitution →
//! Brotli → base64url. Decoding mirrors the stages back to front and never
//! fails loudly: a broken or hostile fragment decodes to `None`.

pub mod compress;
pub mod dictionary;
pub mod error;
pub mod lang;
pub mod token;

use serde::{
  Deserialize,
  Serialize,
};
use the_core::normalize;

pub use crate::{
  compress::MAX_DECODED_LEN,
  error::{
    CodecError,
    Result,
  },
  lang::{
    LangTag,
    LangTagError,
  },
  token::Token,
};

/// A snippet as the host editor sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetPayload {
  pub code: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub lang: Option<LangTag>,
}

impl SnippetPayload {
  pub fn new(code: impl Into<String>, lang: Option<LangTag>) -> Self {
    Self {
      code: code.into(),
      lang,
    }
  }
}

/// Pipeline settings.
///
/// Tokens are self-describing about the dictionary stage, so a token made
/// with either setting decodes with either setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codec {
  dictionary: bool,
}

impl Default for Codec {
  fn default() -> Self {
    Self::new()
  }
}

impl Codec {
  pub const fn new() -> Self {
    Self { dictionary: true }
  }

  /// Skips the dictionary stage and relies on Brotli alone.
  pub const fn without_dictionary() -> Self {
    Self { dictionary: false }
  }

  pub const fn uses_dictionary(&self) -> bool {
    self.dictionary
  }

  pub fn encode(&self, code: &str, lang: Option<&LangTag>) -> Result<Token> {
    let code = normalize(code);
    let text = lang::attach_prefix(&code, lang);
    let text = if self.dictionary {
      dictionary::substitute(&text)
    } else {
      dictionary::raw(&text)
    };
    let packed = compress::compress(text.as_bytes())?;
    let token = Token::from_bytes(&packed);

    tracing::trace!(
      code_len = code.len(),
      packed_len = packed.len(),
      token_len = token.len(),
      "encoded snippet"
    );
    Ok(token)
  }

  pub fn try_decode(&self, token: &str) -> Result<SnippetPayload> {
    let packed = token::decode_bytes(token)?;
    let bytes = compress::decompress(&packed, MAX_DECODED_LEN)?;
    let text = dictionary::restore(&String::from_utf8(bytes)?);
    let (lang, code) = lang::split_prefix(&text);
    Ok(SnippetPayload::new(code, lang))
  }

  pub fn decode(&self, token: &str) -> Option<SnippetPayload> {
    match self.try_decode(token) {
      Ok(payload) => Some(payload),
      Err(err) => {
        tracing::debug!(token_len = token.len(), "discarding undecodable token: {err}");
        None
      },
    }
  }
}

/// Encodes `code` with the default pipeline.
pub fn encode(code: &str, lang: Option<&LangTag>) -> Result<Token> {
  Codec::new().encode(code, lang)
}

/// Decodes `token`, returning `None` for anything that is not a valid token.
pub fn decode(token: &str) -> Option<SnippetPayload> {
  Codec::new().decode(token)
}

/// Decodes `token`, reporting why it failed.
pub fn try_decode(token: &str) -> Result<SnippetPayload> {
  Codec::new().try_decode(token)
}

#[cfg(test)]
mod tests {
  use base64::{
    Engine,
    engine::general_purpose::URL_SAFE_NO_PAD,
  };

  use super::*;

  fn tag(s: &str) -> LangTag {
    LangTag::new(s).unwrap()
  }

  #[test]
  fn javascript_example() {
    let token = encode("function hi() {\n  return 1;\n}\n", Some(&tag("javascript"))).unwrap();
    let payload = decode(token.as_str()).unwrap();
    assert_eq!(payload.lang, Some(tag("javascript")));
    assert_eq!(payload.code, "function hi() {\n  return 1;\n}");
  }

  #[test]
  fn untagged_snippet() {
    let token = encode("print('x')", None).unwrap();
    assert_eq!(
      decode(token.as_str()),
      Some(SnippetPayload::new("print('x')", None))
    );
  }

  #[test]
  fn untagged_pipe_is_not_a_language() {
    let token = encode("a|b", None).unwrap();
    assert_eq!(decode(token.as_str()), Some(SnippetPayload::new("a|b", None)));
  }

  #[test]
  fn tagged_pipe_body() {
    let token = encode("x | y", Some(&tag("sh"))).unwrap();
    assert_eq!(
      decode(token.as_str()),
      Some(SnippetPayload::new("x | y", Some(tag("sh"))))
    );
  }

  #[test]
  fn empty_snippet() {
    let token = encode("   \n\n", None).unwrap();
    assert!(!token.is_empty());
    assert_eq!(decode(token.as_str()), Some(SnippetPayload::new("", None)));
  }

  #[test]
  fn decode_rejects_bad_input() {
    assert_eq!(decode(""), None);
    assert_eq!(decode("not-valid-base64!!"), None);
    let garbage = URL_SAFE_NO_PAD.encode(b"hello world");
    assert_eq!(decode(&garbage), None);
    assert!(matches!(try_decode(""), Err(CodecError::Empty)));
    assert!(matches!(
      try_decode("not-valid-base64!!"),
      Err(CodecError::Base64(_))
    ));
  }

  #[test]
  fn decode_rejects_tampered_token() {
    let token = encode("let x = 1;", None).unwrap();
    let mut bytes = token.to_bytes().unwrap();
    bytes.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
    let tampered = Token::from_bytes(&bytes);
    assert!(matches!(
      try_decode(tampered.as_str()),
      Err(CodecError::TrailingData { .. })
    ));
    assert_eq!(decode(tampered.as_str()), None);
  }

  #[test]
  fn decode_rejects_non_utf8() {
    let packed = compress::compress(&[0xff, 0xfe, 0x00]).unwrap();
    let token = Token::from_bytes(&packed);
    assert!(matches!(try_decode(token.as_str()), Err(CodecError::Utf8(_))));
  }

  #[test]
  fn encoding_is_deterministic() {
    let a = encode("let x = 1;", Some(&tag("rust"))).unwrap();
    let b = encode("let x = 1;", Some(&tag("rust"))).unwrap();
    assert_eq!(a, b);
  }

  #[test]
  fn re_encoding_decoded_snippet_is_stable() {
    let first = encode("  x  \r\n\r\n\r\n\r\n\r\ny\t", None).unwrap();
    let payload = decode(first.as_str()).unwrap();
    let second = encode(&payload.code, payload.lang.as_ref()).unwrap();
    assert_eq!(first, second);
  }

  #[test]
  fn reserved_code_points_survive() {
    let code = "const sigil = '\u{E000}\u{E0FF}';";
    let token = encode(code, Some(&tag("js"))).unwrap();
    assert_eq!(decode(token.as_str()).unwrap().code, code);
  }

  #[test]
  fn dictionary_setting_is_self_describing() {
    let code = "def f(self):\n    return self.x";
    let with = Codec::new().encode(code, None).unwrap();
    let without = Codec::without_dictionary().encode(code, None).unwrap();
    assert_ne!(with, without);
    assert_eq!(Codec::new().decode(without.as_str()).unwrap().code, code);
    assert_eq!(Codec::without_dictionary().decode(with.as_str()).unwrap().code, code);
  }

  #[test]
  fn token_is_fragment_safe() {
    let token = encode(&"é ü 漢字 🎉 <>&\"'#%\n".repeat(20), Some(&tag("text"))).unwrap();
    assert!(
      token
        .as_str()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
  }

  const TAGS: &[&str] = &["c", "rust", "objective-c", "x86-asm", "abcdefghijklmnopqrs"];

  quickcheck::quickcheck! {
    fn round_trip(code: String, pick: Option<u8>) -> bool {
      let lang = pick.map(|i| tag(TAGS[i as usize % TAGS.len()]));
      let token = encode(&code, lang.as_ref()).unwrap();
      decode(token.as_str()) == Some(SnippetPayload::new(normalize(&code), lang))
    }
  }
}
