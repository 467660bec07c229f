use the_codec::LangTag;

const MAX_CODE_BYTES: usize = 64 * 1024;

const TAGS: &[&str] = &["c", "rust", "javascript", "objective-c", "x86-asm"];

/// Splits fuzz input into an optional language tag and a snippet.
///
/// The first byte picks the tag (or none); the rest is the snippet, with
/// invalid UTF-8 replaced.
pub fn payload_from_bytes(data: &[u8]) -> Option<(String, Option<LangTag>)> {
  let (&selector, rest) = data.split_first()?;
  if rest.len() > MAX_CODE_BYTES {
    return None;
  }
  let lang = TAGS
    .get(selector as usize % (TAGS.len() + 1))
    .and_then(|tag| LangTag::new(*tag).ok());
  Some((String::from_utf8_lossy(rest).into_owned(), lang))
}
