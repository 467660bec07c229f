use std::borrow::Cow;

/// The line ending every shared snippet is stored with.
pub const SNIPPET_LINE_ENDING: LineEnding = LineEnding::LF;

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum LineEnding {
  /// CarriageReturn followed by LineFeed.
  Crlf,

  /// U+000A -- LineFeed
  LF,

  /// U+000D -- CarriageReturn
  CR,
}

impl LineEnding {
  #[inline]
  pub const fn as_str(&self) -> &'static str {
    match self {
      Self::Crlf => "\u{000D}\u{000A}",
      Self::LF => "\u{000A}",
      Self::CR => "\u{000D}",
    }
  }

  pub const fn name(&self) -> &'static str {
    match self {
      Self::Crlf => "crlf",
      Self::LF => "lf",
      Self::CR => "cr",
    }
  }
}

/// Detects the line ending of `text` from its first line break.
pub fn auto_detect_line_ending(text: &str) -> Option<LineEnding> {
  let idx = text.find(['\r', '\n'])?;
  let ending = match &text.as_bytes()[idx..] {
    [b'\r', b'\n', ..] => LineEnding::Crlf,
    [b'\r', ..] => LineEnding::CR,
    _ => LineEnding::LF,
  };
  Some(ending)
}

/// Rewrites every CRLF and lone CR in `text` to LF.
///
/// Borrows when the text already uses LF exclusively.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
  if !text.contains('\r') {
    return Cow::Borrowed(text);
  }

  let mut out = String::with_capacity(text.len());
  let mut chars = text.chars().peekable();
  while let Some(ch) = chars.next() {
    if ch == '\r' {
      if chars.peek() == Some(&'\n') {
        chars.next();
      }
      out.push_str(SNIPPET_LINE_ENDING.as_str());
    } else {
      out.push(ch);
    }
  }
  Cow::Owned(out)
}

#[cfg(test)]
mod line_ending_tests {
  use super::*;

  #[test]
  fn line_ending_autodetect() {
    assert_eq!(auto_detect_line_ending("\n"), Some(LineEnding::LF));
    assert_eq!(auto_detect_line_ending("\r\n"), Some(LineEnding::Crlf));
    assert_eq!(auto_detect_line_ending("a\rb"), Some(LineEnding::CR));
    assert_eq!(auto_detect_line_ending("hello"), None);
    assert_eq!(auto_detect_line_ending(""), None);
    assert_eq!(
      auto_detect_line_ending("hello\r\nworld\n"),
      Some(LineEnding::Crlf)
    );
  }

  #[test]
  fn autodetect_uses_first_break() {
    assert_eq!(auto_detect_line_ending("a\rb\n"), Some(LineEnding::CR));
    assert_eq!(auto_detect_line_ending("a\nb\r\n"), Some(LineEnding::LF));
    assert_eq!(auto_detect_line_ending("a\r"), Some(LineEnding::CR));
    assert_eq!(auto_detect_line_ending("x\r\r\n"), Some(LineEnding::CR));
  }

  #[test]
  fn normalize_mixed_endings() {
    assert_eq!(normalize_line_endings("a\r\nb\rc\nd"), "a\nb\nc\nd");
    assert_eq!(normalize_line_endings("\r\r\n"), "\n\n");
    assert_eq!(normalize_line_endings("trailing\r"), "trailing\n");
  }

  #[test]
  fn normalize_borrows_lf_text() {
    assert!(matches!(
      normalize_line_endings("already\nunix\n"),
      Cow::Borrowed(_)
    ));
  }
}
