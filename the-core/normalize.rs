//! Whitespace cleanup applied to every snippet before it is encoded.
//!
//! The cleanup is lossy but idempotent, so a snippet that went through an
//! encode/decode cycle encodes to the same token again.

use crate::line_ending::{
  SNIPPET_LINE_ENDING,
  normalize_line_endings,
};

/// Runs of this many blank lines or more collapse into a single blank line.
pub const BLANK_RUN_COLLAPSE: usize = 3;

/// Normalizes snippet text:
///
/// 1. CRLF and CR line endings become LF.
/// 2. Trailing whitespace is stripped from every line.
/// 3. Runs of [`BLANK_RUN_COLLAPSE`] or more blank lines become one blank line.
/// 4. Leading and trailing whitespace of the whole text is trimmed.
pub fn normalize(text: &str) -> String {
  let text = normalize_line_endings(text);
  let eol = SNIPPET_LINE_ENDING.as_str();

  let mut out = String::with_capacity(text.len());
  let mut blank_run = 0;
  for line in text.split(eol).map(str::trim_end) {
    if line.is_empty() {
      blank_run += 1;
      continue;
    }

    let blanks = if blank_run >= BLANK_RUN_COLLAPSE {
      1
    } else {
      blank_run
    };
    // Blank lines ahead of the first content line are dropped.
    if !out.is_empty() {
      for _ in 0..=blanks {
        out.push_str(eol);
      }
    }
    out.push_str(line);
    blank_run = 0;
  }

  // Only the first line can still carry leading whitespace.
  match out.find(|c: char| !c.is_whitespace()) {
    Some(0) => out,
    Some(start) => out.split_off(start),
    None => String::new(),
  }
}

/// Returns true when `text` would come back unchanged from [`normalize`].
pub fn is_normalized(text: &str) -> bool {
  normalize(text) == text
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_trailing_whitespace() {
    assert_eq!(normalize("a  \nb\t\nc"), "a\nb\nc");
  }

  #[test]
  fn trims_whole_text() {
    assert_eq!(normalize("\n\n   fn main() {}\n\n"), "fn main() {}");
    assert_eq!(normalize("  \n \t \n"), "");
    assert_eq!(normalize(""), "");
  }

  #[test]
  fn keeps_inner_indentation() {
    assert_eq!(
      normalize("function hi() {\n  return 1;\n}\n"),
      "function hi() {\n  return 1;\n}"
    );
  }

  #[test]
  fn collapses_long_blank_runs() {
    assert_eq!(normalize("a\n\nb"), "a\n\nb");
    assert_eq!(normalize("a\n\n\nb"), "a\n\n\nb");
    assert_eq!(normalize("a\n\n\n\nb"), "a\n\nb");
    assert_eq!(normalize("a\n\n  \n\t\n\n\nb"), "a\n\nb");
  }

  #[test]
  fn converts_line_endings() {
    assert_eq!(normalize("a\r\nb\rc"), "a\nb\nc");
    assert_eq!(normalize("a\r\n\r\n\r\n\r\nb"), "a\n\nb");
  }

  #[test]
  fn normalized_text_is_stable() {
    let once = normalize(" x \r\n\r\n\r\n\r\n  y\t\n");
    assert_eq!(once, "x\n\n  y");
    assert!(is_normalized(&once));
  }

  quickcheck::quickcheck! {
    fn normalize_is_idempotent(text: String) -> bool {
      let once = normalize(&text);
      normalize(&once) == once
    }
  }
}
