//! Literal pattern substitution applied ahead of compression.
//!
//! Common source idioms are swapped for single private-use code points so
//! the compressor sees a smaller, more repetitive alphabet. The table below
//! is part of the link format: reordering or editing an entry breaks every
//! link shared before the change.
//!
//! Text that already contains a code point from [`RESERVED`] skips the
//! table and is written behind [`RAW_MARKER`] instead, so user input is
//! never confused with a substitution token.

use std::ops::RangeInclusive;

/// Code points owned by the dictionary stage.
pub const RESERVED: RangeInclusive<char> = '\u{E000}'..='\u{E0FF}';

/// Leads the text when the table was not applied.
pub const RAW_MARKER: char = '\u{E0FF}';

/// Pattern and token pairs, applied in order and reversed back to front.
///
/// Longer indentation runs come before shorter ones so they are taken whole.
pub const ENTRIES: &[(&str, char)] = &[
  // indentation
  ("\n                ", '\u{E000}'),
  ("\n            ", '\u{E001}'),
  ("\n        ", '\u{E002}'),
  ("\n      ", '\u{E003}'),
  ("\n    ", '\u{E004}'),
  ("\n  ", '\u{E005}'),
  ("\n\t\t\t", '\u{E006}'),
  ("\n\t\t", '\u{E007}'),
  ("\n\t", '\u{E008}'),
  // keywords
  ("function ", '\u{E009}'),
  ("return ", '\u{E00A}'),
  ("const ", '\u{E00B}'),
  ("let ", '\u{E00C}'),
  ("var ", '\u{E00D}'),
  ("import ", '\u{E00E}'),
  ("export ", '\u{E00F}'),
  ("default ", '\u{E010}'),
  (" from ", '\u{E011}'),
  ("class ", '\u{E012}'),
  ("extends ", '\u{E013}'),
  ("interface ", '\u{E014}'),
  ("public ", '\u{E015}'),
  ("private ", '\u{E016}'),
  ("protected ", '\u{E017}'),
  ("static ", '\u{E018}'),
  ("async ", '\u{E019}'),
  ("await ", '\u{E01A}'),
  ("} else if (", '\u{E01B}'),
  ("} else {", '\u{E01C}'),
  ("if (", '\u{E01D}'),
  ("for (", '\u{E01E}'),
  ("while (", '\u{E01F}'),
  ("switch (", '\u{E020}'),
  ("case ", '\u{E021}'),
  ("break;", '\u{E022}'),
  ("continue;", '\u{E023}'),
  ("new ", '\u{E024}'),
  ("throw ", '\u{E025}'),
  ("try {", '\u{E026}'),
  ("catch (", '\u{E027}'),
  ("typeof ", '\u{E028}'),
  ("undefined", '\u{E029}'),
  ("null", '\u{E02A}'),
  ("true", '\u{E02B}'),
  ("false", '\u{E02C}'),
  ("this.", '\u{E02D}'),
  ("console.log(", '\u{E02E}'),
  ("document.", '\u{E02F}'),
  ("def ", '\u{E030}'),
  ("elif ", '\u{E031}'),
  ("else:", '\u{E032}'),
  ("self.", '\u{E033}'),
  ("self", '\u{E034}'),
  ("None", '\u{E035}'),
  ("True", '\u{E036}'),
  ("False", '\u{E037}'),
  ("print(", '\u{E038}'),
  ("lambda ", '\u{E039}'),
  ("pub fn ", '\u{E03A}'),
  ("fn ", '\u{E03B}'),
  ("pub ", '\u{E03C}'),
  ("impl ", '\u{E03D}'),
  ("struct ", '\u{E03E}'),
  ("enum ", '\u{E03F}'),
  ("match ", '\u{E040}'),
  ("use ", '\u{E041}'),
  ("mut ", '\u{E042}'),
  ("println!(", '\u{E043}'),
  ("String", '\u{E044}'),
  ("string", '\u{E045}'),
  ("number", '\u{E046}'),
  ("#include <", '\u{E047}'),
  ("std::", '\u{E048}'),
  ("printf(", '\u{E049}'),
  ("int ", '\u{E04A}'),
  ("void ", '\u{E04B}'),
  ("func ", '\u{E04C}'),
  ("package ", '\u{E04D}'),
  ("err != nil", '\u{E04E}'),
  ("return;", '\u{E04F}'),
  // operators
  (" === ", '\u{E050}'),
  (" !== ", '\u{E051}'),
  (" => ", '\u{E052}'),
  (" == ", '\u{E053}'),
  (" != ", '\u{E054}'),
  (" <= ", '\u{E055}'),
  (" >= ", '\u{E056}'),
  (" && ", '\u{E057}'),
  (" || ", '\u{E058}'),
  (" += ", '\u{E059}'),
  (" -= ", '\u{E05A}'),
  (" := ", '\u{E05B}'),
  (" = ", '\u{E05C}'),
  ("->", '\u{E05D}'),
  ("::", '\u{E05E}'),
  // punctuation
  ("});", '\u{E05F}'),
  ("\n}", '\u{E060}'),
  ("();", '\u{E061}'),
  (") {", '\u{E062}'),
  ("\");", '\u{E063}'),
  ("');", '\u{E064}'),
  ("\", \"", '\u{E065}'),
  ("', '", '\u{E066}'),
  ("})", '\u{E067}'),
  ("()", '\u{E068}'),
  ("{}", '\u{E069}'),
  ("[]", '\u{E06A}'),
  (", ", '\u{E06B}'),
  (";\n", '\u{E06C}'),
  (" {", '\u{E06D}'),
];

#[inline]
pub fn is_reserved(ch: char) -> bool {
  RESERVED.contains(&ch)
}

/// Replaces every table pattern in `text` with its token.
///
/// Falls back to `RAW_MARKER + text` when `text` holds reserved code points.
pub fn substitute(text: &str) -> String {
  if text.chars().any(is_reserved) {
    return raw(text);
  }

  let mut out = text.to_string();
  let mut buf = [0u8; 4];
  for (pattern, token) in ENTRIES {
    if out.contains(pattern) {
      out = out.replace(pattern, token.encode_utf8(&mut buf));
    }
  }
  out
}

/// Marks `text` as carrying no substitutions.
pub fn raw(text: &str) -> String {
  let mut out = String::with_capacity(text.len() + RAW_MARKER.len_utf8());
  out.push(RAW_MARKER);
  out.push_str(text);
  out
}

/// Undoes [`substitute`] and [`raw`].
pub fn restore(text: &str) -> String {
  if let Some(text) = text.strip_prefix(RAW_MARKER) {
    return text.to_string();
  }

  let mut out = text.to_string();
  for (pattern, token) in ENTRIES.iter().rev() {
    if out.contains(*token) {
      out = out.replace(*token, pattern);
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  #[test]
  fn tokens_are_distinct_and_reserved() {
    let mut seen = HashSet::new();
    for (pattern, token) in ENTRIES {
      assert!(is_reserved(*token), "{token:?} outside reserved range");
      assert_ne!(*token, RAW_MARKER, "{pattern:?} uses the raw marker");
      assert!(seen.insert(*token), "{token:?} used twice");
    }
  }

  #[test]
  fn patterns_are_plain_text() {
    for (pattern, _) in ENTRIES {
      assert!(!pattern.is_empty());
      assert!(
        !pattern.chars().any(is_reserved),
        "{pattern:?} contains a reserved code point"
      );
    }
  }

  #[test]
  fn substitution_shrinks_source() {
    let source = "function hi() {\n  return 1;\n}";
    let substituted = substitute(source);
    assert!(substituted.chars().count() < source.chars().count());
    assert_eq!(restore(&substituted), source);
  }

  #[test]
  fn restores_mixed_languages() {
    let sources = [
      "def f(self):\n    if self.x == None:\n        return True\n    else:\n        return False",
      "pub fn main() {\n    let mut v: Vec<String> = Vec::new();\n    println!(\"{:?}\", v);\n}",
      "#include <stdio.h>\nint main(void) {\n\tprintf(\"hi\\n\");\n\treturn 0;\n}",
      "if err != nil {\n\treturn err\n}\nx := 1",
      "const a = () => { console.log('a', 'b'); };\nexport default a;",
    ];
    for source in sources {
      assert_eq!(restore(&substitute(source)), source);
    }
  }

  #[test]
  fn reserved_input_is_kept_raw() {
    let source = "let marker = '\u{E00A}';";
    let substituted = substitute(source);
    assert!(substituted.starts_with(RAW_MARKER));
    assert_eq!(restore(&substituted), source);

    let marker_only = "\u{E0FF}";
    assert_eq!(restore(&substitute(marker_only)), marker_only);
  }

  #[test]
  fn substituted_text_never_starts_with_marker() {
    for (pattern, _) in ENTRIES {
      assert_ne!(substitute(pattern).chars().next(), Some(RAW_MARKER));
    }
  }

  quickcheck::quickcheck! {
    fn restore_inverts_substitute(text: String) -> bool {
      restore(&substitute(&text)) == text
    }
  }
}
