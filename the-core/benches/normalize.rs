//! Benchmarks for snippet normalization in the-core.
//!
//! Run with: `cargo bench -p the-core --bench normalize`

use divan::{
  Bencher,
  black_box,
};
use the_core::{
  line_ending::{
    auto_detect_line_ending,
    normalize_line_endings,
  },
  normalize,
};

fn main() {
  divan::main();
}

fn source(lines: usize, eol: &str) -> String {
  let mut text = String::new();
  for i in 0..lines {
    text.push_str("    let value = compute(");
    text.push_str(&i.to_string());
    text.push_str(");   ");
    text.push_str(eol);
    if i % 7 == 0 {
      text.push_str(eol);
      text.push_str(eol);
      text.push_str(eol);
    }
  }
  text
}

// ─────────────────────────────────────────────────────────────────────────────
// line ending conversion
// ─────────────────────────────────────────────────────────────────────────────

mod line_endings {
  use super::*;

  #[divan::bench(args = [10, 100, 1000])]
  fn lf_borrowed(bencher: Bencher, lines: usize) {
    let text = source(lines, "\n");
    bencher.bench(|| normalize_line_endings(black_box(&text)).len());
  }

  #[divan::bench(args = [10, 100, 1000])]
  fn crlf_rewritten(bencher: Bencher, lines: usize) {
    let text = source(lines, "\r\n");
    bencher.bench(|| normalize_line_endings(black_box(&text)).len());
  }

  #[divan::bench]
  fn autodetect(bencher: Bencher) {
    let text = source(200, "\r\n");
    bencher.bench(|| auto_detect_line_ending(black_box(&text)));
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// full normalization
// ─────────────────────────────────────────────────────────────────────────────

mod full {
  use super::*;

  #[divan::bench(args = [10, 100, 1000])]
  fn unix(bencher: Bencher, lines: usize) {
    let text = source(lines, "\n");
    bencher.bench(|| normalize(black_box(&text)));
  }

  #[divan::bench(args = [10, 100, 1000])]
  fn windows(bencher: Bencher, lines: usize) {
    let text = source(lines, "\r\n");
    bencher.bench(|| normalize(black_box(&text)));
  }
}
