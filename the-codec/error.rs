use std::{
  io,
  string::FromUtf8Error,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
  #[error("token is empty")]
  Empty,
  #[error("token is not valid base64url: {0}")]
  Base64(#[from] base64::DecodeError),
  #[error("failed to compress snippet: {0}")]
  Compress(#[source] io::Error),
  #[error("failed to decompress token: {0}")]
  Decompress(#[source] io::Error),
  #[error("token carries {len} bytes after the end of the compressed stream")]
  TrailingData { len: usize },
  #[error("decoded snippet exceeds {limit} bytes")]
  TooLarge { limit: usize },
  #[error("decoded snippet is not UTF-8: {0}")]
  Utf8(#[from] FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
