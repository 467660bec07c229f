//! Brotli stage of the pipeline.

use std::io::{
  self,
  Write,
};

use brotli::{
  BrotliDecompressStream,
  BrotliResult,
  BrotliState,
  enc::StandardAlloc,
};

use crate::error::{
  CodecError,
  Result,
};

/// Brotli quality level; 11 is the densest setting.
pub const QUALITY: u32 = 11;

/// Base-2 logarithm of the sliding window size.
pub const LG_WINDOW: u32 = 22;

/// Upper bound on decompressed output. Anything larger is rejected.
pub const MAX_DECODED_LEN: usize = 1 << 20;

const BUFFER_SIZE: usize = 4096;

pub fn compress(bytes: &[u8]) -> Result<Vec<u8>> {
  let mut out = Vec::with_capacity(bytes.len() / 2 + 16);
  {
    // The stream is finished when the writer drops.
    let mut writer = brotli::CompressorWriter::new(&mut out, BUFFER_SIZE, QUALITY, LG_WINDOW);
    writer.write_all(bytes).map_err(CodecError::Compress)?;
  }
  Ok(out)
}

/// Decompresses `bytes`, failing once the output would pass `limit` bytes.
///
/// The stream must end exactly at the end of `bytes`; anything after the
/// final meta-block is rejected as [`CodecError::TrailingData`].
pub fn decompress(bytes: &[u8], limit: usize) -> Result<Vec<u8>> {
  let mut state = BrotliState::new(
    StandardAlloc::default(),
    StandardAlloc::default(),
    StandardAlloc::default(),
  );
  let mut available_in = bytes.len();
  let mut input_offset = 0;
  let mut total_out = 0;
  let mut buffer = [0u8; BUFFER_SIZE];
  let mut out = Vec::new();

  loop {
    let mut available_out = buffer.len();
    let mut output_offset = 0;
    let result = BrotliDecompressStream(
      &mut available_in,
      &mut input_offset,
      bytes,
      &mut available_out,
      &mut output_offset,
      &mut buffer,
      &mut total_out,
      &mut state,
    );
    out.extend_from_slice(&buffer[..output_offset]);
    if out.len() > limit {
      return Err(CodecError::TooLarge { limit });
    }

    match result {
      BrotliResult::ResultSuccess => break,
      BrotliResult::NeedsMoreOutput => {},
      BrotliResult::NeedsMoreInput => {
        return Err(CodecError::Decompress(io::Error::new(
          io::ErrorKind::UnexpectedEof,
          "brotli stream ends early",
        )));
      },
      BrotliResult::ResultFailure => {
        return Err(CodecError::Decompress(io::Error::new(
          io::ErrorKind::InvalidData,
          "malformed brotli stream",
        )));
      },
    }
  }

  if available_in != 0 {
    return Err(CodecError::TrailingData { len: available_in });
  }
  Ok(out)
}
