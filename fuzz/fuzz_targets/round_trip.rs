#![no_main]

mod common;

use libfuzzer_sys::fuzz_target;
use the_codec::SnippetPayload;
use the_core::normalize;

use crate::common::payload_from_bytes;

fuzz_target!(|data: &[u8]| {
  let Some((code, lang)) = payload_from_bytes(data) else {
    return;
  };
  let token = match the_codec::encode(&code, lang.as_ref()) {
    Ok(token) => token,
    Err(err) => panic!("encode failed: {err}"),
  };
  assert_eq!(
    the_codec::decode(token.as_str()),
    Some(SnippetPayload::new(normalize(&code), lang))
  );
});
