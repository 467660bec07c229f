#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
  let Ok(token) = std::str::from_utf8(data) else {
    return;
  };
  // Hostile fragments must decode to `None`, never panic; anything that does
  // decode must be stable under a re-encode.
  let Some(payload) = the_codec::decode(token) else {
    return;
  };
  let Ok(again) = the_codec::encode(&payload.code, payload.lang.as_ref()) else {
    return;
  };
  let reread = the_codec::decode(again.as_str()).map(|p| p.lang);
  assert_eq!(reread, Some(payload.lang));
});
