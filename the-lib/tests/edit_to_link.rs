//! Typing in the editor ends up in the address bar once per burst.

use std::{
  sync::Arc,
  time::Duration,
};

use parking_lot::Mutex;
use the_codec::{
  LangTag,
  SnippetPayload,
};
use the_core::uri::PageUri;
use the_lib::{
  Location,
  MemoryLocation,
  SessionState,
  UrlBinder,
};
use the_snippet_event::{
  AsyncHook,
  Edit,
  EditDebouncer,
};

type SharedBinder = Arc<Mutex<UrlBinder<MemoryLocation>>>;

fn shared_binder(url: &str) -> SharedBinder {
  let page = PageUri::parse(url).unwrap();
  Arc::new(Mutex::new(UrlBinder::new(MemoryLocation::new(page))))
}

fn writer(binder: &SharedBinder) -> impl FnMut(Edit) + Send + Sync + 'static {
  let binder = Arc::clone(binder);
  move |edit: Edit| {
    binder.lock().write(&edit.code, edit.lang.as_ref()).unwrap();
  }
}

#[tokio::test(start_paused = true)]
async fn burst_of_edits_writes_last_state() {
  let binder = shared_binder("https://snippet.local/");
  let tx = EditDebouncer::new(Duration::from_millis(300), writer(&binder)).spawn();
  let rust = LangTag::new("rust").ok();

  for code in ["f", "fn", "fn main", "fn main() {}"] {
    tx.send(Edit::new(code, rust.clone())).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
  }
  assert_eq!(binder.lock().location().fragment(), None);

  tokio::time::sleep(Duration::from_millis(500)).await;
  let binder = binder.lock();
  assert_eq!(
    binder.read(),
    Some(SnippetPayload::new("fn main() {}", rust))
  );
  assert_eq!(binder.location().history_len(), 1);
}

#[test]
fn shared_link_reopens_read_only() {
  let source = shared_binder("https://snippet.local/app");
  source
    .lock()
    .write("SELECT 1;", LangTag::new("sql").ok().as_ref())
    .unwrap();
  let shared = source.lock().location().current().to_string();

  let opened = UrlBinder::new(MemoryLocation::new(PageUri::parse(&shared).unwrap()));
  let payload = opened.read().unwrap();
  let session = SessionState::from_payload(&payload);
  assert!(session.is_read_only());
  assert_eq!(session.lang().map(LangTag::as_str), Some("sql"));
  assert_eq!(payload.code, "SELECT 1;");
}
