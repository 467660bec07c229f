//! Address bar abstraction for `the-lib`.
//!
//! The lib only defines the interface and an in-memory implementation.
//! Browser or desktop hosts provide their own, backed by the real location
//! and history APIs.

use std::borrow::Cow;

use the_core::uri::PageUri;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocationError {
  #[error("location does not accept fragment updates")]
  ReadOnly,
  #[error("location error: {0}")]
  Platform(String),
}

pub type Result<T> = std::result::Result<T, LocationError>;

/// The page the snippet link lives on.
pub trait Location {
  fn name(&self) -> Cow<'_, str>;

  /// Origin and path of the current page, without query or fragment.
  fn base(&self) -> Cow<'_, str>;

  /// The current fragment. A leading `#` is tolerated by readers.
  fn fragment(&self) -> Option<Cow<'_, str>>;

  /// Replaces the fragment in place, without adding a history entry.
  fn replace_fragment(&mut self, fragment: &str) -> Result<()>;
}

impl<L: Location + ?Sized> Location for &mut L {
  fn name(&self) -> Cow<'_, str> {
    (**self).name()
  }

  fn base(&self) -> Cow<'_, str> {
    (**self).base()
  }

  fn fragment(&self) -> Option<Cow<'_, str>> {
    (**self).fragment()
  }

  fn replace_fragment(&mut self, fragment: &str) -> Result<()> {
    (**self).replace_fragment(fragment)
  }
}

/// A location with no page behind it; links can be computed but not stored.
#[derive(Debug, Default)]
pub struct NoLocation;

impl Location for NoLocation {
  fn name(&self) -> Cow<'_, str> {
    "none".into()
  }

  fn base(&self) -> Cow<'_, str> {
    "".into()
  }

  fn fragment(&self) -> Option<Cow<'_, str>> {
    None
  }

  fn replace_fragment(&mut self, _fragment: &str) -> Result<()> {
    Err(LocationError::ReadOnly)
  }
}

/// An address bar held in memory, with a navigation history.
///
/// `navigate` pushes a history entry; `replace_fragment` never does.
#[derive(Debug, Clone)]
pub struct MemoryLocation {
  current: PageUri,
  history: Vec<PageUri>,
}

impl MemoryLocation {
  pub fn new(page: PageUri) -> Self {
    Self {
      current: page,
      history: Vec::new(),
    }
  }

  pub fn current(&self) -> &PageUri {
    &self.current
  }

  pub fn navigate(&mut self, page: PageUri) {
    let previous = std::mem::replace(&mut self.current, page);
    self.history.push(previous);
  }

  /// Pages navigated away from, oldest first.
  pub fn history(&self) -> &[PageUri] {
    &self.history
  }

  /// Number of entries including the current page.
  pub fn history_len(&self) -> usize {
    self.history.len() + 1
  }
}

impl Location for MemoryLocation {
  fn name(&self) -> Cow<'_, str> {
    "memory".into()
  }

  fn base(&self) -> Cow<'_, str> {
    self.current.base().into()
  }

  fn fragment(&self) -> Option<Cow<'_, str>> {
    self.current.fragment().map(Cow::Borrowed)
  }

  fn replace_fragment(&mut self, fragment: &str) -> Result<()> {
    self.current.set_fragment(Some(fragment));
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn page(s: &str) -> PageUri {
    PageUri::parse(s).unwrap()
  }

  #[test]
  fn replace_does_not_grow_history() {
    let mut location = MemoryLocation::new(page("https://snippet.dev/"));
    location.replace_fragment("abc").unwrap();
    location.replace_fragment("def").unwrap();
    assert_eq!(location.history_len(), 1);
    assert_eq!(location.fragment().as_deref(), Some("def"));
    assert_eq!(location.current().as_str(), "https://snippet.dev/#def");
  }

  #[test]
  fn navigate_grows_history() {
    let mut location = MemoryLocation::new(page("https://snippet.dev/"));
    location.navigate(page("https://snippet.dev/#xyz"));
    assert_eq!(location.history_len(), 2);
    assert_eq!(location.history()[0].as_str(), "https://snippet.dev/");
    assert_eq!(location.base(), "https://snippet.dev/");
  }

  #[test]
  fn no_location_rejects_writes() {
    let mut location = NoLocation;
    assert!(matches!(
      location.replace_fragment("abc"),
      Err(LocationError::ReadOnly)
    ));
    assert_eq!(location.fragment(), None);
  }
}
