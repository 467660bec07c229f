//! State the host UI keeps for the snippet on screen.

use the_codec::{
  LangTag,
  SnippetPayload,
};
use the_snippet_event::{
  Generation,
  GenerationCounter,
};

/// Explicit session state, owned by the UI component and passed to its
/// handlers by reference.
#[derive(Debug, Default)]
pub struct SessionState {
  lang:       Option<LangTag>,
  /// The language was chosen by the user; detection no longer overrides it.
  lang_fixed: bool,
  read_only:  bool,
  generation: GenerationCounter,
}

impl SessionState {
  pub fn new() -> Self {
    Self::default()
  }

  /// Session for a snippet opened from a shared link.
  ///
  /// Shared snippets open read-only, and a language carried by the link
  /// counts as chosen.
  pub fn from_payload(payload: &SnippetPayload) -> Self {
    Self {
      lang: payload.lang.clone(),
      lang_fixed: payload.lang.is_some(),
      read_only: true,
      generation: GenerationCounter::new(),
    }
  }

  pub fn lang(&self) -> Option<&LangTag> {
    self.lang.as_ref()
  }

  pub fn is_lang_fixed(&self) -> bool {
    self.lang_fixed
  }

  /// Sets the language by user choice. `None` hands it back to detection.
  pub fn set_lang(&mut self, lang: Option<LangTag>) {
    self.lang_fixed = lang.is_some();
    self.lang = lang;
    self.generation.advance();
  }

  pub fn is_read_only(&self) -> bool {
    self.read_only
  }

  pub fn set_read_only(&mut self, read_only: bool) {
    self.read_only = read_only;
  }

  pub fn toggle_read_only(&mut self) -> bool {
    self.read_only = !self.read_only;
    self.read_only
  }

  /// Records an edit; detection results started earlier become stale.
  pub fn note_edit(&self) -> Generation {
    self.generation.advance()
  }

  /// Starts a detection run and returns the generation its result must
  /// present to [`Self::apply_detection`].
  pub fn begin_detection(&self) -> Generation {
    self.generation.advance()
  }

  /// Applies a detection result if nothing newer happened since it started.
  ///
  /// Returns whether the language was updated.
  pub fn apply_detection(&mut self, generation: Generation, lang: Option<LangTag>) -> bool {
    if self.lang_fixed {
      return false;
    }
    if !self.generation.is_current(generation) {
      tracing::debug!(
        stale = generation.get(),
        current = self.generation.current().get(),
        "discarding stale language detection"
      );
      return false;
    }
    self.lang = lang;
    true
  }
}
