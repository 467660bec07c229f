//! Debounced delivery of editor changes to a synchronous sink.

use std::time::Duration;

use futures_executor::block_on;
use the_codec::LangTag;
use tokio::{
  runtime::Handle,
  sync::mpsc::{
    self,
    Receiver,
    Sender,
    error::TrySendError,
  },
  time::Instant,
};

/// Edits queued ahead of the worker before senders see a full channel.
const CHANNEL_CAPACITY: usize = 256;

/// Longest a synchronous caller waits on a full channel before the event is
/// dropped.
const FULL_CHANNEL_WAIT: Duration = Duration::from_millis(2);

/// Quiet period after the last keystroke before a link is rewritten.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// A hook fed by a channel and driven by a background tokio task.
///
/// Each event goes through `handle_event`, which arms, moves or clears the
/// deadline. `finish_debounce` runs when an armed deadline passes with no
/// newer event, and once more on shutdown if a deadline is still armed.
pub trait AsyncHook: Send + Sync + Sized + 'static {
  type Event: Send + Sync + 'static;

  /// Takes one event. `armed` is the current deadline, if any; the return
  /// value replaces it.
  fn handle_event(&mut self, event: Self::Event, armed: Option<Instant>) -> Option<Instant>;

  fn finish_debounce(&mut self);

  /// Starts the worker and returns the sending half of its channel.
  ///
  /// Outside a tokio runtime no worker starts; the receiver is dropped and
  /// every send is refused.
  fn spawn(self) -> Sender<Self::Event> {
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    match Handle::try_current() {
      Ok(handle) => {
        handle.spawn(drive(self, rx));
      },
      Err(_) => log::debug!("no tokio runtime, debounced hook is inert"),
    }
    tx
  }
}

async fn drive<H: AsyncHook>(mut hook: H, mut rx: Receiver<H::Event>) {
  let mut deadline = None;
  loop {
    tokio::select! {
      event = rx.recv() => match event {
        Some(event) => deadline = hook.handle_event(event, deadline),
        None => break,
      },
      () = elapsed(deadline) => {
        deadline = None;
        hook.finish_debounce();
      },
    }
  }

  if deadline.is_some() {
    hook.finish_debounce();
  }
}

/// Resolves at `deadline`; never resolves when nothing is armed.
async fn elapsed(deadline: Option<Instant>) {
  match deadline {
    Some(deadline) => tokio::time::sleep_until(deadline).await,
    None => std::future::pending().await,
  }
}

/// One change to the snippet being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
  pub code: String,
  pub lang: Option<LangTag>,
}

impl Edit {
  pub fn new(code: impl Into<String>, lang: Option<LangTag>) -> Self {
    Self {
      code: code.into(),
      lang,
    }
  }
}

/// Collapses a burst of edits into one call of `sink` with the newest edit.
///
/// Every incoming edit replaces the pending one and restarts the quiet
/// period, so the sink (typically a link write) runs once per burst.
pub struct EditDebouncer<F> {
  quiet:   Duration,
  pending: Option<Edit>,
  sink:    F,
}

impl<F> EditDebouncer<F>
where
  F: FnMut(Edit) + Send + Sync + 'static,
{
  pub fn new(quiet: Duration, sink: F) -> Self {
    Self {
      quiet,
      pending: None,
      sink,
    }
  }

  pub fn with_default_quiet_period(sink: F) -> Self {
    Self::new(DEFAULT_QUIET_PERIOD, sink)
  }
}

impl<F> AsyncHook for EditDebouncer<F>
where
  F: FnMut(Edit) + Send + Sync + 'static,
{
  type Event = Edit;

  fn handle_event(&mut self, edit: Edit, _armed: Option<Instant>) -> Option<Instant> {
    if self.pending.replace(edit).is_some() {
      log::trace!("superseded pending edit");
    }
    Some(Instant::now() + self.quiet)
  }

  fn finish_debounce(&mut self) {
    if let Some(edit) = self.pending.take() {
      (self.sink)(edit);
    }
  }
}

/// Queues `event` from synchronous code.
///
/// A full channel gets [`FULL_CHANNEL_WAIT`] to drain; after that, when
/// the worker is gone, or when there is no runtime to time the wait, the
/// event is dropped with a warning.
pub fn send_blocking<T>(tx: &Sender<T>, event: T) {
  let event = match tx.try_send(event) {
    Ok(()) => return,
    Err(TrySendError::Full(event)) => event,
    Err(TrySendError::Closed(_)) => {
      log::warn!("hook channel closed, dropping event");
      return;
    },
  };
  if Handle::try_current().is_err() {
    log::warn!("hook channel full, dropping event");
    return;
  }
  if let Err(err) = block_on(tx.send_timeout(event, FULL_CHANNEL_WAIT)) {
    log::warn!("dropping event: {err}");
  }
}

/// Queues `event` only if there is room right now. Returns whether it was
/// queued.
pub fn try_send<T>(tx: &Sender<T>, event: T) -> bool {
  tx.try_send(event).is_ok()
}
