mod debounce;
pub mod generation;

pub use debounce::{
  AsyncHook,
  DEFAULT_QUIET_PERIOD,
  Edit,
  EditDebouncer,
  send_blocking,
  try_send,
};
pub use generation::{
  Generation,
  GenerationCounter,
};
