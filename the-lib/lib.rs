//! Binds a snippet editor to the page URL.
//!
//! [`binder::UrlBinder`] writes the encoded snippet into the fragment of a
//! [`location::Location`] and reads it back on load. [`session::SessionState`]
//! holds what the host UI tracks around it.

pub mod binder;
pub mod link;
pub mod location;
pub mod messages;
pub mod session;

pub use crate::{
  binder::{
    BinderError,
    UrlBinder,
  },
  link::UrlStatus,
  location::{
    Location,
    MemoryLocation,
    NoLocation,
  },
  session::SessionState,
};
