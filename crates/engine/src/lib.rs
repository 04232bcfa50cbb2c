//! Game-agnostic protocol machinery shared by the server crate.
//!
//! - [`codec`]: a bounds-checked read cursor for inbound packets and a
//!   writer for outbound replies.
//! - [`event`]: the cancellable event envelope and its ordered observer list.

pub mod codec;
pub mod event;
