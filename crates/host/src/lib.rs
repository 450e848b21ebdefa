//! Host-editor seam for the blacksort integration.
//!
//! The integration never talks to a concrete editor directly. Everything it
//! needs from a host is expressed here as small seams:
//!
//! - [`ConfigSource`]: read access to the host's settings store.
//! - [`TextBuffer`] / [`SharedBuffer`]: buffer text access and batched,
//!   diff-derived replacement via [`set_text_via_diff`].
//! - [`Hooks`]: runtime subscription to buffer lifecycle events.
//! - [`CommandRegistry`]: user-invocable commands scoped by content type.
//! - [`Subscriptions`]: the composite disposable that releases every
//!   registration together on teardown.
//!
//! A host embeds these registries and emits into them; tests drive them
//! directly with fake buffers and in-memory configuration.

pub mod buffer;
pub mod commands;
pub mod config;
pub mod diff;
pub mod dispose;
pub mod hooks;

pub use buffer::{SharedBuffer, TextBuffer, TextEdit, set_text_via_diff, shared};
pub use commands::{CommandRegistry, CommandSubscription};
pub use config::{ConfigSource, MapConfig};
pub use diff::text_diff;
pub use dispose::{Disposable, Subscriptions};
pub use hooks::{BoxFuture, HookAction, HookContext, HookEvent, HookResult, HookSubscription, Hooks};
