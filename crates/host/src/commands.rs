//! User-invocable commands scoped by buffer content type.

use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tracing::debug;

use crate::buffer::SharedBuffer;
use crate::dispose::Disposable;
use crate::hooks::HookAction;

type Handler = Arc<dyn Fn(SharedBuffer) -> HookAction + Send + Sync>;

struct Entry {
	name: String,
	content_type: String,
	handler: Handler,
}

#[derive(Default)]
struct Registry {
	next_id: u64,
	entries: BTreeMap<u64, Entry>,
}

/// Registry of named commands, each scoped to one content type.
///
/// The host dispatches a command against its active buffer; the handler only
/// runs when the buffer's detected content type matches the registration.
#[derive(Clone, Default)]
pub struct CommandRegistry {
	registry: Arc<Mutex<Registry>>,
}

impl CommandRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a command for buffers of the given content type.
	pub fn add<F>(&self, content_type: &str, name: &str, handler: F) -> CommandSubscription
	where
		F: Fn(SharedBuffer) -> HookAction + Send + Sync + 'static,
	{
		let mut registry = self.registry.lock();
		let id = registry.next_id;
		registry.next_id += 1;
		registry.entries.insert(
			id,
			Entry {
				name: name.to_string(),
				content_type: content_type.to_string(),
				handler: Arc::new(handler),
			},
		);
		CommandSubscription {
			id,
			registry: Arc::downgrade(&self.registry),
		}
	}

	/// Dispatch a command against a buffer.
	///
	/// Returns `false` when the command is unknown or the buffer's content
	/// type does not match its registration; async handlers are awaited.
	pub async fn dispatch(&self, name: &str, buffer: SharedBuffer) -> bool {
		let handler = {
			let registry = self.registry.lock();
			let file_type = buffer.lock().file_type();
			registry
				.entries
				.values()
				.find(|entry| entry.name == name && file_type.as_deref() == Some(entry.content_type.as_str()))
				.map(|entry| entry.handler.clone())
		};
		let Some(handler) = handler else {
			debug!(command = name, "command not dispatched");
			return false;
		};
		match handler(buffer) {
			HookAction::Done(_) => {}
			HookAction::Async(fut) => {
				fut.await;
			}
		}
		true
	}

	/// Number of live registrations.
	pub fn command_count(&self) -> usize {
		self.registry.lock().entries.len()
	}
}

/// Subscription handle that removes its command on dispose.
pub struct CommandSubscription {
	id: u64,
	registry: Weak<Mutex<Registry>>,
}

impl Disposable for CommandSubscription {
	fn dispose(&mut self) {
		if let Some(registry) = self.registry.upgrade() {
			registry.lock().entries.remove(&self.id);
		}
	}
}
