//! Runtime hook registry for buffer lifecycle events.
//!
//! Handlers are registered while the host runs and removed by disposing the
//! returned subscription. A handler either completes synchronously or hands
//! back a future; [`Hooks::emit`] awaits async handlers in subscription
//! order, so one save event's formatting runs to completion before later
//! handlers see the event.

use std::collections::BTreeMap;
use std::pin::Pin;
use std::sync::{Arc, Weak};

use futures::future::Future;
use parking_lot::Mutex;
use tracing::trace;

use crate::buffer::SharedBuffer;
use crate::dispose::Disposable;

/// Events a host emits to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
	/// A buffer was opened or created.
	BufferOpen,
	/// A buffer was written to disk.
	BufferSave,
}

impl HookEvent {
	pub fn as_str(&self) -> &'static str {
		match self {
			HookEvent::BufferOpen => "buffer:open",
			HookEvent::BufferSave => "buffer:save",
		}
	}
}

/// Context passed to hook handlers.
#[derive(Clone)]
pub struct HookContext {
	/// The event being emitted.
	pub event: HookEvent,
	/// The buffer the event concerns.
	pub buffer: SharedBuffer,
}

/// Result of a hook execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookResult {
	/// Continue emission to later handlers.
	#[default]
	Continue,
	/// Stop emission to later handlers.
	Stop,
}

/// A boxed future that resolves to a [`HookResult`].
pub type BoxFuture = Pin<Box<dyn Future<Output = HookResult> + Send + 'static>>;

/// Action returned by a hook handler.
///
/// Handlers return this to indicate whether they completed synchronously or
/// need async work.
pub enum HookAction {
	/// Handler completed synchronously with the given result.
	Done(HookResult),
	/// Handler needs async work. The future will be awaited.
	Async(BoxFuture),
}

impl HookAction {
	/// Sync completion that continues emission.
	pub fn done() -> Self {
		HookAction::Done(HookResult::Continue)
	}
}

type Handler = Arc<dyn Fn(&HookContext) -> HookAction + Send + Sync>;

#[derive(Default)]
struct Registry {
	next_id: u64,
	handlers: BTreeMap<u64, (HookEvent, Handler)>,
}

/// Runtime hook registry with unsubscription.
#[derive(Clone, Default)]
pub struct Hooks {
	registry: Arc<Mutex<Registry>>,
}

impl Hooks {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a handler for an event.
	///
	/// The handler stays live until the returned subscription is disposed;
	/// merely dropping the subscription keeps it registered.
	pub fn subscribe<F>(&self, event: HookEvent, handler: F) -> HookSubscription
	where
		F: Fn(&HookContext) -> HookAction + Send + Sync + 'static,
	{
		let mut registry = self.registry.lock();
		let id = registry.next_id;
		registry.next_id += 1;
		registry.handlers.insert(id, (event, Arc::new(handler)));
		HookSubscription {
			id,
			registry: Arc::downgrade(&self.registry),
		}
	}

	/// Emit an event, running handlers in subscription order.
	///
	/// Handler clones are collected before any handler runs, so handlers may
	/// subscribe or dispose re-entrantly without deadlocking. Returns
	/// [`HookResult::Stop`] as soon as any handler stops emission.
	pub async fn emit(&self, ctx: &HookContext) -> HookResult {
		let matching: Vec<Handler> = {
			let registry = self.registry.lock();
			registry
				.handlers
				.values()
				.filter(|(event, _)| *event == ctx.event)
				.map(|(_, handler)| handler.clone())
				.collect()
		};
		trace!(event = ctx.event.as_str(), handlers = matching.len(), "emitting hook event");

		for handler in matching {
			let result = match handler(ctx) {
				HookAction::Done(result) => result,
				HookAction::Async(fut) => fut.await,
			};
			if result == HookResult::Stop {
				return HookResult::Stop;
			}
		}
		HookResult::Continue
	}

	/// Number of live handlers.
	pub fn handler_count(&self) -> usize {
		self.registry.lock().handlers.len()
	}
}

/// Subscription handle that removes its handler on dispose.
pub struct HookSubscription {
	id: u64,
	registry: Weak<Mutex<Registry>>,
}

impl Disposable for HookSubscription {
	fn dispose(&mut self) {
		if let Some(registry) = self.registry.upgrade() {
			registry.lock().handlers.remove(&self.id);
		}
	}
}
