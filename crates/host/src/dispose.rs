//! Disposable registrations and the composite that releases them together.

use std::sync::Arc;

use parking_lot::Mutex;

/// A registration that can be released.
pub trait Disposable: Send {
	/// Release the registration. Implementations must be idempotent.
	fn dispose(&mut self);
}

/// Clone-able composite of disposables released together on teardown.
///
/// Activation code adds every hook and command registration here and the
/// host disposes the composite once on shutdown. Handlers may add further
/// registrations while events are in flight (the buffer-open watcher attaches
/// per-buffer save watchers), so the composite is interior-mutable and cheap
/// to clone.
#[derive(Clone, Default)]
pub struct Subscriptions {
	inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
	items: Vec<Box<dyn Disposable>>,
	disposed: bool,
}

impl Subscriptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a registration to the composite.
	///
	/// Adding to an already-disposed composite releases the item immediately
	/// instead of retaining it, so late registrations cannot outlive a
	/// teardown that has already happened.
	pub fn add(&self, item: Box<dyn Disposable>) {
		let mut item = item;
		{
			let mut inner = self.inner.lock();
			if !inner.disposed {
				inner.items.push(item);
				return;
			}
		}
		item.dispose();
	}

	/// Release every held registration.
	pub fn dispose(&self) {
		let items = {
			let mut inner = self.inner.lock();
			inner.disposed = true;
			std::mem::take(&mut inner.items)
		};
		for mut item in items {
			item.dispose();
		}
	}

	/// Number of live registrations.
	pub fn len(&self) -> usize {
		self.inner.lock().items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
