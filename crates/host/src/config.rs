//! Configuration seam consumed by the integration.

use std::collections::HashMap;

/// Read access to a host's settings store.
///
/// Callers re-read values at each trigger rather than caching them, so a
/// toggle in the host's settings UI takes effect on the next save.
pub trait ConfigSource: Send + Sync {
	/// String value for a key, if set.
	fn get_str(&self, key: &str) -> Option<String>;

	/// Boolean value for a key, if set.
	fn get_bool(&self, key: &str) -> Option<bool>;
}

/// In-memory configuration for tests and hosts without a settings store.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
	strings: HashMap<String, String>,
	bools: HashMap<String, bool>,
}

impl MapConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_str(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.strings.insert(key.into(), value.into());
		self
	}

	pub fn set_bool(&mut self, key: impl Into<String>, value: bool) -> &mut Self {
		self.bools.insert(key.into(), value);
		self
	}
}

impl ConfigSource for MapConfig {
	fn get_str(&self, key: &str) -> Option<String> {
		self.strings.get(key).cloned()
	}

	fn get_bool(&self, key: &str) -> Option<bool> {
		self.bools.get(key).copied()
	}
}
