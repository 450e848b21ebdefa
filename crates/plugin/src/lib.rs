//! Python black/isort format-on-save integration.
//!
//! Buffers are formatted by piping their text through the external black and
//! isort binaries in a configurable order, either when the user invokes the
//! format command or automatically on save. The integration wires the host
//! seams together: it registers the command and the save watchers during
//! [`Plugin::activate`], and runs the format operation end to end — gate on
//! project configuration, dispatch to the invoker, write the result back
//! through minimal diff-derived edits. Every failure is reported to the log
//! and swallowed; a failed format never blocks the save.

pub mod project;
pub mod settings;

use std::sync::Arc;

use blacksort_host::{
	CommandRegistry, ConfigSource, HookAction, HookEvent, HookResult, Hooks, SharedBuffer,
	Subscriptions, set_text_via_diff,
};
use blacksort_invoke::{FormatRequest, Invoker, Operation};
use tracing::{debug, error};

pub use settings::Settings;

/// Id of the user-invocable format command.
pub const FORMAT_COMMAND: &str = "blacksort:format";
/// Content type the format command is scoped to.
pub const PYTHON_CONTENT_TYPE: &str = "python";

/// The integration: owns the config and invoker seams and registers against
/// a host's hook and command registries.
#[derive(Clone)]
pub struct Plugin {
	config: Arc<dyn ConfigSource>,
	invoker: Arc<dyn Invoker>,
}

impl Plugin {
	pub fn new(config: Arc<dyn ConfigSource>, invoker: Arc<dyn Invoker>) -> Self {
		Self { config, invoker }
	}

	/// Register the format command and the save watchers.
	///
	/// Every registration lands in the returned [`Subscriptions`]; disposing
	/// it is the whole teardown. Watchers attach per buffer: the buffer-open
	/// handler inspects the file name and only `.py`/`.pyi` buffers get a
	/// save watcher at all.
	pub fn activate(&self, hooks: &Hooks, commands: &CommandRegistry) -> Subscriptions {
		let subscriptions = Subscriptions::new();

		let plugin = self.clone();
		subscriptions.add(Box::new(commands.add(
			PYTHON_CONTENT_TYPE,
			FORMAT_COMMAND,
			move |buffer| {
				let plugin = plugin.clone();
				HookAction::Async(Box::pin(async move {
					plugin.format_buffer(buffer).await;
					HookResult::Continue
				}))
			},
		)));

		let plugin = self.clone();
		let save_hooks = hooks.clone();
		let save_subscriptions = subscriptions.clone();
		subscriptions.add(Box::new(hooks.subscribe(HookEvent::BufferOpen, move |ctx| {
			let Some(path) = ctx.buffer.lock().path() else {
				return HookAction::done();
			};
			let name = path
				.file_name()
				.map(|name| name.to_string_lossy().into_owned())
				.unwrap_or_default();
			if !name.ends_with(".py") && !name.ends_with(".pyi") {
				return HookAction::done();
			}

			let plugin = plugin.clone();
			let watched = path;
			save_subscriptions.add(Box::new(save_hooks.subscribe(
				HookEvent::BufferSave,
				move |save_ctx| {
					if save_ctx.buffer.lock().path().as_deref() != Some(watched.as_path()) {
						return HookAction::done();
					}
					let plugin = plugin.clone();
					let buffer = save_ctx.buffer.clone();
					HookAction::Async(Box::pin(async move {
						plugin.on_save(buffer).await;
						HookResult::Continue
					}))
				},
			)));
			HookAction::done()
		})));

		if Settings::load(self.config.as_ref()).debug {
			debug!("debug is on");
		}
		subscriptions
	}

	async fn on_save(&self, buffer: SharedBuffer) {
		let settings = Settings::load(self.config.as_ref());
		if !settings.run_on_save {
			return;
		}
		if settings.debug {
			if let Some(path) = buffer.lock().path() {
				debug!(path = %path.display(), "saved, formatting");
			}
		}
		self.format_buffer(buffer).await;
	}

	/// Format one buffer.
	///
	/// On success the buffer text is replaced through minimal edits; on any
	/// failure the buffer is left untouched and the error is reported exactly
	/// once. Never retried.
	pub async fn format_buffer(&self, buffer: SharedBuffer) {
		let settings = Settings::load(self.config.as_ref());
		match self.try_format(&buffer, &settings).await {
			Ok(Some(text)) => {
				set_text_via_diff(&mut *buffer.lock(), &text);
				if settings.debug {
					debug!(bytes = text.len(), "formatted");
				}
			}
			Ok(None) => {
				if settings.debug {
					debug!("no project configuration found, skipping");
				}
			}
			Err(err) => error!(error = %err, "python black isort error"),
		}
	}

	/// Run the gate and the invoker. `Ok(None)` means the gate skipped the
	/// request before any subprocess was involved.
	async fn try_format(
		&self,
		buffer: &SharedBuffer,
		settings: &Settings,
	) -> blacksort_invoke::Result<Option<String>> {
		let (source, path) = {
			let buffer = buffer.lock();
			(buffer.text(), buffer.path())
		};
		let project_root = path.as_deref().map(project::find_project_root);

		if settings.only_when_project_config {
			let configured = project_root
				.as_deref()
				.is_some_and(project::has_formatter_config);
			if !configured {
				return Ok(None);
			}
		}

		let request = FormatRequest {
			op: Operation::Fix,
			source,
			black_then_isort: settings.black_then_isort,
			python_paths: settings.python_paths.clone(),
			path,
			project_root,
		};
		let response = self.invoker.fix(request).await?;
		Ok(Some(response.text))
	}
}
