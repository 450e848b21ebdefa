//! Recognized configuration options.

use blacksort_host::ConfigSource;

/// Key for the semicolon-separated interpreter search paths.
pub const PYTHON_PATHS: &str = "blacksort.python-paths";
/// Key for the formatter ordering flag.
pub const BLACK_THEN_ISORT: &str = "blacksort.black-then-isort";
/// Key gating formatting on a discovered project configuration file.
pub const ONLY_WHEN_PROJECT_CONFIG: &str = "blacksort.only-when-project-config";
/// Key for format-on-save.
pub const RUN_ON_SAVE: &str = "blacksort.run-on-save";
/// Key for verbose debug output.
pub const DEBUG: &str = "blacksort.debug";

/// Snapshot of the recognized options.
///
/// Loaded fresh at every trigger so settings toggles take effect without
/// re-activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	/// Interpreter candidates, semicolon separated, first match wins.
	/// `$PROJECT_NAME` is the project's directory name, `$PROJECT` its full
	/// path.
	pub python_paths: String,
	/// Run black then isort instead of isort then black.
	pub black_then_isort: bool,
	/// Format only when a project configuration file is found.
	pub only_when_project_config: bool,
	/// Format automatically on file save.
	pub run_on_save: bool,
	/// Enable verbose debug output.
	pub debug: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			python_paths: String::new(),
			black_then_isort: false,
			only_when_project_config: true,
			run_on_save: true,
			debug: false,
		}
	}
}

impl Settings {
	/// Read the current option values, falling back to the defaults.
	pub fn load(config: &dyn ConfigSource) -> Self {
		let defaults = Self::default();
		Self {
			python_paths: config.get_str(PYTHON_PATHS).unwrap_or(defaults.python_paths),
			black_then_isort: config
				.get_bool(BLACK_THEN_ISORT)
				.unwrap_or(defaults.black_then_isort),
			only_when_project_config: config
				.get_bool(ONLY_WHEN_PROJECT_CONFIG)
				.unwrap_or(defaults.only_when_project_config),
			run_on_save: config.get_bool(RUN_ON_SAVE).unwrap_or(defaults.run_on_save),
			debug: config.get_bool(DEBUG).unwrap_or(defaults.debug),
		}
	}
}
