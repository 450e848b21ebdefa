//! Project root and formatter configuration discovery.
//!
//! The format gate needs to know whether the file being formatted belongs to
//! a project that actually configures black or isort. Recognized markers:
//! `pyproject.toml` with a non-empty `[tool.black]` or `[tool.isort]`
//! section, an `.isort.cfg` file, or a `setup.cfg` with an `[isort]` or
//! `[tool:isort]` section.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

/// Directory entries that mark a project root during the upward walk.
const ROOT_MARKERS: [&str; 4] = ["pyproject.toml", "setup.cfg", ".isort.cfg", ".git"];

/// Find the project root for a file: the nearest ancestor directory holding
/// one of the root markers, else the top of the walk.
pub fn find_project_root(path: &Path) -> PathBuf {
	let start = if path.is_dir() {
		path
	} else {
		path.parent().unwrap_or(path)
	};
	let mut top = start.to_path_buf();
	for dir in start.ancestors() {
		if ROOT_MARKERS.iter().any(|marker| dir.join(marker).exists()) {
			return dir.to_path_buf();
		}
		top = dir.to_path_buf();
	}
	top
}

/// True when the project root carries configuration for either formatter.
pub fn has_formatter_config(root: &Path) -> bool {
	if pyproject_configures_formatters(&root.join("pyproject.toml")) {
		return true;
	}
	if root.join(".isort.cfg").is_file() {
		return true;
	}
	setup_cfg_has_isort_section(&root.join("setup.cfg"))
}

#[derive(Debug, Default, Deserialize)]
struct PyProject {
	#[serde(default)]
	tool: ToolSections,
}

#[derive(Debug, Default, Deserialize)]
struct ToolSections {
	black: Option<toml::Value>,
	isort: Option<toml::Value>,
}

fn pyproject_configures_formatters(path: &Path) -> bool {
	let Ok(raw) = std::fs::read_to_string(path) else {
		return false;
	};
	let pyproject: PyProject = match toml::from_str(&raw) {
		Ok(pyproject) => pyproject,
		Err(err) => {
			debug!(path = %path.display(), error = %err, "unparseable pyproject.toml");
			return false;
		}
	};
	[&pyproject.tool.black, &pyproject.tool.isort].into_iter().any(|section| {
		section
			.as_ref()
			.and_then(toml::Value::as_table)
			.is_some_and(|table| !table.is_empty())
	})
}

/// `setup.cfg` is INI; a section-header scan is all the detection needs.
fn setup_cfg_has_isort_section(path: &Path) -> bool {
	let Ok(raw) = std::fs::read_to_string(path) else {
		return false;
	};
	raw.lines()
		.map(str::trim)
		.any(|line| line == "[isort]" || line == "[tool:isort]")
}
