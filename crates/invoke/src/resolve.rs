//! Interpreter path resolution.
//!
//! Pure candidate expansion plus an existence probe; no subprocess involved.

use std::path::{Path, PathBuf};

/// Expand a raw semicolon-separated search string into ordered candidates.
///
/// `$PROJECT_NAME` expands to the project's directory name and `$PROJECT` to
/// its full path. `$PROJECT_NAME` is substituted first since `$PROJECT` is a
/// prefix of it. Empty entries are dropped.
pub fn candidate_paths(raw: &str, project_name: &str, project_path: &Path) -> Vec<PathBuf> {
	raw.split(';')
		.map(str::trim)
		.filter(|entry| !entry.is_empty())
		.map(|entry| {
			let expanded = entry
				.replace("$PROJECT_NAME", project_name)
				.replace("$PROJECT", &project_path.to_string_lossy());
			PathBuf::from(expanded)
		})
		.collect()
}

/// Resolve the interpreter to run: the first candidate that exists on disk,
/// falling back to `python3` then `python` from PATH.
pub fn resolve_interpreter(candidates: &[PathBuf]) -> Option<PathBuf> {
	for candidate in candidates {
		if candidate.is_file() {
			return Some(candidate.clone());
		}
	}
	which::which("python3").or_else(|_| which::which("python")).ok()
}
