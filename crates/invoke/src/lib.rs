//! Subprocess boundary for the black/isort pipeline.
//!
//! The integration hands an [`Invoker`] a [`FormatRequest`] and gets back the
//! formatted text. [`ProcessInvoker`] is the production implementation,
//! running the formatters as child processes of a resolved Python
//! interpreter; tests substitute mocks at this seam. The request/response
//! records are an internal detail of that call, not a stable protocol.

mod process;
mod resolve;

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use process::ProcessInvoker;
pub use resolve::{candidate_paths, resolve_interpreter};

/// Operation requested from the formatter boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
	/// Run both formatters over the source and return the result.
	Fix,
}

/// One formatting request: a buffer snapshot plus dispatch flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatRequest {
	/// Operation tag.
	pub op: Operation,
	/// Current buffer text.
	pub source: String,
	/// Run black before isort instead of isort before black.
	pub black_then_isort: bool,
	/// Raw semicolon-separated interpreter search string, read from the
	/// configuration at the trigger so edits apply to the next request.
	pub python_paths: String,
	/// Path backing the buffer.
	pub path: Option<PathBuf>,
	/// Discovered project root; anchors `$PROJECT`/`$PROJECT_NAME` expansion
	/// and the formatters' working directory.
	pub project_root: Option<PathBuf>,
}

/// Result of a successful request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatResponse {
	/// The formatted source text.
	pub text: String,
}

/// Errors crossing the subprocess boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// No usable interpreter among the configured candidates or on PATH.
	#[error("no python interpreter found ({candidates} configured candidate(s))")]
	InterpreterNotFound {
		/// How many configured candidates were probed.
		candidates: usize,
	},
	/// The child process could not be started.
	#[error("failed to spawn {program}: {source}")]
	Spawn {
		program: String,
		#[source]
		source: std::io::Error,
	},
	/// I/O on the child's pipes failed.
	#[error("i/o error talking to {program}: {source}")]
	Pipe {
		program: String,
		#[source]
		source: std::io::Error,
	},
	/// The formatter exited with a failure status.
	#[error("{program} exited with {status}: {stderr}")]
	Failed {
		program: String,
		status: std::process::ExitStatus,
		stderr: String,
	},
	/// The formatter produced output that is not valid UTF-8.
	#[error("{program} produced non-utf-8 output")]
	InvalidOutput { program: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boundary that turns a [`FormatRequest`] into formatted text.
///
/// The caller decides the formatter order through the request and never
/// reorders results itself.
#[async_trait]
pub trait Invoker: Send + Sync {
	/// Execute the request and return the formatted source.
	async fn fix(&self, request: FormatRequest) -> Result<FormatResponse>;
}
