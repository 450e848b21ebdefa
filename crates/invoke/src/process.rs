//! Formatter pipeline over child processes.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::resolve::{candidate_paths, resolve_interpreter};
use crate::{Error, FormatRequest, FormatResponse, Invoker, Result};

/// Runs isort and black as child processes of a resolved Python interpreter.
///
/// Each request resolves the interpreter fresh from the search string it
/// carries (which may point at per-project virtualenvs via placeholders) and
/// pipes the source through `python -m <formatter> -` twice, in the requested
/// order. There is no timeout: a hung formatter hangs its one request,
/// matching the host's fire-and-forget dispatch. `kill_on_drop` keeps
/// abandoned requests from leaking children.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessInvoker;

impl ProcessInvoker {
	pub fn new() -> Self {
		Self
	}

	/// Project directory anchoring placeholder expansion and the formatters'
	/// working directory: the discovered root, or the buffer's directory when
	/// no root was found.
	fn project_path(request: &FormatRequest) -> PathBuf {
		request
			.project_root
			.clone()
			.or_else(|| request.path.as_deref().and_then(Path::parent).map(Path::to_path_buf))
			.unwrap_or_else(|| PathBuf::from("."))
	}

	/// Resolve the interpreter for one request.
	fn interpreter(request: &FormatRequest) -> Result<PathBuf> {
		let project_path = Self::project_path(request);
		let project_name = project_path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default();

		let candidates = candidate_paths(&request.python_paths, &project_name, &project_path);
		let probed = candidates.len();
		resolve_interpreter(&candidates).ok_or(Error::InterpreterNotFound { candidates: probed })
	}

	/// Pipe `input` through one formatter module and return its stdout.
	async fn run_module(python: &Path, cwd: Option<&Path>, module: &str, input: String) -> Result<String> {
		let program = format!("{} -m {module}", python.display());

		let mut cmd = Command::new(python);
		cmd.args(["-m", module, "--quiet", "-"])
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.kill_on_drop(true);
		if let Some(cwd) = cwd {
			cmd.current_dir(cwd);
		}

		let mut child = cmd.spawn().map_err(|source| Error::Spawn {
			program: program.clone(),
			source,
		})?;
		let mut stdin = child.stdin.take().ok_or_else(|| Error::Spawn {
			program: program.clone(),
			source: std::io::Error::other("failed to capture stdin"),
		})?;

		// Feed stdin while draining output; a formatter may start writing
		// before it has consumed all input.
		let feed = async {
			let written = stdin.write_all(input.as_bytes()).await;
			drop(stdin);
			written
		};
		let (written, output) = tokio::join!(feed, child.wait_with_output());
		written.map_err(|source| Error::Pipe {
			program: program.clone(),
			source,
		})?;
		let output = output.map_err(|source| Error::Pipe {
			program: program.clone(),
			source,
		})?;

		if !output.status.success() {
			return Err(Error::Failed {
				program,
				status: output.status,
				stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
			});
		}
		String::from_utf8(output.stdout).map_err(|_| Error::InvalidOutput { program })
	}
}

#[async_trait]
impl Invoker for ProcessInvoker {
	async fn fix(&self, request: FormatRequest) -> Result<FormatResponse> {
		let python = Self::interpreter(&request)?;
		let cwd = request.path.as_ref().map(|_| Self::project_path(&request));

		if tracing::enabled!(tracing::Level::DEBUG) {
			debug!(
				python = %python.display(),
				request = %serde_json::to_string(&request).unwrap_or_default(),
				"dispatching format request"
			);
		}

		let order = if request.black_then_isort {
			["black", "isort"]
		} else {
			["isort", "black"]
		};

		let mut text = request.source;
		for module in order {
			text = Self::run_module(&python, cwd.as_deref(), module, text).await?;
		}
		Ok(FormatResponse { text })
	}
}
