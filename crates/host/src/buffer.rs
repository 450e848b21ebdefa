//! Buffer seam: text access and diff-based replacement.

use std::ops::Range;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::diff::text_diff;

/// A single text replacement over a char range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
	/// Char range in the text the edit batch was computed against.
	pub range: Range<usize>,
	/// Replacement text.
	pub replacement: String,
}

/// Host-owned editor buffer.
///
/// All edits in one [`TextBuffer::apply_edits`] batch address the text as it
/// was before the batch. Hosts remap cursor and selection through the applied
/// edits, which is what keeps positions stable around untouched regions.
pub trait TextBuffer: Send {
	/// File path backing the buffer, if any.
	fn path(&self) -> Option<PathBuf>;

	/// Content type detected by the host (e.g. `"python"`).
	fn file_type(&self) -> Option<String>;

	/// Current buffer text.
	fn text(&self) -> String;

	/// Apply a batch of non-overlapping edits sorted by start offset.
	fn apply_edits(&mut self, edits: &[TextEdit]);
}

/// A buffer shared between the host and in-flight operations.
pub type SharedBuffer = Arc<Mutex<dyn TextBuffer>>;

/// Wrap a buffer for sharing with async operations.
pub fn shared<B: TextBuffer + 'static>(buffer: B) -> SharedBuffer {
	Arc::new(Mutex::new(buffer))
}

/// Replace buffer contents with `new_text` using minimal line-level edits.
///
/// Equal texts produce no edit batch at all; otherwise only changed hunks
/// are rewritten.
pub fn set_text_via_diff(buffer: &mut dyn TextBuffer, new_text: &str) {
	let old = buffer.text();
	if old == new_text {
		return;
	}
	let edits = text_diff(&old, new_text);
	buffer.apply_edits(&edits);
}
