//! Line-level text diff producing minimal [`TextEdit`] batches.

use imara_diff::Algorithm;
use imara_diff::intern::InternedInput;
use imara_diff::sources::lines_with_terminator;

use crate::buffer::TextEdit;

/// Compute line-level edits transforming `old` into `new`.
///
/// Ranges are char offsets into `old`; edits are non-overlapping and sorted
/// by start offset. Lines keep their terminators during tokenization, so
/// concatenating unchanged regions with replacements reproduces `new`
/// exactly, including any missing trailing newline.
pub fn text_diff(old: &str, new: &str) -> Vec<TextEdit> {
	let input = InternedInput::new(lines_with_terminator(old), lines_with_terminator(new));

	// Char offset of each old line start, plus the end-of-text offset.
	let mut line_starts = Vec::with_capacity(input.before.len() + 1);
	let mut offset = 0usize;
	for &token in &input.before {
		line_starts.push(offset);
		offset += input.interner[token].chars().count();
	}
	line_starts.push(offset);

	let mut edits = Vec::new();
	imara_diff::diff(
		Algorithm::Histogram,
		&input,
		|before: std::ops::Range<u32>, after: std::ops::Range<u32>| {
			let replacement: String = input.after[after.start as usize..after.end as usize]
				.iter()
				.map(|&token| input.interner[token])
				.collect();
			edits.push(TextEdit {
				range: line_starts[before.start as usize]..line_starts[before.end as usize],
				replacement,
			});
		},
	);
	edits
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn apply(text: &str, edits: &[TextEdit]) -> String {
		let chars: Vec<char> = text.chars().collect();
		let mut out = String::new();
		let mut cursor = 0usize;
		for edit in edits {
			out.extend(&chars[cursor..edit.range.start]);
			out.push_str(&edit.replacement);
			cursor = edit.range.end;
		}
		out.extend(&chars[cursor..]);
		out
	}

	#[test]
	fn equal_texts_produce_no_edits() {
		assert_eq!(text_diff("a\nb\n", "a\nb\n"), Vec::new());
	}

	#[test]
	fn edits_reproduce_the_target_text() {
		let cases = [
			("import b\nimport a\ndef f():pass", "import a\nimport b\n\n\ndef f():\n    pass\n"),
			("", "x = 1\n"),
			("x = 1\n", ""),
			("a\nb\nc\n", "a\nc\n"),
			("a\nc\n", "a\nb\nc\n"),
			("no newline", "no newline\n"),
			("sól = 1\nzażółć()\n", "zażółć()\nsól = 1\n"),
		];
		for (old, new) in cases {
			let edits = text_diff(old, new);
			assert_eq!(apply(old, &edits), new, "old: {old:?}");
		}
	}

	#[test]
	fn edits_are_sorted_and_disjoint() {
		let old = "a\nx\nb\ny\nc\n";
		let new = "a\nX\nb\nY\nc\n";
		let edits = text_diff(old, new);
		assert!(edits.len() >= 2);
		for pair in edits.windows(2) {
			assert!(pair[0].range.end <= pair[1].range.start);
		}
	}

	#[test]
	fn offsets_count_chars_not_bytes() {
		let old = "żółw\nkeep\n";
		let new = "żółw\nnew\n";
		let edits = text_diff(old, new);
		assert_eq!(
			edits,
			vec![TextEdit {
				range: 5..10,
				replacement: "new\n".to_string(),
			}]
		);
	}
}
