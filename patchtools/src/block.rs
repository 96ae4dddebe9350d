//! The duplicated equipment image block and the substitution that strips it.
//!
//! A second copy of the image path resolution ended up in the quote update
//! handler. The block is matched line by line as literal text, with an
//! optional `\r` allowed before every `\n` so CRLF checkouts match too.

use std::borrow::Cow;

use log::debug;
use memchr::memmem::{find_iter, Finder};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Lines of the duplicated block, without line terminators.
pub const BLOCK_LINES: [&str; 8] = [
	"    let equipmentImagePath = req.body.existing_equipment_image || req.body.equipment_image_url || null;",
	"    if (req.files && req.files.length > 0) {",
	"      const imageFile = req.files.find(f => f.fieldname === 'equipment_image');",
	"      if (imageFile) {",
	"        const baseUrl = `${req.protocol}://${req.get('host')}`;",
	"        equipmentImagePath = `${baseUrl}/uploads/${imageFile.filename}`;",
	"      }",
	"    }",
];

/// Every match is replaced with this.
pub const REPLACEMENT: &str = "\n\n";

const EOL: &str = r"\r?\n";

// Cheaper than running the regex over files that cannot contain the block.
static ANCHOR: Lazy<Finder<'static>> = Lazy::new(|| Finder::new(BLOCK_LINES[0].trim_start()));

static BLOCK: Lazy<Regex> =
	Lazy::new(|| Regex::new(&block_pattern()).expect("block pattern must compile"));

/// Regex source for the block: a blank line, the escaped block lines, and a
/// trailing blank line.
pub fn block_pattern() -> String {
	let body = BLOCK_LINES
		.iter()
		.map(|line| regex::escape(line))
		.collect::<Vec<_>>()
		.join(EOL);

	format!("{EOL}{EOL}{body}{EOL}{EOL}")
}

pub fn block_regex() -> &'static Regex {
	&BLOCK
}

/// Whether `text` contains the first line of the block anywhere.
pub fn contains_anchor(text: &[u8]) -> bool {
	ANCHOR.find(text).is_some()
}

/// Replaces every non-overlapping occurrence of the block with
/// [`REPLACEMENT`], returning the new text and the number of replacements.
///
/// The input is borrowed back unchanged when nothing matched.
pub fn remove_duplicate_blocks(text: &str) -> (Cow<'_, str>, usize) {
	if !contains_anchor(text.as_bytes()) {
		debug!("block anchor not present, skipping regex");
		return (Cow::Borrowed(text), 0);
	}

	let anchors = find_iter(text.as_bytes(), BLOCK_LINES[0].trim_start()).count();
	debug!("{anchors} candidate block(s) found");

	let mut count = 0;
	let patched = BLOCK.replace_all(text, |_: &Captures<'_>| {
		count += 1;
		REPLACEMENT
	});

	(patched, count)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn block(eol: &str) -> String {
		format!("{eol}{eol}{}{eol}{eol}", BLOCK_LINES.join(eol))
	}

	#[test]
	fn pattern_compiles() {
		assert!(block_regex().is_match(&block("\n")));
	}

	#[test]
	fn removes_single_lf_block() {
		let text = format!("const a = 1;{}const b = 2;\n", block("\n"));
		let (patched, count) = remove_duplicate_blocks(&text);
		assert_eq!(count, 1);
		assert_eq!(patched, "const a = 1;\n\nconst b = 2;\n");
	}

	#[test]
	fn crlf_block_is_replaced_like_lf_block() {
		let lf = format!("head{}tail", block("\n"));
		let crlf = format!("head{}tail", block("\r\n"));

		let (lf_patched, lf_count) = remove_duplicate_blocks(&lf);
		let (crlf_patched, crlf_count) = remove_duplicate_blocks(&crlf);

		assert_eq!(lf_count, 1);
		assert_eq!(crlf_count, 1);
		assert_eq!(lf_patched, crlf_patched);
		assert_eq!(crlf_patched, "head\n\ntail");
	}

	#[test]
	fn removes_every_occurrence() {
		let text = format!("one{b}two{b}three{b}four", b = block("\n"));
		let (patched, count) = remove_duplicate_blocks(&text);
		assert_eq!(count, 3);
		assert_eq!(patched, "one\n\ntwo\n\nthree\n\nfour");
	}

	#[test]
	fn adjacent_blocks_both_match() {
		let text = format!("a{b}{b}z", b = block("\n"));
		let (patched, count) = remove_duplicate_blocks(&text);
		assert_eq!(count, 2);
		assert_eq!(patched, "a\n\n\n\nz");
	}

	#[test]
	fn untouched_text_is_borrowed() {
		let text = "router.put('/:id', async (req, res) => {\n});\n";
		let (patched, count) = remove_duplicate_blocks(text);
		assert_eq!(count, 0);
		assert!(matches!(patched, Cow::Borrowed(_)));
	}

	#[test]
	fn near_miss_is_not_matched() {
		let text = block("\n").replace("uploads", "upload");
		assert!(contains_anchor(text.as_bytes()));
		let (patched, count) = remove_duplicate_blocks(&text);
		assert_eq!(count, 0);
		assert_eq!(patched, text);
	}

	#[test]
	fn block_without_surrounding_blank_lines_is_kept() {
		let text = format!("x\n{}\ny", BLOCK_LINES.join("\n"));
		let (_, count) = remove_duplicate_blocks(&text);
		assert_eq!(count, 0);
	}

	#[test]
	fn dots_are_literal() {
		let text = block("\n").replace("f.fieldname", "f_fieldname");
		assert!(!block_regex().is_match(&text));
	}
}
