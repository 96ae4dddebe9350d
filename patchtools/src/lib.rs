//! Strips the duplicated equipment image block from the quotes router.

mod block;
mod error;

use std::fs;
use std::path::Path;

use log::{debug, info};

pub use block::{
	block_pattern, block_regex, contains_anchor, remove_duplicate_blocks, BLOCK_LINES, REPLACEMENT,
};
pub use error::PatchError;

/// File patched when no path is given, relative to the working directory.
pub const DEFAULT_TARGET: &str = "src/routes/quotes-router.js";

/// Removes every copy of the duplicated block from the file at `path` and
/// returns how many were removed.
///
/// The file is rewritten only when at least one block was found, so a zero
/// count means the file was not touched.
pub fn patch(path: impl AsRef<Path>) -> Result<usize, PatchError> {
	let path = path.as_ref();

	let bytes = fs::read(path).map_err(PatchError::file_access(path))?;
	let text = String::from_utf8(bytes).map_err(PatchError::encoding(path))?;

	let (patched, count) = remove_duplicate_blocks(&text);
	if count == 0 {
		debug!("no duplicate block in {}", path.display());
		return Ok(0);
	}

	fs::write(path, patched.as_bytes()).map_err(PatchError::file_access(path))?;
	info!("removed {count} duplicate block(s) from {}", path.display());

	Ok(count)
}
