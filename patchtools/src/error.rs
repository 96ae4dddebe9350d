use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Failures while patching the target file. None of these are retried.
#[derive(Debug, Error)]
pub enum PatchError {
	/// The target is missing, unreadable or unwritable.
	#[error("cannot access {}: {source}", path.display())]
	FileAccess {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The target is not valid UTF-8.
	#[error("{} is not valid UTF-8: {source}", path.display())]
	Encoding {
		path: PathBuf,
		#[source]
		source: FromUtf8Error,
	},
}

impl PatchError {
	pub(crate) fn file_access(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
		let path = path.into();
		move |source| Self::FileAccess { path, source }
	}

	pub(crate) fn encoding(path: impl Into<PathBuf>) -> impl FnOnce(FromUtf8Error) -> Self {
		let path = path.into();
		move |source| Self::Encoding { path, source }
	}

	pub fn path(&self) -> &std::path::Path {
		match self {
			Self::FileAccess { path, .. } | Self::Encoding { path, .. } => path,
		}
	}
}
