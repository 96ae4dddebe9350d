use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use patchtools::{patch, DEFAULT_TARGET};
use std::path::PathBuf;

/// Remove the duplicated equipment image block from the quotes router
#[derive(Parser, Debug)]
struct Args {
	/// File to patch
	#[arg(default_value = DEFAULT_TARGET)]
	path: PathBuf,

	/// Log what was matched and written
	#[arg(long)]
	debug: bool,
}

fn main() -> Result<()> {
	let args = Args::parse();

	// RUST_LOG still wins over either default
	let env = if args.debug {
		Env::default().default_filter_or("debug")
	}
	else {
		Env::default().default_filter_or("warn")
	};
	env_logger::Builder::from_env(env).init();

	let count = patch(&args.path).context("failed to remove duplicate block")?;
	log::debug!("{count} block(s) removed");

	Ok(())
}
