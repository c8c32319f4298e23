//! Optional, `serde`-deserializable runtime configuration.
//!
//! Pure-library callers that already have an `mG` path and a key never need
//! this; it exists for embedders (a CLI, a daemon) that want to source those
//! values from the environment instead of wiring them up by hand, without
//! pulling `config`/`serde` into callers who don't.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Environment variable prefix used by [`PirCoreConfig::from_env`].
pub const ENV_PREFIX: &str = "PIR_CORE";

/// Runtime configuration for embedding the core in a long-lived process.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PirCoreConfig {
	/// Path to the `mG` discrete-log table file.
	pub mg_table_path: PathBuf,
	/// Number of records to read from the table (normally `mg_table::MMAX`;
	/// overridable for test fixtures with a truncated table).
	#[serde(default = "default_max_elems")]
	pub mg_max_elems: usize,
}

fn default_max_elems() -> usize {
	crate::mg_table::MMAX
}

impl PirCoreConfig {
	/// Loads configuration from environment variables prefixed `PIR_CORE__`,
	/// e.g. `PIR_CORE__MG_TABLE_PATH=/var/lib/pir-core/mG.bin`.
	///
	/// A single-struct, no-CLI-flags environment-source loader built on the
	/// `config` crate's builder API.
	pub fn from_env() -> Result<Self> {
		config::Config::builder()
			.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
			.build()
			.and_then(|c| c.try_deserialize())
			.map_err(|e| Error::InvalidShape(format!("config error: {e}")))
	}
}
