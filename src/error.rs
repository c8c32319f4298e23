//! Error taxonomy for the PIR core.
//!
//! A flat `thiserror`-derived enum with one variant per failure kind,
//! surfaced directly to the caller with no local retries.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
	/// Wrong buffer length, empty dimension list, `idx` out of range, etc.
	#[error("invalid input shape: {0}")]
	InvalidShape(String),

	/// `reply_decrypt` was called against an `mG` table that was never
	/// fully loaded (see `MgTable::is_complete`).
	#[error("mG table is not fully loaded; cannot decrypt reply")]
	TableNotLoaded,

	/// The `mG` table file could not be read.
	#[error("I/O error reading mG table: {0}")]
	Io(#[from] std::io::Error),

	/// `MgTable::load_required` read fewer records than requested.
	#[error("mG table truncated: expected {expected} records, read {got}")]
	TruncatedTable { expected: usize, got: usize },

	/// A ciphertext in a reply decrypted to a point absent from the `mG`
	/// table. Surfaced once for the whole reply; the offending index is not
	/// exposed.
	#[error("decryption failed: a ciphertext's recovered point is not in the mG table")]
	DecryptionFailed,

	/// `(dimension, packing, reply_size)` would produce a non-multiple-of-64
	/// intermediate buffer at some phase before the last.
	#[error(
		"invalid reply shape: dimension={dimension} packing={packing} reply_size={reply_size}"
	)]
	InvalidReplyShape { dimension: u8, packing: u8, reply_size: usize },
}
