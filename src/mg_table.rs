//! The `mG` discrete-log table: a sorted `(scalar, scalar·G)` mapping used to
//! invert the final step of EC-ElGamal decryption by binary search.

use crate::error::{Error, Result};
use crate::group::{Point, Scalar, POINT_SIZE};
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Largest plaintext integer the table can decode: `2^24`.
pub const MMAX: usize = 1 << 24;

/// On-disk record size: a 4-byte little-endian scalar followed by a 32-byte
/// canonical point encoding.
pub const MG_RECORD_SIZE: usize = 4 + POINT_SIZE;

#[derive(Clone, Copy)]
struct MgEntry {
	scalar: u32,
	point: [u8; POINT_SIZE],
}

/// An immutable, loaded `mG` table.
///
/// Entries are assumed pre-sorted ascending by the point field on disk; this
/// type never sorts them itself. Safe to share read-only across threads
/// (e.g. behind an `Arc`) once loaded.
pub struct MgTable {
	entries: Vec<MgEntry>,
	expected: usize,
}

impl MgTable {
	/// Reads records from `path` until EOF or `max_elems` is reached.
	///
	/// A short read (fewer than `max_elems` records before EOF) is not
	/// itself an error — it is reported via [`MgTable::elems_read`] /
	/// [`MgTable::is_complete`]. Use [`MgTable::load_required`] to turn a
	/// short read into an [`Error::TruncatedTable`].
	#[tracing::instrument(skip(path), fields(path = %path.display()))]
	pub fn load(path: &Path, max_elems: usize) -> Result<Self> {
		let file = std::fs::File::open(path)?;
		let mut reader = std::io::BufReader::new(file);
		let mut entries = Vec::with_capacity(max_elems.min(1 << 20));
		let mut buf = [0u8; MG_RECORD_SIZE];

		while entries.len() < max_elems {
			match reader.read_exact(&mut buf) {
				Ok(()) => {
					let scalar = u32::from_le_bytes(buf[0..4].try_into().unwrap());
					let mut point = [0u8; POINT_SIZE];
					point.copy_from_slice(&buf[4..MG_RECORD_SIZE]);
					entries.push(MgEntry { scalar, point });
				}
				Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
				Err(e) => return Err(Error::Io(e)),
			}
		}

		tracing::info!(elems_read = entries.len(), expected = max_elems, "loaded mG table");
		Ok(MgTable { entries, expected: max_elems })
	}

	/// Like [`MgTable::load`], but fails with [`Error::TruncatedTable`] when
	/// fewer than `max_elems` records were read.
	pub fn load_required(path: &Path, max_elems: usize) -> Result<Self> {
		let table = Self::load(path, max_elems)?;
		if !table.is_complete() {
			return Err(Error::TruncatedTable { expected: max_elems, got: table.entries.len() });
		}
		Ok(table)
	}

	/// Number of records actually read.
	pub fn elems_read(&self) -> usize {
		self.entries.len()
	}

	/// Whether the table holds exactly as many records as were requested at
	/// load time. `reply_decrypt` refuses to run against an incomplete
	/// table (spec's resource-state error).
	pub fn is_complete(&self) -> bool {
		self.entries.len() == self.expected
	}

	/// Binary search by canonical point encoding. Branches on public data:
	/// during decryption the target point is not secret relative to an
	/// attacker who already sees the reply.
	pub fn lookup(&self, point: &[u8; POINT_SIZE]) -> Option<u32> {
		self.entries
			.binary_search_by(|entry| entry.point.as_slice().cmp(point.as_slice()))
			.ok()
			.map(|idx| self.entries[idx].scalar)
	}

	#[cfg(test)]
	pub(crate) fn synthetic_range(range: std::ops::Range<u32>) -> MgTable {
		let mut entries: Vec<MgEntry> = range
			.map(|m| MgEntry {
				scalar: m,
				point: Point::base_scalarmult(&Scalar::from_u64(m as u64)).to_bytes(),
			})
			.collect();
		entries.sort_by(|a, b| a.point.cmp(&b.point));
		let expected = entries.len();
		MgTable { entries, expected }
	}

	/// Builds a table covering exactly the given scalar values rather than a
	/// contiguous range. Used by multi-phase round-trip tests, where the
	/// values that occur at intermediate phases are effectively arbitrary
	/// 24-bit numbers (raw bytes of an inner ciphertext) and a dense
	/// `0..2^24` table would be far larger than the test needs.
	#[cfg(test)]
	pub(crate) fn synthetic_from_values(values: &[u32]) -> MgTable {
		let mut entries: Vec<MgEntry> = values
			.iter()
			.map(|&m| MgEntry {
				scalar: m,
				point: Point::base_scalarmult(&Scalar::from_u64(m as u64)).to_bytes(),
			})
			.collect();
		entries.sort_by(|a, b| a.point.cmp(&b.point));
		entries.dedup_by(|a, b| a.point == b.point);
		let expected = entries.len();
		MgTable { entries, expected }
	}
}
