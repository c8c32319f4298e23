//! Multi-phase decryption of a packed, multi-dimensional PIR reply.

use crate::cipher::{decrypt, CIPHER_SIZE};
use crate::error::{Error, Result};
use crate::group::Scalar;
use crate::mg_table::MgTable;
use rayon::prelude::*;

/// Computes the ciphertext count `Nₖ` at the start of every phase
/// `0..dimension`, and validates that every intermediate phase's compacted
/// byte count is a multiple of 64 (so it can be re-read as a ciphertext
/// stream by the next phase). Rejects the whole call up front rather than
/// producing the "undefined output" the source tolerates.
pub(crate) fn validate_phase_shape(
	dimension: u8,
	packing: u8,
	reply_size: usize,
) -> Result<Vec<usize>> {
	if dimension == 0 {
		return Err(Error::InvalidReplyShape { dimension, packing, reply_size });
	}
	if !(1..=8).contains(&packing) {
		return Err(Error::InvalidReplyShape { dimension, packing, reply_size });
	}
	if reply_size == 0 || reply_size % CIPHER_SIZE != 0 {
		return Err(Error::InvalidReplyShape { dimension, packing, reply_size });
	}

	let mut ns = Vec::with_capacity(dimension as usize);
	let mut n = reply_size / CIPHER_SIZE;
	for phase in 0..dimension {
		ns.push(n);
		if phase + 1 < dimension {
			let compacted = n * packing as usize;
			if compacted % CIPHER_SIZE != 0 {
				return Err(Error::InvalidReplyShape { dimension, packing, reply_size });
			}
			n = compacted / CIPHER_SIZE;
		}
	}
	Ok(ns)
}

/// Decrypts `reply` under `sk` through `dimension` phases, each unwinding one
/// level of `packing`-byte-packed server-side aggregation.
///
/// Returns the decoded plaintext bytes. Fails with
/// [`Error::InvalidReplyShape`] if the `(dimension, packing, reply.len())`
/// tuple cannot produce well-formed intermediate ciphertext streams, with
/// [`Error::TableNotLoaded`] if `mg` is not fully populated, and with
/// [`Error::DecryptionFailed`] if any ciphertext in any phase recovers to a
/// point absent from `mg`.
#[tracing::instrument(skip(reply, sk, mg), fields(dimension, packing, reply_size = reply.len()))]
pub fn reply_decrypt(
	reply: &[u8],
	sk: &Scalar,
	dimension: u8,
	packing: u8,
	mg: &MgTable,
) -> Result<Vec<u8>> {
	if !mg.is_complete() {
		return Err(Error::TableNotLoaded);
	}
	let ns = validate_phase_shape(dimension, packing, reply.len())?;
	let packing = packing as usize;

	let mut buffer = reply.to_vec();
	let mut output_len = 0usize;

	for (phase, &n) in ns.iter().enumerate() {
		let decrypted: Vec<Option<u32>> = (0..n)
			.into_par_iter()
			.map(|i| {
				let mut cipher = [0u8; CIPHER_SIZE];
				cipher.copy_from_slice(&buffer[i * CIPHER_SIZE..(i + 1) * CIPHER_SIZE]);
				decrypt(sk, &cipher, mg)
			})
			.collect();

		if decrypted.iter().any(Option::is_none) {
			return Err(Error::DecryptionFailed);
		}

		for (i, value) in decrypted.into_iter().enumerate() {
			let bytes = value.unwrap().to_le_bytes();
			let dst = i * packing;
			buffer[dst..dst + packing].copy_from_slice(&bytes[..packing]);
		}

		output_len = n * packing;
		let is_last = phase + 1 == ns.len();
		tracing::debug!(phase, n, output_len, is_last, "reply phase complete");
	}

	buffer.truncate(output_len);
	Ok(buffer)
}
