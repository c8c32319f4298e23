//! Builds and encrypts the multi-dimensional one-hot selector vector that
//! addresses a single element of the remote database.

use crate::cipher::{encrypt, encrypt_fast, CIPHER_SIZE};
use crate::error::{Error, Result};
use crate::group::{Point, Scalar};
use rayon::prelude::*;

/// `Σ index_counts[i]`: total number of plaintext bits (and thus ciphertext
/// slots) the selector buffer holds.
pub fn ciphers_count(index_counts: &[usize]) -> usize {
	index_counts.iter().sum()
}

/// `∏ index_counts[i]`: the number of distinct flat indices the selector can
/// address.
pub fn elements_count(index_counts: &[usize]) -> usize {
	index_counts.iter().product()
}

/// Expresses `idx` in mixed radix over `index_counts`, most-significant digit
/// (dimension 0) first.
///
/// Returns one digit `rᵢ ∈ [0, index_counts[i])` per dimension. This ordering
/// must match the server's interpretation of the selector layout exactly; it
/// is not an arbitrary implementation choice.
pub fn decompose_index(index_counts: &[usize], idx: usize) -> Result<Vec<usize>> {
	if index_counts.is_empty() {
		return Err(Error::InvalidShape("index_counts must not be empty".into()));
	}
	if index_counts.iter().any(|&n| n == 0) {
		return Err(Error::InvalidShape("index_counts entries must be >= 1".into()));
	}
	let total = elements_count(index_counts);
	if idx >= total {
		return Err(Error::InvalidShape(format!("idx {idx} out of range [0, {total})")));
	}

	let mut prod = total;
	let mut remaining = idx;
	let mut digits = Vec::with_capacity(index_counts.len());
	for &n in index_counts {
		prod /= n;
		digits.push(remaining / prod);
		remaining %= prod;
	}
	Ok(digits)
}

/// Builds the pre-encryption plaintext pattern: one byte per ciphertext slot,
/// `1` at the selected digit of each dimension, `0` elsewhere.
fn plaintext_bits(index_counts: &[usize], idx: usize) -> Result<Vec<u8>> {
	let digits = decompose_index(index_counts, idx)?;
	let mut bits = Vec::with_capacity(ciphers_count(index_counts));
	for (dim, &n) in index_counts.iter().enumerate() {
		let chosen = digits[dim];
		for j in 0..n {
			bits.push(if j == chosen { 1 } else { 0 });
		}
	}
	Ok(bits)
}

fn flatten(ciphers: Vec<[u8; CIPHER_SIZE]>) -> Vec<u8> {
	let mut out = Vec::with_capacity(ciphers.len() * CIPHER_SIZE);
	for c in ciphers {
		out.extend_from_slice(&c);
	}
	out
}

/// Builds an encrypted selector under the public key `pk` (standard,
/// variable-time path). Every slot is encrypted independently with fresh
/// randomness, in parallel.
#[tracing::instrument(skip(pk, index_counts))]
pub fn selector_create(pk: &Point, index_counts: &[usize], idx: usize) -> Result<Vec<u8>> {
	let bits = plaintext_bits(index_counts, idx)?;
	let ciphers: Vec<[u8; CIPHER_SIZE]> =
		bits.par_iter().map(|&bit| encrypt(pk, bit as u64, None)).collect();
	Ok(flatten(ciphers))
}

/// Builds an encrypted selector under the private key `sk` (fast,
/// constant-time path). Equivalent output distribution to
/// [`selector_create`], only cheaper to compute for a caller who holds `sk`.
#[tracing::instrument(skip(sk, index_counts))]
pub fn selector_create_fast(sk: &Scalar, index_counts: &[usize], idx: usize) -> Result<Vec<u8>> {
	let bits = plaintext_bits(index_counts, idx)?;
	let ciphers: Vec<[u8; CIPHER_SIZE]> =
		bits.par_iter().map(|&bit| encrypt_fast(sk, bit as u64, None)).collect();
	Ok(flatten(ciphers))
}
