//! Ed25519 scalar/point primitives backing the EC-ElGamal core.
//!
//! Thin wrappers over `curve25519-dalek` exposing exactly the operations the
//! rest of the crate needs: random/zero-extended scalars, base- and
//! variable-point multiplication, variable-time double multiplication, and
//! canonical point encode/decode. Every other module reaches the curve only
//! through `Scalar`/`Point`.

use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE;
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar as DalekScalar;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// Length in bytes of a scalar encoding.
pub const SCALAR_SIZE: usize = 32;
/// Length in bytes of a canonical point encoding.
pub const POINT_SIZE: usize = 32;

/// A scalar mod the Ed25519 group order `ℓ`.
///
/// Zeroized on drop: every scalar in this crate is either a private key or
/// ephemeral encryption randomness, never a value safe to leave on the
/// stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scalar(pub(crate) DalekScalar);

impl Scalar {
	/// Draws a uniformly random scalar in `[0, ℓ)`.
	pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
		Scalar(DalekScalar::random(rng))
	}

	/// Zero-extends a `u64` plaintext into a scalar: the low 8 bytes carry
	/// the value, the remaining 24 bytes are zero.
	pub fn from_u64(n: u64) -> Self {
		let mut bytes = [0u8; SCALAR_SIZE];
		bytes[..8].copy_from_slice(&n.to_le_bytes());
		Scalar(DalekScalar::from_bytes_mod_order(bytes))
	}

	/// Decodes a little-endian scalar encoding, reducing mod `ℓ` if needed.
	pub fn from_bytes(bytes: &[u8; SCALAR_SIZE]) -> Self {
		Scalar(DalekScalar::from_bytes_mod_order(*bytes))
	}

	/// `a·b + c mod ℓ`.
	pub fn muladd(a: &Scalar, b: &Scalar, c: &Scalar) -> Scalar {
		Scalar(a.0 * b.0 + c.0)
	}

	pub fn to_bytes(&self) -> [u8; SCALAR_SIZE] {
		self.0.to_bytes()
	}
}

impl Drop for Scalar {
	fn drop(&mut self) {
		self.0.zeroize();
	}
}

/// A canonical Ed25519 point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point(EdwardsPoint);

impl Point {
	/// `s·G`, computed against the precomputed basepoint table.
	pub fn base_scalarmult(s: &Scalar) -> Point {
		Point(&ED25519_BASEPOINT_TABLE * &s.0)
	}

	/// `s·self`. Variable-base scalar multiplication; curve25519-dalek does
	/// not branch on the scalar, so this is safe to call with a secret key.
	pub fn scalarmult(&self, s: &Scalar) -> Point {
		Point(s.0 * self.0)
	}

	/// `a·self + b·G`, computed in variable time.
	///
	/// Parameter order matches this crate's own encryption call site
	/// (`cipher::encrypt`), which needs `r·P + m·G`: pass the randomness as
	/// `a`, the public key as `point` (`self`), and the plaintext as `b`.
	/// Only ever called with operands public to the caller.
	pub fn double_scalarmult_vartime(a: &Scalar, point: &Point, b: &Scalar) -> Point {
		Point(EdwardsPoint::vartime_double_scalar_mul_basepoint(&a.0, &point.0, &b.0))
	}

	pub fn add(&self, other: &Point) -> Point {
		Point(self.0 + other.0)
	}

	pub fn sub(&self, other: &Point) -> Point {
		Point(self.0 - other.0)
	}

	/// Canonical 32-byte encoding.
	pub fn to_bytes(&self) -> [u8; POINT_SIZE] {
		self.0.compress().to_bytes()
	}

	/// Decodes a canonical point encoding.
	///
	/// # Panics
	///
	/// Panics on non-canonical or off-curve input. Callers of this crate
	/// only ever decode points this crate produced itself, or points read
	/// from a pre-validated `mG` table, so a decode failure here is a
	/// programmer error rather than a runtime condition to recover from.
	pub fn from_bytes(bytes: &[u8; POINT_SIZE]) -> Self {
		let compressed = CompressedEdwardsY(*bytes);
		Point(compressed.decompress().expect("invalid point encoding"))
	}
}
