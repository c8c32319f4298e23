//! Keypair management over the Ed25519 group.

use crate::group::{Point, Scalar};
use rand::rngs::OsRng;

/// A private EC-ElGamal key: a uniformly random Ed25519 scalar.
///
/// Holds its secret through `Scalar`, which zeroizes on drop.
pub struct PrivateKey(Scalar);

impl PrivateKey {
	/// Draws a fresh, uniformly random private key.
	pub fn generate() -> Self {
		PrivateKey(Scalar::random(&mut OsRng))
	}

	/// Wraps an existing scalar encoding as a private key, reducing mod `ℓ`
	/// if the bytes are not already canonical.
	pub fn from_bytes(bytes: &[u8; 32]) -> Self {
		PrivateKey(Scalar::from_bytes(bytes))
	}

	pub fn to_bytes(&self) -> [u8; 32] {
		self.0.to_bytes()
	}

	/// The underlying scalar, for callers that need to pass it directly to
	/// the fast-path cipher or selector-builder entry points.
	pub fn scalar(&self) -> &Scalar {
		&self.0
	}

	/// `sk·G`.
	pub fn public_key(&self) -> Point {
		Point::base_scalarmult(&self.0)
	}
}
