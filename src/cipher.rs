//! Additively-homomorphic EC-ElGamal encryption of small integers.

use crate::group::{Point, Scalar, POINT_SIZE};
use crate::mg_table::MgTable;
use rand::rngs::OsRng;

/// Byte length of a ciphertext: two concatenated point encodings.
pub const CIPHER_SIZE: usize = 2 * POINT_SIZE;

fn concat_points(c1: Point, c2: Point) -> [u8; CIPHER_SIZE] {
	let mut out = [0u8; CIPHER_SIZE];
	out[..POINT_SIZE].copy_from_slice(&c1.to_bytes());
	out[POINT_SIZE..].copy_from_slice(&c2.to_bytes());
	out
}

fn point_at(cipher: &[u8; CIPHER_SIZE], offset: usize) -> Point {
	let mut bytes = [0u8; POINT_SIZE];
	bytes.copy_from_slice(&cipher[offset..offset + POINT_SIZE]);
	Point::from_bytes(&bytes)
}

/// Encrypts `m` under the public key `pk`. Draws fresh randomness unless `r`
/// is supplied (a test hook for determinism; production callers always pass
/// `None`).
///
/// `c1 = r·G`, `c2 = r·P + m·G`.
pub fn encrypt(pk: &Point, m: u64, r: Option<Scalar>) -> [u8; CIPHER_SIZE] {
	let rr = r.unwrap_or_else(|| Scalar::random(&mut OsRng));
	let c1 = Point::base_scalarmult(&rr);
	let m_scalar = Scalar::from_u64(m);
	let c2 = Point::double_scalarmult_vartime(&rr, pk, &m_scalar);
	concat_points(c1, c2)
}

/// Encrypts `m` under the owner of `sk`, using the identity
/// `r·P + m·G = (r·sk + m)·G` to replace the variable-point multiplication
/// with a second base-point multiplication. Faster than [`encrypt`] and
/// keeps `sk` inside a constant-time primitive throughout.
pub fn encrypt_fast(sk: &Scalar, m: u64, r: Option<Scalar>) -> [u8; CIPHER_SIZE] {
	let rr = r.unwrap_or_else(|| Scalar::random(&mut OsRng));
	let c1 = Point::base_scalarmult(&rr);
	let m_scalar = Scalar::from_u64(m);
	let r_prime = Scalar::muladd(&rr, sk, &m_scalar);
	let c2 = Point::base_scalarmult(&r_prime);
	concat_points(c1, c2)
}

/// Decrypts `cipher` under `sk`, recovering the plaintext via the `mG`
/// table's discrete-log lookup.
///
/// Returns `None` ("not found") when the recovered point is absent from the
/// table — either the plaintext exceeded the table's range or the
/// ciphertext was malformed. This is a value, not an error: the caller
/// (typically [`crate::reply::reply_decrypt`]) decides whether a miss is
/// itself a failure.
pub fn decrypt(sk: &Scalar, cipher: &[u8; CIPHER_SIZE], mg: &MgTable) -> Option<u32> {
	let c1 = point_at(cipher, 0);
	let c2 = point_at(cipher, POINT_SIZE);
	let shared = c1.scalarmult(sk);
	let m_point = c2.sub(&shared);
	mg.lookup(&m_point.to_bytes())
}
