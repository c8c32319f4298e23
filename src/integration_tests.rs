//! Cross-module round-trip tests, kept separate from the per-module unit
//! tests in each of `cipher.rs`/`selector.rs`/`reply.rs`/`mg_table.rs`.

use crate::cipher::{decrypt, encrypt, encrypt_fast, CIPHER_SIZE};
use crate::error::Error;
use crate::group::{Point, Scalar};
use crate::keys::PrivateKey;
use crate::mg_table::MgTable;
use crate::reply::{reply_decrypt, validate_phase_shape};
use crate::selector::{decompose_index, selector_create_fast};

/// Inverts `reply_decrypt`'s phase recurrence: given the final plaintext
/// bytes a `(dimension, packing)` decode should produce, builds the
/// ciphertext stream that decodes to them, and returns alongside every
/// intermediate scalar value a correct `mG` table must contain.
fn simulate_reply(pk: &Point, final_plaintext: &[u8], ns: &[usize], packing: usize) -> (Vec<u8>, Vec<u32>) {
	let mut buffer = final_plaintext.to_vec();
	let mut all_values = Vec::new();

	for &n in ns.iter().rev() {
		let mut next = Vec::with_capacity(n * CIPHER_SIZE);
		for i in 0..n {
			let mut val_bytes = [0u8; 8];
			val_bytes[..packing].copy_from_slice(&buffer[i * packing..(i + 1) * packing]);
			let v = u64::from_le_bytes(val_bytes);
			all_values.push(v as u32);
			next.extend_from_slice(&encrypt(pk, v, None));
		}
		buffer = next;
	}
	(buffer, all_values)
}

#[test]
fn public_key_matches_base_scalarmult_of_private_key() {
	let sk = PrivateKey::generate();
	assert_eq!(sk.public_key(), Point::base_scalarmult(sk.scalar()));
}

#[test]
fn encrypt_decrypt_roundtrip_both_paths() {
	let sk = PrivateKey::generate();
	let pk = sk.public_key();
	let mg = MgTable::synthetic_range(0..256);

	for m in 0..256u64 {
		let c = encrypt(&pk, m, None);
		assert_eq!(decrypt(sk.scalar(), &c, &mg), Some(m as u32));

		let c_fast = encrypt_fast(sk.scalar(), m, None);
		assert_eq!(decrypt(sk.scalar(), &c_fast, &mg), Some(m as u32));
	}
}

#[test]
fn encryption_forms_agree_byte_for_byte_given_same_randomness() {
	let sk = PrivateKey::generate();
	let pk = sk.public_key();
	let r = Scalar::random(&mut rand::rngs::OsRng);
	// `r` is moved into the first call; clone via bytes since `Scalar` zeroizes
	// on drop and intentionally does not implement `Copy`.
	let r2 = Scalar::from_bytes(&r.to_bytes());

	assert_eq!(encrypt(&pk, 42, Some(r)), encrypt_fast(sk.scalar(), 42, Some(r2)));
}

#[test]
fn summed_ciphertexts_decrypt_to_summed_plaintexts() {
	let sk = PrivateKey::generate();
	let pk = sk.public_key();
	let mg = MgTable::synthetic_range(0..200);

	for (a, b) in [(3u64, 5u64), (0, 0), (100, 99), (1, 1)] {
		let ca = encrypt(&pk, a, None);
		let cb = encrypt(&pk, b, None);

		let p1 = Point::from_bytes(&ca[..32].try_into().unwrap())
			.add(&Point::from_bytes(&cb[..32].try_into().unwrap()));
		let p2 = Point::from_bytes(&ca[32..].try_into().unwrap())
			.add(&Point::from_bytes(&cb[32..].try_into().unwrap()));

		let mut summed = [0u8; CIPHER_SIZE];
		summed[..32].copy_from_slice(&p1.to_bytes());
		summed[32..].copy_from_slice(&p2.to_bytes());

		assert_eq!(decrypt(sk.scalar(), &summed, &mg), Some((a + b) as u32));
	}
}

#[test]
fn selector_create_fast_is_randomized_but_digits_are_deterministic() {
	let index_counts = [3usize, 4];
	let sk = PrivateKey::generate();

	let a = selector_create_fast(sk.scalar(), &index_counts, 7).unwrap();
	let b = selector_create_fast(sk.scalar(), &index_counts, 7).unwrap();
	// Different randomness per call, so ciphertexts differ...
	assert_ne!(a, b);

	let digits = decompose_index(&index_counts, 7).unwrap();
	assert_eq!(digits, vec![1, 3]);
}

#[test]
fn mg_table_lookup_finds_every_loaded_point_and_rejects_unknown_ones() {
	let mg = MgTable::synthetic_range(0..512);
	for m in 0..512u32 {
		let point = Point::base_scalarmult(&Scalar::from_u64(m as u64)).to_bytes();
		assert_eq!(mg.lookup(&point), Some(m));
	}
	let miss = Point::base_scalarmult(&Scalar::from_u64(999_999)).to_bytes();
	assert_eq!(mg.lookup(&miss), None);
}

#[test]
fn reply_decode_roundtrips_for_every_dimension_and_packing_combination() {
	let sk = PrivateKey::generate();
	let pk = sk.public_key();

	for dimension in 1u8..=3 {
		for packing in 1u8..=3 {
			// Guarantees every intermediate phase's compacted byte count is a
			// multiple of 64, for any packing in 1..=3.
			let n0 = 64usize.pow((dimension - 1) as u32);
			let reply_size = n0 * CIPHER_SIZE;
			let ns = validate_phase_shape(dimension, packing, reply_size).unwrap();

			let final_len = *ns.last().unwrap() * packing as usize;
			let final_plaintext: Vec<u8> = (0..final_len).map(|i| (i % 251) as u8).collect();

			let (reply, values) = simulate_reply(&pk, &final_plaintext, &ns, packing as usize);
			assert_eq!(reply.len(), reply_size);

			let mg = MgTable::synthetic_from_values(&values);
			let decoded = reply_decrypt(&reply, sk.scalar(), dimension, packing, &mg).unwrap();
			assert_eq!(decoded, final_plaintext, "dimension={dimension} packing={packing}");
		}
	}
}

#[test]
fn encrypt_decrypt_roundtrips_at_table_boundary_and_fails_just_past_it() {
	let sk = PrivateKey::generate();
	let pk = sk.public_key();
	let mmax_minus_one = 127u64; // small stand-in boundary for a bounded test table
	let mg = MgTable::synthetic_range(0..(mmax_minus_one as u32 + 1));

	assert_eq!(decrypt(sk.scalar(), &encrypt(&pk, 0, None), &mg), Some(0));
	assert_eq!(
		decrypt(sk.scalar(), &encrypt(&pk, mmax_minus_one, None), &mg),
		Some(mmax_minus_one as u32)
	);
	assert_eq!(decrypt(sk.scalar(), &encrypt(&pk, mmax_minus_one + 1, None), &mg), None);
}

#[test]
fn fixed_randomness_produces_identical_ciphertexts_across_both_paths() {
	let sk = PrivateKey::generate();
	let pk = sk.public_key();
	let mut r_bytes = [0u8; 32];
	r_bytes[0] = 1;
	let r1 = Scalar::from_bytes(&r_bytes);
	let r2 = Scalar::from_bytes(&r_bytes);

	assert_eq!(encrypt(&pk, 42, Some(r1)), encrypt_fast(sk.scalar(), 42, Some(r2)));
}

#[test]
fn truncated_table_blocks_reply_decrypt() {
	use std::io::Write;

	let sk = PrivateKey::generate();
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("mG.bin");

	let mut file = std::fs::File::create(&path).unwrap();
	for m in 0u32..32 {
		let point = Point::base_scalarmult(&Scalar::from_u64(m as u64)).to_bytes();
		file.write_all(&m.to_le_bytes()).unwrap();
		file.write_all(&point).unwrap();
	}
	drop(file);

	let full = MgTable::load(&path, 32).unwrap();
	assert_eq!(full.elems_read(), 32);
	assert!(full.is_complete());

	let truncated = MgTable::load(&path, 33).unwrap();
	assert_eq!(truncated.elems_read(), 32);
	assert!(!truncated.is_complete());

	let cipher = encrypt_fast(sk.scalar(), 1, None);
	let err = reply_decrypt(&cipher, sk.scalar(), 1, 1, &truncated).unwrap_err();
	assert!(matches!(err, Error::TableNotLoaded));
}

#[test]
fn single_ciphertext_single_phase_unpacks_little_endian_bytes() {
	let sk = PrivateKey::generate();
	let mg = MgTable::synthetic_from_values(&[0x030201]);
	let cipher = encrypt_fast(sk.scalar(), 0x030201, None);

	let decoded = reply_decrypt(&cipher, sk.scalar(), 1, 3, &mg).unwrap();
	assert_eq!(decoded, vec![0x01, 0x02, 0x03]);
}

#[test]
fn error_messages_are_non_empty_and_stable() {
	let messages = [
		Error::InvalidShape("x".into()).to_string(),
		Error::TableNotLoaded.to_string(),
		Error::TruncatedTable { expected: 2, got: 1 }.to_string(),
		Error::DecryptionFailed.to_string(),
		Error::InvalidReplyShape { dimension: 1, packing: 1, reply_size: 0 }.to_string(),
	];
	for msg in messages {
		assert!(!msg.is_empty());
	}
}
