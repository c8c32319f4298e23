//! Client-side cryptographic core of an EC-ElGamal Private Information
//! Retrieval protocol.
//!
//! Covers keypair management, additively-homomorphic encryption of small
//! integers, multi-dimensional selector construction, and multi-phase reply
//! decryption via a precomputed discrete-log table. Everything outside this —
//! language bindings, the server's homomorphic aggregation, `mG`-table
//! pre-generation, network transport — is an external collaborator's job.

pub use cipher::{decrypt, encrypt, encrypt_fast, CIPHER_SIZE};
pub use error::{Error, Result};
pub use group::{Point, Scalar, POINT_SIZE, SCALAR_SIZE};
pub use keys::PrivateKey;
pub use mg_table::{MgTable, MG_RECORD_SIZE, MMAX};
pub use reply::reply_decrypt;
pub use selector::{ciphers_count, decompose_index, elements_count, selector_create, selector_create_fast};

/// Ed25519 scalar/point primitives.
mod group;
/// Keypair management.
mod keys;
/// EC-ElGamal encryption and decryption.
mod cipher;
/// The `mG` discrete-log table and binary search.
mod mg_table;
/// Multi-dimensional selector construction.
mod selector;
/// Multi-phase reply decryption.
mod reply;
/// Error taxonomy.
pub mod error;

#[cfg(feature = "config")]
/// Optional environment-sourced runtime configuration.
pub mod config;

#[cfg(test)]
mod integration_tests;
