//! Identifier generation for registrants and records.
//!
//! Format: `prefix + last 6 digits of epoch millis + 3-digit random`.
//! There is no uniqueness guarantee; two calls in the same millisecond
//! collide one time in a thousand.

use chrono::{DateTime, Utc};
use rand::Rng;

pub const WORKER_PREFIX: &str = "USR";
pub const DOCTOR_PREFIX: &str = "DOC";
pub const RECORD_PREFIX: &str = "REC";

/// Digits appended after the prefix (6 timestamp + 3 random).
pub const SUFFIX_LEN: usize = 9;

/// Generate an identifier stamped with the current time.
pub fn generate_id(prefix: &str) -> String {
    generate_id_at(prefix, Utc::now(), &mut rand::thread_rng())
}

/// Generate an identifier for a given instant with a caller-supplied RNG.
pub fn generate_id_at<R: Rng + ?Sized>(prefix: &str, at: DateTime<Utc>, rng: &mut R) -> String {
    let millis = at.timestamp_millis().rem_euclid(1_000_000);
    let random = rng.gen_range(0..1000u32);
    format!("{prefix}{millis:06}{random:03}")
}

/// Expected length of an identifier for `prefix`.
pub fn expected_len(prefix: &str) -> usize {
    prefix.len() + SUFFIX_LEN
}
