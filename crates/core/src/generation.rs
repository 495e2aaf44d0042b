//! Generation identifiers and record status values.

use rand::Rng;

/// Status written on a completed generation record.
pub const STATUS_COMPLETED: &str = "completed";

/// Length of the random suffix on a generation id.
const SUFFIX_LEN: usize = 6;

/// Base-36 alphabet for the random suffix.
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Mint a batch-unique generation identifier.
///
/// Format: `gen_{unix_millis}_{suffix}` where the suffix is 6 random
/// base-36 characters. Uniqueness holds per invocation; two identical
/// requests always get distinct identifiers (no deduplication).
pub fn new_generation_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect();
    format!("gen_{millis}_{suffix}")
}
