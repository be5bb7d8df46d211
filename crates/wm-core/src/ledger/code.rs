//! Human-readable placeholder transfer codes.
//!
//! These are cosmetic identifiers, not secrets. Collisions are possible and
//! accepted.

use rand::Rng;
use rand::seq::SliceRandom;

/// Word list codes are drawn from.
pub const VOCABULARY: [&str; 6] = ["alpha", "nebula", "delta", "orbit", "crypto", "node"];

/// Generate a code of the form `<0-99>-<word>-<word>`.
///
/// Words may repeat.
pub fn generate_transfer_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    let number = rng.gen_range(0..100u8);
    let first = VOCABULARY.choose(rng).copied().unwrap_or(VOCABULARY[0]);
    let second = VOCABULARY.choose(rng).copied().unwrap_or(VOCABULARY[0]);
    format!("{number}-{first}-{second}")
}

/// [`generate_transfer_code`] using the thread-local RNG.
pub fn random_transfer_code() -> String {
    generate_transfer_code(&mut rand::thread_rng())
}

/// Check whether `code` has the shape produced by [`generate_transfer_code`].
pub fn is_generated_code(code: &str) -> bool {
    let mut parts = code.split('-');
    let (Some(number), Some(first), Some(second), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    let number_ok = !number.is_empty()
        && number.len() <= 2
        && number.bytes().all(|b| b.is_ascii_digit())
        && number.parse::<u8>().is_ok_and(|n| n < 100);

    number_ok && VOCABULARY.contains(&first) && VOCABULARY.contains(&second)
}
