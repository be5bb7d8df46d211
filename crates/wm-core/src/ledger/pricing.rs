//! Synthetic pricing and the simulated network latency indicator.

use rand::Rng;

/// Bytes per mebibyte, the pricing granularity.
pub const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Flat fee charged for every transfer, in UNIT.
pub const BASE_PRICE: u64 = 10;

/// Price of a transfer in UNIT: the base fee plus one UNIT per whole MiB.
///
/// Integer division floors, so a file just under 1 MiB costs the base fee.
pub const fn calculate_price(file_size: u64) -> u64 {
    BASE_PRICE + file_size / BYTES_PER_MIB
}

/// Latency figure shown next to the balance.
///
/// `20ms` baseline plus `5ms` per MiB of the selected file plus `jitter`,
/// floored. Purely cosmetic.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn simulated_latency_ms(file_size: u64, jitter: f64) -> u64 {
    let mib = file_size as f64 / BYTES_PER_MIB as f64;
    (20.0 + mib * 5.0 + jitter).floor().max(0.0) as u64
}

/// [`simulated_latency_ms`] with jitter drawn from `[0, 10)`.
pub fn sample_latency_ms<R: Rng + ?Sized>(file_size: u64, rng: &mut R) -> u64 {
    simulated_latency_ms(file_size, rng.gen_range(0.0..10.0))
}
