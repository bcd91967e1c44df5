// SPDX-License-Identifier: MIT

//! Identifier generation.
//!
//! Repository identifiers are opaque but monotonically skewed: a short
//! base58 encoding of randomness concatenated with a millisecond offset from
//! a fixed epoch, per the data model. They are not used as a sort key
//! anywhere in this subsystem — the skew only means two ids minted close in
//! time tend to sort close together, which keeps them eyeball-diffable in
//! logs.

use rand::RngCore;
use std::time::{SystemTime, UNIX_EPOCH};

/// Epoch used for the millisecond offset component, chosen arbitrarily
/// (2024-01-01T00:00:00Z) to keep the offset small relative to an
/// all-zero UNIX epoch.
const FIXED_EPOCH_MS: u128 = 1_704_067_200_000;

/// Generates opaque identifiers.
pub trait IdGen: Send + Sync {
    fn next(&self) -> String;
}

/// Generates repository identifiers: `base58(8 random bytes)-base58(offset_ms)`.
pub trait RepositoryIdGen: IdGen {}
impl<T: IdGen> RepositoryIdGen for T {}

/// Production id generator: OS randomness plus wall-clock offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRepositoryIdGen;

impl IdGen for RandomRepositoryIdGen {
    fn next(&self) -> String {
        let mut bytes = [0u8; 8];
        rand::thread_rng().fill_bytes(&mut bytes);
        let random_part = bs58::encode(bytes).into_string();

        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(FIXED_EPOCH_MS);
        let offset = now_ms.saturating_sub(FIXED_EPOCH_MS);
        let offset_part = bs58::encode(offset.to_be_bytes()).into_string();

        format!("{random_part}-{offset_part}")
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
