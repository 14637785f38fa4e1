//! Fee rates
//!
//! Fee rates come from the blockchain data service; this module only turns
//! a rate and an estimated vsize into an absolute fee.

use serde::{Deserialize, Serialize};

/// Fee rate in satoshis per virtual byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FeeRate(pub u64);

impl FeeRate {
    /// Create from satoshis per vbyte
    pub fn from_sat_per_vbyte(rate: u64) -> Self {
        Self(rate)
    }

    /// Calculate fee for a given vsize
    pub fn fee_for_vsize(&self, vsize: u64) -> u64 {
        self.0.saturating_mul(vsize)
    }

    /// Get rate as satoshis per vbyte
    pub fn as_sat_per_vbyte(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_rate() {
        let rate = FeeRate::from_sat_per_vbyte(10);
        assert_eq!(rate.fee_for_vsize(141), 1410);
        assert_eq!(rate.as_sat_per_vbyte(), 10);
        assert_eq!(FeeRate::from_sat_per_vbyte(0).fee_for_vsize(141), 0);
    }

    #[test]
    fn test_fee_does_not_overflow() {
        assert_eq!(FeeRate(u64::MAX).fee_for_vsize(2), u64::MAX);
    }
}
