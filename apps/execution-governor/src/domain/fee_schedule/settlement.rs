//! Fee computation and the recipient/cashback split.

use serde::{Deserialize, Serialize};

use crate::domain::shared::{Amount, BasisPoints};

/// Maximum administratively accepted cashback rate (5%).
pub const MAX_CASHBACK_RATE: BasisPoints = BasisPoints::new(500);

/// A fee divided between the fee recipient and the order owner.
///
/// `net_fee + cashback == fee` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    /// Portion paid to the fee recipient.
    pub net_fee: Amount,
    /// Portion refunded to the order owner.
    pub cashback: Amount,
}

impl FeeSplit {
    /// The whole fee goes to the recipient.
    #[must_use]
    pub const fn without_cashback(fee: Amount) -> Self {
        Self {
            net_fee: fee,
            cashback: Amount::ZERO,
        }
    }
}

/// Stateless fee arithmetic. Integer floor division throughout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementSplitter;

impl SettlementSplitter {
    /// `floor(amount * fee_rate / 10_000)`.
    #[must_use]
    pub fn fee_for(amount: Amount, fee_rate: BasisPoints) -> Amount {
        amount.bps_portion(fee_rate)
    }

    /// Split `fee` into `(net_fee, cashback)` with
    /// `cashback = floor(fee * cashback_rate / 10_000)`.
    ///
    /// Rates above 100% are treated as 100%.
    #[must_use]
    pub fn split(fee: Amount, cashback_rate: BasisPoints) -> FeeSplit {
        let cashback = fee.bps_portion(cashback_rate);
        FeeSplit {
            net_fee: fee.saturating_sub(cashback),
            cashback,
        }
    }
}
