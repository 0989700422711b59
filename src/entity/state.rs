use rust_decimal::Decimal;

use super::PendingDeal;

/// Conversation step of a single user.
///
/// Deal-entry variants carry exactly the values collected so far, so a buy
/// price can never exist without an amount.
#[derive(Clone, Default, Debug, PartialEq)]
pub enum State {
    #[default]
    Idle,
    AwaitingPairName,
    AwaitingDealPairChoice,
    AwaitingAmount {
        pair: String,
    },
    AwaitingBuyPrice {
        pair: String,
        amount: Decimal,
    },
    AwaitingSellPrice {
        pair: String,
        amount: Decimal,
        buy_price: Decimal,
    },
}

impl State {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            State::Idle => "Idle",
            State::AwaitingPairName => "AwaitingPairName",
            State::AwaitingDealPairChoice => "AwaitingDealPairChoice",
            State::AwaitingAmount { .. } => "AwaitingAmount",
            State::AwaitingBuyPrice { .. } => "AwaitingBuyPrice",
            State::AwaitingSellPrice { .. } => "AwaitingSellPrice",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, State::Idle)
    }

    /// The deal under construction, if the user is inside the deal flow
    pub fn pending_deal(&self) -> Option<PendingDeal> {
        match self {
            State::AwaitingAmount { pair } => Some(PendingDeal {
                pair: pair.clone(),
                amount: None,
                buy_price: None,
            }),
            State::AwaitingBuyPrice { pair, amount } => Some(PendingDeal {
                pair: pair.clone(),
                amount: Some(*amount),
                buy_price: None,
            }),
            State::AwaitingSellPrice {
                pair,
                amount,
                buy_price,
            } => Some(PendingDeal {
                pair: pair.clone(),
                amount: Some(*amount),
                buy_price: Some(*buy_price),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn idle_is_default_and_has_no_pending_deal() {
        let state = State::default();
        assert!(state.is_idle());
        assert_eq!(state.pending_deal(), None);
    }

    #[test]
    fn pending_deal_reflects_collected_fields() {
        let state = State::AwaitingSellPrice {
            pair: "BTC/USD".to_string(),
            amount: dec!(2),
            buy_price: dec!(100),
        };

        let pending = state.pending_deal().unwrap();
        assert_eq!(pending.pair, "BTC/USD");
        assert_eq!(pending.amount, Some(dec!(2)));
        assert_eq!(pending.buy_price, Some(dec!(100)));
        assert_eq!(state.name(), "AwaitingSellPrice");
    }
}
