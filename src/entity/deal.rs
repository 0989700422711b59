use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::DealError;

/// A committed deal. Immutable once stored.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Deal {
    pub user_id: i64,
    #[sqlx(rename = "pair_name")]
    pub pair: String,
    pub amount: Decimal,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
    pub profit: Decimal,
    pub profit_percent: Decimal,
    pub deal_date: DateTime<Utc>,
}

/// Deal fields collected so far by the wizard.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDeal {
    pub pair: String,
    pub amount: Option<Decimal>,
    pub buy_price: Option<Decimal>,
}

/// A fully populated deal that has not been committed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct DealDraft {
    pub pair: String,
    pub amount: Decimal,
    pub buy_price: Decimal,
    pub sell_price: Decimal,
}

impl DealDraft {
    /// (sell - buy) * amount
    pub fn profit(&self) -> Decimal {
        (self.sell_price - self.buy_price) * self.amount
    }

    /// (sell - buy) / buy * 100, at full precision
    pub fn profit_percent(&self) -> Result<Decimal, DealError> {
        if self.buy_price.is_zero() {
            return Err(DealError::DivisionByZero);
        }

        let ratio = (self.sell_price - self.buy_price)
            .checked_div(self.buy_price)
            .ok_or(DealError::DivisionByZero)?;

        Ok(ratio * Decimal::ONE_HUNDRED)
    }

    pub fn into_deal(self, user_id: i64, deal_date: DateTime<Utc>) -> Result<Deal, DealError> {
        let profit_percent = self.profit_percent()?;
        let profit = self.profit();

        Ok(Deal {
            user_id,
            pair: self.pair,
            amount: self.amount,
            buy_price: self.buy_price,
            sell_price: self.sell_price,
            profit,
            profit_percent,
            deal_date,
        })
    }
}
