//! Coin balance used to buy defenders.

use cube_defence_core::InsufficientFunds;

/// Holds the player's coins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Store {
    balance: u32,
}

impl Store {
    /// Opens a store with the provided balance.
    #[must_use]
    pub const fn new(balance: u32) -> Self {
        Self { balance }
    }

    /// Current balance.
    #[must_use]
    pub const fn balance(&self) -> u32 {
        self.balance
    }

    /// Withdraws `cost` coins, returning the new balance.
    ///
    /// The balance is left untouched when it cannot cover the cost.
    pub fn purchase(&mut self, cost: u32) -> Result<u32, InsufficientFunds> {
        let balance = self
            .balance
            .checked_sub(cost)
            .ok_or(InsufficientFunds {
                balance: self.balance,
                cost,
            })?;
        self.balance = balance;
        Ok(balance)
    }

    /// Adds `amount` coins, returning the new balance.
    pub fn deposit(&mut self, amount: u32) -> u32 {
        self.balance = self.balance.saturating_add(amount);
        self.balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchase_beyond_balance_is_refused() {
        let mut store = Store::new(200);
        assert_eq!(store.purchase(200), Ok(0));
        assert_eq!(
            store.purchase(1),
            Err(InsufficientFunds {
                balance: 0,
                cost: 1
            })
        );
        assert_eq!(store.balance(), 0);
    }

    #[test]
    fn deposits_accumulate() {
        let mut store = Store::new(0);
        assert_eq!(store.deposit(100), 100);
        assert_eq!(store.deposit(100), 200);
        assert_eq!(store.purchase(150), Ok(50));
    }
}
