use soroban_sdk::contracttype;

use crate::Error;

/// Fee charged on order creation when none has been configured.
pub const DEFAULT_TRANSACTION_FEE: u64 = 1000;

/// Aggregate balance counters of the bridge.
///
/// `locked_tokens` is what the contract holds for inbound payouts,
/// `total_received_tokens` is everything ever deposited through
/// `transfer_to_contract`. None of the counters may wrap: additions fail with
/// [`Error::BalanceOverflow`], subtractions with [`Error::InsufficientLockedTokens`].
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BalanceLedger {
    pub locked_tokens: u64,
    pub total_received_tokens: u64,
    pub transaction_fee: u64,
    pub collected_fees: u64,
}

impl BalanceLedger {
    pub fn new(transaction_fee: u64) -> Self {
        Self {
            locked_tokens: 0,
            total_received_tokens: 0,
            transaction_fee,
            collected_fees: 0,
        }
    }

    pub fn require_fee(&self, paid: u64) -> Result<(), Error> {
        if paid < self.transaction_fee {
            return Err(Error::InsufficientFee);
        }
        Ok(())
    }

    pub fn record_fee(&mut self, paid: u64) -> Result<(), Error> {
        self.collected_fees = self
            .collected_fees
            .checked_add(paid)
            .ok_or(Error::BalanceOverflow)?;
        Ok(())
    }

    pub fn record_deposit(&mut self, amount: u64) -> Result<(), Error> {
        self.total_received_tokens = self
            .total_received_tokens
            .checked_add(amount)
            .ok_or(Error::BalanceOverflow)?;
        Ok(())
    }

    /// Earmark `amount` of the deposited pool as locked. The pool itself is
    /// not drawn down.
    pub fn lock_received(&mut self, amount: u64) -> Result<(), Error> {
        if self.total_received_tokens < amount {
            return Err(Error::InsufficientLockedTokens);
        }
        self.locked_tokens = self
            .locked_tokens
            .checked_add(amount)
            .ok_or(Error::BalanceOverflow)?;
        Ok(())
    }

    pub fn ensure_locked(&self, amount: u64) -> Result<(), Error> {
        if self.locked_tokens < amount {
            return Err(Error::InsufficientLockedTokens);
        }
        Ok(())
    }

    pub fn release_locked(&mut self, amount: u64) -> Result<(), Error> {
        self.locked_tokens = self
            .locked_tokens
            .checked_sub(amount)
            .ok_or(Error::InsufficientLockedTokens)?;
        Ok(())
    }
}
