use soroban_sdk::{token::TokenClient, Address, Env};

use crate::Error;

/// Movement of the native asset between users and the bridge's custody.
///
/// The balances behind it belong to the host; the bridge only reads them and
/// asks for transfers, each of which either succeeds or reports failure.
pub trait NativeTransfer {
    /// Balance `who` holds in the native asset.
    fn balance(&self, who: &Address) -> i128;

    /// Move `amount` from `from` into the bridge's custody.
    fn collect(&self, from: &Address, amount: u64) -> Result<(), Error>;

    /// Pay `amount` out of the bridge's custody to `to`.
    fn pay(&self, to: &Address, amount: u64) -> Result<(), Error>;
}

/// [`NativeTransfer`] backed by a token contract, with the current contract
/// as custodian.
pub struct TokenTransfer<'a> {
    client: TokenClient<'a>,
    custody: Address,
}

impl<'a> TokenTransfer<'a> {
    pub fn new(env: &'a Env, token: &Address) -> Self {
        Self {
            client: TokenClient::new(env, token),
            custody: env.current_contract_address(),
        }
    }

    fn transfer(&self, from: &Address, to: &Address, amount: u64) -> Result<(), Error> {
        match self.client.try_transfer(from, to, &i128::from(amount)) {
            Ok(Ok(())) => Ok(()),
            _ => Err(Error::TransferFailed),
        }
    }
}

impl NativeTransfer for TokenTransfer<'_> {
    fn balance(&self, who: &Address) -> i128 {
        self.client.balance(who)
    }

    fn collect(&self, from: &Address, amount: u64) -> Result<(), Error> {
        self.transfer(from, &self.custody, amount)
    }

    fn pay(&self, to: &Address, amount: u64) -> Result<(), Error> {
        self.transfer(&self.custody, to, amount)
    }
}
