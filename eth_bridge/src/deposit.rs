use soroban_sdk::Address;

use crate::storage::BridgeState;
use crate::transfer::NativeTransfer;
use crate::Error;

/// Move `amount` of the caller's native balance into bridge custody and
/// count it as received.
pub fn transfer_to_contract(
    state: &mut BridgeState,
    bank: &impl NativeTransfer,
    caller: &Address,
    amount: u64,
) -> Result<(), Error> {
    if amount == 0 {
        return Err(Error::InvalidAmount);
    }
    if bank.balance(caller) < i128::from(amount) {
        return Err(Error::InsufficientLockedTokens);
    }
    // Fail before the transfer rather than after it
    state
        .ledger
        .total_received_tokens
        .checked_add(amount)
        .ok_or(Error::BalanceOverflow)?;

    bank.collect(caller, amount)?;
    state.ledger.record_deposit(amount)
}
