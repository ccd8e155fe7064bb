//! Order state machine: `Created -> Completed | Refunded`.
//!
//! Every transition validates first and mutates last, so a failed call leaves
//! `state` exactly as it found it.

use soroban_sdk::{Address, BytesN};

use crate::orders::{BridgeOrder, OrderStatus, ORDER_TYPE_DEFAULT};
use crate::storage::BridgeState;
use crate::transfer::NativeTransfer;
use crate::Error;

/// Record a new order for `caller` and return its id.
///
/// Only the fee moves here; the bridged amount is settled by
/// [`complete_order`] or [`refund_order`].
pub fn create_order(
    state: &mut BridgeState,
    bank: &impl NativeTransfer,
    caller: &Address,
    eth_address: BytesN<32>,
    amount: u64,
    from_qubic_to_ethereum: bool,
    fee: u64,
) -> Result<u64, Error> {
    if amount == 0 {
        return Err(Error::InvalidAmount);
    }
    state.ledger.require_fee(fee)?;
    if state.orders.is_full() {
        return Err(Error::StoreFull);
    }

    let order_id = state.next_order_id;
    let next_order_id = order_id.checked_add(1).ok_or(Error::BalanceOverflow)?;

    if fee > 0 {
        bank.collect(caller, fee)?;
        state.ledger.record_fee(fee)?;
    }

    state.orders.insert(BridgeOrder {
        order_id,
        qubic_sender: caller.clone(),
        eth_address,
        amount,
        order_type: ORDER_TYPE_DEFAULT,
        status: OrderStatus::Created,
        from_qubic_to_ethereum,
    })?;
    state.next_order_id = next_order_id;

    Ok(order_id)
}

fn open_order(
    state: &BridgeState,
    caller: &Address,
    order_id: u64,
) -> Result<BridgeOrder, Error> {
    state.access.require_manager(caller)?;
    let order = state.orders.get(order_id).ok_or(Error::OrderNotFound)?;
    if order.status != OrderStatus::Created {
        return Err(Error::InvalidOrderState);
    }
    Ok(order)
}

/// Settle an open order. Returns the settled order.
///
/// Outbound orders earmark part of the deposited pool as locked; inbound orders
/// pay the sender out of the locked pool.
pub fn complete_order(
    state: &mut BridgeState,
    bank: &impl NativeTransfer,
    caller: &Address,
    order_id: u64,
) -> Result<BridgeOrder, Error> {
    let mut order = open_order(state, caller, order_id)?;

    if order.from_qubic_to_ethereum {
        state.ledger.lock_received(order.amount)?;
    } else {
        state.ledger.ensure_locked(order.amount)?;
        bank.pay(&order.qubic_sender, order.amount)?;
        state.ledger.release_locked(order.amount)?;
    }

    order.status = OrderStatus::Completed;
    state.orders.update(order.clone())?;
    Ok(order)
}

/// Return the order amount to its sender and close the order.
///
/// The locked pool is drawn down for either direction. The payout is checked:
/// a failed transfer aborts the refund with [`Error::TransferFailed`].
pub fn refund_order(
    state: &mut BridgeState,
    bank: &impl NativeTransfer,
    caller: &Address,
    order_id: u64,
) -> Result<BridgeOrder, Error> {
    let mut order = open_order(state, caller, order_id)?;

    state.ledger.ensure_locked(order.amount)?;
    bank.pay(&order.qubic_sender, order.amount)?;
    state.ledger.release_locked(order.amount)?;

    order.status = OrderStatus::Refunded;
    state.orders.update(order.clone())?;
    Ok(order)
}
