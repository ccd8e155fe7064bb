#![no_std]

//! # ETH Bridge
//!
//! Order ledger for a two-way token bridge between this ledger and Ethereum.
//! Users open bridge orders, managers settle them (complete or refund), and the
//! contract keeps three balance counters consistent across every transition:
//! tokens locked for inbound payouts, tokens received through deposits, and the
//! fee charged per order.
//!
//! All value moves in the native asset, a token contract bound at
//! initialization. Relaying and proving Ethereum-side events happens elsewhere;
//! managers are trusted to call `complete_order` only for orders that were
//! honoured on the other chain.
//!
//! ## Roles
//!
//! - **admin**: set at initialization, may hand itself over, manages the
//!   manager set, the order fee, and pruning of settled orders.
//! - **managers**: complete and refund orders.
//! - anyone else may create orders, deposit, and query.

mod access;
mod deposit;
mod events;
mod ledger;
mod lifecycle;
mod orders;
mod storage;
mod transfer;

pub use access::{AccessControl, MAX_MANAGERS};
pub use events::{BridgeLog, EventCategory, NAMESPACE};
pub use ledger::{BalanceLedger, DEFAULT_TRANSACTION_FEE};
pub use orders::{
    BridgeOrder, OrderKey, OrderStatus, OrderStore, ORDER_CAPACITY, ORDER_TYPE_DEFAULT,
    PURGE_BATCH_LIMIT,
};
pub use storage::{BridgeConfig, SOURCE_CHAIN};
pub use transfer::{NativeTransfer, TokenTransfer};

use events::BridgeEvents;
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, BytesN, Env,
    String,
};

/// Placeholder memo attached to every order view.
pub const ORDER_MEMO: &str = "Bridge transfer details";

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    PermissionDenied = 1,
    InvalidAmount = 2,
    InsufficientFee = 3,
    OrderNotFound = 4,
    InvalidOrderState = 5,
    InsufficientLockedTokens = 6,
    TransferFailed = 7,
    StoreFull = 8,
    AlreadyInitialized = 9,
    NotInitialized = 10,
    BalanceOverflow = 11,
}

/// Public view of an order
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderResponse {
    pub order_id: u64,
    pub origin_account: Address,
    pub destination_account: BytesN<32>,
    pub amount: u64,
    pub memo: String,
    pub source_chain: u32,
}

#[contract]
pub struct EthBridge;

#[contractimpl]
impl EthBridge {
    /// Initialize the bridge with `admin` as its creator and `native_token` as
    /// the asset used for fees, deposits and payouts.
    ///
    /// The first successful call wins and binds the admin for good, so deploy
    /// and initialize in the same transaction; a gap between them lets any
    /// account claim the admin role.
    pub fn initialize(env: Env, admin: Address, native_token: Address) -> Result<(), Error> {
        admin.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        let state = storage::BridgeState::new(&env, admin, native_token);
        storage::save(&env, &state);
        BridgeEvents::emit(&env, EventCategory::System, symbol_short!("init"), 0, 0);
        Ok(())
    }

    // --- Orders ---

    /// Open a bridge order and return its id. `fee` is taken from the caller
    /// and must cover the configured transaction fee.
    pub fn create_order(
        env: Env,
        caller: Address,
        eth_address: BytesN<32>,
        amount: u64,
        from_qubic_to_ethereum: bool,
        fee: u64,
    ) -> Result<u64, Error> {
        caller.require_auth();
        let mut state = storage::load(&env)?;
        let bank = TokenTransfer::new(&env, &state.config.native_token);

        let order_id = lifecycle::create_order(
            &mut state,
            &bank,
            &caller,
            eth_address,
            amount,
            from_qubic_to_ethereum,
            fee,
        )?;

        storage::save(&env, &state);
        BridgeEvents::emit(
            &env,
            EventCategory::Order,
            symbol_short!("created"),
            order_id,
            amount,
        );
        Ok(order_id)
    }

    /// Settle an order (managers only)
    pub fn complete_order(env: Env, caller: Address, order_id: u64) -> Result<(), Error> {
        caller.require_auth();
        let mut state = storage::load(&env)?;
        let bank = TokenTransfer::new(&env, &state.config.native_token);

        let order = lifecycle::complete_order(&mut state, &bank, &caller, order_id)?;

        storage::save(&env, &state);
        BridgeEvents::emit(
            &env,
            EventCategory::Order,
            symbol_short!("completed"),
            order_id,
            order.amount,
        );
        Ok(())
    }

    /// Pay an open order back to its sender (managers only)
    pub fn refund_order(env: Env, caller: Address, order_id: u64) -> Result<(), Error> {
        caller.require_auth();
        let mut state = storage::load(&env)?;
        let bank = TokenTransfer::new(&env, &state.config.native_token);

        let order = lifecycle::refund_order(&mut state, &bank, &caller, order_id)?;

        storage::save(&env, &state);
        BridgeEvents::emit(
            &env,
            EventCategory::Order,
            symbol_short!("refunded"),
            order_id,
            order.amount,
        );
        Ok(())
    }

    /// Deposit native tokens into bridge custody.
    pub fn transfer_to_contract(env: Env, caller: Address, amount: u64) -> Result<(), Error> {
        caller.require_auth();
        let mut state = storage::load(&env)?;
        let bank = TokenTransfer::new(&env, &state.config.native_token);

        deposit::transfer_to_contract(&mut state, &bank, &caller, amount)?;

        storage::save(&env, &state);
        BridgeEvents::emit(&env, EventCategory::Funds, symbol_short!("deposit"), 0, amount);
        Ok(())
    }

    pub fn get_order(env: Env, order_id: u64) -> Result<OrderResponse, Error> {
        let state = storage::load(&env)?;
        let order = state.orders.get(order_id).ok_or(Error::OrderNotFound)?;
        Ok(OrderResponse {
            order_id: order.order_id,
            origin_account: order.qubic_sender,
            destination_account: order.eth_address,
            amount: order.amount,
            memo: String::from_str(&env, ORDER_MEMO),
            source_chain: state.config.source_chain,
        })
    }

    /// Full stored record of an order, including status and direction.
    pub fn get_order_record(env: Env, order_id: u64) -> Result<Option<BridgeOrder>, Error> {
        Ok(storage::load(&env)?.orders.get(order_id))
    }

    // --- Administration ---

    pub fn set_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        caller.require_auth();
        let mut state = storage::load(&env)?;
        state.access.set_admin(&caller, new_admin)?;
        storage::save(&env, &state);
        BridgeEvents::emit(&env, EventCategory::Access, symbol_short!("admin_set"), 0, 0);
        Ok(())
    }

    pub fn add_manager(env: Env, caller: Address, manager: Address) -> Result<(), Error> {
        caller.require_auth();
        let mut state = storage::load(&env)?;
        state.access.add_manager(&caller, manager)?;
        storage::save(&env, &state);
        BridgeEvents::emit(&env, EventCategory::Access, symbol_short!("mgr_add"), 0, 0);
        Ok(())
    }

    pub fn remove_manager(env: Env, caller: Address, manager: Address) -> Result<(), Error> {
        caller.require_auth();
        let mut state = storage::load(&env)?;
        state.access.remove_manager(&caller, manager)?;
        storage::save(&env, &state);
        BridgeEvents::emit(&env, EventCategory::Access, symbol_short!("mgr_rm"), 0, 0);
        Ok(())
    }

    /// Change the minimum fee charged by `create_order` (admin only).
    pub fn set_transaction_fee(env: Env, caller: Address, fee: u64) -> Result<(), Error> {
        caller.require_auth();
        let mut state = storage::load(&env)?;
        state.access.require_admin(&caller)?;
        state.ledger.transaction_fee = fee;
        storage::save(&env, &state);
        BridgeEvents::emit(&env, EventCategory::System, symbol_short!("fee_set"), 0, fee);
        Ok(())
    }

    /// Remove completed and refunded orders to free store capacity (admin only).
    /// At most `PURGE_BATCH_LIMIT` orders go per call; returns how many were
    /// removed, so a result equal to the limit means more may remain.
    pub fn purge_settled_orders(env: Env, caller: Address) -> Result<u32, Error> {
        caller.require_auth();
        let mut state = storage::load(&env)?;
        state.access.require_admin(&caller)?;
        let removed = state.orders.remove_settled(PURGE_BATCH_LIMIT);
        storage::save(&env, &state);
        BridgeEvents::emit(
            &env,
            EventCategory::System,
            symbol_short!("purged"),
            0,
            u64::from(removed),
        );
        Ok(removed)
    }

    // --- Queries ---

    pub fn get_total_received_tokens(env: Env) -> Result<u64, Error> {
        Ok(storage::load(&env)?.ledger.total_received_tokens)
    }

    pub fn get_locked_tokens(env: Env) -> Result<u64, Error> {
        Ok(storage::load(&env)?.ledger.locked_tokens)
    }

    pub fn get_transaction_fee(env: Env) -> Result<u64, Error> {
        Ok(storage::load(&env)?.ledger.transaction_fee)
    }

    pub fn get_collected_fees(env: Env) -> Result<u64, Error> {
        Ok(storage::load(&env)?.ledger.collected_fees)
    }

    pub fn get_next_order_id(env: Env) -> Result<u64, Error> {
        Ok(storage::load(&env)?.next_order_id)
    }

    pub fn get_order_count(env: Env) -> Result<u32, Error> {
        Ok(storage::load(&env)?.orders.len())
    }

    pub fn get_admin(env: Env) -> Result<Address, Error> {
        Ok(storage::load(&env)?.access.admin)
    }

    pub fn is_manager(env: Env, who: Address) -> Result<bool, Error> {
        Ok(storage::load(&env)?.access.is_manager(&who))
    }
}
