use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, TryFromVal, Val};

use crate::access::AccessControl;
use crate::ledger::{BalanceLedger, DEFAULT_TRANSACTION_FEE};
use crate::orders::{BridgeOrder, OrderKey, OrderStore, ORDER_CAPACITY};
use crate::Error;

/// Chain tag reported by order queries. Zero marks a non-EVM source.
pub const SOURCE_CHAIN: u32 = 0;

// Storage TTL constants
const INSTANCE_LIFETIME_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_BUMP_AMOUNT: u32 = 518400; // ~30 days
const ORDER_LIFETIME_THRESHOLD: u32 = 17280; // ~1 day
const ORDER_BUMP_AMOUNT: u32 = 518400; // ~30 days

const ACCESS: Symbol = symbol_short!("ACCESS");
// Order status index; the records themselves are under `OrderKey`
const ORDERS: Symbol = symbol_short!("ORDERS");
const LEDGER: Symbol = symbol_short!("LEDGER");
const NEXT_ID: Symbol = symbol_short!("NEXT_ID");
const CONFIG: Symbol = symbol_short!("CONFIG");

/// Fixed settings chosen at initialization
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BridgeConfig {
    /// Token contract of the native asset used for fees, deposits and payouts
    pub native_token: Address,
    pub source_chain: u32,
}

/// Everything the bridge persists between calls.
///
/// Loaded once at the start of an invocation, handed to the core by `&mut`,
/// and written back only when the invocation succeeds. Order records are read
/// lazily through [`read_order`].
#[derive(Clone)]
pub struct BridgeState {
    pub access: AccessControl,
    pub orders: OrderStore,
    pub ledger: BalanceLedger,
    pub next_order_id: u64,
    pub config: BridgeConfig,
}

impl BridgeState {
    pub fn new(env: &Env, admin: Address, native_token: Address) -> Self {
        Self {
            access: AccessControl::new(env, admin),
            orders: OrderStore::new(env, ORDER_CAPACITY),
            ledger: BalanceLedger::new(DEFAULT_TRANSACTION_FEE),
            next_order_id: 0,
            config: BridgeConfig {
                native_token,
                source_chain: SOURCE_CHAIN,
            },
        }
    }
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load(env: &Env) -> Result<BridgeState, Error> {
    Ok(BridgeState {
        access: get_required(env, &ACCESS)?,
        orders: OrderStore::from_index(env, get_required(env, &ORDERS)?, ORDER_CAPACITY),
        ledger: get_required(env, &LEDGER)?,
        next_order_id: env.storage().instance().get(&NEXT_ID).unwrap_or(0u64),
        config: get_required(env, &CONFIG)?,
    })
}

pub fn save(env: &Env, state: &BridgeState) {
    extend_instance_ttl(env);
    env.storage().instance().set(&ACCESS, &state.access);
    env.storage().instance().set(&ORDERS, &state.orders.index);
    env.storage().instance().set(&LEDGER, &state.ledger);
    env.storage()
        .instance()
        .set(&NEXT_ID, &state.next_order_id);
    env.storage().instance().set(&CONFIG, &state.config);

    for (_, order) in state.orders.pending_writes().iter() {
        write_order(env, &order);
    }
    for order_id in state.orders.pending_removals().iter() {
        env.storage()
            .persistent()
            .remove(&OrderKey::Order(order_id));
    }
}

/// Stored record of `order_id`, bumping its TTL when present.
pub fn read_order(env: &Env, order_id: u64) -> Option<BridgeOrder> {
    let key = OrderKey::Order(order_id);
    let order: BridgeOrder = env.storage().persistent().get(&key)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, ORDER_LIFETIME_THRESHOLD, ORDER_BUMP_AMOUNT);
    Some(order)
}

fn write_order(env: &Env, order: &BridgeOrder) {
    let key = OrderKey::Order(order.order_id);
    env.storage().persistent().set(&key, order);
    env.storage()
        .persistent()
        .extend_ttl(&key, ORDER_LIFETIME_THRESHOLD, ORDER_BUMP_AMOUNT);
}

fn get_required<V: TryFromVal<Env, Val>>(env: &Env, key: &Symbol) -> Result<V, Error> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(Error::NotInitialized)
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
