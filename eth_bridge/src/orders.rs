use soroban_sdk::{contracttype, Address, BytesN, Env, Map, Vec};

use crate::storage;
use crate::Error;

/// Maximum number of orders the store tracks at once.
pub const ORDER_CAPACITY: u32 = 256;

/// Most settled orders removed by one purge call.
pub const PURGE_BATCH_LIMIT: u32 = 16;

/// Classification tag given to every new order. Reserved.
pub const ORDER_TYPE_DEFAULT: u32 = 0;

/// Order status. `Completed` and `Refunded` are terminal.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum OrderStatus {
    Created = 0,
    Completed = 1,
    Refunded = 2,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, OrderStatus::Created)
    }
}

/// One bridge transfer attempt
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BridgeOrder {
    pub order_id: u64,
    pub qubic_sender: Address,
    pub eth_address: BytesN<32>,
    pub amount: u64,
    pub order_type: u32,
    pub status: OrderStatus,
    pub from_qubic_to_ethereum: bool,
}

/// Persistent key of a single order record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OrderKey {
    Order(u64),
}

/// Fixed-capacity store of orders keyed by id.
///
/// Each record lives under its own [`OrderKey`] in persistent storage. Only the
/// `id -> status` index is kept with the rest of the bridge state, so capacity
/// checks and purging never load the records themselves. Writes and removals
/// are buffered here and flushed by `storage::save`.
///
/// Inserting into a full store fails with [`Error::StoreFull`]; nothing is ever
/// evicted implicitly. Settled orders leave only through [`OrderStore::remove_settled`].
#[derive(Clone)]
pub struct OrderStore {
    env: Env,
    pub index: Map<u64, OrderStatus>,
    pub capacity: u32,
    written: Map<u64, BridgeOrder>,
    removed: Vec<u64>,
}

impl OrderStore {
    pub fn new(env: &Env, capacity: u32) -> Self {
        Self::from_index(env, Map::new(env), capacity)
    }

    pub fn from_index(env: &Env, index: Map<u64, OrderStatus>, capacity: u32) -> Self {
        Self {
            env: env.clone(),
            index,
            capacity,
            written: Map::new(env),
            removed: Vec::new(env),
        }
    }

    pub fn len(&self) -> u32 {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    pub fn insert(&mut self, order: BridgeOrder) -> Result<(), Error> {
        if self.index.contains_key(order.order_id) {
            return Err(Error::InvalidOrderState);
        }
        if self.is_full() {
            return Err(Error::StoreFull);
        }
        self.index.set(order.order_id, order.status);
        self.written.set(order.order_id, order);
        Ok(())
    }

    pub fn get(&self, order_id: u64) -> Option<BridgeOrder> {
        if !self.index.contains_key(order_id) {
            return None;
        }
        self.written
            .get(order_id)
            .or_else(|| storage::read_order(&self.env, order_id))
    }

    pub fn update(&mut self, order: BridgeOrder) -> Result<(), Error> {
        if !self.index.contains_key(order.order_id) {
            return Err(Error::OrderNotFound);
        }
        self.index.set(order.order_id, order.status);
        self.written.set(order.order_id, order);
        Ok(())
    }

    /// Drop up to `limit` completed or refunded orders, lowest ids first,
    /// returning how many went.
    pub fn remove_settled(&mut self, limit: u32) -> u32 {
        let mut to_remove: Vec<u64> = Vec::new(&self.env);
        for (id, status) in self.index.iter() {
            if to_remove.len() >= limit {
                break;
            }
            if status.is_terminal() {
                to_remove.push_back(id);
            }
        }
        for id in to_remove.iter() {
            self.index.remove(id);
            self.written.remove(id);
            self.removed.push_back(id);
        }
        to_remove.len()
    }

    /// Records changed since the store was loaded.
    pub fn pending_writes(&self) -> &Map<u64, BridgeOrder> {
        &self.written
    }

    /// Ids removed since the store was loaded.
    pub fn pending_removals(&self) -> &Vec<u64> {
        &self.removed
    }
}
