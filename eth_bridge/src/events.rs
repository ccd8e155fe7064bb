use soroban_sdk::{contracttype, symbol_short, Env, Symbol};

/// Topic namespace shared by every bridge event.
pub const NAMESPACE: Symbol = symbol_short!("EthBridge");

#[derive(Clone, Copy)]
#[repr(u32)]
pub enum EventCategory {
    Order = 0,
    Funds = 1,
    Access = 2,
    System = 3,
}

impl EventCategory {
    pub fn to_u32(self) -> u32 {
        self as u32
    }
}

/// Payload of every bridge event. The emitting contract is carried by the
/// event itself.
///
/// Only successful calls publish: the host discards the events of a failed
/// invocation, which reports its `Error` as the call result instead. The
/// code field therefore reads 0 on every published record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BridgeLog {
    /// 0 on success, otherwise the `Error` code
    pub error_code: u32,
    /// 0 when no order is involved
    pub order_id: u64,
    /// 0 when no amount is involved
    pub amount: u64,
}

pub struct BridgeEvents;

impl BridgeEvents {
    pub fn emit(e: &Env, category: EventCategory, action: Symbol, order_id: u64, amount: u64) {
        let topics = (NAMESPACE, category.to_u32(), action);
        e.events().publish(
            topics,
            BridgeLog {
                error_code: 0,
                order_id,
                amount,
            },
        );
    }
}
