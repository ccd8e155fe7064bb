#![cfg(test)]

use eth_bridge::{BridgeLog, EthBridge, EthBridgeClient, NAMESPACE};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{symbol_short, testutils::Events, Address, BytesN, Env, Symbol, TryFromVal};

fn last_event(e: &Env) -> (Address, Symbol, u32, Symbol, BridgeLog) {
    let all_events = e.events().all();
    assert!(all_events.len() > 0, "No events were emitted!");
    let (contract, topics, data) = all_events.last().unwrap();

    let namespace: Symbol = Symbol::try_from_val(e, &topics.get(0).unwrap()).unwrap();
    let category: u32 = u32::try_from_val(e, &topics.get(1).unwrap()).unwrap();
    let action: Symbol = Symbol::try_from_val(e, &topics.get(2).unwrap()).unwrap();
    let log = BridgeLog::try_from_val(e, &data).unwrap();
    (contract, namespace, category, action, log)
}

#[test]
fn test_order_lifecycle_events() {
    let e = Env::default();
    e.mock_all_auths();

    let contract_id = e.register_contract(None, EthBridge);
    let client = EthBridgeClient::new(&e, &contract_id);

    let admin = Address::generate(&e);
    let token = e
        .register_stellar_asset_contract_v2(Address::generate(&e))
        .address();
    client.initialize(&admin, &token);

    let (contract, namespace, category, action, log) = last_event(&e);
    assert_eq!(contract, contract_id);
    assert_eq!(namespace, NAMESPACE);
    assert_eq!(namespace, symbol_short!("EthBridge"));
    assert_eq!(category, 3u32); // System
    assert_eq!(action, symbol_short!("init"));
    assert_eq!(log.error_code, 0);

    let user = Address::generate(&e);
    StellarAssetClient::new(&e, &token).mint(&user, &10_000);
    client.transfer_to_contract(&user, &2_000);

    let (_, _, category, action, log) = last_event(&e);
    assert_eq!(category, 1u32); // Funds
    assert_eq!(action, symbol_short!("deposit"));
    assert_eq!(log.order_id, 0);
    assert_eq!(log.amount, 2_000);

    let eth = BytesN::from_array(&e, &[9u8; 32]);
    let order_id = client.create_order(&user, &eth, &750, &true, &1000);

    let (contract, _, category, action, log) = last_event(&e);
    assert_eq!(contract, contract_id);
    assert_eq!(category, 0u32); // Order
    assert_eq!(action, symbol_short!("created"));
    assert_eq!(
        log,
        BridgeLog {
            error_code: 0,
            order_id,
            amount: 750,
        }
    );

    let manager = Address::generate(&e);
    client.add_manager(&admin, &manager);
    let (_, _, category, action, _) = last_event(&e);
    assert_eq!(category, 2u32); // Access
    assert_eq!(action, symbol_short!("mgr_add"));

    client.complete_order(&manager, &order_id);
    let (_, _, _, action, log) = last_event(&e);
    assert_eq!(action, symbol_short!("completed"));
    assert_eq!(log.order_id, order_id);
    assert_eq!(log.amount, 750);

    let second = client.create_order(&user, &eth, &250, &false, &1000);
    client.refund_order(&manager, &second);
    let (_, _, _, action, log) = last_event(&e);
    assert_eq!(action, symbol_short!("refunded"));
    assert_eq!(log.order_id, second);
    assert_eq!(log.amount, 250);

    assert_eq!(client.purge_settled_orders(&admin), 2);
    let (_, _, category, action, log) = last_event(&e);
    assert_eq!(category, 3u32);
    assert_eq!(action, symbol_short!("purged"));
    assert_eq!(log.amount, 2);
}

#[test]
fn test_failed_calls_publish_nothing() {
    let e = Env::default();
    e.mock_all_auths();

    let contract_id = e.register_contract(None, EthBridge);
    let client = EthBridgeClient::new(&e, &contract_id);
    let admin = Address::generate(&e);
    let token = e
        .register_stellar_asset_contract_v2(Address::generate(&e))
        .address();
    client.initialize(&admin, &token);

    let user = Address::generate(&e);
    StellarAssetClient::new(&e, &token).mint(&user, &10_000);
    let eth = BytesN::from_array(&e, &[9u8; 32]);
    assert!(client.try_create_order(&user, &eth, &0, &true, &1000).is_err());
    assert!(client.try_create_order(&user, &eth, &5, &true, &1).is_err());

    for (contract, topics, data) in e.events().all().iter() {
        if contract != contract_id {
            continue;
        }
        let action: Symbol = Symbol::try_from_val(&e, &topics.get(2).unwrap()).unwrap();
        assert_ne!(action, symbol_short!("created"));
        assert_eq!(BridgeLog::try_from_val(&e, &data).unwrap().error_code, 0);
    }
    assert_eq!(client.get_next_order_id(), 0);
}
