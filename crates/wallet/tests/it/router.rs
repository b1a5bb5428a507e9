use dao_wallet::{
    RequestRouter, WalletApi,
    core::Network,
    rpc::{
        error::{ErrorCode, WALLET_ERROR_CODE},
        request::Id,
    },
    session::{SessionContext, SessionRegistry},
    transport::SessionRequest,
};
use dao_wallet_test_utils::{
    DEPLOYER, GOVERNANCE_CONTRACT, MAINNET_ADDRESS, MockSigner, WALLET_1, WALLET_2, address,
    governance_contract,
};
use serde_json::{Value, json};
use std::{sync::Arc, time::Duration};

const TOPIC: &str = "dao-topic";

fn router() -> (RequestRouter, Arc<MockSigner>) {
    let signer = Arc::new(MockSigner::default());
    let api = WalletApi::new(signer.clone()).with_governance_contract(Some(governance_contract()));
    let sessions = SessionRegistry::new();
    sessions.insert(SessionContext::new(TOPIC, Some(address(WALLET_1)), Network::Testnet));
    (RequestRouter::new(api, sessions), signer)
}

fn request(id: i64, method: &str, params: Value) -> SessionRequest {
    SessionRequest {
        topic: TOPIC.into(),
        id: Id::Number(id),
        method: method.into(),
        params,
        chain_id: None,
    }
}

#[tokio::test]
async fn unsupported_method_yields_wallet_error() {
    let (router, signer) = router();
    let res = router.route(request(1, "stx_unknownMethod", json!({}))).await;

    assert_eq!(res.id(), &Id::Number(1));
    let err = res.result().as_error().unwrap();
    assert_eq!(err.code, ErrorCode::ServerError(WALLET_ERROR_CODE));
    assert_eq!(err.code.code(), -32000);
    assert_eq!(err.message, "Unsupported method: stx_unknownMethod");
    assert_eq!(
        serde_json::to_value(&res).unwrap()["error"],
        json!({"code": -32000, "message": "Unsupported method: stx_unknownMethod"})
    );
    assert!(signer.calls().is_empty());
}

#[tokio::test]
async fn string_ids_are_echoed() {
    let (router, _) = router();
    let mut req = request(0, "stx_getAddresses", Value::Null);
    req.id = Id::String("abc".into());
    let res = router.route(req).await;
    assert_eq!(res.id(), &Id::String("abc".into()));
    assert!(!res.is_error());
}

#[tokio::test]
async fn transfers_stx_for_session_account() {
    let (router, signer) = router();
    let res = router
        .route(request(
            2,
            "stx_transferStx",
            json!({
                "sender": WALLET_1,
                "recipient": WALLET_2,
                "amount": "2500000",
                "memo": "dues"
            }),
        ))
        .await;

    let txid = res.result().as_success().unwrap()["txid"].as_str().unwrap();
    assert_eq!(txid, format!("0x{:064x}", 1));
    let transfers = signer.transfers();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].sender, address(WALLET_1));
    assert_eq!(transfers[0].recipient, address(WALLET_2));
    assert_eq!(transfers[0].amount, 2_500_000);
    assert_eq!(transfers[0].memo.as_deref(), Some("dues"));
}

#[tokio::test]
async fn transfer_from_other_account_is_refused() {
    let (router, signer) = router();
    let res = router
        .route(request(
            3,
            "stx_transferStx",
            json!({ "sender": WALLET_2, "recipient": WALLET_1, "amount": 1 }),
        ))
        .await;
    assert!(res.result().as_error().unwrap().message.starts_with("address mismatch"));
    assert!(signer.transfers().is_empty());
}

#[tokio::test]
async fn transfer_to_mainnet_address_is_refused_on_testnet() {
    let (router, signer) = router();
    let res = router
        .route(request(
            4,
            "stx_transferStx",
            json!({ "sender": WALLET_1, "recipient": MAINNET_ADDRESS, "amount": 1 }),
        ))
        .await;
    assert!(res.is_error());
    assert!(signer.transfers().is_empty());
}

#[tokio::test]
async fn governance_calls_are_schema_checked() {
    let (router, signer) = router();

    let vote = json!({
        "contract": GOVERNANCE_CONTRACT,
        "functionName": "vote",
        "functionArgs": ["u1", "true"]
    });
    let res = router.route(request(5, "stx_callContract", vote)).await;
    assert!(!res.is_error(), "{res:?}");
    let calls = signer.calls();
    assert_eq!(calls[0].function_name, "vote");
    assert_eq!(calls[0].arg_literals(), ["u1", "true"]);
    assert_eq!(calls[0].sender, address(WALLET_1));

    let swapped = json!({
        "contract": GOVERNANCE_CONTRACT,
        "functionName": "vote",
        "functionArgs": ["true", "u1"]
    });
    let res = router.route(request(6, "stx_callContract", swapped)).await;
    assert!(res.result().as_error().unwrap().message.starts_with("invalid arguments for `vote`"));

    let unknown = json!({
        "contract": GOVERNANCE_CONTRACT,
        "functionName": "drain-treasury",
        "functionArgs": []
    });
    let res = router.route(request(7, "stx_callContract", unknown)).await;
    assert!(res.is_error());
    assert_eq!(signer.calls().len(), 1);
}

#[tokio::test]
async fn other_contracts_pass_through() {
    let (router, signer) = router();
    let res = router
        .route(request(
            8,
            "stx_callContract",
            json!({
                "contract": format!("{DEPLOYER}.token"),
                "functionName": "transfer",
                "functionArgs": ["u5", format!("'{WALLET_2}"), "\"gm\""]
            }),
        ))
        .await;
    assert!(!res.is_error(), "{res:?}");
    let literals = format!("'{WALLET_2}");
    assert_eq!(signer.calls()[0].arg_literals(), ["u5", literals.as_str(), "\"gm\""]);
}

#[tokio::test]
async fn malformed_contract_identifier() {
    let (router, _) = router();
    let res = router
        .route(request(
            9,
            "stx_callContract",
            json!({ "contract": "no-dot-here", "functionName": "vote", "functionArgs": [] }),
        ))
        .await;
    assert!(res.result().as_error().unwrap().message.starts_with("malformed contract identifier"));
}

#[tokio::test]
async fn signer_failures_become_error_responses() {
    let (router, signer) = router();
    signer.fail_with("hardware wallet disconnected");
    let res = router
        .route(request(10, "stx_signMessage", json!({ "address": WALLET_1, "message": "hi" })))
        .await;
    assert_eq!(res.result().as_error().unwrap().message, "hardware wallet disconnected");
}

#[tokio::test]
async fn signs_messages_and_transactions() {
    let (router, signer) = router();
    let res = router
        .route(request(11, "stx_signMessage", json!({ "address": WALLET_1, "message": "hello" })))
        .await;
    assert_eq!(res.result().as_success().unwrap()["signature"], "0x02");
    assert_eq!(signer.messages()[0].message, "hello");

    let res = router
        .route(request(
            12,
            "stx_signTransaction",
            json!({ "transaction": "0x0001", "broadcast": true }),
        ))
        .await;
    assert!(res.result().as_success().unwrap()["txid"].is_string());
    assert_eq!(signer.transactions()[0].transaction, [0x00, 0x01]);
}

#[tokio::test]
async fn invalid_params_name_the_problem() {
    let (router, _) = router();
    let res = router.route(request(13, "stx_transferStx", json!({ "sender": WALLET_1 }))).await;
    assert!(res.result().as_error().unwrap().message.starts_with("invalid params"));
}

#[tokio::test]
async fn unknown_topic_is_an_error_response() {
    let (router, _) = router();
    let mut req = request(14, "stx_getAddresses", json!([]));
    req.topic = "gone".into();
    let res = router.route(req).await;
    assert_eq!(res.id(), &Id::Number(14));
    assert_eq!(res.result().as_error().unwrap().message, "unknown session `gone`");
}

#[tokio::test]
async fn unknown_topic_wins_over_unknown_method() {
    let (router, _) = router();
    let mut req = request(17, "stx_unknownMethod", json!({}));
    req.topic = "gone".into();
    let err = router.route(req).await.result().as_error().cloned().unwrap();
    assert_eq!(err.code.code(), -32000);
    assert_eq!(err.message, "unknown session `gone`");
}

#[tokio::test]
async fn chain_id_selects_network() {
    let (router, signer) = router();
    let mut req = request(
        15,
        "stx_transferStx",
        json!({ "sender": WALLET_1, "recipient": MAINNET_ADDRESS, "amount": 10 }),
    );
    req.chain_id = Some("stacks:mainnet".into());
    // the testnet account cannot act on mainnet
    let res = router.route(req.clone()).await;
    assert!(res.is_error());
    assert!(signer.transfers().is_empty());

    req.chain_id = Some("stacks:regtest".into());
    let res = router.route(req).await;
    assert!(res.result().as_error().unwrap().message.contains("unknown network"));
}

#[tokio::test(start_paused = true)]
async fn slow_handlers_time_out() {
    let (router, signer) = router();
    let router = router.with_timeout(Some(Duration::from_secs(2)));
    signer.delay(Duration::from_secs(10));
    let res = router.route(request(16, "stx_signTransaction", json!({ "transaction": "0x00" }))).await;
    assert_eq!(res.id(), &Id::Number(16));
    assert_eq!(res.result().as_error().unwrap().message, "request timed out after 2s");
    assert!(signer.transactions().is_empty());
}
