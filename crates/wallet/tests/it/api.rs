use dao_wallet::{
    WalletApi,
    core::{
        Network, WalletError, WalletRequest,
        clarity::EncodeError,
        request::{
            AddressEntry, CallContractParams, MessageType, SignMessageParams,
            SignTransactionParams, TransferStxParams,
        },
    },
    session::SessionContext,
};
use dao_wallet_test_utils::{
    GOVERNANCE_CONTRACT, MAINNET_ADDRESS, MockSigner, WALLET_1, WALLET_2, address,
    governance_contract,
};
use std::sync::Arc;

fn api() -> (WalletApi, Arc<MockSigner>) {
    let signer = Arc::new(MockSigner::default());
    let api = WalletApi::new(signer.clone()).with_governance_contract(Some(governance_contract()));
    (api, signer)
}

fn session() -> SessionContext {
    SessionContext::new("topic", Some(address(WALLET_1)), Network::Testnet)
}

fn locked() -> SessionContext {
    SessionContext::new("topic", None, Network::Testnet)
}

fn call_params(contract: &str, function: &str, args: &[&str]) -> CallContractParams {
    CallContractParams {
        contract: contract.into(),
        function_name: function.into(),
        function_args: args.iter().map(|s| s.to_string()).collect(),
        sender: None,
        network: None,
    }
}

fn message(address: &str, network: Option<Network>) -> SignMessageParams {
    SignMessageParams {
        address: address.into(),
        message: "hello".into(),
        message_type: None,
        network,
        domain: None,
    }
}

fn transaction(tx: &str, network: Option<Network>) -> SignTransactionParams {
    SignTransactionParams { transaction: tx.into(), broadcast: Some(true), network }
}

#[test]
fn get_addresses_returns_session_account() {
    let (api, _) = api();
    let res = api.get_addresses(&session()).unwrap();
    assert_eq!(res.addresses, [AddressEntry::stx(address(WALLET_1))]);
    assert_eq!(api.get_addresses(&locked()).unwrap_err(), WalletError::NoAccount);
}

#[tokio::test]
async fn transfer_checks_sender_and_memo() {
    let (api, signer) = api();
    let params = |sender: &str, memo: Option<&str>| TransferStxParams {
        sender: sender.into(),
        recipient: WALLET_2.into(),
        amount: 1_000,
        memo: memo.map(Into::into),
        network: None,
    };

    let err = api.transfer_stx(&session(), params(WALLET_2, None)).await.unwrap_err();
    assert!(matches!(err, WalletError::IdentityMismatch { .. }), "{err:?}");

    let err = api
        .transfer_stx(&session(), params(WALLET_1, Some(&"m".repeat(35))))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InvalidParams(_)), "{err:?}");

    let mut zero = params(WALLET_1, None);
    zero.amount = 0;
    assert!(matches!(
        api.transfer_stx(&session(), zero).await,
        Err(WalletError::InvalidParams(_))
    ));

    api.transfer_stx(&session(), params(WALLET_1, Some(&"m".repeat(34)))).await.unwrap();
    let transfers = signer.transfers();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].recipient, address(WALLET_2));
    assert_eq!(transfers[0].amount, 1_000);
    assert_eq!(transfers[0].network, Network::Testnet);
}

#[tokio::test]
async fn transfer_rejects_recipient_on_other_network() {
    let (api, signer) = api();
    let params = TransferStxParams {
        sender: WALLET_1.into(),
        recipient: MAINNET_ADDRESS.into(),
        amount: 1,
        memo: None,
        network: None,
    };
    let err = api.transfer_stx(&session(), params).await.unwrap_err();
    assert!(matches!(err, WalletError::InvalidAddress(_)), "{err:?}");
    assert!(signer.transfers().is_empty());
}

#[tokio::test]
async fn sign_message_requires_matching_address() {
    let (api, signer) = api();
    let err = api.sign_message(&session(), message(WALLET_2, None)).await.unwrap_err();
    assert!(matches!(err, WalletError::IdentityMismatch { .. }));

    api.sign_message(&session(), message(WALLET_1, None)).await.unwrap();
    assert_eq!(signer.messages()[0].message_type, MessageType::Utf8);
}

#[tokio::test]
async fn structured_message_requires_domain() {
    let (api, _) = api();
    let params = SignMessageParams {
        message: "0c00".into(),
        message_type: Some(MessageType::Structured),
        ..message(WALLET_1, None)
    };
    let err = api.sign_message(&session(), params).await.unwrap_err();
    assert!(matches!(err, WalletError::InvalidParams(_)));
}

#[tokio::test]
async fn signing_refuses_network_of_another_prefix() {
    let (api, signer) = api();

    let err = api
        .sign_message(&session(), message(WALLET_1, Some(Network::Mainnet)))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InvalidAddress(_)), "{err:?}");

    let err = api
        .sign_transaction(&session(), transaction("0x0011", Some(Network::Mainnet)))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InvalidAddress(_)), "{err:?}");

    let mainnet = SessionContext::new("topic", Some(address(WALLET_1)), Network::Mainnet);
    assert!(api.sign_message(&mainnet, message(WALLET_1, None)).await.is_err());
    assert!(signer.messages().is_empty());
    assert!(signer.transactions().is_empty());

    api.sign_transaction(&session(), transaction("0x0011", Some(Network::Devnet))).await.unwrap();
    assert_eq!(signer.transactions()[0].network, Network::Devnet);
}

#[tokio::test]
async fn sign_transaction_rejects_bad_hex() {
    let (api, signer) = api();
    assert!(api.sign_transaction(&session(), transaction("xyz", None)).await.is_err());
    let res = api.sign_transaction(&session(), transaction("0x0011", None)).await.unwrap();
    assert!(res.txid.is_some());
    assert_eq!(signer.transactions()[0].transaction, [0x00, 0x11]);
}

#[tokio::test]
async fn call_contract_checks_governance_schema() {
    let (api, signer) = api();
    api.call_contract(&session(), call_params(GOVERNANCE_CONTRACT, "vote", &["u1", "true"]))
        .await
        .unwrap();
    let calls = signer.calls();
    assert_eq!(calls[0].function_name, "vote");
    assert_eq!(calls[0].arg_literals(), ["u1", "true"]);

    let err = api
        .call_contract(&session(), call_params(GOVERNANCE_CONTRACT, "vote", &["true", "u1"]))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InvalidArguments { .. }), "{err:?}");

    let err = api
        .call_contract(&session(), call_params(GOVERNANCE_CONTRACT, "mint", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::InvalidArguments { .. }), "{err:?}");
    assert_eq!(signer.calls().len(), 1);
}

#[tokio::test]
async fn call_contract_passes_through_other_contracts() {
    let (api, signer) = api();
    let other = format!("{WALLET_2}.token");
    let principal = format!("'{WALLET_1}");
    api.call_contract(&session(), call_params(&other, "transfer", &["u5", principal.as_str()]))
        .await
        .unwrap();
    assert_eq!(signer.calls()[0].contract.to_string(), other);
}

#[tokio::test]
async fn call_contract_rejects_malformed_input() {
    let (api, _) = api();
    let err = api
        .call_contract(&session(), call_params("dao-governance", "vote", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::MalformedIdentifier(_)));

    let err = api
        .call_contract(&session(), call_params(GOVERNANCE_CONTRACT, "vote", &["u01", "true"]))
        .await
        .unwrap_err();
    assert!(matches!(err, WalletError::Encoding(EncodeError::InvalidLiteral(_))), "{err:?}");

    let err = api
        .call_contract(&locked(), call_params("garbage", "vote", &["?"]))
        .await
        .unwrap_err();
    assert_eq!(err, WalletError::NoAccount);
}

#[tokio::test]
async fn signer_failures_keep_their_message() {
    let (api, signer) = api();
    signer.fail_with("ledger disconnected");
    let res = api
        .execute(
            &session(),
            WalletRequest::CallContract(call_params(GOVERNANCE_CONTRACT, "vote", &["u1", "true"])),
        )
        .await;
    assert_eq!(res.as_error().unwrap().message, "ledger disconnected");
}
