use dao_wallet::{
    GovernanceClient, WalletConfig, WalletService,
    core::{GovernanceCall, GovernanceError, Network, Proposal, WalletError},
};
use dao_wallet_test_utils::{
    DEPLOYER, MockOracle, MockSigner, MockTransport, WALLET_1, WALLET_2, WALLET_3, address,
    governance_contract, init_tracing,
};
use std::sync::Arc;

fn proposal(id: u64) -> Proposal {
    Proposal {
        id,
        proposer: address(DEPLOYER),
        title: "Fund Community Event".into(),
        description: "Venue and catering for the spring meetup".into(),
        recipient: address(WALLET_2),
        amount: 100_000_000,
        votes_for: 3,
        votes_against: 1,
        start_block: 100,
        end_block: 200,
        executed: false,
        cancelled: false,
    }
}

fn setup() -> (GovernanceClient, Arc<MockOracle>, Arc<MockSigner>) {
    init_tracing();
    let oracle = Arc::new(MockOracle::default());
    let signer = Arc::new(MockSigner::default());
    let client =
        GovernanceClient::new(governance_contract(), Network::Testnet, oracle.clone(), signer.clone());
    (client, oracle, signer)
}

#[tokio::test]
async fn creates_proposal_with_micro_stx_amount() {
    let (client, _, signer) = setup();
    let call = GovernanceCall::CreateProposal {
        title: "Fund Community Event".into(),
        description: "...".into(),
        recipient: WALLET_2.into(),
        amount: 100.into(),
    };
    client.submit(Some(&address(WALLET_1)), &call).await.unwrap();

    let calls = signer.calls();
    assert_eq!(calls[0].function_name, "create-proposal");
    let recipient = format!("'{WALLET_2}");
    assert_eq!(
        calls[0].arg_literals(),
        ["\"Fund Community Event\"", "\"...\"", recipient.as_str(), "u100000000"]
    );
    assert_eq!(calls[0].contract, governance_contract());
}

#[tokio::test]
async fn member_votes_on_active_proposal() {
    let (client, oracle, signer) = setup();
    oracle.insert_proposal(proposal(1));
    oracle.add_member(address(WALLET_1), 10);
    oracle.set_block_height(150);

    let vote = GovernanceCall::Vote { proposal_id: 1, support: true };
    client.submit(Some(&address(WALLET_1)), &vote).await.unwrap();
    assert_eq!(signer.calls()[0].arg_literals(), ["u1", "true"]);

    let err = client.submit(Some(&address(WALLET_3)), &vote).await.unwrap_err();
    assert_eq!(
        err,
        WalletError::Governance(GovernanceError::NotAMember(address(WALLET_3)))
    );
    assert_eq!(signer.calls().len(), 1);
}

#[tokio::test]
async fn closed_proposal_cannot_be_voted_but_can_be_executed() {
    let (client, oracle, signer) = setup();
    oracle.insert_proposal(proposal(2));
    oracle.add_member(address(WALLET_1), 10);
    oracle.set_block_height(200);
    let sender = address(WALLET_1);

    let err = client
        .submit(Some(&sender), &GovernanceCall::Vote { proposal_id: 2, support: false })
        .await
        .unwrap_err();
    assert_eq!(err, WalletError::Governance(GovernanceError::ProposalNotActive(2)));

    client.submit(Some(&sender), &GovernanceCall::ExecuteProposal { proposal_id: 2 }).await.unwrap();
    assert_eq!(signer.calls()[0].function_name, "execute-proposal");
}

#[tokio::test]
async fn rejected_proposal_is_not_executable() {
    let (client, oracle, _) = setup();
    oracle.insert_proposal(Proposal { votes_for: 1, votes_against: 1, ..proposal(3) });
    oracle.set_block_height(250);
    let err = client
        .submit(Some(&address(WALLET_1)), &GovernanceCall::ExecuteProposal { proposal_id: 3 })
        .await
        .unwrap_err();
    assert_eq!(err, WalletError::Governance(GovernanceError::ProposalNotPassed(3)));
}

#[tokio::test]
async fn executed_proposal_cannot_be_cancelled() {
    let (client, oracle, signer) = setup();
    oracle.insert_proposal(Proposal { executed: true, ..proposal(4) });
    let err = client
        .submit(Some(&address(DEPLOYER)), &GovernanceCall::CancelProposal { proposal_id: 4 })
        .await
        .unwrap_err();
    assert_eq!(err, WalletError::Governance(GovernanceError::AlreadyExecuted(4)));
    assert!(signer.calls().is_empty());
}

#[tokio::test]
async fn preflight_can_be_skipped() {
    let (client, _, signer) = setup();
    let client = client.without_preflight();
    client
        .submit(Some(&address(WALLET_1)), &GovernanceCall::CancelProposal { proposal_id: 77 })
        .await
        .unwrap();
    assert_eq!(signer.calls()[0].arg_literals(), ["u77"]);
}

#[tokio::test]
async fn oracle_failures_surface() {
    let (client, oracle, signer) = setup();
    oracle.fail_with("node unreachable");
    let err = client
        .submit(Some(&address(WALLET_1)), &GovernanceCall::ExecuteProposal { proposal_id: 1 })
        .await
        .unwrap_err();
    assert_eq!(err, WalletError::External("node unreachable".into()));
    assert!(client.treasury_balance().await.is_err());
    assert!(signer.calls().is_empty());
}

#[tokio::test]
async fn read_only_queries() {
    let (client, oracle, _) = setup();
    oracle.add_member(address(WALLET_1), 25);
    oracle.set_treasury_balance(5_000_000);
    oracle.insert_proposal(proposal(6));

    assert!(client.is_member(&address(WALLET_1)).await.unwrap());
    assert!(!client.is_member(&address(WALLET_2)).await.unwrap());
    assert_eq!(client.voting_power(&address(WALLET_1)).await.unwrap(), 25);
    assert_eq!(client.voting_power(&address(WALLET_2)).await.unwrap(), 0);
    assert_eq!(client.treasury_balance().await.unwrap(), 5_000_000);
    assert_eq!(client.proposal(6).await.unwrap().title, "Fund Community Event");
    assert_eq!(
        client.proposal(7).await.unwrap_err(),
        WalletError::Governance(GovernanceError::ProposalNotFound(7))
    );
}

#[tokio::test]
async fn no_account_produces_no_call() {
    let (client, _, signer) = setup();
    let err = client
        .submit(None, &GovernanceCall::DepositTreasury { amount: 50.into() })
        .await
        .unwrap_err();
    assert_eq!(err, WalletError::NoAccount);
    assert!(signer.calls().is_empty());
}

#[tokio::test]
async fn no_account_fails_before_oracle() {
    let (client, oracle, _) = setup();
    oracle.fail_with("node unreachable");
    let err = client
        .submit(None, &GovernanceCall::ExecuteProposal { proposal_id: 1 })
        .await
        .unwrap_err();
    assert_eq!(err, WalletError::NoAccount);
}

#[tokio::test]
async fn service_without_contract_has_no_client() {
    let service = WalletService::new(
        WalletConfig::default(),
        Arc::new(MockTransport::default()),
        Arc::new(MockSigner::default()),
    );
    let err = service.governance(Arc::new(MockOracle::default())).err();
    assert_eq!(err, Some(WalletError::Governance(GovernanceError::NoContract)));
}

#[tokio::test]
async fn service_builds_client_for_configured_contract() {
    let config = WalletConfig {
        governance_contract: Some(governance_contract()),
        account: Some(address(WALLET_1)),
        ..Default::default()
    };
    let signer = Arc::new(MockSigner::default());
    let service = WalletService::new(config, Arc::new(MockTransport::default()), signer.clone());
    let oracle = Arc::new(MockOracle::default());

    let client = service.governance(oracle).unwrap();
    assert_eq!(client.contract(), &governance_contract());
    client
        .submit(service.account().as_ref(), &GovernanceCall::DepositTreasury { amount: "1.5".into() })
        .await
        .unwrap();
    assert_eq!(signer.calls()[0].arg_literals(), ["u1500000"]);
}
