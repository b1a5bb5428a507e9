use crate::transport::{ApprovedNamespace, ProposalNamespace, SessionProposal};
use dao_wallet_config::WalletConfig;
use dao_wallet_core::{
    Network, StacksAddress, WalletError, WalletMethod, error::Result,
    network::STACKS_NAMESPACE,
};
use std::collections::BTreeMap;

/// The outcome of negotiating a proposal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NegotiatedSession {
    pub namespaces: BTreeMap<String, ApprovedNamespace>,
    /// Network of the first approved chain, used when a request names none.
    pub network: Network,
}

/// Turns a session proposal into the namespaces the wallet approves.
#[derive(Clone, Debug)]
pub struct NamespaceNegotiator {
    network: Network,
    methods: Vec<String>,
    events: Vec<String>,
}

impl NamespaceNegotiator {
    pub fn new(network: Network, events: Vec<String>) -> Self {
        Self { network, methods: WalletMethod::all_names(), events }
    }

    pub fn from_config(config: &WalletConfig) -> Self {
        Self::new(config.network, config.events.clone())
    }

    /// The full method set approved when a proposal names none.
    pub fn default_methods(&self) -> &[String] {
        &self.methods
    }

    pub fn default_events(&self) -> &[String] {
        &self.events
    }

    /// Approves the `stacks` namespace of `proposal` for `account`.
    ///
    /// Required namespaces take precedence over optional ones. Namespace keys of other chain
    /// families are ignored. Only chains naming a known network whose address prefix matches
    /// `account` are approved; a proposal left with no such chain, or with no `stacks` key at
    /// all, fails with [`WalletError::NoSupportedNamespace`].
    pub fn negotiate(
        &self,
        proposal: &SessionProposal,
        account: &StacksAddress,
    ) -> Result<NegotiatedSession> {
        let requested = proposal
            .required_namespaces
            .get(STACKS_NAMESPACE)
            .or_else(|| proposal.optional_namespaces.get(STACKS_NAMESPACE))
            .ok_or(WalletError::NoSupportedNamespace)?;

        let networks = self.networks(requested, account);
        let network = *networks.first().ok_or(WalletError::NoSupportedNamespace)?;
        let approved = self.approve(requested, &networks, account);

        Ok(NegotiatedSession {
            namespaces: BTreeMap::from([(STACKS_NAMESPACE.to_string(), approved)]),
            network,
        })
    }

    /// The requested networks `account` can act on, in request order and without duplicates.
    fn networks(&self, requested: &ProposalNamespace, account: &StacksAddress) -> Vec<Network> {
        if requested.chains.is_empty() {
            return vec![self.default_network(account)];
        }
        let mut networks = Vec::with_capacity(requested.chains.len());
        for chain in &requested.chains {
            match chain.parse::<Network>() {
                Ok(network) if account.ensure_network(network).is_ok() => {
                    if !networks.contains(&network) {
                        networks.push(network);
                    }
                }
                Ok(network) => {
                    debug!(target: "wallet::session", %chain, %account, %network, "dropping chain of another network");
                }
                Err(err) => debug!(target: "wallet::session", %chain, %err, "dropping unknown chain"),
            }
        }
        networks
    }

    /// The configured network, or the account's own when the two disagree.
    fn default_network(&self, account: &StacksAddress) -> Network {
        if account.ensure_network(self.network).is_ok() {
            self.network
        } else if account.is_mainnet() {
            Network::Mainnet
        } else {
            Network::Testnet
        }
    }

    fn approve(
        &self,
        requested: &ProposalNamespace,
        networks: &[Network],
        account: &StacksAddress,
    ) -> ApprovedNamespace {
        let or_default = |requested: &[String], default: &[String]| {
            if requested.is_empty() { default.to_vec() } else { requested.to_vec() }
        };
        ApprovedNamespace {
            accounts: networks
                .iter()
                .map(|network| format!("{}:{account}", network.chain_id()))
                .collect(),
            methods: or_default(&requested.methods, &self.methods),
            events: or_default(&requested.events, &self.events),
        }
    }
}
