use crate::{
    address::StacksAddress,
    clarity::{ClarityValue, EncodedArg},
    contract::ContractIdentifier,
    error::{Result, WalletError},
    governance::{GovernanceCall, GovernanceOperation},
    network::Network,
};
use serde::{Deserialize, Serialize};

/// A fully encoded, unsigned contract call, ready to be handed to a signer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallDescriptor {
    pub contract: ContractIdentifier,
    pub function_name: String,
    pub args: Vec<EncodedArg>,
    pub sender: StacksAddress,
    pub network: Network,
}

impl CallDescriptor {
    /// The argument literals in call order.
    pub fn arg_literals(&self) -> Vec<&str> {
        self.args.iter().map(EncodedArg::literal).collect()
    }
}

/// Builds [`CallDescriptor`]s against one contract on one network.
///
/// Building is pure: nothing is signed or broadcast here.
#[derive(Clone, Debug)]
pub struct CallBuilder {
    contract: ContractIdentifier,
    network: Network,
}

impl CallBuilder {
    pub fn new(contract: ContractIdentifier, network: Network) -> Self {
        Self { contract, network }
    }

    pub fn contract(&self) -> &ContractIdentifier {
        &self.contract
    }

    pub fn network(&self) -> Network {
        self.network
    }

    /// Builds the call for a governance operation on behalf of `sender`.
    ///
    /// Fails with [`WalletError::NoAccount`] before looking at any parameter when no account is
    /// connected.
    pub fn build(
        &self,
        sender: Option<&StacksAddress>,
        call: &GovernanceCall,
    ) -> Result<CallDescriptor> {
        let sender = sender.ok_or(WalletError::NoAccount)?;
        sender.ensure_network(self.network)?;
        let args = call.encode_args(self.network)?;
        Ok(CallDescriptor {
            contract: self.contract.clone(),
            function_name: call.operation().function_name().to_string(),
            args,
            sender: sender.clone(),
            network: self.network,
        })
    }

    /// Builds a call from already decoded arguments.
    ///
    /// Calls against this builder's contract must name a governance function and match its
    /// schema exactly.
    pub fn build_values(
        &self,
        sender: Option<&StacksAddress>,
        function_name: &str,
        args: &[ClarityValue],
    ) -> Result<CallDescriptor> {
        let sender = sender.ok_or(WalletError::NoAccount)?;
        let op = GovernanceOperation::from_function_name(function_name).ok_or_else(|| {
            WalletError::invalid_arguments(
                function_name,
                format!("`{}` has no function named `{function_name}`", self.contract),
            )
        })?;
        op.check_args(args)?;
        contract_call(self.contract.clone(), function_name, args, Some(sender), self.network)
    }
}

/// Builds a call against an arbitrary contract without schema checks.
pub fn contract_call(
    contract: ContractIdentifier,
    function_name: &str,
    args: &[ClarityValue],
    sender: Option<&StacksAddress>,
    network: Network,
) -> Result<CallDescriptor> {
    let sender = sender.ok_or(WalletError::NoAccount)?;
    sender.ensure_network(network)?;
    if function_name.is_empty() || function_name.chars().any(|c| c.is_whitespace()) {
        return Err(WalletError::invalid_params(format!(
            "invalid function name `{function_name}`"
        )));
    }
    let args = args.iter().map(ClarityValue::encode).collect::<Result<Vec<_>, _>>()?;
    Ok(CallDescriptor {
        contract,
        function_name: function_name.to_string(),
        args,
        sender: sender.clone(),
        network,
    })
}
