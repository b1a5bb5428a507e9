use crate::{
    error::ToRpcResponseResult,
    session::SessionContext,
    signer::{SignMessageRequest, SignTransactionRequest, TransferRequest, WalletSigner},
};
use dao_wallet_core::{
    CallBuilder, ClarityValue, ContractIdentifier, EncodedArg, StacksAddress, WalletError,
    call::contract_call,
    error::Result,
    request::{
        AddressEntry, AddressesResult, CallContractParams, MAX_MEMO_LEN, MessageType,
        SignMessageParams, SignMessageResult, SignTransactionParams, SignTransactionResult,
        TransferStxParams, TxResult, WalletRequest,
    },
};
use dao_wallet_rpc::response::ResponseResult;
use std::sync::Arc;

/// Executes decoded wallet requests on behalf of a session.
#[derive(Clone)]
pub struct WalletApi {
    signer: Arc<dyn WalletSigner>,
    /// Calls against this contract are checked against the governance operation table.
    governance_contract: Option<ContractIdentifier>,
}

impl WalletApi {
    pub fn new(signer: Arc<dyn WalletSigner>) -> Self {
        Self { signer, governance_contract: None }
    }

    pub fn with_governance_contract(mut self, contract: Option<ContractIdentifier>) -> Self {
        self.governance_contract = contract;
        self
    }

    pub fn governance_contract(&self) -> Option<&ContractIdentifier> {
        self.governance_contract.as_ref()
    }

    pub fn signer(&self) -> &Arc<dyn WalletSigner> {
        &self.signer
    }

    /// Executes the request and returns the result to send back.
    pub async fn execute(&self, session: &SessionContext, request: WalletRequest) -> ResponseResult {
        trace!(target: "rpc::api", method = %request.method(), topic = %session.topic, "executing wallet request");
        match request {
            WalletRequest::GetAddresses(()) => self.get_addresses(session).to_rpc_result(),
            WalletRequest::TransferStx(params) => {
                self.transfer_stx(session, params).await.to_rpc_result()
            }
            WalletRequest::SignTransaction(params) => {
                self.sign_transaction(session, params).await.to_rpc_result()
            }
            WalletRequest::SignMessage(params) => {
                self.sign_message(session, params).await.to_rpc_result()
            }
            WalletRequest::CallContract(params) => {
                self.call_contract(session, params).await.to_rpc_result()
            }
        }
    }

    /// Handler for `stx_getAddresses`
    pub fn get_addresses(&self, session: &SessionContext) -> Result<AddressesResult> {
        let account = session.require_account()?;
        Ok(AddressesResult { addresses: vec![AddressEntry::stx(account.clone())] })
    }

    /// Handler for `stx_transferStx`
    pub async fn transfer_stx(
        &self,
        session: &SessionContext,
        params: TransferStxParams,
    ) -> Result<TxResult> {
        let account = session.require_account()?;
        let network = params.network.unwrap_or(session.network);
        ensure_same_account(account, &params.sender)?;
        account.ensure_network(network)?;
        let recipient = StacksAddress::parse_for(&params.recipient, network)?;
        if params.amount == 0 {
            return Err(WalletError::invalid_params("transfer amount must be positive"));
        }
        if let Some(memo) = &params.memo
            && memo.len() > MAX_MEMO_LEN
        {
            return Err(WalletError::invalid_params(format!(
                "memo is {} bytes, at most {MAX_MEMO_LEN} allowed",
                memo.len()
            )));
        }

        let transfer = TransferRequest {
            sender: account.clone(),
            recipient,
            amount: params.amount,
            memo: params.memo,
            network,
        };
        Ok(self.signer.transfer(&transfer).await?)
    }

    /// Handler for `stx_signTransaction`
    pub async fn sign_transaction(
        &self,
        session: &SessionContext,
        params: SignTransactionParams,
    ) -> Result<SignTransactionResult> {
        let account = session.require_account()?;
        let network = params.network.unwrap_or(session.network);
        account.ensure_network(network)?;
        let transaction = params.transaction_bytes()?;
        let request = SignTransactionRequest {
            account: account.clone(),
            transaction,
            broadcast: params.broadcast.unwrap_or_default(),
            network,
        };
        Ok(self.signer.sign_transaction(&request).await?)
    }

    /// Handler for `stx_signMessage`
    pub async fn sign_message(
        &self,
        session: &SessionContext,
        params: SignMessageParams,
    ) -> Result<SignMessageResult> {
        let account = session.require_account()?;
        ensure_same_account(account, &params.address)?;
        let network = params.network.unwrap_or(session.network);
        account.ensure_network(network)?;
        let message_type = params.message_type();
        if message_type == MessageType::Structured && params.domain.is_none() {
            return Err(WalletError::invalid_params("structured messages require a domain"));
        }
        let request = SignMessageRequest {
            account: account.clone(),
            message: params.message,
            message_type,
            domain: params.domain,
            network,
        };
        Ok(self.signer.sign_message(&request).await?)
    }

    /// Handler for `stx_callContract`
    pub async fn call_contract(
        &self,
        session: &SessionContext,
        params: CallContractParams,
    ) -> Result<TxResult> {
        let account = session.require_account()?;
        let contract = ContractIdentifier::parse(&params.contract)?;
        if let Some(sender) = &params.sender {
            ensure_same_account(account, sender)?;
        }
        let network = params.network.unwrap_or(session.network);
        contract.address().ensure_network(network)?;
        let args = decode_args(&params.function_args)?;

        let call = if self.governance_contract.as_ref() == Some(&contract) {
            CallBuilder::new(contract, network).build_values(
                Some(account),
                &params.function_name,
                &args,
            )?
        } else {
            contract_call(contract, &params.function_name, &args, Some(account), network)?
        };
        debug!(target: "rpc::api", contract = %call.contract, function = %call.function_name, "submitting contract call");
        Ok(self.signer.call_contract(&call).await?)
    }
}

/// A sender named in a request must be the session's account.
fn ensure_same_account(account: &StacksAddress, named: &str) -> Result<()> {
    if account.as_str() != named {
        return Err(WalletError::IdentityMismatch {
            expected: account.clone(),
            actual: named.to_string(),
        });
    }
    Ok(())
}

/// Decodes literal arguments, accepting canonical encodings only.
fn decode_args(literals: &[String]) -> Result<Vec<ClarityValue>> {
    literals
        .iter()
        .map(|literal| -> Result<ClarityValue> {
            let arg = EncodedArg::parse(literal)?;
            Ok(EncodedArg::decode(arg.literal())?)
        })
        .collect()
}
