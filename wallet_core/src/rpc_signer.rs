//! Signing delegated to an external wallet over Ethereum JSON-RPC.

use std::time::Duration;

use async_trait::async_trait;
use dirvote_types::{parse_address, to_checksum, Address, Signature};
use dirvote_typed_data::TypedPayload;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::WalletError;
use crate::signer::SigningAuthority;

/// EIP-1193 "user rejected request".
const USER_REJECTED: i64 = 4001;

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

/// A wallet reached over HTTP JSON-RPC (a local signer daemon or a wallet
/// bridge). The account is resolved once, at connect time.
#[derive(Clone)]
pub struct JsonRpcSigner {
    http: reqwest::Client,
    url: String,
    account: Address,
}

impl JsonRpcSigner {
    fn client() -> Result<reqwest::Client, WalletError> {
        // Signing waits on a human; no overall request timeout.
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| WalletError::Rpc(format!("failed to create HTTP client: {e}")))
    }

    /// Sign as a known account without asking the wallet for its list.
    pub fn with_account(url: impl Into<String>, account: Address) -> Result<Self, WalletError> {
        Ok(Self {
            http: Self::client()?,
            url: url.into(),
            account,
        })
    }

    /// Connect and adopt the wallet's first account from `eth_accounts`.
    pub async fn connect(url: impl Into<String>) -> Result<Self, WalletError> {
        let mut signer = Self::with_account(url, Address::ZERO)?;
        let accounts = signer
            .rpc_call("eth_accounts", json!([]))
            .await?
            .ok_or_else(|| WalletError::SigningUnavailable("wallet refused eth_accounts".into()))?;
        let first = accounts
            .as_array()
            .and_then(|list| list.first())
            .and_then(Value::as_str)
            .ok_or_else(|| WalletError::SigningUnavailable("wallet exposes no accounts".into()))?;
        signer.account = parse_address(first).map_err(|e| WalletError::Rpc(e.to_string()))?;
        Ok(signer)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send a JSON-RPC request. `Ok(None)` if the user rejected it.
    async fn rpc_call(&self, method: &str, params: Value) -> Result<Option<Value>, WalletError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| WalletError::Rpc(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(WalletError::Rpc(format!(
                "wallet returned HTTP {}",
                response.status()
            )));
        }

        let reply: RpcResponse = response
            .json()
            .await
            .map_err(|e| WalletError::Rpc(format!("invalid JSON response: {e}")))?;

        match (reply.result, reply.error) {
            (_, Some(err)) if err.code == USER_REJECTED => {
                debug!(method, "user rejected wallet request");
                Ok(None)
            }
            (_, Some(err)) => Err(WalletError::Rpc(format!("{} ({})", err.message, err.code))),
            (Some(result), None) => Ok(Some(result)),
            (None, None) => Err(WalletError::Rpc(format!("{method}: empty response"))),
        }
    }
}

/// The JSON-RPC request a wallet needs to sign `payload` as `account`.
fn signing_request(payload: &TypedPayload, account: Address) -> (&'static str, Value) {
    let account = to_checksum(&account);
    let params = match payload {
        TypedPayload::Vote(vote) => json!([account, vote.to_wallet_json().to_string()]),
        TypedPayload::Feature(feature) => json!([
            format!("0x{}", hex::encode(feature.message_hash())),
            account
        ]),
    };
    (payload.signing_method(), params)
}

#[async_trait]
impl SigningAuthority for JsonRpcSigner {
    fn address(&self) -> Address {
        self.account
    }

    async fn sign(&self, payload: &TypedPayload) -> Result<Option<Signature>, WalletError> {
        let (method, params) = signing_request(payload, self.account);
        let Some(result) = self.rpc_call(method, params).await? else {
            return Ok(None);
        };
        let raw = result
            .as_str()
            .ok_or_else(|| WalletError::Signing(format!("{method} returned a non-string")))?;
        raw.parse::<Signature>()
            .map(Some)
            .map_err(|e| WalletError::Signing(e.to_string()))
    }
}
