//! ENS adapter over Ethereum JSON-RPC
//!
//! Finds the resolver for a name through the registry, walking up to parent
//! names for ENSIP-10 wildcard resolvers, then reads the address record either
//! directly with `addr(node)` or through `resolve(bytes,bytes)`. Offchain
//! resolvers that revert with `OffchainLookup` are followed through their
//! CCIP-read gateways.

use crate::{
    config::app_config::EnsConfig,
    domain::{
        ens::{
            dns_encode, namehash, parent_name, EnsRegistry, EnsResolver, OffchainLookup,
            EXTENDED_RESOLVER_INTERFACE,
        },
        networks::ENS_ROOT_CHAIN_ID,
        resolution::NameResolver,
    },
    shared::error::{AppError, AppResult},
};
use alloy::primitives::{Address, Bytes, B256};
use alloy::providers::{Provider, RootProvider};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::{SolCall, SolError, SolValue};
use alloy::transports::{RpcError, TransportError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Gateway redirects followed for one lookup
const MAX_CCIP_REDIRECTS: usize = 4;

/// Errors worth another attempt: the request never produced a JSON-RPC answer
trait Transient {
    fn is_transient(&self) -> bool;
}

impl Transient for TransportError {
    fn is_transient(&self) -> bool {
        matches!(self, RpcError::Transport(_))
    }
}

impl Transient for alloy::contract::Error {
    fn is_transient(&self) -> bool {
        match self {
            alloy::contract::Error::TransportError(e) => e.is_transient(),
            _ => false,
        }
    }
}

/// Result of a raw `eth_call`
enum CallOutcome {
    Returned(Bytes),
    Reverted(Bytes),
}

#[derive(Deserialize)]
struct GatewayResponse {
    data: Bytes,
}

/// Adapter for ENS lookups against a mainnet JSON-RPC endpoint
pub struct EnsRpcAdapter {
    provider: RootProvider,
    gateway: Client,
    registry: Address,
    max_retries: u32,
}

impl EnsRpcAdapter {
    /// Create a new ENS adapter
    pub fn new(config: &EnsConfig) -> AppResult<Self> {
        let rpc_url: url::Url = config
            .rpc_url
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid ENS RPC URL '{}': {}", config.rpc_url, e)))?;
        let registry: Address = config.registry_address.parse().map_err(|e| {
            AppError::Config(format!(
                "Invalid ENS registry address '{}': {}",
                config.registry_address, e
            ))
        })?;

        let gateway = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            provider: RootProvider::new_http(rpc_url),
            gateway,
            registry,
            max_retries: config.max_retries,
        })
    }

    /// Run `op`, retrying transport failures with linear back-off
    async fn with_retries<T, E, F, Fut>(&self, what: &str, mut op: F) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Transient + Display,
    {
        let mut attempt = 0;
        loop {
            let error = match op().await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_transient() => {
                    return Err(AppError::Rpc(format!("{} failed: {}", what, e)));
                }
                Err(e) => e,
            };

            if attempt >= self.max_retries {
                return Err(AppError::Rpc(format!(
                    "{} failed after {} attempts: {}",
                    what,
                    self.max_retries + 1,
                    error
                )));
            }

            attempt += 1;
            debug!(
                call = %what,
                error = %error,
                "ENS RPC request failed, retrying... (attempt {}/{})",
                attempt,
                self.max_retries + 1
            );
            tokio::time::sleep(Duration::from_millis(100 * attempt as u64)).await;
        }
    }

    /// Resolver contract registered for `node`, if any
    pub async fn resolver_of(&self, node: B256) -> AppResult<Option<Address>> {
        let resolver = self
            .with_retries("resolver", || {
                let registry = EnsRegistry::new(self.registry, self.provider.clone());
                async move { registry.resolver(node).call().await }
            })
            .await?;
        Ok(non_zero(resolver))
    }

    /// Closest resolver for `name` or one of its parents, with the name it is set on
    pub async fn find_resolver<'a>(&self, name: &'a str) -> AppResult<Option<(Address, &'a str)>> {
        let mut current = Some(name);
        while let Some(candidate) = current {
            if let Some(resolver) = self.resolver_of(namehash(candidate)).await? {
                return Ok(Some((resolver, candidate)));
            }
            current = parent_name(candidate);
        }
        Ok(None)
    }

    /// Whether `resolver` implements ENSIP-10 `resolve(bytes,bytes)`.
    ///
    /// Resolvers without ERC-165 revert here and count as not supporting it.
    pub async fn supports_wildcard(&self, resolver: Address) -> AppResult<bool> {
        self.with_retries("supportsInterface", || {
            let contract = EnsResolver::new(resolver, self.provider.clone());
            async move {
                match contract.supportsInterface(EXTENDED_RESOLVER_INTERFACE).call().await {
                    Ok(supported) => Ok(supported),
                    Err(e) if e.is_transient() => Err(e),
                    Err(_) => Ok(false),
                }
            }
        })
        .await
    }

    /// Address record of `node` on `resolver`, if set
    pub async fn address_of(&self, resolver: Address, node: B256) -> AppResult<Option<Address>> {
        let address = self
            .with_retries("addr", || {
                let contract = EnsResolver::new(resolver, self.provider.clone());
                async move { contract.addr(node).call().await }
            })
            .await?;
        Ok(non_zero(address))
    }

    /// Address record read through ENSIP-10 `resolve(dnsName, addr(node))`
    pub async fn resolve_extended(
        &self,
        resolver: Address,
        name: &str,
        node: B256,
    ) -> AppResult<Option<Address>> {
        let dns_name = dns_encode(name)
            .ok_or_else(|| AppError::Validation(format!("Name label too long: {}", name)))?;
        let calldata = EnsResolver::resolveCall {
            name: dns_name.into(),
            data: EnsResolver::addrCall { node }.abi_encode().into(),
        }
        .abi_encode();

        let Some(raw) = self.call_following_lookups(resolver, calldata.into()).await? else {
            return Ok(None);
        };

        let record = EnsResolver::resolveCall::abi_decode_returns(&raw)
            .map_err(|e| AppError::Rpc(format!("Invalid resolve() result: {}", e)))?;
        if record.is_empty() {
            return Ok(None);
        }
        let address = EnsResolver::addrCall::abi_decode_returns(&record)
            .map_err(|e| AppError::Rpc(format!("Invalid addr record: {}", e)))?;
        Ok(non_zero(address))
    }

    /// `eth_call` that reports reverts with their data instead of failing
    async fn raw_call(&self, to: Address, input: Bytes) -> AppResult<CallOutcome> {
        self.with_retries("eth_call", || {
            let provider = self.provider.clone();
            let tx = TransactionRequest::default().to(to).input(input.clone().into());
            async move {
                match provider.call(tx).await {
                    Ok(output) => Ok(CallOutcome::Returned(output)),
                    Err(e) => match e.as_error_resp().and_then(|payload| payload.as_revert_data()) {
                        Some(revert) => Ok(CallOutcome::Reverted(revert)),
                        None => Err(e),
                    },
                }
            }
        })
        .await
    }

    /// Call `to`, following EIP-3668 `OffchainLookup` reverts.
    ///
    /// `Ok(None)` when the call reverts for any other reason.
    async fn call_following_lookups(&self, to: Address, calldata: Bytes) -> AppResult<Option<Bytes>> {
        let mut input = calldata;
        for _ in 0..=MAX_CCIP_REDIRECTS {
            let revert = match self.raw_call(to, input.clone()).await? {
                CallOutcome::Returned(output) => return Ok(Some(output)),
                CallOutcome::Reverted(revert) => revert,
            };

            let Ok(lookup) = OffchainLookup::abi_decode(&revert) else {
                debug!(resolver = %to, "Resolver call reverted");
                return Ok(None);
            };
            if lookup.sender != to {
                return Err(AppError::Rpc(format!(
                    "OffchainLookup sender {} does not match resolver {}",
                    lookup.sender, to
                )));
            }

            let response = self.fetch_gateway(&lookup).await?;
            let mut next = lookup.callbackFunction.to_vec();
            next.extend((response, lookup.extraData).abi_encode_params());
            input = next.into();
        }

        Err(AppError::Rpc(format!(
            "Too many OffchainLookup redirects from {}",
            to
        )))
    }

    /// Ask the lookup's gateways in order; the first valid answer wins
    async fn fetch_gateway(&self, lookup: &OffchainLookup) -> AppResult<Bytes> {
        let sender = format!("{:#x}", lookup.sender);
        let data = lookup.callData.to_string();

        let mut last_error = String::from("no gateway URLs");
        for template in &lookup.urls {
            let url = template.replace("{sender}", &sender).replace("{data}", &data);
            let request = if template.contains("{data}") {
                self.gateway.get(&url)
            } else {
                self.gateway
                    .post(&url)
                    .json(&serde_json::json!({ "data": data, "sender": sender }))
            };

            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    match response.json::<GatewayResponse>().await {
                        Ok(body) => return Ok(body.data),
                        Err(e) => last_error = format!("invalid gateway response from {}: {}", url, e),
                    }
                }
                Ok(response) => {
                    last_error = format!("gateway {} returned {}", url, response.status());
                }
                Err(e) => last_error = format!("gateway {} failed: {}", url, e),
            }
            debug!(gateway = %url, error = %last_error, "CCIP-read gateway attempt failed");
        }

        Err(AppError::Rpc(format!("CCIP-read failed: {}", last_error)))
    }

    /// Chain id served by the endpoint
    pub async fn chain_id(&self) -> AppResult<u64> {
        self.with_retries("eth_chainId", || {
            let provider = self.provider.clone();
            async move { provider.get_chain_id().await }
        })
        .await
    }
}

fn non_zero(address: Address) -> Option<Address> {
    (address != Address::ZERO).then_some(address)
}

#[async_trait]
impl NameResolver for EnsRpcAdapter {
    async fn resolve(&self, name: &str) -> AppResult<Option<String>> {
        let node = namehash(name);

        let Some((resolver, owner)) = self.find_resolver(name).await? else {
            info!(name = %name, "No resolver registered");
            return Ok(None);
        };

        let address = if self.supports_wildcard(resolver).await? {
            self.resolve_extended(resolver, name, node).await?
        } else if owner == name {
            self.address_of(resolver, node).await?
        } else {
            // a parent's resolver only answers for subnames through ENSIP-10
            None
        };

        if address.is_none() {
            info!(name = %name, resolver = %resolver, "Resolver has no address record");
        }
        Ok(address.map(|address| address.to_checksum(None)))
    }

    async fn is_available(&self) -> bool {
        match self.chain_id().await {
            Ok(ENS_ROOT_CHAIN_ID) => true,
            Ok(other) => {
                warn!(chain_id = other, "ENS RPC endpoint is not serving mainnet");
                false
            }
            Err(e) => {
                warn!(error = %e, "ENS RPC endpoint unavailable");
                false
            }
        }
    }
}
