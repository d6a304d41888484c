//! In-process Ethereum JSON-RPC node serving a scripted ENS deployment
//!
//! Answers `eth_chainId` and the `eth_call`s the ENS adapter makes: registry
//! `resolver`, resolver `supportsInterface`/`addr`/`resolve`, plus a CCIP-read
//! gateway and callback for offchain resolvers.

use crate::domain::ens::{
    namehash, EnsRegistry, EnsResolver, OffchainLookup, ENS_REGISTRY_ADDRESS,
    EXTENDED_RESOLVER_INTERFACE,
};
use alloy::primitives::{hex, Address, Bytes, B256};
use alloy::sol;
use alloy::sol_types::{SolCall, SolError, SolValue};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use warp::Filter;

sol! {
    interface OffchainCallback {
        function resolveWithProof(bytes response, bytes extraData) external view returns (bytes);
    }
}

/// Scripted ENS state behind the mock node
#[derive(Clone)]
pub struct MockEnsNode {
    chain_id: u64,
    resolvers: HashMap<B256, Address>,
    records: HashMap<(Address, B256), Address>,
    wildcard: HashSet<Address>,
    offchain: HashSet<Address>,
    rpc_error: Option<String>,
    registry_override: Option<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockEnsNode {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnsNode {
    /// Mainnet node with an empty registry
    pub fn new() -> Self {
        Self {
            chain_id: 1,
            resolvers: HashMap::new(),
            records: HashMap::new(),
            wildcard: HashSet::new(),
            offchain: HashSet::new(),
            rpc_error: None,
            registry_override: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_chain_id(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }

    /// Register `resolver` for `name` in the registry
    pub fn with_resolver(mut self, name: &str, resolver: Address) -> Self {
        self.resolvers.insert(namehash(name), resolver);
        self
    }

    /// Address record for `name` held by `resolver`
    pub fn with_address(mut self, resolver: Address, name: &str, address: Address) -> Self {
        self.records.insert((resolver, namehash(name)), address);
        self
    }

    /// `resolver` implements ENSIP-10 and answers for any name it holds records for
    pub fn with_wildcard(mut self, resolver: Address) -> Self {
        self.wildcard.insert(resolver);
        self
    }

    /// `resolver` answers `resolve` through the node's CCIP-read gateway
    pub fn with_offchain(mut self, resolver: Address) -> Self {
        self.offchain.insert(resolver);
        self
    }

    /// Every `eth_call` fails with a JSON-RPC error carrying `message`
    pub fn with_rpc_error(mut self, message: &str) -> Self {
        self.rpc_error = Some(message.to_string());
        self
    }

    /// Registry calls answer with `result` verbatim, valid hex or not
    pub fn with_registry_result(mut self, result: &str) -> Self {
        self.registry_override = Some(result.to_string());
        self
    }

    /// Serve the node on an ephemeral local port
    pub async fn start(self) -> RunningEnsNode {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base_url = format!("http://{}", addr);
        let calls = self.calls.clone();
        let node = Arc::new(self);

        let rpc_node = node.clone();
        let rpc_base = base_url.clone();
        let rpc = warp::post()
            .and(warp::path::end())
            .and(warp::body::json())
            .map(move |request: Value| warp::reply::json(&rpc_node.handle(&rpc_base, &request)));

        let gateway_node = node.clone();
        let gateway = warp::get()
            .and(warp::path!("gateway" / String / String))
            .map(move |sender: String, data: String| {
                warp::reply::json(&gateway_node.gateway(&sender, &data))
            });

        let handle = tokio::spawn(warp::serve(rpc.or(gateway)).run(addr));

        for _ in 0..100 {
            if TcpStream::connect(addr).await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        RunningEnsNode { addr, calls, handle }
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }

    fn handle(&self, base_url: &str, request: &Value) -> Value {
        let id = request["id"].clone();
        let method = request["method"].as_str().unwrap_or_default();

        let outcome = match method {
            "eth_chainId" => {
                self.record("eth_chainId");
                Ok(format!("{:#x}", self.chain_id))
            }
            "eth_call" => self.eth_call(base_url, &request["params"][0]),
            other => Err(json!({ "code": -32601, "message": format!("method {} not found", other) })),
        };

        match outcome {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err(error) => json!({ "jsonrpc": "2.0", "id": id, "error": error }),
        }
    }

    fn eth_call(&self, base_url: &str, call: &Value) -> Result<String, Value> {
        if let Some(message) = &self.rpc_error {
            self.record("eth_call:error");
            return Err(json!({ "code": -32000, "message": message }));
        }

        let to: Address = call["to"].as_str().unwrap_or_default().parse().unwrap();
        let input: Bytes = call
            .get("input")
            .or_else(|| call.get("data"))
            .and_then(Value::as_str)
            .unwrap_or("0x")
            .parse()
            .unwrap();
        let registry: Address = ENS_REGISTRY_ADDRESS.parse().unwrap();

        if to == registry {
            let decoded = EnsRegistry::resolverCall::abi_decode(&input).unwrap();
            self.record("eth_call:resolver");
            if let Some(result) = &self.registry_override {
                return Ok(result.clone());
            }
            let resolver = self.resolvers.get(&decoded.node).copied().unwrap_or(Address::ZERO);
            return Ok(hex::encode_prefixed(resolver.abi_encode()));
        }

        if let Ok(decoded) = EnsResolver::supportsInterfaceCall::abi_decode(&input) {
            self.record("eth_call:supportsInterface");
            let extended = self.wildcard.contains(&to) || self.offchain.contains(&to);
            let supported = decoded.interfaceId == EXTENDED_RESOLVER_INTERFACE && extended;
            return Ok(hex::encode_prefixed(supported.abi_encode()));
        }

        if let Ok(decoded) = EnsResolver::addrCall::abi_decode(&input) {
            self.record("eth_call:addr");
            return Ok(hex::encode_prefixed(self.address_record(to, decoded.node).abi_encode()));
        }

        if let Ok(decoded) = EnsResolver::resolveCall::abi_decode(&input) {
            self.record("eth_call:resolve");
            let node = EnsResolver::addrCall::abi_decode(&decoded.data).unwrap().node;

            if self.offchain.contains(&to) {
                let lookup = OffchainLookup {
                    sender: to,
                    urls: vec![format!("{}/gateway/{{sender}}/{{data}}", base_url)],
                    callData: decoded.data.clone(),
                    callbackFunction: OffchainCallback::resolveWithProofCall::SELECTOR.into(),
                    extraData: node.to_vec().into(),
                };
                return Err(json!({
                    "code": 3,
                    "message": "execution reverted",
                    "data": hex::encode_prefixed(lookup.abi_encode()),
                }));
            }

            let record = Bytes::from(self.address_record(to, node).abi_encode());
            return Ok(hex::encode_prefixed((record,).abi_encode_params()));
        }

        if let Ok(decoded) = OffchainCallback::resolveWithProofCall::abi_decode(&input) {
            self.record("eth_call:resolveWithProof");
            return Ok(hex::encode_prefixed((decoded.response,).abi_encode_params()));
        }

        Err(json!({ "code": 3, "message": "execution reverted", "data": "0x" }))
    }

    fn gateway(&self, sender: &str, data: &str) -> Value {
        self.record("gateway");
        let resolver: Address = sender.parse().unwrap();
        let input: Bytes = data.parse().unwrap();
        let node = EnsResolver::addrCall::abi_decode(&input).unwrap().node;
        let record = self.address_record(resolver, node).abi_encode();
        json!({ "data": hex::encode_prefixed(record) })
    }

    fn address_record(&self, resolver: Address, node: B256) -> Address {
        self.records.get(&(resolver, node)).copied().unwrap_or(Address::ZERO)
    }
}

/// Mock node listening on a local port
pub struct RunningEnsNode {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<String>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl RunningEnsNode {
    /// JSON-RPC endpoint URL
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Methods and selectors received so far, e.g. `eth_call:addr`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }

    /// Stop serving
    pub fn stop(self) {
        self.handle.abort();
    }
}
