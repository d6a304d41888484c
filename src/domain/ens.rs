//! ENS primitives
//!
//! Contract interfaces for the registry and resolvers, name normalization,
//! namehash and DNS wire encoding.

use alloy::primitives::{keccak256, Address, FixedBytes, B256};
use alloy::sol;

/// ENS registry, deployed at the same address on mainnet and its testnets
pub const ENS_REGISTRY_ADDRESS: &str = "0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e";

/// ENSIP-10 `IExtendedResolver` interface id
pub const EXTENDED_RESOLVER_INTERFACE: FixedBytes<4> = FixedBytes([0x90, 0x61, 0xb9, 0x23]);

// Registry and resolver surface used for address lookups.
sol! {
    #[sol(rpc)]
    interface EnsRegistry {
        function resolver(bytes32 node) external view returns (address);
    }

    #[sol(rpc)]
    interface EnsResolver {
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
        function addr(bytes32 node) external view returns (address);
        function resolve(bytes name, bytes data) external view returns (bytes);
    }

    // EIP-3668 CCIP-read revert
    error OffchainLookup(address sender, string[] urls, bytes callData, bytes4 callbackFunction, bytes extraData);
}

/// Normalize a user-supplied name for lookup.
///
/// Applies UTS-46 mapping (case folding, NFC) the way ENSIP-15 builds on it.
/// Returns `None` when the name has an empty label (`"merchant..eth"`, `".eth"`),
/// embedded whitespace, a reserved `??--` label prefix, or characters UTS-46
/// disallows; such names can never resolve.
pub fn normalize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return None;
    }
    if trimmed
        .split('.')
        .any(|label| label.is_ascii() && label.get(2..4) == Some("--"))
    {
        return None;
    }

    let (name, result) = idna::domain_to_unicode(trimmed);
    result.ok()?;
    if name.split('.').any(str::is_empty) {
        return None;
    }
    Some(name)
}

/// EIP-137 namehash of an already normalized name
pub fn namehash(name: &str) -> B256 {
    let mut node = B256::ZERO;
    if name.is_empty() {
        return node;
    }

    for label in name.rsplit('.') {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(node.as_slice());
        buf[32..].copy_from_slice(keccak256(label.as_bytes()).as_slice());
        node = keccak256(buf);
    }
    node
}

/// Name with its first label removed, `None` at a top-level label
pub fn parent_name(name: &str) -> Option<&str> {
    name.split_once('.').map(|(_, parent)| parent)
}

/// DNS wire format used by ENSIP-10 `resolve(bytes,bytes)`.
///
/// Returns `None` for labels longer than 255 bytes.
pub fn dns_encode(name: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(name.len() + 2);
    for label in name.split('.').filter(|label| !label.is_empty()) {
        let len = u8::try_from(label.len()).ok()?;
        out.push(len);
        out.extend_from_slice(label.as_bytes());
    }
    out.push(0);
    Some(out)
}

/// EIP-55 mixed-case checksum encoding.
///
/// Accepts any casing; returns `None` when the input is not a `0x`-prefixed
/// 20-byte hex address.
pub fn to_checksum_address(address: &str) -> Option<String> {
    let digits = address.strip_prefix("0x").or_else(|| address.strip_prefix("0X"))?;
    digits
        .parse::<Address>()
        .ok()
        .map(|address| address.to_checksum(None))
}
