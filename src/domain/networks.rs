//! Destination networks and their stable-token contracts

use serde::Serialize;

/// Network used when `c` is absent or not a number (Celo)
pub const DEFAULT_CHAIN_ID: u64 = 42220;

/// Network hosting the ENS registry
pub const ENS_ROOT_CHAIN_ID: u64 = 1;

/// Placeholder token for networks without a USDC deployment in the table
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// A USDC deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StableToken {
    pub chain_id: u64,
    pub network: &'static str,
    pub address: &'static str,
}

/// USDC contracts by network
pub const STABLE_TOKENS: [StableToken; 6] = [
    StableToken { chain_id: 10, network: "optimism", address: "0x0b2C639c533813f4Aa9D7837CAf62653d097Ff85" },
    StableToken { chain_id: 137, network: "polygon", address: "0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359" },
    StableToken { chain_id: 480, network: "worldchain", address: "0x79A02482A880bCE3F13e09Da970dC34db4CD24d1" },
    StableToken { chain_id: 8453, network: "base", address: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913" },
    StableToken { chain_id: 42161, network: "arbitrum", address: "0xaf88d065e77c8cC2239327C5EDb3A432268e5831" },
    StableToken { chain_id: 42220, network: "celo", address: "0xcebA9300f2b948710d2653dD7B07f33A8B32118C" },
];

pub fn stable_token(chain_id: u64) -> Option<&'static StableToken> {
    STABLE_TOKENS.iter().find(|token| token.chain_id == chain_id)
}

/// Token address for `chain_id`, or the zero address when there is none
pub fn stable_token_address(chain_id: u64) -> &'static str {
    stable_token(chain_id).map_or(ZERO_ADDRESS, |token| token.address)
}

pub fn is_supported(chain_id: u64) -> bool {
    stable_token(chain_id).is_some()
}

pub fn network_name(chain_id: u64) -> Option<&'static str> {
    stable_token(chain_id).map(|token| token.network)
}
