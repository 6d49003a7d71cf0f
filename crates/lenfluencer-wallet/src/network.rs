//! Network descriptor for `wallet_switchEthereumChain` /
//! `wallet_addEthereumChain`, serialized in the wallet wire shape.

use serde::Serialize;

use lenfluencer_shared::constants::{
    TARGET_CHAIN_CURRENCY_DECIMALS, TARGET_CHAIN_CURRENCY_NAME, TARGET_CHAIN_CURRENCY_SYMBOL,
    TARGET_CHAIN_EXPLORER_URL, TARGET_CHAIN_ID, TARGET_CHAIN_NAME, TARGET_CHAIN_RPC_URL,
};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Parameters a wallet needs to register a network, as accepted by
/// `wallet_addEthereumChain`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    /// Hex-encoded chain id, e.g. `0x13881`.
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl ChainDescriptor {
    /// The fixed target network of the sponsorship flow.
    pub fn target() -> Self {
        Self {
            chain_id: format!("{TARGET_CHAIN_ID:#x}"),
            chain_name: TARGET_CHAIN_NAME.to_string(),
            native_currency: NativeCurrency {
                name: TARGET_CHAIN_CURRENCY_NAME.to_string(),
                symbol: TARGET_CHAIN_CURRENCY_SYMBOL.to_string(),
                decimals: TARGET_CHAIN_CURRENCY_DECIMALS,
            },
            rpc_urls: vec![TARGET_CHAIN_RPC_URL.to_string()],
            block_explorer_urls: vec![TARGET_CHAIN_EXPLORER_URL.to_string()],
        }
    }

    /// Numeric chain id decoded from the hex form.
    pub fn id(&self) -> u64 {
        parse_chain_id(&self.chain_id).unwrap_or(0)
    }
}

/// Decode a `0x`-prefixed (or bare) hex chain id.
pub fn parse_chain_id(hex_id: &str) -> Option<u64> {
    let digits = hex_id.trim().trim_start_matches("0x");
    u64::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_descriptor_round_trips_id() {
        let chain = ChainDescriptor::target();
        assert_eq!(chain.chain_id, "0x13881");
        assert_eq!(chain.id(), TARGET_CHAIN_ID);
    }

    #[test]
    fn test_add_chain_wire_shape_is_camel_case() {
        let value = serde_json::to_value(ChainDescriptor::target()).unwrap();
        assert!(value.get("chainId").is_some());
        assert!(value.get("nativeCurrency").is_some());
        assert!(value.get("rpcUrls").is_some());
        assert!(value.get("blockExplorerUrls").is_some());
    }

    #[test]
    fn test_parse_chain_id_forms() {
        assert_eq!(parse_chain_id("0x13881"), Some(80001));
        assert_eq!(parse_chain_id("13881"), Some(80001));
        assert_eq!(parse_chain_id("nope"), None);
    }
}
