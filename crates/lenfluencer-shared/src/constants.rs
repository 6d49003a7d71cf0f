/// Seconds in a 30-day month, the fixed scale between the wire flow rate
/// (smallest-unit per second) and the display rate (tokens per month).
pub const SECONDS_PER_MONTH: u64 = 2_592_000;

/// Smallest-unit decimals of the streamed super token.
pub const TOKEN_DECIMALS: u8 = 18;

/// Fractional digits kept when rendering a monthly rate for display.
pub const MONTHLY_DISPLAY_DIGITS: u32 = 9;

/// Domain suffix appended to bare handles before lookup.
pub const HANDLE_SUFFIX: &str = ".lens";

/// Default Lens profile API endpoint.
pub const LENS_API_URL: &str = "https://api.lens.dev";

/// Default Superfluid stream subgraph endpoint (Mumbai).
pub const STREAM_SUBGRAPH_URL: &str =
    "https://api.thegraph.com/subgraphs/name/superfluid-finance/protocol-v1-mumbai";

/// CFAv1 forwarder contract, the fixed entry point for flow management.
pub const CFA_FORWARDER_ADDRESS: &str = "0xcfa132e353cb4e398080b9700609bb008eceb125";

/// Streamed super token (fUSDCx on Mumbai).
pub const SUPER_TOKEN_ADDRESS: &str = "0x42bb40bf79730451b11f6de1cba222f17b87afd7";

/// Target chain id (Polygon Mumbai).
pub const TARGET_CHAIN_ID: u64 = 80001;

/// Human-readable name of the target chain.
pub const TARGET_CHAIN_NAME: &str = "Mumbai";

/// Native currency of the target chain.
pub const TARGET_CHAIN_CURRENCY_NAME: &str = "MATIC";
pub const TARGET_CHAIN_CURRENCY_SYMBOL: &str = "MATIC";
pub const TARGET_CHAIN_CURRENCY_DECIMALS: u8 = 18;

/// RPC and explorer endpoints registered via `wallet_addEthereumChain`.
pub const TARGET_CHAIN_RPC_URL: &str = "https://rpc-mumbai.maticvigil.com";
pub const TARGET_CHAIN_EXPLORER_URL: &str = "https://mumbai.polygonscan.com";

/// JSON-RPC error code a wallet returns when the requested chain is not
/// registered with it (EIP-3085 convention).
pub const UNKNOWN_CHAIN_ERROR_CODE: i64 = 4902;

/// All-zeros address, used as the stamp.fyi fallback owner.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Media gateways for dStorage URL resolution.
pub const ARWEAVE_GATEWAY: &str = "https://arweave.net/";
pub const IPFS_GATEWAY: &str = "https://gateway.ipfscdn.io/ipfs/";
pub const LENS_MEDIA_SNAPSHOT_URL: &str = "https://ik.imagekit.io/lens/media-snapshot";
pub const STAMP_FYI_URL: &str = "https://cdn.stamp.fyi/avatar";

/// ImageKit named transforms.
pub const AVATAR_TRANSFORM: &str = "tr:w-300,h-300";
pub const COVER_TRANSFORM: &str = "tr:w-1500,h-500";
