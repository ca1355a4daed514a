/// Category marking the summary row of a valuation
pub const FINAL_CATEGORY: &str = "_Final";

/// Decimal places of USD valuations
pub const USD_DECIMAL_PLACES: u32 = 2;

/// Decimal places of ETH valuations
pub const ETH_DECIMAL_PLACES: u32 = 6;

/// Level used when the frame user submits an empty level
pub const DEFAULT_FRAME_LEVEL: &str = "1";

/// Type used when the frame user submits an empty type
pub const DEFAULT_FRAME_TYPE: &str = "Unknown";

/// Base mainnet
pub const DONATION_CHAIN_ID: &str = "eip155:8453";

pub const DONATION_METHOD: &str = "eth_sendTransaction";

/// 0.23 USDC (6 decimals)
pub const DONATION_VALUE: &str = "230000";
