//! System-wide constants for private-listing construction.

/// Position of the seller's private-listing order in the matched pair.
pub const SELLER_ORDER_INDEX: usize = 0;

/// Position of the synthesized counter order in the matched pair.
pub const COUNTER_ORDER_INDEX: usize = 1;

/// The counter order carries exactly one offer item: the aggregated payment.
pub const COUNTER_OFFER_ITEM_INDEX: usize = 0;

/// Number of orders in a private-listing match.
pub const MATCHED_ORDER_COUNT: usize = 2;

/// Default number of random bytes in a freshly drawn salt.
pub const DEFAULT_SALT_ENTROPY_BYTES: usize = 8;

/// Width of a salt word in bytes.
pub const SALT_WORD_BYTES: usize = 32;

/// Default number of salt draws before giving up on a collision.
pub const DEFAULT_MAX_SALT_DRAWS: usize = 4;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
