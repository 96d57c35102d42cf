//! Error types for private-listing construction.
//!
//! All errors use the `PS_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Listing / counter-order errors
//! - 2xx: Fulfillment planning errors
//! - 3xx: Amount and boundary decoding errors
//! - 9xx: General / internal errors

use std::fmt;

use thiserror::Error;

use crate::ItemType;

/// Which private-listing predicate a seller order failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingViolation {
    /// Nothing in the consideration is routed away from the buyer, so there
    /// is no payment for the counter order to cover.
    NoPaymentItems,
    /// A consideration item not routed to the buyer is not a currency item.
    NonCurrencyItem { index: usize, item_type: ItemType },
    /// Payment items disagree on currency type or token.
    MixedCurrency { index: usize },
}

impl fmt::Display for ListingViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPaymentItems => write!(f, "no payment items outside the buyer's items"),
            Self::NonCurrencyItem { index, item_type } => write!(
                f,
                "non-currency item at consideration[{index}] ({item_type})"
            ),
            Self::MixedCurrency { index } => {
                write!(f, "mixed currency type at consideration[{index}]")
            }
        }
    }
}

/// Central error enum for all private-listing operations.
#[derive(Debug, Error)]
pub enum PrivateListingError {
    // =================================================================
    // Listing Errors (1xx)
    // =================================================================
    /// The consideration not routed to the buyer is not a single
    /// homogeneous currency.
    #[error("PS_ERR_100: Invalid private listing: {violation}")]
    InvalidPrivateListing { violation: ListingViolation },

    /// More than one buyer-routed consideration item matches an offer item.
    #[error("PS_ERR_101: Offer item {offer_index} is routed to the buyer more than once")]
    DuplicateBuyerItem { offer_index: usize },

    /// Every salt drawn for the counter order equalled the seller's salt.
    #[error("PS_ERR_102: Salt source collided with the listing salt {draws} times")]
    SaltCollision { draws: usize },

    // =================================================================
    // Fulfillment Errors (2xx)
    // =================================================================
    /// An offer item has no consideration item of the same type/token/identifier.
    #[error("PS_ERR_200: Offer item {offer_index} has no matching consideration item")]
    UnmatchedOfferItem { offer_index: usize },

    /// A fulfillment does not fit the order pair it is submitted with.
    #[error("PS_ERR_201: Malformed fulfillment {fulfillment}: {reason}")]
    MalformedFulfillment { fulfillment: usize, reason: String },

    // =================================================================
    // Amount / Boundary Errors (3xx)
    // =================================================================
    /// Aggregating amounts exceeded 256 bits.
    #[error("PS_ERR_300: Amount overflow while aggregating payment items")]
    AmountOverflow,

    /// An amount string is not a valid unsigned integer.
    #[error("PS_ERR_301: Invalid amount: {0}")]
    InvalidAmount(String),

    /// An address string is not 20 bytes of hex.
    #[error("PS_ERR_302: Invalid address: {0}")]
    InvalidAddress(String),

    /// Item type code outside the protocol's enum.
    #[error("PS_ERR_303: Unknown item type code {0}")]
    UnknownItemType(u8),

    /// Order type code outside the protocol's enum.
    #[error("PS_ERR_304: Unknown order type code {0}")]
    UnknownOrderType(u8),

    /// A hex-encoded field could not be decoded.
    #[error("PS_ERR_305: Invalid hex: {0}")]
    InvalidHex(String),

    // =================================================================
    // General (9xx)
    // =================================================================
    /// Serialization / deserialization error.
    #[error("PS_ERR_900: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (out-of-range values, etc.).
    #[error("PS_ERR_901: Configuration error: {0}")]
    Configuration(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, PrivateListingError>;

impl From<serde_json::Error> for PrivateListingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_listing_display_names_predicate() {
        let err = PrivateListingError::InvalidPrivateListing {
            violation: ListingViolation::MixedCurrency { index: 2 },
        };
        let msg = format!("{err}");
        assert!(msg.starts_with("PS_ERR_100"), "Got: {msg}");
        assert!(msg.contains("mixed currency"));
        assert!(msg.contains("consideration[2]"));
    }

    #[test]
    fn non_currency_display() {
        let err = PrivateListingError::InvalidPrivateListing {
            violation: ListingViolation::NonCurrencyItem {
                index: 1,
                item_type: ItemType::Erc721,
            },
        };
        let msg = format!("{err}");
        assert!(msg.contains("non-currency"));
        assert!(msg.contains("ERC721"));
    }

    #[test]
    fn all_errors_have_ps_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(PrivateListingError::UnmatchedOfferItem { offer_index: 0 }),
            Box::new(PrivateListingError::AmountOverflow),
            Box::new(PrivateListingError::SaltCollision { draws: 3 }),
            Box::new(PrivateListingError::UnknownItemType(9)),
            Box::new(PrivateListingError::Configuration("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("PS_ERR_"),
                "Error missing PS_ERR_ prefix: {msg}"
            );
        }
    }
}
