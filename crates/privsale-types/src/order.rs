//! Order types as exchanged with the order-creation SDK and the settlement
//! engine.
//!
//! Fields outside `offerer`, `offer`, `consideration`, `salt`,
//! `totalOriginalConsiderationItems` and `signature` are opaque here: they
//! are carried through unchanged.

use serde::{Deserialize, Serialize};

use crate::primitives::optional_signature;
use crate::{Address, Amount, ConsiderationItem, OfferItem, PrivateListingError, Result, Signature, Word};

/// Fill and zone-restriction mode. Serialized as the protocol's integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OrderType {
    FullOpen,
    PartialOpen,
    FullRestricted,
    PartialRestricted,
}

impl TryFrom<u8> for OrderType {
    type Error = PrivateListingError;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::FullOpen),
            1 => Ok(Self::PartialOpen),
            2 => Ok(Self::FullRestricted),
            3 => Ok(Self::PartialRestricted),
            other => Err(PrivateListingError::UnknownOrderType(other)),
        }
    }
}

impl From<OrderType> for u8 {
    fn from(order_type: OrderType) -> Self {
        match order_type {
            OrderType::FullOpen => 0,
            OrderType::PartialOpen => 1,
            OrderType::FullRestricted => 2,
            OrderType::PartialRestricted => 3,
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FullOpen => write!(f, "FULL_OPEN"),
            Self::PartialOpen => write!(f, "PARTIAL_OPEN"),
            Self::FullRestricted => write!(f, "FULL_RESTRICTED"),
            Self::PartialRestricted => write!(f, "PARTIAL_RESTRICTED"),
        }
    }
}

/// The signed body of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderParameters {
    pub offerer: Address,
    pub zone: Address,
    pub offer: Vec<OfferItem>,
    pub consideration: Vec<ConsiderationItem>,
    pub order_type: OrderType,
    pub start_time: Amount,
    pub end_time: Amount,
    pub zone_hash: Word,
    pub salt: Word,
    pub conduit_key: Word,
    pub total_original_consideration_items: u64,
    /// Offerer nonce. Present on orders produced by the SDK.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter: Option<Amount>,
}

/// An order plus its signature. Counter orders are submitted unsigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub parameters: OrderParameters,
    #[serde(default, with = "optional_signature")]
    pub signature: Option<Signature>,
}

impl Order {
    /// Decode an SDK-shaped order. Addresses, amounts and enum codes are
    /// all checked here, once.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[must_use]
    pub fn offerer(&self) -> Address {
        self.parameters.offerer
    }

    #[must_use]
    pub fn offer(&self) -> &[OfferItem] {
        &self.parameters.offer
    }

    #[must_use]
    pub fn consideration(&self) -> &[ConsiderationItem] {
        &self.parameters.consideration
    }

    #[must_use]
    pub fn is_signed(&self) -> bool {
        self.signature.as_ref().is_some_and(|sig| !sig.0.is_empty())
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// A signed listing selling ERC721 `token`/`identifier` from `seller`
    /// to `buyer`, paid for by `payments`.
    ///
    /// Consideration layout: `payments[0]`, the NFT routed to the buyer,
    /// then the remaining payments.
    pub fn dummy_private_listing(
        seller: Address,
        buyer: Address,
        token: Address,
        identifier: u64,
        payments: Vec<ConsiderationItem>,
    ) -> Self {
        let nft = OfferItem {
            item_type: crate::ItemType::Erc721,
            token,
            identifier_or_criteria: Amount::new(identifier),
            start_amount: Amount::new(1),
            end_amount: Amount::new(1),
        };
        let mut payments = payments.into_iter();
        let mut consideration: Vec<ConsiderationItem> = payments.next().into_iter().collect();
        consideration.push(ConsiderationItem::erc721(
            token,
            Amount::new(identifier),
            buyer,
        ));
        consideration.extend(payments);
        let total = consideration.len() as u64;

        Self {
            parameters: OrderParameters {
                offerer: seller,
                zone: Address::ZERO,
                offer: vec![nft],
                consideration,
                order_type: OrderType::FullOpen,
                start_time: Amount::ZERO,
                end_time: Amount::MAX,
                zone_hash: Word::ZERO,
                salt: Word::from_low_u64(0x5eed),
                conduit_key: Word::ZERO,
                total_original_consideration_items: total,
                counter: Some(Amount::ZERO),
            },
            signature: Some(Signature(vec![0xab; 65])),
        }
    }
}
