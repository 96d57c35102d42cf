//! Offer and consideration items.
//!
//! An item names one class of transferable asset (type + token +
//! identifier) and an amount range. Start and end amounts diverge for
//! auction-style orders; this crate never interpolates between them.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, PrivateListingError};

/// Asset class of an item. Serialized as the protocol's integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ItemType {
    Native,
    Erc20,
    Erc721,
    Erc1155,
    Erc721WithCriteria,
    Erc1155WithCriteria,
}

impl ItemType {
    /// Native currency or a fungible token.
    #[must_use]
    pub fn is_currency(self) -> bool {
        matches!(self, Self::Native | Self::Erc20)
    }

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Native => 0,
            Self::Erc20 => 1,
            Self::Erc721 => 2,
            Self::Erc1155 => 3,
            Self::Erc721WithCriteria => 4,
            Self::Erc1155WithCriteria => 5,
        }
    }
}

impl TryFrom<u8> for ItemType {
    type Error = PrivateListingError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Native),
            1 => Ok(Self::Erc20),
            2 => Ok(Self::Erc721),
            3 => Ok(Self::Erc1155),
            4 => Ok(Self::Erc721WithCriteria),
            5 => Ok(Self::Erc1155WithCriteria),
            other => Err(PrivateListingError::UnknownItemType(other)),
        }
    }
}

impl From<ItemType> for u8 {
    fn from(item_type: ItemType) -> Self {
        item_type.code()
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => write!(f, "NATIVE"),
            Self::Erc20 => write!(f, "ERC20"),
            Self::Erc721 => write!(f, "ERC721"),
            Self::Erc1155 => write!(f, "ERC1155"),
            Self::Erc721WithCriteria => write!(f, "ERC721_WITH_CRITERIA"),
            Self::Erc1155WithCriteria => write!(f, "ERC1155_WITH_CRITERIA"),
        }
    }
}

/// The `(itemType, token, identifier)` triple two items must share to be
/// paired in a fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetKey {
    pub item_type: ItemType,
    pub token: Address,
    pub identifier: Amount,
}

/// An item the offerer gives up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferItem {
    pub item_type: ItemType,
    pub token: Address,
    pub identifier_or_criteria: Amount,
    pub start_amount: Amount,
    pub end_amount: Amount,
}

impl OfferItem {
    #[must_use]
    pub fn asset_key(&self) -> AssetKey {
        AssetKey {
            item_type: self.item_type,
            token: self.token,
            identifier: self.identifier_or_criteria,
        }
    }
}

/// An item the offerer expects, delivered to `recipient`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsiderationItem {
    pub item_type: ItemType,
    pub token: Address,
    pub identifier_or_criteria: Amount,
    pub start_amount: Amount,
    pub end_amount: Amount,
    pub recipient: Address,
}

impl ConsiderationItem {
    #[must_use]
    pub fn asset_key(&self) -> AssetKey {
        AssetKey {
            item_type: self.item_type,
            token: self.token,
            identifier: self.identifier_or_criteria,
        }
    }

    #[must_use]
    pub fn is_currency(&self) -> bool {
        self.item_type.is_currency()
    }

    /// Whether `other` pays in the same currency. ERC20 items must also
    /// share a token; native items always agree.
    #[must_use]
    pub fn same_currency_as(&self, other: &ConsiderationItem) -> bool {
        self.item_type == other.item_type
            && (self.item_type != ItemType::Erc20 || self.token.same_as(&other.token))
    }

    /// Fixed-price native payment of `amount` to `recipient`.
    #[must_use]
    pub fn native(amount: Amount, recipient: Address) -> Self {
        Self {
            item_type: ItemType::Native,
            token: Address::ZERO,
            identifier_or_criteria: Amount::ZERO,
            start_amount: amount,
            end_amount: amount,
            recipient,
        }
    }

    /// Fixed-price ERC20 payment of `amount` in `token` to `recipient`.
    #[must_use]
    pub fn erc20(token: Address, amount: Amount, recipient: Address) -> Self {
        Self {
            item_type: ItemType::Erc20,
            token,
            identifier_or_criteria: Amount::ZERO,
            start_amount: amount,
            end_amount: amount,
            recipient,
        }
    }

    /// A single ERC721 token routed to `recipient`.
    #[must_use]
    pub fn erc721(token: Address, identifier: Amount, recipient: Address) -> Self {
        Self {
            item_type: ItemType::Erc721,
            token,
            identifier_or_criteria: identifier,
            start_amount: Amount::new(1),
            end_amount: Amount::new(1),
            recipient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_classification() {
        assert!(ItemType::Native.is_currency());
        assert!(ItemType::Erc20.is_currency());
        assert!(!ItemType::Erc721.is_currency());
        assert!(!ItemType::Erc1155WithCriteria.is_currency());
    }

    #[test]
    fn item_type_codes() {
        for code in 0u8..=5 {
            let t = ItemType::try_from(code).unwrap();
            assert_eq!(u8::from(t), code);
        }
        assert!(matches!(
            ItemType::try_from(6),
            Err(PrivateListingError::UnknownItemType(6))
        ));
        assert!(serde_json::from_str::<ItemType>("7").is_err());
        assert_eq!(serde_json::to_string(&ItemType::Erc721).unwrap(), "2");
    }

    #[test]
    fn same_currency_rules() {
        let a = Address::from_bytes([1; 20]);
        let b = Address::from_bytes([2; 20]);
        let seller = Address::from_bytes([9; 20]);
        let usdc = ConsiderationItem::erc20(a, Amount::new(5), seller);
        let dai = ConsiderationItem::erc20(b, Amount::new(5), seller);
        let eth = ConsiderationItem::native(Amount::new(5), seller);
        let mut eth_other_token = eth.clone();
        eth_other_token.token = b;

        assert!(usdc.same_currency_as(&usdc.clone()));
        assert!(!usdc.same_currency_as(&dai));
        assert!(!usdc.same_currency_as(&eth));
        assert!(eth.same_currency_as(&eth_other_token));
    }

    #[test]
    fn consideration_item_parses_sdk_json() {
        let json = r#"{
            "itemType": 2,
            "token": "0x5FbDB2315678afecb367f032d93F642f64180aa3",
            "identifierOrCriteria": "1",
            "startAmount": "1",
            "endAmount": "1",
            "recipient": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
        }"#;
        let item: ConsiderationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_type, ItemType::Erc721);
        assert_eq!(item.identifier_or_criteria, Amount::new(1));
        assert!(item.recipient.same_as(
            &Address::parse("0x70997970c51812dc3a010c7d01b50e0d17dc79c8").unwrap()
        ));
    }
}
