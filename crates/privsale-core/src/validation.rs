//! Private-listing validation and amount aggregation shared by the
//! counter-order builder and the match-request layer.

use privsale_types::{
    Address, Amount, ConsiderationItem, ListingViolation, Order, PrivateListingError, Result,
};

/// A consideration item together with its index in the seller order.
#[derive(Debug, Clone, Copy)]
pub struct IndexedItem<'a> {
    pub index: usize,
    pub item: &'a ConsiderationItem,
}

/// Consideration split by recipient.
#[derive(Debug, Clone, Default)]
pub struct PartitionedConsideration<'a> {
    /// Items delivered to the buyer (the assets being sold).
    pub buyer_items: Vec<IndexedItem<'a>>,
    /// Everything else: seller proceeds, fees, royalties.
    pub payment_items: Vec<IndexedItem<'a>>,
}

/// Split `order`'s consideration into buyer-routed and payment items,
/// preserving array order.
#[must_use]
pub fn partition_consideration(order: &Order, buyer: Address) -> PartitionedConsideration<'_> {
    let (buyer_items, payment_items): (Vec<_>, Vec<_>) = order
        .consideration()
        .iter()
        .enumerate()
        .map(|(index, item)| IndexedItem { index, item })
        .partition(|entry| entry.item.recipient.same_as(&buyer));
    PartitionedConsideration {
        buyer_items,
        payment_items,
    }
}

/// Payment items must be non-empty, all currency, and all one currency.
pub fn ensure_homogeneous_currency(payment_items: &[IndexedItem<'_>]) -> Result<()> {
    let invalid = |violation| PrivateListingError::InvalidPrivateListing { violation };

    let Some(first) = payment_items.first() else {
        return Err(invalid(ListingViolation::NoPaymentItems));
    };

    if let Some(entry) = payment_items.iter().find(|e| !e.item.is_currency()) {
        return Err(invalid(ListingViolation::NonCurrencyItem {
            index: entry.index,
            item_type: entry.item.item_type,
        }));
    }

    if let Some(entry) = payment_items
        .iter()
        .find(|e| !e.item.same_currency_as(first.item))
    {
        return Err(invalid(ListingViolation::MixedCurrency { index: entry.index }));
    }

    Ok(())
}

/// Exact `(Σ startAmount, Σ endAmount)` over `items`, summed independently.
pub fn aggregate_amounts<'a, I>(items: I) -> Result<(Amount, Amount)>
where
    I: IntoIterator<Item = &'a ConsiderationItem>,
{
    items
        .into_iter()
        .try_fold((Amount::ZERO, Amount::ZERO), |(start, end), item| {
            let start = start
                .checked_add(item.start_amount)
                .ok_or(PrivateListingError::AmountOverflow)?;
            let end = end
                .checked_add(item.end_amount)
                .ok_or(PrivateListingError::AmountOverflow)?;
            Ok((start, end))
        })
}

/// Full structural check of a private listing for `buyer`.
///
/// Every offer item must have exactly one buyer-routed consideration item
/// with the same asset key, and the remaining consideration must be one
/// homogeneous currency.
pub fn validate_private_listing(order: &Order, buyer: Address) -> Result<()> {
    let partitioned = partition_consideration(order, buyer);

    for (offer_index, offer_item) in order.offer().iter().enumerate() {
        let key = offer_item.asset_key();
        let matches = partitioned
            .buyer_items
            .iter()
            .filter(|entry| entry.item.asset_key() == key)
            .count();
        match matches {
            0 => return Err(PrivateListingError::UnmatchedOfferItem { offer_index }),
            1 => {}
            _ => return Err(PrivateListingError::DuplicateBuyerItem { offer_index }),
        }
    }

    ensure_homogeneous_currency(&partitioned.payment_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use privsale_types::ItemType;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 20])
    }

    fn seller() -> Address {
        addr(0x11)
    }

    fn buyer() -> Address {
        addr(0x22)
    }

    fn nft() -> Address {
        addr(0x33)
    }

    fn listing(payments: Vec<ConsiderationItem>) -> Order {
        Order::dummy_private_listing(seller(), buyer(), nft(), 1, payments)
    }

    #[test]
    fn partition_preserves_indices() {
        let order = listing(vec![
            ConsiderationItem::native(Amount::new(10), seller()),
            ConsiderationItem::native(Amount::new(1), addr(0x44)),
        ]);
        let parts = partition_consideration(&order, buyer());
        assert_eq!(parts.buyer_items.len(), 1);
        assert_eq!(parts.buyer_items[0].index, 1);
        let payment_indices: Vec<usize> = parts.payment_items.iter().map(|e| e.index).collect();
        assert_eq!(payment_indices, vec![0, 2]);
    }

    #[test]
    fn partition_ignores_recipient_case() {
        let checksummed = Address::parse("0xAbCdEf0123456789aBcDeF0123456789AbCdEf01").unwrap();
        let order = Order::dummy_private_listing(
            seller(),
            checksummed,
            nft(),
            1,
            vec![ConsiderationItem::native(Amount::new(10), seller())],
        );
        let upper = Address::parse("0xABCDEF0123456789ABCDEF0123456789ABCDEF01").unwrap();
        let parts = partition_consideration(&order, upper);
        assert_eq!(parts.buyer_items.len(), 1);
        assert_eq!(parts.payment_items.len(), 1);
    }

    #[test]
    fn empty_payments_rejected() {
        let order = listing(vec![]);
        let parts = partition_consideration(&order, buyer());
        let err = ensure_homogeneous_currency(&parts.payment_items).unwrap_err();
        assert!(matches!(
            err,
            PrivateListingError::InvalidPrivateListing {
                violation: ListingViolation::NoPaymentItems
            }
        ));
    }

    #[test]
    fn non_currency_reported_before_mixing() {
        let order = listing(vec![
            ConsiderationItem::erc20(addr(0x55), Amount::new(10), seller()),
            ConsiderationItem::erc721(addr(0x66), Amount::new(4), seller()),
        ]);
        let parts = partition_consideration(&order, buyer());
        let err = ensure_homogeneous_currency(&parts.payment_items).unwrap_err();
        assert!(matches!(
            err,
            PrivateListingError::InvalidPrivateListing {
                violation: ListingViolation::NonCurrencyItem {
                    index: 2,
                    item_type: ItemType::Erc721
                }
            }
        ));
    }

    #[test]
    fn different_erc20_tokens_are_mixed() {
        let order = listing(vec![
            ConsiderationItem::erc20(addr(0x55), Amount::new(10), seller()),
            ConsiderationItem::erc20(addr(0x56), Amount::new(1), addr(0x44)),
        ]);
        let parts = partition_consideration(&order, buyer());
        let err = ensure_homogeneous_currency(&parts.payment_items).unwrap_err();
        assert!(matches!(
            err,
            PrivateListingError::InvalidPrivateListing {
                violation: ListingViolation::MixedCurrency { index: 2 }
            }
        ));
    }

    #[test]
    fn aggregate_sums_bounds_independently() {
        let mut a = ConsiderationItem::native(Amount::new(100), seller());
        a.end_amount = Amount::new(10);
        let mut b = ConsiderationItem::native(Amount::new(5), addr(0x44));
        b.end_amount = Amount::new(50);
        let (start, end) = aggregate_amounts([&a, &b]).unwrap();
        assert_eq!(start, Amount::new(105));
        assert_eq!(end, Amount::new(60));
    }

    #[test]
    fn aggregate_overflow_is_an_error() {
        let a = ConsiderationItem::native(Amount::MAX, seller());
        let b = ConsiderationItem::native(Amount::new(1), addr(0x44));
        assert!(matches!(
            aggregate_amounts([&a, &b]),
            Err(PrivateListingError::AmountOverflow)
        ));
    }

    #[test]
    fn full_validation_accepts_well_formed_listing() {
        let order = listing(vec![
            ConsiderationItem::native(Amount::new(10), seller()),
            ConsiderationItem::native(Amount::new(1), addr(0x44)),
        ]);
        validate_private_listing(&order, buyer()).unwrap();
    }

    #[test]
    fn full_validation_rejects_nft_routed_elsewhere() {
        let order = listing(vec![ConsiderationItem::native(Amount::new(10), seller())]);
        let stranger = addr(0x77);
        // Everything is a payment for a stranger, and nothing pairs the NFT.
        let err = validate_private_listing(&order, stranger).unwrap_err();
        assert!(matches!(
            err,
            PrivateListingError::UnmatchedOfferItem { offer_index: 0 }
        ));
    }

    #[test]
    fn full_validation_rejects_duplicate_buyer_item() {
        let mut order = listing(vec![ConsiderationItem::native(Amount::new(10), seller())]);
        let dup = order.consideration()[1].clone();
        order.parameters.consideration.push(dup);
        let err = validate_private_listing(&order, buyer()).unwrap_err();
        assert!(matches!(
            err,
            PrivateListingError::DuplicateBuyerItem { offer_index: 0 }
        ));
    }
}
