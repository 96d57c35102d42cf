//! Fulfillment planner.
//!
//! Pairs items across the fixed `[seller order, counter order]` batch:
//!
//! 1. **Asset routing**: each seller offer item `(0, i)` settles the first
//!    seller consideration item `(0, j)` with the same type/token/identifier.
//! 2. **Payment routing**: the counter order's aggregated offer `(1, 0)`
//!    settles every currency consideration item `(0, k)`.
//!
//! Asset-routing fulfillments come first, each group in array order. The
//! output depends only on the seller order.

use privsale_types::constants::{COUNTER_OFFER_ITEM_INDEX, COUNTER_ORDER_INDEX, SELLER_ORDER_INDEX};
use privsale_types::{Fulfillment, FulfillmentComponent, Order, PrivateListingError, Result};

/// Build the fulfillment list for matching `order` with its counter order.
///
/// Currency homogeneity is assumed, not re-checked; see
/// [`crate::validation::validate_private_listing`].
///
/// # Errors
/// Returns [`PrivateListingError::UnmatchedOfferItem`] if an offer item has
/// no consideration item with the same asset key.
pub fn build_fulfillments(order: &Order) -> Result<Vec<Fulfillment>> {
    let consideration = order.consideration();

    let mut fulfillments = Vec::with_capacity(order.offer().len() + consideration.len());

    for (offer_index, offer_item) in order.offer().iter().enumerate() {
        let key = offer_item.asset_key();
        let consideration_index = consideration
            .iter()
            .position(|item| item.asset_key() == key)
            .ok_or(PrivateListingError::UnmatchedOfferItem { offer_index })?;

        fulfillments.push(Fulfillment::single(
            FulfillmentComponent::new(SELLER_ORDER_INDEX, offer_index),
            FulfillmentComponent::new(SELLER_ORDER_INDEX, consideration_index),
        ));
    }
    let asset_routes = fulfillments.len();

    fulfillments.extend(
        consideration
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_currency())
            .map(|(consideration_index, _)| {
                Fulfillment::single(
                    FulfillmentComponent::new(COUNTER_ORDER_INDEX, COUNTER_OFFER_ITEM_INDEX),
                    FulfillmentComponent::new(SELLER_ORDER_INDEX, consideration_index),
                )
            }),
    );

    tracing::debug!(
        offerer = %order.offerer(),
        asset_routes,
        payment_routes = fulfillments.len() - asset_routes,
        "Fulfillments planned"
    );

    Ok(fulfillments)
}
