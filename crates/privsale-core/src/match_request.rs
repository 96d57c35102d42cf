//! Match-request assembly for the settlement engine.
//!
//! ```text
//! prepare_private_listing(seller order, buyer) -> MatchRequest
//!   orders       = [seller order, counter order]
//!   fulfillments = build_fulfillments(seller order)
//!   native_value = counter offer start amount, if paid in native currency
//! ```
//!
//! The engine decides whether the pair nets out; this module only checks
//! that every fulfillment points at real items of one asset class, and
//! produces a digest so two runs over the same inputs can be compared.

use privsale_types::constants::{COUNTER_OFFER_ITEM_INDEX, MATCHED_ORDER_COUNT};
use privsale_types::{
    Address, Amount, Fulfillment, FulfillmentComponent, ItemType, Order, PrivateListingError,
    Result,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::counter_order::CounterOrderBuilder;
use crate::fulfillment::build_fulfillments;
use crate::salt::SaltSource;
use crate::validation::validate_private_listing;

/// Everything the settlement engine needs for one atomic private sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    /// `[seller order, counter order]`.
    pub orders: [Order; MATCHED_ORDER_COUNT],
    pub fulfillments: Vec<Fulfillment>,
    /// Native currency the buyer attaches to the match call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_value: Option<Amount>,
}

impl MatchRequest {
    #[must_use]
    pub fn seller_order(&self) -> &Order {
        &self.orders[0]
    }

    #[must_use]
    pub fn counter_order(&self) -> &Order {
        &self.orders[1]
    }
}

/// Validate `order` as a private listing for `buyer`, derive its counter
/// order and fulfillments, and check the result fits together.
pub fn prepare_private_listing<S: SaltSource>(
    order: &Order,
    buyer: Address,
    builder: &CounterOrderBuilder<S>,
) -> Result<MatchRequest> {
    if let Err(err) = validate_private_listing(order, buyer) {
        tracing::warn!(
            offerer = %order.offerer(),
            buyer = %buyer,
            error = %err,
            "Private listing rejected"
        );
        return Err(err);
    }

    let counter = builder.build(order, buyer)?;
    let fulfillments = build_fulfillments(order)?;

    let payment = &counter.offer()[COUNTER_OFFER_ITEM_INDEX];
    let native_value = (payment.item_type == ItemType::Native).then_some(payment.start_amount);

    let request = MatchRequest {
        orders: [order.clone(), counter],
        fulfillments,
        native_value,
    };
    verify_match_request(&request)?;

    tracing::info!(
        seller = %order.offerer(),
        buyer = %buyer,
        fulfillments = request.fulfillments.len(),
        native_value = ?request.native_value.map(|v| v.to_string()),
        plan_digest = hex::encode(compute_plan_digest(&request)),
        "Private listing match prepared"
    );

    Ok(request)
}

/// What a fulfillment component points at.
#[derive(Clone, Copy)]
struct ItemClass {
    item_type: ItemType,
    token: Address,
    identifier: Amount,
}

impl ItemClass {
    fn agrees_with(&self, other: &ItemClass) -> bool {
        if self.item_type != other.item_type {
            return false;
        }
        match self.item_type {
            ItemType::Native => true,
            ItemType::Erc20 | ItemType::Erc721WithCriteria | ItemType::Erc1155WithCriteria => {
                self.token.same_as(&other.token)
            }
            ItemType::Erc721 | ItemType::Erc1155 => {
                self.token.same_as(&other.token) && self.identifier == other.identifier
            }
        }
    }
}

fn resolve(
    orders: &[Order; MATCHED_ORDER_COUNT],
    component: FulfillmentComponent,
    offer_side: bool,
) -> Option<ItemClass> {
    let order = orders.get(component.order_index)?;
    if offer_side {
        order.offer().get(component.item_index).map(|item| ItemClass {
            item_type: item.item_type,
            token: item.token,
            identifier: item.identifier_or_criteria,
        })
    } else {
        order.consideration().get(component.item_index).map(|item| ItemClass {
            item_type: item.item_type,
            token: item.token,
            identifier: item.identifier_or_criteria,
        })
    }
}

/// Structural check of a request before it is handed to the engine.
///
/// # Errors
/// Returns [`PrivateListingError::MalformedFulfillment`] for the first
/// fulfillment with an empty side, an out-of-range component, or items of
/// differing asset class.
pub fn verify_match_request(request: &MatchRequest) -> Result<()> {
    for (index, fulfillment) in request.fulfillments.iter().enumerate() {
        let malformed = |reason: String| PrivateListingError::MalformedFulfillment {
            fulfillment: index,
            reason,
        };

        let Some(&first) = fulfillment.offer_components.first() else {
            return Err(malformed("no offer components".to_string()));
        };
        if fulfillment.consideration_components.is_empty() {
            return Err(malformed("no consideration components".to_string()));
        }

        let class = resolve(&request.orders, first, true)
            .ok_or_else(|| malformed(format!("offer component {first} out of range")))?;

        let sides = fulfillment
            .offer_components
            .iter()
            .map(|c| (*c, true))
            .chain(fulfillment.consideration_components.iter().map(|c| (*c, false)));
        for (component, offer_side) in sides {
            let side = if offer_side { "offer" } else { "consideration" };
            let other = resolve(&request.orders, component, offer_side)
                .ok_or_else(|| malformed(format!("{side} component {component} out of range")))?;
            if !class.agrees_with(&other) {
                return Err(malformed(format!(
                    "{side} component {component} is {} but the fulfillment routes {}",
                    other.item_type, class.item_type
                )));
            }
        }
    }
    Ok(())
}

/// SHA-256 over the fulfillment plan, every item of both orders, and the
/// attached native value.
///
/// The same seller order, buyer and salt always give the same digest.
/// Changing what is paid, how much, or to whom changes it.
#[must_use]
pub fn compute_plan_digest(request: &MatchRequest) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"privsale:plan_digest:v1:");

    for order in &request.orders {
        hasher.update(order.offerer().as_bytes());
        hasher.update(order.parameters.salt.as_bytes());
        hasher.update((order.offer().len() as u64).to_le_bytes());
        for item in order.offer() {
            hasher.update([item.item_type.code()]);
            hasher.update(item.token.as_bytes());
            hasher.update(item.identifier_or_criteria.to_be_bytes());
            hasher.update(item.start_amount.to_be_bytes());
            hasher.update(item.end_amount.to_be_bytes());
        }
        hasher.update((order.consideration().len() as u64).to_le_bytes());
        for item in order.consideration() {
            hasher.update([item.item_type.code()]);
            hasher.update(item.token.as_bytes());
            hasher.update(item.identifier_or_criteria.to_be_bytes());
            hasher.update(item.start_amount.to_be_bytes());
            hasher.update(item.end_amount.to_be_bytes());
            hasher.update(item.recipient.as_bytes());
        }
    }

    match request.native_value {
        Some(value) => {
            hasher.update([1u8]);
            hasher.update(value.to_be_bytes());
        }
        None => hasher.update([0u8]),
    }

    hasher.update((request.fulfillments.len() as u64).to_le_bytes());
    for fulfillment in &request.fulfillments {
        for components in [
            &fulfillment.offer_components,
            &fulfillment.consideration_components,
        ] {
            hasher.update((components.len() as u64).to_le_bytes());
            for component in components {
                hasher.update((component.order_index as u64).to_le_bytes());
                hasher.update((component.item_index as u64).to_le_bytes());
            }
        }
    }

    let result = hasher.finalize();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&result);
    digest
}

/// Recompute the plan digest and compare with `expected`.
#[must_use]
pub fn verify_plan_digest(request: &MatchRequest, expected: &[u8; 32]) -> bool {
    compute_plan_digest(request) == *expected
}
