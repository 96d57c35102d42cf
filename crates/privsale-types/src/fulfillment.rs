//! Fulfillment types consumed by the settlement engine's multi-order match.
//!
//! A [`Fulfillment`] routes one class of matched item between orders in a
//! fixed batch: every offer component is netted against every
//! consideration component it lists.

use serde::{Deserialize, Serialize};

/// Pointer to one item of one order in the submitted batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentComponent {
    pub order_index: usize,
    pub item_index: usize,
}

impl FulfillmentComponent {
    #[must_use]
    pub fn new(order_index: usize, item_index: usize) -> Self {
        Self {
            order_index,
            item_index,
        }
    }
}

impl std::fmt::Display for FulfillmentComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.order_index, self.item_index)
    }
}

/// Offer components paired with the consideration components they satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    pub offer_components: Vec<FulfillmentComponent>,
    pub consideration_components: Vec<FulfillmentComponent>,
}

impl Fulfillment {
    /// One offer item routed to one consideration item.
    #[must_use]
    pub fn single(offer: FulfillmentComponent, consideration: FulfillmentComponent) -> Self {
        Self {
            offer_components: vec![offer],
            consideration_components: vec![consideration],
        }
    }
}
