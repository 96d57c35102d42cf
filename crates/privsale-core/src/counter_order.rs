//! Counter-order builder.
//!
//! Derives the buyer's side of a private listing from the seller's signed
//! order:
//!
//! ```text
//! seller consideration ──partition──► buyer items   (already routed to buyer)
//!                                  └► payment items ──Σ──► single offer item
//! ```
//!
//! The counter order offers every payment item as one aggregated currency
//! item and asks for nothing: the seller order already routes the sold
//! assets to the buyer. It is left unsigned because the buyer submits the
//! match themselves.

use privsale_types::{
    Address, ListingConfig, OfferItem, Order, OrderParameters, PrivateListingError, Result, Word,
};

use crate::salt::{RandomSalt, SaltSource};
use crate::validation::{aggregate_amounts, ensure_homogeneous_currency, partition_consideration};

/// Builds unsigned counter orders for private listings.
///
/// Stateless apart from the salt source, so one builder can serve many
/// listings concurrently.
pub struct CounterOrderBuilder<S: SaltSource = RandomSalt> {
    salts: S,
    max_salt_draws: usize,
}

impl CounterOrderBuilder<RandomSalt> {
    /// Builder drawing OS-random salts sized by `config`.
    pub fn from_config(config: &ListingConfig) -> Result<Self> {
        let salts = RandomSalt::from_config(config)?;
        Ok(Self {
            salts,
            max_salt_draws: config.max_salt_draws,
        })
    }
}

impl Default for CounterOrderBuilder<RandomSalt> {
    fn default() -> Self {
        Self {
            salts: RandomSalt::default(),
            max_salt_draws: privsale_types::constants::DEFAULT_MAX_SALT_DRAWS,
        }
    }
}

impl<S: SaltSource> CounterOrderBuilder<S> {
    /// Builder with an injected salt source (fixed salts in tests).
    pub fn with_salt_source(salts: S, config: &ListingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            salts,
            max_salt_draws: config.max_salt_draws,
        })
    }

    /// Derive the buyer's counter order for `order`.
    ///
    /// # Errors
    /// - `InvalidPrivateListing` if the items not routed to `buyer` are
    ///   empty, not all currency, or not one currency
    /// - `AmountOverflow` if the aggregated amounts exceed 256 bits
    /// - `SaltCollision` if every salt drawn equals the seller's salt
    pub fn build(&self, order: &Order, buyer: Address) -> Result<Order> {
        let partitioned = partition_consideration(order, buyer);
        if let Err(err) = ensure_homogeneous_currency(&partitioned.payment_items) {
            tracing::warn!(
                offerer = %order.offerer(),
                buyer = %buyer,
                error = %err,
                "Private listing rejected"
            );
            return Err(err);
        }

        // Non-empty: checked by ensure_homogeneous_currency.
        let template = partitioned.payment_items[0].item;
        let (start_amount, end_amount) =
            aggregate_amounts(partitioned.payment_items.iter().map(|entry| entry.item))?;

        let salt = self.draw_salt(order.parameters.salt)?;

        let counter = Order {
            parameters: OrderParameters {
                offerer: buyer,
                offer: vec![OfferItem {
                    item_type: template.item_type,
                    token: template.token,
                    identifier_or_criteria: template.identifier_or_criteria,
                    start_amount,
                    end_amount,
                }],
                consideration: Vec::new(),
                salt,
                total_original_consideration_items: 0,
                ..order.parameters.clone()
            },
            signature: None,
        };

        tracing::debug!(
            seller = %order.offerer(),
            buyer = %buyer,
            currency = %template.item_type,
            payment_items = partitioned.payment_items.len(),
            start_amount = %start_amount,
            end_amount = %end_amount,
            "Counter order built"
        );

        Ok(counter)
    }

    fn draw_salt(&self, listing_salt: Word) -> Result<Word> {
        for draw in 1..=self.max_salt_draws {
            let salt = self.salts.next_salt();
            if salt != listing_salt {
                return Ok(salt);
            }
            tracing::warn!(draw, salt = %salt, "Counter-order salt collided with listing salt");
        }
        Err(PrivateListingError::SaltCollision {
            draws: self.max_salt_draws,
        })
    }
}
