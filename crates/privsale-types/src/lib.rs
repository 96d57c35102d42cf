//! # privsale-types
//!
//! Shared types, errors, and configuration for private-listing settlement.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Primitives**: [`Address`], [`Amount`], [`Word`], [`Signature`]
//! - **Item model**: [`ItemType`], [`OfferItem`], [`ConsiderationItem`], [`AssetKey`]
//! - **Order model**: [`Order`], [`OrderParameters`], [`OrderType`]
//! - **Fulfillment model**: [`Fulfillment`], [`FulfillmentComponent`]
//! - **Configuration**: [`ListingConfig`]
//! - **Errors**: [`PrivateListingError`] with `PS_ERR_` prefix codes
//! - **Constants**: fixed order indices and salt defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod fulfillment;
pub mod item;
pub mod order;
pub mod primitives;

// Re-export all primary types at crate root for ergonomic imports:
//   use privsale_types::{Order, ConsiderationItem, Fulfillment, ...};

pub use config::*;
pub use error::*;
pub use fulfillment::*;
pub use item::*;
pub use order::*;
pub use primitives::{Address, Amount, Signature, Word};

// Constants are accessed via `privsale_types::constants::FOO`
// (not re-exported to avoid name collisions).
