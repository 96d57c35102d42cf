//! # privsale-core
//!
//! **Private-listing settlement construction.**
//!
//! Turns a seller's signed private listing into everything a multi-order
//! matching engine needs to settle it atomically:
//!
//! - **Counter-order builder**: the buyer's unsigned order offering the
//!   aggregated payment
//! - **Fulfillment planner**: item-by-item pairings across the two orders
//! - **Match request**: the `[seller, counter]` pair, the plan, and the
//!   native value to attach, structurally verified
//!
//! ## Flow
//!
//! ```text
//! signed listing ─► CounterOrderBuilder::build ─► counter order ─┐
//!                └► build_fulfillments ─────────► fulfillments ──┴► MatchRequest ─► engine
//! ```
//!
//! Everything here is pure data transformation: no chain state, no I/O.
//! The only nondeterminism is the counter order's salt, drawn from an
//! injectable [`SaltSource`].

pub mod counter_order;
pub mod fulfillment;
pub mod match_request;
pub mod salt;
pub mod validation;

pub use counter_order::CounterOrderBuilder;
pub use fulfillment::build_fulfillments;
pub use match_request::{
    MatchRequest, compute_plan_digest, prepare_private_listing, verify_match_request,
    verify_plan_digest,
};
pub use salt::{FixedSalt, RandomSalt, SaltSource};
#[cfg(any(test, feature = "test-helpers"))]
pub use salt::SequenceSalt;
pub use validation::validate_private_listing;
