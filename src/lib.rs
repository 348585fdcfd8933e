//! Conversion core for synthetic forex assets.
//!
//! This crate lets a holder of yield-bearing synthetic-currency assets, their
//! underlying synthetics, USD-pegged stables, liquidity-pool shares, or the
//! protocol stable asset quote and execute conversions among any of these,
//! routing through one or more independent liquidity venues.
//!
//! ## Core concepts
//!
//! - **[`venues::VenueAdapter`]**: a single liquidity venue behind a uniform
//!   `quote`/`execute` contract. Executing yields the realized output together
//!   with the venue's successor state.
//! - **[`registry::AssetRegistry`]**: wrapped-asset mappings driving venue
//!   dispatch for yield-bearing conversions.
//! - **[`book::VenueBook`]**: the shared venue-and-balance state every
//!   conversion transacts against, with atomic commit and discard-on-exit
//!   dry-run scopes.
//! - **[`router::Router`]**: directional conversion operations composed from
//!   one or more venue legs.
//! - **[`chain`]**: caller-assembled routes executed leg by leg, the output of
//!   each leg threaded into the amount slot of the next.
//! - **[`view::ViewSimulator`]**: quoting that re-runs the execution path in a
//!   scope that is always rolled back.

pub mod book;
pub mod chain;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod registry;
pub mod router;
pub mod venues;
pub mod view;

pub use book::VenueBook;
pub use chain::{Leg, Route, RouteBuilder};
pub use errors::SwapError;
pub use ledger::Ledger;
pub use models::{AccountId, AssetId, VenueRef};
pub use registry::{AssetMapping, AssetRegistry};
pub use router::Router;
pub use venues::{VenueAdapter, VenueFill, VenueKind};
pub use view::ViewSimulator;
