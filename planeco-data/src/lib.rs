//! Routing service adapters for the Planeco engine.
//!
//! Responsibilities:
//! - Implement the `planeco-core` provider traits over HTTP.
//! - Translate backend payloads into `DistanceMatrix` and `RouteSummary`.
//! - Map transport and payload failures onto `ProviderError`.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `planeco-core`).
//! - Backend field names never leave this crate.
//!
//! Invariants:
//! - Clients are cheap to clone and safe to share across tasks.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod routing;
