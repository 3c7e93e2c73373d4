//! Direction classification and trip splitting for transit schedules.
//!
//! A [`registry::SpecRegistry`] holds curated reference stop orders per route. The
//! [`engine::SplitEngine`] aligns each raw feed trip against those orders, splits trips that
//! run through both directions, orders the resulting stops and merges equivalent headsigns.
pub mod engine;
pub mod model;
pub mod registry;
