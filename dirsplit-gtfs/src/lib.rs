//! GTFS front end for the direction split engine: reads a feed into raw trips, runs
//! [`dirsplit_core::engine::SplitEngine`] and writes the resulting trip variants.
pub mod app;
pub mod config;
pub mod feed;
pub mod output;
