pub mod clean_ops;
mod feed_error;
mod feed_loader;
pub mod route_key;
pub mod service_ops;

pub use feed_error::FeedError;
pub use feed_loader::{FeedLoader, LoadedFeed};
pub use route_key::RouteKeyRules;
pub use service_ops::ServiceWindow;
