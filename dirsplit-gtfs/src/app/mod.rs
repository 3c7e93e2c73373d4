mod split_app;
mod split_app_error;
mod split_operation;

pub use split_app::SplitApp;
pub use split_app_error::SplitAppError;
pub use split_operation::SplitOperation;
