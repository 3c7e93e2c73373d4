use crate::feed::FeedError;
use crate::output::OutputError;
use dirsplit_core::registry::RegistryError;

#[derive(thiserror::Error, Debug)]
pub enum SplitAppError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("failure reading app configuration: {0}")]
    Configuration(#[from] ::config::ConfigError),
    #[error(transparent)]
    Feed(#[from] FeedError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error("failure building thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("run produced {classification_failures} classification failures and {merge_failures} merge failures, trip variants not written")]
    RunFailed {
        classification_failures: usize,
        merge_failures: usize,
    },
}
