#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    #[error("failure creating output directory {directory}: {source}")]
    CreateDirectoryError {
        directory: String,
        source: std::io::Error,
    },
    #[error("output file {0} already exists and overwrite is not enabled")]
    FileExists(String),
    #[error("failure creating output file {filename}: {source}")]
    CreateFileError {
        filename: String,
        source: std::io::Error,
    },
    #[error("failure removing output file {filename}: {source}")]
    RemoveFileError {
        filename: String,
        source: std::io::Error,
    },
    #[error("failure writing row to {filename}: {source}")]
    WriteRowError {
        filename: String,
        source: csv::Error,
    },
    #[error("failure finishing {filename}: {message}")]
    FinishError { filename: String, message: String },
    #[error("failure writing run summary {filename}: {source}")]
    SummaryError {
        filename: String,
        source: serde_json::Error,
    },
}
