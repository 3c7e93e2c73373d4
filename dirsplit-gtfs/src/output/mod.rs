mod output_error;
mod output_ops;
mod output_row;

pub use output_error::OutputError;
pub use output_ops::{
    remove_variants, write_run_summary, write_variants, RUN_SUMMARY_FILENAME, VARIANTS_FILENAME,
    VARIANT_STOPS_FILENAME,
};
pub use output_row::{TripVariantRow, VariantStopRow};
