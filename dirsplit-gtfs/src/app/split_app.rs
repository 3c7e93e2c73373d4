use super::SplitOperation;
use clap::Parser;

/// command line tool that splits the trips of a GTFS archive into canonical route directions
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct SplitApp {
    #[command(subcommand)]
    pub op: SplitOperation,
}
