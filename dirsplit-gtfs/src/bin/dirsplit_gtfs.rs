//! splits the trips of a GTFS archive into direction-consistent trip variants using the
//! reference stop sequences of a route registry file.
use clap::Parser;
use dirsplit_gtfs::app::SplitApp;

fn main() {
    env_logger::init();
    let args = SplitApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
