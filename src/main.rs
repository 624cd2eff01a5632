use anyhow::Result;
use goc::cli;

fn main() -> Result<()> {
    cli::run()
}
