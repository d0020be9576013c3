use std::time::Instant;

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use address_linker::config::{JobPaths, LinkerConfig};
use address_linker::data::repo::addresses::{load_addresses, write_result};
use address_linker::data::repo::reference::load_reference;
use address_linker::{link, LinkError, ReferenceIndex};

fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LinkError> {
    let started = Instant::now();
    let paths = JobPaths::from_env()?;
    let config = LinkerConfig::from_env()?;
    info!("Linking with {:?}", config);

    let reference = load_reference(&paths.reference, &paths.reference_entry_pattern)?;
    let index = ReferenceIndex::build(&reference);
    drop(reference);

    let addresses = load_addresses(&paths.addresses)?;
    let result = link(&addresses, &index, &config);
    write_result(&paths.output_dir, &result)?;

    info!("Done in {:.1}s", started.elapsed().as_secs_f64());
    Ok(())
}
