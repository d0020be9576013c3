use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use log::{info, warn};

use crate::data::error::LinkError;
use crate::data::models::{LinkedAddress, RawAddress};
use crate::data::repo::read_table;
use crate::linker::LinkResult;

pub const RESOLVED_FILE: &str = "resolved.csv";
pub const UNRESOLVED_FILE: &str = "unresolved.csv";

pub fn load_addresses(path: &Path) -> Result<Vec<RawAddress>, LinkError> {
    info!("Reading addresses from {}", path.display());
    let file = File::open(path)?;
    read_addresses(file)
}

/// Reads the staged registry table. Rows without a business id are dropped.
pub fn read_addresses<R: Read>(reader: R) -> Result<Vec<RawAddress>, LinkError> {
    let rows = read_table::<RawAddress, R>(reader, "addresses", &RawAddress::COLUMNS)?;

    let before = rows.len();
    let rows: Vec<RawAddress> = rows
        .into_iter()
        .filter(|row| !row.business_id.is_empty())
        .collect();
    if rows.len() < before {
        warn!("Dropped {} address rows without a business id", before - rows.len());
    }

    info!("Read {} addresses", rows.len());
    Ok(rows)
}

/// Writes one output table. The header is written even when `rows` is empty.
pub fn write_addresses<W: Write>(writer: W, rows: &[LinkedAddress]) -> Result<usize, LinkError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer.write_record(&LinkedAddress::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(rows.len())
}

pub fn write_result(output_dir: &Path, result: &LinkResult) -> Result<(), LinkError> {
    fs::create_dir_all(output_dir)?;

    let resolved_path = output_dir.join(RESOLVED_FILE);
    let count = write_addresses(File::create(&resolved_path)?, &result.resolved)?;
    info!("Wrote {} resolved addresses to {}", count, resolved_path.display());

    let unresolved_path = output_dir.join(UNRESOLVED_FILE);
    let count = write_addresses(File::create(&unresolved_path)?, &result.unresolved)?;
    info!("Wrote {} unresolved addresses to {}", count, unresolved_path.display());

    Ok(())
}
