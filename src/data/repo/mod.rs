use std::io::Read;

use log::warn;
use serde::de::DeserializeOwned;

use crate::data::error::LinkError;
use crate::utils::HeaderExtension;

pub mod addresses;
pub mod reference;

/// Reads every row of a headed CSV table into `T`.
///
/// Fails on a missing required column or an I/O error. Rows that can't be
/// decoded are logged and skipped.
fn read_table<T, R>(
    reader: R,
    table: &'static str,
    columns: &[&'static str]
) -> Result<Vec<T>, LinkError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if let Some(column) = headers.missing(columns) {
        return Err(LinkError::MissingColumn { table, column });
    }

    let mut rows = Vec::new();
    let mut skipped = 0;
    for record in reader.deserialize() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                warn!("Skipping unreadable {} row: {}", table, err);
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        warn!("Skipped {} unreadable {} rows", skipped, table);
    }

    Ok(rows)
}
