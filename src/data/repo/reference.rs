use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use log::info;
use regex::Regex;
use zip::ZipArchive;

use crate::data::error::LinkError;
use crate::data::models::ReferenceAddress;
use crate::data::repo::read_table;
use crate::utils::ExistsExtension;

/// Loads the reference extract from a CSV file or a ZIP archive holding one.
///
/// Inside an archive the first entry whose name matches `entry_pattern` is read.
pub fn load_reference(path: &Path, entry_pattern: &str) -> Result<Vec<ReferenceAddress>, LinkError> {
    info!("Reading reference addresses from {}", path.display());
    let file = File::open(path).map_err(|err| {
        LinkError::ReferenceDataUnavailable(format!("{}: {}", path.display(), err))
    })?;

    let is_archive = path
        .extension()
        .exists(|ext| ext.eq_ignore_ascii_case("zip"));
    let rows = if is_archive {
        read_archive(file, entry_pattern)?
    } else {
        read_reference(file)?
    };

    if rows.is_empty() {
        return Err(LinkError::ReferenceDataUnavailable(
            format!("{} holds no reference rows", path.display())
        ));
    }
    Ok(rows)
}

pub fn read_archive<R: Read + Seek>(
    reader: R,
    entry_pattern: &str
) -> Result<Vec<ReferenceAddress>, LinkError> {
    let re = Regex::new(entry_pattern).map_err(|_| LinkError::InvalidConfig {
        key: "LINKER_REFERENCE_ENTRY_PATTERN",
        value: entry_pattern.to_owned(),
    })?;
    let mut zip = ZipArchive::new(reader)?;

    for i in 0..zip.len() {
        let file = zip.by_index(i)?;
        info!("File: {}", file.name());
        if re.is_match(file.name()) {
            info!("Found reference csv file");
            return read_reference(file);
        }
    }

    Err(LinkError::ReferenceDataUnavailable(
        format!("no archive entry matches {}", entry_pattern)
    ))
}

pub fn read_reference<R: Read>(reader: R) -> Result<Vec<ReferenceAddress>, LinkError> {
    let rows = read_table::<ReferenceAddress, R>(reader, "reference", &ReferenceAddress::COLUMNS)?;
    info!("Read {} reference addresses", rows.len());
    Ok(rows)
}
