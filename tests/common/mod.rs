#![allow(dead_code)]

use std::io::{Error, Write};
use tempfile::NamedTempFile;

pub const AUTHORIZE_OK: &str = "5340749871433512";
pub const AUTHORIZE_DENIED: &str = "5558702121154658";
pub const AUTHORIZE_AND_CAPTURE_OK: &str = "5326107541057732";
pub const AUTHORIZE_AND_CAPTURE_DENIED: &str = "5430442567033801";
pub const CAPTURE_OK: &str = "5277253663231678";
pub const CAPTURE_DENIED: &str = "5473598178407565";

/// Writes a scenario file with the standard header followed by `rows`.
pub fn scenario(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "operation, order, card, amount")?;
    for row in rows {
        writeln!(file, "{}", row)?;
    }
    file.flush()?;
    Ok(file)
}
