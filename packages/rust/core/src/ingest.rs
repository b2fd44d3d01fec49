//! Reading the orders CSV into [`RawOrderRecord`]s.
//!
//! Fields are read verbatim: no reader-level trimming, so the `"NaN "`
//! sentinel reaches the cleaning step intact.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use curry_shared::{DashboardError, RawOrderRecord, Result, columns};

/// Read every order from the CSV at `path`.
pub fn read_orders(path: &Path) -> Result<Vec<RawOrderRecord>> {
    let file = File::open(path).map_err(|e| DashboardError::io(path, e))?;
    let rows = read_orders_from(file)?;
    info!(path = %path.display(), rows = rows.len(), "read dataset");
    Ok(rows)
}

/// Read every order from any CSV source with a header row.
pub fn read_orders_from<R: Read>(reader: R) -> Result<Vec<RawOrderRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::None)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    check_headers(&headers)?;
    debug!(columns = headers.len(), "header validated");

    rdr.deserialize::<RawOrderRecord>()
        .map(|row| row.map_err(DashboardError::from))
        .collect()
}

/// Fail on the first required column the header does not name.
fn check_headers(headers: &StringRecord) -> Result<()> {
    match columns::REQUIRED
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        Some(missing) => Err(DashboardError::missing_column(*missing)),
        None => Ok(()),
    }
}
