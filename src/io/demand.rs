// src/io/demand.rs

use crate::error::{ForecastError, Result};
use crate::model::records::CustomerDemandRecord;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

pub const CUSTOMER_COLUMNS: [&str; 4] = [
    "CustomerName",
    "CurrentUnits",
    "FutureUnits",
    "ConsumptionFrequencyDays",
];

/// Reads customer records from a CSV file. See [`parse_customer_records`].
pub fn read_customer_records(file_path: impl AsRef<Path>) -> Result<Vec<CustomerDemandRecord>> {
    let file = std::fs::File::open(file_path.as_ref())?;
    let records = parse_customer_records(file)?;
    info!(
        path = %file_path.as_ref().display(),
        records = records.len(),
        "loaded customer records"
    );
    Ok(records)
}

/// Parses `CustomerName, CurrentUnits, FutureUnits, ConsumptionFrequencyDays` rows.
///
/// The first row is a header. Rows with a missing, non-numeric or non-finite
/// (`NaN`, `inf`) field are discarded, so a malformed file yields zero records. Domain checks (e.g. a
/// zero frequency) are left to the engine.
pub fn parse_customer_records<R: Read>(reader: R) -> Result<Vec<CustomerDemandRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in rdr.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                debug!(row = index + 1, error = %e, "discarded unreadable row");
                continue;
            }
        };

        let number = |i: usize| {
            row.get(i)
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite())
        };
        match (number(1), number(2), number(3)) {
            (Some(current_units), Some(future_units), Some(consumption_frequency_days)) => {
                records.push(CustomerDemandRecord {
                    name: row.get(0).unwrap_or_default().to_string(),
                    current_units,
                    future_units,
                    consumption_frequency_days,
                });
            }
            _ => debug!(row = index + 1, fields = ?row, "discarded row with non-numeric field"),
        }
    }
    Ok(records)
}

/// Writes records in the ingestion format.
pub fn write_customer_records<W: Write>(writer: W, records: &[CustomerDemandRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CUSTOMER_COLUMNS)?;
    for record in records {
        wtr.write_record([
            record.name.clone(),
            record.current_units.to_string(),
            record.future_units.to_string(),
            record.consumption_frequency_days.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Generates reproducible synthetic customers for demos and tests.
///
/// Current units follow a Normal(500, 150) distribution, future units grow
/// them by a Normal(10%, 15%) factor, and cycles are drawn from common
/// cadences. Values are rounded and clamped at zero.
pub fn generate_sample_records(count: usize, seed: u64) -> Result<Vec<CustomerDemandRecord>> {
    const CYCLES: [f64; 4] = [7.0, 14.0, 30.0, 60.0];

    let mut rng = StdRng::seed_from_u64(seed);
    let units = Normal::<f64>::new(500.0, 150.0)
        .map_err(|e| ForecastError::config("sample_units", e.to_string()))?;
    let growth = Normal::<f64>::new(1.1, 0.15)
        .map_err(|e| ForecastError::config("sample_growth", e.to_string()))?;

    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let current: f64 = units.sample(&mut rng).round().max(0.0);
        let future = (current * growth.sample(&mut rng)).round().max(0.0);
        let cycle = *CYCLES.choose(&mut rng).unwrap_or(&30.0);
        records.push(CustomerDemandRecord::new(
            format!("Customer {}", i + 1),
            current,
            future,
            cycle,
        ));
    }
    Ok(records)
}
