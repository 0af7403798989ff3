//! CSV export for dispatch plan results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::dispatch::capability::marginal_cost;
use crate::dispatch::{DispatchPlan, DispatchRequest};

/// Column header for CSV plan export.
const HEADER: &str = "name,kind,efficiency,marginal_cost,p";

/// Exports a dispatch plan to a CSV file at the given path.
///
/// Writes a header row followed by one data row per unit, in request
/// order. Produces deterministic output for identical inputs.
///
/// # Arguments
///
/// * `request` - The request the plan was computed from
/// * `plan` - The computed plan (same unit order as the request)
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(request: &DispatchRequest, plan: &DispatchPlan, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(request, plan, buf)
}

/// Writes a dispatch plan as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(
    request: &DispatchRequest,
    plan: &DispatchPlan,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(','))?;

    // Data rows, one per unit in request order
    for (unit, item) in request.units.iter().zip(&plan.items) {
        wtr.write_record(&[
            item.name.clone(),
            unit.kind.to_string(),
            format!("{:.4}", unit.efficiency),
            format!("{:.4}", marginal_cost(unit, &request.fuels)),
            format!("{:.1}", item.p),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
