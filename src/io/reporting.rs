// src/io/reporting.rs

use crate::error::Result;
use crate::pipeline::ForecastReport;
use crate::simulation::engine::SimulationPoint;
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

/// Writes the projected series to a CSV file, one row per day.
pub fn write_simulation_series(file_path: impl AsRef<Path>, points: &[SimulationPoint]) -> Result<()> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for point in points {
        wtr.serialize(point)?;
    }
    wtr.flush()?;

    info!(rows = points.len(), path = %path.display(), "exported simulation series");
    Ok(())
}

fn optional(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.*}", precision, v))
}

/// Plain-text KPI table for terminal output.
pub fn format_summary(report: &ForecastReport) -> String {
    let r = &report.result;
    let k = &report.kpis;
    let mut out = String::new();

    let _ = writeln!(out, "Annual Demand (units):     {:.0}", r.annual_demand);
    let _ = writeln!(out, "Daily Demand (units):      {:.2}", r.daily_demand);
    let _ = writeln!(out, "Total Lead Time (days):    {:.1}", r.total_lead_time_days);
    let _ = writeln!(
        out,
        "Safety Stock (units):      {:.1} ({:?})",
        report.policy.safety_stock.units, report.policy.safety_stock.basis
    );
    let _ = writeln!(out, "Reorder Point (units):     {}", r.reorder_point);
    let _ = writeln!(out, "Order Quantity (units):    {}", r.order_quantity);
    let _ = writeln!(out, "Average Inventory (units): {:.0}", r.average_inventory);
    let _ = writeln!(out, "Turnover Ratio:            {}", optional(k.turnover_ratio, 2));
    let _ = writeln!(out, "Annual Holding Cost:       ${:.2}", k.holding_cost);
    let _ = writeln!(out, "Days of Supply:            {}", optional(r.days_of_supply, 1));
    let _ = writeln!(
        out,
        "Service Level Ratio:       {:.3}{}",
        k.service_level.ratio,
        if k.service_level.low_confidence {
            " (low confidence)"
        } else {
            ""
        }
    );
    if let Some(eoq) = k.economic_order_quantity {
        let _ = writeln!(out, "Economic Order Qty:        {:.0}", eoq);
    }
    let _ = writeln!(
        out,
        "Stockout Days:             {} of {} ({})",
        report.simulation.stockout_days,
        report.simulation.points.len(),
        report.simulation.trigger
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_written_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        let points = vec![
            SimulationPoint {
                day: 0,
                inventory_level: 257.0,
                reorder_point_line: 157.0,
            },
            SimulationPoint {
                day: 1,
                inventory_level: 254.0,
                reorder_point_line: 157.0,
            },
        ];
        write_simulation_series(&path, &points).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("day,inventory_level,reorder_point_line"));
        assert_eq!(lines.next(), Some("0,257.0,157.0"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_optional_values_render_as_na() {
        assert_eq!(optional(None, 2), "n/a");
        assert_eq!(optional(Some(1.234), 1), "1.2");
    }
}
