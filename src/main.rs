use inventory_forecast::io::{demand, reporting};
use inventory_forecast::forecast::demand::demand_over;
use inventory_forecast::logging;
use inventory_forecast::model::review::TimeFrame;
use inventory_forecast::pipeline::{recompute, ForecastInputs};
use inventory_forecast::simulation::config::EngineSetup;
use std::env;
use std::process::ExitCode;
use tracing::error;

const USAGE: &str = "usage: inventory-forecast <customers.csv> [setup.json] [series.csv]\n       \
                     inventory-forecast --sample <count> [customers.csv]";

fn main() -> ExitCode {
    logging::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let outcome = match args.first().map(String::as_str) {
        None | Some("-h") | Some("--help") => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Some("--sample") => write_sample(&args[1..]),
        Some(_) => run_forecast(&args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn write_sample(args: &[String]) -> inventory_forecast::Result<()> {
    let count = args
        .first()
        .and_then(|n| n.parse::<usize>().ok())
        .unwrap_or(10);
    let output = args.get(1).map(String::as_str).unwrap_or("customers.csv");

    let records = demand::generate_sample_records(count, 42)?;
    let file = std::fs::File::create(output)?;
    demand::write_customer_records(file, &records)?;
    println!("Wrote {} sample customers to ./{}", records.len(), output);
    Ok(())
}

fn run_forecast(args: &[String]) -> inventory_forecast::Result<()> {
    // 1. LOAD INPUTS
    let records = demand::read_customer_records(&args[0])?;
    let setup = match args.get(1) {
        Some(path) => EngineSetup::load(path)?,
        None => EngineSetup::default(),
    };

    let inputs = ForecastInputs {
        records,
        supply_chain: setup.supply_chain.clone(),
        review: setup.review_policy.resolve()?,
        scenario: setup.scenario.clone(),
    };

    // 2. RECOMPUTE
    let report = recompute(&inputs, &setup.forecast)?;

    // 3. REPORT
    println!("=== Inventory Forecast ({}) ===", inputs.review.label);
    print!("{}", reporting::format_summary(&report));
    let frame = TimeFrame::Monthly;
    println!(
        "{} Demand (units):    {:.0}",
        frame.label(),
        demand_over(&inputs.records, frame)?
    );
    if let Some(last) = report.timeline.last() {
        println!("Order-to-shelf timeline: {:.0} days", last.end_day);
    }
    for flag in &report.flags {
        println!("Note: {:?}", flag);
    }

    let output = args.get(2).map(String::as_str).unwrap_or("inventory_projection.csv");
    reporting::write_simulation_series(output, &report.simulation.points)?;
    println!("Projection written to ./{}", output);
    Ok(())
}
