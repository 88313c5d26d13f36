/*!
 * schedsim - Demo Entry Point
 * Generates a seeded random workload and runs it under every policy
 */

use anyhow::{Context, Result};
use log::info;
use schedsim::{Policy, Simulation, WorkloadConfig, WorkloadGenerator};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(raw) => raw.parse().context("seed must be an unsigned integer")?,
        None => 42,
    };
    let as_json = args.next().as_deref() == Some("--json");

    let workload = WorkloadGenerator::new(seed, WorkloadConfig::default())
        .generate()
        .context("workload generation failed")?;
    info!("generated {} processes (seed {seed})", workload.len());

    for policy in Policy::all_default() {
        let mut sim = Simulation::new(policy.build()?).with_max_ticks(300);
        sim.add_processes(workload.clone())?;
        sim.run();

        let report = sim.report();
        if as_json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!(
                "{:<17} ticks={:<4} wait={:6.2} turnaround={:6.2} response={:6.2} cpu={:5.1}% switches={}",
                report.policy,
                report.total_ticks,
                report.avg_waiting_time,
                report.avg_turnaround_time,
                report.avg_response_time,
                report.cpu_utilization * 100.0,
                report.context_switches,
            );
        }
    }

    Ok(())
}
