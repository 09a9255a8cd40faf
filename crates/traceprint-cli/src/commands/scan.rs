//! The `scan` command: run every probe, stream per-attribute entropy, and
//! print the terminal report.

use traceprint_core::{
    EngineConfig, NullSink, ProgressSink, RunReport, StepRecord, TestOrchestrator,
};

use crate::probes;

/// Prints each progress record as it is emitted.
struct PrintSink;

impl ProgressSink for PrintSink {
    fn on_step(&mut self, step: &StepRecord) {
        let marker = if step.estimated { "~" } else { " " };
        println!(
            "  {:<20} {}{:>6.2} bits  (1 in {:>9.1})  running total {:>6.2}",
            step.attribute, marker, step.entropy_bits, step.one_in_x, step.cumulative_bits
        );
        if step.crossed_uniqueness_now {
            println!("  {:<20} ^ likely unique in the configured population from here on", "");
        }
    }
}

pub async fn run(demo: bool, json: bool) {
    let config = EngineConfig::builtin();
    let orchestrator = TestOrchestrator::new(&config);
    let probe_set = if demo {
        probes::demo::build()
    } else {
        probes::host::build()
    };

    if json {
        let report = orchestrator.run(&probe_set, &mut NullSink).await;
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{text}"),
            Err(err) => eprintln!("failed to serialize report: {err}"),
        }
        return;
    }

    println!("Scanning {} attributes...\n", config.attributes.len());
    let report = orchestrator.run(&probe_set, &mut PrintSink).await;
    print_report(&config, &report);
}

fn print_report(config: &EngineConfig, report: &RunReport) {
    println!("\n{}", "=".repeat(68));
    println!("IDENTIFIABILITY REPORT");
    println!("{}", "=".repeat(68));
    println!(
        "Attributes: {}/{} detected",
        report.successful_count,
        config.attributes.len()
    );
    if !report.failed_attribute_names.is_empty() {
        println!("Unavailable: {}", report.failed_attribute_names.join(", "));
    }

    println!(
        "\n{:<24} {:>10} {:>8}  {}",
        "Attribute", "Bits", "Spoof", "What changing it costs"
    );
    println!("{}", "-".repeat(68));
    for summary in &report.attribute_summaries {
        println!(
            "{:<24} {:>10.2} {:>8}  {}",
            summary.name, summary.entropy_bits, summary.difficulty_tier, summary.change_difficulty
        );
    }

    println!("\nTotal entropy: {:.2} bits", report.final_entropy_bits);
    if report.population_capped {
        println!(
            "Anonymity set: 1 (unique within a population of {:.0})",
            report.final_anonymity_set_display
        );
    } else {
        println!(
            "Anonymity set: about 1 in {:.0} share this combination",
            report.final_anonymity_set_display
        );
    }
    println!("Fingerprint:   {}", report.fingerprint_hash);
}
