//! The `attributes` command: inspect the static catalog.

use traceprint_core::EngineConfig;

pub fn run() {
    let config = EngineConfig::builtin();

    println!("Configured attributes ({}):\n", config.attributes.len());
    for spec in config.attributes {
        println!("  {:<20} {:<28} spoofing: {}", spec.key, spec.label, spec.difficulty);

        if let Some(table) = spec.table {
            println!(
                "    {:<18} market-share table, {} entries — {}",
                "lookup:",
                table.entries.len(),
                table.source_citation
            );
        }
        if let Some(key) = spec.baseline_key {
            if let Some(record) = config.baseline(key) {
                println!(
                    "    {:<18} {:.2} bits — {}",
                    "baseline:", record.bits, record.source_citation
                );
            }
        }
        if let Some([first, second]) = spec.combine_baselines {
            println!("    {:<18} {first} + {second}", "combined:");
        }
    }

    println!(
        "\nDisplay population cap: {:.0}",
        config.population
    );
}
