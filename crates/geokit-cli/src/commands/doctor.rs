use crate::cli::DoctorArgs;
use crate::output::OutputWriter;
use crate::output_types::{CheckResult, DoctorOutput};
use anyhow::Result;
use console::style;
use geokit_core::config::LayeredConfig;
use geokit_geo::srs::configure_proj_data;
use std::path::Path;

pub fn execute(args: DoctorArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let mut checks = Vec::new();

    // Configured PROJ data directory
    match &config.proj_data.value {
        Some(dir) => match configure_proj_data(Path::new(dir)) {
            Ok(()) => checks.push(check("PROJ data", true, format!("Using {}", dir))),
            Err(e) => checks.push(check("PROJ data", false, e.to_string())),
        },
        None => {
            let detail = match std::env::var("PROJ_DATA").or_else(|_| std::env::var("PROJ_LIB")) {
                Ok(dir) => format!("From environment: {}", dir),
                Err(_) => "Using the PROJ default search path".to_string(),
            };
            checks.push(check("PROJ data", true, detail));
        }
    }

    // PROJ itself
    match geokit_geo::ensure_environment() {
        Ok(srs) => checks.push(check("PROJ", true, format!("Loaded {}", srs))),
        Err(e) => checks.push(check("PROJ", false, e.to_string())),
    }

    // Default SRS
    match geokit_geo::load_epsg(config.srs.value) {
        Ok(srs) => checks.push(check("Default SRS", true, srs.to_string())),
        Err(e) => checks.push(check("Default SRS", false, e.to_string())),
    }

    let passed = checks.iter().filter(|c| c.passed).count();
    let total = checks.len();

    if output.is_json() {
        return output.result(DoctorOutput { checks, passed, total });
    }

    println!("\n{}", style("GeoKit Health Check").bold().underlined());
    println!("{}", style("═".repeat(60)).dim());
    println!();

    for c in &checks {
        let mark = if c.passed { style("✓").green() } else { style("✗").red() };
        println!("{} {}: {}", mark, c.name, c.detail);
    }

    if args.verbose {
        output.section("Configuration");
        let map = config.to_inspection_map();
        let mut keys: Vec<_> = map.keys().collect();
        keys.sort();
        for key in keys {
            let (value, source) = &map[key];
            println!("  {} = {} {}", style(key).bold(), value, style(format!("({:?})", source)).dim());
        }
    }

    println!();
    if passed == total {
        println!("{} All {} checks passed", style("✓").green().bold(), total);
    } else {
        println!(
            "{} {}/{} checks passed",
            style("⚠").yellow().bold(),
            passed,
            total
        );
        println!("  → Set GEOKIT_PROJ_DATA or pass --proj-data to point at proj.db");
    }

    Ok(())
}

fn check(name: &str, passed: bool, detail: String) -> CheckResult {
    CheckResult { name: name.to_string(), passed, detail }
}
