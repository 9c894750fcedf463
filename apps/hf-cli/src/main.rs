mod error;

use clap::{Parser, Subcommand, ValueEnum};
use error::{CliError, CliResult, WithPath};
use hf_core::DistanceUnit;
use hf_engine::{
    Coefficient, Measurement, NfpaClass, classify, outlet_flow_gpm, validate_measurement,
};
use hf_project::{
    Evaluation, FlowTestReport, OptionsDef, evaluate_batch, evaluate_document, load_document,
    round_to, supply_curve_csv, validate_document,
};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hf-cli")]
#[command(about = "HydrantFlow CLI - NFPA 291 hydrant flow test calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a flow test document without evaluating it
    Validate {
        /// Path to the flow test file (.yaml, .yml or .json)
        path: PathBuf,
    },
    /// Evaluate one or more flow tests
    Evaluate {
        /// Flow test files; several are evaluated in parallel
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Unit for hydrant spacing (feet or meters)
        #[arg(long)]
        unit: Option<DistanceUnit>,
        /// Number of supply curve samples
        #[arg(long)]
        samples: Option<NonZeroUsize>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the water supply curve of a flow test as CSV
    Curve {
        /// Path to the flow test file
        path: PathBuf,
        /// Number of supply curve samples
        #[arg(long)]
        samples: Option<NonZeroUsize>,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Flow from a single pitot reading
    Outlet {
        /// Outlet diameter in inches
        #[arg(long)]
        diameter: f64,
        /// Pitot pressure in psi
        #[arg(long)]
        pitot: f64,
        /// Coefficient: a number or smooth, square_sharp, square_projecting
        #[arg(long)]
        coefficient: Option<String>,
    },
    /// NFPA class for an available fire flow
    Classify {
        /// Available flow at 20 psi residual, in gpm
        gpm: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Yaml,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => cmd_validate(&path),
        Commands::Evaluate {
            paths,
            unit,
            samples,
            format,
            output,
        } => {
            let overrides = OptionsDef {
                distance_unit: unit,
                curve_samples: samples,
            };
            cmd_evaluate(&paths, &overrides, format, output.as_deref())
        }
        Commands::Curve {
            path,
            samples,
            output,
        } => cmd_curve(&path, samples, output.as_deref()),
        Commands::Outlet {
            diameter,
            pitot,
            coefficient,
        } => cmd_outlet(diameter, pitot, coefficient.as_deref()),
        Commands::Classify { gpm } => cmd_classify(gpm),
    }
}

fn cmd_validate(path: &Path) -> CliResult<()> {
    println!("Validating flow test: {}", path.display());
    let doc = load_document(path).at(path)?;
    let input = validate_document(&doc).at(path)?;
    println!(
        "✓ Flow test is valid ({} flow hydrant(s), {} outlet reading(s))",
        input.flow_hydrants.len(),
        input.outlet_count()
    );
    Ok(())
}

fn cmd_evaluate(
    paths: &[PathBuf],
    overrides: &OptionsDef,
    format: OutputFormat,
    output: Option<&Path>,
) -> CliResult<()> {
    tracing::info!(files = paths.len(), "evaluating flow tests");
    let docs = paths
        .iter()
        .map(|path| load_document(path).at(path))
        .collect::<CliResult<Vec<_>>>()?;

    let mut evaluations = Vec::with_capacity(docs.len());
    let mut failed = 0;
    for (path, outcome) in paths.iter().zip(evaluate_batch(&docs, overrides)) {
        match outcome {
            Ok(evaluation) => evaluations.push((path, evaluation)),
            Err(err) => {
                failed += 1;
                eprintln!("✗ {}: {}", path.display(), err);
            }
        }
    }

    let rendered = match format {
        OutputFormat::Text => evaluations
            .iter()
            .map(|(path, evaluation)| render_text(path, evaluation))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json | OutputFormat::Yaml => {
            let reports: Vec<&FlowTestReport> =
                evaluations.iter().map(|(_, e)| &e.report).collect();
            match (format, reports.as_slice()) {
                (OutputFormat::Json, [single]) => serde_json::to_string_pretty(single)? + "\n",
                (OutputFormat::Json, _) => serde_json::to_string_pretty(&reports)? + "\n",
                (_, [single]) => serde_yaml::to_string(single)?,
                (_, _) => serde_yaml::to_string(&reports)?,
            }
        }
    };

    if let Some(path) = output {
        std::fs::write(path, &rendered)?;
        println!(
            "✓ Wrote {} report(s) to {}",
            evaluations.len(),
            path.display()
        );
    } else {
        print!("{}", rendered);
    }

    if failed > 0 {
        return Err(CliError::BatchFailed {
            failed,
            total: paths.len(),
        });
    }
    Ok(())
}

fn render_text(path: &Path, evaluation: &Evaluation) -> String {
    let report = &evaluation.report;
    let mut out = String::new();

    out.push_str(&format!("Flow test: {}\n", path.display()));
    out.push_str(&format!("  Test hydrant: {}\n", report.test_hydrant_id));
    if let Some(tested_at) = report.tested_at {
        out.push_str(&format!("  Tested at: {}\n", tested_at.to_rfc3339()));
    }
    if let Some(tester) = &report.tester {
        out.push_str(&format!("  Tester: {}\n", tester));
    }
    out.push_str(&format!(
        "  Static / residual: {:.1} / {:.1} psi (drop {:.1} psi)\n",
        report.static_psi, report.residual_psi, report.pressure_drop_psi
    ));

    out.push_str("\n  Outlets:\n");
    for outlet in &report.outlets {
        out.push_str(&format!(
            "    {} #{}: {} in, c = {:.2}, pitot {:.1} psi -> {:.0} gpm\n",
            outlet.hydrant_id,
            outlet.outlet,
            outlet.diameter_in,
            outlet.coefficient,
            outlet.pitot_psi,
            outlet.flow_gpm
        ));
    }

    if !report.distances.is_empty() {
        out.push_str("\n  Distances from test hydrant:\n");
        for d in &report.distances {
            match d.distance {
                Some(distance) => out.push_str(&format!(
                    "    {}: {:.0} {}\n",
                    d.hydrant_id,
                    distance,
                    d.unit.symbol()
                )),
                None => out.push_str(&format!("    {}: unknown (no coordinates)\n", d.hydrant_id)),
            }
        }
    }

    out.push_str(&format!("\n  Total flow: {:.0} gpm\n", report.total_flow_gpm));
    out.push_str(&format!(
        "  Available at 20 psi: {:.0} gpm\n",
        report.available_flow_gpm
    ));
    out.push_str(&format!(
        "  NFPA class: {} ({}, {}) - {}\n",
        report.nfpa_class, report.class_color, report.class_color_hex, report.class_description
    ));
    out.push_str(&format!(
        "  Supply curve: {} points\n",
        evaluation.result.supply_curve.len()
    ));
    out.push_str(&format!("  Data quality: {}/100\n", report.quality_score));
    for warning in &report.warnings {
        out.push_str(&format!("    ! {}\n", warning));
    }
    out
}

fn cmd_curve(path: &Path, samples: Option<NonZeroUsize>, output: Option<&Path>) -> CliResult<()> {
    let doc = load_document(path).at(path)?;
    let overrides = OptionsDef {
        distance_unit: None,
        curve_samples: samples,
    };
    let evaluation = evaluate_document(&doc, &overrides).at(path)?;
    let csv = supply_curve_csv(&evaluation.result);

    if let Some(out) = output {
        std::fs::write(out, csv)?;
        println!(
            "✓ Exported {} curve points to {}",
            evaluation.result.supply_curve.len(),
            out.display()
        );
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn parse_coefficient(diameter: f64, raw: Option<&str>) -> CliResult<Coefficient> {
    let Some(raw) = raw else {
        return Ok(Coefficient::default_for_diameter(diameter));
    };
    if let Ok(value) = raw.trim().parse::<f64>() {
        return Ok(Coefficient::Custom(value));
    }
    Coefficient::from_name(raw).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "unknown coefficient '{}' (expected a number or smooth, square_sharp, square_projecting)",
            raw
        ))
    })
}

fn cmd_outlet(diameter: f64, pitot: f64, coefficient: Option<&str>) -> CliResult<()> {
    let coefficient = parse_coefficient(diameter, coefficient)?;
    let measurement = Measurement::new(diameter, coefficient, pitot);
    let measurement = validate_measurement(&measurement)?;

    let flow = outlet_flow_gpm(measurement);
    println!(
        "{} in outlet, c = {}, pitot {} psi",
        diameter, coefficient, pitot
    );
    println!("  Flow: {:.0} gpm", round_to(flow, 0));
    if !coefficient.is_typical() {
        println!("  ! coefficient is outside the usual 0.70-0.90 range");
    }
    Ok(())
}

fn cmd_classify(gpm: f64) -> CliResult<()> {
    if !gpm.is_finite() || gpm < 0.0 {
        return Err(CliError::InvalidInput(format!(
            "flow must be non-negative and finite, got {}",
            gpm
        )));
    }

    let class = classify(gpm);
    println!("{:.0} gpm: class {}", gpm, class);
    println!("  Color: {} ({})", class.color_name(), class.color_hex());
    println!("  {}", class.description());
    if let Some(next) = NfpaClass::ALL
        .iter()
        .rev()
        .find(|c| c.min_flow_gpm() > class.min_flow_gpm())
    {
        println!(
            "  {:.0} gpm short of class {}",
            next.min_flow_gpm() - gpm,
            next
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficient_parsing() {
        assert_eq!(parse_coefficient(2.5, None).unwrap(), Coefficient::Smooth);
        assert_eq!(parse_coefficient(2.5, Some("0.83")).unwrap(), Coefficient::Custom(0.83));
        assert_eq!(
            parse_coefficient(2.5, Some("square-projecting")).unwrap(),
            Coefficient::SquareProjecting
        );
        assert!(matches!(
            parse_coefficient(2.5, Some("hexagonal")),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn cli_parses_evaluate_overrides() {
        let cli = Cli::try_parse_from([
            "hf-cli", "evaluate", "a.yaml", "b.json", "--unit", "meters", "--samples", "7",
            "--format", "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Evaluate {
                paths,
                unit,
                samples,
                format,
                output,
            } => {
                assert_eq!(paths.len(), 2);
                assert_eq!(unit, Some(DistanceUnit::Meters));
                assert_eq!(samples.map(NonZeroUsize::get), Some(7));
                assert_eq!(format, OutputFormat::Json);
                assert!(output.is_none());
            }
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn zero_samples_rejected() {
        assert!(Cli::try_parse_from(["hf-cli", "curve", "a.yaml", "--samples", "0"]).is_err());
    }
}
