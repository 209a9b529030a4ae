use clap::{Parser, Subcommand, ValueEnum};
use pv_cabling::{
    MpptElectrical, RunPatch, ThresholdPolicy, format, list_active_keys, recommend_section,
    report_rows, worst_severity,
};
use pv_core::Real;
use pv_project::{Project, ProjectResult};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pv-cli")]
#[command(about = "PV DC cabling - per-MPPT cable runs and voltage drop", long_about = None)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project file (.yaml or .json)
        project_path: PathBuf,
    },
    /// List the MPPT inputs that need a DC cable run
    Keys {
        /// Path to the project file (.yaml or .json)
        project_path: PathBuf,
    },
    /// Edit the cable run of one MPPT
    SetRun {
        /// Path to the project file (.yaml or .json)
        project_path: PathBuf,
        /// MPPT index to edit (1-based)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        mppt: u32,
        /// One-way length in meters
        #[arg(long)]
        length: Option<String>,
        /// Conductor section in mm² (2.5, 4, 6 or 10)
        #[arg(long)]
        section: Option<String>,
        /// Write to this file instead of overwriting the project
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Voltage drop per active MPPT
    Report {
        /// Path to the project file (.yaml or .json)
        project_path: PathBuf,
        /// String analysis file (list of per-MPPT records)
        #[arg(long)]
        analysis: PathBuf,
        /// Threshold policy (defaults to the project's report settings)
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
        /// Cutoff used by the single-cutoff policy, in percent
        #[arg(long, default_value_t = 3.0)]
        cutoff_pct: f64,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Suggest the smallest standard section per active MPPT
    Recommend {
        /// Path to the project file (.yaml or .json)
        project_path: PathBuf,
        /// String analysis file (list of per-MPPT records)
        #[arg(long)]
        analysis: PathBuf,
        /// Target drop in percent
        #[arg(long, default_value_t = 1.0)]
        target_pct: f64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// ok up to 1 %, warning up to 3 %, too high above
    TwoTier,
    /// ok up to --cutoff-pct, too high above
    SingleCutoff,
}

fn main() -> ProjectResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Keys { project_path } => cmd_keys(&project_path),
        Commands::SetRun {
            project_path,
            mppt,
            length,
            section,
            output,
        } => cmd_set_run(
            &project_path,
            mppt,
            length.as_deref(),
            section.as_deref(),
            output.as_deref(),
        ),
        Commands::Report {
            project_path,
            analysis,
            policy,
            cutoff_pct,
            json,
        } => {
            let policy = policy.map(|p| match p {
                PolicyArg::TwoTier => ThresholdPolicy::CANONICAL,
                PolicyArg::SingleCutoff => ThresholdPolicy::single_cutoff(cutoff_pct),
            });
            cmd_report(&project_path, &analysis, policy, json)
        }
        Commands::Recommend {
            project_path,
            analysis,
            target_pct,
        } => cmd_recommend(&project_path, &analysis, target_pct),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_validate(project_path: &Path) -> ProjectResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = pv_project::load(project_path)?;
    pv_project::validate_project(&project)?;
    println!("✓ Project is valid");
    Ok(())
}

fn cmd_keys(project_path: &Path) -> ProjectResult<()> {
    let project = pv_project::load(project_path)?;
    let keys = list_active_keys(&project.inverter_config.configured_strings);

    if keys.is_empty() {
        println!("No strings configured");
    } else {
        println!("Active MPPT inputs:");
        let runs = &project.inverter_config.dc_cabling_runs;
        for key in keys {
            let stored = if runs.find(key).is_some() { "" } else { " (default)" };
            let run = runs.resolve(key);
            println!(
                "  MPPT {} - {} m, {} mm²{}",
                key, run.length_m, run.section_mm2, stored
            );
        }
    }
    Ok(())
}

/// Lenient numeric parse: anything unparseable becomes NaN and is replaced
/// by the run defaults on upsert.
fn parse_lenient(raw: &str) -> Real {
    raw.trim().replace(',', ".").parse().unwrap_or(Real::NAN)
}

fn cmd_set_run(
    project_path: &Path,
    mppt: u32,
    length: Option<&str>,
    section: Option<&str>,
    output: Option<&Path>,
) -> ProjectResult<()> {
    let project = pv_project::load(project_path)?;

    let patch = RunPatch {
        length_m: length.map(parse_lenient),
        section_mm2: section.map(parse_lenient),
    };
    if patch.is_empty() {
        println!("Nothing to change (pass --length and/or --section)");
        return Ok(());
    }

    let active = list_active_keys(&project.inverter_config.configured_strings);
    if !active.contains(&mppt) {
        tracing::warn!(mppt, "MPPT has no configured string; run is stored but not reported");
    }

    let updated: Project = project.with_cabling_edit(mppt, patch);
    let run = updated.inverter_config.dc_cabling_runs.resolve(mppt);

    let target = output.unwrap_or(project_path);
    pv_project::save(target, &updated)?;
    println!(
        "✓ MPPT {}: {} m, {} mm² (saved to {})",
        mppt,
        run.length_m,
        run.section_mm2,
        target.display()
    );
    Ok(())
}

fn cmd_report(
    project_path: &Path,
    analysis_path: &Path,
    policy: Option<ThresholdPolicy>,
    json: bool,
) -> ProjectResult<()> {
    let project = pv_project::load(project_path)?;
    let analysis = pv_project::load_analysis(analysis_path)?;
    let config = &project.inverter_config;

    if !config.uses_dc_cabling() {
        println!("No DC string cabling for this inverter setup");
        return Ok(());
    }

    let policy = policy.unwrap_or(project.report.threshold_policy);
    let rows = report_rows(
        &config.configured_strings,
        &config.dc_cabling_runs,
        &analysis,
        &policy,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<8} {:>10} {:>10} {:>8} {:>8} {:>8}  {}",
        "MPPT", "Vmp hot", "I calc", "L (m)", "S (mm²)", "ΔU (V)", "ΔU (%)"
    );
    for row in &rows {
        println!(
            "{:<8} {:>10} {:>10} {:>8} {:>8} {:>8}  {}",
            format!("MPPT {}", row.mppt_index),
            format::voltage(row),
            format::current(row),
            format::length(row),
            format::section(row),
            format::drop_volts(&row.drop),
            format::drop_percent(&row.drop),
        );
    }

    match worst_severity(&rows) {
        Some(worst) => println!("Worst: {}", worst.label()),
        None => println!("No cable run configured yet"),
    }
    println!("ΔU = (2 × L × I × ρ) / S ; ΔU(%) = ΔU / Vmp_hot × 100 ; ρ = 0.023 Ω·mm²/m");
    Ok(())
}

fn cmd_recommend(project_path: &Path, analysis_path: &Path, target_pct: f64) -> ProjectResult<()> {
    let project = pv_project::load(project_path)?;
    let analysis = pv_project::load_analysis(analysis_path)?;
    let config = &project.inverter_config;

    println!("Recommended sections for ΔU ≤ {:.2} %:", target_pct);
    for run in config.dc_cabling_runs.resolve_active(&config.configured_strings) {
        let electrical = analysis.iter().find(|a| a.mppt_index() == run.mppt_index);
        let suggestion = electrical.and_then(|a| {
            recommend_section(
                run.length_m,
                a.current_a(),
                a.reference_voltage_v(),
                target_pct,
            )
        });
        match (electrical, suggestion) {
            (None, _) => println!("  MPPT {} - no analysis", run.mppt_index),
            (Some(_), Some(section)) => println!("  MPPT {} - {}", run.mppt_index, section),
            (Some(_), None) if !run.is_configured() => {
                println!("  MPPT {} - length {}", run.mppt_index, format::PLACEHOLDER)
            }
            (Some(_), None) => println!("  MPPT {} - no standard section is enough", run.mppt_index),
        }
    }
    Ok(())
}
