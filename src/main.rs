//! sincos-nco: cycle-accurate fixed-point sine/cosine generator

use std::env;
use std::io::{self, BufWriter, Write};

use anyhow::{bail, Context};
use sincos_nco::config::Config;
use sincos_nco::device::{GeneratorParams, SinCosTable, Variant};
use sincos_nco::emu::Generator;
use sincos_nco::testing::ErrorReport;
use sincos_nco::timing::PipelineLatency;

/// What the binary should print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Samples,
    Table,
    Report,
    SampleConfig,
    Help,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    // Start from file/env configuration, then let flags override it
    let mut config = Config::get().clone();
    let mut mode = Mode::Samples;

    let mut i = 1;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--table" => mode = Mode::Table,
            "--report" => mode = Mode::Report,
            "--sample-config" => mode = Mode::SampleConfig,
            "--help" | "-h" => mode = Mode::Help,
            "--data-width" | "--phase-width" | "--table-width" | "--variant" | "--cycles" => {
                let value = args
                    .get(i + 1)
                    .with_context(|| format!("{} needs a value", arg))?;
                apply_flag(&mut config, arg, value)?;
                i += 1;
            }
            other => bail!("unknown argument '{}' (try --help)", other),
        }
        i += 1;
    }

    match mode {
        Mode::Help => {
            print_usage();
            return Ok(());
        }
        Mode::SampleConfig => {
            print!("{}", Config::sample_config());
            if let Some(path) = Config::user_config_path() {
                eprintln!("# user config location: {}", path.display());
            }
            return Ok(());
        }
        _ => {}
    }

    let params = config.params().context("invalid generator configuration")?;
    log::info!("Generator {}", params);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match mode {
        Mode::Table => print_table(&mut out, &params)?,
        Mode::Report => print_report(&mut out, &params)?,
        _ => print_samples(&mut out, &params, config.cycles())?,
    }
    out.flush()?;

    Ok(())
}

/// Apply one `--flag value` pair to the configuration.
fn apply_flag(config: &mut Config, flag: &str, value: &str) -> anyhow::Result<()> {
    let width = || -> anyhow::Result<u32> {
        value
            .parse()
            .with_context(|| format!("{} expects a bit width, got '{}'", flag, value))
    };

    match flag {
        "--data-width" => config.data_width = Some(width()?),
        "--phase-width" => config.phase_width = Some(width()?),
        "--table-width" => config.table_address_width = Some(width()?),
        "--variant" => config.variant = Some(value.parse::<Variant>()?),
        "--cycles" => {
            config.cycles = Some(
                value
                    .parse()
                    .with_context(|| format!("--cycles expects a count, got '{}'", value))?,
            )
        }
        _ => bail!("unknown flag '{}'", flag),
    }
    Ok(())
}

/// Print valid samples as CSV, one row per clock edge.
///
/// `cycle` counts edges since the reset that started the run.
fn print_samples(out: &mut impl Write, params: &GeneratorParams, cycles: u64) -> io::Result<()> {
    let mut generator = Generator::new(*params);
    let latency = generator.latency().total() as u64;

    writeln!(out, "cycle,phase,sin,cos")?;
    for (n, (phase, sample)) in generator.samples().take(cycles as usize).enumerate() {
        writeln!(out, "{},{},{},{}", latency + n as u64, phase, sample.sin, sample.cos)?;
    }
    Ok(())
}

/// Dump the quarter-wave table.
fn print_table(out: &mut impl Write, params: &GeneratorParams) -> io::Result<()> {
    let table = SinCosTable::generate(params.data_width(), params.table_address_width());

    writeln!(out, "address,cos,sin")?;
    for (addr, entry) in table.iter() {
        writeln!(out, "{},{},{}", addr, entry.cos, entry.sin)?;
    }
    Ok(())
}

/// Print configuration summary plus a full-period accuracy sweep.
fn print_report(out: &mut impl Write, params: &GeneratorParams) -> io::Result<()> {
    let latency = PipelineLatency::for_params(params);

    writeln!(out, "Generator Configuration")?;
    writeln!(out, "=======================")?;
    writeln!(out, "  Data width:       {} bits", params.data_width())?;
    writeln!(out, "  Phase width:      {} bits", params.phase_width())?;
    writeln!(
        out,
        "  Table:            {} entries ({} address bits)",
        params.table_depth(),
        params.table_address_width()
    )?;
    writeln!(out, "  Variant:          {}", params.variant())?;
    writeln!(out, "  Memory style:     {:?}", params.memory_style())?;
    writeln!(out, "  Address strategy: {:?}", params.strategy())?;
    writeln!(
        out,
        "  Latency:          {} cycles ({} interpolation, quadrant delay {})",
        latency.total(),
        latency.interpolation_stages(),
        latency.quadrant_delay()
    )?;

    let report = ErrorReport::sweep(*params);
    writeln!(out)?;
    writeln!(out, "Accuracy")?;
    writeln!(out, "========")?;
    writeln!(out, "  Samples:          {}", report.samples)?;
    writeln!(
        out,
        "  Max error:        {:.3} LSB (phase {})",
        report.max_abs_error, report.worst_phase
    )?;
    writeln!(out, "  RMS error:        {:.3} LSB", report.rms_error)?;
    writeln!(
        out,
        "  Radius error:     {:.3} LSB ({:.3e} relative)",
        report.max_radius_error, report.max_relative_radius_error
    )?;
    Ok(())
}

fn print_usage() {
    println!("Usage: sincos-nco [OPTIONS] [MODE]");
    println!();
    println!("Options (override ./sincos-nco.toml and SINCOS_* variables):");
    println!("  --data-width N     Output word width in bits");
    println!("  --phase-width N    Phase accumulator width in bits");
    println!("  --table-width N    Table address width in bits");
    println!("  --variant V        generic | dsp-slice");
    println!("  --cycles N         Samples to print in CSV mode");
    println!();
    println!("Modes:");
    println!("  (default)          CSV of valid samples: cycle,phase,sin,cos");
    println!("  --table            Dump the quarter-wave table");
    println!("  --report           Configuration summary and accuracy sweep");
    println!("  --sample-config    Print a commented config file");
}
