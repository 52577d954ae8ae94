use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use polyfir::config::{FilterConfig, InterpolatorConfig};
use polyfir::design::NyquistFamily;
use polyfir::logging::{ConsoleSink, Logger, Severity, WriterSink};
use polyfir::output::{FilterReport, OutputFormat, create_formatter};

#[derive(Parser, Debug)]
#[command(name = "polyfir")]
#[command(about = "Design a polyphase FIR interpolator and report its coefficients", long_about = None)]
struct Args {
    /// TOML interpolator configuration (command-line options override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interpolation factor M
    #[arg(short = 'M', long)]
    rate: Option<usize>,

    /// Filter semi-length m
    #[arg(short = 'm', long)]
    semi_length: Option<usize>,

    /// Stopband attenuation in dB (low-pass design)
    #[arg(short = 'a', long)]
    attenuation: Option<f32>,

    /// Nyquist prototype family instead of the low-pass design
    #[arg(short = 'p', long, value_enum)]
    prototype: Option<NyquistFamily>,

    /// Excess bandwidth factor (Nyquist prototypes)
    #[arg(short = 'b', long)]
    beta: Option<f32>,

    /// Fractional timing offset in samples (Nyquist prototypes)
    #[arg(long)]
    mu: Option<f32>,

    /// Output gain
    #[arg(short = 'g', long)]
    gain: Option<f32>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Also write log events to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Minimum severity written to the log file
    #[arg(long, value_enum, default_value = "debug")]
    log_file_level: Severity,

    /// Disable colored log output
    #[arg(long)]
    no_color: bool,
}

fn console_level(verbose: u8) -> Severity {
    match verbose {
        0 => Severity::Warn,
        1 => Severity::Info,
        2 => Severity::Debug,
        _ => Severity::Trace,
    }
}

fn init_logging(args: &Args) -> Result<()> {
    let console = console_level(args.verbose);
    let logger = Logger::new();
    logger.set_level(console.min(args.log_file_level));
    logger.add_sink(ConsoleSink::new(!args.no_color), console)?;

    if let Some(ref path) = args.log_file {
        let sink = WriterSink::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        logger.add_sink(sink, args.log_file_level)?;
    }

    logger.install()?;
    Ok(())
}

fn apply_overrides(config: &mut InterpolatorConfig, args: &Args) {
    if let Some(rate) = args.rate {
        config.rate = rate;
    }
    if let Some(gain) = args.gain {
        config.scale = gain;
    }

    if let Some(family) = args.prototype {
        let (semi_length, excess_bandwidth, timing_offset) = match config.filter {
            FilterConfig::Prototype {
                semi_length,
                excess_bandwidth,
                timing_offset,
                ..
            } => (semi_length, excess_bandwidth, timing_offset),
            _ => (7, 0.25, 0.0),
        };
        config.filter = FilterConfig::Prototype {
            family,
            semi_length,
            excess_bandwidth,
            timing_offset,
        };
    }

    match config.filter {
        FilterConfig::Lowpass {
            ref mut semi_length,
            ref mut attenuation_db,
        } => {
            if let Some(m) = args.semi_length {
                *semi_length = m;
            }
            if let Some(a) = args.attenuation {
                *attenuation_db = a;
            }
        }
        FilterConfig::Prototype {
            ref mut semi_length,
            ref mut excess_bandwidth,
            ref mut timing_offset,
            ..
        } => {
            if let Some(m) = args.semi_length {
                *semi_length = m;
            }
            if let Some(beta) = args.beta {
                *excess_bandwidth = beta;
            }
            if let Some(mu) = args.mu {
                *timing_offset = mu;
            }
        }
        FilterConfig::External { .. } => {
            if args.semi_length.is_some() || args.attenuation.is_some() || args.beta.is_some() {
                log::warn!("filter design options ignored for external taps");
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let mut config = match args.config {
        Some(ref path) => InterpolatorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => InterpolatorConfig::default(),
    };
    apply_overrides(&mut config, &args);
    log::info!("configuration: M={}, {}", config.rate, config.filter);
    if let Some(prototype) = config.filter.prototype(config.rate) {
        log::debug!("prototype design has {} taps", prototype.num_taps());
    }

    let interp = config.build().context("Failed to build interpolator")?;
    log::debug!("{}", interp);
    log::trace!("{}", interp.describe());

    let report = FilterReport::new(&interp, config.filter.to_string());
    let formatter = create_formatter(args.format, args.verbose > 0);
    if let Some(header) = formatter.header() {
        println!("{}", header);
    }
    println!("{}", formatter.format(&report));

    log::logger().flush();
    Ok(())
}
