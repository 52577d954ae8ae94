use anyhow::{Context, Result, bail};
use clap::Parser;
use num_complex::Complex32;
use std::path::PathBuf;

use polyfir::config::{FilterConfig, InterpolatorConfig};
use polyfir::design::NyquistFamily;
use polyfir::wav::{load_iq, save_iq};

#[derive(Parser, Debug)]
#[command(name = "interp_wav")]
#[command(about = "Interpolate an I/Q WAV file by an integer factor", long_about = None)]
struct Args {
    /// Input WAV (left = I, right = Q)
    input: PathBuf,

    /// Output WAV, written as 32-bit float stereo
    output: PathBuf,

    /// Interpolation factor M
    #[arg(short = 'M', long, default_value_t = 2)]
    rate: usize,

    /// Filter semi-length m (input samples of delay)
    #[arg(short = 'm', long, default_value_t = 12)]
    semi_length: usize,

    /// Stopband attenuation in dB for the low-pass design
    #[arg(short = 'a', long, default_value_t = 60.0)]
    attenuation: f32,

    /// Use a Nyquist prototype instead of the low-pass design
    #[arg(short = 'p', long, value_enum)]
    prototype: Option<NyquistFamily>,

    /// Excess bandwidth factor for Nyquist prototypes
    #[arg(short = 'b', long, default_value_t = 0.25)]
    beta: f32,

    /// Output gain
    #[arg(short = 'g', long, default_value_t = 1.0)]
    gain: f32,

    /// Append m zero samples so the filter tail is flushed
    #[arg(long)]
    flush: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    if args.rate == 0 {
        bail!("interpolation rate must be at least 1");
    }

    let filter = match args.prototype {
        Some(family) => FilterConfig::Prototype {
            family,
            semi_length: args.semi_length,
            excess_bandwidth: args.beta,
            timing_offset: 0.0,
        },
        None => FilterConfig::Lowpass {
            semi_length: args.semi_length,
            attenuation_db: args.attenuation,
        },
    };
    let config = InterpolatorConfig {
        rate: args.rate,
        scale: args.gain,
        filter,
    };
    let mut interp = config.build().context("Failed to build interpolator")?;
    log::info!("{} using {}", interp, config.filter);

    let (mut input, sample_rate) = load_iq(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    log::info!(
        "read {} samples at {} Hz from {}",
        input.len(),
        sample_rate,
        args.input.display()
    );

    if args.flush {
        input.extend(std::iter::repeat_n(Complex32::new(0.0, 0.0), args.semi_length));
    }

    let output_rate = u32::try_from(args.rate)
        .ok()
        .and_then(|m| sample_rate.checked_mul(m))
        .context("Output sample rate overflows")?;

    let mut output = vec![Complex32::new(0.0, 0.0); input.len() * args.rate];
    interp.execute_block(&input, &mut output);

    save_iq(&args.output, &output, output_rate)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!(
        "wrote {} samples at {} Hz to {}",
        output.len(),
        output_rate,
        args.output.display()
    );

    Ok(())
}
