//! Complex baseband WAV files: left channel = I, right channel = Q

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use num_complex::Complex32;

/// Read a stereo WAV as complex samples, returning them with the sample rate
///
/// Integer formats are scaled to `[-1, 1)`. A mono file is read as a real
/// signal (`Q = 0`).
pub fn load_iq<P: AsRef<Path>>(path: P) -> Result<(Vec<Complex32>, u32), hound::Error> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    let interleaved = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = 2_i64.pow(spec.bits_per_sample as u32 - 1) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let samples = match spec.channels {
        1 => interleaved.iter().map(|&re| Complex32::new(re, 0.0)).collect(),
        2 => interleaved
            .chunks_exact(2)
            .map(|pair| Complex32::new(pair[0], pair[1]))
            .collect(),
        _ => return Err(hound::Error::Unsupported),
    };

    Ok((samples, spec.sample_rate))
}

/// Write complex samples as a stereo 32-bit float WAV
pub fn save_iq<P: AsRef<Path>>(
    path: P,
    samples: &[Complex32],
    sample_rate: u32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for sample in samples {
        writer.write_sample(sample.re)?;
        writer.write_sample(sample.im)?;
    }

    writer.finalize()?;
    Ok(())
}
