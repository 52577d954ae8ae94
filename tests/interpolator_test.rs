mod common;

use approx::assert_relative_eq;
use num_complex::Complex32;

use common::{max_abs_diff, run_samples, zero};
use polyfir::simulation::{complex_noise, complex_tone, impulse, random_taps};
use polyfir::{FilterPrototype, FirInterpolator, NyquistFamily};

#[test]
fn test_kaiser_impulse_response_equals_scaled_taps() {
    let (rate, m) = (2, 12);
    let mut interp = FirInterpolator::kaiser(rate, m, 60.0).unwrap();
    interp.set_scale(0.5);
    assert_eq!(interp.coefficients().len(), 2 * m * rate);

    // impulse followed by 2m zeros
    let input = impulse(2 * m + 1);
    let output = run_samples(&mut interp, &input);
    assert_eq!(output.len(), (2 * m + 1) * rate);

    let taps = interp.coefficients().to_vec();
    for (i, y) in output.iter().enumerate() {
        let expected = taps.get(i).map_or(0.0, |h| 0.5 * h);
        assert_relative_eq!(y.re, expected, epsilon = 1e-7);
        assert_eq!(y.im, 0.0);
    }
}

#[test]
fn test_kaiser_passband_gain() {
    let mut interp = FirInterpolator::kaiser(4, 12, 60.0).unwrap();
    let output = run_samples(&mut interp, &vec![Complex32::new(1.0, 0.0); 64]);
    // DC input reaches unity gain once the history is full
    for y in &output[4 * 30..] {
        assert_relative_eq!(y.re, 1.0, epsilon = 1e-2);
    }
}

#[test]
fn test_polyphase_reconstruction_all_families() {
    for family in NyquistFamily::ALL {
        for (rate, m) in [(2, 2), (3, 4), (4, 3)] {
            let prototype = FilterPrototype::nyquist(family, rate, m, 0.3, 0.0);
            let interp = FirInterpolator::from_prototype(&prototype)
                .unwrap_or_else(|e| panic!("{} M={} m={}: {}", family, rate, m, e));

            let len = interp.sub_filter_length();
            assert_eq!(len, 2 * m + 1);
            assert_eq!(interp.coefficients().len(), rate * len);

            let designed = prototype.design().unwrap();
            assert_eq!(&interp.coefficients()[..designed.len()], designed.as_slice());
            assert!(interp.coefficients()[designed.len()..].iter().all(|&h| h == 0.0));

            for p in 0..rate {
                let sub = interp.sub_filter(p).unwrap();
                assert_eq!(sub.len(), len);
                for (j, &h) in sub.coefficients().iter().enumerate() {
                    assert_eq!(h, interp.coefficients()[j * rate + p]);
                }
            }
            assert!(interp.sub_filter(rate).is_none());
        }
    }
}

#[test]
fn test_polyphase_reconstruction_external_taps() {
    let taps = random_taps(5 * 7, Some(3));
    let interp = FirInterpolator::new(5, &taps).unwrap();
    let mut rebuilt = vec![0.0; taps.len()];
    for (p, sub) in interp.sub_filters().iter().enumerate() {
        for (j, &h) in sub.coefficients().iter().enumerate() {
            rebuilt[j * 5 + p] = h;
        }
    }
    assert_eq!(rebuilt, taps);
}

#[test]
fn test_zero_isi_for_nyquist_families() {
    let (rate, m) = (4, 3);
    for family in NyquistFamily::ALL.into_iter().filter(|f| f.is_nyquist()) {
        let prototype = FilterPrototype::nyquist(family, rate, m, 0.3, 0.0);
        let mut interp = FirInterpolator::from_prototype(&prototype).unwrap();

        let output = run_samples(&mut interp, &impulse(2 * m + 1));
        for q in 0..=2 * m {
            let y = output[q * rate].re;
            let expected = if q == m { 1.0 } else { 0.0 };
            assert!(
                (y - expected).abs() < 1e-5,
                "{}: symbol {} gave {}",
                family,
                q,
                y
            );
        }
    }
}

#[test]
fn test_reset_is_idempotent_and_restores_fresh_state() {
    let noise = complex_noise(50, 1.0, Some(9));
    let probe = complex_tone(20, 0.05, 1.0, 0.3);

    let mut fresh = FirInterpolator::kaiser(3, 5, 50.0).unwrap();
    let expected = run_samples(&mut fresh, &probe);

    let mut interp = FirInterpolator::kaiser(3, 5, 50.0).unwrap();
    run_samples(&mut interp, &noise);
    interp.reset();
    assert_eq!(run_samples(&mut interp, &probe), expected);

    run_samples(&mut interp, &noise);
    interp.reset();
    interp.reset();
    assert_eq!(run_samples(&mut interp, &probe), expected);
}

#[test]
fn test_scale_is_linear() {
    let input = complex_noise(40, 1.0, Some(17));
    let mut unit = FirInterpolator::from_prototype(&FilterPrototype::nyquist(
        NyquistFamily::RootRaisedCosine,
        2,
        4,
        0.35,
        0.0,
    ))
    .unwrap();
    let mut scaled = unit.clone();
    scaled.set_scale(-2.5);

    let a = run_samples(&mut unit, &input);
    let b = run_samples(&mut scaled, &input);
    for (ya, yb) in a.iter().zip(&b) {
        assert_relative_eq!(yb.re, -2.5 * ya.re, epsilon = 1e-5);
        assert_relative_eq!(yb.im, -2.5 * ya.im, epsilon = 1e-5);
    }
}

#[test]
fn test_zero_scale_silences_output() {
    let mut interp = FirInterpolator::kaiser(2, 4, 40.0).unwrap();
    interp.set_scale(0.0);
    let output = run_samples(&mut interp, &complex_noise(10, 1.0, Some(1)));
    assert!(output.iter().all(|y| y.norm() == 0.0));
}

#[test]
fn test_block_matches_per_sample() {
    let input = complex_noise(37, 1.0, Some(23));

    let mut per_sample = FirInterpolator::kaiser(5, 4, 60.0).unwrap();
    let expected = run_samples(&mut per_sample, &input);

    let mut block = FirInterpolator::kaiser(5, 4, 60.0).unwrap();
    let mut output = vec![zero(); input.len() * 5];
    let (first, second) = input.split_at(11);
    let (out_first, out_second) = output.split_at_mut(11 * 5);
    block.execute_block(first, out_first);
    block.execute_block(second, out_second);

    assert_eq!(output, expected);
}

#[test]
fn test_empty_block_is_noop() {
    let mut interp = FirInterpolator::kaiser(2, 3, 60.0).unwrap();
    interp.execute_block(&[], &mut []);
    let mut y = [zero(); 2];
    interp.execute(Complex32::new(1.0, 0.0), &mut y);
    assert_relative_eq!(y[0].re, interp.coefficients()[0], epsilon = 1e-7);
}

#[test]
fn test_clone_is_independent() {
    let warmup = complex_noise(15, 1.0, Some(5));
    let tail = complex_noise(15, 1.0, Some(6));

    let mut original = FirInterpolator::kaiser(3, 4, 60.0).unwrap();
    run_samples(&mut original, &warmup);
    let mut copy = original.clone();

    assert_eq!(run_samples(&mut copy, &tail), run_samples(&mut original, &tail));

    copy.set_scale(3.0);
    copy.reset();
    assert_eq!(original.scale(), 1.0);
    let mut reference = original.clone();
    let next = complex_noise(4, 1.0, Some(7));
    let a = run_samples(&mut original, &next);
    let b = run_samples(&mut reference, &next);
    assert_eq!(max_abs_diff(&a, &b), 0.0);
}

#[test]
fn test_rate_one_is_plain_fir() {
    let taps = [0.5, -0.25, 0.125];
    let mut interp = FirInterpolator::new(1, &taps).unwrap();
    let input: Vec<Complex32> = (1..=4).map(|v| Complex32::new(v as f32, 0.0)).collect();
    let output = run_samples(&mut interp, &input);
    let expected = [0.5, 0.75, 1.125, 1.5];
    for (y, e) in output.iter().zip(expected) {
        assert_relative_eq!(y.re, e, epsilon = 1e-6);
    }
}

#[test]
fn test_construction_errors() {
    assert!(FirInterpolator::new(0, &[1.0]).is_err());
    assert!(FirInterpolator::new(2, &[]).is_err());
    assert!(FirInterpolator::new(2, &[1.0, 2.0, 3.0]).is_err());
    assert!(FirInterpolator::kaiser(2, 0, 60.0).is_err());
    assert!(FirInterpolator::kaiser(2, 4, -1.0).is_err());
    let bad_beta = FilterPrototype::nyquist(NyquistFamily::RaisedCosine, 2, 4, 1.5, 0.0);
    assert!(FirInterpolator::from_prototype(&bad_beta).is_err());
    let bad_mu = FilterPrototype::nyquist(NyquistFamily::RaisedCosine, 2, 4, 0.3, 0.75);
    assert!(FirInterpolator::from_prototype(&bad_mu).is_err());
}

#[test]
#[should_panic(expected = "output buffer must hold one sample per phase")]
fn test_execute_rejects_wrong_output_length() {
    let mut interp = FirInterpolator::kaiser(3, 2, 60.0).unwrap();
    let mut y = [zero(); 2];
    interp.execute(zero(), &mut y);
}
