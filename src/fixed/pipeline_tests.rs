use super::*;
use crate::common::SampleKind;
use crate::fixed::stage::StageState;
use crate::fixed::types::{Cplx16, Fixed};
use core::f64::consts::PI;
use num_complex::Complex;

fn c16(re: f64, im: f64) -> Cplx16 {
    Cplx16::new(Fixed::from_f64(re), Fixed::from_f64(im))
}

fn push(fft: &mut PipelinedFft, x: Cplx16) -> Option<Cplx64> {
    fft.input(Sample::Cplx16(x)).unwrap();
    fft.output().map(|s| s.into_cplx64().unwrap())
}

/// Pushes one block into a fresh pipeline, pads with zeros until N results
/// came out and returns them in natural order.
fn transform(fft: &mut PipelinedFft, block: &[Cplx16]) -> Vec<Cplx64> {
    let n = fft.length();
    let mut out = Vec::with_capacity(n);

    for &x in block {
        out.extend(push(fft, x));
    }
    let mut guard = 0;
    while out.len() < n {
        out.extend(push(fft, Cplx16::ZERO));
        guard += 1;
        assert!(guard < 4 * n, "Pipeline never produced a full block");
    }

    fft.reorder(&mut out).unwrap();
    out
}

fn dft(input: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let n = input.len();
    (0..n)
        .map(|k| {
            let mut acc = Complex::new(0.0, 0.0);
            for (j, x) in input.iter().enumerate() {
                let angle = -2.0 * PI * ((j * k) % n) as f64 / n as f64;
                acc += x * Complex::new(libm::cos(angle), libm::sin(angle));
            }
            acc
        })
        .collect()
}

fn assert_close(got: &[Cplx64], expected: &[Complex<f64>], tolerance: f64) {
    assert_eq!(got.len(), expected.len());
    for (k, (g, e)) in got.iter().zip(expected).enumerate() {
        let g = g.to_complex64();
        assert!(
            libm::fabs(g.re - e.re) < tolerance && libm::fabs(g.im - e.im) < tolerance,
            "Bin {}: expected ({:.6}, {:.6}), got ({:.6}, {:.6})",
            k,
            e.re,
            e.im,
            g.re,
            g.im
        );
    }
}

#[test]
fn test_forward_impulse_n4() {
    let mut fft = PipelinedFft::new(4, TableSize::Auto, Direction::Forward).unwrap();
    let one = Cplx64::from_bits(1 << WIDE_FRAC, 0);

    for x in [c16(1.0, 0.0), c16(0.0, 0.0), c16(0.0, 0.0), c16(0.0, 0.0)] {
        assert_eq!(push(&mut fft, x), None);
    }
    for _ in 0..4 {
        assert_eq!(push(&mut fft, Cplx16::ZERO), Some(one));
    }
}

#[test]
fn test_outputs_leave_in_bit_reversed_order() {
    let mut fft = PipelinedFft::new(4, TableSize::Auto, Direction::Forward).unwrap();
    // x = [0, 1, 0, 0] -> X[k] = W^k = [1, -i, -1, i]
    let block = [c16(0.0, 0.0), c16(0.5, 0.0), c16(0.0, 0.0), c16(0.0, 0.0)];

    let mut raw = Vec::new();
    for x in block {
        raw.extend(push(&mut fft, x));
    }
    for _ in 0..4 {
        raw.extend(push(&mut fft, Cplx16::ZERO));
    }

    let half = 1i64 << (WIDE_FRAC - 1);
    assert_eq!(
        raw,
        [
            Cplx64::from_bits(half, 0),  // X[0]
            Cplx64::from_bits(-half, 0), // X[2]
            Cplx64::from_bits(0, -half), // X[1]
            Cplx64::from_bits(0, half),  // X[3]
        ]
    );
}

#[test]
fn test_round_trip_n4() {
    let block = [c16(0.5, 0.25), c16(-0.25, 0.125), c16(0.125, -0.5), c16(0.375, 0.0)];

    let mut forward = PipelinedFft::new(4, TableSize::Auto, Direction::Forward).unwrap();
    let spectrum = transform(&mut forward, &block);

    let mut inverse = PipelinedFft::new(4, TableSize::Auto, Direction::Inverse).unwrap();
    let narrowed: Vec<Cplx16> = spectrum.iter().map(|x| x.narrow()).collect();
    let recovered = transform(&mut inverse, &narrowed);

    for (x, y) in block.iter().zip(&recovered) {
        let y: Cplx16 = y.narrow();
        assert!((x.re.to_bits() - y.re.to_bits()).abs() <= 2, "{:?} vs {:?}", x, y);
        assert!((x.im.to_bits() - y.im.to_bits()).abs() <= 2, "{:?} vs {:?}", x, y);
    }
}

#[test]
fn test_forward_n16_matches_dft() {
    let n = 16;
    let block: Vec<Cplx16> = (0..n)
        .map(|j| {
            let phase = 2.0 * PI * j as f64 / n as f64;
            c16(0.25 * libm::cos(3.0 * phase), 0.125 * libm::sin(5.0 * phase))
        })
        .collect();
    let reference: Vec<Complex<f64>> = block.iter().map(|x| x.to_complex64()).collect();

    let mut fft = PipelinedFft::new(n, TableSize::Auto, Direction::Forward).unwrap();
    let spectrum = transform(&mut fft, &block);

    assert_close(&spectrum, &dft(&reference), 2e-3);
}

#[test]
fn test_forward_n64_tone() {
    let n = 64;
    let block: Vec<Cplx16> = (0..n)
        .map(|j| {
            let phase = 2.0 * PI * 5.0 * j as f64 / n as f64;
            c16(0.125 * libm::cos(phase), 0.125 * libm::sin(phase))
        })
        .collect();
    let reference: Vec<Complex<f64>> = block.iter().map(|x| x.to_complex64()).collect();

    let mut fft = PipelinedFft::new(n, TableSize::Auto, Direction::Forward).unwrap();
    let spectrum = transform(&mut fft, &block);

    assert_close(&spectrum, &dft(&reference), 1e-2);
    // All the energy sits in bin 5 (64 * 0.125 = 8)
    assert!(libm::fabs(spectrum[5].to_complex64().re - 8.0) < 1e-2);
}

#[test]
fn test_round_trip_n16() {
    let n = 16;
    let block: Vec<Cplx16> = (0..n)
        .map(|j| c16(0.2 * libm::sin(j as f64), -0.15 * libm::cos(0.7 * j as f64)))
        .collect();

    let mut forward = PipelinedFft::new(n, TableSize::Auto, Direction::Forward).unwrap();
    let spectrum = transform(&mut forward, &block);

    let mut inverse = PipelinedFft::new(n, TableSize::Auto, Direction::Inverse).unwrap();
    let narrowed: Vec<Cplx16> = spectrum.iter().map(|x| x.narrow()).collect();
    let recovered = transform(&mut inverse, &narrowed);

    let expected: Vec<Complex<f64>> = block.iter().map(|x| x.to_complex64()).collect();
    assert_close(&recovered, &expected, 1e-3);
}

#[test]
fn test_inverse_impulse_is_scaled_by_n() {
    let mut fft = PipelinedFft::new(4, TableSize::Auto, Direction::Inverse).unwrap();
    let block = [c16(1.0, 0.0), c16(0.0, 0.0), c16(0.0, 0.0), c16(0.0, 0.0)];

    let out = transform(&mut fft, &block);

    for value in out {
        assert_eq!(value, Cplx64::from_bits(1 << (WIDE_FRAC - 2), 0));
    }
}

#[test]
fn test_no_output_until_pipeline_is_full() {
    let mut fft = PipelinedFft::new(8, TableSize::Auto, Direction::Forward).unwrap();
    assert!(fft.output().is_none());

    for i in 0..8 {
        assert_eq!(push(&mut fft, c16(0.1, 0.0)), None, "Input {}", i + 1);
    }
    assert_eq!(fft.inputs(), 8);
    assert!(push(&mut fft, c16(0.1, 0.0)).is_some());
}

#[test]
fn test_one_output_per_input() {
    let mut fft = PipelinedFft::new(4, TableSize::Auto, Direction::Forward).unwrap();
    for _ in 0..4 {
        push(&mut fft, c16(0.25, 0.0));
    }

    for i in 0..12 {
        fft.input(Sample::Cplx16(c16(0.25, 0.0))).unwrap();
        assert!(fft.output().is_some(), "Input {}", i + 5);
        assert!(fft.output().is_none(), "Second poll after input {}", i + 5);
    }
}

#[test]
fn test_ready_invariant_holds_for_every_stage() {
    let mut fft = PipelinedFft::new(32, TableSize::Auto, Direction::Forward).unwrap();

    for i in 0..200 {
        push(&mut fft, c16(0.01 * (i % 7) as f64, -0.02));
        for s in 0..fft.stage_count() {
            let stage = fft.stage(s).unwrap();
            assert_eq!(stage.is_ready(), stage.state() != StageState::Output);
        }
        // The head stage always accepted the real sample
        assert!(fft.stage(0).unwrap().ticks() >= i + 1);
    }
}

#[test]
fn test_stage_layout() {
    let fft = PipelinedFft::new(16, TableSize::Auto, Direction::Forward).unwrap();

    assert_eq!(fft.stage_count(), 4);
    assert_eq!(fft.table().size(), 5760);
    for s in 0..4 {
        let stage = fft.stage(s).unwrap();
        assert_eq!(stage.size(), 16 >> s);
        let expected = if s == 3 {
            Downstream::Collector
        } else {
            Downstream::Stage(s + 1)
        };
        assert_eq!(stage.downstream(), expected);
    }
    assert!(fft.stage(4).is_none());
}

#[test]
fn test_reset_matches_fresh_pipeline() {
    let block = [c16(0.5, 0.25), c16(-0.25, 0.125), c16(0.125, -0.5), c16(0.375, 0.0)];
    let mut fft = PipelinedFft::new(4, TableSize::Auto, Direction::Forward).unwrap();
    let first = transform(&mut fft, &block);

    push(&mut fft, c16(0.75, 0.75));
    fft.reset();

    assert_eq!(fft.inputs(), 0);
    assert_eq!(fft.pending(), 0);
    assert!(fft.output().is_none());
    for s in 0..fft.stage_count() {
        assert_eq!(fft.stage(s).unwrap().state(), StageState::Initial);
    }
    assert_eq!(transform(&mut fft, &block), first);
}

#[test]
fn test_explicit_table_size() {
    let block = [
        c16(0.5, 0.0),
        c16(0.25, 0.0),
        c16(0.0, 0.25),
        c16(-0.25, 0.0),
        c16(0.125, 0.0),
        c16(0.0, 0.0),
        c16(0.0, -0.125),
        c16(0.0, 0.0),
    ];
    let reference: Vec<Complex<f64>> = block.iter().map(|x| x.to_complex64()).collect();

    let mut fft = PipelinedFft::new(8, TableSize::from(720), Direction::Forward).unwrap();
    assert_eq!(fft.table().size(), 720);

    assert_close(&transform(&mut fft, &block), &dft(&reference), 1e-3);
}

#[test]
fn test_invalid_lengths_are_rejected() {
    for n in [0, 1, 3, 6, 12] {
        assert!(matches!(
            PipelinedFft::new(n, TableSize::Auto, Direction::Forward),
            Err(DspError::NotPowerOfTwo)
        ));
    }
}

#[test]
fn test_invalid_table_size_is_rejected() {
    assert!(matches!(
        PipelinedFft::new(16, TableSize::Samples(10), Direction::Forward),
        Err(DspError::InvalidTableSize(10))
    ));
}

#[test]
fn test_oversized_table_is_rejected() {
    let huge = usize::MAX / 2;
    assert!(matches!(
        PipelinedFft::new(16, TableSize::Samples(huge), Direction::Forward),
        Err(DspError::InvalidTableSize(size)) if size == huge
    ));
}

#[test]
fn test_tag_mismatch_is_rejected() {
    let mut fft = PipelinedFft::new(4, TableSize::Auto, Direction::Forward).unwrap();

    assert_eq!(
        fft.input(Sample::Cplx64(Cplx64::ZERO)),
        Err(DspError::TagMismatch {
            expected: SampleKind::Cplx16,
            found: SampleKind::Cplx64,
        })
    );
    assert_eq!(fft.inputs(), 0);
}

#[test]
fn test_reorder_checks_length() {
    let fft = PipelinedFft::new(8, TableSize::Auto, Direction::Forward).unwrap();
    let mut block = vec![Cplx64::ZERO; 4];

    assert_eq!(fft.reorder(&mut block), Err(DspError::SizeMismatch));
}

#[test]
fn test_from_config() {
    let fft = PipelinedFft::from_config(&FftConfig::inverse(8)).unwrap();

    assert_eq!(fft.length(), 8);
    assert_eq!(fft.direction(), Direction::Inverse);
    assert_eq!(fft.name(), "FixedFFT");
}
