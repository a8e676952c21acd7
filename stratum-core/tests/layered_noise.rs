//! End-to-end behaviour of layered generators.
//!
//! The reference configuration used throughout is 9 octaves with distances
//! starting at 2048 and halving, amplitudes starting at 1 and shrinking by
//! 1/1.8 per octave.

use stratum_core::{
    ArgumentError, ConfigError, FactorList, Frame, LayeredNoise, Multiplier, NoiseBuilder,
    NoiseError, Octave, OctaveParams, ParameterError,
};

fn reference(seed: u64) -> NoiseBuilder {
    NoiseBuilder::new()
        .layers(9)
        .distance_factors(Multiplier::new(2048.0, 0.5))
        .amplitude_factors(Multiplier::new(1.0, 1.0 / 1.8))
        .seed(seed)
}

fn bits(values: &[f64]) -> Vec<u64> {
    values.iter().map(|v| v.to_bits()).collect()
}

#[test]
fn reference_scenario_returns_requested_count_in_range() {
    let mut noise = reference(0x5EED).build_point().expect("valid config");
    assert_eq!(noise.layer_count(), 9);
    let values = noise.next_values(75).expect("sampling succeeds");
    assert_eq!(values.len(), 75);
    for value in values {
        assert!((0.0..=1.0).contains(&value), "value {value} out of range");
    }
}

#[test]
fn independently_built_generators_are_bit_identical() {
    let mut a = reference(99).build_point().expect("valid config");
    let mut b = reference(99).build_point().expect("valid config");
    for _ in 0..5 {
        let left = a.next_values(200).expect("sampling succeeds");
        let right = b.next_values(200).expect("sampling succeeds");
        assert_eq!(bits(&left), bits(&right));
    }

    let mut c = reference(100).build_point().expect("valid config");
    let mut d = reference(99).build_point().expect("valid config");
    assert_ne!(
        c.next_values(200).expect("sampling succeeds"),
        d.next_values(200).expect("sampling succeeds")
    );
}

#[test]
fn normalised_output_stays_below_one() {
    let mut noise = NoiseBuilder::new()
        .layers(9)
        .distance_factors(Multiplier::new(512.0, 0.5))
        .amplitude_factors(Multiplier::new(1.0, 1.0 / 1.8))
        .seed(1234)
        .build_point()
        .expect("valid config");
    let values = noise.next_values(100_000).expect("sampling succeeds");
    assert_eq!(values.len(), 100_000);
    assert!(values.iter().all(|v| (0.0..1.0).contains(v)));
}

#[test]
fn line_and_slice_output_stays_below_one() {
    let mut line = reference(3).layers(6).build_line(64).expect("valid config");
    for row in line.next_lines(20).expect("sampling succeeds") {
        assert_eq!(row.len(), 64);
        assert!(row.iter().all(|v| (0.0..1.0).contains(v)));
    }

    let mut slice = reference(3).layers(6).build_slice(16, 8).expect("valid config");
    assert_eq!((slice.width(), slice.height()), (16, 8));
    for plane in slice.next_slices(3).expect("sampling succeeds") {
        assert_eq!((plane.width(), plane.height()), (16, 8));
        assert!(plane.values().iter().all(|v| (0.0..1.0).contains(v)));
    }
}

#[test]
fn exhausted_distances_stop_early() {
    let noise = NoiseBuilder::new()
        .layers(6)
        .distance_factors(FactorList::new([64.0, 32.0, 16.0, 0.0, 8.0]))
        .amplitude_factors(Multiplier::new(1.0, 0.5))
        .build_point()
        .expect("three layers usable");
    assert_eq!(noise.layer_count(), 3);

    let noise = NoiseBuilder::new()
        .layers(4)
        .distance_factors(Multiplier::new(64.0, -0.5))
        .amplitude_factors(Multiplier::new(1.0, 0.5))
        .build_line(32)
        .expect("first layer usable");
    assert_eq!(noise.layer_count(), 1);
}

#[test]
#[allow(clippy::float_cmp)]
fn max_amplitude_is_sum_of_octave_amplitudes() {
    let noise = reference(5).build_point().expect("valid config");
    let expected: f64 = Multiplier::new(1.0, 1.0 / 1.8).take(9).sum();
    assert_eq!(noise.max_amplitude(), expected);
    let summed: f64 = noise.octaves().iter().map(Octave::amplitude).sum();
    assert_eq!(noise.max_amplitude(), summed);
}

#[test]
fn scaling_an_octave_amplitude_scales_its_output() {
    let reference = OctaveParams::new([1.0 / 16.0, 1.0 / 8.0], 1.0, 77);
    let scaled = OctaveParams::new([1.0 / 16.0, 1.0 / 8.0], 4.0, 77);
    let mut reference = reference.build_line(40).expect("valid octave");
    let mut scaled = scaled.build_line(40).expect("valid octave");
    for (r, s) in reference
        .next_frames(10)
        .expect("sampling succeeds")
        .into_iter()
        .zip(scaled.next_frames(10).expect("sampling succeeds"))
    {
        let expected: Vec<f64> = r.values().iter().map(|v| v * 4.0).collect();
        assert_eq!(bits(s.values()), bits(&expected));
    }
}

#[test]
fn buffer_frames_match_typed_accessors() {
    let mut framed = reference(8).layers(4).build_line(12).expect("valid config");
    let mut typed = reference(8).layers(4).build_line(12).expect("valid config");
    let buffer = framed.next(3).expect("sampling succeeds");
    assert_eq!(buffer.len(), 3);
    let rows: Vec<Vec<f64>> = buffer
        .into_frames()
        .into_iter()
        .filter_map(Frame::into_sequence)
        .collect();
    assert_eq!(rows, typed.next_lines(3).expect("sampling succeeds"));
}

#[test]
fn zero_count_is_invalid() {
    let mut noise = reference(1).build_point().expect("valid config");
    assert!(matches!(
        noise.next(0),
        Err(NoiseError::InvalidArgument(ArgumentError::NonPositiveCount))
    ));
    // The failed call did not move any cursor.
    let mut fresh = reference(1).build_point().expect("valid config");
    assert_eq!(
        noise.next_values(10).expect("sampling succeeds"),
        fresh.next_values(10).expect("sampling succeeds")
    );
}

#[test]
fn zero_usable_layers_is_a_configuration_error() {
    let err = NoiseBuilder::new()
        .layers(3)
        .distance_factors(Multiplier::new(-1.0, 0.5))
        .amplitude_factors(Multiplier::new(1.0, 0.5))
        .build_slice(4, 4)
        .unwrap_err();
    assert!(matches!(
        err,
        NoiseError::Configuration(ConfigError::NoLayersBuilt { requested: 3 })
    ));
}

#[test]
fn oversized_distance_is_an_invalid_parameter() {
    let err = NoiseBuilder::new()
        .layers(2)
        .distance_factors(Multiplier::new(1e9, 0.5))
        .amplitude_factors(Multiplier::new(1.0, 0.5))
        .build_point()
        .unwrap_err();
    assert!(matches!(
        err,
        NoiseError::InvalidParameter(ParameterError::TooManyInterpolationPoints { axis: 0, .. })
    ));
}

#[test]
fn mixed_circularity_collapses_to_false() {
    let steps = [1.0 / 8.0, 1.0 / 8.0];
    let wrapped = OctaveParams::new(steps, 1.0, 0)
        .circular(true)
        .build_line(32)
        .expect("8 divides 32");
    let plain = OctaveParams::new(steps, 0.5, 1)
        .build_line(32)
        .expect("valid octave");

    let both = LayeredNoise::new(vec![wrapped.clone(), wrapped.clone()]).expect("octaves present");
    assert!(both.is_circular());
    let mixed = LayeredNoise::new(vec![wrapped, plain]).expect("octaves present");
    assert!(!mixed.is_circular());
}
