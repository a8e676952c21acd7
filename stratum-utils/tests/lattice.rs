//! Lattice lookups from many threads and circularity properties over a range
//! of lengths.

use std::thread;

use stratum_utils::gradient::lattice_hash;
use stratum_utils::{GradientTables, correct_interpolation_points_for_circularity, wrap_index};

#[test]
fn concurrent_lookups_agree() {
    let expected: Vec<Vec<f64>> = (0..64)
        .map(|x| {
            GradientTables::global()
                .gradient(7, &[x, -x, 3])
                .expect("3D lookup")
                .to_vec()
        })
        .collect();

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                let tables = GradientTables::global();
                for (x, want) in (0..64).zip(&expected) {
                    let got = tables.gradient(7, &[x, -x, 3]).expect("3D lookup");
                    assert_eq!(got, want.as_slice());
                }
            });
        }
    });
}

#[test]
fn wrapped_coordinates_hash_like_their_origin() {
    let period = 6;
    for x in -30..30 {
        let wrapped = wrap_index(x, period);
        assert!((0..period).contains(&wrapped));
        assert_eq!(
            lattice_hash(1, &[wrap_index(x + period, period), 4]),
            lattice_hash(1, &[wrapped, 4])
        );
    }
}

#[test]
fn corrected_points_always_divide() {
    for length in 1..=200usize {
        for requested in 1..=length {
            let points = correct_interpolation_points_for_circularity(requested, length)
                .expect("valid arguments");
            assert_eq!(length % points, 0);
            assert_eq!(
                correct_interpolation_points_for_circularity(points, length),
                Ok(points)
            );
            // Nothing closer divides.
            let distance = points.abs_diff(requested);
            assert!(
                (1..=length)
                    .filter(|d| length % d == 0)
                    .all(|d| d.abs_diff(requested) >= distance)
            );
        }
    }
}
