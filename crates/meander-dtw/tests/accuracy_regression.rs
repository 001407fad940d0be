//! Accuracy regression tests for meander-dtw.
//!
//! These tests verify that algorithmic changes do not alter alignment
//! distances, constrained-region shapes, or subsequence locations. Reference
//! values were computed by hand from the recurrence and are hardcoded to
//! catch regressions.

use meander_dtw::{Dtw, PointMetric, Series, WarpConstraint, subsequence_align};

// ---------------------------------------------------------------------------
// Helper
// ---------------------------------------------------------------------------

fn s(values: Vec<f64>) -> Series {
    Series::univariate(values).expect("valid test series")
}

// ---------------------------------------------------------------------------
// a) dtw_distances_match_known_values
// ---------------------------------------------------------------------------

/// Verify Manhattan-metric distances for 10 synthetic series pairs match
/// hardcoded reference values.
#[test]
fn dtw_distances_match_known_values() {
    let pairs: Vec<(Series, Series)> = vec![
        (s(vec![0.0, 0.0, 0.0]), s(vec![1.0, 1.0, 1.0])), // constant offset
        (s(vec![0.0, 1.0, 0.0]), s(vec![0.0, 0.0, 0.0])), // single peak
        (s(vec![1.0, 2.0, 3.0, 4.0]), s(vec![1.0, 2.0, 3.0, 4.0])), // identical
        (s(vec![1.0, 2.0, 3.0]), s(vec![3.0, 2.0, 1.0])), // reversed
        (s(vec![0.0, 5.0, 0.0, 5.0]), s(vec![5.0, 0.0, 5.0, 0.0])), // alternating
        (s(vec![1.0]), s(vec![5.0])),                     // single point
        (s(vec![0.0, 0.0, 1.0]), s(vec![1.0, 0.0, 0.0])), // shifted peak
        (s(vec![0.0, 1.0, 2.0, 3.0, 4.0]), s(vec![0.0, 0.0, 0.0, 0.0, 4.0])), // late ramp
        (s(vec![10.0, 10.0, 10.0]), s(vec![10.1, 9.9, 10.0])), // tiny perturbation
        (s(vec![0.0, 3.0, 0.0, 3.0, 0.0]), s(vec![3.0, 0.0, 3.0, 0.0, 3.0])), // opposite phase
    ];

    let expected: Vec<f64> = vec![
        3.0, // [0,0,0] vs [1,1,1]
        1.0, // [0,1,0] vs [0,0,0]
        0.0, // identical
        4.0,  // [1,2,3] vs [3,2,1], warping absorbs most of the reversal
        10.0, // alternating, warping re-pairs the peaks
        4.0, // [1] vs [5]
        2.0, // shifted peak
        4.0, // late ramp
        0.2, // tiny perturbation
        6.0, // opposite phase
    ];

    let dtw = Dtw::unconstrained();
    for (i, ((a, b), &exp)) in pairs.iter().zip(expected.iter()).enumerate() {
        let dist = dtw.distance(a.as_view(), b.as_view()).unwrap().value();
        assert!(
            (dist - exp).abs() < 1e-10,
            "pair {i}: got {dist:.15}, expected {exp:.15}"
        );
    }
}

// ---------------------------------------------------------------------------
// b) squared_metric_distances_match_known_values
// ---------------------------------------------------------------------------

/// Same 10 pairs under the squared-Euclidean metric. The reported value is
/// the raw accumulated cost; no square root is applied.
#[test]
fn squared_metric_distances_match_known_values() {
    let pairs: Vec<(Series, Series)> = vec![
        (s(vec![0.0, 0.0, 0.0]), s(vec![1.0, 1.0, 1.0])),
        (s(vec![0.0, 1.0, 0.0]), s(vec![0.0, 0.0, 0.0])),
        (s(vec![1.0, 2.0, 3.0, 4.0]), s(vec![1.0, 2.0, 3.0, 4.0])),
        (s(vec![1.0, 2.0, 3.0]), s(vec![3.0, 2.0, 1.0])),
        (s(vec![0.0, 5.0, 0.0, 5.0]), s(vec![5.0, 0.0, 5.0, 0.0])),
        (s(vec![1.0]), s(vec![5.0])),
        (s(vec![0.0, 0.0, 1.0]), s(vec![1.0, 0.0, 0.0])),
        (s(vec![0.0, 1.0, 2.0, 3.0, 4.0]), s(vec![0.0, 0.0, 0.0, 0.0, 4.0])),
        (s(vec![10.0, 10.0, 10.0]), s(vec![10.1, 9.9, 10.0])),
        (s(vec![0.0, 3.0, 0.0, 3.0, 0.0]), s(vec![3.0, 0.0, 3.0, 0.0, 3.0])),
    ];

    let expected: Vec<f64> = vec![
        3.0,  // three diagonal cells of squared difference 1
        1.0,  // peak contributes 1 once
        0.0,  // identical
        8.0,  // reversed ramp
        50.0, // alternating
        16.0, // (1-5)^2
        2.0,  // shifted peak
        6.0,  // late ramp
        0.02, // two cells of 0.1^2
        18.0, // opposite phase
    ];

    let dtw = Dtw::unconstrained().with_metric(PointMetric::SquaredEuclidean);
    for (i, ((a, b), &exp)) in pairs.iter().zip(expected.iter()).enumerate() {
        let dist = dtw.distance(a.as_view(), b.as_view()).unwrap().value();
        assert!(
            (dist - exp).abs() < 1e-10,
            "pair {i}: got {dist:.15}, expected {exp:.15}"
        );
    }
}

// ---------------------------------------------------------------------------
// c) band_tightening_is_monotone
// ---------------------------------------------------------------------------

/// Widening a Sakoe-Chiba band never increases the distance, and a band of
/// half-width max(N,M)-1 equals the unconstrained distance.
#[test]
fn band_tightening_is_monotone() {
    let a = s(vec![0.0, 5.0, 0.0, 5.0, 0.0]);
    let b = s(vec![5.0, 0.0, 5.0, 0.0, 5.0]);

    let unconstrained = Dtw::unconstrained()
        .distance(a.as_view(), b.as_view())
        .unwrap()
        .value();

    let at_radius: Vec<f64> = (0..=4)
        .map(|k| {
            Dtw::with_sakoe_chiba(k)
                .distance(a.as_view(), b.as_view())
                .unwrap()
                .value()
        })
        .collect();

    assert!((at_radius[0] - 25.0).abs() < 1e-10, "k=0 forces the diagonal");
    assert!((at_radius[1] - 10.0).abs() < 1e-10);
    assert!((at_radius[4] - unconstrained).abs() < 1e-10);
    for w in at_radius.windows(2) {
        assert!(w[1] <= w[0] + 1e-10, "distance increased as band widened");
    }
}

// ---------------------------------------------------------------------------
// d) scaled_band_handles_rectangular_grids
// ---------------------------------------------------------------------------

/// On an N != M grid the band follows the scaled diagonal, so a small radius
/// still admits a path between the corners.
#[test]
fn scaled_band_handles_rectangular_grids() {
    let a = s(vec![0.0, 1.0, 2.0]);
    let b = s(vec![0.0, 0.5, 1.0, 1.5, 2.0]);
    let dist = Dtw::with_sakoe_chiba(1)
        .distance(a.as_view(), b.as_view())
        .unwrap()
        .value();
    assert!((dist - 1.0).abs() < 1e-10, "got {dist:.15}");
}

// ---------------------------------------------------------------------------
// e) itakura_reference_values
// ---------------------------------------------------------------------------

/// The parallelogram forbids the border-hugging paths that unconstrained DTW
/// uses to absorb step changes for free.
#[test]
fn itakura_reference_values() {
    let cases: Vec<(Series, Series, f64)> = vec![
        (
            s(vec![0.0, 0.0, 0.0, 5.0]),
            s(vec![0.0, 5.0, 5.0, 5.0]),
            10.0,
        ),
        (
            s(vec![0.0, 0.0, 0.0, 0.0, 4.0]),
            s(vec![0.0, 4.0, 4.0, 4.0, 4.0]),
            12.0,
        ),
    ];

    for (i, (a, b, exp)) in cases.iter().enumerate() {
        let unconstrained = Dtw::unconstrained()
            .distance(a.as_view(), b.as_view())
            .unwrap()
            .value();
        let itakura = Dtw::with_itakura()
            .distance(a.as_view(), b.as_view())
            .unwrap()
            .value();
        assert!(
            unconstrained.abs() < 1e-10,
            "case {i}: unconstrained should absorb the step for free"
        );
        assert!(
            (itakura - exp).abs() < 1e-10,
            "case {i}: got {itakura:.15}, expected {exp:.15}"
        );
    }
}

// ---------------------------------------------------------------------------
// f) infeasible_constraints_are_errors
// ---------------------------------------------------------------------------

/// Constraints that disconnect the corners surface as errors, never values.
#[test]
fn infeasible_constraints_are_errors() {
    let cases: Vec<(Dtw, Series, Series)> = vec![
        (
            Dtw::with_sakoe_chiba(0),
            s(vec![1.0, 2.0]),
            s(vec![1.0, 2.0, 3.0]),
        ),
        (
            Dtw::with_sakoe_chiba(0),
            s(vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            s(vec![1.0, 2.0]),
        ),
        (
            Dtw::with_itakura(),
            s(vec![1.0, 2.0]),
            s(vec![1.0, 1.5, 2.0, 2.5]),
        ),
    ];

    for (i, (dtw, a, b)) in cases.iter().enumerate() {
        assert!(
            dtw.distance(a.as_view(), b.as_view()).is_err(),
            "case {i}: expected infeasibility"
        );
        assert!(
            dtw.align(a.as_view(), b.as_view()).is_err(),
            "case {i}: expected infeasibility from align too"
        );
    }
}

// ---------------------------------------------------------------------------
// g) subsequence_reference_values
// ---------------------------------------------------------------------------

/// A query embedded verbatim in a longer reference is located at zero cost,
/// where full DTW pays for the mismatched prefix and suffix.
#[test]
fn subsequence_reference_values() {
    let query = s(vec![2.0, 3.0]);
    let reference = s(vec![10.0, 10.0, 2.0, 3.0, 10.0]);

    let m = subsequence_align(query.as_view(), reference.as_view()).unwrap();
    assert!(m.distance().value().abs() < 1e-10);
    assert_eq!((m.start(), m.end()), (2, 3));

    let full = Dtw::unconstrained()
        .distance(query.as_view(), reference.as_view())
        .unwrap()
        .value();
    assert!((full - 23.0).abs() < 1e-10);
}

// ---------------------------------------------------------------------------
// h) rolling_matches_full_matrix_under_all_constraints
// ---------------------------------------------------------------------------

/// `distance()` (rolling buffer) must match `align().distance()` (dense
/// grid) within 1e-12 for every constraint that admits a path.
#[test]
fn rolling_matches_full_matrix_under_all_constraints() {
    let pairs: Vec<(Series, Series)> = vec![
        (s(vec![1.0, 2.0, 3.0]), s(vec![3.0, 2.0, 1.0])),
        (s(vec![0.0, 5.0, 0.0, 5.0]), s(vec![5.0, 0.0, 5.0, 0.0])),
        (s(vec![1.0, 1.0, 1.0, 1.0, 1.0]), s(vec![2.0, 2.0, 2.0, 2.0, 2.0])),
        (s(vec![0.0, 1.0, 4.0, 9.0]), s(vec![0.0, 2.0, 3.0])),
        (s(vec![10.0, 5.0, 1.0]), s(vec![1.0, 5.0, 10.0, 12.0])),
    ];
    let constraints = [
        WarpConstraint::Unconstrained,
        WarpConstraint::SakoeChiba(1),
        WarpConstraint::SakoeChiba(2),
        WarpConstraint::Itakura,
    ];

    for (i, (a, b)) in pairs.iter().enumerate() {
        for constraint in constraints {
            for metric in [PointMetric::Manhattan, PointMetric::SquaredEuclidean] {
                let dtw = Dtw::with_constraint(constraint).with_metric(metric);
                let d_rolling = dtw.distance(a.as_view(), b.as_view()).unwrap().value();
                let alignment = dtw.align(a.as_view(), b.as_view()).unwrap();
                let d_full = alignment.distance().value();
                assert!(
                    (d_rolling - d_full).abs() < 1e-12,
                    "pair {i} under {constraint}: rolling {d_rolling:.15} != full {d_full:.15}"
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// i) unconstrained_distance_is_symmetric
// ---------------------------------------------------------------------------

/// Swapping the inputs transposes the grid but leaves the distance unchanged.
#[test]
fn unconstrained_distance_is_symmetric() {
    let pairs: Vec<(Series, Series)> = vec![
        (s(vec![0.0, 1.0, 2.0, 3.0]), s(vec![3.0, 2.0, 1.0, 0.0])),
        (s(vec![1.0, 5.0, 1.0, 5.0, 1.0]), s(vec![5.0, 1.0, 5.0])),
        (s(vec![10.0, 0.0, 10.0]), s(vec![0.0, 10.0, 0.0])),
    ];

    let dtw = Dtw::unconstrained();
    for (i, (a, b)) in pairs.iter().enumerate() {
        let forward = dtw.distance(a.as_view(), b.as_view()).unwrap().value();
        let backward = dtw.distance(b.as_view(), a.as_view()).unwrap().value();
        assert!(
            (forward - backward).abs() < 1e-10,
            "pair {i}: {forward:.15} != {backward:.15}"
        );
    }
}

// ---------------------------------------------------------------------------
// j) path_indices_swap_with_inputs
// ---------------------------------------------------------------------------

/// On a pair whose optimal path is unique, aligning (y, x) yields the
/// transposed path of aligning (x, y).
#[test]
fn path_indices_swap_with_inputs() {
    let a = s(vec![0.0, 1.0, 1.0]);
    let b = s(vec![0.0, 1.0]);

    let dtw = Dtw::unconstrained();
    let forward = dtw.align(a.as_view(), b.as_view()).unwrap();
    let backward = dtw.align(b.as_view(), a.as_view()).unwrap();

    let swapped: Vec<(usize, usize)> = forward
        .path()
        .steps()
        .iter()
        .map(|step| (step.y, step.x))
        .collect();
    let backward_steps: Vec<(usize, usize)> = backward
        .path()
        .steps()
        .iter()
        .map(|step| (step.x, step.y))
        .collect();
    assert_eq!(swapped, backward_steps);
}

// ---------------------------------------------------------------------------
// k) metrics_agree_along_shared_optimal_path
// ---------------------------------------------------------------------------

/// The ramp pair has the same optimal path under both metrics; each reported
/// distance must equal the sum of that metric's local costs along the path.
#[test]
fn metrics_agree_along_shared_optimal_path() {
    let a = s(vec![0.0, 1.0, 2.0, 3.0]);
    let b = s(vec![0.0, 2.0, 4.0]);

    let manhattan = Dtw::unconstrained()
        .align(a.as_view(), b.as_view())
        .unwrap();
    let squared = Dtw::unconstrained()
        .with_metric(PointMetric::SquaredEuclidean)
        .align(a.as_view(), b.as_view())
        .unwrap();

    assert_eq!(manhattan.path().steps(), squared.path().steps());

    let along_path = |f: fn(f64) -> f64| -> f64 {
        manhattan
            .path()
            .steps()
            .iter()
            .map(|step| f(a.as_ref()[step.x] - b.as_ref()[step.y]))
            .sum()
    };
    let abs_sum = along_path(f64::abs);
    let sq_sum = along_path(|d| d * d);

    assert!((manhattan.distance().value() - abs_sum).abs() < 1e-12);
    assert!((squared.distance().value() - sq_sum).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// l) trivial_pair_has_zero_distance_and_diagonal_path
// ---------------------------------------------------------------------------

#[test]
fn trivial_pair_has_zero_distance_and_diagonal_path() {
    let a = s(vec![0.0, 0.0]);
    let b = s(vec![0.0, 0.0]);
    let alignment = Dtw::unconstrained()
        .with_metric(PointMetric::SquaredEuclidean)
        .align(a.as_view(), b.as_view())
        .unwrap();
    assert_eq!(alignment.distance().value(), 0.0);
    let steps: Vec<(usize, usize)> = alignment
        .path()
        .steps()
        .iter()
        .map(|step| (step.x, step.y))
        .collect();
    assert_eq!(steps, vec![(0, 0), (1, 1)]);
}
