//! Property tests: the engines stay sorted, equal to each other, and
//! serializable under arbitrary operation sequences.

use proptest::prelude::*;
use tabfn::function::binary;
use tabfn::{ArrayTabulatedFunction, LinkedTabulatedFunction, Point, TabulatedFunction};

/// Strictly increasing point sets with tolerance-sized gaps guaranteed.
fn strictly_increasing_points() -> impl Strategy<Value = Vec<Point>> {
    (2usize..12, -100.0f64..100.0)
        .prop_flat_map(|(count, start)| {
            (
                Just(start),
                proptest::collection::vec(1e-3f64..10.0, count - 1),
                proptest::collection::vec(-50.0f64..50.0, count),
            )
        })
        .prop_map(|(start, gaps, ys)| {
            let mut x = start;
            let mut xs = vec![x];
            for gap in gaps {
                x += gap;
                xs.push(x);
            }
            xs.into_iter()
                .zip(ys)
                .map(|(x, y)| Point::new(x, y))
                .collect()
        })
}

/// A mutation to replay against both engines.
#[derive(Debug, Clone)]
enum Operation {
    Insert(f64, f64),
    Delete(usize),
    SetY(usize, f64),
    SetX(usize, f64),
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    let operation = prop_oneof![
        (-150.0f64..150.0, -10.0f64..10.0).prop_map(|(x, y)| Operation::Insert(x, y)),
        (0usize..16).prop_map(Operation::Delete),
        (0usize..16, -10.0f64..10.0).prop_map(|(index, y)| Operation::SetY(index, y)),
        (0usize..16, -150.0f64..150.0).prop_map(|(index, x)| Operation::SetX(index, x)),
    ];
    proptest::collection::vec(operation, 0..24)
}

fn apply<F: TabulatedFunction>(function: &mut F, operation: &Operation) -> Result<(), u8> {
    // Collapse errors to their discriminant so the two engines can be
    // compared on outcome, not message.
    let result = match *operation {
        Operation::Insert(x, y) => function.insert(Point::new(x, y)),
        Operation::Delete(index) => function.delete(index),
        Operation::SetY(index, y) => function.set_y(index, y),
        Operation::SetX(index, x) => function.set_x(index, x),
    };
    result.map_err(|error| match error {
        tabfn::FunctionError::IndexOutOfRange { .. } => 0,
        tabfn::FunctionError::OutOfDomainPoint { .. } => 1,
        tabfn::FunctionError::DuplicateX { .. } => 2,
        tabfn::FunctionError::MinimumSizeViolation { .. } => 3,
        _ => 4,
    })
}

fn assert_sorted<F: TabulatedFunction>(function: &F) {
    for index in 0..function.point_count() - 1 {
        let here = function.x_at(index).unwrap();
        let next = function.x_at(index + 1).unwrap();
        assert!(here < next, "x[{index}] = {here} not below x[{}] = {next}", index + 1);
    }
}

proptest! {
    #[test]
    fn construction_accepts_any_sorted_set(points in strictly_increasing_points()) {
        let array = ArrayTabulatedFunction::from_points(points.clone()).unwrap();
        let linked = LinkedTabulatedFunction::from_points(points).unwrap();
        prop_assert!(array.approx_eq(&linked));
    }

    #[test]
    fn engines_agree_under_any_operation_sequence(
        points in strictly_increasing_points(),
        operations in operations(),
    ) {
        let mut array = ArrayTabulatedFunction::from_points(points.clone()).unwrap();
        let mut linked = LinkedTabulatedFunction::from_points(points).unwrap();

        for operation in &operations {
            let from_array = apply(&mut array, operation);
            let from_linked = apply(&mut linked, operation);
            prop_assert_eq!(from_array, from_linked, "diverged on {:?}", operation);
            prop_assert!(array.approx_eq(&linked));
            assert_sorted(&array);
            assert_sorted(&linked);
        }

        prop_assert_eq!(array.stable_hash(), linked.stable_hash());
    }

    #[test]
    fn round_trip_is_lossless(points in strictly_increasing_points()) {
        let original = LinkedTabulatedFunction::from_points(points).unwrap();
        let mut bytes = Vec::new();
        binary::write(&original, &mut bytes).unwrap();
        let restored = ArrayTabulatedFunction::read_from(&mut bytes.as_slice()).unwrap();
        prop_assert!(restored.approx_eq(&original));
    }

    #[test]
    fn evaluation_stays_inside_sample_envelope(
        points in strictly_increasing_points(),
        fraction in 0.0f64..1.0,
    ) {
        use tabfn::Function;

        let function = ArrayTabulatedFunction::from_points(points.clone()).unwrap();
        let x = (function.left_border()
            + fraction * (function.right_border() - function.left_border()))
        .min(function.right_border());
        let value = function.value_at(x);

        let low = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let high = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        // Linear interpolation never leaves the convex hull of the samples.
        prop_assert!(value >= low - 1e-9 && value <= high + 1e-9);
    }
}
