//! Integration tests for structural and shallow cloning.

#![cfg(feature = "clone")]

use purefn::clone::{StructuralClone, shallow_clone, structural_clone};
use purefn::compose::{Pipeline, lift};
use purefn::value;
use purefn::value::{Mapping, Sequence, Value};
use rstest::rstest;
use std::convert::Infallible;

fn field(value: &Value, key: &str) -> Value {
    value.as_mapping().unwrap().get(key).unwrap()
}

fn element(value: &Value, index: usize) -> Value {
    value.as_sequence().unwrap().get(index).unwrap()
}

// =============================================================================
// Deep copy scenarios
// =============================================================================

#[test]
fn test_nested_push_on_clone_leaves_original() {
    let original = value!({"a": 1, "b": {"c": [1, 2, 3]}});
    let copy = structural_clone(&original);

    field(&field(&copy, "b"), "c")
        .as_sequence()
        .unwrap()
        .push(4);

    assert_eq!(original, value!({"a": 1, "b": {"c": [1, 2, 3]}}));
    assert_eq!(copy, value!({"a": 1, "b": {"c": [1, 2, 3, 4]}}));
}

#[test]
fn test_pure_add_to_score_history() {
    let add_to_score_history = |history: &Value, score: i64| {
        let copy = structural_clone(history);
        copy.as_sequence().unwrap().push(score);
        copy
    };

    let history = value!([11, 22, 33]);
    let first = add_to_score_history(&history, 44);
    let second = add_to_score_history(&history, 44);

    assert_eq!(first, value!([11, 22, 33, 44]));
    assert_eq!(second, value!([11, 22, 33, 44]));
    assert!(!first.same_reference(&second));
    assert_eq!(history, value!([11, 22, 33]));
}

#[test]
fn test_home_score_pipeline_over_cloned_game() {
    let increment_home = |game: Value| {
        let copy = structural_clone(&game);
        let score = field(&copy, "score");
        let home = field(&score, "home").as_integer().unwrap_or(0);
        score.as_mapping().unwrap().insert("home", home + 1);
        copy
    };

    let game = value!({"teams": ["Home", "Away"], "score": {"home": 0, "away": 0}});
    let pipeline: Pipeline<Value, Infallible> = [lift(increment_home), lift(increment_home)]
        .into_iter()
        .collect();

    let result = pipeline.run(game.clone()).unwrap();

    assert_eq!(field(&field(&result, "score"), "home"), Value::from(2));
    assert_eq!(field(&field(&game, "score"), "home"), Value::from(0));
}

#[rstest]
#[case::undefined(value!(undefined))]
#[case::null(value!(null))]
#[case::boolean(value!(true))]
#[case::integer(value!(42))]
#[case::float(value!(2.5))]
#[case::text(value!("Foo"))]
#[case::empty_sequence(value!([]))]
#[case::empty_mapping(value!({}))]
#[case::nested(value!([1, {"a": [null, "x"]}, [[]]]))]
fn test_clone_equals_source(#[case] original: Value) {
    let copy = structural_clone(&original);
    assert_eq!(copy, original);
    assert_eq!(copy.kind(), original.kind());
    assert!(!copy.same_reference(&original));
}

#[rstest]
#[case::nan(f64::NAN)]
#[case::infinity(f64::INFINITY)]
#[case::negative_zero(-0.0)]
fn test_clone_of_special_float_equals_source(#[case] float: f64) {
    let original = Value::sequence([Value::from(float)]);
    assert_eq!(structural_clone(&original), original);
}

// =============================================================================
// Shared structure
// =============================================================================

#[test]
fn test_cycle_through_mapping_and_sequence() {
    let root = Mapping::new();
    let children = Sequence::new();
    root.insert("children", children.clone());
    children.push(root.clone());
    children.push(7);

    let copy = root.structural_clone();
    let copied_children = copy.get("children").unwrap();
    let back = element(&copied_children, 0);

    assert!(back.as_mapping().unwrap().ptr_eq(&copy));
    assert!(!copied_children.as_sequence().unwrap().ptr_eq(&children));

    copied_children.as_sequence().unwrap().push(8);
    assert_eq!(children.len(), 2);
}

#[test]
fn test_cyclic_value_renders_and_compares() {
    let sequence = Sequence::from_iter([Value::from(1)]);
    sequence.push(sequence.clone());
    let original = Value::from(sequence);

    let copy = structural_clone(&original);

    assert_eq!(copy, original);
    assert_eq!(copy.to_string(), "[1, [Circular]]");
}

#[test]
fn test_diamond_shape_is_preserved() {
    let leaf = value!({"count": 0});
    let original = value!({"left": (leaf.clone()), "right": (leaf)});
    let copy = structural_clone(&original);

    let left = field(&copy, "left");
    left.as_mapping().unwrap().insert("count", 1);

    assert_eq!(field(&copy, "right"), value!({"count": 1}));
    assert_eq!(field(&original, "right"), value!({"count": 0}));
}

// =============================================================================
// Shallow copy
// =============================================================================

#[test]
fn test_spread_style_copy_shares_nested_sequence() {
    let original = value!([1, 2, [8, 9, 10]]);
    let copy = shallow_clone(&original);

    copy.as_sequence().unwrap().push(3);
    element(&copy, 2).as_sequence().unwrap().push(5);

    assert_eq!(original, value!([1, 2, [8, 9, 10, 5]]));
    assert_eq!(copy, value!([1, 2, [8, 9, 10, 5], 3]));
}

#[test]
fn test_structural_clone_does_not_share_nested_sequence() {
    let original = value!([1, 2, [8, 9, 10]]);
    let copy = structural_clone(&original);

    element(&copy, 2).as_sequence().unwrap().push(5);

    assert_eq!(original, value!([1, 2, [8, 9, 10]]));
}
