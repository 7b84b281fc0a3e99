//! Write-map construction tests: generic container and JSON object into a
//! bridge write map, the draining variant, and the unsupported-value policy.
use bridge_transcode::{
    drain_into_write_map, dynamic_to_write_map, json_to_write_map, read_map_to_dynamic,
    read_map_to_json, BridgeArray, BridgeMap, Dynamic, DynamicMap, ReadableArray, ReadableMap,
    ReadableType, TranscodeError, TranscodeOptions, Transcoder, UnsupportedPolicy,
};
use serde_json::{json, Value};

// ============================================================================
// Helpers
// ============================================================================

fn dynamic_map(pairs: Vec<(&str, Dynamic)>) -> DynamicMap {
    pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect()
}

fn skipping() -> Transcoder {
    Transcoder::new(TranscodeOptions {
        on_unsupported: UnsupportedPolicy::Skip,
        ..TranscodeOptions::default()
    })
}

// ============================================================================
// Generic container -> bridge write map
// ============================================================================

#[test]
fn writes_each_scalar_with_its_setter() {
    let input = dynamic_map(vec![
        ("n", Dynamic::Null),
        ("b", Dynamic::Bool(true)),
        ("d", Dynamic::Double(1.25)),
        ("i", Dynamic::Int(42)),
        ("s", Dynamic::from("text")),
    ]);
    let map: BridgeMap = dynamic_to_write_map(&input).unwrap();

    assert_eq!(map.len(), 5);
    assert!(map.is_null("n"));
    assert_eq!(map.get_boolean("b"), Ok(true));
    assert_eq!(map.get_double("d"), Ok(1.25));
    assert!(!map.is_int("d"));
    assert!(map.is_int("i"));
    assert_eq!(map.get_int("i"), Ok(42));
    assert_eq!(map.get_string("s"), Ok("text"));
}

#[test]
fn writes_nested_maps_and_arrays() {
    let leaf = dynamic_map(vec![("k", Dynamic::from("v"))]);
    let input = dynamic_map(vec![(
        "outer",
        Dynamic::Map(dynamic_map(vec![(
            "list",
            Dynamic::Array(vec![Dynamic::Map(leaf), Dynamic::Int(7), Dynamic::Null]),
        )])),
    )]);
    let map: BridgeMap = dynamic_to_write_map(&input).unwrap();

    let outer = map.get_map("outer").unwrap();
    let list = outer.get_array("list").unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list.get_type(0), Ok(ReadableType::Map));
    assert_eq!(list.get_map(0).unwrap().get_string("k"), Ok("v"));
    assert!(list.is_int(1));
    assert_eq!(list.get_type(2), Ok(ReadableType::Null));
}

#[test]
fn borrowed_conversion_leaves_input_intact() {
    let input = dynamic_map(vec![("a", Dynamic::Bool(false))]);
    let _: BridgeMap = dynamic_to_write_map(&input).unwrap();
    assert_eq!(input.len(), 1);
}

#[test]
fn drain_empties_the_input() {
    let mut input = dynamic_map(vec![
        ("a", Dynamic::Bool(false)),
        ("b", Dynamic::Map(dynamic_map(vec![("c", Dynamic::Null)]))),
    ]);
    let map: BridgeMap = drain_into_write_map(&mut input).unwrap();
    assert!(input.is_empty());
    assert_eq!(map.len(), 2);
    assert!(map.get_map("b").unwrap().is_null("c"));
}

#[test]
fn drain_empties_the_input_even_on_error() {
    let mut input = dynamic_map(vec![("big", Dynamic::Int(i64::MAX))]);
    let result: Result<BridgeMap, _> = drain_into_write_map(&mut input);
    assert!(result.is_err());
    assert!(input.is_empty());
}

// ============================================================================
// Unsupported values
// ============================================================================

#[test]
fn out_of_range_int_is_rejected_by_default() {
    let input = dynamic_map(vec![
        ("ok", Dynamic::Int(1)),
        ("nested", Dynamic::Map(dynamic_map(vec![("big", Dynamic::Int(1 << 40))]))),
    ]);
    let err = dynamic_to_write_map::<BridgeMap>(&input).unwrap_err();
    match err {
        TranscodeError::Unsupported { path, reason } => {
            assert_eq!(path, "nested.big");
            assert!(reason.contains("1099511627776"), "reason: {reason}");
        }
        other => panic!("expected Unsupported, got {other:?}"),
    }
}

#[test]
fn out_of_range_int_is_skipped_under_skip_policy() {
    let input = dynamic_map(vec![
        ("ok", Dynamic::Int(1)),
        ("big", Dynamic::Int(i64::from(i32::MAX) + 1)),
        ("small", Dynamic::Int(i64::from(i32::MIN))),
    ]);
    let map: BridgeMap = skipping().dynamic_to_write_map(&input).unwrap();
    assert_eq!(map.len(), 2);
    assert!(!map.has_key("big"));
    assert_eq!(map.get_int("small"), Ok(i32::MIN));
}

#[test]
fn skipped_array_element_shifts_later_elements() {
    let input = dynamic_map(vec![(
        "xs",
        Dynamic::Array(vec![Dynamic::Int(1), Dynamic::Int(i64::MIN), Dynamic::Int(3)]),
    )]);
    let map: BridgeMap = skipping().dynamic_to_write_map(&input).unwrap();
    let xs: &BridgeArray = map.get_array("xs").unwrap();
    assert_eq!(xs.len(), 2);
    assert_eq!(xs.get_int(1), Ok(3));
}

// ============================================================================
// Round trips through the bridge
// ============================================================================

#[test]
fn write_then_read_roundtrips_doubles_and_scalars() {
    let input = dynamic_map(vec![
        ("n", Dynamic::Null),
        ("b", Dynamic::Bool(true)),
        ("d", Dynamic::Double(-3.75)),
        ("s", Dynamic::from("")),
        (
            "m",
            Dynamic::Map(dynamic_map(vec![(
                "xs",
                Dynamic::Array(vec![Dynamic::Double(0.5), Dynamic::from("y")]),
            )])),
        ),
    ]);
    let map: BridgeMap = dynamic_to_write_map(&input).unwrap();
    let back = read_map_to_dynamic(&map).unwrap();
    assert_eq!(back, input);
}

#[test]
fn ints_come_back_as_doubles() {
    let input = dynamic_map(vec![("i", Dynamic::Int(9))]);
    let map: BridgeMap = dynamic_to_write_map(&input).unwrap();
    let back = read_map_to_dynamic(&map).unwrap();
    assert_eq!(back["i"], Dynamic::Double(9.0));
}

// ============================================================================
// JSON object -> bridge write map
// ============================================================================

#[test]
fn json_small_ints_use_put_int() {
    let input = json!({"small": 12, "big": 3_000_000_000i64, "f": 0.5});
    let map: BridgeMap = json_to_write_map(input.as_object().unwrap()).unwrap();
    assert!(map.is_int("small"));
    assert!(!map.is_int("big"));
    assert_eq!(map.get_double("big"), Ok(3_000_000_000.0));
    assert_eq!(map.get_double("f"), Ok(0.5));
}

#[test]
fn json_to_write_map_then_back_to_json() {
    let input = json!({
        "a": true,
        "b": {"c": 3.5, "list": ["x", null, {"deep": false}]},
        "d": null
    });
    let map: BridgeMap = json_to_write_map(input.as_object().unwrap()).unwrap();
    let back = read_map_to_json(&map).unwrap();
    assert_eq!(Value::Object(back), input);
}

// ============================================================================
// Depth limit
// ============================================================================

#[test]
fn depth_limit_applies_to_write_maps() {
    let shallow = Transcoder::new(TranscodeOptions {
        max_depth: 2,
        ..TranscodeOptions::default()
    });
    let two_levels = dynamic_map(vec![("a", Dynamic::Map(DynamicMap::new()))]);
    assert!(shallow.dynamic_to_write_map::<BridgeMap>(&two_levels).is_ok());

    let three_levels = dynamic_map(vec![(
        "a",
        Dynamic::Map(dynamic_map(vec![("b", Dynamic::Array(vec![]))])),
    )]);
    let err = shallow
        .dynamic_to_write_map::<BridgeMap>(&three_levels)
        .unwrap_err();
    assert!(matches!(err, TranscodeError::DepthLimit { limit: 2 }));
}
