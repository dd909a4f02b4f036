#![expect(missing_docs)]
#![expect(clippy::needless_raw_string_hashes)]

use core::fmt::Write;

use jsonpull::{DecoderOptions, factory, parse_str};

fn render_values(text: &str, options: DecoderOptions) -> String {
    let mut out = String::new();
    for (index, item) in parse_str(text, options).enumerate() {
        match item {
            Ok(value) => writeln!(out, "{index}: {value}").unwrap(),
            Err(err) => writeln!(out, "{index}: error: {err}").unwrap(),
        }
    }
    out
}

fn flatten(depth: usize) -> DecoderOptions {
    DecoderOptions {
        flatten_depth: depth,
        ..Default::default()
    }
}

#[test]
fn snapshot_value_sequence() {
    let text = r#"
        {"k": [1, 2.5, {"x": "y"}], "s": "he\"llo"}
        [true, false, null]
        -12 3e2 "tab\tcontrol\u0001"
    "#;
    insta::assert_snapshot!(render_values(text, DecoderOptions::default()), @r#"
    0: {"k":[1,2.5,{"x":"y"}],"s":"he\"llo"}
    1: [true,false,null]
    2: -12
    3: 300.0
    4: "tab\tcontrol\u0001"
    "#);
}

#[test]
fn snapshot_value_debug() {
    let values: Vec<_> = parse_str(r#"{"a": [1, 1.0, "x", null, true]}"#, DecoderOptions::default())
        .collect::<Result<_, _>>()
        .unwrap();
    insta::assert_snapshot!(format!("{values:?}"), @r#"[Object({"a": Array([Int(1), Float(1.0), String("x"), Null, Boolean(true)])})]"#);
}

#[test]
fn snapshot_flattened_stream() {
    let text = r#"[[{"id": 1, "tags": ["a"]}, {"id": 2, "tags": []}, {"id": 3}]]"#;
    insta::assert_snapshot!(render_values(text, flatten(2)), @r#"
    0: {"id":1,"tags":["a"]}
    1: {"id":2,"tags":[]}
    2: {"id":3}
    "#);
}

#[test]
fn snapshot_errors_end_the_stream() {
    insta::assert_snapshot!(render_values("1 [2, 3 4]", DecoderOptions::default()), @r#"
    0: 1
    1: error: decode error: expected ',' or ']', got '4'
    "#);
    insta::assert_snapshot!(render_values("[[1], [2]] ]", flatten(2)), @r#"
    0: 1
    1: error: decode error: expected 2 closing brackets to end the flattened stream
    "#);
    insta::assert_snapshot!(render_values("[[[1], [2]] ]", flatten(2)), @r#"
    0: [1]
    1: [2]
    2: error: decode error: expected 2 closing brackets to end the flattened stream
    "#);
}

#[test]
fn snapshot_duplicate_key_policies() {
    let text = r#"{"a": 1, "b": 2, "a": 3}"#;
    let render = |hook: jsonpull::ObjectPairsHook| {
        render_values(
            text,
            DecoderOptions {
                object_pairs_hook: hook,
                ..Default::default()
            },
        )
    };
    insta::assert_snapshot!(render(factory::last_wins), @r#"0: {"a":3,"b":2}"#);
    insta::assert_snapshot!(render(factory::first_wins), @r#"0: {"a":1,"b":2}"#);
    insta::assert_snapshot!(render(factory::pairs_list), @r#"0: [["a",1],["b",2],["a",3]]"#);
    insta::assert_snapshot!(render(factory::reject_duplicates), @r#"0: error: decode error: duplicate object key "a""#);
}
