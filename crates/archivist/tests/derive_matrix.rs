use archivist::{binary, text, Describe, ErrorKind, Variant};
use serde_json::json;

#[derive(Debug, Default, PartialEq, Describe)]
struct Labelled {
    #[archive(rename = "n")]
    name: String,
    r#type: u8,
    #[archive(skip)]
    cache: Vec<u32>,
}

#[derive(Debug, Default, PartialEq, Describe)]
struct Wrapper<T> {
    inner: T,
    extra: Vec<T>,
}

#[derive(Debug, Default, PartialEq, Describe)]
struct Marker;

#[derive(Debug, Default, PartialEq, Describe)]
struct Tree {
    value: i32,
    children: Vec<Tree>,
    parent: Option<Box<Tree>>,
}

#[derive(Debug, Default, PartialEq, Variant)]
enum Tagged<T> {
    #[default]
    #[archive(tag = 3)]
    Empty,
    #[archive(tag = 4)]
    Full(T),
}

#[test]
fn derive_rename_raw_and_skip() {
    let mut value = Labelled {
        name: "a".to_string(),
        r#type: 2,
        cache: vec![1, 2, 3],
    };
    let json = text::to_value(&mut value).unwrap();
    assert_eq!(json, json!({"n": "a", "type": 2}));

    let decoded: Labelled = text::from_value(&json).unwrap();
    assert_eq!(decoded.name, "a");
    assert_eq!(decoded.r#type, 2);
    assert!(decoded.cache.is_empty());

    let bytes = binary::to_bytes(&mut value).unwrap();
    assert_eq!(bytes, vec![0, 0, 0, 1, b'a', 2]);

    let err = text::from_value::<Labelled>(&json!({"name": "a", "type": 2})).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MissingRequiredKey("n"));
}

#[test]
fn derive_generic_aggregate_and_variant() {
    let mut value = Wrapper {
        inner: Tagged::Full(1u8),
        extra: vec![Tagged::Empty, Tagged::Full(2)],
    };
    let out = text::to_string(&mut value).unwrap();
    assert_eq!(
        out,
        r#"{"inner":{"tag":4,"value":1},"extra":[{"tag":3},{"tag":4,"value":2}]}"#
    );
    assert_eq!(text::from_str::<Wrapper<Tagged<u8>>>(&out).unwrap(), value);

    let bytes = binary::to_bytes(&mut value).unwrap();
    assert_eq!(bytes, vec![4, 1, 0, 0, 0, 2, 3, 4, 2]);
    assert_eq!(binary::from_bytes::<Wrapper<Tagged<u8>>>(&bytes).unwrap(), value);
}

#[test]
fn derive_unit_struct_is_empty_aggregate() {
    assert_eq!(text::to_string(&mut Marker).unwrap(), "{}");
    assert!(binary::to_bytes(&mut Marker).unwrap().is_empty());
    assert_eq!(text::from_str::<Marker>("{}").unwrap(), Marker);
}

#[test]
fn derive_recursive_aggregate() {
    let mut tree = Tree {
        value: 1,
        children: vec![Tree {
            value: 2,
            children: Vec::new(),
            parent: None,
        }],
        parent: Some(Box::new(Tree {
            value: 0,
            ..Tree::default()
        })),
    };
    let json = text::to_value(&mut tree).unwrap();
    assert_eq!(
        json,
        json!({
            "value": 1,
            "children": [{"value": 2, "children": []}],
            "parent": {"value": 0, "children": []}
        })
    );
    assert_eq!(text::from_value::<Tree>(&json).unwrap(), tree);

    let bytes = binary::to_bytes(&mut tree).unwrap();
    assert_eq!(binary::from_bytes::<Tree>(&bytes).unwrap(), tree);

    let bad = json!({"value": 1, "children": [{"value": 2, "children": [{"children": []}]}]});
    let err = text::from_value::<Tree>(&bad).unwrap_err();
    assert_eq!(err.path().to_string(), "$.children[0].children[0].value");
}
