use archivist::{binary, text, Archive, ArchiveError, Describe, ErrorKind, Tag, TagWidth, Variant};
use serde_json::json;

#[derive(Debug, PartialEq, Variant)]
enum Payload {
    #[archive(tag = 1)]
    IntAlt(i32),
    #[archive(tag = 2)]
    StringAlt(String),
}

impl Default for Payload {
    fn default() -> Self {
        Payload::IntAlt(0)
    }
}

#[derive(Debug, Default, PartialEq, Variant)]
enum Signal {
    #[default]
    #[archive(tag = 0)]
    Idle,
    #[archive(tag = 7)]
    Level(Option<u8>),
}

// Same alternatives as `Signal`, declared in the opposite order.
#[derive(Debug, Default, PartialEq, Variant)]
enum SignalReordered {
    #[archive(tag = 7)]
    Level(Option<u8>),
    #[default]
    #[archive(tag = 0)]
    Idle,
}

#[derive(Debug, Default, PartialEq, Variant)]
#[archive(tag_width = "u16")]
enum Wide {
    #[default]
    #[archive(tag = 0)]
    Zero,
    #[archive(tag = 300)]
    Big(u8),
}

#[derive(Debug, Default, PartialEq, Describe)]
struct Envelope {
    id: u16,
    body: Payload,
    history: Vec<Signal>,
}

// ----------------------------------------------------------------------------
// Round trips

#[test]
fn variant_int_alt_through_both_backends() {
    let mut value = Payload::IntAlt(42);

    let bytes = binary::to_bytes(&mut value).unwrap();
    assert_eq!(bytes, vec![1, 0, 0, 0, 42]);
    assert_eq!(binary::from_bytes::<Payload>(&bytes).unwrap(), value);

    let json = text::to_value(&mut value).unwrap();
    assert_eq!(json, json!({"tag": 1, "value": 42}));
    assert_eq!(text::from_value::<Payload>(&json).unwrap(), value);
}

#[test]
fn variant_string_alt_through_both_backends() {
    let mut value = Payload::StringAlt("hi".to_string());

    let bytes = binary::to_bytes(&mut value).unwrap();
    assert_eq!(bytes, vec![2, 0, 0, 0, 2, b'h', b'i']);
    assert_eq!(binary::from_bytes::<Payload>(&bytes).unwrap(), value);

    let out = text::to_string(&mut value).unwrap();
    assert_eq!(out, r#"{"tag":2,"value":"hi"}"#);
    assert_eq!(text::from_str::<Payload>(&out).unwrap(), value);
}

#[test]
fn variant_unit_alternative_has_no_payload() {
    let mut idle = Signal::Idle;
    assert_eq!(binary::to_bytes(&mut idle).unwrap(), vec![0]);
    assert_eq!(text::to_string(&mut idle).unwrap(), r#"{"tag":0}"#);
    assert_eq!(text::from_str::<Signal>(r#"{"tag":0}"#).unwrap(), Signal::Idle);
}

#[test]
fn variant_nested_in_aggregate() {
    let mut envelope = Envelope {
        id: 9,
        body: Payload::StringAlt("x".to_string()),
        history: vec![Signal::Level(Some(3)), Signal::Idle, Signal::Level(None)],
    };

    let json = text::to_value(&mut envelope).unwrap();
    assert_eq!(
        json,
        json!({
            "id": 9,
            "body": {"tag": 2, "value": "x"},
            "history": [{"tag": 7, "value": 3}, {"tag": 0}, {"tag": 7}]
        })
    );
    assert_eq!(text::from_value::<Envelope>(&json).unwrap(), envelope);

    let bytes = binary::to_bytes(&mut envelope).unwrap();
    assert_eq!(
        bytes,
        vec![0, 9, 2, 0, 0, 0, 1, b'x', 0, 0, 0, 3, 7, 1, 3, 0, 7, 0]
    );
    assert_eq!(binary::from_bytes::<Envelope>(&bytes).unwrap(), envelope);
}

// ----------------------------------------------------------------------------
// Discriminants

#[test]
fn variant_tags_do_not_depend_on_declaration_order() {
    assert_eq!(Signal::TAGS, &[0u16, 7]);
    assert_eq!(SignalReordered::TAGS, &[7u16, 0]);

    let cases = [
        (Signal::Idle, SignalReordered::Idle),
        (Signal::Level(Some(5)), SignalReordered::Level(Some(5))),
        (Signal::Level(None), SignalReordered::Level(None)),
    ];
    for (mut a, mut b) in cases {
        assert_eq!(binary::to_bytes(&mut a).unwrap(), binary::to_bytes(&mut b).unwrap());
        assert_eq!(text::to_value(&mut a).unwrap(), text::to_value(&mut b).unwrap());
        let bytes = binary::to_bytes(&mut a).unwrap();
        assert_eq!(binary::from_bytes::<SignalReordered>(&bytes).unwrap(), b);
    }
}

#[test]
fn variant_u16_tag_width() {
    assert_eq!(Wide::TAG_WIDTH, TagWidth::U16);
    let mut big = Wide::Big(5);
    let bytes = binary::to_bytes(&mut big).unwrap();
    assert_eq!(bytes, vec![0x01, 0x2c, 5]);
    assert_eq!(binary::from_bytes::<Wide>(&bytes).unwrap(), big);
    assert_eq!(binary::to_bytes(&mut Wide::Zero).unwrap(), vec![0, 0]);
    assert_eq!(text::to_value(&mut big).unwrap(), json!({"tag": 300, "value": 5}));
}

#[test]
fn variant_unknown_discriminant_matrix() {
    let err = binary::from_bytes::<Payload>(&[9, 0, 0, 0, 1]).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownDiscriminant(9));
    assert!(err.path().is_root());

    let err = text::from_value::<Payload>(&json!({"tag": 9, "value": 1})).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownDiscriminant(9));
    assert_eq!(err.path().to_string(), "$.tag");

    let err = binary::from_bytes::<Envelope>(&[0, 1, 5]).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownDiscriminant(5));
    assert_eq!(err.path().to_string(), "$.body");
}

#[test]
fn variant_text_shape_errors() {
    let err = text::from_value::<Payload>(&json!({"value": 1})).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MissingRequiredKey("tag"));

    let err = text::from_value::<Payload>(&json!({"tag": 1})).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MissingRequiredKey("value"));

    let err = text::from_value::<Payload>(&json!({"tag": 1, "value": "x"})).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::TypeMismatch {
            expected: "i32",
            found: "string"
        }
    );
    assert_eq!(err.path().to_string(), "$.value");

    let err = text::from_value::<Payload>(&json!(1)).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::TypeMismatch { expected: "object", .. }));
}

#[test]
fn variant_truncated_payload() {
    let err = binary::from_bytes::<Payload>(&[1, 0, 0]).unwrap_err();
    assert!(err.is_truncated());
    assert!(binary::from_bytes::<Payload>(&[]).unwrap_err().is_truncated());
}

// ----------------------------------------------------------------------------
// Hand-written impls

#[derive(Debug, Default, PartialEq)]
struct Overflowing;

impl Variant for Overflowing {
    const TAGS: &'static [Tag] = &[256];

    fn tag(&self) -> Tag {
        256
    }

    fn with_tag(tag: Tag) -> Option<Self> {
        (tag == 256).then_some(Overflowing)
    }

    fn describe_payload<A: Archive>(&mut self, _ar: &mut A) -> Result<(), ArchiveError> {
        Ok(())
    }
}
archivist::impl_field!(Overflowing => variant);

#[test]
fn variant_tag_wider_than_declared_width_is_unrepresentable() {
    let err = binary::to_bytes(&mut Overflowing).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Unrepresentable(_)));
    let err = text::to_value(&mut Overflowing).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Unrepresentable(_)));
}
