use archivist::binary::BinaryOptions;
use archivist::codecs::{BinaryCodec, Codecs, Format, TextCodec, ValueCodec};
use archivist::text::TextOptions;
use archivist::{Describe, ErrorKind, Field, Variant};

#[derive(Debug, Default, PartialEq, Variant)]
enum Role {
    #[default]
    #[archive(tag = 1)]
    Guest,
    #[archive(tag = 2)]
    Admin(String),
}

#[derive(Debug, Default, PartialEq, Describe)]
struct Account {
    id: u64,
    roles: Vec<Role>,
    quota: Option<f64>,
}

fn sample() -> Account {
    Account {
        id: 77,
        roles: vec![Role::Guest, Role::Admin("ops".to_string())],
        quota: Some(0.5),
    }
}

fn round_trip<C: ValueCodec, T: Field + PartialEq + std::fmt::Debug>(codec: &C, mut value: T) {
    let bytes = codec.encode(&mut value).unwrap();
    let decoded: T = codec.decode(&bytes).unwrap();
    assert_eq!(decoded, value, "{}", codec.id());
}

#[test]
fn codecs_format_identity_matrix() {
    let codecs = Codecs::new();
    assert_eq!(codecs.text.id(), "json");
    assert_eq!(codecs.text.format(), Format::Text);
    assert_eq!(codecs.binary.id(), "binary");
    assert_eq!(codecs.binary.format(), Format::Binary);
    assert_eq!(Format::Text.id(), codecs.text.id());
}

#[test]
fn codecs_round_trip_matrix() {
    let codecs = Codecs::new();
    round_trip(&codecs.text, sample());
    round_trip(&codecs.binary, sample());
    round_trip(&codecs.text, Account::default());
    round_trip(&codecs.binary, Account::default());
    round_trip(&codecs.binary, vec![Some(true), None]);
}

#[test]
fn codecs_dispatch_by_runtime_format() {
    let codecs = Codecs::new();
    let text = codecs.encode(Format::Text, &mut sample()).unwrap();
    assert_eq!(
        String::from_utf8(text.clone()).unwrap(),
        r#"{"id":77,"roles":[{"tag":1},{"tag":2,"value":"ops"}],"quota":0.5}"#
    );
    let binary = codecs.encode(Format::Binary, &mut sample()).unwrap();
    assert_ne!(text, binary);
    for (format, bytes) in [(Format::Text, text), (Format::Binary, binary)] {
        assert_eq!(codecs.decode::<Account>(format, &bytes).unwrap(), sample());
    }
}

#[test]
fn codecs_carry_their_options() {
    let codecs = Codecs {
        text: TextCodec::with_options(TextOptions::new().with_null_for_absent(true)),
        binary: BinaryCodec::with_options(BinaryOptions::new().with_max_len(1)),
    };
    let mut account = Account::default();
    let text = codecs.encode(Format::Text, &mut account).unwrap();
    assert_eq!(text, br#"{"id":0,"roles":[],"quota":null}"#.to_vec());

    let err = codecs.encode(Format::Binary, &mut sample()).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::Unrepresentable(_)));
    assert_eq!(err.path().to_string(), "$.roles");
}

#[test]
fn codecs_decode_errors_matrix() {
    let codecs = Codecs::new();
    let err = codecs.decode::<Account>(Format::Text, b"\xff").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MalformedInput(_)));
    let err = codecs.decode::<Account>(Format::Text, b"{").unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MalformedInput(_)));
    let err = codecs.decode::<Account>(Format::Binary, &[0; 3]).unwrap_err();
    assert!(err.is_truncated());
}
