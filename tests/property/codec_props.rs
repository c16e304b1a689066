//! Property-based tests for the CSV codec
//!
//! Exercises tokenization, decoding and encoding over generated lines and
//! records.

use proptest::prelude::*;
use std::collections::BTreeMap;

use csv_codec::codec::{CsvCodec, Tokenizer, TypeTag, MESSAGE_FIELD, PARSE_FAILURE_TAG};
use csv_codec::config::CodecConfig;
use csv_codec::record::{Record, Value};

/// Strategy for plain field values: no separator, quote or line break
fn plain_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ._-]{1,12}".prop_map(|s| s)
}

/// Strategy for field values that need quoting
fn special_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Values with separators
        "[a-zA-Z0-9]{0,5},[a-zA-Z0-9]{0,5}".prop_map(|s| s),
        // Values with quotes
        "[a-zA-Z0-9]{0,5}\"[a-zA-Z0-9]{0,5}\"".prop_map(|s| s),
        // Values with line breaks
        "[a-zA-Z0-9]{0,5}\n[a-zA-Z0-9]{0,5}".prop_map(|s| s),
        "[a-zA-Z0-9]{0,5}\r\n[a-zA-Z0-9]{0,5}".prop_map(|s| s),
        Just(r#"{"key": "value, with comma"}"#.to_string()),
    ]
}

/// Strategy for any field value, possibly empty
fn any_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        plain_value_strategy(),
        special_value_strategy(),
        Just(String::new()),
    ]
}

/// Strategy for records with autogenerated column names and string values
fn plain_record_strategy() -> impl Strategy<Value = Record> {
    prop::collection::vec(plain_value_strategy(), 1..8).prop_map(|values| {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (format!("column{}", i + 1), v))
            .collect()
    })
}

/// Strategy for lines of arbitrary text, including stray quotes
fn arbitrary_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z,\" ]{0,30}".prop_map(|s| s),
        ".{0,40}".prop_map(|s| s),
    ]
}

fn codec(config: CodecConfig) -> CsvCodec {
    CsvCodec::new(&config).expect("valid config")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Joining fields and splitting the result gives the fields back,
    // whatever separators, quotes or line breaks they contain.
    #[test]
    fn property_join_then_tokenize_roundtrip(
        fields in prop::collection::vec(any_value_strategy(), 2..8)
    ) {
        let tokenizer = Tokenizer::default();
        let line = tokenizer.join(&fields).expect("join should succeed");
        prop_assert!(line.ends_with('\n'));

        let split = tokenizer.tokenize(&line).expect("joined line should tokenize");
        prop_assert_eq!(split, fields);
    }

    // Same round trip with a semicolon separator and a single-quote quote character.
    #[test]
    fn property_join_then_tokenize_custom_dialect(
        fields in prop::collection::vec("[a-z;',\"]{0,8}", 2..6)
    ) {
        let tokenizer = Tokenizer::new(b';', Some(b'\''));
        let line = tokenizer.join(&fields).expect("join should succeed");
        let split = tokenizer.tokenize(&line).expect("joined line should tokenize");
        prop_assert_eq!(split, fields);
    }

    // Encoding a string-only record and decoding the line reproduces the record.
    #[test]
    fn property_record_roundtrip(record in plain_record_strategy()) {
        let mut encoder = codec(CodecConfig::default());
        let mut decoder = codec(CodecConfig::default());

        let lines = encoder.encode(&record).expect("encode should succeed");
        prop_assert_eq!(lines.len(), 1);

        let decoded = decoder.decode(&lines[0]).expect("a record");
        prop_assert_eq!(decoded, record);
    }

    // With configured columns on both sides, the round trip also holds for
    // values that need quoting.
    #[test]
    fn property_record_roundtrip_configured_columns(
        values in prop::collection::vec(special_value_strategy(), 1..6)
    ) {
        let columns: Vec<String> = (0..values.len()).map(|i| format!("field_{}", i)).collect();
        let config = CodecConfig { columns: columns.clone(), ..Default::default() };
        let record: Record = columns.iter().cloned().zip(values).collect();

        let lines = codec(config.clone()).encode(&record).expect("encode should succeed");
        let decoded = codec(config).decode(&lines[0]).expect("a record");
        prop_assert_eq!(decoded, record);
    }

    // With quoting disabled and a semicolon separator, records of plain or
    // empty values still round trip. A lone empty field has no quoted form
    // and comes back as an empty line, which decodes to an empty record.
    #[test]
    fn property_record_roundtrip_quote_disabled(
        values in prop::collection::vec(
            prop_oneof![plain_value_strategy(), Just(String::new())],
            1..6,
        )
    ) {
        let config = CodecConfig {
            separator: ";".to_string(),
            quote_char: None,
            ..Default::default()
        };
        let record: Record = values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("column{}", i + 1), v.clone()))
            .collect();

        let lines = codec(config.clone()).encode(&record).expect("encode should succeed");
        prop_assert_eq!(lines.len(), 1);
        prop_assert!(!lines[0].contains('"'));

        let decoded = codec(config).decode(&lines[0]).expect("a record");
        if values.len() == 1 && values[0].is_empty() {
            prop_assert_eq!(lines[0].as_str(), "\n");
            prop_assert!(decoded.is_empty());
        } else {
            prop_assert_eq!(decoded, record);
        }
    }

    // Decoding never fails: every line yields a record, and a line that
    // cannot be parsed comes back verbatim in a tagged fallback record.
    #[test]
    fn property_decode_always_yields_record(line in arbitrary_line_strategy()) {
        let mut codec = codec(CodecConfig::default());
        let record = codec.decode(&line).expect("decode yields a record without a header");

        if record.has_tag(PARSE_FAILURE_TAG) {
            prop_assert_eq!(record.get(MESSAGE_FIELD), Some(&Value::from(line.as_str())));
            prop_assert_eq!(codec.stats().decode.parse_failures, 1);
        } else {
            prop_assert_eq!(codec.stats().decode.parse_failures, 0);
        }
    }

    // With skip_empty_columns, no decoded field holds an empty string.
    #[test]
    fn property_skip_empty_columns(
        fields in prop::collection::vec(prop_oneof![plain_value_strategy(), Just(String::new())], 2..10)
    ) {
        let line = Tokenizer::default().join(&fields).expect("join should succeed");
        let mut codec = codec(CodecConfig { skip_empty_columns: true, ..Default::default() });
        let record = codec.decode(&line).expect("a record");

        let non_empty = fields.iter().filter(|f| !f.is_empty()).count();
        prop_assert_eq!(record.len(), non_empty);
        for (_, value) in record.iter() {
            prop_assert_ne!(value, &Value::from(""));
        }
    }

    // An integer conversion yields the integer for any i64.
    #[test]
    fn property_integer_conversion(n in any::<i64>(), label in plain_value_strategy()) {
        let config = CodecConfig {
            convert: BTreeMap::from([("column1".to_string(), TypeTag::Integer)]),
            ..Default::default()
        };
        let mut codec = codec(config);
        let record = codec.decode(&format!("{},{}", n, label)).expect("a record");

        prop_assert_eq!(record.get("column1"), Some(&Value::Integer(n)));
        prop_assert_eq!(record.get("column2"), Some(&Value::from(label.as_str())));
    }

    // Encoding N records with headers enabled writes one header line and N data lines.
    #[test]
    fn property_header_emitted_once(
        records in prop::collection::vec(plain_record_strategy(), 1..10)
    ) {
        let mut codec = codec(CodecConfig { include_headers: true, ..Default::default() });

        let mut lines = Vec::new();
        for (i, record) in records.iter().enumerate() {
            let out = codec.encode(record).expect("encode should succeed");
            prop_assert_eq!(out.len(), if i == 0 { 2 } else { 1 });
            lines.extend(out);
        }

        prop_assert_eq!(lines.len(), records.len() + 1);
        let header: Vec<&str> = records[0].names().collect();
        prop_assert_eq!(lines[0].clone(), format!("{}\n", header.join(",")));
    }

    // After a reset the next line always becomes the new header.
    #[test]
    fn property_reset_redefines_header(
        first in prop::collection::vec("[a-z]{1,6}", 1..5),
        second in prop::collection::vec("[A-Z]{1,6}", 1..5),
    ) {
        let tokenizer = Tokenizer::default();
        let mut codec = codec(CodecConfig { autodetect_column_names: true, ..Default::default() });

        prop_assert!(codec.decode(&tokenizer.join(&first).unwrap()).is_none());
        codec.reset();
        prop_assert!(codec.decode(&tokenizer.join(&second).unwrap()).is_none());

        let row: Vec<String> = (0..second.len()).map(|i| i.to_string()).collect();
        let record = codec.decode(&tokenizer.join(&row).unwrap()).expect("a record");
        for name in record.names() {
            prop_assert!(second.iter().any(|s| s == name));
        }
    }
}
