use abvd_core::cognate::{audit, CognacyValue, CognateError, CognateId, CognateOptions};
use abvd_core::CognateParser;

fn classes(values: &[u32]) -> Vec<CognateId> {
    values.iter().copied().map(CognateId::Class).collect()
}

fn unique(n: usize) -> Vec<CognateId> {
    vec![CognateId::Unique(n)]
}

fn parse(raw: &str) -> Result<Vec<CognateId>, CognateError> {
    CognateParser::new().parse(Some(raw))
}

#[test]
fn test_simple() {
    assert_eq!(parse("1").unwrap(), classes(&[1]));
    assert_eq!(parse("10").unwrap(), classes(&[10]));
    assert_eq!(parse("100").unwrap(), classes(&[100]));
    assert_eq!(parse("111").unwrap(), classes(&[111]));
}

#[test]
fn test_subset() {
    assert_eq!(parse("1,2").unwrap(), classes(&[1, 2]));
    assert_eq!(parse("1   ,   2").unwrap(), classes(&[1, 2]));
    assert_eq!(parse("1,2,3,4,5").unwrap(), classes(&[1, 2, 3, 4, 5]));
    assert_eq!(parse("1, 17, 37").unwrap(), classes(&[1, 17, 37]));
    assert_eq!(parse("1,10,66,67").unwrap(), classes(&[1, 10, 66, 67]));
}

#[test]
fn test_order_and_duplicates_are_kept() {
    assert_eq!(parse("5, 1, 5").unwrap(), classes(&[5, 1, 5]));
}

#[test]
fn test_dot_and_slash_separators() {
    assert_eq!(parse("1.2").unwrap(), classes(&[1, 2]));
    assert_eq!(parse("1/2").unwrap(), classes(&[1, 2]));
    assert_eq!(parse("1, 2/3.4").unwrap(), classes(&[1, 2, 3, 4]));
}

#[test]
fn test_dubious() {
    assert_eq!(parse("1?").unwrap(), unique(1));
    assert_eq!(parse("?").unwrap(), unique(1));
}

#[test]
fn test_dubious_subset() {
    assert_eq!(parse("1, 2?").unwrap(), classes(&[1]));
    assert_eq!(parse("1?, 2").unwrap(), classes(&[2]));
    assert_eq!(parse("91?, 42").unwrap(), classes(&[42]));
    assert_eq!(parse("?, 31").unwrap(), classes(&[31]));
    // every code dubious: no usable code left
    assert_eq!(parse("1?, 2?").unwrap(), unique(1));
}

#[test]
fn test_dubious_with_no_strict() {
    let mut parser = CognateParser::new().strict(false);
    assert_eq!(parser.parse(Some("1?")).unwrap(), classes(&[1]));
    assert_eq!(parser.parse(Some("1, 2?")).unwrap(), classes(&[1, 2]));
    assert_eq!(parser.parse(Some("19, 34?")).unwrap(), classes(&[19, 34]));
}

#[test]
fn test_all_dubious_with_no_strict() {
    let mut parser = CognateParser::new().strict(false);
    assert_eq!(parser.parse(Some("1?, 2?")).unwrap(), classes(&[1, 2]));
    assert_eq!(parser.issued(), 0);
}

#[test]
fn test_bad_entries_uniques() {
    assert_eq!(parse("X").unwrap(), unique(1));
    assert_eq!(parse("x").unwrap(), unique(1));
}

#[test]
fn test_bad_entries_nouniques() {
    let mut parser = CognateParser::new().uniques(false);
    assert_eq!(parser.parse(Some("X")).unwrap(), vec![]);
    assert_eq!(parser.parse(Some("x")).unwrap(), vec![]);
}

#[test]
fn test_s_entries() {
    assert_eq!(parse("s").unwrap(), unique(1));
    assert_eq!(parse("S").unwrap(), unique(1));

    let mut parser = CognateParser::new().uniques(false);
    assert_eq!(parser.parse(Some("s")).unwrap(), vec![]);
}

#[test]
fn test_add_unique() {
    let mut parser = CognateParser::new();
    for n in 1..=4 {
        assert_eq!(parser.parse(Some("")).unwrap(), unique(n));
    }
    assert_eq!(parser.issued(), 4);
}

#[test]
fn test_no_uniques() {
    let mut parser = CognateParser::new().uniques(false);
    for _ in 0..3 {
        assert_eq!(parser.parse(Some("")).unwrap(), vec![]);
    }
    assert_eq!(parser.issued(), 0);
}

#[test]
fn test_null() {
    assert_eq!(CognateParser::new().parse(None).unwrap(), unique(1));
    assert_eq!(CognateParser::new().parse_value(None).unwrap(), unique(1));
}

#[test]
fn test_fresh_parser_restarts_counter() {
    let mut first = CognateParser::new();
    first.parse(None).unwrap();
    first.parse(None).unwrap();

    let mut second = CognateParser::new();
    assert_eq!(second.parse(None).unwrap(), unique(1));
    assert_eq!(first.parse(None).unwrap(), unique(3));
}

#[test]
fn test_bad_cog_alphabetical() {
    assert!(matches!(parse("A"), Err(CognateError::NonNumeric(_))));
    assert!(matches!(parse("1, a"), Err(CognateError::NonNumeric(_))));
    assert!(matches!(parse("1a"), Err(CognateError::NonNumeric(_))));
}

#[test]
fn test_negative_is_not_a_class() {
    assert!(matches!(parse("-1"), Err(CognateError::NonNumeric(_))));
}

#[test]
fn test_class_out_of_range() {
    assert_eq!(
        parse("99999999999").unwrap_err(),
        CognateError::OutOfRange("99999999999".to_string())
    );
    assert!(matches!(parse("1, 4294967296"), Err(CognateError::OutOfRange(_))));
    assert_eq!(parse("4294967295").unwrap(), classes(&[u32::MAX]));

    let mut parser = CognateParser::new().accept_numeric(true);
    let value = CognacyValue::Number(99_999_999_999u64.into());
    assert!(matches!(
        parser.parse_value(Some(&value)),
        Err(CognateError::OutOfRange(_))
    ));
}

#[test]
fn test_leading_comma_is_malformed() {
    assert_eq!(
        parse(",1").unwrap_err(),
        CognateError::Malformed(",1".to_string())
    );
    assert!(matches!(parse("  , 2"), Err(CognateError::Malformed(_))));
}

#[test]
fn test_errors_do_not_advance_counter() {
    let mut parser = CognateParser::new();
    assert!(parser.parse(Some("A")).is_err());
    assert!(parser.parse(Some(",1")).is_err());
    assert_eq!(parser.parse(None).unwrap(), unique(1));
}

#[test]
fn test_check_false() {
    let mut parser = CognateParser::new().check(false);
    assert_eq!(
        parser.parse(Some("A")).unwrap(),
        vec![CognateId::Code("A".to_string())]
    );
    assert_eq!(
        parser.parse(Some("1, a")).unwrap(),
        vec![CognateId::Code("1".to_string()), CognateId::Code("a".to_string())]
    );
    assert_eq!(
        parser.parse(Some("1a")).unwrap(),
        vec![CognateId::Code("1a".to_string())]
    );
}

#[test]
fn test_bad_cog_int() {
    let mut parser = CognateParser::new();
    let value = CognacyValue::Number(1.into());
    assert!(matches!(
        parser.parse_value(Some(&value)),
        Err(CognateError::WrongType { kind: "number", .. })
    ));
}

#[test]
fn test_accept_numeric() {
    let mut parser = CognateParser::new().accept_numeric(true);
    let value = CognacyValue::Number(7.into());
    assert_eq!(parser.parse_value(Some(&value)).unwrap(), classes(&[7]));

    let negative = CognacyValue::Number((-3).into());
    assert!(matches!(
        parser.parse_value(Some(&negative)),
        Err(CognateError::NonNumeric(_))
    ));
}

#[test]
fn test_other_json_values() {
    let mut parser = CognateParser::new();
    let list = CognacyValue::Other(serde_json::json!([1, 2]));
    assert!(matches!(
        parser.parse_value(Some(&list)),
        Err(CognateError::WrongType { kind: "array", .. })
    ));

    let null = CognacyValue::Other(serde_json::Value::Null);
    assert_eq!(parser.parse_value(Some(&null)).unwrap(), unique(1));
}

#[test]
fn test_cognacy_value_from_json() {
    let text: CognacyValue = serde_json::from_str("\"5, 40\"").unwrap();
    assert_eq!(text, CognacyValue::from("5, 40"));

    let number: CognacyValue = serde_json::from_str("12").unwrap();
    assert!(matches!(number, CognacyValue::Number(_)));
}

#[test]
fn test_options_from_toml() {
    let options: CognateOptions = toml::from_str("strict = false\n").unwrap();
    assert!(!options.strict);
    assert!(options.uniques);
    assert!(options.check);
    assert!(!options.accept_numeric);
}

#[test]
fn test_complicated_strict_unique() {
    let mut parser = CognateParser::new().strict(true).uniques(true);
    // 3. right
    assert_eq!(parser.parse(Some("5, 40")).unwrap(), classes(&[5, 40]));
    assert_eq!(parser.parse(Some("5")).unwrap(), classes(&[5]));
    assert_eq!(parser.parse(Some("")).unwrap(), unique(1));

    // 8. turn
    for _ in 0..3 {
        assert_eq!(parser.parse(Some("15")).unwrap(), classes(&[15]));
    }

    // 20. to know
    assert_eq!(parser.parse(Some("52")).unwrap(), classes(&[52]));
    assert_eq!(parser.parse(Some("1")).unwrap(), classes(&[1]));
    assert_eq!(parser.parse(Some("52")).unwrap(), classes(&[52]));
    assert_eq!(parser.parse(Some("")).unwrap(), unique(2));

    // 36. to spit
    assert_eq!(parser.parse(Some("19, 34?")).unwrap(), classes(&[19]));
    assert_eq!(parser.parse(Some("18")).unwrap(), classes(&[18]));
    assert_eq!(parser.parse(Some("19, 34?")).unwrap(), classes(&[19]));
}

#[test]
fn test_complicated_nostrict_unique() {
    let mut parser = CognateParser::new().strict(false).uniques(true);
    assert_eq!(parser.parse(Some("5, 40")).unwrap(), classes(&[5, 40]));
    assert_eq!(parser.parse(Some("5")).unwrap(), classes(&[5]));
    assert_eq!(parser.parse(Some("")).unwrap(), unique(1));

    assert_eq!(parser.parse(Some("52")).unwrap(), classes(&[52]));
    assert_eq!(parser.parse(Some("")).unwrap(), unique(2));

    assert_eq!(parser.parse(Some("19, 34?")).unwrap(), classes(&[19, 34]));
    assert_eq!(parser.parse(Some("18")).unwrap(), classes(&[18]));
}

#[test]
fn test_complicated_nostrict_nounique() {
    let mut parser = CognateParser::new().strict(false).uniques(false);
    assert_eq!(parser.parse(Some("5, 40")).unwrap(), classes(&[5, 40]));
    assert_eq!(parser.parse(Some("")).unwrap(), vec![]);
    assert_eq!(parser.parse(Some("15")).unwrap(), classes(&[15]));
    assert_eq!(parser.parse(Some("")).unwrap(), vec![]);
    assert_eq!(parser.parse(Some("19, 34?")).unwrap(), classes(&[19, 34]));
}

#[test]
fn test_cognate_id_json() {
    let ids = vec![
        CognateId::Class(3),
        CognateId::Unique(2),
        CognateId::Code("a".to_string()),
    ];
    let json = serde_json::to_string(&ids).unwrap();
    assert_eq!(json, r#"[3,"u_2","a"]"#);

    let back: Vec<CognateId> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ids);
}

#[test]
fn test_audit() {
    let report = audit(["1", "5, 40", "19, 34?", "", "A", ",1"]);
    assert_eq!(report.checked, 6);
    assert_eq!(report.good, 4);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].value, "A");
    assert!(report.failures[1].strict.is_err());
    assert!((report.percentage() - 66.666).abs() < 0.01);
}
