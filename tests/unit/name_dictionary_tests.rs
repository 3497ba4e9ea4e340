/*!
 * Tests for the name dictionary
 */

use subtidy::errors::SubtitleError;
use subtidy::name_dictionary::NameDictionary;

/// Test parsing the line based format
#[test]
fn test_parse_withValidLines_shouldBuildDictionary() {
    let text = "# cast\nSheldon=谢尔顿\r\n  Howard  =  霍华德  \n\nBazinga=\n";
    let names = NameDictionary::parse(text).unwrap();
    assert_eq!(names.len(), 3);
    assert_eq!(names.get("Howard"), Some("霍华德"));
    assert_eq!(names.get("Bazinga"), Some(""));
}

/// Test that duplicated sources keep the last mapping
#[test]
fn test_parse_withDuplicateSource_shouldKeepLast() {
    let names = NameDictionary::parse("Raj=A\nRaj=拉杰").unwrap();
    assert_eq!(names.get("Raj"), Some("拉杰"));
}

/// Test that a line without separator is rejected
#[test]
fn test_parse_withoutSeparator_shouldFail() {
    let err = NameDictionary::parse("\nSheldon\n").unwrap_err();
    assert_eq!(err, SubtitleError::InvalidDictionaryLine { line_number: 2, line: "Sheldon".to_string() });
}

/// Test that an empty target removes the token
#[test]
fn test_translate_withEmptyTarget_shouldRemoveToken() {
    let names = NameDictionary::parse("(laughs) =").unwrap();
    assert_eq!(names.translate("(laughs) Okay"), " Okay");
}

/// Test that an empty dictionary leaves text untouched
#[test]
fn test_translate_withEmptyDictionary_shouldReturnInput() {
    let names = NameDictionary::new();
    assert!(names.is_empty());
    assert_eq!(names.translate("Leonard: hi"), "Leonard: hi");
}

/// Test that regex metacharacters in sources are matched literally
#[test]
fn test_translate_withSpecialCharacters_shouldMatchLiterally() {
    let names = NameDictionary::from_pairs([("Dr. K", "K博士"), ("a+b", "ab")]);
    assert_eq!(names.translate("Dr. K says a+b, DrX K"), "K博士 says ab, DrX K");
}

/// Test merging dictionaries
#[test]
fn test_extend_withOverlap_shouldPreferOther() {
    let mut names = NameDictionary::from_pairs([("Amy", "艾米"), ("Bernadette", "伯纳黛特")]);
    names.extend(&NameDictionary::from_pairs([("Amy", "艾咪")]));
    assert_eq!(names.len(), 2);
    assert_eq!(names.translate("Amy Bernadette"), "艾咪 伯纳黛特");
}
