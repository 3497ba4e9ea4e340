/*!
 * Tests for splitting subtitle text into entry groups
 */

use subtidy::formatter::{split_into_groups, EOL};

/// Test that empty input produces no groups
#[test]
fn test_split_into_groups_withEmptyText_shouldReturnEmpty() {
    assert!(split_into_groups("").is_empty());
}

/// Test that N well formed entries produce N groups
#[test]
fn test_split_into_groups_withWellFormedEntries_shouldPreserveCount() {
    for count in [1usize, 2, 7, 30] {
        let text: String = (1..=count)
            .map(|i| format!("{i}\n00:00:{i:02},000 --> 00:00:{i:02},500\nLine {i}\n\n"))
            .collect();
        let groups = split_into_groups(&text);
        assert_eq!(groups.len(), count, "wrong group count for {count} entries");
        assert!(groups[count - 1].starts_with(&format!("{count}\n")));
    }
}

/// Test that the last group is kept even without a trailing blank line
#[test]
fn test_split_into_groups_withoutTrailingNewline_shouldKeepLastGroup() {
    let groups = split_into_groups("1\n00:01\nA\n\n2\n00:02\nB");
    assert_eq!(groups, vec!["1\n00:01\nA", "2\n00:02\nB"]);
}

/// Test that every line ending style is normalized
#[test]
fn test_split_into_groups_withMixedLineEndings_shouldNormalize() {
    let text = format!("1{EOL}00:01{EOL}A{EOL}{EOL}2\r00:02\rB\r\r3\n00:03\nC\n");
    let groups = split_into_groups(&text);
    assert_eq!(groups, vec!["1\n00:01\nA", "2\n00:02\nB", "3\n00:03\nC"]);
}

/// Test that padding around index lines and before line breaks is removed
#[test]
fn test_split_into_groups_withPaddedLines_shouldStripSpaces() {
    let groups = split_into_groups("1\n00:01\nA\n\n  12  \n00:02 \nHello  \nWorld\t\n");
    assert_eq!(groups[1], "12\n00:02\nHello\nWorld");
}

/// Test that the first group keeps interior padding and loses trailing whitespace
#[test]
fn test_split_into_groups_withFirstGroup_shouldOnlyTrimEnd() {
    let groups = split_into_groups("1\n00:01  \nA \n\t\n\n");
    assert_eq!(groups, vec!["1\n00:01  \nA"]);
}

/// Test that text ahead of the first index line forms its own group
#[test]
fn test_split_into_groups_withPreamble_shouldFormFirstGroup() {
    let groups = split_into_groups("WEBVTT\n\n1\n00:01\nA\n");
    assert_eq!(groups, vec!["WEBVTT", "1\n00:01\nA"]);
}

/// Test that lines mixing digits and other characters are not boundaries
#[test]
fn test_split_into_groups_withNonDigitLines_shouldNotSplit() {
    let groups = split_into_groups("1\n00:01\n2 cats\n3rd\n");
    assert_eq!(groups, vec!["1\n00:01\n2 cats\n3rd"]);
}
