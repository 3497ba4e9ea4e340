/*!
 * Integration tests for subtitle processing workflow
 */

use anyhow::Result;

use subtidy::app_config::Config;
use subtidy::app_controller::Controller;
use subtidy::subtitle_processor::{Dialect, SubtitleCollection};
use subtidy::{load_cc, load_subtitles, split_into_groups, NameDictionary, SubtitleEntry};
use crate::common::{self, BILINGUAL_CANONICAL};

/// Test that canonical text survives split, parse and serialize unchanged
#[test]
fn test_round_trip_withCanonicalText_shouldReproduceInput() -> Result<()> {
    let collection = load_subtitles(BILINGUAL_CANONICAL)?;
    assert_eq!(collection.len(), 3);
    assert_eq!(collection.to_string(), BILINGUAL_CANONICAL);

    // Same content with LF line endings only converges to the canonical form
    let unix = BILINGUAL_CANONICAL.replace("\r\n", "\n");
    assert_eq!(load_subtitles(&unix)?.to_string(), BILINGUAL_CANONICAL);
    Ok(())
}

/// Test the group to entry mapping of a canonical document
#[test]
fn test_load_subtitles_withCanonicalText_shouldMapFields() -> Result<()> {
    let collection = load_subtitles(BILINGUAL_CANONICAL)?;
    let expected = vec![
        SubtitleEntry::new("1", "00:00:01,000 --> 00:00:04,000")
            .with_primary("Hello there.")
            .with_secondary("你好。"),
        SubtitleEntry::new("2", "00:00:05,000 --> 00:00:09,000").with_secondary("只有中文"),
        SubtitleEntry::new("3", "00:00:10,000 --> 00:00:14,000"),
    ];
    assert_eq!(collection.entries, expected);
    assert_eq!(split_into_groups(BILINGUAL_CANONICAL).len(), expected.len());
    Ok(())
}

/// Test that reformatting twice changes nothing more
#[test]
fn test_reformat_withMessyInput_shouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "messy.srt")?;
    let content = std::fs::read_to_string(path)?;

    let once = load_subtitles(&content)?.reformat().to_string();
    let twice = load_subtitles(&once)?.reformat().to_string();
    assert_eq!(once, twice);
    Ok(())
}

/// Test the full bilingual pipeline with names and renumbering
#[test]
fn test_process_text_withNamesAndRenumber_shouldProduceCleanOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_subtitle(temp_dir.path(), "messy.srt")?;
    let content = std::fs::read_to_string(path)?;

    let mut config = Config::default();
    config.renumber = true;
    config.names = NameDictionary::from_pairs([("Sheldon", "谢尔顿"), ("Leonard", "莱纳德")]);
    let controller = Controller::with_config(config)?;

    let output = controller.process_text(&content)?;
    assert_eq!(
        output,
        "1\r\n00:00:01,000 --> 00:00:04,000\r\n谢尔顿: Hello there.\r\n谢尔顿：你好。\r\n\r\n\
         2\r\n00:00:05,000 --> 00:00:09,000\r\n莱纳德: Hi.\r\n莱纳德：嗨。\r\n\r\n"
    );
    Ok(())
}

/// Test the raw caption pipeline merges wrapped lines
#[test]
fn test_process_text_withRawCaptions_shouldMergeLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_cc(temp_dir.path(), "captions.srt")?;
    let content = std::fs::read_to_string(path)?;

    let config = Config { dialect: Dialect::RawCaption, ..Config::default() };
    let output = Controller::with_config(config)?.process_text(&content)?;
    assert_eq!(
        output,
        "1\r\n00:00:01,000 --> 00:00:04,000\r\nThis is a caption split over lines\r\n\r\n\
         2\r\n00:00:05,000 --> 00:00:09,000\r\nSecond caption\r\n\r\n"
    );
    assert_eq!(load_cc(&content)?.len(), 2);
    Ok(())
}

/// Test that a malformed document aborts the pipeline with the parse error
#[test]
fn test_process_text_withTooManyLines_shouldFail() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    let err = controller
        .process_text("1\n00:01\nA\nB\nC\n")
        .unwrap_err();

    assert!(err.to_string().contains("Failed to parse bilingual subtitles"));
    assert!(matches!(
        err.downcast_ref::<subtidy::SubtitleError>(),
        Some(subtidy::SubtitleError::TooManyLines { .. })
    ));
    Ok(())
}

/// Test that transforms return new collections in the same dialect
#[test]
fn test_transforms_withCollection_shouldKeepDialect() -> Result<()> {
    let collection = SubtitleCollection::from_cc("5\n00:05\nx\ny\n")?;
    let renumbered = collection.clone().renumber();
    assert_eq!(collection.entries[0].index, "5");
    assert_eq!(renumbered.entries[0].index, "1");
    assert_eq!(renumbered.dialect, Dialect::RawCaption);
    Ok(())
}
