/*!
 * Tests for the SubStation Alpha parser
 */

use std::time::Duration;

use cueplay::formats;
use cueplay::subtitle_model::SubtitleFormat;

use crate::common;

/// Test parsing a minimal dialogue line
#[test]
fn test_parse_ssa_withSingleDialogue_shouldParseCue() {
    let payload = "[Events]\n\
                   Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\n\
                   Dialogue: 0,0:00:01.00,0:00:04.00,Default,,0,0,0,,Hello\n";

    let cues = formats::parse(payload, SubtitleFormat::Ssa).unwrap();

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].index, 1);
    assert_eq!(cues[0].start_time, Duration::from_secs(1));
    assert_eq!(cues[0].end_time, Duration::from_secs(4));
    assert_eq!(cues[0].text, "Hello");
}

/// Test centisecond conversion
#[test]
fn test_parse_ssa_withCentiseconds_shouldConvertToMillis() {
    let payload = "[Events]\n\
                   Dialogue: 0,0:00:01.25,0:00:02.75,Default,,0,0,0,,Timed\n";

    let cues = formats::parse(payload, SubtitleFormat::Ssa).unwrap();

    assert_eq!(cues[0].start_time, Duration::from_millis(1250));
    assert_eq!(cues[0].end_time, Duration::from_millis(2750));
}

/// Test that override blocks are stripped entirely
#[test]
fn test_parse_ssa_withOverrideBlocks_shouldStripThem() {
    let payload = "[Events]\n\
                   Dialogue: 0,0:00:01.00,0:00:04.00,Default,,0,0,0,,{\\b1}Bold{\\b0} text\n";

    let cues = formats::parse(payload, SubtitleFormat::Ssa).unwrap();

    assert_eq!(cues[0].text, "Bold text");
    assert!(!cues[0].text.contains('{'));
    assert!(!cues[0].text.contains('}'));
}

/// Test that \N and \n escapes become newlines
#[test]
fn test_parse_ssa_withLineBreakEscapes_shouldConvertToNewlines() {
    let payload = "[Events]\n\
                   Dialogue: 0,0:00:01.00,0:00:04.00,Default,,0,0,0,,First\\NSecond\\nThird\n";

    let cues = formats::parse(payload, SubtitleFormat::Ssa).unwrap();

    assert_eq!(cues[0].text, "First\nSecond\nThird");
}

/// Test that the text field absorbs embedded commas
#[test]
fn test_parse_ssa_withCommasInText_shouldKeepTextIntact() {
    let payload = "[Events]\n\
                   Dialogue: 0,0:00:01.00,0:00:04.00,Default,,0,0,0,,Hello, world, again\n";

    let cues = formats::parse(payload, SubtitleFormat::Ssa).unwrap();

    assert_eq!(cues[0].text, "Hello, world, again");
}

/// Test that a dialogue line with fewer than ten fields is dropped
#[test]
fn test_parse_ssa_withTooFewFields_shouldSkipLine() {
    let payload = "[Events]\n\
                   Dialogue: 0,0:00:01.00,0:00:04.00,Default,Text only\n\
                   Dialogue: 0,0:00:05.00,0:00:06.00,Default,,0,0,0,,Complete\n";

    let cues = formats::parse(payload, SubtitleFormat::Ssa).unwrap();

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "Complete");
}

/// Test that dialogue lines outside the events section are ignored
#[test]
fn test_parse_ssa_withDialogueOutsideEvents_shouldIgnoreIt() {
    let payload = "Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,Outside\n\
                   [Events]\n\
                   Dialogue: 0,0:00:05.00,0:00:06.00,Default,,0,0,0,,Inside\n\
                   [Fonts]\n\
                   Dialogue: 0,0:00:07.00,0:00:08.00,Default,,0,0,0,,After\n";

    let cues = formats::parse(payload, SubtitleFormat::Ssa).unwrap();

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "Inside");
}

/// Test that a dialogue line with a broken time literal is dropped
#[test]
fn test_parse_ssa_withInvalidTime_shouldSkipLine() {
    let payload = "[Events]\n\
                   Dialogue: 0,bogus,0:00:04.00,Default,,0,0,0,,Broken\n\
                   Dialogue: 0,0:00:05.00,0:00:06.00,Default,,0,0,0,,Fine\n";

    let cues = formats::parse(payload, SubtitleFormat::Ssa).unwrap();

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "Fine");
}

/// Test that styles from the styles section are attached by name
#[test]
fn test_parse_ass_withStylesSection_shouldAttachStyle() {
    let cues = formats::parse(common::sample_ass(), SubtitleFormat::Ass).unwrap();

    assert_eq!(cues.len(), 2);
    let style = cues[0].style.as_ref().expect("style should be attached");
    assert_eq!(style.font_name.as_deref(), Some("Arial"));
    assert_eq!(style.font_size, Some(20));
    assert_eq!(style.primary_color.as_deref(), Some("&H00FFFFFF"));
    assert!(style.bold);
    assert!(!style.italic);
    assert_eq!(style.alignment, 2);
}

/// Test that an unknown style name leaves the cue unstyled
#[test]
fn test_parse_ass_withUnknownStyleName_shouldLeaveCueUnstyled() {
    let payload = "[V4+ Styles]\n\
                   Format: Name, Fontname, Fontsize, Bold, Italic, Alignment\n\
                   Style: Default,Arial,20,0,0,2\n\
                   \n\
                   [Events]\n\
                   Dialogue: 0,0:00:01.00,0:00:02.00,Narrator,,0,0,0,,Who am I\n";

    let cues = formats::parse(payload, SubtitleFormat::Ass).unwrap();

    assert_eq!(cues.len(), 1);
    assert!(cues[0].style.is_none());
}

/// Test that indices are assigned sequentially from 1
#[test]
fn test_parse_ssa_withMultipleDialogues_shouldAssignSequentialIndices() {
    let cues = formats::parse(common::sample_ass(), SubtitleFormat::Ass).unwrap();

    assert_eq!(cues[0].index, 1);
    assert_eq!(cues[1].index, 2);
}

/// Test that the SSA and ASS tags share one parser
#[test]
fn test_parse_ssa_andAss_shouldProduceIdenticalCues() {
    let ssa = formats::parse(common::sample_ass(), SubtitleFormat::Ssa).unwrap();
    let ass = formats::parse(common::sample_ass(), SubtitleFormat::Ass).unwrap();

    assert_eq!(ssa, ass);
}
