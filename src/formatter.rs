/*!
 * Splitting of raw subtitle text into per-entry groups.
 *
 * A group starts at every line made only of digits (optionally padded with
 * spaces). Whatever precedes the first such line forms the first group.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Line break used for canonical output
pub const EOL: &str = "\r\n";

// @const: Any carriage-return based line ending
static LINE_ENDING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n?").unwrap());

// @const: Index line opening the next group, captured with its line feed
static GROUP_BOUNDARY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n *([0-9]+ *\n)").unwrap());

// @const: Padding in front of a line feed
static LINE_PADDING_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r" *\n").unwrap());

/// Split a subtitle document into raw groups, one per entry, in source order.
///
/// Line endings are normalized to `\n` before splitting. Each group has its
/// trailing whitespace removed; the index line of every group after the first
/// has its spaces removed, and spaces before line breaks inside a group are
/// dropped.
pub fn split_into_groups(text: &str) -> Vec<String> {
    let normalized = LINE_ENDING_REGEX.replace_all(text, "\n");

    let mut groups = Vec::new();
    let mut last_end = 0;
    let mut buffer: Option<String> = None;

    for caps in GROUP_BOUNDARY_REGEX.captures_iter(&normalized) {
        // Both groups always participate in a match
        let (Some(whole), Some(index_line)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let segment = &normalized[last_end..whole.start()];
        let finished = match buffer.take() {
            // Text before the first boundary is the first group, kept as is
            None => segment.to_string(),
            Some(mut current) => {
                current.push_str(&strip_line_padding(segment));
                current
            }
        };
        push_group(&mut groups, finished);

        buffer = Some(index_line.as_str().replace(' ', ""));
        last_end = whole.end();
    }

    let tail = &normalized[last_end..];
    let last = match buffer {
        None => tail.to_string(),
        Some(mut current) => {
            current.push_str(&strip_line_padding(tail));
            current
        }
    };
    push_group(&mut groups, last);

    debug!("Split subtitle text into {} group(s)", groups.len());
    groups
}

fn strip_line_padding(segment: &str) -> String {
    LINE_PADDING_REGEX.replace_all(segment, "\n").into_owned()
}

fn push_group(groups: &mut Vec<String>, group: String) {
    let trimmed = group.trim_end();
    // Only the leading group can be blank; later groups always hold an index
    if trimmed.is_empty() && groups.is_empty() {
        return;
    }
    groups.push(trimmed.to_string());
}
