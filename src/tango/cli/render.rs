//! Terminal output for entry tables and command messages.
//!
//! Columns are laid out by display width, not char count: kanji and kana take
//! two cells each. Color is applied only when `use_color` is set, so the
//! `render_*` functions can be tested on plain text.

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use std::io::IsTerminal;
use tango::api::{CmdMessage, MessageLevel};
use tango::config::{TangoConfig, CONFIG_KEYS};
use tango::index::ListedEntry;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NUMBER_WIDTH: usize = 5;
const KANJI_WIDTH: usize = 12;
const HIRAGANA_WIDTH: usize = 16;
const ROMAJI_WIDTH: usize = 18;
const VIETNAMESE_WIDTH: usize = 28;
const TIME_WIDTH: usize = 14;

fn stdout_color() -> bool {
    std::io::stdout().is_terminal()
}

fn paint(text: &str, use_color: bool, style: fn(&str) -> ColoredString) -> String {
    if use_color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

pub fn print_entry_list(entries: &[ListedEntry], total: usize) {
    print!("{}", render_entry_list(entries, total, stdout_color()));
}

pub fn render_entry_list(entries: &[ListedEntry], total: usize, use_color: bool) -> String {
    if entries.is_empty() {
        return format!("No words found. (Total words: {})\n", total);
    }

    let mut out = String::new();
    for listed in entries {
        let entry = &listed.entry;
        let number = format!("{:>width$}. ", listed.display_number(), width = NUMBER_WIDTH - 2);
        let added = entry.date_added.map(format_time_ago).unwrap_or_default();

        out.push_str(&paint(&number, use_color, |s| s.yellow()));
        out.push_str(&paint(&pad_to_width(&entry.kanji, KANJI_WIDTH), use_color, |s| s.bold()));
        out.push_str(&pad_to_width(&entry.hiragana, HIRAGANA_WIDTH));
        out.push_str(&paint(&pad_to_width(&entry.romaji, ROMAJI_WIDTH), use_color, |s| s.cyan()));
        out.push_str(&pad_to_width(&entry.vietnamese, VIETNAMESE_WIDTH));
        out.push_str(&paint(
            &format!("{:>width$}", added, width = TIME_WIDTH),
            use_color,
            |s| s.dimmed(),
        ));
        out.push('\n');
    }

    let summary = if entries.len() == total {
        format!("Total words: {}", total)
    } else {
        format!("Showing {} of {} words", entries.len(), total)
    };
    out.push('\n');
    out.push_str(&paint(&summary, use_color, |s| s.dimmed()));
    out.push('\n');
    out
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages, stdout_color()));
}

pub fn render_messages(messages: &[CmdMessage], use_color: bool) -> String {
    let mut out = String::new();
    for message in messages {
        let styled = match message.level {
            MessageLevel::Info => paint(&message.content, use_color, |s| s.dimmed()),
            MessageLevel::Success => paint(&message.content, use_color, |s| s.green()),
            MessageLevel::Warning => paint(&message.content, use_color, |s| s.yellow()),
            MessageLevel::Error => paint(&message.content, use_color, |s| s.red()),
        };
        out.push_str(&styled);
        out.push('\n');
    }
    out
}

pub fn print_config(config: &TangoConfig) {
    print!("{}", render_config(config));
}

pub fn render_config(config: &TangoConfig) -> String {
    CONFIG_KEYS
        .iter()
        .map(|key| format!("{} = {}\n", key, config.get(key).unwrap_or_default()))
        .collect()
}

/// Truncate with an ellipsis, then right-pad with spaces to exactly `width` cells.
fn pad_to_width(s: &str, width: usize) -> String {
    let text = if s.width() >= width {
        truncate_to_width(s, width.saturating_sub(1))
    } else {
        s.to_string()
    };
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tango::model::VocabularyEntry;

    fn listed(position: usize, entry: VocabularyEntry) -> ListedEntry {
        ListedEntry { position, entry }
    }

    #[test]
    fn test_render_empty_list() {
        let output = render_entry_list(&[], 34, false);
        assert_eq!(output.trim(), "No words found. (Total words: 34)");
    }

    #[test]
    fn test_render_rows_use_display_numbers() {
        let entries = vec![
            listed(0, VocabularyEntry::new("食べます", "たべます", "tabemasu", "ăn")),
            listed(1, VocabularyEntry::new("飲みます", "のみます", "nomimasu", "uống")),
        ];
        let output = render_entry_list(&entries, 2, false);
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("  1. 食べます"));
        assert!(lines[1].starts_with("  2. 飲みます"));
        assert!(output.contains("Total words: 2"));
    }

    #[test]
    fn test_render_filtered_summary() {
        let entries = vec![listed(
            4,
            VocabularyEntry::new("", "ありがとう", "arigatou", "cảm ơn"),
        )];
        let output = render_entry_list(&entries, 10, false);
        assert!(output.contains("  5. "));
        assert!(output.contains("Showing 1 of 10 words"));
    }

    #[test]
    fn test_columns_align_for_wide_characters() {
        let entries = vec![
            listed(0, VocabularyEntry::new("男", "おとこ", "otoko", "đàn ông")),
            listed(1, VocabularyEntry::new("", "すみません", "sumimasen", "xin lỗi")),
        ];
        let output = render_entry_list(&entries, 2, false);
        let lines: Vec<&str> = output.lines().collect();
        let romaji_col = |line: &str, word: &str| line[..line.find(word).unwrap()].width();
        assert_eq!(romaji_col(lines[0], "otoko"), romaji_col(lines[1], "sumimasen"));
    }

    #[test]
    fn test_pad_to_width_truncates_long_text() {
        let padded = pad_to_width("しょうがっこうのせんせい", 10);
        assert_eq!(padded.width(), 10);
        assert!(padded.contains('…'));
        assert_eq!(pad_to_width("ab", 4), "ab  ");
    }

    #[test]
    fn test_render_messages_plain() {
        let messages = vec![CmdMessage::success("Added 3: 男"), CmdMessage::warning("careful")];
        assert_eq!(render_messages(&messages, false), "Added 3: 男\ncareful\n");
    }

    #[test]
    fn test_render_config_lists_every_key() {
        let output = render_config(&TangoConfig::default());
        assert!(output.contains("search_type = romaji"));
        assert!(output.contains("export_file = vocabularies.json"));
        assert!(output.contains("readings_file = \n"));
    }
}
