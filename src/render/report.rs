use std::path::Path;

use chrono::{DateTime, Local};
use lopdf::{
    content::{Content, Operation},
    dictionary, Object,
};

use crate::emissions::{EmissionBreakdown, SuggestionSet};

use super::artifact::{Artifact, ArtifactKind};
use super::error::RenderError;
use super::page::{PageSize, SinglePageDocument};

const DOCUMENT_TITLE: &str = "Emission Numbers and Suggestions";
const HEADING: &str = "Carbon Footprint Report";
const RULE: &str = "-------------------------------------------------------------";
const CLOSING_NOTE: &str = "For a detailed analysis and customized reduction strategies, please consult with our sustainability experts.";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SUGGESTION_MARKER: &str = "- ";

const FONT_SIZE: i64 = 12;
const LEADING: i64 = 14;
const TEXT_LEFT: i64 = 40;
const TEXT_TOP: i64 = 750;
const WRAP_COLUMNS: usize = 88;
const BOTTOM_MARGIN: i64 = 40;
const MAX_PRINTED_LINES: usize = ((TEXT_TOP - BOTTOM_MARGIN) / LEADING) as usize + 1;
const OVERFLOW_MARKER: &str = "...";

#[derive(Debug, Clone)]
pub struct ReportContext {
    pub client_name: String,
    pub generated_at: DateTime<Local>,
}

/// The report body, one entry per printed line before wrapping.
pub(crate) fn report_lines(
    breakdown: &EmissionBreakdown,
    suggestions: &SuggestionSet,
    context: &ReportContext,
) -> Vec<String> {
    let mut lines = vec![
        HEADING.to_string(),
        String::new(),
        format!("Client: {}", context.client_name),
        String::new(),
        format!("Date: {}", context.generated_at.format(TIMESTAMP_FORMAT)),
        RULE.to_string(),
        format!("Energy Emissions: {:.2} tons of CO2", breakdown.energy()),
        format!("Material Emissions: {:.2} tons of CO2", breakdown.material()),
        format!("Waste Emissions: {:.2} tons of CO2", breakdown.waste()),
        format!("Shipping Emissions: {:.2} tons of CO2", breakdown.shipping()),
        String::new(),
        format!("Total Carbon Footprint: {:.2} tons of CO2", breakdown.total()),
        RULE.to_string(),
        "Suggestions for Reduction:".to_string(),
    ];

    lines.extend(
        suggestions
            .iter()
            .map(|suggestion| format!("{}{}", SUGGESTION_MARKER, suggestion)),
    );
    lines.push(String::new());
    lines.push(CLOSING_NOTE.to_string());

    lines
}

/// Greedy word wrap; words longer than `columns` are left intact.
fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    if line.chars().count() <= columns {
        return vec![line.to_string()];
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > columns && !current.is_empty() {
            wrapped.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        wrapped.push(current);
    }

    wrapped
}

/// Wrapped page lines, cut off with a marker once the bottom margin is reached.
pub(crate) fn page_lines(lines: &[String]) -> Vec<String> {
    let mut printed: Vec<String> = lines
        .iter()
        .flat_map(|line| wrap_line(line, WRAP_COLUMNS))
        .collect();

    if printed.len() > MAX_PRINTED_LINES {
        log::warn!(
            "report_truncated lines={} max_lines={}",
            printed.len(),
            MAX_PRINTED_LINES
        );
        printed.truncate(MAX_PRINTED_LINES - 1);
        printed.push(OVERFLOW_MARKER.to_string());
    }

    printed
}

/// Helvetica here uses WinAnsiEncoding: Latin-1 outside 0x80..=0x9F, plus the
/// Windows-1252 punctuation in that range.
fn win_ansi_byte(character: char) -> u8 {
    match character {
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => match u8::try_from(u32::from(character)) {
            Ok(byte) if !(0x80..=0x9F).contains(&byte) => byte,
            _ => b'?',
        },
    }
}

fn win_ansi_bytes(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

pub fn render_report(
    breakdown: &EmissionBreakdown,
    suggestions: &SuggestionSet,
    context: &ReportContext,
    destination: &Path,
) -> Result<Artifact, RenderError> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
        Operation::new("TL", vec![LEADING.into()]),
        Operation::new("Td", vec![TEXT_LEFT.into(), TEXT_TOP.into()]),
    ];

    for printed in page_lines(&report_lines(breakdown, suggestions, context)) {
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(win_ansi_bytes(&printed))],
        ));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    let mut page = SinglePageDocument::new(DOCUMENT_TITLE);
    let font_id = page.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources = dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    };

    page.write(
        PageSize::LETTER,
        resources,
        Content { operations },
        destination,
    )?;

    Ok(Artifact::new(ArtifactKind::Report, destination))
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};
    use lopdf::{content::Content, Document};

    use super::{
        page_lines, render_report, report_lines, win_ansi_bytes, wrap_line, ReportContext,
        MAX_PRINTED_LINES,
    };
    use crate::emissions::{EmissionBreakdown, SuggestionEngine};
    use crate::render::ArtifactKind;

    fn context() -> ReportContext {
        ReportContext {
            client_name: "Acme Steel".to_string(),
            generated_at: Local
                .with_ymd_and_hms(2024, 5, 17, 9, 30, 5)
                .single()
                .expect("unambiguous local time"),
        }
    }

    fn scenario() -> EmissionBreakdown {
        EmissionBreakdown::from_parts(2.0, 2.0, 2.0, 0.5)
    }

    #[test]
    fn lines_carry_rounded_values_and_context() {
        let breakdown = EmissionBreakdown::from_parts(0.123, 1.005, 2.0, 0.0);
        let suggestions = SuggestionEngine::new(1.0).suggest(&breakdown);
        let lines = report_lines(&breakdown, &suggestions, &context());

        assert_eq!(lines[0], "Carbon Footprint Report");
        assert!(lines.contains(&"Client: Acme Steel".to_string()));
        assert!(lines.contains(&"Date: 2024-05-17 09:30:05".to_string()));
        assert!(lines.contains(&"Energy Emissions: 0.12 tons of CO2".to_string()));
        assert!(lines.contains(&"Waste Emissions: 2.00 tons of CO2".to_string()));
        assert!(lines.contains(&"Shipping Emissions: 0.00 tons of CO2".to_string()));
        assert!(lines
            .iter()
            .any(|line| line.starts_with("Total Carbon Footprint: 3.1")));
    }

    #[test]
    fn suggestions_follow_heading_in_order_with_marker() {
        let breakdown = scenario();
        let suggestions = SuggestionEngine::new(1.0).suggest(&breakdown);
        let lines = report_lines(&breakdown, &suggestions, &context());

        let heading = lines
            .iter()
            .position(|line| line == "Suggestions for Reduction:")
            .expect("suggestion heading");
        let rendered: Vec<&String> = lines[heading + 1..heading + 1 + suggestions.len()]
            .iter()
            .collect();

        assert_eq!(rendered.len(), 5);
        for (line, suggestion) in rendered.iter().zip(suggestions.iter()) {
            assert_eq!(**line, format!("- {}", suggestion));
        }
        assert!(lines
            .iter()
            .any(|line| line == "Total Carbon Footprint: 6.50 tons of CO2"));
    }

    #[test]
    fn wraps_long_lines_on_word_boundaries() {
        let wrapped = wrap_line("alpha beta gamma delta", 11);
        assert_eq!(wrapped, vec!["alpha beta", "gamma delta"]);
        assert_eq!(wrap_line("short", 11), vec!["short"]);
        assert_eq!(wrap_line("", 11), vec![""]);
    }

    #[test]
    fn non_latin_characters_are_replaced() {
        assert_eq!(win_ansi_bytes("Café"), vec![b'C', b'a', b'f', 0xE9]);
        assert_eq!(win_ansi_bytes("工厂"), vec![b'?', b'?']);
    }

    #[test]
    fn windows_punctuation_maps_into_the_c1_range() {
        assert_eq!(win_ansi_bytes("€ — ™"), vec![0x80, b' ', 0x97, b' ', 0x99]);
        assert_eq!(win_ansi_bytes("\u{0085}\u{0096}"), vec![b'?', b'?']);
    }

    #[test]
    fn overlong_report_is_cut_at_the_bottom_margin() {
        let breakdown = scenario();
        let suggestions = SuggestionEngine::new(1.0).suggest(&breakdown);
        let mut long_context = context();
        long_context.client_name = "Acme ".repeat(2000);

        let printed = page_lines(&report_lines(&breakdown, &suggestions, &long_context));
        assert_eq!(printed.len(), MAX_PRINTED_LINES);
        assert_eq!(printed.last().map(String::as_str), Some("..."));

        let short = page_lines(&report_lines(&breakdown, &suggestions, &context()));
        assert!(short.len() < MAX_PRINTED_LINES);
        assert!(short
            .last()
            .is_some_and(|line| line.starts_with("For a detailed analysis")));
    }

    #[test]
    fn writes_one_letter_page_with_report_text() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("report.pdf");
        let breakdown = scenario();
        let suggestions = SuggestionEngine::new(1.0).suggest(&breakdown);

        let artifact =
            render_report(&breakdown, &suggestions, &context(), &path).expect("report renders");
        assert_eq!(artifact.kind(), ArtifactKind::Report);
        assert_eq!(artifact.path(), path.as_path());

        let document = Document::load(&path).expect("report should load");
        let pages = document.get_pages();
        assert_eq!(pages.len(), 1);

        let page_id = pages.values().next().copied().expect("one page");
        let raw = document.get_page_content(page_id).expect("page content");
        let content = Content::decode(&raw).expect("content decodes");
        let text: Vec<String> = content
            .operations
            .iter()
            .filter(|operation| operation.operator == "Tj")
            .filter_map(|operation| operation.operands.first())
            .filter_map(|operand| operand.as_str().ok())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect();

        assert!(text.contains(&"Client: Acme Steel".to_string()));
        assert!(text.contains(&"Total Carbon Footprint: 6.50 tons of CO2".to_string()));
        assert!(text
            .iter()
            .any(|line| line.starts_with("For a detailed analysis")));
    }
}
