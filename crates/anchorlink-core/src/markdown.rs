use std::collections::BTreeMap;

use crate::models::{DocumentMetadata, Heading, Section, SectionKind};

/// Computes the structural metadata of a markdown document: headings,
/// blank-line separated sections, and trailing `^id` block anchors.
///
/// Line-based on purpose; the search path only needs spans and anchor
/// positions, not an AST. Fenced code blocks are kept whole: inside a fence
/// nothing is a heading and blank lines do not split sections.
#[must_use]
pub fn scan_metadata(content: &str) -> DocumentMetadata {
    let mut headings = Vec::new();
    let mut sections = Vec::new();

    let mut offset = 0usize;
    let mut in_fence = false;
    let mut open: Option<(usize, usize)> = None;
    let mut last_line_end = (0usize, 0usize);

    for (line_no, line) in content.split('\n').enumerate() {
        let line_end = offset + line.len();
        let trimmed = line.trim();

        if is_fence_delimiter(trimmed) {
            in_fence = !in_fence;
        }

        if !in_fence && trimmed.is_empty() {
            if let Some((start_line, start_offset)) = open.take() {
                sections.push(Section {
                    kind: SectionKind::Content,
                    start_line,
                    end_line: last_line_end.0,
                    start_offset,
                    end_offset: last_line_end.1,
                });
            }
        } else if !in_fence && let Some(heading) = parse_heading(line, line_no) {
            if let Some((start_line, start_offset)) = open.take() {
                sections.push(Section {
                    kind: SectionKind::Content,
                    start_line,
                    end_line: last_line_end.0,
                    start_offset,
                    end_offset: last_line_end.1,
                });
            }
            sections.push(Section {
                kind: SectionKind::Heading,
                start_line: line_no,
                end_line: line_no,
                start_offset: offset,
                end_offset: line_end,
            });
            headings.push(heading);
        } else if (!trimmed.is_empty() || in_fence) && open.is_none() {
            open = Some((line_no, offset));
        }

        if !trimmed.is_empty() {
            last_line_end = (line_no, line_end);
        }
        offset = line_end + 1;
    }

    if let Some((start_line, start_offset)) = open {
        sections.push(Section {
            kind: SectionKind::Content,
            start_line,
            end_line: last_line_end.0,
            start_offset,
            end_offset: last_line_end.1,
        });
    }

    let blocks = collect_block_anchors(content, &sections);

    DocumentMetadata {
        headings,
        sections,
        blocks,
    }
}

fn is_fence_delimiter(trimmed: &str) -> bool {
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}

fn parse_heading(line: &str, line_no: usize) -> Option<Heading> {
    if !line.starts_with('#') {
        return None;
    }
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    let text = rest.trim();
    if text.is_empty() {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "level is bounded to 1..=6 above"
    )]
    let level = level as u8;
    Some(Heading {
        text: text.to_string(),
        level,
        line: line_no,
    })
}

/// Maps every trailing `^id` marker to the end line of its section.
fn collect_block_anchors(content: &str, sections: &[Section]) -> BTreeMap<String, usize> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut blocks = BTreeMap::new();
    for section in sections {
        if section.kind != SectionKind::Content {
            continue;
        }
        let Some(last_line) = lines.get(section.end_line) else {
            continue;
        };
        if let Some(id) = trailing_block_id(last_line.trim_end_matches('\r')) {
            blocks.insert(id.to_string(), section.end_line);
        }
    }
    blocks
}

fn trailing_block_id(line: &str) -> Option<&str> {
    let last_word = line.trim_end().rsplit(char::is_whitespace).next()?;
    let id = last_word.strip_prefix('^')?;
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return None;
    }
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_records_headings_with_level_and_line() {
        let metadata = scan_metadata("# Title\n\ntext\n\n## Sub Title\nmore");
        assert_eq!(metadata.headings.len(), 2);
        assert_eq!(metadata.headings[0].text, "Title");
        assert_eq!(metadata.headings[0].level, 1);
        assert_eq!(metadata.headings[0].line, 0);
        assert_eq!(metadata.headings[1].text, "Sub Title");
        assert_eq!(metadata.headings[1].level, 2);
        assert_eq!(metadata.headings[1].line, 4);
    }

    #[test]
    fn scan_splits_content_sections_on_blank_lines() {
        let content = "first para line one\nline two\n\nsecond para";
        let metadata = scan_metadata(content);
        let spans: Vec<&str> = metadata
            .sections
            .iter()
            .map(|s| &content[s.start_offset..s.end_offset])
            .collect();
        assert_eq!(spans, vec!["first para line one\nline two", "second para"]);
    }

    #[test]
    fn scan_separates_heading_sections_from_content() {
        let metadata = scan_metadata("# Title\nbody under the title");
        assert_eq!(metadata.sections.len(), 2);
        assert_eq!(metadata.sections[0].kind, SectionKind::Heading);
        assert_eq!(metadata.sections[1].kind, SectionKind::Content);
        assert_eq!(metadata.sections[1].start_line, 1);
    }

    #[test]
    fn scan_keeps_fenced_code_blocks_whole() {
        let content = "```\n# not a heading\n\nstill the same block\n```\nafter";
        let metadata = scan_metadata(content);
        assert!(metadata.headings.is_empty());
        assert_eq!(metadata.sections.len(), 1);
        assert_eq!(metadata.sections[0].end_line, 5);
    }

    #[test]
    fn scan_maps_trailing_block_anchor_to_section_end_line() {
        let metadata = scan_metadata("some paragraph text ^quote1\n\nplain block");
        assert_eq!(metadata.blocks.get("quote1"), Some(&0));
        assert_eq!(metadata.blocks.len(), 1);
    }

    #[test]
    fn scan_ignores_malformed_anchor_markers() {
        let metadata = scan_metadata("caret alone ^\nmid ^id word tail");
        assert!(metadata.blocks.is_empty());
    }

    #[test]
    fn scan_of_empty_content_yields_no_structure() {
        let metadata = scan_metadata("");
        assert!(metadata.headings.is_empty());
        assert!(metadata.sections.is_empty());
        assert!(metadata.blocks.is_empty());
    }
}
