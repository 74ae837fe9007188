use crate::models::{BlockPosition, ContentUnit, DocumentMetadata, SectionKind, UnitKind};

/// Yields every scorable unit of one document: one unit per heading and one
/// per non-empty content section.
///
/// Heading units link through the heading text itself. Block units link
/// through an existing `^id` anchor when one ends on the section's last
/// line; otherwise they carry the position needed to attach an anchor later,
/// so exactly one of `link_target` / `position` is set.
#[must_use]
pub fn extract_units(metadata: &DocumentMetadata, content: &str) -> Vec<ContentUnit> {
    let mut units = Vec::new();

    for heading in &metadata.headings {
        units.push(ContentUnit {
            kind: UnitKind::Heading,
            text: heading.text.clone(),
            link_target: heading.text.clone(),
            position: None,
        });
    }

    for section in &metadata.sections {
        if section.kind == SectionKind::Heading {
            continue;
        }
        // Metadata can come from an external provider; a span that does not
        // fall on char boundaries of this content is stale and skipped.
        let Some(section_text) = content.get(section.start_offset..section.end_offset) else {
            continue;
        };
        if section_text.trim().is_empty() {
            continue;
        }

        let block_id = metadata
            .blocks
            .iter()
            .find(|(_, end_line)| **end_line == section.end_line)
            .map(|(id, _)| id.clone());

        units.push(match block_id {
            Some(id) => ContentUnit {
                kind: UnitKind::Block,
                text: section_text.to_string(),
                link_target: format!("^{id}"),
                position: None,
            },
            None => ContentUnit {
                kind: UnitKind::Block,
                text: section_text.to_string(),
                link_target: String::new(),
                position: Some(BlockPosition {
                    end_line: section.end_line,
                }),
            },
        });
    }

    units
}
