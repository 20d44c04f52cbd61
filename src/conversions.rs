use std::ops::Range;

use lsp_types::Position;

use crate::host::TextDocument;

/// Convert a flat character-offset range into an LSP line/character range.
///
/// Reads the document text fresh and walks its lines, counting each line as
/// its character length plus the EOL delimiter. The start position lands on
/// the first line whose cumulative end lies strictly past `range.start`, so a
/// range beginning right after a line break maps to character 0 of the next
/// line rather than to the break itself.
///
/// Returns `None` when `range.end` lies beyond the document's total length.
pub fn offset_range_to_lsp_range<D>(document: &D, range: &Range<usize>) -> Option<lsp_types::Range>
where
    D: TextDocument + ?Sized,
{
    let text = document.text();
    let eol = document.eol();

    if range.end > text.chars().count() {
        return None;
    }

    let mut chars = 0;
    let mut start = None;
    for (line_index, line) in text.split(eol.as_str()).enumerate() {
        let line_length = line.chars().count() + eol.char_len();

        if start.is_none() && chars + line_length > range.start {
            start = Some(Position::new(line_index as u32, (range.start - chars) as u32));
        }

        if let Some(start) = start {
            if chars + line_length >= range.end {
                let end = Position::new(line_index as u32, (range.end - chars) as u32);
                return Some(lsp_types::Range::new(start, end));
            }
        }

        chars += line_length;
    }

    None
}

/// Convert an LSP line/character range into a flat character-offset range.
///
/// Walks lines accumulating a running character count and stops once the end
/// line has been reached. A position whose line lies past the end of the
/// document clamps to the document's total length.
pub fn lsp_range_to_offset_range<D>(document: &D, range: &lsp_types::Range) -> Range<usize>
where
    D: TextDocument + ?Sized,
{
    let text = document.text();
    let eol = document.eol();
    let total = text.chars().count();

    let mut chars = 0;
    let mut start = None;
    let mut end = None;
    for (line_index, line) in text.split(eol.as_str()).enumerate() {
        if line_index == range.start.line as usize {
            start = Some(chars + range.start.character as usize);
        }
        if line_index == range.end.line as usize {
            end = Some(chars + range.end.character as usize);
            break;
        }
        chars += line.chars().count() + eol.char_len();
    }

    let start = start.unwrap_or(total).min(total);
    let end = end.unwrap_or(total).min(total).max(start);
    start..end
}
