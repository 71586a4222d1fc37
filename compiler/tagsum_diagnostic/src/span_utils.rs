//! Line and column computation for spans.
//!
//! Used by `DiagnosticQueue` for sorting and by the terminal emitter when
//! rendering source snippets.

/// Pre-computed line start offsets for O(log L) line/column lookup.
///
/// ```
/// use tagsum_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "variant T {\n  a,\n}";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.offset_to_line_col(source, 0), (1, 1));
/// assert_eq!(table.offset_to_line_col(source, 14), (2, 3));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.as_bytes().iter().enumerate() {
            if *byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line number containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column); the column counts characters, not bytes.
    pub fn offset_to_line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start_offset(line).unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len()).max(line_start);

        let col_text = source.get(line_start..end).unwrap_or("");
        let col = u32::try_from(col_text.chars().count()).unwrap_or(u32::MAX - 1) + 1;

        (line, col)
    }

    /// Byte offset of a line start (1-based line number).
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Text of a 1-based line, without its trailing newline.
    pub fn line_text<'s>(&self, source: &'s str, line: u32) -> Option<&'s str> {
        let start = self.line_start_offset(line)? as usize;
        let end = self
            .line_start_offset(line + 1)
            .map_or(source.len(), |next| (next as usize).saturating_sub(1));
        source
            .get(start..end.max(start))
            .map(|text| text.trim_end_matches('\r'))
    }
}
