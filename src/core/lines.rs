//! Line-oriented view of the source shared by every stage.

const TAB_WIDTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineInfo {
    length: usize,
    indent: usize,
    blank: bool,
}

/// Per-line lengths and indentation, indexed by 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    lines: Vec<LineInfo>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let lines = source.lines().map(measure_line).collect();
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Character length of `line`, 0 when out of range.
    pub fn length(&self, line: usize) -> usize {
        self.info(line).map_or(0, |info| info.length)
    }

    /// Visual indentation width of `line` (tabs advance to the next multiple of 8).
    pub fn indent(&self, line: usize) -> usize {
        self.info(line).map_or(0, |info| info.indent)
    }

    pub fn is_blank(&self, line: usize) -> bool {
        self.info(line).is_none_or(|info| info.blank)
    }

    pub fn blank_lines(&self) -> usize {
        self.lines.iter().filter(|info| info.blank).count()
    }

    /// Lines whose length exceeds `max_length` characters.
    pub fn lines_longer_than(&self, max_length: usize) -> usize {
        self.lines.iter().filter(|info| info.length > max_length).count()
    }

    fn info(&self, line: usize) -> Option<&LineInfo> {
        line.checked_sub(1).and_then(|index| self.lines.get(index))
    }
}

fn measure_line(line: &str) -> LineInfo {
    let mut indent = 0;
    for c in line.chars() {
        match c {
            ' ' => indent += 1,
            '\t' => indent = (indent / TAB_WIDTH + 1) * TAB_WIDTH,
            _ => break,
        }
    }
    LineInfo {
        length: line.chars().count(),
        indent,
        blank: line.trim().is_empty(),
    }
}
