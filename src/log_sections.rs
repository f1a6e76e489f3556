use crate::error::{LabelError, Result};

/// Section holding the NJD text analysis, one CSV line per word.
pub const TEXT_ANALYSIS_SECTION: usize = 1;
/// Section holding the timed full-context labels.
pub const OUTPUT_LABEL_SECTION: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    /// Header name without brackets. `None` for the text before the first header.
    pub name: Option<&'a str>,
    pub lines: Vec<&'a str>,
}

impl<'a> Section<'a> {
    pub fn non_empty_lines(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.lines.iter().copied().filter(|line| !line.is_empty())
    }
}

/// An Open JTalk trace log split on its `[...]` header lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSections<'a> {
    sections: Vec<Section<'a>>,
}

impl<'a> LogSections<'a> {
    pub fn split(log: &'a str) -> Self {
        let mut sections = vec![Section {
            name: None,
            lines: Vec::new(),
        }];
        for line in log.lines() {
            match header_name(line) {
                Some(name) => sections.push(Section {
                    name: Some(name),
                    lines: Vec::new(),
                }),
                None => {
                    if let Some(section) = sections.last_mut() {
                        section.lines.push(line);
                    }
                }
            }
        }
        Self { sections }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section<'a>> {
        self.sections.get(index)
    }

    pub fn require(&self, index: usize) -> Result<&Section<'a>> {
        self.get(index).ok_or(LabelError::UnexpectedLogFormat {
            required: index,
            found: self.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section<'a>> {
        self.sections.iter()
    }
}

fn header_name(line: &str) -> Option<&str> {
    line.trim_end()
        .strip_prefix('[')?
        .strip_suffix(']')
        .filter(|name| !name.is_empty())
}
