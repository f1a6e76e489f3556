use std::{fs, path::Path, sync::LazyLock};

use regex::Regex;
use tracing::debug;

use crate::{
    error::{LabelError, Result},
    full_context::FullContextLabel,
    label::{Label, LabelKind, OutputRequest, Span},
    log_sections::{LogSections, Section, OUTPUT_LABEL_SECTION, TEXT_ANALYSIS_SECTION},
};

/// `<start> <end> <full-context label>`, with only a coarse check of the label itself.
static OUTPUT_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+) (\d+) (.+\^.+-(.+)\+.+=.+/A.+/B.+/C.+/D.+/E.+/F.+/G.+/H.+/I.+/J.+/K.+)$")
        .expect("output label pattern is valid")
});

/// Number of columns in an NJD line of the text analysis section.
const NJD_FIELD_COUNT: usize = 13;
const NJD_PRONUNCIATION_FIELD: usize = 9;

/// Parses an Open JTalk trace log into labels, in log order.
///
/// The first line that does not fit the requested mode fails the whole call.
pub fn parse_labels(log: &str, request: OutputRequest) -> Result<Vec<Label>> {
    let sections = LogSections::split(log);
    let labels = match request {
        OutputRequest::Phoneme { with_span } => {
            let section = sections.require(OUTPUT_LABEL_SECTION)?;
            output_labels(section, with_span, |line| {
                Ok(LabelKind::Phoneme(line.phoneme.to_owned()))
            })?
        }
        OutputRequest::FullContext { with_span } => {
            let section = sections.require(OUTPUT_LABEL_SECTION)?;
            output_labels(section, with_span, |line| {
                FullContextLabel::decode(line.context).map(LabelKind::FullContext)
            })?
        }
        OutputRequest::Yomi => yomi_labels(sections.require(TEXT_ANALYSIS_SECTION)?)?,
    };
    debug!(mode = ?request.mode(), count = labels.len(), "parsed labels");
    Ok(labels)
}

/// Parses a trace log that Open JTalk wrote earlier.
pub fn parse_log_file(path: &Path, request: OutputRequest) -> Result<Vec<Label>> {
    let log = fs::read_to_string(path)
        .map_err(|e| LabelError::io(format!("reading {}", path.display()), e))?;
    parse_labels(&log, request)
}

struct OutputLabelLine<'a> {
    start: u64,
    end: u64,
    context: &'a str,
    phoneme: &'a str,
}

impl<'a> OutputLabelLine<'a> {
    fn parse(line: &'a str) -> Result<Self> {
        let captures = OUTPUT_LABEL_RE
            .captures(line)
            .ok_or_else(|| LabelError::malformed(line, "expected `<start> <end> <label>`"))?;
        let ticks = |index: usize| {
            captures[index]
                .parse::<u64>()
                .map_err(|e| LabelError::malformed(line, format!("bad time: {e}")))
        };
        Ok(Self {
            start: ticks(1)?,
            end: ticks(2)?,
            context: captures.get(3).map_or("", |m| m.as_str()),
            phoneme: captures.get(4).map_or("", |m| m.as_str()),
        })
    }
}

fn output_labels(
    section: &Section<'_>,
    with_span: bool,
    kind: impl Fn(&OutputLabelLine<'_>) -> Result<LabelKind>,
) -> Result<Vec<Label>> {
    section
        .non_empty_lines()
        .map(|line| {
            let parsed = OutputLabelLine::parse(line)?;
            let span = Span::from_ticks(parsed.start, parsed.end)
                .ok_or_else(|| LabelError::malformed(line, "time out of range"))?;
            Ok(Label::new(with_span.then_some(span), kind(&parsed)?))
        })
        .collect()
}

fn yomi_labels(section: &Section<'_>) -> Result<Vec<Label>> {
    let mut labels = Vec::new();
    for line in section.non_empty_lines() {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < NJD_FIELD_COUNT {
            return Err(LabelError::malformed(
                line,
                format!(
                    "expected {NJD_FIELD_COUNT} comma-separated fields, found {}",
                    fields.len()
                ),
            ));
        }
        labels.extend(
            fields[NJD_PRONUNCIATION_FIELD]
                .chars()
                .map(|c| Label::new(None, LabelKind::Char(c))),
        );
    }
    Ok(labels)
}
