use std::{fmt, str::FromStr, time::Duration};

use crate::{
    error::{LabelError, Result},
    full_context::FullContextLabel,
};

/// Time interval of one label in the synthesized audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Duration,
    pub end: Duration,
}

impl Span {
    /// Builds a span from Open JTalk label times, given in 100 ns units.
    pub fn from_ticks(start: u64, end: u64) -> Option<Self> {
        Some(Self {
            start: ticks_to_duration(start)?,
            end: ticks_to_duration(end)?,
        })
    }
}

fn ticks_to_duration(ticks: u64) -> Option<Duration> {
    // 1E-7 second
    ticks.checked_mul(100).map(Duration::from_nanos)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelKind {
    Phoneme(String),
    FullContext(FullContextLabel),
    /// One character of a pronunciation (yomi).
    Char(char),
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelKind::Phoneme(phoneme) => f.write_str(phoneme),
            LabelKind::FullContext(label) => fmt::Display::fmt(label, f),
            LabelKind::Char(c) => write!(f, "{c}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub span: Option<Span>,
    pub kind: LabelKind,
}

impl Label {
    pub fn new(span: Option<Span>, kind: LabelKind) -> Self {
        Self { span, kind }
    }

    pub fn start(&self) -> Option<Duration> {
        self.span.map(|span| span.start)
    }

    pub fn end(&self) -> Option<Duration> {
        self.span.map(|span| span.end)
    }
}

/// `<start> <end> <label>` with seconds at 4 decimals, or just `<label>` without a span.
impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(Span { start, end }) => write!(
                f,
                "{:.4} {:.4} {}",
                start.as_secs_f64(),
                end.as_secs_f64(),
                self.kind
            ),
            None => fmt::Display::fmt(&self.kind, f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum OutputMode {
    Phoneme,
    #[value(name = "full_context_label")]
    FullContextLabel,
    Yomi,
}

impl FromStr for OutputMode {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "phoneme" => Ok(Self::Phoneme),
            "full_context_label" => Ok(Self::FullContextLabel),
            "yomi" => Ok(Self::Yomi),
            other => Err(LabelError::InvalidRequest(format!(
                "unknown output type `{other}`"
            ))),
        }
    }
}

/// An output mode combined with whether spans are wanted.
///
/// Yomi carries no timing, so a timed yomi request cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputRequest {
    Phoneme { with_span: bool },
    FullContext { with_span: bool },
    Yomi,
}

impl OutputRequest {
    pub fn new(mode: OutputMode, without_span: bool) -> Result<Self> {
        let with_span = !without_span;
        match mode {
            OutputMode::Phoneme => Ok(Self::Phoneme { with_span }),
            OutputMode::FullContextLabel => Ok(Self::FullContext { with_span }),
            OutputMode::Yomi if with_span => Err(LabelError::InvalidRequest(
                "yomi output has no spans; request it without span".to_owned(),
            )),
            OutputMode::Yomi => Ok(Self::Yomi),
        }
    }

    pub fn mode(&self) -> OutputMode {
        match self {
            Self::Phoneme { .. } => OutputMode::Phoneme,
            Self::FullContext { .. } => OutputMode::FullContextLabel,
            Self::Yomi => OutputMode::Yomi,
        }
    }
}
