pub mod config;
pub mod error;
pub mod full_context;
pub mod label;
pub mod log_sections;
pub mod open_jtalk;
pub mod parser;
pub mod wave;

pub use config::OpenJTalkConfig;
pub use error::{LabelError, Result};
pub use full_context::FullContextLabel;
pub use label::{Label, LabelKind, OutputMode, OutputRequest, Span};
pub use open_jtalk::{get_labels, synthesize, Synthesis};
pub use parser::{parse_labels, parse_log_file};
