use std::path::PathBuf;

pub const DEFAULT_COMMAND: &str = "open_jtalk";
pub const DEFAULT_DICT_PATH: &str = "/var/lib/mecab/dic/open-jtalk/naist-jdic";
pub const DEFAULT_HTSVOICE_PATH: &str =
    "/usr/share/hts-voice/nitech-jp-atr503-m001/nitech_jp_atr503_m001.htsvoice";

/// How to run Open JTalk and where to keep what it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenJTalkConfig {
    pub command: PathBuf,
    /// MeCab dictionary directory (`-x`).
    pub dict_path: PathBuf,
    /// HTS voice file (`-m`).
    pub htsvoice_path: PathBuf,
    /// Keep the synthesized wave here. Discarded when `None`.
    pub output_wave_path: Option<PathBuf>,
    /// Keep the trace log here. Discarded when `None`.
    pub output_log_path: Option<PathBuf>,
    /// Fail on warnings as well as errors.
    pub strict: bool,
}

impl Default for OpenJTalkConfig {
    fn default() -> Self {
        Self {
            command: PathBuf::from(DEFAULT_COMMAND),
            dict_path: PathBuf::from(DEFAULT_DICT_PATH),
            htsvoice_path: PathBuf::from(DEFAULT_HTSVOICE_PATH),
            output_wave_path: None,
            output_log_path: None,
            strict: false,
        }
    }
}
