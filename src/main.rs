use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use openjtalk_label_getter::{
    config::{DEFAULT_COMMAND, DEFAULT_DICT_PATH, DEFAULT_HTSVOICE_PATH},
    get_labels, parse_log_file, OpenJTalkConfig, OutputMode, OutputRequest,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Japanese text to synthesize
    #[arg(required_unless_present = "input_log")]
    text: Option<String>,

    #[arg(long, env = "OPENJTALK_COMMAND", default_value = DEFAULT_COMMAND)]
    openjtalk_command: PathBuf,
    #[arg(long, env = "OPENJTALK_DICT_PATH", default_value = DEFAULT_DICT_PATH)]
    dict_path: PathBuf,
    #[arg(long, env = "OPENJTALK_HTSVOICE_PATH", default_value = DEFAULT_HTSVOICE_PATH)]
    htsvoice_path: PathBuf,

    /// Keep the synthesized wave at this path
    #[arg(long)]
    output_wave_path: Option<PathBuf>,
    /// Keep the Open JTalk trace log at this path
    #[arg(long)]
    output_log_path: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputMode::Phoneme)]
    output_type: OutputMode,
    /// Print labels without start and end times
    #[arg(long)]
    without_span: bool,
    /// Fail when Open JTalk reports a warning
    #[arg(long)]
    strict: bool,

    /// Parse an existing trace log instead of running Open JTalk
    #[arg(long, conflicts_with_all = ["output_wave_path", "output_log_path"])]
    input_log: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let request = OutputRequest::new(cli.output_type, cli.without_span)?;

    let labels = match (&cli.input_log, cli.text) {
        (Some(input_log), _) => parse_log_file(input_log, request)
            .with_context(|| format!("Failed to parse {}", input_log.display()))?,
        (None, Some(text)) => {
            let config = OpenJTalkConfig {
                command: cli.openjtalk_command,
                dict_path: cli.dict_path,
                htsvoice_path: cli.htsvoice_path,
                output_wave_path: cli.output_wave_path,
                output_log_path: cli.output_log_path,
                strict: cli.strict,
            };
            get_labels(&text, &config, request)?
        }
        (None, None) => anyhow::bail!("No text given"),
    };

    for label in &labels {
        println!("{label}");
    }

    Ok(())
}
