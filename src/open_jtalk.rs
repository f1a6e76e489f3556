//! Runs the `open_jtalk` binary and turns its trace log into labels.

use std::{
    fs,
    io::{self, Write},
    path::Path,
    process::{Command, Stdio},
};

use tracing::{debug, warn};

use crate::{
    config::OpenJTalkConfig,
    error::{LabelError, Result},
    label::{Label, OutputRequest},
    parser::parse_labels,
    wave::{read_wave_info, WaveInfo},
};

const WAVE_FILE_NAME: &str = "output.wav";
const LOG_FILE_NAME: &str = "output.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Synthesis {
    pub labels: Vec<Label>,
    /// `None` when the wave file could not be read.
    pub wave: Option<WaveInfo>,
}

pub fn get_labels(text: &str, config: &OpenJTalkConfig, request: OutputRequest) -> Result<Vec<Label>> {
    synthesize(text, config, request).map(|synthesis| synthesis.labels)
}

/// Synthesizes `text`, keeps the artifacts `config` asks for and parses the trace log.
///
/// Everything is staged in a private temporary directory that is removed on return,
/// whether the call succeeds or not.
pub fn synthesize(text: &str, config: &OpenJTalkConfig, request: OutputRequest) -> Result<Synthesis> {
    let work_dir = tempfile::Builder::new()
        .prefix("openjtalk-label-getter")
        .tempdir()
        .map_err(|e| LabelError::io("creating a temporary directory", e))?;
    let wave_path = work_dir.path().join(WAVE_FILE_NAME);
    let log_path = work_dir.path().join(LOG_FILE_NAME);

    run_open_jtalk(text, config, &wave_path, &log_path)?;

    let log = fs::read_to_string(&log_path)
        .map_err(|e| LabelError::io(format!("reading {}", log_path.display()), e))?;

    let wave = match read_wave_info(&wave_path) {
        Ok(info) => {
            debug!(
                sample_rate = info.sample_rate,
                channels = info.channels,
                duration = ?info.duration,
                "synthesized wave"
            );
            Some(info)
        }
        Err(e) => {
            warn!(error = %e, "could not read the synthesized wave");
            None
        }
    };

    let artifacts: Vec<(&Path, &Path)> = [
        (wave_path.as_path(), config.output_wave_path.as_deref()),
        (log_path.as_path(), config.output_log_path.as_deref()),
    ]
    .into_iter()
    .filter_map(|(staged, destination)| Some((staged, destination?)))
    .collect();
    keep_artifacts(&artifacts)?;

    let labels = parse_labels(&log, request)?;
    Ok(Synthesis { labels, wave })
}

fn run_open_jtalk(
    text: &str,
    config: &OpenJTalkConfig,
    wave_path: &Path,
    log_path: &Path,
) -> Result<()> {
    debug!(command = %config.command.display(), "running open_jtalk");
    let mut child = Command::new(&config.command)
        .arg("-x")
        .arg(&config.dict_path)
        .arg("-m")
        .arg(&config.htsvoice_path)
        .arg("-ow")
        .arg(wave_path)
        .arg("-ot")
        .arg(log_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| LabelError::io(format!("spawning {}", config.command.display()), e))?;

    if let Some(mut stdin) = child.stdin.take() {
        match writeln!(stdin, "{text}") {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!("open_jtalk closed stdin before reading the text");
            }
            Err(e) => return Err(LabelError::io("writing text to open_jtalk", e)),
        }
    }

    let output = child
        .wait_with_output()
        .map_err(|e| LabelError::io("waiting for open_jtalk", e))?;
    let diagnostics = String::from_utf8_lossy(&output.stderr);
    check_diagnostics(&diagnostics, config.strict)?;

    if !output.status.success() {
        return Err(LabelError::ExternalTool {
            diagnostics: format!("{}: {}", output.status, diagnostics.trim()),
        });
    }
    Ok(())
}

fn check_diagnostics(diagnostics: &str, strict: bool) -> Result<()> {
    let lowered = diagnostics.to_lowercase();
    let failed = || LabelError::ExternalTool {
        diagnostics: diagnostics.trim().to_owned(),
    };
    if lowered.contains("error") {
        return Err(failed());
    }
    if lowered.contains("warning") {
        if strict {
            return Err(failed());
        }
        warn!(diagnostics = diagnostics.trim(), "open_jtalk reported a warning");
    }
    Ok(())
}

/// Moves every staged artifact to its destination, or none of them.
fn keep_artifacts(artifacts: &[(&Path, &Path)]) -> Result<()> {
    for (kept, (staged, destination)) in artifacts.iter().enumerate() {
        if let Err(e) = relocate(staged, destination) {
            for (_, moved) in &artifacts[..kept] {
                if let Err(remove_error) = fs::remove_file(moved) {
                    warn!(path = %moved.display(), error = %remove_error, "could not remove a kept artifact");
                }
            }
            return Err(e);
        }
    }
    Ok(())
}

/// Moves a staged artifact out of the temporary directory, copying when it lives on another filesystem.
fn relocate(from: &Path, to: &Path) -> Result<()> {
    debug!(from = %from.display(), to = %to.display(), "keeping artifact");
    let moving_error = |e| LabelError::io(format!("moving {} to {}", from.display(), to.display()), e);
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(from, to).map(drop).map_err(moving_error)
        }
        Err(e) => Err(moving_error(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_always_fatal() {
        for strict in [false, true] {
            assert!(matches!(
                check_diagnostics("ERROR: HTS_Engine_load() in open_jtalk.c: Cannot load HTS voice.\n", strict),
                Err(LabelError::ExternalTool { .. })
            ));
        }
        assert!(check_diagnostics("Error: dictionary not found", false).is_err());
    }

    #[test]
    fn warnings_are_fatal_only_when_strict() {
        let diagnostics = "WARNING: JPCommonLabel_push_word() in jpcommon_label.c: xx is unknown POS.\n";
        assert!(check_diagnostics(diagnostics, false).is_ok());
        match check_diagnostics(diagnostics, true) {
            Err(LabelError::ExternalTool { diagnostics: kept }) => {
                assert!(kept.starts_with("WARNING: JPCommonLabel_push_word()"));
                assert!(!kept.ends_with('\n'));
            }
            other => panic!("expected ExternalTool, got {other:?}"),
        }
    }

    #[test]
    fn quiet_tool_passes() {
        assert!(check_diagnostics("", true).is_ok());
    }

    #[test]
    fn relocate_moves_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("staged.log");
        let to = dir.path().join("kept.log");
        fs::write(&from, "[Output label]\n").unwrap();
        relocate(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "[Output label]\n");
    }

    #[test]
    fn failed_move_keeps_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let staged_wave = dir.path().join("output.wav");
        let staged_log = dir.path().join("output.log");
        fs::write(&staged_wave, "RIFF").unwrap();
        fs::write(&staged_log, "[Output label]\n").unwrap();
        let kept_wave = dir.path().join("kept.wav");
        let kept_log = dir.path().join("no-such-dir").join("kept.log");

        let result = keep_artifacts(&[
            (staged_wave.as_path(), kept_wave.as_path()),
            (staged_log.as_path(), kept_log.as_path()),
        ]);

        match result {
            Err(LabelError::Io { source, .. }) => {
                assert_eq!(source.kind(), io::ErrorKind::NotFound)
            }
            other => panic!("expected Io, got {other:?}"),
        }
        assert!(!kept_wave.exists());
        assert!(!kept_log.exists());
    }

    #[test]
    fn relocate_reports_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let result = relocate(&dir.path().join("missing.wav"), &dir.path().join("kept.wav"));
        assert!(matches!(result, Err(LabelError::Io { .. })));
    }
}
