use std::{path::Path, time::Duration};

use hound::WavReader;

/// Header facts about the wave file Open JTalk wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveInfo {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub duration: Duration,
}

pub fn read_wave_info(wav_file: &Path) -> hound::Result<WaveInfo> {
    let reader = WavReader::open(wav_file)?;
    let spec = reader.spec();

    // samples per channel
    let frames = u64::from(reader.duration());
    let duration = (frames * 1_000_000_000)
        .checked_div(u64::from(spec.sample_rate))
        .map_or(Duration::ZERO, Duration::from_nanos);

    Ok(WaveInfo {
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        bits_per_sample: spec.bits_per_sample,
        duration,
    })
}
