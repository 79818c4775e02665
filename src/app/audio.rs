//! Audio output
//!
//! Plays the scan and receipt effects as synthesized one-shots on the
//! default output device. No asset files are involved: each effect is a
//! short generated tone source.

use std::f32::consts::PI;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamHandle, Source};
use thiserror::Error;
use tracing::warn;

use crate::sim::{AudioSink, SoundEffect};

const SAMPLE_RATE: u32 = 44100;

/// Audio backend errors
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("failed to open audio output stream: {0}")]
    Stream(#[from] rodio::StreamError),
}

/// Audio sink over the default rodio output stream
///
/// Construction fails when no output device is available; the host then
/// falls back to the silent sink instead of aborting.
pub struct RodioAudioSink {
    // Dropping the stream kills playback, so it lives as long as the sink
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl RodioAudioSink {
    pub fn new() -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

impl AudioSink for RodioAudioSink {
    fn play_one_shot(&mut self, effect: SoundEffect) {
        let result = match effect {
            SoundEffect::Scan => self.handle.play_raw(Tone::new(1320.0, 0.08)),
            SoundEffect::Receipt => self.handle.play_raw(Chime::new(880.0, 1760.0, 0.2)),
        };
        if let Err(error) = result {
            // Failed playback drops the effect; the session keeps going
            warn!(%error, ?effect, "one-shot playback failed");
        }
    }
}

/// Single sine tone with a linear fade-out
struct Tone {
    freq: f32,
    total_samples: usize,
    cursor: usize,
}

impl Tone {
    fn new(freq: f32, duration_secs: f32) -> Self {
        Self {
            freq,
            total_samples: (SAMPLE_RATE as f32 * duration_secs) as usize,
            cursor: 0,
        }
    }
}

impl Iterator for Tone {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.total_samples {
            return None;
        }

        let t = self.cursor as f32 / SAMPLE_RATE as f32;
        // Fade to zero over the whole tone to avoid an end click
        let envelope = 1.0 - self.cursor as f32 / self.total_samples as f32;
        self.cursor += 1;

        Some((2.0 * PI * self.freq * t).sin() * envelope * 0.3)
    }
}

impl Source for Tone {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples.saturating_sub(self.cursor))
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(
            self.total_samples as f32 / SAMPLE_RATE as f32,
        ))
    }
}

/// Two-tone chime: the low note for the first half, the high note after
struct Chime {
    low: f32,
    high: f32,
    total_samples: usize,
    cursor: usize,
}

impl Chime {
    fn new(low: f32, high: f32, duration_secs: f32) -> Self {
        Self {
            low,
            high,
            total_samples: (SAMPLE_RATE as f32 * duration_secs) as usize,
            cursor: 0,
        }
    }
}

impl Iterator for Chime {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.total_samples {
            return None;
        }

        let half = self.total_samples / 2;
        let freq = if self.cursor < half { self.low } else { self.high };
        // Each note fades within its own half
        let note_cursor = self.cursor % half.max(1);
        let envelope = 1.0 - note_cursor as f32 / half.max(1) as f32;

        let t = self.cursor as f32 / SAMPLE_RATE as f32;
        self.cursor += 1;

        Some((2.0 * PI * freq * t).sin() * envelope * 0.3)
    }
}

impl Source for Chime {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.total_samples.saturating_sub(self.cursor))
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(
            self.total_samples as f32 / SAMPLE_RATE as f32,
        ))
    }
}
