// SPDX-License-Identifier: MPL-2.0
//! Page-turn audio cues.
//!
//! Cues are fire-and-forget: a missing device, a blocked stream or any other
//! playback failure is logged at debug level and otherwise ignored, so
//! navigation never depends on audio.

mod output;
pub mod synth;

pub use output::CpalCuePlayer;

use crate::config::{DEFAULT_VOLUME, MAX_VOLUME, MIN_VOLUME};
use crate::error::Result;

/// Named sound effect requested by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// A single page turn.
    Flip,
    /// Riffling back to the cover.
    Restart,
}

impl AudioCue {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AudioCue::Flip => "flip",
            AudioCue::Restart => "restart",
        }
    }
}

/// Cue volume, guaranteed to be within 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume(f32);

impl Volume {
    /// Creates a new volume level, clamping to valid range. NaN is muted.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        if volume.is_nan() {
            return Self(MIN_VOLUME);
        }
        Self(volume.clamp(MIN_VOLUME, MAX_VOLUME))
    }

    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns true if volume is effectively muted (below audible threshold).
    #[must_use]
    pub fn is_muted(self) -> bool {
        self.0 < 0.001
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}

/// Something that can play a cue.
pub trait CuePlayer {
    /// Starts playing `cue` without blocking.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::Error::Audio`] when playback was rejected.
    fn play(&self, cue: AudioCue) -> Result<()>;
}

/// Player used when audio is disabled or no device is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCuePlayer;

impl CuePlayer for SilentCuePlayer {
    fn play(&self, _cue: AudioCue) -> Result<()> {
        Ok(())
    }
}

/// Plays `cue`, swallowing any failure.
pub fn play_cue(player: &dyn CuePlayer, cue: AudioCue) {
    if let Err(err) = player.play(cue) {
        log::debug!("audio cue '{}' not played: {}", cue.name(), err);
    }
}

/// Opens the default output device, falling back to silence.
#[must_use]
pub fn open_player(enabled: bool, volume: Volume) -> Box<dyn CuePlayer> {
    if !enabled || volume.is_muted() {
        log::info!("audio cues disabled");
        return Box::new(SilentCuePlayer);
    }
    match CpalCuePlayer::new(volume) {
        Ok(player) => Box::new(player),
        Err(err) => {
            log::warn!("audio cues unavailable: {err}");
            Box::new(SilentCuePlayer)
        }
    }
}
