// SPDX-License-Identifier: MPL-2.0
//! In-memory synthesis of the page-turn cues.
//!
//! A page turn is a short burst of low-passed noise with a fast attack and
//! an exponential decay. The restart cue chains several quieter bursts, like
//! riffling through the pages.

use super::AudioCue;

/// Length of one page-turn burst.
const FLIP_MS: u32 = 140;
/// Bursts in the restart riffle.
const RIFFLE_BURSTS: u32 = 5;
/// Gap between riffle bursts.
const RIFFLE_GAP_MS: u32 = 45;

/// Deterministic xorshift32 noise source.
#[derive(Debug, Clone)]
struct Noise(u32);

impl Noise {
    fn next_sample(&mut self) -> f32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        #[allow(clippy::cast_precision_loss)]
        let unit = x as f32 / u32::MAX as f32;
        unit * 2.0 - 1.0
    }
}

/// Mono samples of one burst.
#[allow(clippy::cast_precision_loss)]
fn burst(sample_rate: u32, duration_ms: u32, gain: f32, seed: u32) -> Vec<f32> {
    let len = (u64::from(sample_rate) * u64::from(duration_ms) / 1000) as usize;
    let attack = (len / 20).max(1);
    let mut noise = Noise(seed.max(1));
    let mut low_passed = 0.0f32;

    (0..len)
        .map(|i| {
            // One-pole low-pass softens the hiss into paper.
            low_passed += 0.35 * (noise.next_sample() - low_passed);
            let t = i as f32 / len as f32;
            let envelope = if i < attack {
                i as f32 / attack as f32
            } else {
                (-6.0 * t).exp()
            };
            low_passed * envelope * gain
        })
        .collect()
}

/// Interleaved samples of `cue` for a device with the given format.
#[must_use]
pub fn synthesize(cue: AudioCue, sample_rate: u32, channels: u16) -> Vec<f32> {
    let mono = match cue {
        AudioCue::Flip => burst(sample_rate, FLIP_MS, 0.9, 0x9E37_79B9),
        AudioCue::Restart => {
            let gap = (u64::from(sample_rate) * u64::from(RIFFLE_GAP_MS) / 1000) as usize;
            let mut samples = Vec::new();
            for n in 0..RIFFLE_BURSTS {
                samples.extend(burst(sample_rate, FLIP_MS / 2, 0.6, 0x85EB_CA6B + n));
                samples.extend(std::iter::repeat_n(0.0, gap));
            }
            samples
        }
    };

    let channels = usize::from(channels.max(1));
    mono.into_iter()
        .flat_map(|s| std::iter::repeat_n(s, channels))
        .collect()
}
