//! Procedurally generated ambient sources. Each one is an infinite sample
//! stream fed straight to the sink; nothing here is decoded from files.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rodio::Source;
use std::f32::consts::{PI, TAU};
use std::time::Duration;

const SAMPLE_RATE: u32 = 44100;

/// Ocean surf: integrated white noise for the body of the sound, with a
/// slow sinusoidal swell riding on top so waves appear to roll in and out.
pub struct OceanSwell {
    last_value: f32,
    swell_phase: f32,
    rng: StdRng,
}

impl OceanSwell {
    pub fn new() -> Self {
        Self {
            last_value: 0.0,
            swell_phase: 0.0,
            rng: StdRng::from_entropy(),
        }
    }
}

impl Iterator for OceanSwell {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let white = self.rng.gen_range(-1.0..1.0);

        // Integrate white noise, clamp against drift.
        self.last_value += white * 0.02;
        self.last_value = self.last_value.clamp(-1.0, 1.0);
        self.last_value *= 0.9999;

        // ~0.08 Hz swell, never fully silent between waves.
        self.swell_phase += 0.08 * TAU / SAMPLE_RATE as f32;
        if self.swell_phase > TAU {
            self.swell_phase -= TAU;
        }
        let swell = 0.55 + 0.45 * self.swell_phase.sin();

        Some(self.last_value * swell * 0.35)
    }
}

impl Source for OceanSwell {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// Rainfall: band-passed noise with gentle amplitude modulation. The bright
/// variant opens the filter for the lighter patter of a mountain stream.
pub struct Rainfall {
    bright: bool,
    last_brown: f32,
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,
    modulation_phase: f32,
    rng: StdRng,
}

impl Rainfall {
    pub fn new(bright: bool) -> Self {
        Self {
            bright,
            last_brown: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
            modulation_phase: 0.0,
            rng: StdRng::from_entropy(),
        }
    }

    fn noise_sample(&mut self) -> f32 {
        let white = self.rng.gen_range(-1.0..1.0);
        self.last_brown += white * 0.02;
        self.last_brown = self.last_brown.clamp(-1.0, 1.0);
        self.last_brown *= 0.9999;
        self.last_brown
    }

    // 2nd order bandpass, centered a little higher for the bright variant.
    fn bandpass_filter(&mut self, input: f32) -> f32 {
        let (b0, a1, a2) = if self.bright {
            (0.12, -1.6, 0.8)
        } else {
            (0.1, -1.8, 0.85)
        };
        let b2 = -b0;

        let output = b0 * input + b2 * self.x2 - a1 * self.y1 - a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }
}

impl Iterator for Rainfall {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let noise = self.noise_sample();
        let filtered = self.bandpass_filter(noise);

        self.modulation_phase += 0.3 / SAMPLE_RATE as f32;
        if self.modulation_phase > TAU {
            self.modulation_phase -= TAU;
        }
        let modulation = 0.7 + 0.3 * self.modulation_phase.sin();

        let mix = filtered * 0.8 + noise * 0.2;
        Some(mix * modulation * 0.4)
    }
}

impl Source for Rainfall {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// Repeating bell strike: a fundamental plus a detuned overtone under an
/// exponential decay, re-struck on a fixed period.
pub struct Chime {
    base_hz: f32,
    num_sample: usize,
}

impl Chime {
    /// Samples between strikes, roughly five seconds.
    const STRIKE_PERIOD: usize = SAMPLE_RATE as usize * 5;

    pub fn new(base_hz: f32) -> Self {
        Self {
            base_hz,
            num_sample: 0,
        }
    }
}

impl Iterator for Chime {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        let within_strike = self.num_sample % Self::STRIKE_PERIOD;
        self.num_sample = self.num_sample.wrapping_add(1);

        let t = within_strike as f32 / SAMPLE_RATE as f32;
        let envelope = (-1.2 * t).exp();

        let fundamental = (TAU * self.base_hz * t).sin();
        // Slightly inharmonic overtone, as on a real bell.
        let overtone = (TAU * self.base_hz * 2.76 * t).sin() * 0.4;

        Some((fundamental + overtone) * envelope * 0.2)
    }
}

impl Source for Chime {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

/// Sustained stereo drone: one sine per ear, a few Hz apart, interleaved
/// left/right so the offset reads as a slow pulse.
pub struct Drone {
    left_hz: f32,
    right_hz: f32,
    num_sample: usize,
}

impl Drone {
    pub fn new(left_hz: f32, right_hz: f32) -> Self {
        Self {
            left_hz,
            right_hz,
            num_sample: 0,
        }
    }
}

impl Iterator for Drone {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        self.num_sample = self.num_sample.wrapping_add(1);

        let t = self.num_sample as f32 / SAMPLE_RATE as f32;
        let sample = if self.num_sample % 2 == 0 {
            (2.0 * PI * self.left_hz * t).sin()
        } else {
            (2.0 * PI * self.right_hz * t).sin()
        };

        Some(sample * 0.15)
    }
}

impl Source for Drone {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        2
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bounded(samples: impl Iterator<Item = f32>, count: usize) {
        for (i, sample) in samples.take(count).enumerate() {
            assert!(
                (-1.0..=1.0).contains(&sample),
                "sample {i} out of range: {sample}"
            );
        }
    }

    #[test]
    fn all_sources_stay_within_unit_amplitude() {
        assert_bounded(OceanSwell::new(), 100_000);
        assert_bounded(Rainfall::new(false), 100_000);
        assert_bounded(Rainfall::new(true), 100_000);
        assert_bounded(Chime::new(523.25), 100_000);
        assert_bounded(Drone::new(110.0, 114.0), 100_000);
    }

    #[test]
    fn chime_decays_between_strikes() {
        let samples: Vec<f32> = Chime::new(440.0).take(Chime::STRIKE_PERIOD).collect();

        let early: f32 = samples[..4410].iter().map(|s| s.abs()).sum::<f32>() / 4410.0;
        let late_start = samples.len() - 4410;
        let late: f32 = samples[late_start..].iter().map(|s| s.abs()).sum::<f32>() / 4410.0;
        assert!(late < early * 0.1, "early {early}, late {late}");
    }

    #[test]
    fn drone_is_stereo_and_others_are_mono() {
        assert_eq!(Drone::new(110.0, 114.0).channels(), 2);
        assert_eq!(OceanSwell::new().channels(), 1);
        assert_eq!(Rainfall::new(false).channels(), 1);
        assert_eq!(Chime::new(440.0).channels(), 1);
    }
}
