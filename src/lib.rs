mod audio_device;
mod export;
mod mixer;
mod oscillator;
mod song;
mod tracks;

/// Samples per second for every buffer this crate produces.
pub const SAMPLE_HZ: u32 = 44_100;

pub const TEMPO_BPM: f64 = 120.0;

/// Bars rendered per track.
pub const NUM_BARS: usize = 8;

/// Duration of one beat in seconds at `TEMPO_BPM`.
pub fn beat_duration() -> f64 {
    60.0 / TEMPO_BPM
}

/// A mono track of signed 16-bit PCM samples.
pub type SampleBuffer = Vec<i16>;

pub use audio_device::play;
pub use export::write_wav;
pub use mixer::mix_down;
pub use oscillator::{generate_sine_wave, silence};
pub use song::{render_song, HARMONIC_CHANCE, OUTPUT_FILENAME};
pub use tracks::{additional_percussion, drum_beat, melody, MELODY_STEPS, SCALE_HZ};
