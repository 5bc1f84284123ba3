use crate::{mixer, tracks, SampleBuffer};

use rand::Rng;

/// File the rendered piece is exported to when no other path is given.
pub const OUTPUT_FILENAME: &str = "iChrispin_music.wav";

/// Chance that a melody note gets a harmonic overlaid on it.
pub const HARMONIC_CHANCE: f64 = 0.5;

/// Render the full piece: rhythm, percussion and melody layered into one
/// normalized mix. The generator drives the melody's harmonic coin flips.
pub fn render_song<R: Rng>(rng: &mut R) -> SampleBuffer {
    let rhythm = tracks::drum_beat();
    let percussion = tracks::additional_percussion();
    let melody = tracks::melody(rng, HARMONIC_CHANCE);

    mixer::mix_down(&[rhythm, percussion, melody])
}
