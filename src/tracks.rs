use crate::oscillator::{generate_sine_wave, silence};
use crate::{beat_duration, SampleBuffer, NUM_BARS, SAMPLE_HZ};

use rand::Rng;

const KICK_HZ: f64 = 100.0;
const SNARE_HZ: f64 = 200.0;
const HI_HAT_HZ: f64 = 10.0;
const MID_TOM_HZ: f64 = 150.0;
const LOW_TOM_HZ: f64 = 120.0;

/// A3 equal-tempered scale, A3 through E5.
pub const SCALE_HZ: [f64; 12] = [
    220.0, 246.94, 261.63, 293.66, 329.63, 349.23, 392.00, 440.00, 493.88, 523.25, 587.33, 659.25,
];

/// One pass of the melody line: (scale index, beat-duration multiplier).
pub const MELODY_STEPS: [(usize, f64); 17] = [
    (0, 1.0),
    (2, 0.5),
    (4, 1.0),
    (5, 1.5),
    (7, 1.0),
    (9, 0.75),
    (7, 1.0),
    (5, 1.0),
    (4, 1.0),
    (2, 1.25),
    (0, 1.0),
    (9, 0.5),
    (7, 1.0),
    (5, 1.25),
    (4, 1.0),
    (2, 0.75),
    (0, 1.0),
];

/// Interval, in scale steps, between a melody note and its harmonic.
const HARMONIC_INTERVAL: usize = 4;

/// Repeat a bar pattern verbatim; the pattern is tiled, not re-synthesized.
fn tile(pattern: &[i16], reps: usize) -> SampleBuffer {
    let mut track = SampleBuffer::with_capacity(pattern.len() * reps);
    for _ in 0..reps {
        track.extend_from_slice(pattern);
    }
    track
}

fn concat(segments: &[&[i16]]) -> SampleBuffer {
    let mut pattern = SampleBuffer::with_capacity(segments.iter().map(|s| s.len()).sum());
    for segment in segments {
        pattern.extend_from_slice(segment);
    }
    pattern
}

/// The rhythm track: one bar of 16 sixteenth-note slots, tiled `NUM_BARS` times.
pub fn drum_beat() -> SampleBuffer {
    let kick = generate_sine_wave(KICK_HZ, beat_duration(), SAMPLE_HZ);
    let snare = generate_sine_wave(SNARE_HZ, beat_duration(), SAMPLE_HZ);
    let hi_hat = generate_sine_wave(HI_HAT_HZ, beat_duration() / 2.0, SAMPLE_HZ);

    let slots: [&[i16]; 16] = [
        &kick, &hi_hat, &snare, &hi_hat, &kick, &hi_hat, &snare, &hi_hat, &snare, &hi_hat, &kick,
        &hi_hat, &snare, &hi_hat, &kick, &hi_hat,
    ];

    tile(&concat(&slots), NUM_BARS)
}

/// The tom layer. Each rest matches the sample count of the tone it follows.
pub fn additional_percussion() -> SampleBuffer {
    let mid_tom = generate_sine_wave(MID_TOM_HZ, beat_duration(), SAMPLE_HZ);
    let low_tom = generate_sine_wave(LOW_TOM_HZ, beat_duration(), SAMPLE_HZ);
    let mid_rest = silence(mid_tom.len());
    let low_rest = silence(low_tom.len());

    let segments: [&[i16]; 8] = [
        &mid_tom, &mid_rest, &low_tom, &low_rest, &low_tom, &mid_tom, &low_tom, &mid_rest,
    ];

    tile(&concat(&segments), NUM_BARS)
}

/// The melody track: `NUM_BARS` passes over `MELODY_STEPS`, with a harmonic
/// four scale steps up overlaid on each note with probability
/// `harmonic_chance`. The generator is caller-supplied so renders can be
/// seeded.
pub fn melody<R: Rng>(rng: &mut R, harmonic_chance: f64) -> SampleBuffer {
    let mut track = SampleBuffer::new();
    for _ in 0..NUM_BARS {
        for &(note_index, duration_factor) in MELODY_STEPS.iter() {
            let duration = beat_duration() * duration_factor;
            let mut note = generate_sine_wave(SCALE_HZ[note_index], duration, SAMPLE_HZ);
            if rng.gen_bool(harmonic_chance) {
                let harmonic_index = (note_index + HARMONIC_INTERVAL) % SCALE_HZ.len();
                let harmonic = generate_sine_wave(SCALE_HZ[harmonic_index], duration, SAMPLE_HZ);
                for (sample, &overlay) in note.iter_mut().zip(harmonic.iter()) {
                    // Both tones peak at half scale, so the sum stays in range.
                    *sample += overlay;
                }
            }
            track.extend_from_slice(&note);
        }
    }
    track
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Samples per beat at 44100 Hz and 120 BPM.
    const BEAT_SAMPLES: usize = 22_050;

    fn assert_tiled(track: &[i16], bar_len: usize) {
        assert_eq!(track.len() % bar_len, 0);
        assert_eq!(track.len() / bar_len, NUM_BARS);
        let bar = &track[..bar_len];
        for chunk in track.chunks(bar_len) {
            assert_eq!(chunk, bar);
        }
    }

    #[test]
    fn drum_beat_is_one_bar_tiled() {
        // 8 full-beat hits and 8 half-beat hi-hats per bar.
        let bar_len = 8 * BEAT_SAMPLES + 8 * (BEAT_SAMPLES / 2);
        assert_tiled(&drum_beat(), bar_len);
    }

    #[test]
    fn percussion_is_one_bar_tiled() {
        let bar_len = 8 * BEAT_SAMPLES;
        assert_tiled(&additional_percussion(), bar_len);
    }

    #[test]
    fn percussion_rests_match_their_tones() {
        let track = additional_percussion();
        // Segment 2 is a rest as long as the mid-tom before it.
        let rest = &track[BEAT_SAMPLES..2 * BEAT_SAMPLES];
        assert!(rest.iter().all(|&s| s == 0));
        // Segment 4 is a rest as long as the low-tom before it.
        let rest = &track[3 * BEAT_SAMPLES..4 * BEAT_SAMPLES];
        assert!(rest.iter().all(|&s| s == 0));
        // Segment 5 is a tone again.
        let tone = &track[4 * BEAT_SAMPLES..5 * BEAT_SAMPLES];
        assert!(tone.iter().any(|&s| s != 0));
    }

    fn melody_len_without_harmonics() -> usize {
        let per_bar: usize = MELODY_STEPS
            .iter()
            .map(|&(_, factor)| (f64::from(SAMPLE_HZ) * beat_duration() * factor) as usize)
            .sum();
        per_bar * NUM_BARS
    }

    #[test]
    fn melody_length_is_independent_of_harmonics() {
        let mut rng = StdRng::seed_from_u64(7);
        let expected = melody_len_without_harmonics();
        assert_eq!(melody(&mut rng, 0.0).len(), expected);
        assert_eq!(melody(&mut rng, 1.0).len(), expected);
        assert_eq!(melody(&mut rng, 0.5).len(), expected);
    }

    #[test]
    fn melody_without_harmonics_is_deterministic() {
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        assert_eq!(melody(&mut a, 0.0), melody(&mut b, 0.0));
    }

    #[test]
    fn same_seed_gives_same_melody() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(melody(&mut a, 0.5), melody(&mut b, 0.5));
    }

    #[test]
    fn harmonics_overlay_onto_the_note() {
        let mut rng = StdRng::seed_from_u64(3);
        let plain = melody(&mut rng, 0.0);
        let mut rng = StdRng::seed_from_u64(3);
        let overlaid = melody(&mut rng, 1.0);
        assert_eq!(plain.len(), overlaid.len());
        assert_ne!(plain, overlaid);
        // Every sample still fits in range after the overlay.
        assert!(overlaid.iter().all(|&s| s.abs() <= 2 * 16_383));
    }
}
