use crate::SampleBuffer;

/// Mix tracks into one buffer: zero-pad to the longest track, sum
/// sample-wise, then rescale so the peak lands exactly at full scale.
///
/// Sums are accumulated in i32 so intermediates cannot clip. An all-silent
/// input mixes to silence rather than dividing by zero.
pub fn mix_down(tracks: &[SampleBuffer]) -> SampleBuffer {
    let max_len = tracks.iter().map(|t| t.len()).max().unwrap_or(0);

    let mut sum = vec![0i32; max_len];
    for track in tracks {
        for (acc, &sample) in sum.iter_mut().zip(track.iter()) {
            *acc += i32::from(sample);
        }
    }

    let peak = sum.iter().map(|s| s.abs()).max().unwrap_or(0);
    if peak == 0 {
        return vec![0; max_len];
    }

    let scale = f64::from(i16::MAX) / f64::from(peak);
    sum.iter()
        .map(|&s| (f64::from(s) * scale).round() as i16)
        .collect()
}
