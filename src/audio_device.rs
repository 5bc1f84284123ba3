use anyhow::{anyhow, Context};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BufferSize, SampleFormat, SampleRate, StreamConfig,
};
use crossbeam_channel as channel;
use log::{error, info};
use std::time::Duration;

/// Extra wait beyond the buffer's duration before giving up on the device.
const DRAIN_MARGIN: Duration = Duration::from_secs(2);

/// Play a rendered buffer through the default output device, blocking until
/// the device has consumed it.
///
/// The mono source is duplicated across however many channels the device
/// config carries. Fails if there is no output device or no f32 config
/// supporting `sample_hz`; the caller decides whether that is fatal.
pub fn play(samples: &[i16], sample_hz: u32) -> anyhow::Result<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow!("no audio output device available"))?;
    let supported = device
        .supported_output_configs()
        .context("error while querying output configs")?
        .filter(|c| {
            c.sample_format() == SampleFormat::F32
                && c.min_sample_rate() <= SampleRate(sample_hz)
                && SampleRate(sample_hz) <= c.max_sample_rate()
        })
        .min_by_key(|c| c.channels())
        .ok_or_else(|| anyhow!("output device does not support {} Hz playback", sample_hz))?;
    let config = StreamConfig {
        channels: supported.channels(),
        sample_rate: SampleRate(sample_hz),
        buffer_size: BufferSize::Default,
    };
    info!("playing through output device with config {:?}", config);

    let channels = config.channels as usize;
    let pcm: Vec<f32> = samples.iter().map(|&s| f32::from(s) / 32_768.0).collect();
    let play_time = Duration::from_secs_f64(pcm.len() as f64 / f64::from(sample_hz));

    // The callback signals over this channel once it has handed the last
    // sample to the device.
    let (done_tx, done_rx) = channel::bounded(1);
    let mut cursor = 0;
    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                for frame in data.chunks_mut(channels) {
                    let value = pcm.get(cursor).copied().unwrap_or(0.0);
                    for out in frame.iter_mut() {
                        *out = value;
                    }
                    cursor = cursor.saturating_add(1);
                }
                if cursor >= pcm.len() {
                    let _ = done_tx.try_send(());
                }
            },
            |err| error!("output stream error: {}", err),
            None,
        )
        .context("failed to build output stream")?;
    stream.play().context("failed to start output stream")?;

    done_rx
        .recv_timeout(play_time + DRAIN_MARGIN)
        .context("output stream stalled before the buffer finished")?;
    // The last callback only queued samples; let the device drain them.
    std::thread::sleep(Duration::from_millis(200));

    Ok(())
}
