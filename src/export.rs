use anyhow::Context;
use log::info;
use std::path::Path;

/// Write a mono 16-bit PCM WAV file. Overwrites any existing file at `path`.
pub fn write_wav(path: &Path, samples: &[i16], sample_hz: u32) -> anyhow::Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: sample_hz,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("failed to create WAV file {}", path.display()))?;
    for &sample in samples {
        writer
            .write_sample(sample)
            .context("failed to write WAV sample")?;
    }
    writer.finalize().context("failed to finalize WAV file")?;
    info!("wrote {} samples to {}", samples.len(), path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_file_reads_back_identically() {
        let path = std::env::temp_dir().join("djembe_export_roundtrip.wav");
        let samples: Vec<i16> = vec![0, 1_000, -1_000, i16::MAX, i16::MIN + 1];
        write_wav(&path, &samples, 44_100).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44_100);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, hound::SampleFormat::Int);

        let read_back: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read_back, samples);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let path = std::env::temp_dir().join("djembe_missing_dir/out.wav");
        assert!(write_wav(&path, &[0], 44_100).is_err());
    }
}
