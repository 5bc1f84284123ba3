use djembe::{play, render_song, write_wav, OUTPUT_FILENAME, SAMPLE_HZ};

use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "djembe")]
struct Opt {
    /// Where to write the rendered WAV file.
    #[structopt(short = "o", long = "output", parse(from_os_str))]
    output: Option<PathBuf>,

    /// Seed for the harmonic coin flips; omit for a different take each run.
    #[structopt(short = "s", long = "seed")]
    seed: Option<u64>,

    /// Export the file without playing it back.
    #[structopt(long = "no-play")]
    no_play: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opt = Opt::from_args();
    let mut rng = match opt.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let music = render_song(&mut rng);
    let path = opt
        .output
        .unwrap_or_else(|| PathBuf::from(OUTPUT_FILENAME));
    write_wav(&path, &music, SAMPLE_HZ)?;
    info!("exported {}", path.display());

    if !opt.no_play {
        // A dead audio device shouldn't invalidate the exported file.
        if let Err(e) = play(&music, SAMPLE_HZ) {
            error!("playback failed: {:#}", e);
        }
    }

    Ok(())
}
