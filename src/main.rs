// Prints the ffmpeg commands that split a video into the segments listed in a
// points file, copying streams instead of re-encoding.
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{arg, command, value_parser, ArgMatches};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use splitpoints::points::{DEFAULT_INPUT_FILE, DEFAULT_POINTS_FILE};
use splitpoints::{run, Config, FrameRate};

fn get_config(matches: &ArgMatches) -> Result<Config> {
    let points_file = matches
        .get_one::<String>("points_file")
        .context("Points file path is not provided")?;
    let input_file = matches
        .get_one::<String>("input_file")
        .context("Input file path is not provided")?;
    let fps = *matches
        .get_one::<u32>("frame_rate")
        .context("Frame rate is not provided")?;
    let frame_rate = FrameRate::new(fps).context("Frame rate must be at least 1")?;

    Ok(Config {
        points_file: PathBuf::from(points_file),
        input_file: input_file.to_owned(),
        frame_rate,
    })
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = &command!()
        .arg(
            arg!(-p --points_file <FILE> "Points file, with lines H:MM:SS:FF-H:MM:SS:FF")
                .required(false)
                .default_value(DEFAULT_POINTS_FILE),
        )
        .arg(
            arg!(-i --input_file <FILE> "Name of input video file")
                .required(false)
                .default_value(DEFAULT_INPUT_FILE),
        )
        .arg(
            arg!(-r --frame_rate <FPS> "Frames per second of the timecodes")
                .required(false)
                .value_parser(value_parser!(u32).range(1..))
                .default_value("25"),
        )
        .get_matches();

    let result = get_config(matches).and_then(|config| {
        tracing::debug!(?config, "Starting");
        let stdout = std::io::stdout();
        run(&config, stdout.lock())?;
        Ok(())
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
