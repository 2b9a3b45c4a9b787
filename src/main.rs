use anyhow::Context;
use bayercam::cli::{self, CliAction};
use bayercam::image_pipeline::CapturePipeline;
use bayercam::logger;

use tracing::{debug, info};

fn main() -> anyhow::Result<()> {
    logger::init();

    let program = std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bayercam".to_owned());

    let config = match cli::parse_os_args(std::env::args_os()) {
        Ok(CliAction::Capture(config)) => config,
        Ok(CliAction::Help) => {
            print!("{}", cli::usage(&program));
            return Ok(());
        }
        Err(e) => {
            eprintln!("ERROR: {e}\n");
            eprint!("{}", cli::usage(&program));
            std::process::exit(1);
        }
    };

    debug!(
        "dev = {}, im = {}, delay = {:?}, w = {}, h = {}, f = {}",
        config.device.display(),
        config.output_template,
        config.delay,
        config.width,
        config.height,
        config.scale_factor
    );

    let mut pipeline = CapturePipeline::open(&config)
        .with_context(|| format!("couldn't start capture on {}", config.device.display()))?;

    info!(
        "Capturing {} frames from {}",
        pipeline.geometry(),
        pipeline.source().card()
    );

    pipeline.run()
}
