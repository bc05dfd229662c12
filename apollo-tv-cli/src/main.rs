mod config;
mod logging;
mod presenter;
mod telemetry;

use std::fs::File;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use color_eyre::eyre::{eyre, Context, Result};

use apollo_tv_core::source::{FileSource, SampleSource};
use apollo_tv_core::{DecoderConfig, FmDemodulator, ReadOutcome, TvDecoder};

use config::{CliConfig, Device};
use logging::{LogEvent, StructuredLogger};
use presenter::Presenter;
use telemetry::TelemetryAggregator;

/// Live viewer for the Apollo Unified S-Band analog TV downlink.
#[derive(Parser, Debug)]
#[command(author, version, about = "Apollo USB TV viewer", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Transmission mode (overrides config)
    #[arg(short, long)]
    mode: Option<String>,

    /// Sample source device: file or rtlsdr (overrides config)
    #[arg(short, long)]
    device: Option<String>,

    /// Sample rate in Hz (overrides config)
    #[arg(short = 'r', long)]
    sample_rate: Option<u32>,

    /// Centre frequency in Hz, for rtlsdr (overrides config)
    #[arg(short, long)]
    frequency: Option<u64>,

    /// Frequency correction in PPM, for rtlsdr (overrides config)
    #[arg(long)]
    ppm: Option<i32>,

    /// Enable verbose diagnostic output
    #[arg(short, long)]
    verbose: bool,

    /// Input file, when device = file
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    let mut config = match &args.config {
        Some(path) => CliConfig::from_file(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
        None => CliConfig::default(),
    };

    if let Some(mode) = &args.mode {
        config.mode = mode.parse().map_err(|e: apollo_tv_core::ConfigError| eyre!(e.to_string()))?;
    }
    if let Some(device) = &args.device {
        config.device = match device.as_str() {
            "file" => Device::File,
            "rtlsdr" => Device::RtlSdr,
            other => return Err(eyre!("unrecognised device '{other}'")),
        };
    }
    if let Some(rate) = args.sample_rate {
        config.sample_rate = rate;
    }
    if let Some(freq) = args.frequency {
        config.frequency_hz = freq;
    }
    if let Some(ppm) = args.ppm {
        config.freq_correction_ppm = ppm;
    }
    if let Some(input) = args.input {
        config.input_path = Some(input);
    }

    let mut logger = StructuredLogger::new(config.logging.clone())?;
    logger.log(LogEvent::Info {
        message: format!(
            "Apollo TV viewer starting: mode={:?} sample_rate={}",
            config.mode, config.sample_rate
        ),
    })?;

    let decoder_config = DecoderConfig::new(config.sample_rate, config.mode)
        .wrap_err("invalid decoder configuration")?;

    let mut source: Box<dyn SampleSource> = match config.device {
        Device::File => {
            let path = config
                .input_path
                .as_ref()
                .ok_or_else(|| eyre!("device = file requires an input path"))?;
            let file = File::open(path).wrap_err_with(|| format!("failed to open {}", path.display()))?;
            Box::new(FileSource::open(file))
        }
        Device::RtlSdr => {
            #[cfg(feature = "rtlsdr")]
            {
                use apollo_tv_core::source::rtlsdr::{RtlSdrConfig, RtlSdrSource};

                Box::new(RtlSdrSource::open(RtlSdrConfig {
                    device_index: config.device_index,
                    sample_rate: config.sample_rate,
                    frequency_hz: config.frequency_hz,
                    freq_correction_ppm: config.freq_correction_ppm,
                })?)
            }
            #[cfg(not(feature = "rtlsdr"))]
            {
                return Err(eyre!("built without the 'rtlsdr' feature"));
            }
        }
    };

    let mut demod = FmDemodulator::new(config.sample_rate, config.deviation_hz);
    let mut decoder = TvDecoder::new(decoder_config).with_log_config(config.logging.to_core_log_config());

    let mut presenter = Presenter::new(decoder_config.active_width, decoder_config.active_lines)?;

    let mut telemetry = TelemetryAggregator::new(1.0);

    let frame_interval = Duration::from_secs_f64(decoder_config.frame_interval_ms() / 1000.0);
    let mut next_frame_at = Instant::now() + frame_interval;

    const READ_CHUNK_SAMPLES: usize = 1024;
    let mut iq_buffer = vec![0.0f64; READ_CHUNK_SAMPLES * 2];
    let mut scalar_buffer: Vec<i16> = Vec::new();
    let mut cursor = 0;

    while presenter.poll() {
        if cursor >= scalar_buffer.len() {
            let samples_read = source.read(&mut iq_buffer)?;
            if samples_read == 0 {
                logger.log(LogEvent::Warn {
                    message: "sample source returned 0 samples, stopping".to_string(),
                })?;
                break;
            }

            let demodulated = demod.demodulate(&mut iq_buffer[..samples_read * 2]);
            scalar_buffer.clear();
            scalar_buffer.extend(iq_buffer[..demodulated].iter().map(|&v| v as i16));
            cursor = 0;

            telemetry.sync_overflows(source.overflow_count());
        }

        match decoder.feed(&scalar_buffer, &mut cursor) {
            ReadOutcome::NeedMoreInput => continue,
            ReadOutcome::Continue => {}
            ReadOutcome::FrameReady => {
                telemetry.record_frame();

                let now = Instant::now();
                if now < next_frame_at {
                    thread::sleep(next_frame_at - now);
                    next_frame_at += frame_interval;
                } else {
                    next_frame_at = now + frame_interval;
                }

                presenter.present(decoder.framebuffer())?;

                if let Some(event) = telemetry.sample(decoder.hsync_offset(), decoder.sync_level()) {
                    logger.log(LogEvent::Telemetry(event))?;
                }
            }
        }
    }

    let stats = telemetry.statistics();
    logger.log(LogEvent::Statistics(stats))?;

    if args.verbose {
        logger.log(LogEvent::Info {
            message: format!("{}", decoder.logger()),
        })?;
    }

    Ok(())
}
