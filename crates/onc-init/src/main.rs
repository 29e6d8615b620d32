//! onclite bring-up binary
//!
//! Runs once at boot on the Redmi 7 / Redmi Y3 vendor image:
//! 1. Resolve the hardware variant and publish the ro.product.* overrides
//! 2. Bring up the vibrator driver
//! 3. Stay resident so the host framework can dispatch onto the driver
//!
//! The platform property service and the RPC transport are wired by the
//! host image; this binary only supplies the device-specific pieces.

use anyhow::{Context, Result};
use onc_config::BringupConfig;
use onc_hal::Vibrator;
use onc_props::{MemoryStore, Variant, load_vendor_properties};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Boot stages for timing
#[derive(Debug, Clone, Copy)]
enum BootStage {
    Properties,
    Vibrator,
}

impl BootStage {
    fn name(&self) -> &'static str {
        match self {
            BootStage::Properties => "properties",
            BootStage::Vibrator => "vibrator",
        }
    }
}

fn main() -> Result<()> {
    let boot_start = Instant::now();

    setup_logging();

    info!("onclite bring-up starting...");

    setup_signal_handlers()?;

    let config = BringupConfig::load_default().context("Failed to load bring-up configuration")?;

    // Stage 1: variant resolution and property overrides
    let stage_start = Instant::now();
    let variant = stage_properties(&config)?;
    log_stage_complete(BootStage::Properties, stage_start);

    // Stage 2: vibrator driver
    let stage_start = Instant::now();
    let vibrator = stage_vibrator(&config);
    log_stage_complete(BootStage::Vibrator, stage_start);

    info!(
        "Bring-up complete for {} ({}) in {:?}",
        variant.model(),
        variant.device(),
        boot_start.elapsed()
    );

    main_loop(vibrator)
}

/// Setup logging to console
fn setup_logging() {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_ansi(false))
        .init();
}

/// Setup signal handlers for graceful shutdown
fn setup_signal_handlers() -> Result<()> {
    use nix::sys::signal::{SaFlags, SigAction, SigHandler, SigSet, Signal, sigaction};

    let action = SigAction::new(
        SigHandler::Handler(handle_signal),
        SaFlags::empty(),
        SigSet::empty(),
    );

    unsafe {
        sigaction(Signal::SIGTERM, &action)?;
        sigaction(Signal::SIGINT, &action)?;
    }

    Ok(())
}

/// Signal handler; only flips the shutdown flag, the service loop does
/// the logging.
extern "C" fn handle_signal(sig: i32) {
    if sig == libc::SIGTERM || sig == libc::SIGINT {
        SHUTDOWN.store(true, Ordering::SeqCst);
    }
}

/// Resolve the hardware variant from the boot identification properties
/// and publish the ro.product.* overrides.
fn stage_properties(config: &BringupConfig) -> Result<Variant> {
    let mut store = MemoryStore::from_cmdline(&config.props.cmdline)
        .with_context(|| format!("Failed to read {}", config.props.cmdline.display()))?;

    let variant = load_vendor_properties(&mut store);

    store
        .write_to(&config.props.output)
        .with_context(|| format!("Failed to publish {}", config.props.output.display()))?;

    info!(
        "Variant {} ({}), {} properties staged",
        variant.model(),
        variant.device(),
        store.len()
    );
    Ok(variant)
}

/// Bring up the vibrator driver. Missing hardware is not fatal; every
/// operation reports its own failure to the caller.
fn stage_vibrator(config: &BringupConfig) -> Vibrator {
    let vibrator = Vibrator::with_config(config.vibrator.clone());

    if vibrator.probe() {
        debug!("Vibrator device ready");
    } else {
        warn!("Continuing without vibrator hardware");
    }

    vibrator
}

/// Log stage completion with timing
fn log_stage_complete(stage: BootStage, start: Instant) {
    info!("Stage {} complete in {:?}", stage.name(), start.elapsed());
}

/// Service loop - the driver instance stays resident for the host
/// framework's dispatch until we are told to shut down.
fn main_loop(_vibrator: Vibrator) -> Result<()> {
    use std::thread;
    use std::time::Duration;

    while !SHUTDOWN.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_secs(1));
    }

    info!("Received shutdown signal, exiting");
    Ok(())
}
