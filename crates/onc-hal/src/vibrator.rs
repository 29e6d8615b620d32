//! QPNP LED-class vibrator driver.
//!
//! Drives the motor through the four control files the kernel driver
//! exposes under `/sys/class/leds/vibrator/`: `state`, `duration`,
//! `activate` and `vmax_mv`. An activation hands the duration to the
//! kernel driver, which self-clears once it elapses; nothing here owns a
//! timer. Direct on/off control and external control are mutually
//! exclusive operating modes.

use crate::HalError;
use crate::effect::{ApiLevel, Effect, EffectStrength};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Voltage window of the QPNP vibrator LDO, in millivolts.
const VIB_LDO_VMIN_MV: u32 = 1504;
const VIB_LDO_VMAX_MV: u32 = 3544;
const MV_ADDITION_MAX: u32 = VIB_LDO_VMAX_MV - VIB_LDO_VMIN_MV;

/// Vibrator device configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VibratorConfig {
    /// LED-class device directory holding the control files.
    pub device_dir: PathBuf,
}

impl Default for VibratorConfig {
    fn default() -> Self {
        Self {
            device_dir: PathBuf::from("/sys/class/leds/vibrator"),
        }
    }
}

/// Map an amplitude level (0-255) onto the LDO voltage window.
fn amplitude_to_mv(amplitude: u8) -> u32 {
    VIB_LDO_VMIN_MV + u32::from(amplitude) * MV_ADDITION_MAX / 255
}

/// Vibrator driver instance.
///
/// Session state lives here and is reset by process restart only. The
/// host framework dispatches calls one at a time; every mutating
/// operation takes `&mut self`, so a concurrent dispatcher has to add its
/// own serialization around the instance.
pub struct Vibrator {
    activate_path: PathBuf,
    duration_path: PathBuf,
    state_path: PathBuf,
    vmax_mv_path: PathBuf,
    amplitude: u8,
    external_control: bool,
    has_effect: bool,
}

impl Vibrator {
    /// Create a driver for the default sysfs device.
    pub fn new() -> Self {
        Self::with_config(VibratorConfig::default())
    }

    /// Create a driver for a specific device directory.
    pub fn with_config(config: VibratorConfig) -> Self {
        let dir = &config.device_dir;
        tracing::debug!("Vibrator device dir: {}", dir.display());

        Self {
            activate_path: dir.join("activate"),
            duration_path: dir.join("duration"),
            state_path: dir.join("state"),
            vmax_mv_path: dir.join("vmax_mv"),
            amplitude: 0,
            external_control: false,
            has_effect: false,
        }
    }

    /// Check whether the device directory is present. Missing hardware is
    /// reported to the caller, not treated as fatal; every operation will
    /// surface the write failure itself.
    pub fn probe(&self) -> bool {
        let present = self
            .activate_path
            .parent()
            .map(Path::exists)
            .unwrap_or(false);
        if !present {
            tracing::warn!(
                "Vibrator sysfs device not found at {}",
                self.activate_path.display()
            );
        }
        present
    }

    /// Turn the motor on for `timeout_ms` milliseconds.
    pub fn on(&mut self, timeout_ms: u32) -> Result<(), HalError> {
        self.has_effect = false;
        self.activate(true, timeout_ms)
    }

    /// Turn the motor off. A named effect encodes its own envelope and is
    /// left to run out; the driver self-clears after its duration.
    pub fn off(&mut self) -> Result<(), HalError> {
        if self.has_effect {
            return Ok(());
        }
        self.activate(false, 0)
    }

    pub fn supports_amplitude_control(&self) -> bool {
        true
    }

    pub fn supports_external_control(&self) -> bool {
        true
    }

    /// Set the drive strength by programming the LDO voltage. The whole
    /// 0-255 domain is accepted and mapped linearly onto the voltage
    /// window.
    pub fn set_amplitude(&mut self, amplitude: u8) -> Result<(), HalError> {
        let mv = amplitude_to_mv(amplitude);
        if let Err(e) = fs::write(&self.vmax_mv_path, mv.to_string()) {
            tracing::error!("Failed to set amplitude: {}", e);
            return Err(HalError::Io(e));
        }

        tracing::info!(
            "Amplitude: {} -> {}, mv = {}",
            self.amplitude,
            amplitude,
            mv
        );
        self.amplitude = amplitude;
        Ok(())
    }

    /// Hand the hardware over to (or take it back from) an external
    /// controller. Does not stop an activation already in flight.
    pub fn set_external_control(&mut self, enabled: bool) -> Result<(), HalError> {
        tracing::info!(
            "External control: {} -> {}",
            self.external_control,
            enabled
        );
        self.external_control = enabled;
        Ok(())
    }

    /// Play a named effect at the given strength. Returns the effect
    /// duration in milliseconds.
    pub fn perform(&mut self, effect: Effect, strength: EffectStrength) -> Result<u32, HalError> {
        tracing::info!("Perform: effect {}", effect.name());
        self.has_effect = true;

        // Gate before the amplitude write so a rejected perform leaves
        // every control file untouched.
        if self.external_control {
            tracing::warn!("Vibrator is under external control, rejecting effect playback");
            return Err(HalError::Unsupported(
                "vibrator is externally controlled".into(),
            ));
        }

        // The amplitude write is best effort here; a failed vmax_mv write
        // leaves the previous drive strength in place.
        if let Err(e) = self.set_amplitude(strength.amplitude()) {
            tracing::warn!("Keeping previous amplitude: {}", e);
        }

        let ms = effect.duration_ms();
        self.activate(true, ms)?;
        Ok(ms)
    }

    /// Wire-facing perform: takes the raw effect and strength codes of an
    /// interface revision, range-checks them against that revision, widens
    /// into the full effect set and delegates. No hardware is touched for
    /// a code outside the revision's range.
    pub fn perform_with_code(
        &mut self,
        level: ApiLevel,
        effect_code: i32,
        strength_code: i32,
    ) -> Result<u32, HalError> {
        let effect = level.decode_effect(effect_code)?;
        let strength = EffectStrength::from_code(strength_code).ok_or_else(|| {
            HalError::Unsupported(format!("unknown strength code {}", strength_code))
        })?;
        self.perform(effect, strength)
    }

    /// Last amplitude successfully written.
    pub fn amplitude(&self) -> u8 {
        self.amplitude
    }

    pub fn external_control(&self) -> bool {
        self.external_control
    }

    /// Start or stop the motor. The kernel driver requires the writes in
    /// this order: state, duration, activate. A failed write aborts the
    /// sequence; earlier writes are not rolled back.
    fn activate(&mut self, enabled: bool, ms: u32) -> Result<(), HalError> {
        if self.external_control {
            tracing::warn!("Vibrator is under external control, rejecting direct activation");
            return Err(HalError::Unsupported(
                "vibrator is externally controlled".into(),
            ));
        }

        let flag = if enabled { "1" } else { "0" };
        write_control(&self.state_path, flag)?;
        write_control(&self.duration_path, &ms.to_string())?;
        write_control(&self.activate_path, flag)?;
        Ok(())
    }
}

impl Default for Vibrator {
    fn default() -> Self {
        Self::new()
    }
}

fn write_control(path: &Path, value: &str) -> Result<(), HalError> {
    fs::write(path, value).map_err(|e| {
        tracing::error!("Failed to write {} to {}: {}", value, path.display(), e);
        HalError::Io(e)
    })
}
