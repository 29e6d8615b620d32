//! Vibrator HAL for the onclite device family
//!
//! Implements the host vibrator interface on top of the QPNP LED-class
//! kernel driver used by the Redmi 7 / Redmi Y3 boards. The transport is
//! supplied by the platform; this crate holds the driver logic, the
//! effect and strength tables, and the error taxonomy.
//!
//! # Example
//!
//! ```no_run
//! use onc_hal::{Effect, EffectStrength, Vibrator};
//!
//! fn main() -> onc_hal::Result<()> {
//!     let mut vibrator = Vibrator::new();
//!     let ms = vibrator.perform(Effect::Click, EffectStrength::Medium)?;
//!     println!("Playing click for {ms} ms");
//!     Ok(())
//! }
//! ```

pub mod effect;
pub mod error;
pub mod vibrator;

pub use effect::{ApiLevel, Effect, EffectStrength};
pub use error::{HalError, Status};
pub use vibrator::{Vibrator, VibratorConfig};

/// HAL Result type
pub type Result<T> = std::result::Result<T, HalError>;
