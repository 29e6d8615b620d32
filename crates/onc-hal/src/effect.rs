//! Haptic effect and strength enumerations.
//!
//! Wire codes match the host vibrator interface. Each interface revision
//! widens the effect set without renumbering, so a revision is fully
//! described by the highest code it accepts.

use crate::HalError;

/// Named haptic effects, richest revision of the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Click,
    DoubleClick,
    Tick,
    Thud,
    Pop,
    HeavyClick,
    Ringtone1,
    Ringtone2,
    Ringtone3,
    Ringtone4,
    Ringtone5,
    Ringtone6,
    Ringtone7,
    Ringtone8,
    Ringtone9,
    Ringtone10,
    Ringtone11,
    Ringtone12,
    Ringtone13,
    Ringtone14,
    Ringtone15,
    TextureTick,
}

impl Effect {
    /// Decode a wire effect code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Effect::Click),
            1 => Some(Effect::DoubleClick),
            2 => Some(Effect::Tick),
            3 => Some(Effect::Thud),
            4 => Some(Effect::Pop),
            5 => Some(Effect::HeavyClick),
            6 => Some(Effect::Ringtone1),
            7 => Some(Effect::Ringtone2),
            8 => Some(Effect::Ringtone3),
            9 => Some(Effect::Ringtone4),
            10 => Some(Effect::Ringtone5),
            11 => Some(Effect::Ringtone6),
            12 => Some(Effect::Ringtone7),
            13 => Some(Effect::Ringtone8),
            14 => Some(Effect::Ringtone9),
            15 => Some(Effect::Ringtone10),
            16 => Some(Effect::Ringtone11),
            17 => Some(Effect::Ringtone12),
            18 => Some(Effect::Ringtone13),
            19 => Some(Effect::Ringtone14),
            20 => Some(Effect::Ringtone15),
            21 => Some(Effect::TextureTick),
            _ => None,
        }
    }

    /// Duration the QPNP driver plays this effect for, in milliseconds.
    /// Click-family effects are short pulses; ringtones run a flat 30 s
    /// and rely on the driver self-clearing.
    pub fn duration_ms(self) -> u32 {
        match self {
            Effect::Tick | Effect::TextureTick => 5,
            Effect::Thud => 5,
            Effect::Pop => 5,
            Effect::Click => 10,
            Effect::HeavyClick => 10,
            Effect::DoubleClick => 15,
            Effect::Ringtone1
            | Effect::Ringtone2
            | Effect::Ringtone3
            | Effect::Ringtone4
            | Effect::Ringtone5
            | Effect::Ringtone6
            | Effect::Ringtone7
            | Effect::Ringtone8
            | Effect::Ringtone9
            | Effect::Ringtone10
            | Effect::Ringtone11
            | Effect::Ringtone12
            | Effect::Ringtone13
            | Effect::Ringtone14
            | Effect::Ringtone15 => 30000,
        }
    }

    /// Effect name for logging.
    pub fn name(self) -> &'static str {
        match self {
            Effect::Click => "CLICK",
            Effect::DoubleClick => "DOUBLE_CLICK",
            Effect::Tick => "TICK",
            Effect::Thud => "THUD",
            Effect::Pop => "POP",
            Effect::HeavyClick => "HEAVY_CLICK",
            Effect::Ringtone1 => "RINGTONE_1",
            Effect::Ringtone2 => "RINGTONE_2",
            Effect::Ringtone3 => "RINGTONE_3",
            Effect::Ringtone4 => "RINGTONE_4",
            Effect::Ringtone5 => "RINGTONE_5",
            Effect::Ringtone6 => "RINGTONE_6",
            Effect::Ringtone7 => "RINGTONE_7",
            Effect::Ringtone8 => "RINGTONE_8",
            Effect::Ringtone9 => "RINGTONE_9",
            Effect::Ringtone10 => "RINGTONE_10",
            Effect::Ringtone11 => "RINGTONE_11",
            Effect::Ringtone12 => "RINGTONE_12",
            Effect::Ringtone13 => "RINGTONE_13",
            Effect::Ringtone14 => "RINGTONE_14",
            Effect::Ringtone15 => "RINGTONE_15",
            Effect::TextureTick => "TEXTURE_TICK",
        }
    }
}

/// Requested effect strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectStrength {
    Light,
    Medium,
    Strong,
}

impl EffectStrength {
    /// Decode a wire strength code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(EffectStrength::Light),
            1 => Some(EffectStrength::Medium),
            2 => Some(EffectStrength::Strong),
            _ => None,
        }
    }

    /// Amplitude level (0-255) this strength drives the motor at.
    pub fn amplitude(self) -> u8 {
        match self {
            EffectStrength::Light => 63,
            EffectStrength::Medium => 159,
            EffectStrength::Strong => 255,
        }
    }
}

/// Interface revision a perform request arrived on. Revisions are
/// additive; older ones accept a prefix of the effect code space and must
/// be range-checked before widening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ApiLevel {
    V1_0,
    V1_1,
    V1_2,
    V1_3,
}

impl ApiLevel {
    /// Highest effect code this revision accepts.
    pub fn max_effect_code(self) -> i32 {
        match self {
            ApiLevel::V1_0 => 1,
            ApiLevel::V1_1 => 2,
            ApiLevel::V1_2 => 20,
            ApiLevel::V1_3 => 21,
        }
    }

    /// Check a wire effect code against this revision's range, then widen
    /// it into the full effect set.
    pub fn decode_effect(self, code: i32) -> Result<Effect, HalError> {
        if code < 0 || code > self.max_effect_code() {
            return Err(HalError::Unsupported(format!(
                "effect code {} out of range for {:?}",
                code, self
            )));
        }
        Effect::from_code(code)
            .ok_or_else(|| HalError::Unsupported(format!("unknown effect code {}", code)))
    }
}
