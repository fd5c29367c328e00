//! Break progress per tick.
//!
//! A block breaks once the accumulated progress reaches 1.0. Progress per
//! tick is derived from the block's hardness, whether the tool is correct for
//! drops and the effective mining speed of the player.

/// Divisor applied when the tool is correct for drops.
pub const CORRECT_TOOL_DIVISOR: f64 = 30.0;

/// Divisor applied when the tool is not correct for drops.
pub const WRONG_TOOL_DIVISOR: f64 = 100.0;

/// Decimal places kept in the final result.
pub const RESULT_DECIMAL_PLACES: i32 = 3;

/// Player-dependent inputs of the formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiningModifiers {
    /// Mining efficiency attribute, added when the base speed exceeds 1.
    pub efficiency: f64,
    /// Haste level (0 = none).
    pub haste_level: u32,
    /// Mining fatigue level (0 = none).
    pub fatigue_level: u32,
    /// Block break speed attribute.
    pub block_break_speed: f64,
    /// Submerged mining speed attribute, applied while underwater.
    pub submerged_mining_speed: f64,
    /// Whether the player stands on the ground.
    pub on_ground: bool,
    /// Whether the underwater penalty applies.
    pub underwater: bool,
}

impl Default for MiningModifiers {
    fn default() -> Self {
        Self {
            efficiency: 0.0,
            haste_level: 0,
            fatigue_level: 0,
            block_break_speed: 1.0,
            submerged_mining_speed: 0.2,
            on_ground: true,
            underwater: false,
        }
    }
}

/// Speed factor of a mining fatigue level.
pub fn fatigue_multiplier(level: u32) -> f64 {
    match level {
        0 => 1.0,
        1 => 0.3,
        2 => 0.09,
        3 => 0.0027,
        _ => 0.00081,
    }
}

/// Speed factor of a haste level.
pub fn haste_multiplier(level: u32) -> f64 {
    f64::from(level) * 0.2 + 1.0
}

/// Mining speed after all player modifiers, before hardness is applied.
pub fn effective_speed(base_speed: f64, modifiers: &MiningModifiers) -> f64 {
    let mut speed = base_speed;
    if speed > 1.0 {
        speed += modifiers.efficiency;
    }
    speed *= haste_multiplier(modifiers.haste_level);
    speed *= fatigue_multiplier(modifiers.fatigue_level);
    speed *= modifiers.block_break_speed;
    if modifiers.underwater {
        speed *= modifiers.submerged_mining_speed;
    }
    if !modifiers.on_ground {
        speed /= 5.0;
    }
    speed
}

/// Progress contributed per tick, rounded to three decimal places.
///
/// Negative hardness never breaks (0.0); zero hardness breaks at once (1.0).
pub fn compute_progress(
    hardness: f64,
    correct_for_drops: bool,
    base_speed: f64,
    modifiers: &MiningModifiers,
) -> f64 {
    if hardness < 0.0 {
        return 0.0;
    }
    if hardness == 0.0 {
        return 1.0;
    }

    let divisor = if correct_for_drops {
        CORRECT_TOOL_DIVISOR
    } else {
        WRONG_TOOL_DIVISOR
    };
    let speed = effective_speed(base_speed, modifiers);
    round_to_decimal_places(speed / hardness / divisor, RESULT_DECIMAL_PLACES)
}

/// Round half away from zero to `places` decimal places.
pub fn round_to_decimal_places(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
