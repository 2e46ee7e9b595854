//! Fixed table-game rule constants.

/// Consecutive qualifying throws required to catch fire.
pub const ON_FIRE_THRESHOLD: u32 = 3;

/// Standard sink value.
pub const SINK_POINTS_STANDARD: u32 = 3;

/// House-rule sink value.
pub const SINK_POINTS_HOUSE: u32 = 5;

/// The only sink valuations a match may be configured with.
pub fn valid_sink_points(points: u32) -> bool {
    points == SINK_POINTS_STANDARD || points == SINK_POINTS_HOUSE
}
