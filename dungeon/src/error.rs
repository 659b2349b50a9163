use std::num::ParseIntError;

use thiserror::Error;

/// A config that cannot describe any dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least one room is required")]
    NoRooms,
    #[error("rooms must be at least 1x1")]
    ZeroRoomSize,
    #[error("{field}: minimum {min} is bigger than maximum {max}")]
    InvertedBounds {
        field: &'static str,
        min: u8,
        max: u8,
    },
}

/// Failure of a generation pass
///
/// Everything but `InvalidConfig` means the config was well formed but could
/// not be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("cannot place room {room} after {attempts} attempts")]
    PlacementExhausted { room: usize, attempts: u32 },
    #[error("cannot route a corridor from room {from} to room {to} after {attempts} attempts")]
    RoutingExhausted {
        from: usize,
        to: usize,
        attempts: u32,
    },
    #[error("map would be {width}x{height}, but cannot exceed 255x255")]
    SizeOverflow { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected an extent as WxH, got {0:?}")]
    Extent(String),
    #[error("expected bounds as MIN..MAX, got {0:?}")]
    Bounds(String),
    #[error(transparent)]
    Int(#[from] ParseIntError),
}
