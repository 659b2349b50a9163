use std::{fmt, str::FromStr};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ParseError};

/// A pair of per-axis values
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vector<T> {
    pub x: T,
    pub y: T,
}

impl<T> Vector<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Parses `WxH`
impl FromStr for Vector<u8> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(|c| c == 'x' || c == 'X')
            .ok_or_else(|| ParseError::Extent(s.to_owned()))?;
        Ok(Self {
            x: x.trim().parse()?,
            y: y.trim().parse()?,
        })
    }
}

/// An inclusive `[min, max]` range
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: u8,
    pub max: u8,
}

impl Bounds {
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn contains(&self, value: u8) -> bool {
        self.min <= value && value <= self.max
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// Parses `MIN..MAX` or `MIN,MAX`
impl FromStr for Bounds {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = s
            .split_once("..")
            .or_else(|| s.split_once(','))
            .ok_or_else(|| ParseError::Bounds(s.to_owned()))?;
        Ok(Self {
            min: min.trim().parse()?,
            max: max.trim().parse()?,
        })
    }
}

/// Config for a dungeon
///
/// The layout is shared with C callers and must not change.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Config {
    /// Seed of the dungeon
    pub seed: u32,
    /// Number of rooms to place
    pub rooms_count: usize,
    /// Smallest room extents, per axis
    pub rooms_min_size: Vector<u8>,
    /// Largest room extents, per axis
    pub rooms_max_size: Vector<u8>,
    /// Clearance between a room and its nearest neighbour
    pub rooms_spacing: Bounds,
    /// How far a corridor runs straight out of a wall before turning
    pub path_extension: Bounds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: 0,
            rooms_count: 11,
            rooms_min_size: Vector::new(4, 4),
            rooms_max_size: Vector::new(7, 7),
            rooms_spacing: Bounds::new(3, 5),
            path_extension: Bounds::new(2, 4),
        }
    }
}

impl Config {
    /// Check the config before any generation happens
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rooms_count == 0 {
            return Err(ConfigError::NoRooms);
        }
        if self.rooms_min_size.x == 0 || self.rooms_min_size.y == 0 {
            return Err(ConfigError::ZeroRoomSize);
        }
        let pairs = [
            ("rooms_size.x", self.rooms_min_size.x, self.rooms_max_size.x),
            ("rooms_size.y", self.rooms_min_size.y, self.rooms_max_size.y),
            ("rooms_spacing", self.rooms_spacing.min, self.rooms_spacing.max),
            ("path_extension", self.path_extension.min, self.path_extension.max),
        ];
        for (field, min, max) in pairs {
            if min > max {
                return Err(ConfigError::InvertedBounds { field, min, max });
            }
        }
        Ok(())
    }
}

/// Partial config for a dungeon
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Parser, Default)]
pub struct PartialConfig {
    /// Seed of the dungeon
    #[clap(long)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// Number of rooms
    #[clap(short, long = "rooms")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms_count: Option<usize>,
    /// Minimum size of a room, as WxH
    #[clap(long = "min")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms_min_size: Option<Vector<u8>>,
    /// Maximum size of a room, as WxH
    #[clap(long = "max")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms_max_size: Option<Vector<u8>>,
    /// Clearance to the nearest room, as MIN..MAX
    #[clap(long = "spacing")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms_spacing: Option<Bounds>,
    /// Straight corridor run out of a wall, as MIN..MAX
    #[clap(long = "extension")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_extension: Option<Bounds>,
}
impl PartialConfig {
    pub fn merge(self, other: PartialConfig) -> Self {
        Self {
            seed: other.seed.or(self.seed),
            rooms_count: other.rooms_count.or(self.rooms_count),
            rooms_min_size: other.rooms_min_size.or(self.rooms_min_size),
            rooms_max_size: other.rooms_max_size.or(self.rooms_max_size),
            rooms_spacing: other.rooms_spacing.or(self.rooms_spacing),
            path_extension: other.path_extension.or(self.path_extension),
        }
    }
    pub fn or_defaults(self) -> Config {
        let default = Config::default();
        Config {
            seed: self.seed.unwrap_or(default.seed),
            rooms_count: self.rooms_count.unwrap_or(default.rooms_count),
            rooms_min_size: self.rooms_min_size.unwrap_or(default.rooms_min_size),
            rooms_max_size: self.rooms_max_size.unwrap_or(default.rooms_max_size),
            rooms_spacing: self.rooms_spacing.unwrap_or(default.rooms_spacing),
            path_extension: self.path_extension.unwrap_or(default.path_extension),
        }
    }
}
