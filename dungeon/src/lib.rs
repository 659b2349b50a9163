//! Seeded room-and-corridor dungeon generator.
//!
//! ```
//! use dungeon::{Config, Map};
//!
//! let map = Map::new(&Config { seed: 42, ..Default::default() }).unwrap();
//! assert_eq!(map.rooms().len(), 11);
//! assert_eq!(map.as_bytes().len(), map.size().x as usize * map.size().y as usize);
//! ```

mod corridors;
mod error;
mod grid;
mod map;
mod rects;
mod rng;
mod rooms;

pub mod config;

pub use config::{Bounds, Config, PartialConfig, Vector};
pub use corridors::{Corridor, MAX_ROUTING_ATTEMPTS};
pub use error::{ConfigError, Error, ParseError};
pub use grid::{parse_ascii, Cell, Grid, MAP_MARGIN, MAX_MAP_SIZE};
pub use map::Map;
pub use rects::{Direction, Rect, Side};
pub use rooms::{Room, MAX_PLACEMENT_ATTEMPTS};

/// Generate the map described by `config`
pub fn generate(config: &Config) -> Result<Map, Error> {
    Map::new(config)
}
