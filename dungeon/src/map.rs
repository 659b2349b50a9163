use std::fmt;

use crate::{
    config::{Config, Vector},
    corridors::{route_corridors, Corridor},
    error::Error,
    grid::{Cell, Grid},
    rng::DungeonRng,
    rooms::{place_rooms, Room},
};

/// A generated dungeon map.
///
/// Created in a single pass by [`Map::new`] and immutable afterwards. The map
/// owns its grid, rooms, corridors and renderings: dropping it releases all of
/// them. It is neither `Clone` nor `Copy`.
#[derive(Debug)]
pub struct Map {
    config: Config,
    rooms: Vec<Room>,
    corridors: Vec<Corridor>,
    grid: Grid,
    ascii: String,
    bytes: Box<[u8]>,
}

impl Map {
    /// Generate the map described by `config`
    pub fn new(config: &Config) -> Result<Self, Error> {
        config.validate()?;
        let mut rng = DungeonRng::new(config.seed);

        // rooms first, so that corridors never change the rooms of a seed
        let mut rooms = place_rooms(config, &mut rng)?;
        let mut corridors = route_corridors(config, &rooms, &mut rng)?;
        let grid = Grid::rasterize(&mut rooms, &mut corridors)?;

        log::debug!(
            "seed {}: {} map with {} rooms",
            config.seed,
            grid.size(),
            rooms.len()
        );
        Ok(Self {
            config: *config,
            ascii: grid.to_ascii(),
            bytes: grid.to_bytes(),
            rooms,
            corridors,
            grid,
        })
    }

    /// Width and height of the map
    pub fn size(&self) -> Vector<u8> {
        self.grid.size()
    }

    /// One character per cell, rows terminated by `'\n'`
    pub fn as_str(&self) -> &str {
        &self.ascii
    }

    /// One code per cell, row-major, `width * height` long
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Rooms in placement order, in grid coordinates
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Corridors in routing order, in grid coordinates
    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    pub fn cell(&self, x: u8, y: u8) -> Option<Cell> {
        self.grid.get(x, y)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Config the map was generated from
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ascii)
    }
}
