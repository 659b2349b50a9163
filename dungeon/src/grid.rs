use std::fmt;

use crate::{
    config::Vector,
    corridors::Corridor,
    error::Error,
    rects::Rect,
    rooms::Room,
};

/// Empty cells left around the content of a map, on every side
pub const MAP_MARGIN: i32 = 1;
/// Largest width or height of a map
pub const MAX_MAP_SIZE: i32 = u8::MAX as i32;

/// State of a single cell of the map
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty = 0,
    Room = 1,
    Corridor = 2,
}

impl Cell {
    /// Code used in the byte rendering
    #[inline(always)]
    #[must_use]
    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Character used in the ASCII rendering
    #[inline(always)]
    #[must_use]
    pub const fn ascii(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Room => '#',
            Cell::Corridor => '+',
        }
    }

    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Cell> {
        match byte {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Room),
            2 => Some(Cell::Corridor),
            _ => None,
        }
    }

    #[must_use]
    pub const fn from_ascii(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Room),
            '+' => Some(Cell::Corridor),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ascii())
    }
}

/// A frozen, row-major grid of cells
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u8,
    height: u8,
    cells: Box<[Cell]>,
}

impl Grid {
    /// Paint rooms and corridors on a grid just big enough to hold them.
    ///
    /// Rooms and corridors are moved in place to grid coordinates.
    pub(crate) fn rasterize(rooms: &mut [Room], corridors: &mut [Corridor]) -> Result<Self, Error> {
        let content = rooms
            .iter()
            .map(|room| room.rect)
            .reduce(|a, b| a.union(&b))
            .unwrap_or(Rect::with_size([0, 0], [0, 0]));
        let content = corridors
            .iter()
            .flat_map(|corridor| corridor.cells.iter())
            .fold(content, |bbox, cell| bbox.extend_to(cell));
        let bounds = content.grow(MAP_MARGIN);
        let [width, height] = bounds.shape();
        if width > MAX_MAP_SIZE as u32 || height > MAX_MAP_SIZE as u32 {
            return Err(Error::SizeOverflow { width, height });
        }

        // move everything so that the map starts at [0, 0]
        let offset = [-bounds.minx, -bounds.miny];
        for room in rooms.iter_mut() {
            room.rect = room.rect.translate(offset);
        }
        for corridor in corridors.iter_mut() {
            for [x, y] in corridor.cells.iter_mut() {
                *x += offset[0];
                *y += offset[1];
            }
        }
        let bounds = bounds.translate(offset);
        let l = bounds.linearized();
        log::debug!("{bounds:?}: painting {width}x{height} grid");

        let mut cells = vec![Cell::Empty; l.len()].into_boxed_slice();
        for room in rooms.iter() {
            debug_assert!(bounds.covers(&room.rect));
            for pos in room.rect.cells() {
                cells[l.global_to_linear(&pos)] = Cell::Room;
            }
        }
        for pos in corridors.iter().flat_map(|corridor| corridor.cells.iter()) {
            let cell = &mut cells[l.global_to_linear(pos)];
            if *cell != Cell::Room {
                *cell = Cell::Corridor;
            }
        }

        Ok(Self {
            width: width as u8,
            height: height as u8,
            cells,
        })
    }

    pub fn size(&self) -> Vector<u8> {
        Vector::new(self.width, self.height)
    }

    /// Cell at the given position, if inside the grid
    pub fn get(&self, x: u8, y: u8) -> Option<Cell> {
        (x < self.width && y < self.height)
            .then(|| self.cells[usize::from(y) * usize::from(self.width) + usize::from(x)])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One code per cell, row-major
    pub fn to_bytes(&self) -> Box<[u8]> {
        self.cells.iter().map(|cell| cell.byte()).collect()
    }

    /// One character per cell, each row terminated by a newline
    pub fn to_ascii(&self) -> String {
        let mut ascii = String::with_capacity(self.cells.len() + usize::from(self.height));
        if self.width == 0 {
            return ascii;
        }
        for row in self.cells.chunks(usize::from(self.width)) {
            ascii.extend(row.iter().map(|cell| cell.ascii()));
            ascii.push('\n');
        }
        ascii
    }
}

/// Decode an ASCII rendering back into cells
pub fn parse_ascii(ascii: &str) -> Option<Vec<Cell>> {
    ascii
        .chars()
        .filter(|c| *c != '\n')
        .map(Cell::from_ascii)
        .collect()
}
