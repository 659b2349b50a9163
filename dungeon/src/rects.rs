/// A rectangle on the generation plane.
///
/// Minimum bounds are inclusive, maximum bounds are exclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rect {
    pub minx: i32,
    pub miny: i32,
    pub maxx: i32,
    pub maxy: i32,
}

impl Rect {
    /// Build a rectangle from its top left corner and its extents
    /// ```
    /// use dungeon::Rect;
    ///
    /// let rect = Rect::with_size([-3, 4], [4, 3]);
    /// assert_eq!(rect, Rect { minx: -3, miny: 4, maxx: 1, maxy: 7 });
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn with_size([x, y]: [i32; 2], [w, h]: [u8; 2]) -> Self {
        Self {
            minx: x,
            miny: y,
            maxx: x + w as i32,
            maxy: y + h as i32,
        }
    }

    /// Check if a points is inside this rect
    /// ```
    /// use dungeon::Rect;
    ///
    /// let rect = Rect { minx: -3, miny: 4, maxx: 1, maxy: 7};
    /// assert!(rect.contains(&[-3,5]));
    /// assert!(!rect.contains(&[1,5]));
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn contains(&self, [x, y]: &[i32; 2]) -> bool {
        self.minx <= *x && *x < self.maxx && self.miny <= *y && *y < self.maxy
    }

    #[inline(always)]
    #[must_use]
    pub const fn covers(&self, other: &Rect) -> bool {
        self.minx <= other.minx
            && other.maxx <= self.maxx
            && self.miny <= other.miny
            && other.maxy <= self.maxy
    }

    #[inline(always)]
    #[must_use]
    pub const fn collide(&self, other: &Rect) -> bool {
        self.maxx > other.minx
            && self.minx < other.maxx
            && self.maxy > other.miny
            && self.miny < other.maxy
    }

    #[inline(always)]
    #[must_use]
    pub const fn shape(&self) -> [u32; 2] {
        [self.maxx.abs_diff(self.minx), self.maxy.abs_diff(self.miny)]
    }

    /// Clearance between two rectangles.
    ///
    /// Counts the empty columns (or rows) strictly between the two, taking
    /// the larger axis. Touching rectangles have clearance 0, overlapping
    /// ones are negative.
    /// ```
    /// use dungeon::Rect;
    ///
    /// let a = Rect { minx: 0, miny: 0, maxx: 4, maxy: 4 };
    /// let b = Rect { minx: 7, miny: 2, maxx: 9, maxy: 6 };
    /// assert_eq!(a.clearance(&b), 3);
    /// assert_eq!(b.clearance(&a), 3);
    /// assert!(a.clearance(&Rect { minx: 2, miny: 2, maxx: 5, maxy: 5 }) < 0);
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn clearance(&self, other: &Rect) -> i32 {
        let gap_x = max(other.minx - self.maxx, self.minx - other.maxx);
        let gap_y = max(other.miny - self.maxy, self.miny - other.maxy);
        max(gap_x, gap_y)
    }

    /// Smallest rectangle covering both
    #[inline(always)]
    #[must_use]
    pub const fn union(&self, other: &Rect) -> Rect {
        Rect {
            minx: min(self.minx, other.minx),
            miny: min(self.miny, other.miny),
            maxx: max(self.maxx, other.maxx),
            maxy: max(self.maxy, other.maxy),
        }
    }

    /// Smallest rectangle covering this one and the given point
    #[inline(always)]
    #[must_use]
    pub const fn extend_to(&self, [x, y]: &[i32; 2]) -> Rect {
        self.union(&Rect {
            minx: *x,
            miny: *y,
            maxx: *x + 1,
            maxy: *y + 1,
        })
    }

    /// Grow the rectangle by `amount` on every side
    #[inline(always)]
    #[must_use]
    pub const fn grow(&self, amount: i32) -> Rect {
        Rect {
            minx: self.minx - amount,
            miny: self.miny - amount,
            maxx: self.maxx + amount,
            maxy: self.maxy + amount,
        }
    }

    /// Move the rectangle by the given offset
    #[inline(always)]
    #[must_use]
    pub const fn translate(&self, [dx, dy]: [i32; 2]) -> Rect {
        Rect {
            minx: self.minx + dx,
            miny: self.miny + dy,
            maxx: self.maxx + dx,
            maxy: self.maxy + dy,
        }
    }

    /// Convert global coordinates to internal ones
    /// ```
    /// use dungeon::Rect;
    ///
    /// let rect = Rect { minx: -3, miny: 4, maxx: 1, maxy: 7};
    /// assert_eq!(rect.global_to_internal(&[-3,5]), [0,1])
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn global_to_internal(&self, pos: &[i32; 2]) -> [u32; 2] {
        debug_assert!(self.contains(pos));
        [pos[0].abs_diff(self.minx), pos[1].abs_diff(self.miny)]
    }

    /// Get a linearized (row-major) map of the cells of this rectangle
    #[inline(always)]
    #[must_use]
    pub const fn linearized(&self) -> Linearized {
        Linearized(self)
    }

    /// Iterate over the cells of the rectangle, row by row
    pub fn cells(&self) -> impl Iterator<Item = [i32; 2]> + '_ {
        (self.miny..self.maxy).flat_map(move |y| (self.minx..self.maxx).map(move |x| [x, y]))
    }

    /// The four sides of the rectangle, as the lines of cells just inside it
    #[inline(always)]
    #[must_use]
    pub const fn side(&self, direction: Direction) -> Side {
        match direction {
            Direction::North => Side::Orizontal {
                y: self.miny,
                minx: self.minx,
                maxx: self.maxx,
            },
            Direction::South => Side::Orizontal {
                y: self.maxy - 1,
                minx: self.minx,
                maxx: self.maxx,
            },
            Direction::West => Side::Vertical {
                x: self.minx,
                miny: self.miny,
                maxy: self.maxy,
            },
            Direction::East => Side::Vertical {
                x: self.maxx - 1,
                miny: self.miny,
                maxy: self.maxy,
            },
        }
    }
}

pub struct Linearized<'a>(&'a Rect);

impl Linearized<'_> {
    /// Lenght of the linearized coordinates
    ///
    /// ```
    /// use dungeon::Rect;
    ///
    /// let rect = Rect { minx: -3, miny: 4, maxx: 1, maxy: 7};
    /// assert_eq!(rect.linearized().len(), 12);
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn len(&self) -> usize {
        let [x, y] = self.0.shape();
        x as usize * y as usize
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert global coordinates to linearized ones
    ///
    /// ```
    /// use dungeon::Rect;
    ///
    /// let rect = Rect { minx: -3, miny: 4, maxx: 1, maxy: 7};
    /// assert_eq!(rect.linearized().global_to_linear(&[-2,5]), 5);
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn global_to_linear(&self, pos: &[i32; 2]) -> usize {
        self.internal_to_linear(&self.0.global_to_internal(pos))
    }

    /// Convert internal coordinates to linearized ones
    ///
    /// ```
    /// use dungeon::Rect;
    ///
    /// let rect = Rect { minx: -3, miny: 4, maxx: 1, maxy: 7};
    /// assert_eq!(rect.linearized().internal_to_linear(&[2,1]), 6);
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn internal_to_linear(&self, pos: &[u32; 2]) -> usize {
        debug_assert!(pos[0] < self.0.shape()[0] && pos[1] < self.0.shape()[1]);
        let stride = self.0.shape()[0] as usize;
        pos[1] as usize * stride + pos[0] as usize
    }
}

/// A cardinal direction on the map. North is toward smaller y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Unit step in this direction
    #[inline(always)]
    #[must_use]
    pub const fn step(self) -> [i32; 2] {
        match self {
            Direction::North => [0, -1],
            Direction::South => [0, 1],
            Direction::East => [1, 0],
            Direction::West => [-1, 0],
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }
}

/// An orthogonal line of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Side {
    Vertical { x: i32, miny: i32, maxy: i32 },
    Orizontal { y: i32, minx: i32, maxx: i32 },
}
impl Side {
    #[inline(always)]
    #[must_use]
    pub const fn len(&self) -> i32 {
        let (Side::Vertical {
            miny: min,
            maxy: max,
            ..
        }
        | Side::Orizontal {
            minx: min,
            maxx: max,
            ..
        }) = self;
        *max - *min
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() <= 0
    }

    /// Cell at `offset` cells from the start of the line
    #[inline(always)]
    #[must_use]
    pub const fn at(&self, offset: i32) -> [i32; 2] {
        match *self {
            Side::Vertical { x, miny, .. } => [x, miny + offset],
            Side::Orizontal { y, minx, .. } => [minx + offset, y],
        }
    }
}

const fn max(a: i32, b: i32) -> i32 {
    if a > b {
        a
    } else {
        b
    }
}

const fn min(a: i32, b: i32) -> i32 {
    if a < b {
        a
    } else {
        b
    }
}
