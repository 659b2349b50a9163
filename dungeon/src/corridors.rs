use crate::{
    config::{Bounds, Config},
    error::Error,
    rects::{Direction, Rect},
    rng::DungeonRng,
    rooms::Room,
};

/// Full redraws of exits for a pair of rooms before giving up
pub const MAX_ROUTING_ATTEMPTS: u32 = 32;

/// A corridor between two rooms
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Corridor {
    /// Id of the room the corridor leaves from
    pub from: usize,
    /// Id of the room the corridor leads to
    pub to: usize,
    /// Walk from the door of `from` to the door of `to`.
    ///
    /// Consecutive cells are 4-adjacent. A cell may appear twice where the
    /// bend doubles back over an exit. Doors are outside every room, the rest
    /// of the walk may cut through `from` and `to` but no other room.
    pub cells: Vec<[i32; 2]>,
}

impl Corridor {
    /// Length of the walk, in cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Connect every room to the one placed before it.
pub(crate) fn route_corridors(
    config: &Config,
    rooms: &[Room],
    rng: &mut DungeonRng,
) -> Result<Vec<Corridor>, Error> {
    let router = Router {
        rooms,
        extension: config.path_extension,
    };
    let corridors = rooms
        .windows(2)
        .map(|pair| router.connect(&pair[1], &pair[0], rng))
        .collect::<Result<Vec<_>, _>>()?;
    log::debug!(
        "{} corridors routed, {} cells",
        corridors.len(),
        corridors.iter().map(Corridor::len).sum::<usize>()
    );
    Ok(corridors)
}

struct Router<'r> {
    rooms: &'r [Room],
    extension: Bounds,
}

/// A door just outside a wall, with the straight run that leaves it
#[derive(Debug, Clone)]
struct Exit {
    cells: Vec<[i32; 2]>,
}

impl Exit {
    fn door(&self) -> [i32; 2] {
        self.cells[0]
    }

    fn end(&self) -> [i32; 2] {
        // an exit holds at least its door
        self.cells[self.cells.len() - 1]
    }
}

impl Router<'_> {
    fn connect(&self, from: &Room, to: &Room, rng: &mut DungeonRng) -> Result<Corridor, Error> {
        for attempt in 0..MAX_ROUTING_ATTEMPTS {
            let ends = [from.id, to.id];
            let exits_from = self.exits(&from.rect, &to.rect, ends, rng);
            let exits_to = self.exits(&to.rect, &from.rect, ends, rng);
            let horizontal_first = rng.coin();

            for a in &exits_from {
                for b in &exits_to {
                    for horizontal_first in [horizontal_first, !horizontal_first] {
                        let cells = join(a, b, horizontal_first);
                        if self.avoids_others(&cells, ends) {
                            log::trace!(
                                "corridor {}->{}: {} cells, attempt {attempt}",
                                from.id,
                                to.id,
                                cells.len()
                            );
                            return Ok(Corridor {
                                from: from.id,
                                to: to.id,
                                cells,
                            });
                        }
                    }
                }
            }
            log::trace!("corridor {}->{}: attempt {attempt} is blocked", from.id, to.id);
        }
        Err(Error::RoutingExhausted {
            from: from.id,
            to: to.id,
            attempts: MAX_ROUTING_ATTEMPTS,
        })
    }

    /// Draw one exit per wall of `room`, ordered from the wall facing `other`
    /// to the one turning its back on it. Exits whose door is inside a room, or
    /// whose stub runs into a room other than `ends`, are dropped.
    fn exits(
        &self,
        room: &Rect,
        other: &Rect,
        ends: [usize; 2],
        rng: &mut DungeonRng,
    ) -> Vec<Exit> {
        let facing = facing(room, other);
        let mut sides = if facing.is_vertical() {
            [Direction::East, Direction::West]
        } else {
            [Direction::North, Direction::South]
        };
        rng.shuffle(&mut sides);

        [facing, sides[0], sides[1], facing.opposite()]
            .into_iter()
            .map(|direction| self.exit(room, direction, rng))
            .filter(|exit| self.is_outside(&exit.door()) && self.avoids_others(&exit.cells, ends))
            .collect()
    }

    fn exit(&self, room: &Rect, direction: Direction, rng: &mut DungeonRng) -> Exit {
        let wall = room.side(direction);
        let len = wall.len();
        // corners only when the wall is too short to avoid them
        let offset = if len >= 3 {
            rng.range(1, len - 2)
        } else {
            rng.range(0, len - 1)
        };
        let extension = i32::from(rng.bounds(self.extension));
        let [x, y] = wall.at(offset);
        let [dx, dy] = direction.step();
        Exit {
            cells: (1..=extension + 1)
                .map(|k| [x + k * dx, y + k * dy])
                .collect(),
        }
    }

    fn is_outside(&self, cell: &[i32; 2]) -> bool {
        !self.rooms.iter().any(|room| room.rect.contains(cell))
    }

    /// No cell is inside a room, except the rooms being linked
    fn avoids_others(&self, cells: &[[i32; 2]], ends: [usize; 2]) -> bool {
        !cells.iter().any(|cell| {
            self.rooms
                .iter()
                .filter(|room| !ends.contains(&room.id))
                .any(|room| room.rect.contains(cell))
        })
    }
}

/// Side of `room` that `other` lies beyond
fn facing(room: &Rect, other: &Rect) -> Direction {
    let gap_x = (other.minx - room.maxx).max(room.minx - other.maxx);
    let gap_y = (other.miny - room.maxy).max(room.miny - other.maxy);
    if gap_x >= gap_y {
        if other.minx + other.maxx > room.minx + room.maxx {
            Direction::East
        } else {
            Direction::West
        }
    } else if other.miny + other.maxy > room.miny + room.maxy {
        Direction::South
    } else {
        Direction::North
    }
}

/// Link two exits with an L shaped bend
fn join(from: &Exit, to: &Exit, horizontal_first: bool) -> Vec<[i32; 2]> {
    let [ax, ay] = from.end();
    let [bx, by] = to.end();
    let corner = if horizontal_first { [bx, ay] } else { [ax, by] };

    let mut cells = from.cells.clone();
    walk(&mut cells, corner);
    walk(&mut cells, [bx, by]);
    cells.extend(to.cells.iter().rev().skip(1));
    cells
}

/// Extend the walk in a straight line up to `target`
fn walk(cells: &mut Vec<[i32; 2]>, target: [i32; 2]) {
    let [mut x, mut y] = cells[cells.len() - 1];
    debug_assert!(x == target[0] || y == target[1]);
    while [x, y] != target {
        x += (target[0] - x).signum();
        y += (target[1] - y).signum();
        cells.push([x, y]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: usize, corner: [i32; 2], size: [u8; 2]) -> Room {
        Room {
            id,
            rect: Rect::with_size(corner, size),
        }
    }

    fn config() -> Config {
        Config {
            path_extension: Bounds::new(2, 4),
            ..Default::default()
        }
    }

    fn adjacent([ax, ay]: [i32; 2], [bx, by]: [i32; 2]) -> bool {
        ax.abs_diff(bx) + ay.abs_diff(by) == 1
    }

    fn touches(rect: &Rect, cell: [i32; 2]) -> bool {
        rect.cells().any(|c| adjacent(c, cell))
    }

    #[test]
    fn facing_follows_the_widest_gap() {
        let a = Rect::with_size([0, 0], [4, 4]);
        assert_eq!(facing(&a, &Rect::with_size([8, 1], [4, 4])), Direction::East);
        assert_eq!(facing(&a, &Rect::with_size([-9, 2], [4, 4])), Direction::West);
        assert_eq!(facing(&a, &Rect::with_size([1, 7], [4, 4])), Direction::South);
        assert_eq!(facing(&a, &Rect::with_size([1, -6], [4, 4])), Direction::North);
    }

    #[test]
    fn walks_are_continuous() {
        let from = Exit {
            cells: vec![[0, 0], [1, 0], [2, 0]],
        };
        let to = Exit {
            cells: vec![[6, 5], [6, 4]],
        };
        for horizontal_first in [true, false] {
            let cells = join(&from, &to, horizontal_first);
            assert_eq!(cells[0], [0, 0]);
            assert_eq!(cells[cells.len() - 1], [6, 5]);
            for pair in cells.windows(2) {
                assert!(adjacent(pair[0], pair[1]), "{pair:?}");
            }
        }
    }

    #[test]
    fn connects_neighbours() {
        let rooms = [room(0, [0, 0], [5, 5]), room(1, [9, 1], [4, 6])];
        let corridors = route_corridors(&config(), &rooms, &mut DungeonRng::new(5)).unwrap();
        assert_eq!(corridors.len(), 1);
        let corridor = &corridors[0];
        assert_eq!((corridor.from, corridor.to), (1, 0));
        assert!(touches(&rooms[1].rect, corridor.cells[0]));
        assert!(touches(&rooms[0].rect, corridor.cells[corridor.len() - 1]));
        for door in [corridor.cells[0], corridor.cells[corridor.len() - 1]] {
            assert!(rooms.iter().all(|r| !r.rect.contains(&door)));
        }
        for pair in corridor.cells.windows(2) {
            assert!(adjacent(pair[0], pair[1]));
        }
    }

    #[test]
    fn exits_overshoot_by_the_drawn_extension() {
        let rooms = [room(0, [0, 0], [5, 5])];
        let router = Router {
            rooms: &rooms,
            extension: Bounds::new(3, 3),
        };
        let mut rng = DungeonRng::new(9);
        let exit = router.exit(&rooms[0].rect, Direction::East, &mut rng);
        assert_eq!(exit.cells.len(), 4);
        let [x, y] = exit.cells[0];
        assert_eq!(x, 5);
        // never out of a corner
        assert!((1..4).contains(&y));
        assert_eq!(exit.end(), [8, y]);
    }

    #[test]
    fn stubs_may_run_into_the_linked_rooms() {
        // the gap is shorter than any stub, and the long walls are covered
        let rooms = [
            room(0, [0, 0], [5, 5]),
            room(1, [7, 0], [5, 5]),
            room(2, [-2, -8], [16, 7]),
            room(3, [-2, 6], [16, 7]),
        ];
        let router = Router {
            rooms: &rooms,
            extension: Bounds::new(4, 4),
        };
        let corridor = router
            .connect(&rooms[1], &rooms[0], &mut DungeonRng::new(4))
            .unwrap();
        let doors = [corridor.cells[0], corridor.cells[corridor.len() - 1]];
        for door in doors {
            assert!(rooms.iter().all(|r| !r.rect.contains(&door)), "{door:?}");
        }
        for cell in &corridor.cells {
            assert!(!rooms[2].rect.contains(cell) && !rooms[3].rect.contains(cell));
        }
        for pair in corridor.cells.windows(2) {
            assert!(adjacent(pair[0], pair[1]));
        }
    }

    #[test]
    fn routes_around_a_blocking_room() {
        // room 2 sits right between its predecessor and a wall of its own
        let rooms = [
            room(0, [0, 0], [5, 5]),
            room(1, [20, 0], [5, 5]),
            room(2, [10, -4], [5, 13]),
        ];
        let corridors =
            route_corridors(&config(), &rooms[..2], &mut DungeonRng::new(11)).unwrap();
        assert_eq!(corridors.len(), 1);
        let corridors = route_corridors(&config(), &rooms, &mut DungeonRng::new(11));
        let corridors = corridors.unwrap();
        for corridor in &corridors {
            for cell in &corridor.cells {
                assert!(rooms
                    .iter()
                    .filter(|r| r.id != corridor.from && r.id != corridor.to)
                    .all(|r| !r.rect.contains(cell)));
            }
        }
    }

    #[test]
    fn gives_up_when_walled_in() {
        // room 1 is enclosed in a ring of rooms, no exit survives
        let mut rooms = vec![room(0, [0, 0], [3, 3]), room(1, [20, 20], [3, 3])];
        for (i, corner) in [[17, 17], [17, 23], [17, 20], [23, 17], [23, 20], [23, 23], [20, 17], [20, 23]]
            .into_iter()
            .enumerate()
        {
            rooms.push(room(2 + i, corner, [3, 3]));
        }
        let config = Config {
            path_extension: Bounds::new(1, 1),
            ..Default::default()
        };
        assert_eq!(
            route_corridors(&config, &rooms, &mut DungeonRng::new(0)),
            Err(Error::RoutingExhausted {
                from: 1,
                to: 0,
                attempts: MAX_ROUTING_ATTEMPTS
            })
        );
    }
}
