use crate::{
    config::{Config, Vector},
    error::Error,
    grid::{MAP_MARGIN, MAX_MAP_SIZE},
    rects::{Direction, Rect},
    rng::DungeonRng,
};

/// Candidates drawn for a single room before giving up
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 64;

/// Attempts anchored on the previous room, before any placed room is accepted as anchor
const CHAINED_ATTEMPTS: u32 = MAX_PLACEMENT_ATTEMPTS * 3 / 4;

/// A placed room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Room {
    /// Placement index, also the connection order
    pub id: usize,
    pub rect: Rect,
}

impl Room {
    pub fn size(&self) -> Vector<u8> {
        let [w, h] = self.rect.shape();
        // room extents are drawn as u8
        Vector::new(w as u8, h as u8)
    }
}

/// Place exactly `config.rooms_count` rooms on the plane.
///
/// The first room sits at the origin, every other one is pushed against an
/// already placed room at a distance drawn from `rooms_spacing`. A candidate
/// is kept only if the clearance to its nearest room is inside
/// `rooms_spacing` and the rooms still fit in a map.
pub(crate) fn place_rooms(config: &Config, rng: &mut DungeonRng) -> Result<Vec<Room>, Error> {
    let limit = MAX_MAP_SIZE - 2 * MAP_MARGIN;
    let mut rooms: Vec<Room> = Vec::with_capacity(config.rooms_count);
    let mut bbox: Option<Rect> = None;

    for id in 0..config.rooms_count {
        let size = [
            rng.range(config.rooms_min_size.x, config.rooms_max_size.x),
            rng.range(config.rooms_min_size.y, config.rooms_max_size.y),
        ];
        if size.iter().any(|s| i32::from(*s) > limit) {
            return Err(Error::SizeOverflow {
                width: u32::from(size[0]) + 2 * MAP_MARGIN as u32,
                height: u32::from(size[1]) + 2 * MAP_MARGIN as u32,
            });
        }

        let rect = match bbox {
            None => Rect::with_size([0, 0], size),
            Some(bbox) => find_space(config, rng, &rooms, bbox, size, limit).ok_or(
                Error::PlacementExhausted {
                    room: id,
                    attempts: MAX_PLACEMENT_ATTEMPTS,
                },
            )?,
        };
        log::trace!("room {id}: placed at {rect:?}");
        bbox = Some(bbox.map_or(rect, |bbox| bbox.union(&rect)));
        rooms.push(Room { id, rect });
    }

    log::debug!("{} rooms placed, covering {:?}", rooms.len(), bbox);
    Ok(rooms)
}

fn find_space(
    config: &Config,
    rng: &mut DungeonRng,
    rooms: &[Room],
    bbox: Rect,
    size: [u8; 2],
    limit: i32,
) -> Option<Rect> {
    debug_assert!(!rooms.is_empty());
    let [w, h] = size.map(i32::from);
    let spacing = config.rooms_spacing;

    for attempt in 0..MAX_PLACEMENT_ATTEMPTS {
        let anchor = if attempt < CHAINED_ATTEMPTS {
            rooms[rooms.len() - 1].rect
        } else {
            rooms[rng.index(rooms.len())].rect
        };
        let direction = Direction::ALL[rng.index(Direction::ALL.len())];
        let gap = i32::from(rng.bounds(spacing));
        // keep at least one row (or column) facing the anchor
        let corner = match direction {
            Direction::North => [
                rng.range(anchor.minx - w + 1, anchor.maxx - 1),
                anchor.miny - gap - h,
            ],
            Direction::South => [
                rng.range(anchor.minx - w + 1, anchor.maxx - 1),
                anchor.maxy + gap,
            ],
            Direction::East => [
                anchor.maxx + gap,
                rng.range(anchor.miny - h + 1, anchor.maxy - 1),
            ],
            Direction::West => [
                anchor.minx - gap - w,
                rng.range(anchor.miny - h + 1, anchor.maxy - 1),
            ],
        };
        let rect = Rect::with_size(corner, size);

        let [bw, bh] = bbox.union(&rect).shape();
        if bw as i32 > limit || bh as i32 > limit {
            log::trace!("{rect:?}: rejected, map would be {bw}x{bh}");
            continue;
        }
        match rooms.iter().map(|room| room.rect.clearance(&rect)).min() {
            Some(nearest)
                if i32::from(spacing.min) <= nearest && nearest <= i32::from(spacing.max) =>
            {
                return Some(rect)
            }
            nearest => log::trace!("{rect:?}: rejected, clearance {nearest:?}"),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Bounds;

    fn config(rooms_count: usize) -> Config {
        Config {
            seed: 3,
            rooms_count,
            ..Default::default()
        }
    }

    #[test]
    fn places_the_requested_rooms() {
        let config = config(20);
        let rooms = place_rooms(&config, &mut DungeonRng::new(config.seed)).unwrap();
        assert_eq!(rooms.len(), 20);
        for (i, room) in rooms.iter().enumerate() {
            assert_eq!(room.id, i);
            let size = room.size();
            assert!((4..=7).contains(&size.x) && (4..=7).contains(&size.y));
            for other in &rooms[..i] {
                assert!(!room.rect.collide(&other.rect));
                assert!(room.rect.clearance(&other.rect) >= 3);
            }
        }
    }

    #[test]
    fn every_room_has_a_close_neighbour() {
        let config = config(15);
        let rooms = place_rooms(&config, &mut DungeonRng::new(config.seed)).unwrap();
        for (i, room) in rooms.iter().enumerate().skip(1) {
            let nearest = rooms[..i]
                .iter()
                .map(|other| other.rect.clearance(&room.rect))
                .min()
                .unwrap();
            assert!((3..=5).contains(&nearest), "room {i}: clearance {nearest}");
        }
    }

    #[test]
    fn first_room_is_at_origin() {
        let config = Config {
            rooms_count: 1,
            rooms_min_size: Vector::new(4, 4),
            rooms_max_size: Vector::new(4, 4),
            ..config(1)
        };
        let rooms = place_rooms(&config, &mut DungeonRng::new(1)).unwrap();
        assert_eq!(rooms, [Room { id: 0, rect: Rect::with_size([0, 0], [4, 4]) }]);
    }

    #[test]
    fn overcrowded_configs_give_up() {
        let config = Config {
            rooms_count: 1000,
            rooms_min_size: Vector::new(7, 7),
            rooms_max_size: Vector::new(7, 7),
            rooms_spacing: Bounds::new(20, 30),
            ..config(1000)
        };
        assert!(matches!(
            place_rooms(&config, &mut DungeonRng::new(config.seed)),
            Err(Error::PlacementExhausted { .. })
        ));
    }

    #[test]
    fn oversized_rooms_overflow() {
        let config = Config {
            rooms_min_size: Vector::new(254, 10),
            rooms_max_size: Vector::new(255, 10),
            ..config(1)
        };
        assert!(matches!(
            place_rooms(&config, &mut DungeonRng::new(0)),
            Err(Error::SizeOverflow { .. })
        ));
    }
}
