use rand::{thread_rng, Rng};

use dungeon::{parse_ascii, Bounds, Cell, Config, Map, Vector};

fn random_config(rng: &mut impl Rng) -> Config {
    config_with_spacing(rng, 0)
}

fn config_with_spacing(rng: &mut impl Rng, min_spacing: u8) -> Config {
    let min = Vector::new(rng.gen_range(1..=6), rng.gen_range(1..=6));
    let spacing = rng.gen_range(min_spacing..=4);
    let extension = rng.gen_range(0..=3);
    Config {
        seed: rng.gen(),
        rooms_count: rng.gen_range(1..=25),
        rooms_min_size: min,
        rooms_max_size: Vector::new(
            min.x + rng.gen_range(0..=4),
            min.y + rng.gen_range(0..=4),
        ),
        rooms_spacing: Bounds::new(spacing, spacing + rng.gen_range(0..=4)),
        path_extension: Bounds::new(extension, extension + rng.gen_range(0..=3)),
    }
}

#[test]
fn coherency() {
    let mut rng = thread_rng();
    for _ in 0..50 {
        let config = random_config(&mut rng);
        let first = Map::new(&config);
        let second = Map::new(&config);
        match (first, second) {
            (Ok(first), Ok(second)) => {
                assert_eq!(first.size(), second.size(), "{config:?}");
                assert_eq!(first.as_str(), second.as_str(), "{config:?}");
                assert_eq!(first.as_bytes(), second.as_bytes(), "{config:?}");
                assert_eq!(first.rooms(), second.rooms(), "{config:?}");
                assert_eq!(first.corridors(), second.corridors(), "{config:?}");
            }
            (Err(first), Err(second)) => assert_eq!(first, second, "{config:?}"),
            (first, second) => panic!(
                "{config:?}: runs disagree, {:?} vs {:?}",
                first.map(|_| ()),
                second.map(|_| ())
            ),
        }
    }
}

#[test]
fn renderings_describe_the_same_grid() {
    let mut rng = thread_rng();
    for _ in 0..50 {
        let config = random_config(&mut rng);
        let Ok(map) = Map::new(&config) else {
            continue;
        };
        let size = map.size();
        let decoded = parse_ascii(map.as_str()).expect("Only known characters are rendered");
        assert_eq!(decoded.len(), map.as_bytes().len());
        for (cell, byte) in decoded.iter().zip(map.as_bytes()) {
            assert_eq!(cell.byte(), *byte);
        }
        assert_eq!(map.as_str().lines().count(), size.y as usize);
        assert!(map.as_str().lines().all(|l| l.len() == size.x as usize));
        assert_eq!(map.grid().cells(), &decoded[..]);
    }
}

#[test]
fn corridors_link_their_rooms() {
    let mut rng = thread_rng();
    for _ in 0..50 {
        let config = random_config(&mut rng);
        let Ok(map) = Map::new(&config) else {
            continue;
        };
        assert_eq!(map.corridors().len(), map.rooms().len() - 1);
        for corridor in map.corridors() {
            assert_eq!(corridor.to + 1, corridor.from);
            let linked = [&map.rooms()[corridor.from], &map.rooms()[corridor.to]];
            for (i, [x, y]) in corridor.cells.iter().enumerate() {
                let pos = [*x, *y];
                let cell = map.cell(*x as u8, *y as u8);
                let door = i == 0 || i == corridor.len() - 1;
                if !door && linked.iter().any(|r| r.rect.contains(&pos)) {
                    assert_eq!(cell, Some(Cell::Room), "{config:?}: [{x}, {y}]");
                    continue;
                }
                assert_eq!(
                    cell,
                    Some(Cell::Corridor),
                    "{config:?}: corridor cell [{x}, {y}] is {cell:?}"
                );
                assert!(map.rooms().iter().all(|r| !r.rect.contains(&pos)));
            }
        }
    }
}

#[test]
fn spaced_rooms_mostly_generate() {
    let mut rng = thread_rng();
    let mut failures = vec![];
    for _ in 0..50 {
        let config = config_with_spacing(&mut rng, 1);
        if let Err(err) = Map::new(&config) {
            failures.push((config, err));
        }
    }
    assert!(failures.len() <= 5, "{} failures: {failures:#?}", failures.len());
}
