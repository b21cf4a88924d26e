//! Map generation and expansion.

use super::types::{Region, RegionKind, WorldMap};
use crate::core::constants::MAP_EXPANSION_STEP;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

/// Names handed out to regions; repeats are allowed
pub const REGION_NAMES: [&str; 20] = [
    "Zhengzhou",
    "Luoyang",
    "Kaifeng",
    "Anyang",
    "Xinxiang",
    "Jiaozuo",
    "Puyang",
    "Xuchang",
    "Luohe",
    "Sanmenxia",
    "Nanyang",
    "Shangqiu",
    "Xinyang",
    "Zhoukou",
    "Zhumadian",
    "Pingdingshan",
    "Hebi",
    "Jiyuan",
    "Gongyi",
    "Lankao",
];

fn random_region_name(rng: &mut impl Rng) -> &'static str {
    REGION_NAMES.choose(rng).copied().unwrap_or(REGION_NAMES[0])
}

/// Builds a fresh `size`×`size` map with home at the (floored) center.
pub fn generate_map(size: usize, rng: &mut impl Rng) -> WorldMap {
    let center = size.saturating_sub(1) / 2;
    let mut map = WorldMap {
        size,
        regions: Vec::with_capacity(size * size),
        home: (center, center),
    };

    for y in 0..size {
        for x in 0..size {
            let id = map.id_for(x, y);
            let distance = map.distance_from_home(x, y);
            map.regions
                .push(Region::new(id, x, y, random_region_name(rng), distance));
        }
    }

    let home_id = map.home_id();
    if let Some(home) = map.region_mut(home_id) {
        home.kind = RegionKind::Home;
        home.explored = true;
    }

    map
}

/// Grows the map by a one-cell border on every side.
///
/// The old grid becomes the interior: its regions keep their name, kind and
/// explored flag while their coordinates, id and distance are recomputed.
/// Border regions are generated fresh.
pub fn expand_map(map: &mut WorldMap, rng: &mut impl Rng) {
    let old_size = map.size;
    let new_size = old_size + MAP_EXPANSION_STEP;
    let offset = MAP_EXPANSION_STEP / 2;

    map.size = new_size;
    map.home = (map.home.0 + offset, map.home.1 + offset);

    let mut old_regions = std::mem::take(&mut map.regions).into_iter();
    let mut regions = Vec::with_capacity(new_size * new_size);

    for y in 0..new_size {
        for x in 0..new_size {
            let id = map.id_for(x, y);
            let distance = map.distance_from_home(x, y);
            let interior = (offset..offset + old_size).contains(&x)
                && (offset..offset + old_size).contains(&y);

            // Old regions are row-major too, so the interior consumes them in order
            let relocated = if interior { old_regions.next() } else { None };
            let region = match relocated {
                Some(mut region) => {
                    region.id = id;
                    region.x = x;
                    region.y = y;
                    region.distance_from_home = distance;
                    region
                }
                None => Region::new(id, x, y, random_region_name(rng), distance),
            };
            regions.push(region);
        }
    }

    map.regions = regions;
    info!(
        "map expanded from {}x{} to {}x{}, home now region {}",
        old_size,
        old_size,
        new_size,
        new_size,
        map.home_id()
    );
}
