//! World map data structures.

use crate::core::constants::MAP_EXPANSION_STEP;
use serde::Serialize;

/// What kind of region a grid cell is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegionKind {
    /// Starting region - rest and shop live here
    Home,
    /// Everything else
    Wild,
}

impl RegionKind {
    /// Returns the display character for this region kind
    pub fn icon(&self) -> char {
        match self {
            RegionKind::Home => 'H',
            RegionKind::Wild => '?',
        }
    }
}

/// A single cell of the explorable map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    /// 1-based, row-major id
    pub id: usize,
    pub x: usize,
    pub y: usize,
    pub name: &'static str,
    pub kind: RegionKind,
    pub explored: bool,
    /// Manhattan distance to the home region
    pub distance_from_home: u32,
}

impl Region {
    pub fn new(id: usize, x: usize, y: usize, name: &'static str, distance: u32) -> Self {
        Self {
            id,
            x,
            y,
            name,
            kind: RegionKind::Wild,
            explored: false,
            distance_from_home: distance,
        }
    }

    pub fn is_home(&self) -> bool {
        self.kind == RegionKind::Home
    }
}

/// Square grid of regions around a single home region
#[derive(Debug, Clone, Serialize)]
pub struct WorldMap {
    pub(super) size: usize,
    /// Regions in row-major order; index = id - 1
    pub(super) regions: Vec<Region>,
    pub(super) home: (usize, usize),
}

impl WorldMap {
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of regions (size²)
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn home_position(&self) -> (usize, usize) {
        self.home
    }

    pub fn home_id(&self) -> usize {
        self.id_for(self.home.0, self.home.1)
    }

    pub fn home(&self) -> &Region {
        &self.regions[self.home_id() - 1]
    }

    /// Id of the cell at (x, y). Does not check bounds.
    pub fn id_for(&self, x: usize, y: usize) -> usize {
        y * self.size + x + 1
    }

    /// Looks up a region by id; ids outside the grid return None
    pub fn region(&self, id: usize) -> Option<&Region> {
        id.checked_sub(1).and_then(|index| self.regions.get(index))
    }

    pub fn region_mut(&mut self, id: usize) -> Option<&mut Region> {
        id.checked_sub(1).and_then(|index| self.regions.get_mut(index))
    }

    pub fn region_at(&self, x: usize, y: usize) -> Option<&Region> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.region(self.id_for(x, y))
    }

    /// Maps an id from the grid as it was before the last expansion to the
    /// id the same region carries now.
    pub fn relocate_id(&self, old_id: usize) -> Option<usize> {
        let old_size = self.size.checked_sub(MAP_EXPANSION_STEP)?;
        let index = old_id.checked_sub(1)?;
        if old_size == 0 || index >= old_size * old_size {
            return None;
        }
        let offset = MAP_EXPANSION_STEP / 2;
        let (x, y) = (index % old_size, index / old_size);
        Some(self.id_for(x + offset, y + offset))
    }

    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Marks a region explored. Returns true only the first time.
    pub fn mark_explored(&mut self, id: usize) -> bool {
        match self.region_mut(id) {
            Some(region) if !region.explored => {
                region.explored = true;
                true
            }
            _ => false,
        }
    }

    pub fn explored_count(&self) -> usize {
        self.regions.iter().filter(|r| r.explored).count()
    }

    pub fn all_explored(&self) -> bool {
        self.regions.iter().all(|r| r.explored)
    }

    /// Manhattan distance from (x, y) to home
    pub fn distance_from_home(&self, x: usize, y: usize) -> u32 {
        (x.abs_diff(self.home.0) + y.abs_diff(self.home.1)) as u32
    }

    /// Farthest any region can be from home on a grid of this size
    pub fn max_distance(&self) -> u32 {
        (self.size.saturating_sub(1) * 2) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_map() -> WorldMap {
        let mut regions = Vec::new();
        for y in 0..3usize {
            for x in 0..3usize {
                let id = y * 3 + x + 1;
                let distance = (x.abs_diff(1) + y.abs_diff(1)) as u32;
                regions.push(Region::new(id, x, y, "Kaifeng", distance));
            }
        }
        regions[4].kind = RegionKind::Home;
        regions[4].explored = true;
        WorldMap {
            size: 3,
            regions,
            home: (1, 1),
        }
    }

    #[test]
    fn test_region_starts_unexplored_wild() {
        let region = Region::new(7, 1, 2, "Luoyang", 3);
        assert!(!region.explored);
        assert!(!region.is_home());
        assert_eq!(region.kind.icon(), '?');
        assert_eq!(region.distance_from_home, 3);
    }

    #[test]
    fn test_lookup_out_of_range_returns_none() {
        let map = tiny_map();
        assert!(map.region(0).is_none());
        assert!(map.region(10).is_none());
        assert!(map.region(9).is_some());
        assert!(map.region_at(3, 0).is_none());
        assert_eq!(map.region_at(2, 2).map(|r| r.id), Some(9));
    }

    #[test]
    fn test_home_lookup() {
        let map = tiny_map();
        assert_eq!(map.home_id(), 5);
        assert!(map.home().is_home());
        assert_eq!(map.home().kind.icon(), 'H');
    }

    #[test]
    fn test_mark_explored_only_once() {
        let mut map = tiny_map();
        assert_eq!(map.explored_count(), 1);
        assert!(map.mark_explored(1));
        assert!(!map.mark_explored(1));
        assert!(!map.mark_explored(42));
        assert_eq!(map.explored_count(), 2);
        assert!(!map.all_explored());
    }

    #[test]
    fn test_distance_and_max_distance() {
        let map = tiny_map();
        assert_eq!(map.distance_from_home(0, 0), 2);
        assert_eq!(map.distance_from_home(1, 1), 0);
        assert_eq!(map.max_distance(), 4);
    }

    #[test]
    fn test_relocate_id_after_growth() {
        // Read the 3x3 map as if it had just grown from a 1x1
        let map = tiny_map();
        assert_eq!(map.relocate_id(1), Some(5));
        assert_eq!(map.relocate_id(2), None);
        assert_eq!(map.relocate_id(0), None);
    }
}
