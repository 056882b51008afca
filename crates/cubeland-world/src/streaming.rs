use crate::grid::BlockGrid;
use crate::sink::RenderSink;
use cubeland_core::math::{distance_sq, scan_half_extent, voxel_at};
use cubeland_core::types::{PresentationHandle, VoxelCoord};
use glam::{IVec3, Vec3};
use std::collections::HashMap;

/// Counters from one visibility pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassStats {
    pub evicted: u32,
    pub admitted: u32,
    /// Cells looked up during admission.
    pub scanned: u32,
    /// Visible set size after the pass.
    pub visible: u32,
}

/// The subset of grid blocks within render distance of a moving reference
/// point, keyed like the grid and mapped to the renderer's handle.
///
/// Every key is also a key of the grid the set is refreshed against; callers
/// that remove a block from the grid must call [`VisibleSet::retract_one`]
/// in the same step.
#[derive(Debug)]
pub struct VisibleSet {
    radius_sq: f32,
    /// Half-width of the admission cube, `ceil(radius)`.
    half_extent: i32,
    /// Upper y bound of the admission band.
    scan_height: i32,
    entries: HashMap<VoxelCoord, PresentationHandle>,
}

impl VisibleSet {
    pub fn new(render_distance: f32, scan_height: i32) -> Self {
        Self {
            radius_sq: render_distance * render_distance,
            half_extent: scan_half_extent(render_distance),
            scan_height,
            entries: HashMap::new(),
        }
    }

    /// Whether `coord` passes the distance test for `reference`.
    pub fn in_range(&self, coord: VoxelCoord, reference: Vec3) -> bool {
        distance_sq(coord, reference) <= self.radius_sq
    }

    /// Two-phase pass: evict out-of-range (or no longer existing) entries,
    /// then admit in-range blocks from the bounded neighbourhood of
    /// `reference`.
    ///
    /// Admission scans `floor(reference) ± ceil(R)` on x and z and the same
    /// window clamped to `0..=scan_height` on y, never the whole grid.
    pub fn refresh(
        &mut self,
        grid: &BlockGrid,
        reference: Vec3,
        sink: &mut dyn RenderSink,
    ) -> PassStats {
        let mut stats = PassStats::default();
        let radius_sq = self.radius_sq;

        // Phase 1: evict
        self.entries.retain(|&coord, &mut handle| {
            let keep = grid.contains(coord) && distance_sq(coord, reference) <= radius_sq;
            if !keep {
                sink.retract(coord, handle);
                stats.evicted += 1;
            }
            keep
        });

        // Phase 2: admit
        let center = voxel_at(reference);
        let r = self.half_extent;
        let y_lo = (center.y - r).max(0);
        let y_hi = (center.y + r).min(self.scan_height);
        for x in center.x - r..=center.x + r {
            for z in center.z - r..=center.z + r {
                for y in y_lo..=y_hi {
                    let coord = IVec3::new(x, y, z);
                    stats.scanned += 1;
                    if self.entries.contains_key(&coord) {
                        continue;
                    }
                    let Some(block) = grid.get(coord) else {
                        continue;
                    };
                    if distance_sq(coord, reference) <= radius_sq {
                        let handle = sink.present(coord, block);
                        self.entries.insert(coord, handle);
                        stats.admitted += 1;
                    }
                }
            }
        }

        stats.visible = self.entries.len() as u32;
        log::debug!(
            "Visibility pass at ({:.1}, {:.1}, {:.1}): +{} -{} ({} visible, {} cells scanned)",
            reference.x,
            reference.y,
            reference.z,
            stats.admitted,
            stats.evicted,
            stats.visible,
            stats.scanned
        );
        stats
    }

    /// Admit a single block immediately if it exists, is not yet visible and
    /// is in range. Returns whether it was presented.
    pub fn admit_one(
        &mut self,
        grid: &BlockGrid,
        coord: VoxelCoord,
        reference: Vec3,
        sink: &mut dyn RenderSink,
    ) -> bool {
        if self.entries.contains_key(&coord) || !self.in_range(coord, reference) {
            return false;
        }
        match grid.get(coord) {
            Some(block) => {
                let handle = sink.present(coord, block);
                self.entries.insert(coord, handle);
                true
            }
            None => false,
        }
    }

    /// Retract a single coordinate immediately. Returns whether it was visible.
    pub fn retract_one(&mut self, coord: VoxelCoord, sink: &mut dyn RenderSink) -> bool {
        match self.entries.remove(&coord) {
            Some(handle) => {
                sink.retract(coord, handle);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, coord: VoxelCoord) -> bool {
        self.entries.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn coords(&self) -> impl Iterator<Item = VoxelCoord> + '_ {
        self.entries.keys().copied()
    }
}
