use cubeland_core::block::BlockType;
use cubeland_core::types::{PresentationHandle, VoxelCoord};
use std::collections::HashMap;

/// Renderer side of the visible set. Called whenever a coordinate enters or
/// leaves the visible set.
///
/// The core never presents a coordinate twice without retracting it in
/// between, and always hands back the handle it received.
pub trait RenderSink {
    fn present(&mut self, coord: VoxelCoord, block: BlockType) -> PresentationHandle;
    fn retract(&mut self, coord: VoxelCoord, handle: PresentationHandle);
}

/// Sink for headless runs: hands out sequential handles and draws nothing.
#[derive(Debug, Default)]
pub struct NullSink {
    next_handle: u64,
}

impl RenderSink for NullSink {
    fn present(&mut self, _coord: VoxelCoord, _block: BlockType) -> PresentationHandle {
        self.next_handle += 1;
        PresentationHandle(self.next_handle)
    }

    fn retract(&mut self, _coord: VoxelCoord, _handle: PresentationHandle) {}
}

/// Sink that mirrors what is on screen and counts contract violations.
/// Used by tests and by the bench runner to audit present/retract traffic.
#[derive(Debug, Default)]
pub struct RecordingSink {
    live: HashMap<VoxelCoord, (BlockType, PresentationHandle)>,
    next_handle: u64,
    pub presented: u64,
    pub retracted: u64,
    /// `present` on a coordinate that was already live.
    pub double_presents: u64,
    /// `retract` of a coordinate that was not live, or with a stale handle.
    pub bad_retracts: u64,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `coord` is currently on screen.
    pub fn is_live(&self, coord: VoxelCoord) -> bool {
        self.live.contains_key(&coord)
    }

    pub fn live_block(&self, coord: VoxelCoord) -> Option<BlockType> {
        self.live.get(&coord).map(|(block, _)| *block)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// True if no double present or bad retract was ever observed.
    pub fn is_clean(&self) -> bool {
        self.double_presents == 0 && self.bad_retracts == 0
    }
}

impl RenderSink for RecordingSink {
    fn present(&mut self, coord: VoxelCoord, block: BlockType) -> PresentationHandle {
        self.next_handle += 1;
        let handle = PresentationHandle(self.next_handle);
        if self.live.insert(coord, (block, handle)).is_some() {
            self.double_presents += 1;
        }
        self.presented += 1;
        handle
    }

    fn retract(&mut self, coord: VoxelCoord, handle: PresentationHandle) {
        match self.live.remove(&coord) {
            Some((_, live_handle)) if live_handle == handle => {}
            _ => self.bad_retracts += 1,
        }
        self.retracted += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;

    #[test]
    fn test_recording_sink_tracks_live_set() {
        let mut sink = RecordingSink::new();
        let c = IVec3::new(1, 2, 3);
        let h = sink.present(c, BlockType::Wood);
        assert!(sink.is_live(c));
        assert_eq!(sink.live_block(c), Some(BlockType::Wood));
        sink.retract(c, h);
        assert!(!sink.is_live(c));
        assert!(sink.is_clean());
        assert_eq!((sink.presented, sink.retracted), (1, 1));
    }

    #[test]
    fn test_recording_sink_flags_violations() {
        let mut sink = RecordingSink::new();
        let c = IVec3::ZERO;
        let h = sink.present(c, BlockType::Dirt);
        sink.present(c, BlockType::Dirt);
        assert_eq!(sink.double_presents, 1);
        // Stale handle from the first present.
        sink.retract(c, h);
        assert_eq!(sink.bad_retracts, 1);
        sink.retract(IVec3::ONE, PresentationHandle(99));
        assert_eq!(sink.bad_retracts, 2);
        assert!(!sink.is_clean());
    }

    #[test]
    fn test_null_sink_handles_are_unique() {
        let mut sink = NullSink::default();
        let a = sink.present(IVec3::ZERO, BlockType::Stone);
        let b = sink.present(IVec3::ONE, BlockType::Stone);
        assert_ne!(a, b);
    }
}
