// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Memory-mapped SFR windows.

use kernel::hil::sfr::{SfrMapper, SfrRegion};
use kernel::utilities::registers::interfaces::{Readable, Writeable};
use kernel::utilities::registers::ReadWrite;

/// A CMU register window accessed with volatile 32-bit loads and stores.
pub struct MmioSfrRegion {
    base: *const ReadWrite<u32>,
    words: usize,
}

impl MmioSfrRegion {
    /// # Safety
    ///
    /// `base` must be the virtual address of a device mapping of at least
    /// `size` bytes that remains valid for as long as the region is used.
    pub const unsafe fn new(base: usize, size: u32) -> MmioSfrRegion {
        MmioSfrRegion {
            base: base as *const ReadWrite<u32>,
            words: size as usize / 4,
        }
    }

    fn register(&self, offset: usize) -> Option<&ReadWrite<u32>> {
        if offset % 4 != 0 || offset / 4 >= self.words {
            return None;
        }
        // In bounds of the mapping handed to `new`.
        Some(unsafe { &*self.base.add(offset / 4) })
    }
}

impl SfrRegion for MmioSfrRegion {
    fn read32(&self, offset: usize) -> u32 {
        self.register(offset).map_or(0, |reg| reg.get())
    }

    fn write32(&self, offset: usize, value: u32) {
        if let Some(reg) = self.register(offset) {
            reg.set(value);
        }
    }
}

/// Looks windows up in a board-provided table of already mapped regions.
pub struct StaticMmioMapper<'a> {
    regions: &'a [(u32, MmioSfrRegion)],
}

impl<'a> StaticMmioMapper<'a> {
    pub const fn new(regions: &'a [(u32, MmioSfrRegion)]) -> StaticMmioMapper<'a> {
        StaticMmioMapper { regions }
    }
}

impl<'a> SfrMapper<'a> for StaticMmioMapper<'a> {
    fn map(&self, pa: u32, size: u32) -> Option<&'a dyn SfrRegion> {
        let regions: &'a [(u32, MmioSfrRegion)] = self.regions;
        regions
            .iter()
            .find(|(base, region)| *base == pa && region.words * 4 >= size as usize)
            .map(|(_, region)| region as &dyn SfrRegion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volatile_window_over_plain_memory() {
        let mut backing = [0u32; 4];
        let region = unsafe { MmioSfrRegion::new(backing.as_mut_ptr() as usize, 16) };

        region.write32(4, 0x1234_5678);
        assert_eq!(region.read32(4), 0x1234_5678);
        // unaligned and out-of-window accesses are ignored
        region.write32(16, 1);
        region.write32(2, 1);
        assert_eq!(region.read32(16), 0);
        drop(region);
        assert_eq!(backing[1], 0x1234_5678);
        assert_eq!(backing[0], 0);
    }

    #[test]
    fn mapper_matches_base_and_size() {
        let mut backing = [0u32; 8];
        let regions = [(0x1A33_0000, unsafe {
            MmioSfrRegion::new(backing.as_mut_ptr() as usize, 32)
        })];
        let mapper = StaticMmioMapper::new(&regions);
        assert!(mapper.map(0x1A33_0000, 32).is_some());
        assert!(mapper.map(0x1A33_0000, 64).is_none());
        assert!(mapper.map(0x1B00_0000, 16).is_none());
    }
}
