// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! A host-side stand-in for the CMU register windows.
//!
//! `EmulatedSfrSpace` backs every SFR block of a SoC description with
//! `InMemoryRegister`s, so that the whole engine can run off-target. It
//! records every write in issue order and emulates the little hardware
//! behaviour the engine waits on:
//!
//! - a *mirror* copies one bit of a written value into another bit of the
//!   same register (a PLL's STABLE bit following its ENABLE bit);
//! - a *stick* forces some bits to a fixed value after every write (a busy
//!   bit that never clears, to provoke timeouts).
//!
//! ```rust,ignore
//! let space = EmulatedSfrSpace::new(SOC.blocks);
//! space.emulate_pll_locks(&SOC);
//! let registry = RegistryBuilder::new(&SOC).build(&&space)?;
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kernel::hil::sfr::{SfrMapper, SfrRegion};
use kernel::utilities::registers::interfaces::{Readable, Writeable};
use kernel::utilities::registers::InMemoryRegister;

use crate::cmucal::{SfrBlockDesc, SocTables};
use crate::ra::PLL_CON0;

/// One logged register write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SfrWrite {
    pub pa: u32,
    pub value: u32,
}

#[derive(Clone, Copy)]
enum Behaviour {
    Mirror { offset: usize, from: u32, to: u32 },
    Stick { offset: usize, mask: u32, value: u32 },
}

pub struct EmulatedSfrBlock {
    pa: u32,
    size: u32,
    words: Vec<InMemoryRegister<u32>>,
    behaviours: RefCell<Vec<Behaviour>>,
    log: Rc<RefCell<Vec<SfrWrite>>>,
}

impl EmulatedSfrBlock {
    fn contains(&self, pa: u32) -> bool {
        pa >= self.pa && pa - self.pa < self.size
    }

    fn apply(&self, offset: usize, mut value: u32) -> u32 {
        for behaviour in self.behaviours.borrow().iter() {
            match *behaviour {
                Behaviour::Mirror { offset: o, from, to } if o == offset => {
                    if value & (1 << from) != 0 {
                        value |= 1 << to;
                    } else {
                        value &= !(1 << to);
                    }
                }
                Behaviour::Stick {
                    offset: o,
                    mask,
                    value: forced,
                } if o == offset => {
                    value = (value & !mask) | (forced & mask);
                }
                _ => {}
            }
        }
        value
    }
}

impl SfrRegion for EmulatedSfrBlock {
    fn read32(&self, offset: usize) -> u32 {
        self.words.get(offset / 4).map_or(0, |word| word.get())
    }

    fn write32(&self, offset: usize, value: u32) {
        if let Some(word) = self.words.get(offset / 4) {
            let value = self.apply(offset, value);
            word.set(value);
            self.log.borrow_mut().push(SfrWrite {
                pa: self.pa + offset as u32,
                value,
            });
        }
    }
}

pub struct EmulatedSfrSpace {
    blocks: Vec<EmulatedSfrBlock>,
    log: Rc<RefCell<Vec<SfrWrite>>>,
}

impl EmulatedSfrSpace {
    /// Back every block in `blocks` with zeroed registers.
    pub fn new(blocks: &[SfrBlockDesc]) -> EmulatedSfrSpace {
        let log = Rc::new(RefCell::new(Vec::new()));
        let blocks = blocks
            .iter()
            .map(|desc| EmulatedSfrBlock {
                pa: desc.pa,
                size: desc.size,
                words: (0..desc.size / 4).map(|_| InMemoryRegister::new(0)).collect(),
                behaviours: RefCell::new(Vec::new()),
                log: log.clone(),
            })
            .collect();
        EmulatedSfrSpace { blocks, log }
    }

    fn locate(&self, pa: u32) -> Option<(&EmulatedSfrBlock, usize)> {
        self.blocks
            .iter()
            .find(|block| block.contains(pa))
            .map(|block| (block, (pa - block.pa) as usize))
    }

    /// Current value of the register at `pa`, or 0 outside every block.
    pub fn peek(&self, pa: u32) -> u32 {
        self.locate(pa)
            .map_or(0, |(block, offset)| block.read32(offset))
    }

    /// Set a register behind the engine's back. Not logged.
    pub fn poke(&self, pa: u32, value: u32) {
        if let Some((block, offset)) = self.locate(pa) {
            if let Some(word) = block.words.get(offset / 4) {
                word.set(value);
            }
        }
    }

    /// After each write to `pa`, copy bit `from` into bit `to`.
    pub fn mirror_bit(&self, pa: u32, from: u32, to: u32) {
        if let Some((block, offset)) = self.locate(pa) {
            block
                .behaviours
                .borrow_mut()
                .push(Behaviour::Mirror { offset, from, to });
        }
    }

    /// Force the `mask` bits of `pa` to `value`, now and after every write.
    pub fn stick_bits(&self, pa: u32, mask: u32, value: u32) {
        if let Some((block, offset)) = self.locate(pa) {
            block
                .behaviours
                .borrow_mut()
                .push(Behaviour::Stick { offset, mask, value });
            self.poke(pa, (self.peek(pa) & !mask) | (value & mask));
        }
    }

    pub fn clear_behaviours(&self) {
        for block in self.blocks.iter() {
            block.behaviours.borrow_mut().clear();
        }
    }

    /// Make every PLL in `tables` report lock as soon as it is enabled.
    ///
    /// Covers both real PLLs (status follows enable) and fixed-rate shared
    /// PLLs that are enabled through their PLL_CON0 register.
    pub fn emulate_pll_locks(&self, tables: &SocTables) {
        for pll in tables.plls.iter() {
            if let (Some((pa, from)), Some((_, to))) = (
                tables.field_location(pll.enable),
                tables.field_location(pll.status),
            ) {
                self.mirror_bit(pa, from, to);
            }
        }
        for fixed in tables.fixed_rates.iter() {
            if let Some((pa, _)) = fixed.enable.and_then(|field| tables.field_location(field)) {
                self.mirror_bit(pa, PLL_CON0::ENABLE.shift as u32, PLL_CON0::STABLE.shift as u32);
            }
        }
    }

    /// All writes since creation or the last `clear_log`, oldest first.
    pub fn writes(&self) -> Vec<SfrWrite> {
        self.log.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }
}

impl<'a> SfrMapper<'a> for &'a EmulatedSfrSpace {
    fn map(&self, pa: u32, size: u32) -> Option<&'a dyn SfrRegion> {
        let space: &'a EmulatedSfrSpace = *self;
        space
            .blocks
            .iter()
            .find(|block| block.pa == pa && block.size >= size)
            .map(|block| block as &dyn SfrRegion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCKS: [SfrBlockDesc; 2] = [
        SfrBlockDesc {
            name: "CMU_TOP",
            pa: 0x1A33_0000,
            size: 0x3000,
        },
        SfrBlockDesc {
            name: "CMU_MIF",
            pa: 0x1A43_0000,
            size: 0x2000,
        },
    ];

    #[test]
    fn writes_are_logged_in_order() {
        let space = EmulatedSfrSpace::new(&BLOCKS);
        let mapper = &space;
        let top = mapper.map(0x1A33_0000, 0x3000).unwrap();
        let mif = mapper.map(0x1A43_0000, 0x1000).unwrap();

        top.write32(0x1800, 3);
        mif.write32(0x0100, 0x8000_0000);
        assert_eq!(top.read32(0x1800), 3);
        assert_eq!(space.peek(0x1A43_0100), 0x8000_0000);
        assert_eq!(
            space.writes(),
            [
                SfrWrite {
                    pa: 0x1A33_1800,
                    value: 3
                },
                SfrWrite {
                    pa: 0x1A43_0100,
                    value: 0x8000_0000
                },
            ]
        );
        space.clear_log();
        assert!(space.writes().is_empty());
    }

    #[test]
    fn unknown_window_is_not_mapped() {
        let space = EmulatedSfrSpace::new(&BLOCKS);
        let mapper = &space;
        assert!(mapper.map(0x1000_0000, 0x1000).is_none());
        assert!(mapper.map(0x1A43_0000, 0x4000).is_none());
    }

    #[test]
    fn mirror_and_stick() {
        let space = EmulatedSfrSpace::new(&BLOCKS);
        let mapper = &space;
        let mif = mapper.map(0x1A43_0000, 0x2000).unwrap();

        space.mirror_bit(0x1A43_0100, 31, 29);
        mif.write32(0x0100, 1 << 31);
        assert_eq!(space.peek(0x1A43_0100), (1 << 31) | (1 << 29));
        mif.write32(0x0100, 0);
        assert_eq!(space.peek(0x1A43_0100), 0);

        space.stick_bits(0x1A43_1000, 1 << 16, 1 << 16);
        assert_eq!(space.peek(0x1A43_1000), 1 << 16);
        mif.write32(0x1000, 1);
        assert_eq!(space.peek(0x1A43_1000), (1 << 16) | 1);

        space.clear_behaviours();
        mif.write32(0x1000, 1);
        assert_eq!(space.peek(0x1A43_1000), 1);
    }
}
