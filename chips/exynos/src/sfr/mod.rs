// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Resolved register fields.
//!
//! Every logical field a clock node uses (a mux select, a divider ratio, a
//! PLL's M divider, ...) is bound once at boot to an [`SfrBinding`]: the
//! mapped region of the SFR block that owns the register, the byte offset of
//! the register inside that block and the bit group inside the register.
//! The block owns the mapping; bindings only borrow it.

use kernel::debug;
use kernel::hil::sfr::SfrRegion;
use kernel::utilities::registers::{Field, FieldValue, LocalRegisterCopy, RegisterLongName};

use crate::config::CONFIG;

pub mod emulated;
pub mod mmio;

#[derive(Clone, Copy)]
pub struct SfrBinding<'a> {
    region: &'a dyn SfrRegion,
    offset: usize,
    pa: u32,
    field: Field<u32, ()>,
    name: &'static str,
}

const fn width_mask(width: u8) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}

impl<'a> SfrBinding<'a> {
    pub fn new(
        region: &'a dyn SfrRegion,
        offset: usize,
        pa: u32,
        shift: u8,
        width: u8,
        name: &'static str,
    ) -> SfrBinding<'a> {
        SfrBinding {
            region,
            offset,
            pa,
            field: Field::new(width_mask(width), shift as usize),
            name,
        }
    }

    /// A binding to a different bit group of the same register.
    pub fn with_field(&self, shift: u8, width: u8) -> SfrBinding<'a> {
        SfrBinding {
            field: Field::new(width_mask(width), shift as usize),
            ..*self
        }
    }

    /// Physical address of the register.
    pub fn pa(&self) -> u32 {
        self.pa
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn shift(&self) -> usize {
        self.field.shift
    }

    /// Largest value the field can hold.
    pub fn max_value(&self) -> u32 {
        self.field.mask
    }

    /// Width of the field in bits.
    pub fn width(&self) -> u32 {
        u32::BITS - self.field.mask.leading_zeros()
    }

    pub fn get(&self) -> u32 {
        self.field.read(self.read_raw())
    }

    pub fn is_set(&self) -> bool {
        self.field.is_set(self.read_raw())
    }

    /// Read-modify-write the field.
    pub fn set(&self, value: u32) {
        let reg = self.read_raw();
        self.write_raw(self.field.val(value).modify(reg));
    }

    pub fn field_value(&self, value: u32) -> FieldValue<u32, ()> {
        self.field.val(value)
    }

    pub fn read_raw(&self) -> u32 {
        self.region.read32(self.offset)
    }

    pub fn write_raw(&self, value: u32) {
        if CONFIG.trace_sfr {
            debug!("sfr {} [{:#010x}] <- {:#010x}", self.name, self.pa, value);
        }
        self.region.write32(self.offset, value);
    }

    /// Snapshot of the whole register, typed by a bitfield description.
    pub fn read_register<R: RegisterLongName>(&self) -> LocalRegisterCopy<u32, R> {
        LocalRegisterCopy::new(self.read_raw())
    }

    pub fn write_register<R: RegisterLongName>(&self, reg: LocalRegisterCopy<u32, R>) {
        self.write_raw(reg.get());
    }
}
