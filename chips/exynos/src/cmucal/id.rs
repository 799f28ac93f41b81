// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Packed clock identifiers.
//!
//! A [`ClockId`] is a 32-bit value laid out as
//!
//! ```text
//!  31        24 23        16 15                     0
//! +------------+------------+------------------------+
//! |    type    |  sub-type  |         index          |
//! +------------+------------+------------------------+
//! ```
//!
//! The encoding is shared with ECT and ACPM firmware and must not change.
//! The index addresses the node's slot in the per-type table; the sub-type
//! refines the type (user muxes, DVFS vclks, ...) but, except for vclks,
//! does not select a different table.

use core::fmt;

const TYPE_SHIFT: u32 = 24;
const SUB_TYPE_SHIFT: u32 = 16;
const INDEX_MASK: u32 = 0xFFFF;

/// The node kind stored in the top byte of a [`ClockId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ClockType {
    FixedRate = 0x01,
    FixedFactor = 0x02,
    Pll = 0x03,
    Mux = 0x04,
    Div = 0x05,
    Gate = 0x06,
    Qch = 0x07,
    SfrBlock = 0x08,
    Sfr = 0x09,
    SfrAccess = 0x0A,
    Vclk = 0x0B,
    Option = 0x0C,
    Clkout = 0x0D,
}

impl ClockType {
    pub const fn from_raw(raw: u8) -> Option<ClockType> {
        match raw {
            0x01 => Some(ClockType::FixedRate),
            0x02 => Some(ClockType::FixedFactor),
            0x03 => Some(ClockType::Pll),
            0x04 => Some(ClockType::Mux),
            0x05 => Some(ClockType::Div),
            0x06 => Some(ClockType::Gate),
            0x07 => Some(ClockType::Qch),
            0x08 => Some(ClockType::SfrBlock),
            0x09 => Some(ClockType::Sfr),
            0x0A => Some(ClockType::SfrAccess),
            0x0B => Some(ClockType::Vclk),
            0x0C => Some(ClockType::Option),
            0x0D => Some(ClockType::Clkout),
            _ => None,
        }
    }
}

/// Sub-type values. Their meaning depends on the type.
pub mod sub_type {
    pub const NONE: u8 = 0x00;
    pub const USER_MUX: u8 = 0x01;
    pub const CONST_MUX: u8 = 0x02;
    pub const CONST_DIV: u8 = 0x01;
    pub const GATE_ROOT: u8 = 0x01;
    pub const COMMON_VCLK: u8 = 0x01;
    pub const DFS_VCLK: u8 = 0x02;
    pub const GATE_VCLK: u8 = 0x03;
    pub const ACPM_VCLK: u8 = 0x04;
}

/// The four families of virtual clocks, each kept in its own table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VclkKind {
    /// Composite clock with a rate table but no voltage.
    Common,
    /// Locally controlled DVFS domain.
    Dfs,
    /// Group of gates switched together.
    Gate,
    /// DVFS domain owned by the ACPM co-processor.
    Acpm,
}

impl VclkKind {
    pub const ALL: [VclkKind; 4] = [
        VclkKind::Common,
        VclkKind::Dfs,
        VclkKind::Gate,
        VclkKind::Acpm,
    ];

    pub const fn sub_type(self) -> u8 {
        match self {
            VclkKind::Common => sub_type::COMMON_VCLK,
            VclkKind::Dfs => sub_type::DFS_VCLK,
            VclkKind::Gate => sub_type::GATE_VCLK,
            VclkKind::Acpm => sub_type::ACPM_VCLK,
        }
    }

    pub const fn from_sub_type(sub: u8) -> Option<VclkKind> {
        match sub {
            sub_type::COMMON_VCLK => Some(VclkKind::Common),
            sub_type::DFS_VCLK => Some(VclkKind::Dfs),
            sub_type::GATE_VCLK => Some(VclkKind::Gate),
            sub_type::ACPM_VCLK => Some(VclkKind::Acpm),
            _ => None,
        }
    }

    pub(crate) const fn table(self) -> usize {
        match self {
            VclkKind::Common => 0,
            VclkKind::Dfs => 1,
            VclkKind::Gate => 2,
            VclkKind::Acpm => 3,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockId(u32);

impl ClockId {
    pub const fn new(ty: ClockType, sub: u8, index: u16) -> ClockId {
        ClockId(((ty as u32) << TYPE_SHIFT) | ((sub as u32) << SUB_TYPE_SHIFT) | index as u32)
    }

    pub const fn from_raw(raw: u32) -> ClockId {
        ClockId(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The type field, or `None` for an undefined type value.
    pub const fn clock_type(self) -> Option<ClockType> {
        ClockType::from_raw((self.0 >> TYPE_SHIFT) as u8)
    }

    pub const fn sub_type(self) -> u8 {
        (self.0 >> SUB_TYPE_SHIFT) as u8
    }

    pub const fn index(self) -> usize {
        (self.0 & INDEX_MASK) as usize
    }

    pub fn is(self, ty: ClockType) -> bool {
        self.clock_type() == Some(ty)
    }

    pub fn is_user_mux(self) -> bool {
        self.is(ClockType::Mux) && self.sub_type() == sub_type::USER_MUX
    }

    pub fn vclk_kind(self) -> Option<VclkKind> {
        if self.is(ClockType::Vclk) {
            VclkKind::from_sub_type(self.sub_type())
        } else {
            None
        }
    }

    pub fn is_acpm_vclk(self) -> bool {
        self.vclk_kind() == Some(VclkKind::Acpm)
    }

    pub const fn fixed_rate(index: u16) -> ClockId {
        ClockId::new(ClockType::FixedRate, sub_type::NONE, index)
    }

    pub const fn fixed_factor(index: u16) -> ClockId {
        ClockId::new(ClockType::FixedFactor, sub_type::NONE, index)
    }

    pub const fn pll(index: u16) -> ClockId {
        ClockId::new(ClockType::Pll, sub_type::NONE, index)
    }

    pub const fn mux(index: u16) -> ClockId {
        ClockId::new(ClockType::Mux, sub_type::NONE, index)
    }

    pub const fn user_mux(index: u16) -> ClockId {
        ClockId::new(ClockType::Mux, sub_type::USER_MUX, index)
    }

    pub const fn const_mux(index: u16) -> ClockId {
        ClockId::new(ClockType::Mux, sub_type::CONST_MUX, index)
    }

    pub const fn div(index: u16) -> ClockId {
        ClockId::new(ClockType::Div, sub_type::NONE, index)
    }

    pub const fn const_div(index: u16) -> ClockId {
        ClockId::new(ClockType::Div, sub_type::CONST_DIV, index)
    }

    pub const fn gate(index: u16) -> ClockId {
        ClockId::new(ClockType::Gate, sub_type::NONE, index)
    }

    pub const fn gate_root(index: u16) -> ClockId {
        ClockId::new(ClockType::Gate, sub_type::GATE_ROOT, index)
    }

    pub const fn qch(index: u16) -> ClockId {
        ClockId::new(ClockType::Qch, sub_type::NONE, index)
    }

    pub const fn sfr_block(index: u16) -> ClockId {
        ClockId::new(ClockType::SfrBlock, sub_type::NONE, index)
    }

    pub const fn sfr(index: u16) -> ClockId {
        ClockId::new(ClockType::Sfr, sub_type::NONE, index)
    }

    pub const fn sfr_access(index: u16) -> ClockId {
        ClockId::new(ClockType::SfrAccess, sub_type::NONE, index)
    }

    pub const fn option(index: u16) -> ClockId {
        ClockId::new(ClockType::Option, sub_type::NONE, index)
    }

    pub const fn clkout(index: u16) -> ClockId {
        ClockId::new(ClockType::Clkout, sub_type::NONE, index)
    }

    pub const fn vclk(kind: VclkKind, index: u16) -> ClockId {
        ClockId::new(ClockType::Vclk, kind.sub_type(), index)
    }
}

impl fmt::Debug for ClockId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ClockId({:#010x})", self.0)
    }
}

impl fmt::Display for ClockId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
