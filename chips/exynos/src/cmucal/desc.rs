// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Static descriptions of a SoC's clock tree.
//!
//! A SoC crate provides one [`SocTables`] made of `const` arrays. Register
//! fields are referred to by their index in [`SocTables::fields`]; each
//! field names its SFR, and each SFR names its block, mirroring how the
//! CMU documentation is organized.

use super::id::ClockId;
use crate::pll_spec::PllType;

/// Index into [`SocTables::fields`].
pub type FieldIdx = u16;

#[derive(Clone, Copy, Debug)]
pub struct SfrBlockDesc {
    pub name: &'static str,
    /// Physical base address of the window.
    pub pa: u32,
    pub size: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct SfrDesc {
    pub name: &'static str,
    /// Index into [`SocTables::blocks`].
    pub block: u16,
    /// Byte offset of the register inside its block.
    pub offset: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct SfrFieldDesc {
    pub name: &'static str,
    /// Index into [`SocTables::sfrs`].
    pub sfr: u16,
    pub shift: u8,
    pub width: u8,
}

#[derive(Clone, Copy, Debug)]
pub struct FixedRateDesc {
    pub id: ClockId,
    pub name: &'static str,
    /// Rate in Hz.
    pub rate: u32,
    /// ENABLE field of the PLL_CON0 register of a shared PLL.
    pub enable: Option<FieldIdx>,
}

#[derive(Clone, Copy, Debug)]
pub struct FixedFactorDesc {
    pub id: ClockId,
    pub name: &'static str,
    pub parent: ClockId,
    /// The parent rate is divided by `ratio + 1`.
    pub ratio: u16,
    pub enable: Option<FieldIdx>,
}

/// One row of a PLL rate table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PllRate {
    /// Output rate in Hz.
    pub rate: u32,
    pub p: u16,
    pub m: u16,
    pub s: u16,
    pub k: i16,
}

#[derive(Clone, Copy, Debug)]
pub struct PllDesc {
    pub id: ClockId,
    pub name: &'static str,
    /// Reference clock. A fixed-rate parent supplies `fin`; otherwise the
    /// chip's oscillator rate is used.
    pub parent: Option<ClockId>,
    pub pll_type: PllType,
    pub lock: FieldIdx,
    /// ENABLE field of PLL_CON0.
    pub enable: FieldIdx,
    /// STABLE field of PLL_CON0.
    pub status: FieldIdx,
    pub m: FieldIdx,
    pub p: FieldIdx,
    pub s: FieldIdx,
    /// K field of PLL_CON1, fractional PLLs only.
    pub k: Option<FieldIdx>,
    /// User mux right after the PLL, parked while the PLL is reprogrammed.
    pub umux: Option<ClockId>,
    pub rate_table: &'static [PllRate],
}

#[derive(Clone, Copy, Debug)]
pub struct MuxDesc {
    pub id: ClockId,
    pub name: &'static str,
    pub parents: &'static [ClockId],
    pub select: FieldIdx,
    pub busy: Option<FieldIdx>,
    pub enable: Option<FieldIdx>,
}

#[derive(Clone, Copy, Debug)]
pub struct DivDesc {
    pub id: ClockId,
    pub name: &'static str,
    pub parent: ClockId,
    /// The parent rate is divided by `ratio + 1`.
    pub ratio: FieldIdx,
    pub busy: Option<FieldIdx>,
    pub enable: Option<FieldIdx>,
}

#[derive(Clone, Copy, Debug)]
pub struct GateDesc {
    pub id: ClockId,
    pub name: &'static str,
    pub parent: Option<ClockId>,
    /// CG_VALUE: the gate itself in manual mode.
    pub cg_value: FieldIdx,
    /// MANUAL: 1 selects manual gating through CG_VALUE.
    pub manual: Option<FieldIdx>,
    /// ENABLE_AUTOMATIC_CLKGATING.
    pub auto_enable: Option<FieldIdx>,
}

#[derive(Clone, Copy, Debug)]
pub struct QchDesc {
    pub id: ClockId,
    pub name: &'static str,
    pub parent: Option<ClockId>,
    /// Q-channel ENABLE.
    pub enable: FieldIdx,
    /// Clock request.
    pub req: FieldIdx,
    /// Expire counter value.
    pub expire: Option<FieldIdx>,
    /// IGNORE_FORCE_PM_EN.
    pub ignore: Option<FieldIdx>,
}

#[derive(Clone, Copy, Debug)]
pub struct OptionDesc {
    pub id: ClockId,
    pub name: &'static str,
    pub offset: FieldIdx,
    pub enable: Option<FieldIdx>,
}

/// A CLKOUT pad source. CLKOUT control lives in the PMU, outside of the CMU
/// windows, so it is described by PMU offsets instead of fields.
#[derive(Clone, Copy, Debug)]
pub struct ClkoutDesc {
    pub id: ClockId,
    pub name: &'static str,
    pub pmu_offset: u32,
    pub select_shift: u8,
    pub select_width: u8,
    pub select: u32,
    pub enable_shift: u8,
}

/// One LUT row of a virtual clock: the rate, in kHz, and the value of
/// every list member at that rate. PLL members are given in kHz, every
/// other member as its raw register value.
#[derive(Clone, Copy, Debug)]
pub struct LutDesc {
    pub rate: u32,
    pub params: &'static [u32],
}

/// Which kinds of change a transition step may perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TransOpt {
    Ignore = 0,
    /// The value decreases.
    Low = 1,
    /// The value increases.
    High = 2,
    /// Any change.
    Force = 3,
}

impl TransOpt {
    /// The class of change from `from` to `to`.
    pub fn between(to: u32, from: u32) -> TransOpt {
        if to == from {
            TransOpt::Ignore
        } else if to > from {
            TransOpt::High
        } else {
            TransOpt::Low
        }
    }

    /// Whether a step declared with `self` may apply a change of class
    /// `trans`.
    pub fn permits(self, trans: TransOpt) -> bool {
        (self as u8) & (trans as u8) != 0
    }
}

/// One step of an explicitly ordered transition.
#[derive(Clone, Copy, Debug)]
pub struct SeqDesc {
    /// Index into the vclk's list.
    pub idx: u16,
    pub opt: TransOpt,
}

/// One row of a switch LUT: the rate of the switch path, in kHz, and the
/// source mux and divider values producing it.
#[derive(Clone, Copy, Debug)]
pub struct SwitchLut {
    pub rate: u32,
    pub mux_value: u32,
    pub div_value: Option<u32>,
}

/// The auxiliary path a domain parks on while its PLL is reprogrammed.
#[derive(Clone, Copy, Debug)]
pub struct SwitchDesc {
    /// Mux choosing between the domain PLL (0) and the switch path (1).
    pub switch_mux: ClockId,
    pub src_mux: ClockId,
    pub src_div: Option<ClockId>,
    pub src_gate: Option<ClockId>,
    pub src_umux: Option<ClockId>,
    /// Sorted by descending rate.
    pub lut: &'static [SwitchLut],
}

#[derive(Clone, Copy, Debug)]
pub struct VclkDesc {
    pub id: ClockId,
    pub name: &'static str,
    pub list: &'static [ClockId],
    /// Sorted by descending rate.
    pub lut: &'static [LutDesc],
    pub seq: &'static [SeqDesc],
    pub switches: &'static [SwitchDesc],
    /// Name of the ECT DVFS, ASV and parameter tables for this domain.
    pub ect: Option<&'static str>,
    /// Voltage-margin domain, for ACPM vclks.
    pub margin: Option<u16>,
}

impl VclkDesc {
    pub const fn new(id: ClockId, name: &'static str) -> VclkDesc {
        VclkDesc {
            id,
            name,
            list: &[],
            lut: &[],
            seq: &[],
            switches: &[],
            ect: None,
            margin: None,
        }
    }
}

/// Everything a SoC crate provides about its clock tree.
pub struct SocTables {
    pub blocks: &'static [SfrBlockDesc],
    pub sfrs: &'static [SfrDesc],
    pub fields: &'static [SfrFieldDesc],
    pub fixed_rates: &'static [FixedRateDesc],
    pub fixed_factors: &'static [FixedFactorDesc],
    pub plls: &'static [PllDesc],
    pub muxes: &'static [MuxDesc],
    pub divs: &'static [DivDesc],
    pub gates: &'static [GateDesc],
    pub qchs: &'static [QchDesc],
    pub options: &'static [OptionDesc],
    pub clkouts: &'static [ClkoutDesc],
    pub common_vclks: &'static [VclkDesc],
    pub dfs_vclks: &'static [VclkDesc],
    pub gate_vclks: &'static [VclkDesc],
    pub acpm_vclks: &'static [VclkDesc],
}

impl SocTables {
    /// Physical address of the register holding field `idx`, and the
    /// field's bit shift.
    pub fn field_location(&self, idx: FieldIdx) -> Option<(u32, u32)> {
        let field = self.fields.get(idx as usize)?;
        let sfr = self.sfrs.get(field.sfr as usize)?;
        let block = self.blocks.get(sfr.block as usize)?;
        Some((block.pa + sfr.offset, field.shift as u32))
    }
}
