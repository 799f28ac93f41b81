// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Clock nodes with their register fields resolved.

use alloc::boxed::Box;

use kernel::hil::sfr::SfrRegion;

use super::desc::*;
use super::id::ClockId;
use crate::pll_spec::PllSpec;
use crate::sfr::SfrBinding;
use crate::vclk::Vclk;

/// A mapped SFR window. The block owns the mapping that every binding of
/// its registers borrows.
pub struct SfrBlock<'a> {
    pub id: ClockId,
    pub desc: &'static SfrBlockDesc,
    pub region: &'a dyn SfrRegion,
}

pub struct FixedRateClk<'a> {
    pub desc: &'static FixedRateDesc,
    pub enable: Option<SfrBinding<'a>>,
}

pub struct FixedFactorClk<'a> {
    pub desc: &'static FixedFactorDesc,
    pub enable: Option<SfrBinding<'a>>,
}

pub struct PllClk<'a> {
    pub desc: &'static PllDesc,
    pub spec: &'static PllSpec,
    pub lock: SfrBinding<'a>,
    pub enable: SfrBinding<'a>,
    pub status: SfrBinding<'a>,
    pub m: SfrBinding<'a>,
    pub p: SfrBinding<'a>,
    pub s: SfrBinding<'a>,
    pub k: Option<SfrBinding<'a>>,
    pub lock_time: u32,
    pub flock_time: u32,
    /// Static rows, or the ECT table for this PLL when one exists.
    pub rate_table: Box<[PllRate]>,
}

impl PllClk<'_> {
    /// Fractional PLLs have a K divider and a separate lock time.
    pub fn is_frac(&self) -> bool {
        self.flock_time != 0 && self.k.is_some()
    }
}

pub struct MuxClk<'a> {
    pub desc: &'static MuxDesc,
    pub select: SfrBinding<'a>,
    pub busy: Option<SfrBinding<'a>>,
    pub enable: Option<SfrBinding<'a>>,
}

pub struct DivClk<'a> {
    pub desc: &'static DivDesc,
    pub ratio: SfrBinding<'a>,
    pub busy: Option<SfrBinding<'a>>,
    pub enable: Option<SfrBinding<'a>>,
}

pub struct GateClk<'a> {
    pub desc: &'static GateDesc,
    pub cg_value: SfrBinding<'a>,
    pub manual: Option<SfrBinding<'a>>,
    pub auto_enable: Option<SfrBinding<'a>>,
}

pub struct QchClk<'a> {
    pub desc: &'static QchDesc,
    pub enable: SfrBinding<'a>,
    pub req: SfrBinding<'a>,
    pub expire: Option<SfrBinding<'a>>,
    pub ignore: Option<SfrBinding<'a>>,
}

pub struct OptionClk<'a> {
    pub desc: &'static OptionDesc,
    pub offset: SfrBinding<'a>,
    pub enable: Option<SfrBinding<'a>>,
}

pub struct ClkoutClk {
    pub desc: &'static ClkoutDesc,
}

/// A borrowed view of any node in the registry.
#[derive(Clone, Copy)]
pub enum ClockNode<'r, 'a> {
    FixedRate(&'r FixedRateClk<'a>),
    FixedFactor(&'r FixedFactorClk<'a>),
    Pll(&'r PllClk<'a>),
    Mux(&'r MuxClk<'a>),
    Div(&'r DivClk<'a>),
    Gate(&'r GateClk<'a>),
    Qch(&'r QchClk<'a>),
    SfrBlock(&'r SfrBlock<'a>),
    Sfr(ClockId, &'static SfrDesc),
    SfrAccess(ClockId, &'static SfrFieldDesc),
    Vclk(&'r Vclk),
    Option(&'r OptionClk<'a>),
    Clkout(&'r ClkoutClk),
}

impl ClockNode<'_, '_> {
    pub fn id(&self) -> ClockId {
        match *self {
            ClockNode::FixedRate(c) => c.desc.id,
            ClockNode::FixedFactor(c) => c.desc.id,
            ClockNode::Pll(c) => c.desc.id,
            ClockNode::Mux(c) => c.desc.id,
            ClockNode::Div(c) => c.desc.id,
            ClockNode::Gate(c) => c.desc.id,
            ClockNode::Qch(c) => c.desc.id,
            ClockNode::SfrBlock(c) => c.id,
            ClockNode::Sfr(id, _) => id,
            ClockNode::SfrAccess(id, _) => id,
            ClockNode::Vclk(c) => c.id(),
            ClockNode::Option(c) => c.desc.id,
            ClockNode::Clkout(c) => c.desc.id,
        }
    }

    pub fn name(&self) -> &'static str {
        match *self {
            ClockNode::FixedRate(c) => c.desc.name,
            ClockNode::FixedFactor(c) => c.desc.name,
            ClockNode::Pll(c) => c.desc.name,
            ClockNode::Mux(c) => c.desc.name,
            ClockNode::Div(c) => c.desc.name,
            ClockNode::Gate(c) => c.desc.name,
            ClockNode::Qch(c) => c.desc.name,
            ClockNode::SfrBlock(c) => c.desc.name,
            ClockNode::Sfr(_, d) => d.name,
            ClockNode::SfrAccess(_, d) => d.name,
            ClockNode::Vclk(c) => c.name(),
            ClockNode::Option(c) => c.desc.name,
            ClockNode::Clkout(c) => c.desc.name,
        }
    }

    /// The static parent, used for rate derivation. Muxes have no static
    /// parent; their parent depends on the current selection.
    pub fn parent(&self) -> Option<ClockId> {
        match *self {
            ClockNode::FixedFactor(c) => Some(c.desc.parent),
            ClockNode::Pll(c) => c.desc.parent,
            ClockNode::Div(c) => Some(c.desc.parent),
            ClockNode::Gate(c) => c.desc.parent,
            ClockNode::Qch(c) => c.desc.parent,
            _ => None,
        }
    }
}
