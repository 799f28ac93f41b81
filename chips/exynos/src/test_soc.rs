// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! A small clock tree used by the unit tests.
//!
//! ```text
//! OSCCLK ──> PLL_A ──> MUX_A_USER ──┐
//!                                   ├─> MUX_SW ──> DIV_A ──> GATE_A ── QCH_IP_A
//! PLL_SHARED ─┬─> MUX_SW_SRC ─> DIV_SW ─> GATE_SW ─> MUX_SW_USER ─┘
//!             └─> FF_SHARED_DIV2 ┘
//! OSCCLK ──> PLL_F ──> MUX_A ──> DIV_B ──> GATE_B
//! ```

use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kernel::hil::acpm::AcpmChannel;
use kernel::hil::sfr::PmuUpdate;
use kernel::hil::time::{Delay, Time};
use kernel::ErrorCode;

use crate::chip_specific::ChipSpecs;
use crate::cmucal::*;
use crate::pll_spec::PllType;
use crate::ra::RaClient;
use crate::sfr::emulated::EmulatedSfrSpace;

pub(crate) struct TestChip;

impl ChipSpecs for TestChip {
    const FIN_HZ: u32 = 26_000_000;
    const FVMAP_ADDR_OFFSET: u32 = 0x9000_0000;
    const MARGIN_DOMAINS: &'static [&'static str] = &["mif", "int", "big"];
}

pub(crate) const BASE: u32 = 0x1000_0000;

pub(crate) const OSC: ClockId = ClockId::fixed_rate(0);
pub(crate) const SHARED: ClockId = ClockId::fixed_rate(1);
pub(crate) const FF: ClockId = ClockId::fixed_factor(0);
pub(crate) const PLL_A: ClockId = ClockId::pll(0);
pub(crate) const PLL_F: ClockId = ClockId::pll(1);
pub(crate) const MUX_A_USER: ClockId = ClockId::user_mux(0);
pub(crate) const MUX_A: ClockId = ClockId::mux(1);
pub(crate) const MUX_SW: ClockId = ClockId::mux(2);
pub(crate) const MUX_SW_SRC: ClockId = ClockId::mux(3);
pub(crate) const MUX_SW_USER: ClockId = ClockId::user_mux(4);
pub(crate) const DIV_A: ClockId = ClockId::div(0);
pub(crate) const DIV_B: ClockId = ClockId::div(1);
pub(crate) const DIV_SW: ClockId = ClockId::div(2);
pub(crate) const GATE_A: ClockId = ClockId::gate(0);
pub(crate) const GATE_B: ClockId = ClockId::gate(1);
pub(crate) const GATE_SW: ClockId = ClockId::gate(2);
pub(crate) const QCH_A: ClockId = ClockId::qch(0);
pub(crate) const CLKOUT: ClockId = ClockId::clkout(0);

pub(crate) const VCLK_COMMON: ClockId = ClockId::vclk(VclkKind::Common, 0);
pub(crate) const VDD_A: ClockId = ClockId::vclk(VclkKind::Dfs, 0);
pub(crate) const VDD_B: ClockId = ClockId::vclk(VclkKind::Dfs, 1);
pub(crate) const VDD_C: ClockId = ClockId::vclk(VclkKind::Dfs, 2);
pub(crate) const VCLK_IP_A: ClockId = ClockId::vclk(VclkKind::Gate, 0);
pub(crate) const ACPM_A: ClockId = ClockId::vclk(VclkKind::Acpm, 0);

// Register addresses.
pub(crate) const PLL_CON0_PLL_A: u32 = BASE + 0x100;
pub(crate) const PLL_CON3_PLL_A: u32 = BASE + 0x10C;
pub(crate) const PLL_CON0_PLL_F: u32 = BASE + 0x140;
pub(crate) const PLL_CON4_PLL_F: u32 = BASE + 0x150;
pub(crate) const PLL_CON0_PLL_SHARED: u32 = BASE + 0x180;
pub(crate) const PLL_CON0_MUX_A_USER: u32 = BASE + 0x600;
pub(crate) const CLK_CON_MUX_MUX_A: u32 = BASE + 0x1000;
pub(crate) const CLK_CON_MUX_MUX_SW: u32 = BASE + 0x1004;
pub(crate) const CLK_CON_DIV_DIV_A: u32 = BASE + 0x1800;
pub(crate) const CLK_CON_DIV_DIV_B: u32 = BASE + 0x1804;
pub(crate) const CLK_CON_GAT_GATE_A: u32 = BASE + 0x2000;
pub(crate) const CLK_CON_GAT_GATE_B: u32 = BASE + 0x2004;
pub(crate) const QCH_CON_IP_A: u32 = BASE + 0x3000;

const fn sfr(name: &'static str, offset: u32) -> SfrDesc {
    SfrDesc {
        name,
        block: 0,
        offset,
    }
}

const fn field(name: &'static str, sfr: u16, shift: u8, width: u8) -> SfrFieldDesc {
    SfrFieldDesc {
        name,
        sfr,
        shift,
        width,
    }
}

const BLOCKS: &[SfrBlockDesc] = &[SfrBlockDesc {
    name: "CMU_TEST",
    pa: BASE,
    size: 0x4000,
}];

const SFRS: &[SfrDesc] = &[
    sfr("PLL_LOCKTIME_PLL_A", 0x000),
    sfr("PLL_LOCKTIME_PLL_F", 0x004),
    sfr("PLL_CON0_PLL_A", 0x100),
    sfr("PLL_CON3_PLL_A", 0x10C),
    sfr("PLL_CON0_PLL_F", 0x140),
    sfr("PLL_CON3_PLL_F", 0x14C),
    sfr("PLL_CON4_PLL_F", 0x150),
    sfr("PLL_CON0_PLL_SHARED", 0x180),
    sfr("PLL_CON0_MUX_A_USER", 0x600),
    sfr("PLL_CON0_MUX_SW_USER", 0x620),
    sfr("CLK_CON_MUX_MUX_A", 0x1000),
    sfr("CLK_CON_MUX_MUX_SW", 0x1004),
    sfr("CLK_CON_MUX_MUX_SW_SRC", 0x1008),
    sfr("CLK_CON_DIV_DIV_A", 0x1800),
    sfr("CLK_CON_DIV_DIV_B", 0x1804),
    sfr("CLK_CON_DIV_DIV_SW", 0x1808),
    sfr("CLK_CON_GAT_GATE_A", 0x2000),
    sfr("CLK_CON_GAT_GATE_B", 0x2004),
    sfr("CLK_CON_GAT_GATE_SW", 0x2008),
    sfr("QCH_CON_IP_A", 0x3000),
];

const FIELDS: &[SfrFieldDesc] = &[
    field("PLL_LOCK_TIME", 0, 0, 20),
    field("ENABLE", 2, 31, 1),
    field("STABLE", 2, 29, 1),
    field("DIV_M", 3, 16, 10),
    field("DIV_P", 3, 8, 6),
    field("DIV_S", 3, 0, 3),
    field("PLL_LOCK_TIME", 1, 0, 20),
    field("ENABLE", 4, 31, 1),
    field("STABLE", 4, 29, 1),
    field("DIV_M", 5, 16, 10),
    field("DIV_P", 5, 8, 6),
    field("DIV_S", 5, 0, 3),
    field("DIV_K", 6, 0, 16),
    field("ENABLE", 7, 31, 1),
    field("MUX_SEL", 8, 4, 1),
    field("BUSY", 8, 16, 1),
    field("MUX_SEL", 9, 4, 1),
    field("SELECT", 10, 0, 1),
    field("BUSY", 10, 16, 1),
    field("SELECT", 11, 0, 1),
    field("SELECT", 12, 0, 1),
    field("DIVRATIO", 13, 0, 4),
    field("BUSY", 13, 16, 1),
    field("DIVRATIO", 14, 0, 4),
    field("DIVRATIO", 15, 0, 4),
    field("CG_VALUE", 16, 21, 1),
    field("MANUAL", 16, 20, 1),
    field("ENABLE_AUTOMATIC_CLKGATING", 16, 28, 1),
    field("CG_VALUE", 17, 21, 1),
    field("CG_VALUE", 18, 21, 1),
    field("ENABLE", 19, 0, 1),
    field("CLOCK_REQ", 19, 1, 1),
    field("IGNORE_FORCE_PM_EN", 19, 2, 1),
    field("EXPIRE_VAL", 19, 16, 12),
];

const SWITCH_A: SwitchDesc = SwitchDesc {
    switch_mux: MUX_SW,
    src_mux: MUX_SW_SRC,
    src_div: Some(DIV_SW),
    src_gate: Some(GATE_SW),
    src_umux: Some(MUX_SW_USER),
    lut: &[
        SwitchLut {
            rate: 1_066_000,
            mux_value: 0,
            div_value: Some(1),
        },
        SwitchLut {
            rate: 533_000,
            mux_value: 0,
            div_value: Some(3),
        },
    ],
};

pub(crate) static SOC: SocTables = SocTables {
    blocks: BLOCKS,
    sfrs: SFRS,
    fields: FIELDS,
    fixed_rates: &[
        FixedRateDesc {
            id: OSC,
            name: "OSCCLK",
            rate: 26_000_000,
            enable: None,
        },
        FixedRateDesc {
            id: SHARED,
            name: "PLL_SHARED",
            rate: 2_132_000_000,
            enable: Some(13),
        },
    ],
    fixed_factors: &[FixedFactorDesc {
        id: FF,
        name: "FF_SHARED_DIV2",
        parent: SHARED,
        ratio: 1,
        enable: None,
    }],
    plls: &[
        PllDesc {
            id: PLL_A,
            name: "PLL_A",
            parent: Some(OSC),
            pll_type: PllType::Pll1419x,
            lock: 0,
            enable: 1,
            status: 2,
            m: 3,
            p: 4,
            s: 5,
            k: None,
            umux: Some(MUX_A_USER),
            rate_table: &[
                PllRate {
                    rate: 1_600_000_000,
                    p: 13,
                    m: 800,
                    s: 0,
                    k: 0,
                },
                PllRate {
                    rate: 800_000_000,
                    p: 13,
                    m: 800,
                    s: 1,
                    k: 0,
                },
                PllRate {
                    rate: 400_000_000,
                    p: 13,
                    m: 800,
                    s: 2,
                    k: 0,
                },
            ],
        },
        PllDesc {
            id: PLL_F,
            name: "PLL_F",
            parent: Some(OSC),
            pll_type: PllType::Pll1431x,
            lock: 6,
            enable: 7,
            status: 8,
            m: 9,
            p: 10,
            s: 11,
            k: Some(12),
            umux: None,
            rate_table: &[],
        },
    ],
    muxes: &[
        MuxDesc {
            id: MUX_A_USER,
            name: "MUX_A_USER",
            parents: &[OSC, PLL_A],
            select: 14,
            busy: Some(15),
            enable: None,
        },
        MuxDesc {
            id: MUX_A,
            name: "MUX_A",
            parents: &[OSC, PLL_F],
            select: 17,
            busy: Some(18),
            enable: None,
        },
        MuxDesc {
            id: MUX_SW,
            name: "MUX_SW",
            parents: &[MUX_A_USER, MUX_SW_USER],
            select: 19,
            busy: None,
            enable: None,
        },
        MuxDesc {
            id: MUX_SW_SRC,
            name: "MUX_SW_SRC",
            parents: &[SHARED, FF],
            select: 20,
            busy: None,
            enable: None,
        },
        MuxDesc {
            id: MUX_SW_USER,
            name: "MUX_SW_USER",
            parents: &[OSC, GATE_SW],
            select: 16,
            busy: None,
            enable: None,
        },
    ],
    divs: &[
        DivDesc {
            id: DIV_A,
            name: "DIV_A",
            parent: MUX_SW,
            ratio: 21,
            busy: Some(22),
            enable: None,
        },
        DivDesc {
            id: DIV_B,
            name: "DIV_B",
            parent: MUX_A,
            ratio: 23,
            busy: None,
            enable: None,
        },
        DivDesc {
            id: DIV_SW,
            name: "DIV_SW",
            parent: MUX_SW_SRC,
            ratio: 24,
            busy: None,
            enable: None,
        },
    ],
    gates: &[
        GateDesc {
            id: GATE_A,
            name: "GATE_A",
            parent: Some(DIV_A),
            cg_value: 25,
            manual: Some(26),
            auto_enable: Some(27),
        },
        GateDesc {
            id: GATE_B,
            name: "GATE_B",
            parent: Some(DIV_B),
            cg_value: 28,
            manual: None,
            auto_enable: None,
        },
        GateDesc {
            id: GATE_SW,
            name: "GATE_SW",
            parent: Some(DIV_SW),
            cg_value: 29,
            manual: None,
            auto_enable: None,
        },
    ],
    qchs: &[QchDesc {
        id: QCH_A,
        name: "QCH_IP_A",
        parent: Some(GATE_A),
        enable: 30,
        req: 31,
        expire: Some(33),
        ignore: Some(32),
    }],
    options: &[],
    clkouts: &[ClkoutDesc {
        id: CLKOUT,
        name: "CLKOUT0",
        pmu_offset: 0xA00,
        select_shift: 8,
        select_width: 5,
        select: 1,
        enable_shift: 0,
    }],
    common_vclks: &[VclkDesc {
        list: &[DIV_B],
        lut: &[
            LutDesc {
                rate: 1_179_648,
                params: &[0],
            },
            LutDesc {
                rate: 589_824,
                params: &[1],
            },
            LutDesc {
                rate: 294_912,
                params: &[3],
            },
        ],
        ..VclkDesc::new(VCLK_COMMON, "VCLK_DIV_B")
    }],
    dfs_vclks: &[
        VclkDesc {
            list: &[PLL_A, DIV_A],
            lut: &[
                LutDesc {
                    rate: 1_600_000,
                    params: &[1_600_000, 0],
                },
                LutDesc {
                    rate: 800_000,
                    params: &[800_000, 0],
                },
                LutDesc {
                    rate: 400_000,
                    params: &[400_000, 0],
                },
            ],
            switches: &[SWITCH_A],
            ect: Some("dvfs_a"),
            ..VclkDesc::new(VDD_A, "VCLK_VDD_A")
        },
        VclkDesc {
            list: &[DIV_B, PLL_F, MUX_A],
            lut: &[
                LutDesc {
                    rate: 1_179_648,
                    params: &[0, 1_179_648, 1],
                },
                LutDesc {
                    rate: 589_824,
                    params: &[1, 1_179_648, 1],
                },
                LutDesc {
                    rate: 393_216,
                    params: &[0, 393_216, 1],
                },
                LutDesc {
                    rate: 26_000,
                    params: &[0, 393_216, 0],
                },
            ],
            ..VclkDesc::new(VDD_B, "VCLK_VDD_B")
        },
        VclkDesc {
            list: &[MUX_A, DIV_B],
            lut: &[
                LutDesc {
                    rate: 200,
                    params: &[1, 0],
                },
                LutDesc {
                    rate: 100,
                    params: &[1, 1],
                },
                LutDesc {
                    rate: 13,
                    params: &[0, 1],
                },
            ],
            seq: &[
                SeqDesc {
                    idx: 1,
                    opt: TransOpt::High,
                },
                SeqDesc {
                    idx: 0,
                    opt: TransOpt::Force,
                },
                SeqDesc {
                    idx: 1,
                    opt: TransOpt::Low,
                },
            ],
            ..VclkDesc::new(VDD_C, "VCLK_VDD_C")
        },
    ],
    gate_vclks: &[VclkDesc {
        list: &[PLL_A, MUX_A_USER, GATE_A, QCH_A],
        ..VclkDesc::new(VCLK_IP_A, "VCLK_IP_A")
    }],
    acpm_vclks: &[VclkDesc {
        ect: Some("dvfs_acpm_a"),
        margin: Some(0),
        ..VclkDesc::new(ACPM_A, "dvfs_acpm_a")
    }],
};

/// The registers of [`SOC`] without any clock.
pub(crate) const EMPTY: SocTables = SocTables {
    blocks: BLOCKS,
    sfrs: SFRS,
    fields: FIELDS,
    fixed_rates: &[],
    fixed_factors: &[],
    plls: &[],
    muxes: &[],
    divs: &[],
    gates: &[],
    qchs: &[],
    options: &[],
    clkouts: &[],
    common_vclks: &[],
    dfs_vclks: &[],
    gate_vclks: &[],
    acpm_vclks: &[],
};

/// Emulated registers for [`SOC`] with PLL lock emulation.
pub(crate) fn space() -> EmulatedSfrSpace {
    let space = EmulatedSfrSpace::new(SOC.blocks);
    space.emulate_pll_locks(&SOC);
    space
}

pub(crate) fn registry(space: &EmulatedSfrSpace) -> Registry<'_> {
    RegistryBuilder::new(&SOC).build(&space).unwrap()
}

pub(crate) struct NoDelay;

impl Delay for NoDelay {
    fn udelay(&self, _us: u32) {}
}

/// A clock that advances by one microsecond per read.
pub(crate) struct TickingTime(pub Cell<u64>);

impl Time for TickingTime {
    fn now_us(&self) -> u64 {
        let now = self.0.get();
        self.0.set(now + 1);
        now
    }
}

#[derive(Default)]
pub(crate) struct FakePmu {
    pub updates: RefCell<Vec<(u32, u32, u32)>>,
}

impl PmuUpdate for FakePmu {
    fn update(&self, offset: u32, mask: u32, value: u32) -> Result<(), ErrorCode> {
        self.updates.borrow_mut().push((offset, mask, value));
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Value(ClockId, u32),
    Enable(ClockId, bool),
}

/// Records every operation reported by `Ra`.
#[derive(Default)]
pub(crate) struct Recorder {
    pub events: RefCell<Vec<Event>>,
}

impl Recorder {
    pub fn take(&self) -> Vec<Event> {
        core::mem::take(&mut *self.events.borrow_mut())
    }
}

impl RaClient for Recorder {
    fn value_set(&self, id: ClockId, value: u32) {
        self.events.borrow_mut().push(Event::Value(id, value));
    }

    fn enable_set(&self, id: ClockId, on: bool) {
        self.events.borrow_mut().push(Event::Enable(id, on));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AcpmCall {
    Send(u32, u32),
    VoltMargin(u32, i32),
    PercentMargin(u32, i32),
}

/// An ACPM channel that records requests and answers rate queries with
/// `rate`. Requests fail while `fail` is set.
#[derive(Default)]
pub(crate) struct FakeAcpm {
    pub calls: RefCell<Vec<AcpmCall>>,
    pub rate: Cell<u32>,
    pub fail: Cell<bool>,
}

impl FakeAcpm {
    pub fn take(&self) -> Vec<AcpmCall> {
        core::mem::take(&mut *self.calls.borrow_mut())
    }

    fn record(&self, call: AcpmCall) -> Result<(), ErrorCode> {
        self.calls.borrow_mut().push(call);
        if self.fail.get() {
            Err(ErrorCode::FAIL)
        } else {
            Ok(())
        }
    }
}

impl AcpmChannel for FakeAcpm {
    fn send(&self, id: u32, rate_khz: u32) -> Result<(), ErrorCode> {
        self.record(AcpmCall::Send(id, rate_khz))
    }

    fn get_rate(&self, _id: u32) -> Result<u32, ErrorCode> {
        Ok(self.rate.get())
    }

    fn set_volt_margin(&self, id: u32, margin_uv: i32) -> Result<(), ErrorCode> {
        self.record(AcpmCall::VoltMargin(id, margin_uv))
    }

    fn set_percent_margin(&self, id: u32, percent: i32) -> Result<(), ErrorCode> {
        self.record(AcpmCall::PercentMargin(id, percent))
    }
}
