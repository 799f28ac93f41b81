// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! CMU tables of the Exynos 9820.
//!
//! Covers the three CPU clusters with their switch paths, the shared PLLs
//! feeding them, one PERIC0 IP with its Q-channel and the ACPM-owned
//! domains. Register indexes in the node descriptions refer to [`FIELDS`].
//!
//! ```text
//! OSCCLK ─> PLL_CPUCL0 ─> DIV_CLK_CLUSTER0_ACLK                         (ananke)
//! OSCCLK ─> PLL_CPUCL1 ───────────────────────┐
//!                                             ├─> MUX_CLK_CPUCL1_PLL    (prometheus)
//! PLL_SHARED* ─> MUX_CLKCMU_CPUCL1_SWITCH ... ┘
//! OSCCLK ─> PLL_CPUCL2 ───────────────────────┐
//!                                             ├─> MUX_CLK_CPUCL2_PLL ─> DIV_CLK_CLUSTER2_ACLK  (cheetah)
//! PLL_SHARED* ─> MUX_CLKCMU_CPUCL2_SWITCH ─> CLKCMU_CPUCL2_SWITCH
//!             ─> GATE_CLKCMU_CPUCL2_SWITCH ─> MUX_CLKCMU_CPUCL2_SWITCH_USER ┘
//! PLL_SHARED0 ─> FF_PLL_SHARED0_DIV4 ─> MUX_CLKCMU_PERIC0_BUS_USER
//!             ─> DIV_CLK_PERIC0_USI00_USI ─> GOUT_..._USI00_USI ─ QCH_USI00_USI
//! ```

use exynos::cmucal::*;
use exynos::pll_spec::PllType;

use crate::chip::margin_id;

pub const CMU_TOP: u32 = 0x1A33_0000;
pub const CMU_CPUCL0: u32 = 0x1D02_0000;
pub const CMU_CPUCL1: u32 = 0x1D03_0000;
pub const CMU_CPUCL2: u32 = 0x1D12_0000;
pub const CMU_PERIC0: u32 = 0x1040_0000;

const CMU_SIZE: u32 = 0x4000;

pub const OSCCLK: ClockId = ClockId::fixed_rate(0);
pub const PLL_SHARED0: ClockId = ClockId::fixed_rate(1);
pub const PLL_SHARED1: ClockId = ClockId::fixed_rate(2);
pub const PLL_SHARED4: ClockId = ClockId::fixed_rate(3);

pub const FF_PLL_SHARED0_DIV2: ClockId = ClockId::fixed_factor(0);
pub const FF_PLL_SHARED1_DIV2: ClockId = ClockId::fixed_factor(1);
pub const FF_PLL_SHARED0_DIV4: ClockId = ClockId::fixed_factor(2);
pub const FF_PLL_SHARED4_DIV2: ClockId = ClockId::fixed_factor(3);

pub const PLL_CPUCL0: ClockId = ClockId::pll(0);
pub const PLL_CPUCL1: ClockId = ClockId::pll(1);
pub const PLL_CPUCL2: ClockId = ClockId::pll(2);

pub const MUX_CLKCMU_CPUCL1_SWITCH: ClockId = ClockId::mux(0);
pub const MUX_CLKCMU_CPUCL2_SWITCH: ClockId = ClockId::mux(1);
pub const MUX_CLKCMU_CPUCL1_SWITCH_USER: ClockId = ClockId::user_mux(2);
pub const MUX_CLK_CPUCL1_PLL: ClockId = ClockId::mux(3);
pub const MUX_CLKCMU_CPUCL2_SWITCH_USER: ClockId = ClockId::user_mux(4);
pub const MUX_CLK_CPUCL2_PLL: ClockId = ClockId::mux(5);
pub const MUX_CLKCMU_PERIC0_BUS_USER: ClockId = ClockId::user_mux(6);

pub const CLKCMU_CPUCL1_SWITCH: ClockId = ClockId::div(0);
pub const CLKCMU_CPUCL2_SWITCH: ClockId = ClockId::div(1);
pub const DIV_CLK_CLUSTER0_ACLK: ClockId = ClockId::div(2);
pub const DIV_CLK_CLUSTER2_ACLK: ClockId = ClockId::div(3);
pub const DIV_CLK_PERIC0_USI00_USI: ClockId = ClockId::div(4);

pub const GATE_CLKCMU_CPUCL1_SWITCH: ClockId = ClockId::gate(0);
pub const GATE_CLKCMU_CPUCL2_SWITCH: ClockId = ClockId::gate(1);
pub const GOUT_BLK_PERIC0_UID_USI00_USI_IPCLKPORT_IPCLK: ClockId = ClockId::gate(2);

pub const QCH_USI00_USI: ClockId = ClockId::qch(0);

pub const CLKOUT0: ClockId = ClockId::clkout(0);

pub const VCLK_USI00_USI: ClockId = ClockId::vclk(VclkKind::Common, 0);
pub const VCLK_VDD_CHEETAH: ClockId = ClockId::vclk(VclkKind::Dfs, 0);
pub const VCLK_VDD_ANANKE: ClockId = ClockId::vclk(VclkKind::Dfs, 1);
pub const VCLK_VDD_PROMETHEUS: ClockId = ClockId::vclk(VclkKind::Dfs, 2);
pub const VCLK_IP_USI00_USI: ClockId = ClockId::vclk(VclkKind::Gate, 0);
pub const DVFS_MIF: ClockId = ClockId::vclk(VclkKind::Acpm, 0);
pub const DVFS_CPUCL0: ClockId = ClockId::vclk(VclkKind::Acpm, 1);

const fn sfr(name: &'static str, block: u16, offset: u32) -> SfrDesc {
    SfrDesc {
        name,
        block,
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

const fn cmu(name: &'static str, pa: u32) -> SfrBlockDesc {
    SfrBlockDesc {
        name,
        pa,
        size: CMU_SIZE,
    }
}

const fn pll_rate(rate: u32, p: u16, m: u16, s: u16) -> PllRate {
    PllRate { rate, p, m, s, k: 0 }
}

const fn lut(rate: u32, params: &'static [u32]) -> LutDesc {
    LutDesc { rate, params }
}

pub const BLOCKS: &[SfrBlockDesc] = &[
    cmu("CMU_TOP", CMU_TOP),
    cmu("CMU_CPUCL0", CMU_CPUCL0),
    cmu("CMU_CPUCL1", CMU_CPUCL1),
    cmu("CMU_CPUCL2", CMU_CPUCL2),
    cmu("CMU_PERIC0", CMU_PERIC0),
];

pub const SFRS: &[SfrDesc] = &[
    // CMU_TOP
    sfr("PLL_CON0_PLL_SHARED0", 0, 0x0140),
    sfr("PLL_CON0_PLL_SHARED1", 0, 0x0180),
    sfr("CLK_CON_MUX_MUX_CLKCMU_CPUCL1_SWITCH", 0, 0x1000),
    sfr("CLK_CON_MUX_MUX_CLKCMU_CPUCL2_SWITCH", 0, 0x1004),
    sfr("CLK_CON_DIV_CLKCMU_CPUCL1_SWITCH", 0, 0x1800),
    sfr("CLK_CON_DIV_CLKCMU_CPUCL2_SWITCH", 0, 0x1804),
    sfr("CLK_CON_GAT_GATE_CLKCMU_CPUCL1_SWITCH", 0, 0x2000),
    sfr("CLK_CON_GAT_GATE_CLKCMU_CPUCL2_SWITCH", 0, 0x2004),
    // CMU_CPUCL0
    sfr("PLL_LOCKTIME_PLL_CPUCL0", 1, 0x0000),
    sfr("PLL_CON0_PLL_CPUCL0", 1, 0x0100),
    sfr("PLL_CON3_PLL_CPUCL0", 1, 0x010C),
    sfr("CLK_CON_DIV_DIV_CLK_CLUSTER0_ACLK", 1, 0x1800),
    // CMU_CPUCL1
    sfr("PLL_LOCKTIME_PLL_CPUCL1", 2, 0x0000),
    sfr("PLL_CON0_PLL_CPUCL1", 2, 0x0100),
    sfr("PLL_CON3_PLL_CPUCL1", 2, 0x010C),
    sfr("PLL_CON0_MUX_CLKCMU_CPUCL1_SWITCH_USER", 2, 0x0600),
    sfr("CLK_CON_MUX_MUX_CLK_CPUCL1_PLL", 2, 0x1000),
    // CMU_CPUCL2
    sfr("PLL_LOCKTIME_PLL_CPUCL2", 3, 0x0000),
    sfr("PLL_CON0_PLL_CPUCL2", 3, 0x0100),
    sfr("PLL_CON3_PLL_CPUCL2", 3, 0x010C),
    sfr("PLL_CON0_MUX_CLKCMU_CPUCL2_SWITCH_USER", 3, 0x0600),
    sfr("CLK_CON_MUX_MUX_CLK_CPUCL2_PLL", 3, 0x1000),
    sfr("CLK_CON_DIV_DIV_CLK_CLUSTER2_ACLK", 3, 0x1800),
    // CMU_PERIC0
    sfr("PLL_CON0_MUX_CLKCMU_PERIC0_BUS_USER", 4, 0x0600),
    sfr("CLK_CON_DIV_DIV_CLK_PERIC0_USI00_USI", 4, 0x1800),
    sfr("CLK_CON_GAT_GOUT_BLK_PERIC0_UID_USI00_USI_IPCLKPORT_IPCLK", 4, 0x2000),
    sfr("QCH_CON_USI00_USI_QCH", 4, 0x3000),
    // CMU_TOP
    sfr("PLL_CON0_PLL_SHARED4", 0, 0x01C0),
];

pub const FIELDS: &[SfrFieldDesc] = &[
    field("ENABLE", 0, 31, 1), // 0
    field("ENABLE", 1, 31, 1),
    field("SELECT", 2, 0, 2),
    field("BUSY", 2, 16, 1),
    field("SELECT", 3, 0, 1),
    field("BUSY", 3, 16, 1), // 5
    field("DIVRATIO", 4, 0, 3),
    field("BUSY", 4, 16, 1),
    field("DIVRATIO", 5, 0, 3),
    field("BUSY", 5, 16, 1),
    field("CG_VALUE", 6, 21, 1), // 10
    field("CG_VALUE", 7, 21, 1),
    field("PLL_LOCK_TIME", 8, 0, 20),
    field("ENABLE", 9, 31, 1),
    field("STABLE", 9, 29, 1),
    field("DIV_M", 10, 16, 10), // 15
    field("DIV_P", 10, 8, 6),
    field("DIV_S", 10, 0, 3),
    field("DIVRATIO", 11, 0, 3),
    field("BUSY", 11, 16, 1),
    field("PLL_LOCK_TIME", 12, 0, 20), // 20
    field("ENABLE", 13, 31, 1),
    field("STABLE", 13, 29, 1),
    field("DIV_M", 14, 16, 10),
    field("DIV_P", 14, 8, 6),
    field("DIV_S", 14, 0, 3), // 25
    field("MUX_SEL", 15, 4, 1),
    field("BUSY", 15, 16, 1),
    field("SELECT", 16, 0, 1),
    field("BUSY", 16, 16, 1),
    field("PLL_LOCK_TIME", 17, 0, 20), // 30
    field("ENABLE", 18, 31, 1),
    field("STABLE", 18, 29, 1),
    field("DIV_M", 19, 16, 10),
    field("DIV_P", 19, 8, 6),
    field("DIV_S", 19, 0, 3), // 35
    field("MUX_SEL", 20, 4, 1),
    field("BUSY", 20, 16, 1),
    field("SELECT", 21, 0, 1),
    field("BUSY", 21, 16, 1),
    field("DIVRATIO", 22, 0, 3), // 40
    field("BUSY", 22, 16, 1),
    field("MUX_SEL", 23, 4, 1),
    field("BUSY", 23, 16, 1),
    field("DIVRATIO", 24, 0, 4),
    field("BUSY", 24, 16, 1), // 45
    field("CG_VALUE", 25, 21, 1),
    field("MANUAL", 25, 20, 1),
    field("ENABLE_AUTOMATIC_CLKGATING", 25, 28, 1),
    field("ENABLE", 26, 0, 1),
    field("CLOCK_REQ", 26, 1, 1), // 50
    field("IGNORE_FORCE_PM_EN", 26, 2, 1),
    field("EXPIRE_VAL", 26, 16, 12),
    field("ENABLE", 27, 31, 1),
];

const SWITCH_VDD_CHEETAH: SwitchDesc = SwitchDesc {
    switch_mux: MUX_CLK_CPUCL2_PLL,
    src_mux: MUX_CLKCMU_CPUCL2_SWITCH,
    src_div: Some(CLKCMU_CPUCL2_SWITCH),
    src_gate: Some(GATE_CLKCMU_CPUCL2_SWITCH),
    src_umux: Some(MUX_CLKCMU_CPUCL2_SWITCH_USER),
    lut: &[
        SwitchLut {
            rate: 1_066_000,
            mux_value: 0,
            div_value: Some(0),
        },
        SwitchLut {
            rate: 932_750,
            mux_value: 1,
            div_value: Some(0),
        },
        SwitchLut {
            rate: 533_000,
            mux_value: 0,
            div_value: Some(1),
        },
    ],
};

const SWITCH_VDD_PROMETHEUS: SwitchDesc = SwitchDesc {
    switch_mux: MUX_CLK_CPUCL1_PLL,
    src_mux: MUX_CLKCMU_CPUCL1_SWITCH,
    src_div: Some(CLKCMU_CPUCL1_SWITCH),
    src_gate: Some(GATE_CLKCMU_CPUCL1_SWITCH),
    src_umux: Some(MUX_CLKCMU_CPUCL1_SWITCH_USER),
    lut: &[
        SwitchLut {
            rate: 1_066_000,
            mux_value: 0,
            div_value: Some(0),
        },
        SwitchLut {
            rate: 800_000,
            mux_value: 2,
            div_value: Some(0),
        },
        SwitchLut {
            rate: 400_000,
            mux_value: 2,
            div_value: Some(1),
        },
    ],
};

pub static SOC: SocTables = SocTables {
    blocks: BLOCKS,
    sfrs: SFRS,
    fields: FIELDS,
    fixed_rates: &[
        FixedRateDesc {
            id: OSCCLK,
            name: "OSCCLK",
            rate: 26_000_000,
            enable: None,
        },
        FixedRateDesc {
            id: PLL_SHARED0,
            name: "PLL_SHARED0",
            rate: 2_132_000_000,
            enable: Some(0),
        },
        FixedRateDesc {
            id: PLL_SHARED1,
            name: "PLL_SHARED1",
            rate: 1_865_500_000,
            enable: Some(1),
        },
        FixedRateDesc {
            id: PLL_SHARED4,
            name: "PLL_SHARED4",
            rate: 1_600_000_000,
            enable: Some(53),
        },
    ],
    fixed_factors: &[
        FixedFactorDesc {
            id: FF_PLL_SHARED0_DIV2,
            name: "FF_PLL_SHARED0_DIV2",
            parent: PLL_SHARED0,
            ratio: 1,
            enable: None,
        },
        FixedFactorDesc {
            id: FF_PLL_SHARED1_DIV2,
            name: "FF_PLL_SHARED1_DIV2",
            parent: PLL_SHARED1,
            ratio: 1,
            enable: None,
        },
        FixedFactorDesc {
            id: FF_PLL_SHARED0_DIV4,
            name: "FF_PLL_SHARED0_DIV4",
            parent: PLL_SHARED0,
            ratio: 3,
            enable: None,
        },
        FixedFactorDesc {
            id: FF_PLL_SHARED4_DIV2,
            name: "FF_PLL_SHARED4_DIV2",
            parent: PLL_SHARED4,
            ratio: 1,
            enable: None,
        },
    ],
    plls: &[
        PllDesc {
            id: PLL_CPUCL0,
            name: "PLL_CPUCL0",
            parent: Some(OSCCLK),
            pll_type: PllType::Pll1450x,
            lock: 12,
            enable: 13,
            status: 14,
            m: 15,
            p: 16,
            s: 17,
            k: None,
            umux: None,
            rate_table: &[
                pll_rate(1_950_000_000, 4, 300, 0),
                pll_rate(1_599_000_000, 4, 246, 0),
                pll_rate(1_150_500_000, 4, 177, 0),
                pll_rate(650_000_000, 4, 200, 1),
                pll_rate(349_917_000, 6, 323, 2),
                pll_rate(175_000_000, 13, 700, 3),
            ],
        },
        PllDesc {
            id: PLL_CPUCL1,
            name: "PLL_CPUCL1",
            parent: Some(OSCCLK),
            pll_type: PllType::Pll1450x,
            lock: 20,
            enable: 21,
            status: 22,
            m: 23,
            p: 24,
            s: 25,
            k: None,
            umux: None,
            rate_table: &[
                pll_rate(2_398_500_000, 4, 369, 0),
                pll_rate(1_800_000_000, 13, 900, 0),
                pll_rate(1_400_000_000, 13, 700, 0),
                pll_rate(800_000_000, 13, 800, 1),
                pll_rate(466_000_000, 13, 932, 2),
            ],
        },
        PllDesc {
            id: PLL_CPUCL2,
            name: "PLL_CPUCL2",
            parent: Some(OSCCLK),
            pll_type: PllType::Pll1450x,
            lock: 30,
            enable: 31,
            status: 32,
            m: 33,
            p: 34,
            s: 35,
            k: None,
            umux: None,
            rate_table: &[
                pll_rate(2_850_250_000, 8, 877, 0),
                pll_rate(2_224_857_000, 7, 599, 0),
                pll_rate(1_834_857_000, 7, 494, 0),
                pll_rate(1_100_000_000, 13, 550, 0),
            ],
        },
    ],
    muxes: &[
        MuxDesc {
            id: MUX_CLKCMU_CPUCL1_SWITCH,
            name: "MUX_CLKCMU_CPUCL1_SWITCH",
            parents: &[FF_PLL_SHARED0_DIV2, FF_PLL_SHARED1_DIV2, FF_PLL_SHARED4_DIV2],
            select: 2,
            busy: Some(3),
            enable: None,
        },
        MuxDesc {
            id: MUX_CLKCMU_CPUCL2_SWITCH,
            name: "MUX_CLKCMU_CPUCL2_SWITCH",
            parents: &[FF_PLL_SHARED0_DIV2, FF_PLL_SHARED1_DIV2],
            select: 4,
            busy: Some(5),
            enable: None,
        },
        MuxDesc {
            id: MUX_CLKCMU_CPUCL1_SWITCH_USER,
            name: "MUX_CLKCMU_CPUCL1_SWITCH_USER",
            parents: &[OSCCLK, GATE_CLKCMU_CPUCL1_SWITCH],
            select: 26,
            busy: Some(27),
            enable: None,
        },
        MuxDesc {
            id: MUX_CLK_CPUCL1_PLL,
            name: "MUX_CLK_CPUCL1_PLL",
            parents: &[PLL_CPUCL1, MUX_CLKCMU_CPUCL1_SWITCH_USER],
            select: 28,
            busy: Some(29),
            enable: None,
        },
        MuxDesc {
            id: MUX_CLKCMU_CPUCL2_SWITCH_USER,
            name: "MUX_CLKCMU_CPUCL2_SWITCH_USER",
            parents: &[OSCCLK, GATE_CLKCMU_CPUCL2_SWITCH],
            select: 36,
            busy: Some(37),
            enable: None,
        },
        MuxDesc {
            id: MUX_CLK_CPUCL2_PLL,
            name: "MUX_CLK_CPUCL2_PLL",
            parents: &[PLL_CPUCL2, MUX_CLKCMU_CPUCL2_SWITCH_USER],
            select: 38,
            busy: Some(39),
            enable: None,
        },
        MuxDesc {
            id: MUX_CLKCMU_PERIC0_BUS_USER,
            name: "MUX_CLKCMU_PERIC0_BUS_USER",
            parents: &[OSCCLK, FF_PLL_SHARED0_DIV4],
            select: 42,
            busy: Some(43),
            enable: None,
        },
    ],
    divs: &[
        DivDesc {
            id: CLKCMU_CPUCL1_SWITCH,
            name: "CLKCMU_CPUCL1_SWITCH",
            parent: MUX_CLKCMU_CPUCL1_SWITCH,
            ratio: 6,
            busy: Some(7),
            enable: None,
        },
        DivDesc {
            id: CLKCMU_CPUCL2_SWITCH,
            name: "CLKCMU_CPUCL2_SWITCH",
            parent: MUX_CLKCMU_CPUCL2_SWITCH,
            ratio: 8,
            busy: Some(9),
            enable: None,
        },
        DivDesc {
            id: DIV_CLK_CLUSTER0_ACLK,
            name: "DIV_CLK_CLUSTER0_ACLK",
            parent: PLL_CPUCL0,
            ratio: 18,
            busy: Some(19),
            enable: None,
        },
        DivDesc {
            id: DIV_CLK_CLUSTER2_ACLK,
            name: "DIV_CLK_CLUSTER2_ACLK",
            parent: MUX_CLK_CPUCL2_PLL,
            ratio: 40,
            busy: Some(41),
            enable: None,
        },
        DivDesc {
            id: DIV_CLK_PERIC0_USI00_USI,
            name: "DIV_CLK_PERIC0_USI00_USI",
            parent: MUX_CLKCMU_PERIC0_BUS_USER,
            ratio: 44,
            busy: Some(45),
            enable: None,
        },
    ],
    gates: &[
        GateDesc {
            id: GATE_CLKCMU_CPUCL1_SWITCH,
            name: "GATE_CLKCMU_CPUCL1_SWITCH",
            parent: Some(CLKCMU_CPUCL1_SWITCH),
            cg_value: 10,
            manual: None,
            auto_enable: None,
        },
        GateDesc {
            id: GATE_CLKCMU_CPUCL2_SWITCH,
            name: "GATE_CLKCMU_CPUCL2_SWITCH",
            parent: Some(CLKCMU_CPUCL2_SWITCH),
            cg_value: 11,
            manual: None,
            auto_enable: None,
        },
        GateDesc {
            id: GOUT_BLK_PERIC0_UID_USI00_USI_IPCLKPORT_IPCLK,
            name: "GOUT_BLK_PERIC0_UID_USI00_USI_IPCLKPORT_IPCLK",
            parent: Some(DIV_CLK_PERIC0_USI00_USI),
            cg_value: 46,
            manual: Some(47),
            auto_enable: Some(48),
        },
    ],
    qchs: &[QchDesc {
        id: QCH_USI00_USI,
        name: "QCH_USI00_USI",
        parent: Some(GOUT_BLK_PERIC0_UID_USI00_USI_IPCLKPORT_IPCLK),
        enable: 49,
        req: 50,
        expire: Some(52),
        ignore: Some(51),
    }],
    options: &[],
    clkouts: &[ClkoutDesc {
        id: CLKOUT0,
        name: "CLKOUT0",
        pmu_offset: 0x0A00,
        select_shift: 8,
        select_width: 5,
        select: 1,
        enable_shift: 0,
    }],
    common_vclks: &[VclkDesc {
        list: &[DIV_CLK_PERIC0_USI00_USI],
        lut: &[lut(533_000, &[0]), lut(266_500, &[1]), lut(133_250, &[3])],
        ..VclkDesc::new(VCLK_USI00_USI, "VCLK_USI00_USI")
    }],
    dfs_vclks: &[
        VclkDesc {
            list: &[DIV_CLK_CLUSTER2_ACLK, PLL_CPUCL2],
            lut: &[
                lut(2_850_250, &[3, 2_850_250]),
                lut(2_224_857, &[3, 2_224_857]),
                lut(1_834_857, &[3, 1_834_857]),
                lut(1_100_000, &[1, 1_100_000]),
            ],
            switches: &[SWITCH_VDD_CHEETAH],
            ect: Some("dvfs_cpucl2"),
            ..VclkDesc::new(VCLK_VDD_CHEETAH, "VCLK_VDD_CHEETAH")
        },
        VclkDesc {
            list: &[DIV_CLK_CLUSTER0_ACLK, PLL_CPUCL0],
            lut: &[
                lut(1_950_000, &[1, 1_950_000]),
                lut(1_599_000, &[1, 1_599_000]),
                lut(1_150_500, &[1, 1_150_500]),
                lut(650_000, &[0, 650_000]),
                lut(349_917, &[0, 349_917]),
                lut(175_000, &[0, 175_000]),
            ],
            ect: Some("dvfs_cpucl0"),
            ..VclkDesc::new(VCLK_VDD_ANANKE, "VCLK_VDD_ANANKE")
        },
        VclkDesc {
            list: &[PLL_CPUCL1],
            lut: &[
                lut(2_398_500, &[2_398_500]),
                lut(1_800_000, &[1_800_000]),
                lut(1_400_000, &[1_400_000]),
                lut(800_000, &[800_000]),
                lut(466_000, &[466_000]),
            ],
            switches: &[SWITCH_VDD_PROMETHEUS],
            ect: Some("dvfs_cpucl1"),
            ..VclkDesc::new(VCLK_VDD_PROMETHEUS, "VCLK_VDD_PROMETHEUS")
        },
    ],
    gate_vclks: &[VclkDesc {
        list: &[
            MUX_CLKCMU_PERIC0_BUS_USER,
            GOUT_BLK_PERIC0_UID_USI00_USI_IPCLKPORT_IPCLK,
            QCH_USI00_USI,
        ],
        ..VclkDesc::new(VCLK_IP_USI00_USI, "VCLK_IP_USI00_USI")
    }],
    acpm_vclks: &[
        VclkDesc {
            ect: Some("dvfs_mif"),
            margin: margin_id("mif"),
            ..VclkDesc::new(DVFS_MIF, "dvfs_mif")
        },
        VclkDesc {
            ect: Some("dvfs_cpucl0"),
            margin: margin_id("lit"),
            ..VclkDesc::new(DVFS_CPUCL0, "dvfs_cpucl0")
        },
    ],
};
