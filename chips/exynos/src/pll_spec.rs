// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! PLL family constraints and P/M/S/K search.
//!
//! Every Exynos PLL computes
//!
//! ```text
//! fout = fin * (M + K / 65536) / (P * 2^S)
//! ```
//!
//! where `K` only exists on fractional families. The reference `fin / P`,
//! the VCO `fin * (M + K / 65536) / P` and the output must each stay inside
//! the family's legal range. Rates present in a PLL's rate table are
//! programmed from the table; [`find_pmsk`] covers everything else.

use kernel::ErrorCode;

const MHZ: u64 = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PllType {
    Pll1416x,
    Pll1417x,
    Pll1418x,
    Pll1419x,
    Pll1431x,
    Pll1450x,
    Pll1451x,
    Pll1452x,
    Pll1460x,
}

/// Legal ranges of one PLL family. Frequencies are in Hz, lock times in
/// reference clock cycles per unit of P.
#[derive(Debug)]
pub struct PllSpec {
    pub pdiv_min: u32,
    pub pdiv_max: u32,
    pub mdiv_min: u32,
    pub mdiv_max: u32,
    pub sdiv_min: u32,
    pub sdiv_max: u32,
    pub kdiv_min: i32,
    pub kdiv_max: i32,
    pub fref_min: u64,
    pub fref_max: u64,
    pub fvco_min: u64,
    pub fvco_max: u64,
    pub fout_min: u64,
    pub fout_max: u64,
    pub lock_time: u32,
    pub flock_time: u32,
}

impl PllSpec {
    pub fn is_frac(&self) -> bool {
        self.flock_time != 0
    }
}

static PLL141XX_SPEC: PllSpec = PllSpec {
    pdiv_min: 1,
    pdiv_max: 63,
    mdiv_min: 64,
    mdiv_max: 1023,
    sdiv_min: 0,
    sdiv_max: 6,
    kdiv_min: 0,
    kdiv_max: 0,
    fref_min: MHZ,
    fref_max: 12 * MHZ,
    fvco_min: 1000 * MHZ,
    fvco_max: 3300 * MHZ,
    fout_min: 16 * MHZ,
    fout_max: 3300 * MHZ,
    lock_time: 150,
    flock_time: 0,
};

static PLL145XX_SPEC: PllSpec = PllSpec {
    pdiv_min: 1,
    pdiv_max: 63,
    mdiv_min: 64,
    mdiv_max: 1023,
    sdiv_min: 0,
    sdiv_max: 6,
    kdiv_min: 0,
    kdiv_max: 0,
    fref_min: 2 * MHZ,
    fref_max: 12 * MHZ,
    fvco_min: 1000 * MHZ,
    fvco_max: 3300 * MHZ,
    fout_min: 16 * MHZ,
    fout_max: 3300 * MHZ,
    lock_time: 200,
    flock_time: 0,
};

static PLL1431X_SPEC: PllSpec = PllSpec {
    pdiv_min: 1,
    pdiv_max: 63,
    mdiv_min: 16,
    mdiv_max: 1023,
    sdiv_min: 0,
    sdiv_max: 6,
    kdiv_min: -32768,
    kdiv_max: 32767,
    fref_min: 2 * MHZ,
    fref_max: 26 * MHZ,
    fvco_min: 600 * MHZ,
    fvco_max: 1600 * MHZ,
    fout_min: 9 * MHZ,
    fout_max: 1600 * MHZ,
    lock_time: 500,
    flock_time: 500,
};

static PLL1460X_SPEC: PllSpec = PllSpec {
    pdiv_min: 1,
    pdiv_max: 63,
    mdiv_min: 16,
    mdiv_max: 1023,
    sdiv_min: 0,
    sdiv_max: 6,
    kdiv_min: -32768,
    kdiv_max: 32767,
    fref_min: 2 * MHZ,
    fref_max: 26 * MHZ,
    fvco_min: 600 * MHZ,
    fvco_max: 3300 * MHZ,
    fout_min: 9 * MHZ,
    fout_max: 3300 * MHZ,
    lock_time: 500,
    flock_time: 500,
};

pub fn get_spec(ty: PllType) -> &'static PllSpec {
    match ty {
        PllType::Pll1416x | PllType::Pll1417x | PllType::Pll1418x | PllType::Pll1419x => {
            &PLL141XX_SPEC
        }
        PllType::Pll1450x | PllType::Pll1451x | PllType::Pll1452x => &PLL145XX_SPEC,
        PllType::Pll1431x => &PLL1431X_SPEC,
        PllType::Pll1460x => &PLL1460X_SPEC,
    }
}

/// `(lock_time, flock_time)` to copy onto a PLL node.
pub fn get_locktime(spec: &PllSpec) -> (u32, u32) {
    (spec.lock_time, spec.flock_time)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pmsk {
    pub p: u32,
    pub m: u32,
    pub s: u32,
    pub k: i32,
}

/// Output rate, in Hz, of a PLL programmed with `pmsk`.
pub fn pll_output(fin: u64, pmsk: Pmsk, frac: bool) -> u64 {
    if pmsk.p == 0 {
        return 0;
    }
    let div = (pmsk.p as u64) << pmsk.s;
    if frac {
        let mk = ((pmsk.m as i64) << 16) + pmsk.k as i64;
        if mk <= 0 {
            return 0;
        }
        fin * mk as u64 / (div << 16)
    } else {
        fin * pmsk.m as u64 / div
    }
}

fn same_khz(a: u64, b: u64) -> bool {
    (a + 500) / 1000 == (b + 500) / 1000
}

/// Search P, M, S (and K on fractional families) producing `rate` Hz from
/// `fin` Hz.
///
/// A candidate whose output rounds to the same kHz as `rate` is returned
/// immediately. Normal PLLs otherwise fall back to the legal candidate with
/// the smallest error, as long as `rate` is inside the family's output
/// range; fractional PLLs have no fallback.
pub fn find_pmsk(spec: &PllSpec, is_normal: bool, fin: u64, rate: u64) -> Result<Pmsk, ErrorCode> {
    if fin == 0 || rate == 0 {
        return Err(ErrorCode::INVAL);
    }
    if is_normal {
        find_pms(spec, fin, rate)
    } else {
        find_pmsk_frac(spec, fin, rate)
    }
}

fn find_pms(spec: &PllSpec, fin: u64, rate: u64) -> Result<Pmsk, ErrorCode> {
    if rate < spec.fout_min || rate > spec.fout_max {
        return Err(ErrorCode::NOSOLUTION);
    }
    let mut best: Option<(u64, Pmsk)> = None;

    for p in spec.pdiv_min..=spec.pdiv_max {
        let fref = fin / p as u64;
        if fref < spec.fref_min || fref > spec.fref_max {
            continue;
        }
        let p64 = p as u64;
        for s in spec.sdiv_min..=spec.sdiv_max {
            // Range of M keeping both the VCO and the output legal.
            let lo = (spec.mdiv_min as u64)
                .max((spec.fvco_min * p64).div_ceil(fin))
                .max(((spec.fout_min << s) * p64).div_ceil(fin));
            let hi = (spec.mdiv_max as u64)
                .min(((spec.fvco_max + 1) * p64 - 1) / fin)
                .min(((((spec.fout_max + 1) << s) * p64) - 1) / fin);
            if lo > hi {
                continue;
            }

            let m_floor = ((rate * p64) << s) / fin;
            for m in [m_floor, m_floor + 1] {
                let m = m.clamp(lo, hi);
                let pmsk = Pmsk {
                    p,
                    m: m as u32,
                    s,
                    k: 0,
                };
                let fout = pll_output(fin, pmsk, false);
                if same_khz(fout, rate) {
                    return Ok(pmsk);
                }
                let diff = fout.abs_diff(rate);
                if best.map_or(true, |(d, _)| diff < d) {
                    best = Some((diff, pmsk));
                }
            }
        }
    }

    best.map(|(_, pmsk)| pmsk).ok_or(ErrorCode::NOSOLUTION)
}

fn find_pmsk_frac(spec: &PllSpec, fin: u64, rate: u64) -> Result<Pmsk, ErrorCode> {
    if rate < spec.fout_min || rate > spec.fout_max {
        return Err(ErrorCode::NOSOLUTION);
    }
    for p in spec.pdiv_min..=spec.pdiv_max {
        let fref = fin / p as u64;
        if fref < spec.fref_min || fref > spec.fref_max {
            continue;
        }
        let p64 = p as u64;
        for s in spec.sdiv_min..=spec.sdiv_max {
            let Some(num) = rate
                .checked_mul(p64)
                .and_then(|n| n.checked_mul(1 << s))
            else {
                continue;
            };
            let mut m = (num / fin) as i64;
            let rem = num % fin;
            let mut k = (((rem << 16) + fin / 2) / fin) as i64;
            if k > spec.kdiv_max as i64 {
                m += 1;
                k -= 1 << 16;
            }
            if m < spec.mdiv_min as i64
                || m > spec.mdiv_max as i64
                || k < spec.kdiv_min as i64
                || k > spec.kdiv_max as i64
            {
                continue;
            }

            let fvco = fin * (((m << 16) + k) as u64) / (p64 << 16);
            if fvco < spec.fvco_min || fvco > spec.fvco_max {
                continue;
            }
            let pmsk = Pmsk {
                p,
                m: m as u32,
                s,
                k: k as i32,
            };
            let fout = pll_output(fin, pmsk, true);
            if fout >= spec.fout_min && fout <= spec.fout_max && same_khz(fout, rate) {
                return Ok(pmsk);
            }
        }
    }

    Err(ErrorCode::NOSOLUTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIN: u64 = 26_000_000;

    /// Smallest output error over every legal P/M/S combination.
    fn brute_force_min_diff(spec: &PllSpec, fin: u64, rate: u64) -> Option<u64> {
        let mut best = None;
        for p in spec.pdiv_min..=spec.pdiv_max {
            let fref = fin / p as u64;
            if fref < spec.fref_min || fref > spec.fref_max {
                continue;
            }
            for s in spec.sdiv_min..=spec.sdiv_max {
                for m in spec.mdiv_min..=spec.mdiv_max {
                    let fvco = fin * m as u64 / p as u64;
                    if fvco < spec.fvco_min || fvco > spec.fvco_max {
                        continue;
                    }
                    let fout = pll_output(fin, Pmsk { p, m, s, k: 0 }, false);
                    if fout < spec.fout_min || fout > spec.fout_max {
                        continue;
                    }
                    let diff = fout.abs_diff(rate);
                    if best.map_or(true, |b| diff < b) {
                        best = Some(diff);
                    }
                }
            }
        }
        best
    }

    fn assert_legal(spec: &PllSpec, pmsk: Pmsk, frac: bool) {
        let fref = FIN / pmsk.p as u64;
        assert!(fref >= spec.fref_min && fref <= spec.fref_max);
        assert!(pmsk.m >= spec.mdiv_min && pmsk.m <= spec.mdiv_max);
        assert!(pmsk.s >= spec.sdiv_min && pmsk.s <= spec.sdiv_max);
        let fout = pll_output(FIN, pmsk, frac);
        let fvco = fout << pmsk.s;
        // The VCO reconstructed from the truncated output may be off by 2^s.
        assert!(fvco + (1 << pmsk.s) > spec.fvco_min && fvco <= spec.fvco_max);
        assert!(fout >= spec.fout_min && fout <= spec.fout_max);
    }

    #[test]
    fn exact_normal_rates() {
        let spec = get_spec(PllType::Pll1450x);
        for rate in [2_002_000_000, 1_053_000_000, 650_000_000] {
            let pmsk = find_pmsk(spec, true, FIN, rate).unwrap();
            assert_legal(spec, pmsk, false);
            assert!(same_khz(pll_output(FIN, pmsk, false), rate));
        }
    }

    #[test]
    fn closest_normal_rate_matches_brute_force() {
        for ty in [PllType::Pll1419x, PllType::Pll1450x] {
            let spec = get_spec(ty);
            for rate in [1_234_567_891, 777_777_777, 20_000_001] {
                let pmsk = find_pmsk(spec, true, FIN, rate).unwrap();
                assert_legal(spec, pmsk, false);
                let fout = pll_output(FIN, pmsk, false);
                if !same_khz(fout, rate) {
                    assert_eq!(Some(fout.abs_diff(rate)), brute_force_min_diff(spec, FIN, rate));
                }
            }
        }
    }

    #[test]
    fn unreachable_normal_rate() {
        let spec = get_spec(PllType::Pll1419x);
        assert_eq!(find_pmsk(spec, true, FIN, 1_000_000), Err(ErrorCode::NOSOLUTION));
        assert_eq!(find_pmsk(spec, true, 0, 1_000_000), Err(ErrorCode::INVAL));
    }

    #[test]
    fn fractional_rates() {
        let spec = get_spec(PllType::Pll1431x);
        assert!(spec.is_frac());
        for rate in [1_179_648_000, 589_824_000, 393_216_000] {
            let pmsk = find_pmsk(spec, false, FIN, rate).unwrap();
            assert!(pmsk.k >= spec.kdiv_min && pmsk.k <= spec.kdiv_max);
            assert!(same_khz(pll_output(FIN, pmsk, true), rate));
        }

        let pmsk = find_pmsk(spec, false, FIN, 1_179_648_000).unwrap();
        assert_eq!(pmsk, Pmsk { p: 1, m: 45, s: 0, k: 24319 });

        // Below the VCO range even at the largest post divider.
        assert_eq!(find_pmsk(spec, false, FIN, 5_000_000), Err(ErrorCode::NOSOLUTION));
    }

    #[test]
    fn huge_rates_are_rejected() {
        for (pll_type, is_normal) in [(PllType::Pll1431x, false), (PllType::Pll1419x, true)] {
            let spec = get_spec(pll_type);
            for rate in [u64::MAX, u64::MAX >> 6, spec.fout_max + 1] {
                assert_eq!(
                    find_pmsk(spec, is_normal, FIN, rate),
                    Err(ErrorCode::NOSOLUTION)
                );
            }
        }
    }

    #[test]
    fn output_formula() {
        let normal = Pmsk { p: 13, m: 800, s: 1, k: 0 };
        assert_eq!(pll_output(FIN, normal, false), 800_000_000);
        assert_eq!(pll_output(FIN, Pmsk::default(), false), 0);

        let frac = Pmsk { p: 1, m: 45, s: 1, k: -1 };
        assert_eq!(pll_output(FIN, frac, true), FIN * ((45 << 16) - 1) / (2 << 16));
        assert_eq!(get_locktime(get_spec(PllType::Pll1460x)), (500, 500));
    }
}
