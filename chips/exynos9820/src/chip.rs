// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

use exynos::chip_specific::ChipSpecs;

pub struct Exynos9820;

impl ChipSpecs for Exynos9820 {
    const FIN_HZ: u32 = 26_000_000;

    // ACPM sees the CMU windows 0x9000_0000 above the AP.
    const FVMAP_ADDR_OFFSET: u32 = 0x9000_0000;

    const MARGIN_DOMAINS: &'static [&'static str] = &[
        "mif", "int", "big", "mid", "lit", "g3d", "intcam", "cam", "disp", "g3dm", "cp",
        "fsys0", "aud", "iva", "npu", "mfc",
    ];
}

/// Margin id of a domain name, as used in [`ChipSpecs::MARGIN_DOMAINS`].
pub const fn margin_id(name: &str) -> Option<u16> {
    let domains = <Exynos9820 as ChipSpecs>::MARGIN_DOMAINS;
    let mut i = 0;
    while i < domains.len() {
        if const_str_eq(domains[i], name) {
            return Some(i as u16);
        }
        i += 1;
    }
    None
}

const fn const_str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
