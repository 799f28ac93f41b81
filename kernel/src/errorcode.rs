// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Standard error enum for invoking operations

/// Standard errors for clock, DVFS and power operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum ErrorCode {
    /// Generic failure condition
    FAIL = 0,
    /// Underlying hardware is busy; retry
    BUSY = 1,
    /// The state requested is already set
    ALREADY = 2,
    /// The clock id is unknown, out of range, or names an unpopulated slot
    BADID = 3,
    /// A bounded hardware poll did not observe the expected bit state
    TIMEOUT = 4,
    /// An invalid parameter was passed
    INVAL = 5,
    /// No legal P/M/S/K combination exists for the requested rate
    NOSOLUTION = 6,
    /// A named table or domain is not present
    NOENT = 7,
    /// Memory required not available
    NOMEM = 8,
    /// Operation is unsupported for this kind of node
    NOSUPPORT = 9,
}

impl ErrorCode {
    /// The negative Linux errno value reported to kernel callers.
    pub fn to_errno(self) -> isize {
        match self {
            ErrorCode::FAIL => -5,        // EIO
            ErrorCode::BUSY => -16,       // EBUSY
            ErrorCode::ALREADY => -114,   // EALREADY
            ErrorCode::BADID => -22,      // EINVAL
            ErrorCode::TIMEOUT => -110,   // ETIMEDOUT
            ErrorCode::INVAL => -22,      // EINVAL
            ErrorCode::NOSOLUTION => -34, // ERANGE
            ErrorCode::NOENT => -2,       // ENOENT
            ErrorCode::NOMEM => -12,      // ENOMEM
            ErrorCode::NOSUPPORT => -95,  // EOPNOTSUPP
        }
    }
}

impl From<ErrorCode> for usize {
    fn from(err: ErrorCode) -> usize {
        err as usize
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;

    #[test]
    fn errno_values_are_negative() {
        let all = [
            ErrorCode::FAIL,
            ErrorCode::BUSY,
            ErrorCode::ALREADY,
            ErrorCode::BADID,
            ErrorCode::TIMEOUT,
            ErrorCode::INVAL,
            ErrorCode::NOSOLUTION,
            ErrorCode::NOENT,
            ErrorCode::NOMEM,
            ErrorCode::NOSUPPORT,
        ];
        for err in all {
            assert!(err.to_errno() < 0);
        }
        assert_eq!(ErrorCode::TIMEOUT.to_errno(), -110);
        assert_eq!(usize::from(ErrorCode::NOMEM), 8);
    }
}
