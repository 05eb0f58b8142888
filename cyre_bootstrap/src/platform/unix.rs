// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! POSIX implementation of [`super::Platform`] for Linux and macOS, backed
//! by `libc::sysconf`/`libc::geteuid`.

use super::Platform;
use std::path::PathBuf;

pub struct UnixPlatform;

impl UnixPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnixPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for UnixPlatform {
    fn cpu_count(&self) -> usize {
        // SAFETY: sysconf is safe to call with a valid name constant and
        // always returns a value (or -1 on the rare unsupported query).
        let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        if n > 0 {
            n as usize
        } else {
            1
        }
    }

    fn platform_name(&self) -> &'static str {
        if cfg!(target_os = "macos") {
            "macos"
        } else {
            "linux"
        }
    }

    fn is_elevated(&self) -> bool {
        // SAFETY: geteuid takes no arguments and never fails.
        unsafe { libc::geteuid() == 0 }
    }

    fn temp_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_platform_basics() {
        let platform = UnixPlatform::new();
        assert!(platform.cpu_count() >= 1);
        assert!(matches!(platform.platform_name(), "linux" | "macos"));
    }
}
