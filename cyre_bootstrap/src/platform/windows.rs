// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Windows implementation of [`super::Platform`]. Uses `winapi` on Windows
//! and falls back to conservative stubs when cross-compiled from a non-
//! Windows host.

use super::Platform;
use std::path::PathBuf;

pub struct WindowsPlatform;

impl WindowsPlatform {
    pub fn new() -> Self {
        Self
    }

    #[cfg(windows)]
    fn cpu_count_impl() -> usize {
        use std::mem;
        use winapi::um::sysinfoapi::{GetSystemInfo, SYSTEM_INFO};

        unsafe {
            let mut sys_info: SYSTEM_INFO = mem::zeroed();
            GetSystemInfo(&mut sys_info);
            sys_info.dwNumberOfProcessors as usize
        }
    }

    #[cfg(not(windows))]
    fn cpu_count_impl() -> usize {
        1
    }

    #[cfg(windows)]
    fn is_elevated_impl() -> bool {
        // winapi doesn't expose IsUserAnAdmin directly.
        #[link(name = "shell32")]
        extern "system" {
            fn IsUserAnAdmin() -> i32;
        }
        unsafe { IsUserAnAdmin() != 0 }
    }

    #[cfg(not(windows))]
    fn is_elevated_impl() -> bool {
        false
    }
}

impl Default for WindowsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for WindowsPlatform {
    fn cpu_count(&self) -> usize {
        Self::cpu_count_impl()
    }

    fn platform_name(&self) -> &'static str {
        "windows"
    }

    fn is_elevated(&self) -> bool {
        Self::is_elevated_impl()
    }

    fn temp_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_platform_basics() {
        let platform = WindowsPlatform::new();
        assert!(platform.cpu_count() >= 1);
        assert_eq!(platform.platform_name(), "windows");
    }
}
