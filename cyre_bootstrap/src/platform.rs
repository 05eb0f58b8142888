// /////////////////////////////////////////////////////////////////////////////
// Cyre
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Platform abstraction
//!
//! OS-level facts the bootstrap's startup banner and diagnostics surface:
//! CPU count, platform name, and whether the process is running elevated.
//! Unlike the file-processing lineage this crate is grounded on, Cyre has no
//! file I/O of its own, so the trait carries none of the page-size/memory/
//! file-permission surface that domain used to need — just what a process
//! banner wants to print on startup.
//!
//! Implementations are selected at compile time (`UnixPlatform` /
//! `WindowsPlatform`), following the same hexagonal pattern as the rest of
//! this crate: one trait, one implementation per target family.

use std::path::PathBuf;

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use unix::UnixPlatform;

#[cfg(windows)]
pub use windows::WindowsPlatform;

/// Platform abstraction for the handful of OS facts bootstrap logging wants.
pub trait Platform: Send + Sync {
    /// Number of logical CPUs available to the process.
    fn cpu_count(&self) -> usize;

    /// Platform identifier: `"linux"`, `"macos"`, `"windows"`.
    fn platform_name(&self) -> &'static str;

    /// `true` if the process is running with elevated privileges (root /
    /// Administrator). Surfaced as a startup warning, not enforced.
    fn is_elevated(&self) -> bool;

    /// The platform-specific temporary directory, used as the default search
    /// location for an unspecified `--config` path.
    fn temp_dir(&self) -> PathBuf;
}

#[cfg(unix)]
type PlatformImpl = UnixPlatform;

#[cfg(windows)]
type PlatformImpl = WindowsPlatform;

/// Returns the platform implementation selected for the current target.
pub fn create_platform() -> Box<dyn Platform> {
    Box::new(PlatformImpl::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_platform_reports_sane_facts() {
        let platform = create_platform();
        assert!(platform.cpu_count() >= 1);
        assert!(!platform.platform_name().is_empty());
    }
}
