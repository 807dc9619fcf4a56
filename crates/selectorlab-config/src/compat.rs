//! Detection of the Linux-on-Windows compatibility layer.
//!
//! Under that layer the assistant usually runs on the Windows host, reached
//! through a bridge address, and network round trips are slow.

use std::fs;

/// Whether a kernel version string belongs to the compatibility layer.
pub(crate) fn is_compat_kernel(version: &str) -> bool {
    let lowered = version.to_ascii_lowercase();
    lowered.contains("microsoft") || lowered.contains("wsl")
}

/// Inspect `/proc/version` for the compatibility-layer kernel.
pub fn detect_compat_layer() -> bool {
    fs::read_to_string("/proc/version")
        .map(|v| is_compat_kernel(&v))
        .unwrap_or(false)
}
