// ABOUTME: Decimal rounding used by every displayed metric
// ABOUTME: Halves round toward positive infinity, matching the stored client values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Sanus Space

/// Round `value` to `decimals` places, halves toward positive infinity
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}
