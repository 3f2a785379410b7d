//! Beep duration conversion
//!
//! The buzzer command carries a single byte counting beep units of roughly
//! 1/255 of a second. A count of zero makes the device beep until told
//! otherwise.

use std::time::Duration;

/// One beep unit, the smallest buzzer duration the device resolves.
pub const UNIT: Duration = Duration::from_nanos(1_000_000_000 / 255);

/// Convert a wall-clock duration to a device unit count.
///
/// Truncates to whole units, with two adjustments: a nonzero duration
/// never truncates below one unit (a zero count would beep forever), and
/// counts above 255 saturate at 255. A zero duration stays zero and keeps
/// its beep-forever meaning.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use rfidrs_core::beep;
///
/// assert_eq!(beep::units(Duration::from_millis(500)), 127);
/// assert_eq!(beep::units(Duration::ZERO), 0);
/// ```
pub fn units(duration: Duration) -> u8 {
    let count = duration.as_nanos() / UNIT.as_nanos();
    if !duration.is_zero() && count == 0 {
        return 1;
    }
    count.min(255) as u8
}
