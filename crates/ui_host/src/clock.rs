//! Wall clock and thread-unique stamps.

use std::cell::Cell;

/// Low bits of a stamp reserved for the per-millisecond sequence.
pub const STAMP_SEQUENCE_BITS: u32 = 12;

thread_local! {
    static LAST_STAMP: Cell<u64> = const { Cell::new(0) };
}

/// Milliseconds since the unix epoch; `0` if the clock is before the epoch.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Returns a stamp that is strictly greater than every stamp previously
/// returned on this thread.
///
/// The high bits carry the wall-clock millisecond and the low
/// [`STAMP_SEQUENCE_BITS`] count calls within it; a clock that stalls or
/// steps back keeps counting from the last stamp.
pub fn next_unique_stamp() -> u64 {
    let floor = unix_time_ms_now() << STAMP_SEQUENCE_BITS;
    LAST_STAMP.with(|last| {
        let stamp = floor.max(last.get().saturating_add(1));
        last.set(stamp);
        stamp
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamps_strictly_increase_within_a_millisecond() {
        let stamps: Vec<u64> = (0..64).map(|_| next_unique_stamp()).collect();
        assert!(stamps.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn stamp_high_bits_track_the_wall_clock() {
        let before = unix_time_ms_now();
        let stamp = next_unique_stamp() >> STAMP_SEQUENCE_BITS;
        assert!(stamp >= before);
    }
}
