//! Loop-index arithmetic for embedded animations and clips.

/// Which cached sub-frame a looping clip shows at output position `pos`.
///
/// The clip starts at `start` and completes one full cycle over its
/// sub-frames every `period` output frames, sampled uniformly:
///
/// `index = floor(frac((pos - start) / period) * total)`
///
/// Degenerate inputs (`period == 0`, `total == 0`, or `pos` before
/// `start`) pin to sub-frame 0.
pub fn loop_index(pos: u32, start: u32, period: u32, total: u32) -> usize {
    if period == 0 || total == 0 || pos < start {
        return 0;
    }
    let offset = ((pos - start) % period) as u64;
    (offset * total as u64 / period as u64) as usize
}

/// The default loop period: one native sub-frame per output frame.
pub fn native_period(total: u32) -> u32 {
    total.max(1)
}
