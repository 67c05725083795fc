//! Count → color banding.

/// One entry of the banding table: every count up to and including `max`
/// (or any count, for the last band) gets `color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub max: Option<u64>,
    pub color: &'static str,
}

/// Ordered from lightest to darkest. The first band whose `max` admits the
/// count wins.
pub const BANDS: [Band; 5] = [
    Band { max: Some(0), color: "#ebedf0" },
    Band { max: Some(3), color: "#9be9a8" },
    Band { max: Some(7), color: "#40c463" },
    Band { max: Some(15), color: "#30a14e" },
    Band { max: None, color: "#216e39" },
];

/// Band index (0..=4) for a day's count.
pub fn level(count: u64) -> usize {
    BANDS
        .iter()
        .position(|band| band.max.is_none_or(|max| count <= max))
        .unwrap_or(BANDS.len() - 1)
}

pub fn color_for(count: u64) -> &'static str {
    BANDS[level(count)].color
}
