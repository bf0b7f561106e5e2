// File: crates/candlewick-core/src/classify.rs
// Summary: Stepback color classifier; pure per-row override selection.

/// Override color for a bar flagged as a stepback. Rows without an override
/// use the default up/down palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorOverride {
    Blue,
    Orange,
}

/// Truth table:
/// (true, true) -> Blue, (false, true) -> Orange, (_, false) -> None.
pub fn classify(is_up: bool, stepped_back: bool) -> Option<ColorOverride> {
    if !stepped_back {
        return None;
    }
    if is_up {
        Some(ColorOverride::Blue)
    } else {
        Some(ColorOverride::Orange)
    }
}

/// Build the full per-row override array. Rows are classified independently.
/// Caller is responsible for length-matching the two slices (see
/// `check_flag_lengths`); this zips to the shorter.
pub fn stepback_overrides(is_up: &[bool], step_back: &[bool]) -> Vec<Option<ColorOverride>> {
    is_up
        .iter()
        .zip(step_back.iter())
        .map(|(&up, &back)| classify(up, back))
        .collect()
}
