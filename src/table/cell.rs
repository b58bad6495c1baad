//! Cell-level conversion from raw strings to optional numeric values.

/// Marker used by the source files for a missing observation.
pub const SENTINEL: &str = "***";

/// Converts a raw cell into an optional numeric value.
///
/// The sentinel marker, unparseable text, and non-finite numbers all map to
/// `None` so that downstream arithmetic only ever sees real observations.
pub fn parse_cell(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw == SENTINEL {
        return None;
    }

    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

// -- Tests -------------------------------------------------------------------
