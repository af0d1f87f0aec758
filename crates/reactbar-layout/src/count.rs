//! Compact count labels.

/// Format a reaction count for a button label.
///
/// Counts below a thousand are printed as-is. Larger counts use a `K` or
/// `M` suffix with one truncated decimal below ten units (`1.2K`) and none
/// above (`12K`). A zero decimal is dropped (`2K`, not `2.0K`).
pub fn compact_count(count: u32) -> String {
    match count {
        0..=999 => count.to_string(),
        1_000..=999_999 => scaled(count, 1_000, 'K'),
        _ => scaled(count, 1_000_000, 'M'),
    }
}

fn scaled(count: u32, unit: u32, suffix: char) -> String {
    let whole = count / unit;
    let tenth = (count % unit) / (unit / 10);
    if whole >= 10 || tenth == 0 {
        format!("{whole}{suffix}")
    } else {
        format!("{whole}.{tenth}{suffix}")
    }
}
