/// Format a byte count for the run summary, e.g. `1.5 MiB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];

    let mut unit_idx = 0;
    let mut size = bytes as f64;
    while size >= 1024.0 && unit_idx + 1 < UNITS.len() {
        size /= 1024.0;
        unit_idx += 1;
    }

    match unit_idx {
        0 => format!("{bytes} B"),
        _ => format!("{size:.1} {}", UNITS[unit_idx]),
    }
}
