//! Axis specification parsing: comma-delimited text into ordered label lists.

/// Splits a comma-delimited axis specification into trimmed, non-empty labels.
/// Duplicates are allowed; order is preserved.
pub fn parse_axis(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Z-axis variant of [`parse_axis`]. Blank input collapses to a single empty
/// sentinel label so the axis is degenerate (size 1) rather than absent, and
/// downstream layout math never has to branch on a missing Z axis.
pub fn parse_z_axis(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return vec![String::new()];
    }
    parse_axis(text)
}

#[cfg(test)]
mod tests {
    use super::{parse_axis, parse_z_axis};

    #[test]
    fn splits_on_commas_and_trims() {
        assert_eq!(parse_axis("red, blue ,green"), ["red", "blue", "green"]);
    }

    #[test]
    fn drops_empty_parts() {
        assert_eq!(parse_axis("a,, b, ,c"), ["a", "b", "c"]);
    }

    #[test]
    fn blank_x_or_y_axis_is_empty() {
        assert!(parse_axis("").is_empty());
        assert!(parse_axis("  , ,").is_empty());
    }

    #[test]
    fn blank_z_axis_collapses_to_sentinel() {
        assert_eq!(parse_z_axis(""), [""]);
        assert_eq!(parse_z_axis("   "), [""]);
    }

    #[test]
    fn non_blank_z_axis_parses_like_any_other() {
        assert_eq!(parse_z_axis("cat, dog"), ["cat", "dog"]);
    }
}
