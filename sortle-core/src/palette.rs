pub fn slot_color(i: usize) -> String {
    // Pale backgrounds for answer slots, one per problem position (A..Ex).
    // Cycles by index%8 for contests with more problems.
    const PALETTE: [&str; 8] = [
        "#f3f4f6", // 0 gray
        "#fef3c7", // 1 amber
        "#dcfce7", // 2 green
        "#e0f2fe", // 3 sky
        "#dbeafe", // 4 blue
        "#fef9c3", // 5 yellow
        "#ffedd5", // 6 orange
        "#fee2e2", // 7 red
    ];
    PALETTE[i % PALETTE.len()].to_string()
}

/// Highlight for a slot while an item is dragged over it.
pub const SLOT_HOVER_COLOR: &str = "#bfdbfe";
/// Pool background.
pub const POOL_COLOR: &str = "#cffafe";
