pub const SUGGESTIONS: [&str; 4] = [
    "Show me temperature trends in the Pacific Ocean",
    "What's the salinity data for the Atlantic?",
    "Find recent float deployments",
    "Compare ocean temperatures year over year",
];

/// Looks up a starter question by its 1-based position.
pub fn suggestion(number: usize) -> Option<&'static str> {
    if number == 0 {
        return None;
    }

    return SUGGESTIONS.get(number - 1).copied();
}
