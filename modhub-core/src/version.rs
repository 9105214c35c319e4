/// Leading build number of a game version string: `"105.1"` -> 105.
///
/// Anything unparseable counts as build 0, so it fails every floor.
pub fn leading_build(version: &str) -> i64 {
    let head = version.split('.').next().unwrap_or(version);
    head.trim().parse().unwrap_or(0)
}

/// Whether a declared minimum game version meets the compatibility floor.
pub fn is_compatible(min_game_version: &str, floor: u32) -> bool {
    leading_build(min_game_version) >= i64::from(floor)
}
