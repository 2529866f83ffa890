//! Fixed lookup tables backing the match scorer.
//!
//! Every label here is compared verbatim against recruiter and coach input,
//! so the strings must not be normalised or reworded.

/// Vacancy style of play -> coach styles it tolerates, best first.
pub(crate) const STYLE_COMPATIBILITY: &[(&str, &[&str])] = &[
    (
        "Possession-based",
        &["Possession-based", "Tiki-taka", "Build from back"],
    ),
    (
        "Tiki-taka",
        &["Tiki-taka", "Possession-based", "Build from back"],
    ),
    (
        "Counter-attacking",
        &["Counter-attacking", "Direct", "Defensive"],
    ),
    (
        "High press",
        &["High press", "Gegenpressing", "Possession-based"],
    ),
    (
        "Gegenpressing",
        &["Gegenpressing", "High press", "Possession-based"],
    ),
    ("Direct", &["Direct", "Counter-attacking", "Long ball"]),
    ("Long ball", &["Long ball", "Direct", "Counter-attacking"]),
    ("Defensive", &["Defensive", "Counter-attacking", "Low block"]),
    ("Low block", &["Low block", "Defensive", "Counter-attacking"]),
    (
        "Build from back",
        &["Build from back", "Possession-based", "Tiki-taka"],
    ),
    (
        "Balanced",
        &["Balanced", "Possession-based", "Counter-attacking", "Direct"],
    ),
];

pub(crate) const PRESSING_LEVELS: &[&str] = &["Very Low", "Low", "Medium", "High", "Very High"];

/// Vacancy build-up style -> coach preferences it tolerates, best first.
pub(crate) const BUILD_COMPATIBILITY: &[(&str, &[&str])] = &[
    (
        "Short passing",
        &["Short passing", "Build from back", "Possession play"],
    ),
    (
        "Build from back",
        &["Build from back", "Short passing", "Possession play"],
    ),
    (
        "Possession play",
        &["Possession play", "Short passing", "Build from back"],
    ),
    ("Direct play", &["Direct play", "Long ball", "Mixed"]),
    ("Long ball", &["Long ball", "Direct play"]),
    (
        "Mixed",
        &["Mixed", "Direct play", "Short passing", "Balanced"],
    ),
    (
        "Balanced",
        &["Balanced", "Mixed", "Short passing", "Direct play"],
    ),
];

/// Transfer budget bands, smallest first.
pub(crate) const BUDGET_RANGES: &[&str] = &[
    "Under £1m",
    "£1m - £5m",
    "£5m - £15m",
    "£15m - £30m",
    "£30m - £60m",
    "£60m - £100m",
    "£100m - £200m",
    "Over £200m",
];

/// Coach wage expectation bands, smallest first.
pub(crate) const WAGE_RANGES: &[&str] = &[
    "Under £500k/yr",
    "£500k - £1m/yr",
    "£1m - £2m/yr",
    "£2m - £4m/yr",
    "£4m - £7m/yr",
    "£7m - £12m/yr",
    "Over £12m/yr",
];

/// Shared by the vacancy staff budget and the coach staff cost estimate.
pub(crate) const STAFF_BUDGET_RANGES: &[&str] = &[
    "Under £500k",
    "£500k - £1m",
    "£1m - £2m",
    "£2m - £5m",
    "£5m - £10m",
    "Over £10m",
];

/// Club objective -> leadership styles that suit it, best first.
pub(crate) const LEADERSHIP_COMPATIBILITY: &[(&str, &[&str])] = &[
    (
        "Win trophies",
        &["Authoritarian", "Demanding", "Strategic", "Motivator"],
    ),
    (
        "Qualify for Europe",
        &["Strategic", "Motivator", "Collaborative", "Demanding"],
    ),
    (
        "Avoid relegation",
        &["Motivator", "Pragmatic", "Collaborative", "Defensive-minded"],
    ),
    (
        "Develop youth",
        &["Developer", "Collaborative", "Patient", "Educator"],
    ),
    (
        "Rebuild squad",
        &["Developer", "Strategic", "Patient", "Visionary"],
    ),
    (
        "Maintain position",
        &["Pragmatic", "Strategic", "Balanced", "Collaborative"],
    ),
    (
        "Promotion",
        &["Motivator", "Demanding", "Strategic", "Authoritarian"],
    ),
    (
        "Build identity",
        &["Visionary", "Developer", "Strategic", "Educator"],
    ),
];

/// Look up the ordered list registered for `key`; unknown keys yield an empty list.
pub(crate) fn compatible_with(
    table: &'static [(&'static str, &'static [&'static str])],
    key: &str,
) -> &'static [&'static str] {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, list)| *list)
        .unwrap_or(&[])
}

pub(crate) fn position(list: &[&str], value: &str) -> Option<usize> {
    list.iter().position(|entry| *entry == value)
}

/// Band index with unknown values pinned to the middle of the list.
pub(crate) fn band_index(value: &str, bands: &[&str]) -> usize {
    position(bands, value).unwrap_or(bands.len() / 2)
}
