//! Item types and default icon selection.
//!
//! `item_type` is free text; it only influences which default icon a
//! consumable gets when the user does not pick one explicitly.

/// Fallback icon when nothing better matches.
pub const DEFAULT_ICON: &str = "mdi:calendar-clock";

/// Default icon mapping for common items (Material Design Icons names).
pub const DEFAULT_ICON_MAP: &[(&str, &str)] = &[
    ("water filter", "mdi:water-outline"),
    ("ac filter", "mdi:hvac"),
    ("vacuum brush", "mdi:robot-vacuum"),
    ("fan filter", "mdi:fan"),
    ("uv light", "mdi:weather-sunny-alert"),
];

/// Look up the default icon for a known item type.
pub fn icon_for_item_type(item_type: &str) -> Option<&'static str> {
    let wanted = item_type.trim().to_lowercase();
    DEFAULT_ICON_MAP
        .iter()
        .find(|(key, _)| *key == wanted)
        .map(|(_, icon)| *icon)
}

/// Pick an icon: explicit choice, else the item-type default, else a match
/// on the lowercased name, else [`DEFAULT_ICON`].
pub fn select_icon(explicit: Option<&str>, item_type: Option<&str>, name: &str) -> String {
    if let Some(icon) = explicit {
        if !icon.trim().is_empty() {
            return icon.to_string();
        }
    }
    if let Some(icon) = item_type.and_then(icon_for_item_type) {
        return icon.to_string();
    }
    icon_for_item_type(name)
        .unwrap_or(DEFAULT_ICON)
        .to_string()
}

/// Item types with a default icon, for selection UIs.
pub fn known_item_types() -> impl Iterator<Item = &'static str> {
    DEFAULT_ICON_MAP.iter().map(|(key, _)| *key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_icon_wins() {
        assert_eq!(
            select_icon(Some("mdi:air-filter"), Some("water filter"), "Kitchen"),
            "mdi:air-filter"
        );
    }

    #[test]
    fn blank_explicit_icon_is_ignored() {
        assert_eq!(
            select_icon(Some("  "), Some("water filter"), "Kitchen"),
            "mdi:water-outline"
        );
    }

    #[test]
    fn item_type_default_applies() {
        assert_eq!(
            select_icon(None, Some("vacuum brush"), "Roomba"),
            "mdi:robot-vacuum"
        );
        assert_eq!(
            select_icon(None, Some("AC Filter"), "Bedroom"),
            "mdi:hvac"
        );
    }

    #[test]
    fn name_match_is_the_last_resort_before_default() {
        assert_eq!(select_icon(None, None, "UV Light"), "mdi:weather-sunny-alert");
        assert_eq!(select_icon(None, None, "Mystery Part"), DEFAULT_ICON);
    }

    #[test]
    fn known_item_types_lists_the_map() {
        let types: Vec<_> = known_item_types().collect();
        assert!(types.contains(&"water filter"));
        assert_eq!(types.len(), DEFAULT_ICON_MAP.len());
    }
}
