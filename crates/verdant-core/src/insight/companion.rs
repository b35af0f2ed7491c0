//! Static companion-planting lookup.
//!
//! A fixed advisory table keyed by lowercased common name. This is a
//! lookup, not an inference; unmatched names yield no suggestion.

use serde::Serialize;

/// Species that grow well (or poorly) alongside a given plant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanionAdvice {
    pub good: Vec<&'static str>,
    pub avoid: Vec<&'static str>,
}

/// Look up companion advice for a plant's common name.
///
/// Matching is exact after trimming and lowercasing.
pub fn companions_for(common_name: &str) -> Option<CompanionAdvice> {
    let (good, avoid): (&[&str], &[&str]) = match common_name.trim().to_lowercase().as_str() {
        "tomato" => (&["basil", "marigold", "carrot", "onion"], &["potato", "fennel", "cabbage"]),
        "cucumber" => (&["bean", "dill", "radish", "sunflower"], &["potato", "sage"]),
        "pepper" => (&["basil", "onion", "carrot"], &["fennel", "kohlrabi"]),
        "basil" => (&["tomato", "pepper", "oregano"], &["rue"]),
        "carrot" => (&["tomato", "onion", "rosemary"], &["dill", "parsnip"]),
        "bean" => (&["cucumber", "corn", "strawberry"], &["onion", "garlic"]),
        "lettuce" => (&["carrot", "radish", "strawberry"], &["parsley"]),
        "strawberry" => (&["bean", "lettuce", "spinach"], &["cabbage", "broccoli"]),
        "onion" => (&["carrot", "tomato", "beet"], &["bean", "pea"]),
        "corn" => (&["bean", "squash", "cucumber"], &["tomato"]),
        "squash" => (&["corn", "bean", "nasturtium"], &["potato"]),
        "potato" => (&["bean", "cabbage", "horseradish"], &["tomato", "cucumber", "squash"]),
        _ => return None,
    };

    Some(CompanionAdvice {
        good: good.to_vec(),
        avoid: avoid.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_name_matches() {
        let advice = companions_for("tomato").expect("tomato is in the table");
        assert!(advice.good.contains(&"basil"));
        assert!(advice.avoid.contains(&"potato"));
    }

    #[test]
    fn lookup_normalizes_case_and_whitespace() {
        assert!(companions_for(" Cucumber ").is_some());
        assert!(companions_for("PEPPER").is_some());
    }

    #[test]
    fn unknown_name_yields_nothing() {
        assert!(companions_for("dragonfruit").is_none());
        assert!(companions_for("").is_none());
    }

    #[test]
    fn compound_names_do_not_match() {
        // The table is keyed on plain common names only.
        assert!(companions_for("cherry tomato").is_none());
    }
}
