//! Storefront category aliasing.
//!
//! The catalog stores display categories like "Flowers" or "Indoor Plants";
//! the filter accepts singular/plural spellings and maps them onto the
//! stored form. The garden logbook deliberately does NOT use this table:
//! logbook categories are a closed enum matched exactly.

/// Normalize a catalog category filter to its canonical lowercase form.
///
/// Unknown inputs pass through lowercased, so they simply match whatever
/// the store happens to contain (usually nothing).
pub fn normalize_category(input: &str) -> String {
    let lower = input.trim().to_lowercase();
    let canonical = match lower.as_str() {
        "flower" | "flowers" => "flowers",
        "herb" | "herbs" => "herbs",
        "vegetable" | "vegetables" | "veggies" => "vegetables",
        "fruit" | "fruits" => "fruits",
        "tree" | "trees" => "trees",
        "succulent" | "succulents" => "succulents",
        "indoor" | "indoor plant" | "indoor plants" => "indoor plants",
        other => other,
    };
    canonical.to_string()
}
