//! Search query inputs and diet-name normalization.

/// A normalized list-search request handed to the transport.
///
/// `ingredients` is already trimmed and non-empty; `diet` is already in
/// the provider's vocabulary (see [`normalize_diet`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub ingredients: Vec<String>,
    pub diet: Option<String>,
    pub number: usize,
}

/// Diet names the provider understands verbatim.
const PROVIDER_DIETS: &[&str] = &[
    "gluten free",
    "ketogenic",
    "vegetarian",
    "lacto-vegetarian",
    "ovo-vegetarian",
    "vegan",
    "pescetarian",
    "paleolithic",
    "primal",
    "low fodmap",
    "whole30",
];

/// Normalize a user-facing diet name to the provider's vocabulary.
///
/// Common short forms map to the provider's spelling ("keto" →
/// "ketogenic", "gluten-free" → "gluten free", "paleo" →
/// "paleolithic"); names the provider already understands pass through
/// lowercased. `None`, empty, "none", and names outside the provider
/// vocabulary all mean "no diet filter".
pub fn normalize_diet(diet: Option<&str>) -> Option<String> {
    let d = diet?.trim().to_lowercase();
    let mapped = match d.as_str() {
        "" | "none" => return None,
        "keto" => "ketogenic",
        "gluten-free" => "gluten free",
        "paleo" => "paleolithic",
        other => other,
    };
    if PROVIDER_DIETS.contains(&mapped) {
        Some(mapped.to_string())
    } else {
        None
    }
}
