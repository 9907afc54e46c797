//! Text rendering utilities for human-friendly error messages.
//!
//! Provides helpers to format dependency chains, type names,
//! and "did you mean?" suggestions in error output.

/// Renders a dependency chain as a readable string.
///
/// # Examples
/// ```
/// use rabt_support::rendering::render_chain;
///
/// let chain = vec!["Invoice", "Product", "Invoice"];
/// assert_eq!(render_chain(&chain), "Invoice → Product → Invoice");
/// ```
pub fn render_chain(chain: &[impl AsRef<str>]) -> String {
    chain
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(" → ")
}

/// Shortens a fully qualified type name for display.
///
/// ```
/// use rabt_support::rendering::shorten_type_name;
///
/// let short = shorten_type_name("my_app::services::user::UserService");
/// assert_eq!(short, "UserService");
///
/// let short = shorten_type_name("alloc::sync::Arc<dyn my_app::traits::Logger>");
/// assert_eq!(short, "Arc<dyn Logger>");
/// ```
pub fn shorten_type_name(full_name: &str) -> String {
    // "my_app::services::UserService" → "UserService"
    // "Arc<dyn my_app::Logger>" → "Arc<dyn Logger>"
    let mut result = String::with_capacity(full_name.len());
    let mut chars = full_name.chars().peekable();
    let mut current_segment = String::new();

    while let Some(ch) = chars.next() {
        match ch {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                current_segment.clear();
            }
            '<' | '>' | ',' | ' ' => {
                result.push_str(&current_segment);
                result.push(ch);
                current_segment.clear();
            }
            _ => {
                current_segment.push(ch);
            }
        }
    }

    result.push_str(&current_segment);
    result
}

/// Returns the bare name a type is known by in binding files.
///
/// Trait objects lose their `dyn ` prefix, so `dyn app::IBar` and
/// `app::Bar` become `IBar` and `Bar`.
///
/// ```
/// use rabt_support::rendering::simple_type_name;
///
/// assert_eq!(simple_type_name("dyn my_app::ports::IBar"), "IBar");
/// assert_eq!(simple_type_name("my_app::Bar"), "Bar");
/// ```
pub fn simple_type_name(full_name: &str) -> String {
    let short = shorten_type_name(full_name);
    match short.strip_prefix("dyn ") {
        Some(rest) => rest.to_string(),
        None => short,
    }
}

/// Generates a "did you mean?" suggestion based on registered types.
///
/// Compares the requested type name against available types
/// and suggests close matches, best first.
pub fn suggest_similar(requested: &str, available: &[&str], max_suggestions: usize) -> Vec<String> {
    let requested_lower = requested.to_lowercase();
    let requested_short = simple_type_name(requested).to_lowercase();

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .filter_map(|&name| {
            let name_lower = name.to_lowercase();
            let name_short = simple_type_name(name).to_lowercase();

            if name_lower == requested_lower {
                return None;
            }

            if name_lower.contains(&requested_lower) || requested_lower.contains(&name_lower) {
                return Some((name, 100));
            }

            if name_short.contains(&requested_short) || requested_short.contains(&name_short) {
                return Some((name, 80));
            }

            let common = name_short
                .chars()
                .zip(requested_short.chars())
                .take_while(|(a, b)| a == b)
                .count();

            if common >= 3 {
                return Some((name, common * 10));
            }

            None
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_simple_chain() {
        let chain = vec!["A", "B", "C", "A"];
        assert_eq!(render_chain(&chain), "A → B → C → A");
    }

    #[test]
    fn render_single_element_chain() {
        assert_eq!(render_chain(&["A"]), "A");
    }

    #[test]
    fn render_empty_chain() {
        let chain: Vec<&str> = vec![];
        assert_eq!(render_chain(&chain), "");
    }

    #[test]
    fn shorten_simple_path() {
        assert_eq!(shorten_type_name("my_app::services::UserService"), "UserService");
    }

    #[test]
    fn shorten_with_generics() {
        assert_eq!(
            shorten_type_name("alloc::sync::Arc<dyn my_app::traits::Logger>"),
            "Arc<dyn Logger>"
        );
    }

    #[test]
    fn shorten_no_path() {
        assert_eq!(shorten_type_name("String"), "String");
    }

    #[test]
    fn simple_name_strips_dyn() {
        assert_eq!(simple_type_name("dyn rabt_container::fixtures::IFoo"), "IFoo");
        assert_eq!(simple_type_name("rabt_container::fixtures::Foo"), "Foo");
        assert_eq!(simple_type_name("i32"), "i32");
    }

    #[test]
    fn suggest_similar_types() {
        let available = vec![
            "dyn my_app::IWarrior",
            "dyn my_app::IWeapon",
            "dyn my_app::ILogger",
        ];

        let suggestions = suggest_similar("dyn other::IWarior", &available, 3);
        assert!(!suggestions.is_empty());
        assert!(suggestions[0].contains("IWarrior"));
    }

    #[test]
    fn suggest_skips_exact_match() {
        let available = vec!["dyn my_app::IBar"];
        assert!(suggest_similar("dyn my_app::IBar", &available, 3).is_empty());
    }

    #[test]
    fn suggest_no_match() {
        let available = vec!["my_app::Database"];
        let suggestions = suggest_similar("XyzAbcDef", &available, 3);
        assert!(suggestions.is_empty());
    }
}
