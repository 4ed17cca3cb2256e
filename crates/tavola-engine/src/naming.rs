use chrono::Utc;

use tavola_types::ThreadSnapshot;

/// Derive a collection name when the user did not supply one: the
/// cached search query (or the dominant cuisine) plus a timestamp so
/// repeated saves don't collide.
pub fn derive_collection_name(view: &ThreadSnapshot) -> String {
    let stamp = Utc::now().format("%Y%m%d_%H%M");

    let base = view
        .search
        .as_ref()
        .map(|snapshot| {
            let mut base = title_case(&snapshot.query);
            if let Some(location) = &snapshot.location {
                base.push_str(&format!(" in {}", location));
            }
            base
        })
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| "Restaurant Collection".to_string());

    format!("{} - {}", base, stamp)
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .take(6)
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tavola_types::{RestaurantRecord, SearchSnapshot};

    #[test]
    fn name_uses_query_and_location() {
        let view = ThreadSnapshot {
            search: Some(SearchSnapshot::new(
                "best butter chicken",
                Some("Delhi".to_string()),
                vec![RestaurantRecord::new("a", "Karim's")],
            )),
            ..Default::default()
        };
        let name = derive_collection_name(&view);
        assert!(name.starts_with("Best Butter Chicken in Delhi - "));
    }

    #[test]
    fn fallback_name_without_snapshot() {
        let name = derive_collection_name(&ThreadSnapshot::default());
        assert!(name.starts_with("Restaurant Collection - "));
    }
}
