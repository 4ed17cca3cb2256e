use serde::{Deserialize, Serialize};

/// A restaurant as returned by the external search provider.
///
/// Optional fields are absent when the provider did not report them;
/// they are never filled in with guesses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RestaurantRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cuisine: None,
            location: None,
            rating: None,
            price_range: None,
            description: None,
        }
    }

    /// Multi-line card used when listing results in a reply.
    pub fn render(&self) -> String {
        let mut parts = vec![format!("**{}**", self.name)];

        if let Some(cuisine) = &self.cuisine {
            parts.push(format!("   Cuisine: {}", cuisine));
        }
        if let Some(location) = &self.location {
            parts.push(format!("   Location: {}", location));
        }
        if let Some(rating) = self.rating {
            parts.push(format!("   Rating: {:.1}/5", rating));
        }
        if let Some(price) = &self.price_range {
            parts.push(format!("   Price: {}", price));
        }
        if let Some(description) = &self.description {
            parts.push(format!("   {}", description));
        }

        parts.join("\n")
    }
}
