//! Restaurant type (cuisine category) reference entity.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantType {
    pub id: Option<i64>,
    pub label: String,
    pub description: Option<String>,
}

impl RestaurantType {
    pub fn new(label: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
            description,
        }
    }
}
