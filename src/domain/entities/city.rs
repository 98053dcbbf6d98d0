//! City reference entity.

/// A city restaurants can be located in.
///
/// Shared reference data: restaurants point at a city by id and never own it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    /// `None` until the city is first saved.
    pub id: Option<i64>,
    pub zip_code: String,
    pub name: String,
}

impl City {
    /// Creates an unsaved city.
    pub fn new(zip_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            zip_code: zip_code.into(),
            name: name.into(),
        }
    }

    /// Formats the city the way addresses print it: `2000 Neuchâtel`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.zip_code, self.name)
    }
}
