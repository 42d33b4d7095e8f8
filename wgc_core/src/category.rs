//! The waste categories and their display metadata.

use std::fmt;

use serde::{Serialize, Serializer};

static TITLE_YELLOW_BAG: &str = "Gelber Sack";
static TITLE_RESIDUAL: &str = "Restmüll";
static TITLE_PAPER: &str = "Papier";
static TITLE_ORGANIC: &str = "Bioabfall";

static ICON_WASTE: &str = "mdi:recycle";
static ICON_OTHER: &str = "mdi:flash";

/// A waste category a sensor can be configured for.
///
/// Only the four known categories are ever filled by the calendar. `Other` exists so that unknown
/// configuration keys still yield a sensor, which then never has a state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    GelberSack,
    Restabfall,
    Papiertonne,
    Biotonne,
    Other(String),
}

/// How a category is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMeta {
    pub label: String,
    pub unit: &'static str,
    pub icon: &'static str,
}

impl Category {
    pub const KNOWN: [Category; 4] = [
        Category::GelberSack,
        Category::Restabfall,
        Category::Papiertonne,
        Category::Biotonne,
    ];

    /// Get the category for a configuration key, ignoring case.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim().to_lowercase();
        match key.as_str() {
            "gelbersack" => Category::GelberSack,
            "restabfall" => Category::Restabfall,
            "papiertonne" => Category::Papiertonne,
            "biotonne" => Category::Biotonne,
            _ => Category::Other(key),
        }
    }

    /// Get the category of a calendar entry by its exact title.
    pub fn from_title(title: &str) -> Option<Self> {
        Category::KNOWN
            .into_iter()
            .find(|category| category.title() == Some(title))
    }

    pub fn key(&self) -> &str {
        match self {
            Category::GelberSack => "gelbersack",
            Category::Restabfall => "restabfall",
            Category::Papiertonne => "papiertonne",
            Category::Biotonne => "biotonne",
            Category::Other(key) => key,
        }
    }

    /// The title the remote calendar uses for this category.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Category::GelberSack => Some(TITLE_YELLOW_BAG),
            Category::Restabfall => Some(TITLE_RESIDUAL),
            Category::Papiertonne => Some(TITLE_PAPER),
            Category::Biotonne => Some(TITLE_ORGANIC),
            Category::Other(_) => None,
        }
    }

    pub fn meta(&self) -> CategoryMeta {
        let (label, icon) = match self {
            Category::GelberSack => (String::from("Gelber Sack"), ICON_WASTE),
            Category::Restabfall => (String::from("Rest Müll"), ICON_WASTE),
            Category::Papiertonne => (String::from("Papier Tonne"), ICON_WASTE),
            Category::Biotonne => (String::from("Bio Müll"), ICON_WASTE),
            Category::Other(key) => (title_case(key), ICON_OTHER),
        };
        CategoryMeta {
            label,
            unit: "",
            icon,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

/// Upper-case the first letter of every word and lower-case the rest.
///
/// A word starts after any character which is not a letter, so `glass_2go` becomes `Glass_2Go`.
fn title_case(value: &str) -> String {
    let mut previous_is_letter = false;
    let mut title = String::with_capacity(value.len());
    for character in value.chars() {
        if previous_is_letter {
            title.extend(character.to_lowercase());
        } else {
            title.extend(character.to_uppercase());
        }
        previous_is_letter = character.is_alphabetic();
    }
    title
}

#[cfg(test)]
mod tests {
    use crate::category::{title_case, Category};

    #[test]
    fn test_from_key() {
        assert_eq!(Category::from_key("gelbersack"), Category::GelberSack);
        assert_eq!(Category::from_key("BioTonne"), Category::Biotonne);
        assert_eq!(
            Category::from_key("Glass"),
            Category::Other(String::from("glass"))
        );
        for category in Category::KNOWN {
            assert_eq!(Category::from_key(category.key()), category);
        }
    }

    #[test]
    fn test_from_title() {
        assert_eq!(
            Category::from_title("Gelber Sack"),
            Some(Category::GelberSack)
        );
        assert_eq!(Category::from_title("Restmüll"), Some(Category::Restabfall));
        assert_eq!(Category::from_title("Papier"), Some(Category::Papiertonne));
        assert_eq!(Category::from_title("Bioabfall"), Some(Category::Biotonne));
        assert_eq!(Category::from_title("papier"), None);
        assert_eq!(Category::from_title("Problemmüll"), None);
    }

    #[test]
    fn test_meta() {
        let meta = Category::Restabfall.meta();
        assert_eq!(meta.label, "Rest Müll");
        assert_eq!(meta.unit, "");
        assert_eq!(meta.icon, "mdi:recycle");

        let meta = Category::from_key("glass").meta();
        assert_eq!(meta.label, "Glass");
        assert_eq!(meta.unit, "");
        assert_eq!(meta.icon, "mdi:flash");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("glass"), "Glass");
        assert_eq!(title_case("old clothes"), "Old Clothes");
        assert_eq!(title_case("glass_2go"), "Glass_2Go");
        assert_eq!(title_case(""), "");
    }
}
