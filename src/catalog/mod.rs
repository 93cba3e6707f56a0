//! Category catalogs: example phrases per category, per taxonomy.
//!
//! Examples are configuration, not user input. They are only used to
//! derive centroids, so a category needs at least one non-empty phrase and
//! names must be unique within a taxonomy. Declaration order is preserved
//! and decides classification ties.

mod builtin;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SemanticError};
use crate::types::Taxonomy;

/// A category and the phrases that define it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    name: String,
    examples: Vec<String>,
}

impl Category {
    /// Create a category, rejecting empty names and empty example sets.
    pub fn new<I, S>(name: impl Into<String>, examples: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SemanticError::InvalidCatalog(
                "category name must not be empty".to_string(),
            ));
        }
        let examples: Vec<String> = examples.into_iter().map(Into::into).collect();
        if examples.is_empty() {
            return Err(SemanticError::InvalidCatalog(format!(
                "category '{name}' has no examples"
            )));
        }
        if examples.iter().any(|e| e.is_empty()) {
            return Err(SemanticError::InvalidCatalog(format!(
                "category '{name}' has an empty example"
            )));
        }
        Ok(Self { name, examples })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn examples(&self) -> &[String] {
        &self.examples
    }
}

/// The ordered categories of one taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaxonomyCatalog {
    taxonomy: Taxonomy,
    categories: Vec<Category>,
}

impl TaxonomyCatalog {
    /// Build a catalog, rejecting duplicate category names.
    pub fn new(taxonomy: Taxonomy, categories: Vec<Category>) -> Result<Self> {
        for (i, category) in categories.iter().enumerate() {
            if categories[..i].iter().any(|c| c.name == category.name) {
                return Err(SemanticError::InvalidCatalog(format!(
                    "duplicate {taxonomy} category '{}'",
                    category.name
                )));
            }
        }
        Ok(Self {
            taxonomy,
            categories,
        })
    }

    /// Build from `(name, examples)` pairs.
    pub fn from_pairs<'a, I>(taxonomy: Taxonomy, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let categories = pairs
            .into_iter()
            .map(|(name, examples)| Category::new(name, examples.iter().copied()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(taxonomy, categories)
    }

    pub fn taxonomy(&self) -> Taxonomy {
        self.taxonomy
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Both taxonomies' catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    intents: TaxonomyCatalog,
    actions: TaxonomyCatalog,
}

impl Catalog {
    pub fn new(intents: TaxonomyCatalog, actions: TaxonomyCatalog) -> Result<Self> {
        if intents.taxonomy != Taxonomy::Intent || actions.taxonomy != Taxonomy::Action {
            return Err(SemanticError::InvalidCatalog(
                "catalogs passed for the wrong taxonomy".to_string(),
            ));
        }
        Ok(Self { intents, actions })
    }

    /// The built-in bilingual (zh/en) catalog.
    pub fn builtin() -> Self {
        Self {
            intents: builtin::intents(),
            actions: builtin::actions(),
        }
    }

    pub fn get(&self, taxonomy: Taxonomy) -> &TaxonomyCatalog {
        match taxonomy {
            Taxonomy::Intent => &self.intents,
            Taxonomy::Action => &self.actions,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_requires_examples() {
        assert!(Category::new("greet", Vec::<String>::new()).is_err());
        assert!(Category::new("greet", [""]).is_err());
        assert!(Category::new("", ["hello"]).is_err());
        assert!(Category::new("greet", ["hello"]).is_ok());
    }

    #[test]
    fn duplicate_names_rejected() {
        let result = TaxonomyCatalog::from_pairs(
            Taxonomy::Intent,
            [("greet", &["hello"][..]), ("greet", &["hi"][..])],
        );
        assert!(matches!(result, Err(SemanticError::InvalidCatalog(_))));
    }

    #[test]
    fn declaration_order_preserved() {
        let catalog = TaxonomyCatalog::from_pairs(
            Taxonomy::Action,
            [("b", &["x"][..]), ("a", &["y"][..]), ("c", &["z"][..])],
        )
        .unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn same_name_allowed_across_taxonomies() {
        let intents =
            TaxonomyCatalog::from_pairs(Taxonomy::Intent, [("select", &["pick one"][..])]).unwrap();
        let actions =
            TaxonomyCatalog::from_pairs(Taxonomy::Action, [("select", &["the first"][..])])
                .unwrap();
        let catalog = Catalog::new(intents, actions).unwrap();
        assert_eq!(
            catalog.get(Taxonomy::Intent).get("select").unwrap().examples(),
            ["pick one"]
        );
        assert_eq!(
            catalog.get(Taxonomy::Action).get("select").unwrap().examples(),
            ["the first"]
        );
    }

    #[test]
    fn mismatched_taxonomies_rejected() {
        let a = TaxonomyCatalog::from_pairs(Taxonomy::Action, [("x", &["y"][..])]).unwrap();
        let b = a.clone();
        assert!(Catalog::new(a, b).is_err());
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        let intents = catalog.get(Taxonomy::Intent);
        assert_eq!(intents.categories()[0].name(), "create_todo");
        assert!(intents.get("character_build").is_some());
        let actions = catalog.get(Taxonomy::Action);
        assert_eq!(
            actions.names().collect::<Vec<_>>(),
            vec!["confirm", "cancel", "amend", "clarify", "select"]
        );
    }
}
