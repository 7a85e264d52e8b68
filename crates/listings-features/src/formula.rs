//! Typed regression term lists.
//!
//! Model specifications are composed from named terms and rendered to a
//! Patsy-style formula only at the boundary, so a typo in a covariate name
//! is caught by [`ModelSpec::validate`] rather than by the fitting library.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::covariates::{
    clean_name, BATHROOMS, BEDROOMS, BEDS, PRICE, PROPERTY_TYPE, ROOM_TYPE, SQUARE_FEET,
    SQUARE_FEET_MISSING,
};
use crate::error::{FeatureError, Result};
use crate::vocabulary::Vocabulary;

/// One right-hand-side term
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "column", rename_all = "snake_case")]
pub enum Term {
    /// Continuous covariate
    Numeric(String),
    /// Fixed effect, one level per distinct value
    Categorical(String),
    /// Boolean dummy (amenity flags, missingness indicators)
    Indicator(String),
}

impl Term {
    pub fn column(&self) -> &str {
        match self {
            Term::Numeric(c) | Term::Categorical(c) | Term::Indicator(c) => c,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Categorical(c) => write!(f, "C({})", quote(c)),
            Term::Numeric(c) | Term::Indicator(c) => write!(f, "{}", quote(c)),
        }
    }
}

/// Plain identifiers render bare; anything else as `Q("...")`.
fn quote(name: &str) -> String {
    let mut chars = name.chars();
    let is_identifier = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if is_identifier {
        name.to_string()
    } else {
        format!("Q(\"{}\")", name.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

/// A response variable and an ordered, duplicate-free list of terms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub response: String,
    pub terms: Vec<Term>,
}

impl ModelSpec {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            terms: Vec::new(),
        }
    }

    /// Add a term; repeats are ignored
    pub fn with_term(mut self, term: Term) -> Self {
        if !self.terms.contains(&term) {
            self.terms.push(term);
        }
        self
    }

    /// Add one indicator term per vocabulary token, in vocabulary order
    pub fn with_amenities(self, vocabulary: &Vocabulary) -> Self {
        vocabulary
            .tokens()
            .fold(self, |spec, token| spec.with_term(Term::Indicator(token.to_string())))
    }

    /// Every referenced column must be available
    pub fn validate<'a>(&self, available: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let available: HashSet<&str> = available.into_iter().collect();
        std::iter::once(self.response.as_str())
            .chain(self.terms.iter().map(|t| t.column()))
            .find(|name| !available.contains(name))
            .map_or(Ok(()), |name| Err(FeatureError::UnknownCovariate(name.to_string())))
    }

    /// Render as `response ~ term + term`; with no terms the intercept `1`
    pub fn render(&self) -> String {
        let rhs = if self.terms.is_empty() {
            "1".to_string()
        } else {
            self.terms
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(" + ")
        };
        format!("{} ~ {}", quote(&self.response), rhs)
    }

    /// The report's nested specifications: size covariates, then room and
    /// property fixed effects, then amenity dummies.
    pub fn reference_specifications(vocabulary: &Vocabulary) -> Vec<ModelSpec> {
        let base = [BEDROOMS, BEDS, BATHROOMS, SQUARE_FEET]
            .iter()
            .fold(ModelSpec::new(clean_name(PRICE)), |spec, c| {
                spec.with_term(Term::Numeric(clean_name(c)))
            })
            .with_term(Term::Indicator(SQUARE_FEET_MISSING.to_string()));

        let fixed_effects = base
            .clone()
            .with_term(Term::Categorical(ROOM_TYPE.to_string()))
            .with_term(Term::Categorical(PROPERTY_TYPE.to_string()));

        let amenities = fixed_effects.clone().with_amenities(vocabulary);

        vec![base, fixed_effects, amenities]
    }
}

impl fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VocabularyConfig;

    #[test]
    fn test_renders_terms_in_order() {
        let spec = ModelSpec::new("clean_price")
            .with_term(Term::Numeric("clean_bedrooms".into()))
            .with_term(Term::Categorical("room_type".into()))
            .with_term(Term::Indicator("wifi".into()))
            .with_term(Term::Indicator("wifi".into()));

        assert_eq!(
            spec.render(),
            "clean_price ~ clean_bedrooms + C(room_type) + wifi"
        );
    }

    #[test]
    fn test_quotes_non_identifiers() {
        let spec = ModelSpec::new("price").with_term(Term::Indicator("pets_live_on_this_property".into()));
        assert_eq!(spec.render(), "price ~ pets_live_on_this_property");

        let spec = ModelSpec::new("price").with_term(Term::Indicator("h24_check_in".into()));
        assert_eq!(spec.render(), "price ~ h24_check_in");

        let spec = ModelSpec::new("price").with_term(Term::Indicator("cat(s)".into()));
        assert_eq!(spec.render(), r#"price ~ Q("cat(s)")"#);

        let spec = ModelSpec::new("price").with_term(Term::Indicator("1st_floor".into()));
        assert_eq!(spec.render(), r#"price ~ Q("1st_floor")"#);
    }

    #[test]
    fn test_intercept_only() {
        assert_eq!(ModelSpec::new("price").render(), "price ~ 1");
    }

    #[test]
    fn test_validate_reports_unknown_names() {
        let spec = ModelSpec::new("price").with_term(Term::Numeric("beds".into()));
        assert!(spec.validate(["price", "beds"]).is_ok());
        assert!(matches!(
            spec.validate(["price"]),
            Err(FeatureError::UnknownCovariate(name)) if name == "beds"
        ));
    }

    #[test]
    fn test_reference_specifications_nest() {
        let tokens = vec![vec!["wifi".to_string()], vec!["wifi".to_string()]];
        let config = VocabularyConfig {
            min_count: 1,
            ..VocabularyConfig::default()
        };
        let vocab = Vocabulary::build(&tokens, &config);

        let specs = ModelSpec::reference_specifications(&vocab);
        assert_eq!(specs.len(), 3);
        assert!(specs[0].terms.iter().all(|t| specs[1].terms.contains(t)));
        assert!(specs[1].terms.iter().all(|t| specs[2].terms.contains(t)));
        assert_eq!(specs[2].terms.last(), Some(&Term::Indicator("wifi".into())));
        assert!(specs[1].render().contains("C(room_type)"));
    }
}
