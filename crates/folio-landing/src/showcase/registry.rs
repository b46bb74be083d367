#![forbid(unsafe_code)]

//! Ordered, validated panel registry.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::content::{AccentToken, TECH_TABS, TabCopy};

/// Stable panel identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PanelId(String);

impl PanelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PanelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One selectable panel. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelDescriptor {
    pub id: PanelId,
    pub label: String,
    pub title: String,
    pub description: String,
    /// Opaque image reference. `None` paints a placeholder.
    pub image_ref: Option<String>,
    pub features: Vec<String>,
    pub accent: AccentToken,
}

impl PanelDescriptor {
    /// Minimal descriptor; the remaining copy defaults to the label.
    pub fn new(id: impl Into<String>, label: impl Into<String>, accent: AccentToken) -> Self {
        let label = label.into();
        Self {
            id: PanelId::new(id),
            title: label.clone(),
            description: String::new(),
            label,
            image_ref: None,
            features: Vec::new(),
            accent,
        }
    }

    #[must_use]
    pub fn with_copy(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.title = title.into();
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    #[must_use]
    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }
}

impl From<&TabCopy> for PanelDescriptor {
    fn from(copy: &TabCopy) -> Self {
        let mut desc = PanelDescriptor::new(copy.id, copy.label, copy.accent)
            .with_copy(copy.title, copy.description)
            .with_features(copy.features.iter().copied());
        desc.image_ref = copy.image.map(str::to_owned);
        desc
    }
}

/// Registry construction failure. Raised once, at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No panels were supplied.
    Empty,
    /// Two panels share an id.
    DuplicateId(PanelId),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "panel registry is empty"),
            Self::DuplicateId(id) => write!(f, "duplicate panel id `{id}`"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Fixed, ordered collection of panels. Order is display order.
///
/// A successfully built registry is never empty, so [`first`](Self::first)
/// is infallible.
#[derive(Debug, Clone)]
pub struct PanelRegistry {
    panels: Vec<PanelDescriptor>,
}

impl PanelRegistry {
    /// Validate and freeze `panels`.
    pub fn new(panels: Vec<PanelDescriptor>) -> Result<Self, RegistryError> {
        if panels.is_empty() {
            return Err(RegistryError::Empty);
        }
        let mut seen = HashSet::with_capacity(panels.len());
        for panel in &panels {
            if !seen.insert(panel.id.as_str()) {
                return Err(RegistryError::DuplicateId(panel.id.clone()));
            }
        }
        Ok(Self { panels })
    }

    /// The page's six technology tabs.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::new(TECH_TABS.iter().map(PanelDescriptor::from).collect())
    }

    pub fn get(&self, id: &str) -> Option<&PanelDescriptor> {
        self.panels.iter().find(|p| p.id.as_str() == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.panels.iter().position(|p| p.id.as_str() == id)
    }

    pub fn at(&self, index: usize) -> Option<&PanelDescriptor> {
        self.panels.get(index)
    }

    pub fn first(&self) -> &PanelDescriptor {
        &self.panels[0]
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &PanelDescriptor> {
        self.panels.iter()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Always `false` for a constructed registry.
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(id: &str) -> PanelDescriptor {
        PanelDescriptor::new(id, id.to_uppercase(), AccentToken::Blue)
    }

    #[test]
    fn empty_is_rejected() {
        assert_eq!(PanelRegistry::new(vec![]).unwrap_err(), RegistryError::Empty);
    }

    #[test]
    fn duplicate_is_rejected() {
        let err = PanelRegistry::new(vec![panel("a"), panel("b"), panel("a")]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId(PanelId::from("a")));
        assert_eq!(err.to_string(), "duplicate panel id `a`");
    }

    #[test]
    fn order_is_preserved() {
        let reg = PanelRegistry::new(vec![panel("c"), panel("a"), panel("b")]).unwrap();
        let ids: Vec<_> = reg.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
        assert_eq!(reg.first().id.as_str(), "c");
        assert_eq!(reg.index_of("b"), Some(2));
        assert!(reg.get("zzz").is_none());
    }

    #[test]
    fn builtin_matches_copy() {
        let reg = PanelRegistry::builtin().unwrap();
        assert_eq!(reg.len(), 6);
        assert_eq!(reg.first().id.as_str(), "book-setup");
        let last = reg.at(5).unwrap();
        assert_eq!(last.label, "Document Preview");
        assert_eq!(last.features.len(), 5);
        assert!(last.image_ref.is_some());
    }
}
