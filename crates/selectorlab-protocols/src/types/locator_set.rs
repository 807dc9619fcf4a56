//! A complete set of extraction rules for one target page.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{ExtractionMode, Locator};
use crate::error::SelectorError;

/// Where a locator sits within a [`LocatorSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocatorRole {
    Field,
    ItemContainer,
    Pagination,
}

/// Errors raised while editing a locator set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocatorSetError {
    #[error("A field named '{0}' already exists")]
    DuplicateName(String),

    #[error("No locator named '{0}'")]
    NotFound(String),

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

/// Item container, pagination and named field locators for a target URL.
///
/// Field names are unique within one set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorSet {
    pub target_url: String,

    #[serde(default)]
    pub item_container: Option<Locator>,

    #[serde(default)]
    pub pagination: Option<Locator>,

    #[serde(default)]
    fields: Vec<Locator>,
}

impl LocatorSet {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            ..Default::default()
        }
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> &[Locator] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Locator> {
        self.fields.iter().find(|f| f.name() == name)
    }

    pub fn is_empty(&self) -> bool {
        self.item_container.is_none() && self.pagination.is_none() && self.fields.is_empty()
    }

    /// Append a field, rejecting name collisions.
    pub fn add_field(&mut self, locator: Locator) -> Result<(), LocatorSetError> {
        if self.field(locator.name()).is_some() {
            return Err(LocatorSetError::DuplicateName(locator.name().to_string()));
        }
        self.fields.push(locator);
        Ok(())
    }

    /// Insert or replace a field by name (last write wins).
    pub fn upsert_field(&mut self, locator: Locator) {
        match self.fields.iter_mut().find(|f| f.name() == locator.name()) {
            Some(existing) => *existing = locator,
            None => self.fields.push(locator),
        }
    }

    pub fn remove_field(&mut self, name: &str) -> Option<Locator> {
        let index = self.fields.iter().position(|f| f.name() == name)?;
        Some(self.fields.remove(index))
    }

    /// Mutable access to a locator by role and name.
    ///
    /// Item container and pagination are matched by role alone.
    pub fn locator_mut(&mut self, role: LocatorRole, name: &str) -> Option<&mut Locator> {
        match role {
            LocatorRole::Field => self.fields.iter_mut().find(|f| f.name() == name),
            LocatorRole::ItemContainer => self.item_container.as_mut(),
            LocatorRole::Pagination => self.pagination.as_mut(),
        }
    }

    /// Find the locator a suggestion for `name` should apply to.
    pub fn role_of(&self, name: &str) -> Option<LocatorRole> {
        if self.field(name).is_some() {
            return Some(LocatorRole::Field);
        }
        if self.item_container.as_ref().is_some_and(|l| l.name() == name) {
            return Some(LocatorRole::ItemContainer);
        }
        if self.pagination.as_ref().is_some_and(|l| l.name() == name) {
            return Some(LocatorRole::Pagination);
        }
        None
    }

    /// Replace the expression of a named locator.
    pub fn replace_expression(
        &mut self,
        name: &str,
        expression: &str,
        mode: ExtractionMode,
    ) -> Result<(), LocatorSetError> {
        let role = self
            .role_of(name)
            .ok_or_else(|| LocatorSetError::NotFound(name.to_string()))?;
        let locator = self
            .locator_mut(role, name)
            .ok_or_else(|| LocatorSetError::NotFound(name.to_string()))?;
        locator.replace_expression(expression, mode)?;
        Ok(())
    }

    /// Check the set invariants: unique field names.
    ///
    /// Non-empty names and expressions are already enforced by [`Locator`].
    pub fn validate(&self) -> Result<(), LocatorSetError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name()) {
                return Err(LocatorSetError::DuplicateName(field.name().to_string()));
            }
        }
        Ok(())
    }

    /// Field name to expression pairs, for handing to a crawler.
    pub fn field_expressions(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|f| (f.name().to_string(), f.expression()))
            .collect()
    }
}

#[cfg(test)]
#[path = "locator_set_tests.rs"]
mod tests;
