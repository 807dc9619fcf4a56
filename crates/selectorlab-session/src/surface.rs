//! The inspection and configuration surfaces' view of session state.

use tracing::{debug, info, warn};

use selectorlab_protocols::error::TransferError;
use selectorlab_protocols::types::{
    Locator, LocatorRole, LocatorSet, LocatorSetError, RefinementSuggestion,
};

use crate::context::SessionContext;
use crate::error::SessionError;
use crate::transfer::import_payload;

/// Promote an accepted suggestion into the named locator.
///
/// The suggestion may target a field, the item container or pagination.
pub fn accept_refinement(
    set: &mut LocatorSet,
    suggestion: &RefinementSuggestion,
) -> Result<(), LocatorSetError> {
    set.replace_expression(
        &suggestion.field_name,
        &suggestion.proposed_expression,
        suggestion.proposed_extraction_mode.clone(),
    )?;
    info!(
        field = %suggestion.field_name,
        expression = %suggestion.proposed_expression,
        "Accepted refinement"
    );
    Ok(())
}

/// Drop a suggestion. The locator set is left untouched.
pub fn discard_refinement(suggestion: RefinementSuggestion) {
    debug!(field = %suggestion.field_name, "Discarded refinement");
}

/// Locators accumulated while clicking through a proxied page.
///
/// Naming is two-step: [`stage`](Self::stage) a synthesized or typed
/// expression, then [`assign`](Self::assign) it a name and role.
#[derive(Debug, Clone)]
pub struct InspectionSurface {
    locators: LocatorSet,
    staged: Option<String>,
}

impl InspectionSurface {
    pub fn new(target_url: impl Into<String>) -> Self {
        Self::from_locators(LocatorSet::new(target_url))
    }

    pub fn from_locators(locators: LocatorSet) -> Self {
        Self {
            locators,
            staged: None,
        }
    }

    pub fn locators(&self) -> &LocatorSet {
        &self.locators
    }

    pub fn locators_mut(&mut self) -> &mut LocatorSet {
        &mut self.locators
    }

    pub fn staged(&self) -> Option<&str> {
        self.staged.as_deref()
    }

    /// Hold an expression until it is named. Staging again replaces it.
    pub fn stage(&mut self, expression: impl Into<String>) {
        self.staged = Some(expression.into());
    }

    /// Abandon the staged expression.
    pub fn unstage(&mut self) -> Option<String> {
        self.staged.take()
    }

    /// Name the staged expression and file it under `role`.
    ///
    /// Field names must be new. The item container and pagination slots
    /// are overwritten. On error the expression stays staged.
    pub fn assign(&mut self, name: &str, role: LocatorRole) -> Result<Locator, SessionError> {
        let expression = self.staged.as_deref().ok_or(SessionError::NothingStaged)?;
        let locator = Locator::parse(name, expression)?;
        match role {
            LocatorRole::Field => self.locators.add_field(locator.clone())?,
            LocatorRole::ItemContainer => self.locators.item_container = Some(locator.clone()),
            LocatorRole::Pagination => self.locators.pagination = Some(locator.clone()),
        }
        self.staged = None;
        debug!(name = %locator.name(), role = ?role, expression = %locator.expression(), "Assigned locator");
        Ok(locator)
    }

    pub fn accept_refinement(&mut self, suggestion: &RefinementSuggestion) -> Result<(), LocatorSetError> {
        accept_refinement(&mut self.locators, suggestion)
    }

    /// Hand the locators to the configuration surface.
    pub fn export(&self, session: &mut SessionContext) -> Result<String, TransferError> {
        session.export(&self.locators)
    }

    /// Take locators back from the configuration surface.
    ///
    /// The current locators and staged expression survive a failed import.
    pub fn apply_import(&mut self, session: &SessionContext, token: &str) -> Result<(), TransferError> {
        let locators = session.import(token)?;
        self.locators = locators;
        self.staged = None;
        Ok(())
    }
}

/// The form-based surface that receives a finished locator set.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationSurface {
    locators: Option<LocatorSet>,
}

impl ConfigurationSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locators(&self) -> Option<&LocatorSet> {
        self.locators.as_ref()
    }

    pub fn locators_mut(&mut self) -> Option<&mut LocatorSet> {
        self.locators.as_mut()
    }

    /// Replace the current locators with the session's payload.
    ///
    /// All-or-nothing: on error the previous locators are kept.
    pub fn apply_import(&mut self, session: &SessionContext, token: &str) -> Result<&LocatorSet, TransferError> {
        match session.import(token) {
            Ok(locators) => {
                info!(target_url = %locators.target_url, fields = locators.fields().len(), "Imported locators");
                Ok(self.locators.insert(locators))
            }
            Err(e) => {
                warn!(error = %e, "Import rejected, keeping current locators");
                Err(e)
            }
        }
    }

    /// Replace the current locators from raw payload text, all-or-nothing.
    pub fn apply_payload(&mut self, payload: &str) -> Result<&LocatorSet, TransferError> {
        let locators = import_payload(payload)?;
        Ok(self.locators.insert(locators))
    }

    pub fn accept_refinement(&mut self, suggestion: &RefinementSuggestion) -> Result<(), SessionError> {
        let locators = self
            .locators
            .as_mut()
            .ok_or(SessionError::Transfer(TransferError::NoPayload))?;
        Ok(accept_refinement(locators, suggestion)?)
    }

    /// Hand the (possibly edited) locators back to the inspection surface.
    pub fn export(&self, session: &mut SessionContext) -> Result<String, TransferError> {
        let locators = self.locators.as_ref().ok_or(TransferError::NoPayload)?;
        session.export(locators)
    }
}

#[cfg(test)]
#[path = "surface_tests.rs"]
mod tests;
