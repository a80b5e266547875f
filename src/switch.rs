//! Admin "view as" toggles, one per impersonable portal.

use crate::context::PortalContext;
use crate::error::PortalError;
use crate::navigation::Navigator;
use crate::portal::PortalIdentity;
use crate::routes::{MatchMode, RouteTable};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchTransition {
    Entered,
    Left,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchOutcome {
    pub transition: SwitchTransition,
    pub from_location: String,
    pub portal: PortalIdentity,
    pub navigated_to: String,
    pub matched_prefix: Option<String>,
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalSwitch {
    target: PortalIdentity,
    impersonating: bool,
}

impl PortalSwitch {
    pub fn new(target: PortalIdentity) -> Result<Self, PortalError> {
        if target == PortalIdentity::Admin {
            return Err(PortalError::NotEmbeddable(target));
        }
        Ok(Self {
            target,
            impersonating: false,
        })
    }

    pub fn target(&self) -> PortalIdentity {
        self.target
    }

    pub fn is_impersonating(&self) -> bool {
        self.impersonating
    }

    pub fn toggle(
        &mut self,
        ctx: &mut PortalContext,
        nav: &mut dyn Navigator,
        table: &RouteTable,
        mode: MatchMode,
    ) -> SwitchOutcome {
        self.impersonating = !self.impersonating;
        if !self.impersonating {
            return reset_to_admin(ctx, nav);
        }

        let from_location = nav.location().to_string();
        ctx.set_current_portal(self.target);
        let resolution = table.resolve_detailed(&from_location, self.target, mode);
        nav.navigate(&resolution.path, ctx.current());
        tracing::debug!(
            target_portal = %self.target,
            from = %from_location,
            to = %resolution.path,
            fallback = resolution.fallback,
            "entered portal view"
        );
        SwitchOutcome {
            transition: SwitchTransition::Entered,
            from_location,
            portal: self.target,
            navigated_to: resolution.path,
            matched_prefix: resolution.matched_prefix,
            fallback: resolution.fallback,
        }
    }

    /// Clears the flag without touching context or location.
    pub(crate) fn deactivate(&mut self) {
        self.impersonating = false;
    }
}

/// Back to the admin dashboard, never back to where the admin was before.
pub fn reset_to_admin(ctx: &mut PortalContext, nav: &mut dyn Navigator) -> SwitchOutcome {
    let from_location = nav.location().to_string();
    ctx.set_current_portal(PortalIdentity::Admin);
    let dashboard = PortalIdentity::Admin.dashboard_route();
    nav.navigate(&dashboard, ctx.current());
    tracing::debug!(from = %from_location, "returned to admin");
    SwitchOutcome {
        transition: SwitchTransition::Left,
        from_location,
        portal: PortalIdentity::Admin,
        navigated_to: dashboard,
        matched_prefix: None,
        fallback: false,
    }
}
