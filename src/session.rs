use crate::context::PortalContext;
use crate::embed::EmbedPage;
use crate::error::PortalError;
use crate::navigation::{History, Navigator};
use crate::portal::PortalIdentity;
use crate::routes::{MatchMode, RouteTable};
use crate::switch::{self, PortalSwitch, SwitchOutcome};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The authenticated user, as handed over by the auth layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub role: String,
}

impl Principal {
    pub fn can_impersonate(&self) -> bool {
        PortalIdentity::from_role(&self.role) == Some(PortalIdentity::Admin)
    }

    /// Admins act as admin until they switch. Everyone else acts in their
    /// own portal for the whole session; unknown roles fall back to admin.
    pub fn home_portal(&self) -> PortalIdentity {
        PortalIdentity::from_role(&self.role).unwrap_or(PortalIdentity::Admin)
    }
}

pub struct Session {
    principal: Principal,
    context: PortalContext,
    history: History,
    switches: BTreeMap<PortalIdentity, PortalSwitch>,
    embed: Option<EmbedPage>,
}

impl Session {
    pub fn open(principal: Principal, location: &str) -> Self {
        let context = PortalContext::for_portal(principal.home_portal());
        let history = History::new(location, context.current());
        let mut switches = BTreeMap::new();
        if principal.can_impersonate() {
            for portal in PortalIdentity::ALL {
                if let Ok(sw) = PortalSwitch::new(portal) {
                    switches.insert(portal, sw);
                }
            }
        }
        Self {
            principal,
            context,
            history,
            switches,
            embed: None,
        }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn context(&self) -> &PortalContext {
        &self.context
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn location(&self) -> &str {
        self.history.location()
    }

    pub fn switches(&self) -> impl Iterator<Item = &PortalSwitch> {
        self.switches.values()
    }

    pub fn embed(&self) -> Option<&EmbedPage> {
        self.embed.as_ref()
    }

    pub fn embed_mut(&mut self) -> Option<&mut EmbedPage> {
        self.embed.as_mut()
    }

    pub fn navigate(&mut self, path: &str) {
        self.history.navigate(path, self.context.current());
    }

    /// Runs the target's switch. Entering one portal clears every other
    /// switch so the context and the active toggle always agree.
    pub fn toggle(
        &mut self,
        target: PortalIdentity,
        table: &RouteTable,
        mode: MatchMode,
    ) -> Result<SwitchOutcome, PortalError> {
        self.require_impersonation()?;
        let Some(sw) = self.switches.get_mut(&target) else {
            return Err(PortalError::NotEmbeddable(target));
        };
        let outcome = sw.toggle(&mut self.context, &mut self.history, table, mode);
        for (portal, other) in self.switches.iter_mut() {
            if *portal != target {
                other.deactivate();
            }
        }
        Ok(outcome)
    }

    fn require_impersonation(&self) -> Result<(), PortalError> {
        if self.principal.can_impersonate() {
            return Ok(());
        }
        Err(PortalError::Forbidden {
            role: self.principal.role.clone(),
        })
    }

    pub fn return_to_admin(&mut self) -> Result<SwitchOutcome, PortalError> {
        self.require_impersonation()?;
        for sw in self.switches.values_mut() {
            sw.deactivate();
        }
        self.embed = None;
        Ok(switch::reset_to_admin(&mut self.context, &mut self.history))
    }

    pub fn open_embed(&mut self, portal: PortalIdentity) -> Result<&EmbedPage, PortalError> {
        self.require_impersonation()?;
        Ok(self.embed.insert(EmbedPage::open(portal)?))
    }
}
