use crate::portal::{PortalDescriptor, PortalIdentity};
use serde::Serialize;

/// The portal the session is currently acting as.
///
/// Readers build portal-relative links from it. The only writer is the
/// switch transition in `switch`, which updates it before navigating so no
/// render sees a stale portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalContext {
    current_portal: PortalIdentity,
    revision: u64,
}

impl Default for PortalContext {
    fn default() -> Self {
        Self {
            current_portal: PortalIdentity::Admin,
            revision: 0,
        }
    }
}

impl PortalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that starts somewhere other than admin, for principals
    /// who act inside their own portal.
    pub fn for_portal(portal: PortalIdentity) -> Self {
        Self {
            current_portal: portal,
            revision: 0,
        }
    }

    pub fn current(&self) -> PortalIdentity {
        self.current_portal
    }

    pub fn descriptor(&self) -> &'static PortalDescriptor {
        self.current_portal.descriptor()
    }

    /// Bumped on every change of portal.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn link(&self, relative: &str) -> String {
        let base = self.descriptor().base_route;
        let rel = relative.trim_start_matches('/');
        if rel.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, rel)
        }
    }

    pub(crate) fn set_current_portal(&mut self, portal: PortalIdentity) -> bool {
        if self.current_portal == portal {
            return false;
        }
        self.current_portal = portal;
        self.revision += 1;
        true
    }
}
