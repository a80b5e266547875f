use crate::portal::PortalIdentity;
use serde::Serialize;

/// The client router, seen as an opaque capability.
pub trait Navigator {
    fn location(&self) -> &str;

    /// `portal` is the portal the render following this navigation computes
    /// its links against.
    fn navigate(&mut self, path: &str, portal: PortalIdentity);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEntry {
    pub path: String,
    pub portal: PortalIdentity,
}

const MAX_HISTORY: usize = 256;

/// In-memory router state for one session.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<NavigationEntry>,
}

impl History {
    pub fn new(initial: &str, portal: PortalIdentity) -> Self {
        Self {
            entries: vec![NavigationEntry {
                path: initial.to_string(),
                portal,
            }],
        }
    }

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&NavigationEntry> {
        self.entries.last()
    }
}

impl Navigator for History {
    fn location(&self) -> &str {
        self.entries.last().map(|e| e.path.as_str()).unwrap_or("/")
    }

    fn navigate(&mut self, path: &str, portal: PortalIdentity) {
        if self.entries.len() >= MAX_HISTORY {
            self.entries.remove(0);
        }
        self.entries.push(NavigationEntry {
            path: path.to_string(),
            portal,
        });
    }
}
