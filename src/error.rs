use crate::portal::PortalIdentity;

/// Misuse of the portal layer. The core derivations are total; these only
/// surface at the edges (parsing, role gating, embed page state).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PortalError {
    #[error("unknown portal: {0}")]
    UnknownPortal(String),
    #[error("base route {inner} of {inner_portal} is a prefix of {outer} ({outer_portal})")]
    OverlappingBaseRoutes {
        inner_portal: PortalIdentity,
        inner: String,
        outer_portal: PortalIdentity,
        outer: String,
    },
    #[error("route table entry {origin} maps {portal} outside {base_route}: {path}")]
    MappingOutsidePortal {
        origin: String,
        portal: PortalIdentity,
        base_route: String,
        path: String,
    },
    #[error("route table origin {0} is not an admin route")]
    OriginOutsideAdmin(String),
    #[error("role {role} cannot view other portals")]
    Forbidden { role: String },
    #[error("{0} cannot be embedded or impersonated")]
    NotEmbeddable(PortalIdentity),
    #[error("unknown tab {tab} for {portal}")]
    UnknownTab { portal: PortalIdentity, tab: String },
    #[error("no pending load for ticket {0}")]
    UnknownTicket(u64),
}

impl PortalError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownPortal(_) => "unknown_portal",
            Self::OverlappingBaseRoutes { .. }
            | Self::MappingOutsidePortal { .. }
            | Self::OriginOutsideAdmin(_) => "invalid_table",
            Self::Forbidden { .. } => "forbidden",
            Self::NotEmbeddable(_) => "not_embeddable",
            Self::UnknownTab { .. } => "unknown_tab",
            Self::UnknownTicket(_) => "unknown_ticket",
        }
    }
}
