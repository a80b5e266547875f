use crate::error::PortalError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalIdentity {
    Admin,
    Hub,
    Teacher,
    Partner,
    Student,
}

impl PortalIdentity {
    pub const ALL: [PortalIdentity; 5] = [
        PortalIdentity::Admin,
        PortalIdentity::Hub,
        PortalIdentity::Teacher,
        PortalIdentity::Partner,
        PortalIdentity::Student,
    ];

    pub fn parse(s: &str) -> Result<Self, PortalError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            // Hubs are "polos" in the product vocabulary.
            "hub" | "polo" => Ok(Self::Hub),
            "teacher" => Ok(Self::Teacher),
            "partner" => Ok(Self::Partner),
            "student" => Ok(Self::Student),
            _ => Err(PortalError::UnknownPortal(s.to_string())),
        }
    }

    /// Native portal of an authenticated role, if the role has one.
    pub fn from_role(role: &str) -> Option<Self> {
        match role.trim().to_ascii_lowercase().as_str() {
            "admin" | "administrator" | "superadmin" => Some(Self::Admin),
            "hub" | "polo" => Some(Self::Hub),
            "teacher" | "professor" => Some(Self::Teacher),
            "partner" | "parceiro" => Some(Self::Partner),
            "student" | "aluno" => Some(Self::Student),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Hub => "hub",
            Self::Teacher => "teacher",
            Self::Partner => "partner",
            Self::Student => "student",
        }
    }

    pub fn descriptor(self) -> &'static PortalDescriptor {
        // PORTALS is ordered like ALL.
        &PORTALS[self as usize]
    }

    pub fn base_route(self) -> &'static str {
        self.descriptor().base_route
    }

    /// Default landing path, used whenever no better route is known.
    pub fn dashboard_route(self) -> String {
        format!("{}/dashboard", self.base_route())
    }
}

impl fmt::Display for PortalIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalDescriptor {
    pub id: PortalIdentity,
    pub base_route: &'static str,
}

pub static PORTALS: [PortalDescriptor; 5] = [
    PortalDescriptor {
        id: PortalIdentity::Admin,
        base_route: "/admin",
    },
    PortalDescriptor {
        id: PortalIdentity::Hub,
        base_route: "/hub",
    },
    PortalDescriptor {
        id: PortalIdentity::Teacher,
        base_route: "/teacher",
    },
    PortalDescriptor {
        id: PortalIdentity::Partner,
        base_route: "/partner",
    },
    PortalDescriptor {
        id: PortalIdentity::Student,
        base_route: "/student",
    },
];

/// Base routes must be unique and none may be a string prefix of another,
/// otherwise prefix matching against them is ambiguous.
pub fn validate_descriptors(descriptors: &[PortalDescriptor]) -> Result<(), PortalError> {
    for (i, a) in descriptors.iter().enumerate() {
        for (j, b) in descriptors.iter().enumerate() {
            if i == j {
                continue;
            }
            if b.base_route.starts_with(a.base_route) {
                return Err(PortalError::OverlappingBaseRoutes {
                    inner_portal: a.id,
                    inner: a.base_route.to_string(),
                    outer_portal: b.id,
                    outer: b.base_route.to_string(),
                });
            }
        }
    }
    Ok(())
}
