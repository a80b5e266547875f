//! Admin preview of another portal's screens.
//!
//! Each tab mounts the component the target portal itself renders on its
//! own route. Loading is two-phase: selecting a tab hands out a ticket, and
//! resolving the ticket asks a `ViewLoader` for the component.

use crate::error::PortalError;
use crate::portal::PortalIdentity;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedTab {
    pub key: &'static str,
    pub label: &'static str,
    /// Path under the portal's base route where the portal mounts this view.
    pub route: &'static str,
}

const HUB_TABS: &[EmbedTab] = &[
    EmbedTab {
        key: "dashboard",
        label: "Dashboard",
        route: "dashboard",
    },
    EmbedTab {
        key: "students",
        label: "Alunos",
        route: "students",
    },
    EmbedTab {
        key: "courses",
        label: "Cursos",
        route: "courses",
    },
    EmbedTab {
        key: "reports",
        label: "Relatórios",
        route: "reports",
    },
];

const TEACHER_TABS: &[EmbedTab] = &[
    EmbedTab {
        key: "dashboard",
        label: "Dashboard",
        route: "dashboard",
    },
    EmbedTab {
        key: "classes",
        label: "Turmas",
        route: "classes",
    },
    EmbedTab {
        key: "assessments",
        label: "Avaliações",
        route: "assessments",
    },
    EmbedTab {
        key: "quizzes",
        label: "Questionários",
        route: "quizzes",
    },
];

const PARTNER_TABS: &[EmbedTab] = &[
    EmbedTab {
        key: "dashboard",
        label: "Dashboard",
        route: "dashboard",
    },
    EmbedTab {
        key: "hubs",
        label: "Polos",
        route: "hubs",
    },
    EmbedTab {
        key: "students",
        label: "Alunos",
        route: "students",
    },
];

const STUDENT_TABS: &[EmbedTab] = &[
    EmbedTab {
        key: "dashboard",
        label: "Dashboard",
        route: "dashboard",
    },
    EmbedTab {
        key: "courses",
        label: "Cursos",
        route: "courses",
    },
    EmbedTab {
        key: "assessments",
        label: "Avaliações",
        route: "assessments",
    },
];

pub fn tabs_for(portal: PortalIdentity) -> Result<&'static [EmbedTab], PortalError> {
    match portal {
        PortalIdentity::Admin => Err(PortalError::NotEmbeddable(portal)),
        PortalIdentity::Hub => Ok(HUB_TABS),
        PortalIdentity::Teacher => Ok(TEACHER_TABS),
        PortalIdentity::Partner => Ok(PARTNER_TABS),
        PortalIdentity::Student => Ok(STUDENT_TABS),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewDescriptor {
    pub portal: PortalIdentity,
    pub tab: String,
    pub component: String,
    pub route: String,
}

pub trait ViewLoader {
    /// None when the portal has no component wired for the tab.
    fn load(&self, portal: PortalIdentity, tab: &EmbedTab) -> Option<ViewDescriptor>;
}

/// Components each portal exports for its own primary routes.
const PORTAL_COMPONENTS: &[(PortalIdentity, &str, &str)] = &[
    (PortalIdentity::Hub, "dashboard", "HubDashboard"),
    (PortalIdentity::Hub, "students", "HubStudentList"),
    (PortalIdentity::Hub, "courses", "HubCourseList"),
    (PortalIdentity::Teacher, "dashboard", "TeacherDashboard"),
    (PortalIdentity::Teacher, "classes", "TeacherClassList"),
    (PortalIdentity::Teacher, "assessments", "TeacherAssessmentList"),
    (PortalIdentity::Partner, "dashboard", "PartnerDashboard"),
    (PortalIdentity::Partner, "hubs", "PartnerHubList"),
    (PortalIdentity::Student, "dashboard", "StudentDashboard"),
    (PortalIdentity::Student, "courses", "StudentCourseList"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct PortalComponentRegistry;

impl ViewLoader for PortalComponentRegistry {
    fn load(&self, portal: PortalIdentity, tab: &EmbedTab) -> Option<ViewDescriptor> {
        PORTAL_COMPONENTS
            .iter()
            .find(|(p, key, _)| *p == portal && *key == tab.key)
            .map(|(_, _, component)| ViewDescriptor {
                portal,
                tab: tab.key.to_string(),
                component: component.to_string(),
                route: format!("{}/{}", portal.base_route(), tab.route),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum TabState {
    Idle,
    Loading { ticket: u64 },
    Ready { view: ViewDescriptor },
    NotImplemented,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabSlot {
    #[serde(flatten)]
    pub tab: EmbedTab,
    #[serde(flatten)]
    pub state: TabState,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedPage {
    portal: PortalIdentity,
    tabs: Vec<TabSlot>,
    active: usize,
    #[serde(skip)]
    next_ticket: u64,
}

impl EmbedPage {
    /// Opens on the first tab, already loading.
    pub fn open(portal: PortalIdentity) -> Result<Self, PortalError> {
        let tabs = tabs_for(portal)?
            .iter()
            .map(|tab| TabSlot {
                tab: *tab,
                state: TabState::Idle,
            })
            .collect();
        let mut page = Self {
            portal,
            tabs,
            active: 0,
            next_ticket: 1,
        };
        page.activate(0);
        Ok(page)
    }

    pub fn portal(&self) -> PortalIdentity {
        self.portal
    }

    pub fn tabs(&self) -> &[TabSlot] {
        &self.tabs
    }

    pub fn active(&self) -> &TabSlot {
        &self.tabs[self.active]
    }

    pub fn select(&mut self, key: &str) -> Result<&TabState, PortalError> {
        let Some(idx) = self.tabs.iter().position(|s| s.tab.key == key) else {
            return Err(PortalError::UnknownTab {
                portal: self.portal,
                tab: key.to_string(),
            });
        };
        self.activate(idx);
        Ok(&self.tabs[idx].state)
    }

    fn activate(&mut self, idx: usize) {
        self.active = idx;
        let slot = &mut self.tabs[idx];
        // Mounted and placeholder tabs stay as they are; a pending load keeps its ticket.
        if slot.state == TabState::Idle {
            slot.state = TabState::Loading {
                ticket: self.next_ticket,
            };
            self.next_ticket += 1;
        }
    }

    pub fn resolve(
        &mut self,
        ticket: u64,
        loader: &dyn ViewLoader,
    ) -> Result<&TabSlot, PortalError> {
        let Some(idx) = self
            .tabs
            .iter()
            .position(|s| s.state == TabState::Loading { ticket })
        else {
            return Err(PortalError::UnknownTicket(ticket));
        };
        let slot = &mut self.tabs[idx];
        slot.state = match loader.load(self.portal, &slot.tab) {
            Some(view) => TabState::Ready { view },
            None => TabState::NotImplemented,
        };
        Ok(&self.tabs[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket_of(state: &TabState) -> u64 {
        match state {
            TabState::Loading { ticket } => *ticket,
            other => panic!("expected loading, got {other:?}"),
        }
    }

    #[test]
    fn opens_on_first_tab_loading() {
        let page = EmbedPage::open(PortalIdentity::Hub).expect("hub page");
        assert_eq!(page.active().tab.key, "dashboard");
        assert_eq!(ticket_of(&page.active().state), 1);
        assert!(page.tabs()[1..].iter().all(|s| s.state == TabState::Idle));
    }

    #[test]
    fn resolves_to_portal_owned_component() {
        let mut page = EmbedPage::open(PortalIdentity::Hub).expect("hub page");
        let ticket = ticket_of(&page.active().state);
        let slot = page.resolve(ticket, &PortalComponentRegistry).expect("resolve");
        let TabState::Ready { view } = &slot.state else {
            panic!("expected ready");
        };
        assert_eq!(view.component, "HubDashboard");
        assert_eq!(view.route, "/hub/dashboard");
    }

    #[test]
    fn unwired_tab_shows_placeholder() {
        let mut page = EmbedPage::open(PortalIdentity::Hub).expect("hub page");
        let ticket = ticket_of(page.select("reports").expect("select"));
        let slot = page.resolve(ticket, &PortalComponentRegistry).expect("resolve");
        assert_eq!(slot.state, TabState::NotImplemented);
    }

    #[test]
    fn ready_tab_is_not_reloaded() {
        let mut page = EmbedPage::open(PortalIdentity::Student).expect("page");
        let first = ticket_of(&page.active().state);
        page.resolve(first, &PortalComponentRegistry).expect("resolve");
        let other = ticket_of(page.select("courses").expect("select"));
        assert_ne!(first, other);
        let again = page.select("dashboard").expect("select").clone();
        assert!(matches!(again, TabState::Ready { .. }));
        assert_eq!(
            page.resolve(first, &PortalComponentRegistry).expect_err("stale"),
            PortalError::UnknownTicket(first)
        );
    }

    #[test]
    fn pending_load_keeps_its_ticket() {
        let mut page = EmbedPage::open(PortalIdentity::Teacher).expect("page");
        let t1 = ticket_of(page.select("classes").expect("select"));
        page.select("dashboard").expect("select");
        let t2 = ticket_of(page.select("classes").expect("select"));
        assert_eq!(t1, t2);
    }

    #[test]
    fn admin_and_unknown_tabs_are_rejected() {
        assert!(EmbedPage::open(PortalIdentity::Admin).is_err());
        let mut page = EmbedPage::open(PortalIdentity::Partner).expect("page");
        assert_eq!(page.select("grades").expect_err("unknown").code(), "unknown_tab");
    }
}
