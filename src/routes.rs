//! Route equivalence between portals.
//!
//! Each entry names one navigable concept by its administrative path prefix
//! and lists where that concept lives in every other portal that has it.
//! Entries are scanned in order and the first match wins.

use crate::error::PortalError;
use crate::portal::PortalIdentity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Plain string prefix: `/admin/coursesx` matches `/admin/courses`.
    #[default]
    Prefix,
    /// Whole path segments only.
    Segment,
}

impl MatchMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prefix" => Some(Self::Prefix),
            "segment" => Some(Self::Segment),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Prefix => "prefix",
            Self::Segment => "segment",
        }
    }

    pub fn matches(self, location: &str, prefix: &str) -> bool {
        match self {
            Self::Prefix => location.starts_with(prefix),
            Self::Segment => {
                let mut loc = segments(location);
                segments(prefix).all(|p| loc.next() == Some(p))
            }
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEquivalenceEntry {
    pub origin_prefix: String,
    pub mapping: BTreeMap<PortalIdentity, String>,
}

impl RouteEquivalenceEntry {
    pub fn new(origin_prefix: impl Into<String>) -> Self {
        Self {
            origin_prefix: origin_prefix.into(),
            mapping: BTreeMap::new(),
        }
    }

    pub fn map(mut self, portal: PortalIdentity, path: impl Into<String>) -> Self {
        self.mapping.insert(portal, path.into());
        self
    }

    /// The admin side of an entry is its origin prefix.
    pub fn target(&self, portal: PortalIdentity) -> Option<&str> {
        if portal == PortalIdentity::Admin {
            return Some(&self.origin_prefix);
        }
        self.mapping.get(&portal).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub path: String,
    pub matched_prefix: Option<String>,
    /// True when the target dashboard was used instead of a mapped route.
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ambiguity {
    pub shadowing: String,
    pub shadowed: String,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: Vec<RouteEquivalenceEntry>,
}

impl RouteTable {
    pub fn new(entries: Vec<RouteEquivalenceEntry>) -> Self {
        Self { entries }
    }

    pub fn standard() -> Self {
        use crate::portal::PortalIdentity::*;
        Self::new(vec![
            RouteEquivalenceEntry::new("/admin/dashboard")
                .map(Hub, "/hub/dashboard")
                .map(Teacher, "/teacher/dashboard")
                .map(Partner, "/partner/dashboard")
                .map(Student, "/student/dashboard"),
            RouteEquivalenceEntry::new("/admin/courses")
                .map(Hub, "/hub/courses")
                .map(Teacher, "/teacher/courses")
                .map(Student, "/student/courses"),
            RouteEquivalenceEntry::new("/admin/students")
                .map(Hub, "/hub/students")
                .map(Teacher, "/teacher/students")
                .map(Partner, "/partner/students"),
            RouteEquivalenceEntry::new("/admin/teachers").map(Hub, "/hub/teachers"),
            RouteEquivalenceEntry::new("/admin/classes")
                .map(Hub, "/hub/classes")
                .map(Teacher, "/teacher/classes"),
            RouteEquivalenceEntry::new("/admin/subjects")
                .map(Teacher, "/teacher/subjects")
                .map(Student, "/student/subjects"),
            RouteEquivalenceEntry::new("/admin/modules")
                .map(Teacher, "/teacher/modules")
                .map(Student, "/student/modules"),
            RouteEquivalenceEntry::new("/admin/assessments")
                .map(Teacher, "/teacher/assessments")
                .map(Student, "/student/assessments"),
            RouteEquivalenceEntry::new("/admin/quizzes")
                .map(Teacher, "/teacher/quizzes")
                .map(Student, "/student/quizzes"),
            RouteEquivalenceEntry::new("/admin/hubs").map(Partner, "/partner/hubs"),
            RouteEquivalenceEntry::new("/admin/reports")
                .map(Hub, "/hub/reports")
                .map(Partner, "/partner/reports"),
        ])
    }

    pub fn entries(&self) -> &[RouteEquivalenceEntry] {
        &self.entries
    }

    /// Every origin must be an admin route and every mapping must stay
    /// inside its portal, which is what keeps `resolve` inside the target.
    pub fn validate(&self) -> Result<(), PortalError> {
        let admin = PortalIdentity::Admin.base_route();
        for entry in &self.entries {
            if !MatchMode::Segment.matches(&entry.origin_prefix, admin) {
                return Err(PortalError::OriginOutsideAdmin(entry.origin_prefix.clone()));
            }
            for (portal, path) in &entry.mapping {
                if !MatchMode::Segment.matches(path, portal.base_route()) {
                    return Err(PortalError::MappingOutsidePortal {
                        origin: entry.origin_prefix.clone(),
                        portal: *portal,
                        base_route: portal.base_route().to_string(),
                        path: path.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn resolve(&self, location: &str, target: PortalIdentity, mode: MatchMode) -> String {
        self.resolve_detailed(location, target, mode).path
    }

    pub fn resolve_detailed(
        &self,
        location: &str,
        target: PortalIdentity,
        mode: MatchMode,
    ) -> Resolution {
        let matched = self
            .entries
            .iter()
            .find(|e| mode.matches(location, &e.origin_prefix));

        match matched.and_then(|e| e.target(target).map(|p| (e, p))) {
            Some((entry, path)) => Resolution {
                path: path.to_string(),
                matched_prefix: Some(entry.origin_prefix.clone()),
                fallback: false,
            },
            None => Resolution {
                path: target.dashboard_route(),
                matched_prefix: matched.map(|e| e.origin_prefix.clone()),
                fallback: true,
            },
        }
    }

    /// Pairs where an earlier origin is a string prefix of a later one, so
    /// the later entry can never win under prefix matching.
    pub fn ambiguities(&self) -> Vec<Ambiguity> {
        let mut out = Vec::new();
        for (i, a) in self.entries.iter().enumerate() {
            for b in self.entries.iter().skip(i + 1) {
                if b.origin_prefix.starts_with(&a.origin_prefix) {
                    out.push(Ambiguity {
                        shadowing: a.origin_prefix.clone(),
                        shadowed: b.origin_prefix.clone(),
                    });
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::PortalIdentity::*;

    #[test]
    fn standard_table_is_valid_and_unambiguous() {
        let table = RouteTable::standard();
        table.validate().expect("valid table");
        assert!(table.ambiguities().is_empty());
    }

    #[test]
    fn courses_map_to_hub_courses() {
        let table = RouteTable::standard();
        let r = table.resolve_detailed("/admin/courses", Hub, MatchMode::Prefix);
        assert_eq!(r.path, "/hub/courses");
        assert_eq!(r.matched_prefix.as_deref(), Some("/admin/courses"));
        assert!(!r.fallback);
        // Deeper locations still land on the list route.
        assert_eq!(
            table.resolve("/admin/courses/12/edit", Teacher, MatchMode::Segment),
            "/teacher/courses"
        );
    }

    #[test]
    fn unmapped_routes_fall_back_to_dashboard() {
        let table = RouteTable::standard();
        assert_eq!(
            table.resolve("/admin/settings", Hub, MatchMode::Prefix),
            "/hub/dashboard"
        );
        // Matching entry without a mapping for the target.
        let r = table.resolve_detailed("/admin/teachers", Student, MatchMode::Prefix);
        assert_eq!(r.path, "/student/dashboard");
        assert_eq!(r.matched_prefix.as_deref(), Some("/admin/teachers"));
        assert!(r.fallback);
    }

    #[test]
    fn resolve_always_lands_inside_target_portal() {
        let table = RouteTable::standard();
        let locations = [
            "",
            "/",
            "/admin",
            "/admin/",
            "/admin/courses",
            "/admin/coursesx",
            "/admin/quizzes/3",
            "/hub/courses",
            "//admin//students",
            "not a path",
            "/admin/students/42/edit",
        ];
        for mode in [MatchMode::Prefix, MatchMode::Segment] {
            for loc in locations {
                for portal in PortalIdentity::ALL {
                    let path = table.resolve(loc, portal, mode);
                    assert!(!path.is_empty());
                    assert!(
                        path.starts_with(portal.base_route()),
                        "{loc} -> {portal} gave {path}"
                    );
                }
            }
        }
    }

    #[test]
    fn prefix_mode_keeps_substring_matches_segment_mode_does_not() {
        let table = RouteTable::standard();
        assert_eq!(
            table.resolve("/admin/coursesx", Hub, MatchMode::Prefix),
            "/hub/courses"
        );
        assert_eq!(
            table.resolve("/admin/coursesx", Hub, MatchMode::Segment),
            "/hub/dashboard"
        );
    }

    #[test]
    fn first_match_wins_and_is_reported_as_ambiguity() {
        let table = RouteTable::new(vec![
            RouteEquivalenceEntry::new("/admin/courses").map(Hub, "/hub/courses"),
            RouteEquivalenceEntry::new("/admin/courses-archive").map(Hub, "/hub/archive"),
        ]);
        assert_eq!(
            table.resolve("/admin/courses-archive", Hub, MatchMode::Prefix),
            "/hub/courses"
        );
        assert_eq!(
            table.resolve("/admin/courses-archive", Hub, MatchMode::Segment),
            "/hub/archive"
        );
        assert_eq!(
            table.ambiguities(),
            vec![Ambiguity {
                shadowing: "/admin/courses".into(),
                shadowed: "/admin/courses-archive".into(),
            }]
        );
    }

    #[test]
    fn admin_target_returns_origin_prefix() {
        let table = RouteTable::standard();
        assert_eq!(
            table.resolve("/admin/students/7", Admin, MatchMode::Prefix),
            "/admin/students"
        );
    }

    #[test]
    fn validate_rejects_mapping_outside_portal() {
        let table = RouteTable::new(vec![
            RouteEquivalenceEntry::new("/admin/courses").map(Hub, "/teacher/courses")
        ]);
        assert_eq!(table.validate().expect_err("bad").code(), "invalid_table");
        let table = RouteTable::new(vec![RouteEquivalenceEntry::new("/hub/courses")]);
        assert!(matches!(
            table.validate(),
            Err(PortalError::OriginOutsideAdmin(_))
        ));
    }
}
