//! Breadcrumb trails derived from the current location.

use crate::labels::LabelDictionary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    pub label: String,
    pub href: String,
}

impl BreadcrumbItem {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// The item seeded at the head of every non-root trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeAnchor {
    pub label: String,
    pub href: String,
}

impl Default for HomeAnchor {
    fn default() -> Self {
        Self {
            label: "Dashboard".to_string(),
            href: "/".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedCrumb {
    pub label: String,
    /// None for the current page.
    pub href: Option<String>,
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BreadcrumbView {
    /// Static indicator, nothing clickable.
    Home { label: String },
    Trail { items: Vec<RenderedCrumb> },
}

fn path_only(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    &location[..end]
}

fn is_resource_id(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

pub fn generate(
    location: &str,
    explicit: Option<&[BreadcrumbItem]>,
    labels: &LabelDictionary,
    home: &HomeAnchor,
) -> Vec<BreadcrumbItem> {
    if let Some(items) = explicit {
        return items.to_vec();
    }

    let segments: Vec<&str> = path_only(location)
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        return Vec::new();
    }

    let mut trail = vec![BreadcrumbItem::new(home.label.clone(), home.href.clone())];
    let mut prefix = String::new();
    let last = segments.len() - 1;
    for (i, segment) in segments.iter().enumerate() {
        prefix.push('/');
        prefix.push_str(segment);
        // Ids stay in the href of what follows but never show on their own.
        if is_resource_id(segment) && i != last {
            continue;
        }
        trail.push(BreadcrumbItem::new(labels.label_for(segment), prefix.clone()));
    }
    trail
}

pub fn render(
    location: &str,
    explicit: Option<&[BreadcrumbItem]>,
    labels: &LabelDictionary,
    home: &HomeAnchor,
) -> BreadcrumbView {
    let trail = generate(location, explicit, labels, home);
    if trail.is_empty() {
        return BreadcrumbView::Home {
            label: home.label.clone(),
        };
    }
    let last = trail.len() - 1;
    let items = trail
        .into_iter()
        .enumerate()
        .map(|(i, item)| RenderedCrumb {
            label: item.label,
            href: (i != last).then_some(item.href),
            current: i == last,
        })
        .collect();
    BreadcrumbView::Trail { items }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail(location: &str) -> Vec<BreadcrumbItem> {
        generate(
            location,
            None,
            &LabelDictionary::standard(),
            &HomeAnchor::default(),
        )
    }

    #[test]
    fn numeric_ids_are_suppressed_but_kept_in_hrefs() {
        assert_eq!(
            trail("/admin/students/42/edit"),
            vec![
                BreadcrumbItem::new("Dashboard", "/"),
                BreadcrumbItem::new("Administrativo", "/admin"),
                BreadcrumbItem::new("Alunos", "/admin/students"),
                BreadcrumbItem::new("Editar", "/admin/students/42/edit"),
            ]
        );
    }

    #[test]
    fn trailing_id_is_shown() {
        let t = trail("/admin/students/42");
        assert_eq!(t.last(), Some(&BreadcrumbItem::new("42", "/admin/students/42")));
        assert_eq!(
            trail("/42"),
            vec![
                BreadcrumbItem::new("Dashboard", "/"),
                BreadcrumbItem::new("42", "/42"),
            ]
        );
    }

    #[test]
    fn root_yields_empty_trail() {
        assert!(trail("/").is_empty());
        assert!(trail("").is_empty());
        assert!(trail("///").is_empty());
    }

    #[test]
    fn unmapped_segments_use_capitalization() {
        let t = trail("/admin/xyz123");
        assert_eq!(t[2], BreadcrumbItem::new("Xyz123", "/admin/xyz123"));
    }

    #[test]
    fn explicit_items_win_verbatim() {
        let items = vec![
            BreadcrumbItem::new("Custom", "/anywhere"),
            BreadcrumbItem::new("42", "/not/derived"),
        ];
        let out = generate(
            "/admin/students/42/edit",
            Some(&items),
            &LabelDictionary::standard(),
            &HomeAnchor::default(),
        );
        assert_eq!(out, items);
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        assert_eq!(trail("/admin/courses?page=2#top"), trail("/admin/courses"));
    }

    #[test]
    fn render_marks_only_the_last_item_current() {
        let labels = LabelDictionary::standard();
        let home = HomeAnchor::default();
        assert_eq!(
            render("/", None, &labels, &home),
            BreadcrumbView::Home {
                label: "Dashboard".into()
            }
        );
        let BreadcrumbView::Trail { items } = render("/admin/courses", None, &labels, &home)
        else {
            panic!("expected trail");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].href.as_deref(), Some("/"));
        assert_eq!(items[1].href.as_deref(), Some("/admin"));
        assert_eq!(items[2].href, None);
        assert!(items[2].current);
        assert!(!items[0].current && !items[1].current);
    }

    #[test]
    fn custom_home_anchor_seeds_the_trail() {
        let home = HomeAnchor {
            label: "Início".into(),
            href: "/hub/dashboard".into(),
        };
        let t = generate("/hub/courses", None, &LabelDictionary::standard(), &home);
        assert_eq!(t[0], BreadcrumbItem::new("Início", "/hub/dashboard"));
        assert_eq!(t[1], BreadcrumbItem::new("Polo", "/hub"));
    }
}
