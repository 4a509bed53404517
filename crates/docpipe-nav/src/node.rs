//! Navigation node types and per-group UI metadata.

use serde::Serialize;

/// One node of the navigation structure.
///
/// Serialized with a `type` tag so UI consumers can switch on the
/// variant (`category`, `group`, `sub_group`, `page`).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NavigationNode {
    /// Top-level content directory.
    Category {
        /// Lowercase category key.
        key: String,
        /// Display title.
        title: String,
        /// Leading-slash URL path.
        path: String,
        /// Child nodes in sorted order.
        children: Vec<NavigationNode>,
    },
    /// Metadata-derived group within a category.
    Group {
        /// Raw group key.
        key: String,
        /// Humanized title.
        title: String,
        /// Groups are always collapsible.
        collapsible: bool,
        /// Deterministic UI metadata.
        ui: GroupUi,
        /// Pages and sub-groups in sorted order.
        children: Vec<NavigationNode>,
    },
    /// Second grouping level nested under a group.
    SubGroup {
        /// Raw sub-group key.
        key: String,
        /// Humanized title.
        title: String,
        /// Sub-groups are always collapsible.
        collapsible: bool,
        /// Pages in sorted order.
        children: Vec<NavigationNode>,
    },
    /// Leaf referencing one scanned document.
    Page {
        /// Display title.
        title: String,
        /// Leading-slash URL path.
        path: String,
        /// Numeric sort priority.
        priority: i64,
        /// Resolved tags, searchable.
        tags: Vec<String>,
    },
}

impl NavigationNode {
    /// Display title of any variant.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Category { title, .. }
            | Self::Group { title, .. }
            | Self::SubGroup { title, .. }
            | Self::Page { title, .. } => title,
        }
    }

    /// Count of `page` leaves reachable from this node.
    #[must_use]
    pub fn page_count(&self) -> usize {
        match self {
            Self::Page { .. } => 1,
            Self::Category { children, .. }
            | Self::Group { children, .. }
            | Self::SubGroup { children, .. } => {
                children.iter().map(NavigationNode::page_count).sum()
            }
        }
    }
}

/// Keyboard shortcuts advertised for a collapsible group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KeyboardShortcuts {
    /// Toggle expand/collapse.
    pub toggle: String,
    /// Focus the first child entry.
    pub focus_first: String,
    /// Focus the parent category.
    pub focus_parent: String,
}

impl Default for KeyboardShortcuts {
    fn default() -> Self {
        Self {
            toggle: "Enter".to_owned(),
            focus_first: "ArrowDown".to_owned(),
            focus_parent: "ArrowUp".to_owned(),
        }
    }
}

/// Mobile rendering hints for a group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MobileBehavior {
    /// Collapse the group by default on small screens.
    pub collapse_on_mobile: bool,
    /// Show the item count badge on small screens.
    pub show_item_count: bool,
}

impl Default for MobileBehavior {
    fn default() -> Self {
        Self {
            collapse_on_mobile: true,
            show_item_count: true,
        }
    }
}

/// Deterministic UI metadata attached to a group node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupUi {
    /// Icon name from the style table.
    pub icon: String,
    /// Icon color from the style table.
    pub icon_color: String,
    /// CSS class: `nav-group nav-group-<key>`.
    pub css_class: String,
    /// Header CSS class: `nav-group-header nav-group-header-<key>`.
    pub header_class: String,
    /// Persisted expansion-state key: `<category>_group_<key>`.
    pub state_key: String,
    /// Initially expanded; archival groups start collapsed.
    pub default_expanded: bool,
    /// Accessible label naming the group and its item count.
    pub aria_label: String,
    /// Mirrors `default_expanded` for the initial render.
    pub aria_expanded: bool,
    /// Number of pages in the group, including nested sub-groups.
    pub item_count: usize,
    /// Keyboard shortcuts.
    pub keyboard_shortcuts: KeyboardShortcuts,
    /// Mobile hints.
    pub mobile_behavior: MobileBehavior,
}

impl GroupUi {
    /// Build the UI metadata for a group key.
    #[must_use]
    pub fn for_group(key: &str, category: &str, title: &str, item_count: usize) -> Self {
        let (icon, icon_color) = group_style(key);
        let default_expanded = default_expanded(key);
        Self {
            icon: icon.to_owned(),
            icon_color: icon_color.to_owned(),
            css_class: format!("nav-group nav-group-{key}"),
            header_class: format!("nav-group-header nav-group-header-{key}"),
            state_key: format!("{category}_group_{key}"),
            default_expanded,
            aria_label: format!(
                "{title} group, collapsible section with {item_count} item(s)"
            ),
            aria_expanded: default_expanded,
            item_count,
            keyboard_shortcuts: KeyboardShortcuts::default(),
            mobile_behavior: MobileBehavior::default(),
        }
    }
}

/// Icon and color per known group key; unknown keys get the default.
fn group_style(key: &str) -> (&'static str, &'static str) {
    match key {
        "done" => ("check-circle", "green"),
        "strategy" => ("map", "purple"),
        "build" => ("hammer", "orange"),
        "security" => ("shield", "red"),
        "docs" => ("book", "blue"),
        "admin" => ("settings", "slate"),
        _ => ("folder", "gray"),
    }
}

/// Archival-style groups start collapsed; active-work groups expanded.
fn default_expanded(key: &str) -> bool {
    !matches!(key, "done" | "strategy")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_group_ui_known_key() {
        let ui = GroupUi::for_group("done", "build", "Done", 3);
        assert_eq!(ui.icon, "check-circle");
        assert_eq!(ui.icon_color, "green");
        assert_eq!(ui.css_class, "nav-group nav-group-done");
        assert_eq!(ui.header_class, "nav-group-header nav-group-header-done");
        assert_eq!(ui.state_key, "build_group_done");
        assert!(!ui.default_expanded);
        assert!(!ui.aria_expanded);
        assert_eq!(
            ui.aria_label,
            "Done group, collapsible section with 3 item(s)"
        );
        assert_eq!(ui.item_count, 3);
    }

    #[test]
    fn test_group_ui_unknown_key_gets_default_style() {
        let ui = GroupUi::for_group("mystery", "build", "Mystery", 1);
        assert_eq!(ui.icon, "folder");
        assert_eq!(ui.icon_color, "gray");
        assert!(ui.default_expanded);
    }

    #[test]
    fn test_default_expanded_convention() {
        assert!(!default_expanded("done"));
        assert!(!default_expanded("strategy"));
        assert!(default_expanded("build"));
        assert!(default_expanded("anything-else"));
    }

    #[test]
    fn test_mobile_behavior_defaults() {
        let ui = GroupUi::for_group("build", "build", "Build", 2);
        assert!(ui.mobile_behavior.collapse_on_mobile);
        assert!(ui.mobile_behavior.show_item_count);
    }

    #[test]
    fn test_page_count_recurses() {
        let node = NavigationNode::Group {
            key: "g".to_owned(),
            title: "G".to_owned(),
            collapsible: true,
            ui: GroupUi::for_group("g", "c", "G", 2),
            children: vec![
                NavigationNode::Page {
                    title: "A".to_owned(),
                    path: "/a".to_owned(),
                    priority: 1,
                    tags: vec![],
                },
                NavigationNode::SubGroup {
                    key: "s".to_owned(),
                    title: "S".to_owned(),
                    collapsible: true,
                    children: vec![NavigationNode::Page {
                        title: "B".to_owned(),
                        path: "/b".to_owned(),
                        priority: 2,
                        tags: vec![],
                    }],
                },
            ],
        };
        assert_eq!(node.page_count(), 2);
    }

    #[test]
    fn test_node_serializes_with_type_tag() {
        let node = NavigationNode::Page {
            title: "A".to_owned(),
            path: "/a".to_owned(),
            priority: 1,
            tags: vec!["x".to_owned()],
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "page");
        assert_eq!(json["path"], "/a");
    }
}
