//! Metadata-driven grouping within the designated category.
//!
//! Only one category gets hierarchical grouping (default `"build"`);
//! every other category keeps its flat file list. Restructuring all of
//! the documentation at once proved disorienting, so grouping stays
//! opt-in per category.

use std::collections::BTreeMap;

use docpipe_meta::{MetadataResolver, Priority};
use docpipe_scan::FileRecord;

use crate::node::{GroupUi, NavigationNode};
use crate::path::file_path_to_url_path;

/// Partitions files into metadata-derived groups and converts them to
/// navigation nodes.
#[derive(Debug)]
pub struct Grouper {
    designated_category: String,
    resolver: MetadataResolver,
}

impl Default for Grouper {
    fn default() -> Self {
        Self {
            designated_category: "build".to_owned(),
            resolver: MetadataResolver::default(),
        }
    }
}

impl Grouper {
    /// Create a grouper with the default designated category.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Designate a different category for hierarchical grouping.
    #[must_use]
    pub fn with_designated_category(mut self, category: impl Into<String>) -> Self {
        self.designated_category = category.into();
        self
    }

    /// Use a custom metadata resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: MetadataResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Partition files by resolved group.
    ///
    /// For the designated category each file lands under its
    /// `determine_group` result; any other category is passed through
    /// unrestructured as a single entry keyed by the category name.
    #[must_use]
    pub fn group_files_by_metadata(
        &self,
        files: &[FileRecord],
        category: &str,
    ) -> BTreeMap<String, Vec<FileRecord>> {
        let mut grouped: BTreeMap<String, Vec<FileRecord>> = BTreeMap::new();

        if category != self.designated_category {
            grouped.insert(category.to_owned(), files.to_vec());
            return grouped;
        }

        for file in files {
            let group = self
                .resolver
                .determine_group(&file.raw_frontmatter, &file.path);
            grouped.entry(group).or_default().push(file.clone());
        }
        grouped
    }

    /// Convert grouped files into `group` navigation nodes.
    ///
    /// Files without a sub-group become direct page children; files
    /// sharing a sub-group nest under one `sub_group` node. Every list
    /// is sorted by priority rank (high, medium, low) with alphabetical
    /// title tie-breaks. Empty input yields an empty list.
    #[must_use]
    pub fn convert_groups_to_nav_structure(
        &self,
        grouped: &BTreeMap<String, Vec<FileRecord>>,
        category: &str,
    ) -> Vec<NavigationNode> {
        grouped
            .iter()
            .map(|(key, files)| self.group_node(key, files, category))
            .collect()
    }

    fn group_node(&self, key: &str, files: &[FileRecord], category: &str) -> NavigationNode {
        let mut direct: Vec<(Priority, NavigationNode)> = Vec::new();
        let mut sub_groups: BTreeMap<String, Vec<(Priority, NavigationNode)>> = BTreeMap::new();

        for file in files {
            let meta = self.resolver.resolve(&file.raw_frontmatter, &file.path);
            let page = page_node(file);
            match meta.sub_group {
                Some(sub) => sub_groups.entry(sub).or_default().push((meta.priority, page)),
                None => direct.push((meta.priority, page)),
            }
        }

        let mut children: Vec<NavigationNode> = sub_groups
            .into_iter()
            .map(|(sub_key, pages)| NavigationNode::SubGroup {
                title: capitalize(&sub_key),
                key: sub_key,
                collapsible: true,
                children: sort_ranked(pages),
            })
            .collect();
        children.extend(sort_ranked(direct));

        let title = capitalize(key);
        let item_count = files.len();
        NavigationNode::Group {
            key: key.to_owned(),
            ui: GroupUi::for_group(key, category, &title, item_count),
            title,
            collapsible: true,
            children,
        }
    }
}

fn page_node(file: &FileRecord) -> NavigationNode {
    NavigationNode::Page {
        title: file.title.clone(),
        path: file_path_to_url_path(&file.path),
        priority: file.priority,
        tags: file.tags.clone(),
    }
}

/// Sort by priority rank, tie-breaking alphabetically by title.
fn sort_ranked(mut pages: Vec<(Priority, NavigationNode)>) -> Vec<NavigationNode> {
    pages.sort_by(|(pa, a), (pb, b)| {
        pa.rank()
            .cmp(&pb.rank())
            .then_with(|| a.title().cmp(b.title()))
    });
    pages.into_iter().map(|(_, node)| node).collect()
}

/// Humanize a group key: capitalize its first letter.
fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use docpipe_meta::Frontmatter;
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(path: &str, yaml: &str) -> FileRecord {
        let frontmatter = Frontmatter::parse(yaml);
        let title = frontmatter
            .get("title")
            .and_then(|v| v.as_str())
            .unwrap_or(path)
            .to_owned();
        FileRecord {
            path: path.to_owned(),
            title,
            category: "build".to_owned(),
            priority: 999,
            tags: vec![],
            raw_frontmatter: frontmatter,
            body: String::new(),
        }
    }

    #[test]
    fn test_grouping_by_filename_prefix() {
        let grouper = Grouper::new();
        let files = vec![
            record("build/done_phase1.md", ""),
            record("build/done_phase2.md", ""),
            record("build/strategy_plan.md", ""),
        ];
        let grouped = grouper.group_files_by_metadata(&files, "build");
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["done"].len(), 2);
        assert_eq!(grouped["strategy"].len(), 1);
    }

    #[test]
    fn test_non_designated_category_passthrough() {
        let grouper = Grouper::new();
        let files = vec![
            record("dev/done_notes.md", ""),
            record("dev/setup.md", ""),
        ];
        let grouped = grouper.group_files_by_metadata(&files, "dev");
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["dev"].len(), 2);
    }

    #[test]
    fn test_explicit_group_beats_prefix() {
        let grouper = Grouper::new();
        let files = vec![record("build/done_plan.md", "group: strategy")];
        let grouped = grouper.group_files_by_metadata(&files, "build");
        assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["strategy"]);
    }

    #[test]
    fn test_sub_group_nesting() {
        // One phases sub-group node plus one direct page child
        let grouper = Grouper::new();
        let files = vec![
            record("build/done_phase1.md", "title: Phase 1\nsub_group: phases"),
            record("build/done_admin.md", "title: Admin Plan"),
        ];
        let grouped = grouper.group_files_by_metadata(&files, "build");
        let nodes = grouper.convert_groups_to_nav_structure(&grouped, "build");

        assert_eq!(nodes.len(), 1);
        let NavigationNode::Group { key, children, .. } = &nodes[0] else {
            panic!("expected group node");
        };
        assert_eq!(key, "done");
        assert_eq!(children.len(), 2);

        let NavigationNode::SubGroup { key, title, children: pages, .. } = &children[0] else {
            panic!("expected sub_group node first");
        };
        assert_eq!(key, "phases");
        assert_eq!(title, "Phases");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title(), "Phase 1");

        assert_eq!(children[1].title(), "Admin Plan");
    }

    #[test]
    fn test_priority_rank_then_title_sort() {
        let grouper = Grouper::new();
        let files = vec![
            record("build/done_b.md", "title: Beta\npriority: low"),
            record("build/done_a.md", "title: Alpha\npriority: medium"),
            record("build/done_c.md", "title: Zulu\npriority: high"),
            record("build/done_d.md", "title: Echo\npriority: high"),
        ];
        let grouped = grouper.group_files_by_metadata(&files, "build");
        let nodes = grouper.convert_groups_to_nav_structure(&grouped, "build");
        let NavigationNode::Group { children, .. } = &nodes[0] else {
            panic!("expected group node");
        };
        let titles: Vec<_> = children.iter().map(NavigationNode::title).collect();
        assert_eq!(titles, vec!["Echo", "Zulu", "Alpha", "Beta"]);
    }

    #[test]
    fn test_group_ui_attached_with_item_count() {
        let grouper = Grouper::new();
        let files = vec![
            record("build/done_a.md", ""),
            record("build/done_b.md", ""),
        ];
        let grouped = grouper.group_files_by_metadata(&files, "build");
        let nodes = grouper.convert_groups_to_nav_structure(&grouped, "build");
        let NavigationNode::Group { ui, title, .. } = &nodes[0] else {
            panic!("expected group node");
        };
        assert_eq!(title, "Done");
        assert_eq!(ui.item_count, 2);
        assert_eq!(ui.state_key, "build_group_done");
        assert_eq!(
            ui.aria_label,
            "Done group, collapsible section with 2 item(s)"
        );
    }

    #[test]
    fn test_empty_input_yields_empty_list() {
        let grouper = Grouper::new();
        let grouped = grouper.group_files_by_metadata(&[], "build");
        assert!(grouper
            .convert_groups_to_nav_structure(&grouped, "build")
            .is_empty());
    }

    #[test]
    fn test_custom_designated_category() {
        let grouper = Grouper::new().with_designated_category("ops");
        let files = vec![record("ops/done_runbook.md", "")];
        let grouped = grouper.group_files_by_metadata(&files, "ops");
        assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["done"]);
    }
}
