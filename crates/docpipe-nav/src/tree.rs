//! Navigation tree assembly, breadcrumbs, filtering, and search.

use docpipe_scan::{FileRecord, ScanResult, humanize};
use serde::Serialize;

use crate::node::NavigationNode;
use crate::path::file_path_to_url_path;

/// The assembled navigation model.
#[derive(Clone, Debug, Default, Serialize)]
pub struct NavigationTree {
    /// Category nodes, sorted by display title.
    pub categories: Vec<NavigationNode>,
    /// Page nodes for files at the content root, sorted.
    pub root_files: Vec<NavigationNode>,
    /// Count of all reachable page leaves.
    pub total_files: usize,
}

/// One breadcrumb entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    /// Display title.
    pub title: String,
    /// Leading-slash URL path.
    pub path: String,
}

/// Build a navigation tree from a scan result.
///
/// Root files become `root_files`; every category becomes a `category`
/// node with its files as sorted page children. Categories sort by
/// title (ordinal), files by numeric priority then title, stable.
#[must_use]
pub fn build_navigation(scan: &ScanResult) -> NavigationTree {
    let mut categories: Vec<NavigationNode> = scan
        .categories
        .iter()
        .map(|(key, entry)| {
            let mut files = entry.files.clone();
            sort_by_priority(&mut files);
            NavigationNode::Category {
                key: key.clone(),
                title: entry.title.clone(),
                path: entry.path.clone(),
                children: files.iter().map(page_node).collect(),
            }
        })
        .collect();
    categories.sort_by(|a, b| a.title().cmp(b.title()));

    let mut root = scan.files.clone();
    sort_by_priority(&mut root);
    let root_files: Vec<NavigationNode> = root.iter().map(page_node).collect();

    let total_files = categories
        .iter()
        .map(NavigationNode::page_count)
        .sum::<usize>()
        + root_files.len();

    NavigationTree {
        categories,
        root_files,
        total_files,
    }
}

/// Sort records by numeric priority ascending, then title.
///
/// The sort is stable: records tying on both keys keep their relative
/// order.
pub fn sort_by_priority(files: &mut [FileRecord]) {
    files.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.title.cmp(&b.title))
    });
}

/// Derive breadcrumbs for a record from its path.
///
/// Slash-delimited prefixes become intermediate crumbs (humanized
/// directory titles), the record's own title closes the trail, and a
/// synthetic Home entry opens it. Length is always path depth + 1.
#[must_use]
pub fn build_breadcrumbs(record: &FileRecord) -> Vec<Breadcrumb> {
    let mut crumbs = vec![Breadcrumb {
        title: "Home".to_owned(),
        path: "/".to_owned(),
    }];

    let segments: Vec<&str> = record.path.split('/').filter(|s| !s.is_empty()).collect();
    let mut prefix = String::new();
    for (i, segment) in segments.iter().enumerate() {
        prefix.push('/');
        if i + 1 == segments.len() {
            crumbs.push(Breadcrumb {
                title: record.title.clone(),
                path: file_path_to_url_path(&record.path),
            });
        } else {
            prefix.push_str(segment);
            crumbs.push(Breadcrumb {
                title: humanize(segment),
                path: prefix.clone(),
            });
        }
    }

    crumbs
}

/// Find the category node with the given key.
#[must_use]
pub fn filter_by_category<'a>(
    nav: &'a NavigationTree,
    key: &str,
) -> Option<&'a NavigationNode> {
    nav.categories.iter().find(|node| {
        matches!(node, NavigationNode::Category { key: k, .. } if k == key)
    })
}

/// Search all pages, root files included, by title and tags.
///
/// Case-insensitive substring match; results come back in tree order.
#[must_use]
pub fn search_navigation<'a>(nav: &'a NavigationTree, query: &str) -> Vec<&'a NavigationNode> {
    let query = query.to_lowercase();
    let mut hits = Vec::new();
    for node in &nav.categories {
        collect_matches(node, &query, &mut hits);
    }
    for node in &nav.root_files {
        collect_matches(node, &query, &mut hits);
    }
    hits
}

fn collect_matches<'a>(node: &'a NavigationNode, query: &str, hits: &mut Vec<&'a NavigationNode>) {
    match node {
        NavigationNode::Page { title, tags, .. } => {
            let matched = title.to_lowercase().contains(query)
                || tags.iter().any(|t| t.to_lowercase().contains(query));
            if matched {
                hits.push(node);
            }
        }
        NavigationNode::Category { children, .. }
        | NavigationNode::Group { children, .. }
        | NavigationNode::SubGroup { children, .. } => {
            for child in children {
                collect_matches(child, query, hits);
            }
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
