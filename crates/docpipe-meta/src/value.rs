//! Type-checking predicates for raw frontmatter values.
//!
//! YAML allows any scalar or collection in any field, so each field gets
//! one validate-or-fallback predicate here instead of ad hoc type
//! inspection at call sites. A predicate returns `None` whenever the
//! value should fall through to inference.

use serde_yaml::Value;

/// Accept a string value that is non-empty after trimming.
///
/// Any other type (number, bool, list, map, null) is rejected, as is a
/// blank or whitespace-only string.
#[must_use]
pub(crate) fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    let s = value?.as_str()?;
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Accept a list of strings, or a single string promoted to one element.
///
/// Non-string and blank entries are dropped. Returns `None` if the value
/// is absent or of an unusable type; returns `Some(vec![])` for a valid
/// list whose entries were all dropped.
#[must_use]
pub(crate) fn string_list(value: Option<&Value>) -> Option<Vec<String>> {
    match value? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(Vec::new())
            } else {
                Some(vec![trimmed.to_owned()])
            }
        }
        Value::Sequence(items) => Some(
            items
                .iter()
                .filter_map(|item| {
                    let s = item.as_str()?.trim();
                    (!s.is_empty()).then(|| s.to_owned())
                })
                .collect(),
        ),
        _ => None,
    }
}
