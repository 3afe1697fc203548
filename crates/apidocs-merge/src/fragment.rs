//! Path fragment loading and the ordered last-write-wins fold.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::merger::MergeError;

/// One parsed fragment: URL path templates mapped to operation objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// File the fragment was read from
    pub source: PathBuf,

    /// Top-level mapping of the fragment
    pub paths: Mapping,
}

/// A path key defined by more than one fragment.
///
/// The later fragment's definition is the one kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOverwrite {
    /// The path template, e.g. `/payments/{id}`
    pub path: String,

    /// Fragment whose definition was discarded
    pub previous: PathBuf,

    /// Fragment whose definition replaced it
    pub replacement: PathBuf,
}

/// Result of folding fragments together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathsMerge {
    /// Merged `paths` mapping, in first-definition order
    pub paths: Mapping,

    /// Every overwrite, in the order it happened
    pub overwrites: Vec<PathOverwrite>,
}

/// Read and parse a single fragment file.
///
/// An empty file is an empty fragment. Anything other than a mapping at the
/// top level is rejected.
pub fn load_fragment(path: &Path) -> Result<Fragment, MergeError> {
    let content = fs::read_to_string(path).map_err(|e| MergeError::Read {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let value: Value = serde_yaml::from_str(&content).map_err(|e| MergeError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let paths = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => Mapping::new(),
        _ => {
            return Err(MergeError::NotAMapping {
                path: path.display().to_string(),
            })
        }
    };

    Ok(Fragment {
        source: path.to_path_buf(),
        paths,
    })
}

/// Fold fragments into one mapping in iteration order.
///
/// A key seen again replaces the earlier value in place and is reported in
/// [`PathsMerge::overwrites`].
pub fn merge_paths<I>(fragments: I) -> PathsMerge
where
    I: IntoIterator<Item = Fragment>,
{
    let mut origins: HashMap<Value, PathBuf> = HashMap::new();

    fragments
        .into_iter()
        .fold(PathsMerge::default(), |mut merged, fragment| {
            for (key, operations) in fragment.paths {
                if let Some(previous) = origins.insert(key.clone(), fragment.source.clone()) {
                    merged.overwrites.push(PathOverwrite {
                        path: key_label(&key),
                        previous,
                        replacement: fragment.source.clone(),
                    });
                }
                merged.paths.insert(key, operations);
            }
            merged
        })
}

fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn fragment(source: &str, yaml: &str) -> Fragment {
        Fragment {
            source: PathBuf::from(source),
            paths: serde_yaml::from_str(yaml).unwrap(),
        }
    }

    #[test]
    fn unions_disjoint_fragments() {
        let merged = merge_paths(vec![
            fragment("a.yaml", "/payments:\n  post: {operationId: createPayment}\n"),
            fragment("b.yaml", "/wallets:\n  get: {operationId: listWallets}\n"),
            fragment("c.yaml", "/withdrawals:\n  get: {operationId: listWithdrawals}\n"),
        ]);

        let keys: Vec<&str> = merged.paths.keys().filter_map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["/payments", "/wallets", "/withdrawals"]);
        assert!(merged.overwrites.is_empty());
    }

    #[test]
    fn later_fragment_wins_on_collision() {
        let merged = merge_paths(vec![
            fragment("a.yaml", "/x:\n  get: {operationId: fromA}\n"),
            fragment("b.yaml", "/x:\n  get: {operationId: fromB}\n"),
            fragment("c.yaml", "/y:\n  get: {operationId: fromC}\n"),
        ]);

        let expected: Value = serde_yaml::from_str("get: {operationId: fromB}").unwrap();
        assert_eq!(merged.paths.get("/x"), Some(&expected));
        assert_eq!(merged.paths.len(), 2);
        assert_eq!(
            merged.overwrites,
            vec![PathOverwrite {
                path: "/x".to_string(),
                previous: PathBuf::from("a.yaml"),
                replacement: PathBuf::from("b.yaml"),
            }]
        );
    }

    #[test]
    fn overwrite_keeps_first_position() {
        let merged = merge_paths(vec![
            fragment("a.yaml", "/x: {}\n/y: {}\n"),
            fragment("b.yaml", "/x: {get: {}}\n"),
        ]);

        let keys: Vec<&str> = merged.paths.keys().filter_map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["/x", "/y"]);
    }

    #[test]
    fn repeated_overwrites_are_each_reported() {
        let merged = merge_paths(vec![
            fragment("a.yaml", "/x: {get: {}}\n"),
            fragment("b.yaml", "/x: {put: {}}\n"),
            fragment("c.yaml", "/x: {post: {}}\n"),
        ]);

        let replaced_by: Vec<&Path> = merged
            .overwrites
            .iter()
            .map(|o| o.replacement.as_path())
            .collect();
        assert_eq!(replaced_by, vec![Path::new("b.yaml"), Path::new("c.yaml")]);
        assert_eq!(merged.overwrites[1].previous, PathBuf::from("b.yaml"));
    }

    #[test]
    fn empty_file_is_empty_fragment() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("empty.yaml");
        fs::write(&path, "").unwrap();

        let fragment = load_fragment(&path).unwrap();

        assert!(fragment.paths.is_empty());
    }

    #[test]
    fn rejects_sequence_fragment() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("list.yaml");
        fs::write(&path, "- /payments\n- /wallets\n").unwrap();

        let result = load_fragment(&path);

        assert!(matches!(result, Err(MergeError::NotAMapping { .. })));
    }

    #[test]
    fn missing_fragment_names_the_path() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("missing.yaml");

        let err = load_fragment(&path).unwrap_err();

        assert!(matches!(err, MergeError::Read { .. }));
        assert!(err.to_string().contains("missing.yaml"));
    }
}
