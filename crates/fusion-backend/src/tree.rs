//! # Tree Store
//!
//! An in-memory JSON tree addressed by slash-separated key paths, with
//! realtime value listeners.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tree Store                                      │
//! │                                                                         │
//! │  set("restaurants/r1/name", "Spice Route")                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  watch::Sender<TreeSnapshot>   (revision + Arc<Value> root)            │
//! │       │  send_if_modified: no-op writes publish nothing                │
//! │       │                                                                 │
//! │       ├──────────────► TreeWatcher("restaurants")    fires             │
//! │       ├──────────────► TreeWatcher("restaurants/r1") fires             │
//! │       └──────────────► TreeWatcher("users")          stays quiet       │
//! │                                                                         │
//! │  from_json_file / write_json_file  ◄──►  catalog.json (offline copy)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tree Semantics
//! - Writing `null` deletes; deleting the last child of an object deletes
//!   the object too
//! - Writing below a scalar replaces the scalar with an object
//! - Arrays are addressable by index (`menu/1`); deleting an element
//!   leaves a `null` hole so other indices stay stable

use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::{BackendError, BackendResult};

// =============================================================================
// Paths
// =============================================================================

/// Splits a tree path into validated segments.
///
/// Leading and trailing `/` are ignored; `""` and `"/"` address the root.
pub fn split_path(path: &str) -> BackendResult<Vec<String>> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    trimmed
        .split('/')
        .map(|segment| {
            fusion_core::validation::validate_tree_key(segment)
                .map(|_| segment.to_string())
                .map_err(|e| BackendError::InvalidPath {
                    path: path.to_string(),
                    reason: e.to_string(),
                })
        })
        .collect()
}

/// Orders keys the way the catalog presents them: integer keys
/// numerically first, then everything else lexicographically.
fn key_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<i64>(), b.parse::<i64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Child entries of a node: object entries in key order, array entries
/// keyed by index. Scalars have no children.
pub(crate) fn children_of(node: &Value) -> Vec<(String, &Value)> {
    match node {
        Value::Object(map) => {
            let mut entries: Vec<_> = map.iter().map(|(k, v)| (k.clone(), v)).collect();
            entries.sort_by(|(a, _), (b, _)| key_order(a, b));
            entries
        }
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

/// Value at `segments`, treating `null` as absent.
fn lookup<'a>(root: &'a Value, segments: &[String]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(root, |node, segment| match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
        .filter(|value| !value.is_null())
}

fn is_empty_node(node: &Value) -> bool {
    match node {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.iter().all(Value::is_null),
        _ => false,
    }
}

fn insert_at(node: &mut Value, segments: &[String], value: Value) {
    let Some((first, rest)) = segments.split_first() else {
        *node = value;
        return;
    };

    if let Value::Array(items) = node {
        if let Some(child) = first.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
            insert_at(child, rest, value);
            return;
        }
    }

    if !node.is_object() {
        let converted: Map<String, Value> = match std::mem::take(node) {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .filter(|(_, v)| !v.is_null())
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            _ => Map::new(),
        };
        *node = Value::Object(converted);
    }

    if let Value::Object(map) = node {
        let child = map.entry(first.clone()).or_insert(Value::Null);
        insert_at(child, rest, value);
    }
}

/// Removes the node at `segments`, pruning parents left empty.
fn remove_at(node: &mut Value, segments: &[String]) -> bool {
    let Some((first, rest)) = segments.split_first() else {
        return false;
    };

    match node {
        Value::Object(map) => {
            let Some(child) = map.get_mut(first) else {
                return false;
            };
            let removed = if rest.is_empty() {
                !child.is_null()
            } else {
                remove_at(child, rest)
            };
            if rest.is_empty() || is_empty_node(child) {
                map.remove(first);
            }
            removed
        }
        Value::Array(items) => {
            let Some(child) = first.parse::<usize>().ok().and_then(|i| items.get_mut(i)) else {
                return false;
            };
            let removed = if rest.is_empty() {
                !child.is_null()
            } else {
                remove_at(child, rest)
            };
            if rest.is_empty() || is_empty_node(child) {
                *child = Value::Null;
            }
            removed
        }
        _ => false,
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// One published version of the whole tree.
#[derive(Debug, Clone)]
pub struct TreeSnapshot {
    /// Bumped on every effective write.
    pub revision: u64,
    pub root: Arc<Value>,
}

impl TreeSnapshot {
    fn new(root: Value) -> Self {
        TreeSnapshot {
            revision: 0,
            root: Arc::new(root),
        }
    }

    /// Value at `path` in this snapshot.
    pub fn get(&self, path: &str) -> BackendResult<Option<&Value>> {
        let segments = split_path(path)?;
        Ok(lookup(&self.root, &segments))
    }
}

// =============================================================================
// Tree Store
// =============================================================================

/// Realtime JSON tree.
///
/// Writes are serialized by the watch channel's lock; readers always see a
/// complete tree.
#[derive(Debug)]
pub struct TreeStore {
    tx: watch::Sender<TreeSnapshot>,
}

impl Default for TreeStore {
    fn default() -> Self {
        TreeStore::new()
    }
}

impl TreeStore {
    /// Creates an empty tree.
    pub fn new() -> Self {
        TreeStore::from_value(Value::Object(Map::new()))
    }

    /// Creates a tree from an existing JSON document.
    pub fn from_value(root: Value) -> Self {
        let (tx, _) = watch::channel(TreeSnapshot::new(root));
        TreeStore { tx }
    }

    /// Loads a tree from a JSON snapshot file.
    pub fn from_json_file(path: impl AsRef<Path>) -> BackendResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| BackendError::Snapshot(format!("{}: {}", path.display(), e)))?;
        let root: Value = serde_json::from_str(&contents)?;

        info!(path = %path.display(), "Loaded tree snapshot");
        Ok(TreeStore::from_value(root))
    }

    /// Loads a snapshot if the file exists, otherwise starts empty.
    pub fn open(path: impl AsRef<Path>) -> BackendResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            TreeStore::from_json_file(path)
        } else {
            debug!(path = %path.display(), "No tree snapshot yet, starting empty");
            Ok(TreeStore::new())
        }
    }

    /// Writes the current tree as pretty JSON.
    ///
    /// The file is written next to its destination and renamed into place.
    pub fn write_json_file(&self, path: impl AsRef<Path>) -> BackendResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let (revision, contents) = {
            let snapshot = self.tx.borrow();
            (snapshot.revision, serde_json::to_string_pretty(snapshot.root.as_ref())?)
        };

        let staging = path.with_extension("json.tmp");
        std::fs::write(&staging, contents)?;
        std::fs::rename(&staging, path)?;

        info!(path = %path.display(), revision, "Tree snapshot written");
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Current snapshot of the whole tree.
    pub fn snapshot(&self) -> TreeSnapshot {
        self.tx.borrow().clone()
    }

    pub fn revision(&self) -> u64 {
        self.tx.borrow().revision
    }

    /// Value at `path`, `None` when absent.
    pub fn get(&self, path: &str) -> BackendResult<Option<Value>> {
        let segments = split_path(path)?;
        Ok(lookup(&self.tx.borrow().root, &segments).cloned())
    }

    /// Children of the node at `path`.
    ///
    /// Object entries come back in key order, array entries keyed by index.
    pub fn children(&self, path: &str) -> BackendResult<Vec<(String, Value)>> {
        let segments = split_path(path)?;
        let snapshot = self.tx.borrow();
        Ok(lookup(&snapshot.root, &segments)
            .map(|node| {
                children_of(node)
                    .into_iter()
                    .map(|(key, value)| (key, value.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Writes `value` at `path`, creating intermediate objects.
    ///
    /// Writing `null` deletes. Returns true if the tree changed.
    pub fn set(&self, path: &str, value: Value) -> BackendResult<bool> {
        if value.is_null() {
            return self.remove(path);
        }

        let segments = split_path(path)?;
        let changed = self.tx.send_if_modified(|snapshot| {
            if lookup(&snapshot.root, &segments) == Some(&value) {
                return false;
            }
            insert_at(Arc::make_mut(&mut snapshot.root), &segments, value);
            snapshot.revision += 1;
            true
        });

        debug!(path, changed, "Tree set");
        Ok(changed)
    }

    /// Deletes the node at `path`. Returns true if something was removed.
    pub fn remove(&self, path: &str) -> BackendResult<bool> {
        let segments = split_path(path)?;
        let changed = self.tx.send_if_modified(|snapshot| {
            if lookup(&snapshot.root, &segments).is_none() {
                return false;
            }
            let root = Arc::make_mut(&mut snapshot.root);
            if segments.is_empty() {
                *root = Value::Object(Map::new());
            } else {
                remove_at(root, &segments);
            }
            snapshot.revision += 1;
            true
        });

        debug!(path, changed, "Tree remove");
        Ok(changed)
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Attaches a value listener to `path`.
    pub fn watch(&self, path: &str) -> BackendResult<TreeWatcher> {
        let segments = split_path(path)?;
        let rx = self.tx.subscribe();
        let last = lookup(&rx.borrow().root, &segments).cloned();

        Ok(TreeWatcher {
            path: path.to_string(),
            segments,
            rx,
            last,
        })
    }
}

// =============================================================================
// Tree Watcher
// =============================================================================

/// Value listener on one path of a [`TreeStore`].
#[derive(Debug)]
pub struct TreeWatcher {
    path: String,
    segments: Vec<String>,
    rx: watch::Receiver<TreeSnapshot>,
    last: Option<Value>,
}

impl TreeWatcher {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value at the watched path as of the last notification.
    pub fn current(&self) -> Option<&Value> {
        self.last.as_ref()
    }

    /// Waits until the watched subtree changes and returns its new value.
    ///
    /// Writes elsewhere in the tree are skipped. Fails with
    /// [`BackendError::StoreClosed`] once the store is dropped.
    pub async fn changed(&mut self) -> BackendResult<Option<Value>> {
        loop {
            self.rx
                .changed()
                .await
                .map_err(|_| BackendError::StoreClosed)?;

            let current = lookup(&self.rx.borrow_and_update().root, &self.segments).cloned();
            if current != self.last {
                self.last = current.clone();
                return Ok(current);
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_split_path() {
        assert!(split_path("").unwrap().is_empty());
        assert!(split_path("/").unwrap().is_empty());
        assert_eq!(split_path("/a/b/").unwrap(), vec!["a", "b"]);
        assert!(split_path("a//b").is_err());
        assert!(split_path("a/b.c").is_err());
        assert!(split_path("a/$b").is_err());
    }

    #[test]
    fn test_set_and_get_creates_parents() {
        let store = TreeStore::new();
        assert!(store.set("restaurants/r1/name", json!("Spice Route")).unwrap());

        assert_eq!(
            store.get("restaurants/r1").unwrap(),
            Some(json!({"name": "Spice Route"}))
        );
        assert_eq!(store.get("restaurants/r2").unwrap(), None);
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_identical_write_is_noop() {
        let store = TreeStore::new();
        store.set("a/b", json!(1)).unwrap();
        assert!(!store.set("a/b", json!(1)).unwrap());
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_write_below_scalar_replaces_it() {
        let store = TreeStore::new();
        store.set("a", json!("leaf")).unwrap();
        store.set("a/b", json!(true)).unwrap();
        assert_eq!(store.get("a").unwrap(), Some(json!({"b": true})));
    }

    #[test]
    fn test_null_deletes_and_prunes_empty_parents() {
        let store = TreeStore::new();
        store.set("a/b/c", json!(1)).unwrap();
        store.set("a/d", json!(2)).unwrap();

        assert!(store.set("a/b/c", Value::Null).unwrap());
        assert_eq!(store.get("a").unwrap(), Some(json!({"d": 2})));

        assert!(store.remove("a/d").unwrap());
        assert_eq!(store.get("a").unwrap(), None);
        assert!(!store.remove("a/d").unwrap());
    }

    #[test]
    fn test_arrays_addressable_by_index() {
        let store = TreeStore::from_value(json!({
            "menu": [null, {"name": "Pizza"}, {"name": "Burger"}]
        }));

        assert_eq!(store.get("menu/0").unwrap(), None);
        assert_eq!(store.get("menu/2/name").unwrap(), Some(json!("Burger")));

        store.set("menu/1/price", json!("10.0")).unwrap();
        assert_eq!(store.get("menu/1/price").unwrap(), Some(json!("10.0")));

        store.remove("menu/1").unwrap();
        assert_eq!(store.get("menu/2/name").unwrap(), Some(json!("Burger")));

        let keys: Vec<_> = store
            .children("menu")
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["0", "1", "2"]);
    }

    #[test]
    fn test_children_key_order() {
        let store = TreeStore::from_value(json!({
            "m": {"10": 1, "2": 2, "b": 3, "a": 4}
        }));
        let keys: Vec<_> = store
            .children("m")
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["2", "10", "a", "b"]);
        assert!(store.children("missing").unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("catalog.json");

        let store = TreeStore::new();
        store.set("restaurants/r1/name", json!("Spice Route")).unwrap();
        store.write_json_file(&path).unwrap();

        let reopened = TreeStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("restaurants/r1/name").unwrap(),
            Some(json!("Spice Route"))
        );

        let fresh = TreeStore::open(dir.path().join("absent.json")).unwrap();
        assert_eq!(fresh.get("").unwrap(), Some(json!({})));
        assert!(TreeStore::from_json_file(dir.path().join("absent.json")).is_err());
    }

    #[tokio::test]
    async fn test_watcher_fires_for_its_subtree_only() {
        let store = TreeStore::new();
        let mut watcher = store.watch("restaurants/r1").unwrap();
        assert_eq!(watcher.current(), None);

        store.set("users/u1", json!({"name": "x"})).unwrap();
        store.set("restaurants/r1/name", json!("Spice Route")).unwrap();

        let value = tokio::time::timeout(Duration::from_secs(1), watcher.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(value, Some(json!({"name": "Spice Route"})));

        store.set("restaurants/r2/name", json!("Other")).unwrap();
        let quiet = tokio::time::timeout(Duration::from_millis(50), watcher.changed()).await;
        assert!(quiet.is_err(), "write to a sibling must not notify");
    }

    #[tokio::test]
    async fn test_watcher_reports_deletion_and_close() {
        let store = TreeStore::new();
        store.set("a/b", json!(1)).unwrap();
        let mut watcher = store.watch("a").unwrap();

        store.remove("a/b").unwrap();
        assert_eq!(watcher.changed().await.unwrap(), None);

        drop(store);
        assert!(matches!(
            watcher.changed().await,
            Err(BackendError::StoreClosed)
        ));
    }
}
