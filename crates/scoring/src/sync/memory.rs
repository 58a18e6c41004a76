use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use serde_json::{Map, Value};
use tokio::sync::watch;

use super::{StorePath, Subscription, SyncError, SyncService};

/// In-process store holding the whole tree as one JSON value.
///
/// Every mutation is applied under a single lock, so a multi-path update is
/// observed by subscribers as one change.
pub struct MemorySync {
    state: Mutex<State>,
    online: AtomicBool,
}

struct State {
    root: Value,
    watchers: Vec<Watcher>,
}

struct Watcher {
    path: StorePath,
    tx: watch::Sender<Option<Value>>,
}

impl Default for MemorySync {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySync {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                root: Value::Object(Map::new()),
                watchers: Vec::new(),
            }),
            online: AtomicBool::new(true),
        }
    }

    /// Simulates losing (or regaining) the connection to the store.
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Copy of the full tree.
    pub fn dump(&self) -> Value {
        self.lock().root.clone()
    }

    pub fn subscriber_count(&self) -> usize {
        let mut state = self.lock();
        state.watchers.retain(|w| !w.tx.is_closed());
        state.watchers.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ensure_online(&self) -> Result<(), SyncError> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SyncError::Unavailable("memory store is offline".to_string()))
        }
    }

    fn apply(&self, changes: Vec<(StorePath, Value)>) -> Result<(), SyncError> {
        self.ensure_online()?;

        let mut state = self.lock();
        let mut touched = Vec::with_capacity(changes.len());
        for (path, value) in changes {
            tracing::trace!(%path, "applying change");
            write_at(&mut state.root, &path, value);
            touched.push(path);
        }
        state.notify(&touched);

        Ok(())
    }
}

impl State {
    fn notify(&mut self, touched: &[StorePath]) {
        self.watchers.retain(|w| !w.tx.is_closed());

        for watcher in &self.watchers {
            if !touched.iter().any(|p| p.overlaps(&watcher.path)) {
                continue;
            }
            let next = value_at(&self.root, &watcher.path).cloned();
            watcher.tx.send_if_modified(|current| {
                if *current != next {
                    *current = next;
                    true
                } else {
                    false
                }
            });
        }
    }
}

#[async_trait::async_trait]
impl SyncService for MemorySync {
    async fn set(&self, path: &StorePath, value: Value) -> Result<(), SyncError> {
        self.apply(vec![(path.clone(), value)])
    }

    async fn remove(&self, path: &StorePath) -> Result<(), SyncError> {
        self.apply(vec![(path.clone(), Value::Null)])
    }

    async fn update(&self, path: &StorePath, fields: Map<String, Value>) -> Result<(), SyncError> {
        let changes = fields
            .into_iter()
            .map(|(key, value)| Ok((path.join(&key)?, value)))
            .collect::<Result<Vec<_>, SyncError>>()?;

        self.apply(changes)
    }

    async fn subscribe(&self, path: &StorePath) -> Result<Subscription, SyncError> {
        self.ensure_online()?;

        let mut state = self.lock();
        let (tx, rx) = watch::channel(value_at(&state.root, path).cloned());
        state.watchers.push(Watcher {
            path: path.clone(),
            tx,
        });

        Ok(Subscription::new(path.clone(), rx))
    }
}

fn is_empty_node(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn value_at<'a>(root: &'a Value, path: &StorePath) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        current = current.as_object()?.get(segment)?;
    }

    if is_empty_node(current) {
        None
    } else {
        Some(current)
    }
}

fn write_at(root: &mut Value, path: &StorePath, value: Value) {
    if is_empty_node(&value) {
        if path.is_root() {
            *root = Value::Object(Map::new());
        } else {
            remove_at(root, path.segments());
        }
        return;
    }

    let mut current = root;
    for segment in path.segments() {
        if !current.is_object() {
            *current = Value::Object(Map::new());
        }
        let Value::Object(map) = current else {
            unreachable!("node was just replaced by an object");
        };
        current = map.entry(segment.clone()).or_insert(Value::Null);
    }
    *current = value;
}

/// Removes the node and prunes parents left empty.
fn remove_at(node: &mut Value, segments: &[String]) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };
    let Value::Object(map) = node else {
        return;
    };

    if rest.is_empty() {
        map.remove(head);
    } else if let Some(child) = map.get_mut(head) {
        remove_at(child, rest);
        if is_empty_node(child) {
            map.remove(head);
        }
    }
}
