//! Shared expanded/collapsed state.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

/// Unique identifier for a controller's shared cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControllerId(usize);

impl ControllerId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for ControllerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__expandable_{}", self.0)
    }
}

/// Handle returned by [`ExpandableController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

type Listener = Arc<dyn Fn(bool) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next: usize,
    entries: Vec<(ListenerId, Listener)>,
}

/// Observable expanded/collapsed state.
///
/// Cloning is cheap and every clone refers to the same cell, so one
/// controller can drive any number of panels. Mutations notify every
/// current listener synchronously, after the new value is stored and
/// before the mutating call returns.
///
/// # Example
///
/// ```ignore
/// let controller = ExpandableController::new(false);
/// controller.subscribe(|expanded| log::info!("expanded: {expanded}"));
/// controller.toggle(); // logs "expanded: true"
/// ```
#[derive(Clone)]
pub struct ExpandableController {
    id: ControllerId,
    expanded: Arc<RwLock<bool>>,
    listeners: Arc<Mutex<Listeners>>,
}

impl ExpandableController {
    /// Create a controller with the given initial state.
    pub fn new(expanded: bool) -> Self {
        Self {
            id: ControllerId::new(),
            expanded: Arc::new(RwLock::new(expanded)),
            listeners: Arc::new(Mutex::new(Listeners::default())),
        }
    }

    /// Get the unique ID of the shared cell.
    pub fn id(&self) -> ControllerId {
        self.id
    }

    /// Whether both handles refer to the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.expanded, &other.expanded)
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    /// Check if the controller is expanded.
    pub fn expanded(&self) -> bool {
        *self
            .expanded
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Set the expanded state. Setting the current value is a no-op.
    pub fn set_expanded(&self, expanded: bool) {
        {
            let mut guard = self
                .expanded
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if *guard == expanded {
                return;
            }
            *guard = expanded;
        }
        self.changed(expanded);
    }

    /// Flip the expanded state.
    pub fn toggle(&self) {
        let expanded = {
            let mut guard = self
                .expanded
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = !*guard;
            *guard
        };
        self.changed(expanded);
    }

    pub fn expand(&self) {
        self.set_expanded(true);
    }

    pub fn collapse(&self) {
        self.set_expanded(false);
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a callback invoked with the new value after every mutation.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let id = ListenerId(listeners.next);
        listeners.next += 1;
        listeners.entries.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry, _)| *entry != id);
        listeners.entries.len() != before
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .map(|listeners| listeners.entries.len())
            .unwrap_or(0)
    }

    fn changed(&self, expanded: bool) {
        log::trace!("{} -> expanded={}", self.id, expanded);

        // Snapshot so listeners may (un)subscribe or mutate without deadlocking.
        let snapshot: Vec<Listener> = self
            .listeners
            .lock()
            .map(|listeners| listeners.entries.iter().map(|(_, l)| Arc::clone(l)).collect())
            .unwrap_or_default();
        for listener in snapshot {
            listener(expanded);
        }
    }
}

impl Default for ExpandableController {
    fn default() -> Self {
        Self::new(false)
    }
}

impl std::fmt::Debug for ExpandableController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpandableController")
            .field("id", &self.id)
            .field("expanded", &self.expanded())
            .field("listeners", &self.listener_count())
            .finish()
    }
}
