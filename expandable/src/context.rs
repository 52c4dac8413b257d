//! Per-build state threaded through every [`Widget::build`](crate::Widget::build).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use paneldom::{AnimationState, TransitionConfig};

use crate::controller::ExpandableController;
use crate::theme::ExpandableTheme;

/// Callback run when a clickable element is tapped.
pub type TapHandler = Arc<dyn Fn() + Send + Sync>;

// =============================================================================
// TapRegistry
// =============================================================================

/// Maps element ids to tap handlers.
///
/// Rebuilt from scratch on every build so handlers never outlive the
/// elements that registered them.
#[derive(Default, Clone)]
pub struct TapRegistry {
    handlers: HashMap<String, TapHandler>,
}

impl TapRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one for the same element.
    pub fn register(&mut self, element_id: &str, handler: TapHandler) {
        self.handlers.insert(element_id.to_string(), handler);
    }

    pub fn get(&self, element_id: &str) -> Option<TapHandler> {
        self.handlers.get(element_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for TapRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapRegistry")
            .field("elements", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// BuildContext
// =============================================================================

/// What a finished build leaves behind for the runtime.
#[derive(Debug, Default)]
pub struct BuildOutput {
    /// Tap handlers registered by the build.
    pub taps: TapRegistry,
    /// Controllers whose changes must trigger a rebuild.
    pub dependencies: Vec<ExpandableController>,
    /// Animation keys driven by the build; everything else can be dropped.
    pub animation_keys: HashSet<String>,
}

/// Explicit build environment.
///
/// Carries the provider scopes that make a controller visible to a subtree,
/// records which controllers the build depends on, collects tap handlers,
/// and hands out stable element ids derived from the widget's position.
pub struct BuildContext<'a> {
    now: Instant,
    theme: &'a ExpandableTheme,
    animations: &'a mut AnimationState,
    providers: Vec<ExpandableController>,
    path: Vec<String>,
    claimed: HashSet<String>,
    output: BuildOutput,
}

impl<'a> BuildContext<'a> {
    pub fn new(theme: &'a ExpandableTheme, animations: &'a mut AnimationState, now: Instant) -> Self {
        Self {
            now,
            theme,
            animations,
            providers: Vec::new(),
            path: vec!["root".to_string()],
            claimed: HashSet::new(),
            output: BuildOutput::default(),
        }
    }

    /// Timestamp of the frame being built.
    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn theme(&self) -> &ExpandableTheme {
        self.theme
    }

    // -------------------------------------------------------------------------
    // Provider scopes
    // -------------------------------------------------------------------------

    /// Publish `controller` to everything built inside `f`.
    pub fn provide<R>(
        &mut self,
        controller: ExpandableController,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.providers.push(controller);
        let result = f(self);
        self.providers.pop();
        result
    }

    /// The innermost published controller, if any.
    pub fn nearest_provider(&self) -> Option<&ExpandableController> {
        self.providers.last()
    }

    /// Rebuild whenever `controller` changes.
    pub fn depend_on(&mut self, controller: &ExpandableController) {
        if !self
            .output
            .dependencies
            .iter()
            .any(|known| known.ptr_eq(controller))
        {
            self.output.dependencies.push(controller.clone());
        }
    }

    pub fn dependencies(&self) -> &[ExpandableController] {
        &self.output.dependencies
    }

    // -------------------------------------------------------------------------
    // Element identity
    // -------------------------------------------------------------------------

    /// Build `f` one level deeper in the key path.
    pub fn keyed<R>(&mut self, segment: impl ToString, f: impl FnOnce(&mut Self) -> R) -> R {
        self.path.push(segment.to_string());
        let result = f(self);
        self.path.pop();
        result
    }

    /// Id for an element named `name` at the current key path.
    ///
    /// Identical across rebuilds as long as the widget stays in place, which
    /// is what lets animations and tap handlers follow it.
    pub fn element_id(&self, name: &str) -> String {
        format!("{}/{name}", self.path.join("/"))
    }

    /// Record that a plain element uses `id` in this build.
    ///
    /// Returns false if the id was already taken.
    pub(crate) fn claim_element_id(&mut self, id: &str) -> bool {
        self.claimed.insert(id.to_string())
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    pub fn on_tap(&mut self, element_id: &str, handler: TapHandler) {
        self.output.taps.register(element_id, handler);
    }

    // -------------------------------------------------------------------------
    // Animation
    // -------------------------------------------------------------------------

    /// Current value of the animation `key` heading toward `target`.
    pub fn animate(&mut self, key: &str, target: f32, config: TransitionConfig) -> f32 {
        self.output.animation_keys.insert(key.to_string());
        self.animations.drive(key, target, config, self.now)
    }

    pub fn is_animating(&self, key: &str) -> bool {
        self.animations.is_animating(key, self.now)
    }

    /// Finish the build and hand its bookkeeping to the runtime.
    pub fn finish(self) -> BuildOutput {
        self.output
    }
}
