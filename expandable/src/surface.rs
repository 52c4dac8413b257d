//! Runtime that rebuilds, lays out and renders a widget tree.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use paneldom::layout::layout;
use paneldom::render::render_to_buffer;
use paneldom::{AnimationState, Buffer, Element, Event, LayoutResult, Rect, hit_test};

use crate::context::{BuildContext, TapRegistry};
use crate::controller::{ExpandableController, ListenerId};
use crate::error::Result;
use crate::theme::ExpandableTheme;
use crate::widget::{Widget, WidgetRef, widget};

/// Owns a root widget and turns it into frames.
///
/// A rebuild is needed when a controller the last build depended on has
/// changed, when an animation is still running, or when the surface was
/// invalidated. Taps are routed to the handlers registered by the last
/// build.
///
/// # Example
///
/// ```ignore
/// let mut surface = Surface::new(panel);
/// let buf = surface.frame(80, 24, Instant::now())?;
/// surface.tap(78, 0);
/// ```
pub struct Surface {
    root: WidgetRef,
    theme: ExpandableTheme,
    animations: AnimationState,
    taps: TapRegistry,
    element: Option<Element>,
    layout: LayoutResult,
    dirty: Arc<AtomicBool>,
    subscriptions: Vec<(ExpandableController, ListenerId)>,
}

impl Surface {
    pub fn new(root: impl Widget + 'static) -> Self {
        Self {
            root: widget(root),
            theme: ExpandableTheme::default(),
            animations: AnimationState::new(),
            taps: TapRegistry::new(),
            element: None,
            layout: LayoutResult::new(),
            dirty: Arc::new(AtomicBool::new(true)),
            subscriptions: Vec::new(),
        }
    }

    pub fn with_theme(mut self, theme: ExpandableTheme) -> Self {
        self.theme = theme;
        self.invalidate();
        self
    }

    pub fn theme(&self) -> &ExpandableTheme {
        &self.theme
    }

    /// Make every animation jump straight to its end state.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.animations.set_reduced_motion(enabled);
        self.invalidate();
    }

    /// Force a rebuild on the next frame.
    pub fn invalidate(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Whether the next frame has to rebuild the element tree.
    ///
    /// Animations count until a build has observed their final value.
    pub fn needs_rebuild(&self) -> bool {
        self.element.is_none()
            || self.dirty.load(Ordering::SeqCst)
            || self.animations.has_pending()
    }

    /// Rebuild the element tree for time `now`.
    ///
    /// A failed build leaves the surface dirty so the next frame retries.
    fn build(&mut self, now: Instant) -> Result<()> {
        let started = Instant::now();
        self.dirty.store(false, Ordering::SeqCst);

        let mut cx = BuildContext::new(&self.theme, &mut self.animations, now);
        let built = self.root.build(&mut cx);
        let output = cx.finish();

        let element = match built {
            Ok(element) => element,
            Err(err) => {
                log::warn!("build failed: {err}");
                self.dirty.store(true, Ordering::SeqCst);
                return Err(err);
            }
        };

        self.animations.retain(&output.animation_keys);
        self.taps = output.taps;
        self.sync_subscriptions(output.dependencies);

        log::debug!(
            "build: dependencies={} taps={} took={:>6.2}µs",
            self.subscriptions.len(),
            self.taps.len(),
            started.elapsed().as_secs_f64() * 1_000_000.0,
        );

        self.element = Some(element);
        Ok(())
    }

    /// Rebuild if needed, then lay out and render a `width` x `height` frame.
    pub fn frame(&mut self, width: u16, height: u16, now: Instant) -> Result<Buffer> {
        if self.needs_rebuild() {
            self.build(now)?;
        }

        let mut buf = Buffer::new(width, height);
        if let Some(element) = &self.element {
            self.layout = layout(element, Rect::from_size(width, height));
            render_to_buffer(element, &self.layout, &mut buf);
        }
        Ok(buf)
    }

    /// Route a tap at `(x, y)` using the last frame's layout.
    ///
    /// Returns true if a handler ran.
    pub fn tap(&mut self, x: u16, y: u16) -> bool {
        let Some(element) = &self.element else {
            return false;
        };
        let Some(target) = hit_test(&self.layout, element, x, y) else {
            return false;
        };
        let Some(handler) = self.taps.get(&target) else {
            return false;
        };

        log::trace!("tap ({x}, {y}) -> {target}");
        handler();
        true
    }

    /// Feed an input event to the surface.
    ///
    /// Clicks are routed like [`tap`](Self::tap) and resizes force a
    /// rebuild. Returns true if the event was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match *event {
            Event::Click { x, y } => self.tap(x, y),
            Event::Resize { .. } => {
                self.invalidate();
                true
            }
            Event::Key { .. } => false,
        }
    }

    /// Element tree from the last build.
    pub fn element(&self) -> Option<&Element> {
        self.element.as_ref()
    }

    /// Layout from the last frame.
    pub fn layout(&self) -> &LayoutResult {
        &self.layout
    }

    fn sync_subscriptions(&mut self, dependencies: Vec<ExpandableController>) {
        self.subscriptions.retain(|(controller, listener)| {
            let still_needed = dependencies.iter().any(|dep| dep.ptr_eq(controller));
            if !still_needed {
                controller.unsubscribe(*listener);
            }
            still_needed
        });

        for dependency in dependencies {
            let known = self
                .subscriptions
                .iter()
                .any(|(controller, _)| controller.ptr_eq(&dependency));
            if known {
                continue;
            }
            let dirty = Arc::clone(&self.dirty);
            let listener = dependency.subscribe(move |_| dirty.store(true, Ordering::SeqCst));
            self.subscriptions.push((dependency, listener));
        }
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        for (controller, listener) in self.subscriptions.drain(..) {
            controller.unsubscribe(listener);
        }
    }
}
