use crate::container::Container;
use crate::element::ShapeElement;
use crate::reconciler::ElementReconciler;
use crate::settings::CanvasSettings;
use crate::timers::{DeferredTask, TimerId, TimerQueue};
use crate::viewport::Viewport;
use canvasroot_core::{
    apply_commands, log_instance_tree, MutationCommand, NodeError, NodeId, PendingClick,
};
use canvasroot_graphics::{Point, Rect, Size};
use canvasroot_render_common::{RasterSurface, SurfaceError, SurfaceProvider};
use web_time::Instant;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MountError {
    #[error("surface acquisition failed: {0}")]
    Surface(#[from] SurfaceError),
    #[error("initial mutation batch failed: {0}")]
    Node(#[from] NodeError),
}

/// A mounted surface: container, viewport, deferred timers and the
/// reconciler that turns element descriptions into mutations.
///
/// Clock-dependent operations take `now` explicitly so hosts and tests drive
/// time themselves.
pub struct CanvasRoot<S: RasterSurface> {
    container: Container<S>,
    reconciler: ElementReconciler,
    settings: CanvasSettings,
    timers: TimerQueue,
    indicator_timer: Option<TimerId>,
}

impl<S: RasterSurface> CanvasRoot<S> {
    /// Acquires the surface, builds `elements` into it and paints.
    ///
    /// Nothing is created when the surface cannot be acquired.
    pub fn mount<P>(
        elements: &[ShapeElement],
        provider: P,
        settings: CanvasSettings,
    ) -> Result<Self, MountError>
    where
        P: SurfaceProvider<Surface = S>,
    {
        let mut root = Self::mount_empty(provider, settings)?;
        root.update(elements);
        Ok(root)
    }

    /// Mounts from a raw mutation batch instead of element descriptions.
    pub fn mount_commands<P>(
        commands: impl IntoIterator<Item = MutationCommand>,
        provider: P,
        settings: CanvasSettings,
    ) -> Result<Self, MountError>
    where
        P: SurfaceProvider<Surface = S>,
    {
        let mut root = Self::mount_empty(provider, settings)?;
        root.apply_mutations(commands)?;
        Ok(root)
    }

    fn mount_empty<P>(provider: P, settings: CanvasSettings) -> Result<Self, MountError>
    where
        P: SurfaceProvider<Surface = S>,
    {
        let ratio = settings.effective_ratio(provider.device_pixel_ratio());
        let logical = provider
            .logical_size()
            .unwrap_or(Size::new(settings.initial_width, settings.initial_height));
        let surface = provider.acquire()?;
        let viewport = Viewport::new(logical.width, logical.height, ratio);
        let (width, height) = viewport.physical_size();
        log::info!(
            "mounted canvas {}x{} (ratio {ratio}, buffer {width}x{height})",
            logical.width,
            logical.height
        );
        let container = Container::new(surface, viewport, settings.paint_style());
        Ok(Self {
            container,
            reconciler: ElementReconciler::new(),
            settings,
            timers: TimerQueue::new(),
            indicator_timer: None,
        })
    }

    /// Reconciles against a new description and commits.
    pub fn update(&mut self, elements: &[ShapeElement]) {
        self.reconciler.reconcile(&mut self.container, elements);
        log_instance_tree(self.container.tree());
    }

    /// Applies a batch produced by an external engine.
    pub fn apply_mutations(
        &mut self,
        commands: impl IntoIterator<Item = MutationCommand>,
    ) -> Result<Vec<NodeId>, NodeError> {
        apply_commands(&mut self.container, commands)
    }

    /// Handles a host resize. Always repaints; returns whether the buffer changed.
    pub fn resize(&mut self, width: f32, height: f32, reported_ratio: f32) -> bool {
        let ratio = self.settings.effective_ratio(reported_ratio);
        let changed = self.container.resize(Size::new(width, height), ratio);
        if changed {
            let (buffer_width, buffer_height) = self.container.viewport().physical_size();
            log::debug!("canvas resized to {buffer_width}x{buffer_height} at ratio {ratio}");
        }
        changed
    }

    pub fn set_screen_rect(&mut self, rect: Rect) {
        self.container.viewport_mut().set_screen_rect(rect);
    }

    /// Maps a client-space click into logical space, then handles it like [`CanvasRoot::click`].
    pub fn click_at(&mut self, client: Point, now: Instant) -> Option<NodeId> {
        let logical = self.container.viewport().client_to_logical(client);
        self.click(logical, now)
    }

    /// Draws the click indicator if enabled, then dispatches to the hit shape.
    pub fn click(&mut self, logical: Point, now: Instant) -> Option<NodeId> {
        let (hit, pending) = self.begin_click(logical, now);
        if let Some(pending) = pending {
            pending.run();
        }
        hit
    }

    /// Client-space variant of [`CanvasRoot::begin_click`].
    pub fn begin_click_at(
        &mut self,
        client: Point,
        now: Instant,
    ) -> (Option<NodeId>, Option<PendingClick>) {
        let logical = self.container.viewport().client_to_logical(client);
        self.begin_click(logical, now)
    }

    /// Everything [`CanvasRoot::click`] does except running the handler.
    ///
    /// Hosts that share the root behind a `RefCell` run the returned handler
    /// after releasing their borrow, so it may call back into the root.
    pub fn begin_click(
        &mut self,
        logical: Point,
        now: Instant,
    ) -> (Option<NodeId>, Option<PendingClick>) {
        let indicator = &self.settings.click_indicator;
        if indicator.enabled {
            self.container.draw_click_indicator(logical, indicator);
            if let Some(previous) = self.indicator_timer.take() {
                self.timers.cancel(previous);
            }
            self.indicator_timer = Some(self.timers.schedule(
                DeferredTask::ClearClickIndicator,
                now + indicator.clear_after,
            ));
        }
        let (hit, pending) = match self.container.resolve_click(logical) {
            Some((node, pending)) => (Some(node), pending),
            None => (None, None),
        };
        log::trace!("click at ({:.1}, {:.1}) hit {hit:?}", logical.x, logical.y);
        (hit, pending)
    }

    /// Runs every deferred task due at `now`; returns how many ran.
    pub fn run_due_timers(&mut self, now: Instant) -> usize {
        let due = self.timers.take_due(now);
        for (id, task) in &due {
            match task {
                DeferredTask::ClearClickIndicator => {
                    if self.indicator_timer == Some(*id) {
                        self.indicator_timer = None;
                    }
                    self.container.repaint();
                }
            }
        }
        due.len()
    }

    pub fn next_timer_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Forces a full repaint outside any commit.
    pub fn repaint(&mut self) {
        self.container.repaint();
    }

    /// Tears the mount down, cancelling pending timers, and hands the surface back.
    pub fn unmount(mut self) -> S {
        let cancelled = self.timers.cancel_all();
        self.reconciler.release(self.container.clicks_mut());
        log::info!("unmounted canvas ({cancelled} pending timers cancelled)");
        self.container.into_surface()
    }

    pub fn container(&self) -> &Container<S> {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut Container<S> {
        &mut self.container
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn viewport(&self) -> &Viewport {
        self.container.viewport()
    }

    pub fn surface(&self) -> &S {
        self.container.surface()
    }

    pub fn root_nodes(&self) -> Vec<NodeId> {
        self.reconciler.root_nodes()
    }
}

#[cfg(test)]
#[path = "tests/root_tests.rs"]
mod tests;
