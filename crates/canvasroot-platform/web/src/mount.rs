use crate::surface::{apply_css_size, host_logical_size, WebCanvasProvider, WebCanvasSurface};
use canvasroot_app_shell::{CanvasRoot, CanvasSettings, MountError, ShapeElement};
use canvasroot_core::{MutationCommand, NodeError, NodeId};
use canvasroot_graphics::{Point, Rect};
use canvasroot_render_common::SurfaceError;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};
use web_time::{Duration, Instant};

type SharedRoot = Rc<RefCell<CanvasRoot<WebCanvasSurface>>>;

/// Browser `setTimeout` slot driving [`CanvasRoot::run_due_timers`].
struct TimerSlot {
    handle: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl TimerSlot {
    fn cancel(&self, window: &Window) {
        if let Some(handle) = self.handle.take() {
            window.clear_timeout_with_handle(handle);
        }
    }

    /// Re-arms the browser timeout for the earliest pending deadline.
    fn arm(&self, window: &Window, root: &SharedRoot) {
        self.cancel(window);
        let Ok(root) = root.try_borrow() else {
            return;
        };
        let Some(deadline) = root.next_timer_deadline() else {
            return;
        };
        let delay = timeout_delay_ms(deadline.saturating_duration_since(Instant::now()));
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(handle) => self.handle.set(Some(handle)),
            Err(err) => log::warn!("setTimeout failed: {err:?}"),
        }
    }
}

/// Milliseconds for `setTimeout`, rounded up so the deadline has passed when it fires.
pub(crate) fn timeout_delay_ms(remaining: Duration) -> i32 {
    let millis = remaining.as_micros().div_ceil(1000);
    i32::try_from(millis).unwrap_or(i32::MAX)
}

/// A canvas mounted in the page with its resize and click listeners installed.
///
/// Click handlers run after the mount's borrow is released, so a handler may
/// call [`WebCanvasRoot::update`] directly. Dropping the value removes the
/// listeners and cancels the pending timeout.
pub struct WebCanvasRoot {
    root: SharedRoot,
    window: Window,
    canvas: HtmlCanvasElement,
    timer: Rc<TimerSlot>,
    resize_listener: Closure<dyn FnMut()>,
    click_listener: Closure<dyn FnMut(MouseEvent)>,
}

impl WebCanvasRoot {
    /// Mounts `elements` into `canvas`, sizing it to its host and wiring the
    /// window resize and canvas click events.
    pub fn mount(
        elements: &[ShapeElement],
        canvas: HtmlCanvasElement,
        settings: CanvasSettings,
    ) -> Result<Self, MountError> {
        let Some(window) = web_sys::window() else {
            return Err(SurfaceError::Platform("no window".into()).into());
        };
        let root = CanvasRoot::mount(elements, WebCanvasProvider::new(canvas.clone()), settings)?;
        apply_css_size(&canvas, root.viewport().logical_size());
        Self::install(root, window, canvas)
    }

    /// Mounts from a raw mutation batch.
    pub fn mount_commands(
        commands: impl IntoIterator<Item = MutationCommand>,
        canvas: HtmlCanvasElement,
        settings: CanvasSettings,
    ) -> Result<Self, MountError> {
        let Some(window) = web_sys::window() else {
            return Err(SurfaceError::Platform("no window".into()).into());
        };
        let root = CanvasRoot::mount_commands(
            commands,
            WebCanvasProvider::new(canvas.clone()),
            settings,
        )?;
        apply_css_size(&canvas, root.viewport().logical_size());
        Self::install(root, window, canvas)
    }

    fn install(
        root: CanvasRoot<WebCanvasSurface>,
        window: Window,
        canvas: HtmlCanvasElement,
    ) -> Result<Self, MountError> {
        let root: SharedRoot = Rc::new(RefCell::new(root));
        let timer = Rc::new(TimerSlot {
            handle: Cell::new(None),
            callback: RefCell::new(None),
        });

        let weak_root = Rc::downgrade(&root);
        let weak_timer = Rc::downgrade(&timer);
        let timer_window = window.clone();
        let on_timeout = Closure::wrap(Box::new(move || {
            let (Some(root), Some(timer)) = (weak_root.upgrade(), weak_timer.upgrade()) else {
                return;
            };
            timer.handle.set(None);
            if let Ok(mut mounted) = root.try_borrow_mut() {
                mounted.run_due_timers(Instant::now());
            }
            timer.arm(&timer_window, &root);
        }) as Box<dyn FnMut()>);
        *timer.callback.borrow_mut() = Some(on_timeout);

        let resize_listener = resize_listener(Rc::downgrade(&root), canvas.clone(), window.clone());
        let click_listener = click_listener(
            Rc::downgrade(&root),
            Rc::clone(&timer),
            canvas.clone(),
            window.clone(),
        );

        window
            .add_event_listener_with_callback("resize", resize_listener.as_ref().unchecked_ref())
            .map_err(|err| SurfaceError::Platform(format!("resize listener: {err:?}")))?;
        if let Err(err) = canvas
            .add_event_listener_with_callback("click", click_listener.as_ref().unchecked_ref())
        {
            let _ = window.remove_event_listener_with_callback(
                "resize",
                resize_listener.as_ref().unchecked_ref(),
            );
            return Err(SurfaceError::Platform(format!("click listener: {err:?}")).into());
        }

        Ok(Self {
            root,
            window,
            canvas,
            timer,
            resize_listener,
            click_listener,
        })
    }

    /// Reconciles against a new description.
    pub fn update(&self, elements: &[ShapeElement]) {
        match self.root.try_borrow_mut() {
            Ok(mut root) => root.update(elements),
            Err(_) => log::warn!("update skipped: canvas is busy dispatching"),
        }
    }

    /// Applies a batch produced by an external engine.
    pub fn apply_mutations(
        &self,
        commands: impl IntoIterator<Item = MutationCommand>,
    ) -> Result<Vec<NodeId>, NodeError> {
        match self.root.try_borrow_mut() {
            Ok(mut root) => root.apply_mutations(commands),
            Err(_) => Err(NodeError::Unsupported {
                operation: "reentrant apply_mutations",
            }),
        }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Shared access to the mounted root, e.g. for inspection in tests.
    pub fn root(&self) -> &SharedRoot {
        &self.root
    }

    /// Removes the listeners, cancels the pending timeout and unmounts.
    pub fn unmount(self) {
        let root = Rc::clone(&self.root);
        drop(self);
        match Rc::try_unwrap(root) {
            Ok(cell) => {
                cell.into_inner().unmount();
            }
            Err(_) => log::warn!("canvas root still shared at unmount; listeners removed"),
        }
    }
}

impl Drop for WebCanvasRoot {
    fn drop(&mut self) {
        if let Err(err) = self.window.remove_event_listener_with_callback(
            "resize",
            self.resize_listener.as_ref().unchecked_ref(),
        ) {
            log::warn!("failed to remove resize listener: {err:?}");
        }
        if let Err(err) = self.canvas.remove_event_listener_with_callback(
            "click",
            self.click_listener.as_ref().unchecked_ref(),
        ) {
            log::warn!("failed to remove click listener: {err:?}");
        }
        self.timer.cancel(&self.window);
        self.timer.callback.borrow_mut().take();
    }
}

fn resize_listener(
    root: Weak<RefCell<CanvasRoot<WebCanvasSurface>>>,
    canvas: HtmlCanvasElement,
    window: Window,
) -> Closure<dyn FnMut()> {
    Closure::wrap(Box::new(move || {
        let Some(root) = root.upgrade() else {
            return;
        };
        let Some(size) = host_logical_size() else {
            log::warn!("resize ignored: host size unavailable");
            return;
        };
        let Ok(mut root) = root.try_borrow_mut() else {
            return;
        };
        root.resize(size.width, size.height, window.device_pixel_ratio() as f32);
        apply_css_size(&canvas, root.viewport().logical_size());
    }) as Box<dyn FnMut()>)
}

fn click_listener(
    root: Weak<RefCell<CanvasRoot<WebCanvasSurface>>>,
    timer: Rc<TimerSlot>,
    canvas: HtmlCanvasElement,
    window: Window,
) -> Closure<dyn FnMut(MouseEvent)> {
    Closure::wrap(Box::new(move |event: MouseEvent| {
        let Some(root) = root.upgrade() else {
            return;
        };
        let bounds = canvas.get_bounding_client_rect();
        let client = Point::new(event.client_x() as f32, event.client_y() as f32);
        let pending = {
            let Ok(mut mounted) = root.try_borrow_mut() else {
                log::warn!("click dropped: canvas is busy");
                return;
            };
            mounted.set_screen_rect(Rect::new(
                bounds.x() as f32,
                bounds.y() as f32,
                bounds.width() as f32,
                bounds.height() as f32,
            ));
            let (_, pending) = mounted.begin_click_at(client, Instant::now());
            pending
        };
        timer.arm(&window, &root);
        if let Some(pending) = pending {
            pending.run();
        }
    }) as Box<dyn FnMut(MouseEvent)>)
}
