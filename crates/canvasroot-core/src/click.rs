//! Click handler registry.
//!
//! Shape properties never own closures; they carry a [`ClickToken`] that
//! resolves to a handler stored here. Tokens survive property merges untouched,
//! so swapping a handler never needs a tree mutation.

use crate::NodeId;
use canvasroot_graphics::Point;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClickToken(u64);

impl ClickToken {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Delivered to the handler of the shape that won the hit test.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickEvent {
    pub node: NodeId,
    /// The `id` property of the hit shape, if it has one.
    pub id: Option<String>,
    /// Pointer position in logical coordinates.
    pub point: Point,
}

pub type ClickHandler = Rc<RefCell<dyn FnMut(&ClickEvent)>>;

/// A click already resolved to its handler, not yet delivered.
///
/// Holding one borrows nothing from the registry or the tree, so the caller
/// can release its own borrows first and let the handler re-enter the mount.
pub struct PendingClick {
    token: ClickToken,
    handler: ClickHandler,
    event: ClickEvent,
}

impl PendingClick {
    pub fn event(&self) -> &ClickEvent {
        &self.event
    }

    /// Runs the handler. Returns `false` if it is already running.
    pub fn run(self) -> bool {
        let Ok(mut callback) = self.handler.try_borrow_mut() else {
            log::warn!("click handler {:?} re-entered itself; skipping", self.token);
            return false;
        };
        (&mut *callback)(&self.event);
        true
    }
}

impl std::fmt::Debug for PendingClick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingClick")
            .field("token", &self.token)
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct ClickRegistry {
    next_token: u64,
    handlers: FxHashMap<ClickToken, Option<ClickHandler>>,
}

impl ClickRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: impl FnMut(&ClickEvent) + 'static) -> ClickToken {
        self.register_handler(Rc::new(RefCell::new(handler)))
    }

    pub fn register_handler(&mut self, handler: ClickHandler) -> ClickToken {
        let token = ClickToken(self.next_token);
        self.next_token += 1;
        self.handlers.insert(token, Some(handler));
        token
    }

    /// Swaps the handler behind an existing token. Returns `false` for tokens
    /// this registry never issued or already released.
    pub fn replace(&mut self, token: ClickToken, handler: impl FnMut(&ClickEvent) + 'static) -> bool {
        self.replace_handler(token, Rc::new(RefCell::new(handler)))
    }

    pub fn replace_handler(&mut self, token: ClickToken, handler: ClickHandler) -> bool {
        match self.handlers.get_mut(&token) {
            Some(slot) => {
                *slot = Some(handler);
                true
            }
            None => false,
        }
    }

    /// Keeps the token alive but makes clicks on it inert.
    pub fn clear_handler(&mut self, token: ClickToken) {
        if let Some(slot) = self.handlers.get_mut(&token) {
            *slot = None;
        }
    }

    pub fn release(&mut self, token: ClickToken) {
        self.handlers.remove(&token);
    }

    pub fn contains(&self, token: ClickToken) -> bool {
        self.handlers.contains_key(&token)
    }

    pub fn has_handler(&self, token: ClickToken) -> bool {
        matches!(self.handlers.get(&token), Some(Some(_)))
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn handler(&self, token: ClickToken) -> Option<ClickHandler> {
        self.handlers.get(&token).and_then(|slot| slot.clone())
    }

    /// Pairs the live handler behind `token` with `event` for later delivery.
    pub fn pending(&self, token: ClickToken, event: ClickEvent) -> Option<PendingClick> {
        let handler = self.handler(token)?;
        Some(PendingClick {
            token,
            handler,
            event,
        })
    }

    /// Invokes the handler behind `token`. Returns whether one ran.
    ///
    /// The handler is cloned out of the registry before it runs. A handler
    /// that re-enters itself is skipped.
    pub fn dispatch(&self, token: ClickToken, event: &ClickEvent) -> bool {
        self.pending(token, event.clone()).is_some_and(PendingClick::run)
    }
}
