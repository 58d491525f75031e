//! Visual surface contract: addressable region elements, fill rules and pointer listeners.
//!
//! The binder only talks to a surface through [`VisualSurface`]. Listener
//! registrations come back as [`Listener`] guards; dropping a guard removes the
//! handler, so a binding that goes out of scope cannot leave stale handlers behind.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use super::geometry::{Point, Rect};
use super::ramp::Rgba;

/// Pointer callback. Handlers run synchronously on the dispatching (UI) thread.
pub type PointerHandler = Rc<dyn Fn(&PointerEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PointerKind {
    Enter,
    Move,
    Leave,
    Click,
}

impl PointerKind {
    pub const ALL: [PointerKind; 4] = [
        PointerKind::Enter,
        PointerKind::Move,
        PointerKind::Leave,
        PointerKind::Click,
    ];
}

/// A pointer event as delivered by the host. `surface` is the bounding rectangle
/// of the whole surface at dispatch time, so positions survive resizes and scrolling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub client: Point,
    pub surface: Rect,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, client: Point, surface: Rect) -> Self {
        Self {
            kind,
            client,
            surface,
        }
    }

    pub fn position(&self) -> Point {
        self.surface.relative(self.client)
    }
}

pub trait VisualSurface {
    type Element: Clone + fmt::Debug;

    /// Sub-elements tagged with the lower-cased region key. Empty when the asset omits it.
    fn elements(&self, key: &str) -> Vec<Self::Element>;

    /// Install or replace the fill style rule for `key`.
    fn set_fill(&self, key: &str, fill: Rgba);

    fn clear_fill(&self, key: &str);

    fn listen(&self, element: &Self::Element, kind: PointerKind, handler: PointerHandler)
        -> Listener;
}

/// Scoped listener registration. Released on drop or via [`Listener::release`].
#[must_use = "dropping a Listener immediately removes the handler"]
pub struct Listener {
    release: Option<Box<dyn FnOnce()>>,
}

impl Listener {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn release(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("active", &self.release.is_some())
            .finish()
    }
}

struct Registration<E> {
    element: E,
    kind: PointerKind,
    handler: PointerHandler,
}

struct RegistryInner<E> {
    next_id: u64,
    entries: BTreeMap<u64, Registration<E>>,
}

/// Handler table shared by surface implementations.
pub struct ListenerRegistry<E> {
    inner: Rc<RefCell<RegistryInner<E>>>,
}

impl<E> Clone for ListenerRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E: PartialEq + 'static> Default for ListenerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: PartialEq + 'static> ListenerRegistry<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RegistryInner {
                next_id: 0,
                entries: BTreeMap::new(),
            })),
        }
    }

    pub fn register(&self, element: E, kind: PointerKind, handler: PointerHandler) -> Listener {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.insert(
                id,
                Registration {
                    element,
                    kind,
                    handler,
                },
            );
            id
        };

        let registry: Weak<RefCell<RegistryInner<E>>> = Rc::downgrade(&self.inner);
        Listener::new(move || {
            if let Some(inner) = registry.upgrade() {
                inner.borrow_mut().entries.remove(&id);
            }
        })
    }

    /// Invoke every handler registered for `element` and `event.kind`. Returns how many ran.
    pub fn dispatch(&self, element: &E, event: &PointerEvent) -> usize {
        // Snapshot first: handlers may register or release listeners.
        let handlers: Vec<PointerHandler> = self
            .inner
            .borrow()
            .entries
            .values()
            .filter(|entry| entry.kind == event.kind && &entry.element == element)
            .map(|entry| entry.handler.clone())
            .collect();

        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn counter() -> (Rc<Cell<usize>>, PointerHandler) {
        let hits = Rc::new(Cell::new(0));
        let handler_hits = hits.clone();
        (hits, Rc::new(move |_: &PointerEvent| handler_hits.set(handler_hits.get() + 1)))
    }

    fn enter() -> PointerEvent {
        PointerEvent::new(PointerKind::Enter, Point::new(5.0, 5.0), Rect::default())
    }

    #[test]
    fn dropping_guard_removes_handler() {
        let registry = ListenerRegistry::<u32>::new();
        let (hits, handler) = counter();

        let guard = registry.register(7, PointerKind::Enter, handler);
        assert_eq!(registry.dispatch(&7, &enter()), 1);
        drop(guard);

        assert_eq!(registry.dispatch(&7, &enter()), 0);
        assert_eq!(hits.get(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn dispatch_filters_by_element_and_kind() {
        let registry = ListenerRegistry::<u32>::new();
        let (hits, handler) = counter();
        let _enter = registry.register(1, PointerKind::Enter, handler.clone());
        let _leave = registry.register(1, PointerKind::Leave, handler.clone());
        let _other = registry.register(2, PointerKind::Enter, handler);

        assert_eq!(registry.dispatch(&1, &enter()), 1);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn guard_outliving_registry_is_harmless() {
        let registry = ListenerRegistry::<u32>::new();
        let (_hits, handler) = counter();
        let guard = registry.register(1, PointerKind::Click, handler);
        drop(registry);
        guard.release();
    }

    #[test]
    fn position_is_surface_relative() {
        let event = PointerEvent::new(
            PointerKind::Move,
            Point::new(130.0, 260.0),
            Rect::new(100.0, 200.0, 400.0, 300.0),
        );
        assert_eq!(event.position(), Point::new(30.0, 60.0));
    }
}
