//! Navbar state. `NavbarState`, `ScrollObserver` and `Navbar::mount` are the
//! authoritative model of the scroll behaviour; the inline script in the page
//! shell mirrors it in the browser with the same `SCROLL_THRESHOLD_PX` and
//! removes its listener on `pagehide`.

use crate::ui::route::Route;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

/// Vertical scroll offset (px) beyond which the navbar switches to its
/// compact, filled style.
pub const SCROLL_THRESHOLD_PX: f64 = 30.0;

pub const BRAND: &str = "CredTech Project";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

pub const NAV_LINKS: &[NavLink] = &[NavLink {
    label: "Dashboard",
    route: Route::Dashboard,
}];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLinkView {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Resolves each navigation link against the current request path.
pub fn nav_links(current_path: &str) -> Vec<NavLinkView> {
    NAV_LINKS
        .iter()
        .map(|link| NavLinkView {
            label: link.label,
            href: link.route.path(),
            active: link.route.matches(current_path),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavbarState {
    pub is_scrolled: bool,
}

impl NavbarState {
    pub fn observe_scroll(&mut self, offset_y: f64) {
        self.is_scrolled = offset_y > SCROLL_THRESHOLD_PX;
    }
}

type Listener = Arc<dyn Fn(f64) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    by_id: BTreeMap<u64, Listener>,
}

/// Fans scroll offsets out to registered listeners.
#[derive(Clone, Default)]
pub struct ScrollObserver {
    inner: Arc<Mutex<Listeners>>,
}

impl ScrollObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(f64) + Send + Sync + 'static) -> ScrollSubscription {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.by_id.insert(id, Arc::new(listener));
        ScrollSubscription {
            id,
            observer: Arc::downgrade(&self.inner),
        }
    }

    pub fn emit(&self, offset_y: f64) {
        // Listeners run outside the lock so they may subscribe or drop.
        let listeners: Vec<Listener> = {
            let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.by_id.values().cloned().collect()
        };
        for listener in listeners {
            listener(offset_y);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .by_id
            .len()
    }
}

/// Deregisters its listener when dropped.
#[must_use = "dropping the subscription deregisters the listener"]
pub struct ScrollSubscription {
    id: u64,
    observer: Weak<Mutex<Listeners>>,
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.observer.upgrade() {
            inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .by_id
                .remove(&self.id);
        }
    }
}

/// A mounted navbar. Tracks the scroll flag until dropped.
pub struct Navbar {
    scrolled: Arc<AtomicBool>,
    _subscription: ScrollSubscription,
}

impl Navbar {
    pub fn mount(observer: &ScrollObserver) -> Self {
        let scrolled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&scrolled);
        let subscription = observer.subscribe(move |offset_y| {
            let mut state = NavbarState::default();
            state.observe_scroll(offset_y);
            flag.store(state.is_scrolled, Ordering::Relaxed);
        });
        Self {
            scrolled,
            _subscription: subscription,
        }
    }

    pub fn state(&self) -> NavbarState {
        NavbarState {
            is_scrolled: self.scrolled.load(Ordering::Relaxed),
        }
    }
}
