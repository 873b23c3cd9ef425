//! Seams between the site logic and the browser.
//!
//! Everything here is single-threaded: futures are `!Send` and implementations are expected to
//! live on the page's event loop.

use crate::*;

/// Status and text body of a finished request
#[derive(Debug, Clone)]
pub struct Fetched {
    pub status: StatusCode,
    pub body: String,
}

impl Fetched {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Plain GET of static assets
#[async_trait(?Send)]
pub trait Fetch {
    /// Resolves with whatever status the server answered, fails only when no response arrived
    async fn get(&self, url: &str) -> Result<Fetched>;
}

/// Timers, animation frames and background tasks of the event loop
#[async_trait(?Send)]
pub trait Scheduler {
    async fn sleep(&self, duration: Duration);
    /// Resolves on the next animation frame callback
    async fn next_frame(&self);
    /// Runs `task` detached on the same thread
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

/// The element whose contents are swapped on every navigation
pub trait ContentView {
    fn set_html(&self, html: &str);
    /// Exit state: transparent and slightly shifted down
    fn hide(&self);
    /// Enter state: opaque and in place
    fn reveal(&self);
    fn scroll_to_top(&self);
}

/// Browser history and the location hash
pub trait History {
    /// Adds an entry with state `{ page }` and url `#page` without reloading
    fn push(&self, page: &PageName);
    /// Current location hash including the leading `#`, empty if there is none
    fn hash(&self) -> String;
}

/// Links tagged as navigation links
pub trait NavLinks {
    /// Removes the active marker from every link
    fn clear_active(&self);
    /// Marks the link pointing at `#page`, returns false if there is none
    fn mark_active(&self, page: &PageName) -> bool;
}

/// Everything the [`Navigator`] needs from its environment
pub trait Platform: Fetch + Scheduler + ContentView + History + NavLinks {}

impl<T: Fetch + Scheduler + ContentView + History + NavLinks> Platform for T {}
