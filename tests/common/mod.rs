#![allow(dead_code)]

use ptol::*;
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    future::Future,
};

pub static LINKS: [&str; 4] = ["#inicio", "#productos", "#nosotros", "#contacto"];

enum Reply {
    Page(StatusCode, String),
    Offline,
}

/// In-memory page: fragment server, content container, history and nav links
pub struct FakeSite {
    replies: RefCell<HashMap<String, Reply>>,
    pub requests: RefCell<Vec<String>>,
    pub html: RefCell<String>,
    pub visible: Cell<bool>,
    pub hides: Cell<usize>,
    pub scrolls: Cell<usize>,
    pub history: RefCell<Vec<String>>,
    pub location_hash: RefCell<String>,
    links: RefCell<Vec<(String, bool)>>,
    pub fetch_latency: Cell<Duration>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self {
            replies: RefCell::new(HashMap::new()),
            requests: RefCell::new(vec![]),
            html: RefCell::new(String::new()),
            visible: Cell::new(true),
            hides: Cell::new(0),
            scrolls: Cell::new(0),
            history: RefCell::new(vec![]),
            location_hash: RefCell::new(String::new()),
            links: RefCell::new(LINKS.iter().map(|href| (href.to_string(), false)).collect()),
            fetch_latency: Cell::new(Duration::ZERO),
        }
    }

    pub fn page(self, page: &str, body: &str) -> Self {
        self.reply(page, Reply::Page(StatusCode::OK, body.to_owned()))
    }

    pub fn failing(self, page: &str, status: StatusCode) -> Self {
        self.reply(page, Reply::Page(status, "error".to_owned()))
    }

    pub fn offline(self, page: &str) -> Self {
        self.reply(page, Reply::Offline)
    }

    pub fn at(self, hash: &str) -> Self {
        *self.location_hash.borrow_mut() = hash.to_owned();
        self
    }

    fn reply(self, page: &str, reply: Reply) -> Self {
        self.replies
            .borrow_mut()
            .insert(format!("src/pages/{page}.html"), reply);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn active_links(&self) -> Vec<String> {
        self.links
            .borrow()
            .iter()
            .filter(|(_, active)| *active)
            .map(|(href, _)| href.clone())
            .collect()
    }
}

#[async_trait(?Send)]
impl Fetch for FakeSite {
    async fn get(&self, url: &str) -> Result<Fetched> {
        self.requests.borrow_mut().push(url.to_owned());
        let latency = self.fetch_latency.get();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        match self.replies.borrow().get(url) {
            Some(Reply::Page(status, body)) => Ok(Fetched::new(*status, body.clone())),
            Some(Reply::Offline) => Err(Error::Network("connection refused".to_owned())),
            None => Ok(Fetched::new(StatusCode::NOT_FOUND, "Not Found")),
        }
    }
}

#[async_trait(?Send)]
impl Scheduler for FakeSite {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    async fn next_frame(&self) {
        tokio::task::yield_now().await;
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}

impl ContentView for FakeSite {
    fn set_html(&self, html: &str) {
        *self.html.borrow_mut() = html.to_owned();
    }

    fn hide(&self) {
        self.visible.set(false);
        self.hides.set(self.hides.get() + 1);
    }

    fn reveal(&self) {
        self.visible.set(true);
    }

    fn scroll_to_top(&self) {
        self.scrolls.set(self.scrolls.get() + 1);
    }
}

impl History for FakeSite {
    fn push(&self, page: &PageName) {
        self.history.borrow_mut().push(page.hash());
        *self.location_hash.borrow_mut() = page.hash();
    }

    fn hash(&self) -> String {
        self.location_hash.borrow().clone()
    }
}

impl NavLinks for FakeSite {
    fn clear_active(&self) {
        for (_, active) in self.links.borrow_mut().iter_mut() {
            *active = false;
        }
    }

    fn mark_active(&self, page: &PageName) -> bool {
        let hash = page.hash();
        let mut links = self.links.borrow_mut();
        let Some((_, active)) = links.iter_mut().find(|(href, _)| *href == hash) else {
            return false;
        };
        *active = true;
        true
    }
}

pub fn navigator(site: FakeSite) -> Navigator<FakeSite> {
    Navigator::new(SiteConfig::default(), site)
}

/// Runs `test` where `spawn_local` works, time is expected to be paused by the test attribute
pub async fn local<F: Future>(test: F) -> F::Output {
    tokio::task::LocalSet::new().run_until(test).await
}

/// Lets spawned work like the enter animation run
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}
