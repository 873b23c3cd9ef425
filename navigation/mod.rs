use crate::*;
use std::cell::RefCell;

mod state;
pub use state::*;

/// What a call to [`Navigator::load_content`] ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Fragment fetched and shown
    Rendered,
    /// Error fragment shown, fallback to the default page scheduled unless it was the one failing
    Failed,
    /// Page name didn't pass validation
    Rejected,
    /// Another load was in flight, request dropped
    Busy,
    /// Requested page is already on screen
    Unchanged,
}

impl LoadOutcome {
    /// Whether the request was taken, so the highlighted link should follow it
    pub fn accepted(self) -> bool {
        matches!(
            self,
            LoadOutcome::Rendered | LoadOutcome::Failed | LoadOutcome::Unchanged
        )
    }
}

/// Markup shown in place of a page that could not be loaded
pub fn error_fragment(default_page: &PageName) -> String {
    format!(
        r#"<section class="load-error" style="padding: 5rem 3rem; text-align: center;">
    <h1>Error</h1>
    <p>No se pudo cargar el contenido. Por favor, intenta de nuevo.</p>
    <a class="btn btn-primary nav-link" href="{}">Volver al Inicio</a>
</section>"#,
        default_page.hash()
    )
}

type RenderHook = Rc<dyn Fn(&PageName)>;

/// Navigation session of the page: owns the [`NavigationState`] and swaps fragments into the
/// content container. Cloning is cheap and every clone shares the same session.
pub struct Navigator<P> {
    session: Rc<Session<P>>,
}

struct Session<P> {
    config: SiteConfig,
    platform: P,
    state: NavigationState,
    hooks: RefCell<Vec<RenderHook>>,
}

impl<P> Clone for Navigator<P> {
    fn clone(&self) -> Self {
        Self {
            session: Rc::clone(&self.session),
        }
    }
}

impl<P: Platform + 'static> Navigator<P> {
    pub fn new(config: SiteConfig, platform: P) -> Self {
        Self {
            session: Rc::new(Session {
                config,
                platform,
                state: NavigationState::default(),
                hooks: RefCell::new(vec![]),
            }),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.session.config
    }

    pub fn platform(&self) -> &P {
        &self.session.platform
    }

    pub fn state(&self) -> &NavigationState {
        &self.session.state
    }

    /// Registers a hook that runs after each fragment is inserted, with the page it belongs to.
    /// Hooks run once the load has finished, so they may navigate or register more hooks.
    pub fn on_rendered(&self, hook: impl Fn(&PageName) + 'static) {
        self.session.hooks.borrow_mut().push(Rc::new(hook));
    }

    /// Shows the page named by the location hash, or the default one
    pub async fn init(&self) -> LoadOutcome {
        let page = self.initial_page();
        self.navigate(page.as_str()).await
    }

    pub fn initial_page(&self) -> PageName {
        self.page_from_hash()
            .unwrap_or_else(|| self.config().default_page.clone())
    }

    /// Loads `page` and moves the active link to it unless the request was dropped
    pub async fn navigate(&self, page: &str) -> LoadOutcome {
        let outcome = self.load_content(page).await;
        if outcome.accepted() {
            self.set_active_link(page);
        }
        outcome
    }

    /// Handles activation of a navigation link with the given href.
    /// Returns `None` if the href doesn't point at a page.
    pub async fn handle_link_click(&self, href: Option<&str>) -> Option<LoadOutcome> {
        let page = extract_page_name(href?)?;
        PageName::parse(page).ok()?;
        Some(self.navigate(page).await)
    }

    /// Back/forward navigation: history state first, then the hash, then the default page
    pub async fn handle_popstate(&self, state_page: Option<&str>) -> LoadOutcome {
        let page = state_page
            .and_then(|page| PageName::parse(page).ok())
            .or_else(|| self.page_from_hash())
            .unwrap_or_else(|| self.config().default_page.clone());
        self.navigate(page.as_str()).await
    }

    /// Swaps the content container to the fragment of `page`.
    ///
    /// Invalid names are rejected and requests made while another load is in flight are
    /// dropped. Requesting the page that is already shown does nothing. On failure the error
    /// fragment is shown and, unless the default page itself failed, the default page is
    /// loaded after [`SiteConfig::fallback_delay`].
    pub async fn load_content(&self, page: &str) -> LoadOutcome {
        self.load(page, false).await
    }

    /// Clears the active marker from all navigation links and marks the one for `page`
    pub fn set_active_link(&self, page: &str) {
        let platform = self.platform();
        platform.clear_active();
        let Ok(page) = PageName::parse(page) else {
            return;
        };
        if !platform.mark_active(&page) {
            trace!("No navigation link for {page}");
        }
    }

    async fn load(&self, page: &str, reload: bool) -> LoadOutcome {
        let page = match PageName::parse(page) {
            Ok(page) => page,
            Err(e) => {
                error!("{e}");
                return LoadOutcome::Rejected;
            }
        };
        let Some(loading) = self.state().begin_loading() else {
            debug!("Load of {page} dropped, another one is in progress");
            return LoadOutcome::Busy;
        };
        if !reload && self.state().is_current(&page) {
            return LoadOutcome::Unchanged;
        }

        if let Err(e) = self.show(&page).await {
            error!("Error loading {page}: {e}");
            self.show_error(&page);
            return LoadOutcome::Failed;
        }
        info!("Rendered {page}");
        drop(loading);
        self.notify_rendered(&page);
        LoadOutcome::Rendered
    }

    async fn show(&self, page: &PageName) -> Result {
        let platform = self.platform();
        platform.hide();
        platform.sleep(self.config().transition_duration).await;

        let fetched = platform.get(&self.config().fragment_url(page)).await?;
        if !fetched.status.is_success() {
            return Err(Error::Status(fetched.status));
        }

        platform.set_html(&fetched.body);
        self.state().set_current(page.clone());
        platform.scroll_to_top();
        self.reveal_after_paint();
        platform.push(page);
        Ok(())
    }

    fn notify_rendered(&self, page: &PageName) {
        let hooks = self.session.hooks.borrow().clone();
        for hook in hooks {
            hook(page);
        }
    }

    fn page_from_hash(&self) -> Option<PageName> {
        extract_page_name(&self.platform().hash()).and_then(|page| PageName::parse(page).ok())
    }

    fn show_error(&self, page: &PageName) {
        let default_page = &self.config().default_page;
        self.platform().set_html(&error_fragment(default_page));
        self.reveal_after_paint();
        if page == default_page {
            return;
        }

        let navigator = self.clone();
        self.platform().spawn(Box::pin(async move {
            navigator.fall_back().await;
        }));
    }

    /// Single attempt at the default page after a failed load. The container holds the error
    /// fragment by then, so the default page is fetched even if it is the current one.
    async fn fall_back(&self) {
        self.platform().sleep(self.config().fallback_delay).await;
        let default_page = self.config().default_page.clone();
        if self.load(default_page.as_str(), true).await.accepted() {
            self.set_active_link(default_page.as_str());
        }
    }

    /// Applies the enter state two frames later so the exit state gets painted first
    fn reveal_after_paint(&self) {
        let navigator = self.clone();
        self.platform().spawn(Box::pin(async move {
            let platform = navigator.platform();
            platform.next_frame().await;
            platform.next_frame().await;
            platform.reveal();
        }));
    }
}
