use crate::*;

use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, FormData, Headers, HtmlButtonElement, HtmlElement, HtmlFormElement,
    NodeList, RequestInit, Response, ScrollBehavior, ScrollToOptions, Window,
};

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        crate::e!("{value:?}")
    }
}

/// The live page: window, document, content container and navigation menu
#[derive(Clone)]
pub struct Dom {
    window: Window,
    document: Document,
    main_content: HtmlElement,
    nav_menu: Option<Element>,
}

impl Dom {
    /// Looks up the elements of the page, only `#main-content` is required
    pub fn from_window() -> Result<Self> {
        let window = web_sys::window().ok_or(Error::MissingElement("window"))?;
        let document = window.document().ok_or(Error::MissingElement("document"))?;
        let main_content = document
            .get_element_by_id("main-content")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or(Error::MissingElement("#main-content"))?;
        let nav_menu = document.query_selector(".nav-menu")?;
        Ok(Self {
            window,
            document,
            main_content,
            nav_menu,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn set_content_style(&self, property: &str, value: &str) {
        if let Err(e) = self.main_content.style().set_property(property, value) {
            warn!("Could not set {property} on #main-content: {e:?}");
        }
    }
}

/// Elements of a `querySelectorAll` result, empty if the query failed
pub(crate) fn elements(list: std::result::Result<NodeList, JsValue>) -> Vec<Element> {
    let Ok(list) = list else {
        return vec![];
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Reads status and text of a `fetch` response
pub(crate) async fn read_response(response: JsValue) -> Result<Fetched> {
    let response: Response = response.dyn_into()?;
    let status = StatusCode::from_u16(response.status())
        .map_err(|e| Error::Network(format!("{e}")))?;
    let body = JsFuture::from(response.text()?).await?;
    Ok(Fetched::new(status, body.as_string().unwrap_or_default()))
}

#[async_trait(?Send)]
impl Fetch for Dom {
    async fn get(&self, url: &str) -> Result<Fetched> {
        let response = JsFuture::from(self.window.fetch_with_str(url))
            .await
            .map_err(|e| Error::Network(format!("{e:?}")))?;
        read_response(response).await
    }
}

#[async_trait(?Send)]
impl Scheduler for Dom {
    async fn sleep(&self, duration: Duration) {
        let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
        let window = &self.window;
        let timer = Promise::new(&mut |resolve, _| {
            let scheduled =
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis);
            // resolve right away rather than never
            if scheduled.is_err() {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        let _ = JsFuture::from(timer).await;
    }

    async fn next_frame(&self) {
        let window = &self.window;
        let frame = Promise::new(&mut |resolve, _| {
            if window.request_animation_frame(&resolve).is_err() {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        let _ = JsFuture::from(frame).await;
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

impl ContentView for Dom {
    fn set_html(&self, html: &str) {
        self.main_content.set_inner_html(html);
    }

    fn hide(&self) {
        self.set_content_style("opacity", "0");
        self.set_content_style("transform", "translateY(10px)");
    }

    fn reveal(&self) {
        self.set_content_style("opacity", "1");
        self.set_content_style("transform", "translateY(0)");
    }

    fn scroll_to_top(&self) {
        let options = ScrollToOptions::new();
        options.set_top(0.0);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

impl History for Dom {
    fn push(&self, page: &PageName) {
        let history = match self.window.history() {
            Ok(history) => history,
            Err(e) => {
                warn!("History is not available: {e:?}");
                return;
            }
        };
        let state = Object::new();
        let _ = Reflect::set(
            &state,
            &JsValue::from_str("page"),
            &JsValue::from_str(page.as_str()),
        );
        if let Err(e) = history.push_state_with_url(&state, "", Some(&page.hash())) {
            warn!("Could not push {page} to history: {e:?}");
        }
    }

    fn hash(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }
}

impl NavLinks for Dom {
    fn clear_active(&self) {
        let Some(menu) = &self.nav_menu else {
            return;
        };
        for link in elements(menu.query_selector_all(".nav-link")) {
            let _ = link.class_list().remove_1("active");
            let _ = link.remove_attribute("aria-current");
        }
    }

    fn mark_active(&self, page: &PageName) -> bool {
        let Some(menu) = &self.nav_menu else {
            return false;
        };
        let selector = format!(".nav-link[href='{}']", page.hash());
        let Ok(Some(link)) = menu.query_selector(&selector) else {
            return false;
        };
        let _ = link.class_list().add_1("active");
        let _ = link.set_attribute("aria-current", "page");
        true
    }
}

/// Toggle button `#mobile-menu-toggle` and the menu `#nav-menu` it opens
pub struct DomMenu {
    toggle: Element,
    menu: Element,
    body: Option<HtmlElement>,
}

impl DomMenu {
    /// `None` if either the toggle or the menu is missing from the page
    pub fn find(document: &Document) -> Option<Self> {
        Some(Self {
            toggle: document.get_element_by_id("mobile-menu-toggle")?,
            menu: document.get_element_by_id("nav-menu")?,
            body: document.body(),
        })
    }

    pub fn toggle(&self) -> &Element {
        &self.toggle
    }

    pub fn menu(&self) -> &Element {
        &self.menu
    }
}

impl MenuView for DomMenu {
    fn is_open(&self) -> bool {
        self.menu.class_list().contains("active")
    }

    fn set_open(&self, open: bool) {
        for el in [&self.toggle, &self.menu] {
            let classes = el.class_list();
            let _ = if open {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };
        }
        let expanded = if open { "true" } else { "false" };
        let _ = self.toggle.set_attribute("aria-expanded", expanded);
        if let Some(body) = &self.body {
            let overflow = if open { "hidden" } else { "" };
            let _ = body.style().set_property("overflow", overflow);
        }
    }
}

/// `#contact-form` together with its `#form-status` line
pub struct DomContactForm {
    window: Window,
    document: Document,
    form: HtmlFormElement,
}

impl DomContactForm {
    pub fn new(dom: &Dom, form: HtmlFormElement) -> Self {
        Self {
            window: dom.window.clone(),
            document: dom.document.clone(),
            form,
        }
    }

    fn status_line(&self) -> Option<Element> {
        self.document.get_element_by_id("form-status")
    }
}

#[async_trait(?Send)]
impl ContactFormView for DomContactForm {
    fn has_status(&self) -> bool {
        self.status_line().is_some()
    }

    fn set_sending(&self, sending: bool) {
        let Ok(Some(button)) = self.form.query_selector("button[type=\"submit\"]") else {
            return;
        };
        if let Some(button) = button.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(sending);
        }
        button.set_text_content(Some(if sending { SENDING_LABEL } else { SUBMIT_LABEL }));
    }

    fn show_status(&self, status: &FormStatus) {
        let Some(line) = self.status_line() else {
            return;
        };
        line.set_text_content(Some(&status.message));
        if let Some(line) = line.dyn_ref::<HtmlElement>() {
            let _ = line.style().set_property("color", status.color());
        }
    }

    fn reset(&self) {
        self.form.reset();
    }

    async fn send(&self) -> Result<Fetched> {
        let fields = FormData::new_with_form(&self.form)?;
        let headers = Headers::new()?;
        headers.set("Accept", "application/json")?;

        let init = RequestInit::new();
        init.set_method(&self.form.method());
        init.set_body(&fields);
        init.set_headers(&headers);

        let response = JsFuture::from(
            self.window
                .fetch_with_str_and_init(&self.form.action(), &init),
        )
        .await
        .map_err(|e| Error::Network(format!("{e:?}")))?;
        read_response(response).await
    }
}
