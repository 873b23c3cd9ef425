use crate::*;

mod dom;
pub use dom::*;

pub use console_error_panic_hook::set_once as set_panic_hook;
use js_sys::{Function, Reflect};
pub use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::{prelude::Closure, JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Event, EventTarget, HtmlElement, HtmlFormElement, KeyboardEvent, Node,
    PopStateEvent, Window,
};

/// Module entry point, mounts the site once the document is parsed
#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    set_panic_hook();
    init_tracing();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(|| {
            if let Err(e) = mount() {
                error!("{e}");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else if let Err(e) = mount() {
        error!("{e}");
    }
    Ok(())
}

/// Wires menu, navigation and contact form to the page and shows the initial page
pub fn mount() -> Result<Navigator<Dom>> {
    let dom = Dom::from_window()?;
    let window = dom.window().clone();
    let document = dom.document().clone();

    wire_menu(&document)?;

    let navigator = Navigator::new(site_config(&document), dom);
    wire_navigation(&navigator)?;
    wire_contact_form(&navigator);

    let first = navigator.clone();
    spawn_local(async move {
        first.init().await;
    });

    relax_will_change(&window)?;

    let hostname = window.location().hostname().unwrap_or_default();
    if hostname == "localhost" || hostname == "127.0.0.1" {
        info!("✓ Aplicación inicializada correctamente");
    }
    Ok(navigator)
}

fn init_tracing() {
    #[cfg(feature = "traces")]
    {
        use tracing_subscriber::fmt::{
            format::{FmtSpan, Pretty},
            time::UtcTime,
        };
        use tracing_subscriber::prelude::*;
        use tracing_web::{performance_layer, MakeWebConsoleWriter};

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false) // Only partially supported across browsers
            .with_timer(UtcTime::rfc_3339())
            .with_writer(MakeWebConsoleWriter::new().with_pretty_level())
            .with_level(false)
            .with_span_events(FmtSpan::ACTIVE);
        let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

        let _ = tracing_subscriber::registry()
            .with(fmt_layer)
            .with(perf_layer)
            .try_init();
    }
}

/// Settings from an inline `<script type="application/toml" id="site-config">`, if the page has one
fn site_config(document: &Document) -> SiteConfig {
    let Some(source) = document
        .get_element_by_id("site-config")
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };
    SiteConfig::from_toml(&source).unwrap_or_else(|e| {
        warn!("Ignoring #site-config: {e}");
        SiteConfig::default()
    })
}

fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn event_element(event: &Event) -> Option<web_sys::Element> {
    event.target()?.dyn_into().ok()
}

fn wire_navigation(navigator: &Navigator<Dom>) -> Result {
    let dom = navigator.platform();
    let body = dom.document().body().ok_or(Error::MissingElement("body"))?;

    let on_click = navigator.clone();
    listen(&body, "click", move |event| {
        let Some(link) = event_element(&event).and_then(|el| el.closest(".nav-link").ok().flatten())
        else {
            return;
        };
        event.prevent_default();
        let href = link.get_attribute("href");
        let navigator = on_click.clone();
        spawn_local(async move {
            navigator.handle_link_click(href.as_deref()).await;
        });
    })?;

    let on_popstate = navigator.clone();
    listen(dom.window(), "popstate", move |event| {
        let page = event
            .dyn_ref::<PopStateEvent>()
            .and_then(|event| Reflect::get(&event.state(), &JsValue::from_str("page")).ok())
            .and_then(|page| page.as_string());
        let navigator = on_popstate.clone();
        spawn_local(async move {
            navigator.handle_popstate(page.as_deref()).await;
        });
    })
}

fn wire_menu(document: &Document) -> Result {
    let Some(view) = DomMenu::find(document) else {
        debug!("Mobile menu elements not found, menu stays static");
        return Ok(());
    };
    let toggle = view.toggle().clone();
    let nav = view.menu().clone();
    let menu = Rc::new(MobileMenu::new(view));

    let on_toggle = menu.clone();
    listen(&toggle, "click", move |_| on_toggle.toggle())?;

    let on_nav = menu.clone();
    listen(&nav, "click", move |event| {
        let is_link = event_element(&event).is_some_and(|el| el.class_list().contains("nav-link"));
        on_nav.on_menu_click(is_link);
    })?;

    let on_document = menu.clone();
    listen(document, "click", move |event| {
        let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
        let inside = toggle.contains(target.as_ref()) || nav.contains(target.as_ref());
        on_document.on_document_click(inside);
    })?;

    listen(document, "keydown", move |event| {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            menu.on_keydown(&event.key());
        }
    })
}

/// Attaches the submit handler every time a fragment with `#contact-form` is rendered
fn wire_contact_form(navigator: &Navigator<Dom>) {
    let dom = navigator.platform().clone();
    navigator.on_rendered(move |page| {
        let Some(form) = dom
            .document()
            .get_element_by_id("contact-form")
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
        else {
            return;
        };
        debug!("Contact form rendered with {page}");
        let view = Rc::new(DomContactForm::new(&dom, form.clone()));
        let wired = listen(&form, "submit", move |event| {
            event.prevent_default();
            let view = view.clone();
            spawn_local(async move {
                submit_contact_form(view.as_ref()).await;
            });
        });
        if let Err(e) = wired {
            warn!("Could not wire the contact form: {e}");
        }
    });
}

/// Drops inline `will-change` hints a second after the page finished loading
fn relax_will_change(window: &Window) -> Result {
    let timer_window = window.clone();
    let on_load = Closure::once_into_js(move || {
        let Some(document) = timer_window.document() else {
            return;
        };
        let cleanup = Closure::once_into_js(move || {
            for el in elements(document.query_selector_all("[style*=\"will-change\"]")) {
                if let Some(el) = el.dyn_ref::<HtmlElement>() {
                    let _ = el.style().set_property("will-change", "auto");
                }
            }
        });
        let _ = timer_window.set_timeout_with_callback_and_timeout_and_arguments_0(
            cleanup.unchecked_ref::<Function>(),
            1000,
        );
    });
    window.add_event_listener_with_callback("load", on_load.unchecked_ref())?;
    Ok(())
}
