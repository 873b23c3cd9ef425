use crate::*;

/// Toggle button and collapsible navigation of small screens
pub trait MenuView {
    fn is_open(&self) -> bool;
    /// Open: `active` class on toggle and menu, `aria-expanded="true"`, page scroll locked.
    /// Closed: the reverse.
    fn set_open(&self, open: bool);
}

pub struct MobileMenu<V> {
    view: V,
}

impl<V: MenuView> MobileMenu<V> {
    pub fn new(view: V) -> Self {
        Self { view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn is_open(&self) -> bool {
        self.view.is_open()
    }

    pub fn open(&self) {
        self.view.set_open(true);
    }

    pub fn close(&self) {
        self.view.set_open(false);
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close()
        } else {
            self.open()
        }
    }

    /// Click inside the menu, picking a link closes it
    pub fn on_menu_click(&self, target_is_nav_link: bool) {
        if target_is_nav_link {
            self.close();
        }
    }

    /// Click anywhere in the document, closes an open menu unless it landed on the menu or its toggle
    pub fn on_document_click(&self, inside_menu_or_toggle: bool) {
        if self.is_open() && !inside_menu_or_toggle {
            self.close();
        }
    }

    pub fn on_keydown(&self, key: &str) {
        if key == "Escape" && self.is_open() {
            debug!("Closing menu on Escape");
            self.close();
        }
    }
}
