use crate::*;
use std::cell::{Cell, RefCell};

/// Page currently on screen and whether a load is in flight
#[derive(Debug, Default)]
pub struct NavigationState {
    current_page: RefCell<Option<PageName>>,
    is_loading: Cell<bool>,
}

impl NavigationState {
    pub fn current_page(&self) -> Option<PageName> {
        self.current_page.borrow().clone()
    }

    pub fn is_current(&self, page: &PageName) -> bool {
        self.current_page.borrow().as_ref() == Some(page)
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading.get()
    }

    /// Takes the loading flag, `None` if another load holds it
    pub(crate) fn begin_loading(&self) -> Option<LoadingGuard<'_>> {
        if self.is_loading.replace(true) {
            return None;
        }
        Some(LoadingGuard(&self.is_loading))
    }

    pub(crate) fn set_current(&self, page: PageName) {
        *self.current_page.borrow_mut() = Some(page);
    }
}

/// Clears the loading flag when dropped, whichever way the load ends
pub(crate) struct LoadingGuard<'a>(&'a Cell<bool>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
