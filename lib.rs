//! Client side of the Productes Tradicionals Olcina López site: hash navigation that swaps
//! HTML fragments into the page, the collapsible mobile menu and the contact form.
//!
//! The logic is written against the traits in [`platform`](crate::Platform) so it runs the
//! same way in the browser (see the `browser` module on wasm32) and against fakes in tests.

mod config;
mod contact;
mod menu;
mod navigation;
mod page;
mod platform;
mod result;

pub use config::*;
pub use contact::*;
pub use menu::*;
pub use navigation::*;
pub use page::*;
pub use platform::*;
pub use result::*;

#[cfg(wasm)]
mod browser;
#[cfg(wasm)]
pub use browser::*;

pub use async_trait::async_trait;
pub use futures::future::LocalBoxFuture;
pub use http::StatusCode;
pub use std::{rc::Rc, time::Duration};
pub use tracing::{debug, error, info, trace, warn};
