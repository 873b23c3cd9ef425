use crate::*;
use serde::Deserialize;
use std::fmt;

/// Name of a content fragment, `contacto` for `src/pages/contacto.html`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct PageName(pub(crate) String);

impl PageName {
    /// Accepts non-blank names without path or url separators, trimmed
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim();
        if name.is_empty() || name.contains(['/', '\\', '#', '?']) {
            return Err(Error::InvalidPage(raw.to_owned()));
        }
        Ok(Self(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hash fragment that points at this page, like `#inicio`
    pub fn hash(&self) -> String {
        format!("#{}", self.0)
    }
}

impl TryFrom<String> for PageName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl fmt::Display for PageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything after the first `#` of an href or location hash, if anything is there
pub fn extract_page_name(href: &str) -> Option<&str> {
    let (_, page) = href.split_once('#')?;
    (!page.is_empty()).then_some(page)
}
