use crate::utils::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum Theme {
    Light,
    Dark,
    Colorful,
}

impl Theme {
    pub const ATTR_NAME: &'static str = "data-theme";

    pub(crate) const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::Colorful];

    pub(crate) const fn value(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "light",
            Dark => "dark",
            Colorful => "colorful",
        }
    }

    pub(crate) const fn label(self) -> &'static str {
        use Theme::*;
        match self {
            Light => "Light",
            Dark => "Dark",
            Colorful => "Colorful",
        }
    }

    /// Light is the stylesheet default and needs no attribute.
    pub(crate) const fn scheme(self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            other => Some(other.value()),
        }
    }

    pub(crate) fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|theme| theme.value() == value)
    }

    fn update_html(self) {
        use gloo::utils::document;
        let Some(html) = document().document_element() else {
            log::error!("no document element to theme");
            return;
        };
        if let Some(scheme) = self.scheme() {
            log::debug!("theme-scheme: {}", scheme);
            if let Err(err) = html.set_attribute(Self::ATTR_NAME, scheme) {
                log::error!("failed to set theme: {:?}", err);
            }
        } else {
            log::debug!("default theme");
            if let Err(err) = html.remove_attribute(Self::ATTR_NAME) {
                log::error!("failed to set theme: {:?}", err);
            }
        }
    }

    pub(crate) fn init() -> Self {
        let theme: Self = LocalOrDefault::local_or_default();
        theme.update_html();
        theme
    }

    pub(crate) fn apply(self) {
        self.local_save();
        self.update_html();
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Light
    }
}

impl StorageKey for Theme {
    const KEY: &'static str = "memoria:theme";
}
