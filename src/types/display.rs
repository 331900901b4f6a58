use std::{fmt, str::FromStr};

/// Returned for an unknown `display` value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown display value: {0}")]
pub struct InvalidDisplay(pub String);

/// Value that specifies how the Authorization Server displays the
/// authentication and consent user interface pages to the End-User.
///
/// Defined in [OpenID Connect Core 1.0](https://openid.net/specs/openid-connect-core-1_0.html#AuthRequest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Display {
    /// Full User Agent page view. This is the default display mode.
    #[default]
    Page,
    /// Popup User Agent window
    Popup,
    /// Device that leverages a touch interface
    Touch,
    /// "Feature phone" type display
    Wap,
}

impl Display {
    /// The value as it appears in the `display` parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Display::Page => "page",
            Display::Popup => "popup",
            Display::Touch => "touch",
            Display::Wap => "wap",
        }
    }
}

impl FromStr for Display {
    type Err = InvalidDisplay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page" => Ok(Self::Page),
            "popup" => Ok(Self::Popup),
            "touch" => Ok(Self::Touch),
            "wap" => Ok(Self::Wap),
            _ => Err(InvalidDisplay(s.to_string())),
        }
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
