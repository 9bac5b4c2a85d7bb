//! Shared enumerations rendered as stable `data-*` tokens.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Button visual variants.
pub enum ButtonVariant {
    /// Emphasized primary action.
    #[default]
    Primary,
    /// Secondary action.
    Secondary,
    /// Bordered, transparent background.
    Outline,
    /// No chrome until hovered.
    Ghost,
    /// Rendered like a text link.
    Link,
    /// Destructive/danger action.
    Destructive,
}

impl ButtonVariant {
    /// Every variant in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Primary,
        Self::Secondary,
        Self::Outline,
        Self::Ghost,
        Self::Link,
        Self::Destructive,
    ];

    /// Stable token for `data-variant`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Outline => "outline",
            Self::Ghost => "ghost",
            Self::Link => "link",
            Self::Destructive => "destructive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Control sizing tokens.
pub enum Size {
    /// Dense.
    #[serde(alias = "small")]
    Sm,
    /// Default.
    #[default]
    #[serde(alias = "medium")]
    Md,
    /// Large.
    #[serde(alias = "large")]
    Lg,
}

impl Size {
    /// Every size in ascending order.
    pub const ALL: [Self; 3] = [Self::Sm, Self::Md, Self::Lg];

    /// Stable token for `data-size`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Text input kinds with type-specific validation.
pub enum InputType {
    /// Free text.
    #[default]
    Text,
    /// Email address.
    Email,
    /// Masked password.
    Password,
    /// Numeric text.
    Number,
    /// Telephone number.
    Tel,
    /// Absolute URL.
    Url,
}

impl InputType {
    /// Value for the HTML `type` attribute.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Number => "number",
            Self::Tel => "tel",
            Self::Url => "url",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Axis along which arrow keys move.
pub enum Orientation {
    /// Left/Right arrows.
    #[default]
    Horizontal,
    /// Up/Down arrows.
    Vertical,
}

impl Orientation {
    /// Value for `aria-orientation`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}
