//! Button, text input and badge class tables.

use serde::{Deserialize, Serialize};
use ui_headless::{ButtonVariant, Size};

use crate::merge::cn;

/// Classes shared by every button.
pub const BUTTON_BASE: &str = "inline-flex items-center justify-center whitespace-nowrap rounded-md text-sm font-medium transition-colors focus-visible:outline-none focus-visible:ring-2 focus-visible:ring-ring focus-visible:ring-offset-2 disabled:pointer-events-none disabled:opacity-50";

/// Extra classes while a button is loading.
pub const BUTTON_LOADING: &str = "cursor-wait opacity-70";

/// Classes for a button variant.
pub const fn button_variant_class(variant: ButtonVariant) -> &'static str {
    match variant {
        ButtonVariant::Primary => "bg-primary text-primary-foreground hover:bg-primary/90",
        ButtonVariant::Secondary => "bg-secondary text-secondary-foreground hover:bg-secondary/80",
        ButtonVariant::Outline => {
            "border border-input bg-background hover:bg-accent hover:text-accent-foreground"
        }
        ButtonVariant::Ghost => "hover:bg-accent hover:text-accent-foreground",
        ButtonVariant::Link => "text-primary underline-offset-4 hover:underline",
        ButtonVariant::Destructive => {
            "bg-destructive text-destructive-foreground hover:bg-destructive/90"
        }
    }
}

/// Classes for a button size.
pub const fn button_size_class(size: Size) -> &'static str {
    match size {
        Size::Sm => "h-8 px-3 text-xs",
        Size::Md => "h-9 px-4 py-2",
        Size::Lg => "h-10 px-8",
    }
}

/// Full class list for a button; `extra` wins over the table classes.
pub fn button_class(
    variant: ButtonVariant,
    size: Size,
    loading: bool,
    extra: Option<&str>,
) -> String {
    cn([
        BUTTON_BASE,
        button_variant_class(variant),
        button_size_class(size),
        if loading { BUTTON_LOADING } else { "" },
        extra.unwrap_or_default(),
    ])
}

/// Classes shared by every text input.
pub const INPUT_BASE: &str = "flex h-10 w-full rounded-md border border-input bg-background px-3 py-2 text-sm ring-offset-background placeholder:text-muted-foreground focus-visible:outline-none focus-visible:ring-2 focus-visible:ring-ring focus-visible:ring-offset-2 disabled:cursor-not-allowed disabled:opacity-50";

/// Classes applied while an input holds validation errors.
pub const INPUT_INVALID: &str = "border-destructive focus-visible:ring-destructive";

/// Classes for the error message under an input.
pub const INPUT_ERROR_TEXT: &str = "mt-1 text-sm text-destructive";

/// Full class list for a text input.
pub fn input_class(invalid: bool, extra: Option<&str>) -> String {
    cn([
        INPUT_BASE,
        if invalid { INPUT_INVALID } else { "" },
        extra.unwrap_or_default(),
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Badge color tokens.
pub enum BadgeColor {
    /// Neutral gray.
    #[default]
    Default,
    /// Brand color.
    Primary,
    /// Muted brand color.
    Secondary,
    /// Positive status.
    Success,
    /// Cautionary status.
    Warning,
    /// Failure status.
    Error,
}

impl BadgeColor {
    /// Every color in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Default,
        Self::Primary,
        Self::Secondary,
        Self::Success,
        Self::Warning,
        Self::Error,
    ];

    /// Stable token for `data-color`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Color classes for the badge surface.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Default => "border-transparent bg-gray-100 text-gray-800",
            Self::Primary => "border-transparent bg-primary text-primary-foreground",
            Self::Secondary => "border-transparent bg-secondary text-secondary-foreground",
            Self::Success => "border-transparent bg-green-100 text-green-800",
            Self::Warning => "border-transparent bg-yellow-100 text-yellow-800",
            Self::Error => "border-transparent bg-red-100 text-red-800",
        }
    }
}

/// Classes shared by every badge.
pub const BADGE_BASE: &str =
    "inline-flex items-center rounded-full border px-2.5 py-0.5 text-xs font-semibold transition-colors";

/// Full class list for a badge.
pub fn badge_class(color: BadgeColor, extra: Option<&str>) -> String {
    cn([BADGE_BASE, color.class(), extra.unwrap_or_default()])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn button_size_overrides_base_text_size() {
        let class = button_class(ButtonVariant::Primary, Size::Sm, false, None);
        assert!(class.contains("h-8 px-3 text-xs"));
        assert!(!class.contains("text-sm"));
        assert!(class.starts_with("inline-flex items-center"));
    }

    #[test]
    fn caller_classes_win_over_variant_classes() {
        let class = button_class(
            ButtonVariant::Secondary,
            Size::Md,
            false,
            Some("bg-emerald-600 w-full"),
        );
        assert!(class.ends_with("bg-emerald-600 w-full"));
        assert!(!class.contains(" bg-secondary "));
        assert!(class.contains("hover:bg-secondary/80"));
    }

    #[test]
    fn loading_buttons_add_wait_cursor() {
        let class = button_class(ButtonVariant::Ghost, Size::Lg, true, None);
        assert!(class.contains("cursor-wait opacity-70"));
    }

    #[test]
    fn invalid_input_swaps_border_color() {
        assert_eq!(input_class(false, None), cn([INPUT_BASE]));
        let invalid = input_class(true, None);
        assert!(invalid.contains("border-destructive"));
        assert!(!invalid.contains("border-input"));
        assert!(invalid.contains("focus-visible:ring-destructive"));
        assert!(!invalid.contains("focus-visible:ring-ring"));
    }

    #[test]
    fn every_variant_has_distinct_classes() {
        for (index, variant) in ButtonVariant::ALL.iter().enumerate() {
            for other in &ButtonVariant::ALL[index + 1..] {
                assert_ne!(button_variant_class(*variant), button_variant_class(*other));
            }
        }
    }

    #[test]
    fn badge_colors_decode_from_tokens() {
        for color in BadgeColor::ALL {
            let decoded: BadgeColor =
                serde_json::from_str(&format!("\"{}\"", color.token())).expect("decode");
            assert_eq!(decoded, color);
        }
        assert!(badge_class(BadgeColor::Error, None).contains("bg-red-100 text-red-800"));
    }
}
