//! Tooltip and dropdown class tables.
//!
//! Both surfaces are absolutely positioned against a `relative` wrapper, so
//! placement is expressed purely through inset and margin utilities.

use serde::{Deserialize, Serialize};
use ui_headless::Size;

use crate::merge::cn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Side of the trigger a tooltip opens on.
pub enum TooltipPlacement {
    /// Above the trigger.
    #[default]
    Top,
    /// Below the trigger.
    Bottom,
    /// Left of the trigger.
    Left,
    /// Right of the trigger.
    Right,
}

impl TooltipPlacement {
    /// Every placement, in declaration order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Stable token for `data-placement`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Offsets of the bubble relative to the trigger.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Top => "bottom-full left-1/2 -translate-x-1/2 mb-2",
            Self::Bottom => "top-full left-1/2 -translate-x-1/2 mt-2",
            Self::Left => "right-full top-1/2 -translate-y-1/2 mr-2",
            Self::Right => "left-full top-1/2 -translate-y-1/2 ml-2",
        }
    }

    /// Arrow offsets; the three transparent sides leave a triangle pointing at the trigger.
    pub const fn arrow_class(self) -> &'static str {
        match self {
            Self::Top => "top-full left-1/2 -translate-x-1/2 border-l-transparent border-r-transparent border-b-transparent",
            Self::Bottom => "bottom-full left-1/2 -translate-x-1/2 border-l-transparent border-r-transparent border-t-transparent",
            Self::Left => "left-full top-1/2 -translate-y-1/2 border-t-transparent border-b-transparent border-r-transparent",
            Self::Right => "right-full top-1/2 -translate-y-1/2 border-t-transparent border-b-transparent border-l-transparent",
        }
    }
}

/// Padding and text size of the tooltip bubble.
pub const fn tooltip_size_class(size: Size) -> &'static str {
    match size {
        Size::Sm => "px-2 py-1 text-xs",
        Size::Md => "px-3 py-2 text-sm",
        Size::Lg => "px-4 py-3 text-base",
    }
}

/// Classes shared by every tooltip bubble.
pub const TOOLTIP_BASE: &str = "absolute z-50 rounded-md shadow-lg border whitespace-nowrap pointer-events-none transition-opacity duration-200";
const TOOLTIP_WRAPPER: &str = "relative inline-block";
const TOOLTIP_LIGHT: &str = "bg-white text-gray-900 border-gray-200";
const TOOLTIP_DARK: &str = "bg-gray-900 text-white border-gray-700";
const TOOLTIP_ARROW: &str = "absolute w-0 h-0 border-4";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Resolved classes for a tooltip.
pub struct TooltipClasses {
    /// Wrapper around the trigger.
    pub container: String,
    /// The bubble itself.
    pub content: String,
    /// Arrow element, absent when the tooltip has no arrow.
    pub arrow: Option<String>,
}

impl TooltipClasses {
    /// Resolves the class lists for a tooltip.
    pub fn new(placement: TooltipPlacement, size: Size, dark: bool, arrow: bool) -> Self {
        let (theme, arrow_color) = if dark {
            (TOOLTIP_DARK, "border-gray-900")
        } else {
            (TOOLTIP_LIGHT, "border-white")
        };
        Self {
            container: cn([TOOLTIP_WRAPPER]),
            content: cn([
                TOOLTIP_BASE,
                placement.class(),
                tooltip_size_class(size),
                theme,
            ]),
            // Side colors come after the fill color so they refine it.
            arrow: arrow.then(|| cn([TOOLTIP_ARROW, arrow_color, placement.arrow_class()])),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Where a dropdown menu opens relative to its trigger.
pub enum DropdownPlacement {
    /// Above, default alignment.
    Top,
    /// Above, aligned to the start edge.
    TopStart,
    /// Above, aligned to the end edge.
    TopEnd,
    /// Below, default alignment.
    Bottom,
    /// Below, aligned to the start edge.
    #[default]
    BottomStart,
    /// Below, aligned to the end edge.
    BottomEnd,
    /// Left, default alignment.
    Left,
    /// Left, aligned to the top edge.
    LeftStart,
    /// Left, aligned to the bottom edge.
    LeftEnd,
    /// Right, default alignment.
    Right,
    /// Right, aligned to the top edge.
    RightStart,
    /// Right, aligned to the bottom edge.
    RightEnd,
}

impl DropdownPlacement {
    /// Every placement, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Top,
        Self::TopStart,
        Self::TopEnd,
        Self::Bottom,
        Self::BottomStart,
        Self::BottomEnd,
        Self::Left,
        Self::LeftStart,
        Self::LeftEnd,
        Self::Right,
        Self::RightStart,
        Self::RightEnd,
    ];

    /// Stable token for `data-placement`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::TopStart => "top-start",
            Self::TopEnd => "top-end",
            Self::Bottom => "bottom",
            Self::BottomStart => "bottom-start",
            Self::BottomEnd => "bottom-end",
            Self::Left => "left",
            Self::LeftStart => "left-start",
            Self::LeftEnd => "left-end",
            Self::Right => "right",
            Self::RightStart => "right-start",
            Self::RightEnd => "right-end",
        }
    }

    /// Offsets of the menu relative to the trigger.
    pub const fn class(self) -> &'static str {
        match self {
            Self::Top => "bottom-full mb-2",
            Self::TopStart => "bottom-full mb-2 left-0",
            Self::TopEnd => "bottom-full mb-2 right-0",
            Self::Bottom => "top-full mt-2",
            Self::BottomStart => "top-full mt-2 left-0",
            Self::BottomEnd => "top-full mt-2 right-0",
            Self::Left => "right-full mr-2",
            Self::LeftStart => "right-full mr-2 top-0",
            Self::LeftEnd => "right-full mr-2 bottom-0",
            Self::Right => "left-full ml-2",
            Self::RightStart => "left-full ml-2 top-0",
            Self::RightEnd => "left-full ml-2 bottom-0",
        }
    }
}

/// Minimum width and text size of the menu.
pub const fn dropdown_size_class(size: Size) -> &'static str {
    match size {
        Size::Sm => "min-w-32 text-sm",
        Size::Md => "min-w-40 text-base",
        Size::Lg => "min-w-48 text-lg",
    }
}

/// Classes shared by every dropdown menu.
pub const DROPDOWN_MENU: &str =
    "absolute z-50 overflow-hidden rounded-md border border-gray-200 bg-white py-1 shadow-lg";
/// A selectable menu row.
pub const DROPDOWN_ITEM: &str = "flex w-full cursor-pointer select-none items-center gap-2 px-3 py-2 text-left hover:bg-gray-100 focus:bg-gray-100 focus:outline-none";
const DROPDOWN_ITEM_DANGER: &str = "text-red-600 hover:bg-red-50 focus:bg-red-50";
const DROPDOWN_ITEM_DISABLED: &str = "cursor-not-allowed opacity-50 hover:bg-transparent";
/// Separator between menu groups.
pub const DROPDOWN_DIVIDER: &str = "my-1 h-px bg-gray-200";

/// Full class list for a dropdown menu.
pub fn dropdown_menu_class(
    placement: DropdownPlacement,
    size: Size,
    extra: Option<&str>,
) -> String {
    cn([
        DROPDOWN_MENU,
        placement.class(),
        dropdown_size_class(size),
        extra.unwrap_or_default(),
    ])
}

/// Class list for one menu row.
pub fn dropdown_item_class(danger: bool, disabled: bool) -> String {
    cn([
        DROPDOWN_ITEM,
        if danger { DROPDOWN_ITEM_DANGER } else { "" },
        if disabled { DROPDOWN_ITEM_DISABLED } else { "" },
    ])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn tooltip_defaults_to_a_light_bubble_above() {
        let classes = TooltipClasses::new(TooltipPlacement::default(), Size::Md, false, true);
        assert_eq!(classes.container, "relative inline-block");
        assert!(classes.content.contains("bottom-full left-1/2 -translate-x-1/2 mb-2"));
        assert!(classes.content.contains("px-3 py-2 text-sm"));
        assert!(classes.content.ends_with("bg-white text-gray-900 border-gray-200"));
    }

    #[test]
    fn arrow_keeps_transparent_sides_over_its_fill() {
        let classes = TooltipClasses::new(TooltipPlacement::Right, Size::Sm, true, true);
        let arrow = classes.arrow.expect("arrow");
        assert!(arrow.contains("border-gray-900"));
        assert!(arrow.contains("border-t-transparent border-b-transparent border-l-transparent"));
        assert!(classes.content.contains("bg-gray-900 text-white"));

        let bare = TooltipClasses::new(TooltipPlacement::Bottom, Size::Lg, false, false);
        assert_eq!(bare.arrow, None);
    }

    #[test]
    fn every_placement_has_distinct_offsets() {
        for (index, placement) in DropdownPlacement::ALL.iter().enumerate() {
            for other in &DropdownPlacement::ALL[index + 1..] {
                assert_ne!(placement.class(), other.class());
            }
            let decoded: DropdownPlacement =
                serde_json::from_str(&format!("\"{}\"", placement.token())).expect("decode");
            assert_eq!(decoded, *placement);
        }
        for placement in TooltipPlacement::ALL {
            assert!(placement.arrow_class().contains("-transparent"));
        }
    }

    #[test]
    fn dropdown_menu_opens_below_start_by_default() {
        let class = dropdown_menu_class(DropdownPlacement::default(), Size::Lg, None);
        assert!(class.contains("top-full mt-2 left-0"));
        assert!(class.ends_with("min-w-48 text-lg"));

        let wide = dropdown_menu_class(DropdownPlacement::TopEnd, Size::Sm, Some("min-w-64"));
        assert!(wide.ends_with("text-sm min-w-64"));
        assert!(!wide.contains("min-w-32"));
    }

    #[test]
    fn danger_rows_replace_the_hover_tint() {
        let class = dropdown_item_class(true, false);
        assert!(class.contains("text-red-600"));
        assert!(class.contains("hover:bg-red-50"));
        assert!(!class.contains("hover:bg-gray-100"));
        assert!(dropdown_item_class(false, true).ends_with("cursor-not-allowed opacity-50 hover:bg-transparent"));
    }
}
