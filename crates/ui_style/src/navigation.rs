//! Tabs and accordion class tables.

use serde::{Deserialize, Serialize};
use ui_headless::Size;

use crate::merge::cn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Classes for the parts of a tab strip.
pub struct TabsClasses {
    /// Tab list container.
    pub list: &'static str,
    /// Every tab.
    pub tab: &'static str,
    /// Added to the selected tab.
    pub active_tab: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Tab strip appearance.
pub enum TabsVariant {
    /// Underlined strip.
    #[default]
    Default,
    /// Segmented pill group.
    Pills,
    /// Bare underline.
    Underline,
    /// Folder-style cards.
    Card,
}

impl TabsVariant {
    /// Stable token for `data-variant`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pills => "pills",
            Self::Underline => "underline",
            Self::Card => "card",
        }
    }

    /// Class table for the variant.
    pub const fn classes(self) -> TabsClasses {
        match self {
            Self::Default => TabsClasses {
                list: "border-b border-gray-200",
                tab: "border-b-2 border-transparent hover:border-gray-300 hover:text-gray-700",
                active_tab: "border-blue-500 text-blue-600",
            },
            Self::Pills => TabsClasses {
                list: "bg-gray-100 rounded-lg p-1",
                tab: "rounded-md hover:bg-gray-200",
                active_tab: "bg-white shadow-sm text-gray-900",
            },
            Self::Underline => TabsClasses {
                list: "border-b border-gray-200",
                tab: "border-b-2 border-transparent hover:border-gray-300",
                active_tab: "border-blue-500 text-blue-600",
            },
            Self::Card => TabsClasses {
                list: "border-b border-gray-200",
                tab: "border border-transparent border-b-gray-200 hover:border-gray-300 -mb-px",
                active_tab: "border-gray-300 border-b-white text-gray-900",
            },
        }
    }
}

/// Tab padding and text size.
pub const fn tab_size_class(size: Size) -> &'static str {
    match size {
        Size::Sm => "px-3 py-2 text-sm",
        Size::Md => "px-4 py-2 text-base",
        Size::Lg => "px-6 py-3 text-lg",
    }
}

/// Full class list for one tab.
pub fn tab_class(variant: TabsVariant, size: Size, selected: bool) -> String {
    let table = variant.classes();
    cn([
        table.tab,
        tab_size_class(size),
        if selected { table.active_tab } else { "" },
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Classes for the parts of an accordion.
pub struct AccordionClasses {
    /// Outer container.
    pub container: &'static str,
    /// Each item wrapper.
    pub item: &'static str,
    /// Item trigger row.
    pub header: &'static str,
    /// Expanded panel.
    pub content: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Accordion appearance.
pub enum AccordionVariant {
    /// Divided single border.
    #[default]
    Default,
    /// Heavier outer border.
    Bordered,
    /// Gray well with raised items.
    Filled,
    /// No chrome.
    Ghost,
}

impl AccordionVariant {
    /// Stable token for `data-variant`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Bordered => "bordered",
            Self::Filled => "filled",
            Self::Ghost => "ghost",
        }
    }

    /// Class table for the variant.
    pub const fn classes(self) -> AccordionClasses {
        match self {
            Self::Default => AccordionClasses {
                container: "border border-gray-200 rounded-lg divide-y divide-gray-200",
                item: "bg-white",
                header: "px-4 py-3 hover:bg-gray-50",
                content: "px-4 py-3 bg-gray-50",
            },
            Self::Bordered => AccordionClasses {
                container: "border border-gray-300 rounded-lg",
                item: "bg-white border-b border-gray-200 last:border-b-0",
                header: "px-4 py-3 hover:bg-gray-50",
                content: "px-4 py-3 border-t border-gray-200",
            },
            Self::Filled => AccordionClasses {
                container: "bg-gray-100 rounded-lg",
                item: "bg-white mb-2 last:mb-0 rounded-lg shadow-sm",
                header: "px-4 py-3 hover:bg-gray-50 rounded-lg",
                content: "px-4 py-3 bg-gray-50 rounded-b-lg",
            },
            Self::Ghost => AccordionClasses {
                container: "",
                item: "mb-2 last:mb-0",
                header: "px-4 py-3 hover:bg-gray-50 rounded-lg",
                content: "px-4 py-3",
            },
        }
    }
}

/// Header and content spacing for an accordion size, as `(header, content)`.
pub const fn accordion_size_classes(size: Size) -> (&'static str, &'static str) {
    match size {
        Size::Sm => ("px-3 py-2 text-sm", "px-3 py-2 text-sm"),
        Size::Md => ("px-4 py-3 text-base", "px-4 py-3 text-base"),
        Size::Lg => ("px-6 py-4 text-lg", "px-6 py-4 text-base"),
    }
}

/// Full class lists for an accordion's header and content.
pub fn accordion_item_classes(variant: AccordionVariant, size: Size) -> (String, String) {
    let table = variant.classes();
    let (header, content) = accordion_size_classes(size);
    (cn([table.header, header]), cn([table.content, content]))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn selected_tab_border_color_replaces_transparent() {
        let idle = tab_class(TabsVariant::Default, Size::Md, false);
        let active = tab_class(TabsVariant::Default, Size::Md, true);
        assert!(idle.contains("border-transparent"));
        assert!(!active.contains("border-transparent"));
        assert!(active.ends_with("border-blue-500 text-blue-600"));
    }

    #[test]
    fn card_tabs_keep_side_colors_distinct() {
        let active = tab_class(TabsVariant::Card, Size::Sm, true);
        assert!(active.contains("border-b-white"));
        assert!(!active.contains("border-b-gray-200"));
        assert!(active.contains("-mb-px"));
    }

    #[test]
    fn accordion_sizes_override_variant_padding() {
        let (header, content) = accordion_item_classes(AccordionVariant::Bordered, Size::Lg);
        assert_eq!(header, "hover:bg-gray-50 px-6 py-4 text-lg");
        assert_eq!(content, "border-t border-gray-200 px-6 py-4 text-base");
    }
}
