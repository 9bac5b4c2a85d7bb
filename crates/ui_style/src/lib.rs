//! Utility-class tables for the headless controllers.
//!
//! Every table is plain data keyed by the token enums shared with
//! `ui_headless`, so renderers stay free to pick the markup. [`cn`] composes
//! the fragments and lets caller-supplied classes override table classes.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod controls;
mod merge;
mod navigation;
mod overlays;
mod popovers;
mod slider;

pub use controls::{
    badge_class, button_class, button_size_class, button_variant_class, input_class, BadgeColor,
    BADGE_BASE, BUTTON_BASE, BUTTON_LOADING, INPUT_BASE, INPUT_ERROR_TEXT, INPUT_INVALID,
};
pub use merge::{cn, with_layout_class};
pub use navigation::{
    accordion_item_classes, accordion_size_classes, tab_class, tab_size_class, AccordionClasses,
    AccordionVariant, TabsClasses, TabsVariant,
};
pub use overlays::{
    drawer_size_class, modal_content_class, toast_class, toast_size_class, DrawerClasses,
    DrawerSide, DrawerSize, ToastPosition, ToastVariant, DRAWER_CLOSE, MODAL_CLOSE,
    MODAL_CONTENT, MODAL_DESCRIPTION, MODAL_OVERLAY, MODAL_TITLE, TOAST_BASE,
};
pub use popovers::{
    dropdown_item_class, dropdown_menu_class, dropdown_size_class, tooltip_size_class,
    DropdownPlacement, TooltipClasses, TooltipPlacement, DROPDOWN_DIVIDER, DROPDOWN_ITEM,
    DROPDOWN_MENU, TOOLTIP_BASE,
};
pub use slider::{
    slider_orientation_classes, slider_size_classes, SliderClasses, SliderSizeClasses,
};
