//! Headless interaction logic for accessible UI components.
//!
//! Everything here is rendering-agnostic: controllers keep interaction state
//! and compute DOM attribute sets, while the page itself is reached only
//! through the [`ui_host::UiEnvironment`] carried by a [`UiContext`].
//!
//! The building blocks are the [`IdRegistry`], the [`FocusTrap`], the
//! keyboard navigation dispatcher ([`resolve_navigation`] and
//! [`handle_keyboard_navigation`]) and the component controllers in
//! [`controllers`].

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod attributes;
pub mod config;
pub mod context;
pub mod controllers;
pub mod focus;
pub mod id;
pub mod navigation;
pub mod tokens;
pub mod validation;

pub use attributes::{bool_token, AttributeMap};
pub use context::UiContext;
pub use controllers::{
    accordion::{
        AccordionCallbacks, AccordionConfig, AccordionController, AccordionItem, AccordionMode,
    },
    button::{ButtonCallbacks, ButtonConfig, ButtonController, ButtonProps, ButtonState},
    disclosure::{DisclosureCallbacks, DisclosureConfig, DisclosureController},
    input::{InputCallbacks, InputConfig, InputController, InputError, InputProps, InputState},
    modal::{
        ModalCallbacks, ModalConfig, ModalController, ModalOverlayProps, ModalProps, ModalState,
    },
    slider::{SliderCallbacks, SliderConfig, SliderController},
    tabs::{TabActivation, TabItem, TabsCallbacks, TabsConfig, TabsController},
    ComponentState,
};
pub use focus::{tab_wrap_target, FocusTrap};
pub use id::{unique_token, IdRegistry};
pub use navigation::{
    handle_keyboard_navigation, resolve_navigation, resolve_navigation_filtered, NavigationAction,
    NavigationHooks, NavigationOptions, NavigationOutcome,
};
pub use tokens::{ButtonVariant, InputType, Orientation, Size};
pub use validation::{
    async_validator, sync_validator, ValidationConcurrency, ValidationResult, Validator,
    ValidatorError, ValidatorFailurePolicy,
};
