//! Text input controller with built-in and custom validation.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ui_host::KeyInput;

use super::{fire, fire_with, Callback, ComponentState, StrCallback};
use crate::{
    attributes::AttributeMap,
    tokens::InputType,
    validation::{
        BuiltinRules, ValidationConcurrency, ValidationResult, Validator, ValidatorError,
        ValidatorFailurePolicy,
    },
    UiContext,
};

/// Errors returned by [`InputController::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A custom validator failed under [`ValidatorFailurePolicy::Propagate`].
    #[error(transparent)]
    Validator(#[from] ValidatorError),
    /// Another validation was running under [`ValidationConcurrency::RejectOverlapping`].
    #[error("a validation run is already in flight")]
    ValidationInFlight,
}

/// Input configuration. Every field is optional when decoded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InputConfig {
    /// Explicit DOM id; generated as `input-N` when absent.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub id: Option<String>,
    /// HTML input type; also selects the format check.
    #[serde(rename = "type", deserialize_with = "crate::config::lenient")]
    pub input_type: InputType,
    /// Initial value; an empty value falls back to `default_value`.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub value: String,
    /// Value restored by [`InputController::reset`].
    #[serde(deserialize_with = "crate::config::lenient")]
    pub default_value: String,
    /// Placeholder text.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub placeholder: String,
    /// Disables the field.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub disabled: bool,
    /// Rejects blank values.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub required: bool,
    /// Renders the field read-only.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub read_only: bool,
    /// `autocomplete` hint.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub auto_complete: Option<String>,
    /// `autofocus` flag.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub auto_focus: bool,
    /// Maximum length in characters.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub max_length: Option<usize>,
    /// Minimum length in characters.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub min_length: Option<usize>,
    /// Regular expression the value must match.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub pattern: Option<String>,
    /// `aria-label` value.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub aria_label: Option<String>,
    /// `aria-describedby` value.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub aria_described_by: Option<String>,
    /// Handling of custom validator failures.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub failure_policy: ValidatorFailurePolicy,
    /// Handling of overlapping validation runs.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub concurrency: ValidationConcurrency,
}

impl InputConfig {
    fn rules(&self) -> BuiltinRules {
        BuiltinRules {
            required: self.required,
            min_length: self.min_length,
            max_length: self.max_length,
            pattern: self.pattern.clone(),
            input_type: self.input_type,
        }
    }
}

/// Caller hooks and custom validators for [`InputController`].
#[derive(Clone, Default)]
pub struct InputCallbacks {
    /// Custom validators, run in order after the built-in rules.
    pub validators: Vec<Rc<dyn Validator>>,
    /// Committed value changes, including [`InputController::set_value`] and reset.
    pub on_change: Option<StrCallback>,
    /// Per-keystroke value updates.
    pub on_input: Option<StrCallback>,
    /// Key presses.
    pub on_key_down: Option<Rc<dyn Fn(&KeyInput)>>,
    /// Focus gained.
    pub on_focus: Option<Callback>,
    /// Focus lost.
    pub on_blur: Option<Callback>,
}

/// Snapshot of input state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputState {
    /// Shared interaction state.
    #[serde(flatten)]
    pub base: ComponentState,
    /// Current text.
    pub value: String,
    /// Placeholder text.
    pub placeholder: String,
    /// HTML input type.
    #[serde(rename = "type")]
    pub input_type: InputType,
    /// Whether the last committed validation failed.
    pub invalid: bool,
    /// Whether a value is required.
    pub required: bool,
    /// Whether the field is read-only.
    pub read_only: bool,
}

impl InputState {
    /// Token for `data-state`.
    pub fn data_state(&self) -> &'static str {
        if self.invalid {
            "invalid"
        } else if self.base.focused {
            "focused"
        } else {
            "idle"
        }
    }
}

/// DOM attributes for the input element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputProps {
    /// `id`.
    pub id: String,
    /// `type`.
    pub input_type: &'static str,
    /// `value`.
    pub value: String,
    /// `placeholder`.
    pub placeholder: String,
    /// `disabled`.
    pub disabled: bool,
    /// `required`.
    pub required: bool,
    /// `readonly`.
    pub read_only: bool,
    /// `autocomplete`.
    pub auto_complete: Option<String>,
    /// `autofocus`.
    pub auto_focus: bool,
    /// `maxlength`.
    pub max_length: Option<usize>,
    /// `minlength`.
    pub min_length: Option<usize>,
    /// `pattern`.
    pub pattern: Option<String>,
    /// `aria-label`.
    pub aria_label: Option<String>,
    /// `aria-describedby`.
    pub aria_described_by: Option<String>,
    /// `aria-invalid`.
    pub aria_invalid: bool,
    /// `aria-required`.
    pub aria_required: bool,
    /// `data-state`.
    pub data_state: &'static str,
}

impl InputProps {
    /// Renders the props as DOM attributes.
    pub fn to_attributes(&self) -> AttributeMap {
        let mut attrs = AttributeMap::new();
        attrs
            .set("id", self.id.as_str())
            .set("type", self.input_type)
            .set("value", self.value.as_str())
            .set("placeholder", self.placeholder.as_str())
            .set_flag("disabled", self.disabled)
            .set_flag("required", self.required)
            .set_flag("readonly", self.read_only)
            .set_opt("autocomplete", self.auto_complete.as_deref())
            .set_flag("autofocus", self.auto_focus)
            .set_opt("maxlength", self.max_length.map(|n| n.to_string()))
            .set_opt("minlength", self.min_length.map(|n| n.to_string()))
            .set_opt("pattern", self.pattern.as_deref())
            .set_opt("aria-label", self.aria_label.as_deref())
            .set_opt("aria-describedby", self.aria_described_by.as_deref())
            .set_bool("aria-invalid", self.aria_invalid)
            .set_bool("aria-required", self.aria_required)
            .set("data-state", self.data_state);
        attrs
    }
}

struct InputInner {
    config: InputConfig,
    rules: BuiltinRules,
    callbacks: InputCallbacks,
    state: RefCell<InputState>,
    validation: RefCell<ValidationResult>,
    generation: Cell<u64>,
    in_flight: Cell<usize>,
}

struct InFlightGuard<'a>(&'a Cell<usize>);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a Cell<usize>) -> Self {
        counter.set(counter.get() + 1);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// Headless text input: value tracking, focus state and validation.
#[derive(Clone)]
pub struct InputController {
    inner: Rc<InputInner>,
}

impl InputController {
    /// Creates an input controller.
    pub fn new(ctx: &UiContext, config: InputConfig, callbacks: InputCallbacks) -> Self {
        let id = ctx.ids().resolve(config.id.as_deref(), "input");
        let value = if config.value.is_empty() {
            config.default_value.clone()
        } else {
            config.value.clone()
        };
        let state = InputState {
            base: ComponentState::new(id, config.disabled),
            value,
            placeholder: config.placeholder.clone(),
            input_type: config.input_type,
            invalid: false,
            required: config.required,
            read_only: config.read_only,
        };
        Self {
            inner: Rc::new(InputInner {
                rules: config.rules(),
                config,
                callbacks,
                state: RefCell::new(state),
                validation: RefCell::new(ValidationResult::ok()),
                generation: Cell::new(0),
                in_flight: Cell::new(0),
            }),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> InputState {
        self.inner.state.borrow().clone()
    }

    /// Current text.
    pub fn value(&self) -> String {
        self.inner.state.borrow().value.clone()
    }

    /// Last committed validation result.
    pub fn validation(&self) -> ValidationResult {
        self.inner.validation.borrow().clone()
    }

    /// DOM attributes for the current state.
    pub fn props(&self) -> InputProps {
        let state = self.inner.state.borrow();
        let config = &self.inner.config;
        InputProps {
            id: state.base.id.clone(),
            input_type: state.input_type.token(),
            value: state.value.clone(),
            placeholder: state.placeholder.clone(),
            disabled: state.base.disabled,
            required: state.required,
            read_only: state.read_only,
            auto_complete: config.auto_complete.clone(),
            auto_focus: config.auto_focus,
            max_length: config.max_length,
            min_length: config.min_length,
            pattern: config.pattern.clone(),
            aria_label: config.aria_label.clone(),
            aria_described_by: config.aria_described_by.clone(),
            aria_invalid: state.invalid,
            aria_required: state.required,
            data_state: state.data_state(),
        }
    }

    /// Replaces the value and notifies `on_change`.
    pub fn set_value(&self, value: impl Into<String>) {
        let value = value.into();
        self.inner.state.borrow_mut().value = value.clone();
        fire_with(&self.inner.callbacks.on_change, value.as_str());
    }

    /// Enables or disables the field.
    pub fn set_disabled(&self, disabled: bool) {
        let mut state = self.inner.state.borrow_mut();
        state.base.disabled = disabled;
        if disabled {
            state.base.focused = false;
        }
    }

    /// Restores the default value, clears validation and notifies `on_change`.
    ///
    /// Runs still in flight are superseded and will not commit.
    pub fn reset(&self) {
        let default_value = self.inner.config.default_value.clone();
        self.bump_generation();
        {
            let mut state = self.inner.state.borrow_mut();
            state.value = default_value.clone();
            state.invalid = false;
        }
        *self.inner.validation.borrow_mut() = ValidationResult::ok();
        fire_with(&self.inner.callbacks.on_change, default_value.as_str());
    }

    /// Validates the current value: built-in rules first, then custom
    /// validators in order.
    ///
    /// The result is committed to [`Self::validation`] and the `invalid` flag
    /// unless a newer run started in the meantime. Never call this while
    /// holding a borrow of the controller's state.
    pub async fn validate(&self) -> Result<ValidationResult, InputError> {
        let inner = &self.inner;
        if inner.config.concurrency == ValidationConcurrency::RejectOverlapping
            && inner.in_flight.get() > 0
        {
            return Err(InputError::ValidationInFlight);
        }
        let generation = self.bump_generation();
        let _guard = InFlightGuard::enter(&inner.in_flight);

        let value = self.value();
        let mut errors = inner.rules.check(&value);
        let validators = inner.callbacks.validators.clone();
        for validator in validators {
            match validator.validate(&value).await {
                Ok(result) => {
                    if !result.valid {
                        errors.extend(result.errors);
                    }
                }
                Err(err) => match inner.config.failure_policy {
                    ValidatorFailurePolicy::Propagate => return Err(err.into()),
                    ValidatorFailurePolicy::Ignore => {
                        tracing::warn!(error = %err, "ignoring failed validator");
                    }
                    ValidatorFailurePolicy::ReportAsError => errors.push(err.message),
                },
            }
        }

        let result = ValidationResult::from_errors(errors);
        if generation == inner.generation.get() {
            inner.state.borrow_mut().invalid = !result.valid;
            *inner.validation.borrow_mut() = result.clone();
        } else {
            tracing::debug!(generation, "validation superseded; result not committed");
        }
        Ok(result)
    }

    fn bump_generation(&self) -> u64 {
        let next = self.inner.generation.get() + 1;
        self.inner.generation.set(next);
        next
    }

    /// Committed change (`change` event) with the element's new value.
    pub fn on_change(&self, value: impl Into<String>) {
        self.set_value(value);
    }

    /// Keystroke (`input` event) with the element's new value.
    pub fn on_input(&self, value: impl Into<String>) {
        let value = value.into();
        self.inner.state.borrow_mut().value = value.clone();
        fire_with(&self.inner.callbacks.on_input, value.as_str());
    }

    /// Keydown handler; forwards to the caller hook.
    pub fn on_key_down(&self, input: &KeyInput) {
        if let Some(on_key_down) = &self.inner.callbacks.on_key_down {
            on_key_down(input);
        }
    }

    /// Focus handler.
    pub fn on_focus(&self) {
        self.inner.state.borrow_mut().base.focused = true;
        fire(&self.inner.callbacks.on_focus);
    }

    /// Blur handler. Returns the validation run triggered by leaving the
    /// field; the host drives it to completion.
    pub fn on_blur(&self) -> LocalBoxFuture<'static, Result<ValidationResult, InputError>> {
        self.inner.state.borrow_mut().base.focused = false;
        fire(&self.inner.callbacks.on_blur);
        let this = self.clone();
        Box::pin(async move { this.validate().await })
    }
}

impl std::fmt::Debug for InputController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputController")
            .field("state", &*self.inner.state.borrow())
            .field("validation", &*self.inner.validation.borrow())
            .finish_non_exhaustive()
    }
}
