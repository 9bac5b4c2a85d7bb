//! Slider controller and its value math.

use std::{cell::RefCell, rc::Rc};

use serde::{Deserialize, Deserializer, Serialize};
use ui_host::{EventControl, Key, KeyInput};

use crate::{attributes::AttributeMap, tokens::Orientation, UiContext};

/// Keyboard page size in steps.
pub const PAGE_STEPS: f64 = 10.0;

/// Rounds `value` to the nearest multiple of `step`. A non-positive step
/// leaves the value unchanged.
pub fn round_to_step(value: f64, step: f64) -> f64 {
    if step <= 0.0 || !step.is_finite() {
        return value;
    }
    (value / step).round() * step
}

/// Position of `value` within `[min, max]` as a percentage. An empty range
/// reports 0.
pub fn percentage(value: f64, min: f64, max: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 {
        return 0.0;
    }
    (value - min) / span * 100.0
}

/// Inverse of [`percentage`].
pub fn value_from_percentage(percent: f64, min: f64, max: f64) -> f64 {
    min + percent / 100.0 * (max - min)
}

/// Slider configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SliderConfig {
    /// Explicit DOM id; generated as `slider-N` when absent.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub id: Option<String>,
    /// Lower bound.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub min: f64,
    /// Upper bound; raised to `min` when smaller.
    #[serde(deserialize_with = "lenient_max")]
    pub max: f64,
    /// Step between selectable values; non-positive steps become 1.
    #[serde(deserialize_with = "lenient_step")]
    pub step: f64,
    /// Initial value, clamped and snapped.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub value: f64,
    /// Track axis.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub orientation: Orientation,
    /// Disables interaction.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub disabled: bool,
    /// `aria-label` value.
    #[serde(deserialize_with = "crate::config::lenient")]
    pub aria_label: Option<String>,
}

const DEFAULT_MAX: f64 = 100.0;
const DEFAULT_STEP: f64 = 1.0;

fn lenient_max<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    crate::config::lenient_or(deserializer, DEFAULT_MAX)
}

fn lenient_step<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    crate::config::lenient_or(deserializer, DEFAULT_STEP)
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            id: None,
            min: 0.0,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
            value: 0.0,
            orientation: Orientation::Horizontal,
            disabled: false,
            aria_label: None,
        }
    }
}

/// Caller hooks for [`SliderController`].
#[derive(Clone, Default)]
pub struct SliderCallbacks {
    /// Fired with the new value after it changed.
    pub on_change: Option<Rc<dyn Fn(f64)>>,
}

/// Normalized range of a slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound, never below `min`.
    pub max: f64,
    /// Positive step.
    pub step: f64,
}

impl SliderRange {
    fn from_config(config: &SliderConfig) -> Self {
        let min = if config.min.is_finite() { config.min } else { 0.0 };
        let max = if config.max.is_finite() { config.max.max(min) } else { min };
        let step = if config.step.is_finite() && config.step > 0.0 {
            config.step
        } else {
            1.0
        };
        Self { min, max, step }
    }

    /// Clamps `value` into the range and snaps it to the step grid anchored
    /// at `min`. Snapping past `max` falls back to the last grid point.
    pub fn normalize(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let snapped = self.min + round_to_step(clamped - self.min, self.step);
        if snapped > self.max {
            snapped - self.step
        } else {
            snapped
        }
    }
}

struct SliderInner {
    id: String,
    range: SliderRange,
    config: SliderConfig,
    callbacks: SliderCallbacks,
    value: RefCell<f64>,
    disabled: RefCell<bool>,
}

/// Headless single-thumb slider.
#[derive(Clone)]
pub struct SliderController {
    inner: Rc<SliderInner>,
}

impl SliderController {
    /// Creates a slider controller.
    pub fn new(ctx: &UiContext, config: SliderConfig, callbacks: SliderCallbacks) -> Self {
        let range = SliderRange::from_config(&config);
        let value = range.normalize(config.value);
        Self {
            inner: Rc::new(SliderInner {
                id: ctx.ids().resolve(config.id.as_deref(), "slider"),
                range,
                disabled: RefCell::new(config.disabled),
                config,
                callbacks,
                value: RefCell::new(value),
            }),
        }
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        *self.inner.value.borrow()
    }

    /// Normalized range.
    pub fn range(&self) -> SliderRange {
        self.inner.range
    }

    /// Current value as a percentage of the range, for fill and thumb placement.
    pub fn percentage(&self) -> f64 {
        percentage(self.value(), self.inner.range.min, self.inner.range.max)
    }

    /// Returns whether interaction is suppressed.
    pub fn is_disabled(&self) -> bool {
        *self.inner.disabled.borrow()
    }

    /// Enables or disables the slider.
    pub fn set_disabled(&self, disabled: bool) {
        *self.inner.disabled.borrow_mut() = disabled;
    }

    /// Sets the value (clamped and snapped) and notifies on change.
    /// Returns the stored value.
    pub fn set_value(&self, value: f64) -> f64 {
        let next = self.inner.range.normalize(value);
        let previous = self.inner.value.replace(next);
        if previous != next {
            if let Some(on_change) = &self.inner.callbacks.on_change {
                on_change(next);
            }
        }
        next
    }

    /// Sets the value from a track position given as a percentage.
    pub fn set_from_percentage(&self, percent: f64) -> f64 {
        let range = self.inner.range;
        self.set_value(value_from_percentage(percent.clamp(0.0, 100.0), range.min, range.max))
    }

    /// Keydown handler. Arrows move one step (Right/Up increase), PageUp and
    /// PageDown move ten steps, Home/End jump to the bounds.
    pub fn on_key_down(&self, input: &KeyInput) -> EventControl {
        if self.is_disabled() {
            return EventControl::PASS;
        }
        let range = self.inner.range;
        let current = self.value();
        let target = match input.key {
            Key::ArrowRight | Key::ArrowUp => current + range.step,
            Key::ArrowLeft | Key::ArrowDown => current - range.step,
            Key::PageUp => current + range.step * PAGE_STEPS,
            Key::PageDown => current - range.step * PAGE_STEPS,
            Key::Home => range.min,
            Key::End => range.max,
            _ => return EventControl::PASS,
        };
        self.set_value(target);
        EventControl::PREVENT
    }

    /// Attributes for the thumb element.
    pub fn thumb_props(&self) -> AttributeMap {
        let range = self.inner.range;
        let disabled = self.is_disabled();
        let mut attrs = AttributeMap::new();
        attrs
            .set("id", self.inner.id.as_str())
            .set("role", "slider")
            .set("aria-valuemin", format_number(range.min))
            .set("aria-valuemax", format_number(range.max))
            .set("aria-valuenow", format_number(self.value()))
            .set("aria-orientation", self.inner.config.orientation.token())
            .set_opt("aria-label", self.inner.config.aria_label.as_deref())
            .set("tabindex", if disabled { "-1" } else { "0" })
            .set("data-orientation", self.inner.config.orientation.token());
        if disabled {
            attrs.set_bool("aria-disabled", true);
        }
        attrs
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

impl std::fmt::Debug for SliderController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderController")
            .field("id", &self.inner.id)
            .field("range", &self.inner.range)
            .field("value", &self.value())
            .finish_non_exhaustive()
    }
}
