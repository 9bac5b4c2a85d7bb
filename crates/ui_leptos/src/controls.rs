use std::rc::Rc;

use leptos::ev::{FocusEvent, KeyboardEvent, MouseEvent};
use leptos::*;
use ui_headless::{
    bool_token, ButtonCallbacks, ButtonConfig, ButtonController, ButtonVariant, InputCallbacks,
    InputConfig, InputController, InputProps, InputType, Size, ValidationResult, Validator,
};
use ui_style::{button_class, input_class, INPUT_ERROR_TEXT};

use crate::{
    events::{apply_control, key_input},
    use_ui_context,
};

#[component]
/// Button bound to a [`ButtonController`].
///
/// Enter and Space activate the button once; the native click the browser
/// would synthesize is suppressed. `loading` disables the button and swaps
/// the accessible label for `loading_text`.
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] size: Size,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] aria_described_by: Option<String>,
    #[prop(optional, into)] loading_text: Option<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] loading: MaybeSignal<bool>,
    #[prop(optional)] on_click: Option<Callback<()>>,
    #[prop(optional)] on_focus: Option<Callback<()>>,
    #[prop(optional)] on_blur: Option<Callback<()>>,
    children: Children,
) -> impl IntoView {
    let ctx = use_ui_context();
    let revision = create_rw_signal(0_u64);
    let refresh = move || revision.update(|revision| *revision += 1);

    let controller = store_value(ButtonController::new(
        &ctx,
        ButtonConfig {
            id,
            disabled: disabled.get_untracked(),
            variant,
            size,
            loading: loading.get_untracked(),
            loading_text,
            aria_label,
            aria_described_by,
        },
        ButtonCallbacks {
            on_click: on_click.map(unit_callback),
            on_key_down: None,
            on_focus: on_focus.map(unit_callback),
            on_blur: on_blur.map(unit_callback),
        },
    ));

    create_effect(move |_| {
        let disabled = disabled.get();
        let loading = loading.get();
        controller.with_value(|button| {
            button.set_disabled(disabled);
            button.set_loading(loading);
        });
        refresh();
    });

    let props = create_memo(move |_| {
        revision.get();
        controller.with_value(ButtonController::props)
    });

    view! {
        <button
            type=props.with_untracked(|props| props.button_type)
            id=props.with_untracked(|props| props.id.clone())
            class=move || button_class(variant, size, props.with(|props| props.aria_busy), layout_class)
            disabled=move || props.with(|props| props.disabled)
            aria-label=move || props.with(|props| props.aria_label.clone())
            aria-describedby=move || props.with(|props| props.aria_described_by.clone())
            aria-pressed=move || bool_token(props.with(|props| props.aria_pressed))
            aria-busy=move || bool_token(props.with(|props| props.aria_busy))
            data-ui-primitive="true"
            data-ui-kind="button"
            data-state=move || props.with(|props| props.data_state)
            data-variant=variant.token()
            data-size=size.token()
            on:click=move |ev: MouseEvent| {
                let control = controller.with_value(ButtonController::on_click);
                apply_control(&ev, control);
                refresh();
            }
            on:keydown=move |ev: KeyboardEvent| {
                let input = key_input(&ev);
                let control = controller.with_value(|button| button.on_key_down(&input));
                apply_control(&ev, control);
                refresh();
            }
            on:keyup=move |ev: KeyboardEvent| {
                let input = key_input(&ev);
                controller.with_value(|button| button.on_key_up(&input));
                refresh();
            }
            on:focus=move |_: FocusEvent| {
                controller.with_value(ButtonController::on_focus);
                refresh();
            }
            on:blur=move |_: FocusEvent| {
                controller.with_value(ButtonController::on_blur);
                refresh();
            }
            on:mouseenter=move |_: MouseEvent| {
                controller.with_value(ButtonController::on_mouse_enter);
                refresh();
            }
            on:mouseleave=move |_: MouseEvent| {
                controller.with_value(ButtonController::on_mouse_leave);
                refresh();
            }
            on:mousedown=move |_: MouseEvent| {
                controller.with_value(ButtonController::on_mouse_down);
                refresh();
            }
            on:mouseup=move |_: MouseEvent| {
                controller.with_value(ButtonController::on_mouse_up);
                refresh();
            }
        >
            {children()}
        </button>
    }
}

#[component]
/// Text input bound to an [`InputController`].
///
/// Leaving the field runs the built-in rules and `validators`; the first
/// error is rendered under the input and linked through `aria-describedby`.
pub fn TextField(
    #[prop(optional)] input_type: InputType,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] value: String,
    #[prop(optional, into)] default_value: String,
    #[prop(optional, into)] placeholder: String,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] aria_described_by: Option<String>,
    #[prop(optional, into)] auto_complete: Option<String>,
    #[prop(optional)] auto_focus: bool,
    #[prop(optional)] required: bool,
    #[prop(optional)] read_only: bool,
    #[prop(optional)] min_length: Option<usize>,
    #[prop(optional)] max_length: Option<usize>,
    #[prop(optional, into)] pattern: Option<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional)] validators: Vec<Rc<dyn Validator>>,
    #[prop(optional)] on_input: Option<Callback<String>>,
    #[prop(optional)] on_change: Option<Callback<String>>,
    #[prop(optional)] on_validate: Option<Callback<ValidationResult>>,
) -> impl IntoView {
    let ctx = use_ui_context();
    let revision = create_rw_signal(0_u64);
    let refresh = move || revision.update(|revision| *revision += 1);

    let controller = store_value(InputController::new(
        &ctx,
        InputConfig {
            id,
            input_type,
            value,
            default_value,
            placeholder,
            disabled: disabled.get_untracked(),
            required,
            read_only,
            auto_complete,
            auto_focus,
            max_length,
            min_length,
            pattern,
            aria_label,
            aria_described_by,
            ..InputConfig::default()
        },
        InputCallbacks {
            validators,
            on_change: on_change.map(string_callback),
            on_input: on_input.map(string_callback),
            ..InputCallbacks::default()
        },
    ));

    create_effect(move |_| {
        let disabled = disabled.get();
        controller.with_value(|field| field.set_disabled(disabled));
        refresh();
    });

    let props = create_memo(move |_| {
        revision.get();
        controller.with_value(InputController::props)
    });
    let validation = create_memo(move |_| {
        revision.get();
        controller.with_value(InputController::validation)
    });
    let error_id = error_id(&props.with_untracked(|props| props.id.clone()));

    view! {
        <input
            id=props.with_untracked(|props| props.id.clone())
            type=props.with_untracked(|props| props.input_type)
            class=move || input_class(props.with(|props| props.aria_invalid), layout_class)
            placeholder=props.with_untracked(|props| props.placeholder.clone())
            prop:value=move || props.with(|props| props.value.clone())
            disabled=move || props.with(|props| props.disabled)
            required=props.with_untracked(|props| props.required)
            readonly=props.with_untracked(|props| props.read_only)
            autocomplete=props.with_untracked(|props| props.auto_complete.clone())
            autofocus=props.with_untracked(|props| props.auto_focus)
            maxlength=props.with_untracked(|props| props.max_length)
            minlength=props.with_untracked(|props| props.min_length)
            pattern=props.with_untracked(|props| props.pattern.clone())
            aria-label=props.with_untracked(|props| props.aria_label.clone())
            aria-describedby=move || props.with(described_by)
            aria-invalid=move || bool_token(props.with(|props| props.aria_invalid))
            aria-required=move || bool_token(props.with(|props| props.aria_required))
            data-ui-primitive="true"
            data-ui-kind="text-field"
            data-state=move || props.with(|props| props.data_state)
            on:input=move |ev| {
                let value = event_target_value(&ev);
                controller.with_value(|field| field.on_input(value));
                refresh();
            }
            on:change=move |ev| {
                let value = event_target_value(&ev);
                controller.with_value(|field| field.on_change(value));
                refresh();
            }
            on:keydown=move |ev: KeyboardEvent| {
                let input = key_input(&ev);
                controller.with_value(|field| field.on_key_down(&input));
            }
            on:focus=move |_: FocusEvent| {
                controller.with_value(InputController::on_focus);
                refresh();
            }
            on:blur=move |_: FocusEvent| {
                let pending = controller.with_value(InputController::on_blur);
                refresh();
                spawn_local(async move {
                    match pending.await {
                        Ok(result) => {
                            if let Some(on_validate) = on_validate {
                                on_validate.call(result);
                            }
                        }
                        Err(err) => logging::warn!("text field validation failed: {err}"),
                    }
                    revision.try_update(|revision| *revision += 1);
                });
            }
        />
        {move || {
            first_error(&validation.get()).map(|message| {
                view! {
                    <p id=error_id.clone() class=INPUT_ERROR_TEXT role="alert" data-ui-kind="field-error">
                        {message}
                    </p>
                }
            })
        }}
    }
}

fn unit_callback(callback: Callback<()>) -> Rc<dyn Fn()> {
    Rc::new(move || callback.call(()))
}

fn string_callback(callback: Callback<String>) -> Rc<dyn Fn(&str)> {
    Rc::new(move |value: &str| callback.call(value.to_string()))
}

fn error_id(field_id: &str) -> String {
    format!("{field_id}-error")
}

fn first_error(result: &ValidationResult) -> Option<String> {
    if result.valid {
        None
    } else {
        result.errors.first().cloned()
    }
}

/// `aria-describedby` for the field: caller ids, plus the error message
/// while the field is invalid.
fn described_by(props: &InputProps) -> Option<String> {
    let error = props.aria_invalid.then(|| error_id(&props.id));
    match (props.aria_described_by.as_deref(), error) {
        (Some(own), Some(error)) => Some(format!("{own} {error}")),
        (Some(own), None) => Some(own.to_string()),
        (None, error) => error,
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;
    use ui_headless::UiContext;

    use super::*;

    fn field(config: InputConfig) -> InputController {
        InputController::new(&UiContext::headless(), config, InputCallbacks::default())
    }

    #[test]
    fn error_message_is_linked_only_while_invalid() {
        let field = field(InputConfig {
            id: Some("email".to_string()),
            aria_described_by: Some("email-hint".to_string()),
            required: true,
            ..InputConfig::default()
        });
        assert_eq!(described_by(&field.props()), Some("email-hint".to_string()));

        block_on(field.validate()).expect("validate");
        assert_eq!(
            described_by(&field.props()),
            Some("email-hint email-error".to_string())
        );
        assert_eq!(first_error(&field.validation()), Some("This field is required".to_string()));
    }

    #[test]
    fn valid_fields_render_no_error() {
        let field = field(InputConfig {
            id: Some("name".to_string()),
            value: "Ada".to_string(),
            ..InputConfig::default()
        });
        block_on(field.validate()).expect("validate");
        assert_eq!(first_error(&field.validation()), None);
        assert_eq!(described_by(&field.props()), None);
    }
}
