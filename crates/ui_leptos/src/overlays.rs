use std::rc::Rc;

use leptos::ev::{KeyboardEvent, MouseEvent};
use leptos::*;
use ui_headless::{
    ModalCallbacks, ModalConfig, ModalController, ModalProps as ModalDomProps,
};
use ui_style::{
    modal_content_class, MODAL_CLOSE, MODAL_DESCRIPTION, MODAL_OVERLAY, MODAL_TITLE,
};

use crate::{
    events::{apply_control, key_input, targets_self},
    use_ui_context,
};

const BARE_OVERLAY: &str = "fixed inset-0 z-50";

#[component]
/// Modal dialog bound to a [`ModalController`] and driven by `open`.
///
/// Setting `open` opens or closes the dialog; closing from inside (Escape,
/// backdrop click, close button) writes `false` back. A dialog that is not
/// `closable` keeps `open` at `true`.
pub fn Modal(
    /// Open state shared with the caller.
    open: RwSignal<bool>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] title: String,
    #[prop(optional, into)] description: String,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(default = true)] closable: bool,
    #[prop(default = true)] backdrop: bool,
    #[prop(default = true)] close_on_escape: bool,
    #[prop(default = true)] close_on_backdrop: bool,
    #[prop(default = true)] prevent_scroll: bool,
    #[prop(default = true)] auto_focus: bool,
    #[prop(default = true)] restore_focus: bool,
    #[prop(optional)] on_open: Option<Callback<()>>,
    #[prop(optional)] on_close: Option<Callback<()>>,
    children: ChildrenFn,
) -> impl IntoView {
    let ctx = use_ui_context();
    let revision = create_rw_signal(0_u64);
    let refresh = move || revision.update(|revision| *revision += 1);

    let heading = title.clone();
    let summary = description.clone();
    let controller = store_value(ModalController::new(
        &ctx,
        ModalConfig {
            id,
            open: open.get_untracked(),
            title,
            description,
            closable,
            backdrop,
            close_on_escape,
            close_on_backdrop,
            prevent_scroll,
            auto_focus,
            restore_focus,
            aria_label,
            aria_described_by: None,
        },
        ModalCallbacks {
            on_open: on_open.map(|on_open| Rc::new(move || on_open.call(())) as Rc<dyn Fn()>),
            on_close: Some(Rc::new(move || {
                open.set(false);
                if let Some(on_close) = on_close {
                    on_close.call(());
                }
            })),
            on_key_down: None,
        },
    ));

    create_effect(move |_| {
        let wanted = open.get();
        let actual = controller.with_value(|modal| {
            if wanted {
                modal.open();
            } else {
                modal.close();
            }
            modal.is_open()
        });
        refresh();
        if actual != wanted {
            logging::warn!("modal refused to close; keeping it open");
            open.set(actual);
        }
    });

    let is_open = create_memo(move |_| {
        revision.get();
        controller.with_value(ModalController::is_open)
    });
    let props = create_memo(move |_| {
        revision.get();
        controller.with_value(ModalController::props)
    });
    let dialog_id = props.with_untracked(|props| props.id.clone());
    let labels = DialogLabels::new(&dialog_id, &heading, &summary);
    let heading = store_value(heading);
    let summary = store_value(summary);
    let labels = store_value(labels);

    view! {
        <Show when=move || is_open.get()>
            <div
                class=if backdrop { MODAL_OVERLAY } else { BARE_OVERLAY }
                data-ui-primitive="true"
                data-ui-kind="modal-overlay"
                data-state=move || {
                    revision.get();
                    controller.with_value(|modal| modal.overlay_props().data_state)
                }
                on:click=move |ev: MouseEvent| {
                    let target_is_overlay = targets_self(&ev);
                    controller.with_value(|modal| modal.on_overlay_click(target_is_overlay));
                    refresh();
                }
            >
                <div
                    id=move || props.with(|props| props.id.clone())
                    role=move || props.with(|props| props.role)
                    aria-modal=move || props.with(|props| props.aria_modal.to_string())
                    aria-label=move || props.with(|props| props.aria_label.clone())
                    aria-labelledby=labels.with_value(|labels| labels.labelled_by.clone())
                    aria-describedby=move || props.with(|props| described_by(props, &labels.get_value()))
                    tabindex=move || props.with(|props| props.tab_index)
                    class=modal_content_class(layout_class)
                    data-ui-primitive="true"
                    data-ui-kind="modal"
                    data-state=move || props.with(|props| props.data_state)
                    on:keydown=move |ev: KeyboardEvent| {
                        let input = key_input(&ev);
                        let control = controller.with_value(|modal| modal.on_key_down(&input));
                        apply_control(&ev, control);
                        refresh();
                    }
                >
                    {labels.with_value(|labels| labels.title_id.clone()).map(|title_id| {
                        view! { <h2 id=title_id class=MODAL_TITLE>{heading.get_value()}</h2> }
                    })}
                    {labels.with_value(|labels| labels.description_id.clone()).map(|description_id| {
                        view! {
                            <p id=description_id class=MODAL_DESCRIPTION>{summary.get_value()}</p>
                        }
                    })}
                    {children()}
                    {closable.then(|| view! {
                        <button
                            type="button"
                            class=MODAL_CLOSE
                            aria-label="Close"
                            data-ui-kind="modal-close"
                            on:click=move |_: MouseEvent| {
                                controller.with_value(ModalController::close);
                                refresh();
                            }
                        >
                            "\u{00d7}"
                        </button>
                    })}
                </div>
            </div>
        </Show>
    }
}

/// Ids linking the dialog to its rendered title and description.
#[derive(Debug, Clone, PartialEq, Eq)]
struct DialogLabels {
    title_id: Option<String>,
    description_id: Option<String>,
    labelled_by: Option<String>,
}

impl DialogLabels {
    fn new(dialog_id: &str, title: &str, description: &str) -> Self {
        let title_id = (!title.is_empty()).then(|| format!("{dialog_id}-title"));
        let description_id = (!description.is_empty()).then(|| format!("{dialog_id}-description"));
        Self {
            labelled_by: title_id.clone(),
            title_id,
            description_id,
        }
    }
}

fn described_by(props: &ModalDomProps, labels: &DialogLabels) -> Option<String> {
    props
        .aria_described_by
        .clone()
        .or_else(|| labels.description_id.clone())
}
