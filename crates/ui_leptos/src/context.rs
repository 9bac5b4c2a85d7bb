use std::rc::Rc;

use leptos::*;
use ui_headless::UiContext;
use ui_host_web::WebUiEnvironment;

thread_local! {
    static PAGE_CONTEXT: UiContext = UiContext::new(Rc::new(WebUiEnvironment::new()));
}

/// The document-wide context. Every provider and fallback shares its id
/// registry, so generated ids stay unique across render roots.
fn page_context() -> UiContext {
    PAGE_CONTEXT.with(UiContext::clone)
}

#[component]
/// Provides the shared [`UiContext`] (document environment and id registry)
/// to descendant components.
pub fn UiProvider(children: Children) -> impl IntoView {
    provide_context(page_context());
    children()
}

/// Returns the nearest [`UiContext`], falling back to the page context when
/// no [`UiProvider`] is mounted above.
pub fn use_ui_context() -> UiContext {
    use_context::<UiContext>().unwrap_or_else(|| {
        logging::warn!("ui context requested outside UiProvider; using the page context");
        let ctx = page_context();
        provide_context(ctx.clone());
        ctx
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Button;

    fn generated_button_ids(html: &str) -> Vec<String> {
        html.split("id=\"")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
            .filter(|id| id.starts_with("button-"))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn separate_providers_never_reuse_ids() {
        let html = leptos::ssr::render_to_string(|| {
            view! {
                <UiProvider><Button>"Save"</Button></UiProvider>
                <UiProvider><Button>"Cancel"</Button></UiProvider>
            }
        });
        let ids = generated_button_ids(&html);
        assert_eq!(ids.len(), 2);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 2);
    }

    #[test]
    fn siblings_outside_a_provider_never_reuse_ids() {
        let html = leptos::ssr::render_to_string(|| {
            view! {
                <Button>"One"</Button>
                <Button>"Two"</Button>
            }
        });
        let ids = generated_button_ids(&html);
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn page_context_is_shared() {
        let first = page_context();
        let second = page_context();
        let a = first.ids().next_id("field");
        let b = second.ids().next_id("field");
        assert_ne!(a, b);
    }
}
