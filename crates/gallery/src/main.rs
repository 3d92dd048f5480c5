use dioxus::prelude::*;
use widgets::components::{
    Accordion, AccordionItem, Button, ButtonSize, ButtonVariant, LoadingSpinner, Modal, ModalSize,
    SpinnerSize, Tooltip, TooltipPosition,
};

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

fn faq_items() -> Vec<AccordionItem> {
    vec![
        AccordionItem::new(
            "shipping",
            "How long does shipping take?",
            rsx! { p { "Orders ship within two business days." } },
        ),
        AccordionItem::new(
            "returns",
            "Can I return an item?",
            rsx! { p { "Unused items can be returned within 30 days." } },
        ),
        AccordionItem::new(
            "warranty",
            "Is there a warranty?",
            rsx! { p { "Warranty claims are handled by the manufacturer." } },
        )
        .disabled(true),
    ]
}

#[component]
fn App() -> Element {
    let mut modal_open = use_signal(|| false);
    let mut allow_multiple = use_signal(|| false);
    let mut last_change = use_signal(Vec::<String>::new);
    let expanded_label = last_change.read().join(", ");

    rsx! {
        main { class: "gallery",
            section {
                h1 { "Accordion" }
                Button {
                    label: if allow_multiple() { "Allow one open" } else { "Allow many open" },
                    variant: ButtonVariant::Secondary,
                    size: ButtonSize::Sm,
                    onclick: move |_| allow_multiple.toggle(),
                }
                Accordion {
                    items: faq_items(),
                    allow_multiple: allow_multiple(),
                    default_expanded: vec!["shipping".to_string()],
                    class: "gallery-faq",
                    on_change: move |ids: Vec<String>| {
                        tracing::info!(?ids, "accordion changed");
                        last_change.set(ids);
                    },
                }
                p { "Expanded: {expanded_label}" }
            }
            section {
                h1 { "Buttons" }
                Button { label: "Primary" }
                Button { label: "Secondary", variant: ButtonVariant::Secondary }
                Button { label: "Danger", variant: ButtonVariant::Danger, size: ButtonSize::Lg }
                Button { label: "Disabled", disabled: true }
            }
            section {
                h1 { "Spinner" }
                LoadingSpinner { size: SpinnerSize::Small }
                LoadingSpinner {}
                LoadingSpinner { size: SpinnerSize::Large, color: "#dc2626" }
            }
            section {
                h1 { "Tooltip" }
                Tooltip { content: "Saved to your account", position: TooltipPosition::Bottom,
                    Button { label: "Hover me", variant: ButtonVariant::Secondary }
                }
            }
            section {
                h1 { "Modal" }
                Button { label: "Open modal", onclick: move |_| modal_open.set(true) }
                Modal {
                    open: modal_open(),
                    on_close: move |_| modal_open.set(false),
                    title: "Confirm",
                    size: ModalSize::Sm,
                    p { "Press Escape or click outside to close." }
                }
            }
        }
    }
}
