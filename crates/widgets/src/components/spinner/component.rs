use dioxus::prelude::*;

pub const DEFAULT_SPINNER_COLOR: &str = "#3b82f6";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SpinnerSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl SpinnerSize {
    pub fn class(&self) -> &'static str {
        match self {
            SpinnerSize::Small => "small",
            SpinnerSize::Medium => "medium",
            SpinnerSize::Large => "large",
        }
    }
}

/// An indeterminate rotating ring.
#[component]
pub fn LoadingSpinner(
    #[props(default)] size: SpinnerSize,
    #[props(into, default = DEFAULT_SPINNER_COLOR.to_string())] color: String,
    #[props(into, default = "Loading".to_string())] label: String,
) -> Element {
    let size_class = size.class();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "spinner spinner-{size_class}",
            role: "status",
            "aria-label": "{label}",
            style: "border-color: {color};",
            div {}
        }
    }
}
