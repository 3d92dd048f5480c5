use dioxus::prelude::*;

/// Which side of its anchor the tooltip bubble appears on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TooltipPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl TooltipPosition {
    pub fn class(&self) -> &'static str {
        match self {
            TooltipPosition::Top => "top",
            TooltipPosition::Bottom => "bottom",
            TooltipPosition::Left => "left",
            TooltipPosition::Right => "right",
        }
    }
}

/// Shows `content` beside its children while hovered or focused.
#[component]
pub fn Tooltip(
    #[props(into)] content: String,
    #[props(default)] position: TooltipPosition,
    children: Element,
) -> Element {
    let mut visible = use_signal(|| false);
    let side = position.class();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "tooltip-anchor",
            onmouseenter: move |_| visible.set(true),
            onmouseleave: move |_| visible.set(false),
            onfocusin: move |_| visible.set(true),
            onfocusout: move |_| visible.set(false),
            {children}
            if visible() {
                div {
                    class: "tooltip tooltip-{side}",
                    role: "tooltip",
                    "{content}"
                }
            }
        }
    }
}
