use std::rc::Rc;

use dioxus::core::Task;
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::FaChevronDown;
use dioxus_free_icons::Icon;

use super::{ExpansionController, ExpansionPolicy, PanelAnimator, PanelSpec, Schedule, TransitionConfig};
use crate::schedule;

/// One collapsible section of an [`Accordion`].
#[derive(Clone, PartialEq)]
pub struct AccordionItem {
    pub id: String,
    pub title: String,
    pub content: Element,
    pub disabled: bool,
}

impl AccordionItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: Element) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content,
            disabled: false,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct AccordionProps {
    pub items: Vec<AccordionItem>,
    #[props(default = false)]
    pub allow_multiple: bool,
    #[props(default)]
    pub default_expanded: Vec<String>,
    /// Called after every change with the expanded ids in the order they opened.
    #[props(default)]
    pub on_change: Option<EventHandler<Vec<String>>>,
    #[props(default, into)]
    pub class: String,
    #[props(default)]
    pub transition: TransitionConfig,
}

/// DOM id of a panel's trigger button.
pub fn trigger_id(panel_id: &str) -> String {
    format!("trigger-{panel_id}")
}

/// DOM id of a panel's content region.
pub fn region_id(panel_id: &str) -> String {
    format!("panel-{panel_id}")
}

fn accordion_class(extra: &str) -> String {
    let extra = extra.trim();
    if extra.is_empty() {
        "accordion".to_string()
    } else {
        format!("accordion {extra}")
    }
}

/// Enter and Space toggle a focused trigger.
pub fn is_activation_key(key: &Key) -> bool {
    match key {
        Key::Enter => true,
        Key::Character(c) => c == " ",
        _ => false,
    }
}

fn panel_specs(items: &[AccordionItem]) -> Vec<PanelSpec> {
    items
        .iter()
        .map(|item| PanelSpec {
            id: item.id.clone(),
            disabled: item.disabled,
        })
        .collect()
}

/// Handle to the enclosing [`Accordion`], provided as context to its panels.
#[derive(Clone, Copy)]
pub struct AccordionHandle {
    controller: Signal<ExpansionController>,
}

impl AccordionHandle {
    /// Toggle a panel. Disabled and unknown ids are ignored.
    ///
    /// `on_change` runs before this returns, once per actual change.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.controller.write().toggle(id)
    }

    pub fn expanded(&self) -> Vec<String> {
        self.controller.read().expanded().to_vec()
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.controller.read().is_expanded(id)
    }
}

/// Hook to access the enclosing accordion.
pub fn use_accordion() -> AccordionHandle {
    use_context::<AccordionHandle>()
}

/// Accessible accordion with single or multiple expansion and animated panels.
///
/// `on_change` is registered as the controller's observer, so it fires for
/// toggles and for prop changes that prune or narrow the expanded set. It
/// must not toggle the same accordion re-entrantly.
#[component]
pub fn Accordion(props: AccordionProps) -> Element {
    let latest_on_change = use_hook(|| CopyValue::new(props.on_change));
    if *latest_on_change.peek() != props.on_change {
        let mut latest_on_change = latest_on_change;
        latest_on_change.set(props.on_change);
    }

    let controller = use_signal(|| {
        let mut controller = ExpansionController::new(
            panel_specs(&props.items),
            ExpansionPolicy::from_allow_multiple(props.allow_multiple),
            props.default_expanded.iter(),
        );
        controller.subscribe(move |ids| {
            if let Some(handler) = *latest_on_change.peek() {
                handler.call(ids.to_vec());
            }
        });
        controller
    });
    let handle = use_context_provider(|| AccordionHandle { controller });

    // Keep the controller in step with the items and policy it was given.
    let specs = panel_specs(&props.items);
    let allow_multiple = props.allow_multiple;
    use_effect(use_reactive(
        (&specs, &allow_multiple),
        move |(specs, allow_multiple)| {
            let mut controller = handle.controller;
            if controller.peek().panels() != specs.as_slice() {
                controller.write().set_panels(specs);
            }
            let policy = ExpansionPolicy::from_allow_multiple(allow_multiple);
            if controller.peek().policy() != policy {
                controller.write().set_policy(policy);
            }
        },
    ));

    let transition = props.transition.clone();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: accordion_class(&props.class),
            role: "presentation",
            for item in props.items.iter() {
                AccordionPanel {
                    key: "{item.id}",
                    item: item.clone(),
                    expanded: controller.read().is_expanded(&item.id),
                    transition: transition.clone(),
                }
            }
        }
    }
}

/// A single panel: trigger button plus animated content region.
///
/// Must be rendered inside an [`Accordion`].
#[component]
pub fn AccordionPanel(
    item: AccordionItem,
    expanded: bool,
    #[props(default)] transition: TransitionConfig,
) -> Element {
    let mut accordion = use_accordion();
    let mut animator = use_signal(|| PanelAnimator::new(expanded, transition.clone()));
    let mut region = use_signal(|| None::<Rc<MountedData>>);
    let mut pending = use_signal(|| None::<Task>);

    use_effect(use_reactive((&transition,), move |(transition,)| {
        if animator.peek().config() != &transition {
            animator.write().set_config(transition);
        }
    }));

    use_effect(use_reactive((&expanded,), move |(expanded,)| {
        // Any in-flight transition is stale once the target flips, even one
        // still measuring that has not touched the animator yet.
        if let Some(task) = pending.take() {
            task.cancel();
        }
        let task = if animator.peek().is_expanding_or_open() == expanded {
            // Already heading there; re-arm whatever the cancelled task owed.
            let Some(step) = animator.write().resume() else {
                return;
            };
            spawn(drive(animator, Some(step)))
        } else {
            spawn(async move {
                let height = measure(region, expanded).await;
                start_transition(animator, expanded, height).await;
            })
        };
        pending.set(Some(task));
    }));

    let trigger = trigger_id(&item.id);
    let panel = region_id(&item.id);
    let style = animator.read().style();
    let icon_style = if expanded {
        "transform: rotate(180deg);"
    } else {
        "transform: rotate(0);"
    };
    let click_id = item.id.clone();
    let key_id = item.id.clone();

    rsx! {
        div {
            class: "accordion-item",
            "data-state": if expanded { "open" } else { "closed" },
            button {
                class: "accordion-trigger",
                r#type: "button",
                id: "{trigger}",
                "aria-expanded": if expanded { "true" } else { "false" },
                "aria-controls": "{panel}",
                disabled: item.disabled,
                onclick: move |_| {
                    accordion.toggle(&click_id);
                },
                onkeydown: move |evt: KeyboardEvent| {
                    if is_activation_key(&evt.key()) {
                        evt.prevent_default();
                        accordion.toggle(&key_id);
                    }
                },
                span { "{item.title}" }
                span {
                    class: "accordion-icon",
                    style: icon_style,
                    Icon::<FaChevronDown> { icon: FaChevronDown, width: 12, height: 12 }
                }
            }
            div {
                id: "{panel}",
                role: "region",
                "aria-labelledby": "{trigger}",
                style: "{style}",
                onmounted: move |evt| region.set(Some(evt.data())),
                div { class: "accordion-content", {item.content.clone()} }
            }
        }
    }
}

/// Natural height when opening, rendered height when closing.
async fn measure(region: Signal<Option<Rc<MountedData>>>, expanded: bool) -> Option<f64> {
    let mounted = (*region.peek()).clone()?;
    let measured = if expanded {
        mounted.get_scroll_size().await.map(|size| size.height)
    } else {
        mounted.get_client_rect().await.map(|rect| rect.size.height)
    };
    match measured {
        Ok(height) => Some(height),
        Err(e) => {
            tracing::warn!(error = ?e, "could not measure accordion panel");
            None
        }
    }
}

async fn start_transition(mut animator: Signal<PanelAnimator>, expanded: bool, height: Option<f64>) {
    let Some(height) = height else {
        animator.write().jump_to(expanded);
        return;
    };
    let first = if expanded {
        animator.write().expand(height)
    } else {
        animator.write().collapse(height)
    };
    drive(animator, first).await;
}

/// Step the animator through its scheduled callbacks until it comes to rest.
async fn drive(mut animator: Signal<PanelAnimator>, mut next: Option<Schedule>) {
    while let Some(step) = next {
        next = match step {
            Schedule::NextFrame { generation } => {
                schedule::next_frame().await;
                animator.write().on_frame(generation)
            }
            Schedule::After {
                generation,
                delay_ms,
            } => {
                schedule::sleep(delay_ms).await;
                animator.write().on_timer(generation);
                None
            }
        };
    }
}
