use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use dioxus::core::Task;
use dioxus::document::Document;
use dioxus::prelude::*;

/// Maximum width of the modal panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ModalSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl ModalSize {
    pub fn max_width(&self) -> &'static str {
        match self {
            ModalSize::Sm => "400px",
            ModalSize::Md => "600px",
            ModalSize::Lg => "800px",
        }
    }
}

static NEXT_MODAL_ID: AtomicU64 = AtomicU64::new(1);

// Each open modal registers its own Escape handler under its id. The page
// stays scroll-locked while any modal remains registered.
const ACQUIRE_JS: &str = r#"
const modals = (window.__widgetsModals = window.__widgetsModals || {});
const onKeydown = function (e) {
    if (e.key === 'Escape') { dioxus.send(e.key); }
};
modals['__MODAL_ID__'] = onKeydown;
document.addEventListener('keydown', onKeydown);
document.body.style.overflow = 'hidden';
"#;

const RELEASE_JS: &str = r#"
const modals = window.__widgetsModals || {};
const onKeydown = modals['__MODAL_ID__'];
if (onKeydown) {
    document.removeEventListener('keydown', onKeydown);
    delete modals['__MODAL_ID__'];
}
if (Object.keys(modals).length === 0) {
    document.body.style.overflow = 'unset';
}
"#;

fn acquire_script(id: u64) -> String {
    ACQUIRE_JS.replace("__MODAL_ID__", &id.to_string())
}

fn release_script(id: u64) -> String {
    RELEASE_JS.replace("__MODAL_ID__", &id.to_string())
}

/// Page scroll lock plus this modal's Escape listener, held while it is open.
///
/// State lives in `Rc<Cell<_>>` rather than signals so `release` still works
/// from `use_drop`, after the scope's signals may be gone.
#[derive(Clone)]
struct ModalScope {
    id: u64,
    document: Rc<dyn Document>,
    held: Rc<Cell<bool>>,
    listener: Rc<Cell<Option<Task>>>,
}

impl ModalScope {
    fn new(document: Rc<dyn Document>) -> Self {
        Self {
            id: NEXT_MODAL_ID.fetch_add(1, Ordering::Relaxed),
            document,
            held: Rc::new(Cell::new(false)),
            listener: Rc::new(Cell::new(None)),
        }
    }

    fn acquire(&self, on_close: EventHandler<()>) {
        if self.held.replace(true) {
            return;
        }
        tracing::debug!(modal = self.id, "modal opened: locking scroll");
        let mut eval = self.document.eval(acquire_script(self.id));
        let task = spawn(async move {
            loop {
                match eval.recv::<String>().await {
                    Ok(key) if key == "Escape" => on_close.call(()),
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(error = ?e, "modal key listener closed");
                        break;
                    }
                }
            }
        });
        self.listener.set(Some(task));
    }

    fn release(&self) {
        if !self.held.replace(false) {
            return;
        }
        tracing::debug!(modal = self.id, "modal closed: releasing scroll lock");
        if let Some(task) = self.listener.take() {
            task.cancel();
        }
        let _ = self.document.eval(release_script(self.id));
    }
}

/// A dialog over a dimmed overlay.
///
/// While open the page cannot scroll and Escape closes it. Clicking the
/// overlay outside the panel also closes it.
#[component]
pub fn Modal(
    open: bool,
    on_close: EventHandler<()>,
    #[props(into)] title: String,
    #[props(default)] size: ModalSize,
    children: Element,
) -> Element {
    let scope = use_hook(|| ModalScope::new(document::document()));

    {
        let scope = scope.clone();
        use_effect(use_reactive((&open,), move |(open,)| {
            if open {
                scope.acquire(on_close);
            } else {
                scope.release();
            }
        }));
    }
    {
        let scope = scope.clone();
        use_drop(move || scope.release());
    }

    if !open {
        return rsx! {};
    }

    let max_width = size.max_width();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-content",
                role: "dialog",
                "aria-modal": "true",
                style: "max-width: {max_width};",
                onclick: move |evt| evt.stop_propagation(),
                div { class: "modal-header",
                    h2 { "{title}" }
                    button {
                        class: "modal-close",
                        r#type: "button",
                        "aria-label": "Close",
                        onclick: move |_| on_close.call(()),
                        "\u{00D7}"
                    }
                }
                div { class: "modal-body", {children} }
            }
        }
    }
}
