use std::fmt;

/// Whether an accordion allows one or many panels open at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpansionPolicy {
    /// At most one panel is open; opening another closes the current one.
    #[default]
    Single,
    Multiple,
}

impl ExpansionPolicy {
    pub fn from_allow_multiple(allow_multiple: bool) -> Self {
        if allow_multiple {
            ExpansionPolicy::Multiple
        } else {
            ExpansionPolicy::Single
        }
    }
}

/// The part of a panel the controller cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSpec {
    pub id: String,
    pub disabled: bool,
}

impl PanelSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            disabled: false,
        }
    }

    pub fn disabled(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            disabled: true,
        }
    }
}

type Observer = Box<dyn FnMut(&[String])>;

/// Owns the set of expanded panel ids for one accordion.
///
/// The set keeps insertion order so observers always see a stable sequence.
/// Under [`ExpansionPolicy::Single`] it never holds more than one id.
pub struct ExpansionController {
    panels: Vec<PanelSpec>,
    policy: ExpansionPolicy,
    expanded: Vec<String>,
    observers: Vec<Observer>,
}

impl ExpansionController {
    /// Build a controller seeded with `default_expanded`.
    ///
    /// Unknown and repeated ids are dropped. Under the single policy only the
    /// first remaining id is kept.
    pub fn new<I, S>(panels: Vec<PanelSpec>, policy: ExpansionPolicy, default_expanded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut expanded: Vec<String> = Vec::new();
        for id in default_expanded {
            let id = id.as_ref();
            if !panels.iter().any(|p| p.id == id) {
                tracing::trace!(id, "dropping unknown default-expanded id");
                continue;
            }
            if expanded.iter().any(|e| e == id) {
                continue;
            }
            if policy == ExpansionPolicy::Single && !expanded.is_empty() {
                break;
            }
            expanded.push(id.to_string());
        }

        Self {
            panels,
            policy,
            expanded,
            observers: Vec::new(),
        }
    }

    pub fn policy(&self) -> ExpansionPolicy {
        self.policy
    }

    /// Currently expanded ids, in the order they were opened.
    pub fn expanded(&self) -> &[String] {
        &self.expanded
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.iter().any(|e| e == id)
    }

    /// Register a callback invoked after every mutation with the new sequence.
    pub fn subscribe(&mut self, observer: impl FnMut(&[String]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Toggle a panel open or closed.
    ///
    /// Disabled and unknown ids are ignored. Returns `true` when the expanded
    /// set changed, in which case every observer has been notified once.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(panel) = self.panels.iter().find(|p| p.id == id) else {
            tracing::trace!(id, "ignoring toggle for unknown panel");
            return false;
        };
        if panel.disabled {
            tracing::trace!(id, "ignoring toggle for disabled panel");
            return false;
        }

        if let Some(pos) = self.expanded.iter().position(|e| e == id) {
            self.expanded.remove(pos);
        } else {
            if self.policy == ExpansionPolicy::Single {
                self.expanded.clear();
            }
            self.expanded.push(id.to_string());
        }

        tracing::debug!(id, expanded = ?self.expanded, "accordion expansion changed");
        self.notify();
        true
    }

    /// Replace the known panel list, pruning expanded ids that no longer exist.
    ///
    /// Observers are notified only when pruning changed the expanded set,
    /// which is also what the return value reports.
    pub fn set_panels(&mut self, panels: Vec<PanelSpec>) -> bool {
        self.panels = panels;
        let before = self.expanded.len();
        let known = &self.panels;
        self.expanded.retain(|id| known.iter().any(|p| &p.id == id));
        if self.expanded.len() == before {
            return false;
        }
        tracing::debug!(expanded = ?self.expanded, "pruned removed panels");
        self.notify();
        true
    }

    pub fn panels(&self) -> &[PanelSpec] {
        &self.panels
    }

    /// Switch policy. Narrowing to single keeps only the most recently opened id.
    pub fn set_policy(&mut self, policy: ExpansionPolicy) -> bool {
        self.policy = policy;
        if policy == ExpansionPolicy::Multiple || self.expanded.len() <= 1 {
            return false;
        }
        let keep = self.expanded.split_off(self.expanded.len() - 1);
        self.expanded = keep;
        tracing::debug!(expanded = ?self.expanded, "narrowed to single expansion");
        self.notify();
        true
    }

    fn notify(&mut self) {
        for observer in self.observers.iter_mut() {
            observer(&self.expanded);
        }
    }
}

impl fmt::Debug for ExpansionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpansionController")
            .field("panels", &self.panels)
            .field("policy", &self.policy)
            .field("expanded", &self.expanded)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn abc() -> Vec<PanelSpec> {
        vec![PanelSpec::new("a"), PanelSpec::new("b"), PanelSpec::new("c")]
    }

    fn recorder(controller: &mut ExpansionController) -> Rc<RefCell<Vec<Vec<String>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        controller.subscribe(move |ids| sink.borrow_mut().push(ids.to_vec()));
        log
    }

    #[test]
    fn policy_from_flag() {
        assert_eq!(ExpansionPolicy::from_allow_multiple(false), ExpansionPolicy::Single);
        assert_eq!(ExpansionPolicy::from_allow_multiple(true), ExpansionPolicy::Multiple);
        assert_eq!(ExpansionPolicy::default(), ExpansionPolicy::Single);
    }

    #[test]
    fn single_policy_replaces_then_closes() {
        let mut c = ExpansionController::new(abc(), ExpansionPolicy::Single, ["a"]);
        let log = recorder(&mut c);

        assert!(c.toggle("b"));
        assert_eq!(c.expanded(), ["b".to_string()]);
        assert!(c.toggle("b"));
        assert!(c.expanded().is_empty());

        assert_eq!(*log.borrow(), vec![vec!["b".to_string()], vec![]]);
    }

    #[test]
    fn multiple_policy_accumulates_in_order() {
        let mut c = ExpansionController::new(abc(), ExpansionPolicy::Multiple, Vec::<String>::new());
        let log = recorder(&mut c);

        c.toggle("a");
        c.toggle("c");
        assert_eq!(c.expanded(), ["a".to_string(), "c".to_string()]);
        assert_eq!(log.borrow().last().cloned(), Some(vec!["a".to_string(), "c".to_string()]));

        c.toggle("a");
        assert_eq!(c.expanded(), ["c".to_string()]);
    }

    #[test]
    fn multiple_a_then_b_then_a() {
        let mut c = ExpansionController::new(abc(), ExpansionPolicy::Multiple, Vec::<&str>::new());
        c.toggle("a");
        c.toggle("b");
        assert!(c.is_expanded("a") && c.is_expanded("b"));
        c.toggle("a");
        assert_eq!(c.expanded(), ["b".to_string()]);
    }

    #[test]
    fn single_policy_never_exceeds_one() {
        let mut c = ExpansionController::new(abc(), ExpansionPolicy::Single, Vec::<&str>::new());
        for id in ["a", "b", "b", "c", "a", "a", "c", "b", "x", "c"] {
            c.toggle(id);
            assert!(c.expanded().len() <= 1, "after toggling {id}: {:?}", c.expanded());
        }
    }

    #[test]
    fn double_toggle_is_an_involution() {
        for policy in [ExpansionPolicy::Single, ExpansionPolicy::Multiple] {
            let mut c = ExpansionController::new(abc(), policy, Vec::<&str>::new());
            c.toggle("a");
            let before = c.expanded().to_vec();
            c.toggle("c");
            c.toggle("c");
            // Under Single, closing "c" cannot reopen "a".
            if policy == ExpansionPolicy::Multiple {
                assert_eq!(c.expanded(), before.as_slice());
            }

            let before = c.expanded().to_vec();
            c.toggle("a");
            c.toggle("a");
            assert_eq!(c.expanded(), before.as_slice(), "policy {policy:?}");
        }
    }

    #[test]
    fn disabled_panel_is_a_noop() {
        let panels = vec![PanelSpec::new("a"), PanelSpec::disabled("b")];
        let mut c = ExpansionController::new(panels, ExpansionPolicy::Multiple, ["a"]);
        let log = recorder(&mut c);

        assert!(!c.toggle("b"));
        assert_eq!(c.expanded(), ["a".to_string()]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let mut c = ExpansionController::new(abc(), ExpansionPolicy::Single, ["a"]);
        let log = recorder(&mut c);

        assert!(!c.toggle("zzz"));
        assert_eq!(c.expanded(), ["a".to_string()]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn observer_fires_once_per_toggle() {
        let mut c = ExpansionController::new(abc(), ExpansionPolicy::Multiple, Vec::<&str>::new());
        let log = recorder(&mut c);
        c.toggle("a");
        c.toggle("b");
        c.toggle("a");
        assert_eq!(
            *log.borrow(),
            vec![
                vec!["a".to_string()],
                vec!["a".to_string(), "b".to_string()],
                vec!["b".to_string()],
            ]
        );
    }

    #[test]
    fn defaults_are_filtered() {
        let c = ExpansionController::new(abc(), ExpansionPolicy::Multiple, ["c", "zzz", "a", "c"]);
        assert_eq!(c.expanded(), ["c".to_string(), "a".to_string()]);

        let c = ExpansionController::new(abc(), ExpansionPolicy::Single, ["b", "c"]);
        assert_eq!(c.expanded(), ["b".to_string()]);
    }

    #[test]
    fn set_panels_prunes_removed_ids() {
        let mut c = ExpansionController::new(abc(), ExpansionPolicy::Multiple, ["a", "b"]);
        let log = recorder(&mut c);

        c.set_panels(vec![PanelSpec::new("b"), PanelSpec::new("c")]);
        assert_eq!(c.expanded(), ["b".to_string()]);
        assert_eq!(*log.borrow(), vec![vec!["b".to_string()]]);

        assert!(!c.set_panels(vec![PanelSpec::new("b")]));
        assert_eq!(log.borrow().len(), 1);
        assert!(!c.toggle("a"));
    }

    #[test]
    fn narrowing_policy_keeps_latest() {
        let mut c = ExpansionController::new(abc(), ExpansionPolicy::Multiple, ["a", "c", "b"]);
        let log = recorder(&mut c);

        assert!(c.set_policy(ExpansionPolicy::Single));
        assert_eq!(c.expanded(), ["b".to_string()]);
        assert_eq!(*log.borrow(), vec![vec!["b".to_string()]]);

        assert!(!c.set_policy(ExpansionPolicy::Multiple));
        c.toggle("a");
        assert_eq!(c.expanded(), ["b".to_string(), "a".to_string()]);
    }
}
