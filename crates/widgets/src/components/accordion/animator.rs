/// Duration and easing of the accordion's height transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionConfig {
    pub duration_ms: u32,
    pub easing: String,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            easing: "ease".to_string(),
        }
    }
}

/// Where a panel is in its open/close animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationState {
    /// At rest, height 0.
    Collapsed,
    /// Animating towards the measured natural height.
    Expanding(f64),
    /// At rest, height auto.
    Open,
    /// Animating from `from` down to zero. `at_zero` flips once the
    /// animation frame after pinning the height has run.
    Collapsing { from: f64, at_zero: bool },
}

/// A follow-up the host runtime must deliver back to the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Call [`PanelAnimator::on_frame`] after the next paint.
    NextFrame { generation: u64 },
    /// Call [`PanelAnimator::on_timer`] after `delay_ms`.
    After { generation: u64, delay_ms: u32 },
}

impl Schedule {
    pub fn generation(&self) -> u64 {
        match self {
            Schedule::NextFrame { generation } | Schedule::After { generation, .. } => *generation,
        }
    }
}

/// Per-panel height animation between collapsed and natural height.
///
/// CSS cannot transition to or from `height: auto`, so expanding animates to
/// a measured pixel height and then snaps to `auto`, and collapsing first
/// pins the current height before dropping to zero on the next frame.
///
/// Every transition bumps a generation counter. Callbacks carrying an older
/// generation are stale and ignored, so only the latest transition can
/// reach a terminal state.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelAnimator {
    state: AnimationState,
    generation: u64,
    config: TransitionConfig,
}

impl PanelAnimator {
    pub fn new(expanded: bool, config: TransitionConfig) -> Self {
        Self {
            state: if expanded {
                AnimationState::Open
            } else {
                AnimationState::Collapsed
            },
            generation: 0,
            config,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: TransitionConfig) {
        self.config = config;
    }

    /// Whether the panel is open or heading towards open.
    pub fn is_expanding_or_open(&self) -> bool {
        matches!(self.state, AnimationState::Expanding(_) | AnimationState::Open)
    }

    /// Start expanding towards the measured natural content height.
    ///
    /// Returns `None` when the panel is already open or expanding.
    pub fn expand(&mut self, natural_height: f64) -> Option<Schedule> {
        if self.is_expanding_or_open() {
            return None;
        }
        self.generation += 1;
        self.state = AnimationState::Expanding(natural_height.max(0.0));
        Some(Schedule::After {
            generation: self.generation,
            delay_ms: self.config.duration_ms,
        })
    }

    /// Start collapsing from the measured current height.
    ///
    /// The height is pinned in this tick; the drop to zero waits for the
    /// returned frame callback. Returns `None` when already collapsing or
    /// collapsed.
    pub fn collapse(&mut self, current_height: f64) -> Option<Schedule> {
        if !self.is_expanding_or_open() {
            return None;
        }
        self.generation += 1;
        self.state = AnimationState::Collapsing {
            from: current_height.max(0.0),
            at_zero: false,
        };
        Some(Schedule::NextFrame {
            generation: self.generation,
        })
    }

    /// Snap straight to the terminal state, cancelling any transition.
    ///
    /// Used when the host cannot measure the content.
    pub fn jump_to(&mut self, expanded: bool) {
        self.generation += 1;
        self.state = if expanded {
            AnimationState::Open
        } else {
            AnimationState::Collapsed
        };
    }

    /// Re-issue the follow-up for a transition whose pending callback was
    /// cancelled by the host. Earlier callbacks become stale. `None` at rest.
    pub fn resume(&mut self) -> Option<Schedule> {
        let wants_frame = match self.state {
            AnimationState::Collapsed | AnimationState::Open => return None,
            AnimationState::Collapsing { at_zero: false, .. } => true,
            AnimationState::Expanding(_) | AnimationState::Collapsing { at_zero: true, .. } => false,
        };
        self.generation += 1;
        let generation = self.generation;
        Some(if wants_frame {
            Schedule::NextFrame { generation }
        } else {
            Schedule::After {
                generation,
                delay_ms: self.config.duration_ms,
            }
        })
    }

    /// Deliver a frame callback. Returns the timer that finishes the collapse.
    pub fn on_frame(&mut self, generation: u64) -> Option<Schedule> {
        if generation != self.generation {
            tracing::trace!(generation, current = self.generation, "dropping stale frame");
            return None;
        }
        match self.state {
            AnimationState::Collapsing {
                from,
                at_zero: false,
            } => {
                self.state = AnimationState::Collapsing {
                    from,
                    at_zero: true,
                };
                Some(Schedule::After {
                    generation,
                    delay_ms: self.config.duration_ms,
                })
            }
            _ => None,
        }
    }

    /// Deliver a timer callback. Returns `true` if it moved the panel to rest.
    pub fn on_timer(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            tracing::trace!(generation, current = self.generation, "dropping stale timer");
            return false;
        }
        match self.state {
            AnimationState::Expanding(_) => {
                self.state = AnimationState::Open;
                true
            }
            AnimationState::Collapsing { at_zero: true, .. } => {
                self.state = AnimationState::Collapsed;
                true
            }
            _ => false,
        }
    }

    /// The CSS `height` value for the current state.
    pub fn height_style(&self) -> String {
        match self.state {
            AnimationState::Collapsed => "0px".to_string(),
            AnimationState::Expanding(h) => format!("{h}px"),
            AnimationState::Open => "auto".to_string(),
            AnimationState::Collapsing { from, at_zero } => {
                if at_zero {
                    "0px".to_string()
                } else {
                    format!("{from}px")
                }
            }
        }
    }

    /// The full inline style for the panel region.
    pub fn style(&self) -> String {
        format!(
            "height: {}; overflow: hidden; transition: height {}ms {};",
            self.height_style(),
            self.config.duration_ms,
            self.config.easing
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn animator(expanded: bool) -> PanelAnimator {
        PanelAnimator::new(expanded, TransitionConfig::default())
    }

    #[test]
    fn initial_state_follows_expansion() {
        assert_eq!(animator(true).state(), AnimationState::Open);
        assert_eq!(animator(true).height_style(), "auto");
        assert_eq!(animator(false).state(), AnimationState::Collapsed);
        assert_eq!(animator(false).height_style(), "0px");
    }

    #[test]
    fn expand_goes_through_measured_height_then_auto() {
        let mut a = animator(false);
        let sched = a.expand(120.0).unwrap();
        assert_eq!(a.state(), AnimationState::Expanding(120.0));
        assert_eq!(a.height_style(), "120px");
        assert_eq!(
            sched,
            Schedule::After {
                generation: 1,
                delay_ms: 300
            }
        );

        assert!(a.on_timer(sched.generation()));
        assert_eq!(a.state(), AnimationState::Open);
        assert_eq!(a.height_style(), "auto");
    }

    #[test]
    fn collapse_pins_height_then_drops_on_next_frame() {
        let mut a = animator(true);
        let frame = a.collapse(80.0).unwrap();
        assert_eq!(frame, Schedule::NextFrame { generation: 1 });
        assert_eq!(a.height_style(), "80px");

        let timer = a.on_frame(frame.generation()).unwrap();
        assert_eq!(a.height_style(), "0px");
        assert!(matches!(a.state(), AnimationState::Collapsing { at_zero: true, .. }));

        assert!(a.on_timer(timer.generation()));
        assert_eq!(a.state(), AnimationState::Collapsed);
    }

    #[test]
    fn collapse_mid_expand_cancels_snap_to_auto() {
        let mut a = animator(false);
        let expand_timer = a.expand(100.0).unwrap();
        let frame = a.collapse(60.0).unwrap();

        // The expand's terminal callback must not reopen the panel.
        assert!(!a.on_timer(expand_timer.generation()));
        assert_eq!(a.height_style(), "60px");

        let timer = a.on_frame(frame.generation()).unwrap();
        assert!(a.on_timer(timer.generation()));
        assert_eq!(a.state(), AnimationState::Collapsed);
    }

    #[test]
    fn expand_mid_collapse_cancels_collapse() {
        let mut a = animator(true);
        let frame = a.collapse(90.0).unwrap();
        let collapse_timer = a.on_frame(frame.generation()).unwrap();
        let expand_timer = a.expand(90.0).unwrap();

        assert!(!a.on_timer(collapse_timer.generation()));
        assert_eq!(a.state(), AnimationState::Expanding(90.0));
        assert!(a.on_timer(expand_timer.generation()));
        assert_eq!(a.state(), AnimationState::Open);
    }

    #[test]
    fn stale_frame_after_reexpand_is_ignored() {
        let mut a = animator(true);
        let frame = a.collapse(50.0).unwrap();
        a.expand(50.0).unwrap();
        assert_eq!(a.on_frame(frame.generation()), None);
        assert_eq!(a.state(), AnimationState::Expanding(50.0));
    }

    #[test]
    fn redundant_requests_do_not_reschedule() {
        let mut a = animator(false);
        assert_eq!(a.collapse(10.0), None);
        a.expand(10.0).unwrap();
        assert_eq!(a.expand(10.0), None);
        assert_eq!(a.generation(), 1);
    }

    #[test]
    fn jump_to_invalidates_pending_callbacks() {
        let mut a = animator(false);
        let sched = a.expand(40.0).unwrap();
        a.jump_to(false);
        assert!(!a.on_timer(sched.generation()));
        assert_eq!(a.state(), AnimationState::Collapsed);
    }

    #[test]
    fn resume_rearms_expand_after_lost_timer() {
        let mut a = animator(false);
        let lost = a.expand(70.0).unwrap();
        let resumed = a.resume().unwrap();
        assert_eq!(
            resumed,
            Schedule::After {
                generation: 2,
                delay_ms: 300
            }
        );
        assert!(!a.on_timer(lost.generation()));
        assert!(a.on_timer(resumed.generation()));
        assert_eq!(a.state(), AnimationState::Open);
    }

    #[test]
    fn resume_rearms_collapse_frame_then_timer() {
        let mut a = animator(true);
        a.collapse(30.0).unwrap();
        let frame = a.resume().unwrap();
        assert_eq!(frame, Schedule::NextFrame { generation: 2 });
        let timer = a.on_frame(frame.generation()).unwrap();

        let timer_again = a.resume().unwrap();
        assert!(matches!(timer_again, Schedule::After { .. }));
        assert!(!a.on_timer(timer.generation()));
        assert!(a.on_timer(timer_again.generation()));
        assert_eq!(a.state(), AnimationState::Collapsed);
    }

    #[test]
    fn resume_at_rest_is_none() {
        assert_eq!(animator(true).resume(), None);
        assert_eq!(animator(false).resume(), None);
    }

    #[test]
    fn style_includes_transition() {
        let a = PanelAnimator::new(
            false,
            TransitionConfig {
                duration_ms: 150,
                easing: "linear".into(),
            },
        );
        assert_eq!(
            a.style(),
            "height: 0px; overflow: hidden; transition: height 150ms linear;"
        );
    }
}
