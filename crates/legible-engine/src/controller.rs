//! Reactive text/border coloring over a horizontal gradient background.
//!
//! # How a pass works
//!
//! 1. The gradient source string is read from the [`ColorEnvironment`]. It is
//!    reparsed only when it differs from the last parsed string.
//! 2. With dynamic coloring disabled or no usable stops, every laid-out
//!    element gets the static [`FallbackColors`](crate::config::FallbackColors).
//! 3. Otherwise each element's horizontal center is normalized against the
//!    viewport width, the gradient is sampled there, and the palette for the
//!    contrasting text color is assigned.
//! 4. Elements that are not laid out yet (zero width and height) or whose
//!    geometry is not finite keep whatever they had.
//!
//! A pass depends only on (gradient string, viewport width, element rects) plus
//! the parse cache, so repeating it with the same inputs changes nothing.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use legible_paint::{contrasting_text_color, sample_at, try_parse_linear_gradient, ColorStop};

use crate::config::{ContrastPalette, ControllerConfig, FallbackColors};
use crate::coords::{Rect, Viewport};
use crate::element::{ElementId, Target};
use crate::trigger::{Subscription, TriggerKind, TriggerRegistry};

// ── collaborators ─────────────────────────────────────────────────────────

/// Read access to whatever hosts the gradient and the elements.
pub trait ColorEnvironment {
    /// Current gradient value (e.g. a computed `background-image`), if set.
    fn gradient_source(&self) -> Option<String>;
    /// Width of the area the gradient spans, in logical pixels.
    fn viewport_width(&self) -> f32;
    /// Elements to color this pass.
    fn targets(&self) -> Vec<Target>;
}

impl<T: ColorEnvironment + ?Sized> ColorEnvironment for Rc<T> {
    fn gradient_source(&self) -> Option<String> {
        (**self).gradient_source()
    }
    fn viewport_width(&self) -> f32 {
        (**self).viewport_width()
    }
    fn targets(&self) -> Vec<Target> {
        (**self).targets()
    }
}

impl<T: ColorEnvironment> ColorEnvironment for RefCell<T> {
    fn gradient_source(&self) -> Option<String> {
        self.borrow().gradient_source()
    }
    fn viewport_width(&self) -> f32 {
        self.borrow().viewport_width()
    }
    fn targets(&self) -> Vec<Target> {
        self.borrow().targets()
    }
}

/// Plain-data environment: a snapshot of the inputs a pass consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSnapshot {
    pub gradient_source: Option<String>,
    pub viewport_width: f32,
    pub targets: Vec<Target>,
}

impl ColorEnvironment for SceneSnapshot {
    fn gradient_source(&self) -> Option<String> {
        self.gradient_source.clone()
    }
    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }
    fn targets(&self) -> Vec<Target> {
        self.targets.clone()
    }
}

/// Receives each element's colors whenever they change.
pub trait ColorSink {
    fn apply(&mut self, id: ElementId, state: &ElementColorState);
}

impl<F> ColorSink for F
where
    F: FnMut(ElementId, &ElementColorState),
{
    fn apply(&mut self, id: ElementId, state: &ElementColorState) {
        self(id, state)
    }
}

// ── state ─────────────────────────────────────────────────────────────────

/// Colors assigned to one element, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementColorState {
    pub text_color: String,
    pub border_color: String,
    pub hover_border_color: String,
    pub hover_text_color: String,
}

impl ElementColorState {
    pub fn from_palette(palette: &ContrastPalette) -> Self {
        Self {
            text_color: palette.text.clone(),
            border_color: palette.border.clone(),
            hover_border_color: palette.hover_border.clone(),
            hover_text_color: palette.hover_text.clone(),
        }
    }

    /// Hover text keeps the fallback text color.
    pub fn from_fallback(fallback: &FallbackColors) -> Self {
        Self {
            text_color: fallback.text.clone(),
            border_color: fallback.border.clone(),
            hover_border_color: fallback.hover_border.clone(),
            hover_text_color: fallback.text.clone(),
        }
    }
}

/// Last parsed gradient, keyed by its exact source string.
#[derive(Debug, Clone, Default)]
pub struct GradientCache {
    source: Option<String>,
    stops: Option<Vec<ColorStop>>,
}

impl GradientCache {
    /// Reparses when `source` differs from the cached string.
    ///
    /// Returns `true` if a reparse happened.
    pub fn refresh(&mut self, source: Option<&str>) -> bool {
        if self.source.as_deref() == source {
            return false;
        }

        self.stops = match source {
            None => {
                log::debug!("gradient source unset; using fallback colors");
                None
            }
            Some(css) => match try_parse_linear_gradient(css) {
                Ok(stops) => {
                    log::debug!("gradient parsed: {} stop(s)", stops.len());
                    Some(stops)
                }
                Err(err) => {
                    log::debug!("gradient {css:?} unusable ({err}); using fallback colors");
                    None
                }
            },
        };
        self.source = source.map(str::to_owned);
        true
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn stops(&self) -> Option<&[ColorStop]> {
        self.stops.as_deref()
    }
}

/// What one pass did.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PassSummary {
    pub trigger: TriggerKind,
    /// The gradient string changed and was reparsed.
    pub reparsed: bool,
    /// Elements colored from the gradient.
    pub colored: usize,
    /// Elements given the static fallback colors.
    pub fallback: usize,
    /// Elements skipped because they are not laid out.
    pub skipped: usize,
    /// Elements whose state actually changed (and were sent to the sink).
    pub changed: usize,
    /// States dropped because their element is gone.
    pub removed: usize,
}

impl PassSummary {
    fn new(trigger: TriggerKind, reparsed: bool) -> Self {
        Self { trigger, reparsed, colored: 0, fallback: 0, skipped: 0, changed: 0, removed: 0 }
    }
}

// ── controller ────────────────────────────────────────────────────────────

/// Owns the gradient cache and every element's color state.
pub struct ReactiveColorController<E> {
    env: E,
    config: ControllerConfig,
    gradient: GradientCache,
    states: HashMap<ElementId, ElementColorState>,
    sink: Option<Box<dyn ColorSink>>,
}

impl<E: ColorEnvironment> ReactiveColorController<E> {
    pub fn new(env: E, config: ControllerConfig) -> Self {
        Self {
            env,
            config,
            gradient: GradientCache::default(),
            states: HashMap::new(),
            sink: None,
        }
    }

    /// Installs a sink notified of every state change.
    pub fn with_sink(mut self, sink: impl ColorSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Wraps the controller for [`activate`](Self::activate).
    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    /// Runs one recomputation pass.
    pub fn recompute(&mut self, trigger: TriggerKind) -> PassSummary {
        let source = self.env.gradient_source();
        let reparsed = self.gradient.refresh(source.as_deref());
        let viewport = Viewport::new(self.env.viewport_width());
        let targets = self.env.targets();

        let mut summary = PassSummary::new(trigger, reparsed);

        let live: HashSet<ElementId> = targets.iter().map(|t| t.id).collect();
        let before = self.states.len();
        self.states.retain(|id, _| live.contains(id));
        summary.removed = before - self.states.len();

        let Self { config, gradient, states, sink, .. } = self;
        let stops = gradient.stops().filter(|_| config.dynamic_enabled);

        for target in &targets {
            if target.rect.is_unlaid() {
                log::trace!("{:?} not laid out; keeping previous colors", target.id);
                summary.skipped += 1;
                continue;
            }
            if !target.rect.is_finite() {
                log::debug!(
                    "{:?} has non-finite geometry {:?}; keeping previous colors",
                    target.id,
                    target.rect
                );
                summary.skipped += 1;
                continue;
            }

            let next = match stops {
                Some(stops) if target.dynamic => {
                    summary.colored += 1;
                    color_for(config, stops, viewport, target.rect)
                }
                _ => {
                    summary.fallback += 1;
                    ElementColorState::from_fallback(&config.fallback)
                }
            };

            if states.get(&target.id) != Some(&next) {
                if let Some(sink) = sink.as_mut() {
                    sink.apply(target.id, &next);
                }
                states.insert(target.id, next);
                summary.changed += 1;
            }
        }

        log::debug!(
            "color pass ({:?}): {} colored, {} fallback, {} skipped, {} changed, {} removed",
            summary.trigger,
            summary.colored,
            summary.fallback,
            summary.skipped,
            summary.changed,
            summary.removed,
        );
        summary
    }

    pub fn state(&self, id: ElementId) -> Option<&ElementColorState> {
        self.states.get(&id)
    }

    pub fn states(&self) -> &HashMap<ElementId, ElementColorState> {
        &self.states
    }

    /// Stops of the cached gradient, if it parsed.
    pub fn stops(&self) -> Option<&[ColorStop]> {
        self.gradient.stops()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn environment(&self) -> &E {
        &self.env
    }
}

impl<E: ColorEnvironment + 'static> ReactiveColorController<E> {
    /// Subscribes `controller` to every [`TriggerKind`] and runs an initial pass.
    ///
    /// Callbacks hold only a weak reference, so the registry never keeps the
    /// controller alive. Dropping the returned guard unsubscribes all of them.
    ///
    /// A trigger fired while a pass is running (for example by a sink that
    /// edits the scene) is queued and runs as a follow-up pass once the current
    /// one returns. Several such triggers collapse into one follow-up.
    pub fn activate(
        controller: &Rc<RefCell<Self>>,
        triggers: &TriggerRegistry,
    ) -> ActiveController {
        let pending: Rc<Cell<Option<TriggerKind>>> = Rc::default();

        let subscriptions: Vec<Subscription> = TriggerKind::ALL
            .iter()
            .map(|&kind| {
                let weak = Rc::downgrade(controller);
                let pending = Rc::clone(&pending);
                triggers.register(kind, move |fired| {
                    let Some(shared) = weak.upgrade() else { return };
                    let Ok(mut ctrl) = shared.try_borrow_mut() else {
                        log::debug!("{fired:?} fired during a color pass; queued");
                        pending.set(Some(fired));
                        return;
                    };
                    ctrl.run_passes(fired, &pending);
                })
            })
            .collect();

        match controller.try_borrow_mut() {
            Ok(mut ctrl) => ctrl.run_passes(TriggerKind::TargetsChanged, &pending),
            Err(_) => log::warn!("controller activated while borrowed; initial pass skipped"),
        }

        ActiveController { subscriptions }
    }

    /// Runs `first`, then any trigger queued while it ran.
    fn run_passes(&mut self, first: TriggerKind, pending: &Cell<Option<TriggerKind>>) {
        self.recompute(first);
        for _ in 0..MAX_FOLLOW_UP_PASSES {
            let Some(kind) = pending.take() else { return };
            self.recompute(kind);
        }
        if let Some(kind) = pending.take() {
            log::warn!(
                "{kind:?} still queued after {MAX_FOLLOW_UP_PASSES} follow-up passes; \
                 a sink keeps changing the scene, dropping it"
            );
        }
    }
}

/// Bound on back-to-back passes caused by triggers fired from inside a pass.
const MAX_FOLLOW_UP_PASSES: usize = 8;

/// Colors for one laid-out, dynamically colored element.
fn color_for(
    config: &ControllerConfig,
    stops: &[ColorStop],
    viewport: Viewport,
    rect: Rect,
) -> ElementColorState {
    let t = viewport.ratio(rect.center_x());
    let background = sample_at(stops, t);
    let contrast = contrasting_text_color(background);
    ElementColorState::from_palette(config.palette(contrast))
}

// ── activation guard ──────────────────────────────────────────────────────

/// Keeps a controller subscribed to its triggers.
///
/// Dropping the guard (or calling [`deactivate`](Self::deactivate)) releases
/// every subscription.
#[must_use = "dropping ActiveController unsubscribes the controller immediately"]
#[derive(Debug)]
pub struct ActiveController {
    subscriptions: Vec<Subscription>,
}

impl ActiveController {
    pub fn deactivate(self) {
        for sub in self.subscriptions {
            sub.release();
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscriptions.iter().all(Subscription::is_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FallbackColors;

    const RED_TO_BLUE: &str = "linear-gradient(to right, #ff0000 0%, #0000ff 100%)";
    const BLACK_TO_WHITE: &str = "linear-gradient(to right, #000000 0%, #ffffff 100%)";
    const ALL_WHITE: &str = "linear-gradient(#fff, #fff)";

    type Scene = Rc<RefCell<SceneSnapshot>>;

    fn id(n: u64) -> ElementId {
        ElementId::from_raw(n)
    }

    fn target(n: u64, left: f32, width: f32) -> Target {
        Target::new(id(n), Rect::horizontal(left, width, 30.0))
    }

    fn scene(gradient: Option<&str>, width: f32, targets: Vec<Target>) -> Scene {
        Rc::new(RefCell::new(SceneSnapshot {
            gradient_source: gradient.map(str::to_owned),
            viewport_width: width,
            targets,
        }))
    }

    fn controller(scene: &Scene) -> ReactiveColorController<Scene> {
        ReactiveColorController::new(Rc::clone(scene), ControllerConfig::default())
    }

    fn light() -> ElementColorState {
        ElementColorState::from_palette(&ControllerConfig::default().light_palette)
    }

    fn dark() -> ElementColorState {
        ElementColorState::from_palette(&ControllerConfig::default().dark_palette)
    }

    fn fallback() -> ElementColorState {
        ElementColorState::from_fallback(&FallbackColors::default())
    }

    // ── coloring ──────────────────────────────────────────────────────────

    #[test]
    fn colors_follow_gradient_position() {
        let targets = vec![target(1, 0.0, 100.0), target(2, 900.0, 100.0)];
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, targets);
        let mut c = controller(&s);
        let summary = c.recompute(TriggerKind::TargetsChanged);

        assert_eq!(summary.colored, 2);
        assert_eq!(c.state(id(1)), Some(&light()));
        assert_eq!(c.state(id(2)), Some(&dark()));
    }

    #[test]
    fn border_is_keyed_off_text_color() {
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, vec![target(1, 0.0, 10.0)]);
        let mut c = controller(&s);
        c.recompute(TriggerKind::GradientChanged);

        let state = c.state(id(1)).unwrap();
        assert_eq!(state.text_color, "#ffffff");
        assert_eq!(state.border_color, "rgba(255, 255, 255, 0.6)");
        assert_eq!(state.hover_border_color, "#ffffff");
        assert_eq!(state.hover_text_color, "#ffffff");
    }

    #[test]
    fn center_outside_viewport_is_clamped() {
        let targets = vec![target(1, -400.0, 100.0), target(2, 2000.0, 100.0)];
        let s = scene(Some(BLACK_TO_WHITE), 500.0, targets);
        let mut c = controller(&s);
        c.recompute(TriggerKind::ViewportResized);
        assert_eq!(c.state(id(1)), Some(&light()));
        assert_eq!(c.state(id(2)), Some(&dark()));
    }

    #[test]
    fn resize_moves_elements_along_the_gradient() {
        let s = scene(Some(BLACK_TO_WHITE), 2000.0, vec![target(1, 850.0, 100.0)]);
        let mut c = controller(&s);
        c.recompute(TriggerKind::TargetsChanged);
        assert_eq!(c.state(id(1)), Some(&light()));

        s.borrow_mut().viewport_width = 1000.0;
        c.recompute(TriggerKind::ViewportResized);
        assert_eq!(c.state(id(1)), Some(&dark()));
    }

    // ── fallback ──────────────────────────────────────────────────────────

    #[test]
    fn missing_gradient_uses_fallback() {
        let s = scene(None, 1000.0, vec![target(1, 0.0, 100.0)]);
        let mut c = controller(&s);
        let summary = c.recompute(TriggerKind::GradientChanged);
        assert_eq!(summary.fallback, 1);
        assert_eq!(c.state(id(1)), Some(&fallback()));
    }

    #[test]
    fn unparseable_gradient_uses_fallback() {
        let s = scene(Some("radial-gradient(#000, #fff)"), 1000.0, vec![target(1, 0.0, 100.0)]);
        let mut c = controller(&s);
        c.recompute(TriggerKind::GradientChanged);
        assert!(c.stops().is_none());
        assert_eq!(c.state(id(1)), Some(&fallback()));
    }

    #[test]
    fn disabled_dynamic_coloring_uses_fallback() {
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, vec![target(1, 0.0, 100.0)]);
        let mut c = ReactiveColorController::new(
            Rc::clone(&s),
            ControllerConfig::default().with_dynamic_enabled(false),
        );
        c.recompute(TriggerKind::TargetsChanged);
        assert_eq!(c.state(id(1)), Some(&fallback()));
    }

    #[test]
    fn opted_out_target_uses_fallback() {
        let opted_out = target(1, 0.0, 100.0).with_dynamic(false);
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, vec![opted_out]);
        let mut c = controller(&s);
        c.recompute(TriggerKind::TargetsChanged);
        assert_eq!(c.state(id(1)), Some(&fallback()));
    }

    #[test]
    fn fallback_hover_text_mirrors_text() {
        let f = fallback();
        assert_eq!(f.hover_text_color, f.text_color);
    }

    // ── cache ─────────────────────────────────────────────────────────────

    #[test]
    fn gradient_reparsed_only_on_string_change() {
        let s = scene(Some(RED_TO_BLUE), 1000.0, vec![target(1, 0.0, 100.0)]);
        let mut c = controller(&s);
        assert!(c.recompute(TriggerKind::GradientChanged).reparsed);
        assert!(!c.recompute(TriggerKind::GradientChanged).reparsed);
        assert!(!c.recompute(TriggerKind::ViewportResized).reparsed);

        s.borrow_mut().gradient_source = Some(BLACK_TO_WHITE.to_string());
        assert!(c.recompute(TriggerKind::GradientChanged).reparsed);
        assert_eq!(c.stops().map(<[ColorStop]>::len), Some(2));
    }

    #[test]
    fn cache_tracks_unset_source() {
        let mut cache = GradientCache::default();
        assert!(!cache.refresh(None));
        assert!(cache.refresh(Some(RED_TO_BLUE)));
        assert_eq!(cache.source(), Some(RED_TO_BLUE));
        assert!(cache.refresh(None));
        assert!(cache.stops().is_none());
    }

    // ── idempotence ───────────────────────────────────────────────────────

    #[test]
    fn repeated_pass_is_identical() {
        let s = scene(
            Some("linear-gradient(90deg, #0b132b, #5bc0be 40%, #ffd166, #ef476f)"),
            1280.0,
            vec![target(1, 0.0, 120.0), target(2, 500.0, 90.0), target(3, 1100.0, 150.0)],
        );
        let mut c = controller(&s);
        c.recompute(TriggerKind::TargetsChanged);
        let first = c.states().clone();

        let summary = c.recompute(TriggerKind::ViewportResized);
        assert_eq!(c.states(), &first);
        assert_eq!(summary.changed, 0);
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn unlaid_target_keeps_previous_colors() {
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, vec![target(1, 0.0, 100.0)]);
        let mut c = controller(&s);
        c.recompute(TriggerKind::TargetsChanged);
        assert_eq!(c.state(id(1)), Some(&light()));

        // Collapsed and the gradient flipped; state must not revert or recolor.
        s.borrow_mut().targets = vec![Target::new(id(1), Rect::new(0.0, 0.0, 0.0, 0.0))];
        s.borrow_mut().gradient_source = Some(ALL_WHITE.to_string());
        let summary = c.recompute(TriggerKind::GradientChanged);

        assert_eq!(summary.skipped, 1);
        assert_eq!(c.state(id(1)), Some(&light()));
    }

    #[test]
    fn unlaid_target_without_history_has_no_state() {
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, vec![Target::new(id(1), Rect::default())]);
        let mut c = controller(&s);
        c.recompute(TriggerKind::TargetsChanged);
        assert!(c.state(id(1)).is_none());
    }

    #[test]
    fn non_finite_target_keeps_previous_colors() {
        let targets = vec![target(1, 0.0, 100.0), target(2, f32::NAN, 100.0)];
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, targets);
        let mut c = controller(&s);
        let summary = c.recompute(TriggerKind::TargetsChanged);
        assert_eq!(summary.skipped, 1);
        assert!(c.state(id(2)).is_none());

        s.borrow_mut().targets[0] = target(1, f32::INFINITY, 100.0);
        c.recompute(TriggerKind::TargetsChanged);
        assert_eq!(c.state(id(1)), Some(&light()));
    }

    #[test]
    fn removed_targets_lose_their_state() {
        let targets = vec![target(1, 0.0, 100.0), target(2, 10.0, 100.0)];
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, targets);
        let mut c = controller(&s);
        c.recompute(TriggerKind::TargetsChanged);

        s.borrow_mut().targets.retain(|t| t.id != id(2));
        let summary = c.recompute(TriggerKind::TargetsChanged);
        assert_eq!(summary.removed, 1);
        assert!(c.state(id(2)).is_none());
        assert!(c.state(id(1)).is_some());
    }

    // ── sink ──────────────────────────────────────────────────────────────

    #[test]
    fn sink_sees_only_changes() {
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, vec![target(1, 0.0, 100.0)]);
        let writes: Rc<RefCell<Vec<(ElementId, String)>>> = Rc::default();
        let w = Rc::clone(&writes);
        let mut c = controller(&s).with_sink(move |id: ElementId, st: &ElementColorState| {
            w.borrow_mut().push((id, st.text_color.clone()));
        });

        c.recompute(TriggerKind::TargetsChanged);
        c.recompute(TriggerKind::ViewportResized);
        assert_eq!(writes.borrow().len(), 1);

        s.borrow_mut().targets = vec![target(1, 900.0, 100.0)];
        c.recompute(TriggerKind::TargetsChanged);
        assert_eq!(
            *writes.borrow(),
            vec![(id(1), "#ffffff".to_string()), (id(1), "#000000".to_string())]
        );
    }

    // ── activation ────────────────────────────────────────────────────────

    #[test]
    fn activation_runs_initial_pass_and_follows_triggers() {
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, vec![target(1, 0.0, 100.0)]);
        let shared = controller(&s).shared();
        let triggers = TriggerRegistry::new();

        let active = ReactiveColorController::activate(&shared, &triggers);
        assert!(active.is_active());
        assert_eq!(shared.borrow().state(id(1)), Some(&light()));
        for kind in TriggerKind::ALL {
            assert_eq!(triggers.subscriber_count(kind), 1);
        }

        s.borrow_mut().gradient_source = Some(ALL_WHITE.to_string());
        assert_eq!(triggers.fire(TriggerKind::GradientChanged), 1);
        assert_eq!(shared.borrow().state(id(1)), Some(&dark()));
    }

    #[test]
    fn deactivation_releases_every_subscription() {
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, vec![target(1, 0.0, 100.0)]);
        let shared = controller(&s).shared();
        let triggers = TriggerRegistry::new();

        let active = ReactiveColorController::activate(&shared, &triggers);
        active.deactivate();
        assert!(triggers.is_empty());

        s.borrow_mut().gradient_source = Some(ALL_WHITE.to_string());
        assert_eq!(triggers.fire(TriggerKind::GradientChanged), 0);
        assert_eq!(shared.borrow().state(id(1)), Some(&light()));
    }

    #[test]
    fn dropped_controller_is_not_kept_alive() {
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, vec![target(1, 0.0, 100.0)]);
        let shared = controller(&s).shared();
        let triggers = TriggerRegistry::new();
        let _active = ReactiveColorController::activate(&shared, &triggers);

        drop(shared);
        // Callbacks still registered, but they find no controller.
        assert_eq!(triggers.fire(TriggerKind::ViewportResized), 1);
    }

    #[test]
    fn trigger_from_sink_without_scene_change_settles() {
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, vec![target(1, 0.0, 100.0)]);
        let triggers = TriggerRegistry::new();
        let t = triggers.clone();
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let shared = controller(&s)
            .with_sink(move |_: ElementId, _: &ElementColorState| {
                c.set(c.get() + 1);
                t.fire(TriggerKind::GradientChanged);
            })
            .shared();

        let _active = ReactiveColorController::activate(&shared, &triggers);
        assert_eq!(shared.borrow().state(id(1)), Some(&light()));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn trigger_from_sink_that_edits_scene_is_applied() {
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, vec![target(1, 0.0, 100.0)]);
        let triggers = TriggerRegistry::new();
        let t = triggers.clone();
        let edit = Rc::clone(&s);
        let edited = Rc::new(Cell::new(false));
        let shared = controller(&s)
            .with_sink(move |_: ElementId, _: &ElementColorState| {
                if !edited.replace(true) {
                    edit.borrow_mut().gradient_source = Some(ALL_WHITE.to_string());
                    t.fire(TriggerKind::GradientChanged);
                }
            })
            .shared();

        let _active = ReactiveColorController::activate(&shared, &triggers);
        assert_eq!(shared.borrow().state(id(1)), Some(&dark()));
    }

    #[test]
    fn sink_that_never_settles_is_bounded() {
        let s = scene(Some(BLACK_TO_WHITE), 1000.0, vec![target(1, 0.0, 100.0)]);
        let triggers = TriggerRegistry::new();
        let t = triggers.clone();
        let edit = Rc::clone(&s);
        let calls = Rc::new(Cell::new(0usize));
        let c = Rc::clone(&calls);
        let shared = controller(&s)
            .with_sink(move |_: ElementId, _: &ElementColorState| {
                c.set(c.get() + 1);
                // Flip the background every time, so every pass changes state.
                let next = if c.get() % 2 == 1 { ALL_WHITE } else { BLACK_TO_WHITE };
                edit.borrow_mut().gradient_source = Some(next.to_string());
                t.fire(TriggerKind::GradientChanged);
            })
            .shared();

        let _active = ReactiveColorController::activate(&shared, &triggers);
        assert_eq!(calls.get(), MAX_FOLLOW_UP_PASSES + 1);
    }
}
