//! Home-page intro timeline.
//!
//! Scenes run once per page load, in order:
//!
//! 1. a stream of flower particles flies from the four corners to the center;
//! 2. the header and logo fade in at the center;
//! 3. the header loses `logo-center` and transitions to its final spot;
//! 4. when that `transform` transition ends, the collage logo and nav fade in,
//!    the nav links stagger in, then the hero is shown.
//!
//! Scenes 1 to 3 are fixed delays from the start of the timeline. Scene 4 waits
//! for the transition-end event instead. Every step tolerates missing elements.

mod particle;
mod state;

pub use particle::{Corner, ParticleSpec};
pub use state::IntroScene;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use crate::component::{Component, Context, Event};
use crate::config::IntroConfig;
use crate::constants::*;
use crate::document::{Document, ElementId, fade_in, show};
use crate::scheduler::{Scheduler, Task, TimerHandle};

pub struct IntroSequencer {
    config: IntroConfig,
    rng: StdRng,
    container: ElementId,
    header: Option<ElementId>,
    scene: IntroScene,
    timers: Vec<TimerHandle>,
    particles: Vec<ElementId>,
}

impl IntroSequencer {
    /// Mounts when the particle container is on the page; other pages get `None`.
    pub fn mount<D: Document>(doc: &D, config: &IntroConfig) -> Option<Self> {
        let container = doc.element_by_id(PARTICLE_CONTAINER_ID)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Some(Self {
            config: config.clone(),
            rng,
            container,
            header: doc.element_by_id(HEADER_ID),
            scene: IntroScene::Pending,
            timers: Vec::new(),
            particles: Vec::new(),
        })
    }

    pub fn scene(&self) -> IntroScene {
        self.scene
    }

    /// Particles currently on the page.
    pub fn particles(&self) -> &[ElementId] {
        &self.particles
    }

    /// Schedules scenes 1 to 3. Calling it again does nothing.
    pub fn start(&mut self, timers: &mut Scheduler) {
        if self.scene != IntroScene::Pending {
            return;
        }
        self.scene = IntroScene::Particles;

        let count = self.config.particle_count;
        if count > 0 {
            let interval = self.config.stream_ms as f64 / count as f64;
            for i in 0..count {
                let delay = (i as f64 * interval).round() as u64;
                self.schedule(timers, delay, Task::SpawnParticle(i));
            }
        }
        self.schedule(timers, self.config.logo_reveal_ms, Task::RevealLogo);
        self.schedule(timers, self.config.logo_relocate_ms, Task::RelocateLogo);
        debug!(particles = count, "intro timeline started");
    }

    fn schedule(&mut self, timers: &mut Scheduler, delay_ms: u64, task: Task) {
        let handle = timers.after(delay_ms, task);
        self.timers.push(handle);
    }

    fn owns(&mut self, timer: TimerHandle) -> bool {
        match self.timers.iter().position(|t| *t == timer) {
            Some(pos) => {
                self.timers.swap_remove(pos);
                true
            }
            None => false,
        }
    }

    fn spawn_particle<D: Document>(&mut self, cx: &mut Context<'_, D>, index: usize) {
        if !cx.doc.is_attached(self.container) {
            return;
        }
        let spec = ParticleSpec::random(index, &mut self.rng);
        let now = cx.now_ms();
        let flower = particle::spawn(cx.doc, self.container, &spec, now);
        self.particles.push(flower);
        let lifetime = self.config.particle_lifetime_ms;
        self.schedule(cx.timers, lifetime, Task::RemoveParticle(flower));
        trace!(index, ?flower, "flower spawned");
    }

    fn reveal_logo<D: Document>(&mut self, doc: &mut D) {
        show(doc, self.header);
        let logo = doc.element_by_id(LOGO_ID);
        fade_in(doc, logo);
        self.advance_scene(IntroScene::LogoRevealed);
    }

    fn relocate_logo<D: Document>(&mut self, doc: &mut D) {
        if let Some(header) = self.header {
            doc.remove_class(header, LOGO_CENTER_CLASS);
        }
        self.advance_scene(IntroScene::Relocating);
    }

    /// Scene 4. Collage logo and nav background right away, links after a
    /// short pause with a per-link stagger, hero once the last link is due.
    fn reveal_nav<D: Document>(&mut self, cx: &mut Context<'_, D>) {
        let collage = cx.doc.element_by_id(COLLAGE_LOGO_ID);
        fade_in(cx.doc, collage);
        let nav = cx.doc.element_by_id(NAV_ID);
        fade_in(cx.doc, nav);

        let links = nav_links(cx.doc);
        self.schedule(cx.timers, self.config.nav_link_delay_ms, Task::RevealNavLinks);
        let hero_delay = links.len() as u64 * self.config.nav_link_stagger_ms;
        self.schedule(cx.timers, hero_delay, Task::RevealHero);
        self.advance_scene(IntroScene::NavRevealed);
    }

    fn stagger_links<D: Document>(&mut self, cx: &mut Context<'_, D>) {
        for (i, link) in nav_links(cx.doc).into_iter().enumerate() {
            let delay = i as u64 * self.config.nav_link_stagger_ms;
            self.schedule(cx.timers, delay, Task::RevealNavLink(link));
        }
    }

    fn advance_scene(&mut self, scene: IntroScene) {
        if scene > self.scene {
            debug!(from = ?self.scene, to = ?scene, "intro scene");
            self.scene = scene;
        }
    }
}

fn nav_links<D: Document>(doc: &D) -> Vec<ElementId> {
    doc.element_by_id(NAV_ID)
        .map(|nav| doc.descendants_by_tag(nav, &["a"]))
        .unwrap_or_default()
}

/// Final state without the timeline, for pages that have no intro.
pub fn reveal_immediately<D: Document>(doc: &mut D) {
    let header = doc.element_by_id(HEADER_ID);
    if let Some(header) = header {
        doc.remove_class(header, LOGO_CENTER_CLASS);
        doc.remove_class(header, ANIMATION_ELEMENT_CLASS);
    }
    show(doc, header);
    for id in [LOGO_ID, COLLAGE_LOGO_ID, NAV_ID] {
        let el = doc.element_by_id(id);
        fade_in(doc, el);
    }
    for link in nav_links(doc) {
        doc.add_class(link, VISIBLE_CLASS);
    }
    let hero = doc.element_by_id(HERO_ID);
    show(doc, hero);
}

impl<D: Document> Component<D> for IntroSequencer {
    fn name(&self) -> &'static str {
        "intro"
    }

    fn on_event(&mut self, event: &Event, cx: &mut Context<'_, D>) {
        let Event::TransitionEnd { target, property } = event else { return };
        let Some(header) = self.header else { return };
        if *target != header || property != TRANSFORM_PROPERTY {
            return;
        }
        // The reverse transition (back to centered) must not trigger the nav
        if cx.doc.has_class(header, LOGO_CENTER_CLASS) || self.scene >= IntroScene::NavRevealed {
            return;
        }
        self.reveal_nav(cx);
    }

    fn on_timer(&mut self, timer: TimerHandle, task: &Task, cx: &mut Context<'_, D>) {
        if !self.owns(timer) {
            return;
        }
        match task {
            Task::SpawnParticle(index) => self.spawn_particle(cx, *index),
            Task::RemoveParticle(flower) => {
                cx.doc.remove(*flower);
                self.particles.retain(|p| p != flower);
            }
            Task::RevealLogo => self.reveal_logo(cx.doc),
            Task::RelocateLogo => self.relocate_logo(cx.doc),
            Task::RevealNavLinks => self.stagger_links(cx),
            Task::RevealNavLink(link) => cx.doc.add_class(*link, VISIBLE_CLASS),
            Task::RevealHero => {
                let hero = cx.doc.element_by_id(HERO_ID);
                show(cx.doc, hero);
                self.advance_scene(IntroScene::Complete);
            }
            _ => {}
        }
    }

    fn teardown(&mut self, cx: &mut Context<'_, D>) {
        for handle in self.timers.drain(..) {
            cx.timers.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimDocument;

    struct Harness {
        doc: SimDocument,
        timers: Scheduler,
        intro: IntroSequencer,
    }

    impl Harness {
        fn new(doc: SimDocument) -> Self {
            let config = IntroConfig { seed: Some(1), ..IntroConfig::default() };
            let intro = IntroSequencer::mount(&doc, &config).unwrap();
            Self { doc, timers: Scheduler::new(), intro }
        }

        fn run_until(&mut self, until: u64) {
            while let Some((handle, task)) = self.timers.pop_due(until) {
                let mut cx = Context::new(&mut self.doc, &mut self.timers);
                self.intro.on_timer(handle, &task, &mut cx);
            }
            self.timers.set_now(until);
        }

        fn transition_end(&mut self, property: &str) {
            let header = self.doc.element_by_id("main-header").unwrap();
            let event = Event::TransitionEnd { target: header, property: property.to_string() };
            let mut cx = Context::new(&mut self.doc, &mut self.timers);
            self.intro.on_event(&event, &mut cx);
        }

        fn visible_links(&self) -> usize {
            let nav = self.doc.element_by_id("main-nav").unwrap();
            self.doc
                .descendants_by_tag(nav, &["a"])
                .into_iter()
                .filter(|a| self.doc.has_class(*a, "visible"))
                .count()
        }

        fn style(&self, id: &str, property: &str) -> Option<String> {
            self.doc.style(self.doc.element_by_id(id).unwrap(), property)
        }
    }

    fn home_page() -> SimDocument {
        let mut doc = SimDocument::default();
        doc.insert(None, "div", Some("flower-particles-container"), "");
        let header = doc.insert(None, "header", Some("main-header"), "logo-center animation-element");
        doc.insert(Some(header), "img", Some("blossoms-logo"), "");
        doc.insert(None, "div", Some("collage-logo-container"), "");
        let nav = doc.insert(None, "nav", Some("main-nav"), "");
        for _ in 0..4 {
            doc.insert(Some(nav), "a", None, "");
        }
        doc.insert(None, "section", Some("hero"), "");
        doc
    }

    #[test]
    fn pages_without_container_have_no_intro() {
        let doc = SimDocument::default();
        assert!(IntroSequencer::mount(&doc, &IntroConfig::default()).is_none());
    }

    #[test]
    fn particles_stream_in_and_clean_up() {
        let mut h = Harness::new(home_page());
        h.intro.start(&mut h.timers);
        assert_eq!(h.intro.scene(), IntroScene::Particles);

        h.run_until(0);
        assert_eq!(h.intro.particles().len(), 1);
        h.run_until(1450);
        assert_eq!(h.intro.particles().len(), 30);
        assert_eq!(h.doc.elements_by_class("flower-particle").len(), 30);

        // Last flower spawned at 1450, removed 3000 ms later
        h.run_until(4449);
        assert_eq!(h.intro.particles().len(), 1);
        h.run_until(4450);
        assert!(h.intro.particles().is_empty());
        assert!(h.doc.elements_by_class("flower-particle").is_empty());
    }

    #[test]
    fn logo_reveals_then_relocates() {
        let mut h = Harness::new(home_page());
        h.intro.start(&mut h.timers);

        h.run_until(1999);
        assert_eq!(h.style("main-header", "opacity"), None);
        h.run_until(2000);
        assert_eq!(h.intro.scene(), IntroScene::LogoRevealed);
        assert_eq!(h.style("main-header", "visibility").as_deref(), Some("visible"));
        assert_eq!(h.style("blossoms-logo", "opacity").as_deref(), Some("1"));

        let header = h.doc.element_by_id("main-header").unwrap();
        assert!(h.doc.has_class(header, "logo-center"));
        h.run_until(4500);
        assert!(!h.doc.has_class(header, "logo-center"));
        assert_eq!(h.intro.scene(), IntroScene::Relocating);
    }

    #[test]
    fn nav_waits_for_the_transform_transition() {
        let mut h = Harness::new(home_page());
        h.intro.start(&mut h.timers);
        h.run_until(10_000);
        assert_eq!(h.style("main-nav", "opacity"), None);

        h.transition_end("opacity");
        assert_eq!(h.style("main-nav", "opacity"), None);

        h.transition_end("transform");
        assert_eq!(h.intro.scene(), IntroScene::NavRevealed);
        assert_eq!(h.style("main-nav", "opacity").as_deref(), Some("1"));
        assert_eq!(h.style("collage-logo-container", "opacity").as_deref(), Some("1"));
        assert_eq!(h.visible_links(), 0);

        h.run_until(10_100);
        assert_eq!(h.visible_links(), 1);
        h.run_until(10_250);
        assert_eq!(h.visible_links(), 2);
        assert_eq!(h.style("hero", "opacity"), None);
        h.run_until(10_400);
        assert_eq!(h.visible_links(), 4);
        assert_eq!(h.style("hero", "visibility").as_deref(), Some("visible"));
        assert_eq!(h.intro.scene(), IntroScene::Complete);
    }

    #[test]
    fn centered_header_ignores_transition_end() {
        let mut h = Harness::new(home_page());
        h.intro.start(&mut h.timers);
        h.run_until(3000);
        h.transition_end("transform");
        assert_eq!(h.style("main-nav", "opacity"), None);
        assert_eq!(h.intro.scene(), IntroScene::LogoRevealed);
    }

    #[test]
    fn nav_reveal_runs_once() {
        let mut h = Harness::new(home_page());
        h.intro.start(&mut h.timers);
        h.run_until(5000);
        h.transition_end("transform");
        let pending = h.timers.pending();
        h.transition_end("transform");
        assert_eq!(h.timers.pending(), pending);
    }

    #[test]
    fn missing_optional_elements_do_not_stop_the_timeline() {
        let mut doc = SimDocument::default();
        doc.insert(None, "div", Some("flower-particles-container"), "");
        let mut h = Harness::new(doc);
        h.intro.start(&mut h.timers);
        h.run_until(10_000);
        assert_eq!(h.intro.scene(), IntroScene::Relocating);
    }

    #[test]
    fn teardown_cancels_pending_steps() {
        let mut h = Harness::new(home_page());
        h.intro.start(&mut h.timers);
        h.run_until(500);
        let mut cx = Context::new(&mut h.doc, &mut h.timers);
        h.intro.teardown(&mut cx);
        assert_eq!(h.timers.pending(), 0);
        h.run_until(10_000);
        assert_eq!(h.intro.scene(), IntroScene::Particles);
    }

    #[test]
    fn static_pages_show_final_state() {
        let mut doc = home_page();
        reveal_immediately(&mut doc);
        let header = doc.element_by_id("main-header").unwrap();
        assert!(!doc.has_class(header, "logo-center"));
        assert!(!doc.has_class(header, "animation-element"));
        assert_eq!(doc.style(header, "opacity").as_deref(), Some("1"));
        let nav = doc.element_by_id("main-nav").unwrap();
        assert!(doc.descendants_by_tag(nav, &["a"]).iter().all(|a| doc.has_class(*a, "visible")));
        let hero = doc.element_by_id("hero").unwrap();
        assert_eq!(doc.style(hero, "visibility").as_deref(), Some("visible"));
    }
}
