#![forbid(unsafe_code)]

//! The landing page as a single [`Model`].
//!
//! The page is taller than the terminal. Every view renders the whole page
//! into an off-screen frame, blits the scrolled window into the terminal
//! frame, then paints the fixed navbar on top. Clicks are resolved against
//! the hit grid of the last rendered terminal frame.

use std::cell::RefCell;
use std::time::Duration;

use folio_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};
use folio_core::geometry::Rect;
use folio_core::parallax::{PointerOffset, PointerSignal};
use folio_layout::{LayoutSelector, ViewportClass, ViewportClassifier};
use folio_render::Frame;
use folio_render::frame::HitGrid;
use folio_runtime::{AnimationFrames, Cmd, Model, Subscription};

use crate::sections::{self, CellMetrics, faq, features, get_started, hero, hit, journey, navbar};
use crate::showcase::{PanelRegistry, Showcase, ShowcaseView, view as showcase_view};
use crate::theme;

/// Fraction of the showcase that must be on screen for it to count as in
/// view (and for its pointer tracking to run).
pub const SHOWCASE_AMOUNT: f32 = 0.2;
pub const FEATURES_AMOUNT: f32 = 0.2;
/// Rows scrolled per wheel notch.
pub const WHEEL_ROWS: u16 = 3;

const MIN_HERO_ROWS: u16 = 16;
const FOOTER_ROWS: u16 = 3;

/// Page messages.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Terminal input.
    Event(Event),
    /// Animation frame with the real time since the previous one.
    Frame(Duration),
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

/// Top-level page sections, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    Features,
    Showcase,
    Journey,
    GetStarted,
    Faq,
}

/// Sections the navbar links jump to, by link index.
pub const NAV_TARGETS: [Section; 4] = [
    Section::Features,
    Section::Showcase,
    Section::Journey,
    Section::Faq,
];

/// Section rects in page rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub hero: Rect,
    pub features: Rect,
    pub showcase: Rect,
    pub journey: Rect,
    pub get_started: Rect,
    pub faq: Rect,
    pub footer: Rect,
}

impl PageLayout {
    pub fn height(&self) -> u16 {
        self.footer.bottom()
    }

    pub fn section(&self, section: Section) -> Rect {
        match section {
            Section::Hero => self.hero,
            Section::Features => self.features,
            Section::Showcase => self.showcase,
            Section::Journey => self.journey,
            Section::GetStarted => self.get_started,
            Section::Faq => self.faq,
        }
    }
}

/// The whole landing page.
#[derive(Debug)]
pub struct LandingModel {
    selector: LayoutSelector,
    metrics: CellMetrics,
    width: u16,
    height: u16,
    scroll: u16,
    showcase: Showcase,
    features: features::FeatureGrid,
    journey: journey::Journey,
    get_started: get_started::GetStarted,
    faq: faq::FaqState,
    pointer: PointerSignal,
    hits: RefCell<Option<HitGrid>>,
    mounted: bool,
}

impl LandingModel {
    /// Build the page for an initial `width` x `height` viewport.
    pub fn new(registry: PanelRegistry, classifier: ViewportClassifier, width: u16, height: u16) -> Self {
        let selector = LayoutSelector::new(classifier, width);
        let showcase = Showcase::mount(registry, selector.current());
        let mut model = Self {
            selector,
            metrics: CellMetrics::new(classifier),
            width: width.max(1),
            height: height.max(1),
            scroll: 0,
            showcase,
            features: features::FeatureGrid::new(),
            journey: journey::Journey::new(),
            get_started: get_started::GetStarted::new(),
            faq: faq::FaqState::default(),
            pointer: PointerSignal::new(width, height),
            hits: RefCell::new(None),
            mounted: true,
        };
        model.refresh_visibility();
        model
    }

    pub fn showcase(&self) -> &Showcase {
        &self.showcase
    }

    pub fn faq(&self) -> &faq::FaqState {
        &self.faq
    }

    pub fn journey(&self) -> &journey::Journey {
        &self.journey
    }

    pub fn get_started(&self) -> &get_started::GetStarted {
        &self.get_started
    }

    pub fn features(&self) -> &features::FeatureGrid {
        &self.features
    }

    pub fn pointer(&self) -> &PointerSignal {
        &self.pointer
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn viewport_class(&self) -> ViewportClass {
        self.selector.current()
    }

    /// Page scroll in logical pixels.
    pub fn scroll_px(&self) -> f32 {
        f32::from(self.scroll) * self.metrics.px_per_row
    }

    pub fn is_scrolled(&self) -> bool {
        navbar::is_scrolled(self.scroll_px())
    }

    /// Whether any section wants another animation frame.
    pub fn is_animating(&self) -> bool {
        self.showcase.is_animating()
            || self.features.is_animating()
            || self.get_started.is_animating()
            || self.faq.is_animating()
            || self.pointer.is_dirty()
    }

    /// The pointer offset the showcase sees this frame.
    fn showcase_pointer(&self) -> Option<PointerOffset> {
        if self.showcase.in_view() {
            self.pointer.snapshot()
        } else {
            None
        }
    }

    pub fn showcase_view(&self) -> ShowcaseView {
        self.showcase.view(self.showcase_pointer())
    }

    /// Lay the page out at the current width.
    pub fn layout(&self) -> PageLayout {
        let w = self.width;
        let hero = Rect::new(0, 0, w, self.height.max(MIN_HERO_ROWS));
        let columns = self.selector.classifier().grid_columns(w);
        let features = Rect::new(0, hero.bottom(), w, features::measure(columns));
        let showcase_rows = showcase_view::measure(&self.showcase_view(), w);
        let showcase = Rect::new(0, features.bottom(), w, showcase_rows);
        let journey = Rect::new(0, showcase.bottom(), w, journey::measure(w));
        let get_started = Rect::new(
            0,
            journey.bottom(),
            w,
            get_started::measure(self.selector.current(), w),
        );
        let faq = Rect::new(0, get_started.bottom(), w, faq::measure(&self.faq, w));
        let footer = Rect::new(0, faq.bottom(), w, FOOTER_ROWS);
        PageLayout {
            hero,
            features,
            showcase,
            journey,
            get_started,
            faq,
            footer,
        }
    }

    fn max_scroll(&self, layout: &PageLayout) -> u16 {
        layout.height().saturating_sub(self.height)
    }

    fn window(&self) -> Rect {
        Rect::new(0, self.scroll, self.width, self.height)
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max = i32::from(self.max_scroll(&self.layout()));
        self.scroll = (i32::from(self.scroll) + delta).clamp(0, max) as u16;
    }

    /// Jump so `section` starts just under the navbar.
    pub fn scroll_to(&mut self, section: Section) {
        let layout = self.layout();
        let target = layout.section(section).y.saturating_sub(navbar::ROWS);
        self.scroll = target.min(self.max_scroll(&layout));
        tracing::debug!(?section, scroll = self.scroll, "scrolled to section");
    }

    /// Re-evaluate in-view flags, journey progress and pointer gating.
    fn refresh_visibility(&mut self) {
        let layout = self.layout();
        self.scroll = self.scroll.min(self.max_scroll(&layout));
        let window = self.window();

        let showcase_visible = layout.showcase.visible_fraction(&window) >= SHOWCASE_AMOUNT;
        self.showcase.set_in_view(showcase_visible);
        self.features
            .set_in_view(layout.features.visible_fraction(&window) >= FEATURES_AMOUNT);
        self.journey.observe(layout.journey, window);
        self.get_started
            .set_in_view(layout.get_started.visible_fraction(&window) > 0.0);

        let wants_pointer = self.mounted
            && (showcase_visible
                || layout.hero.visible_fraction(&window) > 0.0
                || layout.features.visible_fraction(&window) > 0.0);
        if wants_pointer != self.pointer.is_attached() {
            if wants_pointer {
                tracing::trace!("pointer tracking attached");
                self.pointer.attach();
            } else {
                tracing::trace!("pointer tracking detached");
                self.pointer.detach();
            }
        }
    }

    /// Jump every animation to its end state.
    pub fn settle(&mut self) {
        self.showcase.settle_now();
        self.features.tick(features::reveal_length(crate::content::FEATURES.len()));
        self.get_started.tick(get_started::reveal_length());
        self.faq.tick(faq::TOGGLE_DURATION);
    }

    /// Tear down the showcase and stop pointer tracking.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.showcase.unmount();
        self.pointer.detach();
    }

    fn on_key(&mut self, key: KeyEvent) -> Cmd<Msg> {
        if key.kind == KeyEventKind::Release {
            return Cmd::none();
        }
        let page = i32::from(self.height.saturating_sub(2).max(1));
        match key.code {
            KeyCode::Char('q') | KeyCode::Escape => {
                self.unmount();
                return Cmd::quit();
            }
            KeyCode::Char('c') if key.ctrl() => {
                self.unmount();
                return Cmd::quit();
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.showcase.select_next();
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.showcase.select_prev();
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                self.showcase.select_index(index);
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page),
            KeyCode::PageUp => self.scroll_by(-page),
            KeyCode::Home => self.scroll = 0,
            KeyCode::End => self.scroll_by(i32::from(u16::MAX)),
            KeyCode::Char('t') => self.scroll_to(Section::Showcase),
            _ => {}
        }
        Cmd::none()
    }

    fn on_click(&mut self, x: u16, y: u16) {
        let hit = self
            .hits
            .borrow()
            .as_ref()
            .and_then(|grid| grid.hit_test(x, y));
        let Some((id, data)) = hit else {
            return;
        };
        let index = data as usize;
        match id {
            hit::SHOWCASE_TAB => {
                self.showcase.select_index(index);
            }
            hit::FAQ_ITEM => self.faq.toggle(index),
            hit::NAV_LINK => {
                if let Some(&section) = NAV_TARGETS.get(index) {
                    self.scroll_to(section);
                }
            }
            hit::HERO_CTA => {
                let section = if index == hero::CTA_PRIMARY {
                    Section::Showcase
                } else {
                    Section::Features
                };
                self.scroll_to(section);
            }
            hit::GET_STARTED_CTA => self.scroll = 0,
            _ => {}
        }
    }

    fn on_event(&mut self, event: Event) -> Cmd<Msg> {
        match event {
            Event::Key(key) => return self.on_key(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                    self.pointer.publish(mouse.x, mouse.y);
                }
                MouseEventKind::Down(MouseButton::Left) => self.on_click(mouse.x, mouse.y),
                MouseEventKind::ScrollDown => self.scroll_by(i32::from(WHEEL_ROWS)),
                MouseEventKind::ScrollUp => self.scroll_by(-i32::from(WHEEL_ROWS)),
                _ => {}
            },
            Event::Resize { width, height } => {
                self.width = width.max(1);
                self.height = height.max(1);
                self.pointer.set_viewport(self.width, self.height);
                if let Some(class) = self.selector.observe(self.width) {
                    self.showcase.set_viewport_class(class);
                }
                self.hits.replace(None);
            }
            Event::Focus(_) | Event::Tick => {}
        }
        Cmd::none()
    }

    /// Render the full page at the current width.
    fn render_page(&self, layout: &PageLayout) -> Frame {
        let mut page = Frame::new(self.width, layout.height());
        let pointer = self.pointer.snapshot();
        let class = self.selector.current();

        let hero_progress = hero::scroll_progress(self.scroll, layout.hero.height);
        hero::paint(
            &mut page,
            layout.hero,
            class,
            hero::scroll_fade(hero_progress),
            pointer,
            self.metrics,
        );
        features::paint(
            &mut page,
            layout.features,
            &self.features,
            self.selector.classifier().grid_columns(self.width),
            pointer,
            self.metrics,
        );
        showcase_view::paint(&self.showcase_view(), &mut page, layout.showcase, self.metrics);
        journey::paint(&mut page, layout.journey, &self.journey);
        get_started::paint(&mut page, layout.get_started, &self.get_started, class, self.metrics);
        faq::paint(&mut page, layout.faq, &self.faq);
        paint_footer(&mut page, layout.footer);
        page
    }
}

fn paint_footer(frame: &mut Frame, area: Rect) {
    sections::fill(frame, area, theme::SURFACE);
    let line = format!("© {}", crate::content::BRAND);
    sections::centered(frame, area, area.y + 1, &line, theme::muted());
}

impl Model for LandingModel {
    type Message = Msg;

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        let cmd = match msg {
            Msg::Event(event) => self.on_event(event),
            Msg::Frame(dt) => {
                self.showcase.tick(dt);
                self.features.tick(dt);
                self.get_started.tick(dt);
                self.faq.tick(dt);
                self.pointer.on_frame();
                Cmd::none()
            }
        };
        self.refresh_visibility();
        cmd
    }

    fn view(&self, frame: &mut Frame) {
        let layout = self.layout();
        let page = self.render_page(&layout);
        let visible = layout.height().saturating_sub(self.scroll).min(frame.height());
        let window = Rect::new(0, self.scroll, frame.width().min(page.width()), visible);
        frame.blit_from(&page, window, 0, 0);

        let bar = Rect::new(0, 0, frame.width(), navbar::ROWS);
        frame.clear_hits(bar);
        navbar::paint(frame, bar, self.is_scrolled());
        self.hits.replace(Some(frame.hits().clone()));
    }

    fn subscriptions(&self) -> Vec<Box<dyn Subscription<Msg>>> {
        if self.is_animating() {
            vec![Box::new(AnimationFrames::new(
                AnimationFrames::<Msg>::DEFAULT_INTERVAL,
                Msg::Frame,
            ))]
        } else {
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(width: u16, height: u16) -> LandingModel {
        LandingModel::new(
            PanelRegistry::builtin().unwrap(),
            ViewportClassifier::default(),
            width,
            height,
        )
    }

    #[test]
    fn sections_stack_in_order() {
        let m = model(120, 40);
        let l = m.layout();
        assert_eq!(l.hero.y, 0);
        assert_eq!(l.features.y, l.hero.bottom());
        assert_eq!(l.showcase.y, l.features.bottom());
        assert_eq!(l.journey.y, l.showcase.bottom());
        assert_eq!(l.get_started.y, l.journey.bottom());
        assert_eq!(l.faq.y, l.get_started.bottom());
        assert!(l.height() > 40);
    }

    #[test]
    fn scroll_is_clamped() {
        let mut m = model(120, 40);
        m.scroll_by(-5);
        assert_eq!(m.scroll(), 0);
        m.scroll_by(i32::from(u16::MAX));
        let max = m.layout().height() - 40;
        assert_eq!(m.scroll(), max);
    }

    #[test]
    fn navbar_turns_solid_after_twenty_px() {
        let mut m = model(120, 40);
        assert!(!m.is_scrolled());
        m.scroll_by(1);
        assert!(!m.is_scrolled(), "16 px is under the threshold");
        m.scroll_by(1);
        assert!(m.is_scrolled());
    }

    #[test]
    fn pointer_detached_away_from_parallax_sections() {
        let mut m = model(120, 40);
        assert!(m.pointer().is_attached());
        m.scroll_to(Section::Faq);
        m.refresh_visibility();
        assert!(!m.pointer().is_attached());
        m.scroll_to(Section::Showcase);
        m.refresh_visibility();
        assert!(m.pointer().is_attached());
        assert!(m.showcase().in_view());
    }

    #[test]
    fn animation_clock_tracks_activity() {
        let mut m = model(120, 40);
        // The first panel is entering.
        assert_eq!(m.subscriptions().len(), 1);
        m.settle();
        assert!(m.subscriptions().is_empty());
        m.update(Msg::Event(Event::key(KeyCode::Tab)));
        assert_eq!(m.subscriptions().len(), 1);
    }

    #[test]
    fn quit_unmounts_showcase() {
        let mut m = model(120, 40);
        let cmd = m.update(Msg::Event(Event::key(KeyCode::Char('q'))));
        assert!(matches!(cmd, Cmd::Quit));
        assert!(m.showcase().orchestrator().is_cancelled());
        assert!(!m.pointer().is_attached());
    }

    #[test]
    fn get_started_reveals_once_and_its_button_returns_to_top() {
        let mut m = model(120, 40);
        assert!(!m.get_started().is_revealed());
        m.scroll_to(Section::GetStarted);
        m.update(Msg::Frame(Duration::ZERO));
        assert!(m.get_started().is_revealed());
        assert_eq!(m.subscriptions().len(), 1);

        m.settle();
        let mut frame = Frame::new(120, 40);
        m.view(&mut frame);
        let button = (0..40)
            .flat_map(|y| (0..120).map(move |x| (x, y)))
            .find(|&(x, y)| frame.hit_test(x, y) == Some((hit::GET_STARTED_CTA, 0)));
        let (x, y) = button.expect("button on screen");
        m.update(Msg::Event(Event::click(x, y)));
        assert_eq!(m.scroll(), 0);
        assert!(m.get_started().is_revealed(), "stays revealed off screen");
    }

    #[test]
    fn compact_resize_flips_showcase_class() {
        let mut m = model(120, 40);
        assert_eq!(m.viewport_class(), ViewportClass::Expanded);
        m.update(Msg::Event(Event::Resize {
            width: 80,
            height: 40,
        }));
        assert_eq!(m.viewport_class(), ViewportClass::Compact);
        assert_eq!(
            m.showcase().state().viewport_class(),
            ViewportClass::Compact
        );
    }
}
