#![forbid(unsafe_code)]

//! Pure composition of the showcase and its cell painter.
//!
//! [`compose`] maps registry fields, the active panel, the viewport class,
//! the pointer offset and the current presence to a [`ShowcaseView`]. It
//! reads nothing else and writes nothing. [`paint`] draws a view into a
//! frame; [`measure`] reports the height `paint` will use, from the same
//! layout pass.

use folio_core::animation::Pose;
use folio_core::geometry::{Rect, Sides};
use folio_core::parallax::{ParallaxLayer, PointerOffset};
use folio_layout::{Constraint, Flex, ViewportClass};
use folio_render::text::{display_width, truncate, wrap};
use folio_render::{Frame, Style};
use serde::{Serialize, Serializer};

use super::registry::{PanelDescriptor, PanelId, PanelRegistry};
use super::state::ShowcaseState;
use super::transition::{
    Presence, PresencePhase, checkmark_scale, cta_pose, feature_pose, heading_pose,
};
use crate::content::{
    AccentToken, SHOWCASE_BADGE, SHOWCASE_CTA, SHOWCASE_DECOR_BADGE, SHOWCASE_HEADING,
    SHOWCASE_SUBHEADING,
};
use crate::sections::{self, CellMetrics, hit};
use crate::theme;

/// A 2D displacement in logical pixels (or degrees, for tilt).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Offset {
    pub x: f32,
    pub y: f32,
}

impl From<(f32, f32)> for Offset {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Serializable mirror of [`Pose`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoseSlot {
    pub opacity: f32,
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl From<Pose> for PoseSlot {
    fn from(p: Pose) -> Self {
        Self {
            opacity: p.opacity,
            x: p.x,
            y: p.y,
            scale: p.scale,
        }
    }
}

impl From<PoseSlot> for Pose {
    fn from(p: PoseSlot) -> Self {
        Pose {
            opacity: p.opacity,
            x: p.x,
            y: p.y,
            scale: p.scale,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabSlot {
    pub id: PanelId,
    pub label: String,
    pub accent: AccentToken,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSlot {
    pub text: String,
    pub pose: PoseSlot,
    /// Checkmark scale in `[0, 1]`.
    pub check: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageSlot {
    /// `None` paints a placeholder frame.
    pub reference: Option<String>,
    pub alt: String,
    pub pose: PoseSlot,
    /// Rotate-Y / rotate-X in degrees. Expanded layout only.
    pub tilt: Option<Offset>,
    /// Leading and trailing corner decorations. Expanded layout only.
    pub decorations: Option<[Offset; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSlot {
    pub id: PanelId,
    pub accent: AccentToken,
    pub phase: PresencePhase,
    pub content: PoseSlot,
    pub title: String,
    pub title_pose: PoseSlot,
    pub description: String,
    pub description_pose: PoseSlot,
    pub features: Vec<FeatureSlot>,
    pub image: ImageSlot,
    /// Call-to-action button. Expanded layout only.
    pub cta: Option<PoseSlot>,
}

/// Everything needed to paint the showcase for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowcaseView {
    #[serde(serialize_with = "class_label")]
    pub class: ViewportClass,
    /// Section fade driven by the in-view reveal, `[0, 1]`.
    pub reveal: f32,
    pub tabs: Vec<TabSlot>,
    /// Background blob displacements.
    pub backdrop: [Offset; 2],
    /// The mounted panel; `None` once unmounted.
    pub panel: Option<PanelSlot>,
}

fn class_label<S: Serializer>(class: &ViewportClass, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(class.label())
}

/// Build the view for the current frame.
///
/// A missing pointer offset (no sample yet, or tracking detached) composes
/// as the viewport centre.
pub fn compose(
    registry: &PanelRegistry,
    state: &ShowcaseState,
    presence: Option<&Presence>,
    pointer: Option<PointerOffset>,
    reveal: f32,
) -> ShowcaseView {
    let class = state.viewport_class();
    let offset = pointer.unwrap_or(PointerOffset::CENTER);
    let tabs = registry
        .iter()
        .map(|p| TabSlot {
            id: p.id.clone(),
            label: p.label.clone(),
            accent: p.accent,
            active: &p.id == state.active(),
        })
        .collect();
    let panel = presence.and_then(|presence| {
        registry
            .get(presence.panel.as_str())
            .map(|desc| compose_panel(desc, presence, class, offset))
    });

    ShowcaseView {
        class,
        reveal: reveal.clamp(0.0, 1.0),
        tabs,
        backdrop: [
            ParallaxLayer::BACKDROP_NEAR.apply(offset).into(),
            ParallaxLayer::BACKDROP_FAR.apply(offset).into(),
        ],
        panel,
    }
}

fn compose_panel(
    desc: &PanelDescriptor,
    presence: &Presence,
    class: ViewportClass,
    offset: PointerOffset,
) -> PanelSlot {
    let t = presence.mounted_for;
    let expanded = class == ViewportClass::Expanded;
    let features = desc
        .features
        .iter()
        .enumerate()
        .map(|(i, text)| FeatureSlot {
            text: text.clone(),
            pose: feature_pose(i, t).into(),
            check: checkmark_scale(i, t),
        })
        .collect();
    let image_pose = if expanded { presence.image } else { presence.content };

    PanelSlot {
        id: desc.id.clone(),
        accent: desc.accent,
        phase: presence.phase,
        content: presence.content.into(),
        title: desc.title.clone(),
        title_pose: heading_pose(t).into(),
        description: desc.description.clone(),
        description_pose: heading_pose(t).into(),
        features,
        image: ImageSlot {
            reference: desc.image_ref.clone(),
            alt: desc.label.clone(),
            pose: image_pose.into(),
            tilt: expanded.then(|| ParallaxLayer::CONTENT_TILT.apply(offset).into()),
            decorations: expanded.then(|| {
                [
                    ParallaxLayer::DECOR_LEAD.apply(offset).into(),
                    ParallaxLayer::DECOR_TRAIL.apply(offset).into(),
                ]
            }),
        },
        cta: expanded.then(|| cta_pose(t).into()),
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

const SUBHEADING_MAX: u16 = 72;
const COMPACT_IMAGE_ROWS: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockKind {
    Title,
    Description,
    Feature(usize),
    Cta,
}

#[derive(Debug, Clone)]
struct TextBlock {
    kind: BlockKind,
    lines: Vec<String>,
    gap_after: u16,
}

impl TextBlock {
    fn rows(&self) -> u16 {
        self.lines.len() as u16 + self.gap_after
    }
}

#[derive(Debug, Clone)]
struct ShowcaseLayout {
    badge_y: u16,
    heading_y: u16,
    subheading_y: u16,
    tabs: Vec<Rect>,
    /// Card behind the compact layout.
    card: Option<Rect>,
    text: Rect,
    blocks: Vec<TextBlock>,
    image: Rect,
    height: u16,
}

fn text_blocks(panel: &PanelSlot, width: u16) -> Vec<TextBlock> {
    let w = usize::from(width.max(1));
    let mut blocks = vec![
        TextBlock {
            kind: BlockKind::Title,
            lines: wrap(&panel.title, w),
            gap_after: 1,
        },
        TextBlock {
            kind: BlockKind::Description,
            lines: wrap(&panel.description, w),
            gap_after: 1,
        },
    ];
    for (i, feature) in panel.features.iter().enumerate() {
        blocks.push(TextBlock {
            kind: BlockKind::Feature(i),
            lines: wrap(&feature.text, w.saturating_sub(2).max(1)),
            gap_after: 0,
        });
    }
    if panel.cta.is_some() {
        if let Some(last) = blocks.last_mut() {
            last.gap_after = 1;
        }
        blocks.push(TextBlock {
            kind: BlockKind::Cta,
            lines: vec![SHOWCASE_CTA.to_string()],
            gap_after: 0,
        });
    }
    blocks
}

/// Lay out tabs left to right, wrapping, each row centred in `area`.
fn flow_tabs(widths: &[u16], area: Rect, row_height: u16, row_gap: u16) -> (Vec<Rect>, u16) {
    let mut rows: Vec<Vec<u16>> = vec![Vec::new()];
    let mut used = 0u16;
    for &w in widths {
        let w = w.min(area.width.max(1));
        let needed = if used == 0 { w } else { used + 1 + w };
        if needed > area.width && used > 0 {
            rows.push(vec![w]);
            used = w;
        } else {
            if let Some(row) = rows.last_mut() {
                row.push(w);
            }
            used = needed;
        }
    }

    let mut rects = Vec::with_capacity(widths.len());
    let mut y = area.y;
    for row in &rows {
        let total: u16 = row.iter().sum::<u16>() + row.len().saturating_sub(1) as u16;
        let mut x = area.x + area.width.saturating_sub(total) / 2;
        for &w in row {
            rects.push(Rect::new(x, y, w, row_height));
            x += w + 1;
        }
        y += row_height + row_gap;
    }
    let height = rows.len() as u16 * (row_height + row_gap) - row_gap;
    (rects, height)
}

fn layout(view: &ShowcaseView, area: Rect) -> ShowcaseLayout {
    let inner = area.inner(Sides::horizontal(2));
    let badge_y = area.y + 1;
    let heading_y = badge_y + 2;
    let heading_rows = sections::wrapped_rows(SHOWCASE_HEADING, inner.width);
    let subheading_y = heading_y + heading_rows;
    let sub_rows = sections::wrapped_rows(SHOWCASE_SUBHEADING, inner.width.min(SUBHEADING_MAX));
    let tabs_y = subheading_y + sub_rows + 1;

    let compact = view.class == ViewportClass::Compact;
    let (tab_widths, row_height, row_gap): (Vec<u16>, u16, u16) = if compact {
        let w = view
            .tabs
            .iter()
            .map(|t| display_width(&t.label) as u16 + 2)
            .max()
            .unwrap_or(4);
        (vec![w; view.tabs.len()], 2, 1)
    } else {
        (
            view.tabs
                .iter()
                .map(|t| display_width(&t.label) as u16 + 4)
                .collect(),
            1,
            0,
        )
    };
    let (tabs, tabs_height) = flow_tabs(
        &tab_widths,
        Rect::new(inner.x, tabs_y, inner.width, 0),
        row_height,
        row_gap,
    );
    let content_y = tabs_y + tabs_height + 2;

    let Some(panel) = &view.panel else {
        return ShowcaseLayout {
            badge_y,
            heading_y,
            subheading_y,
            tabs,
            card: None,
            text: Rect::new(inner.x, content_y, inner.width, 0),
            blocks: Vec::new(),
            image: Rect::new(inner.x, content_y, 0, 0),
            height: content_y - area.y + 1,
        };
    };

    if compact {
        let card_inner_w = inner.width.saturating_sub(4);
        let blocks = text_blocks(panel, card_inner_w);
        let text_rows: u16 = blocks.iter().map(TextBlock::rows).sum();
        let image = Rect::new(inner.x + 2, content_y + 1, card_inner_w, COMPACT_IMAGE_ROWS);
        let text = Rect::new(inner.x + 2, image.bottom() + 1, card_inner_w, text_rows);
        let card = Rect::new(
            inner.x,
            content_y,
            inner.width,
            text.bottom() + 1 - content_y,
        );
        ShowcaseLayout {
            badge_y,
            heading_y,
            subheading_y,
            tabs,
            card: Some(card),
            text,
            blocks,
            image,
            height: card.bottom() + 2 - area.y,
        }
    } else {
        let columns = Flex::horizontal()
            .constraints([Constraint::Percentage(50.0), Constraint::Percentage(50.0)])
            .gap(4)
            .split(Rect::new(inner.x, content_y, inner.width, 1));
        let (text_col, image_col) = match columns.as_slice() {
            [a, b] => (*a, *b),
            _ => (inner, inner),
        };
        let blocks = text_blocks(panel, text_col.width);
        let text_rows: u16 = blocks.iter().map(TextBlock::rows).sum();
        let image_rows = (image_col.width / 3).clamp(8, 16);
        // Leave room around the image for the corner decorations.
        let image = Rect::new(
            image_col.x + 1,
            content_y + 1,
            image_col.width.saturating_sub(3),
            image_rows,
        );
        let content_rows = text_rows.max(image_rows + 2);
        let text = Rect::new(
            text_col.x,
            content_y + content_rows.saturating_sub(text_rows) / 2,
            text_col.width,
            text_rows,
        );
        ShowcaseLayout {
            badge_y,
            heading_y,
            subheading_y,
            tabs,
            card: None,
            text,
            blocks,
            image,
            height: content_y + content_rows + 2 - area.y,
        }
    }
}

/// Rows `paint` will use at `width` columns.
pub fn measure(view: &ShowcaseView, width: u16) -> u16 {
    layout(view, Rect::new(0, 0, width, u16::MAX)).height
}

// ---------------------------------------------------------------------------
// Painting
// ---------------------------------------------------------------------------

/// Draw `view` into `area` and register one hit region per tab.
pub fn paint(view: &ShowcaseView, frame: &mut Frame, area: Rect, metrics: CellMetrics) {
    let lay = layout(view, area);
    frame.buffer.push_scissor(area);
    frame.buffer.push_opacity(view.reveal);

    paint_backdrop(view, frame, area, metrics);

    let inner = area.inner(Sides::horizontal(2));
    sections::centered(
        frame,
        inner,
        lay.badge_y,
        &format!(" {SHOWCASE_BADGE} "),
        theme::badge(),
    );
    sections::centered_paragraph(frame, inner, lay.heading_y, SHOWCASE_HEADING, theme::heading());
    let sub_area = Rect::new(
        inner.x + inner.width.saturating_sub(SUBHEADING_MAX) / 2,
        inner.y,
        inner.width.min(SUBHEADING_MAX),
        inner.height,
    );
    sections::centered_paragraph(
        frame,
        sub_area,
        lay.subheading_y,
        SHOWCASE_SUBHEADING,
        theme::muted(),
    );

    for (i, (tab, rect)) in view.tabs.iter().zip(&lay.tabs).enumerate() {
        paint_tab(frame, view.class, tab, *rect);
        sections::clickable(frame, *rect, hit::SHOWCASE_TAB, i);
    }

    if let Some(panel) = &view.panel {
        if let Some(card) = lay.card {
            sections::with_pose(frame, metrics, panel.content.into(), |frame, dx, dy| {
                sections::fill(frame, card.offset(dx, dy), theme::SURFACE);
            });
        }
        paint_image(frame, &panel.image, panel.accent, lay.image, metrics);
        paint_text(frame, panel, &lay, metrics);
    }

    frame.buffer.pop_opacity();
    frame.buffer.pop_scissor();
}

fn paint_backdrop(view: &ShowcaseView, frame: &mut Frame, area: Rect, metrics: CellMetrics) {
    let w = i32::from(area.width);
    let h = i32::from(area.height);
    let radius = ((area.width / 5).max(2), (area.height / 6).max(1));
    let anchors = [
        (i32::from(area.x) + w / 4, i32::from(area.y) + h / 4),
        (i32::from(area.x) + 3 * w / 4, i32::from(area.y) + 3 * h / 4),
    ];
    let colors = [theme::BLOB_PRIMARY, theme::BLOB_SECONDARY];
    for ((anchor, offset), color) in anchors.iter().zip(&view.backdrop).zip(colors) {
        let center = (
            anchor.0 + i32::from(metrics.cols(offset.x)),
            anchor.1 + i32::from(metrics.rows(offset.y)),
        );
        sections::blob(frame, center, radius, color);
    }
}

fn paint_tab(frame: &mut Frame, class: ViewportClass, tab: &TabSlot, rect: Rect) {
    match class {
        ViewportClass::Expanded => {
            if tab.active {
                for x in rect.x..rect.right() {
                    let t = f32::from(x - rect.x) / f32::from(rect.width.max(2) - 1);
                    sections::fill(frame, Rect::new(x, rect.y, 1, 1), theme::accent_at(tab.accent, t));
                }
            } else {
                sections::fill(frame, rect, theme::SURFACE);
            }
            let style = if tab.active {
                Style::new().fg(theme::TEXT).bold()
            } else {
                theme::muted()
            };
            sections::centered(frame, rect, rect.y, &tab.label, style);
        }
        ViewportClass::Compact => {
            let bg = if tab.active { theme::SURFACE_RAISED } else { theme::SURFACE };
            sections::fill(frame, rect, bg);
            let dot = Style::new().fg(theme::accent_at(tab.accent, 0.5)).bold();
            sections::centered(frame, rect, rect.y, "●", dot);
            let label = truncate(&tab.label, usize::from(rect.width));
            let style = if tab.active { theme::heading() } else { theme::muted() };
            sections::centered(frame, rect, rect.y + 1, &label, style);
        }
    }
}

fn scaled(rect: Rect, scale: f32) -> Rect {
    let scale = scale.clamp(0.0, 1.0);
    let w = (f32::from(rect.width) * scale).round() as u16;
    let h = (f32::from(rect.height) * scale).round() as u16;
    Rect::new(
        rect.x + (rect.width - w) / 2,
        rect.y + (rect.height - h) / 2,
        w,
        h,
    )
}

fn paint_image(
    frame: &mut Frame,
    image: &ImageSlot,
    accent: AccentToken,
    rect: Rect,
    metrics: CellMetrics,
) {
    if rect.is_empty() {
        return;
    }
    let pose: Pose = image.pose.into();
    sections::with_pose(frame, metrics, pose, |frame, dx, dy| {
        let body = scaled(rect, pose.scale).offset(dx, dy);
        sections::fill(frame, body, theme::SURFACE_RAISED);

        // Gradient wash, brighter on the side the content tilts towards.
        let lean = image.tilt.map_or(0.0, |t| (t.x / 5.0).clamp(-1.0, 1.0));
        for x in body.x..body.right() {
            let t = f32::from(x - body.x) / f32::from(body.width.max(2) - 1);
            let light = 0.15 * lean * (2.0 * t - 1.0);
            let wash = theme::accent_at(accent, t)
                .with_opacity(0.2)
                .mix(folio_render::PackedRgba::rgba(255, 255, 255, 40), light.max(0.0));
            sections::fill(frame, Rect::new(x, body.y, 1, body.height), wash);
        }
        for x in body.x..body.right() {
            let t = f32::from(x - body.x) / f32::from(body.width.max(2) - 1);
            sections::fill(frame, Rect::new(x, body.y, 1, 1), theme::accent_at(accent, t));
        }

        let mid = body.y + body.height / 2;
        match &image.reference {
            Some(reference) => {
                sections::centered(frame, body, mid.saturating_sub(1), &format!("▣ {}", image.alt), theme::heading());
                let shown = truncate(reference, usize::from(body.width.saturating_sub(2)));
                sections::centered(frame, body, mid + 1, &shown, theme::muted());
            }
            None => {
                let dash = "┄".repeat(usize::from(body.width.saturating_sub(2)));
                frame.buffer.set_string(body.x + 1, body.y + 1, &dash, theme::muted(), body.right());
                frame.buffer.set_string(
                    body.x + 1,
                    body.bottom().saturating_sub(1),
                    &dash,
                    theme::muted(),
                    body.right(),
                );
                sections::centered(frame, body, mid, &image.alt, theme::muted());
            }
        }

        if let Some([lead, trail]) = image.decorations {
            let lead_rect = Rect::new(body.right().saturating_sub(4), body.y.saturating_sub(1), 5, 3)
                .offset(metrics.cols(lead.x), metrics.rows(lead.y));
            sections::fill(frame, lead_rect, theme::TEXT);
            sections::centered(frame, lead_rect, lead_rect.y + 1, "◆", Style::new().fg(theme::accent_at(accent, 0.5)).bold());

            let label = format!(" {SHOWCASE_DECOR_BADGE} ");
            let trail_rect = Rect::new(
                body.x.saturating_sub(1),
                body.bottom().saturating_sub(1),
                display_width(&label) as u16,
                1,
            )
            .offset(metrics.cols(trail.x), metrics.rows(trail.y));
            frame.buffer.set_string(
                trail_rect.x,
                trail_rect.y,
                &label,
                Style::new().fg(theme::BG).bg(theme::TEXT).bold(),
                trail_rect.right(),
            );
        }
    });
}

fn paint_text(frame: &mut Frame, panel: &PanelSlot, lay: &ShowcaseLayout, metrics: CellMetrics) {
    let content: Pose = panel.content.into();
    sections::with_pose(frame, metrics, content, |frame, dx, dy| {
        let mut y = lay.text.y;
        for block in &lay.blocks {
            let (pose, style): (Pose, Style) = match block.kind {
                BlockKind::Title => (panel.title_pose.into(), theme::heading()),
                BlockKind::Description => (panel.description_pose.into(), theme::muted()),
                BlockKind::Feature(i) => (panel.features[i].pose.into(), theme::body()),
                BlockKind::Cta => (
                    panel.cta.map_or(Pose::HIDDEN, Pose::from),
                    theme::on_accent(AccentToken::Primary),
                ),
            };
            let top = y;
            y += block.rows();
            sections::with_pose(frame, metrics, pose, |frame, ix, iy| {
                let origin = lay.text.offset(dx + ix, dy + iy);
                let row = |r: u16| (i32::from(top) + i32::from(dy + iy) + i32::from(r)).max(0) as u16;
                for (r, line) in block.lines.iter().enumerate() {
                    let line_y = row(r as u16);
                    match block.kind {
                        BlockKind::Feature(i) => {
                            if r == 0 {
                                let check = panel.features[i].check;
                                let glyph = if check >= 0.5 { "✓" } else if check > 0.0 { "·" } else { " " };
                                let mark = Style::new().fg(theme::accent_at(panel.accent, 0.5)).bold();
                                frame.buffer.set_string(origin.x, line_y, glyph, mark, origin.right());
                            }
                            frame.buffer.set_string(origin.x + 2, line_y, line, style, origin.right());
                        }
                        BlockKind::Cta => {
                            let label = format!("  {line}  ");
                            frame.buffer.set_string(origin.x, line_y, &label, style, origin.right());
                        }
                        _ => {
                            frame.buffer.set_string(origin.x, line_y, line, style, origin.right());
                        }
                    }
                }
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::showcase::transition::TransitionOrchestrator;
    use std::time::Duration;

    fn setup(class: ViewportClass) -> (PanelRegistry, ShowcaseState, TransitionOrchestrator) {
        let registry = PanelRegistry::builtin().unwrap();
        let state = ShowcaseState::mount(&registry, class);
        let orchestrator = TransitionOrchestrator::settled_on(state.active().clone(), class);
        (registry, state, orchestrator)
    }

    #[test]
    fn compose_marks_single_active_tab() {
        let (registry, state, orch) = setup(ViewportClass::Expanded);
        let view = compose(&registry, &state, orch.presence().as_ref(), None, 1.0);
        assert_eq!(view.tabs.iter().filter(|t| t.active).count(), 1);
        assert!(view.tabs[0].active);
        assert_eq!(view.panel.as_ref().unwrap().title, "Start your project right");
    }

    #[test]
    fn expanded_carries_parallax_slots() {
        let (registry, state, orch) = setup(ViewportClass::Expanded);
        let view = compose(
            &registry,
            &state,
            orch.presence().as_ref(),
            Some(PointerOffset::new(1.0, 1.0)),
            1.0,
        );
        let image = &view.panel.as_ref().unwrap().image;
        assert_eq!(image.tilt, Some(Offset { x: 5.0, y: -5.0 }));
        let [lead, trail] = image.decorations.unwrap();
        assert_eq!((lead.x, trail.x), (-15.0, 15.0));
        assert_eq!(view.backdrop[0], Offset { x: -30.0, y: -30.0 });
    }

    #[test]
    fn compact_drops_desktop_only_slots() {
        let (registry, state, orch) = setup(ViewportClass::Compact);
        let view = compose(&registry, &state, orch.presence().as_ref(), None, 1.0);
        let panel = view.panel.unwrap();
        assert!(panel.image.tilt.is_none());
        assert!(panel.image.decorations.is_none());
        assert!(panel.cta.is_none());
    }

    #[test]
    fn compose_is_pure() {
        let (registry, state, orch) = setup(ViewportClass::Expanded);
        let presence = orch.presence();
        let a = compose(&registry, &state, presence.as_ref(), None, 1.0);
        let b = compose(&registry, &state, presence.as_ref(), None, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn paint_registers_tab_hits() {
        let (registry, state, orch) = setup(ViewportClass::Expanded);
        let view = compose(&registry, &state, orch.presence().as_ref(), None, 1.0);
        let height = measure(&view, 120);
        let mut frame = Frame::new(120, height);
        let area = frame.bounds();
        paint(&view, &mut frame, area, CellMetrics::default());

        let lay = layout(&view, area);
        for (i, rect) in lay.tabs.iter().enumerate() {
            assert_eq!(
                frame.hit_test(rect.x, rect.y),
                Some((hit::SHOWCASE_TAB, i as u64))
            );
        }
        assert!(frame.buffer.to_text().contains("Start your project right"));
    }

    #[test]
    fn missing_image_paints_placeholder() {
        let registry = PanelRegistry::new(vec![
            PanelDescriptor::new("x", "No Picture", AccentToken::Blue)
                .with_features(["one", "two"]),
        ])
        .unwrap();
        let state = ShowcaseState::mount(&registry, ViewportClass::Expanded);
        let orch = TransitionOrchestrator::settled_on(state.active().clone(), ViewportClass::Expanded);
        let view = compose(&registry, &state, orch.presence().as_ref(), None, 1.0);
        let mut frame = Frame::new(120, measure(&view, 120));
        let area = frame.bounds();
        paint(&view, &mut frame, area, CellMetrics::default());
        let text = frame.buffer.to_text();
        assert!(text.contains("┄┄┄"));
        assert!(text.contains("two"));
    }

    #[test]
    fn unmounted_view_has_no_panel() {
        let (registry, state, mut orch) = setup(ViewportClass::Expanded);
        orch.cancel();
        let view = compose(&registry, &state, orch.presence().as_ref(), None, 1.0);
        assert!(view.panel.is_none());
        assert!(measure(&view, 120) > 0);
    }

    #[test]
    fn features_appear_after_stagger() {
        let registry = PanelRegistry::builtin().unwrap();
        let state = ShowcaseState::mount(&registry, ViewportClass::Expanded);
        let mut orch = TransitionOrchestrator::new(state.active().clone(), ViewportClass::Expanded);
        let early = compose(&registry, &state, orch.presence().as_ref(), None, 1.0);
        assert!(early.panel.unwrap().features.iter().all(|f| f.pose.opacity == 0.0));

        orch.tick(Duration::from_millis(1200));
        let late = compose(&registry, &state, orch.presence().as_ref(), None, 1.0);
        assert!(late.panel.unwrap().features.iter().all(|f| f.pose.opacity == 1.0 && f.check == 1.0));
    }

    #[test]
    fn view_serializes() {
        let (registry, state, orch) = setup(ViewportClass::Compact);
        let view = compose(&registry, &state, orch.presence().as_ref(), None, 1.0);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["class"], "compact");
        assert_eq!(json["tabs"][0]["id"], "book-setup");
        assert_eq!(json["panel"]["accent"], "primary");
    }

    #[test]
    fn flow_wraps_rows() {
        let (rects, h) = flow_tabs(&[4, 4, 4], Rect::new(0, 0, 9, 0), 1, 0);
        assert_eq!(h, 2);
        assert_eq!(rects[2].y, 1);
    }
}
