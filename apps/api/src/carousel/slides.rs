//! The five carousel templates, rendered as 1080×1080 SVG documents.
//!
//! Layout mirrors a simple flex column: fixed 60px padding, a title row on the
//! content slides, and the remaining area centred vertically. All coordinates
//! are formatted with one decimal so identical input yields identical markup.

use crate::carousel::models::SlideContent;
use crate::carousel::text::{escape_xml, measure, wrap, Weight};
use crate::carousel::themes::Theme;

pub const SLIDE_SIZE: u32 = 1080;

const SIZE: f32 = SLIDE_SIZE as f32;
const PADDING: f32 = 60.0;
const CONTENT_WIDTH: f32 = SIZE - 2.0 * PADDING;
const CENTER_X: f32 = SIZE / 2.0;
const FONT_FAMILY: &str = "Inter, sans-serif";

/// Baseline offset from the top of the em box, as a fraction of font size.
const BASELINE: f32 = 0.8;
const TITLE_SIZE: f32 = 48.0;
const TITLE_GAP: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    Cover,
    ValueProp,
    Metrics,
    Expertise,
    CallToAction,
}

impl SlideKind {
    /// Response order.
    pub const ALL: [SlideKind; 5] = [
        SlideKind::Cover,
        SlideKind::ValueProp,
        SlideKind::Metrics,
        SlideKind::Expertise,
        SlideKind::CallToAction,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SlideKind::Cover => "cover",
            SlideKind::ValueProp => "value-prop",
            SlideKind::Metrics => "metrics",
            SlideKind::Expertise => "expertise",
            SlideKind::CallToAction => "call-to-action",
        }
    }
}

/// Builds the SVG for one slide. `headshot` is an embeddable data URL.
pub fn build_slide(
    kind: SlideKind,
    content: &SlideContent,
    theme: &Theme,
    headshot: Option<&str>,
) -> String {
    match kind {
        SlideKind::Cover => cover_slide(content, theme, headshot),
        SlideKind::ValueProp => value_slide(content, theme),
        SlideKind::Metrics => metrics_slide(content, theme),
        SlideKind::Expertise => expertise_slide(content, theme),
        SlideKind::CallToAction => cta_slide(content, theme),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Markup builder
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Start,
    Middle,
}

struct TextStyle<'a> {
    size: f32,
    weight: Weight,
    fill: &'a str,
    opacity: f32,
    line_height: f32,
    anchor: Anchor,
}

impl TextStyle<'_> {
    fn block_height(&self, lines: usize) -> f32 {
        lines as f32 * self.size * self.line_height
    }
}

struct Svg {
    defs: String,
    body: String,
}

impl Svg {
    fn new() -> Self {
        Svg {
            defs: String::new(),
            body: String::new(),
        }
    }

    /// 135° CSS gradient: top-left to bottom-right.
    fn diagonal_gradient(&mut self, id: &str, from: &str, to: &str) {
        self.defs.push_str(&format!(
            r#"<linearGradient id="{id}" x1="0" y1="0" x2="1" y2="1"><stop offset="0" stop-color="{from}"/><stop offset="1" stop-color="{to}"/></linearGradient>"#
        ));
    }

    fn background(&mut self, fill: &str) {
        self.body.push_str(&format!(
            r#"<rect x="0" y="0" width="{SIZE:.1}" height="{SIZE:.1}" fill="{fill}"/>"#
        ));
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, rx: f32, fill: &str, opacity: f32) {
        self.body.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" rx="{rx:.1}" fill="{fill}" fill-opacity="{opacity:.2}"/>"#
        ));
    }

    fn outlined_rect(&mut self, x: f32, y: f32, w: f32, h: f32, rx: f32, fill: &str, stroke: &str, stroke_width: f32) {
        // Stroke is centred on the path; inset so it stays inside the box.
        let inset = stroke_width / 2.0;
        self.body.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" rx="{:.1}" fill="{fill}" stroke="{stroke}" stroke-width="{stroke_width:.1}"/>"#,
            x + inset,
            y + inset,
            w - stroke_width,
            h - stroke_width,
            (rx - inset).max(0.0),
        ));
    }

    fn circle(&mut self, cx: f32, cy: f32, r: f32, fill: &str) {
        self.body.push_str(&format!(
            r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{fill}"/>"#
        ));
    }

    /// Draws pre-wrapped lines with the top of the first line box at `top`.
    fn text_lines(&mut self, lines: &[String], x: f32, top: f32, style: &TextStyle) {
        let line_box = style.size * style.line_height;
        let anchor = match style.anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
        };
        for (i, line) in lines.iter().enumerate() {
            let baseline =
                top + i as f32 * line_box + (line_box - style.size) / 2.0 + style.size * BASELINE;
            self.body.push_str(&format!(
                r#"<text x="{x:.1}" y="{baseline:.1}" font-family="{FONT_FAMILY}" font-size="{:.1}" font-weight="{}" fill="{}" fill-opacity="{:.2}" text-anchor="{anchor}">{}</text>"#,
                style.size,
                style.weight.css_value(),
                style.fill,
                style.opacity,
                escape_xml(line),
            ));
        }
    }

    fn finish(self) -> String {
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{SLIDE_SIZE}" height="{SLIDE_SIZE}" viewBox="0 0 {SLIDE_SIZE} {SLIDE_SIZE}"><defs>{}</defs>{}</svg>"#,
            self.defs, self.body
        )
    }
}

fn title(svg: &mut Svg, text: &str, fill: &str) -> f32 {
    let style = TextStyle {
        size: TITLE_SIZE,
        weight: Weight::Bold,
        fill,
        opacity: 1.0,
        line_height: 1.2,
        anchor: Anchor::Start,
    };
    svg.text_lines(&[text.to_string()], PADDING, PADDING, &style);
    PADDING + style.block_height(1) + TITLE_GAP
}

// ────────────────────────────────────────────────────────────────────────────
// Templates
// ────────────────────────────────────────────────────────────────────────────

fn cover_slide(content: &SlideContent, theme: &Theme, headshot: Option<&str>) -> String {
    let mut svg = Svg::new();
    svg.diagonal_gradient("bg", theme.background, theme.background_alt);
    svg.background("url(#bg)");

    let name_style = TextStyle {
        size: 56.0,
        weight: Weight::Bold,
        fill: "#ffffff",
        opacity: 1.0,
        line_height: 1.2,
        anchor: Anchor::Middle,
    };
    let headline_style = TextStyle {
        size: 32.0,
        weight: Weight::Regular,
        fill: "#ffffff",
        opacity: 0.9,
        line_height: 1.4,
        anchor: Anchor::Middle,
    };
    let name_lines = wrap(&content.name, name_style.size, name_style.weight, CONTENT_WIDTH, 2);
    let headline_lines = wrap(
        &content.headline,
        headline_style.size,
        headline_style.weight,
        900.0,
        4,
    );

    let avatar_diameter = if headshot.is_some() { 232.0 } else { 200.0 };
    let total = avatar_diameter
        + 40.0
        + name_style.block_height(name_lines.len())
        + 20.0
        + headline_style.block_height(headline_lines.len());
    let mut y = (SIZE - total) / 2.0;

    let radius = avatar_diameter / 2.0;
    let cy = y + radius;
    match headshot {
        Some(href) => {
            svg.defs.push_str(&format!(
                r#"<clipPath id="avatar"><circle cx="{CENTER_X:.1}" cy="{cy:.1}" r="{:.1}"/></clipPath>"#,
                radius - 6.0
            ));
            svg.circle(CENTER_X, cy, radius, "#ffffff");
            let inner = radius - 6.0;
            svg.body.push_str(&format!(
                r#"<image x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" preserveAspectRatio="xMidYMid slice" clip-path="url(#avatar)" xlink:href="{}"/>"#,
                CENTER_X - inner,
                cy - inner,
                inner * 2.0,
                inner * 2.0,
                escape_xml(href),
            ));
        }
        None => placeholder_avatar(&mut svg, cy, radius, theme),
    }
    y += avatar_diameter + 40.0;

    svg.text_lines(&name_lines, CENTER_X, y, &name_style);
    y += name_style.block_height(name_lines.len()) + 20.0;
    svg.text_lines(&headline_lines, CENTER_X, y, &headline_style);

    svg.finish()
}

/// White disc with a head-and-shoulders silhouette.
fn placeholder_avatar(svg: &mut Svg, cy: f32, radius: f32, theme: &Theme) {
    svg.defs.push_str(&format!(
        r#"<clipPath id="avatar"><circle cx="{CENTER_X:.1}" cy="{cy:.1}" r="{radius:.1}"/></clipPath>"#
    ));
    svg.circle(CENTER_X, cy, radius, "#ffffff");
    svg.body.push_str(&format!(
        r#"<g clip-path="url(#avatar)" fill="{}"><circle cx="{CENTER_X:.1}" cy="{:.1}" r="{:.1}"/><ellipse cx="{CENTER_X:.1}" cy="{:.1}" rx="{:.1}" ry="{:.1}"/></g>"#,
        theme.primary,
        cy - radius * 0.18,
        radius * 0.34,
        cy + radius * 0.78,
        radius * 0.62,
        radius * 0.5,
    ));
}

fn value_slide(content: &SlideContent, theme: &Theme) -> String {
    let mut svg = Svg::new();
    svg.background(theme.surface);
    let mut y = title(&mut svg, "What I Bring", theme.primary);

    let number_style = TextStyle {
        size: 36.0,
        weight: Weight::Bold,
        fill: theme.primary,
        opacity: 1.0,
        line_height: 1.2,
        anchor: Anchor::Start,
    };
    let body_style = TextStyle {
        size: 32.0,
        weight: Weight::Regular,
        fill: theme.text,
        opacity: 1.0,
        line_height: 1.3,
        anchor: Anchor::Start,
    };

    const BORDER: f32 = 6.0;
    const PAD_X: f32 = 40.0;
    const PAD_Y: f32 = 30.0;
    const NUMBER_GAP: f32 = 24.0;

    for (i, strength) in content.strengths.iter().enumerate() {
        let number = (i + 1).to_string();
        let number_w = measure(&number, number_style.size, number_style.weight);
        let text_x = PADDING + BORDER + PAD_X + number_w + NUMBER_GAP;
        let text_w = PADDING + CONTENT_WIDTH - PAD_X - text_x;
        let lines = wrap(strength, body_style.size, body_style.weight, text_w, 2);

        let inner_h = number_style
            .block_height(1)
            .max(body_style.block_height(lines.len()));
        let card_h = inner_h + 2.0 * PAD_Y;

        svg.rect(PADDING, y, CONTENT_WIDTH, card_h, 16.0, theme.primary, 1.0);
        svg.rect(PADDING + BORDER, y, CONTENT_WIDTH - BORDER, card_h, 16.0, theme.card, 1.0);

        let number_top = y + (card_h - number_style.block_height(1)) / 2.0;
        svg.text_lines(&[number], PADDING + BORDER + PAD_X, number_top, &number_style);
        let text_top = y + (card_h - body_style.block_height(lines.len())) / 2.0;
        svg.text_lines(&lines, text_x, text_top, &body_style);

        y += card_h + 30.0;
    }

    svg.finish()
}

fn metrics_slide(content: &SlideContent, theme: &Theme) -> String {
    let mut svg = Svg::new();
    svg.diagonal_gradient("bg", theme.dark, theme.dark_alt);
    svg.background("url(#bg)");
    let area_top = title(&mut svg, "By The Numbers", "#ffffff");

    let value_style = TextStyle {
        size: 64.0,
        weight: Weight::Bold,
        fill: theme.accent,
        opacity: 1.0,
        line_height: 1.2,
        anchor: Anchor::Middle,
    };
    let label_style = TextStyle {
        size: 24.0,
        weight: Weight::Regular,
        fill: "#ffffff",
        opacity: 0.8,
        line_height: 1.3,
        anchor: Anchor::Middle,
    };

    const GAP: f32 = 30.0;
    const PAD: f32 = 40.0;
    let card_w = (CONTENT_WIDTH - GAP) / 2.0;
    let inner_w = card_w - 2.0 * PAD;

    struct Card {
        value: Vec<String>,
        label: Vec<String>,
    }
    let cards: Vec<Card> = content
        .metrics
        .iter()
        .map(|m| Card {
            value: wrap(&m.value, value_style.size, value_style.weight, inner_w, 1),
            label: wrap(&m.label, label_style.size, label_style.weight, inner_w, 2),
        })
        .collect();
    let card_h = |c: &Card| {
        2.0 * PAD
            + value_style.block_height(c.value.len().max(1))
            + 10.0
            + label_style.block_height(c.label.len())
    };

    let rows: Vec<&[Card]> = cards.chunks(2).collect();
    let row_heights: Vec<f32> = rows
        .iter()
        .map(|row| row.iter().map(card_h).fold(0.0, f32::max))
        .collect();
    let grid_h = row_heights.iter().sum::<f32>() + GAP * (rows.len().saturating_sub(1)) as f32;
    let mut y = area_top + ((SIZE - PADDING - area_top) - grid_h).max(0.0) / 2.0;

    for (row, row_h) in rows.iter().zip(&row_heights) {
        for (col, card) in row.iter().enumerate() {
            let x = PADDING + col as f32 * (card_w + GAP);
            svg.rect(x, y, card_w, *row_h, 20.0, "#ffffff", 0.1);
            let cx = x + card_w / 2.0;
            let mut top = y + PAD;
            svg.text_lines(&card.value, cx, top, &value_style);
            top += value_style.block_height(card.value.len().max(1)) + 10.0;
            svg.text_lines(&card.label, cx, top, &label_style);
        }
        y += row_h + GAP;
    }

    svg.finish()
}

fn expertise_slide(content: &SlideContent, theme: &Theme) -> String {
    let mut svg = Svg::new();
    svg.background(theme.surface);
    let area_top = title(&mut svg, "Areas of Expertise", theme.primary);

    let pill_style = TextStyle {
        size: 28.0,
        weight: Weight::Bold,
        fill: theme.primary,
        opacity: 1.0,
        line_height: 1.2,
        anchor: Anchor::Middle,
    };
    const GAP: f32 = 20.0;
    const PAD_X: f32 = 40.0;
    const PAD_Y: f32 = 20.0;
    const BORDER: f32 = 2.0;
    let pill_h = pill_style.block_height(1) + 2.0 * (PAD_Y + BORDER);
    let max_text_w = CONTENT_WIDTH - 2.0 * (PAD_X + BORDER);

    // (label, pill width), packed greedily into centred rows.
    let pills: Vec<(String, f32)> = content
        .skills
        .iter()
        .filter_map(|skill| {
            let label = wrap(skill, pill_style.size, pill_style.weight, max_text_w, 1)
                .into_iter()
                .next()?;
            let w = measure(&label, pill_style.size, pill_style.weight) + 2.0 * (PAD_X + BORDER);
            Some((label, w))
        })
        .collect();

    let mut rows: Vec<Vec<(String, f32)>> = Vec::new();
    let mut current: Vec<(String, f32)> = Vec::new();
    let mut row_w = 0.0_f32;
    for pill in pills {
        if !current.is_empty() && row_w + GAP + pill.1 > CONTENT_WIDTH {
            rows.push(std::mem::take(&mut current));
        }
        row_w = if current.is_empty() {
            pill.1
        } else {
            row_w + GAP + pill.1
        };
        current.push(pill);
    }
    if !current.is_empty() {
        rows.push(current);
    }

    let grid_h = rows.len() as f32 * pill_h + GAP * rows.len().saturating_sub(1) as f32;
    let mut y = area_top + ((SIZE - PADDING - area_top) - grid_h).max(0.0) / 2.0;

    for row in &rows {
        let width: f32 = row.iter().map(|(_, w)| w).sum::<f32>() + GAP * (row.len() - 1) as f32;
        let mut x = CENTER_X - width / 2.0;
        for (label, w) in row {
            svg.outlined_rect(x, y, *w, pill_h, pill_h / 2.0, theme.tint, theme.primary, BORDER);
            svg.text_lines(
                std::slice::from_ref(label),
                x + w / 2.0,
                y + PAD_Y + BORDER,
                &pill_style,
            );
            x += w + GAP;
        }
        y += pill_h + GAP;
    }

    svg.finish()
}

fn cta_slide(content: &SlideContent, theme: &Theme) -> String {
    let mut svg = Svg::new();
    svg.diagonal_gradient("bg", theme.background, theme.background_alt);
    svg.background("url(#bg)");

    let heading_style = TextStyle {
        size: 56.0,
        weight: Weight::Bold,
        fill: "#ffffff",
        opacity: 1.0,
        line_height: 1.2,
        anchor: Anchor::Middle,
    };
    let body_style = TextStyle {
        size: 32.0,
        weight: Weight::Regular,
        fill: "#ffffff",
        opacity: 0.9,
        line_height: 1.5,
        anchor: Anchor::Middle,
    };
    let button_style = TextStyle {
        size: 28.0,
        weight: Weight::Bold,
        fill: theme.primary,
        opacity: 1.0,
        line_height: 1.2,
        anchor: Anchor::Middle,
    };
    const BUTTON_PAD_X: f32 = 60.0;
    const BUTTON_PAD_Y: f32 = 30.0;

    let heading = vec!["Let's Connect!".to_string()];
    let body = wrap(&content.cta, body_style.size, body_style.weight, 800.0, 5);
    let button = wrap(
        &content.linkedin,
        button_style.size,
        button_style.weight,
        CONTENT_WIDTH - 2.0 * BUTTON_PAD_X,
        1,
    );
    let button_w = button
        .first()
        .map(|l| measure(l, button_style.size, button_style.weight))
        .unwrap_or(0.0)
        + 2.0 * BUTTON_PAD_X;
    let button_h = button_style.block_height(1) + 2.0 * BUTTON_PAD_Y;

    let total = heading_style.block_height(1)
        + 30.0
        + body_style.block_height(body.len())
        + 50.0
        + button_h;
    let mut y = (SIZE - total) / 2.0;

    svg.text_lines(&heading, CENTER_X, y, &heading_style);
    y += heading_style.block_height(1) + 30.0;
    svg.text_lines(&body, CENTER_X, y, &body_style);
    y += body_style.block_height(body.len()) + 50.0;
    svg.rect(CENTER_X - button_w / 2.0, y, button_w, button_h, 16.0, "#ffffff", 1.0);
    svg.text_lines(&button, CENTER_X, y + BUTTON_PAD_Y, &button_style);

    svg.finish()
}
