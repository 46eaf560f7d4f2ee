//! Status surface: waiting, failure, or the stability certificate

use flightdeck_core::certificate::{Certificate, Surface};
use flightdeck_core::watcher::StatusView;
use ratatui::{prelude::*, widgets::*};

const ALERT_BG: Color = Color::Rgb(0xFF, 0xEC, 0xEC);

/// Plasma-like ramp from low to high
const RAMP: [(u8, u8, u8); 5] = [
    (13, 8, 135),
    (126, 3, 168),
    (204, 71, 120),
    (248, 149, 64),
    (240, 249, 33),
];

fn ramp_color(t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (RAMP.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(RAMP.len() - 2);
    let frac = scaled - i as f64;
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (r0, g0, b0) = RAMP[i];
    let (r1, g1, b1) = RAMP[i + 1];
    Color::Rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// Heat map of the certificate surface, resampled to `width` x `height` cells
fn heatmap_lines(surface: &Surface, width: usize, height: usize) -> Vec<Line<'static>> {
    let n = surface.resolution();
    if n == 0 || width == 0 || height == 0 {
        return Vec::new();
    }
    let scale = if surface.z_max > 0.0 { surface.z_max } else { 1.0 };
    let row_den = height.saturating_sub(1).max(1);
    let col_den = width.saturating_sub(1).max(1);

    // Top row is the largest ė
    (0..height)
        .map(|row| {
            let j = (n - 1) - (row * (n - 1) / row_den).min(n - 1);
            let spans: Vec<Span<'static>> = (0..width)
                .map(|col| {
                    let i = (col * (n - 1) / col_den).min(n - 1);
                    let v = surface.values[j][i] / scale;
                    Span::styled("█", Style::default().fg(ramp_color(v)))
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Renders the latest [`StatusView`]; the certificate is derived once
#[derive(Default)]
pub struct StatusPanel {
    view: StatusView,
    certificate: Option<Certificate>,
}

impl StatusPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, view: StatusView) {
        if let StatusView::Success { formula } = &view {
            if self.certificate.as_ref().map(|c| &c.formula) != Some(formula) {
                self.certificate = Some(Certificate::from_formula(formula));
            }
        }
        self.view = view;
    }

    pub fn is_visible(&self) -> bool {
        self.view != StatusView::Hidden
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Controller Status ");

        match &self.view {
            // Nothing is shown until the first snapshot arrives
            StatusView::Hidden => {}
            StatusView::Waiting { rows } => {
                let text = Text::from(vec![
                    Line::from("⏳ WAITING ⏳".green().bold()),
                    Line::from(""),
                    Line::from("Receiving data...".green()),
                    Line::from(""),
                    Line::from("Stability analysis is running.".green()),
                    Line::from(""),
                    Line::from(format!("{rows} rows received").dark_gray()),
                ]);
                let widget = Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .block(block.border_style(Style::default().fg(Color::Green)));
                f.render_widget(widget, area);
            }
            StatusView::Failure => {
                let text = Text::from(vec![
                    Line::from("🚨 ALERT 🚨".red().bold()),
                    Line::from(""),
                    Line::from("Controller may be unstable.".red().bold()),
                ]);
                let widget = Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .style(Style::default().bg(ALERT_BG))
                    .block(block.border_style(Style::default().fg(Color::Red)));
                f.render_widget(widget, area);
            }
            StatusView::Success { .. } => self.render_success(f, area, block),
        }
    }

    fn render_success(&self, f: &mut Frame, area: Rect, block: Block<'_>) {
        let block = block.border_style(Style::default().fg(Color::Green));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let [header, formula, surface] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(inner);

        let title = Text::from(vec![
            Line::from("✅ CONTROLLER IS FUNCTIONAL ✅".green().bold()),
            Line::from(""),
            Line::from("The controller is proved stable.".green()),
            Line::from(""),
            Line::from("Stability certificate:".green()),
        ]);
        f.render_widget(Paragraph::new(title).alignment(Alignment::Center), header);

        let Some(certificate) = &self.certificate else {
            return;
        };
        f.render_widget(
            Paragraph::new(certificate.text.clone().bold())
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            formula,
        );

        let c = certificate.coefficients;
        let surface_block = Block::default().borders(Borders::TOP).title(format!(
            " V(e, ė)  a={:.3} b={:.3} c={:.3}  max={:.3} ",
            c.a, c.b, c.c, certificate.surface.z_max
        ));
        let cells = surface_block.inner(surface);
        let lines = heatmap_lines(
            &certificate.surface,
            cells.width as usize,
            cells.height as usize,
        );
        f.render_widget(Paragraph::new(lines).block(surface_block), surface);
    }
}
