//! HUD chart rendering

use flightdeck_core::player::{AxisRange, AxisSpec, HudFrame, WindowedPlayer};
use ratatui::{prelude::*, widgets::*};

const HUD_GREEN: Color = Color::Rgb(0x00, 0xFF, 0x5A);
const HUD_TEXT: Color = Color::Rgb(0x00, 0xFF, 0x88);
const SERIES_COLORS: [Color; 2] = [HUD_GREEN, Color::Rgb(0x00, 0xFF, 0xC8)];
const NOW_MARKER: Color = Color::Red;

/// Y bounds for an axis: the autoscaled range, or the extent of what is drawn
fn y_bounds(range: Option<AxisRange>, points: &[Vec<(f64, f64)>]) -> [f64; 2] {
    if let Some(range) = range {
        return [range.min, range.max];
    }
    let (lo, hi) = points
        .iter()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });
    if lo.is_finite() && hi > lo {
        [lo, hi]
    } else if lo.is_finite() {
        [lo - 1.0, lo + 1.0]
    } else {
        [0.0, 1.0]
    }
}

fn axis_labels(bounds: [f64; 2]) -> Vec<Line<'static>> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| Line::from(format!("{v:.1}")))
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn render_axis(
    f: &mut Frame,
    area: Rect,
    title: Line<'_>,
    axis: &AxisSpec,
    range: Option<AxisRange>,
    player: &WindowedPlayer,
    hud: &HudFrame,
    show_time_axis: bool,
) {
    let series = &player.profile().series;
    let points: Vec<Vec<(f64, f64)>> = axis
        .series
        .iter()
        .map(|&i| player.series_points(i, hud))
        .collect();

    let y = y_bounds(range, &points);
    let x = [hud.window.start(), hud.window.end()];
    let marker = [(hud.virtual_time, y[0]), (hud.virtual_time, y[1])];

    let mut datasets: Vec<Dataset<'_>> = axis
        .series
        .iter()
        .zip(&points)
        .map(|(&i, data)| {
            Dataset::default()
                .name(series[i].label)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(data)
        })
        .collect();
    datasets.push(
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(NOW_MARKER))
            .data(&marker),
    );

    let mut x_axis = Axis::default()
        .bounds(x)
        .style(Style::default().fg(HUD_TEXT));
    if show_time_axis {
        x_axis = x_axis.title("TIME (s)".fg(HUD_GREEN)).labels(axis_labels(x));
    }

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(HUD_GREEN))
                .title(title),
        )
        .x_axis(x_axis)
        .y_axis(
            Axis::default()
                .title(axis.label.fg(SERIES_COLORS[axis.series[0] % SERIES_COLORS.len()]))
                .bounds(y)
                .style(Style::default().fg(HUD_TEXT))
                .labels(axis_labels(y)),
        )
        .legend_position(Some(LegendPosition::TopRight));

    f.render_widget(chart, area);
}

/// Draw one player's latest frame. Axes are stacked and share the x range.
pub fn render_hud(f: &mut Frame, area: Rect, player: &WindowedPlayer) {
    let profile = player.profile();
    let Some(hud) = player.last_frame() else {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(HUD_GREEN))
            .title(profile.title.fg(HUD_GREEN).bold());
        f.render_widget(block, area);
        return;
    };

    let rows = Layout::vertical(vec![Constraint::Fill(1); profile.axes.len()]).split(area);
    let last = profile.axes.len() - 1;

    for (i, (axis, rect)) in profile.axes.iter().zip(rows.iter()).enumerate() {
        let title = if i == 0 {
            Line::from(vec![
                format!(" {} ", profile.title).fg(HUD_GREEN).bold(),
                format!(" {} ", hud.readout).fg(HUD_TEXT).bold(),
            ])
        } else {
            Line::from("")
        };
        render_axis(f, *rect, title, axis, hud.axis_ranges[i], player, hud, i == last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_bounds_prefers_autoscaled_range() {
        let range = AxisRange::new(-5.0, 5.0);
        assert_eq!(y_bounds(Some(range), &[]), [-5.0, 5.0]);
    }

    #[test]
    fn test_y_bounds_fallbacks() {
        assert_eq!(y_bounds(None, &[]), [0.0, 1.0]);
        assert_eq!(y_bounds(None, &[vec![(0.0, 3.0)]]), [2.0, 4.0]);
        assert_eq!(y_bounds(None, &[vec![(0.0, 1.0)], vec![(1.0, 4.0)]]), [1.0, 4.0]);
    }

    #[test]
    fn test_axis_labels() {
        let labels = axis_labels([0.0, 10.0]);
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[1], Line::from("5.0"));
    }
}
