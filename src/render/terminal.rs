//! ratatui front end: playfield canvas plus HUD panels

use glam::Vec2;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color as TermColor, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine, Points, Rectangle};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};
use ratatui::Frame;

use crate::entity::EntityKind;
use crate::render::camera::{Viewport, CULL_MARGIN};
use crate::render::colors::{self, Color};
use crate::render::{collect_render_entities, FrameView, RenderEntity};
use crate::simulation::constants::{HOUSE_X, WORLD_HEIGHT, WORLD_WIDTH};
use crate::simulation::GameStatus;
use crate::ui::EventLog;

const HEALTH_BAR_WIDTH: f32 = 40.0;
const LOG_LINES: usize = 4;

/// Draw one full frame
pub fn draw_frame(
    frame: &mut Frame,
    view: &FrameView,
    log: &EventLog,
    entities: &mut Vec<RenderEntity>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(LOG_LINES as u16 + 3),
        ])
        .split(frame.size());

    collect_render_entities(view, entities);

    draw_hud(frame, chunks[0], view);
    draw_playfield(frame, chunks[1], view, entities);
    draw_thought_and_log(frame, chunks[2], view, log);

    match view.session.status {
        GameStatus::Playing => {}
        status => draw_overlay(frame, chunks[1], status, view.session.score),
    }
}

fn draw_hud(frame: &mut Frame, area: Rect, view: &FrameView) {
    let session = view.session;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
            Constraint::Percentage(35),
        ])
        .split(area);

    let family = session.family_health();
    let family_gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Family"))
        .gauge_style(Style::default().fg(colors::health_bar_color(family as f32 / 100.0).into()))
        .ratio((family as f64 / 100.0).clamp(0.0, 1.0))
        .label(format!("{}%", family));
    frame.render_widget(family_gauge, columns[0]);

    let hide_text = if session.hide.is_active() {
        Span::styled(
            format!("Hidden {:.1}s", session.hide.time_left_secs),
            Style::default().fg(TermColor::Green),
        )
    } else {
        Span::styled("Visible", Style::default().fg(TermColor::Gray))
    };
    frame.render_widget(
        Paragraph::new(Line::from(hide_text))
            .block(Block::default().borders(Borders::ALL).title("Hide [F]")),
        columns[1],
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            session.score.to_string(),
            Style::default()
                .fg(colors::GUARDIAN.into())
                .add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL).title("Score")),
        columns[2],
    );

    let distance_gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Distance"))
        .gauge_style(Style::default().fg(colors::HOUSE_WINDOW.into()))
        .ratio((session.distance_covered as f64 / 100.0).clamp(0.0, 1.0))
        .label(format!("{}%", session.distance_covered));
    frame.render_widget(distance_gauge, columns[3]);
}

fn draw_playfield(frame: &mut Frame, area: Rect, view: &FrameView, entities: &[RenderEntity]) {
    let viewport = Viewport::new(view.session.camera_x);
    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Thor: The Guardian"),
        )
        .background_color(colors::BACKGROUND.into())
        .marker(Marker::Braille)
        .x_bounds(viewport.x_bounds())
        .y_bounds(viewport.y_bounds())
        .paint(|ctx| {
            paint_scenery(ctx, view, &viewport);
            ctx.layer();
            paint_particles(ctx, view, &viewport);
            ctx.layer();
            for entity in entities {
                paint_entity(ctx, entity, &viewport);
            }
            paint_guardian_effects(ctx, view, &viewport);
        });
    frame.render_widget(canvas, area);
}

fn paint_scenery(ctx: &mut Context, view: &FrameView, viewport: &Viewport) {
    let grass = colors::GRASS.with_alpha(0.35);
    for tuft in &view.layout.grass {
        if !viewport.contains_x(tuft.position.x, 20.0) {
            continue;
        }
        let (x, y) = viewport.to_canvas(tuft.position);
        ctx.draw(&CanvasLine {
            x1: x,
            y1: y,
            x2: x,
            y2: y - tuft.height as f64,
            color: grass.into(),
        });
    }

    for bush in &view.layout.obstacles {
        if !viewport.contains_x(bush.position.x, CULL_MARGIN) {
            continue;
        }
        let (x, y) = viewport.to_canvas(bush.position);
        ctx.draw(&Circle {
            x,
            y,
            radius: bush.radius as f64,
            color: colors::BUSH.into(),
        });
        let rotation = Vec2::from_angle(bush.rotation);
        for leaf in &bush.leaves {
            let (lx, ly) = viewport.to_canvas(bush.position + rotation.rotate(leaf.offset));
            ctx.draw(&Circle {
                x: lx,
                y: ly,
                radius: leaf.radius as f64,
                color: colors::BUSH_LEAF.into(),
            });
        }
    }

    if viewport.contains_x(HOUSE_X, CULL_MARGIN) {
        paint_house(ctx);
    }
}

/// Goal house: walls, roof and a lit window
fn paint_house(ctx: &mut Context) {
    let x = HOUSE_X as f64;
    let mid = (WORLD_HEIGHT / 2.0) as f64;
    let eaves = mid + 70.0;
    ctx.draw(&Rectangle {
        x,
        y: mid - 30.0,
        width: 100.0,
        height: 100.0,
        color: colors::HOUSE_WALL.into(),
    });
    for (x1, x2) in [(x - 10.0, x + 50.0), (x + 110.0, x + 50.0)] {
        ctx.draw(&CanvasLine {
            x1,
            y1: eaves,
            x2,
            y2: eaves + 50.0,
            color: colors::HOUSE_ROOF.into(),
        });
    }
    ctx.draw(&Rectangle {
        x: x + 40.0,
        y: mid,
        width: 20.0,
        height: 20.0,
        color: colors::HOUSE_WINDOW.into(),
    });
    // Finish line a short way past the house
    let goal = (WORLD_WIDTH - 300.0) as f64;
    ctx.draw(&CanvasLine {
        x1: goal,
        y1: 0.0,
        x2: goal,
        y2: WORLD_HEIGHT as f64,
        color: colors::HOUSE_WINDOW.with_alpha(0.2).into(),
    });
}

fn paint_particles(ctx: &mut Context, view: &FrameView, viewport: &Viewport) {
    for particle in &view.session.particles {
        if !viewport.contains_x(particle.position.x, 0.0) {
            continue;
        }
        let color = colors::particle_color(particle.tint).with_alpha(particle.life);
        let coords = [viewport.to_canvas(particle.position)];
        ctx.draw(&Points {
            coords: &coords,
            color: color.into(),
        });
    }
}

fn paint_entity(ctx: &mut Context, entity: &RenderEntity, viewport: &Viewport) {
    let mut color = colors::flash_tint(colors::kind_color(entity.kind), entity.flashing);
    if entity.concealed {
        color = color.with_alpha(0.2);
    }
    // Near-black enemies would vanish against the background
    if matches!(entity.kind, EntityKind::Enemy(_)) {
        color = outline_visible(color);
    }

    let (x, y) = viewport.to_canvas(entity.position);
    ctx.draw(&Circle {
        x,
        y,
        radius: entity.radius as f64,
        color: color.into(),
    });
    let facing = Vec2::from_angle(entity.angle) * entity.radius;
    let (nx, ny) = viewport.to_canvas(entity.position + facing);
    ctx.draw(&CanvasLine {
        x1: x,
        y1: y,
        x2: nx,
        y2: ny,
        color: color.into(),
    });

    if entity.kind != EntityKind::Guardian {
        let bar_y = y + entity.radius as f64 + 15.0;
        let left = x - (HEALTH_BAR_WIDTH / 2.0) as f64;
        let filled = (HEALTH_BAR_WIDTH * entity.health_fraction) as f64;
        if filled > 0.0 {
            ctx.draw(&CanvasLine {
                x1: left,
                y1: bar_y,
                x2: left + filled,
                y2: bar_y,
                color: colors::health_bar_color(entity.health_fraction).into(),
            });
        }
    }
}

fn outline_visible(color: Color) -> Color {
    let luma = 0.3 * color.r + 0.59 * color.g + 0.11 * color.b;
    if luma < 0.2 {
        Color::new(color.r + 0.25, color.g + 0.25, color.b + 0.25, color.a)
    } else {
        color
    }
}

/// Bark ring and bite arc
fn paint_guardian_effects(ctx: &mut Context, view: &FrameView, viewport: &Viewport) {
    let guardian = &view.session.guardian;
    let (x, y) = viewport.to_canvas(guardian.body.position);

    let bark_ticks = view.config.bark_visual_ticks.max(1) as f32;
    if guardian.bark_ticks > 0 {
        let remaining = guardian.bark_ticks as f32 / bark_ticks;
        let ring = (1.0 - remaining) * view.config.bark_range;
        if ring > 0.0 {
            ctx.draw(&Circle {
                x,
                y,
                radius: ring as f64,
                color: colors::WHITE.with_alpha(remaining).into(),
            });
        }
    }

    let attack_ticks = view.config.attack_visual_ticks.max(1) as f32;
    if guardian.attack_ticks > 0 {
        let alpha = guardian.attack_ticks as f32 / attack_ticks;
        let facing = Vec2::from_angle(guardian.body.angle);
        let center = guardian.body.position + facing * (guardian.body.radius + 10.0);
        let coords: Vec<(f64, f64)> = (0..=8)
            .map(|i| {
                let offset = -0.5 + i as f32 / 8.0;
                let point = center + Vec2::from_angle(guardian.body.angle + offset) * 25.0;
                viewport.to_canvas(point)
            })
            .collect();
        ctx.draw(&Points {
            coords: &coords,
            color: colors::WHITE.with_alpha(alpha).into(),
        });
    }
}

fn draw_thought_and_log(frame: &mut Frame, area: Rect, view: &FrameView, log: &EventLog) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let thought = Paragraph::new(Line::from(Span::styled(
        format!("\"{}\"", view.thought),
        Style::default()
            .fg(colors::GUARDIAN.into())
            .add_modifier(Modifier::ITALIC),
    )))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title("Thor thinks"));
    frame.render_widget(thought, columns[0]);

    let lines: Vec<Line> = log
        .recent(LOG_LINES)
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("{:>6} ", entry.tick),
                    Style::default().fg(TermColor::DarkGray),
                ),
                Span::styled(
                    entry.message.as_str(),
                    Style::default().fg(colors::log_category_color(entry.category).into()),
                ),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Log")),
        columns[1],
    );
}

fn draw_overlay(frame: &mut Frame, area: Rect, status: GameStatus, score: u32) {
    let (title, body, color) = match status {
        GameStatus::Start => (
            "THOR: THE GUARDIAN",
            "Escort the family home through the forest.".to_string(),
            colors::GUARDIAN,
        ),
        GameStatus::Won => (
            "HOME SAFE!",
            format!("The family made it. Score: {}", score),
            colors::HEALTH_OK,
        ),
        GameStatus::Lost => (
            "THE FAMILY FELL",
            format!("Score: {}", score),
            colors::HEALTH_LOW,
        ),
        GameStatus::Playing => return,
    };

    let lines = vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(color.into()).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(body),
        Line::from(""),
        Line::from("Move: arrows/WASD   Bite: Space   Bark: E   Hide: F"),
        Line::from(Span::styled(
            "Press Enter to start, Q to quit",
            Style::default().fg(TermColor::Yellow),
        )),
    ];

    let popup = centered_rect(60, 50, area);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        popup,
    );
}

/// Rect of the given percentage size centered in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::simulation::Session;
    use crate::world::WorldLayout;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(session: &Session) -> String {
        let config = GameConfig::default();
        let layout = WorldLayout::default();
        let view = FrameView {
            config: &config,
            session,
            layout: &layout,
            thought: "Nobody touches my family!",
        };
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let log = EventLog::new();
        let mut entities = Vec::new();
        terminal
            .draw(|frame| draw_frame(frame, &view, &log, &mut entities))
            .unwrap();
        terminal.backend().to_string()
    }

    #[test]
    fn test_start_screen_shows_title() {
        let text = render(&Session::new());
        assert!(text.contains("THOR: THE GUARDIAN"));
        assert!(text.contains("Thor thinks"));
    }

    #[test]
    fn test_playing_has_no_overlay() {
        let text = render(&Session::begin());
        assert!(!text.contains("Press Enter"));
        assert!(text.contains("Score"));
    }

    #[test]
    fn test_centered_rect_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert!((59..=61).contains(&popup.width));
        assert!(popup.x >= 19 && popup.x <= 21);
        assert!(popup.bottom() <= area.bottom());
    }
}
