//! One side of the battlefield

use crate::app::App;
use crate::ui::{bar, health_color};
use battle_core::targeting::aggro_percent;
use battle_core::types::TeamSide;
use battle_core::{BattleCharacter, CharacterId};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const BAR_WIDTH: usize = 16;

pub fn draw(f: &mut Frame, app: &App, area: Rect, side: TeamSide) {
    let field = app.battle.field();
    let active = app.battle.active();
    let highlighted = app.highlighted_target();
    let candidates = app.target_candidates();
    let last_hit = app.hud.borrow().last_hit;

    let mut lines = Vec::new();
    for id in field.ids(side) {
        let Some(c) = field.get(id) else {
            continue;
        };
        let marker = if Some(id) == highlighted {
            Span::styled("» ", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        } else if candidates.contains(&id) {
            Span::styled("· ", Style::default().fg(Color::Magenta))
        } else {
            Span::raw("  ")
        };
        lines.extend(character_lines(app, c, id, marker, active == Some(id), last_hit == Some(id)));
        lines.push(Line::from(""));
    }

    let title = match side {
        TeamSide::Player => " Party ",
        TeamSide::Enemy => " Enemies ",
    };
    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(paragraph, area);
}

fn character_lines(
    app: &App,
    c: &BattleCharacter,
    id: CharacterId,
    marker: Span<'static>,
    is_active: bool,
    was_hit: bool,
) -> Vec<Line<'static>> {
    let name_style = if !c.is_alive() {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
    } else if is_active {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if was_hit {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    };

    let aggro = aggro_percent(app.battle.field(), id, &app.battle.config().aggro);
    let hp_color = health_color(c.current_hp, c.max_hp);

    let mut lines = vec![
        Line::from(vec![
            marker,
            Span::styled(c.name().to_string(), name_style),
            Span::styled(
                format!("  {:?} {:?}-{:?}", c.data.class, c.row, c.column),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(format!("  aggro {:.0}%", aggro * 100.0), Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::styled("  HP ", Style::default().fg(Color::Gray)),
            Span::styled(bar(c.current_hp, c.max_hp, BAR_WIDTH), Style::default().fg(hp_color)),
            Span::styled(
                format!(" {}/{}", c.current_hp, c.max_hp),
                Style::default().fg(hp_color),
            ),
        ]),
        Line::from(vec![
            Span::styled("  EN ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/{}", c.current_energy, c.max_energy),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled("  MP ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/{}", c.current_mana, c.max_mana),
                Style::default().fg(Color::Blue),
            ),
            Span::styled(
                format!("  AP {}L {}S", c.long_actions, c.short_actions),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    if !c.status_effects.is_empty() {
        let effects: Vec<String> = c
            .status_effects
            .iter()
            .map(|e| {
                if e.value > 0 {
                    format!("{} {}", e.effect_type.name(), e.value)
                } else {
                    e.effect_type.name().to_string()
                }
            })
            .collect();
        lines.push(Line::from(Span::styled(
            format!("  [{}]", effects.join(", ")),
            Style::default().fg(Color::Cyan),
        )));
    }

    lines
}
