//! Help view

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let config = app.battle.config();

    let lines = vec![
        header("═══ Controls ═══"),
        key_line("↑/k  ↓/j", "Move through abilities or targets"),
        key_line("Enter / Space", "Select, then confirm"),
        key_line("Esc / Backspace", "Step back"),
        key_line("p", "Pass the rest of the turn"),
        key_line("PgUp / PgDn", "Scroll combat log"),
        key_line("r", "Start a new battle (next seed)"),
        key_line("q / Ctrl+C", "Quit"),
        Line::from(""),
        header("═══ Turns ═══"),
        Line::from(format!(
            "  Each turn grants {} Long and {} Short action point(s).",
            config.action_points.long, config.action_points.short
        )),
        Line::from("  Short abilities may borrow the Long action."),
        Line::from("  Order: priority bucket first, then initiative."),
        Line::from(""),
        header("═══ Damage ═══"),
        Line::from(format!(
            "  Physical = round(power + STR × {}) - armor",
            config.damage.strength_multiplier
        )),
        Line::from("  Magical = round(power × (1 - resist / 100))"),
        Line::from(format!(
            "  Crits deal ×{}; Mark adds {:.0}% before shields absorb",
            config.hit.crit_damage_multiplier,
            config.status.mark_damage_bonus * 100.0
        )),
        Line::from(""),
        header("═══ Stances ═══"),
        Line::from("  Anticipate: act first next round, lose a short action"),
        Line::from(format!(
            "  Prepare: act last, recover {:.0}% energy and mana",
            config.status.prepare_bonus * 100.0
        )),
        Line::from(format!(
            "  Protect ×{} / Hide ×{} chance of being targeted",
            config.aggro.protect_multiplier, config.aggro.hide_multiplier
        )),
    ];

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(paragraph, area);
}

fn header(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:20}", key), Style::default().fg(Color::Yellow)),
        Span::styled(desc.to_string(), Style::default().fg(Color::White)),
    ])
}
