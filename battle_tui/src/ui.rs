//! UI rendering

mod action_view;
mod help_view;
mod party_view;

use crate::app::App;
use battle_core::types::{BattleState, PlayerInputPhase, TeamSide};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Status bar
            Constraint::Min(12),    // Battlefield
            Constraint::Length(12), // Actions and log
            Constraint::Length(3),  // Keybindings footer
        ])
        .split(f.area());

    draw_status_bar(f, app, chunks[0]);

    if app.show_help {
        help_view::draw(f, app, chunks[1]);
    } else {
        let sides = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        party_view::draw(f, app, sides[0], TeamSide::Player);
        party_view::draw(f, app, sides[1], TeamSide::Enemy);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(30)])
        .split(chunks[2]);
    action_view::draw(f, app, bottom[0]);
    draw_combat_log(f, app, bottom[1]);

    draw_keybindings(f, app, chunks[3]);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let battle = &app.battle;
    let (state_text, state_color) = match battle.state() {
        BattleState::Victory => ("VICTORY", Color::Green),
        BattleState::Defeat => ("DEFEAT", Color::Red),
        BattleState::AwaitingInput => ("Your move", Color::Yellow),
        BattleState::Setup => ("Setting up", Color::Gray),
        _ => ("Fighting", Color::White),
    };

    let queue: Vec<String> = battle
        .queue()
        .iter()
        .map(|&id| battle.field().name(id).to_string())
        .collect();

    let line = Line::from(vec![
        Span::styled("Round ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{}", battle.round()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            state_text,
            Style::default().fg(state_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Next: ", Style::default().fg(Color::Gray)),
        Span::styled(
            if queue.is_empty() {
                "-".to_string()
            } else {
                queue.join(" > ")
            },
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("  seed {}", app.seed), Style::default().fg(Color::DarkGray)),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Battle "));
    f.render_widget(paragraph, area);
}

fn draw_combat_log(f: &mut Frame, app: &App, area: Rect) {
    let log = app.log.borrow();
    let visible = area.height.saturating_sub(2) as usize;
    let skip = log.len().saturating_sub(visible + app.log_scroll);

    let items: Vec<ListItem> = log
        .messages()
        .skip(skip)
        .take(visible)
        .map(|line| {
            let style = if line.contains("defeated") || line == "Defeat..." {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            } else if line == "Victory!" {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if line.contains("CRITICAL") {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if line.ends_with("'s turn!") {
                Style::default().fg(Color::Cyan)
            } else if line.contains("Heals") || line.contains("Shield") {
                Style::default().fg(Color::Green)
            } else if line.ends_with("missed!") || line.ends_with("dodged!") || line.ends_with("passes!") {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(line.to_string(), style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Combat Log (PgUp/PgDn to scroll) "),
    );
    f.render_widget(list, area);
}

fn draw_keybindings(f: &mut Frame, app: &App, area: Rect) {
    let common_keys = vec![("r", "New battle"), ("?", "Help"), ("q", "Quit")];

    let phase_keys: Vec<(&str, &str)> = match app.phase() {
        Some(PlayerInputPhase::SelectingAbility) => {
            vec![("↑/↓", "Ability"), ("Enter", "Select"), ("p", "Pass turn")]
        }
        Some(PlayerInputPhase::SelectingTarget) => {
            vec![("↑/↓", "Target"), ("Enter", "Select"), ("Esc", "Back")]
        }
        Some(PlayerInputPhase::AwaitingConfirmation) => vec![("Enter", "Confirm"), ("Esc", "Back")],
        None => vec![],
    };

    let mut spans: Vec<Span> = Vec::new();

    for (i, (key, desc)) in phase_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::White)));
    }

    if !phase_keys.is_empty() {
        spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
    }

    for (i, (key, desc)) in common_keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(format!("[{}]", key), Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(Color::Gray)));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Keys "))
        .alignment(Alignment::Center);

    f.render_widget(paragraph, area);
}

/// Text gauge like `████░░░░`
pub fn bar(current: u32, max: u32, width: usize) -> String {
    let filled = if max > 0 {
        (current as usize * width) / max as usize
    } else {
        0
    };
    let filled = filled.min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Green above half, yellow above a quarter, red below
pub fn health_color(current: u32, max: u32) -> Color {
    let percent = if max > 0 {
        current as f64 / max as f64
    } else {
        0.0
    };
    if percent > 0.5 {
        Color::Green
    } else if percent > 0.25 {
        Color::Yellow
    } else {
        Color::Red
    }
}
