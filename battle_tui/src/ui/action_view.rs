//! Action menu for the active human character

use crate::app::App;
use battle_core::types::PlayerInputPhase;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let Some(phase) = app.phase() else {
        let waiting = match app.active_character() {
            Some(c) => format!("{} is acting...", c.name()),
            None if app.battle.is_over() => "Battle over. [r] for another.".to_string(),
            None => "...".to_string(),
        };
        let list = List::new(vec![ListItem::new(Span::styled(
            waiting,
            Style::default().fg(Color::DarkGray),
        ))])
        .block(Block::default().borders(Borders::ALL).title(" Actions "));
        f.render_widget(list, area);
        return;
    };

    let Some(actor) = app.active_character() else {
        return;
    };

    let mut items: Vec<ListItem> = app
        .menu()
        .into_iter()
        .enumerate()
        .map(|(i, ability)| {
            let selected = i == app.menu_cursor && phase == PlayerInputPhase::SelectingAbility;
            let staged = app
                .battle
                .input()
                .staged_ability()
                .is_some_and(|s| s.name == ability.name);

            let style = if !actor.can_use_ability(ability) {
                Style::default().fg(Color::DarkGray)
            } else if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if staged {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default().fg(Color::White)
            };

            ListItem::new(Line::from(vec![
                Span::styled(if selected { "> " } else { "  " }, style),
                Span::styled(format!("{:18}", ability.name), style),
                Span::styled(ability.cost_summary(), Style::default().fg(Color::Gray)),
            ]))
        })
        .collect();

    let footer = match phase {
        PlayerInputPhase::SelectingAbility => None,
        PlayerInputPhase::SelectingTarget => Some("Choose a target".to_string()),
        PlayerInputPhase::AwaitingConfirmation => app.hud.borrow().staged.clone(),
    };
    if let Some(text) = footer {
        items.push(ListItem::new(""));
        items.push(ListItem::new(Span::styled(
            text,
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )));
    }

    let title = format!(" {} ", actor.name());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}
