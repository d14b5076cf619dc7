use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::flow::FlowState;
use crate::models::{RevealIntensity, RewardResult, RewardTier};
use crate::tui::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(frame.size());

    draw_title(frame, chunks[0]);
    draw_input(frame, app, chunks[1]);
    draw_body(frame, app, chunks[2]);
    draw_help(frame, app, chunks[3]);
}

fn draw_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new("🎁 How many 𝕏 presents do you get?")
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let style = if app.flow.is_checking() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let input = Paragraph::new(app.input.as_str())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Your x dot com handle"));
    frame.render_widget(input, area);
}

fn draw_body(frame: &mut Frame, app: &App, area: Rect) {
    match &app.flow {
        FlowState::Idle => draw_idle(frame, area),
        FlowState::Checking { handle } => draw_checking(frame, app, handle, area),
        FlowState::Denied { .. } => draw_denied(frame, app, area),
        FlowState::Error { message } => draw_error(frame, message, area),
        FlowState::Revealed { result } => draw_reveal(frame, app, result, area),
        FlowState::LeaderboardShown => draw_leaderboard(frame, &app.leaderboard, area),
    }
}

fn draw_idle(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from("Enter your handle and press Enter to check your presents."),
        Line::from(""),
        Line::from(Span::styled(
            "🎅 Ho ho ho!",
            Style::default().fg(Color::Green),
        )),
    ];
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(body, area);
}

fn draw_checking(frame: &mut Frame, app: &App, handle: &str, area: Rect) {
    let text = if app.confirm_pending {
        vec![
            Line::from(""),
            Line::from(format!("Do you follow @{}?", app.target_handle)),
            Line::from(""),
            Line::from(Span::styled(
                "press y or n",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
        ]
    } else {
        vec![
            Line::from(""),
            Line::from(format!("Checking @{} ...", handle)),
        ]
    };
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Checking"));
    frame.render_widget(body, area);
}

fn draw_denied(frame: &mut Frame, app: &App, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(format!(
            "You need to follow @{} first to see how many presents you'll get! 🎅",
            app.target_handle
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Follow here: {}", app.profile_url),
            Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
        )),
    ];
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(body, area);
}

fn draw_error(frame: &mut Frame, message: &str, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from("Oops! Something went wrong checking your X profile 😅"),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from("Edit your handle to try again."),
    ];
    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(body, area);
}

fn draw_reveal(frame: &mut Frame, app: &App, result: &RewardResult, area: Rect) {
    let tier = result.tier();
    let accent = intensity_color(tier.intensity());

    let headline = if result.reward == 0 {
        "No presents this time...".to_string()
    } else if result.reward == 1 {
        "1 Present!".to_string()
    } else {
        format!("{} Presents!", format_count(result.reward))
    };

    let mut text = vec![
        Line::from(""),
        Line::from(Span::styled(
            present_icons(result.reward),
            Style::default().fg(accent),
        )),
        Line::from(""),
        Line::from(Span::styled(
            headline,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(tier.message()),
    ];
    if tier.intensity() == RevealIntensity::Golden || tier.intensity() == RevealIntensity::Jackpot {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "✨ RARE FIND! ✨",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
        )));
    }
    if let Some(secs) = app.reveal_seconds_left() {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            format!("leaderboard in {}s (space to skip)", secs),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let body = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("@{}", result.handle))
                .border_style(Style::default().fg(accent)),
        );
    frame.render_widget(body, area);
}

fn draw_leaderboard(frame: &mut Frame, board: &[RewardResult], area: Rect) {
    let items: Vec<ListItem> = if board.is_empty() {
        vec![ListItem::new("No checks recorded yet.")]
    } else {
        board
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let medal = match i {
                    0 => "🥇",
                    1 => "🥈",
                    2 => "🥉",
                    _ => "  ",
                };
                let line = format!(
                    "{} {:>3}. @{:<18} {:>10} presents   {}",
                    medal,
                    i + 1,
                    entry.handle,
                    format_count(entry.reward),
                    entry.timestamp.format("%Y-%m-%d %H:%M")
                );
                let style = match RewardTier::from_reward(entry.reward).intensity() {
                    RevealIntensity::Jackpot => Style::default().fg(Color::Magenta),
                    RevealIntensity::Golden => Style::default().fg(Color::Yellow),
                    RevealIntensity::Festive => Style::default().fg(Color::Green),
                    RevealIntensity::Plain => Style::default(),
                };
                ListItem::new(line).style(style)
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("🏆 Leaderboard"),
    );
    frame.render_widget(list, area);
}

fn draw_help(frame: &mut Frame, app: &App, area: Rect) {
    let help = if app.confirm_pending {
        "y/n: answer | Esc: cancel | Ctrl+C: quit"
    } else {
        match app.flow {
            FlowState::Revealed { .. } => "Space: show leaderboard | Esc: reset | Ctrl+C: quit",
            FlowState::LeaderboardShown => "Esc: new check | Ctrl+C: quit",
            _ => "Enter: check | Esc: reset | Ctrl+C: quit",
        }
    };
    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn intensity_color(intensity: RevealIntensity) -> Color {
    match intensity {
        RevealIntensity::Jackpot => Color::Magenta,
        RevealIntensity::Golden => Color::Yellow,
        RevealIntensity::Festive => Color::Green,
        RevealIntensity::Plain => Color::White,
    }
}

/// Gift row capped at ten icons.
fn present_icons(reward: u64) -> String {
    if reward == 0 {
        return "🎁".to_string();
    }
    let count = reward.min(10) as usize;
    std::iter::repeat("🎁").take(count).collect::<Vec<_>>().join(" ")
}

/// Thousands separators for reveal and leaderboard counts.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
