//! Stateless UI rendering for the soda lineup.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
};
use rand::Rng;
use strictly_sodas::{Brand, Clock, GameStatus, GameView, KeyValueStore, Modal, Slot};

use super::app::App;
use super::input::{Focus, HitMap};

const INSTRUCTIONS: &str = "\
A row of sodas has been lined up in secret.
Recreate the order.

Drag a can from the shelf onto a slot, or use the arrow keys and
Enter to pick up and drop. Backspace sends a can back to the shelf.

When every slot is filled, press [c] to confirm. You are told how
many cans are in the right place, never which ones.

Solve the top unlocked level to unlock the next one.

Press any key to start.";

/// Draws one frame and returns the regions the mouse can hit.
pub fn draw<S, C, R>(frame: &mut Frame, app: &App<S, C, R>) -> HitMap
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
{
    let view = app.view();
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(3), // Title
        Constraint::Length(5), // Slots
        Constraint::Length(5), // Shelf
        Constraint::Min(4),    // History
        Constraint::Length(4), // Status
    ])
    .split(area);

    draw_title(frame, chunks[0], &view);
    let slots = draw_slots(frame, chunks[1], app, &view);
    let shelf = draw_shelf(frame, chunks[2], app, &view);
    draw_history(frame, chunks[3], &view);
    draw_status(frame, chunks[4], app, &view);

    match view.modal() {
        Some(Modal::Instructions) => draw_instructions(frame, area),
        Some(Modal::LevelSelect) => draw_level_picker(frame, area, app, &view),
        None if app.show_records() => draw_records(frame, area, app),
        None => {}
    }

    HitMap::new(slots, shelf, chunks[2])
}

fn brand_style(brand: Brand) -> Style {
    let (body, label) = brand.colors();
    Style::new()
        .bg(body.parse::<Color>().unwrap_or(Color::Gray))
        .fg(label.parse::<Color>().unwrap_or(Color::Black))
        .add_modifier(Modifier::BOLD)
}

fn draw_title(frame: &mut Frame, area: Rect, view: &GameView) {
    let title = format!(
        "Strictly Sodas - Level {} (unlocked up to {})    {}",
        view.difficulty(),
        view.max_unlocked(),
        view.clock_label()
    );
    let paragraph = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(paragraph, area);
}

fn draw_slots<S, C, R>(frame: &mut Frame, area: Rect, app: &App<S, C, R>, view: &GameView) -> Vec<Rect>
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
{
    let board = view.board();
    let cells = Layout::horizontal(vec![Constraint::Fill(1); board.len()]).split(area);
    let cursor = app.cursor();

    for (index, (slot, cell)) in board.slots().iter().zip(cells.iter()).enumerate() {
        let focused = cursor.focus() == Focus::Slots && cursor.index() == index;
        let border = if focused && app.is_holding() {
            Style::default().fg(Color::Yellow)
        } else if focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let content = match slot {
            Slot::Filled(brand) => Line::from(Span::styled(
                format!(" {} {} ", brand.glyph(), brand.name()),
                brand_style(*brand),
            )),
            Slot::Empty => Line::from(Span::styled("empty", Style::default().fg(Color::DarkGray))),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!("{}", index + 1));
        frame.render_widget(
            Paragraph::new(content).alignment(Alignment::Center).block(block),
            *cell,
        );
    }
    cells.to_vec()
}

fn draw_shelf<S, C, R>(
    frame: &mut Frame,
    area: Rect,
    app: &App<S, C, R>,
    view: &GameView,
) -> Vec<(Rect, Brand)>
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
{
    if let Some(target) = view.target() {
        let spans: Vec<Span> = target
            .iter()
            .flat_map(|brand| {
                [
                    Span::styled(format!(" {} ", brand.name()), brand_style(*brand)),
                    Span::raw(" "),
                ]
            })
            .collect();
        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Solution"));
        frame.render_widget(paragraph, area);
        return Vec::new();
    }

    let block = Block::default().borders(Borders::ALL).title("Shelf");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let inventory = view.inventory();
    if inventory.is_empty() {
        let hint = Paragraph::new("All cans placed - press [c] to confirm")
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center);
        frame.render_widget(hint, inner);
        return Vec::new();
    }

    let cursor = app.cursor();
    let cells = Layout::horizontal(vec![Constraint::Fill(1); inventory.len()]).split(inner);
    let mut hits = Vec::with_capacity(inventory.len());
    for (index, (brand, cell)) in inventory.iter().zip(cells.iter()).enumerate() {
        let focused = cursor.focus() == Focus::Inventory && cursor.index() == index;
        let mut style = brand_style(*brand);
        if focused {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let label = Paragraph::new(Span::styled(
            format!(" {} {} ", brand.glyph(), brand.name()),
            style,
        ))
        .alignment(Alignment::Center);
        frame.render_widget(label, *cell);
        hits.push((*cell, *brand));
    }
    hits
}

fn draw_history(frame: &mut Frame, area: Rect, view: &GameView) {
    let rows = view.history().iter().map(|entry| {
        let lineup: String = entry.snapshot().brands().iter().map(|b| b.glyph()).collect();
        Row::new(vec![
            Cell::from(entry.id().to_string()),
            Cell::from(lineup),
            Cell::from(format!("{}/{}", entry.matches(), view.difficulty())),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(9),
        ],
    )
    .header(
        Row::new(vec!["#", "Lineup", "In place"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title("Attempts"));
    frame.render_widget(table, area);
}

fn draw_status<S, C, R>(frame: &mut Frame, area: Rect, app: &App<S, C, R>, view: &GameView)
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
{
    let color = match view.status() {
        GameStatus::Won => Color::Green,
        GameStatus::Playing => Color::Yellow,
    };
    let cue = app
        .last_cue()
        .map(|cue| format!("  ({})", cue))
        .unwrap_or_default();
    let keys = if *view.can_confirm() {
        "[c] confirm  [l] levels  [h] records  [i] help  [q] quit"
    } else {
        "[arrows/enter] move  [tab] shelf  [l] levels  [h] records  [i] help  [q] quit"
    };

    let text = vec![
        Line::from(Span::styled(
            format!("{}{}", app.status_message(), cue),
            Style::default().fg(color),
        )),
        Line::from(Span::styled(keys, Style::default().fg(Color::DarkGray))),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(paragraph, area);
}

fn draw_instructions(frame: &mut Frame, area: Rect) {
    let popup = center_rect(area, 70, 16);
    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(INSTRUCTIONS)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("How to play"));
    frame.render_widget(paragraph, popup);
}

fn draw_level_picker<S, C, R>(frame: &mut Frame, area: Rect, app: &App<S, C, R>, view: &GameView)
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
{
    let popup = center_rect(area, 60, 7);
    frame.render_widget(Clear, popup);

    let spans: Vec<Span> = view
        .levels()
        .map(|(level, unlocked)| {
            let mut style = if unlocked {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if level == app.level_cursor() {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let mark = if unlocked { "" } else { "*" };
            Span::styled(format!(" {}{} ", level, mark), style)
        })
        .collect();

    let text = vec![
        Line::from(spans),
        Line::from(""),
        Line::from("[left/right] choose  [enter] play  [esc] back   * locked"),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Choose a level"));
    frame.render_widget(paragraph, popup);
}

fn draw_records<S, C, R>(frame: &mut Frame, area: Rect, app: &App<S, C, R>)
where
    S: KeyValueStore,
    C: Clock,
    R: Rng,
{
    let popup = center_rect(area, 64, 16);
    frame.render_widget(Clear, popup);

    let ranked = app.game().records().ranked();
    let rows = ranked.iter().map(|record| {
        Row::new(vec![
            Cell::from(record.difficulty().to_string()),
            Cell::from(record.attempts().to_string()),
            Cell::from(format!(
                "{}:{:02}",
                record.duration_secs() / 60,
                record.duration_secs() % 60
            )),
            Cell::from(record.timestamp().format("%Y-%m-%d %H:%M").to_string()),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Min(16),
        ],
    )
    .header(
        Row::new(vec!["Level", "Attempts", "Time", "Won"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Records ({})  [h] close", ranked.len())),
    );
    frame.render_widget(table, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
