use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{Cell, Game, GameState};
use crate::constants::{BOARD_WIDTH, BOARD_HEIGHT};

const EMPTY_CELL_COLOR: Color = Color::Rgb(30, 30, 30);

pub fn ui(f: &mut Frame, game: &Game) {
    let size = f.size();

    let board_height = BOARD_HEIGHT as u16 + 2;
    let board_width = BOARD_WIDTH as u16 * 2 + 2;

    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(board_height),
            Constraint::Min(0),
        ])
        .split(size);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(16),          // Score panel
            Constraint::Length(board_width),
            Constraint::Length(18),          // Controls panel
            Constraint::Min(0),
        ])
        .split(vertical_chunks[1]);

    let board_area = horizontal_chunks[2];

    render_board(f, game, board_area);
    render_stats(f, game, horizontal_chunks[1]);
    render_controls(f, horizontal_chunks[3]);

    match game.game_state {
        GameState::Paused => render_pause_overlay(f, board_area),
        GameState::GameOver => render_game_over_overlay(f, game, board_area),
        GameState::Falling => {}
    }
}

fn render_board(f: &mut Frame, game: &Game, area: Rect) {
    let mut render_board = game.board;

    if !game.is_game_over() {
        let piece = &game.current_piece;
        for (x, y) in piece.get_blocks() {
            if x >= 0 && x < BOARD_WIDTH as i32 && y >= 0 && y < BOARD_HEIGHT as i32 {
                render_board[y as usize][x as usize] = Cell::Filled(piece.piece.color);
            }
        }
    }

    let board_lines: Vec<Line> = render_board
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => Span::styled("░░", Style::default().fg(EMPTY_CELL_COLOR)),
                    Cell::Filled(color) => Span::styled("██", Style::default().fg(*color)),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let board_widget = Paragraph::new(board_lines)
        .block(Block::default()
               .borders(Borders::ALL)
               .title("blockfall"));

    f.render_widget(board_widget, area);
}

fn render_stats(f: &mut Frame, game: &Game, area: Rect) {
    let stats_text = vec![
        Line::from(vec![Span::styled("Score", Style::default().fg(Color::Cyan))]),
        Line::from(vec![Span::raw(game.score.to_string())]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::styled("Level", Style::default().fg(Color::Cyan))]),
        Line::from(vec![Span::raw(game.level().to_string())]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::styled("Lines", Style::default().fg(Color::Cyan))]),
        Line::from(vec![Span::raw(game.lines_cleared.to_string())]),
    ];

    let stats_widget = Paragraph::new(stats_text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    let height = area.height.min(10);
    f.render_widget(stats_widget, Rect { height, ..area });
}

fn render_controls(f: &mut Frame, area: Rect) {
    let controls = [
        ("←/→", "move"),
        ("↓", "drop"),
        ("Space", "rotate"),
        ("P", "pause"),
        ("Esc", "quit"),
    ];
    let lines: Vec<Line> = controls
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:<6}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        })
        .collect();

    let controls_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Keys"));

    let height = area.height.min(7);
    f.render_widget(controls_widget, Rect { height, ..area });
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn instruction(text: &str) -> Line<'_> {
    Line::from(vec![Span::styled(text, Style::default().fg(Color::Gray))])
}

fn render_pause_overlay(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(90, 40, area);
    f.render_widget(Clear, popup_area);

    let pause_text = vec![
        Line::from(vec![Span::styled(
            "PAUSE",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![Span::raw("")]),
        instruction("P: resume"),
        instruction("Enter: restart"),
        instruction("Esc: quit"),
    ];

    let pause_widget = Paragraph::new(pause_text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(pause_widget, popup_area);
}

fn render_game_over_overlay(f: &mut Frame, game: &Game, area: Rect) {
    let popup_area = centered_rect(90, 45, area);
    f.render_widget(Clear, popup_area);

    let game_over_text = vec![
        Line::from(vec![Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![Span::raw("")]),
        Line::from(vec![Span::styled(
            format!("Score: {}", game.score),
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![Span::raw("")]),
        instruction("Enter: restart"),
        instruction("Esc: quit"),
    ];

    let game_over_widget = Paragraph::new(game_over_text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    f.render_widget(game_over_widget, popup_area);
}
