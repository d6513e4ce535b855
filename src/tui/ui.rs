//! Rendering for the folder picker

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Gauge, List, ListItem, Paragraph},
    Frame,
};

use super::app::{App, Mode};

pub fn render(frame: &mut Frame, app: &mut App) {
    let [header, body, gauge, help] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let [folders, logs] = Layout::horizontal([Constraint::Percentage(40), Constraint::Fill(1)]).areas(body);

    render_header(frame, app, header);
    render_folders(frame, app, folders);
    render_logs(frame, app, logs);
    render_gauge(frame, app, gauge);
    frame.render_widget(Paragraph::new(help_line(app.mode())).dark_gray(), help);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let output = app
        .output_root()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "-".into());
    let toggle = if app.copy_non_pdf() { "[x]" } else { "[ ]" };

    let lines = vec![
        Line::from(vec![
            Span::raw("Input:  "),
            Span::styled(app.explorer.current().display().to_string(), Style::new().bold()),
        ]),
        Line::from(vec![Span::raw("Output: "), Span::styled(output, Style::new().fg(Color::Green))]),
    ];
    let block = Block::bordered().title(format!(" jstrip {}  Copy non-PDF files ", toggle));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_folders(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .explorer
        .entries()
        .iter()
        .map(|entry| {
            let name = if entry.is_parent { entry.name.clone() } else { format!("{}/", entry.name) };
            ListItem::new(name)
        })
        .collect();

    let title = match app.explorer.error() {
        Some(error) => format!(" Folders ({}) ", error),
        None => " Folders ".to_string(),
    };
    let list = List::new(items)
        .block(Block::bordered().title(title))
        .highlight_style(Style::new().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, app.explorer.state_mut());
}

fn render_logs(frame: &mut Frame, app: &App, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = app.logs().len().saturating_sub(visible);
    let items: Vec<ListItem> = app
        .logs()
        .iter()
        .skip(skip)
        .map(|line| ListItem::new(log_line(line)))
        .collect();
    frame.render_widget(List::new(items).block(Block::bordered().title(" Log ")), area);
}

fn log_line(line: &str) -> Line<'_> {
    let style = if line.contains("[CLEANED]") || line.contains("[WOULD CLEAN]") {
        Style::new().fg(Color::Green)
    } else if line.contains("ERROR") || line.contains("ENCRYPTED") || line.starts_with("Error") {
        Style::new().fg(Color::Yellow)
    } else {
        Style::new()
    };
    Line::styled(line, style)
}

fn render_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let (completed, total) = app.counts();
    let title = match app.stage() {
        Some(stage) => format!(" {} ", stage),
        None => " Idle ".to_string(),
    };
    let gauge = Gauge::default()
        .block(Block::bordered().title(title))
        .gauge_style(Style::new().fg(Color::Cyan))
        .ratio(app.fraction())
        .label(format!("{}/{}", completed, total));
    frame.render_widget(gauge, area);
}

fn help_line(mode: Mode) -> &'static str {
    match mode {
        Mode::Browse => "j/k move  enter open  backspace up  c toggle copy  s start  q quit",
        Mode::Running => "esc cancel  q cancel and quit",
        Mode::Finished => "enter back to folders  q quit",
    }
}
