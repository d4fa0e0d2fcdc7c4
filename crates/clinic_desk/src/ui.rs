use aside::{AsideView, Page, Panel, PanelGeometry, ViewSource};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::data::VisitStatus;
use crate::department::Department;
use crate::desk::Desk;
use crate::payload::{Board, CustomerCard, DeskPayload, ScheduleCard, StaffCard};

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGray;

pub fn draw(frame: &mut Frame, desk: &Desk) {
    let [tabs, body, status] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let [toolbar, aside] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body);

    draw_tabs(frame, tabs, desk.department());
    draw_toolbar(frame, toolbar, desk);
    draw_aside(frame, aside, desk);
    draw_status(frame, status, desk);
}

fn draw_tabs(frame: &mut Frame, area: Rect, department: Department) {
    let titles = Department::all()
        .into_iter()
        .enumerate()
        .map(|(i, d)| format!("{} {}", i + 1, d.title()));
    let tabs = Tabs::new(titles)
        .select(department.index())
        .block(Block::default().borders(Borders::ALL).title(" Clinic Desk "))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn draw_toolbar(frame: &mut Frame, area: Rect, desk: &Desk) {
    let items: Vec<ListItem> = desk
        .queue()
        .into_iter()
        .map(|c| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("#{} ", c.chart_no)).fg(MUTED),
                Span::raw(c.name.clone()),
                Span::raw(format!("  {}", c.status)).fg(status_color(c.status)),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Queue ")
                .title_bottom(" ↑↓ select · Enter open · s staff · a schedule "),
        )
        .highlight_style(Style::default().bg(ACCENT).fg(Color::Black))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(desk.selected());
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_aside(frame: &mut Frame, area: Rect, desk: &Desk) {
    let [crumbs, panels_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    match desk.navigator().view() {
        AsideView::Shell => {
            let shell = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(MUTED))
                .title(" Aside ");
            frame.render_widget(shell, panels_area);
        }
        AsideView::Panels {
            mut panels,
            current_index,
            source,
        } => {
            frame.render_widget(breadcrumb(&panels, current_index, source), crumbs);
            panels.sort_by_key(|panel| panel.geometry.stack_order);
            for panel in &panels {
                if let Some(rect) = panel_rect(panels_area, panel.geometry) {
                    draw_panel(frame, rect, panel.page, desk);
                }
            }
        }
    }
}

/// Horizontal slot for a panel, `None` when it lies entirely off-screen.
fn panel_rect(area: Rect, geometry: PanelGeometry) -> Option<Rect> {
    let width = i64::from(area.width);
    let x = i64::from(area.x) + geometry.translate_percent * width / 100;
    let visible_from = x.max(i64::from(area.x));
    let visible_to = (x + width).min(i64::from(area.right()));
    if visible_to <= visible_from {
        return None;
    }
    Some(Rect {
        x: u16::try_from(visible_from).ok()?,
        width: u16::try_from(visible_to - visible_from).ok()?,
        ..area
    })
}

fn breadcrumb<'a>(
    panels: &[Panel<'a, DeskPayload>],
    current_index: usize,
    source: ViewSource,
) -> Line<'a> {
    let mut spans = Vec::new();
    for (i, panel) in panels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" › ").fg(MUTED));
        }
        let label = Span::raw(panel.page.id.to_string());
        spans.push(if i == current_index {
            label.fg(ACCENT).bold()
        } else {
            label
        });
    }
    if source == ViewSource::Held {
        spans.push(Span::raw("  (held)").fg(MUTED).italic());
    }
    Line::from(spans)
}

fn draw_panel(frame: &mut Frame, area: Rect, page: &Page<DeskPayload>, desk: &Desk) {
    frame.render_widget(Clear, area);
    let lines = match &page.payload {
        DeskPayload::Board(board) => board_lines(board),
        DeskPayload::Customer(card) => customer_lines(card),
        DeskPayload::Staff(card) => staff_lines(card, desk.roster_cursor()),
        DeskPayload::Schedule(card) => schedule_lines(card),
    };
    let mut body = Paragraph::new(lines).wrap(Wrap { trim: false });
    if page.kind == aside::PageKind::Wrapped {
        body = body.block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .title(format!(" {} ", page.payload.title()))
                .title_bottom(" Esc back · h home "),
        );
    }
    frame.render_widget(body, area);
}

fn board_lines(board: &Board) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(board.department.title().to_string()).bold(),
        Line::from(format!("updated {}", board.refreshed_at.format("%H:%M:%S"))).fg(MUTED),
        Line::default(),
        Line::from("Today").fg(ACCENT),
    ];
    if board.schedule.is_empty() {
        lines.push(Line::from("  nothing scheduled").fg(MUTED));
    }
    for appointment in &board.schedule {
        let name = board
            .queue
            .iter()
            .find(|c| c.chart_no == appointment.chart_no)
            .map_or("?", |c| c.name.as_str());
        lines.push(Line::from(format!(
            "  {}  {:<14} {}",
            appointment.time, name, appointment.note
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from("Notices").fg(ACCENT));
    for notice in &board.notices {
        lines.push(Line::from(format!("  • {notice}")));
    }
    lines.push(Line::default());
    lines.push(Line::from(format!("{} in queue", board.queue.len())).fg(MUTED));
    lines
}

fn customer_lines(card: &CustomerCard) -> Vec<Line<'static>> {
    let customer = &card.customer;
    let mut lines = vec![
        field("Chart", customer.chart_no.to_string()),
        field("Purpose", customer.purpose.clone()),
        field("Status", customer.status.to_string()),
        field("Department", customer.department.title().to_string()),
        field(
            "Staff",
            card.staff
                .as_ref()
                .map_or_else(|| "unassigned".into(), |s| s.name.clone()),
        ),
    ];
    if let Some(next) = &card.next_appointment {
        lines.push(field("Next", format!("{} {}", next.time, next.note)));
    }
    lines
}

fn staff_lines(card: &StaffCard, cursor: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        field("Role", card.staff.role.clone()),
        field("Department", card.staff.department.title().to_string()),
        Line::default(),
        Line::from("Roster  (↑↓ select · c open)").fg(ACCENT),
    ];
    for (i, customer) in card.roster.iter().enumerate() {
        let line = Line::from(format!(
            "  #{} {} · {}",
            customer.chart_no, customer.name, customer.purpose
        ));
        lines.push(if i == cursor {
            line.bg(ACCENT).fg(Color::Black)
        } else {
            line
        });
    }
    lines
}

fn schedule_lines(card: &ScheduleCard) -> Vec<Line<'static>> {
    vec![
        field("Time", card.appointment.time.clone()),
        field(
            "Customer",
            card.customer
                .as_ref()
                .map_or_else(|| format!("#{}", card.appointment.chart_no), |c| c.name.clone()),
        ),
        field(
            "Staff",
            card.staff
                .as_ref()
                .map_or_else(|| "unassigned".into(), |s| s.name.clone()),
        ),
        field("Note", card.appointment.note.clone()),
    ]
}

fn field(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("{label:<11}")).fg(MUTED),
        Span::raw(value),
    ])
}

fn draw_status(frame: &mut Frame, area: Rect, desk: &Desk) {
    let nav = desk.navigator();
    let viewing = desk
        .viewing()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    let lock = if nav.is_locked() { "locked" } else { "open" };
    let mut spans = vec![
        Span::raw(format!(" viewing: {viewing} ")).bold(),
        Span::raw(format!("│ {} │ {} │ {} ", nav.phase(), lock, nav.generation())).fg(MUTED),
    ];
    if let Some(status) = desk.status() {
        spans.push(Span::raw(format!("│ {status}")).fg(Color::Yellow));
    }
    spans.push(Span::raw("  q quit").fg(MUTED));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn status_color(status: VisitStatus) -> Color {
    match status {
        VisitStatus::Waiting => Color::Yellow,
        VisitStatus::InSession => Color::Green,
        VisitStatus::Done => MUTED,
    }
}
