use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};
use versesearch_core::{Output, Theme, Translation};
use crate::app::{App, InputMode};

/// Colors for the light and dark themes
struct Palette {
    bg: Color,
    fg: Color,
    muted: Color,
    accent: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            bg: Color::White,
            fg: Color::Black,
            muted: Color::Gray,
            accent: Color::Blue,
        },
        Theme::Dark => Palette {
            bg: Color::Rgb(30, 30, 30),
            fg: Color::White,
            muted: Color::DarkGray,
            accent: Color::Cyan,
        },
    }
}

/// Word-wrap `text` to `width` columns, keeping its own line breaks.
///
/// Words longer than a row are split so nothing is cut off at the edge.
fn wrap_text_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();

            for chunk in chars.chunks(width) {
                let piece: String = chunk.iter().collect();
                let piece_len = chunk.len();

                if current_len == 0 {
                    current_line = piece;
                    current_len = piece_len;
                } else if current_len + 1 + piece_len <= width {
                    current_line.push(' ');
                    current_line.push_str(&piece);
                    current_len += 1 + piece_len;
                } else {
                    lines.push(std::mem::take(&mut current_line));
                    current_line = piece;
                    current_len = piece_len;
                }
            }
        }

        // Blank source lines stay blank rows
        lines.push(current_line);
    }

    lines
}

/// Horizontal offset that keeps the input cursor inside a box `width` columns wide
fn input_scroll(cursor: usize, width: u16) -> u16 {
    let visible = (width as usize).max(1);
    cursor.saturating_sub(visible - 1) as u16
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let colors = palette(app.session.theme());

    frame.render_widget(
        Block::default().style(Style::default().bg(colors.bg).fg(colors.fg)),
        area,
    );

    // Main layout: header, input, translation, output, footer
    let [header_area, input_area, translation_area, output_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_input(app, frame, input_area, &colors);
    render_translation(app, frame, translation_area, &colors);
    render_output(app, frame, output_area, &colors);
    render_footer(app, frame, footer_area);

    // Render popups (in order of priority)
    if let Some(message) = app.popup.clone() {
        render_notice(frame, area, &message);
    } else if app.show_translation_picker {
        render_translation_picker(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let favorites = app.session.favorites().map(|f| f.count()).unwrap_or(0);
    let searches = app.session.history().map(|h| h.count()).unwrap_or(0);

    let title = Line::from(vec![
        Span::styled(" VerseSearch - Bible API Viewer ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!(" [{} searches, {} favorites]", searches, favorites),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect, colors: &Palette) {
    let editing = app.input_mode == InputMode::Editing;
    let border_color = if editing { colors.accent } else { colors.muted };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Verse Reference (e.g., John 3:16 or John 3:16-18) ");

    let inner = block.inner(area);

    let offset = input_scroll(app.reference_cursor, inner.width);

    let input = if app.reference_input.is_empty() && !editing {
        Paragraph::new("Press i to type a reference")
            .style(Style::default().fg(colors.muted))
    } else {
        Paragraph::new(app.reference_input.as_str())
            .style(Style::default().fg(colors.fg))
            .scroll((0, offset))
    };

    frame.render_widget(input.block(block), area);

    if editing {
        let cursor_x = (app.reference_cursor as u16).saturating_sub(offset);
        frame.set_cursor_position((inner.x + cursor_x, inner.y));
    }
}

fn render_translation(app: &App, frame: &mut Frame, area: Rect, colors: &Palette) {
    let line = Line::from(vec![
        Span::styled(" Translation: ", Style::default().fg(colors.muted)),
        Span::styled(
            app.session.translation().display_name(),
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_output(app: &mut App, frame: &mut Frame, area: Rect, colors: &Palette) {
    let title = match app.session.output() {
        Output::Listing(_) => " Listing ",
        _ => " Verse Result ",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.muted))
        .title(title);

    let inner = block.inner(area);
    app.output_height = inner.height;

    if app.is_loading() {
        let dots = ".".repeat(app.animation_frame as usize + 1);
        let reference = app
            .lookup
            .as_ref()
            .map(|pending| pending.reference.to_string())
            .unwrap_or_default();
        let loading = Paragraph::new(format!("Looking up {}{}", reference, dots))
            .style(Style::default().fg(colors.muted))
            .block(block);
        frame.render_widget(loading, area);
        return;
    }

    let style = match app.session.output() {
        Output::Notice(_) => Style::default().fg(Color::Yellow),
        _ => Style::default().fg(colors.fg),
    };

    let lines: Vec<Line> = wrap_text_to_width(app.session.output().text(), inner.width as usize)
        .into_iter()
        .map(Line::from)
        .collect();

    app.output_lines = lines.len().min(u16::MAX as usize) as u16;
    app.output_scroll = app.output_scroll.min(app.output_lines.saturating_sub(app.output_height));

    let paragraph = Paragraph::new(lines)
        .style(style)
        .scroll((app.output_scroll, 0))
        .block(block);
    frame.render_widget(paragraph, area);

    if app.output_lines > app.output_height {
        let mut scrollbar_state = ScrollbarState::new(app.output_lines.saturating_sub(app.output_height) as usize)
            .position(app.output_scroll as usize);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut scrollbar_state,
        );
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match app.input_mode {
        InputMode::Normal => " NORMAL ",
        InputMode::Editing => " EDIT ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut hints = vec![
        Span::styled(" Enter ", key_style),
        Span::styled(" search ", label_style),
        Span::styled(" Tab ", key_style),
        Span::styled(" translation ", label_style),
        Span::styled(" F2 ", key_style),
        Span::styled(" history ", label_style),
        Span::styled(" F3 ", key_style),
        Span::styled(" save ", label_style),
        Span::styled(" F4 ", key_style),
        Span::styled(" theme ", label_style),
        Span::styled(" F5 ", key_style),
        Span::styled(" favorite ", label_style),
        Span::styled(" F6 ", key_style),
        Span::styled(" favorites ", label_style),
        Span::styled(" ^L ", key_style),
        Span::styled(" clear ", label_style),
    ];
    hints.extend(match app.input_mode {
        InputMode::Editing => vec![
            Span::styled(" Esc ", key_style),
            Span::styled(" normal ", label_style),
        ],
        InputMode::Normal => vec![
            Span::styled(" i ", key_style),
            Span::styled(" edit ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ],
    });

    let footer_content = Line::from(
        vec![
            Span::styled(mode_text, mode_style),
            Span::styled(" ", label_style),
        ]
        .into_iter()
        .chain(hints)
        .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

fn render_notice(frame: &mut Frame, area: Rect, message: &str) {
    // Calculate popup size and position (centered)
    let popup_width = 50.min(area.width.saturating_sub(4));
    let popup_height = 5.min(area.height);

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Notice ")
        .title_bottom(" Enter to dismiss ");

    let notice = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(notice, popup_area);
}

fn render_translation_picker(app: &mut App, frame: &mut Frame, area: Rect) {
    let translations = Translation::all();

    let popup_width = 45.min(area.width.saturating_sub(4));
    let popup_height = (translations.len() as u16 + 2).min(area.height.saturating_sub(4));

    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Select Translation ");

    let current = app.session.translation();
    let items: Vec<ListItem> = translations
        .iter()
        .map(|translation| {
            let is_current = *translation == current;
            let prefix = if is_current { "* " } else { "  " };
            let style = if is_current {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{}{}", prefix, translation.display_name())).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, popup_area, &mut app.translation_picker_state);
}
