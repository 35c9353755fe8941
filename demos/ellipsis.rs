//! Ellipsis Example - a paragraph clamped to the terminal width
//!
//! Demonstrates:
//! - A taffy viewport box as the measured surface
//! - Expand/collapse through the trailing control
//! - Row, position and marker changes
//! - Debounced resize recomputation
//!
//! Keys: space toggles, 1-5 set rows, s/m/e move the ellipsis,
//! d switches the marker, q quits.
//!
//! Run with: RUST_LOG=debug cargo run --example ellipsis

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
};
use spark_ellipsis::measure::wrap_lines;
use spark_ellipsis::{
    shell::scheduler, BoxStyle, CellMeasurer, Edges, EllipsisProps, ResizeDebouncer, TextEllipsis,
    TextWrap, TruncatePosition, Viewport,
};

const CONTENT: &str = "Fine-grained reactivity means only the parts of a terminal UI that \
    depend on a changed signal are recomputed. A text box that has to fit into a fixed \
    number of rows cannot know where to cut by counting characters: wrapping depends on \
    the width of the box, on where words break and on how wide each grapheme is. So the \
    candidate text is measured, and the cut is found by binary search, one measurement \
    per step, whatever the length of the paragraph.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let (columns, rows) = terminal::size()?;
    let viewport = Viewport::new(columns, rows)?;
    let node = viewport.add_text_box(BoxStyle {
        padding: Edges::symmetric(0.0, 2.0),
        wrap: TextWrap::Word,
        ..Default::default()
    })?;

    let props = EllipsisProps::new(CONTENT)
        .rows(2)
        .labels(" [more]", " [less]")
        .on_click_action(|expanded| log::info!("expanded: {expanded}"));
    let ellipsis = TextEllipsis::mount(props, viewport.surface(node), CellMeasurer);

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

    let result = run(&mut stdout, &viewport, &ellipsis);

    execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(
    stdout: &mut io::Stdout,
    viewport: &Viewport,
    ellipsis: &TextEllipsis<spark_ellipsis::BoxSurface>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut debouncer = ResizeDebouncer::default();
    draw(stdout, ellipsis)?;

    loop {
        let timeout = debouncer
            .deadline()
            .map(|at| at.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::from_millis(250));

        if event::poll(timeout)? {
            let event = event::read()?;
            if !debouncer.push(&event) {
                if let Event::Key(key) = event {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char(' ') | KeyCode::Enter => {
                            ellipsis.click_action();
                        }
                        KeyCode::Char(c @ '1'..='5') => ellipsis.set_rows(c as u32 - '0' as u32),
                        KeyCode::Char('s') => ellipsis.set_position(TruncatePosition::Start),
                        KeyCode::Char('m') => ellipsis.set_position(TruncatePosition::Middle),
                        KeyCode::Char('e') => ellipsis.set_position(TruncatePosition::End),
                        KeyCode::Char('d') => {
                            let next = if ellipsis.props().dots == "..." { "…" } else { "..." };
                            ellipsis.set_dots(next);
                        }
                        _ => continue,
                    }
                    draw(stdout, ellipsis)?;
                }
            }
        }

        if let Some((columns, rows)) = debouncer.poll() {
            viewport.resize(columns, rows)?;
            ellipsis.on_resize();
            draw(stdout, ellipsis)?;
        }

        if scheduler::run_turn() > 0 {
            draw(stdout, ellipsis)?;
        }
    }
}

fn draw(stdout: &mut io::Stdout, ellipsis: &TextEllipsis<spark_ellipsis::BoxSurface>) -> io::Result<()> {
    let view = ellipsis.view();
    let props = ellipsis.props();
    let status = format!(
        "rows {} | {:?} | marker {:?} | {}",
        props.rows,
        props.position,
        props.dots,
        if ellipsis.is_overflow() { "overflow" } else { "fits" }
    );
    drop(props);

    queue!(stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    queue!(stdout, SetAttribute(Attribute::Bold), Print("spark-ellipsis"), SetAttribute(Attribute::Reset))?;
    queue!(stdout, cursor::MoveTo(0, 1), Print(status))?;

    // The box has two cells of horizontal padding. Rows break the way
    // CellMeasurer counted them.
    let (columns, _) = terminal::size()?;
    let width = columns.saturating_sub(4).max(1) as usize;
    let text = view.to_string();
    for (row, line) in wrap_lines(&text, width, TextWrap::Word).iter().enumerate() {
        queue!(stdout, cursor::MoveTo(2, 3 + row as u16), Print(line))?;
    }
    stdout.flush()
}
