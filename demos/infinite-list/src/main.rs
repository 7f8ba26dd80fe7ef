//! Infinite-scroll list - scroll-dispatch demo
//!
//! The whole flow on one screen:
//! - Store: one pagination session over a fixed-delay mock fetcher
//! - Intents: scrolling past the last row fetches the next page,
//!   `r` refreshes the first page
//! - Rendering: the UI observes `list_items` and redraws on change;
//!   the trailing row shows the loading sentinel while a fetch runs
//!
//! Keys: j/Down = down, k/Up = up, G/End = jump to last row,
//! r = refresh, q = quit

use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListState, Paragraph},
    Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use scroll_dispatch::{DisposeBag, FixedDelayFetcher, ListItem, Store, Subscription};

/// Infinite-scroll list demo for scroll-dispatch
#[derive(Parser, Debug)]
#[command(name = "infinite-list")]
#[command(about = "An infinite-scroll list TUI demonstrating the scroll-dispatch flow")]
struct Args {
    /// Elements per fetched page
    #[arg(long, default_value = "20")]
    page_size: u64,

    /// Mock fetch latency in milliseconds
    #[arg(long, default_value = "400")]
    delay_ms: u64,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &args).await;

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Poll crossterm for key events on a background task until cancelled.
fn spawn_key_poller(
    tx: mpsc::UnboundedSender<KeyEvent>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(Duration::from_millis(16)) => {
                    while event::poll(Duration::from_millis(10)).unwrap_or(false) {
                        if let Ok(event::Event::Key(key)) = event::read() {
                            if tx.send(key).is_err() {
                                return;
                            }
                        }
                    }
                }
            }
        }
    })
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    args: &Args,
) -> io::Result<()> {
    let fetcher = FixedDelayFetcher::new(args.page_size, Duration::from_millis(args.delay_ms));
    let mut store = Store::new(fetcher);

    // Redraw whenever the presentation rows change.
    let dirty = Rc::new(Cell::new(true));
    let mut bag = DisposeBag::new();
    {
        let dirty = dirty.clone();
        bag.insert(store.list_items().observe(move |_| dirty.set(true)));
    }

    // Key poller
    let (key_tx, mut key_rx) = mpsc::unbounded_channel::<KeyEvent>();
    let cancel_token = CancellationToken::new();
    let _poller = spawn_key_poller(key_tx, cancel_token.clone());
    {
        let token = cancel_token.clone();
        bag.insert(Subscription::new(move || token.cancel()));
    }

    let mut list_state = ListState::default();
    list_state.select(Some(0));

    // Load the first page right away.
    store.on_refresh();

    loop {
        if dirty.get() {
            draw(terminal, &store, &mut list_state)?;
            dirty.set(false);
        }

        tokio::select! {
            Some(key) = key_rx.recv() => {
                let rows = store.list_items().value().len();
                let selected = list_state.selected().unwrap_or(0);
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('r') => store.on_refresh(),
                    KeyCode::Char('j') | KeyCode::Down => {
                        if selected + 1 < rows {
                            list_state.select(Some(selected + 1));
                        } else {
                            // Already on the last row: ask for more.
                            store.on_scroll_to_last();
                        }
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        list_state.select(Some(selected.saturating_sub(1)));
                    }
                    KeyCode::Char('G') | KeyCode::End => {
                        if rows > 0 {
                            list_state.select(Some(rows - 1));
                        }
                        store.on_scroll_to_last();
                    }
                    _ => {}
                }
                store.drain_pending();
                dirty.set(true);
            }

            changed = store.process_next() => {
                // Fetch outcome applied; the observer marked us dirty
                // if the rows changed.
                let _ = changed;
            }
        }
    }

    Ok(())
}

fn draw<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    store: &Store,
    list_state: &mut ListState,
) -> io::Result<()> {
    terminal.draw(|frame| {
        let area = frame.area();
        let [list_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let rows: Vec<ratatui::widgets::ListItem> = store
            .list_items()
            .value()
            .iter()
            .map(|item| match item {
                ListItem::Element(element) => {
                    ratatui::widgets::ListItem::new(format!("  Item {:>4}", element.id))
                }
                ListItem::Loading => ratatui::widgets::ListItem::new("  … loading next page")
                    .style(Style::default().fg(Color::DarkGray)),
            })
            .collect();

        let title = format!(
            " infinite-list — page {}, {} elements ",
            store.reducer().page().get(),
            store.reducer().elements().value().len()
        );
        let list = List::new(rows)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(list, list_area, list_state);

        let help = Paragraph::new("j/Down: down  k/Up: up  G/End: bottom  r: refresh  q: quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, help_area);
    })?;
    Ok(())
}
