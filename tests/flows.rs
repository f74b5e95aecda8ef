mod common;

use common::{offline_cli, report, state_for};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{Terminal, backend::TestBackend, style::Color};
use tokio::sync::mpsc;
use weather_backdrop::{
    app::{events::AppEvent, state::AppMode},
    backdrop::Theme,
    cli::ThemeArg,
    ui,
};

fn key(c: char) -> AppEvent {
    AppEvent::Input(Event::Key(KeyEvent::new(
        KeyCode::Char(c),
        KeyModifiers::NONE,
    )))
}

#[tokio::test]
async fn storm_frames_render_half_blocks_with_status() {
    let mut cli = offline_cli();
    cli.theme = Some(ThemeArg::Storm);
    let mut state = state_for(&cli);
    let (tx, _rx) = mpsc::channel(64);
    state.attach_surface(60, 20);
    state
        .handle_event(AppEvent::Bootstrap, &tx, &cli)
        .await
        .expect("bootstrap");
    for _ in 0..5 {
        state
            .handle_event(AppEvent::TickFrame, &tx, &cli)
            .await
            .expect("frame");
    }
    assert_eq!(state.backdrop.frames(), 5);
    assert!(!state.backdrop.particles().is_empty());

    let mut terminal = Terminal::new(TestBackend::new(60, 20)).expect("terminal");
    terminal
        .draw(|frame| ui::render(frame, &state))
        .expect("draw");
    let buffer = terminal.backend().buffer();

    let top = buffer.cell((30, 0)).expect("cell");
    assert_eq!(top.symbol(), "▀");
    assert!(matches!(top.fg, Color::Rgb(..)));
    assert_ne!(top.fg, Color::Rgb(0, 0, 0), "sky gradient painted");

    let status: String = (0..60)
        .filter_map(|x| buffer.cell((x, 19)))
        .map(|cell| cell.symbol())
        .collect();
    assert!(status.contains("theme storm"), "{status}");
}

#[tokio::test]
async fn conditions_drive_theme_until_user_forces_one() {
    let cli = offline_cli();
    let mut state = state_for(&cli);
    let (tx, _rx) = mpsc::channel(64);
    state.attach_surface(40, 12);

    state
        .handle_event(AppEvent::ConditionsFetched(report(3)), &tx, &cli)
        .await
        .expect("conditions");
    assert_eq!(state.mode, AppMode::Ready);
    assert_eq!(state.backdrop.theme(), Some(Theme::Cloudy));
    assert_eq!(state.backdrop.clouds().len(), 8);

    state.handle_event(key('1'), &tx, &cli).await.expect("key");
    assert_eq!(state.backdrop.theme(), Some(Theme::Clear));
    assert_eq!(state.backdrop.clouds().len(), 2);

    state
        .handle_event(AppEvent::ConditionsFetched(report(65)), &tx, &cli)
        .await
        .expect("conditions");
    assert_eq!(state.backdrop.theme(), Some(Theme::Clear));

    state.handle_event(key('0'), &tx, &cli).await.expect("key");
    assert_eq!(state.backdrop.theme(), Some(Theme::Rain));
}

#[tokio::test]
async fn resize_mid_animation_keeps_rendering() {
    let mut cli = offline_cli();
    cli.theme = Some(ThemeArg::Rain);
    let mut state = state_for(&cli);
    let (tx, _rx) = mpsc::channel(64);
    state.attach_surface(80, 24);
    state
        .handle_event(AppEvent::Bootstrap, &tx, &cli)
        .await
        .expect("bootstrap");
    state
        .handle_event(AppEvent::TickFrame, &tx, &cli)
        .await
        .expect("frame");

    state
        .handle_event(AppEvent::Input(Event::Resize(30, 10)), &tx, &cli)
        .await
        .expect("resize");
    state
        .handle_event(AppEvent::TickFrame, &tx, &cli)
        .await
        .expect("frame");
    assert_eq!(state.backdrop.viewport().backing_width, 30);
    assert_eq!(state.backdrop.viewport().backing_height, 20);

    let mut terminal = Terminal::new(TestBackend::new(30, 10)).expect("terminal");
    terminal
        .draw(|frame| ui::render(frame, &state))
        .expect("draw");
    let buffer = terminal.backend().buffer();
    assert!(buffer.content().iter().take(30 * 9).all(|cell| cell.symbol() == "▀"));
}

#[tokio::test]
async fn hidden_status_leaves_full_backdrop() {
    let mut cli = offline_cli();
    cli.theme = Some(ThemeArg::Clear);
    cli.no_status = true;
    let mut state = state_for(&cli);
    let (tx, _rx) = mpsc::channel(64);
    state.attach_surface(20, 6);
    state
        .handle_event(AppEvent::Bootstrap, &tx, &cli)
        .await
        .expect("bootstrap");
    state
        .handle_event(AppEvent::TickFrame, &tx, &cli)
        .await
        .expect("frame");

    let mut terminal = Terminal::new(TestBackend::new(20, 6)).expect("terminal");
    terminal
        .draw(|frame| ui::render(frame, &state))
        .expect("draw");
    assert!(
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .all(|cell| cell.symbol() == "▀")
    );
}
