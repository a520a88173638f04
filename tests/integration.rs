// SPDX-License-Identifier: MPL-2.0
use iced_flipbook::book::{
    dispatch, ControllerOptions, Direction, Effect, FlipbookController, InputEvent, LabelInput,
    LayoutMode, PageId, PageRange, PageSequence, SwipeDirection, SwipeTracker, TurnPhase,
    ViewLabel, ZoomState,
};
use iced_flipbook::config::{self, Config, StartupPolicy};
use iced_flipbook::error::Error;
use iced_flipbook::i18n::fluent::I18n;
use iced_flipbook::media::{CacheLimits, PageImage, PageLibrary, PageStatus, StartupGate};
use iced_flipbook::ui::controls::label_text;
use tempfile::tempdir;

const DESKTOP: f32 = 1280.0;
const MOBILE: f32 = 390.0;

fn magazine_pages() -> PageSequence {
    PageSequence::from_range(&PageRange::new("pages/a-", 24, 67, ".png")).expect("44 pages")
}

fn magazine(width: f32) -> FlipbookController {
    FlipbookController::new(magazine_pages(), width, ControllerOptions::default())
}

/// Navigates and commits the turn immediately.
fn turn(controller: &mut FlipbookController, direction: Direction) {
    let _ = controller.navigate(direction);
    let _ = controller.finish_turn();
}

fn slot_indices(controller: &FlipbookController) -> (Option<usize>, Option<usize>) {
    let view = controller.current_view();
    (view.left().map(|s| s.index), view.right().map(|s| s.index))
}

#[test]
fn double_layout_walks_cover_spreads_and_back_cover() {
    let mut controller = magazine(DESKTOP);
    assert_eq!(controller.layout_mode(), LayoutMode::Double);
    assert_eq!(controller.total_views(), 23);

    assert_eq!(slot_indices(&controller), (None, Some(0)));
    assert_eq!(controller.current_view().label, ViewLabel::Cover);

    turn(&mut controller, Direction::Forward);
    assert_eq!(controller.cursor(), 1);
    assert_eq!(slot_indices(&controller), (Some(1), Some(2)));

    for _ in 0..21 {
        turn(&mut controller, Direction::Forward);
    }
    assert_eq!(controller.cursor(), 22);
    assert_eq!(slot_indices(&controller), (Some(43), None));
    assert_eq!(controller.current_view().label, ViewLabel::BackCover);
}

#[test]
fn every_page_appears_exactly_once_in_double_layout() {
    let mut controller = magazine(DESKTOP);
    let mut seen = Vec::new();
    loop {
        seen.extend(controller.current_view().slots().into_iter().flatten().map(|s| s.index));
        if !controller.controls().can_go_forward {
            break;
        }
        turn(&mut controller, Direction::Forward);
    }
    assert_eq!(seen, (0..44).collect::<Vec<_>>());
}

#[test]
fn single_layout_shows_one_page_per_view() {
    let mut controller = magazine(MOBILE);
    assert_eq!(controller.layout_mode(), LayoutMode::Single);
    assert_eq!(controller.total_views(), 44);

    for _ in 0..43 {
        turn(&mut controller, Direction::Forward);
    }
    assert_eq!(controller.cursor(), 43);
    assert_eq!(controller.current_view().images(), vec![&PageId::new("pages/a-67.png")]);

    // Forward at the last view is a no-op.
    assert_eq!(controller.navigate(Direction::Forward), Effect::None);
    assert_eq!(controller.cursor(), 43);
}

#[test]
fn boundaries_are_idempotent() {
    let mut controller = magazine(DESKTOP);
    assert_eq!(controller.navigate(Direction::Backward), Effect::None);
    assert_eq!(controller.cursor(), 0);

    for _ in 0..40 {
        turn(&mut controller, Direction::Forward);
    }
    assert_eq!(controller.cursor(), 22);
    assert_eq!(controller.navigate(Direction::Forward), Effect::None);
    assert_eq!(controller.cursor(), 22);
    assert_eq!(controller.phase(), TurnPhase::Idle);
}

#[test]
fn navigation_is_locked_while_a_turn_settles() {
    let mut controller = magazine(DESKTOP);
    let first = controller.navigate(Direction::Forward);
    assert!(matches!(first, Effect::TurnStarted { .. }));
    let locked_state = (controller.cursor(), controller.phase());

    // No state change and no second scheduled commit.
    assert_eq!(controller.navigate(Direction::Forward), Effect::None);
    assert_eq!(controller.navigate(Direction::Backward), Effect::None);
    assert_eq!(controller.restart(), Effect::None);
    assert_eq!((controller.cursor(), controller.phase()), locked_state);

    assert_eq!(controller.finish_turn(), Effect::Render);
    assert_eq!(controller.finish_turn(), Effect::None);
    assert!(!controller.is_locked());
}

#[test]
fn zoom_and_resize_are_allowed_during_a_turn() {
    let mut controller = magazine(DESKTOP);
    let _ = controller.navigate(Direction::Forward);
    assert_eq!(controller.toggle_zoom(), Effect::Render);
    assert_eq!(controller.zoom(), ZoomState::Zoomed);
    assert_eq!(controller.resize(DESKTOP, 700.0), Effect::Render);
    assert!(controller.is_locked());
}

#[test]
fn shrinking_to_single_keeps_an_in_range_cursor() {
    let mut controller = magazine(DESKTOP);
    for _ in 0..22 {
        turn(&mut controller, Direction::Forward);
    }
    assert_eq!(controller.cursor(), 22);

    // 22 is still a valid single-page view.
    assert_eq!(controller.resize(MOBILE, 800.0), Effect::Render);
    assert_eq!(controller.layout_mode(), LayoutMode::Single);
    assert_eq!(controller.total_views(), 44);
    assert_eq!(controller.cursor(), 22);
}

#[test]
fn growing_to_double_resets_an_out_of_range_cursor() {
    let mut controller = magazine(MOBILE);
    for _ in 0..30 {
        turn(&mut controller, Direction::Forward);
    }
    assert_eq!(controller.cursor(), 30);

    let _ = controller.resize(DESKTOP, 800.0);
    assert_eq!(controller.layout_mode(), LayoutMode::Double);
    assert_eq!(controller.total_views(), 23);
    assert_eq!(controller.cursor(), 0);
}

#[test]
fn zoom_round_trip_restores_presentation() {
    let mut controller = magazine(DESKTOP);
    turn(&mut controller, Direction::Forward);
    let before = (
        controller.cursor(),
        controller.layout_mode(),
        controller.zoom().factor(1.6),
    );

    let _ = controller.toggle_zoom();
    assert!((controller.zoom().factor(1.6) - 1.6).abs() < f32::EPSILON);
    let _ = controller.toggle_zoom();

    let after = (
        controller.cursor(),
        controller.layout_mode(),
        controller.zoom().factor(1.6),
    );
    assert_eq!(before, after);
}

#[test]
fn zoom_survives_navigation() {
    let mut controller = magazine(DESKTOP);
    let _ = controller.toggle_zoom();
    turn(&mut controller, Direction::Forward);
    assert_eq!(controller.zoom(), ZoomState::Zoomed);
}

#[test]
fn restart_returns_to_the_cover_in_one_turn() {
    let mut controller = magazine(DESKTOP);
    for _ in 0..5 {
        turn(&mut controller, Direction::Forward);
    }
    let effect = controller.restart();
    assert!(matches!(effect, Effect::TurnStarted { .. }));
    assert_eq!(controller.cursor(), 0);
    assert_eq!(controller.phase(), TurnPhase::Turning { from: 5 });
    let _ = controller.finish_turn();
    assert_eq!(controller.restart(), Effect::None);
}

#[test]
fn empty_page_list_is_rejected() {
    let result = FlipbookController::initialize(Vec::new(), DESKTOP, ControllerOptions::default());
    assert!(matches!(result, Err(Error::EmptyPageSequence)));

    let inverted = PageSequence::from_range(&PageRange::new("p", 10, 9, ".png"));
    assert!(matches!(inverted, Err(Error::EmptyPageSequence)));
}

#[test]
fn input_events_drive_the_controller() {
    let mut controller = magazine(DESKTOP);
    let _ = controller.apply(dispatch(InputEvent::Swipe(SwipeDirection::Left)));
    let _ = controller.finish_turn();
    assert_eq!(controller.cursor(), 1);

    let _ = controller.apply(dispatch(InputEvent::Swipe(SwipeDirection::Right)));
    let _ = controller.finish_turn();
    assert_eq!(controller.cursor(), 0);

    assert_eq!(
        controller.apply(dispatch(InputEvent::FullscreenToggleRequested)),
        Effect::ToggleFullscreen
    );
}

#[test]
fn short_drags_are_not_swipes() {
    let mut tracker = SwipeTracker::default();
    tracker.begin(400.0);
    assert_eq!(tracker.end(380.0), None);
    tracker.begin(400.0);
    assert_eq!(tracker.end(200.0), Some(SwipeDirection::Left));
}

#[test]
fn custom_label_policy_is_used() {
    fn numbered(input: &LabelInput) -> ViewLabel {
        ViewLabel::Page {
            index: input.cursor,
        }
    }

    let controller = magazine(DESKTOP).with_label_fn(numbered);
    assert_eq!(controller.current_view().label, ViewLabel::Page { index: 0 });
}

#[test]
fn labels_render_printed_page_numbers() {
    let i18n = I18n::new(Some("en-US".to_string()), &Config::default());
    let pages = magazine_pages();
    let mut controller = magazine(DESKTOP);
    turn(&mut controller, Direction::Forward);
    let label = label_text(controller.current_view().label, &pages, &i18n);
    assert_eq!(label, "Pages 25-26");
}

#[test]
fn config_round_trip_drives_the_book() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.book.path_prefix = Some("scans/p".to_string());
    config.book.start_page = Some(1);
    config.book.end_page = Some(12);
    config.layout.breakpoint_width = Some(1000.0);
    config.preload.startup = Some(StartupPolicy::All);
    config::save_to_path(&config, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config from path");
    assert_eq!(loaded, config);

    let pages = PageSequence::from_range(&loaded.page_range()).expect("12 pages");
    assert_eq!(pages.get(0), Some(&PageId::new("scans/p1.png")));

    // 900 px is below the configured breakpoint.
    let controller = FlipbookController::new(pages, 900.0, loaded.controller_options());
    assert_eq!(controller.layout_mode(), LayoutMode::Single);
    assert_eq!(controller.total_views(), 12);
}

#[test]
fn startup_gate_opens_when_required_pages_settle() {
    let pages = magazine_pages();
    let mut library = PageLibrary::new(None, CacheLimits::default());
    let gate = StartupGate::new(StartupPolicy::First, &pages, 2);
    assert!(!gate.is_open(&library));

    let wanted = library.request(gate.required());
    assert_eq!(wanted.len(), 2);
    assert_eq!(library.status(&wanted[0]), PageStatus::Loading);

    library.complete(wanted[0].clone(), Ok(PageImage::from_rgba(1, 1, vec![0; 4])));
    library.complete(
        wanted[1].clone(),
        Err(Error::Io("No such file".to_string())),
    );

    assert!(gate.is_open(&library));
    assert_eq!(library.status(&wanted[0]), PageStatus::Ready);
    assert_eq!(library.status(&wanted[1]), PageStatus::Failed);
    // Failed pages are not requested again.
    assert!(library.request(gate.required()).is_empty());
}

#[test]
fn missing_page_file_fails_without_panicking() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let result = iced_flipbook::media::load_page_image(dir.path().join("missing.png"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn corrupt_config_warning_is_localized() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(dir.path().join("settings.toml"), "[book\nend_page = ").expect("write");

    let (config, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(config, Config::default());
    let key = warning.expect("corrupt file reports a warning");

    let en = I18n::new(Some("en-US".to_string()), &config);
    assert_eq!(
        en.tr(&key),
        "Settings file could not be read; defaults are in use."
    );
    let es = I18n::new(Some("es".to_string()), &config);
    assert!(es.tr(&key).starts_with("No se pudo leer"));
}
