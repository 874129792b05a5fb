//! End-to-end mouse, keyboard and drag-and-drop routing through a compositor.

use std::collections::HashSet;
use std::sync::Arc;

use nux::geometry::{Point, Rect};
use nux::input::{
    AreaKind, DndPlatform, InputArea, InputEvent, MouseButton, WindowCompositor,
};
use nux::{Error, InputConfig, ObjectId};
use parking_lot::Mutex;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("nux=trace")
        .with_test_writer()
        .try_init();
}

type Log = Arc<Mutex<Vec<String>>>;

/// Records every signal of an area as `"<label>:<signal>"`.
fn record(compositor: &WindowCompositor, id: ObjectId, label: &'static str, log: &Log) {
    let signals = compositor.area(id).unwrap().signals();
    macro_rules! hook {
        ($($signal:ident),*) => {$({
            let log = log.clone();
            signals
                .$signal
                .connect(move |_| log.lock().push(format!("{label}:{}", stringify!($signal))));
        })*};
    }
    hook!(
        mouse_down,
        mouse_up,
        mouse_click,
        mouse_double_click,
        mouse_move,
        mouse_drag,
        mouse_enter,
        mouse_leave,
        mouse_wheel,
        mouse_down_outside,
        start_mouse_focus,
        end_mouse_focus,
        start_focus,
        end_focus,
        key_pressed,
        key_released,
        key_event,
        dnd_enter,
        dnd_leave,
        dnd_move,
        dnd_drop
    );
}

fn take(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.lock())
}

fn new_window(compositor: &mut WindowCompositor, rect: Rect) -> ObjectId {
    compositor.add_window(InputArea::new(AreaKind::Window, rect))
}

fn new_area(compositor: &mut WindowCompositor, parent: ObjectId, rect: Rect) -> ObjectId {
    compositor
        .add_area(parent, InputArea::new(AreaKind::Area, rect))
        .unwrap()
}

#[test]
fn test_press_drag_release_on_one_area() {
    setup();
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    let x = new_area(&mut compositor, window, Rect::new(10.0, 10.0, 100.0, 100.0));
    let log = Log::default();
    record(&compositor, x, "x", &log);

    compositor.process_event(&InputEvent::mouse_down(20.0, 20.0, MouseButton::Left));
    assert_eq!(
        take(&log),
        vec!["x:start_mouse_focus", "x:mouse_down", "x:start_focus", "x:mouse_enter"]
    );
    assert_eq!(compositor.mouse_focus_area(), Some(x));
    assert_eq!(compositor.key_focus_area(), Some(x));

    compositor.process_event(&InputEvent::mouse_move(40.0, 40.0));
    assert_eq!(take(&log), vec!["x:mouse_drag"]);

    compositor.process_event(&InputEvent::mouse_up(40.0, 40.0, MouseButton::Left));
    assert_eq!(take(&log), vec!["x:end_mouse_focus", "x:mouse_click", "x:mouse_up"]);
    assert!(compositor.mouse_focus_area().is_none());
    assert_eq!(compositor.key_focus_area(), Some(x));
}

#[test]
fn test_short_held_move_is_a_drag() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    let x = new_area(&mut compositor, window, Rect::new(10.0, 10.0, 100.0, 100.0));
    let log = Log::default();
    record(&compositor, x, "x", &log);

    compositor.process_event(&InputEvent::mouse_down(20.0, 20.0, MouseButton::Left));
    take(&log);

    compositor.process_event(&InputEvent::mouse_move(22.0, 20.0));
    assert_eq!(take(&log), vec!["x:mouse_drag"]);
    compositor.process_event(&InputEvent::mouse_move(23.0, 21.0));
    assert_eq!(take(&log), vec!["x:mouse_drag"]);
}

#[test]
fn test_drag_threshold_swallows_short_moves() {
    let config = InputConfig {
        drag_threshold: 4.0,
        ..InputConfig::default()
    };
    let mut compositor = WindowCompositor::with_config(config);
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    let x = new_area(&mut compositor, window, Rect::new(10.0, 10.0, 100.0, 100.0));
    let log = Log::default();
    record(&compositor, x, "x", &log);
    record(&compositor, window, "w", &log);

    compositor.process_event(&InputEvent::mouse_down(20.0, 20.0, MouseButton::Left));
    take(&log);

    compositor.process_event(&InputEvent::mouse_move(22.0, 20.0));
    assert!(take(&log).is_empty());
    compositor.process_event(&InputEvent::mouse_move(30.0, 20.0));
    assert_eq!(take(&log), vec!["x:mouse_drag"]);
}

#[test]
fn test_release_frees_owner_hidden_or_disabled_while_held() {
    for hide in [true, false] {
        let mut compositor = WindowCompositor::new();
        let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 300.0, 100.0));
        let a = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 100.0, 100.0));
        let b = new_area(&mut compositor, window, Rect::new(150.0, 0.0, 100.0, 100.0));
        let log = Log::default();
        record(&compositor, b, "b", &log);

        compositor.process_event(&InputEvent::mouse_down(50.0, 50.0, MouseButton::Left));
        assert_eq!(compositor.mouse_focus_area(), Some(a));

        let area = compositor.area_mut(a).unwrap();
        if hide {
            area.set_visible(false);
        } else {
            area.set_enabled(false);
        }
        compositor.process_event(&InputEvent::mouse_up(50.0, 50.0, MouseButton::Left));
        assert!(compositor.mouse_focus_area().is_none());
        assert!(!compositor.area(a).unwrap().has_mouse_focus());

        compositor.process_event(&InputEvent::mouse_down(200.0, 50.0, MouseButton::Left));
        assert_eq!(compositor.mouse_focus_area(), Some(b));
        assert!(take(&log).contains(&"b:mouse_down".to_string()));
    }
}

#[test]
fn test_held_pointer_keeps_events_outside() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 300.0, 100.0));
    let a = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 100.0, 100.0));
    let b = new_area(&mut compositor, window, Rect::new(150.0, 0.0, 100.0, 100.0));
    let log = Log::default();
    record(&compositor, a, "a", &log);
    record(&compositor, b, "b", &log);

    compositor.process_event(&InputEvent::mouse_down(50.0, 50.0, MouseButton::Left));
    take(&log);

    compositor.process_event(&InputEvent::mouse_move(200.0, 50.0));
    assert_eq!(take(&log), vec!["a:mouse_drag", "a:mouse_leave"]);
    assert!(compositor.mouse_over_area().is_none());

    compositor.process_event(&InputEvent::mouse_up(200.0, 50.0, MouseButton::Left));
    assert_eq!(take(&log), vec!["a:end_mouse_focus", "a:mouse_up"]);
}

#[test]
fn test_hover_is_exclusive_and_leave_precedes_enter() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 300.0, 100.0));
    let a = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 100.0, 100.0));
    let b = new_area(&mut compositor, window, Rect::new(100.0, 0.0, 100.0, 100.0));

    let hovered: Arc<Mutex<HashSet<&'static str>>> = Arc::default();
    let order = Log::default();
    for (id, label) in [(window, "w"), (a, "a"), (b, "b")] {
        let signals = compositor.area(id).unwrap().signals();
        let (set, log) = (hovered.clone(), order.clone());
        signals.mouse_enter.connect(move |_| {
            set.lock().insert(label);
            log.lock().push(format!("{label}:enter"));
        });
        let (set, log) = (hovered.clone(), order.clone());
        signals.mouse_leave.connect(move |_| {
            set.lock().remove(label);
            log.lock().push(format!("{label}:leave"));
        });
    }

    let path = [(50.0, 50.0), (150.0, 50.0), (250.0, 50.0), (350.0, 50.0), (20.0, 20.0)];
    for (x, y) in path {
        compositor.process_event(&InputEvent::mouse_move(x, y));
        assert!(hovered.lock().len() <= 1);
    }

    assert_eq!(
        take(&order),
        vec![
            "a:enter", "a:leave", "b:enter", "b:leave", "w:enter", "w:leave", "a:enter",
        ]
    );
    assert_eq!(compositor.mouse_over_area(), Some(a));
}

#[test]
fn test_wheel_reaches_area_under_pointer() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    let area = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 50.0, 50.0));
    let deltas = Arc::new(Mutex::new(Vec::new()));
    let sink = deltas.clone();
    compositor
        .area(area)
        .unwrap()
        .signals()
        .mouse_wheel
        .connect(move |args| sink.lock().push(args.delta));

    compositor.process_event(&InputEvent::mouse_wheel(10.0, 10.0, -3.0));
    compositor.process_event(&InputEvent::mouse_wheel(100.0, 100.0, 1.0));

    assert_eq!(*deltas.lock(), vec![-3.0]);
}

#[test]
fn test_press_outside_notifies_capturing_area() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    let popup = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 50.0, 50.0));
    compositor
        .area_mut(popup)
        .unwrap()
        .set_capture_mouse_down_anywhere_else(true);
    let log = Log::default();
    record(&compositor, popup, "popup", &log);

    compositor.process_event(&InputEvent::mouse_down(150.0, 150.0, MouseButton::Left));

    assert_eq!(take(&log), vec!["popup:mouse_down_outside"]);
    assert_eq!(compositor.mouse_focus_area(), Some(window));
}

#[test]
fn test_key_focus_transitions() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    let a = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 50.0, 50.0));
    let b = new_area(&mut compositor, window, Rect::new(50.0, 0.0, 50.0, 50.0));
    let log = Log::default();
    record(&compositor, a, "a", &log);
    record(&compositor, b, "b", &log);

    assert!(compositor.set_key_focus_area(Some(a)));
    assert!(compositor.set_key_focus_area(Some(b)));
    assert!(!compositor.set_key_focus_area(Some(b)));
    assert_eq!(take(&log), vec!["a:start_focus", "a:end_focus", "b:start_focus"]);

    assert!(!compositor.set_key_focus_area(None));
    assert_eq!(take(&log), vec!["b:end_focus"]);
    assert!(compositor.key_focus_area().is_none());
    assert!(!compositor.area(b).unwrap().has_keyboard_focus());
}

#[test]
fn test_keys_follow_focus_then_grab() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    let editor = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 50.0, 50.0));
    let menu = new_area(&mut compositor, window, Rect::new(50.0, 0.0, 50.0, 50.0));
    let log = Log::default();
    record(&compositor, editor, "editor", &log);
    record(&compositor, menu, "menu", &log);

    compositor.process_event(&InputEvent::key_down(65, Some('a')));
    assert!(take(&log).is_empty());

    compositor.set_key_focus_area(Some(editor));
    take(&log);
    compositor.process_event(&InputEvent::key_down(65, Some('a')));
    assert_eq!(take(&log), vec!["editor:key_pressed", "editor:key_event"]);

    assert!(compositor.grab_keyboard_add(menu));
    compositor.process_event(&InputEvent::key_up(65, Some('a')));
    assert_eq!(take(&log), vec!["menu:key_released", "menu:key_event"]);

    assert!(compositor.grab_keyboard_remove(menu));
    compositor.process_event(&InputEvent::key_up(65, Some('a')));
    assert_eq!(take(&log), vec!["editor:key_released", "editor:key_event"]);
}

#[test]
fn test_pointer_grab_is_lifo_and_routes_events() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    let a = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 50.0, 50.0));
    let b = new_area(&mut compositor, window, Rect::new(100.0, 100.0, 50.0, 50.0));
    let log = Log::default();
    record(&compositor, b, "b", &log);

    assert!(compositor.grab_pointer_add(a));
    assert!(!compositor.grab_pointer_add(a));
    compositor.process_event(&InputEvent::mouse_down(120.0, 120.0, MouseButton::Left));
    assert!(take(&log).is_empty());
    assert!(compositor.mouse_focus_area().is_none());

    assert!(compositor.grab_pointer_add(b));
    assert!(compositor.grab_pointer_remove(b));
    assert_eq!(compositor.pointer_grab_area(), Some(a));

    assert!(compositor.grab_pointer_remove(a));
    assert!(compositor.pointer_grab_area().is_none());
    compositor.process_event(&InputEvent::mouse_down(120.0, 120.0, MouseButton::Left));
    assert_eq!(compositor.mouse_focus_area(), Some(b));
}

#[test]
fn test_exclusive_area_restricts_mouse_but_not_dnd() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    let panel = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 100.0, 100.0));
    let button = new_area(&mut compositor, panel, Rect::new(10.0, 10.0, 20.0, 20.0));
    let sibling = new_area(&mut compositor, window, Rect::new(120.0, 0.0, 50.0, 50.0));
    compositor.area_mut(sibling).unwrap().set_accepts_drops(true);

    assert!(compositor.set_exclusive_input_area(Some(panel)));

    compositor.process_event(&InputEvent::mouse_down(130.0, 10.0, MouseButton::Left));
    assert!(compositor.mouse_focus_area().is_none());
    assert!(compositor.mouse_over_area().is_none());
    compositor.process_event(&InputEvent::mouse_up(130.0, 10.0, MouseButton::Left));

    compositor.process_event(&InputEvent::mouse_down(15.0, 15.0, MouseButton::Left));
    assert_eq!(compositor.mouse_focus_area(), Some(button));
    compositor.process_event(&InputEvent::mouse_up(15.0, 15.0, MouseButton::Left));

    compositor.process_event(&InputEvent::dnd_move(130.0, 10.0));
    assert_eq!(compositor.dnd_area(), Some(sibling));

    assert!(compositor.set_exclusive_input_area(None));
    compositor.process_event(&InputEvent::mouse_down(130.0, 10.0, MouseButton::Left));
    assert_eq!(compositor.mouse_focus_area(), Some(sibling));
}

#[test]
fn test_modal_window_takes_all_mouse_input() {
    let mut compositor = WindowCompositor::new();
    let dialog = new_window(&mut compositor, Rect::new(0.0, 0.0, 50.0, 50.0));
    let main = new_window(&mut compositor, Rect::new(100.0, 0.0, 100.0, 100.0));

    assert!(compositor.start_modal_window(dialog));
    assert_eq!(compositor.windows()[0], dialog);

    compositor.process_event(&InputEvent::mouse_down(150.0, 10.0, MouseButton::Left));
    assert!(compositor.mouse_focus_area().is_none());
    compositor.process_event(&InputEvent::mouse_up(150.0, 10.0, MouseButton::Left));

    compositor.process_event(&InputEvent::mouse_down(10.0, 10.0, MouseButton::Left));
    assert_eq!(compositor.mouse_focus_area(), Some(dialog));
    compositor.process_event(&InputEvent::mouse_up(10.0, 10.0, MouseButton::Left));

    assert!(compositor.stop_modal_window(dialog));
    assert!(!compositor.stop_modal_window(dialog));
    compositor.process_event(&InputEvent::mouse_down(150.0, 10.0, MouseButton::Left));
    assert_eq!(compositor.mouse_focus_area(), Some(main));
    // The press raised the window it landed in
    assert_eq!(compositor.windows()[0], main);
}

#[derive(Default)]
struct RecordingDnd(Arc<Mutex<Vec<(&'static str, ObjectId)>>>);

impl DndPlatform for RecordingDnd {
    fn area_entered(&mut self, area: ObjectId) {
        self.0.lock().push(("entered", area));
    }

    fn area_left(&mut self, area: ObjectId) {
        self.0.lock().push(("left", area));
    }

    fn drop_performed(&mut self, area: ObjectId, _position: Point) {
        self.0.lock().push(("drop", area));
    }
}

#[test]
fn test_drag_and_drop_moves_between_targets() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 100.0));
    let a = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 100.0, 100.0));
    let b = new_area(&mut compositor, window, Rect::new(100.0, 0.0, 100.0, 100.0));
    compositor.area_mut(a).unwrap().set_accepts_drops(true);
    compositor.area_mut(b).unwrap().set_accepts_drops(true);
    let platform = RecordingDnd::default();
    let calls = platform.0.clone();
    compositor.set_dnd_platform(Box::new(platform));
    let log = Log::default();
    record(&compositor, a, "a", &log);
    record(&compositor, b, "b", &log);

    compositor.process_event(&InputEvent::dnd_move(50.0, 50.0));
    compositor.process_event(&InputEvent::dnd_move(150.0, 50.0));
    compositor.process_event(&InputEvent::dnd_drop(150.0, 50.0));

    assert_eq!(
        take(&log),
        vec![
            "a:dnd_enter",
            "a:dnd_move",
            "a:dnd_leave",
            "b:dnd_enter",
            "b:dnd_move",
            "b:dnd_drop",
        ]
    );
    assert_eq!(
        *calls.lock(),
        vec![("entered", a), ("left", a), ("entered", b), ("drop", b)]
    );
    assert!(compositor.dnd_area().is_none());
}

#[test]
fn test_drag_leaving_every_target() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 100.0));
    let a = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 100.0, 100.0));
    compositor.area_mut(a).unwrap().set_accepts_drops(true);

    compositor.process_event(&InputEvent::dnd_move(50.0, 50.0));
    compositor.process_event(&InputEvent::dnd_move(150.0, 50.0));
    assert!(compositor.dnd_area().is_none());

    // Dropping where nobody accepts goes nowhere
    compositor.process_event(&InputEvent::dnd_drop(150.0, 50.0));
    assert!(compositor.dnd_area().is_none());
}

#[test]
fn test_window_exit_focus_clears_everything() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    let a = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 50.0, 50.0));
    compositor.process_event(&InputEvent::mouse_down(10.0, 10.0, MouseButton::Left));
    let log = Log::default();
    record(&compositor, a, "a", &log);

    compositor.process_event(&InputEvent::window_exit_focus());

    assert_eq!(take(&log), vec!["a:end_focus", "a:end_mouse_focus", "a:mouse_leave"]);
    assert!(compositor.mouse_focus_area().is_none());
    assert!(compositor.mouse_over_area().is_none());
    assert!(compositor.key_focus_area().is_none());
}

#[test]
fn test_area_destroyed_from_its_own_handler() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    let area = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 50.0, 50.0));
    let destroyer = compositor.area_destroyer();
    compositor
        .area(area)
        .unwrap()
        .signals()
        .mouse_down
        .connect(move |_| destroyer.destroy_later(area));

    compositor.process_event(&InputEvent::mouse_down(10.0, 10.0, MouseButton::Left));

    assert!(compositor.area(area).is_none());
    assert!(compositor.mouse_focus_area().is_none());
    assert!(compositor.key_focus_area().is_none());
    assert!(compositor.mouse_over_area().is_none());

    // Later events route around the hole
    compositor.process_event(&InputEvent::mouse_up(10.0, 10.0, MouseButton::Left));
    compositor.process_event(&InputEvent::mouse_move(20.0, 20.0));
    assert_eq!(compositor.mouse_over_area(), Some(window));
}

#[test]
fn test_forced_focus() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    let handle = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 50.0, 50.0));
    let log = Log::default();
    record(&compositor, handle, "handle", &log);

    assert!(compositor.force_start_focus(handle, 10.0, 10.0));
    assert_eq!(compositor.mouse_focus_area(), Some(handle));
    assert!(compositor.area(handle).unwrap().has_mouse_focus());

    compositor.process_event(&InputEvent::mouse_move(100.0, 100.0));
    assert_eq!(take(&log), vec!["handle:start_mouse_focus", "handle:mouse_drag"]);

    assert!(compositor.force_stop_focus(handle, 100.0, 100.0));
    assert_eq!(take(&log), vec!["handle:end_mouse_focus"]);
    assert!(compositor.mouse_focus_area().is_none());
    assert!(!compositor.area(handle).unwrap().has_mouse_focus());
}

#[test]
fn test_hidden_and_disabled_areas_are_skipped() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    let hidden = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 50.0, 50.0));
    let disabled = new_area(&mut compositor, window, Rect::new(0.0, 0.0, 50.0, 50.0));
    compositor.area_mut(hidden).unwrap().set_visible(false);
    compositor.area_mut(disabled).unwrap().set_enabled(false);

    compositor.process_event(&InputEvent::mouse_down(10.0, 10.0, MouseButton::Left));

    assert_eq!(compositor.mouse_focus_area(), Some(window));
}

#[test]
fn test_double_click_timing_from_config() {
    let config = InputConfig::from_toml_str("double_click_time_ms = 200\n").unwrap();
    let mut compositor = WindowCompositor::with_config(config);
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    compositor.area_mut(window).unwrap().set_double_click_enabled(true);
    let log = Log::default();
    record(&compositor, window, "w", &log);

    for timestamp in [0, 300, 1000, 1100] {
        compositor.process_event(&InputEvent::mouse_down(10.0, 10.0, MouseButton::Left).with_timestamp(timestamp));
        compositor.process_event(&InputEvent::mouse_up(10.0, 10.0, MouseButton::Left).with_timestamp(timestamp + 5));
    }

    let presses: Vec<String> = take(&log)
        .into_iter()
        .filter(|entry| entry == "w:mouse_down" || entry == "w:mouse_double_click")
        .collect();
    assert_eq!(
        presses,
        vec!["w:mouse_down", "w:mouse_down", "w:mouse_down", "w:mouse_double_click"]
    );
}

#[test]
fn test_invalid_config_is_rejected() {
    let result = InputConfig::from_toml_str("double_click_time_ms = 0\n");
    assert!(matches!(result, Err(Error::InvalidConfig { ref field, .. }) if field == "double_click_time_ms"));

    let result = InputConfig::from_toml_str("drag_threshold = \"far\"\n");
    assert!(matches!(result, Err(Error::ConfigParse(_))));
}

#[test]
fn test_add_area_under_destroyed_parent_fails() {
    let mut compositor = WindowCompositor::new();
    let window = new_window(&mut compositor, Rect::new(0.0, 0.0, 200.0, 200.0));
    compositor.destroy_area(window).unwrap();

    let result = compositor.add_area(window, InputArea::new(AreaKind::Area, Rect::new(0.0, 0.0, 1.0, 1.0)));
    assert!(matches!(result, Err(Error::Object(_))));
}
