use capture::Rect;
use overlay::{
    Button, CaptureSurface, CursorShape, Key, Modifiers, OverlayEvent, PointerEvent, Reaction,
    SelectionContext, ToolbarSize, RECORD_MIN_SIZE,
};

const TOOLBAR: ToolbarSize = ToolbarSize {
    width: 200,
    height: 32,
};

fn primary_context(windows: Vec<Rect>) -> SelectionContext {
    SelectionContext::new(Rect::new(0, 0, 1000, 800), windows, true)
}

fn press(x: i32, y: i32) -> PointerEvent {
    PointerEvent::Press {
        x,
        y,
        button: Button::Primary,
    }
}

fn release(x: i32, y: i32) -> PointerEvent {
    PointerEvent::Release {
        x,
        y,
        button: Button::Primary,
    }
}

#[test]
fn click_selects_hovered_window() {
    let (mut surface, rx) =
        CaptureSurface::with_channel(primary_context(vec![Rect::new(10, 10, 100, 100)]));

    surface.on_pointer_event(PointerEvent::Move { x: 50, y: 50 }).unwrap();
    surface.on_pointer_event(press(50, 50)).unwrap();
    let reaction = surface.on_pointer_event(release(50, 50)).unwrap();

    assert_eq!(reaction, Reaction::Placed(Rect::new(10, 10, 100, 100)));
    assert_eq!(surface.committed_rect().unwrap(), Rect::new(10, 10, 100, 100));
    assert_eq!(
        rx.try_iter().last(),
        Some(OverlayEvent::Placed(Rect::new(10, 10, 100, 100)))
    );
}

#[test]
fn drag_then_adjust_then_save() {
    let (mut surface, rx) = CaptureSurface::with_channel(primary_context(Vec::new()));

    surface.on_pointer_event(press(20, 20)).unwrap();
    surface.on_pointer_event(PointerEvent::Move { x: 120, y: 220 }).unwrap();
    surface.on_pointer_event(release(120, 220)).unwrap();
    assert_eq!(surface.current_rect(), Rect::new(20, 20, 100, 200));

    // Grab the right edge and widen by 30.
    surface.on_pointer_event(press(120, 100)).unwrap();
    surface.on_pointer_event(PointerEvent::Move { x: 150, y: 140 }).unwrap();
    surface.on_pointer_event(release(150, 140)).unwrap();
    assert_eq!(surface.current_rect(), Rect::new(20, 20, 130, 200));

    surface.on_key_event(Key::Down, Modifiers::CTRL).unwrap();
    assert_eq!(surface.current_rect(), Rect::new(20, 20, 130, 201));

    surface
        .on_pointer_event(PointerEvent::DoubleClick {
            x: 60,
            y: 60,
            button: Button::Primary,
        })
        .unwrap();
    assert_eq!(
        rx.try_iter().last(),
        Some(OverlayEvent::SaveRequested { index: None })
    );
}

#[test]
fn committed_selection_is_never_tiny() {
    let (mut surface, _rx) = CaptureSurface::with_channel(primary_context(Vec::new()));

    surface.on_pointer_event(press(996, 796)).unwrap();
    surface.on_pointer_event(PointerEvent::Move { x: 998, y: 799 }).unwrap();
    surface.on_pointer_event(release(998, 799)).unwrap();

    let rect = surface.committed_rect().unwrap();
    assert!(rect.width >= RECORD_MIN_SIZE && rect.height >= RECORD_MIN_SIZE);
    assert!(rect.right() <= 1000 && rect.bottom() <= 800);
}

#[test]
fn scene_tracks_the_session() {
    let (mut surface, _rx) = CaptureSurface::with_channel(primary_context(Vec::new()));
    assert_eq!(surface.scene(TOOLBAR).mask.len(), 1);

    surface.on_pointer_event(press(100, 100)).unwrap();
    surface.on_pointer_event(PointerEvent::Move { x: 400, y: 300 }).unwrap();
    surface.on_pointer_event(release(400, 300)).unwrap();

    let scene = surface.scene(TOOLBAR);
    assert_eq!(scene.frame, Some(Rect::new(101, 101, 298, 198)));
    assert_eq!(scene.toolbar, Some((200, 308)));
    assert_eq!(scene.cursor, CursorShape::SizeFDiag);

    surface.freeze();
    assert!(surface.is_frozen());
    assert!(surface.scene(TOOLBAR).frame.is_none());
}

#[test]
fn escape_cancels_at_any_time() {
    let (mut surface, rx) = CaptureSurface::with_channel(primary_context(Vec::new()));
    let reaction = surface.on_key_event(Key::Escape, Modifiers::NONE).unwrap();
    assert_eq!(reaction, Reaction::Cancel);
    assert_eq!(rx.try_recv().ok(), Some(OverlayEvent::Cancelled));
}
