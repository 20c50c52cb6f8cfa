use super::*;
use crate::render::recording::{DrawCall, RecordingSurface};
use crate::synth::throw::build_throw_scene;
use std::cell::RefCell;
use std::rc::Rc;

const FRAME: Duration = FrameClock::INTERVAL;

fn engine() -> PlaybackEngine<RecordingSurface> {
    PlaybackEngine::new(
        build_throw_scene("A throws a vase at B", 9),
        RecordingSurface::new(),
        PlaybackOpts::default(),
    )
}

fn recorder(engine: &mut PlaybackEngine<RecordingSurface>) -> Rc<RefCell<Vec<usize>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine.on_frame(move |f| sink.borrow_mut().push(f.0));
    seen
}

fn onion_layers(engine: &PlaybackEngine<RecordingSurface>) -> usize {
    engine
        .surface()
        .last_redraw()
        .iter()
        .filter(|c| matches!(c, DrawCall::SetAlpha(a) if *a < 1.0))
        .count()
}

#[test]
fn starts_paused_on_first_frame() {
    let e = engine();
    assert_eq!(e.state(), PlayState::Paused);
    assert_eq!(e.current_frame(), FrameIndex::FIRST);
    assert_eq!(e.surface().redraw_count(), 1);
    assert!(!e.onion_skin());
}

#[test]
fn goto_clamps_redraws_and_notifies() {
    let mut e = engine();
    let seen = recorder(&mut e);

    e.goto(-5);
    assert_eq!(e.current_frame(), FrameIndex(0));
    e.goto(1000);
    assert_eq!(e.current_frame(), FrameIndex(35));
    e.goto(12);

    assert_eq!(*seen.borrow(), vec![0, 35, 12]);
    assert_eq!(e.surface().redraw_count(), 4);
    assert_eq!(e.state(), PlayState::Paused);
}

#[test]
fn step_moves_relative_and_clamps() {
    let mut e = engine();
    e.step(1);
    e.step(1);
    assert_eq!(e.current_frame(), FrameIndex(2));
    e.step(-10);
    assert_eq!(e.current_frame(), FrameIndex(0));
    e.goto(35);
    e.step(1);
    assert_eq!(e.current_frame(), FrameIndex(35));
}

#[test]
fn ticks_are_ignored_while_paused() {
    let mut e = engine();
    assert_eq!(e.tick(Duration::from_secs(5)), 0);
    assert_eq!(e.current_frame(), FrameIndex::FIRST);
}

#[test]
fn accumulator_keeps_remainder_across_ticks() {
    let mut e = engine();
    let seen = recorder(&mut e);
    e.play(true);

    assert_eq!(e.tick(Duration::from_millis(50)), 0);
    assert_eq!(e.tick(Duration::from_millis(50)), 1);
    assert_eq!(e.tick(Duration::from_millis(70)), 1);
    assert_eq!(e.current_frame(), FrameIndex(2));
    assert_eq!(e.tick(FRAME * 3), 3);
    assert_eq!(*seen.borrow(), vec![1, 2, 3, 4, 5]);
}

#[test]
fn one_shot_playback_pauses_on_last_frame() {
    let mut e = engine();
    let seen = recorder(&mut e);
    e.play(false);

    let mut total = 0;
    for _ in 0..100 {
        total += e.tick(FRAME);
    }
    assert_eq!(total, 35);
    assert_eq!(e.current_frame(), FrameIndex::LAST);
    assert_eq!(e.state(), PlayState::Paused);
    assert_eq!(seen.borrow().len(), 35);
    assert_eq!(seen.borrow().last(), Some(&35));

    assert_eq!(e.tick(FRAME * 10), 0);
    assert_eq!(e.current_frame(), FrameIndex::LAST);
}

#[test]
fn one_shot_from_last_frame_pauses_without_advancing() {
    let mut e = engine();
    e.goto(35);
    e.play(false);
    assert!(e.is_playing());
    assert_eq!(e.tick(FRAME), 0);
    assert_eq!(e.current_frame(), FrameIndex::LAST);
    assert!(!e.is_playing());
}

#[test]
fn looping_wraps_to_first_frame() {
    let mut e = engine();
    e.goto(34);
    let seen = recorder(&mut e);
    e.play(true);

    assert_eq!(e.tick(FRAME), 1);
    assert_eq!(e.current_frame(), FrameIndex(35));
    assert_eq!(e.tick(FRAME), 1);
    assert_eq!(e.current_frame(), FrameIndex(0));
    assert!(e.is_playing());
    assert_eq!(*seen.borrow(), vec![35, 0]);
}

#[test]
fn large_tick_catches_up_and_stops_at_end() {
    let mut e = engine();
    e.play(false);
    assert_eq!(e.tick(Duration::from_secs(60)), 35);
    assert_eq!(e.current_frame(), FrameIndex::LAST);
    assert_eq!(e.state(), PlayState::Paused);
}

#[test]
fn pause_cancels_pending_time() {
    let mut e = engine();
    e.play(true);
    assert_eq!(e.tick(Duration::from_millis(80)), 0);
    e.pause();
    e.pause();
    assert_eq!(e.state(), PlayState::Paused);
    assert_eq!(e.tick(Duration::from_millis(80)), 0);

    e.play(true);
    assert_eq!(e.tick(Duration::from_millis(10)), 0);
    assert_eq!(e.current_frame(), FrameIndex::FIRST);
}

#[test]
fn play_while_playing_only_updates_loop_flag() {
    let mut e = engine();
    e.play(true);
    e.tick(Duration::from_millis(80));
    e.play(false);
    assert_eq!(e.state(), PlayState::Playing { looping: false });
    // the 80 ms already accumulated still counts
    assert_eq!(e.tick(Duration::from_millis(10)), 1);
}

#[test]
fn onion_skin_redraws_neighbours_without_frame_change() {
    let mut e = engine();
    e.goto(10);
    let seen = recorder(&mut e);
    let redraws = e.surface().redraw_count();

    e.set_onion_skin(true);
    assert_eq!(e.surface().redraw_count(), redraws + 1);
    assert_eq!(onion_layers(&e), 2);
    assert_eq!(e.current_frame(), FrameIndex(10));
    assert!(seen.borrow().is_empty());

    e.set_onion_skin(false);
    assert_eq!(onion_layers(&e), 0);
}

#[test]
fn set_scene_rewinds_and_keeps_onion_flag() {
    let mut e = PlaybackEngine::new(
        build_throw_scene("", 1),
        RecordingSurface::new(),
        PlaybackOpts {
            onion_skin: true,
            ..PlaybackOpts::default()
        },
    );
    e.goto(20);
    let seen = recorder(&mut e);

    let next = build_throw_scene("", 2);
    e.set_scene(next.clone());
    assert_eq!(e.current_frame(), FrameIndex::FIRST);
    assert!(e.onion_skin());
    assert_eq!(e.scene(), &next);
    assert_eq!(*seen.borrow(), vec![0]);
    // frame 0 has only a next neighbour
    assert_eq!(onion_layers(&e), 1);
}

#[test]
fn removed_listeners_stop_hearing() {
    let mut e = engine();
    let seen = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&seen);
    let id = e.on_frame(move |_| *sink.borrow_mut() += 1);

    e.goto(3);
    assert!(e.remove_listener(id));
    assert!(!e.remove_listener(id));
    e.goto(4);
    assert_eq!(*seen.borrow(), 1);
}

#[test]
fn listener_sees_frame_after_it_is_drawn() {
    let mut e = engine();
    e.play(true);
    e.tick(FRAME);
    let last = e.surface().last_redraw();
    assert_eq!(last[0], DrawCall::Clear);
    assert_eq!(e.current_frame(), FrameIndex(1));
    assert_eq!(e.into_surface().redraw_count(), 2);
}
