use super::*;

fn ids(names: &[&str]) -> Vec<LightId> {
    names.iter().map(|n| LightId::from(*n)).collect()
}

// =============================================================
// play
// =============================================================

#[test]
fn play_with_no_lights_is_noop() {
    let mut seq = Sequencer::new();
    assert!(seq.play(Vec::new(), 0).is_none());
    assert!(!seq.is_animating());
    assert!(seq.next_due().is_none());
}

#[test]
fn play_while_animating_is_noop() {
    let mut seq = Sequencer::new();
    assert!(seq.play(ids(&["a"]), 0).is_some());
    let queued = seq.pending().len();
    assert!(seq.play(ids(&["a", "b"]), 100).is_none());
    assert_eq!(seq.pending().len(), queued);
}

#[test]
fn play_schedules_reveals_then_finish() {
    let mut seq = Sequencer::new();
    let token = seq.play(ids(&["a", "b", "c"]), 0).unwrap();
    let due: Vec<u64> = seq.pending().iter().map(|s| s.due_ms).collect();
    assert_eq!(due, vec![500, 1000, 1500, 2500]);
    assert!(seq.pending().iter().all(|s| s.token == token));
    assert_eq!(seq.pending()[3].kind, StepKind::Finish);
}

#[test]
fn play_clears_previous_active_set() {
    let mut seq = Sequencer::new();
    seq.play(ids(&["a"]), 0);
    seq.advance(2000);
    assert_eq!(seq.active(), ids(&["a"]).as_slice());
    seq.play(ids(&["b"]), 3000);
    assert!(seq.active().is_empty());
}

// =============================================================
// advance: full timeline
// =============================================================

#[test]
fn three_lights_reveal_on_schedule() {
    let mut seq = Sequencer::new();
    seq.play(ids(&["a", "b", "c"]), 0);

    assert!(seq.advance(499).is_empty());
    assert_eq!(seq.advance(500), vec![SequencerEvent::Revealed("a".into())]);
    assert_eq!(seq.active(), ids(&["a"]).as_slice());

    assert_eq!(seq.advance(1000), vec![SequencerEvent::Revealed("b".into())]);
    assert_eq!(seq.advance(1500), vec![SequencerEvent::Revealed("c".into())]);
    assert_eq!(seq.active(), ids(&["a", "b", "c"]).as_slice());
    assert!(seq.is_animating());

    assert!(seq.advance(2499).is_empty());
    assert_eq!(seq.advance(2500), vec![SequencerEvent::Finished]);
    assert!(!seq.is_animating());
    // Everything stays lit after the finish.
    assert_eq!(seq.active().len(), 3);
    assert!(seq.next_due().is_none());
}

#[test]
fn late_advance_fires_everything_due_in_order() {
    let mut seq = Sequencer::new();
    seq.play(ids(&["a", "b"]), 100);
    let events = seq.advance(10_000);
    assert_eq!(
        events,
        vec![
            SequencerEvent::Revealed("a".into()),
            SequencerEvent::Revealed("b".into()),
            SequencerEvent::Finished,
        ]
    );
}

#[test]
fn next_due_tracks_queue_head() {
    let mut seq = Sequencer::new();
    seq.play(ids(&["a", "b"]), 1000);
    assert_eq!(seq.next_due(), Some(1500));
    seq.advance(1500);
    assert_eq!(seq.next_due(), Some(2000));
}

// =============================================================
// reset / cancellation
// =============================================================

#[test]
fn reset_mid_playback_cancels_pending_reveals() {
    let mut seq = Sequencer::new();
    seq.play(ids(&["a", "b", "c"]), 0);
    seq.advance(500);
    seq.advance(700);
    seq.reset();

    assert!(seq.active().is_empty());
    assert!(!seq.is_animating());
    assert!(seq.next_due().is_none());
    assert!(seq.advance(3000).is_empty());
    assert!(seq.active().is_empty());
    assert!(!seq.is_animating());
}

#[test]
fn stale_steps_do_not_leak_into_new_playback() {
    let mut seq = Sequencer::new();
    seq.play(ids(&["a", "b", "c"]), 0);
    seq.advance(600);
    seq.reset();

    seq.play(ids(&["x"]), 700);
    assert_eq!(seq.pending().len(), 2);
    let events = seq.advance(1200);
    assert_eq!(events, vec![SequencerEvent::Revealed("x".into())]);
    assert_eq!(seq.active(), ids(&["x"]).as_slice());

    // The old finish at 2500 is gone; the new one is at 2200.
    assert_eq!(seq.advance(2200), vec![SequencerEvent::Finished]);
    assert!(seq.advance(3000).is_empty());
}

#[test]
fn forget_removes_from_active_set() {
    let mut seq = Sequencer::new();
    seq.play(ids(&["a", "b"]), 0);
    seq.advance(1000);
    seq.forget(&"a".into());
    assert_eq!(seq.active(), ids(&["b"]).as_slice());
    assert!(!seq.is_active(&"a".into()));
}

#[test]
fn forget_drops_pending_reveal() {
    let mut seq = Sequencer::new();
    seq.play(ids(&["a", "b", "c"]), 0);
    seq.advance(500);
    seq.forget(&"b".into());

    assert!(seq.advance(1000).is_empty());
    assert_eq!(seq.advance(1500), vec![SequencerEvent::Revealed("c".into())]);
    assert_eq!(seq.active(), ids(&["a", "c"]).as_slice());
    assert!(!seq.is_active(&"b".into()));
    assert_eq!(seq.advance(2500), vec![SequencerEvent::Finished]);
}

#[test]
fn repeated_reset_and_play_keeps_queue_bounded() {
    let mut seq = Sequencer::new();
    for round in 0..50 {
        seq.play(ids(&["a", "b", "c"]), round);
        seq.reset();
    }
    assert!(seq.pending().is_empty());
    seq.play(ids(&["a", "b", "c"]), 100);
    assert_eq!(seq.pending().len(), 4);
}
