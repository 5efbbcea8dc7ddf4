// Host-side tests for the active-pitch tracker.

use keyfall_core::{
    active_pitches, HandFilter, KeyboardLayout, NoteList, RawNote, Score,
};

fn list(notes: &[(i32, f64, f64, f32)]) -> NoteList {
    let raw: Vec<RawNote> = notes
        .iter()
        .enumerate()
        .map(|(i, &(pitch, onset, duration, velocity))| RawNote {
            track: 0,
            index: i as u32,
            pitch,
            onset_secs: onset,
            duration_secs: duration,
            velocity,
        })
        .collect();
    let score = Score::from_raw(&raw).expect("valid test score");
    NoteList::derive(&score, HandFilter::Both, &KeyboardLayout::default())
}

#[test]
fn activation_is_half_open_interval() {
    let notes = list(&[(64, 2.0, 0.5, 0.8)]);
    assert!(!active_pitches(1.999, &notes).contains(64));
    assert!(active_pitches(2.0, &notes).contains(64));
    assert!(active_pitches(2.25, &notes).contains(64));
    assert!(active_pitches(2.4999, &notes).contains(64));
    assert!(!active_pitches(2.5, &notes).contains(64), "end is exclusive");
}

#[test]
fn overlapping_notes_on_one_pitch_collapse_to_loudest() {
    let notes = list(&[(60, 1.0, 2.0, 0.3), (60, 1.5, 0.5, 0.9)]);
    let active = active_pitches(1.6, &notes);
    assert_eq!(active.len(), 1);
    let key = active.get(60).expect("pitch 60 active");
    assert!((key.velocity - 0.9).abs() < 1e-6);
    assert!((key.latest_onset - 1.5).abs() < 1e-12);

    // once the loud one ends the quiet one keeps the key down
    let active = active_pitches(2.2, &notes);
    assert!((active.get(60).unwrap().velocity - 0.3).abs() < 1e-6);
}

#[test]
fn active_set_is_sorted_by_pitch() {
    let notes = list(&[
        (72, 0.0, 1.0, 0.5),
        (48, 0.1, 1.0, 0.5),
        (60, 0.2, 1.0, 0.5),
    ]);
    let pitches: Vec<u8> = active_pitches(0.5, &notes).pitches().collect();
    assert_eq!(pitches, vec![48, 60, 72]);
}

#[test]
fn recomputation_is_pure() {
    let notes = list(&[(60, 0.0, 1.0, 0.5), (62, 0.5, 1.0, 0.7)]);
    let a = active_pitches(0.75, &notes);
    let b = active_pitches(0.75, &notes);
    assert_eq!(a, b);
    // going back in time needs no reset
    let later = active_pitches(1.2, &notes);
    assert!(!later.contains(60));
    let earlier = active_pitches(0.75, &notes);
    assert_eq!(a, earlier);
}

#[test]
fn long_held_note_is_found_behind_short_ones() {
    let mut tuples = vec![(36, 0.0, 60.0, 0.6)];
    for i in 0..100 {
        tuples.push((84, 1.0 + i as f64 * 0.5, 0.1, 0.6));
    }
    let notes = list(&tuples);
    assert!(active_pitches(45.0, &notes).contains(36));
}

#[test]
fn empty_list_has_no_active_keys() {
    let notes = NoteList::empty();
    assert!(active_pitches(3.0, &notes).is_empty());
}
