use fingerforge::error::FingerForgeError;
use fingerforge::loader::{load_passage, read_csv, save_passage, PassageFormat};
use fingerforge::notes::NoteEvent;
use std::io::Write;
use std::path::Path;
use tempfile::{Builder, TempDir};

// --- CSV ---

#[test]
fn test_csv_minimal_columns_take_defaults() {
    let data = "x,time\n0.0,0.0\n2.5,0.5\n";
    let events = read_csv(data.as_bytes()).unwrap();

    assert_eq!(events.len(), 2);
    let e = &events[1];
    assert_eq!(e.x, 2.5);
    assert_eq!(e.time, 0.5);
    assert_eq!(e.duration, 1.0);
    assert!(!e.is_black);
    assert!(!e.is_chord);
    assert_eq!(e.chord_nr, 1);
    assert_eq!(e.n_in_chord, 1);
    assert_eq!(e.measure, None);
    assert_eq!(e.fingering, 0);
    assert_eq!(e.label(), "?");
}

#[test]
fn test_csv_full_columns_with_padding_whitespace() {
    let data = "\
x, time, duration, is_black, is_chord, chord_id, chord_nr, n_in_chord, measure, name, fingering
 1.5, 0.0, 0.5, true, false, 0, 1, 1, 3, C#4, 2
 4.0, 1.0, 2.0, false, true, 7, 1, 2, , E4, 0
 8.0, 1.0, 2.0, false, true, 7, 2, 2, 4, G4, 0
";
    let events = read_csv(data.as_bytes()).unwrap();
    assert_eq!(events.len(), 3);

    assert!(events[0].is_black);
    assert_eq!(events[0].measure, Some(3));
    assert_eq!(events[0].name, "C#4");
    assert_eq!(events[0].fingering, 2);

    assert!(events[1].is_chord);
    assert_eq!(events[1].chord_id, 7);
    assert_eq!(events[1].measure, None);
    assert_eq!(events[2].chord_nr, 2);
    assert_eq!(events[2].n_in_chord, 2);
}

#[test]
fn test_csv_rejects_garbage() {
    let data = "x,time\nleft,0.0\n";
    let res = read_csv(data.as_bytes());
    assert!(matches!(res, Err(FingerForgeError::Csv(_))));
}

// --- FILES ---

fn sample_passage() -> Vec<NoteEvent> {
    vec![
        NoteEvent::new(0.0, 0.0, 1.0).at_measure(1).named("C4"),
        NoteEvent::new(1.75, 0.25, 0.5).black().at_measure(1).named("C#4"),
        NoteEvent::new(4.5, 0.5, 2.0).in_chord(3, 1, 2).at_measure(2),
        NoteEvent::new(9.0, 0.5, 2.0).in_chord(3, 2, 2).at_measure(2),
    ]
}

#[test]
fn test_json_file_loads() {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    writeln!(
        file,
        r#"[{{"x": 0.0, "time": 0.0}}, {{"x": -3.5, "time": 0.5, "is_black": true, "name": "Bb3"}}]"#
    )
    .unwrap();

    let events = load_passage(file.path()).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].x, -3.5);
    assert!(events[1].is_black);
    assert_eq!(events[1].name, "Bb3");
    assert_eq!(events[1].duration, 1.0);
}

#[test]
fn test_save_then_load_keeps_fingering_csv_and_json() {
    let dir = TempDir::new().unwrap();
    let mut passage = sample_passage();
    for (e, f) in passage.iter_mut().zip([1u8, 2, 1, 5]) {
        e.fingering = f;
    }

    for file in ["out.csv", "out.json"] {
        let path = dir.path().join(file);
        save_passage(&path, &passage).unwrap();
        let back = load_passage(&path).unwrap();
        assert_eq!(back, passage, "{}", file);
    }
}

#[test]
fn test_format_is_inferred_from_extension() {
    assert_eq!(
        PassageFormat::from_path(Path::new("a/b/passage.CSV")).unwrap(),
        PassageFormat::Csv
    );
    assert_eq!(
        PassageFormat::from_path(Path::new("passage.json")).unwrap(),
        PassageFormat::Json
    );
    assert!(matches!(
        PassageFormat::from_path(Path::new("passage.mid")),
        Err(FingerForgeError::Config(_))
    ));
    assert!(PassageFormat::from_path(Path::new("passage")).is_err());
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let res = load_passage(dir.path().join("nope.csv"));
    assert!(matches!(res, Err(FingerForgeError::Io(_))));
}
