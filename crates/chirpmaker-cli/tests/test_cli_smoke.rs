//! End-to-end runs of the `chirpmaker` binary.

use std::fs;
use std::process::{Command, Output};

fn chirpmaker(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chirpmaker"))
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run chirpmaker {args:?}: {e}"))
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_chirp_prints_plan_summary() {
    let output = chirpmaker(&[
        "chirp", "--f-start", "1000", "--f-stop", "4000", "--steps", "10", "--periods", "1",
        "--chirps", "1", "--pause-ms", "0", "--scale", "chromatic",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("11 pulses"), "{}", stdout(&output));
}

#[test]
fn test_chirp_with_config_and_wav_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("settings.json");
    let wav = dir.path().join("chirp.wav");
    fs::write(&config, r#"{ "f_start": 2000, "f_stop": 3000, "n_chirps": 1 }"#).unwrap();

    let output = chirpmaker(&[
        "chirp",
        "--config",
        config.to_str().unwrap(),
        "--out",
        wav.to_str().unwrap(),
        "--sample-rate",
        "22050",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let data = fs::read(&wav).unwrap();
    assert_eq!(&data[0..4], b"RIFF");
    assert!(stdout(&output).contains("PCM hash"));
}

#[test]
fn test_invalid_chirp_fails() {
    let output = chirpmaker(&["chirp", "--duty", "100"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error"));
}

#[test]
fn test_phaser_trace() {
    let output = chirpmaker(&[
        "phaser", "--freq", "1000", "--periods", "1", "--duty-start", "0", "--duty-end", "2",
        "--trace",
    ]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("wait 1000 us"));
    assert!(text.contains("3 pulses"));
}

#[test]
fn test_seeded_concert_is_repeatable() {
    let args = ["concert", "--seed", "31337", "--count", "4", "--pause-ms", "10"];
    let first = chirpmaker(&args);
    let second = chirpmaker(&args);
    assert!(first.status.success());
    assert_eq!(stdout(&first), stdout(&second));
}

#[test]
fn test_voice_by_name_and_unknown_id() {
    let ok = chirpmaker(&["voice", "--name", "cuckoo", "--seed", "1"]);
    assert!(ok.status.success());
    assert!(stdout(&ok).contains("11 (cuckoo)"));

    let missing = chirpmaker(&["voice", "--id", "15", "--seed", "1"]);
    assert_eq!(missing.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&missing.stderr).contains("unknown bird profile id 15"));
}

#[test]
fn test_scale_table_and_birds() {
    let table = chirpmaker(&["scale", "--steps", "4", "--scale", "linear"]);
    assert!(table.status.success());
    let rows = stdout(&table)
        .lines()
        .filter(|line| line.trim_start().starts_with(char::is_numeric))
        .count();
    assert_eq!(rows, 5);

    let birds = chirpmaker(&["birds", "--json"]);
    assert!(birds.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&birds)).unwrap();
    assert_eq!(json["profiles"].as_array().unwrap().len(), 15);
}
