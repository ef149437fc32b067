//! CLI integration tests for `life run`.

use life_core::{Position, Species};
use life_world::Grid;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn life(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_life"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run life binary")
}

fn run_with(input: &Path, output: &Path, extra: &[&str]) -> Output {
    let mut args = vec![
        "run",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    life(&args)
}

/// Load a written world; outputs carry no iteration count, so one is added first.
fn read_grid(path: &Path) -> Grid {
    let text = fs::read_to_string(path).expect("read output");
    let text = text.replacen("<world>", "<world><iterations>0</iterations>", 1);
    let (_, grid) = life_xml::parse_world(&text, &mut ChaCha8Rng::seed_from_u64(0))
        .expect("output is a valid world");
    grid
}

fn write_input(
    dir: &TempDir,
    name: &str,
    cells: i64,
    species: i64,
    iterations: i64,
    organisms: &[(i64, i64, i64)],
) -> PathBuf {
    let organisms: String = organisms
        .iter()
        .map(|(x, y, s)| {
            format!("<organism><x_pos>{x}</x_pos><y_pos>{y}</y_pos><species>{s}</species></organism>")
        })
        .collect();
    let path = dir.path().join(name);
    fs::write(
        &path,
        format!(
            "<life><world><cells>{cells}</cells><species>{species}</species>\
             <iterations>{iterations}</iterations></world><organisms>{organisms}</organisms></life>"
        ),
    )
    .expect("write input");
    path
}

#[test]
fn blinker_turns_vertical_after_one_iteration() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.xml");

    let result = run_with(&fixture("blinker.xml"), &output, &[]);

    assert!(result.status.success());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains(&format!("File {} was saved.", output.display())));

    let grid = read_grid(&output);
    assert_eq!(
        grid.occupied().collect::<Vec<_>>(),
        vec![
            (Position::new(1, 0), Species(0)),
            (Position::new(1, 1), Species(0)),
            (Position::new(1, 2), Species(0)),
        ]
    );
}

#[test]
fn blinker_returns_after_two_iterations() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "input.xml", 3, 1, 2, &[(0, 1, 0), (1, 1, 0), (2, 1, 0)]);
    let output = dir.path().join("output.xml");

    let result = run_with(&input, &output, &[]);

    assert!(result.status.success());
    let grid = read_grid(&output);
    assert_eq!(
        grid.occupied().collect::<Vec<_>>(),
        vec![
            (Position::new(0, 1), Species(0)),
            (Position::new(1, 1), Species(0)),
            (Position::new(2, 1), Species(0)),
        ]
    );
}

#[test]
fn glider_matches_expected_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.xml");

    let result = run_with(&fixture("glider.xml"), &output, &[]);

    assert!(result.status.success());
    assert_eq!(read_grid(&output), read_grid(&fixture("glider-expected.xml")));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("<species>2</species>"));
    assert!(!written.contains("<iterations>"));
}

#[test]
fn zero_iterations_copies_input() {
    let dir = TempDir::new().unwrap();
    let organisms = [(0, 0, 1), (3, 1, 0), (2, 3, 2)];
    let input = write_input(&dir, "input.xml", 4, 3, 0, &organisms);
    let output = dir.path().join("output.xml");

    assert!(run_with(&input, &output, &[]).status.success());

    let grid = read_grid(&output);
    assert_eq!(grid.population(), 3);
    assert_eq!(grid.get(Position::new(0, 0)), Some(Species(1)));
    assert_eq!(grid.get(Position::new(3, 1)), Some(Species(0)));
    assert_eq!(grid.get(Position::new(2, 3)), Some(Species(2)));
}

#[test]
fn game_run_alias_is_accepted() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.xml");

    let result = life(&[
        "game:run",
        "-i",
        fixture("blinker.xml").to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);

    assert!(result.status.success());
    assert!(output.exists());
}

#[test]
fn same_seed_gives_same_output() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.xml");
    let second = dir.path().join("second.xml");

    assert!(run_with(&fixture("crowded.xml"), &first, &["--seed", "11"]).status.success());
    assert!(run_with(&fixture("crowded.xml"), &second, &["--seed", "11"]).status.success());

    assert_eq!(
        fs::read_to_string(&first).unwrap(),
        fs::read_to_string(&second).unwrap()
    );
}

#[test]
fn conflicting_organisms_keep_one_species() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "input.xml", 3, 2, 0, &[(1, 1, 0), (1, 1, 1)]);

    for seed in ["1", "2", "3", "4"] {
        let output = dir.path().join(format!("output-{seed}.xml"));
        assert!(run_with(&input, &output, &["--seed", seed]).status.success());

        let grid = read_grid(&output);
        assert_eq!(grid.population(), 1);
        assert!(grid.get(Position::new(1, 1)).is_some());
    }
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("absent.xml");
    let output = dir.path().join("output.xml");

    let result = run_with(&input, &output, &[]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Error: File does not exist"));
    assert!(!output.exists());
}

#[test]
fn invalid_species_count_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "input.xml", 3, 0, 1, &[]);
    let output = dir.path().join("output.xml");

    let result = run_with(&input, &output, &[]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("'species'"));
    assert!(!output.exists());
}

#[test]
fn out_of_range_position_fails() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "input.xml", 3, 1, 1, &[(3, 0, 0)]);
    let output = dir.path().join("output.xml");

    let result = run_with(&input, &output, &[]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("'x_pos'"));
}

#[test]
fn negative_iterations_fail() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "input.xml", 3, 1, -1, &[]);
    let output = dir.path().join("output.xml");

    let result = run_with(&input, &output, &[]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("'iterations'"));
}

#[test]
fn malformed_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.xml");
    fs::write(&input, "<life><world><cells>3</cells></life>").unwrap();
    let output = dir.path().join("output.xml");

    let result = run_with(&input, &output, &[]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Error: Failed to parse XML"));
}

#[test]
fn custom_template_directory() {
    let dir = TempDir::new().unwrap();
    let templates = dir.path().join("templates");
    fs::create_dir(&templates).unwrap();
    fs::write(
        templates.join("output-template.xml"),
        "<life><meta>custom</meta><world><cells/><species/></world><organisms/></life>",
    )
    .unwrap();
    let output = dir.path().join("output.xml");

    let result = run_with(
        &fixture("blinker.xml"),
        &output,
        &["--templates", templates.to_str().unwrap()],
    );

    assert!(result.status.success());
    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("<meta>custom</meta>"));
    assert_eq!(read_grid(&output).population(), 3);
}

#[test]
fn missing_template_fails() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("output.xml");

    let result = run_with(
        &fixture("blinker.xml"),
        &output,
        &["--templates", dir.path().join("nowhere").to_str().unwrap()],
    );

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Error: Writing XML file failed"));
    assert!(!output.exists());
}

#[test]
fn unwritable_output_fails() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("no-such-dir").join("output.xml");

    let result = run_with(&fixture("blinker.xml"), &output, &[]);

    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Error: Writing XML file failed"));
}
