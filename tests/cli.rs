use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run(args: &[&str], stdin: &str) -> Output {
    run_bytes(args, stdin.as_bytes())
}

fn run_bytes(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_spacesaving"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start binary");
    // The binary may exit before reading stdin, e.g. on bad arguments.
    let _ = child.stdin.take().unwrap().write_all(stdin);
    child.wait_with_output().unwrap()
}

fn lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

#[test]
fn test_argument_order_does_not_matter() {
    let input = "A a a b C\n";
    let first = run(&["100", "2"], input);
    let second = run(&["2", "100"], input);

    assert!(first.status.success());
    assert_eq!(lines(&first), lines(&second));
    assert_eq!(
        lines(&first),
        vec!["element: a count: 3 error: 0", "element: c count: 2 error: 1"]
    );
}

#[test]
fn test_length_limit_stops_reading() {
    let output = run(&["3", "5"], "x y x z z z z\n");
    assert!(output.status.success());
    assert_eq!(
        lines(&output),
        vec![
            "element: x count: 2 error: 0",
            "element: z count: 2 error: 0",
            "element: y count: 1 error: 0"
        ]
    );
}

#[test]
fn test_guaranteed_only() {
    let output = run(&["--guaranteed", "10", "2"], "a a a b c\n");
    assert!(output.status.success());
    assert_eq!(lines(&output), vec!["element: a count: 3 error: 0"]);
}

#[test]
fn test_chars_mode() {
    let output = run(&["--chars", "100", "5"], "ab, ba! a\n");
    assert!(output.status.success());
    assert_eq!(
        lines(&output),
        vec!["element: a count: 3 error: 0", "element: b count: 2 error: 0"]
    );
}

#[test]
fn test_zero_is_rejected() {
    let output = run(&["0", "10"], "a b c\n");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_empty_input() {
    let output = run(&["10", "3"], "");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_latin1_input_keeps_counting() {
    let output = run_bytes(&["10", "2"], b"a a caf\xe9 b\n");
    assert!(output.status.success());
    assert_eq!(
        lines(&output),
        vec![
            "element: a count: 2 error: 0",
            "element: b count: 2 error: 1"
        ]
    );
}
