use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn cargo_bin() -> Command { Command::cargo_bin("bf").unwrap() }

const HELLO: &str = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.";

#[test]
fn program_from_stdin_prints_output_and_trailing_newline() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .write_stdin(HELLO)
        .assert()
        .success()
        .stdout("Hello\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn whitespace_in_program_is_ignored() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .write_stdin("+++ +++\n+++\t+++\r\n[>+++++<-]>---.")
        .assert()
        .success()
        .stdout("9\n");
}

#[test]
fn execute_flag_parts_are_concatenated() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["-e", "++++++++[>++++++++<-]", "-e", ">+."])
        .assert()
        .success()
        .stdout("A\n");
}

#[test]
fn execute_flag_accepts_leading_minus() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["-e", "-[-]"])
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn empty_program_prints_only_newline() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .write_stdin("")
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn tape_extends_left_of_origin() {
    cargo_bin()
        .timeout(Duration::from_secs(2))
        .args(["-e", "<<++++++++[>++++++++<-]>+.>."])
        .assert()
        .success()
        .stdout("A\u{0}\n");
}
