use pretty_assertions::assert_eq;
use std::path::Path;
use std::process::{Command, Output};

fn oxhex(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_oxhex"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("failed to run oxhex")
}

// Script edits reach the written file and the printed dump.
#[test]
fn replays_script_and_writes_result() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("in.bin"), b"ABCDEF").unwrap();
    std::fs::write(
        dir.path().join("edit.txt"),
        "goto 1\nextend 2\ncut\ngoto 3\npaste\n",
    )
    .unwrap();
    let out = oxhex(
        dir.path(),
        &[
            "in.bin",
            "--script",
            "edit.txt",
            "--width",
            "23",
            "--write",
            "out.bin",
            "--config",
            "none.toml",
        ],
    );
    assert!(out.status.success());
    assert_eq!(std::fs::read(dir.path().join("out.bin")).unwrap(), b"ADEBCF");
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "0: 41 44 45 42 ADEB\n\
         4: 43 46       CF\n\
         NORMAL | cursor 0x3 | sel 0x3+2 | 6 bytes\n"
    );
    // The source file is untouched.
    assert_eq!(std::fs::read(dir.path().join("in.bin")).unwrap(), b"ABCDEF");
}

// Unknown and rejected lines are reported on stderr; replay carries on.
#[test]
fn reports_problems_without_failing() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("s.txt"), "copy\nwobble\ninsert\nhex 41\n").unwrap();
    let out = oxhex(
        dir.path(),
        &["new.bin", "--script", "s.txt", "--config", "none.toml"],
    );
    assert!(out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("line 1: invalid range"));
    assert!(stderr.contains("line 2: unknown command `wobble`"));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.ends_with("INSERT __ | cursor 0x1 | sel 0x1+0 | 1 bytes | modified\n"));
    // Nothing written without --write.
    assert!(!dir.path().join("new.bin").exists());
}

#[test]
fn missing_script_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let out = oxhex(dir.path(), &["--script", "nope.txt", "--config", "none.toml"]);
    assert!(!out.status.success());
}
