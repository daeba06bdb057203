// PTY smoke tests for the compiled binary: real crossterm input, the event
// loop and terminal setup/teardown.
//
// Unix-only and ignored by default since they need a pseudo terminal:
// `cargo test --test integration_min_session -- --ignored`

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof, Session};

const SETTLE: Duration = Duration::from_millis(200);

fn launch(args: &str) -> Result<Session, Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("taja");
    let session = spawn(format!("{} {args}", bin.display()))?;
    std::thread::sleep(SETTLE);
    Ok(session)
}

#[test]
#[ignore]
fn custom_prompt_completes_and_escape_exits() -> Result<(), Box<dyn std::error::Error>> {
    let mut p = launch("-l english -p hi")?;

    p.send("hi")?;
    std::thread::sleep(SETTLE);

    // results view also quits on escape
    p.send("\x1b")?;

    p.expect(Eof)?;
    Ok(())
}

#[test]
#[ignore]
fn drill_quits_on_ctrl_c() -> Result<(), Box<dyn std::error::Error>> {
    let mut p = launch("-l korean -m position --level home-row")?;

    // escape only skips the key in a drill
    p.send("\x1b")?;
    std::thread::sleep(SETTLE);

    p.send("\x03")?;

    p.expect(Eof)?;
    Ok(())
}
