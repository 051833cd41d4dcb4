#![cfg(feature = "cli")]

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn ucp(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ucp"))
        .arg("--log-level")
        .arg("error")
        .args(args)
        .output()
        .expect("ucp should run")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn decode_prints_json_when_piped() {
    let output = ucp(&["decode", "01/00023/R/31/A/0003/2A"]);

    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(stdout(&output).trim()).expect("stdout should be JSON");
    assert_eq!(json["header"]["trn"], 1);
    assert_eq!(json["header"]["role"], "R");
    assert_eq!(json["body"]["kind"], "ack");
    assert_eq!(json["body"]["sm"], "0003");
    assert_eq!(json["checksum"], "2A");
}

#[test]
fn decode_accepts_escaped_delimiters() {
    let output = ucp(&[
        "--format",
        "pretty",
        "decode",
        "\\x0202/00034/R/51/N/02/syntax error/FB\\x03",
    ]);

    assert!(output.status.success());
    let line = stdout(&output);
    assert!(line.contains("kind=nack"));
    assert!(line.contains("ec=02"));
    assert!(line.contains("checksum=FB"));
}

#[test]
fn decode_bad_checksum_returns_60() {
    let output = ucp(&["decode", "01/00023/R/31/A/0003/2B"]);
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("checksum"));

    let output = ucp(&["decode", "--no-verify-checksum", "01/00023/R/31/A/0003/2B"]);
    assert!(output.status.success());
}

#[test]
fn decode_unsupported_operation_returns_60() {
    let output = ucp(&["decode", "01/00018/O/99/x/7E"]);
    assert_eq!(output.status.code(), Some(60));
    assert!(String::from_utf8_lossy(&output.stderr).contains("nack 03"));
}

#[test]
fn decode_reads_frames_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ucp"))
        .args(["--log-level", "error", "--format", "pretty", "decode"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("decode should start");

    {
        let mut stdin = child.stdin.take().expect("stdin should be piped");
        stdin
            .write_all(b"\x0201/00023/R/31/A/0003/2A\x03\r\n\x0201/00035/O/31/0234765439845/0539/A3\x03")
            .expect("write should succeed");
    }

    let output = child.wait_with_output().expect("decode should finish");
    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("kind=ack"));
    assert!(lines[1].contains("adc=0234765439845"));
}

#[test]
fn decode_raw_echoes_frames_as_received() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_ucp"))
        .args(["--log-level", "error", "--format", "raw", "decode"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("decode should start");

    let input = b"\x021/000023/R/31/A/0003/2A\x03\x0201/00023/R/31/A/0003/2A\x03";
    {
        let mut stdin = child.stdin.take().expect("stdin should be piped");
        stdin.write_all(input).expect("write should succeed");
    }

    let output = child.wait_with_output().expect("decode should finish");
    assert!(output.status.success());
    assert_eq!(output.stdout, input.to_vec());
}

#[test]
fn submit_raw_output_is_a_complete_frame() {
    let output = ucp(&[
        "--format",
        "raw",
        "submit",
        "--trn",
        "3",
        "--recipient",
        "0612345678",
        "--sender",
        "orange.pl",
        "--text",
        "Hello",
    ]);

    assert!(output.status.success());
    let wire = output.stdout;
    assert_eq!(wire.first(), Some(&0x02));
    assert_eq!(wire.last(), Some(&0x03));
    let text = String::from_utf8_lossy(&wire[1..wire.len() - 1]).into_owned();
    assert!(text.starts_with("03/"));
    assert!(text.contains("/O/51/0612345678/106F79D87D2EBBE06C/"));
    assert!(text.contains("/48656C6C6F/"));
    assert!(text.contains("/5039/"));
}

#[test]
fn checksum_command() {
    let output = ucp(&["--format", "raw", "checksum", "01/00023/R/31/A/0003/"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "2A");

    let output = ucp(&["checksum", "01/00023/R/31/A/0003/", "--expect", "2b"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn sender_encode_and_decode() {
    let output = ucp(&["sender", "encode", "orange.pl"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(stdout(&output).trim()).expect("JSON");
    assert_eq!(json["otoa"], "5039");
    assert_eq!(json["oadc"], "106F79D87D2EBBE06C");

    let output = ucp(&["--format", "raw", "sender", "decode", "106F79D87D2EBBE06C"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "orange.pl");

    let output = ucp(&["sender", "decode", "ZZ"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn version_prints_package_version() {
    let output = ucp(&["version"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), format!("ucp {}", env!("CARGO_PKG_VERSION")));
}
