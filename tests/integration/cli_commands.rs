//! End-to-end tests of the `assetgen` binary.

use super::test_utils::Workspace;
use std::path::Path;
use std::process::{Command, Output};

fn assetgen(ws: &Workspace, args: &[&str]) -> Output {
    let home = ws.root().join("home");
    std::fs::create_dir_all(&home).unwrap();
    Command::new(env!("CARGO_BIN_EXE_assetgen"))
        .arg("--workspace")
        .arg(ws.root())
        .arg("--quiet")
        .args(args)
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("ASSETGEN_LOG")
        .output()
        .unwrap()
}

fn s(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_copy_then_up_to_date() {
    let ws = Workspace::new();
    ws.asset("a.txt", b"hello");
    let desc = ws.descriptor("files.yml", "files: [a.txt]\n");
    let header = ws.header("files.h");
    let (desc, header) = (s(&desc), s(&header));
    let args = [
        "copy",
        desc.as_str(),
        "--header",
        header.as_str(),
        "--target",
        "linux",
    ];

    let first = assetgen(&ws, &args);
    assert!(first.status.success(), "{}", String::from_utf8_lossy(&first.stderr));
    assert!(String::from_utf8_lossy(&first.stdout).starts_with("copy: wrote 2 file(s)"));
    assert_eq!(std::fs::read(ws.deploy().join("a.txt")).unwrap(), b"hello");

    let second = assetgen(&ws, &args);
    assert!(second.status.success());
    assert_eq!(String::from_utf8_lossy(&second.stdout).trim(), "copy: up to date");
}

#[test]
fn test_workspace_config_sets_deploy_dir() {
    let ws = Workspace::new();
    std::fs::write(
        ws.root().join("assetgen.toml"),
        "[generator]\ndeploy_dir = \"staged\"\ntarget_platform = \"ios\"\n",
    )
    .unwrap();
    ws.asset("a.txt", b"x");
    let desc = ws.descriptor(
        "files.yml",
        "files: [a.txt]\noptions:\n  ios:\n    dst_dir: Payload\n",
    );

    let out = assetgen(&ws, &["copy", &s(&desc), "--header", &s(&ws.header("f.h"))]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert!(ws.root().join("staged").join("Payload").join("a.txt").exists());
}

#[test]
fn test_check_json_reports_missing_output() {
    let ws = Workspace::new();
    let desc = ws.descriptor("dump.yml", "files: []\n");
    let out = assetgen(
        &ws,
        &[
            "check",
            "dump",
            &s(&desc),
            "--header",
            &s(&ws.header("dump.h")),
            "--format",
            "json",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["generator"], "dump");
    assert_eq!(value["reason"]["reason"], "output_missing");
    assert!(!ws.header("dump.h").exists());
}

#[test]
fn test_parse_error_exits_nonzero_with_location() {
    let ws = Workspace::new();
    let desc = ws.descriptor("bad.yml", "files: [a, b\n");
    let out = assetgen(&ws, &["dump", &s(&desc), "--header", &s(&ws.header("bad.h"))]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("bad.yml:"), "stderr: {}", stderr);
}

#[test]
fn test_unknown_platform_rejected() {
    let ws = Workspace::new();
    let desc = ws.descriptor("files.yml", "files: []\n");
    let out = assetgen(
        &ws,
        &["copy", &s(&desc), "--header", &s(&ws.header("f.h")), "--target", "amiga"],
    );
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Unknown target platform"));
}
