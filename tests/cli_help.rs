use assert_cmd::Command;

#[test]
fn cli_help_smoke() {
    let mut cmd = Command::cargo_bin("flare-trigger-sweep").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn sweep_help_smoke() {
    let mut cmd = Command::cargo_bin("flare-trigger-sweep").unwrap();
    cmd.arg("sweep").arg("--help");
    cmd.assert().success();
}
