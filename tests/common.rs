use std::path::Path;

use assert_cmd::Command;

// Run the tinygit binary with `path` as its working directory.
pub fn tinygit(path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tinygit").unwrap();
    cmd.current_dir(path);
    cmd
}

// Run `tinygit init` in `path` and return nothing; panics on failure.
#[allow(dead_code)]
pub fn init_empty_repo(path: &Path) {
    tinygit(path).arg("init").assert().success();
}

// Run a tinygit command that must succeed and return its stdout as a string.
#[allow(dead_code)]
pub fn stdout_of(path: &Path, args: &[&str]) -> String {
    let output = tinygit(path).args(args).assert().success();
    String::from_utf8(output.get_output().stdout.clone()).unwrap()
}
