use std::io::{Read, Write};
use std::path::PathBuf;

#[cfg(test)]
use std::{ffi::OsString, io::Cursor, path::Path};

use crate::{cmds, Result};

use clap::{crate_version, AppSettings, ArgMatches};

pub(crate) fn clap_app<'a, 'b>() -> clap::App<'a, 'b> {
    let app = clap::App::new("tinygit")
        .version(crate_version!())
        .about("A small content-addressable object store in the style of git")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands);

    cmds::add_subcommands(app)
}

/// Everything a subcommand needs from the process: parsed arguments, the
/// directory it was started in, and the standard streams.
pub(crate) struct App<'a> {
    pub arg_matches: ArgMatches<'a>,
    pub cwd: PathBuf,
    pub stdin: &'a mut dyn Read,
    pub stdout: &'a mut dyn Write,
}

impl<'a> App<'a> {
    pub fn run(&mut self) -> Result<()> {
        cmds::dispatch(self)
    }

    /// Interpret a path from the command line relative to `cwd`.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        self.cwd.join(path)
    }
}

#[cfg(test)]
impl App<'_> {
    /// Run one command line (without the program name) in `cwd`, feeding it
    /// `stdin`, and return what it wrote to stdout.
    pub fn run_with_stdin_and_args<I, T>(cwd: &Path, stdin: Vec<u8>, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let argv = std::iter::once(OsString::from("tinygit"))
            .chain(args.into_iter().map(Into::into))
            .collect::<Vec<OsString>>();

        let mut stdin = Cursor::new(stdin);
        let mut captured = Vec::new();

        let mut app = App {
            arg_matches: clap_app().get_matches_from_safe(argv)?,
            cwd: cwd.to_path_buf(),
            stdin: &mut stdin,
            stdout: &mut captured,
        };
        app.run()?;

        Ok(captured)
    }

    pub fn run_with_args<I, T>(cwd: &Path, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        App::run_with_stdin_and_args(cwd, Vec::new(), args)
    }
}

impl Write for App<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write(buf)
    }

    #[cfg(not(tarpaulin_include))]
    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()
    }
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;

    #[test]
    fn usage_without_subcommand() {
        Command::cargo_bin("tinygit")
            .unwrap()
            .assert()
            .failure()
            .stdout("")
            .stderr(predicate::str::contains("USAGE:"))
            .stderr(predicate::str::contains("cat-file"))
            .stderr(predicate::str::contains("show-ref"));
    }

    #[test]
    fn version_flag() {
        Command::cargo_bin("tinygit")
            .unwrap()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("tinygit 0.1"))
            .stderr("");
    }

    #[test]
    fn errors_are_reported_on_stderr() {
        let temp = tempfile::tempdir().unwrap();

        Command::cargo_bin("tinygit")
            .unwrap()
            .current_dir(temp.path())
            .args(&["cat-file", "blob", "0123456789abcdef0123456789abcdef01234567"])
            .assert()
            .code(1)
            .stdout("")
            .stderr(predicate::str::starts_with("ERROR: not a git repository"));
    }
}
