use std::io::Write;

use super::find_repo;
use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::repo::format_log;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("log")
        .about("Show commit history")
        .arg(
            Arg::with_name("commit")
                .default_value("HEAD")
                .help("The commit to start from"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let start = args.value_of("commit").unwrap_or("HEAD");

    let repo = find_repo::from_path(&app.cwd)?;
    let entries = repo.log(start)?;

    writeln!(app, "{}", format_log(&entries)?)?;

    Ok(())
}
