use std::io::Write;

use super::find_repo;
use crate::{App, Result};

use clap::{ArgMatches, SubCommand};
use tinygit::repo::list_refs;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("show-ref").about("List references in a local repository")
}

pub(crate) fn run(app: &mut App, _args: &ArgMatches) -> Result<()> {
    let repo = find_repo::from_path(&app.cwd)?;

    for mut r in list_refs(&repo, "refs")? {
        let target = r.resolve(&repo)?;
        writeln!(app, "{} {}", target, r.path())?;
    }

    Ok(())
}
