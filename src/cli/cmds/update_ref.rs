use crate::{App, Result};

use super::find_repo;

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::repo::Ref;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("update-ref")
        .about("Update the value stored in a reference")
        .arg(
            Arg::with_name("ref")
                .required(true)
                .help("Path of the reference, relative to the .git directory"),
        )
        .arg(
            Arg::with_name("value")
                .required(true)
                .help("The new value, stored as given"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let path = args.value_of("ref").unwrap_or_default();
    let value = args.value_of("value").unwrap_or_default();

    let repo = find_repo::from_path(&app.cwd)?;
    Ref::with_data(path, value).write(&repo)?;

    Ok(())
}
