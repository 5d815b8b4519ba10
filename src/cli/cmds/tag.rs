use std::io::Write;

use super::find_repo;
use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::repo::{list_refs, Ref};

const TAGS: &str = "refs/tags";

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("tag")
        .about("List tags, or create a lightweight tag")
        .arg(Arg::with_name("name").help("The name of the tag to create"))
        .arg(
            Arg::with_name("object")
                .default_value("HEAD")
                .help("The object the new tag will point to"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let repo = find_repo::from_path(&app.cwd)?;

    let name = match args.value_of("name") {
        Some(name) => name,
        None => {
            let prefix = format!("{}/", TAGS);
            for r in list_refs(&repo, TAGS)? {
                let tag = r.path().strip_prefix(&prefix).unwrap_or_else(|| r.path());
                writeln!(app, "{}", tag)?;
            }
            return Ok(());
        }
    };

    let object = args.value_of("object").unwrap_or("HEAD");
    let id = repo.find_object(object)?;

    Ref::with_data(format!("{}/{}", TAGS, name), format!("{}\n", id)).write(&repo)?;

    Ok(())
}
