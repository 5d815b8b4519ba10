use std::io::Write;

use super::find_repo;
use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("ls-tree")
        .about("List the contents of a tree object")
        .arg(
            Arg::with_name("tree")
                .required(true)
                .help("The tree to list (an ID or a reference name)"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let name = args.value_of("tree").unwrap_or_default();

    let repo = find_repo::from_path(&app.cwd)?;
    let id = repo.find_object(name)?;
    let object = repo.read_object(&id)?;

    let tree = match object.as_tree() {
        Some(tree) => tree,
        None => return Err(format!("{} is not a tree", name).into()),
    };

    for entry in tree.entries() {
        writeln!(
            app,
            "{} {} {}\t{}",
            entry.mode.padded(),
            entry.mode.object_kind(),
            entry.id,
            entry.name
        )?;
    }

    Ok(())
}
