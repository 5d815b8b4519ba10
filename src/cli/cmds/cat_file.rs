use std::io::Write;

use super::find_repo;
use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use tinygit::object::Kind;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("cat-file")
        .about("Provide content of repository objects")
        .arg(
            Arg::with_name("type")
                .required(true)
                .possible_values(&["blob", "commit", "tag", "tree"])
                .help("The expected type of the object"),
        )
        .arg(
            Arg::with_name("object")
                .required(true)
                .help("The object to display (an ID or a reference name)"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let kind = Kind::from_tag(args.value_of("type").unwrap_or_default().as_bytes())?;
    let name = args.value_of("object").unwrap_or_default();

    let repo = find_repo::from_path(&app.cwd)?;
    let id = repo.find_object(name)?;
    let object = repo.read_object(&id)?;

    if object.kind() != kind {
        return Err(format!("object {} is a {}, not a {}", id, object.kind(), kind).into());
    }

    app.write_all(&object.serialize()?)?;

    Ok(())
}
