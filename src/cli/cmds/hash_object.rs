use std::{
    fs,
    io::Write,
};

use super::find_repo;
use crate::{App, Result};

use clap::{Arg, ArgMatches, Error, ErrorKind, SubCommand};
use tinygit::object::{Kind, Object};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("hash-object")
        .about("Compute object ID and optionally create an object from a file")
        .arg(
            Arg::with_name("t")
                .short("t")
                .value_name("type")
                .possible_values(&["blob", "commit", "tag", "tree"])
                .help("Specify the type (default 'blob')"),
        )
        .arg(
            Arg::with_name("w")
                .short("w")
                .help("Actually write the object into the object database"),
        )
        .arg(
            Arg::with_name("stdin")
                .long("stdin")
                .help("Read the object from standard input instead of from a file"),
        )
        .arg(Arg::with_name("file"))
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let kind = match args.value_of("t") {
        Some(t) => Kind::from_tag(t.as_bytes())?,
        None => Kind::Blob,
    };

    let body = body_from_args(app, args)?;
    let object = Object::new(kind, &body)?;

    let id = if args.is_present("w") {
        let repo = find_repo::from_path(&app.cwd)?;
        repo.write_object(&object, true)?
    } else {
        object.id()?
    };

    writeln!(app, "{}", id)?;

    Ok(())
}

fn body_from_args(app: &mut App, args: &ArgMatches) -> Result<Vec<u8>> {
    let stdin = args.is_present("stdin");

    match (args.value_of("file"), stdin) {
        (Some(file), false) => Ok(fs::read(app.resolve_path(file))?),
        (None, true) => {
            let mut body = Vec::new();
            app.stdin.read_to_end(&mut body)?;
            Ok(body)
        }
        _ => Err(Box::new(Error::with_description(
            "content source must be either --stdin or a file path",
            ErrorKind::MissingRequiredArgument,
        ))),
    }
}
