use crate::{App, Result};

mod cat_file;
mod find_repo;
mod hash_object;
mod init;
mod log;
mod ls_tree;
mod show_ref;
mod tag;
mod update_ref;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(cat_file::subcommand())
        .subcommand(hash_object::subcommand())
        .subcommand(init::subcommand())
        .subcommand(log::subcommand())
        .subcommand(ls_tree::subcommand())
        .subcommand(show_ref::subcommand())
        .subcommand(tag::subcommand())
        .subcommand(update_ref::subcommand())
}

pub(crate) fn dispatch(app: &mut App) -> Result<()> {
    let matches = app.arg_matches.clone();
    // ^^ Need an independent copy of matches so we can still pass
    // the App struct through to subcommand imps.

    match matches.subcommand() {
        ("cat-file", Some(m)) => cat_file::run(app, m),
        ("hash-object", Some(m)) => hash_object::run(app, m),
        ("init", Some(m)) => init::run(app, m),
        ("log", Some(m)) => log::run(app, m),
        ("ls-tree", Some(m)) => ls_tree::run(app, m),
        ("show-ref", Some(m)) => show_ref::run(app, m),
        ("tag", Some(m)) => tag::run(app, m),
        ("update-ref", Some(m)) => update_ref::run(app, m),
        _ => unreachable!(),
        // unreachable: Should have exited out with appropriate help or
        // error message if no subcommand was given.
    }
}
