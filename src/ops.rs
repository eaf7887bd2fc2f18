//! Command handlers bridging CLI arguments to the core resolver
//!
//! Every mutating handler validates the whole operation in memory before
//! the single serialize-and-write step, so a failing invocation leaves the
//! on-disk file untouched.

use log::debug;

use crate::args::*;
use crate::core::{query, resolver, value, CoercionMode, KeyPath};
use crate::error::Result;
use crate::io::{load_document, store_document};

/// The fixed line printed when a search matches nothing.
pub const NO_RESULT: &str = "No result found";

pub fn run_get(args: GetArgs) -> Result<()> {
    let document = load_document(&args.toml_path)?;
    let path = KeyPath::parse(&args.key)?;

    let resolved = resolver::get(&document, &path, args.default.as_deref())?;
    println!("{}", value::render(&resolved));
    Ok(())
}

pub fn run_set(args: SetArgs) -> Result<()> {
    let mut document = load_document(&args.toml_path)?;
    let path = KeyPath::parse(&args.key)?;

    let mode = CoercionMode::from_flags(args.to_int, args.to_float, args.to_bool, args.to_array);
    let coerced = value::coerce(&args.value, mode)?;
    debug!("setting {} in {}", path, args.toml_path.display());

    resolver::set(&mut document, &path, coerced)?;
    store_document(&args.toml_path, &document)
}

pub fn run_add_section(args: AddSectionArgs) -> Result<()> {
    let mut document = load_document(&args.toml_path)?;
    let path = KeyPath::parse(&args.key)?;

    resolver::add_section(&mut document, &path)?;
    store_document(&args.toml_path, &document)
}

pub fn run_unset(args: UnsetArgs) -> Result<()> {
    let mut document = load_document(&args.toml_path)?;
    let path = KeyPath::parse(&args.key)?;
    debug!("unsetting {} in {}", path, args.toml_path.display());

    resolver::unset(&mut document, &path)?;
    store_document(&args.toml_path, &document)
}

pub fn run_search(args: SearchArgs) -> Result<()> {
    let document = load_document(&args.toml_path)?;

    match query::search(&document, &args.expression)? {
        Some(rendered) => println!("{rendered}"),
        None => println!("{NO_RESULT}"),
    }
    Ok(())
}

pub fn run_update_dependency_list(args: UpdateDependencyListArgs) -> Result<()> {
    let mut document = load_document(&args.toml_path)?;
    let path = KeyPath::parse(&args.key)?;
    debug!(
        "updating dependency {} to {} under {}",
        args.value, args.version, path
    );

    resolver::update_dependency_list(&mut document, &path, &args.value, &args.version)?;
    store_document(&args.toml_path, &document)
}
