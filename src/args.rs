use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get a value from a toml file
    Get(GetArgs),
    /// Set a value in a toml file
    Set(SetArgs),
    /// Add a section with the given key
    #[command(name = "add_section")]
    AddSection(AddSectionArgs),
    /// Unset a value from a toml file
    Unset(UnsetArgs),
    /// Query a toml file with a jmespath expression
    Search(SearchArgs),
    /// Add or modify a value in a dependency list
    #[command(name = "update_dependency_list")]
    UpdateDependencyList(UpdateDependencyListArgs),
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Dotted key path, e.g. person.vehicles[1].model
    pub key: String,

    /// Value to print when the key is missing
    #[arg(long)]
    pub default: Option<String>,

    #[arg(long, default_value = "config.toml")]
    pub toml_path: PathBuf,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Dotted key path of the value to write
    pub key: String,

    /// Raw value; stored as a string unless a coercion flag is given
    pub value: String,

    /// Store the value as an integer (coercion flags are mutually
    /// exclusive; the first of int, float, bool, array wins)
    #[arg(long)]
    pub to_int: bool,

    /// Store the value as a float
    #[arg(long)]
    pub to_float: bool,

    /// Store the value as a boolean; true for "true", "yes", "y" and "1",
    /// case-insensitive, false otherwise
    #[arg(long)]
    pub to_bool: bool,

    /// Parse the value as a json array and store it as a toml array,
    /// e.g. '["Amsterdam","Rotterdam"]'
    #[arg(long)]
    pub to_array: bool,

    #[arg(long, default_value = "config.toml")]
    pub toml_path: PathBuf,
}

#[derive(Args, Debug)]
pub struct AddSectionArgs {
    /// Dotted path of the section to create
    pub key: String,

    #[arg(long, default_value = "config.toml")]
    pub toml_path: PathBuf,
}

#[derive(Args, Debug)]
pub struct UnsetArgs {
    /// Dotted key path of the value to delete
    pub key: String,

    #[arg(long, default_value = "config.toml")]
    pub toml_path: PathBuf,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// JMESPath expression, e.g. person.vehicles[*].model
    pub expression: String,

    #[arg(long, default_value = "config.toml")]
    pub toml_path: PathBuf,
}

#[derive(Args, Debug)]
pub struct UpdateDependencyListArgs {
    /// Dotted key path of the dependency array
    pub key: String,

    /// Package name to add or update
    pub value: String,

    /// Version constraint; a bare version gets ">=" prepended
    pub version: String,

    #[arg(long, default_value = "config.toml")]
    pub toml_path: PathBuf,
}
