mod args;

pub use args::{Cli, ColorChoice, Commands, CompletionsArgs, ExistsArgs, UpdateArgs};
