mod command;
mod editor;

pub use command::{CliArgument, Command, encode_cli_flag, encode_cli_options};
pub use editor::{Editor, EditorOptions, EditorSet, OptionScalar, OptionValue};
