//! the args for running m2c

use m2c_capabilities::{Capabilities, CapabilityError};
use m2c_cli_common::{DialectArgs, LoggingArgs};
use m2c_parsing::DiagnosticOptions;
use std::path::PathBuf;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Checks the syntax of Modula-2 compilation units")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    #[command(flatten)]
    dialect: DialectArgs,

    /// Specify which source files to parse
    #[clap(required_unless_present = "list_capabilities", value_name = "source file", value_hint = clap::ValueHint::FilePath)]
    pub files: Vec<PathBuf>,
    /// Report style faults, such as errant semicolons, as errors instead of warnings
    #[clap(long)]
    pub style_errors: bool,
    /// Print the syntax tree of every parsed file
    #[clap(long)]
    pub dump_ast: bool,
    /// Print the state of every capability under the selected dialect
    #[clap(long)]
    pub list_capabilities: bool,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }

    pub fn capabilities(&self) -> Result<Capabilities, CapabilityError> {
        self.dialect.capabilities()
    }

    pub fn diagnostic_options(&self) -> DiagnosticOptions {
        DiagnosticOptions {
            style_faults_as_errors: self.style_errors,
        }
    }
}
