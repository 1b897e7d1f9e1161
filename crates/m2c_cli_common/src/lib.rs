#![doc = include_str!("../README.md")]

use clap::{value_parser, ArgAction, Args};
use m2c_capabilities::{Capabilities, Capability, CapabilityError, Dialect};

/// Common way to set logging levels
#[derive(Debug, Clone, Copy, Args)]
pub struct LoggingArgs {
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action = ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used
    #[cfg(feature = "tracing")]
    pub fn log_level_filter(&self) -> tracing::level_filters::LevelFilter {
        use tracing::level_filters::LevelFilter;
        let sum = self.verbose as i8 - self.quiet as i8;
        match sum.clamp(-2, 2) {
            -2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

/// Selects the language dialect and individual capabilities
#[derive(Debug, Clone, Args)]
pub struct DialectArgs {
    /// The dialect whose capability preset is used
    #[clap(long, default_value = "pim4", value_name = "pim3|pim4|ext", value_parser = Dialect::from_name)]
    dialect: Dialect,
    /// Enables a capability on top of the dialect preset
    #[clap(long = "enable", value_name = "capability", value_parser = Capability::from_name)]
    enable: Vec<Capability>,
    /// Disables a capability on top of the dialect preset
    #[clap(long = "disable", value_name = "capability", value_parser = Capability::from_name)]
    disable: Vec<Capability>,
}

impl DialectArgs {
    /// The dialect selected with `--dialect`
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Builds the capabilities of the selected dialect with every requested
    /// change applied, enables before disables.
    pub fn capabilities(&self) -> Result<Capabilities, CapabilityError> {
        let builder = Capabilities::builder().dialect(self.dialect);
        let builder = self
            .enable
            .iter()
            .fold(builder, |builder, capability| builder.enable(*capability));
        self.disable
            .iter()
            .fold(builder, |builder, capability| builder.disable(*capability))
            .build()
    }
}
