use std::ffi::OsString;

pub use clap::Parser;

use crate::config::DEFAULT_PROFILE_NAME;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Section of the profile file to read settings from. Default is 'default'.
    /// A profile that is not configured falls back to built-in settings.
    #[clap(short = 'p', long, default_value = DEFAULT_PROFILE_NAME, help = "profile name")]
    profile: String,

    #[clap(short = 'v', long, help = "verbose logging")]
    verbose: bool,

    /// Route to open after the movies are loaded, overriding the profile's start_route
    #[clap(short = 's', long, value_name = "FRAGMENT", help = "route to open first, e.g. movies/2")]
    start: Option<String>,

    #[clap(
        long,
        num_args = 1..,
        value_name = "FLIGHT",
        help = "run the control tower demo for these flights and exit"
    )]
    tower: Option<Vec<u32>>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    verbose: bool,
    start: Option<String>,
    tower: Option<Vec<u32>>,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            verbose: args.verbose,
            start: args.start,
            tower: args.tower,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    /// Flights to clear in the tower demo, when it was requested
    pub fn tower(&self) -> Option<&[u32]> {
        self.tower.as_deref()
    }
}
