//! git-browse CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use git_browse::{
    AliasMap, BrowseArgs, BrowseError, GitCommand, Repository, UrlResolver, telemetry,
};
use url::Url;

fn main() -> ExitCode {
    telemetry::init();

    match run(&BrowseArgs::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &BrowseArgs) -> Result<(), BrowseError> {
    let runner = args
        .directory
        .as_ref()
        .map_or_else(GitCommand::new, GitCommand::in_dir);
    let aliases = AliasMap::load();
    let url = UrlResolver::new(Repository::new(&runner), &aliases).resolve(args)?;

    if args.no_browser {
        write_url(&url)
    } else {
        open_in_browser(&url)
    }
}

fn write_url(url: &Url) -> Result<(), BrowseError> {
    writeln!(io::stdout().lock(), "{url}").map_err(|error| BrowseError::Io {
        message: error.to_string(),
    })
}

fn open_in_browser(url: &Url) -> Result<(), BrowseError> {
    tracing::debug!(%url, "opening browser");
    open::that(url.as_str()).map_err(|error| BrowseError::Browser {
        url: url.to_string(),
        message: error.to_string(),
    })
}
