use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitemapper")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitemapper")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress configuration output and the progress spinner").required(false))
        .subcommand_required(true)
        .subcommand(
            command!("map")
                .about(
                    "Recursively crawls a website from a base URL and builds a textual site \
                map of every page, static resource and external link discovered.",
                )
                .arg(
                    arg!([URL])
                        .required(true)
                        .help("The base URL to start crawling from (http:// is assumed if no scheme is given)"),
                )
                .arg(
                    arg!(-d --"depth" <DEPTH>)
                        .required(false)
                        .help("Maximum traversal depth below the base page")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("1"),
                )
                .arg(
                    arg!(-t --"timeout" <MILLIS>)
                        .required(false)
                        .help("Per-page fetch timeout in milliseconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("1000"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Write the site map to a file (default: print to stdout)"),
                ),
        )
}
