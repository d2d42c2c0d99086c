/// Enum representing CLI commands
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Collect the filter, fetch the issues and write the report artifacts.
    Fetch { config: Option<String> },
    /// Collect the filter and print it without fetching any issue.
    Filter { config: Option<String> },
    Help,
    Unknown(String),
}

pub const USAGE: &str = "Usage: audit-report <command> [config-path]

Commands:
  fetch   Fetch the filtered issues and write source/report.md and source/severity_counts.conf
  filter  Print the issue filter resolved from the config and the project board
  help    Show this message

config-path defaults to .audit-report/config.json";

/// Parse command line arguments and return a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command
pub fn parse_args(args: &[String]) -> Command {
    match args.len() {
        0 | 1 => Command::Help,
        2 | 3 => {
            let config = args.get(2).cloned();
            match args[1].as_str() {
                "fetch" => Command::Fetch { config },
                "filter" => Command::Filter { config },
                "help" | "--help" | "-h" if config.is_none() => Command::Help,
                cmd => Command::Unknown(cmd.to_string()),
            }
        }
        _ => Command::Unknown(args[1..].join(" ")),
    }
}
