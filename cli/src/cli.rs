//! # The file finder command line interface.
//!
//! The CLI is built with the `clap` programming API. Anything required that is not on the
//! command line (or in the configuration file) is asked for on the console.

use clap::{Arg, ArgAction, ArgMatches, Command};
use rbkfind_lib::{
    prelude::*,
    finder::DEFAULT_TIMEOUT,
    prompt::{password_or_prompt, value_or_prompt},
};
use std::{io, path::PathBuf, str::FromStr};
use toolslib::logs;

mod console;
use console::ConsolePrompter;

/// The command line interface result.
pub type Result<T> = std::result::Result<T, Error>;

/// The exit code used when a host, share, or fileset cannot be found.
const NOT_FOUND_EXIT_CODE: u8 = 2;

/// The CLI error definition.
#[derive(Debug)]
pub struct Error {
    /// What went wrong.
    message: String,
    /// The process exit code.
    exit_code: u8,
}
impl Error {
    /// The exit code the process should return.
    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::from(error.as_str())
    }
}
impl From<&str> for Error {
    fn from(error: &str) -> Self {
        Error { message: format!("cli: {error}"), exit_code: 1 }
    }
}
impl From<rbkfind_lib::Error> for Error {
    fn from(error: rbkfind_lib::Error) -> Self {
        let exit_code = if error.is_not_found() { NOT_FOUND_EXIT_CODE } else { 1 };
        Error { message: error.to_string(), exit_code }
    }
}
impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error { message: format!("io: {error}"), exit_code: 1 }
    }
}
impl From<toolslib::text::Error> for Error {
    fn from(error: toolslib::text::Error) -> Self {
        Error { message: error.to_string(), exit_code: 1 }
    }
}

/// The command line definition.
pub fn get() -> Command {
    let binary_name = env!("CARGO_BIN_NAME");
    let version = env!("CARGO_PKG_VERSION");
    Command::new(binary_name)
        .about("Find files in the fileset backups of a backup appliance.")
        .version(version)
        .args(CommandLineArgs::get())
}

/// This is a mainline helper that prepares the runtime environment and runs the command.
///
/// # Arguments
///
/// * `args` holds the arguments from the parsed command line.
pub fn initialize_and_run(args: ArgMatches) -> Result<()> {
    initialize(&args);
    log::trace!("initialize_and_run Enter");
    run(&args, &mut ConsolePrompter)
}

/// Prepare the runtime environment
///
/// # Arguments
///
/// * `args` holds the arguments from the parsed command line.
fn initialize(args: &ArgMatches) {
    let cmd_args = CommandLineArgs::from(args);
    match logs::initialize(logs::LogProperties {
        level: logs::level_filter(cmd_args.debug(), cmd_args.verbosity()),
        logfile_path: cmd_args.logfile(),
        logfile_append: cmd_args.append_log(),
        file_loggers: vec!["rbkfind".to_string(), "rbkfind_lib".to_string(), "toolslib".to_string()],
        ..Default::default()
    }) {
        Ok(_) => (),
        Err(log_error) => eprintln!("Error initializing logging!!! {:?}", log_error),
    };
}

/// Gather what is needed for the search and run it.
///
/// # Arguments
///
/// * `args` holds the arguments from the parsed command line.
/// * `prompter` asks for anything that is missing.
fn run(args: &ArgMatches, prompter: &mut dyn Prompter) -> Result<()> {
    let cmd_args = CommandLineArgs::from(args);
    let config = match cmd_args.config_file() {
        Some(config_file) => Config::load(&config_file)?,
        None => Config::default(),
    };
    let settings = search_settings(&cmd_args, &config, prompter)?;
    log::debug!("{:?}", settings);
    let client = RestClient::new(settings.client)?;
    let (output, append) = (cmd_args.output(), cmd_args.append());
    find_files(&client, &settings.criteria, prompter, move || Ok(toolslib::text::get_writer(&output, append)?))?;
    Ok(())
}

/// The appliance connection and what to look for.
#[derive(Debug)]
struct SearchSettings {
    /// How to connect to the appliance.
    client: ClientSettings,
    /// What to search for and how to report it.
    criteria: FindCriteria,
}

/// Merge the command line with the configuration, prompting for whatever is still missing.
///
/// The user is asked for the user name, password, and backup target in that order.
///
/// # Arguments
///
/// * `cmd_args` holds the command line arguments.
/// * `config` holds the configuration file settings.
/// * `prompter` asks for anything that is missing.
fn search_settings(cmd_args: &CommandLineArgs, config: &Config, prompter: &mut dyn Prompter) -> Result<SearchSettings> {
    let host = cmd_args
        .host()
        .or_else(|| config.appliance.host.clone())
        .ok_or_else(|| Error::from("The appliance hostname is required."))?;
    let fields = report_fields(cmd_args.format().or_else(|| config.output.format.clone()))?;
    let delimiter = cmd_args.delimiter().or_else(|| config.output.delimiter.clone()).unwrap_or_else(|| ",".to_string());
    let (user, password) = match cmd_args.credentials() {
        Some(credentials) => (Some(credentials.user), Some(credentials.password)),
        None => (config.appliance.user.clone(), config.appliance.password.clone()),
    };
    let user = value_or_prompt(user, "User: ", prompter)?;
    let password = password_or_prompt(password, "Password: ", prompter)?;
    let target = match cmd_args.backup() {
        Some(target) => target,
        None => prompter.read_line("Backup: [host | host:share]: ")?.trim().parse::<BackupTarget>()?,
    };
    let client = ClientSettings { host, user, password, verify_certs: config.verify_certs() };
    let criteria = FindCriteria {
        target,
        fileset: cmd_args.fileset(),
        pattern: cmd_args.name(),
        fields,
        delimiter,
        selector: match cmd_args.earliest() {
            true => VersionSelector::Earliest,
            false => VersionSelector::Latest,
        },
        timeout: config.timeout().unwrap_or(DEFAULT_TIMEOUT),
    };
    Ok(SearchSettings { client, criteria })
}

/// Get the fields that will be reported.
///
/// Field names that are not known are reported and dropped. It is an error if no fields are
/// left.
///
/// # Arguments
///
/// * `format` is the comma separated list of field names, the default fields are used if `None`.
fn report_fields(format: Option<String>) -> Result<Vec<Field>> {
    let selection = validate_fields(format.as_deref().unwrap_or(DEFAULT_FIELDS));
    for rejected in &selection.rejected {
        eprintln!("Invalid field: {rejected}");
    }
    match selection.fields.is_empty() {
        true => Err(Error::from("There are no valid fields to report.")),
        false => Ok(selection.fields),
    }
}

/// A filename parser used by the CLI.
///
/// The parser is responsible for creating a `Path` from the string argument. The following
/// rudimentary checks are performed which may result in an error being returned.
///
/// * Check if the filename points to a directory.
/// * Check if the path to the file exists.
///
/// # Arguments
///
/// * `filename` - the filename as entered on the command line.
fn parse_filename(filename: &str) -> std::result::Result<PathBuf, String> {
    if filename.is_empty() {
        Err("The filename cannot be empty.".to_string())
    } else {
        let filepath = PathBuf::from(filename);
        if filepath.is_dir() {
            Err(format!("{} is a directory...", filename))
        } else {
            // "bar.txt" and "foo/bar.txt" are both relative AND have parent paths, one just happens to be empty...
            match filepath.parent() {
                Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                    Err(format!("{}: the parent directory does not exist...", filename))
                }
                _ => Ok(filepath),
            }
        }
    }
}

/// The configuration file parser, the file must exist.
///
/// # Arguments
///
/// * `filename` - the filename as entered on the command line.
fn parse_config_file(filename: &str) -> std::result::Result<PathBuf, String> {
    let filepath = parse_filename(filename)?;
    match filepath.is_file() {
        true => Ok(filepath),
        false => Err(format!("{} does not exist.", filename)),
    }
}

/// The command line arguments.
pub struct CommandLineArgs<'a>(
    /// The parsed command line arguments.
    &'a ArgMatches,
);
impl<'a> CommandLineArgs<'a> {
    /// The appliance hostname argument id.
    const HOST: &'static str = "HOST";
    /// The debug logging argument id.
    const DEBUG: &'static str = "DEBUG";
    /// The logging verbosity level argument id.
    const VERBOSITY: &'static str = "LOG_VERBOSITY";
    /// The credentials argument id.
    const CREDS: &'static str = "CREDS";
    /// The file name pattern argument id.
    const NAME: &'static str = "NAME";
    /// The backup target argument id.
    const BACKUP: &'static str = "BACKUP";
    /// The fileset name argument id.
    const FILESET: &'static str = "FILESET";
    /// The report fields argument id.
    const FORMAT: &'static str = "FORMAT";
    /// The field delimiter argument id.
    const DELIM: &'static str = "DELIM";
    /// Report the earliest file version argument id.
    const EARLIEST: &'static str = "EARLIEST";
    /// The report file argument id.
    const OUTPUT: &'static str = "OUTPUT";
    /// The append to report file argument id.
    const APPEND: &'static str = "APPEND";
    /// The log file argument id.
    const LOGFILE: &'static str = "LOGFILE";
    /// The append to log file argument id.
    const APPEND_LOG: &'static str = "APPEND_LOGFILE";
    /// The configuration file argument id.
    const CONFIG_FILE: &'static str = "CONFIG_FILE";
    /// Get the command line arguments.
    fn get() -> Vec<Arg> {
        vec![
            Arg::new(Self::HOST)
                .action(ArgAction::Set)
                .value_name("HOST")
                .help("The backup appliance hostname."),
            Arg::new(Self::DEBUG)
                .short('D')
                .long("DEBUG")
                .action(ArgAction::SetTrue)
                .help("Show debug logging."),
            Arg::new(Self::VERBOSITY)
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Logging verbosity (once=INFO, twice=DEBUG, +twice=TRACE)"),
            Arg::new(Self::CREDS)
                .short('c')
                .long("creds")
                .action(ArgAction::Set)
                .value_name("USER:PASSWORD")
                .value_parser(Credentials::from_str)
                .help("The appliance credentials (prompted for if missing)."),
            Arg::new(Self::NAME)
                .short('n')
                .long("name")
                .action(ArgAction::Set)
                .value_name("PATTERN")
                .default_value("*")
                .help("The file name pattern to search for."),
            Arg::new(Self::BACKUP)
                .short('b')
                .long("backup")
                .action(ArgAction::Set)
                .value_name("HOST[:SHARE]")
                .value_parser(BackupTarget::from_str)
                .help("The backed up host or host share (prompted for if missing)."),
            Arg::new(Self::FILESET)
                .short('f')
                .long("fileset")
                .action(ArgAction::Set)
                .value_name("NAME")
                .help("The fileset name (chosen from a list if missing)."),
            Arg::new(Self::FORMAT)
                .short('F')
                .long("format")
                .action(ArgAction::Set)
                .value_name("FIELDS")
                .help("Comma separated fields: name,size,mtime,backup,type,location (DEFAULT name,size,mtime,backup)."),
            Arg::new(Self::DELIM)
                .short('d')
                .long("delim")
                .action(ArgAction::Set)
                .value_name("DELIMITER")
                .help("The field delimiter (DEFAULT ,)."),
            Arg::new(Self::EARLIEST)
                .short('e')
                .long("earliest")
                .action(ArgAction::SetTrue)
                .help("Report the earliest file version instead of the latest."),
            Arg::new(Self::OUTPUT)
                .short('o')
                .long("output")
                .action(ArgAction::Set)
                .value_name("FILE")
                .value_parser(parse_filename)
                .help("The report filename (DEFAULT stdout)."),
            Arg::new(Self::APPEND)
                .short('A')
                .long("append")
                .requires(Self::OUTPUT)
                .action(ArgAction::SetTrue)
                .help("Append to the report file, otherwise overwrite."),
            Arg::new(Self::LOGFILE)
                .short('l')
                .long("logfile")
                .action(ArgAction::Set)
                .value_name("FILE")
                .value_parser(parse_filename)
                .help("The log filename (DEFAULT stderr)."),
            Arg::new(Self::APPEND_LOG)
                .long("append-log")
                .requires(Self::LOGFILE)
                .action(ArgAction::SetTrue)
                .help("Append to the logfile, otherwise overwrite."),
            Arg::new(Self::CONFIG_FILE)
                .long("config")
                .action(ArgAction::Set)
                .value_name("FILE")
                .value_parser(parse_config_file)
                .help("The configuration file pathname."),
        ]
    }
    /// Get the appliance hostname.
    pub fn host(&self) -> Option<String> {
        self.0.get_one::<String>(Self::HOST).cloned()
    }
    /// Get the debug logging flag.
    pub fn debug(&self) -> bool {
        self.0.get_flag(Self::DEBUG)
    }
    /// Get the logging verbosity flag.
    pub fn verbosity(&self) -> u8 {
        std::cmp::min(self.0.get_one::<u8>(Self::VERBOSITY).map_or(0, |a| *a), 3)
    }
    /// Get the appliance credentials.
    pub fn credentials(&self) -> Option<Credentials> {
        self.0.get_one::<Credentials>(Self::CREDS).cloned()
    }
    /// Get the file name pattern.
    pub fn name(&self) -> String {
        self.0.get_one::<String>(Self::NAME).map_or_else(|| "*".to_string(), |name| name.clone())
    }
    /// Get the backup target.
    pub fn backup(&self) -> Option<BackupTarget> {
        self.0.get_one::<BackupTarget>(Self::BACKUP).cloned()
    }
    /// Get the fileset name.
    pub fn fileset(&self) -> Option<String> {
        self.0.get_one::<String>(Self::FILESET).cloned()
    }
    /// Get the report fields.
    pub fn format(&self) -> Option<String> {
        self.0.get_one::<String>(Self::FORMAT).cloned()
    }
    /// Get the field delimiter.
    pub fn delimiter(&self) -> Option<String> {
        self.0.get_one::<String>(Self::DELIM).cloned()
    }
    /// Get the report the earliest version flag.
    pub fn earliest(&self) -> bool {
        self.0.get_flag(Self::EARLIEST)
    }
    /// Get the report filename.
    pub fn output(&self) -> Option<PathBuf> {
        self.0.get_one::<PathBuf>(Self::OUTPUT).cloned()
    }
    /// Get the append to report file flag.
    pub fn append(&self) -> bool {
        self.0.get_flag(Self::APPEND)
    }
    /// Get the logfile name argument.
    pub fn logfile(&self) -> Option<PathBuf> {
        self.0.get_one::<PathBuf>(Self::LOGFILE).cloned()
    }
    /// Get the flag controlling if the logfile should be appended too.
    pub fn append_log(&self) -> bool {
        self.0.get_flag(Self::APPEND_LOG)
    }
    /// Get the configuration file.
    pub fn config_file(&self) -> Option<PathBuf> {
        self.0.get_one::<PathBuf>(Self::CONFIG_FILE).cloned()
    }
}
impl<'a> From<&'a ArgMatches> for CommandLineArgs<'a> {
    fn from(args: &'a ArgMatches) -> Self {
        Self(args)
    }
}
