use std::env;
use std::path::PathBuf;
use std::process;

use capsule_parser::{SemesterCode, DEFAULT_FILE_NAME};
use getopts::{Matches, Options};

#[derive(Debug)]
pub struct Args {
    pub file_name: PathBuf,
    pub description: bool,
    pub semester: Option<SemesterCode>,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "f",
        "file-name",
        "File name in which to put the schedule [Default: schedule.csv]",
        "FILE",
    );
    opts.optflag(
        "d",
        "description",
        "Add the class type and teachers as a description to each event",
    );
    opts.optopt(
        "s",
        "semester",
        "Semester to export, e.g. \"2016 Hiver\" [Default: most recent]",
        "YEAR SEASON",
    );
    opts
}

impl Args {
    fn from_matches(matches: &Matches) -> Result<Self, String> {
        let file_name = matches
            .opt_str("file-name")
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());

        if file_name.trim().is_empty() {
            return Err("Provided value for option 'file-name' is empty".into());
        }

        // `-s 2016 Hiver` leaves the season as a free argument
        let semester = match (matches.opt_str("semester"), matches.free.as_slice()) {
            (None, []) => None,
            (None, [first, ..]) => return Err(format!("Unexpected argument '{first}'")),
            (Some(semester), rest) => {
                let raw = std::iter::once(semester.as_str())
                    .chain(rest.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ");

                match raw.parse::<SemesterCode>() {
                    Ok(semester) => Some(semester),
                    Err(err) => {
                        return Err(format!("Provided value for option 'semester' is invalid: {err}"))
                    }
                }
            }
        };

        Ok(Args {
            file_name: PathBuf::from(file_name),
            description: matches.opt_present("description"),
            semester,
        })
    }
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
        process::exit(0);
    }

    match Args::from_matches(&matches) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
