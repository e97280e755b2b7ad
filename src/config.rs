use crate::report::ReportFormat;
use anyhow::{Result, bail};
use argh::FromArgs;
use std::path::PathBuf;

/// Run a pre-built spacegrep binary over every pattern/document pair found in
/// an examples directory, echoing each command line before it runs. With
/// --json or --html the matcher's output is captured into a report instead of
/// streaming through.
#[derive(FromArgs, Debug)]
pub struct Config {
    /// directory holding `<base>.pat`/`<base>.doc` pairs
    #[argh(option, short = 'e', default = "PathBuf::from(\"examples\")")]
    pub examples_dir: PathBuf,

    /// path to the spacegrep executable
    #[argh(option, short = 'm', default = "PathBuf::from(\"./bin/spacegrep\")")]
    pub matcher: PathBuf,

    /// capture matcher output into a JSON report
    #[argh(switch, short = 'j')]
    pub json: bool,

    /// capture matcher output into an HTML report
    #[argh(switch, short = 't')]
    pub html: bool,

    /// write the report to this file instead of stdout
    #[argh(option, short = 'o')]
    pub output_file: Option<PathBuf>,
}

impl Config {
    /// Which report format was requested, if any.
    ///
    /// `--json` and `--html` are mutually exclusive, and `--output-file` only
    /// makes sense when one of them is given. `None` selects the default
    /// pass-through mode.
    pub fn report_format(&self) -> Result<Option<ReportFormat>> {
        match (self.json, self.html) {
            (true, true) => bail!("--json and --html are mutually exclusive"),
            (true, false) => Ok(Some(ReportFormat::Json)),
            (false, true) => Ok(Some(ReportFormat::Html)),
            (false, false) => {
                if self.output_file.is_some() {
                    bail!("--output-file requires --json or --html");
                }
                Ok(None)
            }
        }
    }
}

impl Default for Config {
    /// The original demo layout: `examples/` next to `./bin/spacegrep`,
    /// pass-through output.
    fn default() -> Self {
        Self {
            examples_dir: PathBuf::from("examples"),
            matcher: PathBuf::from("./bin/spacegrep"),
            json: false,
            html: false,
            output_file: None,
        }
    }
}
