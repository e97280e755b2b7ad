use crate::config::Config;
use crate::matcher::{ExitCode, Matcher};
use crate::pairs::discover_pairs;
use crate::report::{Report, ReportEntry, ReportFormat};
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Sequential demo driver.
///
/// Discovers the example pairs once per run, then walks them in order: echo
/// the command line, invoke the matcher, check the exit code. The first
/// failing invocation stops the walk; its exit code becomes the run's result.
///
/// Example
/// ```no_run
/// use spacegrep_demo::{Runner, config::Config};
/// let config = Config {
///     examples_dir: "demos".into(),
///     ..Config::default()
/// };
/// let code = Runner::new(config).run().unwrap();
/// assert_eq!(code, 0);
/// ```
pub struct Runner {
    examples_dir: PathBuf,
    matcher: Matcher,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        Self {
            examples_dir: config.examples_dir,
            matcher: Matcher::new(config.matcher),
        }
    }

    /// Run the matcher over every discovered pair, echoing to stdout.
    ///
    /// Returns 0 when every invocation succeeds (including when the directory
    /// holds no pairs at all), or the exit code of the first failing
    /// invocation, leaving the remaining pairs unprocessed. Errors are
    /// reserved for the driver's own failures: an unreadable directory or a
    /// matcher that cannot be spawned.
    pub fn run(&self) -> Result<ExitCode> {
        self.run_with_echo(&mut std::io::stdout())
    }

    /// Run every pair with captured output and emit an aggregated report.
    ///
    /// Echo lines and the matcher's own diagnostics still go to stdout; the
    /// rendered report goes to `output_file` when given, stdout otherwise.
    /// Fail-fast semantics are the same as [`Runner::run`]: the first failing
    /// pair stops the walk, its code is returned, and no report is written.
    pub fn report(&self, format: ReportFormat, output_file: Option<&Path>) -> Result<ExitCode> {
        let mut stdout = std::io::stdout();
        let (report, code) = self.collect_report(&mut stdout)?;
        if code != 0 {
            return Ok(code);
        }
        let rendered = report.render(format)?;
        match output_file {
            Some(path) => fs::write(path, rendered)
                .with_context(|| format!("cannot write report to {}", path.display()))?,
            None => writeln!(stdout, "{rendered}")?,
        }
        Ok(0)
    }

    fn run_with_echo(&self, echo: &mut dyn Write) -> Result<ExitCode> {
        for pair in discover_pairs(&self.examples_dir)? {
            writeln!(echo, ">>> {}", self.matcher.command_line(&pair))?;
            // The child writes to the same streams; flush so the echoed line
            // always lands first.
            echo.flush()?;
            let code = self.matcher.invoke(&pair)?;
            if code != 0 {
                return Ok(code);
            }
        }
        Ok(0)
    }

    fn collect_report(&self, echo: &mut dyn Write) -> Result<(Report, ExitCode)> {
        let mut report = Report::default();
        for pair in discover_pairs(&self.examples_dir)? {
            writeln!(echo, ">>> {}", self.matcher.command_line(&pair))?;
            echo.flush()?;
            let captured = self.matcher.capture(&pair)?;
            if captured.code != 0 {
                writeln!(echo, "ERROR: {}", captured.code)?;
                return Ok((report, captured.code));
            }
            // The matcher's diagnostics still reach the user even though its
            // stdout is captured.
            echo.write_all(captured.stderr.as_bytes())?;
            report.push(ReportEntry::new(&pair, captured.stdout));
        }
        Ok((report, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::fs::File;
    use std::path::Path;

    fn runner(examples_dir: &Path, matcher: &Path) -> Runner {
        Runner::new(Config {
            examples_dir: examples_dir.to_owned(),
            matcher: matcher.to_owned(),
            ..Config::default()
        })
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("runner_tests_{}_{tag}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn add_pair(dir: &Path, base: &str) {
        File::create(dir.join(format!("{base}.pat"))).expect("touch pattern");
        File::create(dir.join(format!("{base}.doc"))).expect("touch doc");
    }

    #[cfg(unix)]
    fn install_script(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join("fake-spacegrep");
        fs::write(&path, format!("#!/bin/sh\n{body}")).expect("write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
        path
    }

    /// Install a stand-in matcher: appends its pattern argument ($2) to a log
    /// file, then exits with `exit_code`.
    #[cfg(unix)]
    fn fake_matcher(dir: &Path, log: &Path, exit_code: i32) -> PathBuf {
        install_script(
            dir,
            &format!("echo \"$2\" >> {}\nexit {exit_code}\n", log.display()),
        )
    }

    #[test]
    fn empty_directory_succeeds_without_invoking_anything() {
        let dir = scratch_dir("empty");
        // A missing matcher would make any invocation fail, so success here
        // proves nothing was invoked.
        let r = runner(&dir, Path::new("./definitely/not/spacegrep"));

        let mut echoed = Vec::new();
        let code = r.run_with_echo(&mut echoed).expect("run");
        assert_eq!(code, 0);
        assert!(echoed.is_empty());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn unreadable_directory_is_an_error() {
        let dir = std::env::temp_dir().join(format!("runner_tests_{}_gone", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let r = runner(&dir, Path::new("./definitely/not/spacegrep"));
        assert!(r.run_with_echo(&mut Vec::new()).is_err());
    }

    #[test]
    #[cfg(unix)]
    fn invokes_every_pair_in_base_name_order() {
        let dir = scratch_dir("order");
        add_pair(&dir, "b");
        add_pair(&dir, "a");
        let log = dir.join("invocations.log");
        let matcher = fake_matcher(&dir, &log, 0);
        let r = runner(&dir, &matcher);

        let mut echoed = Vec::new();
        let code = r.run_with_echo(&mut echoed).expect("run");
        assert_eq!(code, 0);

        let invoked = fs::read_to_string(&log).expect("log");
        let invoked: Vec<&str> = invoked.lines().collect();
        assert_eq!(
            invoked,
            [
                dir.join("a.pat").to_str().unwrap(),
                dir.join("b.pat").to_str().unwrap()
            ]
        );

        let echoed = String::from_utf8(echoed).expect("utf8");
        let lines: Vec<&str> = echoed.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            format!(
                ">>> {} -p {} -d {}",
                matcher.display(),
                dir.join("a.pat").display(),
                dir.join("a.doc").display()
            )
        );

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    #[cfg(unix)]
    fn stops_at_the_first_failing_pair() {
        let dir = scratch_dir("failfast");
        add_pair(&dir, "a");
        add_pair(&dir, "b");
        let log = dir.join("invocations.log");
        let matcher = fake_matcher(&dir, &log, 3);
        let r = runner(&dir, &matcher);

        let mut echoed = Vec::new();
        let code = r.run_with_echo(&mut echoed).expect("run");
        assert_eq!(code, 3, "run reports the failing child's exit code");

        // Only the first pair was ever invoked, but its echo line was printed.
        let invoked = fs::read_to_string(&log).expect("log");
        assert_eq!(invoked.lines().count(), 1);
        assert!(invoked.contains("a.pat"));
        let echoed = String::from_utf8(echoed).expect("utf8");
        assert_eq!(echoed.lines().count(), 1);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn missing_matcher_surfaces_as_an_error_after_the_echo() {
        let dir = scratch_dir("nomatcher");
        add_pair(&dir, "a");
        let r = runner(&dir, Path::new("./definitely/not/spacegrep"));

        let mut echoed = Vec::new();
        assert!(r.run_with_echo(&mut echoed).is_err());
        assert!(!echoed.is_empty(), "the failing pair's echo line still prints");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    #[cfg(unix)]
    fn report_captures_output_instead_of_streaming_it() {
        let dir = scratch_dir("capture");
        add_pair(&dir, "a");
        add_pair(&dir, "b");
        let matcher = install_script(&dir, "echo \"found in $4\"\necho \"diag\" >&2\nexit 0\n");
        let r = runner(&dir, &matcher);

        let mut echoed = Vec::new();
        let (report, code) = r.collect_report(&mut echoed).expect("collect");
        assert_eq!(code, 0);
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].base, "a");
        assert_eq!(
            report.entries[0].matches,
            format!("found in {}\n", dir.join("a.doc").display())
        );
        // Pattern files exist (empty), so their text is recorded.
        assert_eq!(report.entries[0].pattern.as_deref(), Some(""));

        let echoed = String::from_utf8(echoed).expect("utf8");
        assert!(echoed.contains(">>> "));
        assert!(echoed.contains("diag"), "matcher stderr is relayed");
        assert!(!echoed.contains("found in"), "matcher stdout is not streamed");

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    #[cfg(unix)]
    fn report_stops_at_the_first_failing_pair() {
        let dir = scratch_dir("reportfail");
        add_pair(&dir, "a");
        add_pair(&dir, "b");
        let log = dir.join("invocations.log");
        let matcher = fake_matcher(&dir, &log, 5);
        let r = runner(&dir, &matcher);

        let mut echoed = Vec::new();
        let (report, code) = r.collect_report(&mut echoed).expect("collect");
        assert_eq!(code, 5);
        assert!(report.entries.is_empty());
        assert_eq!(fs::read_to_string(&log).expect("log").lines().count(), 1);
        let echoed = String::from_utf8(echoed).expect("utf8");
        assert!(echoed.contains("ERROR: 5"));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    #[cfg(unix)]
    fn report_lands_in_the_output_file() {
        let dir = scratch_dir("reportfile");
        add_pair(&dir, "a");
        let matcher = install_script(&dir, "echo \"match\"\nexit 0\n");
        let r = runner(&dir, &matcher);

        let out = dir.join("report.html");
        let code = r.report(ReportFormat::Html, Some(&out)).expect("report");
        assert_eq!(code, 0);
        let html = fs::read_to_string(&out).expect("report file");
        assert!(html.ends_with("</body>"));
        assert!(html.contains("match"));

        let _ = fs::remove_dir_all(dir);
    }
}
