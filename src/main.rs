use spacegrep_demo::Runner;
use spacegrep_demo::config::Config;

fn main() -> anyhow::Result<()> {
    let config: Config = argh::from_env();
    let format = config.report_format()?;
    let output_file = config.output_file.clone();
    let runner = Runner::new(config);
    let code = match format {
        Some(format) => runner.report(format, output_file.as_deref())?,
        None => runner.run()?,
    };
    if code != 0 {
        // Exit with the failing matcher's own code.
        std::process::exit(code);
    }
    Ok(())
}
