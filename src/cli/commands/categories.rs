use crate::cli::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;

/// Execute categories command
pub fn execute(format: OutputFormat) -> Result<()> {
    let output = Formatter::new(format).format_categories()?;
    println!("{}", output);
    Ok(())
}
