use std::fs;

use crate::api::types::AnalysisResponse;
use crate::cli::args::RenderArgs;
use crate::cli::OutputFormat;
use crate::error::{HukukError, Result};
use crate::output;
use crate::render::{render_analysis, MemorySurface, RenderContext};

/// Execute render command
pub fn execute(args: RenderArgs, format: OutputFormat) -> Result<()> {
    let contents = fs::read_to_string(&args.file)?;
    let response: AnalysisResponse = serde_json::from_str(&contents)
        .map_err(|e| HukukError::Parse(format!("{}: {}", args.file.display(), e)))?;

    let mut surface = MemorySurface::new();
    let context = RenderContext {
        category: args.category,
        description: args.description,
    };
    render_analysis(&mut surface, &response, &context);

    println!("{}", output::format_surface(&surface, format, None)?);
    Ok(())
}
