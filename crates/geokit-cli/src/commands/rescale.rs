use crate::cli::RescaleArgs;
use crate::grid_io::{read_grid, to_rows, write_grid};
use crate::output::OutputWriter;
use crate::output_types::RescaleOutput;
use anyhow::{Context, Result};
use geokit_core::config::LayeredConfig;
use geokit_grid::{RescaleMode, ScaleFactor, Strictness};

pub fn execute(args: RescaleArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let scale: ScaleFactor = args
        .scale
        .parse()
        .with_context(|| format!("Invalid scale '{}'", args.scale))?;
    let mode = scale.mode()?;
    let strictness = Strictness::from(config.strict_rescale.value);

    let grid = read_grid(&args.input)?;
    let input_shape = grid.dim();
    tracing::info!(
        "Rescaling {}x{} grid from {} by {}",
        input_shape.0,
        input_shape.1,
        args.input.display(),
        scale
    );

    let rescaled = geokit_grid::rescale(&grid, scale, strictness)?.into_f64();
    let output_shape = rescaled.dim();

    if let Some(path) = &args.output {
        write_grid(path, &rescaled)?;
    }

    let mode_name = match mode {
        RescaleMode::NoOp => "no-op",
        RescaleMode::Upscale { .. } => "upscale",
        RescaleMode::Downscale { .. } => "downscale",
    };

    if output.is_json() {
        output.result(RescaleOutput {
            scale: [scale.y, scale.x],
            mode: mode_name.to_string(),
            strict: strictness.is_strict(),
            input_shape: [input_shape.0, input_shape.1],
            output_shape: [output_shape.0, output_shape.1],
            grid: to_rows(&rescaled),
            written_to: args.output.as_ref().map(|p| p.display().to_string()),
        })?;
    } else {
        output.success(format!(
            "{} {}x{} -> {}x{}",
            mode_name, input_shape.0, input_shape.1, output_shape.0, output_shape.1
        ));
        if matches!(mode, RescaleMode::Downscale { .. }) && !strictness.is_strict() {
            output.kv("Edges", "padded and corrected");
        }
        output.grid(&rescaled);
        if let Some(path) = &args.output {
            output.info(format!("Written to {}", path.display()));
        }
    }

    Ok(())
}
