use crate::cli::SrsArgs;
use crate::output::OutputWriter;
use crate::output_types::SrsOutput;
use anyhow::Result;
use geokit_geo::load_srs;

pub fn execute(args: SrsArgs, output: &OutputWriter) -> Result<()> {
    let srs = load_srs(&args.identifier)?;

    if output.is_json() {
        output.result(SrsOutput::from(&srs))?;
    } else {
        output.success(format!("{} is a valid SRS", srs.authority()));
        output.kv("Name", &srs.name);
    }

    Ok(())
}
