extern crate clap;
use clap::*;

mod cmd_schic;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let app = Command::new("schic")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`schic` - Conserved contacts across single-cell distance matrices")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_schic::bottom::make_subcommand())
        .subcommand(cmd_schic::binary::make_subcommand())
        .subcommand(cmd_schic::conserve::make_subcommand())
        .subcommand(cmd_schic::pipeline::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* Stages, in order:
    * bottom   - Keep the bottom percentile of distances in each matrix
    * binary   - Turn thresholded matrices into 0/1 indicators
    * conserve - Count, per cell location, the indicators set across files

* Pipelines:
    * pipeline - bottom, binary and conserve in one run

Progress goes to stderr; set RUST_LOG=warn to silence it.

"###,
        );

    // Check which subcommand the user ran...
    match app.get_matches().subcommand() {
        Some(("bottom", sub_matches)) => cmd_schic::bottom::execute(sub_matches),
        Some(("binary", sub_matches)) => cmd_schic::binary::execute(sub_matches),
        Some(("conserve", sub_matches)) => cmd_schic::conserve::execute(sub_matches),
        Some(("pipeline", sub_matches)) => cmd_schic::pipeline::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
