mod cli;
mod commands;
mod logging;

use cli::{CheckParams, HighlightParams, TokensParams, TreeParams, build_cli};

fn main() {
    logging::init();
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("tokens", m)) => {
            let params = TokensParams::from_matches(m);
            commands::tokens::run(params.into());
        }
        Some(("tree", m)) => {
            let params = TreeParams::from_matches(m);
            commands::tree::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("highlight", m)) => {
            let params = HighlightParams::from_matches(m);
            commands::highlight::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
