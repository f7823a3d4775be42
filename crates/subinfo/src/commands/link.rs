//! `subinfo link`: the importable subscription link.

use serde::Serialize;

use subinfo_core::PanelView;
use subinfo_core::view::shadowrocket_link;

use crate::cli::{GlobalOpts, LinkArgs};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct LinkOutput {
    link: String,
}

pub fn handle(view: &PanelView, args: &LinkArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let link = if args.shadowrocket {
        shadowrocket_link(&view.subscription_link)
    } else {
        view.subscription_link.clone()
    };

    let data = LinkOutput { link };
    let out = output::render_single(&global.output, &data, |d| d.link.clone(), |d| d.link.clone())?;
    output::print_output(&out, global.quiet);
    Ok(())
}
