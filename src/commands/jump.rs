//! Jump to a frecently used directory via zoxide

use super::{CommandContext, Invocation};
use crate::Result;
use crate::adapter::{self, PickRequest};
use crate::config::NavpickConfig;
use crate::host::Host;
use crate::picker::PickerSpec;
use crate::search::{SearchSpec, SearchTool};

/// Build the `jump` request
///
/// zoxide already ranks its entries, so the picker keeps input order.
/// Positional keywords are passed on to `zoxide query`.
#[must_use]
pub fn request(config: &NavpickConfig, invocation: &Invocation) -> PickRequest {
    let spec = SearchSpec::new(SearchTool::Zoxide)
        .with_dirs_only(true)
        .with_extra_args(invocation.args.iter().cloned());
    let picker = PickerSpec::new(config.finder.as_str()).with_no_sort(true);
    PickRequest::search(spec, picker)
}

/// Execute the jump command
///
/// # Errors
///
/// Never fails; pipeline errors are reported as notices on the host.
pub fn execute(host: &mut dyn Host, ctx: &CommandContext<'_>, invocation: &Invocation) -> Result<()> {
    let request = request(ctx.config, invocation);
    adapter::invoke_picker(host, ctx.runner, &request);
    Ok(())
}
