use std::collections::BTreeSet;

use serde_json::Value;
use tw_runner::Watcher;

use crate::args::Args;
use crate::registry::HookContext;
use crate::HookError;

/// Prelaunch: seed the baseline so later trigger checks have something to
/// compare against. No payload.
pub(crate) fn record_starting_state(
    ctx: &HookContext,
    _args: &Args,
) -> Result<Value, HookError> {
    Watcher::new(ctx.source, ctx.store).prelaunch()?;
    Ok(Value::Null)
}

/// Fires when any new board appears.
pub(crate) fn board_created(ctx: &HookContext, _args: &Args) -> Result<Value, HookError> {
    let result = Watcher::new(ctx.source, ctx.store).reconcile(None)?;
    Ok(result.to_payload())
}

/// Fires when one of the named boards appears. Same algorithm as
/// [`board_created`], with a name filter.
pub(crate) fn specific_board_created(
    ctx: &HookContext,
    args: &Args,
) -> Result<Value, HookError> {
    let filter: BTreeSet<String> =
        args.required_names("board_name")?.into_iter().collect();
    let result = Watcher::new(ctx.source, ctx.store).reconcile(Some(&filter))?;
    Ok(result.to_payload())
}
