//! One-shot mutations and lookups against the remote tree. A path that does
//! not match (board/list/card by name) is a normal `{}` or declared
//! not-found payload, never an error.

use serde_json::{json, Value};
use tw_core::{BoardNode, CardNode, FetchError};
use tw_runner::Watcher;
use tw_source::BoardSource;

use crate::args::Args;
use crate::registry::HookContext;
use crate::HookError;

fn find_board(source: &dyn BoardSource, name: &str) -> Result<Option<BoardNode>, FetchError> {
    Ok(source.boards()?.into_iter().find(|b| b.name == name))
}

/// Walk board → list → card by name, scanning every board that shares the
/// requested name (names are not unique).
fn find_card(
    source: &dyn BoardSource,
    board: &str,
    list: &str,
    card: &str,
) -> Result<Option<CardNode>, FetchError> {
    for b in source.boards()? {
        if b.name != board {
            continue;
        }
        for l in source.lists(&b.id)? {
            if l.name != list {
                continue;
            }
            if let Some(c) = source.cards(&l.id)?.into_iter().find(|c| c.name == card) {
                return Ok(Some(c));
            }
        }
    }
    Ok(None)
}

fn card_path(args: &Args) -> Result<(String, String, String), HookError> {
    Ok((
        args.required_str("board_name")?.to_string(),
        args.required_str("listname")?.to_string(),
        args.required_str("cardname")?.to_string(),
    ))
}

/// Create one or more boards, then refresh the stored baseline so the
/// creation trigger does not fire for boards we made ourselves.
pub(crate) fn create_board(ctx: &HookContext, args: &Args) -> Result<Value, HookError> {
    let names = args.required_names("board_names")?;
    let permissions = args.optional_names("permissions")?;
    if let Some(perms) = &permissions {
        if perms.len() != names.len() {
            return Err(HookError::BadArg {
                name: "permissions".into(),
                reason: "must have one entry per board name".into(),
            });
        }
    }
    for (i, name) in names.iter().enumerate() {
        let permission = permissions.as_ref().map(|p| p[i].as_str());
        ctx.source.add_board(name, permission)?;
    }
    Watcher::new(ctx.source, ctx.store).refresh_baseline()?;
    Ok(json!({}))
}

pub(crate) fn board_exists(ctx: &HookContext, args: &Args) -> Result<Value, HookError> {
    let name = args.required_str("board_name")?;
    Ok(json!({"exists": find_board(ctx.source, name)?.is_some()}))
}

pub(crate) fn list_exists(ctx: &HookContext, args: &Args) -> Result<Value, HookError> {
    let board = args.required_str("board_name")?;
    let list = args.required_str("listname")?;
    for b in ctx.source.boards()? {
        if b.name != board {
            continue;
        }
        if ctx.source.lists(&b.id)?.iter().any(|l| l.name == list) {
            return Ok(json!({"exists": true}));
        }
    }
    Ok(json!({"exists": false}))
}

pub(crate) fn card_exists(ctx: &HookContext, args: &Args) -> Result<Value, HookError> {
    let (board, list, card) = card_path(args)?;
    let found = find_card(ctx.source, &board, &list, &card)?.is_some();
    Ok(json!({"exists": found}))
}

pub(crate) fn board_link(ctx: &HookContext, args: &Args) -> Result<Value, HookError> {
    let name = args.required_str("board_name")?;
    match find_board(ctx.source, name)? {
        Some(b) => Ok(json!({"link": ctx.source.board_url(&b.id)})),
        None => Ok(json!({"link": "notfound"})),
    }
}

pub(crate) fn card_link(ctx: &HookContext, args: &Args) -> Result<Value, HookError> {
    let (board, list, card) = card_path(args)?;
    match find_card(ctx.source, &board, &list, &card)? {
        Some(c) => Ok(json!({"link": ctx.source.card_url(&c.id)})),
        None => Ok(json!({"link": "notfound"})),
    }
}

pub(crate) fn comment_card(ctx: &HookContext, args: &Args) -> Result<Value, HookError> {
    let (board, list, card) = card_path(args)?;
    let text = args.required_str("comment_string")?;
    if let Some(c) = find_card(ctx.source, &board, &list, &card)? {
        ctx.source.add_comment(&c.id, text)?;
    }
    Ok(json!({}))
}

/// Attach a board label, found by name, to a card. Boards whose label
/// registry has no such label are skipped, matching names included.
pub(crate) fn label_card(ctx: &HookContext, args: &Args) -> Result<Value, HookError> {
    let (board, list, card) = card_path(args)?;
    let label_name = args.required_str("label_string")?;
    for b in ctx.source.boards()? {
        if b.name != board {
            continue;
        }
        let Some(label) = ctx
            .source
            .board_labels(&b.id)?
            .into_iter()
            .find(|l| l.name == label_name)
        else {
            continue;
        };
        for l in ctx.source.lists(&b.id)? {
            if l.name != list {
                continue;
            }
            if let Some(c) = ctx.source.cards(&l.id)?.into_iter().find(|c| c.name == card) {
                ctx.source.attach_label(&c.id, &label.id)?;
                return Ok(json!({}));
            }
        }
    }
    Ok(json!({}))
}

/// Label names on a card: scalar for exactly one, list otherwise; `{}` when
/// the card is not found.
pub(crate) fn card_labels(ctx: &HookContext, args: &Args) -> Result<Value, HookError> {
    let (board, list, card) = card_path(args)?;
    match find_card(ctx.source, &board, &list, &card)? {
        Some(c) => {
            let names: Vec<String> =
                ctx.source.card_labels(&c.id)?.into_iter().map(|l| l.name).collect();
            let labels = if names.len() == 1 { json!(names[0]) } else { json!(names) };
            Ok(json!({"labels": labels}))
        }
        None => Ok(json!({})),
    }
}

pub(crate) fn create_label(ctx: &HookContext, args: &Args) -> Result<Value, HookError> {
    let board = args.required_str("board_name")?;
    let color = args.required_str("color")?;
    let name = args.required_str("name")?;
    if let Some(b) = find_board(ctx.source, board)? {
        ctx.source.add_label(&b.id, name, color)?;
    }
    Ok(json!({}))
}

pub(crate) fn add_checklist(ctx: &HookContext, args: &Args) -> Result<Value, HookError> {
    let (board, list, card) = card_path(args)?;
    let checklist = args.required_str("checklist")?;
    if let Some(c) = find_card(ctx.source, &board, &list, &card)? {
        ctx.source.add_checklist(&c.id, checklist)?;
    }
    Ok(json!({}))
}

/// Apply `op` to every checklist on the card whose name matches.
fn for_matching_checklists(
    ctx: &HookContext,
    args: &Args,
    op: impl Fn(&dyn BoardSource, &str) -> Result<(), FetchError>,
) -> Result<Value, HookError> {
    let (board, list, card) = card_path(args)?;
    let checklist = args.required_str("checklist")?;
    if let Some(c) = find_card(ctx.source, &board, &list, &card)? {
        for cl in ctx.source.card_checklists(&c.id)? {
            if cl.name == checklist {
                op(ctx.source, &cl.id)?;
            }
        }
    }
    Ok(json!({}))
}

pub(crate) fn add_checklist_item(ctx: &HookContext, args: &Args) -> Result<Value, HookError> {
    let item = args.required_str("item")?.to_string();
    let checked = args.optional_bool("checked")?.unwrap_or(false);
    for_matching_checklists(ctx, args, |source, checklist_id| {
        source.add_checklist_item(checklist_id, &item, checked)
    })
}

pub(crate) fn set_checklist_item(ctx: &HookContext, args: &Args) -> Result<Value, HookError> {
    let item = args.required_str("item")?.to_string();
    let on = args.optional_bool("onoff")?.unwrap_or(true);
    for_matching_checklists(ctx, args, |source, checklist_id| {
        source.set_checklist_item(checklist_id, &item, on)
    })
}

pub(crate) fn remove_checklist_item(
    ctx: &HookContext,
    args: &Args,
) -> Result<Value, HookError> {
    let item = args.required_str("item")?.to_string();
    for_matching_checklists(ctx, args, |source, checklist_id| {
        source.remove_checklist_item(checklist_id, &item)
    })
}
