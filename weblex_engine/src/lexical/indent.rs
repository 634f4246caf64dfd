//! Indentation tracking for indentation-sensitive tables
//!
//! `indentation` runs on the leading whitespace of every line and chooses the state for the
//! rest of the line. `starts_block` marks a construct whose deeper-indented continuation
//! lines belong to a block state.

use super::rule::{callback, Action};
use crate::tokens::Category;

/// Aux key holding the indentation of the most recent line
pub const LAST_INDENTATION: &str = "last_indentation";
/// Aux key holding the indentation of the line that opened the current block
pub const BLOCK_INDENTATION: &str = "block_indentation";
/// Aux key holding the state continuation lines of the current block enter
pub const BLOCK_STATE: &str = "block_state";

/// True when `indent` lies strictly deeper than `block`, sharing its prefix
pub fn enters_block(indent: &str, block: &str) -> bool {
    indent.starts_with(block) && indent != block
}

/// Callback for a rule matching a line's leading whitespace
///
/// Emits the whitespace as `Text`, remembers it, then pushes the pending block state when
/// the line is deeper than the block opener, or `content_state` otherwise.
pub fn indentation(content_state: &str) -> Action {
    let content_state = content_state.to_string();

    callback(move |found, ctx| {
        let indent = found.as_str();
        ctx.emit(found.end(), Category::Text);
        ctx.aux_mut().set_text(LAST_INDENTATION, indent);

        let block_state = match (ctx.aux().text(BLOCK_STATE), ctx.aux().text(BLOCK_INDENTATION)) {
            (Some(state), Some(block)) if enters_block(indent, block) => Some(state.to_string()),
            _ => None,
        };

        match block_state {
            Some(state) => {
                ctx.push_state(&state);
            }
            None => {
                ctx.aux_mut().remove(BLOCK_STATE);
                ctx.aux_mut().remove(BLOCK_INDENTATION);
                ctx.push_state(&content_state);
            }
        }
    })
}

/// Callback for a rule that opens a block: emits the match as `category` and arms `state`
/// for following lines indented deeper than the current one
pub fn starts_block(category: Category, state: &str) -> Action {
    let state = state.to_string();

    callback(move |found, ctx| {
        ctx.emit(found.end(), category);

        let block = ctx.aux().text(LAST_INDENTATION).unwrap_or_default().to_string();
        ctx.aux_mut().set_text(BLOCK_INDENTATION, &block);
        ctx.aux_mut().set_text(BLOCK_STATE, &state);
    })
}
