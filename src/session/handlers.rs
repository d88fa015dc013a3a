//! Stock command handlers

use std::io::{BufRead, Write};
use tracing::debug;

use super::dispatch::HandlerContext;
use super::Outcome;
use crate::error::GameResult;
use crate::protocol::{AxisUpdate, ButtonUpdate};

/// Print the menu script followed by `finish`
pub fn build_menu<R: BufRead, O: Write, D: Write>(ctx: &mut HandlerContext<'_, R, O, D>) -> GameResult<Outcome> {
    for line in ctx.content.menu.encode_lines() {
        ctx.channels.respond(&line)?;
    }
    Ok(Outcome::Continue)
}

pub fn build_room<R: BufRead, O: Write, D: Write>(ctx: &mut HandlerContext<'_, R, O, D>) -> GameResult<Outcome> {
    ctx.channels.respond(&ctx.content.room.encode())?;
    Ok(Outcome::Continue)
}

pub fn fill_objects<R: BufRead, O: Write, D: Write>(ctx: &mut HandlerContext<'_, R, O, D>) -> GameResult<Outcome> {
    ctx.channels.respond(&ctx.content.objects_line())?;
    Ok(Outcome::Continue)
}

pub fn set_background<R: BufRead, O: Write, D: Write>(ctx: &mut HandlerContext<'_, R, O, D>) -> GameResult<Outcome> {
    ctx.channels.respond(&ctx.content.background.encode())?;
    Ok(Outcome::Continue)
}

pub fn update_axis<R: BufRead, O: Write, D: Write>(ctx: &mut HandlerContext<'_, R, O, D>) -> GameResult<Outcome> {
    let update = AxisUpdate::read_from(ctx.cursor)?;
    debug!(controller = update.controller, x = update.x, y = update.y, "axis updated");

    ctx.channels.diagnose(&format!("{}: {}", ctx.command, update))?;
    Ok(Outcome::Continue)
}

pub fn update_button<R: BufRead, O: Write, D: Write>(ctx: &mut HandlerContext<'_, R, O, D>) -> GameResult<Outcome> {
    let update = ButtonUpdate::read_from(ctx.cursor)?;
    debug!(
        controller = update.controller,
        button = update.button,
        state = update.state,
        "button updated"
    );

    ctx.channels.diagnose(&format!("{}: {}", ctx.command, update))?;
    Ok(Outcome::Continue)
}

/// Ends the session without writing anything
pub fn exit<R: BufRead, O: Write, D: Write>(_ctx: &mut HandlerContext<'_, R, O, D>) -> GameResult<Outcome> {
    Ok(Outcome::Stop)
}

/// Recognized command the game has no answer for; handled like an unknown one
pub fn unsupported<R: BufRead, O: Write, D: Write>(ctx: &mut HandlerContext<'_, R, O, D>) -> GameResult<Outcome> {
    ctx.channels
        .diagnose(&format!("Unsupported command '{}'", ctx.command))?;
    Ok(Outcome::UnknownCommand(ctx.command.name().to_string()))
}
