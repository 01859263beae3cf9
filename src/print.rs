use crate::{console::Console, ctx::Ctx};

const RESET: &str = "\x1b[0m";
const FG_ORANGE: &str = "\x1b[38;5;214m";
const FG_RED: &str = "\x1b[31m";
const FG_GREEN: &str = "\x1b[32m";
const FG_CYAN: &str = "\x1b[36m";

fn show<G, C: Console>(ctx: &Ctx<G, C>, color: &str, message: &str) {
    if ctx.color_enabled() {
        ctx.console.tell(&format!("{color}{message}{RESET}"));
    } else {
        ctx.console.tell(message);
    }
}

pub fn show_info<G, C: Console>(ctx: &Ctx<G, C>, message: &str) {
    show(ctx, FG_GREEN, message);
}

pub fn show_hint<G, C: Console>(ctx: &Ctx<G, C>, message: &str) {
    show(ctx, FG_CYAN, message);
}

pub fn show_warning<G, C: Console>(ctx: &Ctx<G, C>, message: &str) {
    show(ctx, FG_ORANGE, message);
}

pub fn show_error<G, C: Console>(ctx: &Ctx<G, C>, message: &str) {
    show(ctx, FG_RED, message);
}

/// Passes git's own output through untouched.
pub fn show_git_output<G, C: Console>(ctx: &Ctx<G, C>, text: &str) {
    let text = text.trim_end_matches('\n');
    if !text.is_empty() {
        ctx.console.tell(text);
    }
}
