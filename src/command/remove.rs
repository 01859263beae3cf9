use anyhow::bail;
use log::debug;

use crate::{
    branch::{Upstream, abandoned_commit, current_branch, default_branch, restore_hint, upstream},
    cli::RemoveArgs,
    console::Console,
    ctx::Ctx,
    error::{Maybe, abort},
    git::Git,
    print::{show_error, show_git_output, show_hint, show_info, show_warning},
    remote::{TIMEOUT_STATUS, delete_remote_branch, manual_delete_command, parse_remote_ref},
};

pub async fn remove_command<G: Git, C: Console>(ctx: &Ctx<G, C>, args: &RemoveArgs) -> Maybe<i32> {
    let current = current_branch(ctx).await?;
    let default = default_branch(ctx).await?;

    let target = match (&args.name, &current) {
        (Some(name), _) => name.clone(),
        (None, Some(current)) => current.clone(),
        (None, None) => bail!("HEAD is detached; name the branch to delete."),
    };
    debug!("Removing {target} (current: {current:?}, default: {default})");

    if target == default {
        show_warning(ctx, &format!("Refusing to delete the default branch '{default}'."));
        return Ok(1);
    }

    if current.as_deref() == Some(target.as_str()) {
        let replacement = choose_replacement(ctx, &target, &default)?;
        let checkout = ctx.git.run(&["checkout", replacement.as_str()]).await?;
        show_git_output(ctx, &checkout.stderr);
        if !checkout.success() {
            show_error(ctx, &format!("Could not switch to '{replacement}'; nothing was deleted."));
            return Ok(checkout.code());
        }
    }

    // Must be read before the branch (and its config section) is gone.
    let tracked = upstream(ctx, &target).await?;

    let deleted = ctx.git.run(&["branch", "-D", target.as_str()]).await?;
    if !deleted.success() {
        show_git_output(ctx, &deleted.stderr);
        return Ok(deleted.code());
    }
    show_info(ctx, &format!("Deleted local branch '{target}'."));
    if let Some(hash) = abandoned_commit(&deleted.stdout) {
        show_hint(ctx, &format!("To restore it: {}", restore_hint(&target, hash)));
    }

    let tracked = match tracked {
        Some(tracked) if args.local_only => {
            show_info(
                ctx,
                &format!("Kept remote branch '{}/{}'.", tracked.remote, tracked.short_ref()),
            );
            return Ok(0);
        }
        Some(tracked) => tracked,
        None if args.ask_remote => match ask_remote_ref(ctx)? {
            Some(tracked) => tracked,
            None => return Ok(0),
        },
        None => {
            show_info(ctx, &format!("'{target}' has no remote upstream; no remote branch to delete."));
            return Ok(0);
        }
    };

    if tracked.short_ref() == default {
        show_warning(
            ctx,
            &format!(
                "'{target}' tracks the default branch; leaving '{}/{default}' in place.",
                tracked.remote
            ),
        );
        return Ok(0);
    }

    remove_remote(ctx, &tracked).await
}

fn choose_replacement<G, C: Console>(ctx: &Ctx<G, C>, target: &str, default: &str) -> Maybe<String> {
    let question = format!("'{target}' is checked out. Switch to which branch first? [{default}]");
    let Some(answer) = ctx.console.ask(&question)? else {
        return abort("no branch to switch to");
    };

    let choice = if answer.is_empty() { default } else { answer.as_str() };
    if choice == target {
        return abort(format!("cannot stay on '{target}' while deleting it"));
    }
    Ok(choice.to_string())
}

fn ask_remote_ref<G, C: Console>(ctx: &Ctx<G, C>) -> Maybe<Option<Upstream>> {
    let answer = ctx
        .console
        .ask("No upstream configured. Remote branch to delete (<remote>/<branch>, empty to skip):")?;
    Ok(answer.as_deref().and_then(parse_remote_ref))
}

async fn remove_remote<G: Git, C: Console>(ctx: &Ctx<G, C>, tracked: &Upstream) -> Maybe<i32> {
    show_info(
        ctx,
        &format!(
            "Deleting remote branch '{}' on '{}'...",
            tracked.short_ref(),
            tracked.remote
        ),
    );

    let Some(pushed) = delete_remote_branch(ctx, tracked).await? else {
        show_warning(
            ctx,
            &format!(
                "Timed out after {}s. Retry with:\n  {}",
                ctx.settings.push_timeout.as_secs(),
                manual_delete_command(tracked)
            ),
        );
        return Ok(TIMEOUT_STATUS);
    };

    show_git_output(ctx, &pushed.stderr);
    Ok(pushed.code())
}
