use log::debug;

use crate::{
    branch::Upstream,
    ctx::Ctx,
    error::Maybe,
    git::{CommandResult, Git},
};

/// Reported when the remote deletion runs out of time.
pub const TIMEOUT_STATUS: i32 = 124;

pub fn delete_args(upstream: &Upstream) -> [&str; 4] {
    ["push", upstream.remote.as_str(), "--delete", upstream.merge.as_str()]
}

/// Command the user can run by hand if we gave up on the remote.
pub fn manual_delete_command(upstream: &Upstream) -> String {
    format!("git {}", delete_args(upstream).join(" "))
}

/// Deletes the upstream ref on its remote. git also drops the matching
/// remote-tracking ref. `Ok(None)` means the push timed out.
pub async fn delete_remote_branch<G: Git, P>(
    ctx: &Ctx<G, P>,
    upstream: &Upstream,
) -> Maybe<Option<CommandResult>> {
    let limit = ctx.settings.push_timeout;
    debug!(
        "Deleting {} on {} (timeout {}s)",
        upstream.merge,
        upstream.remote,
        limit.as_secs()
    );
    ctx.git
        .run_with_timeout(&delete_args(upstream), limit)
        .await
}

/// Reads `remote/ref` as typed by the user. A bare ref goes to `origin`.
/// The local repository (`.`) is never a deletion target.
pub fn parse_remote_ref(input: &str) -> Option<Upstream> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let (remote, merge) = match input.split_once('/') {
        Some((remote, merge)) if !remote.is_empty() && !merge.is_empty() => (remote, merge),
        _ => ("origin", input),
    };
    let upstream = Upstream {
        remote: remote.to_string(),
        merge: merge.to_string(),
    };
    if upstream.is_local() {
        return None;
    }
    Some(upstream)
}
