use std::{collections::HashMap, sync::LazyLock};

use anyhow::bail;
use log::debug;
use regex::Regex;

use crate::{
    ctx::Ctx,
    error::{Maybe, config_error},
    git::Git,
};

/// Remote name git records for an upstream in the same repository.
pub const LOCAL_REMOTE: &str = ".";

/// Probed in order when no default branch is configured.
const CONVENTIONAL_DEFAULTS: [&str; 2] = ["master", "main"];

static ABANDONED_COMMIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(was ([0-9a-fA-F]+)\)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    pub remote: String,
    pub merge: String,
}

impl Upstream {
    /// `remote = .` marks a branch that tracks another local branch.
    pub fn is_local(&self) -> bool {
        self.remote == LOCAL_REMOTE
    }

    /// The remote ref without its `refs/heads/` prefix.
    pub fn short_ref(&self) -> &str {
        self.merge
            .strip_prefix("refs/heads/")
            .unwrap_or(&self.merge)
    }
}

pub async fn local_branch_exists<G: Git, P>(ctx: &Ctx<G, P>, branch: &str) -> Maybe<bool> {
    let refname = format!("refs/heads/{branch}");
    let result = ctx
        .git
        .run(&["rev-parse", "--verify", "--quiet", refname.as_str()])
        .await?;
    Ok(result.success())
}

pub async fn default_branch<G: Git, P>(ctx: &Ctx<G, P>) -> Maybe<String> {
    let key = ctx.settings.default_branch_key.as_str();
    let configured = ctx.git.run(&["config", "--get", key]).await?;
    if configured.success() {
        let name = configured.stdout.trim();
        if !name.is_empty() {
            debug!("Default branch from {key}: {name}");
            return Ok(name.to_string());
        }
    }

    for candidate in CONVENTIONAL_DEFAULTS {
        if local_branch_exists(ctx, candidate).await? {
            debug!("Default branch by convention: {candidate}");
            return Ok(candidate.to_string());
        }
    }

    config_error(format!(
        "Could not determine the default branch: {key} is unset and neither {} exists. \
         Set it with `git config {key} <branch>`.",
        CONVENTIONAL_DEFAULTS.join(" nor ")
    ))
}

/// Name of the checked out branch, or `None` on a detached HEAD.
pub async fn current_branch<G: Git, P>(ctx: &Ctx<G, P>) -> Maybe<Option<String>> {
    let result = ctx.git.run(&["rev-parse", "--abbrev-ref", "HEAD"]).await?;
    if !result.success() {
        bail!(
            "Could not determine the current branch: {}",
            result.stderr.trim()
        );
    }
    let name = result.stdout.trim();
    if name == "HEAD" {
        return Ok(None);
    }
    Ok(Some(name.to_string()))
}

pub async fn upstream<G: Git, P>(ctx: &Ctx<G, P>, branch: &str) -> Maybe<Option<Upstream>> {
    let pattern = format!("^branch\\.{}\\.", escape_ere(branch));
    let result = ctx.git.run(&["config", "--get-regexp", pattern.as_str()]).await?;
    if !result.success() {
        // git config exits 1 when nothing matches
        return Ok(None);
    }
    Ok(parse_upstream(branch, &result.stdout))
}

/// Reads `branch.<name>.<key> <value>` lines as printed by `git config --get-regexp`.
/// An upstream on another local branch is not a remote upstream and yields `None`.
///
/// # Panics
///
/// If a key appears twice. The config store never lists one key twice for
/// the branch section we query.
pub fn parse_upstream(branch: &str, text: &str) -> Option<Upstream> {
    let prefix = format!("branch.{branch}.");
    let mut entries: HashMap<&str, &str> = HashMap::new();

    for line in text.lines() {
        let (key, value) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let Some(key) = key.strip_prefix(&prefix) else {
            continue;
        };
        let previous = entries.insert(key, value.trim());
        assert!(
            previous.is_none(),
            "config key {prefix}{key} listed more than once"
        );
    }

    let (Some(remote), Some(merge)) = (entries.get("remote"), entries.get("merge")) else {
        return None;
    };
    let upstream = Upstream {
        remote: (*remote).to_string(),
        merge: (*merge).to_string(),
    };
    if upstream.remote.is_empty() || upstream.merge.is_empty() || upstream.is_local() {
        return None;
    }
    Some(upstream)
}

/// Commit hash from `git branch -D` output, e.g. `Deleted branch x (was a1b2c3d).`
pub fn abandoned_commit(text: &str) -> Option<&str> {
    ABANDONED_COMMIT
        .captures(text)
        .and_then(|c| c.get(1))
        .as_ref()
        .map(regex::Match::as_str)
}

pub fn restore_hint(branch: &str, hash: &str) -> String {
    format!("git branch {branch} {hash}")
}

// git config takes POSIX extended regexes
fn escape_ere(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if ".[]()*+?{}|^$\\".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
