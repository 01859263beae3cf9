use std::{
    env::{self, VarError},
    ffi::OsString,
    io::{IsTerminal, stderr},
    time::Duration,
};

use crate::error::{Maybe, config_error};

pub const DEFAULT_PUSH_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_BRANCH_KEY: &str = "rmb.defaultBranch";

pub struct Settings {
    pub push_timeout: Duration,
    pub default_branch_key: String,
    pub git_program: OsString,
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            push_timeout: DEFAULT_PUSH_TIMEOUT,
            default_branch_key: DEFAULT_BRANCH_KEY.to_string(),
            git_program: "git".into(),
            color: false,
        }
    }
}

impl Settings {
    pub fn from_env() -> Maybe<Self> {
        Self::from_vars(env_var, stderr().is_terminal())
    }

    fn from_vars(
        var: impl Fn(&str) -> Result<String, VarError>,
        is_terminal: bool,
    ) -> Maybe<Self> {
        let mut settings = Self::default();

        if let Some(raw) = read_var(&var, "RMB_PUSH_TIMEOUT")? {
            settings.push_timeout = parse_timeout(&raw)?;
        }
        if let Some(key) = read_var(&var, "RMB_DEFAULT_BRANCH_KEY")? {
            settings.default_branch_key = key;
        }
        if let Some(program) = read_var(&var, "RMB_GIT")? {
            settings.git_program = program.into();
        }
        settings.color = is_terminal && matches!(var("NO_COLOR"), Err(VarError::NotPresent));

        Ok(settings)
    }
}

fn env_var(name: &str) -> Result<String, VarError> {
    env::var(name)
}

fn read_var(
    var: &impl Fn(&str) -> Result<String, VarError>,
    name: &str,
) -> Maybe<Option<String>> {
    match var(name) {
        Ok(v) if !v.is_empty() => Ok(Some(v)),
        Ok(_) | Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => config_error(format!("Non-unicode value for {name}")),
    }
}

fn parse_timeout(raw: &str) -> Maybe<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => config_error(format!(
            "RMB_PUSH_TIMEOUT must be a positive number of seconds, got '{raw}'"
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings_with(vars: &[(&str, &str)], is_terminal: bool) -> Maybe<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_vars(
            |name| vars.get(name).cloned().ok_or(VarError::NotPresent),
            is_terminal,
        )
    }

    #[test]
    fn defaults_without_environment() {
        let settings = settings_with(&[], false).unwrap();
        assert_eq!(settings.push_timeout, Duration::from_secs(30));
        assert_eq!(settings.default_branch_key, "rmb.defaultBranch");
        assert_eq!(settings.git_program, OsString::from("git"));
        assert!(!settings.color);
    }

    #[test]
    fn overrides_from_environment() {
        let settings = settings_with(
            &[
                ("RMB_PUSH_TIMEOUT", "5"),
                ("RMB_DEFAULT_BRANCH_KEY", "init.defaultBranch"),
                ("RMB_GIT", "/usr/local/bin/git"),
            ],
            true,
        )
        .unwrap();
        assert_eq!(settings.push_timeout, Duration::from_secs(5));
        assert_eq!(settings.default_branch_key, "init.defaultBranch");
        assert_eq!(settings.git_program, OsString::from("/usr/local/bin/git"));
        assert!(settings.color);
    }

    #[test]
    fn no_color_disables_color_on_a_terminal() {
        let settings = settings_with(&[("NO_COLOR", "1")], true).unwrap();
        assert!(!settings.color);
    }

    #[test]
    fn rejects_bad_timeouts() {
        assert!(settings_with(&[("RMB_PUSH_TIMEOUT", "soon")], false).is_err());
        assert!(settings_with(&[("RMB_PUSH_TIMEOUT", "0")], false).is_err());
    }
}
