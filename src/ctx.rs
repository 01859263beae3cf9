use crate::{config::Settings, console::Stderr, git::GitCli};

pub struct Ctx<G, C> {
    pub git: G,
    pub console: C,
    pub settings: Settings,
}

impl<G, C> Ctx<G, C> {
    pub fn color_enabled(&self) -> bool {
        self.settings.color
    }
}

pub fn init_ctx(settings: Settings) -> Ctx<GitCli, Stderr> {
    Ctx {
        git: GitCli::new(settings.git_program.clone()),
        console: Stderr,
        settings,
    }
}
