use super::dispatch::HandlingMethod;

/// Caller choices for one invocation of [`run`](super::run).
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub show_status: bool,
    pub handling: HandlingMethod,
    /// Appended after the resolved command's own arguments.
    pub args: Vec<String>,
    pub package_name: String,
    pub package_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            show_status: false,
            handling: HandlingMethod::default(),
            args: Vec::new(),
            package_name: env!("CARGO_PKG_NAME").to_string(),
            package_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl RunOptions {
    pub fn with_show_status(mut self, show: bool) -> Self {
        self.show_status = show;
        self
    }

    pub fn with_handling(mut self, handling: HandlingMethod) -> Self {
        self.handling = handling;
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Identity the `chooser` field of a config is checked against.
    pub fn with_package(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.package_name = name.into();
        self.package_version = version.into();
        self
    }
}
