use serde::{Deserialize, Serialize};

/// Build options shared by the normalizer, the trie merger and the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterOptions {
    /// Treat a bare trailing slash as equivalent to no trailing slash.
    pub trim: bool,
    /// Case-insensitive literal/header matching and case conflict detection.
    #[serde(rename = "case")]
    pub case_insensitive: bool,
    /// Emit a trace of every declared route before compiling.
    pub debug: bool,
}

impl RouterOptions {
    pub fn builder() -> RouterOptionsBuilder {
        RouterOptionsBuilder::default()
    }
}

#[derive(Debug, Default, Clone)]
pub struct RouterOptionsBuilder {
    options: RouterOptions,
}

impl RouterOptionsBuilder {
    pub fn trim(mut self, value: bool) -> Self {
        self.options.trim = value;
        self
    }

    pub fn case_insensitive(mut self, value: bool) -> Self {
        self.options.case_insensitive = value;
        self
    }

    pub fn debug(mut self, value: bool) -> Self {
        self.options.debug = value;
        self
    }

    pub fn build(self) -> RouterOptions {
        self.options
    }
}
