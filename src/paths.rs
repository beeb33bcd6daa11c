use std::{path::PathBuf, sync::OnceLock};

pub struct Paths {
    pub cache: PathBuf,
    pub config: PathBuf,
    pub data: PathBuf,
}

pub static NAME: &str = "quicklauncher";

pub fn paths() -> &'static Paths {
    static PATHS: OnceLock<Paths> = OnceLock::new();
    PATHS.get_or_init(Paths::new)
}

impl Paths {
    fn new() -> Self {
        let username = whoami::username();
        #[cfg(target_os = "macos")]
        let user_dir = PathBuf::from("/Users").join(username);
        #[cfg(not(target_os = "macos"))]
        let user_dir = PathBuf::from("/home").join(username);
        Self {
            #[cfg(target_os = "macos")]
            cache: user_dir.join("Library/Caches").join(NAME),
            #[cfg(not(target_os = "macos"))]
            cache: user_dir.join(".cache").join(NAME),
            config: user_dir.join(".config").join(NAME),
            #[cfg(target_os = "macos")]
            data: user_dir.join("Library/Application Support").join(NAME),
            #[cfg(not(target_os = "macos"))]
            data: user_dir.join(".local/share").join(NAME),
        }
    }

    pub fn socket(&self) -> PathBuf {
        self.cache.join(format!("{}.sock", NAME))
    }

    pub fn history(&self) -> PathBuf {
        self.data.join("clipboard_history.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config.join("config.toml")
    }
}
