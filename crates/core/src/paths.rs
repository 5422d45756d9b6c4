use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Paths {
    pub base: PathBuf,
}

impl Paths {
    pub fn new() -> Self {
        let base = dirs::home_dir()
            .map(|h| h.join(".valet"))
            .unwrap_or_else(|| PathBuf::from(".valet"));
        Self { base }
    }

    pub fn with_base(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn config_file(&self) -> PathBuf {
        self.base.join("config.json")
    }

    pub fn workspace(&self) -> PathBuf {
        self.base.join("workspace")
    }

    pub fn memory_dir(&self) -> PathBuf {
        self.workspace().join("memory")
    }

    pub fn memory_db(&self) -> PathBuf {
        self.memory_dir().join("memory.db")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.workspace().join("reports")
    }

    pub fn drafts_dir(&self) -> PathBuf {
        self.workspace().join("drafts")
    }

    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::create_dir_all(self.workspace())?;
        std::fs::create_dir_all(self.memory_dir())?;
        std::fs::create_dir_all(self.reports_dir())?;
        std::fs::create_dir_all(self.drafts_dir())?;
        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new()
    }
}
