use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

const BUILTIN_DECK: &str = include_str!("../assets/projects.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Completed,
    Ongoing,
    Planned,
}

impl ProjectStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Completed => "completed",
            ProjectStatus::Ongoing => "ongoing",
            ProjectStatus::Planned => "planned",
        }
    }
}

/// One carousel slide.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    /// Image path, relative to the deck file.
    #[serde(default)]
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub year: u16,
    pub status: ProjectStatus,
}

impl Project {
    /// Tags joined the way compact cards show them.
    pub fn tag_line(&self) -> String {
        self.tags.join(" · ")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub customers: u32,
    pub projects: Vec<Project>,
    /// Directory image paths are resolved against.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Deck {
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_DECK).context("Bundled project deck is invalid")
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let deck: Deck = toml::from_str(raw).context("Failed to parse project deck")?;
        if deck.projects.is_empty() {
            bail!("Project deck contains no projects");
        }
        Ok(deck)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project deck {}", path.display()))?;
        let mut deck = Self::parse(&raw)
            .with_context(|| format!("Invalid project deck {}", path.display()))?;
        deck.base_dir = path.parent().map(Path::to_path_buf);
        Ok(deck)
    }

    pub fn image_path(&self, project: &Project) -> Option<PathBuf> {
        let image = project.image.as_ref()?;
        Some(match &self.base_dir {
            Some(dir) if image.is_relative() => dir.join(image),
            _ => image.clone(),
        })
    }

    pub fn ongoing(&self) -> impl Iterator<Item = &Project> {
        self.projects
            .iter()
            .filter(|p| p.status == ProjectStatus::Ongoing)
    }

    pub fn stats(&self) -> ProjectStats {
        let count = |status: ProjectStatus| self.projects.iter().filter(|p| p.status == status).count() as u32;
        ProjectStats {
            completed: count(ProjectStatus::Completed),
            ongoing: count(ProjectStatus::Ongoing),
            customers: self.customers,
            total: self.projects.len() as u32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectStats {
    pub completed: u32,
    pub ongoing: u32,
    pub customers: u32,
    pub total: u32,
}

impl ProjectStats {
    /// Stat cards in display order.
    pub fn cards(&self) -> [(&'static str, u32); 4] {
        [
            ("Projects Completed", self.completed),
            ("Ongoing Projects", self.ongoing),
            ("Happy Customers", self.customers),
            ("Total Projects", self.total),
        ]
    }
}
