use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("plugin not found: {name}")]
    PluginNotFound { name: String },

    #[error("'{name}' is a core plugin and cannot be removed or disabled")]
    CoreUnitProtected { name: String },

    #[error("{context}: {source}")]
    DependentSystem {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{message}")]
    Message { message: String },

    #[error("{context}: {source}")]
    External {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl Error {
    #[must_use]
    pub fn plugin_not_found(name: impl Into<String>) -> Self {
        Self::PluginNotFound { name: name.into() }
    }

    #[must_use]
    pub fn core_unit_protected(name: impl Into<String>) -> Self {
        Self::CoreUnitProtected { name: name.into() }
    }

    #[must_use]
    pub fn dependent_system(context: impl Into<String>, source: anyhow::Error) -> Self {
        Self::DependentSystem {
            context: context.into(),
            source: source.into(),
        }
    }

    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn external(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::External {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
