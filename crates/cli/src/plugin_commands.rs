use std::sync::Arc;

use {
    clap::Subcommand,
    filaman_config::FilamanConfig,
    filaman_plugins::{
        paths::PathRegistry,
        registry::{PluginRegistry, RegistryHooks},
        scan::PluginScanner,
        store::PluginStore,
        store_sqlite::SqliteStore,
    },
};

#[derive(Subcommand)]
pub enum PluginAction {
    /// List all discovered plugins, installed or not.
    List,
    /// List installed plugins.
    Installed,
    /// Install a discovered plugin.
    Install { name: String },
    /// Uninstall a plugin (its directory stays on disk).
    Uninstall { name: String },
    /// Enable an installed plugin.
    Enable { name: String },
    /// Disable an installed plugin.
    Disable { name: String },
}

pub async fn run(action: PluginAction, config: &FilamanConfig) -> anyhow::Result<bool> {
    let mut registry = build_registry(config).await?;

    let ok = match action {
        PluginAction::List => {
            print_plugins(registry.get_available().values());
            true
        },
        PluginAction::Installed => {
            print_plugins(registry.get_installed().into_iter());
            true
        },
        PluginAction::Install { name } => {
            let ok = registry.install_ok(&name).await;
            report(ok, "installed", &name);
            ok
        },
        PluginAction::Uninstall { name } => {
            let ok = registry.uninstall_ok(&name).await;
            report(ok, "uninstalled", &name);
            ok
        },
        PluginAction::Enable { name } => {
            let ok = registry.enable_ok(&name).await;
            report(ok, "enabled", &name);
            ok
        },
        PluginAction::Disable { name } => {
            let ok = registry.disable_ok(&name).await;
            report(ok, "disabled", &name);
            ok
        },
    };
    Ok(ok)
}

async fn build_registry(config: &FilamanConfig) -> anyhow::Result<PluginRegistry> {
    let cwd = std::env::current_dir()?;
    let store: Arc<dyn PluginStore> = Arc::new(SqliteStore::new(&config.database_url()).await?);
    let paths = Arc::new(PathRegistry::new(
        filaman_config::data_dir().join("plugin-paths.json"),
    ));

    Ok(PluginRegistry::new(
        PluginScanner::new(config.plugins_dir(&cwd)),
        store,
        paths,
        config.plugins.enabled.clone(),
        RegistryHooks::default(),
    )
    .await)
}

fn print_plugins<'a>(plugins: impl Iterator<Item = &'a filaman_plugins::types::PluginInfo>) {
    println!("{:<24} {:<12} {:<10} {}", "NAME", "VERSION", "INSTALLED", "ENABLED");
    for info in plugins {
        println!(
            "{:<24} {:<12} {:<10} {}",
            info.manifest.name, info.manifest.version, info.installed, info.enabled
        );
    }
}

fn report(ok: bool, verb: &str, name: &str) {
    if ok {
        println!("{verb} plugin '{name}'");
    } else {
        eprintln!("failed: plugin '{name}' could not be {verb} (see logs)");
    }
}
