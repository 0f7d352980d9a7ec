use {
    clap::Subcommand,
    filaman_config::FilamanConfig,
    filaman_pages::{PageDiscovery, render},
};

#[derive(Subcommand)]
pub enum PageAction {
    /// List pages (published only, unless --all).
    List {
        #[arg(long)]
        all: bool,
    },
    /// Print a page body, rendered to HTML with --html.
    Show {
        slug: String,
        #[arg(long)]
        html: bool,
    },
}

pub fn run(action: PageAction, config: &FilamanConfig) -> anyhow::Result<bool> {
    let cwd = std::env::current_dir()?;
    let discovery = PageDiscovery::new(config.pages_dir(&cwd));

    let ok = match action {
        PageAction::List { all } => {
            let pages = if all {
                discovery.discover()
            } else {
                discovery.published_pages()
            };
            println!("{:<20} {:<30} {:<6} {}", "SLUG", "TITLE", "ORDER", "PUBLISHED");
            for page in pages {
                println!(
                    "{:<20} {:<30} {:<6} {}",
                    page.slug, page.title, page.order, page.published
                );
            }
            true
        },
        PageAction::Show { slug, html } => match discovery.find_by_slug(&slug) {
            Some(page) => {
                if html {
                    println!("{}", render::render_markdown(&page.body));
                } else {
                    println!("{}", page.body);
                }
                true
            },
            None => {
                eprintln!("page not found: {slug}");
                false
            },
        },
    };
    Ok(ok)
}
